//! Search response data models

use crate::de::{null_as_default, numeric_string};
use crate::error::{Error, Result};
use crate::indexes::{CommonData, DanbooruData, IndexData};
use serde::Deserialize;

/// Parsed search response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub header: SearchHeader,
    /// Matches in the order returned by the service (descending similarity)
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
}

/// Quota and result metadata for a search response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchHeader {
    /// 0 on success; other values signal partial or query errors
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub results_requested: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub results_returned: u32,

    #[serde(deserialize_with = "null_as_default")]
    pub short_remaining: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub long_remaining: i32,
    #[serde(deserialize_with = "numeric_string")]
    pub short_limit: i32,
    // The service capitalizes this one
    #[serde(rename = "Long_limit", deserialize_with = "numeric_string")]
    pub long_limit: i32,

    #[serde(deserialize_with = "null_as_default")]
    pub minimum_similarity: f64,
}

impl SearchHeader {
    /// Whether the service reported the search as fully successful
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// One match from a search
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub header: SearchResultHeader,
    /// Index-specific payload, decoded on demand
    pub data: serde_json::Value,
}

impl SearchResult {
    /// Decode the payload as the schema of a specific index.
    ///
    /// The header's index id is not checked against `T::INDEX_ID`; fields
    /// are mapped by name and missing or `null` ones take their defaults.
    pub fn decode<T: IndexData>(&self) -> Result<T> {
        if self.data.is_null() {
            return Ok(T::default());
        }
        T::deserialize(&self.data).map_err(|source| Error::Payload {
            index: T::NAME,
            source,
        })
    }

    /// Decode only the fields shared by every index
    pub fn common(&self) -> Result<CommonData> {
        if self.data.is_null() {
            return Ok(CommonData::default());
        }
        CommonData::deserialize(&self.data).map_err(|source| Error::Payload {
            index: "common",
            source,
        })
    }

    /// Decode the payload as Danbooru data
    pub fn as_danbooru(&self) -> Result<DanbooruData> {
        self.decode()
    }

    /// Whether the header says this result came from index `T`
    pub fn is<T: IndexData>(&self) -> bool {
        self.header.index_id == T::INDEX_ID
    }
}

/// Per-match metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchResultHeader {
    #[serde(deserialize_with = "null_as_default")]
    pub index_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub index_id: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
    /// Match confidence as a percentage
    #[serde(deserialize_with = "numeric_string")]
    pub similarity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_string_numbers() {
        let header: SearchHeader = serde_json::from_value(json!({
            "status": 0,
            "results_requested": 8,
            "results_returned": 3,
            "short_remaining": 3,
            "long_remaining": 150,
            "short_limit": "4",
            "Long_limit": "100",
            "minimum_similarity": 51.5,
            "user_id": "0",
            "account_type": "0"
        }))
        .unwrap();

        assert!(header.is_success());
        assert_eq!(header.short_limit, 4);
        assert_eq!(header.long_limit, 100);
        assert_eq!(header.minimum_similarity, 51.5);
    }

    #[test]
    fn test_limit_as_raw_number_rejected() {
        let err = serde_json::from_value::<SearchHeader>(json!({ "short_limit": 6 }));
        assert!(err.is_err());
    }

    #[test]
    fn test_lowercase_long_limit_ignored() {
        let header: SearchHeader =
            serde_json::from_value(json!({ "long_limit": "200" })).unwrap();
        assert_eq!(header.long_limit, 0);
    }

    #[test]
    fn test_bad_similarity_string() {
        let err = serde_json::from_value::<SearchResultHeader>(json!({ "similarity": "high" }));
        assert!(err.is_err());
    }

    #[test]
    fn test_decode_mismatched_payload() {
        let result = SearchResult {
            header: SearchResultHeader::default(),
            data: json!({ "danbooru_id": "not a number" }),
        };

        let err = result.as_danbooru().unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().starts_with("search result as danbooru"));
    }

    #[test]
    fn test_decode_null_payload() {
        let result = SearchResult {
            header: SearchResultHeader::default(),
            data: serde_json::Value::Null,
        };
        assert_eq!(result.as_danbooru().unwrap(), DanbooruData::default());
        assert!(result.common().unwrap().ext_urls.is_empty());
    }

    #[test]
    fn test_null_header_fields_default() {
        let header: SearchHeader = serde_json::from_value(json!({
            "status": null,
            "results_returned": 2,
            "short_limit": null,
            "Long_limit": "200",
            "short_remaining": null,
            "minimum_similarity": null
        }))
        .unwrap();

        assert_eq!(header.status, 0);
        assert_eq!(header.results_returned, 2);
        assert_eq!(header.short_limit, 0);
        assert_eq!(header.long_limit, 200);
        assert_eq!(header.minimum_similarity, 0.0);
    }

    #[test]
    fn test_null_result_fields_default() {
        let response: SearchResponse = serde_json::from_value(json!({
            "header": { "short_limit": "6" },
            "results": [{
                "header": { "similarity": null, "index_id": 9, "thumbnail": null },
                "data": null
            }]
        }))
        .unwrap();

        let result = &response.results[0];
        assert_eq!(result.header.similarity, 0.0);
        assert!(result.header.thumbnail.is_empty());
        assert!(result.data.is_null());

        let empty: SearchResponse =
            serde_json::from_value(json!({ "header": null, "results": null })).unwrap();
        assert!(empty.results.is_empty());
    }
}
