use super::{CommonData, IndexData, DANBOORU};
use crate::de::null_as_default;
use serde::Deserialize;

/// Result data for the Danbooru index
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DanbooruData {
    #[serde(flatten)]
    pub common: CommonData,
    #[serde(deserialize_with = "null_as_default")]
    pub danbooru_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    /// Comma separated character tags
    #[serde(deserialize_with = "null_as_default")]
    pub characters: String,
    /// Comma separated copyright tags
    #[serde(deserialize_with = "null_as_default")]
    pub material: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creator: String,
}

impl IndexData for DanbooruData {
    const INDEX_ID: u32 = DANBOORU;
    const NAME: &'static str = "danbooru";
}
