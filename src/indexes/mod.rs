//! Index-specific result payloads
//!
//! Each index the service searches has its own `data` schema. Only the
//! fields shared by every index live in [`CommonData`]; a schema for a
//! particular index implements [`IndexData`] so it can be requested with
//! [`SearchResult::decode`](crate::search::SearchResult::decode).

mod danbooru;

pub use danbooru::DanbooruData;

use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const PIXIV: u32 = 5;
pub const DANBOORU: u32 = 9;
pub const YANDERE: u32 = 12;
pub const GELBOORU: u32 = 25;
pub const KONACHAN: u32 = 26;

/// Payload schema for one index
pub trait IndexData: DeserializeOwned + Default {
    /// Numeric index id reported in result headers
    const INDEX_ID: u32;
    /// Short name used in error messages
    const NAME: &'static str;
}

/// Result data common to all indexes
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommonData {
    /// Links to the matched work on external sites
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub ext_urls: Vec<String>,
}
