//! SauceNAO-RS: a client for the SauceNAO reverse image search API
//!
//! Searches are sent either by remote image URL (GET) or by uploading the
//! image bytes (multipart POST). Responses decode into typed structures;
//! each result's index-specific payload is decoded on demand with
//! [`SearchResult::decode`].
//!
//! The client does not rate limit. A 429 response surfaces as
//! [`Error::Quota`] so callers can put their own limiter in front.

pub mod config;
mod de;
pub mod error;
pub mod indexes;
pub mod network;
pub mod search;

pub use config::Settings;
pub use error::{Error, Result};
pub use indexes::{CommonData, DanbooruData, IndexData};
pub use network::{HttpClient, Transport};
pub use search::{DbMask, ImageSource, SearchClient, SearchRequest, SearchResponse, SearchResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
