//! Search module
//!
//! Request construction, the search client and the response models.

mod client;
mod models;
mod request;

pub use client::SearchClient;
pub use models::{SearchHeader, SearchResponse, SearchResult, SearchResultHeader};
pub use request::{search_url, DbMask, ImageSource, SearchRequest};
