//! Search request model and query-string rendering

use crate::indexes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::path::Path;
use tokio::io::AsyncRead;

/// Query component escaping: everything but `A-Z a-z 0-9 - _ . ~`
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Bitmask over index ids; bit `n` selects the index with id `n`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DbMask(u64);

impl DbMask {
    pub const NONE: DbMask = DbMask(0);
    pub const PIXIV: DbMask = DbMask::of(indexes::PIXIV);
    pub const DANBOORU: DbMask = DbMask::of(indexes::DANBOORU);
    pub const YANDERE: DbMask = DbMask::of(indexes::YANDERE);
    pub const GELBOORU: DbMask = DbMask::of(indexes::GELBOORU);
    pub const KONACHAN: DbMask = DbMask::of(indexes::KONACHAN);

    /// Mask selecting a single index. Ids of 64 and above yield an empty mask.
    pub const fn of(index_id: u32) -> Self {
        match 1u64.checked_shl(index_id) {
            Some(bit) => DbMask(bit),
            None => DbMask(0),
        }
    }

    pub const fn from_bits(bits: u64) -> Self {
        DbMask(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Add an index to the mask
    pub const fn with(self, index_id: u32) -> Self {
        DbMask(self.0 | DbMask::of(index_id).0)
    }

    pub const fn contains(self, index_id: u32) -> bool {
        let bit = DbMask::of(index_id).0;
        bit != 0 && self.0 & bit == bit
    }
}

impl BitOr for DbMask {
    type Output = DbMask;

    fn bitor(self, rhs: DbMask) -> DbMask {
        DbMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for DbMask {
    fn bitor_assign(&mut self, rhs: DbMask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for DbMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the query image comes from
pub enum ImageSource {
    /// Remote image URL; an empty string sends no `url` parameter
    Url(String),
    /// Image bytes, read once to the end when the request is built
    Bytes(Box<dyn AsyncRead + Send + Unpin>),
}

impl Default for ImageSource {
    fn default() -> Self {
        ImageSource::Url(String::new())
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            ImageSource::Bytes(_) => f.write_str("Bytes(..)"),
        }
    }
}

/// A single search against the API
#[derive(Debug, Default)]
pub struct SearchRequest {
    /// Query image
    pub image: ImageSource,
    /// Limit matches per index to one
    pub test_mode: bool,
    /// Indexes to search
    pub db_mask: DbMask,
    /// Indexes to ignore
    pub db_mask_exclude: DbMask,
    /// Number of results to request
    pub num_results: u32,
}

impl SearchRequest {
    /// Search by remote image URL
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            image: ImageSource::Url(url.into()),
            ..Default::default()
        }
    }

    /// Search by in-memory image bytes
    pub fn bytes(bytes: Vec<u8>) -> Self {
        Self::reader(std::io::Cursor::new(bytes))
    }

    /// Search by an image stream
    pub fn reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            image: ImageSource::Bytes(Box::new(reader)),
            ..Default::default()
        }
    }

    /// Search by an image file on disk
    pub async fn file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Self::reader(file))
    }

    pub fn num_results(mut self, num_results: u32) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn db_mask(mut self, mask: DbMask) -> Self {
        self.db_mask = mask;
        self
    }

    pub fn db_mask_exclude(mut self, mask: DbMask) -> Self {
        self.db_mask_exclude = mask;
        self
    }

    /// Whether the image is uploaded rather than fetched by URL
    pub fn is_upload(&self) -> bool {
        matches!(self.image, ImageSource::Bytes(_))
    }
}

/// Render `{service}/search.php?...` for a request.
///
/// Parameter order is fixed: `output_type`, `api_key`, `numres`, then the
/// optional `testmode`, `dbmask`, `dbmaski` and `url`.
pub fn search_url(service: &str, api_key: &str, request: &SearchRequest) -> String {
    let mut url = String::with_capacity(service.len() + 64);
    url.push_str(service);
    url.push_str("/search.php?output_type=2&api_key=");
    url.push_str(&query_escape(api_key));
    url.push_str("&numres=");
    url.push_str(&request.num_results.to_string());

    if request.test_mode {
        url.push_str("&testmode=1");
    }
    if !request.db_mask.is_empty() {
        url.push_str("&dbmask=");
        url.push_str(&request.db_mask.to_string());
    }
    if !request.db_mask_exclude.is_empty() {
        url.push_str("&dbmaski=");
        url.push_str(&request.db_mask_exclude.to_string());
    }
    if let ImageSource::Url(ref image_url) = request.image {
        if !image_url.is_empty() {
            url.push_str("&url=");
            url.push_str(&query_escape(image_url));
        }
    }

    url
}

/// Escape a query value, writing spaces as `+`
fn query_escape(value: &str) -> String {
    value
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("+")
}
