//! Transport trait and wire-level request/response types

use crate::error::Result;
use async_trait::async_trait;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A file part to send as `multipart/form-data`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Form field name
    pub field_name: &'static str,
    /// File name reported for the part
    pub file_name: &'static str,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Wrap image bytes as the `file` field with file name `image`
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            field_name: "file",
            file_name: "image",
            bytes,
        }
    }
}

/// Fully built request, ready to hand to a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Complete URL including the query string
    pub url: String,
    /// Image upload for POST searches
    pub upload: Option<ImageUpload>,
}

impl ApiRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            upload: None,
        }
    }

    /// Create a POST request carrying an image upload
    pub fn post(url: impl Into<String>, upload: ImageUpload) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            upload: Some(upload),
        }
    }
}

/// HTTP response returned by a [`Transport`]
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Status line text, e.g. `"500 Internal Server Error"`
    pub status_text: String,
    /// Response body
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Create a response with the canonical status text for `status`
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: status_text(status),
            body: body.into(),
        }
    }

    /// Check if response is 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Check if response indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Status line text for a code, falling back to the bare number
pub fn status_text(status: u16) -> String {
    match reqwest::StatusCode::from_u16(status) {
        Ok(code) => match code.canonical_reason() {
            Some(reason) => format!("{} {}", status, reason),
            None => status.to_string(),
        },
        Err(_) => status.to_string(),
    }
}

/// Capability to execute a single HTTP exchange.
///
/// Implementations own connection pooling, TLS and timeouts and must be
/// safe to share between concurrent searches.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and read the whole response
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        (**self).execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(429), "429 Too Many Requests");
        assert_eq!(status_text(500), "500 Internal Server Error");
        assert_eq!(status_text(599), "599");
    }

    #[test]
    fn test_status_helpers() {
        assert!(ApiResponse::new(200, "{}").is_ok());
        assert!(ApiResponse::new(429, "").is_rate_limited());
        assert!(!ApiResponse::new(429, "").is_ok());
        assert!(!ApiResponse::new(201, "").is_ok());
    }

    #[test]
    fn test_upload_defaults() {
        let upload = ImageUpload::new(b"png".to_vec());
        assert_eq!(upload.field_name, "file");
        assert_eq!(upload.file_name, "image");

        let request = ApiRequest::post("https://example.com/search.php", upload);
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.upload.is_some());
    }
}
