//! HTTP networking module
//!
//! Provides the transport abstraction and the default reqwest-based client.

mod client;
mod transport;

pub use client::HttpClient;
pub use transport::*;
