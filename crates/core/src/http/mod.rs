//! HTTP transport

mod client;

pub(crate) use client::retry_after;
pub use client::{HttpClient, HttpClientBuilder, RetryPolicy};
