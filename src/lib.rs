//! Fetch
//!
//! A thin request helper over `reqwest`: describe a request with
//! [`Options`], dispatch it with [`fetch`], and receive a
//! `Result<Response, FetchError>` in a callback exactly once.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`form_data`] - multipart/form-data body encoder
//! - [`request`] - request options and the options-to-request builder
//! - [`client`] - asynchronous dispatch over the shared HTTP client
//! - [`response`] - buffered response with text, JSON and typed decoders
//! - [`date`] - the wire date format used by typed decoding
//! - [`encode`] - JSON payload encoding and query-map projection
//!
//! # Example
//!
//! ```no_run
//! use fetch::{Options, fetch};
//!
//! fetch("https://example.com", Options::new().query("q", "rust"), |outcome| {
//!     match outcome {
//!         Ok(response) if response.ok() => println!("{:?}", response.text()),
//!         Ok(response) => eprintln!("HTTP {}", response.status()),
//!         Err(error) => eprintln!("{error}"),
//!     }
//! });
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod date;
pub mod encode;
mod error;
pub mod form_data;
pub mod request;
pub mod response;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use client::{FetchConfig, Fetcher, fetch, send};
pub use encode::{QueryMap, to_json};
pub use error::FetchError;
pub use form_data::FormData;
pub use request::{Body, Options, PreparedRequest, build_request};
pub use response::{Response, TextEncoding};
