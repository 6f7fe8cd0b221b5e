//! Asynchronous dispatch of built requests.
//!
//! This module owns the transport: a single `reqwest` client per
//! [`Fetcher`], built from a [`FetchConfig`], and the `tokio` runtime the
//! round trips run on.
//!
//! # Example
//!
//! ```no_run
//! use fetch::{FormData, Options, fetch};
//!
//! let mut form = FormData::new();
//! form.append_file("report.csv", "text/csv", "upload", b"a,b\n1,2\n");
//!
//! fetch(
//!     "https://example.com/upload",
//!     Options::new().method("POST").form(form),
//!     |outcome| match outcome {
//!         Ok(response) => println!("status {}", response.status()),
//!         Err(error) => eprintln!("upload failed: {error}"),
//!     },
//! );
//! ```

mod config;
mod dispatch;
mod transport;

pub use config::FetchConfig;
pub use dispatch::{Fetcher, fetch, send};
