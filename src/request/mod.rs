//! Request options and the options-to-request translation.

mod builder;
mod options;

pub use builder::{PreparedRequest, build_request};
pub use options::{Body, DEFAULT_METHOD, Options};
