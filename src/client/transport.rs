//! Construction of the shared `reqwest` client from a [`FetchConfig`].

use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};

use super::config::FetchConfig;
use crate::error::FetchError;

/// Builds a client from `config`.
///
/// Builder failures (for example a User-Agent that is not a valid header
/// value) are reported as [`FetchError::Client`].
pub(crate) fn build_client(config: &FetchConfig) -> Result<Client, FetchError> {
    let client = client_builder(config).build().map_err(|e| {
        warn!(error = %e, "failed to build HTTP client");
        FetchError::client(e)
    })?;
    debug!(
        gzip = config.gzip,
        connect_timeout = ?config.connect_timeout,
        timeout = ?config.timeout,
        "HTTP client built"
    );
    Ok(client)
}

fn client_builder(config: &FetchConfig) -> ClientBuilder {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(config.gzip);
    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder
}
