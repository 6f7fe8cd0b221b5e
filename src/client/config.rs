//! Client construction settings.
//!
//! Nothing here changes transport behavior unless set: by default no timeout
//! is imposed beyond what `reqwest` does natively.

use std::time::Duration;

use crate::user_agent;

/// Settings used to build the underlying HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Limit on establishing a connection. `None` leaves the transport default.
    pub connect_timeout: Option<Duration>,
    /// Limit on the whole round trip. `None` leaves the transport default.
    pub timeout: Option<Duration>,
    /// User-Agent sent unless a request overrides it.
    pub user_agent: String,
    /// Transparent gzip decoding.
    pub gzip: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            timeout: None,
            user_agent: user_agent::default_user_agent(),
            gzip: true,
        }
    }
}

impl FetchConfig {
    /// Sets the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the overall request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the default User-Agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enables or disables gzip decoding.
    #[must_use]
    pub fn gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }
}
