//! Default User-Agent string.

/// Project URL advertised in the User-Agent.
const PROJECT_UA_URL: &str = "https://github.com/youga/fetch";

/// Default User-Agent for requests sent by this crate.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("fetch/{version} (+{PROJECT_UA_URL})")
}
