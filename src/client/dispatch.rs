//! Request dispatch over the shared HTTP client.
//!
//! [`Fetcher::fetch`] is the callback form: the request is built on the
//! calling thread, any build error is reported through the callback before
//! returning, and the round trip then runs on a `tokio` runtime. The
//! callback is invoked exactly once per call, on a worker of that runtime.
//! [`Fetcher::send`] is the `async` form for callers that want the result in
//! their own task.

use std::sync::OnceLock;

use reqwest::Client;
use tokio::runtime::{Handle, Runtime};
use tracing::{Instrument, Span, debug, instrument, warn};

use super::config::FetchConfig;
use super::transport::build_client;
use crate::error::FetchError;
use crate::request::{Options, PreparedRequest, build_request};
use crate::response::Response;

/// Dispatches requests and normalizes their outcome into `Result<Response, FetchError>`.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use fetch::{Fetcher, Options};
///
/// # async fn example() -> Result<(), fetch::FetchError> {
/// let fetcher = Fetcher::new()?;
/// let response = fetcher.send("https://example.com", &Options::default()).await?;
/// println!("{} {:?}", response.status(), response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    runtime: Option<Handle>,
}

impl Fetcher {
    /// Creates a fetcher with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(&FetchConfig::default())
    }

    /// Creates a fetcher from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn with_config(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(config)?,
            runtime: None,
        })
    }

    /// Runs round trips and callbacks on `handle`.
    ///
    /// Without a pinned runtime, `fetch` uses the runtime it is called from,
    /// or a process-wide background runtime when called outside of one.
    #[must_use]
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Sends a request and hands the outcome to `callback`.
    ///
    /// Build errors (bad URL, method or header) are delivered synchronously
    /// and no network activity happens. Otherwise this returns immediately
    /// and `callback` later receives exactly one of:
    /// - `Err(FetchError::Transport)` if the transport failed
    /// - `Err(FetchError::Unknown)` if the round trip ended without a response
    /// - `Ok(Response)` otherwise, whatever the HTTP status
    #[instrument(
        level = "debug",
        skip(self, options, callback),
        fields(url = %api, method = %options.method)
    )]
    pub fn fetch<F>(&self, api: &str, options: Options, callback: F)
    where
        F: FnOnce(Result<Response, FetchError>) + Send + 'static,
    {
        let prepared = match build_request(api, &options) {
            Ok(prepared) => prepared,
            Err(error) => {
                debug!(error = %error, "request rejected before dispatch");
                callback(Err(error));
                return;
            }
        };

        let mut completion = Completion::new(prepared.url.to_string(), callback);
        let client = self.client.clone();
        self.runtime_handle().spawn(
            async move {
                let outcome = execute(&client, prepared).await;
                completion.complete(outcome);
            }
            .instrument(Span::current()),
        );
    }

    /// Sends a request and returns the outcome to the awaiting caller.
    ///
    /// # Errors
    ///
    /// Returns the build errors of [`build_request`] or
    /// [`FetchError::Transport`].
    #[instrument(
        level = "debug",
        skip(self, options),
        fields(url = %api, method = %options.method)
    )]
    pub async fn send(&self, api: &str, options: &Options) -> Result<Response, FetchError> {
        let prepared = build_request(api, options)?;
        execute(&self.client, prepared).await
    }

    /// Sends an already built request.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the transport fails.
    pub async fn send_prepared(&self, prepared: PreparedRequest) -> Result<Response, FetchError> {
        execute(&self.client, prepared).await
    }

    fn runtime_handle(&self) -> Handle {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .unwrap_or_else(background_runtime)
    }
}

/// Sends a request with the process-wide default [`Fetcher`].
///
/// See [`Fetcher::fetch`].
pub fn fetch<F>(api: &str, options: Options, callback: F)
where
    F: FnOnce(Result<Response, FetchError>) + Send + 'static,
{
    match default_fetcher() {
        Ok(fetcher) => fetcher.fetch(api, options, callback),
        Err(error) => callback(Err(error)),
    }
}

/// Sends a request with the process-wide default [`Fetcher`] and awaits it.
///
/// # Errors
///
/// See [`Fetcher::send`].
pub async fn send(api: &str, options: &Options) -> Result<Response, FetchError> {
    default_fetcher()?.send(api, options).await
}

fn default_fetcher() -> Result<&'static Fetcher, FetchError> {
    static DEFAULT: OnceLock<Fetcher> = OnceLock::new();
    if let Some(fetcher) = DEFAULT.get() {
        return Ok(fetcher);
    }
    let fetcher = Fetcher::new()?;
    Ok(DEFAULT.get_or_init(|| fetcher))
}

/// Runtime used when `fetch` is called outside of any `tokio` runtime.
///
/// # Panics
///
/// Panics if the runtime cannot be started, which only happens when the
/// process cannot spawn threads.
#[allow(clippy::expect_used)]
fn background_runtime() -> Handle {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .thread_name("fetch-worker")
                .enable_all()
                .build()
                .expect("failed to start background fetch runtime")
        })
        .handle()
        .clone()
}

async fn execute(client: &Client, prepared: PreparedRequest) -> Result<Response, FetchError> {
    let PreparedRequest {
        method,
        url,
        headers,
        body,
    } = prepared;
    let target = url.to_string();

    let mut request = client.request(method, url).headers(headers);
    if let Some(body) = body {
        request = request.body(body);
    }

    let response = request.send().await.map_err(|e| {
        warn!(url = %target, error = %e, "transport error");
        FetchError::transport(&target, e)
    })?;

    let status = response.status();
    let headers = response.headers().clone();
    let final_url = response.url().clone();
    let data = response.bytes().await.map_err(|e| {
        warn!(url = %target, error = %e, "failed to read response body");
        FetchError::transport(&target, e)
    })?;

    debug!(status = status.as_u16(), bytes = data.len(), "response received");
    Ok(Response::new(status, headers, final_url, data.to_vec()))
}

/// Owns a `fetch` callback and guarantees it runs exactly once.
///
/// If the round-trip task is dropped before completing (runtime shutdown,
/// panic inside the transport), the callback receives
/// [`FetchError::Unknown`].
struct Completion<F>
where
    F: FnOnce(Result<Response, FetchError>),
{
    url: String,
    callback: Option<F>,
}

impl<F> Completion<F>
where
    F: FnOnce(Result<Response, FetchError>),
{
    fn new(url: String, callback: F) -> Self {
        Self {
            url,
            callback: Some(callback),
        }
    }

    fn complete(&mut self, outcome: Result<Response, FetchError>) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }
}

impl<F> Drop for Completion<F>
where
    F: FnOnce(Result<Response, FetchError>),
{
    fn drop(&mut self) {
        if self.callback.is_some() {
            warn!(url = %self.url, "request ended without a response");
            let error = FetchError::unknown(self.url.clone(), "request ended without a response");
            self.complete(Err(error));
        }
    }
}
