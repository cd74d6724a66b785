//! Request execution: one round trip, status mapping, debug output.

use std::fs::OpenOptions;
use std::io::Write;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn, Span};

use crate::config::{Config, DebugOutput, TransportOptions};
use crate::error::{ApiError, ErrorBody, SdkError, TransportError, TransportErrorKind};
use crate::http::headers::{parse_raw_headers, ResponseHeaders};
use crate::http::request::Request;

/// What a transport returns: status, raw header block, raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status. `0` means no status was obtained.
    pub status: u16,
    pub raw_headers: String,
    pub body: String,
}

/// Sends one request and returns the raw response.
///
/// Implementations apply TLS, proxy and timeout settings from `options`
/// and never retry.
pub trait HttpExecutor {
    fn send(&self, request: &Request, options: &TransportOptions) -> Result<RawResponse, TransportError>;
}

impl<T: HttpExecutor + ?Sized> HttpExecutor for &T {
    fn send(&self, request: &Request, options: &TransportOptions) -> Result<RawResponse, TransportError> {
        (**self).send(request, options)
    }
}

impl<T: HttpExecutor + ?Sized> HttpExecutor for Box<T> {
    fn send(&self, request: &Request, options: &TransportOptions) -> Result<RawResponse, TransportError> {
        (**self).send(request, options)
    }
}

/// A 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    /// Raw payload; decode with [`json`](Self::json) when it is JSON.
    pub body: String,
    pub status_code: u16,
    pub headers: ResponseHeaders,
}

impl ApiResult {
    /// Decode the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SdkError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decode the body as generic JSON.
    pub fn json_value(&self) -> Result<serde_json::Value, SdkError> {
        self.json()
    }
}

/// Run `request` through `executor`.
///
/// # Errors
///
/// * [`SdkError::Transport`] when no HTTP status was obtained
/// * [`SdkError::Api`] for any non-2xx status
#[instrument(
    name = "api_request",
    skip(executor, config, request),
    fields(
        http.method = %request.method,
        http.url = %request.url,
        http.status_code = tracing::field::Empty,
        otel.kind = "client",
    )
)]
pub fn execute(executor: &dyn HttpExecutor, config: &Config, request: &Request) -> Result<ApiResult, SdkError> {
    if config.debug() {
        write_debug(
            config.debug_output(),
            "HTTP Request body",
            request.body.as_deref().unwrap_or(""),
        );
    }

    let response = executor.send(request, &config.transport_options())?;

    if config.debug() {
        write_debug(config.debug_output(), "HTTP Response body", &response.body);
    }

    Span::current().record("http.status_code", response.status);

    if response.status == 0 {
        return Err(TransportError::new(&request.url, "", TransportErrorKind::Request).into());
    }

    let headers = parse_raw_headers(&response.raw_headers);

    if !(200..300).contains(&response.status) {
        debug!(status = response.status, "request failed");
        return Err(ApiError::new(
            &request.url,
            response.status,
            headers,
            ErrorBody::parse(&response.body),
        )
        .into());
    }

    debug!(status = response.status, bytes = response.body.len(), "request succeeded");

    Ok(ApiResult {
        body: response.body,
        status_code: response.status,
        headers,
    })
}

/// Frame a payload for the debug sink.
pub fn debug_frame(label: &str, body: &str) -> String {
    format!("[DEBUG] {} ~BEGIN~\n{}\n~END~\n", label, body)
}

fn write_debug(output: &DebugOutput, label: &str, body: &str) {
    let frame = debug_frame(label, body);
    let result = match output {
        DebugOutput::Stdout => std::io::stdout().write_all(frame.as_bytes()),
        DebugOutput::Stderr => std::io::stderr().write_all(frame.as_bytes()),
        DebugOutput::File(path) => OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(frame.as_bytes())),
    };
    if let Err(e) = result {
        warn!(error = %e, "could not write debug output");
    }
}
