//! High-level client: `VdcClient` with per-group sub-client accessors.
//!
//! Each API group has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the generic call path and the accessors.

use crate::config::Config;
use crate::domain::eligibility::client::Eligibility;
use crate::domain::offers::client::Offers;
use crate::domain::reference::client::ReferenceData;
use crate::endpoint::Endpoint;
use crate::error::{SdkError, SdkResult};
use crate::http::executor::{execute, ApiResult, HttpExecutor};
use crate::http::params::RequestParams;
use crate::http::request::{Request, RequestBuilder};

// Re-export sub-client types for convenience.
pub use crate::domain::eligibility::client::Eligibility as EligibilityClient;
pub use crate::domain::offers::client::Offers as OffersClient;
pub use crate::domain::reference::client::ReferenceData as ReferenceDataClient;

/// The primary entry point for the SDK.
///
/// Owns one [`Config`] and one [`HttpExecutor`]. Calls are synchronous and
/// one at a time; change settings between calls through [`config_mut`](Self::config_mut).
///
/// ```rust,ignore
/// let client = VdcClient::builder()
///     .config(Config::from_defaults(&ProjectDefaults::from_env()?))
///     .build()?;
/// let result = client.offers().all(&OffersPage::new().with_max_offers(10))?;
/// println!("{}", result.body);
/// ```
pub struct VdcClient {
    config: Config,
    executor: Box<dyn HttpExecutor>,
}

impl VdcClient {
    pub fn builder() -> VdcClientBuilder {
        VdcClientBuilder::default()
    }

    /// Client with `config` and the reqwest transport.
    #[cfg(feature = "http")]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            executor: Box::new(crate::http::transport::ReqwestExecutor::new()),
        }
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn offers(&self) -> Offers<'_> {
        Offers { client: self }
    }

    pub fn reference_data(&self) -> ReferenceData<'_> {
        ReferenceData { client: self }
    }

    pub fn eligibility(&self) -> Eligibility<'_> {
        Eligibility { client: self }
    }

    // ── Config ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    // ── Generic call path ────────────────────────────────────────────────

    /// Build the request for `endpoint` without sending it.
    pub fn prepare(&self, endpoint: impl Into<Endpoint>, params: RequestParams) -> SdkResult<Request> {
        RequestBuilder::new(&self.config).build(endpoint.into().descriptor(), params)
    }

    /// Call `endpoint` with `params`.
    ///
    /// Validation and signing happen before anything is sent; a missing
    /// required parameter never reaches the executor.
    pub fn call(&self, endpoint: impl Into<Endpoint>, params: RequestParams) -> SdkResult<ApiResult> {
        let request = self.prepare(endpoint, params)?;
        execute(self.executor.as_ref(), &self.config, &request)
    }

    /// Like [`call`](Self::call) with extra per-call headers.
    pub fn call_with_headers(
        &self,
        endpoint: impl Into<Endpoint>,
        params: RequestParams,
        headers: &[(&str, &str)],
    ) -> SdkResult<ApiResult> {
        let request = RequestBuilder::new(&self.config)
            .headers(headers.iter().copied())
            .build(endpoint.into().descriptor(), params)?;
        execute(self.executor.as_ref(), &self.config, &request)
    }
}

impl std::fmt::Debug for VdcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VdcClient")
            .field("host", &self.config.host())
            .finish_non_exhaustive()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct VdcClientBuilder {
    config: Option<Config>,
    executor: Option<Box<dyn HttpExecutor>>,
}

impl VdcClientBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom transport (tests, alternative HTTP stacks).
    pub fn executor(mut self, executor: impl HttpExecutor + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn build(self) -> Result<VdcClient, SdkError> {
        let executor = match self.executor {
            Some(executor) => executor,
            None => default_executor()?,
        };
        Ok(VdcClient {
            config: self.config.unwrap_or_default(),
            executor,
        })
    }
}

#[cfg(feature = "http")]
fn default_executor() -> Result<Box<dyn HttpExecutor>, SdkError> {
    Ok(Box::new(crate::http::transport::ReqwestExecutor::new()))
}

#[cfg(not(feature = "http"))]
fn default_executor() -> Result<Box<dyn HttpExecutor>, SdkError> {
    Err(SdkError::Config(
        "no HTTP executor configured; enable the `http` feature or pass one to the builder".to_string(),
    ))
}
