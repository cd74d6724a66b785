//! # VDC SDK
//!
//! A Rust client for the Visa Developer Center offer, reference data and card
//! eligibility APIs, plus the `vdc` command-line front-end.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Config, errors, x-pay-token signing, endpoint registry
//! 2. **HTTP pipeline**: `RequestBuilder` → `HttpExecutor` → `ApiResult`
//! 3. **High-Level Client**: `VdcClient` with per-group sub-clients
//! 4. **CLI**: `vdc` binary (feature `cli`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vdc_sdk::prelude::*;
//!
//! let config = Config::default()
//!     .with_basic_auth("user", "pass")
//!     .with_tls(TlsConfig {
//!         certificate_path: Some("cert.pem".into()),
//!         private_key_path: Some("key.pem".into()),
//!         ..TlsConfig::default()
//!     });
//! let client = VdcClient::new(config);
//!
//! let offers = client.offers().all(&OffersPage::new().with_max_offers(10))?;
//! let request = EligibilityRequest::with_generated_correlation_id("VENDOR", "4111111111111111");
//! let validated = client.eligibility().validate(&request)?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified SDK error types.
pub mod error;

/// Host constants.
pub mod network;

/// Client configuration and project defaults.
pub mod config;

/// x-pay-token signing and Basic authorization.
pub mod auth;

/// Static endpoint registry.
pub mod endpoint;

// ── Layer 2: HTTP pipeline ───────────────────────────────────────────────────

/// Request building, execution and response parsing.
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// Parameter types and sub-clients per API group.
pub mod domain;

/// `VdcClient`: the primary entry point.
pub mod client;

// ── Layer 4: CLI ─────────────────────────────────────────────────────────────

/// `vdc` command-line front-end.
#[cfg(feature = "cli")]
pub mod cli;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Config
    pub use crate::config::{
        ApiKey, Config, Credential, DebugOutput, KeyLocation, ProjectDefaults, ProxyConfig,
        ProxyType, TlsConfig,
    };

    // Endpoints
    pub use crate::endpoint::{
        ApiGroup, EligibilityEndpoint, Endpoint, EndpointDescriptor, OffersEndpoint,
        ReferenceDataEndpoint,
    };

    // Domain types
    pub use crate::domain::eligibility::{generate_correlation_id, EligibilityRequest, ExpirationDate};
    pub use crate::domain::offers::{OfferFilter, OffersPage};
    pub use crate::domain::reference::{MerchantParams, RefParams};

    // Errors
    pub use crate::error::{
        ApiError, ErrorBody, SdkError, SdkResult, SigningError, TransportError, ValidationError,
    };

    // Network
    pub use crate::network::{PRODUCTION_HOST, SANDBOX_HOST};

    // HTTP pipeline
    pub use crate::http::{
        ApiResult, HeaderValue, HttpExecutor, HttpMethod, ParamValue, RawResponse, Request,
        RequestBuilder, RequestParams, ResponseHeaders,
    };
    #[cfg(feature = "http")]
    pub use crate::http::ReqwestExecutor;

    // Client + sub-clients
    pub use crate::client::{
        EligibilityClient, OffersClient, ReferenceDataClient, VdcClient, VdcClientBuilder,
    };
}
