//! Host constants for the Visa Developer Center APIs.

/// Sandbox host, used by default.
pub const SANDBOX_HOST: &str = "https://sandbox.api.visa.com";

/// Production host.
pub const PRODUCTION_HOST: &str = "https://api.visa.com";

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("vdc-sdk-rust/", env!("CARGO_PKG_VERSION"));
