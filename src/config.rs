//! Client configuration.
//!
//! A [`Config`] is a plain value owned by each [`VdcClient`](crate::client::VdcClient).
//! Start from [`Config::default`] or [`Config::from_defaults`] and adjust it with
//! the `with_*` builders or `set_*` setters before a call:
//!
//! ```rust,ignore
//! use vdc_sdk::config::{Config, ProjectDefaults};
//!
//! let defaults = ProjectDefaults::from_env()?;
//! let mut config = Config::from_defaults(&defaults)
//!     .with_timeout_secs(30)
//!     .with_default_header("X-Client", "reporting");
//! config.set_ssl_verification(false);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use strum::{Display, EnumString};

use crate::auth::X_PAY_TOKEN;
use crate::error::SdkError;
use crate::network::{DEFAULT_USER_AGENT, SANDBOX_HOST};

/// Where an API key is placed on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLocation {
    Header,
    Query,
}

/// What an API key sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A fixed key value.
    Static(String),
    /// An x-pay-token computed per request from the shared secret.
    XPayToken,
}

/// One API key (or token) attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    /// Header or query parameter name.
    pub identifier: String,
    pub location: KeyLocation,
    /// Optional prefix, sent as `"<prefix> <key>"`.
    pub prefix: Option<String>,
    pub credential: Credential,
}

impl ApiKey {
    /// The x-pay-token header.
    pub fn x_pay_token() -> Self {
        Self {
            identifier: X_PAY_TOKEN.to_string(),
            location: KeyLocation::Header,
            prefix: None,
            credential: Credential::XPayToken,
        }
    }

    /// A static key sent as a query parameter (e.g. `apikey`).
    pub fn query(identifier: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            location: KeyLocation::Query,
            prefix: None,
            credential: Credential::Static(key.into()),
        }
    }

    /// A static key sent as a header.
    pub fn header(identifier: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            location: KeyLocation::Header,
            prefix: None,
            credential: Credential::Static(key.into()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Apply the prefix to a computed or static key value.
    pub fn render(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{} {}", prefix, key),
            None => key.to_string(),
        }
    }
}

/// Proxy protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ProxyType {
    #[default]
    Http,
    Https,
    Socks5,
}

/// Outbound proxy settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: Option<u16>,
    pub proxy_type: ProxyType,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            proxy_type: ProxyType::default(),
            username: None,
            password: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_type(mut self, proxy_type: ProxyType) -> Self {
        self.proxy_type = proxy_type;
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Proxy URL, e.g. `socks5://proxy.local:1080`.
    ///
    /// A host that already carries a scheme is used as-is.
    pub fn url(&self) -> String {
        let base = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("{}://{}", self.proxy_type, self.host)
        };
        match self.port {
            Some(port) => format!("{}:{}", base.trim_end_matches('/'), port),
            None => base,
        }
    }
}

/// TLS material and verification for two-way SSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Client certificate (PEM).
    pub certificate_path: Option<PathBuf>,
    /// Client private key (PEM).
    pub private_key_path: Option<PathBuf>,
    /// CA bundle (PEM) added to the trust store.
    pub ca_cert_path: Option<PathBuf>,
    /// Verify the server certificate. Disable only for sandboxes.
    pub verify_peer: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            certificate_path: None,
            private_key_path: None,
            ca_cert_path: None,
            verify_peer: true,
        }
    }
}

/// Where debug output is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DebugOutput {
    #[default]
    Stdout,
    Stderr,
    /// Appended to this file.
    File(PathBuf),
}

/// Everything the transport needs for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Overall timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Connect timeout; `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    pub proxy: Option<ProxyConfig>,
    pub tls: TlsConfig,
    pub user_agent: String,
}

/// Defaults supplied by the project (credentials, cert paths, business defaults).
///
/// Plain get/set data; [`ProjectDefaults::from_env`] is one way to source it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDefaults {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub certificate_path: Option<PathBuf>,
    pub private_key_path: Option<PathBuf>,
    pub ca_cert_path: Option<PathBuf>,
    pub shared_secret: Option<String>,
    pub api_key: Option<String>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    pub proxy_user: Option<String>,
    pub proxy_password: Option<String>,
    pub vendor_unique_id: Option<String>,
    pub permanent_account_number: Option<String>,
}

impl ProjectDefaults {
    /// Read `VDC_*` environment variables. Empty variables count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] if `VDC_PROXY_PORT` is not a port number.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reading from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SdkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let proxy_port = match get("VDC_PROXY_PORT") {
            Some(port) => Some(port.trim().parse::<u16>().map_err(|_| {
                SdkError::Config(format!("VDC_PROXY_PORT is not a valid port: {}", port))
            })?),
            None => None,
        };

        Ok(Self {
            host: get("VDC_HOST"),
            username: get("VDC_USERNAME"),
            password: get("VDC_PASSWORD"),
            certificate_path: get("VDC_CERT_PATH").map(PathBuf::from),
            private_key_path: get("VDC_PRIVATE_KEY_PATH").map(PathBuf::from),
            ca_cert_path: get("VDC_CA_CERT_PATH").map(PathBuf::from),
            shared_secret: get("VDC_SHARED_SECRET"),
            api_key: get("VDC_API_KEY"),
            proxy_host: get("VDC_PROXY_HOST"),
            proxy_port,
            proxy_user: get("VDC_PROXY_USER"),
            proxy_password: get("VDC_PROXY_PASSWORD"),
            vendor_unique_id: get("VDC_VENDOR_UNIQUE_ID"),
            permanent_account_number: get("VDC_PERMANENT_ACCOUNT_NUMBER"),
        })
    }
}

/// Settings for one client: host, credentials, TLS, proxy, timeouts, debug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    host: String,
    username: String,
    password: String,
    shared_secret: Option<String>,
    api_keys: Vec<ApiKey>,
    default_headers: Vec<(String, String)>,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    proxy: Option<ProxyConfig>,
    tls: TlsConfig,
    debug: bool,
    debug_output: DebugOutput,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: SANDBOX_HOST.to_string(),
            username: String::new(),
            password: String::new(),
            shared_secret: None,
            api_keys: Vec::new(),
            default_headers: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::ZERO,
            connect_timeout: Duration::ZERO,
            proxy: None,
            tls: TlsConfig::default(),
            debug: false,
            debug_output: DebugOutput::default(),
        }
    }
}

impl Config {
    /// Build a config from project defaults.
    ///
    /// An API key becomes the `apikey` query parameter; a shared secret
    /// enables the x-pay-token header.
    pub fn from_defaults(defaults: &ProjectDefaults) -> Self {
        let mut config = Self::default();

        if let Some(host) = &defaults.host {
            config.host = host.trim_end_matches('/').to_string();
        }
        config.username = defaults.username.clone().unwrap_or_default();
        config.password = defaults.password.clone().unwrap_or_default();
        config.tls.certificate_path = defaults.certificate_path.clone();
        config.tls.private_key_path = defaults.private_key_path.clone();
        config.tls.ca_cert_path = defaults.ca_cert_path.clone();

        if let Some(key) = &defaults.api_key {
            config.api_keys.push(ApiKey::query("apikey", key.clone()));
        }
        if let Some(secret) = &defaults.shared_secret {
            config.shared_secret = Some(secret.clone());
            config.api_keys.push(ApiKey::x_pay_token());
        }

        if let Some(host) = &defaults.proxy_host {
            let mut proxy = ProxyConfig::new(host.clone());
            proxy.port = defaults.proxy_port;
            if let Some(user) = &defaults.proxy_user {
                proxy = proxy.with_credentials(
                    user.clone(),
                    defaults.proxy_password.clone().unwrap_or_default(),
                );
            }
            config.proxy = Some(proxy);
        }

        config
    }

    // ── Builders ─────────────────────────────────────────────────────────

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.set_host(host);
        self
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_shared_secret(mut self, secret: impl Into<String>) -> Self {
        self.shared_secret = Some(secret.into());
        self
    }

    pub fn with_api_key(mut self, key: ApiKey) -> Self {
        self.set_api_key(key);
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_default_header(name, value);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_debug(mut self, output: DebugOutput) -> Self {
        self.debug = true;
        self.debug_output = output;
        self
    }

    // ── Setters ──────────────────────────────────────────────────────────

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into().trim_end_matches('/').to_string();
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_shared_secret(&mut self, secret: Option<String>) {
        self.shared_secret = secret;
    }

    /// Add a key, replacing any key with the same identifier.
    pub fn set_api_key(&mut self, key: ApiKey) {
        self.api_keys.retain(|k| k.identifier != key.identifier);
        self.api_keys.push(key);
    }

    pub fn remove_api_key(&mut self, identifier: &str) {
        self.api_keys.retain(|k| k.identifier != identifier);
    }

    /// Add a header sent with every request, replacing one of the same name.
    pub fn add_default_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.default_headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.default_headers.push((name, value.into()));
    }

    pub fn delete_default_header(&mut self, name: &str) {
        self.default_headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    /// Overall timeout. Zero disables it.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Connect timeout. Zero disables it.
    pub fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = timeout;
    }

    pub fn set_proxy(&mut self, proxy: Option<ProxyConfig>) {
        self.proxy = proxy;
    }

    pub fn set_certificate_path(&mut self, path: Option<PathBuf>) {
        self.tls.certificate_path = path;
    }

    pub fn set_private_key_path(&mut self, path: Option<PathBuf>) {
        self.tls.private_key_path = path;
    }

    pub fn set_ca_cert_path(&mut self, path: Option<PathBuf>) {
        self.tls.ca_cert_path = path;
    }

    pub fn set_ssl_verification(&mut self, verify: bool) {
        self.tls.verify_peer = verify;
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_debug_output(&mut self, output: DebugOutput) {
        self.debug_output = output;
    }

    // ── Getters ──────────────────────────────────────────────────────────

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn shared_secret(&self) -> Option<&str> {
        self.shared_secret.as_deref()
    }

    pub fn api_keys(&self) -> &[ApiKey] {
        &self.api_keys
    }

    pub fn api_key(&self, identifier: &str) -> Option<&ApiKey> {
        self.api_keys.iter().find(|k| k.identifier == identifier)
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.proxy.as_ref()
    }

    pub fn tls(&self) -> &TlsConfig {
        &self.tls
    }

    pub fn ssl_verification(&self) -> bool {
        self.tls.verify_peer
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn debug_output(&self) -> &DebugOutput {
        &self.debug_output
    }

    /// Whether HTTP Basic credentials are configured.
    pub fn has_basic_auth(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// Transport settings for one call. Zero durations become `None`.
    pub fn transport_options(&self) -> TransportOptions {
        let non_zero = |d: Duration| if d.is_zero() { None } else { Some(d) };
        TransportOptions {
            timeout: non_zero(self.timeout),
            connect_timeout: non_zero(self.connect_timeout),
            proxy: self.proxy.clone(),
            tls: self.tls.clone(),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Environment summary for bug reports. Contains no credentials.
    pub fn debug_report(&self) -> String {
        format!(
            "VDC Rust SDK Debug Report:\n    OS: {} ({})\n    SDK Package Version: {}\n    Host: {}\n    SSL Verification: {}\n",
            std::env::consts::OS,
            std::env::consts::ARCH,
            env!("CARGO_PKG_VERSION"),
            self.host,
            self.tls.verify_peer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.host(), SANDBOX_HOST);
        assert!(config.ssl_verification());
        assert!(!config.debug());
        assert!(!config.has_basic_auth());
        assert!(config.api_keys().is_empty());
    }

    #[test]
    fn test_transport_options_zero_means_none() {
        let options = Config::default().transport_options();
        assert_eq!(options.timeout, None);
        assert_eq!(options.connect_timeout, None);

        let options = Config::default()
            .with_timeout_secs(30)
            .with_connect_timeout_secs(5)
            .transport_options();
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_default_headers_replace_case_insensitively() {
        let mut config = Config::default()
            .with_default_header("X-Client", "a")
            .with_default_header("x-client", "b");
        assert_eq!(config.default_headers(), &[("x-client".to_string(), "b".to_string())]);

        config.delete_default_header("X-CLIENT");
        assert!(config.default_headers().is_empty());
    }

    #[test]
    fn test_set_api_key_replaces_same_identifier() {
        let mut config = Config::default().with_api_key(ApiKey::query("apikey", "one"));
        config.set_api_key(ApiKey::query("apikey", "two"));
        assert_eq!(config.api_keys().len(), 1);
        assert_eq!(
            config.api_key("apikey").unwrap().credential,
            Credential::Static("two".to_string())
        );
    }

    #[test]
    fn test_api_key_prefix() {
        let key = ApiKey::header("Authorization", "abc").with_prefix("Bearer");
        assert_eq!(key.render("abc"), "Bearer abc");
        assert_eq!(ApiKey::x_pay_token().render("xv2:1:ff"), "xv2:1:ff");
    }

    #[test]
    fn test_proxy_url() {
        let proxy = ProxyConfig::new("proxy.local").with_port(1080).with_type(ProxyType::Socks5);
        assert_eq!(proxy.url(), "socks5://proxy.local:1080");
        assert_eq!(ProxyConfig::new("http://proxy.local").url(), "http://proxy.local");
        assert_eq!("https".parse::<ProxyType>().unwrap(), ProxyType::Https);
    }

    #[test]
    fn test_project_defaults_from_lookup() {
        let defaults = ProjectDefaults::from_lookup(lookup(&[
            ("VDC_USERNAME", "user"),
            ("VDC_PASSWORD", "pass"),
            ("VDC_SHARED_SECRET", "s3cr3t"),
            ("VDC_API_KEY", "key-1"),
            ("VDC_PROXY_HOST", "proxy.local"),
            ("VDC_PROXY_PORT", "3128"),
            ("VDC_VENDOR_UNIQUE_ID", ""),
        ]))
        .unwrap();
        assert_eq!(defaults.username.as_deref(), Some("user"));
        assert_eq!(defaults.proxy_port, Some(3128));
        assert_eq!(defaults.vendor_unique_id, None);

        let config = Config::from_defaults(&defaults);
        assert!(config.has_basic_auth());
        assert_eq!(config.shared_secret(), Some("s3cr3t"));
        assert!(config.api_key("apikey").is_some());
        assert_eq!(config.api_key(X_PAY_TOKEN).unwrap().credential, Credential::XPayToken);
        assert_eq!(config.proxy().unwrap().url(), "http://proxy.local:3128");
    }

    #[test]
    fn test_project_defaults_rejects_bad_port() {
        let result = ProjectDefaults::from_lookup(lookup(&[("VDC_PROXY_PORT", "eighty")]));
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn test_debug_report_has_no_secrets() {
        let config = Config::default()
            .with_basic_auth("user", "hunter2")
            .with_shared_secret("s3cr3t");
        let report = config.debug_report();
        assert!(report.contains("SDK Package Version"));
        assert!(!report.contains("hunter2"));
        assert!(!report.contains("s3cr3t"));
    }
}
