//! Blocking reqwest transport.

use std::error::Error as _;
use std::path::Path;

use reqwest::blocking::{Client, Response};
use reqwest::redirect::Policy;
use reqwest::{Certificate, Identity, Proxy};
use tracing::debug;

use crate::config::TransportOptions;
use crate::error::{TransportError, TransportErrorKind};
use crate::http::executor::{HttpExecutor, RawResponse};
use crate::http::request::Request;

/// [`HttpExecutor`] backed by a blocking `reqwest` client.
///
/// A client is built per call so TLS, proxy and timeout changes on the
/// config take effect immediately. Redirects are not followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestExecutor;

impl ReqwestExecutor {
    pub fn new() -> Self {
        Self
    }

    fn client(&self, url: &str, options: &TransportOptions) -> Result<Client, TransportError> {
        let mut builder = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .redirect(Policy::none());

        if let Some(connect_timeout) = options.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let tls = &options.tls;
        if !tls.verify_peer {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(ca_path) = &tls.ca_cert_path {
            let pem = read_pem(url, ca_path)?;
            let cert = Certificate::from_pem(&pem).map_err(|e| tls_error(url, &e))?;
            builder = builder.add_root_certificate(cert);
        }
        if let Some(cert_path) = &tls.certificate_path {
            let mut pem = read_pem(url, cert_path)?;
            if let Some(key_path) = &tls.private_key_path {
                pem.push(b'\n');
                pem.extend(read_pem(url, key_path)?);
            }
            let identity = Identity::from_pem(&pem).map_err(|e| tls_error(url, &e))?;
            builder = builder.identity(identity);
        }

        if let Some(proxy_config) = &options.proxy {
            let mut proxy = Proxy::all(proxy_config.url()).map_err(|e| {
                TransportError::new(url, format!("invalid proxy: {}", describe(&e)), TransportErrorKind::Connect)
            })?;
            if let Some(user) = &proxy_config.username {
                proxy = proxy.basic_auth(user, proxy_config.password.as_deref().unwrap_or(""));
            }
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(|e| classify(url, &e))
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn send(&self, request: &Request, options: &TransportOptions) -> Result<RawResponse, TransportError> {
        let client = self.client(&request.url, options)?;

        let mut builder = client.request(request.method.to_reqwest(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(method = %request.method, url = %request.url, "sending request");
        let response = builder.send().map_err(|e| classify(&request.url, &e))?;

        let status = response.status().as_u16();
        let raw_headers = raw_header_block(&response);
        let body = response.text().map_err(|e| {
            TransportError::new(&request.url, describe(&e), TransportErrorKind::Body)
        })?;

        Ok(RawResponse {
            status,
            raw_headers,
            body,
        })
    }
}

/// Rebuild the header block as text. Names arrive lowercased from `http`.
fn raw_header_block(response: &Response) -> String {
    let mut raw = format!("{:?} {}\r\n", response.version(), response.status());
    for (name, value) in response.headers() {
        raw.push_str(name.as_str());
        raw.push_str(": ");
        raw.push_str(&String::from_utf8_lossy(value.as_bytes()));
        raw.push_str("\r\n");
    }
    raw
}

fn read_pem(url: &str, path: &Path) -> Result<Vec<u8>, TransportError> {
    std::fs::read(path).map_err(|e| {
        TransportError::new(
            url,
            format!("could not read {}: {}", path.display(), e),
            TransportErrorKind::Tls,
        )
    })
}

fn tls_error(url: &str, e: &reqwest::Error) -> TransportError {
    TransportError::new(url, describe(e), TransportErrorKind::Tls)
}

fn classify(url: &str, e: &reqwest::Error) -> TransportError {
    let kind = if e.is_timeout() {
        TransportErrorKind::Timeout
    } else if e.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Request
    };
    TransportError::new(url, describe(e), kind)
}

/// Error message with its source chain.
fn describe(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, TlsConfig};

    #[test]
    fn test_missing_ca_file_is_tls_error() {
        let options = Config::default()
            .with_tls(TlsConfig {
                ca_cert_path: Some("/nonexistent/ca.pem".into()),
                ..TlsConfig::default()
            })
            .transport_options();
        let err = ReqwestExecutor::new()
            .client("https://example.invalid", &options)
            .unwrap_err();
        assert_eq!(err.kind, TransportErrorKind::Tls);
        assert!(err.message.contains("/nonexistent/ca.pem"));
    }
}
