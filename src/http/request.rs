//! Request assembly: parameters, headers, auth and signing.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::auth;
use crate::config::{Config, Credential, KeyLocation};
use crate::endpoint::{EndpointDescriptor, REQUEST_TIMESTAMP};
use crate::error::{SdkError, ValidationError};
use crate::http::method::HttpMethod;
use crate::http::params::RequestParams;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// `requestTimeStamp` layout, e.g. `1/05/2024 03:04:05 PM`.
pub const REQUEST_TIMESTAMP_FORMAT: &str = "%-m/%d/%Y %I:%M:%S %p";

/// A fully built request, ready for an [`HttpExecutor`](crate::http::executor::HttpExecutor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: String,
    /// Resource path as sent, e.g. `/vmorc/offers/v1/all`.
    pub path: String,
    /// Sorted, encoded query (no leading `?`).
    pub query_string: String,
    /// Final header set, in send order.
    pub headers: Vec<(String, String)>,
    /// Serialized body for POST/PUT/PATCH.
    pub body: Option<String>,
}

impl Request {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Builds [`Request`]s from a descriptor and caller params.
///
/// ```rust,ignore
/// let request = RequestBuilder::new(&config)
///     .timestamp(1_700_000_000)
///     .header("X-Client", "batch")
///     .build(&OFFERS_ALL, RequestParams::new().with("max_offers", 5))?;
/// ```
pub struct RequestBuilder<'a> {
    config: &'a Config,
    timestamp: Option<u64>,
    now: Option<DateTime<Utc>>,
    headers: Vec<(String, String)>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            timestamp: None,
            now: None,
            headers: Vec::new(),
        }
    }

    /// Fixed signing timestamp (Unix seconds) instead of the system clock.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Fixed time for `requestTimeStamp` auto-fill.
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Per-call header. Overrides defaults with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// * [`ValidationError::MissingParameter`] for the first absent required param
    /// * [`ValidationError::InvalidHeader`] for an unsendable header
    /// * [`SigningError`](crate::error::SigningError) when x-pay-token has no secret
    pub fn build(self, descriptor: &EndpointDescriptor, params: RequestParams) -> Result<Request, SdkError> {
        let mut params = params.without_empty();

        if descriptor.fills_request_timestamp && !params.has_value(REQUEST_TIMESTAMP) {
            let now = self.now.unwrap_or_else(Utc::now);
            params.insert(REQUEST_TIMESTAMP, format_request_timestamp(&now));
        }

        if let Some(missing) = descriptor.required.iter().find(|name| !params.has_value(name)) {
            return Err(ValidationError::MissingParameter(missing.to_string()).into());
        }

        let path = descriptor.render_path(&mut params)?;

        // Headers: fixed, then config defaults, then basic auth, then per-call.
        let mut headers: Vec<(String, String)> = Vec::new();
        set_header(&mut headers, "Accept", CONTENT_TYPE_JSON);
        set_header(&mut headers, "Content-Type", CONTENT_TYPE_JSON);
        for (name, value) in self.config.default_headers() {
            set_header(&mut headers, name, value);
        }
        if self.config.has_basic_auth() {
            set_header(
                &mut headers,
                "Authorization",
                &auth::basic_authorization(self.config.username(), self.config.password()),
            );
        }
        for (name, value) in &self.headers {
            set_header(&mut headers, name, value);
        }

        // Split params between query and body.
        let (mut query, body) = if descriptor.method.has_body() {
            let content_type = header_value(&headers, "Content-Type").unwrap_or(CONTENT_TYPE_JSON);
            let body = if is_form(content_type) {
                params.form_body()?
            } else {
                params.json_body()?
            };
            (RequestParams::new(), Some(body))
        } else {
            (params, None)
        };

        // Static keys first so the token covers query keys.
        for key in self.config.api_keys() {
            if let Credential::Static(value) = &key.credential {
                let rendered = key.render(value);
                match key.location {
                    KeyLocation::Query => query.insert(key.identifier.clone(), rendered),
                    KeyLocation::Header => set_header(&mut headers, &key.identifier, &rendered),
                }
            }
        }

        let signed_query = query.query_string()?;
        let mut query_tokens = RequestParams::new();

        for key in self.config.api_keys() {
            if key.credential != Credential::XPayToken {
                continue;
            }
            let timestamp = match self.timestamp {
                Some(ts) => ts,
                None => auth::unix_timestamp()?,
            };
            let token = auth::x_pay_token(
                timestamp,
                &path,
                &signed_query,
                body.as_deref().unwrap_or(""),
                self.config.shared_secret(),
            )?;
            let rendered = key.render(&token);
            match key.location {
                KeyLocation::Header => set_header(&mut headers, &key.identifier, &rendered),
                KeyLocation::Query => query_tokens.insert(key.identifier.clone(), rendered),
            }
        }

        // The signature covers the query without tokens; the sent query stays sorted.
        let query_string = if query_tokens.is_empty() {
            signed_query
        } else {
            query.extend(query_tokens);
            query.query_string()?
        };

        for (name, value) in &headers {
            validate_header(name, value)?;
        }

        let mut url = format!("{}{}", self.config.host(), path);
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        debug!(
            method = %descriptor.method,
            endpoint = descriptor.name,
            url = %url,
            "built request"
        );

        Ok(Request {
            method: descriptor.method,
            url,
            path,
            query_string,
            headers,
            body,
        })
    }
}

/// Format a time the way eligibility calls expect `requestTimeStamp`.
pub fn format_request_timestamp(now: &DateTime<Utc>) -> String {
    now.format(REQUEST_TIMESTAMP_FORMAT).to_string()
}

fn is_form(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(CONTENT_TYPE_FORM))
}

fn header_value<'h>(headers: &'h [(String, String)], name: &str) -> Option<&'h str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Set a header; a later value replaces an earlier one of the same name.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

fn validate_header(name: &str, value: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidHeader {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("empty header name"));
    }
    // RFC 7230 token characters.
    let is_tchar = |c: char| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c);
    if !name.chars().all(is_tchar) {
        return Err(invalid("name contains characters not allowed in a header name"));
    }
    if value.chars().any(|c| c == '\r' || c == '\n' || c == '\0') {
        return Err(invalid("value contains a line break or NUL"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;
    use crate::endpoint::{ELIGIBILITY_VALIDATE, OFFERS_ALL, OFFERS_BY_OFFER_ID};
    use crate::error::SigningError;
    use chrono::TimeZone;

    fn eligibility_params() -> RequestParams {
        RequestParams::new()
            .with("vendorUniqueId", "V1")
            .with("permanentAccountNumber", "4111111111111111")
            .with("correlationId", "C1")
    }

    #[test]
    fn test_get_puts_params_in_sorted_query() {
        let config = Config::default();
        let request = RequestBuilder::new(&config)
            .build(
                &OFFERS_ALL,
                RequestParams::new().with("start_index", 1).with("max_offers", 10).with("skip", ""),
            )
            .unwrap();
        assert_eq!(request.query_string, "max_offers=10&start_index=1");
        assert_eq!(
            request.url,
            "https://sandbox.api.visa.com/vmorc/offers/v1/all?max_offers=10&start_index=1"
        );
        assert_eq!(request.body, None);
        assert_eq!(request.header("accept"), Some(CONTENT_TYPE_JSON));
    }

    #[test]
    fn test_missing_required_parameter() {
        let config = Config::default();
        let err = RequestBuilder::new(&config)
            .build(&OFFERS_BY_OFFER_ID, RequestParams::new().with("offerid", ""))
            .unwrap_err();
        assert!(matches!(
            err,
            SdkError::Validation(ValidationError::MissingParameter(ref name)) if name == "offerid"
        ));
    }

    #[test]
    fn test_post_builds_json_body_and_fills_timestamp() {
        let config = Config::default();
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 5).unwrap();
        let request = RequestBuilder::new(&config)
            .now(now)
            .build(&ELIGIBILITY_VALIDATE, eligibility_params())
            .unwrap();
        assert_eq!(request.query_string, "");
        assert_eq!(
            request.body.as_deref(),
            Some(
                r#"{"vendorUniqueId":"V1","permanentAccountNumber":"4111111111111111","correlationId":"C1","requestTimeStamp":"1/05/2024 03:04:05 PM"}"#
            )
        );
    }

    #[test]
    fn test_caller_timestamp_is_kept() {
        let config = Config::default();
        let request = RequestBuilder::new(&config)
            .build(
                &ELIGIBILITY_VALIDATE,
                eligibility_params().with(REQUEST_TIMESTAMP, "12/31/2023 11:59:59 PM"),
            )
            .unwrap();
        assert!(request.body.unwrap().contains("12/31/2023 11:59:59 PM"));
    }

    #[test]
    fn test_form_content_type_yields_urlencoded_body() {
        let config = Config::default();
        let request = RequestBuilder::new(&config)
            .now(Utc.with_ymd_and_hms(2024, 1, 5, 3, 4, 5).unwrap())
            .header("content-type", CONTENT_TYPE_FORM)
            .build(&ELIGIBILITY_VALIDATE, eligibility_params())
            .unwrap();
        assert_eq!(request.header("Content-Type"), Some(CONTENT_TYPE_FORM));
        assert_eq!(
            request.body.as_deref(),
            Some("vendorUniqueId=V1&permanentAccountNumber=4111111111111111&correlationId=C1&requestTimeStamp=1%2F05%2F2024+03%3A04%3A05+AM")
        );
    }

    #[test]
    fn test_header_precedence() {
        let config = Config::default()
            .with_default_header("Content-Type", "text/plain")
            .with_default_header("X-Default", "d");
        let request = RequestBuilder::new(&config)
            .header("CONTENT-TYPE", "application/vnd.custom+json")
            .build(&OFFERS_ALL, RequestParams::new())
            .unwrap();
        assert_eq!(request.header("content-type"), Some("application/vnd.custom+json"));
        assert_eq!(request.header("x-default"), Some("d"));
        assert_eq!(
            request.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case("content-type")).count(),
            1
        );
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = Config::default();
        let err = RequestBuilder::new(&config)
            .header("X-Bad", "a\r\nInjected: yes")
            .build(&OFFERS_ALL, RequestParams::new())
            .unwrap_err();
        assert!(matches!(
            err,
            SdkError::Validation(ValidationError::InvalidHeader { ref name, .. }) if name == "X-Bad"
        ));

        let err = RequestBuilder::new(&config)
            .header("Bad Name", "v")
            .build(&OFFERS_ALL, RequestParams::new())
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(ValidationError::InvalidHeader { .. })));
    }

    #[test]
    fn test_basic_auth_header() {
        let config = Config::default().with_basic_auth("user", "pass");
        let request = RequestBuilder::new(&config).build(&OFFERS_ALL, RequestParams::new()).unwrap();
        assert_eq!(request.header("Authorization"), Some("Basic dXNlcjpwYXNz"));

        let request = RequestBuilder::new(&Config::default())
            .build(&OFFERS_ALL, RequestParams::new())
            .unwrap();
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_x_pay_token_matches_fixture() {
        let config = Config::default()
            .with_shared_secret("s3cr3t")
            .with_api_key(ApiKey::x_pay_token());
        let request = RequestBuilder::new(&config)
            .timestamp(1_700_000_000)
            .build(&OFFERS_ALL, RequestParams::new())
            .unwrap();
        assert_eq!(
            request.header("x-pay-token"),
            Some("xv2:1700000000:a410ce998585465326250a5231836e3102a4fba8729d31ef247ae1332dfed18f")
        );
    }

    #[test]
    fn test_static_query_key_is_signed() {
        let config = Config::default()
            .with_shared_secret("s3cr3t")
            .with_api_key(ApiKey::query("apikey", "K1"))
            .with_api_key(ApiKey::x_pay_token());
        let request = RequestBuilder::new(&config)
            .timestamp(42)
            .build(&OFFERS_ALL, RequestParams::new().with("max_offers", 3))
            .unwrap();
        assert_eq!(request.query_string, "apikey=K1&max_offers=3");
        assert!(request.url.ends_with("?apikey=K1&max_offers=3"));
        assert_eq!(
            request.header("x-pay-token"),
            Some(auth::sign(42, "/vmorc/offers/v1/all", "apikey=K1&max_offers=3", "", "s3cr3t").as_str())
        );
    }

    #[test]
    fn test_token_covers_body() {
        let config = Config::default()
            .with_shared_secret("k")
            .with_api_key(ApiKey::x_pay_token());
        let request = RequestBuilder::new(&config)
            .timestamp(7)
            .build(
                &ELIGIBILITY_VALIDATE,
                eligibility_params().with(REQUEST_TIMESTAMP, "1/01/2024 12:00:00 AM"),
            )
            .unwrap();
        let body = request.body.clone().unwrap();
        assert_eq!(
            request.header("x-pay-token"),
            Some(auth::sign(7, ELIGIBILITY_VALIDATE.path, "", &body, "k").as_str())
        );
    }

    #[test]
    fn test_token_in_query_is_signed_without_itself_and_sorted() {
        let config = Config::default().with_shared_secret("k").with_api_key(ApiKey {
            identifier: "apikey_token".to_string(),
            location: KeyLocation::Query,
            ..ApiKey::x_pay_token()
        });
        let request = RequestBuilder::new(&config)
            .timestamp(7)
            .build(&OFFERS_ALL, RequestParams::new().with("zeta", 1).with("a", 1))
            .unwrap();
        let token = auth::sign(7, "/vmorc/offers/v1/all", "a=1&zeta=1", "", "k");
        assert_eq!(
            request.query_string,
            format!("a=1&apikey_token={}&zeta=1", token.replace(':', "%3A"))
        );
        assert!(request.url.ends_with(&format!("?{}", request.query_string)));
    }

    #[test]
    fn test_token_without_secret_fails() {
        let config = Config::default().with_api_key(ApiKey::x_pay_token());
        let err = RequestBuilder::new(&config)
            .build(&OFFERS_ALL, RequestParams::new())
            .unwrap_err();
        assert!(matches!(err, SdkError::Signing(SigningError::MissingSharedSecret)));
    }

    #[test]
    fn test_format_request_timestamp() {
        let t = Utc.with_ymd_and_hms(2024, 11, 25, 0, 7, 9).unwrap();
        assert_eq!(format_request_timestamp(&t), "11/25/2024 12:07:09 AM");
    }
}
