//! Rendering of results and errors for the terminal.

use crate::endpoint::Endpoint;
use crate::error::SdkError;
use crate::http::executor::ApiResult;

/// Exit code for an API (non-2xx) failure.
pub const EXIT_API: i32 = 1;
/// Exit code for a transport failure.
pub const EXIT_TRANSPORT: i32 = 2;
/// Exit code for validation, signing and configuration failures.
pub const EXIT_USAGE: i32 = 3;

/// Pretty JSON when the text is JSON, the text unchanged otherwise.
pub fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| body.to_string())
}

pub fn render_success(result: &ApiResult, include_headers: bool) -> String {
    let mut out = String::new();
    if include_headers {
        out.push_str(&format!("Status: {}\n", result.status_code));
        let headers = serde_json::to_string_pretty(&result.headers).unwrap_or_default();
        out.push_str(&format!("Headers: {}\n", headers));
    }
    out.push_str(&format!("Response: {}", pretty_body(&result.body)));
    out
}

pub fn render_error(error: &SdkError, include_headers: bool) -> String {
    match error {
        SdkError::Api(api) => {
            let mut out = format!("Error: {}\n", api.message);
            if include_headers {
                let headers = serde_json::to_string_pretty(api.headers()).unwrap_or_default();
                out.push_str(&format!("Headers: {}\n", headers));
            }
            out.push_str(&format!("Response: {}", api.body().to_pretty_string()));
            out
        }
        other => format!("Error: {}", other),
    }
}

pub fn exit_code(error: &SdkError) -> i32 {
    match error {
        SdkError::Api(_) => EXIT_API,
        SdkError::Transport(_) => EXIT_TRANSPORT,
        SdkError::Validation(_) | SdkError::Signing(_) | SdkError::Config(_) | SdkError::Serde(_) => {
            EXIT_USAGE
        }
    }
}

/// Registry as an aligned table.
pub fn render_endpoints() -> String {
    let rows: Vec<[String; 5]> = Endpoint::iter()
        .map(|endpoint| {
            let d = endpoint.descriptor();
            let required = if d.required.is_empty() {
                "-".to_string()
            } else {
                d.required.join(",")
            };
            [
                d.group.to_string(),
                d.name.to_string(),
                d.method.to_string(),
                d.path.to_string(),
                required,
            ]
        })
        .collect();

    let header = ["GROUP", "NAME", "METHOD", "PATH", "REQUIRED"].map(String::from);
    let mut widths = header.clone().map(|h| h.len());
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorBody, TransportError, TransportErrorKind, ValidationError};
    use crate::http::headers::{parse_raw_headers, ResponseHeaders};

    #[test]
    fn test_render_success_pretty_prints_json() {
        let result = ApiResult {
            body: r#"{"a":1}"#.to_string(),
            status_code: 200,
            headers: parse_raw_headers("Content-Type: application/json\n"),
        };
        assert_eq!(render_success(&result, false), "Response: {\n  \"a\": 1\n}");
        let with_headers = render_success(&result, true);
        assert!(with_headers.starts_with("Status: 200\nHeaders: {"));
        assert!(with_headers.contains("\"Content-Type\": \"application/json\""));
    }

    #[test]
    fn test_render_success_keeps_non_json() {
        let result = ApiResult {
            body: "plain".to_string(),
            status_code: 200,
            headers: ResponseHeaders::default(),
        };
        assert_eq!(render_success(&result, false), "Response: plain");
    }

    #[test]
    fn test_render_api_error_and_exit_codes() {
        let api = SdkError::Api(ApiError::new(
            "https://h/p",
            404,
            ResponseHeaders::default(),
            ErrorBody::parse(r#"{"code":"X"}"#),
        ));
        assert_eq!(
            render_error(&api, false),
            "Error: [404] Error connecting to the API (https://h/p)\nResponse: {\n  \"code\": \"X\"\n}"
        );
        assert_eq!(exit_code(&api), EXIT_API);

        let transport = SdkError::Transport(TransportError::new("u", "refused", TransportErrorKind::Connect));
        assert_eq!(exit_code(&transport), EXIT_TRANSPORT);
        assert_eq!(render_error(&transport, false), "Error: Transport error: API call to u failed: refused");

        let validation = SdkError::Validation(ValidationError::MissingParameter("offerid".to_string()));
        assert_eq!(exit_code(&validation), EXIT_USAGE);
    }

    #[test]
    fn test_render_endpoints_lists_registry() {
        let table = render_endpoints();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("GROUP"));
        assert!(table.contains("/visacardeligibilityservices/v1/promo/redeem"));
        assert!(table.contains("vendorUniqueId,permanentAccountNumber,correlationId"));
    }
}
