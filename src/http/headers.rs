//! Raw response header parsing.
//!
//! Transports hand back the header block as text. [`parse_raw_headers`] turns it
//! into an ordered mapping where a repeated name keeps every value in order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One header's value(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Single(String),
    /// Values of a repeated header, in arrival order.
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// First value received.
    pub fn first(&self) -> &str {
        match self {
            HeaderValue::Single(v) => v,
            HeaderValue::Multiple(vs) => vs.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// All values in arrival order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            HeaderValue::Single(v) => vec![v.as_str()],
            HeaderValue::Multiple(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            HeaderValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = HeaderValue::Multiple(vec![first, value]);
            }
            HeaderValue::Multiple(vs) => vs.push(value),
        }
    }

    fn fold(&mut self, continuation: &str) {
        let last = match self {
            HeaderValue::Single(v) => v,
            HeaderValue::Multiple(vs) => match vs.last_mut() {
                Some(v) => v,
                None => return,
            },
        };
        if last.is_empty() {
            last.push_str(continuation);
        } else {
            last.push(' ');
            last.push_str(continuation);
        }
    }
}

impl Serialize for HeaderValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HeaderValue::Single(v) => serializer.serialize_str(v),
            HeaderValue::Multiple(vs) => vs.serialize(serializer),
        }
    }
}

/// Parsed response headers. Names are case-sensitive and kept in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    status_line: Option<String>,
    entries: Vec<(String, HeaderValue)>,
}

impl ResponseHeaders {
    /// Status line of the final header block, e.g. `HTTP/1.1 200 OK`.
    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Case-insensitive lookup, returning the first matching name.
    pub fn get_ignore_case(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: &str, value: String) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => existing.push(value),
            None => self.entries.push((name.to_string(), HeaderValue::Single(value))),
        }
    }
}

impl Serialize for ResponseHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Parse a raw header block.
///
/// * lines split on `\n`, trailing `\r` dropped, blank lines skipped
/// * `Name: value` split on the first colon, value trimmed
/// * a line starting with space or tab continues the previous header's last value
/// * a colon-less line before any header is the status line
/// * a new `HTTP/` line starts a new block; only the last block is kept
pub fn parse_raw_headers(raw: &str) -> ResponseHeaders {
    let mut headers = ResponseHeaders::default();
    let mut last_name: Option<String> = None;

    for line in raw.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with("HTTP/") {
            headers = ResponseHeaders {
                status_line: Some(line.trim().to_string()),
                entries: Vec::new(),
            };
            last_name = None;
            continue;
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(name) = &last_name {
                if let Some((_, value)) = headers.entries.iter_mut().find(|(n, _)| n == name) {
                    value.fold(line.trim());
                }
            }
            continue;
        }

        match line.split_once(':') {
            Some((name, value)) => {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                headers.insert(name, value.trim().to_string());
                last_name = Some(name.to_string());
            }
            None if headers.entries.is_empty() && headers.status_line.is_none() => {
                headers.status_line = Some(line.trim().to_string());
            }
            None => {}
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_block() {
        let raw = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nX-Correlation-ID: abc:def\r\n\r\n";
        let headers = parse_raw_headers(raw);
        assert_eq!(headers.status_line(), Some("HTTP/1.1 200 OK"));
        assert_eq!(
            headers.get("Content-Type"),
            Some(&HeaderValue::Single("application/json".to_string()))
        );
        // Split on the first colon only.
        assert_eq!(headers.get("X-Correlation-ID").unwrap().first(), "abc:def");
    }

    #[test]
    fn test_repeated_header_accumulates() {
        let raw = "HTTP/1.1 200 OK\nSet-Cookie: a=1\nSet-Cookie: b=2\nSet-Cookie: c=3\n";
        let headers = parse_raw_headers(raw);
        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("Set-Cookie"),
            Some(&HeaderValue::Multiple(vec![
                "a=1".to_string(),
                "b=2".to_string(),
                "c=3".to_string()
            ]))
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let headers = parse_raw_headers("x-a: 1\nX-A: 2\n");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("x-a").unwrap().first(), "1");
        assert_eq!(headers.get("X-A").unwrap().first(), "2");
        assert_eq!(headers.get_ignore_case("X-a").unwrap().first(), "1");
    }

    #[test]
    fn test_folded_continuation_lines() {
        let raw = "HTTP/1.1 200 OK\r\nX-Long: first\r\n  second\r\n\tthird\r\nX-Next: n\r\n";
        let headers = parse_raw_headers(raw);
        assert_eq!(headers.get("X-Long").unwrap().first(), "first second third");
        assert_eq!(headers.get("X-Next").unwrap().first(), "n");
    }

    #[test]
    fn test_fold_applies_to_last_repeated_value() {
        let raw = "Warning: one\nWarning: two\n more\n";
        let headers = parse_raw_headers(raw);
        assert_eq!(headers.get("Warning").unwrap().values(), vec!["one", "two more"]);
    }

    #[test]
    fn test_continuation_before_any_header_is_ignored() {
        let headers = parse_raw_headers("HTTP/1.1 200 OK\n orphan\nA: b\n");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("A").unwrap().first(), "b");
    }

    #[test]
    fn test_last_block_wins() {
        let raw = "HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\n";
        let headers = parse_raw_headers(raw);
        assert_eq!(headers.status_line(), Some("HTTP/1.1 404 Not Found"));
        assert_eq!(headers.len(), 1);

        let raw = "HTTP/1.1 200 Connection established\r\nProxy-Agent: squid\r\n\r\nHTTP/1.1 200 OK\r\nServer: vdc\r\n";
        let headers = parse_raw_headers(raw);
        assert!(headers.get("Proxy-Agent").is_none());
        assert_eq!(headers.get("Server").unwrap().first(), "vdc");
    }

    #[test]
    fn test_empty_input() {
        let headers = parse_raw_headers("");
        assert!(headers.is_empty());
        assert_eq!(headers.status_line(), None);
    }

    #[test]
    fn test_serializes_multi_values_as_arrays() {
        let headers = parse_raw_headers("A: 1\nB: 2\nB: 3\n");
        let json = serde_json::to_value(&headers).unwrap();
        assert_eq!(json, serde_json::json!({"A": "1", "B": ["2", "3"]}));
    }
}
