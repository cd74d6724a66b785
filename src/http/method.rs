//! HTTP verbs used by the endpoint registry.

use strum::{Display, EnumIter, EnumString};

/// Request verb. Parses case-insensitively (`"post"`, `"POST"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Parameters travel in the body for POST, PUT and PATCH; in the query otherwise.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    #[cfg(feature = "http")]
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_and_parse() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("FETCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_body_methods() {
        let with_body: Vec<_> = HttpMethod::iter().filter(HttpMethod::has_body).collect();
        assert_eq!(with_body, vec![HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch]);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_to_reqwest() {
        assert_eq!(HttpMethod::Delete.to_reqwest(), reqwest::Method::DELETE);
        assert_eq!(HttpMethod::Options.to_reqwest(), reqwest::Method::OPTIONS);
    }
}
