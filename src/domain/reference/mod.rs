//! Reference data domain: merchants, merchant addresses and lookup tables.

pub mod client;

use serde::{Deserialize, Serialize};

/// Query for merchant data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    /// Restrict to merchants in this program.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl MerchantParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }
}

/// Query for reference tables (categories, countries, languages, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefParams {
    /// Comma-separated resource names, e.g. `categories,languages`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(rename = "programIds", skip_serializing_if = "Option::is_none")]
    pub program_ids: Option<String>,
}

impl RefParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(mut self, resources: impl Into<String>) -> Self {
        self.resources = Some(resources.into());
        self
    }

    pub fn with_languages(mut self, languages: impl Into<String>) -> Self {
        self.languages = Some(languages.into());
        self
    }

    pub fn with_program_ids(mut self, program_ids: impl Into<String>) -> Self {
        self.program_ids = Some(program_ids.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::params::RequestParams;

    #[test]
    fn test_ref_params_rename_program_ids() {
        let params = RequestParams::from_serializable(
            &RefParams::new().with_resources("categories").with_program_ids("P1,P2"),
        )
        .unwrap();
        assert_eq!(params.query_string().unwrap(), "programIds=P1%2CP2&resources=categories");
    }
}
