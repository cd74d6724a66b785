//! Card eligibility domain: validate, prepay and redeem requests.

pub mod client;

use std::str::FromStr;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of generated correlation ids.
pub const CORRELATION_ID_LEN: usize = 15;

/// Random alphanumeric correlation id.
pub fn generate_correlation_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CORRELATION_ID_LEN)
        .map(char::from)
        .collect()
}

/// Card expiration, sent as `{"Month": "MM", "Year": "YY"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationDate {
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Year")]
    pub year: String,
}

impl FromStr for ExpirationDate {
    type Err = ValidationError;

    /// Parse `MM/YY` or `MM/YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ValidationError::InvalidParameter(format!(
                "expiration date must be MM/YY or MM/YYYY, got '{}'",
                s
            ))
        };

        let (month, year) = s.trim().split_once('/').ok_or_else(invalid)?;
        let all_digits = |v: &str| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit());

        if month.len() != 2 || !all_digits(month) || !all_digits(year) {
            return Err(invalid());
        }
        if !matches!(year.len(), 2 | 4) {
            return Err(invalid());
        }
        let m: u8 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&m) {
            return Err(invalid());
        }

        Ok(Self {
            month: month.to_string(),
            year: year.to_string(),
        })
    }
}

/// Body for validate, prepay and redeem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    #[serde(rename = "vendorUniqueId")]
    pub vendor_unique_id: String,
    #[serde(rename = "permanentAccountNumber")]
    pub permanent_account_number: String,
    #[serde(rename = "correlationId")]
    pub correlation_id: String,
    /// GMT `M/dd/yyyy hh:mm:ss a`; filled with the current time when absent.
    #[serde(rename = "requestTimeStamp", skip_serializing_if = "Option::is_none")]
    pub request_time_stamp: Option<String>,
    #[serde(rename = "extendedData", skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<String>,
    #[serde(rename = "numberOfAdditionalRedemptions", skip_serializing_if = "Option::is_none")]
    pub number_of_additional_redemptions: Option<u32>,
    #[serde(rename = "expirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<ExpirationDate>,
    /// Redemption type (redeem only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl EligibilityRequest {
    pub fn new(
        vendor_unique_id: impl Into<String>,
        permanent_account_number: impl Into<String>,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            vendor_unique_id: vendor_unique_id.into(),
            permanent_account_number: permanent_account_number.into(),
            correlation_id: correlation_id.into(),
            ..Default::default()
        }
    }

    /// Request with a generated correlation id.
    pub fn with_generated_correlation_id(
        vendor_unique_id: impl Into<String>,
        permanent_account_number: impl Into<String>,
    ) -> Self {
        Self::new(vendor_unique_id, permanent_account_number, generate_correlation_id())
    }

    pub fn with_request_time_stamp(mut self, timestamp: impl Into<String>) -> Self {
        self.request_time_stamp = Some(timestamp.into());
        self
    }

    pub fn with_extended_data(mut self, data: impl Into<String>) -> Self {
        self.extended_data = Some(data.into());
        self
    }

    pub fn with_additional_redemptions(mut self, count: u32) -> Self {
        self.number_of_additional_redemptions = Some(count);
        self
    }

    pub fn with_expiration_date(mut self, date: ExpirationDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::params::RequestParams;

    #[test]
    fn test_generate_correlation_id() {
        let id = generate_correlation_id();
        assert_eq!(id.len(), CORRELATION_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, generate_correlation_id());
    }

    #[test]
    fn test_expiration_date_parse() {
        assert_eq!(
            "09/27".parse::<ExpirationDate>().unwrap(),
            ExpirationDate {
                month: "09".to_string(),
                year: "27".to_string()
            }
        );
        assert_eq!("12/2030".parse::<ExpirationDate>().unwrap().year, "2030");
        for bad in ["9/27", "13/27", "00/27", "09-27", "09/027", "ab/cd", ""] {
            assert!(bad.parse::<ExpirationDate>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_request_serializes_upstream_names() {
        let request = EligibilityRequest::new("V1", "4111111111111111", "C1")
            .with_additional_redemptions(2)
            .with_expiration_date("09/27".parse().unwrap());
        let params = RequestParams::from_serializable(&request).unwrap();
        assert!(params.has_value("vendorUniqueId"));
        assert!(params.has_value("permanentAccountNumber"));
        assert!(params.has_value("correlationId"));
        assert!(params.has_value("numberOfAdditionalRedemptions"));
        assert!(!params.contains_key("requestTimeStamp"));
        assert_eq!(
            params.flatten().into_iter().filter(|(k, _)| k.starts_with("expirationDate")).count(),
            2
        );
    }
}
