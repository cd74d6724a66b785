//! Card eligibility sub-client.

use crate::client::VdcClient;
use crate::domain::eligibility::EligibilityRequest;
use crate::endpoint::EligibilityEndpoint;
use crate::error::SdkResult;
use crate::http::executor::ApiResult;
use crate::http::params::RequestParams;

pub struct Eligibility<'a> {
    pub(crate) client: &'a VdcClient,
}

impl<'a> Eligibility<'a> {
    /// Check a card against the vendor's program.
    pub fn validate(&self, request: &EligibilityRequest) -> SdkResult<ApiResult> {
        self.send(EligibilityEndpoint::Validate, request)
    }

    pub fn prepay(&self, request: &EligibilityRequest) -> SdkResult<ApiResult> {
        self.send(EligibilityEndpoint::Prepay, request)
    }

    /// Redeem a validated card.
    pub fn redeem(&self, request: &EligibilityRequest) -> SdkResult<ApiResult> {
        self.send(EligibilityEndpoint::Redeem, request)
    }

    fn send(&self, endpoint: EligibilityEndpoint, request: &EligibilityRequest) -> SdkResult<ApiResult> {
        let params = RequestParams::from_serializable(request)?;
        self.client.call(endpoint, params)
    }
}
