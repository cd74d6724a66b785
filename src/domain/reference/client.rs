//! Reference data sub-client.

use crate::client::VdcClient;
use crate::domain::join_ids;
use crate::domain::reference::{MerchantParams, RefParams};
use crate::endpoint::ReferenceDataEndpoint;
use crate::error::SdkResult;
use crate::http::executor::ApiResult;
use crate::http::params::RequestParams;

pub struct ReferenceData<'a> {
    pub(crate) client: &'a VdcClient,
}

impl<'a> ReferenceData<'a> {
    /// Addresses of the given merchants. Only accessible merchants are returned.
    pub fn merchant_address<S: AsRef<str>>(
        &self,
        merchant_ids: &[S],
        start_index: Option<u32>,
    ) -> SdkResult<ApiResult> {
        let mut params = RequestParams::new().with("merchantIds", join_ids(merchant_ids));
        if let Some(start_index) = start_index {
            params.insert("start_index", start_index);
        }
        self.client.call(ReferenceDataEndpoint::MerchantAddress, params)
    }

    pub fn merchant(&self, query: &MerchantParams) -> SdkResult<ApiResult> {
        let params = RequestParams::from_serializable(query)?;
        self.client.call(ReferenceDataEndpoint::Merchant, params)
    }

    /// Reference tables used as filter keys for `byfilter`.
    pub fn reference(&self, query: &RefParams) -> SdkResult<ApiResult> {
        let params = RequestParams::from_serializable(query)?;
        self.client.call(ReferenceDataEndpoint::Reference, params)
    }
}
