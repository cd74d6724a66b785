//! Offers sub-client: offer discovery queries.

use crate::client::VdcClient;
use crate::domain::join_ids;
use crate::domain::offers::{OfferFilter, OffersPage};
use crate::endpoint::OffersEndpoint;
use crate::error::SdkResult;
use crate::http::executor::ApiResult;
use crate::http::params::RequestParams;

pub struct Offers<'a> {
    pub(crate) client: &'a VdcClient,
}

impl<'a> Offers<'a> {
    /// All offers accessible to the project.
    pub fn all(&self, page: &OffersPage) -> SdkResult<ApiResult> {
        let params = RequestParams::from_serializable(page)?;
        self.client.call(OffersEndpoint::All, params)
    }

    /// Offers by content id.
    pub fn by_content_id<S: AsRef<str>>(&self, content_ids: &[S], page: &OffersPage) -> SdkResult<ApiResult> {
        let mut params = RequestParams::from_serializable(page)?;
        params.insert("contentid", join_ids(content_ids));
        self.client.call(OffersEndpoint::ByContentId, params)
    }

    /// Offers matching `filter`.
    pub fn by_filter(&self, filter: &OfferFilter) -> SdkResult<ApiResult> {
        let params = RequestParams::from_serializable(filter)?;
        self.client.call(OffersEndpoint::ByFilter, params)
    }

    /// Offers by offer id.
    pub fn by_offer_id<S: AsRef<str>>(&self, offer_ids: &[S], page: &OffersPage) -> SdkResult<ApiResult> {
        let mut params = RequestParams::from_serializable(page)?;
        params.insert("offerid", join_ids(offer_ids));
        self.client.call(OffersEndpoint::ByOfferId, params)
    }
}
