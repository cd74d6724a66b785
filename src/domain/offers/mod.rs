//! Offers domain: offer discovery parameters.

pub mod client;

use serde::{Deserialize, Serialize};

/// Paging and update window shared by the offer listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffersPage {
    /// Offers updated on or after this GMT date (`yyyyMMdd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updatefrom: Option<String>,
    /// Offers updated on or before this GMT date (`yyyyMMdd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updateto: Option<String>,
    /// 1-based index of the first offer returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    /// At most 500.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_offers: Option<u32>,
}

impl OffersPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn with_max_offers(mut self, max_offers: u32) -> Self {
        self.max_offers = Some(max_offers);
        self
    }

    /// Restrict to offers updated within `[from, to]` (`yyyyMMdd`).
    pub fn with_updated_between(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.updatefrom = Some(from.into());
        self.updateto = Some(to.into());
        self
    }
}

/// Filters for `byfilter`. Every field is optional; list fields take
/// comma-separated values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_payment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoting_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoting_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redemption_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redemption_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Include expired offers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validfrom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotedfrom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotedto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpins: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins_to_rpins: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accountranges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accountranges_to_rpins: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pans: Option<String>,
    #[serde(rename = "non_cardAttribute", skip_serializing_if = "Option::is_none")]
    pub non_card_attribute: Option<String>,
    /// `latitude,longitude` or a postal address for geo search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// `km` or `mi`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Include offers without a geo location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_geo: Option<bool>,
    #[serde(flatten)]
    pub page: OffersPage,
}

impl OfferFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_merchant_country(mut self, country: impl Into<String>) -> Self {
        self.merchant_country = Some(country.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Offers near `origin` within `radius` `unit`s.
    pub fn with_geo(mut self, origin: impl Into<String>, radius: f64, unit: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self.radius = Some(radius);
        self.unit = Some(unit.into());
        self
    }

    pub fn with_page(mut self, page: OffersPage) -> Self {
        self.page = page;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::params::RequestParams;

    #[test]
    fn test_page_params() {
        let page = OffersPage::new().with_start_index(2).with_max_offers(50);
        let params = RequestParams::from_serializable(&page).unwrap();
        assert_eq!(params.query_string().unwrap(), "max_offers=50&start_index=2");
    }

    #[test]
    fn test_filter_renames_and_flattens_page() {
        let filter = OfferFilter {
            non_card_attribute: Some("Mastercard".to_string()),
            expired: Some(false),
            ..OfferFilter::new()
                .with_category("dining")
                .with_page(OffersPage::new().with_max_offers(5))
        };
        let params = RequestParams::from_serializable(&filter).unwrap();
        assert_eq!(
            params.query_string().unwrap(),
            "category=dining&expired=false&max_offers=5&non_cardAttribute=Mastercard"
        );
    }
}
