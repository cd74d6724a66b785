//! Static endpoint registry.
//!
//! Every operation the SDK can call is a variant of [`Endpoint`]; each maps to
//! one `'static` [`EndpointDescriptor`] carrying its verb, path and required
//! parameters.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::ValidationError;
use crate::http::method::HttpMethod;
use crate::http::params::RequestParams;

/// API family an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ApiGroup {
    Offers,
    ReferenceData,
    Eligibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum OffersEndpoint {
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "bycontentid")]
    ByContentId,
    #[strum(serialize = "byfilter")]
    ByFilter,
    #[strum(serialize = "byofferid")]
    ByOfferId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum ReferenceDataEndpoint {
    #[strum(serialize = "merchantAddress")]
    MerchantAddress,
    #[strum(serialize = "merchant")]
    Merchant,
    #[strum(serialize = "ref")]
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum EligibilityEndpoint {
    #[strum(serialize = "validate")]
    Validate,
    #[strum(serialize = "prepay")]
    Prepay,
    #[strum(serialize = "redeem")]
    Redeem,
}

/// Any registered endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Offers(OffersEndpoint),
    ReferenceData(ReferenceDataEndpoint),
    Eligibility(EligibilityEndpoint),
}

impl From<OffersEndpoint> for Endpoint {
    fn from(e: OffersEndpoint) -> Self {
        Endpoint::Offers(e)
    }
}

impl From<ReferenceDataEndpoint> for Endpoint {
    fn from(e: ReferenceDataEndpoint) -> Self {
        Endpoint::ReferenceData(e)
    }
}

impl From<EligibilityEndpoint> for Endpoint {
    fn from(e: EligibilityEndpoint) -> Self {
        Endpoint::Eligibility(e)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = self.descriptor();
        write!(f, "{}/{}", d.group, d.name)
    }
}

/// Immutable metadata for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub group: ApiGroup,
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path, possibly with `{name}` placeholders.
    pub path: &'static str,
    pub required: &'static [&'static str],
    /// Fill `requestTimeStamp` with the current time when absent.
    pub fills_request_timestamp: bool,
}

/// Parameters every eligibility call must carry.
pub const ELIGIBILITY_REQUIRED: &[&str] =
    &["vendorUniqueId", "permanentAccountNumber", "correlationId"];

/// Parameter auto-filled on eligibility calls.
pub const REQUEST_TIMESTAMP: &str = "requestTimeStamp";

const fn get(group: ApiGroup, name: &'static str, path: &'static str, required: &'static [&'static str]) -> EndpointDescriptor {
    EndpointDescriptor {
        group,
        name,
        method: HttpMethod::Get,
        path,
        required,
        fills_request_timestamp: false,
    }
}

const fn eligibility(name: &'static str, path: &'static str) -> EndpointDescriptor {
    EndpointDescriptor {
        group: ApiGroup::Eligibility,
        name,
        method: HttpMethod::Post,
        path,
        required: ELIGIBILITY_REQUIRED,
        fills_request_timestamp: true,
    }
}

pub const OFFERS_ALL: EndpointDescriptor =
    get(ApiGroup::Offers, "all", "/vmorc/offers/v1/all", &[]);
pub const OFFERS_BY_CONTENT_ID: EndpointDescriptor =
    get(ApiGroup::Offers, "bycontentid", "/vmorc/offers/v1/bycontentid", &["contentid"]);
pub const OFFERS_BY_FILTER: EndpointDescriptor =
    get(ApiGroup::Offers, "byfilter", "/vmorc/offers/v1/byfilter", &[]);
pub const OFFERS_BY_OFFER_ID: EndpointDescriptor =
    get(ApiGroup::Offers, "byofferid", "/vmorc/offers/v1/byofferid", &["offerid"]);

pub const DATA_MERCHANT_ADDRESS: EndpointDescriptor = get(
    ApiGroup::ReferenceData,
    "merchantAddress",
    "/vmorc/data/v1/merchantAddress",
    &["merchantIds"],
);
pub const DATA_MERCHANT: EndpointDescriptor =
    get(ApiGroup::ReferenceData, "merchant", "/vmorc/data/v1/merchant", &[]);
pub const DATA_REFERENCE: EndpointDescriptor =
    get(ApiGroup::ReferenceData, "ref", "/vmorc/data/v1/ref", &[]);

pub const ELIGIBILITY_VALIDATE: EndpointDescriptor = eligibility(
    "validate",
    "/visacardeligibilityservices/v1/cardeligibility/validate",
);
pub const ELIGIBILITY_PREPAY: EndpointDescriptor = eligibility(
    "prepay",
    "/visacardeligibilityservices/v1/cardeligibility/prepay",
);
// Redeem lives under /promo, not /cardeligibility.
pub const ELIGIBILITY_REDEEM: EndpointDescriptor =
    eligibility("redeem", "/visacardeligibilityservices/v1/promo/redeem");

impl Endpoint {
    pub fn descriptor(&self) -> &'static EndpointDescriptor {
        match self {
            Endpoint::Offers(e) => match e {
                OffersEndpoint::All => &OFFERS_ALL,
                OffersEndpoint::ByContentId => &OFFERS_BY_CONTENT_ID,
                OffersEndpoint::ByFilter => &OFFERS_BY_FILTER,
                OffersEndpoint::ByOfferId => &OFFERS_BY_OFFER_ID,
            },
            Endpoint::ReferenceData(e) => match e {
                ReferenceDataEndpoint::MerchantAddress => &DATA_MERCHANT_ADDRESS,
                ReferenceDataEndpoint::Merchant => &DATA_MERCHANT,
                ReferenceDataEndpoint::Reference => &DATA_REFERENCE,
            },
            Endpoint::Eligibility(e) => match e {
                EligibilityEndpoint::Validate => &ELIGIBILITY_VALIDATE,
                EligibilityEndpoint::Prepay => &ELIGIBILITY_PREPAY,
                EligibilityEndpoint::Redeem => &ELIGIBILITY_REDEEM,
            },
        }
    }

    pub fn group(&self) -> ApiGroup {
        self.descriptor().group
    }

    /// Every registered endpoint, grouped in registry order.
    pub fn iter() -> impl Iterator<Item = Endpoint> {
        OffersEndpoint::iter()
            .map(Endpoint::from)
            .chain(ReferenceDataEndpoint::iter().map(Endpoint::from))
            .chain(EligibilityEndpoint::iter().map(Endpoint::from))
    }

    /// Look up by group and upstream name, e.g. (`Offers`, `"byofferid"`).
    pub fn lookup(group: ApiGroup, name: &str) -> Option<Endpoint> {
        Self::iter().find(|e| {
            let d = e.descriptor();
            d.group == group && d.name == name
        })
    }
}

impl EndpointDescriptor {
    /// Substitute `{name}` placeholders from `params`, consuming them.
    ///
    /// Values are percent-encoded. A missing placeholder value is a
    /// [`ValidationError::MissingParameter`].
    pub fn render_path(&self, params: &mut RequestParams) -> Result<String, ValidationError> {
        let mut rendered = String::with_capacity(self.path.len());
        let mut rest = self.path;

        while let Some(start) = rest.find('{') {
            let end = rest[start..]
                .find('}')
                .map(|i| start + i)
                .ok_or_else(|| {
                    ValidationError::InvalidParameter(format!("unterminated placeholder in {}", self.path))
                })?;
            let name = &rest[start + 1..end];
            let value = params
                .remove(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ValidationError::MissingParameter(name.to_string()))?;

            rendered.push_str(&rest[..start]);
            rendered.push_str(&urlencoding::encode(&value.render()));
            rest = &rest[end + 1..];
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_ten_endpoints() {
        assert_eq!(Endpoint::iter().count(), 10);
        let groups: Vec<_> = Endpoint::iter().map(|e| e.group()).collect();
        assert_eq!(groups.iter().filter(|g| **g == ApiGroup::Offers).count(), 4);
        assert_eq!(groups.iter().filter(|g| **g == ApiGroup::ReferenceData).count(), 3);
        assert_eq!(groups.iter().filter(|g| **g == ApiGroup::Eligibility).count(), 3);
    }

    #[test]
    fn test_redeem_path_differs_from_siblings() {
        let validate = Endpoint::from(EligibilityEndpoint::Validate).descriptor();
        let prepay = Endpoint::from(EligibilityEndpoint::Prepay).descriptor();
        let redeem = Endpoint::from(EligibilityEndpoint::Redeem).descriptor();

        assert_eq!(validate.required, redeem.required);
        assert_eq!(prepay.required, redeem.required);

        let base = |p: &str| p.rsplit_once('/').map(|(b, _)| b.to_string()).unwrap();
        assert_eq!(base(validate.path), base(prepay.path));
        assert_ne!(base(validate.path), base(redeem.path));
        assert_eq!(redeem.path, "/visacardeligibilityservices/v1/promo/redeem");
    }

    #[test]
    fn test_descriptors_methods_and_required() {
        for endpoint in Endpoint::iter() {
            let d = endpoint.descriptor();
            match d.group {
                ApiGroup::Eligibility => {
                    assert_eq!(d.method, HttpMethod::Post);
                    assert!(d.fills_request_timestamp);
                }
                _ => {
                    assert_eq!(d.method, HttpMethod::Get);
                    assert!(!d.fills_request_timestamp);
                }
            }
        }
        assert_eq!(OFFERS_BY_CONTENT_ID.required, &["contentid"]);
        assert_eq!(OFFERS_BY_OFFER_ID.required, &["offerid"]);
        assert_eq!(DATA_MERCHANT_ADDRESS.required, &["merchantIds"]);
        assert!(OFFERS_BY_FILTER.required.is_empty());
    }

    #[test]
    fn test_lookup_and_names() {
        assert_eq!(
            Endpoint::lookup(ApiGroup::Offers, "byofferid"),
            Some(Endpoint::Offers(OffersEndpoint::ByOfferId))
        );
        assert_eq!(Endpoint::lookup(ApiGroup::Offers, "merchant"), None);
        assert_eq!("ref".parse::<ReferenceDataEndpoint>().unwrap(), ReferenceDataEndpoint::Reference);
        assert_eq!(
            Endpoint::from(ReferenceDataEndpoint::MerchantAddress).to_string(),
            "ReferenceData/merchantAddress"
        );
    }

    #[test]
    fn test_render_path_substitutes_and_consumes() {
        let descriptor = EndpointDescriptor {
            group: ApiGroup::Offers,
            name: "test",
            method: HttpMethod::Get,
            path: "/items/{id}/parts/{part}",
            required: &[],
            fills_request_timestamp: false,
        };
        let mut params = RequestParams::new()
            .with("id", "a b")
            .with("part", 7)
            .with("other", "x");
        let path = descriptor.render_path(&mut params).unwrap();
        assert_eq!(path, "/items/a%20b/parts/7");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["other"]);

        let mut missing = RequestParams::new().with("id", "1");
        assert_eq!(
            descriptor.render_path(&mut missing),
            Err(ValidationError::MissingParameter("part".to_string()))
        );
    }

    #[test]
    fn test_render_path_without_placeholders() {
        let mut params = RequestParams::new().with("x", 1);
        assert_eq!(OFFERS_ALL.render_path(&mut params).unwrap(), "/vmorc/offers/v1/all");
        assert_eq!(params.len(), 1);
    }
}
