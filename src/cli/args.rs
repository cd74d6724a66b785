//! `vdc` command-line arguments.
//!
//! Argument structs double as parameter maps: their serde names are the
//! upstream parameter names, so a parsed command converts straight into
//! [`RequestParams`](crate::http::params::RequestParams).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::domain::eligibility::ExpirationDate;

#[derive(Parser, Debug)]
#[command(name = "vdc", version)]
#[command(about = "Query Visa Developer Center offers, reference data and card eligibility", long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub log_verbosity: u8,

    /// Emit logs as JSON
    #[arg(long = "json-logs", global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every API command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonArgs {
    /// Print request and response bodies
    #[arg(long = "vdc-debug", global = true)]
    pub vdc_debug: bool,

    /// Append debug output to this file instead of stdout (implies --vdc-debug)
    #[arg(long = "debug-file", value_name = "PATH", global = true)]
    pub debug_file: Option<PathBuf>,

    /// Disable TLS certificate verification
    #[arg(long = "no-ssl-verify", global = true)]
    pub no_ssl_verify: bool,

    /// API host, e.g. https://api.visa.com
    #[arg(long, value_name = "URL", global = true)]
    pub host: Option<String>,

    /// Print status and response headers with the body
    #[arg(long = "include-headers", global = true)]
    pub include_headers: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Offer discovery
    #[command(subcommand)]
    Offers(OffersCommand),

    /// Reference data
    #[command(subcommand)]
    Data(DataCommand),

    /// Card eligibility
    #[command(subcommand)]
    Eligibility(EligibilityCommand),

    /// List the endpoint registry
    Endpoints,
}

#[derive(Subcommand, Debug)]
pub enum OffersCommand {
    /// All offers accessible to the project
    All(PageArgs),

    /// Offers by content id
    ByContentId(IdsWithPage),

    /// Offers matching filters
    ByFilter(FilterArgs),

    /// Offers by offer id
    ByOfferId(IdsWithPage),
}

#[derive(Subcommand, Debug)]
pub enum DataCommand {
    /// Addresses for the given merchants
    MerchantAddress(MerchantAddressArgs),

    /// Merchant data
    Merchant(MerchantArgs),

    /// Reference tables
    Ref(RefArgs),
}

#[derive(Subcommand, Debug)]
pub enum EligibilityCommand {
    /// Validate a card against a program
    Validate(ValidateArgs),

    /// Prepay check for a card
    Prepay(EligibilityArgs),

    /// Redeem a validated card
    Redeem(RedeemArgs),
}

// ── Offers ───────────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageArgs {
    /// Offers updated after this GMT date (yyyyMMdd)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updatefrom: Option<String>,

    /// Offers updated before this GMT date (yyyyMMdd)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updateto: Option<String>,

    /// Index of the first offer returned
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,

    /// Maximum offers returned (at most 500)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_offers: Option<u32>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct IdsWithPage {
    /// One or more ids
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterArgs {
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_segment: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_payment_type: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_product: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_channel: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoting_region: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoting_country: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redemption_region: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redemption_country: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_region: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_country: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Include expired offers
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validfrom: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validto: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotedfrom: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotedto: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpins: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins_to_rpins: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accountranges: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accountranges_to_rpins: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pans: Option<String>,
    #[arg(long)]
    #[serde(rename = "non_cardAttribute", skip_serializing_if = "Option::is_none")]
    pub non_card_attribute: Option<String>,
    /// Geo search origin
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// km or mi
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_geo: Option<bool>,

    #[command(flatten)]
    #[serde(flatten)]
    pub page: PageArgs,
}

// ── Reference data ───────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MerchantAddressArgs {
    /// One or more merchant ids
    #[arg(value_name = "MERCHANT_ID", required = true)]
    pub ids: Vec<String>,

    #[arg(long)]
    pub start_index: Option<u32>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MerchantArgs {
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,

    /// Program id
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefArgs {
    /// Comma-separated resource names
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,

    #[arg(long)]
    #[serde(rename = "programIds", skip_serializing_if = "Option::is_none")]
    pub program_ids: Option<String>,
}

// ── Eligibility ──────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EligibilityArgs {
    /// Card number; defaults to VDC_PERMANENT_ACCOUNT_NUMBER
    #[arg(value_name = "PAN")]
    #[serde(rename = "permanentAccountNumber", skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,

    /// Defaults to VDC_VENDOR_UNIQUE_ID
    #[arg(long)]
    #[serde(rename = "vendorUniqueId", skip_serializing_if = "Option::is_none")]
    pub vendor_unique_id: Option<String>,

    /// GMT M/dd/yyyy hh:mm:ss AM|PM; defaults to now
    #[arg(long)]
    #[serde(rename = "requestTimeStamp", skip_serializing_if = "Option::is_none")]
    pub request_time_stamp: Option<String>,

    #[arg(long)]
    #[serde(rename = "correlationId", skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidateArgs {
    #[command(flatten)]
    #[serde(flatten)]
    pub common: EligibilityArgs,

    #[arg(long)]
    #[serde(rename = "extendedData", skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<String>,

    #[arg(long)]
    #[serde(rename = "numberOfAdditionalRedemptions", skip_serializing_if = "Option::is_none")]
    pub number_of_additional_redemptions: Option<u32>,

    /// MM/YY or MM/YYYY
    #[arg(long)]
    #[serde(rename = "expirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<ExpirationDate>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedeemArgs {
    #[command(flatten)]
    #[serde(flatten)]
    pub common: EligibilityArgs,

    /// Type of redemption request
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}
