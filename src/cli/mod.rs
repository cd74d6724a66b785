//! `vdc` command-line front-end.
//!
//! A thin layer: flags become [`RequestParams`], the client makes one call,
//! and the result is printed as pretty JSON.

pub mod args;
pub mod output;

use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::VdcClient;
use crate::config::{Config, DebugOutput, ProjectDefaults};
use crate::domain::eligibility::generate_correlation_id;
use crate::domain::join_ids;
use crate::endpoint::{EligibilityEndpoint, Endpoint, OffersEndpoint, ReferenceDataEndpoint};
use crate::error::SdkResult;
use crate::http::params::RequestParams;

pub use args::Cli;
use args::{
    Command, CommonArgs, DataCommand, EligibilityArgs, EligibilityCommand, OffersCommand,
};

/// Install the tracing subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,vdc_sdk=info".to_string(),
            2 => "info,vdc_sdk=debug".to_string(),
            _ => "debug,vdc_sdk=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

/// Run a parsed command, print its outcome and return the process exit code.
pub fn run(cli: Cli) -> i32 {
    if matches!(cli.command, Command::Endpoints) {
        println!("{}", output::render_endpoints());
        return 0;
    }

    let include_headers = cli.common.include_headers;
    let outcome = ProjectDefaults::from_env().and_then(|defaults| {
        let config = build_config(&cli.common, &defaults);
        let client = VdcClient::new(config);
        let (endpoint, params) = plan(cli.command, &defaults)?;
        info!(%endpoint, host = client.config().host(), "calling endpoint");
        client.call(endpoint, params)
    });

    match outcome {
        Ok(result) => {
            println!("{}", output::render_success(&result, include_headers));
            0
        }
        Err(e) => {
            eprintln!("{}", output::render_error(&e, include_headers));
            output::exit_code(&e)
        }
    }
}

/// Config from project defaults plus the global flags.
pub fn build_config(common: &CommonArgs, defaults: &ProjectDefaults) -> Config {
    let mut config = Config::from_defaults(defaults);
    if let Some(host) = &common.host {
        config.set_host(host.clone());
    }
    if common.no_ssl_verify {
        config.set_ssl_verification(false);
    }
    if let Some(path) = &common.debug_file {
        config.set_debug(true);
        config.set_debug_output(DebugOutput::File(path.clone()));
    } else if common.vdc_debug {
        config.set_debug(true);
        config.set_debug_output(DebugOutput::Stdout);
    }
    config
}

/// Map a command to its endpoint and parameters.
pub fn plan(command: Command, defaults: &ProjectDefaults) -> SdkResult<(Endpoint, RequestParams)> {
    let planned: (Endpoint, RequestParams) = match command {
        Command::Offers(cmd) => match cmd {
            OffersCommand::All(page) => (
                OffersEndpoint::All.into(),
                RequestParams::from_serializable(&page)?,
            ),
            OffersCommand::ByContentId(args) => {
                let mut params = RequestParams::from_serializable(&args.page)?;
                params.insert("contentid", join_ids(&args.ids));
                (OffersEndpoint::ByContentId.into(), params)
            }
            OffersCommand::ByFilter(filter) => (
                OffersEndpoint::ByFilter.into(),
                RequestParams::from_serializable(&filter)?,
            ),
            OffersCommand::ByOfferId(args) => {
                let mut params = RequestParams::from_serializable(&args.page)?;
                params.insert("offerid", join_ids(&args.ids));
                (OffersEndpoint::ByOfferId.into(), params)
            }
        },
        Command::Data(cmd) => match cmd {
            DataCommand::MerchantAddress(args) => {
                let mut params = RequestParams::new().with("merchantIds", join_ids(&args.ids));
                if let Some(start_index) = args.start_index {
                    params.insert("start_index", start_index);
                }
                (ReferenceDataEndpoint::MerchantAddress.into(), params)
            }
            DataCommand::Merchant(args) => (
                ReferenceDataEndpoint::Merchant.into(),
                RequestParams::from_serializable(&args)?,
            ),
            DataCommand::Ref(args) => (
                ReferenceDataEndpoint::Reference.into(),
                RequestParams::from_serializable(&args)?,
            ),
        },
        Command::Eligibility(cmd) => match cmd {
            EligibilityCommand::Validate(mut args) => {
                apply_defaults(&mut args.common, defaults);
                args.common.correlation_id.get_or_insert_with(generate_correlation_id);
                (
                    EligibilityEndpoint::Validate.into(),
                    RequestParams::from_serializable(&args)?,
                )
            }
            EligibilityCommand::Prepay(mut args) => {
                apply_defaults(&mut args, defaults);
                (
                    EligibilityEndpoint::Prepay.into(),
                    RequestParams::from_serializable(&args)?,
                )
            }
            EligibilityCommand::Redeem(mut args) => {
                apply_defaults(&mut args.common, defaults);
                (
                    EligibilityEndpoint::Redeem.into(),
                    RequestParams::from_serializable(&args)?,
                )
            }
        },
        Command::Endpoints => {
            return Err(crate::error::SdkError::Config(
                "`endpoints` does not call the API".to_string(),
            ))
        }
    };

    debug!(endpoint = %planned.0, params = planned.1.len(), "planned call");
    Ok(planned)
}

/// Fill vendor id and card number from project defaults when not given.
fn apply_defaults(args: &mut EligibilityArgs, defaults: &ProjectDefaults) {
    if args.vendor_unique_id.as_deref().map_or(true, str::is_empty) {
        args.vendor_unique_id = defaults.vendor_unique_id.clone();
    }
    if args.pan.as_deref().map_or(true, str::is_empty) {
        args.pan = defaults.permanent_account_number.clone();
    }
}
