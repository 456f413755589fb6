//! Command line interface for validating STAC documents against versioned
//! JSON Schemas.

#![deny(unused_crate_dependencies)]

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use stac_core::{Href, Version, href::is_url};
use stac_validate::{DEFAULT_SPEC_HOST, ValidationRequest, Validator};
use std::time::Instant;
use tracing::metadata::Level;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt,
};
use url::Url;

/// stac-validator: validate a SpatioTemporal Asset Catalog (STAC) document
#[derive(Debug, Parser)]
#[command(name = "stac-validator")]
pub struct StacValidator {
    /// The local path or url of the STAC document.
    stac_file: String,

    /// The schema host.
    ///
    /// Either an http(s) url or a local directory. Schemas are expected at
    /// `{spec_host}/{version}/{type}.json`.
    #[arg(long = "spec_host", default_value = DEFAULT_SPEC_HOST, verbatim_doc_comment)]
    spec_host: String,

    /// The STAC version to validate against, e.g. `1.0.0`, `master` or `dev`.
    ///
    /// If a branch is requested and the document declares a version, the
    /// document's version is used instead.
    #[arg(short = 'v', long = "version", default_value = "master")]
    version: Version,

    /// Print how long the validation took.
    #[arg(long)]
    timer: bool,

    /// The logging level.
    #[arg(
        long = "log_level",
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Critical
    )]
    log_level: LogLevel,
}

/// Logging levels, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Errors only, an alias of `error` kept so existing `--log_level
    /// CRITICAL` invocations keep working.
    Critical,

    /// Errors only.
    Error,

    /// Warnings and errors.
    #[value(alias = "warn")]
    Warning,

    /// Informational messages and above.
    Info,

    /// Debugging messages and above.
    Debug,

    /// Everything.
    Trace,

    /// Everything, an alias of `trace` kept so existing `--log_level NOTSET`
    /// invocations keep working.
    Notset,

    /// Nothing.
    Off,
}

impl StacValidator {
    /// Runs this command.
    ///
    /// Prints the report to standard output. Returns an error if the run
    /// fails or if the document is not valid STAC.
    ///
    /// If `init_tracing_subscriber` is `false`, it is expected that the caller
    /// is setting up the appropriate logging.
    pub fn run(self, init_tracing_subscriber: bool) -> Result<()> {
        if init_tracing_subscriber {
            if let Some(level) = self.log_level() {
                let indicatif_layer = IndicatifLayer::new();
                tracing_subscriber::registry()
                    .with(
                        tracing_subscriber::fmt::layer().with_writer(
                            indicatif_layer.get_stderr_writer().with_max_level(level),
                        ),
                    )
                    .with(indicatif_layer)
                    .init();
            }
        }
        let start = Instant::now();
        let request = self.request()?;
        let validator = Validator::new()?;
        let message = validator.validate(&request)?;
        let report = stac_validate::report(std::slice::from_ref(&message));
        println!("{}", serde_json::to_string_pretty(&report)?);
        if self.timer {
            println!(
                "Validator took {:.2} seconds",
                start.elapsed().as_secs_f64()
            );
        }
        if message.is_valid() {
            Ok(())
        } else {
            Err(anyhow!("{} is not valid STAC", message.path()))
        }
    }

    /// Returns the validation request described by the arguments.
    pub fn request(&self) -> Result<ValidationRequest> {
        Ok(ValidationRequest::new(&self.stac_file)?
            .with_version(self.version.clone())
            .with_spec_host(self.spec_host()?))
    }

    /// Returns the schema host as a url.
    ///
    /// Local directories are converted to absolute `file://` urls.
    pub fn spec_host(&self) -> Result<Url> {
        if is_url(&self.spec_host) {
            Ok(Url::parse(&self.spec_host)?)
        } else {
            Href::from(self.spec_host.as_str())
                .to_url()
                .ok_or_else(|| anyhow!("invalid spec host: {}", self.spec_host))
        }
    }

    /// Returns the maximum level of logged events, or `None` to log nothing.
    pub fn log_level(&self) -> Option<Level> {
        self.log_level.level()
    }
}

impl LogLevel {
    /// Returns the [Level] for this logging level.
    pub fn level(self) -> Option<Level> {
        match self {
            LogLevel::Critical | LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warning => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace | LogLevel::Notset => Some(Level::TRACE),
            LogLevel::Off => None,
        }
    }
}

#[cfg(test)]
use {assert_cmd as _, rstest as _, tempfile as _};
