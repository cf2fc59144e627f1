//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::OutputFormat;
use crate::record::{Address, BoxCount, ColorTag, DeliveryRecord, DeliveryTime, Transport};
use crate::recover::{KnownScalars, Recovery};

/// Delivery record fields given as flags.
#[derive(Debug, Clone, Default, Args)]
pub struct RecordArgs {
    /// Order number
    #[arg(short, long)]
    pub order: String,

    /// Street name
    #[arg(long, default_value_t)]
    pub street: String,

    /// House number
    #[arg(long, default_value_t)]
    pub number: String,

    /// Apartment, block, etc.
    #[arg(long)]
    pub complement: Option<String>,

    /// Neighborhood
    #[arg(long, default_value_t)]
    pub neighborhood: String,

    /// City
    #[arg(long, default_value_t)]
    pub city: String,

    /// State abbreviation
    #[arg(long, default_value_t)]
    pub state: String,

    /// Postal code
    #[arg(long, default_value_t)]
    pub zip: String,

    /// Vehicle plate
    #[arg(long, default_value_t)]
    pub vehicle_id: String,

    /// Vehicle (bus line) name
    #[arg(long)]
    pub vehicle_name: Option<String>,

    /// Driver's name
    #[arg(long, default_value_t)]
    pub driver: String,

    /// Number of boxes (anything below 1 becomes 1)
    #[arg(short, long, default_value = "1")]
    pub boxes: String,

    /// Color tag
    #[arg(long)]
    pub color: Option<String>,

    /// Latest delivery time, HH:MM
    #[arg(long, value_name = "HH:MM")]
    pub max_time: Option<String>,
}

impl RecordArgs {
    /// Build the record these flags describe.
    #[must_use]
    pub fn into_record(self) -> DeliveryRecord {
        DeliveryRecord {
            order_number: self.order.trim().to_string(),
            address: Address {
                street: self.street,
                number: self.number,
                complement: self.complement.filter(|c| !c.trim().is_empty()),
                neighborhood: self.neighborhood,
                city: self.city,
                state: self.state,
                zip_code: self.zip,
            },
            transport: Transport {
                vehicle_id: self.vehicle_id,
                vehicle_name: self.vehicle_name.filter(|n| !n.trim().is_empty()),
                driver_name: self.driver,
            },
            box_count: BoxCount::coerce(&self.boxes),
            color_tag: ColorTag::new(self.color.unwrap_or_default()),
            max_delivery_time: DeliveryTime::parse_or_default(
                self.max_time.as_deref().unwrap_or_default(),
            ),
        }
    }
}

/// Encode command arguments.
#[derive(Debug, Args)]
pub struct EncodeCommand {
    /// The record to encode
    #[command(flatten)]
    pub record: RecordArgs,

    /// Override the configured base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Decode command arguments.
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// Identifier URL (as read from the label's code)
    pub identifier: String,

    /// Accept any string, not only absolute URLs
    #[arg(long)]
    pub lenient: bool,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Recover command arguments.
#[derive(Debug, Args)]
pub struct RecoverCommand {
    /// Formatted address line as printed on the label
    #[arg(short, long, value_name = "LINE")]
    pub address: String,

    /// Formatted transport line as printed on the label
    #[arg(short, long, value_name = "LINE", default_value_t)]
    pub transport: String,

    /// Order number
    #[arg(short, long, default_value_t)]
    pub order: String,

    /// Number of boxes
    #[arg(short, long, default_value = "1")]
    pub boxes: String,

    /// Color tag
    #[arg(long, default_value_t)]
    pub color: String,

    /// Latest delivery time, HH:MM
    #[arg(long, value_name = "HH:MM", default_value_t)]
    pub max_time: String,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl RecoverCommand {
    /// Scalars given alongside the printed lines.
    #[must_use]
    pub fn known_scalars(&self) -> KnownScalars {
        KnownScalars {
            order_number: self.order.clone(),
            box_count: self.boxes.clone(),
            color_tag: self.color.clone(),
            max_delivery_time: self.max_time.clone(),
        }
    }
}

/// Label command arguments.
#[derive(Debug, Args)]
pub struct LabelCommand {
    /// The record to print
    #[command(flatten)]
    pub record: RecordArgs,

    /// Override the configured base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Render a record as aligned `field: value` lines.
#[must_use]
pub fn describe_record(record: &DeliveryRecord) -> String {
    let address = &record.address;
    let transport = &record.transport;
    let box_count = record.box_count.to_string();
    let color_tag = record.color_tag.to_string();
    let max_time = record.max_delivery_time.to_string();
    let rows = [
        ("Order", record.order_number.as_str()),
        ("Street", address.street.as_str()),
        ("Number", address.number.as_str()),
        ("Complement", address.complement()),
        ("Neighborhood", address.neighborhood.as_str()),
        ("City", address.city.as_str()),
        ("State", address.state.as_str()),
        ("Zip code", address.zip_code.as_str()),
        ("Vehicle", transport.vehicle_id.as_str()),
        ("Vehicle name", transport.vehicle_name()),
        ("Driver", transport.driver_name.as_str()),
        ("Boxes", box_count.as_str()),
        ("Color", color_tag.as_str()),
        ("Max time", max_time.as_str()),
    ];

    rows.iter()
        .map(|(name, value)| format!("{:<14}{value}", format!("{name}:")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a recovery with its fidelity and missing fields ahead of the record.
#[must_use]
pub fn describe_recovery(recovery: &Recovery) -> String {
    let missing = if recovery.missing.is_empty() {
        "none".to_string()
    } else {
        recovery
            .missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "{:<14}{}\n{:<14}{missing}\n\n{}",
        "Fidelity:",
        recovery.fidelity,
        "Missing:",
        describe_record(&recovery.record)
    )
}
