//! Rebuilding delivery records.
//!
//! Records come back from one of two sources:
//!
//! - **Structured parameters** from an identifier. Every field travels as
//!   its own parameter, so the result is exact.
//! - **Formatted label text**, when only the printed address and transport
//!   lines are at hand. Fields are re-derived heuristically from the label
//!   grammar and some may come back empty.
//!
//! Neither path fails. Precision loss on the text path is expected and is
//! reported through [`Recovery::missing`], never as an error.
//!
//! # Example
//!
//! ```
//! use shiplabel::recover::{KnownScalars, RecoverySource, Fidelity};
//!
//! let source = RecoverySource::FormattedText {
//!     address_line: "Av. Brasil, 123 - Apto 101 - Centro, São Paulo - SP, 01234-567".into(),
//!     transport_line: "Placa: ABC-1234 | Motorista: João Silva".into(),
//!     known: KnownScalars::default(),
//! };
//!
//! let recovery = source.recover();
//! assert_eq!(recovery.fidelity, Fidelity::Degraded);
//! assert_eq!(recovery.record.address.city, "São Paulo");
//! assert_eq!(recovery.record.transport.driver_name, "João Silva");
//! ```

mod address;
mod patterns;
mod structured;
mod transport;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::identifier::{Identifier, QueryParams};
use crate::record::{BoxCount, ColorTag, DeliveryRecord, DeliveryTime, RecordField};

pub use patterns::{TextPattern, HOUSE_NUMBER, POSTAL_CODE};
pub use structured::recover_from_structured_params;

/// How faithful a recovered record is to the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    /// Reconstructed field for field from structured parameters.
    Exact,
    /// Re-derived from formatted text; fields may be empty or coarser.
    Degraded,
}

impl std::fmt::Display for Fidelity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

/// Scalars that are already known when recovering from label text.
///
/// Values are raw; the usual coercions and defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownScalars {
    /// Order number.
    pub order_number: String,
    /// Box count as printed.
    pub box_count: String,
    /// Color tag.
    pub color_tag: String,
    /// Latest delivery time, `HH:MM`.
    pub max_delivery_time: String,
}

impl KnownScalars {
    /// Take the scalars of an existing record.
    #[must_use]
    pub fn from_record(record: &DeliveryRecord) -> Self {
        Self {
            order_number: record.order_number.clone(),
            box_count: record.box_count.to_string(),
            color_tag: record.color_tag.to_string(),
            max_delivery_time: record.max_delivery_time.to_string(),
        }
    }
}

/// A recovered record and how much of it could be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recovery {
    /// The rebuilt record.
    pub record: DeliveryRecord,
    /// Exact or degraded.
    pub fidelity: Fidelity,
    /// Required fields that came back empty.
    #[serde(serialize_with = "serialize_fields")]
    pub missing: Vec<RecordField>,
}

fn serialize_fields<S: serde::Serializer>(
    fields: &[RecordField],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(fields.iter().map(|field| field.name()))
}

impl Recovery {
    fn new(record: DeliveryRecord, fidelity: Fidelity) -> Self {
        let missing = record.missing_fields();
        Self {
            record,
            fidelity,
            missing,
        }
    }

    /// Whether the record was rebuilt exactly.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.fidelity == Fidelity::Exact
    }

    /// Whether every required field has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Where a record is being recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySource {
    /// Decoded identifier parameters.
    Structured(QueryParams),
    /// Printed label lines plus the scalars printed next to them.
    FormattedText {
        /// A `FormattedAddress` line.
        address_line: String,
        /// A `FormattedTransport` line.
        transport_line: String,
        /// Scalars known from elsewhere on the label.
        known: KnownScalars,
    },
}

impl RecoverySource {
    /// Rebuild a record from this source.
    #[must_use]
    pub fn recover(&self) -> Recovery {
        match self {
            Self::Structured(params) => {
                Recovery::new(recover_from_structured_params(params), Fidelity::Exact)
            }
            Self::FormattedText {
                address_line,
                transport_line,
                known,
            } => Recovery::new(
                recover_from_formatted_text(address_line, transport_line, known),
                Fidelity::Degraded,
            ),
        }
    }
}

/// Rebuild a record from printed label lines.
///
/// Best effort: fields that cannot be located are left empty. Always
/// succeeds.
#[must_use]
pub fn recover_from_formatted_text(
    address_line: &str,
    transport_line: &str,
    known: &KnownScalars,
) -> DeliveryRecord {
    let record = DeliveryRecord {
        order_number: known.order_number.trim().to_string(),
        address: address::parse_address(address_line),
        transport: transport::parse_transport(transport_line),
        box_count: BoxCount::coerce(&known.box_count),
        color_tag: ColorTag::new(known.color_tag.as_str()),
        max_delivery_time: DeliveryTime::parse_or_default(&known.max_delivery_time),
    };

    let missing = record.missing_fields();
    if !missing.is_empty() {
        debug!(
            order_number = %record.order_number,
            missing = ?missing,
            "Recovered record from label text with empty fields"
        );
    }

    record
}

/// Decode a full identifier URL into a record.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidIdentifier`] if the input is not an
/// identifier URL. Use [`crate::identifier::parse_query`] with
/// [`recover_from_structured_params`] to accept anything.
pub fn decode(identifier: &str) -> Result<DeliveryRecord> {
    let identifier = Identifier::parse(identifier)?;
    Ok(recover_from_structured_params(identifier.params()))
}
