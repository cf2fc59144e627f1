//! Encoding delivery records into identifier URLs.
//!
//! Parameters are always written in [`QueryParam::ALL`] order and every
//! value is percent-encoded, so equal records give byte-identical
//! identifiers. Optional fields are written as empty values rather than
//! left out.

use std::borrow::Cow;

use tracing::debug;

use crate::config::Config;
use crate::identifier::QueryParam;
use crate::record::DeliveryRecord;

/// Encodes records against a fixed base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEncoder {
    base_url: String,
}

impl RecordEncoder {
    /// Create an encoder for the given base URL.
    ///
    /// Trailing slashes are dropped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create an encoder using the configured base URL.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.encoder.base_url.as_str())
    }

    /// The base URL identifiers are built on.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the identifier for a record.
    #[must_use]
    pub fn encode(&self, record: &DeliveryRecord) -> String {
        let query = QueryParam::ALL
            .iter()
            .map(|&param| {
                format!(
                    "{}={}",
                    param.name(),
                    urlencoding::encode(&param_value(record, param))
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        let identifier = format!(
            "{}/{}?{query}",
            self.base_url,
            urlencoding::encode(&record.order_number)
        );

        debug!(
            order_number = %record.order_number,
            len = identifier.len(),
            "Encoded delivery record"
        );
        identifier
    }
}

/// Build the identifier for a record against `base_url`.
#[must_use]
pub fn encode(record: &DeliveryRecord, base_url: &str) -> String {
    RecordEncoder::new(base_url).encode(record)
}

fn param_value(record: &DeliveryRecord, param: QueryParam) -> Cow<'_, str> {
    let address = &record.address;
    let transport = &record.transport;
    match param {
        QueryParam::MaxTime => Cow::Owned(record.max_delivery_time.to_string()),
        QueryParam::Street => Cow::Borrowed(&address.street),
        QueryParam::Number => Cow::Borrowed(&address.number),
        QueryParam::Complement => Cow::Borrowed(address.complement()),
        QueryParam::Neighborhood => Cow::Borrowed(&address.neighborhood),
        QueryParam::City => Cow::Borrowed(&address.city),
        QueryParam::State => Cow::Borrowed(&address.state),
        QueryParam::ZipCode => Cow::Borrowed(&address.zip_code),
        QueryParam::VehicleId => Cow::Borrowed(&transport.vehicle_id),
        QueryParam::VehicleName => Cow::Borrowed(transport.vehicle_name()),
        QueryParam::DriverName => Cow::Borrowed(&transport.driver_name),
        QueryParam::BoxCount => Cow::Owned(record.box_count.to_string()),
        QueryParam::ColorTag => Cow::Borrowed(record.color_tag.as_str()),
    }
}
