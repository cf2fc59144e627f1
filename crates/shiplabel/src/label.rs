//! Text content of a printed shipping label.
//!
//! Layout and rasterization belong to the renderer; this only decides what
//! the label says and which payload its code carries.

use std::fmt;

use serde::Serialize;

use crate::encode::RecordEncoder;
use crate::grammar::{format_address, format_transport};
use crate::record::{BoxCount, ColorTag, DeliveryRecord, DeliveryTime};
use crate::recover::{KnownScalars, Recovery, RecoverySource};

/// Everything printed on a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelText {
    /// Order number.
    pub order_number: String,
    /// Color band name.
    pub color_band: String,
    /// Number of boxes.
    pub box_count: BoxCount,
    /// Formatted address line.
    pub address: String,
    /// Formatted transport line.
    pub transport: String,
    /// Latest delivery time.
    pub max_delivery_time: DeliveryTime,
    /// Identifier carried by the scannable code.
    pub payload: String,
    #[serde(skip)]
    color_tag: ColorTag,
}

impl LabelText {
    /// Compose the label for a record.
    #[must_use]
    pub fn new(record: &DeliveryRecord, encoder: &RecordEncoder) -> Self {
        Self {
            order_number: record.order_number.clone(),
            color_band: record.color_tag.display_name(),
            box_count: record.box_count,
            address: format_address(&record.address),
            transport: format_transport(&record.transport),
            max_delivery_time: record.max_delivery_time,
            payload: encoder.encode(record),
            color_tag: record.color_tag.clone(),
        }
    }

    /// Heading line, e.g. `Pedido #12345`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Pedido #{}", self.order_number)
    }

    /// Rebuild the record from the printed lines alone.
    #[must_use]
    pub fn recover(&self) -> Recovery {
        RecoverySource::FormattedText {
            address_line: self.address.clone(),
            transport_line: self.transport.clone(),
            known: KnownScalars {
                order_number: self.order_number.clone(),
                box_count: self.box_count.to_string(),
                color_tag: self.color_tag.to_string(),
                max_delivery_time: self.max_delivery_time.to_string(),
            },
        }
        .recover()
    }
}

impl fmt::Display for LabelText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.color_band)?;
        writeln!(f, "{}", self.heading())?;
        writeln!(f, "{}", self.box_count.phrase())?;
        writeln!(f)?;
        writeln!(f, "Endereço de Entrega:")?;
        writeln!(f, "  {}", self.address)?;
        writeln!(f, "Informações de Transporte:")?;
        writeln!(f, "  {}", self.transport)?;
        writeln!(f, "Horário Máximo de Entrega:")?;
        writeln!(f, "  {}", self.max_delivery_time)?;
        writeln!(f)?;
        write!(f, "Escaneie para detalhes: {}", self.payload)
    }
}
