//! The human-readable address and transport lines printed on a label.
//!
//! ```text
//! FormattedAddress   = street ", " number [" - " complement] " - " neighborhood
//!                      ", " city " - " state ", " zipCode
//! FormattedTransport = "Placa: " vehicleId [" | Ônibus: " vehicleName]
//!                      " | Motorista: " driverName
//! ```
//!
//! The formatters here and the parser in [`crate::recover`] share these
//! constants, so the two sides cannot drift apart.

use crate::record::{Address, Transport};

/// Separates street, number block, and locality; also state from zip code.
pub const FIELD_SEPARATOR: &str = ", ";

/// Separates number, complement, neighborhood; also city from state.
pub const PART_SEPARATOR: &str = " - ";

/// Separates labelled transport segments.
pub const SEGMENT_SEPARATOR: &str = " | ";

/// Bare character delimiting transport segments when parsing.
pub const SEGMENT_DELIMITER: char = '|';

/// Label preceding the vehicle plate.
pub const VEHICLE_ID_LABEL: &str = "Placa:";

/// Label preceding the vehicle name.
pub const VEHICLE_NAME_LABEL: &str = "Ônibus:";

/// Label preceding the driver's name.
pub const DRIVER_NAME_LABEL: &str = "Motorista:";

/// All transport labels, in printing order.
pub const TRANSPORT_LABELS: [&str; 3] = [VEHICLE_ID_LABEL, VEHICLE_NAME_LABEL, DRIVER_NAME_LABEL];

/// Render an address as a single label line.
#[must_use]
pub fn format_address(address: &Address) -> String {
    let mut line = format!("{}{FIELD_SEPARATOR}{}", address.street, address.number);
    let complement = address.complement();
    if !complement.trim().is_empty() {
        line.push_str(PART_SEPARATOR);
        line.push_str(complement);
    }
    line.push_str(PART_SEPARATOR);
    line.push_str(&address.neighborhood);
    line.push_str(FIELD_SEPARATOR);
    line.push_str(&address.city);
    line.push_str(PART_SEPARATOR);
    line.push_str(&address.state);
    line.push_str(FIELD_SEPARATOR);
    line.push_str(&address.zip_code);
    line
}

/// Render transport details as a single label line.
#[must_use]
pub fn format_transport(transport: &Transport) -> String {
    let mut line = format!("{VEHICLE_ID_LABEL} {}", transport.vehicle_id);
    let vehicle_name = transport.vehicle_name();
    if !vehicle_name.trim().is_empty() {
        line.push_str(SEGMENT_SEPARATOR);
        line.push_str(VEHICLE_NAME_LABEL);
        line.push(' ');
        line.push_str(vehicle_name);
    }
    line.push_str(SEGMENT_SEPARATOR);
    line.push_str(DRIVER_NAME_LABEL);
    line.push(' ');
    line.push_str(&transport.driver_name);
    line
}
