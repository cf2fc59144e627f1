//! Recover a [`Transport`] from a formatted transport line.
//!
//! Fields are found by their labels, so segment order does not matter.

use crate::grammar::{
    DRIVER_NAME_LABEL, SEGMENT_DELIMITER, TRANSPORT_LABELS, VEHICLE_ID_LABEL, VEHICLE_NAME_LABEL,
};
use crate::record::{non_empty, Transport};

/// Parse a formatted transport line. Never fails.
pub(crate) fn parse_transport(line: &str) -> Transport {
    Transport {
        vehicle_id: delimited_value(line, VEHICLE_ID_LABEL).to_string(),
        vehicle_name: non_empty(delimited_value(line, VEHICLE_NAME_LABEL)),
        driver_name: driver_value(line).to_string(),
    }
}

/// Text following `label`, if the label occurs.
fn after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.find(label).map(|start| &line[start + label.len()..])
}

/// Value after `label` up to the next delimiter.
fn delimited_value<'a>(line: &'a str, label: &str) -> &'a str {
    after_label(line, label)
        .and_then(|rest| rest.split(SEGMENT_DELIMITER).next())
        .map_or("", str::trim)
}

/// The driver's name runs to the end of the line unless another labelled
/// segment follows it; a bare `|` inside the name is kept.
fn driver_value(line: &str) -> &str {
    let Some(rest) = after_label(line, DRIVER_NAME_LABEL) else {
        return "";
    };
    rest.match_indices(SEGMENT_DELIMITER)
        .find(|(at, _)| {
            let next = rest[at + 1..].trim_start();
            TRANSPORT_LABELS.iter().any(|label| next.starts_with(label))
        })
        .map_or(rest, |(at, _)| &rest[..at])
        .trim()
}
