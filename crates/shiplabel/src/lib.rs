//! `shiplabel` - Delivery records in and out of shipping label identifiers
//!
//! A delivery record is encoded into an identifier URL carried by the
//! label's scannable code. Records come back either exactly from that
//! identifier or, on a best-effort basis, from the address and transport
//! lines printed on the label.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod encode;
pub mod error;
pub mod grammar;
pub mod identifier;
pub mod label;
pub mod logging;
pub mod record;
pub mod recover;

pub use config::Config;
pub use encode::{encode, RecordEncoder};
pub use error::{Error, Result};
pub use identifier::{parse_query, Identifier, QueryParams};
pub use label::LabelText;
pub use logging::init_logging;
pub use record::DeliveryRecord;
pub use recover::{
    decode, recover_from_formatted_text, recover_from_structured_params, Fidelity, Recovery,
    RecoverySource,
};
