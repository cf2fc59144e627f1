//! Core delivery record types.
//!
//! A [`DeliveryRecord`] is built once per form submission and never mutated
//! afterwards. The scalar fields that have system-wide defaults or coercion
//! rules ([`BoxCount`], [`ColorTag`], [`DeliveryTime`]) are newtypes whose
//! constructors apply those rules, so every boundary that builds a record
//! gets the same behavior.

use std::fmt;

use chrono::NaiveTime;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use tracing::trace;

/// Color tag used when none is given.
pub const DEFAULT_COLOR_TAG: &str = "azul";

/// Latest delivery time used when none is given.
pub const DEFAULT_MAX_DELIVERY_TIME: &str = "18:00";

/// Treat empty strings as absent.
pub(crate) fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty))
}

/// Number of boxes in a delivery. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawBoxCount", into = "u32")]
pub struct BoxCount(u32);

/// Box count as it may appear in JSON: a number, a numeric string, or
/// anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBoxCount {
    Count(i64),
    Text(String),
    Other(IgnoredAny),
}

impl BoxCount {
    /// A single box.
    pub const ONE: Self = Self(1);

    /// Create a box count, lifting zero to one.
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self(count.max(1))
    }

    /// Coerce free-form input into a box count.
    ///
    /// Anything that is not a positive integer becomes `1`. Counts beyond
    /// `u32::MAX` saturate.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::from_signed(n),
            Err(_) => {
                trace!(raw, "Box count coerced to 1");
                Self::ONE
            }
        }
    }

    fn from_signed(count: i64) -> Self {
        if count >= 1 {
            Self(u32::try_from(count).unwrap_or(u32::MAX))
        } else {
            trace!(count, "Box count coerced to 1");
            Self::ONE
        }
    }

    /// The count as a plain integer.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Portuguese phrase used on the label, e.g. `1 caixa` or `3 caixas`.
    #[must_use]
    pub fn phrase(self) -> String {
        if self.0 == 1 {
            "1 caixa".to_string()
        } else {
            format!("{} caixas", self.0)
        }
    }
}

impl Default for BoxCount {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<RawBoxCount> for BoxCount {
    fn from(raw: RawBoxCount) -> Self {
        match raw {
            RawBoxCount::Count(count) => Self::from_signed(count),
            RawBoxCount::Text(text) => Self::coerce(&text),
            RawBoxCount::Other(_) => Self::ONE,
        }
    }
}

impl From<u32> for BoxCount {
    fn from(count: u32) -> Self {
        Self::new(count)
    }
}

impl From<BoxCount> for u32 {
    fn from(count: BoxCount) -> Self {
        count.0
    }
}

impl fmt::Display for BoxCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Colors the printed label band knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelColor {
    /// Blue band.
    Azul,
    /// Red band.
    Vermelho,
    /// Green band.
    Verde,
    /// Yellow band.
    Amarelo,
    /// Purple band.
    Roxo,
    /// Orange band.
    Laranja,
}

impl LabelColor {
    /// Look up a tag by its Portuguese name or English alias, ignoring case.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "azul" | "blue" => Some(Self::Azul),
            "vermelho" | "red" => Some(Self::Vermelho),
            "verde" | "green" => Some(Self::Verde),
            "amarelo" | "yellow" => Some(Self::Amarelo),
            "roxo" | "purple" => Some(Self::Roxo),
            "laranja" | "orange" => Some(Self::Laranja),
            _ => None,
        }
    }

    /// Name printed on the label band.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Azul => "Azul",
            Self::Vermelho => "Vermelho",
            Self::Verde => "Verde",
            Self::Amarelo => "Amarelo",
            Self::Roxo => "Roxo",
            Self::Laranja => "Laranja",
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Free-form color label. Compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ColorTag(String);

impl ColorTag {
    /// Create a color tag. Blank input falls back to [`DEFAULT_COLOR_TAG`].
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            Self(DEFAULT_COLOR_TAG.to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The tag as given (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The known band color, if the tag names one.
    #[must_use]
    pub fn label_color(&self) -> Option<LabelColor> {
        LabelColor::from_tag(&self.0)
    }

    /// Name shown on the label band.
    ///
    /// Known colors use their Portuguese name; anything else is shown with
    /// its first letter upper-cased.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(color) = self.label_color() {
            return color.name().to_string();
        }
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        Self(DEFAULT_COLOR_TAG.to_string())
    }
}

impl PartialEq for ColorTag {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl Eq for ColorTag {}

impl From<String> for ColorTag {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<&str> for ColorTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<ColorTag> for String {
    fn from(tag: ColorTag) -> Self {
        tag.0
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Latest delivery time of day, rendered as `HH:MM` (24h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DeliveryTime(NaiveTime);

impl DeliveryTime {
    /// Parse `HH:MM` (or `HH:MM:SS`, seconds dropped).
    ///
    /// Blank or unparseable input falls back to [`DEFAULT_MAX_DELIVERY_TIME`].
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(Self::from_time)
            .unwrap_or_else(|_| {
                trace!(raw, "Unparseable delivery time replaced by default");
                Self::default()
            })
    }

    /// Build from a time of day, truncated to the minute.
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        use chrono::Timelike;
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }

    /// The underlying time of day.
    #[must_use]
    pub fn time(self) -> NaiveTime {
        self.0
    }
}

impl Default for DeliveryTime {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default())
    }
}

impl From<String> for DeliveryTime {
    fn from(raw: String) -> Self {
        Self::parse_or_default(&raw)
    }
}

impl From<DeliveryTime> for String {
    fn from(time: DeliveryTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for DeliveryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Delivery address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street name.
    pub street: String,
    /// House number.
    pub number: String,
    /// Apartment, block, etc.
    #[serde(
        default,
        deserialize_with = "deserialize_non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub complement: Option<String>,
    /// Neighborhood (bairro).
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// State abbreviation (UF).
    pub state: String,
    /// Postal code (CEP).
    pub zip_code: String,
}

impl Address {
    /// The complement, or `""` when absent.
    #[must_use]
    pub fn complement(&self) -> &str {
        self.complement.as_deref().unwrap_or_default()
    }

    /// An address holding a single unparsed line in `street`.
    #[must_use]
    pub fn verbatim(line: &str) -> Self {
        Self {
            street: line.trim().to_string(),
            ..Self::default()
        }
    }
}

/// Vehicle and driver carrying the delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transport {
    /// Vehicle plate.
    pub vehicle_id: String,
    /// Vehicle (bus line) name.
    #[serde(
        default,
        deserialize_with = "deserialize_non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_name: Option<String>,
    /// Driver's name.
    pub driver_name: String,
}

impl Transport {
    /// The vehicle name, or `""` when absent.
    #[must_use]
    pub fn vehicle_name(&self) -> &str {
        self.vehicle_name.as_deref().unwrap_or_default()
    }
}

/// A single delivery as captured by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    /// Caller-supplied order identifier.
    pub order_number: String,
    /// Where to deliver.
    pub address: Address,
    /// Who carries it.
    pub transport: Transport,
    /// Number of boxes.
    #[serde(default)]
    pub box_count: BoxCount,
    /// Color band of the label.
    #[serde(default)]
    pub color_tag: ColorTag,
    /// Latest delivery time.
    #[serde(default)]
    pub max_delivery_time: DeliveryTime,
}

impl DeliveryRecord {
    /// Required fields that are empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RecordField> {
        let required = [
            (RecordField::OrderNumber, self.order_number.as_str()),
            (RecordField::Street, self.address.street.as_str()),
            (RecordField::Number, self.address.number.as_str()),
            (RecordField::Neighborhood, self.address.neighborhood.as_str()),
            (RecordField::City, self.address.city.as_str()),
            (RecordField::State, self.address.state.as_str()),
            (RecordField::ZipCode, self.address.zip_code.as_str()),
            (RecordField::VehicleId, self.transport.vehicle_id.as_str()),
            (RecordField::DriverName, self.transport.driver_name.as_str()),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }
}

/// Names of the record's required text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// `orderNumber`
    OrderNumber,
    /// `street`
    Street,
    /// `number`
    Number,
    /// `neighborhood`
    Neighborhood,
    /// `city`
    City,
    /// `state`
    State,
    /// `zipCode`
    ZipCode,
    /// `vehicleId`
    VehicleId,
    /// `driverName`
    DriverName,
}

impl RecordField {
    /// The field's name as used in identifiers and JSON.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::OrderNumber => "orderNumber",
            Self::Street => "street",
            Self::Number => "number",
            Self::Neighborhood => "neighborhood",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::VehicleId => "vehicleId",
            Self::DriverName => "driverName",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
