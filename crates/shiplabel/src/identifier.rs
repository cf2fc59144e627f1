//! Identifier URLs and their query parameters.
//!
//! An identifier looks like
//! `{base}/{orderNumber}?maxTime=..&street=..&..&colorTag=..`. The parameter
//! names and their order are fixed by [`QueryParam::ALL`]; readers ignore
//! parameters they do not know and treat a missing parameter as empty.

use std::collections::HashMap;

use url::{form_urlencoded, Url};

use crate::error::{Error, Result};

/// Name under which the order number travels when it is carried as a
/// parameter rather than in the path.
pub const ORDER_NUMBER_PARAM: &str = "orderNumber";

/// The query parameters of an identifier, in encoding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryParam {
    /// Latest delivery time, `HH:MM`.
    MaxTime,
    /// Street name.
    Street,
    /// House number.
    Number,
    /// Address complement (may be empty).
    Complement,
    /// Neighborhood.
    Neighborhood,
    /// City.
    City,
    /// State.
    State,
    /// Postal code.
    ZipCode,
    /// Vehicle plate.
    VehicleId,
    /// Vehicle name (may be empty).
    VehicleName,
    /// Driver's name.
    DriverName,
    /// Number of boxes.
    BoxCount,
    /// Label color.
    ColorTag,
}

impl QueryParam {
    /// Every parameter, in the order they are written.
    pub const ALL: [Self; 13] = [
        Self::MaxTime,
        Self::Street,
        Self::Number,
        Self::Complement,
        Self::Neighborhood,
        Self::City,
        Self::State,
        Self::ZipCode,
        Self::VehicleId,
        Self::VehicleName,
        Self::DriverName,
        Self::BoxCount,
        Self::ColorTag,
    ];

    /// Parameter name in the query string.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MaxTime => "maxTime",
            Self::Street => "street",
            Self::Number => "number",
            Self::Complement => "complement",
            Self::Neighborhood => "neighborhood",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::VehicleId => "vehicleId",
            Self::VehicleName => "vehicleName",
            Self::DriverName => "driverName",
            Self::BoxCount => "boxCount",
            Self::ColorTag => "colorTag",
        }
    }

    /// Name used by identifiers printed before the vehicle/color renames.
    #[must_use]
    pub fn legacy_name(self) -> Option<&'static str> {
        match self {
            Self::VehicleId => Some("busNumber"),
            Self::VehicleName => Some("busName"),
            Self::ColorTag => Some("orderColor"),
            _ => None,
        }
    }
}

/// Decoded query parameters. The first occurrence of a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// An empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter unless one with the same name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Raw lookup by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a known parameter, falling back to its legacy name, then
    /// to `""`.
    #[must_use]
    pub fn value(&self, param: QueryParam) -> &str {
        self.get(param.name())
            .or_else(|| param.legacy_name().and_then(|legacy| self.get(legacy)))
            .unwrap_or_default()
    }

    /// The carried order number, or `""`.
    #[must_use]
    pub fn order_number(&self) -> &str {
        self.get(ORDER_NUMBER_PARAM).unwrap_or_default()
    }

    /// Number of distinct parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Decode the parameters of an identifier, or of a bare query string.
///
/// When the input has a `?`, the last path segment before it is taken as
/// the order number (unless the query carries `orderNumber` itself). Never
/// fails: malformed escapes are decoded lossily.
#[must_use]
pub fn parse_query(input: &str) -> QueryParams {
    let input = strip_fragment(input.trim());
    let (location, query) = match input.split_once('?') {
        Some((location, query)) => (Some(location), query),
        None => (None, input),
    };

    let mut params: QueryParams = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    if let Some(location) = location {
        params.insert(ORDER_NUMBER_PARAM, last_path_segment(location));
    }

    params
}

fn strip_fragment(input: &str) -> &str {
    input.split_once('#').map_or(input, |(before, _)| before)
}

/// Last `/`-separated segment of `location`, percent-decoded.
fn last_path_segment(location: &str) -> String {
    let segment = location.rsplit('/').next().unwrap_or_default();
    String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned()
}

/// A validated identifier URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    url: Url,
    params: QueryParams,
}

impl Identifier {
    /// Parse and validate an identifier URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the input is not an absolute
    /// URL or has no order number in its last path segment.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let url = Url::parse(trimmed)
            .map_err(|e| Error::invalid_identifier(trimmed, e.to_string()))?;

        // `Url` drops `.` and `..` segments, so the order number is read
        // from the text as written.
        let location = strip_fragment(trimmed)
            .split_once('?')
            .map_or(strip_fragment(trimmed), |(location, _)| location);
        let raw_segment = last_path_segment(location);
        let url_segment = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();
        if url_segment.is_empty() && !matches!(raw_segment.as_str(), "." | "..") {
            return Err(Error::invalid_identifier(
                trimmed,
                "no order number in the last path segment",
            ));
        }

        let mut params: QueryParams = url.query_pairs().into_owned().collect();
        params.insert(ORDER_NUMBER_PARAM, raw_segment);
        Ok(Self { url, params })
    }

    /// The order number from the path (or an explicit `orderNumber` parameter).
    #[must_use]
    pub fn order_number(&self) -> &str {
        self.params.order_number()
    }

    /// Decoded query parameters.
    #[must_use]
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// The identifier as a URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Consume the identifier, keeping its parameters.
    #[must_use]
    pub fn into_params(self) -> QueryParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_order_is_fixed() {
        let names: Vec<_> = QueryParam::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "maxTime",
                "street",
                "number",
                "complement",
                "neighborhood",
                "city",
                "state",
                "zipCode",
                "vehicleId",
                "vehicleName",
                "driverName",
                "boxCount",
                "colorTag",
            ]
        );
    }

    #[test]
    fn test_legacy_names() {
        assert_eq!(QueryParam::VehicleId.legacy_name(), Some("busNumber"));
        assert_eq!(QueryParam::VehicleName.legacy_name(), Some("busName"));
        assert_eq!(QueryParam::ColorTag.legacy_name(), Some("orderColor"));
        assert_eq!(QueryParam::Street.legacy_name(), None);
    }

    #[test]
    fn test_parse_query_bare() {
        let params = parse_query("street=Rua%20A&number=10&city=S%C3%A3o+Paulo");
        assert_eq!(params.value(QueryParam::Street), "Rua A");
        assert_eq!(params.value(QueryParam::Number), "10");
        assert_eq!(params.value(QueryParam::City), "São Paulo");
        assert_eq!(params.order_number(), "");
    }

    #[test]
    fn test_parse_query_takes_order_number_from_path() {
        let params = parse_query("https://example.com/pedido/A%2F7?street=x");
        assert_eq!(params.order_number(), "A/7");
        assert_eq!(params.value(QueryParam::Street), "x");
    }

    #[test]
    fn test_parse_query_explicit_order_number_wins() {
        let params = parse_query("https://example.com/pedido/1?orderNumber=2");
        assert_eq!(params.order_number(), "2");
    }

    #[test]
    fn test_parse_query_missing_is_empty() {
        let params = parse_query("https://example.com/pedido/1?street=x");
        assert_eq!(params.value(QueryParam::Complement), "");
        assert_eq!(params.value(QueryParam::ColorTag), "");
    }

    #[test]
    fn test_parse_query_tolerates_unknown_and_fragment() {
        let params = parse_query("https://e.com/p/1?utm_source=qr&street=x#top");
        assert_eq!(params.get("utm_source"), Some("qr"));
        assert_eq!(params.value(QueryParam::Street), "x");
    }

    #[test]
    fn test_parse_query_first_occurrence_wins() {
        let params = parse_query("street=first&street=second");
        assert_eq!(params.value(QueryParam::Street), "first");
    }

    #[test]
    fn test_legacy_fallback_only_when_canonical_absent() {
        let params = parse_query("busNumber=OLD-1&orderColor=verde");
        assert_eq!(params.value(QueryParam::VehicleId), "OLD-1");
        assert_eq!(params.value(QueryParam::ColorTag), "verde");

        let params = parse_query("vehicleId=NEW-2&busNumber=OLD-1");
        assert_eq!(params.value(QueryParam::VehicleId), "NEW-2");
    }

    #[test]
    fn test_parse_query_malformed_escape_does_not_fail() {
        let params = parse_query("street=%ZZ%&number=%FF");
        assert_eq!(params.value(QueryParam::Street), "%ZZ%");
        assert!(!params.value(QueryParam::Number).is_empty());
    }

    #[test]
    fn test_query_params_from_iter() {
        let params: QueryParams = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("1"));
        assert!(!params.is_empty());
    }

    #[test]
    fn test_identifier_parse() {
        let id = Identifier::parse("https://example.com/pedido/987?boxCount=2").unwrap();
        assert_eq!(id.order_number(), "987");
        assert_eq!(id.params().value(QueryParam::BoxCount), "2");
        assert_eq!(id.url().host_str(), Some("example.com"));
    }

    #[test]
    fn test_identifier_parse_rejects_relative() {
        let err = Identifier::parse("pedido/987?boxCount=2").unwrap_err();
        assert!(err.is_invalid_identifier());
    }

    #[test]
    fn test_identifier_parse_rejects_missing_order_number() {
        let err = Identifier::parse("https://example.com/?street=x").unwrap_err();
        assert!(err.to_string().contains("order number"));
    }

    #[test]
    fn test_identifier_parse_without_query() {
        let id = Identifier::parse("https://example.com/pedido/987").unwrap();
        assert_eq!(id.order_number(), "987");
        assert!(id.params().value(QueryParam::Street).is_empty());
    }

    #[test]
    fn test_identifier_parse_keeps_dot_segments() {
        let id = Identifier::parse("https://example.com/pedido/.?street=x").unwrap();
        assert_eq!(id.order_number(), ".");
        assert_eq!(id.params().value(QueryParam::Street), "x");

        let id = Identifier::parse("https://example.com/pedido/..#top").unwrap();
        assert_eq!(id.order_number(), "..");
    }

    #[test]
    fn test_identifier_parse_rejects_bare_host() {
        assert!(Identifier::parse("https://example.com?street=x").is_err());
        assert!(Identifier::parse("https://example.com/pedido/?street=x").is_err());
    }
}
