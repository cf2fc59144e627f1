//! Recover an [`Address`] from a formatted address line.
//!
//! The line is cut into at most three field segments:
//!
//! ```text
//! Av. Brasil , 123 - Apto 101 - Centro , São Paulo - SP, 01234-567
//! ^ head       ^ middle                  ^ locality
//! ```
//!
//! Each step falls back to a coarser reading instead of failing.

use tracing::{debug, trace};

use super::patterns::{HOUSE_NUMBER, POSTAL_CODE};
use crate::grammar::{FIELD_SEPARATOR, PART_SEPARATOR};
use crate::record::{non_empty, Address};

/// Parse a formatted address line. Never fails.
pub(crate) fn parse_address(line: &str) -> Address {
    let segments: Vec<&str> = line.splitn(3, FIELD_SEPARATOR).collect();
    let (head, middle, locality) = match segments.as_slice() {
        [head, middle] => (*head, *middle, None),
        [head, middle, locality] => (*head, *middle, Some(*locality)),
        _ => {
            debug!("Address line has no field separator, keeping it verbatim");
            return Address::verbatim(line);
        }
    };

    let mut address = Address::default();
    parse_street_block(head, middle, &mut address);

    match locality {
        Some(locality) => parse_locality(locality, line, &mut address),
        None => {
            trace!("Address line has no locality segment");
            address.zip_code = postal_code_fallback(line);
        }
    }

    address
}

/// Street, number, complement and neighborhood.
///
/// Whenever the middle segment has a part separator its first piece is the
/// number, which is how the line is printed. Only a lone middle piece that
/// does not look like a number falls back to reading the number off the end
/// of the street.
fn parse_street_block(head: &str, middle: &str, address: &mut Address) {
    let pieces: Vec<&str> = middle.split(PART_SEPARATOR).map(str::trim).collect();

    match pieces.as_slice() {
        // number - neighborhood, or number - complement... - neighborhood
        [number, rest @ ..] if !rest.is_empty() || HOUSE_NUMBER.matches_whole(number) => {
            address.street = head.trim().to_string();
            address.number = (*number).to_string();
            if let Some((neighborhood, complement)) = rest.split_last() {
                address.neighborhood = (*neighborhood).to_string();
                address.complement = non_empty(complement.join(PART_SEPARATOR));
            }
        }
        // The number is glued to the street: "Rua das Flores 45, Centro"
        _ => {
            trace!("Middle segment holds no number, looking at the end of the street");
            let (street, number) = split_trailing_number(head);
            address.street = street.to_string();
            address.number = number.to_string();
            address.neighborhood = middle.trim().to_string();
        }
    }
}

/// Split `"Rua das Flores 45"` into `("Rua das Flores", "45")`.
///
/// The last token only counts as a number when it looks like one.
fn split_trailing_number(head: &str) -> (&str, &str) {
    let head = head.trim();
    match head.rsplit_once(' ') {
        Some((street, number)) if HOUSE_NUMBER.matches_whole(number) => (street.trim(), number),
        _ => (head, ""),
    }
}

/// City, state and postal code.
fn parse_locality(locality: &str, line: &str, address: &mut Address) {
    match locality.split_once(PART_SEPARATOR) {
        Some((city, rest)) => {
            address.city = city.trim().to_string();
            match rest.split_once(FIELD_SEPARATOR) {
                Some((state, zip_code)) => {
                    address.state = state.trim().to_string();
                    address.zip_code = zip_code.trim().to_string();
                }
                None => {
                    debug!("Locality has no state/postal code pair, searching for a postal code");
                    address.zip_code = postal_code_fallback(line);
                }
            }
        }
        None => {
            let city = locality
                .split_once(FIELD_SEPARATOR)
                .map_or(locality, |(city, _)| city)
                .trim();
            if !POSTAL_CODE.matches_whole(city) {
                address.city = city.to_string();
            }
            address.zip_code = postal_code_fallback(line);
        }
    }
}

/// Last postal code found anywhere in the line, or `""`.
fn postal_code_fallback(line: &str) -> String {
    let found = POSTAL_CODE.find_last(line).unwrap_or_default();
    trace!(pattern = POSTAL_CODE.name, found, "Postal code fallback");
    found.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_canonical_line() {
        let address = parse_address("Av. Brasil, 123 - Apto 101 - Centro, São Paulo - SP, 01234-567");
        assert_eq!(address.street, "Av. Brasil");
        assert_eq!(address.number, "123");
        assert_eq!(address.complement(), "Apto 101");
        assert_eq!(address.neighborhood, "Centro");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
        assert_eq!(address.zip_code, "01234-567");
    }

    #[test]
    fn test_missing_complement() {
        let address = parse_address("Rua A, 10 - Centro, Cidade X - UF, 99999-999");
        assert_eq!(address.street, "Rua A");
        assert_eq!(address.number, "10");
        assert_eq!(address.complement(), "");
        assert!(address.complement.is_none());
        assert_eq!(address.neighborhood, "Centro");
        assert_eq!(address.city, "Cidade X");
        assert_eq!(address.state, "UF");
        assert_eq!(address.zip_code, "99999-999");
    }

    #[test]
    fn test_degenerate_line_is_kept_verbatim() {
        let address = parse_address("endereço incompleto");
        assert_eq!(address, Address::verbatim("endereço incompleto"));
        assert!(address.number.is_empty());
        assert!(address.neighborhood.is_empty());
        assert!(address.city.is_empty());
        assert!(address.state.is_empty());
        assert!(address.zip_code.is_empty());
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse_address(""), Address::default());
    }

    #[test]
    fn test_complement_with_dashes() {
        let address =
            parse_address("Rua B, 7 - Bloco 2 - Apto 3 - Jardim, Recife - PE, 50000-000");
        assert_eq!(address.number, "7");
        assert_eq!(address.complement(), "Bloco 2 - Apto 3");
        assert_eq!(address.neighborhood, "Jardim");
    }

    #[test]
    fn test_non_numeric_number_in_canonical_layout() {
        let address = parse_address("Rua C, s/n - Vila Nova, Campinas - SP, 13000-000");
        assert_eq!(address.number, "s/n");
        assert_eq!(address.neighborhood, "Vila Nova");
    }

    #[test]
    fn test_printed_number_wins_over_street_digits() {
        let address = parse_address("Rua 25, Km 3 - Centro, Natal - RN, 59000-000");
        assert_eq!(address.street, "Rua 25");
        assert_eq!(address.number, "Km 3");
        assert!(address.complement.is_none());
        assert_eq!(address.neighborhood, "Centro");
    }

    #[test]
    fn test_word_numbers_without_complement() {
        for number in ["Km 5", "Lote 3", "A"] {
            let line = format!("Av. Brasil, {number} - Centro, São Paulo - SP, 01234-567");
            let address = parse_address(&line);
            assert_eq!(address.street, "Av. Brasil", "number {number:?}");
            assert_eq!(address.number, number);
            assert!(address.complement.is_none(), "number {number:?}");
            assert_eq!(address.neighborhood, "Centro");
        }
    }

    #[test]
    fn test_empty_number_and_neighborhood() {
        let address = parse_address("Rua A,  - , Cidade X - UF, 99999-999");
        assert_eq!(address.street, "Rua A");
        assert_eq!(address.number, "");
        assert_eq!(address.neighborhood, "");
        assert_eq!(address.city, "Cidade X");
    }

    #[test]
    fn test_compact_layout_without_complement() {
        let address = parse_address("Rua das Flores 45, Centro, Natal - RN, 59000-000");
        assert_eq!(address.street, "Rua das Flores");
        assert_eq!(address.number, "45");
        assert!(address.complement.is_none());
        assert_eq!(address.neighborhood, "Centro");
    }

    #[test]
    fn test_street_without_number() {
        let address = parse_address("Avenida Central, Centro, Natal - RN, 59000-000");
        assert_eq!(address.street, "Avenida Central");
        assert_eq!(address.number, "");
        assert_eq!(address.neighborhood, "Centro");
    }

    #[test]
    fn test_number_only_middle() {
        let address = parse_address("Rua A, 123, Cidade - UF, 12345-678");
        assert_eq!(address.street, "Rua A");
        assert_eq!(address.number, "123");
        assert_eq!(address.neighborhood, "");
        assert_eq!(address.city, "Cidade");
    }

    #[test]
    fn test_postal_code_fallback_drops_state() {
        let address = parse_address("Rua A, 10 - Centro, Cidade X - UF 99999-999");
        assert_eq!(address.city, "Cidade X");
        assert_eq!(address.state, "");
        assert_eq!(address.zip_code, "99999-999");
    }

    #[test]
    fn test_postal_code_fallback_eight_digits() {
        let address = parse_address("Rua A, 10 - Centro, Cidade X - 99999999");
        assert_eq!(address.state, "");
        assert_eq!(address.zip_code, "99999999");
    }

    #[test]
    fn test_postal_code_fallback_without_match() {
        let address = parse_address("Rua A, 10 - Centro, Cidade X - UF");
        assert_eq!(address.city, "Cidade X");
        assert_eq!(address.state, "");
        assert_eq!(address.zip_code, "");
    }

    #[test]
    fn test_locality_without_part_separator() {
        let address = parse_address("Rua A, 10 - Centro, Cidade X, 12345-678");
        assert_eq!(address.city, "Cidade X");
        assert_eq!(address.state, "");
        assert_eq!(address.zip_code, "12345-678");
    }

    #[test]
    fn test_locality_is_only_postal_code() {
        let address = parse_address("Rua A, 10 - Centro, 12345-678");
        assert_eq!(address.city, "");
        assert_eq!(address.zip_code, "12345-678");
    }

    #[test]
    fn test_missing_locality() {
        let address = parse_address("Rua A, 10 - Centro");
        assert_eq!(address.street, "Rua A");
        assert_eq!(address.number, "10");
        assert_eq!(address.neighborhood, "Centro");
        assert_eq!(address.city, "");
        assert_eq!(address.zip_code, "");
    }

    #[test]
    fn test_pieces_are_trimmed() {
        let address =
            parse_address("  Rua A ,  10  -  Centro , Cidade X  -  UF ,  99999-999  ");
        assert_eq!(address.street, "Rua A");
        assert_eq!(address.number, "10");
        assert_eq!(address.neighborhood, "Centro");
        assert_eq!(address.city, "Cidade X");
        assert_eq!(address.state, "UF");
        assert_eq!(address.zip_code, "99999-999");
    }
}
