//! Exact recovery from identifier query parameters.

use crate::identifier::{QueryParam, QueryParams};
use crate::record::{non_empty, Address, BoxCount, ColorTag, DeliveryRecord, DeliveryTime, Transport};

/// Build a record field by field from decoded parameters.
///
/// Missing parameters read as empty; box count, color and time get their
/// usual coercions and defaults. Always succeeds.
#[must_use]
pub fn recover_from_structured_params(params: &QueryParams) -> DeliveryRecord {
    let text = |param: QueryParam| params.value(param).to_string();

    DeliveryRecord {
        order_number: params.order_number().to_string(),
        address: Address {
            street: text(QueryParam::Street),
            number: text(QueryParam::Number),
            complement: non_empty(text(QueryParam::Complement)),
            neighborhood: text(QueryParam::Neighborhood),
            city: text(QueryParam::City),
            state: text(QueryParam::State),
            zip_code: text(QueryParam::ZipCode),
        },
        transport: Transport {
            vehicle_id: text(QueryParam::VehicleId),
            vehicle_name: non_empty(text(QueryParam::VehicleName)),
            driver_name: text(QueryParam::DriverName),
        },
        box_count: BoxCount::coerce(params.value(QueryParam::BoxCount)),
        color_tag: ColorTag::new(params.value(QueryParam::ColorTag)),
        max_delivery_time: DeliveryTime::parse_or_default(params.value(QueryParam::MaxTime)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::parse_query;

    #[test]
    fn test_empty_params_get_defaults() {
        let record = recover_from_structured_params(&QueryParams::new());
        assert_eq!(record.order_number, "");
        assert_eq!(record.box_count, BoxCount::ONE);
        assert_eq!(record.color_tag.as_str(), "azul");
        assert_eq!(record.max_delivery_time.to_string(), "18:00");
        assert!(record.address.complement.is_none());
        assert!(record.transport.vehicle_name.is_none());
    }

    #[test]
    fn test_explicit_empty_defaults() {
        let record = recover_from_structured_params(&parse_query("maxTime=&colorTag=&boxCount="));
        assert_eq!(record.color_tag.as_str(), "azul");
        assert_eq!(record.max_delivery_time.to_string(), "18:00");
        assert_eq!(record.box_count.get(), 1);
    }

    #[test]
    fn test_box_count_coercion() {
        for (raw, expected) in [("0", 1), ("-5", 1), ("abc", 1), ("7", 7)] {
            let record = recover_from_structured_params(&parse_query(&format!("boxCount={raw}")));
            assert_eq!(record.box_count.get(), expected, "input {raw:?}");
        }
    }

    #[test]
    fn test_legacy_identifier() {
        let record = recover_from_structured_params(&parse_query(
            "https://x.dev/pedido/55?maxTime=10%3A00&busNumber=ABC-1&busName=Linha+3\
             &driverName=Rui&boxCount=2&orderColor=vermelho",
        ));
        assert_eq!(record.order_number, "55");
        assert_eq!(record.transport.vehicle_id, "ABC-1");
        assert_eq!(record.transport.vehicle_name(), "Linha 3");
        assert_eq!(record.color_tag.as_str(), "vermelho");
        assert_eq!(record.max_delivery_time.to_string(), "10:00");
        assert_eq!(record.box_count.get(), 2);
    }
}
