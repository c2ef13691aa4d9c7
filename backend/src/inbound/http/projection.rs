//! Response projections for inventory records.
//!
//! Each view lists exactly the fields it emits. Domain records have no
//! `Serialize` impl, so these structs are the only way a dealership or a
//! vehicle reaches a response body, and none of them carries the
//! registration number.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Dealership, DealershipVehicle};

/// Public representation of a dealership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DealershipView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "AutoPlus Paris")]
    pub name: String,
}

impl From<&Dealership> for DealershipView {
    fn from(dealership: &Dealership) -> Self {
        Self {
            id: dealership.id().get(),
            name: dealership.name().as_ref().to_owned(),
        }
    }
}

/// Vehicle as listed under a dealership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleSummaryView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "auto")]
    pub category: String,
    #[schema(example = "Peugeot")]
    pub make: String,
    #[schema(example = 120)]
    pub horsepower: i32,
    #[schema(example = 25000.0)]
    pub pre_tax_price: f64,
    #[schema(example = 1)]
    pub dealership_id: i32,
    #[schema(example = "AutoPlus Paris")]
    pub dealership_name: String,
}

impl From<&DealershipVehicle> for VehicleSummaryView {
    fn from(record: &DealershipVehicle) -> Self {
        let vehicle = record.vehicle();
        Self {
            id: vehicle.id().get(),
            category: vehicle.category().as_str().to_owned(),
            make: vehicle.make().to_owned(),
            horsepower: vehicle.horsepower(),
            pre_tax_price: vehicle.pre_tax_price(),
            dealership_id: vehicle.dealership_id().get(),
            dealership_name: record.dealership_name().as_ref().to_owned(),
        }
    }
}

/// Vehicle detail. Mirrors the summary today; kept separate so either can
/// change without touching the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleDetailView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "auto")]
    pub category: String,
    #[schema(example = "Peugeot")]
    pub make: String,
    #[schema(example = 120)]
    pub horsepower: i32,
    #[schema(example = 25000.0)]
    pub pre_tax_price: f64,
    #[schema(example = 1)]
    pub dealership_id: i32,
    #[schema(example = "AutoPlus Paris")]
    pub dealership_name: String,
}

impl From<&DealershipVehicle> for VehicleDetailView {
    fn from(record: &DealershipVehicle) -> Self {
        let vehicle = record.vehicle();
        Self {
            id: vehicle.id().get(),
            category: vehicle.category().as_str().to_owned(),
            make: vehicle.make().to_owned(),
            horsepower: vehicle.horsepower(),
            pre_tax_price: vehicle.pre_tax_price(),
            dealership_id: vehicle.dealership_id().get(),
            dealership_name: record.dealership_name().as_ref().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DealershipId, DealershipName, RegistrationNumber, Vehicle, VehicleDraft};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn dealership() -> Dealership {
        Dealership::new(
            DealershipId::new(1),
            DealershipName::new("AutoPlus Paris").expect("name"),
            RegistrationNumber::new("12345678900011").expect("registration number"),
        )
    }

    #[fixture]
    fn peugeot() -> DealershipVehicle {
        let vehicle = Vehicle::try_from(VehicleDraft {
            id: 1,
            category: "auto".to_owned(),
            make: "Peugeot".to_owned(),
            horsepower: 120,
            pre_tax_price: 25_000.0,
            dealership_id: 1,
        })
        .expect("valid vehicle");
        DealershipVehicle::new(vehicle, DealershipName::new("AutoPlus Paris").expect("name"))
    }

    fn keys(value: &Value) -> Vec<&str> {
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys
    }

    #[rstest]
    fn dealership_view_emits_only_id_and_name(dealership: Dealership) {
        let value = serde_json::to_value(DealershipView::from(&dealership)).expect("json");
        assert_eq!(keys(&value), ["id", "name"]);
        assert!(!value.to_string().contains("12345678900011"));
    }

    #[rstest]
    fn vehicle_detail_matches_the_public_shape(peugeot: DealershipVehicle) {
        let value = serde_json::to_value(VehicleDetailView::from(&peugeot)).expect("json");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "category": "auto",
                "make": "Peugeot",
                "horsepower": 120,
                "pre_tax_price": 25000.0,
                "dealership_id": 1,
                "dealership_name": "AutoPlus Paris",
            })
        );
        assert!(value["pre_tax_price"].is_f64());
    }

    #[rstest]
    fn summary_and_detail_expose_the_same_fields(peugeot: DealershipVehicle) {
        let summary = serde_json::to_value(VehicleSummaryView::from(&peugeot)).expect("json");
        let detail = serde_json::to_value(VehicleDetailView::from(&peugeot)).expect("json");
        assert_eq!(keys(&summary), keys(&detail));
    }
}
