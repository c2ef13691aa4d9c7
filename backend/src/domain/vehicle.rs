//! Vehicle data model.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::{DealershipId, DealershipName};

/// Maximum length of a vehicle make.
pub const VEHICLE_MAKE_MAX: usize = 64;

/// Validation errors returned when constructing vehicle values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VehicleValidationError {
    #[error("unknown vehicle category: {0}")]
    UnknownCategory(String),
    #[error("vehicle make must be at most {max} characters")]
    MakeTooLong { max: usize },
}

/// System-assigned vehicle identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(i32);

impl VehicleId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of vehicle categories.
///
/// Ordering follows the stored string value so in-memory sorting agrees with
/// `ORDER BY category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VehicleCategory {
    Auto,
    Moto,
}

impl VehicleCategory {
    /// Stored and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Moto => "moto",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = VehicleValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "moto" => Ok(Self::Moto),
            other => Err(VehicleValidationError::UnknownCategory(other.to_owned())),
        }
    }
}

/// Raw vehicle attributes prior to validation.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub id: i32,
    pub category: String,
    pub make: String,
    pub horsepower: i32,
    pub pre_tax_price: f64,
    pub dealership_id: i32,
}

/// A vehicle owned by exactly one dealership.
///
/// ## Invariants
/// - `category` is one of the [`VehicleCategory`] values.
/// - `make` is at most [`VEHICLE_MAKE_MAX`] characters.
///
/// Numeric columns carry no constraint beyond their type, so any stored
/// horsepower or price is accepted.
///
/// # Examples
/// ```
/// use concessionnaire_api::domain::{Vehicle, VehicleCategory, VehicleDraft};
///
/// let vehicle = Vehicle::try_from(VehicleDraft {
///     id: 1,
///     category: "auto".into(),
///     make: "Peugeot".into(),
///     horsepower: 120,
///     pre_tax_price: 25_000.0,
///     dealership_id: 1,
/// })
/// .expect("valid vehicle");
/// assert_eq!(vehicle.category(), VehicleCategory::Auto);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: VehicleId,
    category: VehicleCategory,
    make: String,
    horsepower: i32,
    pre_tax_price: f64,
    dealership_id: DealershipId,
}

impl Vehicle {
    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn category(&self) -> VehicleCategory {
        self.category
    }

    pub fn make(&self) -> &str {
        self.make.as_str()
    }

    pub fn horsepower(&self) -> i32 {
        self.horsepower
    }

    pub fn pre_tax_price(&self) -> f64 {
        self.pre_tax_price
    }

    pub fn dealership_id(&self) -> DealershipId {
        self.dealership_id
    }
}

impl TryFrom<VehicleDraft> for Vehicle {
    type Error = VehicleValidationError;

    fn try_from(draft: VehicleDraft) -> Result<Self, Self::Error> {
        let VehicleDraft {
            id,
            category,
            make,
            horsepower,
            pre_tax_price,
            dealership_id,
        } = draft;

        let category = category.parse::<VehicleCategory>()?;
        if make.chars().count() > VEHICLE_MAKE_MAX {
            return Err(VehicleValidationError::MakeTooLong {
                max: VEHICLE_MAKE_MAX,
            });
        }

        Ok(Self {
            id: VehicleId::new(id),
            category,
            make,
            horsepower,
            pre_tax_price,
            dealership_id: DealershipId::new(dealership_id),
        })
    }
}

/// Vehicle paired with the name of its owning dealership.
///
/// The name is resolved at read time by following the ownership reference.
#[derive(Debug, Clone, PartialEq)]
pub struct DealershipVehicle {
    vehicle: Vehicle,
    dealership_name: DealershipName,
}

impl DealershipVehicle {
    pub fn new(vehicle: Vehicle, dealership_name: DealershipName) -> Self {
        Self {
            vehicle,
            dealership_name,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn dealership_name(&self) -> &DealershipName {
        &self.dealership_name
    }
}

/// Sort vehicles by make, then category, then identity.
pub fn sort_vehicles(vehicles: &mut [Vehicle]) {
    vehicles.sort_by(|a, b| {
        a.make
            .cmp(&b.make)
            .then(a.category.cmp(&b.category))
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> VehicleDraft {
        VehicleDraft {
            id: 1,
            category: "auto".to_owned(),
            make: "Peugeot".to_owned(),
            horsepower: 120,
            pre_tax_price: 25_000.0,
            dealership_id: 1,
        }
    }

    #[rstest]
    #[case("auto", VehicleCategory::Auto)]
    #[case("moto", VehicleCategory::Moto)]
    fn parses_known_categories(#[case] raw: &str, #[case] expected: VehicleCategory) {
        assert_eq!(raw.parse::<VehicleCategory>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("Auto")]
    #[case("truck")]
    #[case("")]
    fn rejects_unknown_categories(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<VehicleCategory>(),
            Err(VehicleValidationError::UnknownCategory(raw.to_owned()))
        );
    }

    #[rstest]
    fn accepts_valid_draft(draft: VehicleDraft) {
        let vehicle = Vehicle::try_from(draft).expect("valid vehicle");
        assert_eq!(vehicle.make(), "Peugeot");
        assert_eq!(vehicle.dealership_id(), DealershipId::new(1));
    }

    #[rstest]
    #[case("", 120, 25_000.0)]
    #[case("Peugeot", -1, 25_000.0)]
    #[case("Peugeot", 120, -5.0)]
    fn accepts_any_values_the_table_stores(
        mut draft: VehicleDraft,
        #[case] make: &str,
        #[case] horsepower: i32,
        #[case] price: f64,
    ) {
        draft.make = make.to_owned();
        draft.horsepower = horsepower;
        draft.pre_tax_price = price;

        let vehicle = Vehicle::try_from(draft).expect("stored values are valid");
        assert_eq!(vehicle.make(), make);
        assert_eq!(vehicle.horsepower(), horsepower);
        assert_eq!(vehicle.pre_tax_price(), price);
    }

    #[rstest]
    fn rejects_overlong_makes(mut draft: VehicleDraft) {
        draft.make = "x".repeat(VEHICLE_MAKE_MAX + 1);
        assert_eq!(
            Vehicle::try_from(draft),
            Err(VehicleValidationError::MakeTooLong {
                max: VEHICLE_MAKE_MAX
            })
        );
    }

    #[rstest]
    fn sorts_by_make_then_category_then_id(draft: VehicleDraft) {
        let build = |id: i32, make: &str, category: &str| {
            Vehicle::try_from(VehicleDraft {
                id,
                make: make.to_owned(),
                category: category.to_owned(),
                ..draft.clone()
            })
            .expect("valid vehicle")
        };
        let mut vehicles = vec![
            build(4, "Yamaha", "moto"),
            build(3, "Peugeot", "moto"),
            build(2, "Peugeot", "auto"),
            build(1, "Peugeot", "auto"),
        ];

        sort_vehicles(&mut vehicles);

        let ids: Vec<i32> = vehicles.iter().map(|v| v.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
