//! Declarative description of how administrative tooling presents records.
//!
//! Each record type maps to a fixed list of visible columns, filters and
//! search fields. Admin surfaces read this table; nothing registers into it
//! at runtime.

use super::{Dealership, DealershipName, Vehicle};

/// Record types known to administrative tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRecord {
    Dealership,
    Vehicle,
}

/// Presentation rules for one record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminTable {
    pub record: AdminRecord,
    pub columns: &'static [&'static str],
    pub filters: &'static [&'static str],
    pub search: &'static [&'static str],
}

pub const DEALERSHIP_TABLE: AdminTable = AdminTable {
    record: AdminRecord::Dealership,
    columns: &["id", "name", "registration_number"],
    filters: &["name"],
    search: &["name", "registration_number"],
};

pub const VEHICLE_TABLE: AdminTable = AdminTable {
    record: AdminRecord::Vehicle,
    columns: &[
        "id",
        "make",
        "category",
        "horsepower",
        "pre_tax_price",
        "dealership",
    ],
    filters: &["category", "dealership"],
    search: &["make", "dealership name"],
};

/// Every table, in display order.
pub const ADMIN_TABLES: [AdminTable; 2] = [DEALERSHIP_TABLE, VEHICLE_TABLE];

impl AdminRecord {
    /// Presentation rules for this record type.
    pub fn table(self) -> &'static AdminTable {
        match self {
            Self::Dealership => &DEALERSHIP_TABLE,
            Self::Vehicle => &VEHICLE_TABLE,
        }
    }
}

/// Render the visible columns of a dealership row.
pub fn dealership_row(dealership: &Dealership) -> Vec<String> {
    DEALERSHIP_TABLE
        .columns
        .iter()
        .map(|column| match *column {
            "id" => dealership.id().to_string(),
            "name" => dealership.name().to_string(),
            "registration_number" => dealership.registration_number().expose().to_owned(),
            _ => String::new(),
        })
        .collect()
}

/// Render the visible columns of a vehicle row.
pub fn vehicle_row(vehicle: &Vehicle, dealership_name: &DealershipName) -> Vec<String> {
    VEHICLE_TABLE
        .columns
        .iter()
        .map(|column| match *column {
            "id" => vehicle.id().to_string(),
            "make" => vehicle.make().to_owned(),
            "category" => vehicle.category().to_string(),
            "horsepower" => vehicle.horsepower().to_string(),
            "pre_tax_price" => format!("{:.2}", vehicle.pre_tax_price()),
            "dealership" => dealership_name.to_string(),
            _ => String::new(),
        })
        .collect()
}

/// Whether a dealership row matches a case-insensitive search term.
pub fn dealership_matches(dealership: &Dealership, term: &str) -> bool {
    let needle = term.to_lowercase();
    DEALERSHIP_TABLE.search.iter().any(|field| {
        let haystack = match *field {
            "name" => dealership.name().as_ref(),
            "registration_number" => dealership.registration_number().expose(),
            _ => "",
        };
        haystack.to_lowercase().contains(&needle)
    })
}

/// Whether a vehicle row matches a case-insensitive search term.
pub fn vehicle_matches(vehicle: &Vehicle, dealership_name: &DealershipName, term: &str) -> bool {
    let needle = term.to_lowercase();
    VEHICLE_TABLE.search.iter().any(|field| {
        let haystack = match *field {
            "make" => vehicle.make(),
            "dealership name" => dealership_name.as_ref(),
            _ => "",
        };
        haystack.to_lowercase().contains(&needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DealershipId, RegistrationNumber, VehicleDraft};
    use rstest::{fixture, rstest};

    #[fixture]
    fn dealership() -> Dealership {
        Dealership::new(
            DealershipId::new(1),
            DealershipName::new("AutoPlus Paris").expect("valid name"),
            RegistrationNumber::new("12345678900011").expect("valid number"),
        )
    }

    #[fixture]
    fn vehicle() -> Vehicle {
        Vehicle::try_from(VehicleDraft {
            id: 3,
            category: "moto".to_owned(),
            make: "Yamaha".to_owned(),
            horsepower: 70,
            pre_tax_price: 8_990.5,
            dealership_id: 1,
        })
        .expect("valid vehicle")
    }

    #[rstest]
    fn every_record_has_columns_and_filters() {
        for table in ADMIN_TABLES {
            assert_eq!(table.record.table(), &table);
            assert!(!table.columns.is_empty());
            assert!(table.filters.iter().all(|f| table.columns.contains(f)));
        }
    }

    #[rstest]
    fn dealership_row_includes_registration_number(dealership: Dealership) {
        assert_eq!(
            dealership_row(&dealership),
            vec!["1", "AutoPlus Paris", "12345678900011"]
        );
    }

    #[rstest]
    fn vehicle_row_follows_column_order(vehicle: Vehicle, dealership: Dealership) {
        assert_eq!(
            vehicle_row(&vehicle, dealership.name()),
            vec!["3", "Yamaha", "moto", "70", "8990.50", "AutoPlus Paris"]
        );
    }

    #[rstest]
    #[case("autoplus", true)]
    #[case("567890", true)]
    #[case("lyon", false)]
    fn dealership_search_covers_name_and_number(
        dealership: Dealership,
        #[case] term: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(dealership_matches(&dealership, term), expected);
    }

    #[rstest]
    #[case("yamaha", true)]
    #[case("paris", true)]
    #[case("peugeot", false)]
    fn vehicle_search_covers_make_and_dealership(
        vehicle: Vehicle,
        dealership: Dealership,
        #[case] term: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(vehicle_matches(&vehicle, dealership.name(), term), expected);
    }
}
