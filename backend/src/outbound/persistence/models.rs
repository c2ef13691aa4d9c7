//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions into domain
//! records validate every column so malformed rows surface as query errors.

use diesel::prelude::*;

use crate::domain::{
    Account, AccountId, AccountValidationError, Dealership, DealershipId, DealershipName,
    DealershipValidationError, Email, NewAccount, PasswordHash, RegistrationNumber, Username,
    Vehicle, VehicleDraft, VehicleValidationError,
};

use super::schema::{accounts, dealerships, vehicles};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dealerships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DealershipRow {
    pub id: i32,
    pub name: String,
    pub registration_number: String,
}

impl TryFrom<DealershipRow> for Dealership {
    type Error = DealershipValidationError;

    fn try_from(row: DealershipRow) -> Result<Self, Self::Error> {
        Ok(Dealership::new(
            DealershipId::new(row.id),
            DealershipName::new(row.name)?,
            RegistrationNumber::new(row.registration_number)?,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VehicleRow {
    pub id: i32,
    pub category: String,
    pub make: String,
    pub horsepower: i32,
    pub pre_tax_price: f64,
    pub dealership_id: i32,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = VehicleValidationError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Vehicle::try_from(VehicleDraft {
            id: row.id,
            category: row.category,
            make: row.make,
            horsepower: row.horsepower,
            pre_tax_price: row.pre_tax_price,
            dealership_id: row.dealership_id,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountValidationError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account::new(
            AccountId::new(row.id),
            NewAccount {
                username: Username::new(row.username)?,
                email: Email::new(row.email)?,
                password_hash: PasswordHash::new(row.password_hash)?,
            },
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl<'a> From<&'a NewAccount> for NewAccountRow<'a> {
    fn from(account: &'a NewAccount) -> Self {
        Self {
            username: account.username.as_ref(),
            email: account.email.as_ref(),
            password_hash: account.password_hash.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn vehicle_row_with_unknown_category_is_rejected() {
        let row = VehicleRow {
            id: 1,
            category: "boat".to_owned(),
            make: "Beneteau".to_owned(),
            horsepower: 200,
            pre_tax_price: 90_000.0,
            dealership_id: 1,
        };
        assert_eq!(
            Vehicle::try_from(row),
            Err(VehicleValidationError::UnknownCategory("boat".to_owned()))
        );
    }

    #[rstest]
    fn dealership_row_converts() {
        let row = DealershipRow {
            id: 4,
            name: "AutoPlus Paris".to_owned(),
            registration_number: "12345678900011".to_owned(),
        };
        let dealership = Dealership::try_from(row).expect("valid row");
        assert_eq!(dealership.id(), DealershipId::new(4));
        assert_eq!(dealership.registration_number().expose(), "12345678900011");
    }
}
