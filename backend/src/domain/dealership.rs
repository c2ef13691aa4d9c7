//! Dealership data model.
//!
//! A dealership carries a business registration number that is stored but
//! never leaves the service through the HTTP surface. The type has no
//! `Serialize` implementation; inbound adapters build projections from its
//! accessors.
//!
//! Validation mirrors the storage columns: lengths are bounded, but any
//! string the table accepts (including an empty one) is a valid value.

use std::fmt;

use thiserror::Error;

/// Maximum length of a dealership display name.
pub const DEALERSHIP_NAME_MAX: usize = 64;
/// Maximum length of a registration number.
pub const REGISTRATION_NUMBER_MAX: usize = 14;

/// Validation errors returned when constructing dealership values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealershipValidationError {
    #[error("dealership name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("registration number must be at most {max} characters")]
    RegistrationNumberTooLong { max: usize },
}

/// System-assigned dealership identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DealershipId(i32);

impl DealershipId {
    /// Wrap a raw storage identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier as stored.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for DealershipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of a dealership.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DealershipName(String);

impl DealershipName {
    /// Validate and construct a [`DealershipName`].
    pub fn new(name: impl Into<String>) -> Result<Self, DealershipValidationError> {
        let name = name.into();
        if name.chars().count() > DEALERSHIP_NAME_MAX {
            return Err(DealershipValidationError::NameTooLong {
                max: DEALERSHIP_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for DealershipName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DealershipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Business registration number (SIRET).
///
/// `Debug` is redacted so the value never ends up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    /// Validate and construct a [`RegistrationNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, DealershipValidationError> {
        let value = value.into();
        if value.chars().count() > REGISTRATION_NUMBER_MAX {
            return Err(DealershipValidationError::RegistrationNumberTooLong {
                max: REGISTRATION_NUMBER_MAX,
            });
        }
        Ok(Self(value))
    }

    /// Raw value, for storage and administrative tooling only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RegistrationNumber(<redacted>)")
    }
}

/// A car dealership.
///
/// # Examples
/// ```
/// use concessionnaire_api::domain::{Dealership, DealershipId, DealershipName, RegistrationNumber};
///
/// let dealership = Dealership::new(
///     DealershipId::new(1),
///     DealershipName::new("AutoPlus Paris").expect("valid name"),
///     RegistrationNumber::new("12345678900011").expect("valid number"),
/// );
/// assert_eq!(dealership.name().as_ref(), "AutoPlus Paris");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealership {
    id: DealershipId,
    name: DealershipName,
    registration_number: RegistrationNumber,
}

impl Dealership {
    pub fn new(
        id: DealershipId,
        name: DealershipName,
        registration_number: RegistrationNumber,
    ) -> Self {
        Self {
            id,
            name,
            registration_number,
        }
    }

    pub fn id(&self) -> DealershipId {
        self.id
    }

    pub fn name(&self) -> &DealershipName {
        &self.name
    }

    pub fn registration_number(&self) -> &RegistrationNumber {
        &self.registration_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn accepts_blank_names_the_table_allows(#[case] raw: &str) {
        let name = DealershipName::new(raw).expect("column accepts blank names");
        assert_eq!(name.as_ref(), raw);
    }

    #[rstest]
    fn rejects_long_names() {
        let raw = "x".repeat(DEALERSHIP_NAME_MAX + 1);
        assert_eq!(
            DealershipName::new(raw),
            Err(DealershipValidationError::NameTooLong {
                max: DEALERSHIP_NAME_MAX
            })
        );
    }

    #[rstest]
    fn rejects_overlong_registration_numbers() {
        assert_eq!(
            RegistrationNumber::new("123456789000112"),
            Err(DealershipValidationError::RegistrationNumberTooLong {
                max: REGISTRATION_NUMBER_MAX
            })
        );
    }

    #[rstest]
    fn debug_output_hides_registration_number() {
        let dealership = Dealership::new(
            DealershipId::new(7),
            DealershipName::new("Garage du Port").expect("valid name"),
            RegistrationNumber::new("98765432100017").expect("valid number"),
        );

        let rendered = format!("{dealership:?}");
        assert!(!rendered.contains("98765432100017"));
        assert!(rendered.contains("Garage du Port"));
    }
}
