//! Authentication and registration inputs.
//!
//! Inbound adapters hand raw strings to these constructors so payload parsing
//! stays outside the domain while validation stays inside it.

use std::fmt;

use zeroize::Zeroizing;

use super::{AccountValidationError, Email, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used to issue tokens.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use concessionnaire_api::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" john_doe ", "motdepasse123").unwrap();
/// assert_eq!(creds.username(), "john_doe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Reasons a registration payload is rejected before storage is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// One or more required fields were absent or blank.
    MissingFields(Vec<&'static str>),
    /// A present field failed its format constraints.
    Invalid(AccountValidationError),
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(_) => write!(f, "username, email and password are required"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated account registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: Email,
    password: Zeroizing<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl Registration {
    /// Validate optional raw fields.
    ///
    /// Absent and whitespace-only values are both reported as missing, in
    /// `username`, `email`, `password` order.
    ///
    /// # Examples
    /// ```
    /// use concessionnaire_api::domain::{Registration, RegistrationValidationError};
    ///
    /// let err = Registration::try_from_parts(Some("john"), None, Some("  ")).unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     RegistrationValidationError::MissingFields(vec!["email", "password"])
    /// );
    /// ```
    pub fn try_from_parts(
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, RegistrationValidationError> {
        let fields = [
            ("username", present(username)),
            ("email", present(email)),
            ("password", present(password)),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        let [(_, Some(username)), (_, Some(email)), (_, Some(password))] = fields else {
            return Err(RegistrationValidationError::MissingFields(missing));
        };

        Ok(Self {
            username: Username::new(username).map_err(RegistrationValidationError::Invalid)?,
            email: Email::new(email).map_err(RegistrationValidationError::Invalid)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(None, None, None, vec!["username", "email", "password"])]
    #[case(Some("john"), Some(""), Some("pw"), vec!["email"])]
    #[case(Some(" "), Some("a@b.c"), Some("pw"), vec!["username"])]
    #[case(Some("john"), Some("a@b.c"), Some("   "), vec!["password"])]
    fn missing_fields_are_listed(
        #[case] username: Option<&str>,
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] expected: Vec<&'static str>,
    ) {
        let err = Registration::try_from_parts(username, email, password)
            .expect_err("incomplete payload must fail");
        assert_eq!(err, RegistrationValidationError::MissingFields(expected));
        assert_eq!(err.to_string(), "username, email and password are required");
    }

    #[rstest]
    fn registration_trims_username_and_keeps_password() {
        let registration =
            Registration::try_from_parts(Some(" john_doe "), Some("john@example.com"), Some(" pw "))
                .expect("complete payload");
        assert_eq!(registration.username().as_ref(), "john_doe");
        assert_eq!(registration.email().as_ref(), "john@example.com");
        assert_eq!(registration.password(), " pw ");
    }

    #[rstest]
    fn overlong_username_is_invalid() {
        let long = "u".repeat(crate::domain::account::USERNAME_MAX + 1);
        let err = Registration::try_from_parts(Some(&long), Some("a@b.c"), Some("pw"))
            .expect_err("overlong username");
        assert!(matches!(err, RegistrationValidationError::Invalid(_)));
    }
}
