//! User directory data model.
//!
//! Users are owned by the directory service. The tracker only ever sees the
//! public projection carried by [`UserRecord`]; credential hashes stay inside
//! the directory's persistence layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length, in characters, for names and cities.
pub const LABEL_MAX: usize = 64;
/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 8;

/// Validation errors raised while constructing user-facing values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a positive integer")]
    InvalidId,
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("email must contain exactly one '@' with text on both sides")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password and confirmPassword must match")]
    PasswordMismatch,
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

impl UserValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "userId",
            Self::EmptyField { field }
            | Self::FieldTooLong { field, .. }
            | Self::NonFinite { field } => field,
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } => "password",
            Self::PasswordMismatch => "confirmPassword",
        }
    }

    /// Stable machine-readable code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyField { .. } => "empty_field",
            Self::FieldTooLong { .. } => "field_too_long",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::PasswordMismatch => "password_mismatch",
            Self::NonFinite { .. } => "non_finite",
        }
    }
}

/// Directory-assigned user identifier.
///
/// # Examples
/// ```
/// use carbon_backend::domain::UserId;
///
/// let id = UserId::new(7).expect("positive ids are valid");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trim a free-text label and enforce the shared length limits.
///
/// # Examples
/// ```
/// use carbon_backend::domain::validate_label;
///
/// assert_eq!(validate_label("city", "  Pune ").as_deref(), Ok("Pune"));
/// assert!(validate_label("city", "   ").is_err());
/// ```
pub fn validate_label(field: &'static str, value: &str) -> Result<String, UserValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > LABEL_MAX {
        return Err(UserValidationError::FieldTooLong {
            field,
            max: LABEL_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

fn validate_email(value: &str) -> Result<String, UserValidationError> {
    let trimmed = value.trim();
    let mut parts = trimmed.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
            Ok(trimmed.to_owned())
        }
        _ => Err(UserValidationError::InvalidEmail),
    }
}

/// Authorisation role carried on a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Storage representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse the storage representation, returning `None` for unknown tags.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// User record as exposed by the directory.
///
/// The credential hash is never part of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[schema(value_type = i64, example = 42)]
    pub id: UserId,
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "Pune")]
    pub city: String,
    /// Cumulative footprint across every submission.
    pub total_carbon_footprint: f64,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile projection of a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub city: String,
    pub total_carbon_footprint: f64,
}

impl From<UserRecord> for UserProfile {
    fn from(value: UserRecord) -> Self {
        Self {
            name: value.name,
            email: value.email,
            city: value.city,
            total_carbon_footprint: value.total_carbon_footprint,
        }
    }
}

/// Validated registration ready for hashing and storage.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    city: String,
    password: String,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// # Examples
    /// ```
    /// use carbon_backend::domain::Registration;
    ///
    /// let registration = Registration::try_from_parts(
    ///     "Asha Rao",
    ///     "asha@example.com",
    ///     "Pune",
    ///     "correct horse",
    ///     "correct horse",
    /// )
    /// .expect("valid registration");
    /// assert_eq!(registration.email(), "asha@example.com");
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        city: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, UserValidationError> {
        let name = validate_label("name", name)?;
        let email = validate_email(email)?;
        let city = validate_label("city", city)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if password != confirm_password {
            return Err(UserValidationError::PasswordMismatch);
        }
        Ok(Self {
            name,
            email,
            city,
            password: password.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    /// Plain-text password, only ever handed to the credential hasher.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("city", &self.city)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// New user row handed to the directory repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub city: String,
    pub password_hash: String,
    pub role: Role,
}

/// Full replacement of a user's mutable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    name: String,
    total_carbon_footprint: f64,
}

impl UserUpdate {
    /// Validate a replacement payload.
    pub fn try_new(name: &str, total_carbon_footprint: f64) -> Result<Self, UserValidationError> {
        let name = validate_label("name", name)?;
        if !total_carbon_footprint.is_finite() {
            return Err(UserValidationError::NonFinite {
                field: "totalCarbonFootprint",
            });
        }
        Ok(Self {
            name,
            total_carbon_footprint,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn total_carbon_footprint(&self) -> f64 {
        self.total_carbon_footprint
    }
}

#[cfg(test)]
mod tests;
