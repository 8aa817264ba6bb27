//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Maximum allowed length for a pseudo, matching the column width.
pub const PSEUDO_MAX: usize = 255;

/// Validation errors returned when constructing a [`Pseudo`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The pseudo was missing or only whitespace.
    #[error("pseudo must not be empty")]
    EmptyPseudo,
    /// The pseudo exceeds [`PSEUDO_MAX`] characters.
    #[error("pseudo must be at most {max} characters")]
    PseudoTooLong {
        /// Configured maximum.
        max: usize,
    },
}

/// Display name chosen by the user, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pseudo(String);

impl Pseudo {
    /// Validate and construct a [`Pseudo`].
    ///
    /// # Examples
    /// ```
    /// use travel_backend::domain::Pseudo;
    ///
    /// let pseudo = Pseudo::new("  wanderer ").expect("valid pseudo");
    /// assert_eq!(pseudo.as_ref(), "wanderer");
    /// assert!(Pseudo::new("   ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyPseudo);
        }
        if trimmed.chars().count() > PSEUDO_MAX {
            return Err(UserValidationError::PseudoTooLong { max: PSEUDO_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Pseudo {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Pseudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Pseudo> for String {
    fn from(value: Pseudo) -> Self {
        value.0
    }
}

impl TryFrom<String> for Pseudo {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered traveller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 7)]
    pub id: UserId,
    /// Display name.
    #[schema(value_type = String, example = "wanderer")]
    pub pseudo: Pseudo,
}

impl User {
    /// Build a user from its parts.
    #[must_use]
    pub fn new(id: UserId, pseudo: Pseudo) -> Self {
        Self { id, pseudo }
    }
}

/// Fields supplied when creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// Display name.
    pub pseudo: Pseudo,
}
