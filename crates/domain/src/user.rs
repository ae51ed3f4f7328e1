//! User record and mail validation rules.

use secondhand_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Surrogate identifier for a persisted user row.
///
/// Assigned by the store on first persistence and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier from a store-assigned value.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MailAddress(String);

impl MailAddress {
    /// Creates a validated, lowercased mail address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one
    /// `@`, local part and domain are non-empty, domain contains at least
    /// one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "mail address must not be empty".to_owned(),
            ));
        }

        let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
        if parts.len() != 2 {
            return Err(AppError::Validation(
                "mail address must contain exactly one '@'".to_owned(),
            ));
        }

        let local = parts[0];
        let domain = parts[1];

        if local.is_empty() {
            return Err(AppError::Validation(
                "mail local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "mail domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "mail address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated mail string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MailAddress> for String {
    fn from(value: MailAddress) -> Self {
        value.0
    }
}

/// A single user's persisted state.
///
/// Immutable value object: every "mutation" builds a replacement record that
/// shares the unchanged fields; the stored row keyed by the same `id` is
/// then replaced through the repository.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct User {
    id: Option<UserId>,
    mail: String,
    first_name: String,
    last_name: String,
    middle_name: String,
    active: bool,
}

impl User {
    /// Creates a not-yet-persisted user. New users are always active and
    /// carry no identifier until the store assigns one.
    #[must_use]
    pub fn new(
        mail: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        middle_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            mail: mail.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: middle_name.into(),
            active: true,
        }
    }

    /// Rebuilds a record from its stored parts. Used by repository adapters
    /// and tests; not a business operation.
    #[must_use]
    pub fn from_parts(
        id: Option<UserId>,
        mail: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        middle_name: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            id,
            mail: mail.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: middle_name.into(),
            active,
        }
    }

    /// Returns a replacement record with the three name fields overwritten
    /// and `id`, `mail`, and `active` preserved.
    #[must_use]
    pub fn with_names(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        middle_name: impl Into<String>,
    ) -> Self {
        Self {
            id: self.id,
            mail: self.mail.clone(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: middle_name.into(),
            active: self.active,
        }
    }

    /// Returns a replacement record identical except for the active flag.
    #[must_use]
    pub fn with_active(&self, active: bool) -> Self {
        Self {
            id: self.id,
            mail: self.mail.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            middle_name: self.middle_name.clone(),
            active,
        }
    }

    /// Returns the store-assigned identifier, if the record has been persisted.
    #[must_use]
    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Returns the unique mail address.
    #[must_use]
    pub fn mail(&self) -> &str {
        self.mail.as_str()
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Returns the middle name, which may be empty.
    #[must_use]
    pub fn middle_name(&self) -> &str {
        self.middle_name.as_str()
    }

    /// Returns whether the user may currently be updated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Equality compares every field except the surrogate `id`, so a record built
/// before persistence compares equal to its persisted counterpart. A
/// test-construction convenience, not a business rule.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.mail == other.mail
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.middle_name == other.middle_name
            && self.active == other.active
    }
}
