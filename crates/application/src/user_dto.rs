//! External representation of a user record.

use secondhand_domain::User;
use serde::{Deserialize, Serialize};

/// The subset of a user record exposed across the service boundary.
///
/// The surrogate `id` and the `active` flag never cross this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Unique mail address.
    pub mail: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Middle name, empty when not set.
    pub middle_name: String,
}

impl UserDto {
    /// Projects a single record into its external representation.
    #[must_use]
    pub fn from_record(user: &User) -> Self {
        Self {
            mail: user.mail().to_owned(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            middle_name: user.middle_name().to_owned(),
        }
    }

    /// Projects a batch of records, preserving order and cardinality.
    #[must_use]
    pub fn from_records(users: &[User]) -> Vec<Self> {
        users.iter().map(Self::from_record).collect()
    }
}
