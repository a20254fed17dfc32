use serde::{Deserialize, Serialize};

use super::EntityId;

/// The authenticated user, as far as the client cares.
///
/// Exists only while a session holds a valid credential. Passwords are
/// never part of this type -- they live in a `SecretString` for the one
/// request that uses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

/// Profile fields a user may change. Absent fields are left untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}
