//! Operator claims and permission flags carried in access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Permission flags granted to a console operator.
///
/// Issued by the backend alongside the operator's role. Missing flags
/// deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Permissions {
    /// May act on any request regardless of department.
    pub admin_override: bool,
    /// May mark an approval as an admin approval, bypassing the stage sequence.
    pub can_approve_all: bool,
    /// May manage ICT equipment requests.
    pub can_manage_ict: bool,
    /// May manage store supply requests.
    pub can_manage_store: bool,
    /// May manage vehicle/transport requests.
    pub can_manage_vehicle: bool,
}

impl Permissions {
    /// Permissions with every flag set.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            admin_override: true,
            can_approve_all: true,
            can_manage_ict: true,
            can_manage_store: true,
            can_manage_vehicle: true,
        }
    }
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (operator ID).
    pub sub: UserId,
    /// Operator's role, e.g. `ICT_OFFICER`.
    pub role: String,
    /// Permission flags.
    #[serde(default)]
    pub permissions: Permissions,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an operator.
    #[must_use]
    pub fn new(
        user_id: UserId,
        role: &str,
        permissions: Permissions,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            permissions,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the operator ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.sub
    }
}
