use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ids::UserId;

/// Default avatar color, shared with the original deployment's theme.
pub const DEFAULT_AVATAR_COLOR: &str = "#135bec";

//
// ─── ROLE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Lenient wire decoding: anything that is not `admin` is a regular user.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

//
// ─── PROFILE ──────────────────────────────────────────────────────────────────
//

/// Display identity of a user.
///
/// The id comes from the identity provider; everything else is editable by
/// the user and persisted alongside the stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub church: String,
    pub role: Role,
    pub avatar_color: String,
    pub is_profile_complete: bool,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Profile {
    /// Profile for an authenticated user known only by id and display name.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            church: "Igreja Batista".to_owned(),
            role: Role::User,
            avatar_color: DEFAULT_AVATAR_COLOR.to_owned(),
            is_profile_complete: false,
            email: None,
            phone: None,
        }
    }

    /// Anonymous local profile with a freshly minted id.
    #[must_use]
    pub fn guest() -> Self {
        Self::new(UserId::new(Uuid::new_v4().to_string()), "Estudante")
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_lenient() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("Admin"), Role::Admin);
        assert_eq!(Role::parse("user"), Role::User);
        assert_eq!(Role::parse("moderator"), Role::User);
        assert_eq!(Role::parse(""), Role::User);
    }

    #[test]
    fn new_profile_uses_deployment_defaults() {
        let profile = Profile::new(UserId::new("uid-1"), "Ana");
        assert_eq!(profile.avatar_color, DEFAULT_AVATAR_COLOR);
        assert_eq!(profile.role, Role::User);
        assert!(!profile.is_profile_complete);
    }

    #[test]
    fn guest_profiles_get_distinct_ids() {
        let a = Profile::guest();
        let b = Profile::guest();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Estudante");
    }
}
