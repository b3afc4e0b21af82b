//! Marketplace user roles.
//!
//! Stars (별님) are the freelancer creators; moons (달님) are the internal
//! operations teams; admins run the platform. The identity service owns
//! accounts and credentials — this backend only needs the role carried in
//! its access tokens for authorization decisions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    MoonManager,
    MoonAdvertising,
    MoonFeedback,
    MoonSettlement,
    Star,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::MoonManager => "MOON_MANAGER",
            Self::MoonAdvertising => "MOON_ADVERTISING",
            Self::MoonFeedback => "MOON_FEEDBACK",
            Self::MoonSettlement => "MOON_SETTLEMENT",
            Self::Star => "STAR",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Self::Admin),
            "MOON_MANAGER" => Some(Self::MoonManager),
            "MOON_ADVERTISING" => Some(Self::MoonAdvertising),
            "MOON_FEEDBACK" => Some(Self::MoonFeedback),
            "MOON_SETTLEMENT" => Some(Self::MoonSettlement),
            "STAR" => Some(Self::Star),
            _ => None,
        }
    }

    /// Platform administrator — the only role allowed to hard-delete
    /// another user's submission.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Admin or any moon team: may act on submissions they do not own
    /// (review status changes, metadata fixes).
    pub fn is_elevated(&self) -> bool {
        !matches!(self, Self::Star)
    }

    pub const ALL: &'static [&'static str] = &[
        "ADMIN",
        "MOON_MANAGER",
        "MOON_ADVERTISING",
        "MOON_FEEDBACK",
        "MOON_SETTLEMENT",
        "STAR",
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for s in Role::ALL {
            let role = Role::from_str(s).unwrap();
            assert_eq!(role.as_str(), *s);
        }
    }

    #[test]
    fn unknown_role_returns_none() {
        assert!(Role::from_str("SUN").is_none());
        assert!(Role::from_str("").is_none());
    }

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::MoonFeedback.is_admin());
        assert!(!Role::Star.is_admin());
    }

    #[test]
    fn stars_are_not_elevated() {
        assert!(!Role::Star.is_elevated());
        assert!(Role::Admin.is_elevated());
        assert!(Role::MoonManager.is_elevated());
        assert!(Role::MoonFeedback.is_elevated());
    }
}
