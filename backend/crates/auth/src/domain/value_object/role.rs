use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried in the session payload.
///
/// Claim strings are matched case-insensitively, so `"admin"` and `"ADMIN"`
/// name the same role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[repr(i16)]
pub enum Role {
    User = 0,
    Admin = 1,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Whether a holder of `self` may act with `required`.
    #[inline]
    pub const fn includes(&self, required: Role) -> bool {
        self.id() >= required.id()
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.eq_ignore_ascii_case("admin") {
            Some(Role::Admin)
        } else if code.eq_ignore_ascii_case("user") {
            Some(Role::User)
        } else {
            None
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::from_code(&value).ok_or_else(|| format!("unknown role: {value}"))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
