use serde::{Deserialize, Serialize};

/// Which branch of the access gate the caller is asking for.
///
/// Always chosen explicitly by the caller (the login form has a separate
/// admin entry), never auto-detected from the shape of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessMode {
    Admin,
    Client,
}

/// Role resolved by a successful authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Client,
}

impl UserRole {
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Client => "CLIENT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ADMIN" => Some(UserRole::Admin),
            "CLIENT" => Some(UserRole::Client),
            _ => None,
        }
    }
}

/// Login request: one code, interpreted per the explicit mode flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    pub code: String,
    pub mode: AccessMode,
}

/// The session context resolved by the access gate.
///
/// `store_index` is the position of the active store in the directory:
/// the authenticated store for CLIENT, the default selection for ADMIN,
/// `None` for an admin session over an empty directory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub role: UserRole,
    pub store_index: Option<usize>,
}

/// Response to a successful login or session resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGranted {
    pub session: SessionInfo,
    /// Trade name of the active store, when one is selected
    pub store_name: Option<String>,
}
