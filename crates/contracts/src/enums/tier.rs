use serde::{Deserialize, Serialize};

/// Excellence tiers of the reward program, ascending.
///
/// The derive order matters: `Ord` must follow the program ladder
/// (None < Bronze < Silver < Gold < Elite) because tier comparisons and the
/// monotonicity of tier resolution rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    None,
    Bronze,
    Silver,
    Gold,
    Elite,
}

impl Tier {
    /// Wire/DB code of the tier (matches the persisted JSON map keys)
    pub fn code(&self) -> &'static str {
        match self {
            Tier::None => "NONE",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Elite => "ELITE",
        }
    }

    /// Human-readable name shown on the dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::None => "Sem Nível",
            Tier::Bronze => "Bronze",
            Tier::Silver => "Prata",
            Tier::Gold => "Ouro",
            Tier::Elite => "Elite",
        }
    }

    /// All tiers in ascending order
    pub fn all() -> [Tier; 5] {
        [Tier::None, Tier::Bronze, Tier::Silver, Tier::Gold, Tier::Elite]
    }

    /// Parse from the wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NONE" => Some(Tier::None),
            "BRONZE" => Some(Tier::Bronze),
            "SILVER" => Some(Tier::Silver),
            "GOLD" => Some(Tier::Gold),
            "ELITE" => Some(Tier::Elite),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
