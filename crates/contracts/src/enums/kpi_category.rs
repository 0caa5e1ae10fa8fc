use serde::{Deserialize, Serialize};

/// Categories a KPI can belong to.
///
/// Grouping/display only: the category never changes the weight of a KPI in
/// the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KpiCategory {
    Finance,
    Growth,
    Market,
    Operations,
    Customer,
}

impl KpiCategory {
    /// Wire/DB code of the category
    pub fn code(&self) -> &'static str {
        match self {
            KpiCategory::Finance => "FINANCE",
            KpiCategory::Growth => "GROWTH",
            KpiCategory::Market => "MARKET",
            KpiCategory::Operations => "OPERATIONS",
            KpiCategory::Customer => "CUSTOMER",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            KpiCategory::Finance => "Financeiro",
            KpiCategory::Growth => "Crescimento",
            KpiCategory::Market => "Mercado",
            KpiCategory::Operations => "Operações",
            KpiCategory::Customer => "Cliente",
        }
    }

    /// All categories, in display order
    pub fn all() -> Vec<KpiCategory> {
        vec![
            KpiCategory::Finance,
            KpiCategory::Growth,
            KpiCategory::Market,
            KpiCategory::Operations,
            KpiCategory::Customer,
        ]
    }

    /// Parse from the wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FINANCE" => Some(KpiCategory::Finance),
            "GROWTH" => Some(KpiCategory::Growth),
            "MARKET" => Some(KpiCategory::Market),
            "OPERATIONS" => Some(KpiCategory::Operations),
            "CUSTOMER" => Some(KpiCategory::Customer),
            _ => None,
        }
    }
}
