use crate::domain::a001_store::reward::TierAward;
use crate::enums::kpi_category::KpiCategory;
use crate::enums::tier::Tier;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the client dashboard needs for one store: aggregate
/// performance, resolved tier, reward, and per-KPI display rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreScorecard {
    pub store_id: String,
    pub code: String,
    pub fantasia: String,
    pub manager: String,
    #[serde(rename = "lastUpdate")]
    pub last_update: chrono::DateTime<chrono::Utc>,
    /// Integer percentage against the global target
    pub performance: i64,
    pub tier: Tier,
    /// Localized tier label for the badge
    #[serde(rename = "tierName")]
    pub tier_name: String,
    pub award: TierAward,
    pub kpis: Vec<KpiScore>,
}

/// One KPI row on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiScore {
    pub id: Uuid,
    pub name: String,
    pub category: KpiCategory,
    pub target: f64,
    pub actual: f64,
    pub unit: String,
    /// Completion percentage clamped to 0..=100 for the progress bar
    #[serde(rename = "displayPct")]
    pub display_pct: i64,
}
