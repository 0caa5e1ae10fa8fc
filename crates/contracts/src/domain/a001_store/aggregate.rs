use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::kpi_category::KpiCategory;
use crate::enums::tier::Tier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(pub Uuid);

impl StoreId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for StoreId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(StoreId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// KPI Record
// ============================================================================

/// One measurable target/actual pair owned by a store.
///
/// KPI records live and die with their store: they are created as part of a
/// save and deleted by being omitted from the saved sequence. No tombstones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    /// Opaque identifier, immutable after creation
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Grouping for display; carries no scoring weight
    pub category: KpiCategory,
    /// Expected value. A zero target has no defined completion ratio and is
    /// resolved by the scoring engine's documented fallback.
    pub target: f64,
    /// Achieved value; may be negative or exceed the target
    pub actual: f64,
    /// Display suffix ("R$", "%"); never used in arithmetic
    pub unit: String,
    /// Multiplier reserved for future weighted aggregation. Persisted and
    /// validated, but the current aggregate formula does not apply it.
    pub weight: f64,
}

impl Kpi {
    pub fn new(
        name: impl Into<String>,
        category: KpiCategory,
        target: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            category,
            target,
            actual: 0.0,
            unit: unit.into(),
            weight: 1.0,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A retail store enrolled in the excellence program.
///
/// `base.code` is the client login key, `base.description` the trade name
/// ("fantasia"). `base.metadata.updated_at` is the "last update" shown on the
/// dashboard and is refreshed by `before_write` on every successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(flatten)]
    pub base: BaseAggregate<StoreId>,

    /// Legal name of the company
    #[serde(rename = "razaoSocial")]
    pub legal_name: String,

    pub manager: String,

    /// Ordered KPI sequence; insertion order is display order only
    pub kpis: Vec<Kpi>,

    /// Monetary reward per tier. Must be total over `Tier::all()`.
    #[serde(rename = "customRewards")]
    pub custom_rewards: BTreeMap<Tier, f64>,

    /// Display color per tier. Must be total over `Tier::all()`.
    #[serde(rename = "tierColors")]
    pub tier_colors: BTreeMap<Tier, String>,
}

/// Reward table seeded into newly created stores. Seed values only: after
/// creation the store's own table is authoritative and freely editable.
pub fn default_rewards() -> BTreeMap<Tier, f64> {
    BTreeMap::from([
        (Tier::None, 0.0),
        (Tier::Bronze, 500.0),
        (Tier::Silver, 1000.0),
        (Tier::Gold, 2500.0),
        (Tier::Elite, 5000.0),
    ])
}

/// Color table seeded into newly created stores
pub fn default_tier_colors() -> BTreeMap<Tier, String> {
    BTreeMap::from([
        (Tier::None, "#94a3b8".to_string()),
        (Tier::Bronze, "#cd7f32".to_string()),
        (Tier::Silver, "#c0c0c0".to_string()),
        (Tier::Gold, "#ffd700".to_string()),
        (Tier::Elite, "#00ffff".to_string()),
    ])
}

/// KPI set seeded into newly created stores
pub fn default_kpis() -> Vec<Kpi> {
    vec![
        Kpi::new("Meta do Trimestre", KpiCategory::Finance, 100000.0, "R$"),
        Kpi::new("Crescimento vs Ano Anterior", KpiCategory::Growth, 5.0, "%"),
        Kpi::new("Participação no PDV", KpiCategory::Market, 30.0, "%"),
    ]
}

impl Store {
    /// Create a new store for insertion, seeded with the default KPI set and
    /// default tier tables
    pub fn new_for_insert(
        code: String,
        trade_name: String,
        legal_name: String,
        manager: String,
    ) -> Self {
        Self {
            base: BaseAggregate::new(StoreId::new_v4(), code, trade_name),
            legal_name,
            manager,
            kpis: default_kpis(),
            custom_rewards: default_rewards(),
            tier_colors: default_tier_colors(),
        }
    }

    /// Get the ID as a string
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Apply an edited draft. Whole-record replace: the draft's KPI sequence
    /// becomes the store's KPI sequence, omitted KPIs are gone.
    pub fn update(&mut self, dto: &StoreDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.fantasia.clone();
        self.legal_name = dto.razao_social.clone();
        self.manager = dto.manager.clone();
        self.kpis = dto.kpis.iter().map(KpiDto::to_record).collect();
        if let Some(rewards) = &dto.custom_rewards {
            self.custom_rewards = rewards.clone();
        }
        if let Some(colors) = &dto.tier_colors {
            self.tier_colors = colors.clone();
        }
    }

    /// Data-integrity validation. Runs before every persist; a store that
    /// fails here is never written.
    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("Código da loja não pode ser vazio".into());
        }
        if self.base.description.trim().is_empty() {
            return Err("Nome fantasia não pode ser vazio".into());
        }

        // Both tier tables must be total: a missing entry would surface as an
        // undefined reward/color at resolution time.
        for tier in Tier::all() {
            match self.custom_rewards.get(&tier) {
                None => return Err(format!("Tabela de premiação sem o nível {}", tier.code())),
                Some(amount) if !amount.is_finite() || *amount < 0.0 => {
                    return Err(format!("Premiação inválida para o nível {}", tier.code()));
                }
                Some(_) => {}
            }
            match self.tier_colors.get(&tier) {
                None => return Err(format!("Tabela de cores sem o nível {}", tier.code())),
                Some(color) if color.trim().is_empty() => {
                    return Err(format!("Cor vazia para o nível {}", tier.code()));
                }
                Some(_) => {}
            }
        }

        for kpi in &self.kpis {
            if kpi.name.trim().is_empty() {
                return Err("KPI sem nome".into());
            }
            if !kpi.weight.is_finite() || kpi.weight < 0.0 {
                return Err(format!("Peso inválido no KPI '{}'", kpi.name));
            }
        }

        Ok(())
    }

    /// Hook before persisting: refreshes `updated_at` ("lastUpdate")
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Store {
    type Id = StoreId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "store"
    }

    fn element_name() -> &'static str {
        "Loja"
    }

    fn list_name() -> &'static str {
        "Lojas"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Draft value for creating or editing a store.
///
/// Admin edits are staged on a `StoreDto` and merged into the committed
/// record only on explicit save; an abandoned draft leaves the store
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub fantasia: String,
    #[serde(rename = "razaoSocial")]
    pub razao_social: String,
    pub manager: String,
    #[serde(default)]
    pub kpis: Vec<KpiDto>,
    #[serde(rename = "customRewards")]
    pub custom_rewards: Option<BTreeMap<Tier, f64>>,
    #[serde(rename = "tierColors")]
    pub tier_colors: Option<BTreeMap<Tier, String>>,
}

impl StoreDto {
    /// Draft pre-filled from a committed record, for editing
    pub fn from_record(store: &Store) -> Self {
        Self {
            id: Some(store.to_string_id()),
            code: Some(store.base.code.clone()),
            fantasia: store.base.description.clone(),
            razao_social: store.legal_name.clone(),
            manager: store.manager.clone(),
            kpis: store.kpis.iter().map(KpiDto::from_record).collect(),
            custom_rewards: Some(store.custom_rewards.clone()),
            tier_colors: Some(store.tier_colors.clone()),
        }
    }
}

/// Draft value for one KPI inside a store draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiDto {
    /// Absent for KPIs created in this draft; a fresh ID is assigned on save
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: KpiCategory,
    pub target: f64,
    pub actual: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "KpiDto::default_weight")]
    pub weight: f64,
}

impl KpiDto {
    fn default_weight() -> f64 {
        1.0
    }

    pub fn from_record(kpi: &Kpi) -> Self {
        Self {
            id: Some(kpi.id),
            name: kpi.name.clone(),
            description: kpi.description.clone(),
            category: kpi.category,
            target: kpi.target,
            actual: kpi.actual,
            unit: kpi.unit.clone(),
            weight: kpi.weight,
        }
    }

    pub fn to_record(&self) -> Kpi {
        Kpi {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            target: self.target,
            actual: self.actual,
            unit: self.unit.clone(),
            weight: self.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::new_for_insert(
            "LOJA-1".into(),
            "Loja Centro".into(),
            "Centro Comércio LTDA".into(),
            "Ana Souza".into(),
        )
    }

    #[test]
    fn new_store_is_valid_and_fully_seeded() {
        let s = store();
        assert!(s.validate().is_ok());
        assert_eq!(s.kpis.len(), 3);
        for tier in Tier::all() {
            assert!(s.custom_rewards.contains_key(&tier));
            assert!(s.tier_colors.contains_key(&tier));
        }
        assert_eq!(s.custom_rewards[&Tier::Elite], 5000.0);
    }

    #[test]
    fn partial_reward_table_fails_validation() {
        let mut s = store();
        s.custom_rewards.remove(&Tier::Silver);
        assert!(s.validate().is_err());
    }

    #[test]
    fn partial_color_table_fails_validation() {
        let mut s = store();
        s.tier_colors.remove(&Tier::Elite);
        assert!(s.validate().is_err());
    }

    #[test]
    fn negative_reward_fails_validation() {
        let mut s = store();
        s.custom_rewards.insert(Tier::Gold, -10.0);
        assert!(s.validate().is_err());
    }

    #[test]
    fn update_replaces_the_kpi_sequence() {
        let mut s = store();
        let mut dto = StoreDto::from_record(&s);
        dto.kpis.truncate(1);
        dto.kpis.push(KpiDto {
            id: None,
            name: "NPS".into(),
            description: String::new(),
            category: KpiCategory::Customer,
            target: 80.0,
            actual: 75.0,
            unit: "pts".into(),
            weight: 1.0,
        });
        let original_first = s.kpis[0].id;
        s.update(&dto);
        assert_eq!(s.kpis.len(), 2);
        // surviving KPI keeps its identity, the new one gets a fresh id
        assert_eq!(s.kpis[0].id, original_first);
        assert_eq!(s.kpis[1].name, "NPS");
    }

    #[test]
    fn before_write_refreshes_last_update() {
        let mut s = store();
        let before = s.base.metadata.updated_at;
        s.before_write();
        assert!(s.base.metadata.updated_at >= before);
    }

    #[test]
    fn tier_tables_serialize_with_wire_keys() {
        let s = store();
        let json = serde_json::to_value(&s).unwrap();
        assert!(json["customRewards"]["ELITE"].is_number());
        assert!(json["tierColors"]["NONE"].is_string());
        assert_eq!(json["razaoSocial"], "Centro Comércio LTDA");
    }
}
