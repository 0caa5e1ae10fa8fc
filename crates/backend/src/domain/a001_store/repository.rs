use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::a001_store::aggregate::{Kpi, Store, StoreId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::kpi_category::KpiCategory;
use contracts::enums::tier::Tier;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::shared::data::db::get_connection;

/// Persistence seam of the store directory.
///
/// The trait exists so the directory's persist-first contract can be
/// exercised against an in-memory repository in tests; production uses
/// [`SqlStoreRepository`].
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// All stores with their full KPI sequences, in repository order
    async fn list(&self) -> anyhow::Result<Vec<Store>>;

    /// Persist the store row and its full KPI sequence, echoing the stored
    /// record back. Both writes happen in one transaction: either the store
    /// and all its KPIs are durable, or nothing is.
    async fn upsert(&self, store: &Store) -> anyhow::Result<Store>;

    /// Soft-delete a store; `false` when the id is unknown
    async fn delete(&self, id: StoreId) -> anyhow::Result<bool>;
}

// ============================================================================
// sea-orm rows
// ============================================================================

mod store_row {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_store")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub code: String,
        pub description: String,
        pub legal_name: String,
        pub manager: String,
        /// JSON map Tier code -> amount
        pub custom_rewards: String,
        /// JSON map Tier code -> color
        pub tier_colors: String,
        pub is_deleted: bool,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        pub version: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod kpi_row {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_store_kpi")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub store_id: String,
        /// Display position inside the owning store
        pub position: i32,
        pub name: String,
        pub description: String,
        pub category: String,
        pub target: f64,
        pub actual: f64,
        pub unit: String,
        pub weight: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

// ============================================================================
// Row <-> aggregate mapping
// ============================================================================

fn kpi_from_row(row: &kpi_row::Model) -> anyhow::Result<Kpi> {
    let id = Uuid::parse_str(&row.id)
        .map_err(|e| anyhow::anyhow!("Corrupt KPI id '{}': {}", row.id, e))?;
    let category = KpiCategory::from_code(&row.category)
        .ok_or_else(|| anyhow::anyhow!("Unknown KPI category '{}'", row.category))?;
    Ok(Kpi {
        id,
        name: row.name.clone(),
        description: row.description.clone(),
        category,
        target: row.target,
        actual: row.actual,
        unit: row.unit.clone(),
        weight: row.weight,
    })
}

fn store_from_rows(row: store_row::Model, kpis: Vec<Kpi>) -> anyhow::Result<Store> {
    let metadata = EntityMetadata {
        created_at: row.created_at.unwrap_or_else(Utc::now),
        updated_at: row.updated_at.unwrap_or_else(Utc::now),
        is_deleted: row.is_deleted,
        version: row.version,
    };
    let uuid = Uuid::parse_str(&row.id)
        .map_err(|e| anyhow::anyhow!("Corrupt store id '{}': {}", row.id, e))?;

    // A row with a broken tier table must not load as a silently-partial
    // store; it is a data-integrity error.
    let custom_rewards: BTreeMap<Tier, f64> = serde_json::from_str(&row.custom_rewards)
        .map_err(|e| anyhow::anyhow!("Corrupt reward table for store {}: {}", row.id, e))?;
    let tier_colors: BTreeMap<Tier, String> = serde_json::from_str(&row.tier_colors)
        .map_err(|e| anyhow::anyhow!("Corrupt color table for store {}: {}", row.id, e))?;

    Ok(Store {
        base: BaseAggregate::with_metadata(StoreId(uuid), row.code, row.description, metadata),
        legal_name: row.legal_name,
        manager: row.manager,
        kpis,
        custom_rewards,
        tier_colors,
    })
}

fn store_active_model(store: &Store) -> anyhow::Result<store_row::ActiveModel> {
    Ok(store_row::ActiveModel {
        id: Set(store.base.id.value().to_string()),
        code: Set(store.base.code.clone()),
        description: Set(store.base.description.clone()),
        legal_name: Set(store.legal_name.clone()),
        manager: Set(store.manager.clone()),
        custom_rewards: Set(serde_json::to_string(&store.custom_rewards)?),
        tier_colors: Set(serde_json::to_string(&store.tier_colors)?),
        is_deleted: Set(store.base.metadata.is_deleted),
        created_at: Set(Some(store.base.metadata.created_at)),
        updated_at: Set(Some(store.base.metadata.updated_at)),
        version: Set(store.base.metadata.version),
    })
}

// ============================================================================
// sqlite implementation
// ============================================================================

pub struct SqlStoreRepository;

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

#[async_trait]
impl StoreRepository for SqlStoreRepository {
    async fn list(&self) -> anyhow::Result<Vec<Store>> {
        let rows = store_row::Entity::find()
            .filter(store_row::Column::IsDeleted.eq(false))
            .order_by_asc(store_row::Column::CreatedAt)
            .all(conn())
            .await?;

        let kpi_rows = kpi_row::Entity::find()
            .order_by_asc(kpi_row::Column::Position)
            .all(conn())
            .await?;

        let mut stores = Vec::with_capacity(rows.len());
        for row in rows {
            let kpis: Vec<Kpi> = kpi_rows
                .iter()
                .filter(|k| k.store_id == row.id)
                .map(kpi_from_row)
                .collect::<anyhow::Result<_>>()?;
            stores.push(store_from_rows(row, kpis)?);
        }
        Ok(stores)
    }

    async fn upsert(&self, store: &Store) -> anyhow::Result<Store> {
        let id = store.base.id.value().to_string();
        let txn = conn().begin().await?;

        let existing = store_row::Entity::find_by_id(id.clone()).one(&txn).await?;
        let active = store_active_model(store)?;
        if existing.is_some() {
            active.update(&txn).await?;
        } else {
            active.insert(&txn).await?;
        }

        // Whole-record replace: the saved KPI sequence is authoritative,
        // omitted KPIs disappear here.
        kpi_row::Entity::delete_many()
            .filter(kpi_row::Column::StoreId.eq(id.clone()))
            .exec(&txn)
            .await?;
        for (position, kpi) in store.kpis.iter().enumerate() {
            let row = kpi_row::ActiveModel {
                id: Set(kpi.id.to_string()),
                store_id: Set(id.clone()),
                position: Set(position as i32),
                name: Set(kpi.name.clone()),
                description: Set(kpi.description.clone()),
                category: Set(kpi.category.code().to_string()),
                target: Set(kpi.target),
                actual: Set(kpi.actual),
                unit: Set(kpi.unit.clone()),
                weight: Set(kpi.weight),
            };
            row.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(store.clone())
    }

    async fn delete(&self, id: StoreId) -> anyhow::Result<bool> {
        use sea_orm::sea_query::Expr;
        let result = store_row::Entity::update_many()
            .col_expr(store_row::Column::IsDeleted, Expr::value(true))
            .col_expr(store_row::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(store_row::Column::Id.eq(id.value().to_string()))
            .exec(conn())
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpi_model() -> kpi_row::Model {
        kpi_row::Model {
            id: Uuid::new_v4().to_string(),
            store_id: Uuid::new_v4().to_string(),
            position: 0,
            name: "Meta do Trimestre".into(),
            description: String::new(),
            category: "FINANCE".into(),
            target: 100000.0,
            actual: 40000.0,
            unit: "R$".into(),
            weight: 1.0,
        }
    }

    #[test]
    fn kpi_row_maps_with_its_identity() {
        let row = kpi_model();
        let kpi = kpi_from_row(&row).unwrap();
        assert_eq!(kpi.id.to_string(), row.id);
        assert_eq!(kpi.category, KpiCategory::Finance);
        assert_eq!(kpi.actual, 40000.0);
    }

    #[test]
    fn corrupt_kpi_id_is_an_error_not_a_fresh_identity() {
        let mut row = kpi_model();
        row.id = "not-a-uuid".into();
        assert!(kpi_from_row(&row).is_err());
    }

    #[test]
    fn unknown_kpi_category_is_an_error() {
        let mut row = kpi_model();
        row.category = "VIBES".into();
        assert!(kpi_from_row(&row).is_err());
    }

    #[test]
    fn corrupt_store_tier_table_is_an_error() {
        let row = store_row::Model {
            id: Uuid::new_v4().to_string(),
            code: "LOJA-1".into(),
            description: "Loja Centro".into(),
            legal_name: "Centro Comércio LTDA".into(),
            manager: "Ana Souza".into(),
            custom_rewards: "{not json".into(),
            tier_colors: "{}".into(),
            is_deleted: false,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            version: 0,
        };
        assert!(store_from_rows(row, vec![]).is_err());
    }
}
