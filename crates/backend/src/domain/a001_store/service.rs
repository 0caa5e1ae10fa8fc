use super::directory::directory;
use contracts::domain::a001_store::aggregate::{KpiDto, Store, StoreDto};

/// Create a new store.
///
/// The record is seeded with the default KPI set and default tier tables;
/// draft fields present in the DTO override the seeds. Appended to the
/// directory only after the repository accepted it.
pub async fn create(dto: StoreDto) -> anyhow::Result<Store> {
    let mut dir = directory().write().await;

    let code = dto
        .code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| format!("LOJA-{}", dir.len() + 1));
    if dir.find_by_code(&code).is_some() {
        anyhow::bail!("Código de loja já em uso: {}", code);
    }

    let mut aggregate = Store::new_for_insert(
        code,
        dto.fantasia.clone(),
        dto.razao_social.clone(),
        dto.manager.clone(),
    );
    if !dto.kpis.is_empty() {
        aggregate.kpis = dto.kpis.iter().map(KpiDto::to_record).collect();
    }
    if let Some(rewards) = &dto.custom_rewards {
        aggregate.custom_rewards = rewards.clone();
    }
    if let Some(colors) = &dto.tier_colors {
        aggregate.tier_colors = colors.clone();
    }

    aggregate.before_write();
    dir.add(aggregate).await
}

/// Apply an edited draft to an existing store (whole-record replace).
///
/// The committed record stays untouched unless validation and persistence
/// both succeed.
pub async fn update(dto: StoreDto) -> anyhow::Result<Store> {
    let id = dto
        .id
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut dir = directory().write().await;

    let committed = dir
        .find_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("Loja não encontrada"))?;

    // The new code must not collide with another store
    if let Some(code) = &dto.code {
        if let Some((_, other)) = dir.find_by_code(code) {
            if other.to_string_id() != *id {
                anyhow::bail!("Código de loja já em uso: {}", code);
            }
        }
    }

    let mut draft = committed.clone();
    draft.update(&dto);
    draft.base.metadata.increment_version();
    draft.before_write();

    dir.replace(draft).await
}

/// Soft-delete a store
pub async fn delete(id: &str) -> anyhow::Result<bool> {
    directory().write().await.remove(id).await
}

/// All stores in directory order
pub async fn list_all() -> anyhow::Result<Vec<Store>> {
    Ok(directory().read().await.all().to_vec())
}

/// One store by ID
pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Store>> {
    Ok(directory().read().await.find_by_id(id).cloned())
}

/// Seed data for a fresh database
pub async fn insert_test_data() -> anyhow::Result<()> {
    let data = vec![
        StoreDto {
            id: None,
            code: Some("LOJA-1".into()),
            fantasia: "Loja Centro".into(),
            razao_social: "Varejo Centro Comércio LTDA".into(),
            manager: "Ana Souza".into(),
            kpis: vec![],
            custom_rewards: None,
            tier_colors: None,
        },
        StoreDto {
            id: None,
            code: Some("LOJA-2".into()),
            fantasia: "Loja Norte".into(),
            razao_social: "Varejo Norte Comércio LTDA".into(),
            manager: "Carlos Lima".into(),
            kpis: vec![],
            custom_rewards: None,
            tier_colors: None,
        },
    ];

    for dto in data {
        create(dto).await?;
    }

    Ok(())
}
