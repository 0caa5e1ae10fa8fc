use contracts::dashboards::d100_scorecard::{KpiScore, StoreScorecard};
use contracts::domain::a001_store::aggregate::Store;
use contracts::domain::a001_store::{reward, scoring};

use crate::domain::a001_store::directory::directory;

/// Build the dashboard scorecard for one store: aggregate performance, tier,
/// reward and per-KPI display rows.
///
/// Fails only on a data-integrity defect (a tier missing from the store's
/// own tables); a reward of zero is a normal scorecard.
pub fn build_scorecard(store: &Store) -> anyhow::Result<StoreScorecard> {
    let performance = scoring::aggregate_performance(store);
    let tier = scoring::resolve_tier(performance);
    let award = reward::resolve_reward(store, tier)
        .map_err(|e| anyhow::anyhow!("Data integrity error: {}", e))?;

    let kpis = store
        .kpis
        .iter()
        .map(|kpi| KpiScore {
            id: kpi.id,
            name: kpi.name.clone(),
            category: kpi.category,
            target: kpi.target,
            actual: kpi.actual,
            unit: kpi.unit.clone(),
            display_pct: scoring::display_ratio(kpi),
        })
        .collect();

    Ok(StoreScorecard {
        store_id: store.to_string_id(),
        code: store.base.code.clone(),
        fantasia: store.base.description.clone(),
        manager: store.manager.clone(),
        last_update: store.base.metadata.updated_at,
        performance,
        tier,
        tier_name: tier.display_name().to_string(),
        award,
        kpis,
    })
}

/// Scorecard for a store by ID, from the session directory
pub async fn get_scorecard(id: &str) -> anyhow::Result<Option<StoreScorecard>> {
    let dir = directory().read().await;
    match dir.find_by_id(id) {
        Some(store) => Ok(Some(build_scorecard(store)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::tier::Tier;

    fn store() -> Store {
        Store::new_for_insert(
            "LOJA-1".into(),
            "Loja Centro".into(),
            "Centro Comércio LTDA".into(),
            "Ana Souza".into(),
        )
    }

    #[test]
    fn default_store_on_target_scores_elite() {
        let mut s = store();
        for kpi in &mut s.kpis {
            kpi.actual = kpi.target;
        }
        let card = build_scorecard(&s).unwrap();
        assert_eq!(card.performance, 100);
        assert_eq!(card.tier, Tier::Elite);
        assert_eq!(card.award.amount, 5000.0);
        assert_eq!(card.kpis.len(), 3);
        assert!(card.kpis.iter().all(|k| k.display_pct == 100));
    }

    #[test]
    fn fresh_store_scores_none_with_zero_award() {
        // all actuals start at zero
        let card = build_scorecard(&store()).unwrap();
        assert_eq!(card.performance, 0);
        assert_eq!(card.tier, Tier::None);
        assert_eq!(card.award.amount, 0.0);
        assert_eq!(card.award.color, "#94a3b8");
    }

    #[test]
    fn broken_tier_table_is_an_error_not_a_scorecard() {
        let mut s = store();
        s.tier_colors.remove(&Tier::None);
        assert!(build_scorecard(&s).is_err());
    }

    #[test]
    fn over_achievement_caps_the_bar_but_not_the_tier_credit() {
        let mut s = store();
        s.kpis.truncate(2);
        s.kpis[0].actual = s.kpis[0].target * 2.0; // ratio 2.0
        s.kpis[1].actual = 0.0; // ratio 0.0
        let card = build_scorecard(&s).unwrap();
        assert_eq!(card.kpis[0].display_pct, 100);
        assert_eq!(card.performance, 100); // (2.0 + 0.0) / 2
        assert_eq!(card.tier, Tier::Elite);
    }
}
