//! Scoring engine: pure functions from a store's KPI snapshot to an
//! aggregate performance percentage and an excellence tier.
//!
//! Numeric edges are design decisions, not runtime errors: nothing here
//! panics and nothing returns a non-finite value.

use super::aggregate::{Kpi, Store};
use crate::enums::tier::Tier;

/// Performance floor (inclusive) for each tier above `None`, descending.
/// Engine constants, not per-store configuration.
const TIER_LADDER: [(i64, Tier); 4] = [
    (100, Tier::Elite),
    (90, Tier::Gold),
    (80, Tier::Silver),
    (70, Tier::Bronze),
];

/// Dimensionless completion ratio of one KPI: `actual / target`.
///
/// Not clamped: over-achievement yields a ratio above 1 and keeps its full
/// credit in the aggregate. Edge policy:
/// - `target == 0` has no defined ratio; the KPI scores 0.0 unless something
///   positive was delivered, in which case it counts as fully achieved (1.0);
/// - non-finite `target` or `actual` scores 0.0.
pub fn completion_ratio(kpi: &Kpi) -> f64 {
    if !kpi.target.is_finite() || !kpi.actual.is_finite() {
        return 0.0;
    }
    if kpi.target == 0.0 {
        return if kpi.actual > 0.0 { 1.0 } else { 0.0 };
    }
    kpi.actual / kpi.target
}

/// Per-KPI percentage for display, clamped to 0..=100.
///
/// The visual progress bar caps at the target even though the aggregate
/// keeps the uncapped ratio.
pub fn display_ratio(kpi: &Kpi) -> i64 {
    let pct = (completion_ratio(kpi) * 100.0).round();
    pct.clamp(0.0, 100.0) as i64
}

/// Aggregate performance of a store as an integer percentage.
///
/// Unweighted arithmetic mean of the completion ratios, times 100, rounded
/// half away from zero (`f64::round`). A store with no KPIs scores 0.
/// The `weight` field of the KPIs is not applied.
pub fn aggregate_performance(store: &Store) -> i64 {
    if store.kpis.is_empty() {
        return 0;
    }
    let total: f64 = store.kpis.iter().map(completion_ratio).sum();
    ((total / store.kpis.len() as f64) * 100.0).round() as i64
}

/// Resolve the excellence tier for an integer performance percentage.
///
/// Evaluated highest-first, thresholds inclusive (90 is Gold, not Silver).
/// Total over all inputs and monotonic in `performance`.
pub fn resolve_tier(performance: i64) -> Tier {
    for (floor, tier) in TIER_LADDER {
        if performance >= floor {
            return tier;
        }
    }
    Tier::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_store::aggregate::default_rewards;
    use crate::enums::kpi_category::KpiCategory;

    fn kpi(target: f64, actual: f64) -> Kpi {
        let mut k = Kpi::new("KPI", KpiCategory::Finance, target, "R$");
        k.actual = actual;
        k
    }

    fn store_with(kpis: Vec<Kpi>) -> Store {
        let mut s = Store::new_for_insert(
            "LOJA-1".into(),
            "Loja Teste".into(),
            "Teste LTDA".into(),
            "Gerente".into(),
        );
        s.kpis = kpis;
        s
    }

    #[test]
    fn ratio_is_exact_for_positive_targets() {
        assert_eq!(completion_ratio(&kpi(100000.0, 100000.0)), 1.0);
        assert_eq!(completion_ratio(&kpi(200.0, 50.0)), 0.25);
        // no clamping at this layer
        assert_eq!(completion_ratio(&kpi(50.0, 100.0)), 2.0);
        assert_eq!(completion_ratio(&kpi(10.0, -5.0)), -0.5);
    }

    #[test]
    fn zero_target_uses_documented_fallback() {
        assert_eq!(completion_ratio(&kpi(0.0, 0.0)), 0.0);
        assert_eq!(completion_ratio(&kpi(0.0, -3.0)), 0.0);
        assert_eq!(completion_ratio(&kpi(0.0, 12.0)), 1.0);
    }

    #[test]
    fn non_finite_inputs_normalize_to_zero() {
        assert_eq!(completion_ratio(&kpi(f64::NAN, 10.0)), 0.0);
        assert_eq!(completion_ratio(&kpi(10.0, f64::NAN)), 0.0);
        assert_eq!(completion_ratio(&kpi(f64::INFINITY, 10.0)), 0.0);
        // the ladder never sees a non-finite value
        assert!(completion_ratio(&kpi(0.0, f64::NAN)).is_finite());
    }

    #[test]
    fn display_ratio_is_clamped_to_100() {
        assert_eq!(display_ratio(&kpi(50.0, 100.0)), 100);
        assert_eq!(display_ratio(&kpi(100.0, 50.0)), 50);
        assert_eq!(display_ratio(&kpi(10.0, -5.0)), 0);
    }

    #[test]
    fn empty_store_scores_zero() {
        assert_eq!(aggregate_performance(&store_with(vec![])), 0);
    }

    #[test]
    fn aggregate_is_the_unweighted_mean() {
        // ratios 1.0 and 0.5 -> 75%
        let s = store_with(vec![kpi(100.0, 100.0), kpi(100.0, 50.0)]);
        assert_eq!(aggregate_performance(&s), 75);

        // weight must not influence the result
        let mut weighted = store_with(vec![kpi(100.0, 100.0), kpi(100.0, 50.0)]);
        weighted.kpis[0].weight = 10.0;
        assert_eq!(aggregate_performance(&weighted), 75);
    }

    #[test]
    fn aggregate_rounds_half_away_from_zero() {
        // ratios 1.0 and 0.85 -> 92.5 -> 93
        let s = store_with(vec![kpi(100.0, 100.0), kpi(100.0, 85.0)]);
        assert_eq!(aggregate_performance(&s), 93);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(resolve_tier(100), Tier::Elite);
        assert_eq!(resolve_tier(99), Tier::Gold);
        assert_eq!(resolve_tier(90), Tier::Gold);
        assert_eq!(resolve_tier(89), Tier::Silver);
        assert_eq!(resolve_tier(80), Tier::Silver);
        assert_eq!(resolve_tier(79), Tier::Bronze);
        assert_eq!(resolve_tier(70), Tier::Bronze);
        assert_eq!(resolve_tier(69), Tier::None);
        assert_eq!(resolve_tier(0), Tier::None);
        assert_eq!(resolve_tier(-40), Tier::None);
        assert_eq!(resolve_tier(250), Tier::Elite);
    }

    #[test]
    fn tier_resolution_is_monotonic() {
        for p in -50..=150 {
            assert!(resolve_tier(p + 1) >= resolve_tier(p));
        }
    }

    #[test]
    fn scoring_is_pure() {
        let s = store_with(vec![kpi(100.0, 87.0), kpi(30.0, 30.0)]);
        let first = aggregate_performance(&s);
        assert_eq!(aggregate_performance(&s), first);
        assert_eq!(resolve_tier(first), resolve_tier(first));
    }

    #[test]
    fn default_store_on_target_is_elite_with_default_reward() {
        // the literal example: targets met exactly on the default KPI set
        let s = store_with(vec![
            kpi(100000.0, 100000.0),
            kpi(5.0, 5.0),
            kpi(30.0, 30.0),
        ]);
        let perf = aggregate_performance(&s);
        assert_eq!(perf, 100);
        let tier = resolve_tier(perf);
        assert_eq!(tier, Tier::Elite);
        assert_eq!(default_rewards()[&tier], 5000.0);
    }
}
