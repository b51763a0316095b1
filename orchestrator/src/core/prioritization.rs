//! Quadrant and delivery-track assignment

use chrono::{DateTime, Utc};
use shared::{
    EffortFields, PrioritizationSummary, PrioritizedUseCase, Quadrant, Track, UseCase, UseCaseId, ValidationResult,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::scoring;
use crate::config::EngineConfig;

const HEAVY_EFFORT: f64 = 8.0;
const LIGHT_EFFORT: f64 = 3.0;

/// Scores at or above the threshold count as high
pub fn quadrant(value_score: f64, readiness_score: f64, threshold: f64) -> Quadrant {
    match (value_score >= threshold, readiness_score >= threshold) {
        (true, true) => Quadrant::Champion,
        (false, true) => Quadrant::QuickWin,
        (true, false) => Quadrant::Strategic,
        (false, false) => Quadrant::Foundation,
    }
}

pub fn track(quadrant: Quadrant, effort: &EffortFields) -> Track {
    let heavy = |v: Option<f64>| v.is_some_and(|v| v >= HEAVY_EFFORT);
    match quadrant {
        Quadrant::Champion if heavy(effort.complexity) => Track::T2,
        Quadrant::Champion | Quadrant::QuickWin => Track::T1,
        Quadrant::Strategic if heavy(effort.complexity) || heavy(effort.integration_effort) => Track::T3,
        Quadrant::Strategic => Track::T2,
        Quadrant::Foundation if effort.complexity.is_some_and(|c| c <= LIGHT_EFFORT) => Track::T2,
        Quadrant::Foundation => Track::T3,
    }
}

pub struct PrioritizationEngine {
    config: EngineConfig,
}

impl PrioritizationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Score, bucket and rank every use case
    ///
    /// Validated benefits are used where a validation result exists. The
    /// returned use cases carry the refreshed scores.
    pub fn prioritize(
        &self,
        use_cases: &[UseCase],
        validation: &[ValidationResult],
        now: DateTime<Utc>,
    ) -> (Vec<UseCase>, PrioritizationSummary) {
        let validated: HashMap<UseCaseId, f64> =
            validation.iter().map(|r| (r.use_case_id, r.validated_benefit)).collect();
        let threshold = self.config.priority_threshold;

        let mut rescored = Vec::with_capacity(use_cases.len());
        let mut items = Vec::with_capacity(use_cases.len());
        for use_case in use_cases {
            let mut use_case = use_case.clone();
            let benefit_basis = validated.get(&use_case.id).copied().unwrap_or_else(|| use_case.original_benefit());
            scoring::rescore(&mut use_case, Some(benefit_basis), &self.config);

            let quadrant = quadrant(use_case.value_score, use_case.readiness_score, threshold);
            items.push(PrioritizedUseCase {
                use_case_id: use_case.id,
                title: use_case.title.clone(),
                value_score: use_case.value_score,
                readiness_score: use_case.readiness_score,
                quadrant,
                track: track(quadrant, &use_case.effort),
                rank: 0,
                benefit_basis,
            });
            rescored.push(use_case);
        }

        items.sort_by(|a, b| {
            let product = |item: &PrioritizedUseCase| item.value_score * item.readiness_score;
            product(b)
                .partial_cmp(&product(a))
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.title.cmp(&b.title))
        });
        for (position, item) in items.iter_mut().enumerate() {
            item.rank = position + 1;
        }

        let mut quadrant_counts = BTreeMap::new();
        let mut track_counts = BTreeMap::new();
        for item in &items {
            *quadrant_counts.entry(item.quadrant).or_insert(0) += 1;
            *track_counts.entry(item.track).or_insert(0) += 1;
        }

        let summary = PrioritizationSummary {
            items,
            quadrant_counts,
            track_counts,
            threshold,
            computed_at: now,
        };
        (rescored, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::WorkshopId;
    use std::collections::BTreeSet;

    fn effort(complexity: f64, data_readiness: f64, integration: f64) -> EffortFields {
        EffortFields {
            complexity: Some(complexity),
            data_readiness: Some(data_readiness),
            integration_effort: Some(integration),
        }
    }

    fn use_case(title: &str, benefit: f64, effort: EffortFields) -> UseCase {
        let mut use_case = UseCase::new(WorkshopId::new(), title);
        use_case.benefits.cost_savings = Some(benefit);
        use_case.effort = effort;
        use_case
    }

    #[test]
    fn test_boundary_is_inclusive_on_high_side() {
        assert_eq!(quadrant(7.0, 7.0, 7.0), Quadrant::Champion);
        assert_eq!(quadrant(6.9, 7.0, 7.0), Quadrant::QuickWin);
        assert_eq!(quadrant(7.0, 6.9, 7.0), Quadrant::Strategic);
        assert_eq!(quadrant(6.9, 6.9, 7.0), Quadrant::Foundation);
    }

    #[test]
    fn test_tracks_follow_quadrant_and_effort() {
        assert_eq!(track(Quadrant::Champion, &effort(3.0, 8.0, 3.0)), Track::T1);
        assert_eq!(track(Quadrant::Champion, &effort(8.0, 8.0, 3.0)), Track::T2);
        assert_eq!(track(Quadrant::QuickWin, &effort(9.0, 8.0, 9.0)), Track::T1);
        assert_eq!(track(Quadrant::Strategic, &effort(5.0, 5.0, 5.0)), Track::T2);
        assert_eq!(track(Quadrant::Strategic, &effort(5.0, 5.0, 8.0)), Track::T3);
        assert_eq!(track(Quadrant::Foundation, &effort(6.0, 2.0, 6.0)), Track::T3);
        assert_eq!(track(Quadrant::Foundation, &effort(3.0, 2.0, 6.0)), Track::T2);
        assert_eq!(track(Quadrant::Foundation, &EffortFields::default()), Track::T3);
    }

    #[test]
    fn test_ranking_and_counts() {
        let config = EngineConfig::default();
        let use_cases = vec![
            use_case("Quick win", 50_000.0, effort(2.0, 9.0, 2.0)),
            use_case("Champion", 5_000_000.0, effort(2.0, 9.0, 2.0)),
            use_case("Foundation", 20_000.0, effort(9.0, 2.0, 9.0)),
            use_case("Strategic", 5_000_000.0, effort(9.0, 2.0, 9.0)),
        ];
        let (rescored, summary) = PrioritizationEngine::new(config).prioritize(&use_cases, &[], Utc::now());

        let order: Vec<&str> = summary.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(order[0], "Champion");
        assert_eq!(summary.items[0].rank, 1);
        assert_eq!(summary.items[0].quadrant, Quadrant::Champion);
        assert_eq!(summary.items[0].track, Track::T1);

        let quadrants: BTreeSet<Quadrant> = summary.items.iter().map(|i| i.quadrant).collect();
        assert_eq!(quadrants.len(), 4);
        assert_eq!(summary.quadrant_counts.values().sum::<usize>(), 4);
        assert_eq!(summary.track_counts.values().sum::<usize>(), 4);
        assert!(rescored.iter().all(|u| (1.0..=10.0).contains(&u.value_score)));
    }

    #[test]
    fn test_ties_break_by_title() {
        let config = EngineConfig::default();
        let use_cases = vec![
            use_case("Beta", 100_000.0, effort(5.0, 5.0, 5.0)),
            use_case("Alpha", 100_000.0, effort(5.0, 5.0, 5.0)),
        ];
        let (_, summary) = PrioritizationEngine::new(config).prioritize(&use_cases, &[], Utc::now());
        assert_eq!(summary.items[0].title, "Alpha");
        assert_eq!(summary.items[1].title, "Beta");
    }

    #[test]
    fn test_validated_benefit_drives_value_score() {
        let config = EngineConfig::default();
        let subject = use_case("Churn", 1_000_000.0, effort(5.0, 5.0, 5.0));
        let validation = vec![ValidationResult {
            use_case_id: subject.id,
            original_benefit: 1_000_000.0,
            validated_benefit: 100_000.0,
            confidence_level: 10,
            adjustment_reason: String::new(),
            benchmark_source: String::new(),
            risk_flags: BTreeSet::new(),
        }];

        let (rescored, summary) = PrioritizationEngine::new(config).prioritize(&[subject], &validation, Utc::now());
        assert_eq!(summary.items[0].benefit_basis, 100_000.0);
        assert_eq!(rescored[0].value_score, 4.0);
    }
}
