//! Value and readiness scores on a 1..10 scale

use shared::{EffortFields, UseCase};

use crate::config::EngineConfig;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Stand-in for an unestimated effort input
const NEUTRAL_EFFORT: f64 = 5.5;

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Log-scaled benefit between the configured floor and ceiling
pub fn value_score(benefit: f64, config: &EngineConfig) -> f64 {
    if benefit.is_nan() || benefit <= config.value_floor {
        return MIN_SCORE;
    }
    if benefit >= config.value_ceiling {
        return MAX_SCORE;
    }
    let span = config.value_ceiling.ln() - config.value_floor.ln();
    let position = (benefit.ln() - config.value_floor.ln()) / span;
    round1((MIN_SCORE + (MAX_SCORE - MIN_SCORE) * position).clamp(MIN_SCORE, MAX_SCORE))
}

/// Mean of inverted complexity, inverted integration effort and data readiness
pub fn readiness_score(effort: &EffortFields) -> f64 {
    let complexity = effort.complexity.unwrap_or(NEUTRAL_EFFORT);
    let integration = effort.integration_effort.unwrap_or(NEUTRAL_EFFORT);
    let data_readiness = effort.data_readiness.unwrap_or(NEUTRAL_EFFORT);

    let mean = ((11.0 - complexity) + (11.0 - integration) + data_readiness) / 3.0;
    round1(mean.clamp(MIN_SCORE, MAX_SCORE))
}

/// Recompute both derived scores from the use case's own inputs
///
/// `benefit_basis` overrides the raw benefit total, e.g. with a validated one.
pub fn rescore(use_case: &mut UseCase, benefit_basis: Option<f64>, config: &EngineConfig) {
    let benefit = benefit_basis.unwrap_or_else(|| use_case.original_benefit());
    use_case.value_score = value_score(benefit, config);
    use_case.readiness_score = readiness_score(&use_case.effort);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_score_bounds() {
        let config = EngineConfig::default();
        assert_eq!(value_score(0.0, &config), 1.0);
        assert_eq!(value_score(-5.0, &config), 1.0);
        assert_eq!(value_score(10_000.0, &config), 1.0);
        assert_eq!(value_score(10_000_000.0, &config), 10.0);
        assert_eq!(value_score(1e12, &config), 10.0);
    }

    #[test]
    fn test_value_score_is_log_scaled() {
        let config = EngineConfig::default();
        // One decade above the floor is a third of the way up
        assert_eq!(value_score(100_000.0, &config), 4.0);
        assert_eq!(value_score(1_000_000.0, &config), 7.0);
    }

    #[test]
    fn test_value_score_is_monotonic() {
        let config = EngineConfig::default();
        let mut previous = 0.0;
        for benefit in [0.0, 5_000.0, 20_000.0, 150_000.0, 999_999.0, 4_000_000.0, 50_000_000.0] {
            let score = value_score(benefit, &config);
            assert!(score >= previous, "{benefit} scored {score} below {previous}");
            previous = score;
        }
    }

    #[test]
    fn test_value_score_saturates_on_huge_benefits() {
        let config = EngineConfig::default();
        let mut use_case = UseCase::new(shared::WorkshopId::new(), "Global treasury optimization");
        use_case.benefits.cost_savings = Some(1e308);
        use_case.benefits.risk_reduction = Some(1e308);

        let total = use_case.original_benefit();
        assert!(total.is_finite());
        assert_eq!(value_score(total, &config), MAX_SCORE);
        assert!(value_score(total, &config) >= value_score(10_000_000.0, &config));
        assert_eq!(value_score(f64::INFINITY, &config), MAX_SCORE);
        assert_eq!(value_score(f64::NAN, &config), MIN_SCORE);

        rescore(&mut use_case, None, &config);
        assert_eq!(use_case.value_score, MAX_SCORE);
    }

    #[test]
    fn test_readiness_uses_neutral_defaults() {
        assert_eq!(readiness_score(&EffortFields::default()), 5.5);

        let easy = EffortFields {
            complexity: Some(2.0),
            data_readiness: Some(9.0),
            integration_effort: Some(3.0),
        };
        assert_eq!(readiness_score(&easy), 8.7);
    }

    #[test]
    fn test_readiness_is_clamped() {
        let hardest = EffortFields {
            complexity: Some(10.0),
            data_readiness: Some(1.0),
            integration_effort: Some(10.0),
        };
        assert_eq!(readiness_score(&hardest), 1.0);

        let easiest = EffortFields {
            complexity: Some(1.0),
            data_readiness: Some(10.0),
            integration_effort: Some(1.0),
        };
        assert_eq!(readiness_score(&easiest), 10.0);
    }
}
