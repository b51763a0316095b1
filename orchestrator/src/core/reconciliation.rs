//! Merging of imported use cases into one canonical list
//!
//! Entries from both sources are folded together in import order (ResearchApp
//! first). Each incoming entry joins the most similar survivor at or above the
//! threshold, otherwise it becomes a new survivor. Merging can fill in a
//! description and shift fingerprints, so a final collapse pass keeps folding
//! until no two survivors match.

use std::collections::{BTreeMap, HashSet};

use shared::{FieldSource, RawUseCase, ReconcileOutcome, SourceSystem, UseCase, UseCaseId, WorkshopId};
use tracing::debug;

use super::scoring;
use super::similarity::Fingerprint;
use crate::config::EngineConfig;

type Provenance = BTreeMap<String, FieldSource>;

fn combine(a: FieldSource, b: FieldSource) -> FieldSource {
    if a == b {
        a
    } else {
        FieldSource::Both
    }
}

/// Whether a field's current source includes the given authority
fn backed_by(source: Option<FieldSource>, authority: SourceSystem) -> bool {
    matches!(source, Some(s) if s == FieldSource::Both || s == FieldSource::from(authority))
}

/// Authoritative scalar: fill gaps, otherwise let the authority replace a non-authority value
///
/// Zero means unestimated and never displaces a non-zero value.
fn merge_authoritative(
    name: &str,
    slot: &mut Option<f64>,
    incoming: Option<f64>,
    provenance: &mut Provenance,
    incoming_provenance: &Provenance,
    authority: SourceSystem,
) {
    let Some(value) = incoming else { return };
    let unestimated = slot.map_or(true, |current| current == 0.0);
    if value == 0.0 && !unestimated {
        return;
    }
    let incoming_source = incoming_provenance.get(name).copied();
    let replace = unestimated
        || (backed_by(incoming_source, authority) && !backed_by(provenance.get(name).copied(), authority));
    if replace {
        *slot = Some(value);
        if let Some(source) = incoming_source {
            provenance.insert(name.to_string(), source);
        }
    }
}

/// Non-authoritative numeric: average when both are non-zero, else the non-zero one
fn merge_numeric(
    name: &str,
    slot: &mut Option<f64>,
    incoming: Option<f64>,
    provenance: &mut Provenance,
    incoming_provenance: &Provenance,
) {
    let Some(value) = incoming else { return };
    let incoming_source = incoming_provenance.get(name).copied();
    match *slot {
        Some(current) if current != 0.0 && value != 0.0 => {
            *slot = Some((current + value) / 2.0);
            if let (Some(a), Some(b)) = (provenance.get(name).copied(), incoming_source) {
                provenance.insert(name.to_string(), combine(a, b));
            }
        }
        Some(current) if current != 0.0 => {}
        _ => {
            *slot = Some(value);
            if let Some(source) = incoming_source {
                provenance.insert(name.to_string(), source);
            }
        }
    }
}

fn normalized(item: &str) -> String {
    item.trim().to_lowercase()
}

/// Lists with an authority take the authority's entries whole; others are
/// unioned case-insensitively in first-appearance order
fn merge_list(
    name: &str,
    slot: &mut Vec<String>,
    incoming: &[String],
    provenance: &mut Provenance,
    incoming_provenance: &Provenance,
    authority: Option<SourceSystem>,
) {
    if incoming.is_empty() {
        return;
    }
    let incoming_source = incoming_provenance.get(name).copied();
    let current_source = provenance.get(name).copied();

    if let Some(authority) = authority {
        let incoming_owns = backed_by(incoming_source, authority);
        let current_owns = backed_by(current_source, authority) && !slot.is_empty();
        if incoming_owns && !current_owns {
            *slot = incoming.to_vec();
            if let Some(source) = incoming_source {
                provenance.insert(name.to_string(), source);
            }
            return;
        }
        if current_owns && !incoming_owns {
            return;
        }
    }

    let current = std::mem::take(slot);
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(current.len() + incoming.len());
    let mut contributors = Vec::new();
    for (items, source) in [(current.as_slice(), current_source), (incoming, incoming_source)] {
        let before = merged.len();
        for item in items {
            if seen.insert(normalized(item)) {
                merged.push(item.clone());
            }
        }
        if merged.len() > before {
            contributors.push(source);
        }
    }

    if let Some(source) = contributors.into_iter().flatten().reduce(combine) {
        provenance.insert(name.to_string(), source);
    }
    *slot = merged;
}

/// A survivor under construction
#[derive(Debug, Clone)]
struct Draft {
    fields: RawUseCase,
    provenance: Provenance,
    fingerprint: Fingerprint,
}

impl Draft {
    fn from_raw(raw: &RawUseCase, source: SourceSystem) -> Self {
        let origin = FieldSource::from(source);
        let mut provenance = Provenance::new();
        provenance.insert("title".to_string(), origin);

        let scalars = [
            ("costSavings", raw.benefits.cost_savings),
            ("riskReduction", raw.benefits.risk_reduction),
            ("revenueImpact", raw.benefits.revenue_impact),
            ("cashFlowImprovement", raw.benefits.cash_flow_improvement),
            ("complexity", raw.effort.complexity),
            ("dataReadiness", raw.effort.data_readiness),
            ("integrationEffort", raw.effort.integration_effort),
        ];
        for (name, value) in scalars {
            if value.is_some() {
                provenance.insert(name.to_string(), origin);
            }
        }

        let texts = [
            ("description", raw.description.trim().is_empty()),
            ("assumptions", raw.assumptions.is_empty()),
            ("kpis", raw.kpis.is_empty()),
            ("behavioralPatterns", raw.behavioral_patterns.is_empty()),
            ("frictionPoints", raw.friction_points.is_empty()),
        ];
        for (name, empty) in texts {
            if !empty {
                provenance.insert(name.to_string(), origin);
            }
        }

        Self {
            fields: raw.clone(),
            provenance,
            fingerprint: Fingerprint::new(&raw.title, &raw.description),
        }
    }

    fn absorb(&mut self, other: &Draft) {
        let fields = &mut self.fields;
        let provenance = &mut self.provenance;
        let theirs = &other.fields;
        let their_provenance = &other.provenance;

        if fields.description.trim().is_empty() && !theirs.description.trim().is_empty() {
            fields.description = theirs.description.clone();
            if let Some(source) = their_provenance.get("description") {
                provenance.insert("description".to_string(), *source);
            }
        }

        let research = SourceSystem::ResearchApp;
        merge_authoritative("costSavings", &mut fields.benefits.cost_savings, theirs.benefits.cost_savings, provenance, their_provenance, research);
        merge_authoritative("riskReduction", &mut fields.benefits.risk_reduction, theirs.benefits.risk_reduction, provenance, their_provenance, research);
        merge_authoritative("revenueImpact", &mut fields.benefits.revenue_impact, theirs.benefits.revenue_impact, provenance, their_provenance, research);
        merge_authoritative(
            "cashFlowImprovement",
            &mut fields.benefits.cash_flow_improvement,
            theirs.benefits.cash_flow_improvement,
            provenance,
            their_provenance,
            research,
        );

        merge_numeric("complexity", &mut fields.effort.complexity, theirs.effort.complexity, provenance, their_provenance);
        merge_numeric("dataReadiness", &mut fields.effort.data_readiness, theirs.effort.data_readiness, provenance, their_provenance);
        merge_numeric(
            "integrationEffort",
            &mut fields.effort.integration_effort,
            theirs.effort.integration_effort,
            provenance,
            their_provenance,
        );

        let cognition = Some(SourceSystem::CognitionTwo);
        merge_list("assumptions", &mut fields.assumptions, &theirs.assumptions, provenance, their_provenance, None);
        merge_list("kpis", &mut fields.kpis, &theirs.kpis, provenance, their_provenance, None);
        merge_list(
            "behavioralPatterns",
            &mut fields.behavioral_patterns,
            &theirs.behavioral_patterns,
            provenance,
            their_provenance,
            cognition,
        );
        merge_list("frictionPoints", &mut fields.friction_points, &theirs.friction_points, provenance, their_provenance, cognition);

        self.fingerprint = Fingerprint::new(&self.fields.title, &self.fields.description);
    }
}

/// Index of the most similar candidate at or above `threshold`; ties keep the earliest
fn best_match<'a>(candidates: impl Iterator<Item = &'a Fingerprint>, target: &Fingerprint, threshold: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.enumerate() {
        let score = candidate.similarity(target);
        if score >= threshold && best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

pub struct ReconciliationEngine {
    config: EngineConfig,
}

impl ReconciliationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Merge both imports into scored use cases for `workshop_id`
    ///
    /// Survivors similar to one of `previous` inherit its identifier so that
    /// existing challenge entries stay attached. With no sources at all the
    /// result is empty.
    pub fn reconcile(
        &self,
        workshop_id: WorkshopId,
        research: Option<&[RawUseCase]>,
        cognition: Option<&[RawUseCase]>,
        previous: &[UseCase],
    ) -> ReconcileOutcome {
        let threshold = self.config.similarity_threshold;
        let mut drafts: Vec<Draft> = Vec::new();
        let mut merged_count = 0;

        let sources = [(SourceSystem::ResearchApp, research), (SourceSystem::CognitionTwo, cognition)];
        for (source, entries) in sources {
            for raw in entries.unwrap_or_default() {
                let incoming = Draft::from_raw(raw, source);
                match best_match(drafts.iter().map(|d| &d.fingerprint), &incoming.fingerprint, threshold) {
                    Some(index) => {
                        debug!(title = %raw.title, into = %drafts[index].fields.title, %source, "Merged imported use case");
                        drafts[index].absorb(&incoming);
                        merged_count += 1;
                    }
                    None => drafts.push(incoming),
                }
            }
        }

        merged_count += Self::collapse(&mut drafts, threshold);

        let previous_prints: Vec<(UseCaseId, Fingerprint)> =
            previous.iter().map(|u| (u.id, Fingerprint::new(&u.title, &u.description))).collect();
        let mut claimed: HashSet<UseCaseId> = HashSet::new();
        let mut use_cases = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let id = Self::inherited_id(&previous_prints, &claimed, &draft.fingerprint, threshold).unwrap_or_default();
            claimed.insert(id);
            use_cases.push(self.build_use_case(id, workshop_id, draft));
        }

        ReconcileOutcome {
            use_cases,
            merged_count,
        }
    }

    /// Identifier of the closest unclaimed previous use case, if any matches
    fn inherited_id(
        previous: &[(UseCaseId, Fingerprint)],
        claimed: &HashSet<UseCaseId>,
        target: &Fingerprint,
        threshold: f64,
    ) -> Option<UseCaseId> {
        let unclaimed: Vec<&(UseCaseId, Fingerprint)> = previous.iter().filter(|(id, _)| !claimed.contains(id)).collect();
        best_match(unclaimed.iter().map(|(_, print)| print), target, threshold).map(|index| unclaimed[index].0)
    }

    /// Fold survivors together until no pair matches; returns the number folded
    fn collapse(drafts: &mut Vec<Draft>, threshold: f64) -> usize {
        let mut folded = 0;
        'scan: loop {
            for i in 0..drafts.len() {
                for j in (i + 1)..drafts.len() {
                    if drafts[i].fingerprint.similarity(&drafts[j].fingerprint) >= threshold {
                        let later = drafts.remove(j);
                        drafts[i].absorb(&later);
                        folded += 1;
                        continue 'scan;
                    }
                }
            }
            return folded;
        }
    }

    fn build_use_case(&self, id: UseCaseId, workshop_id: WorkshopId, draft: Draft) -> UseCase {
        let Draft { fields, provenance, .. } = draft;
        let mut use_case = UseCase {
            id,
            workshop_id,
            title: fields.title,
            description: fields.description,
            provenance,
            benefits: fields.benefits,
            effort: fields.effort,
            assumptions: fields.assumptions,
            kpis: fields.kpis,
            behavioral_patterns: fields.behavioral_patterns,
            friction_points: fields.friction_points,
            value_score: 0.0,
            readiness_score: 0.0,
        };
        scoring::rescore(&mut use_case, None, &self.config);
        use_case
    }
}
