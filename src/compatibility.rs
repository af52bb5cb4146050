/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Pairwise compatibility between two Entity Types.
//!
//! ```text
//! coefficient = 0.4 × category + 0.3 × attribute + 0.3 × synergy
//! ```
//!
//! - **category**: base matrix value rescaled from [0, 1] to [−1, 1].
//! - **attribute**: per-dimension complementarity weight × magnitude,
//!   averaged and rescaled the same way. Differences of 30–50 points
//!   complement best (weight 1.0), closer values overlap (0.7), wider gaps
//!   pull apart (0.5).
//! - **synergy**: the first matching explicit rule, or 0.5 for a strong
//!   leader paired with a strong executor, else 0.
//!
//! The composite is clamped to [−1, 1], then rounded to two decimals, and the
//! classification bins read the rounded value. Every component is symmetric,
//! so `interact(a, b)` and `interact(b, a)` agree on coefficient and
//! classification exactly.

use crate::error::Result;
use crate::registry::Registry;
use crate::stable::{pair_key, stable_index};
use crate::taxonomy::{Attribute, AttributeVector, EntityType, ATTRIBUTE_DIM};

const CATEGORY_WEIGHT: f64 = 0.4;
const ATTRIBUTE_WEIGHT: f64 = 0.3;
const SYNERGY_WEIGHT: f64 = 0.3;

/// Attribute level above which an entity counts as a strong leader or executor.
const STRONG_TRAIT: u8 = 70;
const LEADER_EXECUTOR_SYNERGY: f64 = 0.5;

// ─── Classification ──────────────────────────────────────────────────────────

/// Five ordered bins over the interaction coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    /// coefficient < −0.7
    Conflict,
    /// −0.7 ≤ coefficient < −0.3
    Friction,
    /// −0.3 ≤ coefficient < 0.3
    Neutral,
    /// 0.3 ≤ coefficient < 0.7
    Stable,
    /// coefficient ≥ 0.7
    Resonance,
}

impl Classification {
    /// Bin a coefficient. Lower bounds are inclusive.
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient >= 0.7 {
            Classification::Resonance
        } else if coefficient >= 0.3 {
            Classification::Stable
        } else if coefficient >= -0.3 {
            Classification::Neutral
        } else if coefficient >= -0.7 {
            Classification::Friction
        } else {
            Classification::Conflict
        }
    }

    /// Lower-case label.
    pub fn label(self) -> &'static str {
        match self {
            Classification::Resonance => "resonance",
            Classification::Stable => "stable",
            Classification::Neutral => "neutral",
            Classification::Friction => "friction",
            Classification::Conflict => "conflict",
        }
    }

    /// Outcome descriptions for this bin.
    pub fn outcomes(self) -> &'static [&'static str] {
        match self {
            Classification::Resonance => &[
                "Both sides amplify each other's strengths.",
                "Shared momentum builds quickly.",
                "A natural partnership forms.",
                "Output exceeds the sum of the parts.",
            ],
            Classification::Stable => &[
                "Cooperation is reliable and steady.",
                "Minor differences are easily absorbed.",
                "They work well with light coordination.",
                "Each covers the other's blind spots.",
            ],
            Classification::Neutral => &[
                "The pairing neither helps nor hinders.",
                "Interaction stays transactional.",
                "Little common ground, little friction.",
                "Results depend on the task more than the pair.",
            ],
            Classification::Friction => &[
                "Working styles pull in different directions.",
                "Misunderstandings slow progress.",
                "Tension surfaces under pressure.",
                "Priorities clash on shared work.",
            ],
            Classification::Conflict => &[
                "Direct opposition stalls the work.",
                "Each undermines the other's priorities.",
                "Collaboration is likely to break down.",
                "Every decision becomes a contest.",
            ],
        }
    }

    /// Recommended actions for this bin.
    pub fn actions(self) -> &'static [&'static str] {
        match self {
            Classification::Resonance => &[
                "Pair them on the highest-stakes work.",
                "Give them shared ownership.",
                "Let them set the pace for the group.",
                "Invest in keeping them together.",
            ],
            Classification::Stable => &[
                "Assign complementary tasks.",
                "Check in periodically.",
                "Let them collaborate on routine work.",
                "Rotate the lead between them.",
            ],
            Classification::Neutral => &[
                "Keep hand-offs explicit.",
                "Use a shared goal to create alignment.",
                "Pair only when necessary.",
                "Let a third member bridge them.",
            ],
            Classification::Friction => &[
                "Introduce a mediator.",
                "Separate their areas of ownership.",
                "Agree on decision rules up front.",
                "Shorten feedback loops between them.",
            ],
            Classification::Conflict => &[
                "Keep them on separate tracks.",
                "Escalate early to a neutral party.",
                "Avoid shared dependencies.",
                "Do not place one under the other.",
            ],
        }
    }
}

// ─── InteractionResult ───────────────────────────────────────────────────────

/// The three unweighted component scores, each in [−1, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionComponents {
    /// Rescaled base-matrix value.
    pub category: f64,
    /// Rescaled attribute complementarity.
    pub attribute: f64,
    /// Rule bonus or heuristic synergy.
    pub synergy: f64,
}

/// Result of [`CompatibilityEngine::interact`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionResult {
    /// First argument.
    pub entity_a: String,
    /// Second argument.
    pub entity_b: String,
    /// Composite score in [−1, 1], rounded to two decimals.
    pub coefficient: f64,
    /// Bin of `coefficient`.
    pub classification: Classification,
    /// What the pairing is likely to produce.
    pub outcome_text: String,
    /// What to do about it.
    pub action_text: String,
    /// Unweighted component scores.
    pub components: InteractionComponents,
}

// ─── Components ──────────────────────────────────────────────────────────────

fn rescale(x: f64) -> f64 {
    (x - 0.5) * 2.0
}

/// Round to two decimals.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn complementarity_weight(difference: u8) -> f64 {
    match difference {
        30..=50 => 1.0,
        0..=29 => 0.7,
        _ => 0.5,
    }
}

/// Attribute complementarity of two vectors, rescaled to [−1, 1].
pub fn attribute_score(a: &AttributeVector, b: &AttributeVector) -> f64 {
    let sum: f64 = a
        .values()
        .iter()
        .zip(b.values().iter())
        .map(|(&x, &y)| {
            let magnitude = (x as f64 + y as f64) / 200.0;
            complementarity_weight(x.abs_diff(y)) * magnitude
        })
        .sum();
    rescale(sum / ATTRIBUTE_DIM as f64)
}

fn leads_executor(leader: &EntityType, executor: &EntityType) -> bool {
    leader.attribute(Attribute::Leadership) > STRONG_TRAIT
        && executor.attribute(Attribute::Execution) > STRONG_TRAIT
}

/// Synergy of two entities: first matching rule, else the leader/executor heuristic.
pub fn synergy_score(registry: &Registry, a: &EntityType, b: &EntityType) -> f64 {
    if let Some(rule) = registry.synergy_rules().iter().find(|r| r.matches(&a.id, &b.id)) {
        return rule.bonus;
    }
    if leads_executor(a, b) || leads_executor(b, a) {
        LEADER_EXECUTOR_SYNERGY
    } else {
        0.0
    }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Pairwise interaction scoring over a borrowed [`Registry`].
#[derive(Clone, Copy, Debug)]
pub struct CompatibilityEngine<'r> {
    registry: &'r Registry,
}

impl<'r> CompatibilityEngine<'r> {
    /// Engine reading from `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Interaction of two entities by id.
    pub fn interact(&self, a: &str, b: &str) -> Result<InteractionResult> {
        let a = self.registry.entity(a)?;
        let b = self.registry.entity(b)?;
        Ok(self.interact_entities(a, b))
    }

    /// Interaction of two entity records already resolved from the registry.
    pub fn interact_entities(&self, a: &EntityType, b: &EntityType) -> InteractionResult {
        let components = InteractionComponents {
            category: rescale(self.registry.base_compatibility(a.category, b.category)),
            attribute: attribute_score(&a.attributes, &b.attributes),
            synergy: synergy_score(self.registry, a, b),
        };
        let raw = CATEGORY_WEIGHT * components.category
            + ATTRIBUTE_WEIGHT * components.attribute
            + SYNERGY_WEIGHT * components.synergy;
        let coefficient = round2(raw.clamp(-1.0, 1.0));
        let classification = Classification::from_coefficient(coefficient);

        let key = pair_key(&a.id, &b.id);
        let outcomes = classification.outcomes();
        let actions = classification.actions();
        let outcome_text = outcomes[stable_index(&key, outcomes.len())].to_owned();
        let action_text = actions[stable_index(&key, actions.len())].to_owned();

        tracing::trace!(a = %a.id, b = %b.id, coefficient, class = classification.label(), "interaction");

        InteractionResult {
            entity_a: a.id.clone(),
            entity_b: b.id.clone(),
            coefficient,
            classification,
            outcome_text,
            action_text,
            components,
        }
    }

    /// Every other entity ranked by coefficient with `id`, best first.
    /// Ties keep catalog order. `limit` of 0 means no limit.
    pub fn rank_partners(&self, id: &str, limit: usize) -> Result<Vec<InteractionResult>> {
        let me = self.registry.entity(id)?;
        let mut ranked: Vec<InteractionResult> = self
            .registry
            .entities()
            .iter()
            .filter(|other| other.id != me.id)
            .map(|other| self.interact_entities(me, other))
            .collect();
        ranked.sort_by(|x, y| y.coefficient.total_cmp(&x.coefficient));
        if limit > 0 {
            ranked.truncate(limit);
        }
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SynergyRule;
    use crate::taxonomy::Category;

    fn builtin() -> Registry {
        Registry::builtin()
    }

    #[test]
    fn test_classification_bins_are_inclusive_on_lower_bounds() {
        assert_eq!(Classification::from_coefficient(0.70), Classification::Resonance);
        assert_eq!(Classification::from_coefficient(0.69), Classification::Stable);
        assert_eq!(Classification::from_coefficient(0.30), Classification::Stable);
        assert_eq!(Classification::from_coefficient(-0.30), Classification::Neutral);
        assert_eq!(Classification::from_coefficient(-0.31), Classification::Friction);
        assert_eq!(Classification::from_coefficient(-0.70), Classification::Friction);
        assert_eq!(Classification::from_coefficient(-0.71), Classification::Conflict);
    }

    #[test]
    fn test_rounded_boundary_lands_in_upper_bin() {
        // 0.695 + tiny rounds to 0.70 and must classify as resonance.
        let c = round2(0.6951);
        assert_eq!(c, 0.70);
        assert_eq!(Classification::from_coefficient(c), Classification::Resonance);
    }

    #[test]
    fn test_complementarity_weights() {
        assert_eq!(complementarity_weight(0), 0.7);
        assert_eq!(complementarity_weight(29), 0.7);
        assert_eq!(complementarity_weight(30), 1.0);
        assert_eq!(complementarity_weight(50), 1.0);
        assert_eq!(complementarity_weight(51), 0.5);
    }

    #[test]
    fn test_attribute_score_extremes() {
        let zero = AttributeVector::new([0; 6]);
        let full = AttributeVector::new([100; 6]);
        assert_eq!(attribute_score(&zero, &zero), -1.0);
        // diff 0 → weight 0.7, magnitude 1.0 → 0.7 → rescaled 0.4
        assert!((attribute_score(&full, &full) - 0.4).abs() < 1e-12);
        // diff 100 → weight 0.5, magnitude 0.5 → 0.25 → rescaled −0.5
        assert!((attribute_score(&zero, &full) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_self_interaction_regression_baseline() {
        let r = builtin();
        let engine = CompatibilityEngine::new(&r);
        let res = engine.interact("T01", "T01").unwrap();
        // category: (0.3 − 0.5) × 2 = −0.4
        assert!((res.components.category + 0.4).abs() < 1e-12);
        // attribute: 0.7 × (78+29+61+27+48+55)/100 / 6 = 0.347666…, rescaled
        let expected_attr = (0.7 * 2.98 / 6.0 - 0.5) * 2.0;
        assert!((res.components.attribute - expected_attr).abs() < 1e-12);
        assert_eq!(res.components.synergy, 0.0);
        assert_eq!(res.coefficient, -0.25);
        assert_eq!(res.classification, Classification::Neutral);
    }

    #[test]
    fn test_explicit_rule_applies_in_either_order() {
        let r = builtin();
        let engine = CompatibilityEngine::new(&r);
        let ab = engine.interact("L01", "T02").unwrap();
        let ba = engine.interact("T02", "L01").unwrap();
        assert_eq!(ab.components.synergy, 0.8);
        assert_eq!(ba.components.synergy, 0.8);
        assert_eq!(ab.coefficient, ba.coefficient);
        assert_eq!(ab.outcome_text, ba.outcome_text);
        assert_eq!(ab.action_text, ba.action_text);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let r = Registry::builder()
            .entity(EntityType::new("T01", "a", Category::Talent, 1, [50; 6]))
            .entity(EntityType::new("T02", "b", Category::Talent, 2, [50; 6]))
            .synergy(SynergyRule::new("first", &["T01"], &["T02"], -0.4))
            .synergy(SynergyRule::new("second", &["T02"], &["T01"], 0.9))
            .build()
            .unwrap();
        let res = CompatibilityEngine::new(&r).interact("T02", "T01").unwrap();
        assert_eq!(res.components.synergy, -0.4);
    }

    #[test]
    fn test_leader_executor_heuristic() {
        let r = Registry::builder()
            .entity(EntityType::new("L01", "boss", Category::Leader, 1, [10, 10, 10, 10, 90, 10]))
            .entity(EntityType::new("T01", "doer", Category::Talent, 1, [90, 10, 10, 10, 10, 10]))
            .entity(EntityType::new("T02", "idle", Category::Talent, 2, [10, 10, 10, 10, 10, 10]))
            .build()
            .unwrap();
        let engine = CompatibilityEngine::new(&r);
        assert_eq!(engine.interact("T01", "L01").unwrap().components.synergy, 0.5);
        assert_eq!(engine.interact("L01", "T01").unwrap().components.synergy, 0.5);
        assert_eq!(engine.interact("L01", "T02").unwrap().components.synergy, 0.0);
    }

    #[test]
    fn test_text_comes_from_the_classification_lists() {
        let r = builtin();
        let engine = CompatibilityEngine::new(&r);
        for a in ["T01", "L21", "V23"] {
            for b in ["T02", "L07", "V22"] {
                let res = engine.interact(a, b).unwrap();
                assert!(res.classification.outcomes().contains(&res.outcome_text.as_str()));
                assert!(res.classification.actions().contains(&res.action_text.as_str()));
            }
        }
    }

    #[test]
    fn test_rank_partners_is_sorted_and_excludes_self() {
        let r = builtin();
        let engine = CompatibilityEngine::new(&r);
        let ranked = engine.rank_partners("T03", 10).unwrap();
        assert_eq!(ranked.len(), 10);
        assert!(ranked.iter().all(|x| x.entity_b != "T03"));
        for w in ranked.windows(2) {
            assert!(w[0].coefficient >= w[1].coefficient);
        }
        assert_eq!(engine.rank_partners("T03", 0).unwrap().len(), 71);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let r = builtin();
        let engine = CompatibilityEngine::new(&r);
        assert!(engine.interact("T01", "Q00").unwrap_err().is_not_found());
    }
}
