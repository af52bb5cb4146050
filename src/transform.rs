/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! What happens to an Entity Type when a Force is applied.
//!
//! The engine is deterministic: probabilities, difficulty, duration and cost
//! are functions of static tables. A caller simulating an actual outcome
//! supplies its own roll to [`TransformationResult::outcome_for_roll`].
//!
//! # Primary probability
//!
//! ```text
//! 30 base
//! +25 source dominant domain == force domain
//! +15 source category promoted by the (domain, action) effect row
//! −20 source category inhibited by that row
//! +10 forward evolution into a candidate of the force's domain
//! −10 reverse evolution (floored at 20)
//! clamp to [10, 95]
//! ```

use crate::compatibility::round2;
use crate::error::Result;
use crate::registry::{Registry, ResolvedCross};
use crate::taxonomy::{
    ActionKind, Category, Difficulty, Domain, DurationEstimate, EntityType, Force, Rarity,
};

const BASE_PROBABILITY: i32 = 30;
const DOMAIN_MATCH_BONUS: i32 = 25;
const PROMOTE_BONUS: i32 = 15;
const INHIBIT_PENALTY: i32 = 20;
const EVOLUTION_BONUS: i32 = 10;
const DEVOLUTION_PENALTY: i32 = 10;
const DEVOLUTION_FLOOR: i32 = 20;
const MIN_PROBABILITY: i32 = 10;
const MAX_PROBABILITY: i32 = 95;
const ALTERNATIVE_CEILING: u8 = 30;

/// A cross-category result that can occur instead of the primary one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlternativeResult {
    /// Entity id reached.
    pub target: String,
    /// Chance in percent.
    pub probability: u8,
    /// Condition under which this route opens.
    pub condition: String,
}

/// A signed nudge to one domain caused by applying a force.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideEffect {
    /// Affected domain.
    pub domain: Domain,
    /// Signed magnitude.
    pub magnitude: i8,
}

/// Full result of [`TransformationEngine::transform`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformationResult {
    /// Entity the force was applied to.
    pub source: String,
    /// Force applied.
    pub force: String,
    /// Most likely resulting entity. Equal to `source` for an identity transform.
    pub primary_target: String,
    /// Chance of the primary result in percent, in [10, 95].
    pub primary_probability: u8,
    /// Cross-category results, each with its own chance.
    pub alternatives: Vec<AlternativeResult>,
    /// Domain nudges; the first always concerns the force's own domain.
    pub side_effects: Vec<SideEffect>,
    /// How hard the primary transformation is.
    pub difficulty: Difficulty,
    /// How long it takes.
    pub duration: DurationEstimate,
    /// Resource multiplier for carrying it out.
    pub cost_multiplier: f64,
    /// Whether the change can be undone.
    pub reversible: bool,
}

impl TransformationResult {
    /// `true` when the primary result leaves the entity unchanged.
    pub fn is_identity(&self) -> bool {
        self.primary_target == self.source
    }

    /// Resolve a caller-supplied roll in `0..100` to the entity that results.
    ///
    /// The primary result covers `0..primary_probability`; alternatives follow
    /// in order, each covering the next `probability` values. Anything beyond
    /// leaves the source unchanged. Rolls above 99 are treated as 99.
    pub fn outcome_for_roll(&self, roll: u8) -> &str {
        let roll = u16::from(roll.min(99));
        let mut upper = u16::from(self.primary_probability);
        if roll < upper {
            return &self.primary_target;
        }
        for alt in &self.alternatives {
            upper += u16::from(alt.probability);
            if roll < upper {
                return &alt.target;
            }
        }
        &self.source
    }
}

/// Index-level primary transition, shared with the path finder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) target: usize,
    pub(crate) probability: u8,
}

fn same_category_difficulty(distance: u8) -> Difficulty {
    match distance {
        0..=3 => Difficulty::Easy,
        4..=8 => Difficulty::Medium,
        9..=15 => Difficulty::Hard,
        _ => Difficulty::Expert,
    }
}

fn cross_category_difficulty(rarity: Rarity) -> Difficulty {
    match rarity {
        Rarity::Legendary => Difficulty::Legendary,
        Rarity::Epic => Difficulty::Expert,
        Rarity::Common | Rarity::Uncommon | Rarity::Rare => Difficulty::Hard,
    }
}

fn same_category_days(distance: u8) -> u32 {
    match distance {
        0..=3 => 14,
        4..=8 => 45,
        9..=15 => 120,
        _ => 240,
    }
}

fn cross_category_days(from: Category, to: Category) -> u32 {
    match (from, to) {
        (Category::Talent, Category::Leader) => 90,
        (Category::Talent, Category::Visionary) => 365,
        (Category::Leader, Category::Talent) => 30,
        (Category::Leader, Category::Visionary) => 180,
        (Category::Visionary, Category::Talent) => 60,
        (Category::Visionary, Category::Leader) => 45,
        (Category::Talent, Category::Talent)
        | (Category::Leader, Category::Leader)
        | (Category::Visionary, Category::Visionary) => 0,
    }
}

/// Force application over a borrowed [`Registry`].
#[derive(Clone, Copy, Debug)]
pub struct TransformationEngine<'r> {
    registry: &'r Registry,
}

impl<'r> TransformationEngine<'r> {
    /// Engine reading from `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Apply force `force_id` to entity `source_id`.
    pub fn transform(&self, source_id: &str, force_id: &str) -> Result<TransformationResult> {
        let source = self.registry.entity_idx(source_id)?;
        let force = self.registry.force(force_id)?;
        Ok(self.transform_at(source, force))
    }

    pub(crate) fn transform_at(&self, source_idx: usize, force: &Force) -> TransformationResult {
        let source = self.registry.entity_at(source_idx);
        let primary = self.primary(source_idx, force);
        let target = self.registry.entity_at(primary.target);

        let alternatives = self
            .alternatives(source_idx, force)
            .map(|(t, probability, condition)| AlternativeResult {
                target: self.registry.entity_at(t).id.clone(),
                probability,
                condition: condition.to_owned(),
            })
            .collect();

        let identity = primary.target == source_idx;
        let result = TransformationResult {
            source: source.id.clone(),
            force: force.id.clone(),
            primary_target: target.id.clone(),
            primary_probability: primary.probability,
            alternatives,
            side_effects: side_effects(force),
            difficulty: difficulty(source, target, force),
            duration: duration(source, target, force, identity),
            cost_multiplier: round2(f64::from(force.cost) / 5.0 * target.category.cost_factor()),
            reversible: force.action.is_reversible(),
        };

        tracing::trace!(
            source = %result.source,
            force = %result.force,
            target = %result.primary_target,
            probability = result.primary_probability,
            alternatives = result.alternatives.len(),
            "transform"
        );
        result
    }

    /// Primary target and its probability.
    pub(crate) fn primary(&self, source_idx: usize, force: &Force) -> Transition {
        let source = self.registry.entity_at(source_idx);
        let effect = self.registry.force_effect(force.domain, force.action);

        let mut p = BASE_PROBABILITY;
        if source.dominant_domain() == force.domain {
            p += DOMAIN_MATCH_BONUS;
        }
        if effect.promotes(source.category) {
            p += PROMOTE_BONUS;
        }
        if effect.inhibits(source.category) {
            p -= INHIBIT_PENALTY;
        }

        let mut target = source_idx;
        if force.action.evolves_forward() {
            let candidates = self.registry.forward_of(source_idx);
            let matching = candidates
                .iter()
                .copied()
                .find(|&c| self.registry.entity_at(c).dominant_domain() == force.domain);
            if let Some(c) = matching {
                target = c;
                p += EVOLUTION_BONUS;
            } else if let Some(&first) = candidates.first() {
                target = first;
            }
        } else if force.action.evolves_backward() {
            if let Some(prev) = self.registry.reverse_of(source_idx) {
                target = prev;
                p = (p - DEVOLUTION_PENALTY).max(DEVOLUTION_FLOOR);
            }
        }

        Transition {
            target,
            probability: p.clamp(MIN_PROBABILITY, MAX_PROBABILITY) as u8,
        }
    }

    /// Cross-category alternatives: `(target index, probability, condition)`.
    /// Empty unless the force's effect row carries a category shift.
    pub(crate) fn alternatives<'a>(
        &'a self,
        source_idx: usize,
        force: &Force,
    ) -> impl Iterator<Item = (usize, u8, &'a str)> + 'a {
        let shift = self.registry.force_effect(force.domain, force.action).category_shift;
        let probability = shift.saturating_add(10).min(ALTERNATIVE_CEILING);
        let routes: &[ResolvedCross] = if shift > 0 { self.registry.cross_of(source_idx) } else { &[] };
        routes.iter().map(move |c| (c.target, probability, c.condition.as_str()))
    }
}

fn side_effects(force: &Force) -> Vec<SideEffect> {
    let mut effects = vec![SideEffect { domain: force.domain, magnitude: force.action.own_domain_effect() }];
    match force.action {
        ActionKind::Amplify => {
            effects.extend(force.domain.neighbors().iter().map(|&d| SideEffect { domain: d, magnitude: 1 }));
        }
        ActionKind::Drain | ActionKind::Decay if force.domain != Domain::Emotional => {
            effects.push(SideEffect { domain: Domain::Emotional, magnitude: -1 });
        }
        _ => {}
    }
    effects
}

fn difficulty(source: &EntityType, target: &EntityType, force: &Force) -> Difficulty {
    if source.category != target.category {
        cross_category_difficulty(force.rarity)
    } else {
        same_category_difficulty(source.ordinal.abs_diff(target.ordinal))
    }
}

fn duration(source: &EntityType, target: &EntityType, force: &Force, identity: bool) -> DurationEstimate {
    if identity {
        force.nominal_duration
    } else if source.category != target.category {
        DurationEstimate::days(cross_category_days(source.category, target.category))
    } else {
        DurationEstimate::days(same_category_days(source.ordinal.abs_diff(target.ordinal)))
    }
}
