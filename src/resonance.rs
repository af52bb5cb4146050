/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Three-axis fitness of an (Entity, Force, Work) triple.
//!
//! | Axis | Full credit | Partial | Floor |
//! |------|-------------|---------|-------|
//! | entity × force | 40: dominant domain and aligned action | 30 domain / 25 action / 20 affinity | 15 |
//! | force × work | 30: same domain | 20 action–pattern pairing / 15 input domain | 10 |
//! | entity × work | 30: work domain in category affinity | — | 10 |
//!
//! The sum is adjusted by `−(difficulty − 3) × 5` and clamped to [0, 100].

use crate::error::Result;
use crate::registry::Registry;
use crate::taxonomy::{ActionKind, EntityType, Force, WorkItem, WorkPattern};

const MAX_SCORE: i32 = 100;
const DIFFICULTY_PIVOT: i32 = 3;
const DIFFICULTY_STEP: i32 = 5;

/// Action kinds that naturally drive a work pattern.
const PAIRINGS: &[(ActionKind, WorkPattern)] = &[
    (ActionKind::Inject, WorkPattern::Create),
    (ActionKind::Inject, WorkPattern::Recover),
    (ActionKind::Amplify, WorkPattern::Develop),
    (ActionKind::Accelerate, WorkPattern::Build),
    (ActionKind::Decelerate, WorkPattern::Maintain),
    (ActionKind::Lock, WorkPattern::Protect),
    (ActionKind::Upgrade, WorkPattern::Optimize),
    (ActionKind::Merge, WorkPattern::Connect),
    (ActionKind::Split, WorkPattern::Distribute),
    (ActionKind::Redirect, WorkPattern::Transform),
    (ActionKind::Drain, WorkPattern::Acquire),
];

/// Per-axis breakdown of a resonance score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResonanceScore {
    /// Entity × force, 15–40.
    pub entity_force: u8,
    /// Force × work, 10–30.
    pub force_work: u8,
    /// Entity × work, 10 or 30.
    pub entity_work: u8,
    /// `−(difficulty − 3) × 5`.
    pub difficulty_adjustment: i8,
    /// Clamped total, 0–100.
    pub total: u8,
}

/// One entry of [`ResonanceScorer::recommend_forces`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceRecommendation {
    /// Force id.
    pub force: String,
    /// Its score for the requested entity and work item.
    pub score: ResonanceScore,
}

fn entity_force(entity: &EntityType, force: &Force) -> u8 {
    let dominant = entity.dominant_domain() == force.domain;
    let aligned = entity.category.aligned_actions().contains(&force.action);
    match (dominant, aligned) {
        (true, true) => 40,
        (true, false) => 30,
        (false, true) => 25,
        (false, false) if entity.category.affinity().contains(force.domain) => 20,
        (false, false) => 15,
    }
}

fn force_work(force: &Force, work: &WorkItem) -> u8 {
    if force.domain == work.domain {
        30
    } else if PAIRINGS.contains(&(force.action, work.pattern)) {
        20
    } else if work.input_domains.contains(force.domain) {
        15
    } else {
        10
    }
}

fn entity_work(entity: &EntityType, work: &WorkItem) -> u8 {
    if entity.category.affinity().contains(work.domain) {
        30
    } else {
        10
    }
}

/// Score a resolved triple.
pub fn breakdown(entity: &EntityType, force: &Force, work: &WorkItem) -> ResonanceScore {
    let ef = entity_force(entity, force);
    let fw = force_work(force, work);
    let ew = entity_work(entity, work);
    let adjustment = -(i32::from(work.difficulty) - DIFFICULTY_PIVOT) * DIFFICULTY_STEP;
    let total = (i32::from(ef) + i32::from(fw) + i32::from(ew) + adjustment).clamp(0, MAX_SCORE);
    ResonanceScore {
        entity_force: ef,
        force_work: fw,
        entity_work: ew,
        difficulty_adjustment: adjustment as i8,
        total: total as u8,
    }
}

/// Resonance over a borrowed [`Registry`].
#[derive(Clone, Copy, Debug)]
pub struct ResonanceScorer<'r> {
    registry: &'r Registry,
}

impl<'r> ResonanceScorer<'r> {
    /// Scorer reading from `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Total in [0, 100].
    pub fn score(&self, entity_id: &str, force_id: &str, work_id: &str) -> Result<u8> {
        Ok(self.score_breakdown(entity_id, force_id, work_id)?.total)
    }

    /// All three axes plus the difficulty adjustment.
    pub fn score_breakdown(&self, entity_id: &str, force_id: &str, work_id: &str) -> Result<ResonanceScore> {
        let entity = self.registry.entity(entity_id)?;
        let force = self.registry.force(force_id)?;
        let work = self.registry.work_item(work_id)?;
        Ok(breakdown(entity, force, work))
    }

    /// Every force ranked by total for this entity and work item, best first.
    /// Ties keep catalog order. `limit` of 0 returns all 72.
    pub fn recommend_forces(&self, entity_id: &str, work_id: &str, limit: usize) -> Result<Vec<ForceRecommendation>> {
        let entity = self.registry.entity(entity_id)?;
        let work = self.registry.work_item(work_id)?;
        let mut ranked: Vec<ForceRecommendation> = self
            .registry
            .forces()
            .iter()
            .map(|force| ForceRecommendation {
                force: force.id.clone(),
                score: breakdown(entity, force, work),
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total.cmp(&a.score.total));
        if limit > 0 {
            ranked.truncate(limit);
        }
        Ok(ranked)
    }
}
