/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! One handle over the registry and all four engines.
//!
//! [`Morphos`] owns a [`Registry`] and a [`SearchConfig`] and exposes the
//! external call surface: interaction, transformation, path search,
//! resonance and catalog listing. It holds no mutable state, so a single
//! instance can be shared across threads by reference.

use crate::compatibility::{CompatibilityEngine, InteractionResult};
use crate::error::Result;
use crate::path::{Path, PathFinder, SearchConfig};
use crate::registry::{EntityFilter, ForceFilter, Registry, WorkFilter};
use crate::resonance::{ForceRecommendation, ResonanceScore, ResonanceScorer};
use crate::taxonomy::{EntityType, Force, WorkItem};
use crate::transform::{TransformationEngine, TransformationResult};

/// Registry plus search bounds.
#[derive(Clone, Debug)]
pub struct Morphos {
    registry: Registry,
    search: SearchConfig,
}

impl Default for Morphos {
    fn default() -> Self {
        Self::new()
    }
}

impl Morphos {
    /// Built-in catalog with default search bounds.
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin(), SearchConfig::default())
    }

    /// Custom registry (e.g. a test fixture) and search bounds.
    pub fn with_registry(registry: Registry, search: SearchConfig) -> Self {
        Self { registry, search }
    }

    /// The underlying catalog.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Bounds used by [`Morphos::find_paths`].
    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Compatibility of two entities.
    pub fn interact(&self, a: &str, b: &str) -> Result<InteractionResult> {
        CompatibilityEngine::new(&self.registry).interact(a, b)
    }

    /// Result of applying `force_id` to `entity_id`.
    pub fn transform(&self, entity_id: &str, force_id: &str) -> Result<TransformationResult> {
        TransformationEngine::new(&self.registry).transform(entity_id, force_id)
    }

    /// Most probable force sequences from `source_id` to `target_id`.
    ///
    /// `max_steps` must lie within `1..=`[`MAX_SEARCH_DEPTH`](crate::MAX_SEARCH_DEPTH).
    pub fn find_paths(&self, source_id: &str, target_id: &str, max_steps: usize) -> Result<Vec<Path>> {
        PathFinder::with_config(&self.registry, self.search).find_paths(source_id, target_id, max_steps)
    }

    /// Resonance total in [0, 100].
    pub fn score(&self, entity_id: &str, force_id: &str, work_id: &str) -> Result<u8> {
        ResonanceScorer::new(&self.registry).score(entity_id, force_id, work_id)
    }

    /// Resonance with every axis broken out.
    pub fn score_breakdown(&self, entity_id: &str, force_id: &str, work_id: &str) -> Result<ResonanceScore> {
        ResonanceScorer::new(&self.registry).score_breakdown(entity_id, force_id, work_id)
    }

    /// Forces ranked for an entity working on a work item. `limit` 0 means all.
    pub fn recommend_forces(&self, entity_id: &str, work_id: &str, limit: usize) -> Result<Vec<ForceRecommendation>> {
        ResonanceScorer::new(&self.registry).recommend_forces(entity_id, work_id, limit)
    }

    /// Other entities ranked by interaction coefficient. `limit` 0 means all.
    pub fn rank_partners(&self, entity_id: &str, limit: usize) -> Result<Vec<InteractionResult>> {
        CompatibilityEngine::new(&self.registry).rank_partners(entity_id, limit)
    }

    /// Entities in catalog order, optionally filtered.
    pub fn list_entities(&self, filter: Option<&EntityFilter>) -> Vec<&EntityType> {
        match filter {
            Some(f) => self.registry.entities_where(|e| f.matches(e)),
            None => self.registry.entities().iter().collect(),
        }
    }

    /// Forces in catalog order, optionally filtered.
    pub fn list_forces(&self, filter: Option<&ForceFilter>) -> Vec<&Force> {
        match filter {
            Some(f) => self.registry.forces_where(|x| f.matches(x)),
            None => self.registry.forces().iter().collect(),
        }
    }

    /// Work items in catalog order, optionally filtered.
    pub fn list_work_items(&self, filter: Option<&WorkFilter>) -> Vec<&WorkItem> {
        match filter {
            Some(f) => self.registry.work_items_where(|w| f.matches(w)),
            None => self.registry.work_items().iter().collect(),
        }
    }
}
