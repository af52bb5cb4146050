/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Bounded best-effort search for force sequences between two entities.
//!
//! The graph is implicit: from any entity, each of the 72 forces yields an
//! edge to its primary target and one to every cross-category alternative.
//! The search runs level by level (breadth first) and keeps three explicit
//! bounds:
//!
//! | Bound | Where | Default |
//! |-------|-------|---------|
//! | depth | `max_steps` argument, `1..=MAX_SEARCH_DEPTH` | caller |
//! | frontier per depth | [`SearchConfig::beam_width`] | 512 |
//! | results | [`SearchConfig::max_results`], capped at [`MAX_PATHS`] | 5 |
//!
//! Branches whose cumulative probability drops below
//! [`SearchConfig::min_probability`] percent are cut. Paths are simple (no
//! entity appears twice), so the source-equals-target query has no answer.
//!
//! Every force contributes its own edges, so two routes through the same
//! entities under different forces are distinct paths. A force whose
//! alternative lands on its own primary target keeps the more likely edge.

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::taxonomy::DurationEstimate;
use crate::transform::TransformationEngine;

/// Hard cap on returned paths.
pub const MAX_PATHS: usize = 5;

/// Largest accepted `max_steps`.
pub const MAX_SEARCH_DEPTH: usize = 8;

const DAYS_PER_FIRST_STEP: u32 = 7;

/// Search tuning. Plain data with public fields; [`Default`] gives the
/// standard bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Paths to return. Values above [`MAX_PATHS`] are clamped.
    pub max_results: usize,
    /// Minimum cumulative probability, in percent, for a branch to survive.
    pub min_probability: f64,
    /// States retained per depth, most probable first. Must be non-zero.
    pub beam_width: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_PATHS,
            min_probability: 5.0,
            beam_width: 512,
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(Error::invalid("beam_width must be at least 1"));
        }
        if !self.min_probability.is_finite() || !(0.0..=100.0).contains(&self.min_probability) {
            return Err(Error::invalid(format!(
                "min_probability must be within 0..=100, got {}",
                self.min_probability
            )));
        }
        Ok(())
    }

    fn result_limit(&self) -> usize {
        self.max_results.min(MAX_PATHS)
    }
}

/// A route from source to target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Entity ids, source first, target last.
    pub entities: Vec<String>,
    /// Force applied at each step; one fewer than `entities`.
    pub forces: Vec<String>,
    /// Chance of each step in percent.
    pub step_probabilities: Vec<u8>,
    /// Product of the step chances, in percent.
    pub total_probability: f64,
    /// Aggregate estimate from the step count.
    pub duration: DurationEstimate,
}

impl Path {
    /// Number of forces applied.
    pub fn steps(&self) -> usize {
        self.forces.len()
    }
}

/// Aggregate duration for a path of `steps` transitions: immediate for none,
/// a week for one, doubling with every further step.
pub fn path_duration(steps: usize) -> DurationEstimate {
    match steps {
        0 => DurationEstimate::days(0),
        n => {
            let doublings = u32::try_from(n - 1).unwrap_or(u32::MAX).min(24);
            DurationEstimate::days(DAYS_PER_FIRST_STEP << doublings)
        }
    }
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
struct Edge {
    target: usize,
    force: usize,
    probability: u8,
}

#[derive(Clone, Debug)]
struct State {
    entities: Vec<usize>,
    forces: Vec<usize>,
    steps: Vec<u8>,
    probability: f64,
}

impl State {
    fn current(&self) -> usize {
        // Never empty: every state starts from the source.
        self.entities[self.entities.len() - 1]
    }
}

/// Path search over a borrowed [`Registry`].
#[derive(Clone, Copy, Debug)]
pub struct PathFinder<'r> {
    registry: &'r Registry,
    config: SearchConfig,
}

impl<'r> PathFinder<'r> {
    /// Finder with [`SearchConfig::default`].
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_config(registry, SearchConfig::default())
    }

    /// Finder with explicit bounds.
    pub fn with_config(registry: &'r Registry, config: SearchConfig) -> Self {
        Self { registry, config }
    }

    /// Active bounds.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Up to [`MAX_PATHS`] routes from `source_id` to `target_id` using at most
    /// `max_steps` forces, most probable first (fewer steps on ties).
    ///
    /// An empty list means unreachable within the budget; it is not an error.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] for an unknown source or target id.
    /// - [`Error::InvalidArgument`] when `max_steps` is 0 or above
    ///   [`MAX_SEARCH_DEPTH`], or when the [`SearchConfig`] is out of range.
    ///   Unknown ids are reported first.
    #[tracing::instrument(level = "debug", skip(self), fields(beam = self.config.beam_width))]
    pub fn find_paths(&self, source_id: &str, target_id: &str, max_steps: usize) -> Result<Vec<Path>> {
        let source = self.registry.entity_idx(source_id)?;
        let target = self.registry.entity_idx(target_id)?;
        if max_steps == 0 || max_steps > MAX_SEARCH_DEPTH {
            return Err(Error::invalid(format!(
                "max_steps must be within 1..={MAX_SEARCH_DEPTH}, got {max_steps}"
            )));
        }
        self.config.validate()?;

        let limit = self.config.result_limit();
        if source == target || limit == 0 {
            return Ok(Vec::new());
        }

        let engine = TransformationEngine::new(self.registry);
        let mut edges: HashMap<usize, Vec<Edge>> = HashMap::new();
        let mut completed: Vec<State> = Vec::new();
        let mut expanded = 0usize;

        let mut frontier = vec![State {
            entities: vec![source],
            forces: Vec::new(),
            steps: Vec::new(),
            probability: 100.0,
        }];

        for depth in 1..=max_steps {
            let mut next = Vec::new();
            for state in &frontier {
                let node = state.current();
                expanded += 1;
                let out = edges.entry(node).or_insert_with(|| self.edges_from(&engine, node));
                for edge in out.iter() {
                    if state.entities.contains(&edge.target) {
                        continue;
                    }
                    let probability = state.probability * f64::from(edge.probability) / 100.0;
                    if probability < self.config.min_probability {
                        continue;
                    }
                    let mut child = state.clone();
                    child.entities.push(edge.target);
                    child.forces.push(edge.force);
                    child.steps.push(edge.probability);
                    child.probability = probability;
                    if edge.target == target {
                        completed.push(child);
                    } else if depth < max_steps {
                        next.push(child);
                    }
                }
            }

            next.sort_by(|a, b| b.probability.total_cmp(&a.probability));
            next.truncate(self.config.beam_width);

            // Extending a state can only lower its probability, so once the
            // best open state cannot beat the worst kept result we are done.
            completed.sort_by(|a, b| b.probability.total_cmp(&a.probability));
            completed.truncate(limit);
            let settled = completed.len() == limit
                && next.first().map_or(true, |best| {
                    completed.last().map_or(false, |worst| best.probability <= worst.probability)
                });
            frontier = next;
            if settled || frontier.is_empty() {
                break;
            }
        }

        // Stable sorts keep discovery order; depth order above already puts
        // shorter paths first among equal probabilities.
        completed.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        completed.truncate(limit);
        let paths: Vec<Path> = completed.into_iter().map(|s| self.to_path(s)).collect();

        tracing::debug!(
            source = source_id,
            target = target_id,
            max_steps,
            expanded,
            found = paths.len(),
            "path search finished"
        );
        Ok(paths)
    }

    /// Outgoing edges of `node` in force order, one per (force, target),
    /// identity excluded.
    fn edges_from(&self, engine: &TransformationEngine<'_>, node: usize) -> Vec<Edge> {
        let mut out: Vec<Edge> = Vec::new();
        for (force_idx, force) in self.registry.forces().iter().enumerate() {
            let first = out.len();
            let primary = engine.primary(node, force);
            let alternatives = engine.alternatives(node, force).map(|(target, probability, _)| (target, probability));
            let candidates = core::iter::once((primary.target, primary.probability)).chain(alternatives);
            for (target, probability) in candidates {
                if target == node {
                    continue;
                }
                match out[first..].iter_mut().find(|e| e.target == target) {
                    Some(existing) if probability > existing.probability => existing.probability = probability,
                    Some(_) => {}
                    None => out.push(Edge { target, force: force_idx, probability }),
                }
            }
        }
        out
    }

    fn to_path(&self, state: State) -> Path {
        let forces = self.registry.forces();
        Path {
            entities: state.entities.iter().map(|&i| self.registry.entity_at(i).id.clone()).collect(),
            forces: state.forces.iter().map(|&i| forces[i].id.clone()).collect(),
            duration: path_duration(state.forces.len()),
            step_probabilities: state.steps,
            total_probability: state.probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_path_duration_doubles_per_step() {
        assert_eq!(path_duration(0), DurationEstimate::days(0));
        assert_eq!(path_duration(1), DurationEstimate::days(7));
        assert_eq!(path_duration(2), DurationEstimate::days(14));
        assert_eq!(path_duration(4), DurationEstimate::days(56));
    }

    #[test]
    fn test_single_step_keeps_one_edge_per_force() {
        let r = Registry::builtin();
        let paths = PathFinder::new(&r).find_paths("T01", "T02", 1).unwrap();
        // Physical inject, amplify and upgrade reach T02 at 80, then the
        // off-domain promoting forces at 30, in force order.
        let forces: Vec<&str> = paths.iter().map(|p| p.forces[0].as_str()).collect();
        assert_eq!(forces, ["F01", "F03", "F09", "F37", "F39"]);
        let steps: Vec<u8> = paths.iter().map(|p| p.step_probabilities[0]).collect();
        assert_eq!(steps, [80, 80, 80, 30, 30]);
        for p in &paths {
            assert_eq!(p.entities, vec!["T01", "T02"]);
            assert_eq!(p.duration, DurationEstimate::days(7));
        }
        assert!((paths[0].total_probability - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_step_chain_multiplies_probabilities() {
        let r = Registry::builtin();
        let paths = PathFinder::new(&r).find_paths("T01", "T03", 2).unwrap();
        assert_eq!(paths.len(), MAX_PATHS);
        assert_eq!(paths[0].entities, vec!["T01", "T02", "T03"]);
        assert_eq!(paths[0].forces, vec!["F01", "F01"]);
        assert_eq!(paths[1].forces, vec!["F01", "F03"]);
        assert!((paths[0].total_probability - 64.0).abs() < 1e-9);
        assert_eq!(paths[0].duration, DurationEstimate::days(14));
    }

    #[test]
    fn test_min_probability_prunes_branches() {
        let r = Registry::builtin();
        let config = SearchConfig { min_probability: 70.0, ..SearchConfig::default() };
        let paths = PathFinder::with_config(&r, config).find_paths("T01", "T03", 2).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_source_equals_target_is_empty() {
        let r = Registry::builtin();
        assert!(PathFinder::new(&r).find_paths("L05", "L05", 3).unwrap().is_empty());
    }

    #[test]
    fn test_unreachable_within_budget_is_empty() {
        let r = Registry::builtin();
        assert!(PathFinder::new(&r).find_paths("T01", "V24", 1).unwrap().is_empty());
    }

    #[test]
    fn test_depth_bounds_are_invalid_arguments() {
        let r = Registry::builtin();
        let finder = PathFinder::new(&r);
        assert!(matches!(finder.find_paths("T01", "T02", 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            finder.find_paths("T01", "T02", MAX_SEARCH_DEPTH + 1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let r = Registry::builtin();
        let finder = PathFinder::new(&r);
        assert!(finder.find_paths("T99", "T02", 2).unwrap_err().is_not_found());
        assert!(finder.find_paths("T01", "X", 2).unwrap_err().is_not_found());
    }

    #[test]
    fn test_zero_beam_is_rejected() {
        let r = Registry::builtin();
        let config = SearchConfig { beam_width: 0, ..SearchConfig::default() };
        let err = PathFinder::with_config(&r, config).find_paths("T01", "T02", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_results_are_capped_and_sorted() {
        let r = Registry::builtin();
        let config = SearchConfig { max_results: 50, ..SearchConfig::default() };
        let paths = PathFinder::with_config(&r, config).find_paths("T01", "T08", 5).unwrap();
        assert!(!paths.is_empty());
        assert!(paths.len() <= MAX_PATHS);
        for pair in paths.windows(2) {
            assert!(pair[0].total_probability >= pair[1].total_probability);
        }
    }

    #[test]
    fn test_narrow_beam_drops_weaker_prefixes() {
        let r = Registry::builtin();
        let wide = PathFinder::new(&r).find_paths("T01", "T08", 5).unwrap();
        let config = SearchConfig { beam_width: 1, ..SearchConfig::default() };
        let narrow = PathFinder::with_config(&r, config).find_paths("T01", "T08", 5).unwrap();

        // The best route survives any beam.
        assert_eq!(narrow[0], wide[0]);
        // A wide beam still holds the F01, F01, F03 prefix at depth three.
        assert_eq!(wide[3].forces, vec!["F01", "F01", "F03", "F01"]);
        assert!((wide[3].total_probability - 35.84).abs() < 1e-9);
        // A beam of one follows F01 only and falls back to a weaker last step.
        assert_eq!(narrow[3].forces, vec!["F01", "F01", "F01", "F13"]);
        assert!((narrow[3].total_probability - 28.16).abs() < 1e-9);
        assert_ne!(narrow, wide);
    }

    #[test]
    fn test_max_results_limits_output() {
        let r = Registry::builtin();
        let config = SearchConfig { max_results: 2, ..SearchConfig::default() };
        let paths = PathFinder::with_config(&r, config).find_paths("T01", "T08", 5).unwrap();
        assert!(paths.len() <= 2);
    }
}
