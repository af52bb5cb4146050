//! Python FFI bindings via PyO3.
//!
//! Exposes the [`Morphos`] facade with results flattened to plain Python
//! values (strings, ints, floats, tuples). Enums surface as their display
//! labels. Unknown ids raise `KeyError`; out-of-range arguments raise
//! `ValueError`.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from morphos_core import Morphos
//!
//! m = Morphos()
//! t = m.transform("L21", "F51")
//! print(t.primary_target, t.primary_probability)   # L22 80
//! for p in m.find_paths("T01", "T08", 5):
//!     print(p.entities, round(p.total_probability, 1))
//! print(m.score("T01", "F01", "W01"))              # 100
//! ```

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::compatibility::InteractionResult;
use crate::error::Error;
use crate::morphos::Morphos;
use crate::path::Path;
use crate::transform::TransformationResult;

fn to_py_err(e: Error) -> PyErr {
    match e {
        Error::NotFound { .. } => PyKeyError::new_err(e.to_string()),
        Error::InvalidArgument(_) => PyValueError::new_err(e.to_string()),
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Pairwise compatibility of two entities.
#[pyclass(name = "Interaction", get_all, frozen)]
#[derive(Clone)]
pub struct PyInteraction {
    /// First entity id.
    pub entity_a: String,
    /// Second entity id.
    pub entity_b: String,
    /// Coefficient in [-1, 1].
    pub coefficient: f64,
    /// Classification label, e.g. "resonance".
    pub classification: String,
    /// Likely outcome.
    pub outcome_text: String,
    /// Suggested action.
    pub action_text: String,
}

impl From<InteractionResult> for PyInteraction {
    fn from(r: InteractionResult) -> Self {
        Self {
            entity_a: r.entity_a,
            entity_b: r.entity_b,
            coefficient: r.coefficient,
            classification: r.classification.label().to_owned(),
            outcome_text: r.outcome_text,
            action_text: r.action_text,
        }
    }
}

#[pymethods]
impl PyInteraction {
    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "Interaction({}, {}, coefficient={:.2}, {})",
            self.entity_a, self.entity_b, self.coefficient, self.classification
        )
    }
}

/// Result of applying a force to an entity.
#[pyclass(name = "Transformation", get_all, frozen)]
#[derive(Clone)]
pub struct PyTransformation {
    /// Source entity id.
    pub source: String,
    /// Force id.
    pub force: String,
    /// Most likely resulting entity id.
    pub primary_target: String,
    /// Chance of the primary result, percent.
    pub primary_probability: u8,
    /// `(target, probability, condition)` per cross-category alternative.
    pub alternatives: Vec<(String, u8, String)>,
    /// `(domain, magnitude)` per side effect.
    pub side_effects: Vec<(String, i8)>,
    /// Difficulty label.
    pub difficulty: String,
    /// Estimated duration in days.
    pub duration_days: u32,
    /// Resource multiplier.
    pub cost_multiplier: f64,
    /// Whether the change can be undone.
    pub reversible: bool,
}

impl From<TransformationResult> for PyTransformation {
    fn from(r: TransformationResult) -> Self {
        Self {
            alternatives: r
                .alternatives
                .into_iter()
                .map(|a| (a.target, a.probability, a.condition))
                .collect(),
            side_effects: r.side_effects.iter().map(|s| (s.domain.to_string(), s.magnitude)).collect(),
            difficulty: format!("{:?}", r.difficulty),
            duration_days: r.duration.days,
            cost_multiplier: r.cost_multiplier,
            reversible: r.reversible,
            source: r.source,
            force: r.force,
            primary_target: r.primary_target,
            primary_probability: r.primary_probability,
        }
    }
}

#[pymethods]
impl PyTransformation {
    /// Resolve a roll in 0..100 to the resulting entity id.
    pub fn outcome_for_roll(&self, roll: u8) -> String {
        let roll = u16::from(roll.min(99));
        let mut upper = u16::from(self.primary_probability);
        if roll < upper {
            return self.primary_target.clone();
        }
        for (target, probability, _) in &self.alternatives {
            upper += u16::from(*probability);
            if roll < upper {
                return target.clone();
            }
        }
        self.source.clone()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "Transformation({} --{}--> {} @ {}%)",
            self.source, self.force, self.primary_target, self.primary_probability
        )
    }
}

/// A route between two entities.
#[pyclass(name = "Path", get_all, frozen)]
#[derive(Clone)]
pub struct PyPath {
    /// Entity ids, source first.
    pub entities: Vec<String>,
    /// Force ids, one per step.
    pub forces: Vec<String>,
    /// Per-step chance, percent.
    pub step_probabilities: Vec<u8>,
    /// Product of step chances, percent.
    pub total_probability: f64,
    /// Aggregate duration in days.
    pub duration_days: u32,
}

impl From<Path> for PyPath {
    fn from(p: Path) -> Self {
        Self {
            duration_days: p.duration.days,
            entities: p.entities,
            forces: p.forces,
            step_probabilities: p.step_probabilities,
            total_probability: p.total_probability,
        }
    }
}

#[pymethods]
impl PyPath {
    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Path({} @ {:.2}%)", self.entities.join(" -> "), self.total_probability)
    }
}

// ── Morphos ───────────────────────────────────────────────────────────────────

/// Built-in catalog with all four engines.
#[pyclass(name = "Morphos", frozen)]
pub struct PyMorphos {
    inner: Morphos,
}

#[pymethods]
impl PyMorphos {
    /// Construct over the built-in catalog with default search bounds.
    #[new]
    pub fn new() -> Self {
        Self { inner: Morphos::new() }
    }

    /// Compatibility of two entity ids.
    pub fn interact(&self, a: &str, b: &str) -> PyResult<PyInteraction> {
        self.inner.interact(a, b).map(Into::into).map_err(to_py_err)
    }

    /// Apply a force to an entity.
    pub fn transform(&self, entity_id: &str, force_id: &str) -> PyResult<PyTransformation> {
        self.inner.transform(entity_id, force_id).map(Into::into).map_err(to_py_err)
    }

    /// Most probable force sequences between two entities.
    #[pyo3(signature = (source_id, target_id, max_steps=3))]
    pub fn find_paths(&self, source_id: &str, target_id: &str, max_steps: usize) -> PyResult<Vec<PyPath>> {
        self.inner
            .find_paths(source_id, target_id, max_steps)
            .map(|paths| paths.into_iter().map(Into::into).collect())
            .map_err(to_py_err)
    }

    /// Resonance of an (entity, force, work item) triple, 0–100.
    pub fn score(&self, entity_id: &str, force_id: &str, work_id: &str) -> PyResult<u8> {
        self.inner.score(entity_id, force_id, work_id).map_err(to_py_err)
    }

    /// `(force id, score)` pairs ranked best first. `limit` 0 returns all.
    #[pyo3(signature = (entity_id, work_id, limit=5))]
    pub fn recommend_forces(&self, entity_id: &str, work_id: &str, limit: usize) -> PyResult<Vec<(String, u8)>> {
        self.inner
            .recommend_forces(entity_id, work_id, limit)
            .map(|recs| recs.into_iter().map(|r| (r.force, r.score.total)).collect())
            .map_err(to_py_err)
    }

    /// `(id, name, category)` for every entity.
    pub fn list_entities(&self) -> Vec<(String, String, String)> {
        self.inner
            .list_entities(None)
            .into_iter()
            .map(|e| (e.id.clone(), e.name.clone(), e.category.to_string()))
            .collect()
    }

    /// `(id, name, domain, action)` for every force.
    pub fn list_forces(&self) -> Vec<(String, String, String, String)> {
        self.inner
            .list_forces(None)
            .into_iter()
            .map(|f| (f.id.clone(), f.name.clone(), f.domain.to_string(), f.action.to_string()))
            .collect()
    }

    /// `(id, name, domain, difficulty)` for every work item.
    pub fn list_work_items(&self) -> Vec<(String, String, String, u8)> {
        self.inner
            .list_work_items(None)
            .into_iter()
            .map(|w| (w.id.clone(), w.name.clone(), w.domain.to_string(), w.difficulty))
            .collect()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> &'static str {
        "Morphos()"
    }
}

/// Python module definition.
#[pymodule]
pub fn morphos_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMorphos>()?;
    m.add_class::<PyInteraction>()?;
    m.add_class::<PyTransformation>()?;
    m.add_class::<PyPath>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("MAX_PATHS", crate::path::MAX_PATHS)?;
    Ok(())
}
