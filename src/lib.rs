//! # morphos-core
//!
//! Entity taxonomy, pairwise compatibility, force-driven transformation and
//! bounded path search over a fixed catalog of 72 Entity Types, 72 Forces and
//! 72 Work Items.
//!
//! ---
//!
//! ## Deterministic tables, not a simulation
//!
//! Every result here is a pure function of an immutable [`Registry`] and the
//! explicit arguments. There is no hidden randomness: text selection hashes
//! the unordered id pair with FNV-1a, and transformation probabilities are
//! integer arithmetic over static tables. A caller that wants an actual
//! outcome rolls its own dice and hands the roll to
//! [`TransformationResult::outcome_for_roll`].
//!
//! ## The pipeline
//!
//! ```text
//!                  Registry (catalog + tables)
//!        ┌──────────────┬──────┴───────┬───────────────┐
//!  Compatibility   Transformation   Resonance         │
//!   (A × B)         (A × F)        (A × F × W)        │
//!                       │                             │
//!                   PathFinder  ── BFS over transform edges
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`taxonomy`] | [`Category`], [`Domain`], [`ActionKind`], [`EntityType`], [`Force`], [`WorkItem`] | Closed enums and the three record types |
//! | [`registry`] | [`Registry`], [`RegistryBuilder`], [`ForceEffect`] | Id-indexed catalogs plus evolution, cross-path, effect and synergy tables |
//! | [`compatibility`] | [`CompatibilityEngine`], [`InteractionResult`], [`Classification`] | Pairwise coefficient in [−1, 1] and its bin |
//! | [`transform`] | [`TransformationEngine`], [`TransformationResult`] | Primary target, alternatives, side effects, cost and duration |
//! | [`path`] | [`PathFinder`], [`Path`], [`SearchConfig`] | Beam-bounded BFS for high-probability force sequences |
//! | [`resonance`] | [`ResonanceScorer`], [`ResonanceScore`] | Entity × Force × Work fitness in [0, 100] |
//! | [`morphos`] | [`Morphos`] | One handle over all of the above |
//! | [`stable`] | [`stable_index`] | FNV-1a hashing for reproducible choices |
//!
//! ## Quick start
//!
//! ```
//! use morphos_core::Morphos;
//!
//! let m = Morphos::new();
//! let t = m.transform("L21", "F51").unwrap();
//! assert!(t.primary_probability >= 55);
//!
//! let paths = m.find_paths("T01", "T03", 3).unwrap();
//! assert_eq!(paths[0].entities, ["T01", "T02", "T03"]);
//! ```
//!
//! ## Features
//!
//! - `serde` derives `Serialize`/`Deserialize` on every public record and result.
//! - `python-ffi` builds PyO3 bindings (see `ffi`).
//!
//! ## License
//!
//! Business Source License 1.1. Free for evaluation and non-production use.
//! Change date: 23 February 2032 — Apache License 2.0.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod compatibility;
pub mod error;
pub mod morphos;
pub mod path;
pub mod registry;
pub mod resonance;
pub mod stable;
pub mod taxonomy;
pub mod transform;

mod catalog;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use compatibility::{Classification, CompatibilityEngine, InteractionComponents, InteractionResult};
pub use error::{CatalogKind, Error, Result};
pub use morphos::Morphos;
pub use path::{Path, PathFinder, SearchConfig, MAX_PATHS, MAX_SEARCH_DEPTH};
pub use registry::{
    CrossPath, EntityFilter, ForceEffect, ForceFilter, Registry, RegistryBuilder, SynergyRule, WorkFilter,
};
pub use resonance::{ForceRecommendation, ResonanceScore, ResonanceScorer};
pub use stable::{stable_hash, stable_index};
pub use taxonomy::{
    ActionKind, Attribute, AttributeVector, Category, Difficulty, Domain, DomainSet, DurationBand,
    DurationEstimate, EntityType, Force, Polarity, Rarity, WorkItem, WorkPattern,
};
pub use transform::{AlternativeResult, SideEffect, TransformationEngine, TransformationResult};
