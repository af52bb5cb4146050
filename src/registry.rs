/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Immutable, id-indexed taxonomy registry.
//!
//! A [`Registry`] holds the three catalogs plus every static table the
//! engines read (evolution paths, cross-category paths, force effects,
//! synergy rules, the base compatibility matrix). It is constructed once,
//! either from the built-in catalog via [`Registry::builtin`] or from fixture
//! data via [`RegistryBuilder`], and is never mutated afterwards. Engines
//! borrow it; there is no global state.
//!
//! # Invariants
//!
//! - Every id is unique across all three catalogs.
//! - Every id referenced by a table resolves to a record of the right kind.
//! - An entity lists at most [`MAX_FORWARD`] forward-evolution candidates.
//! - Construction is all-or-nothing: `build()` either returns a complete
//!   registry or an error, never a partially populated one.

use hashbrown::{HashMap, HashSet};

use crate::catalog;
use crate::error::{CatalogKind, Error, Result};
use crate::taxonomy::{
    ActionKind, Category, Domain, EntityType, Force, Rarity, WorkItem, WorkPattern,
};

/// Maximum forward-evolution candidates per entity.
pub const MAX_FORWARD: usize = 3;

const EFFECT_SLOTS: usize = Domain::ALL.len() * ActionKind::ALL.len();

// ─── Static table records ────────────────────────────────────────────────────

/// Row of the force-effect table, keyed by `(Domain, ActionKind)`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceEffect {
    /// Categories that respond well to this force (+15 probability).
    pub promotes: heapless::Vec<Category, 3>,
    /// Categories that resist this force (−20 probability).
    pub inhibits: heapless::Vec<Category, 3>,
    /// Bonus feeding cross-category alternatives. Zero disables them.
    pub category_shift: u8,
}

impl ForceEffect {
    /// `true` if `category` is in the promotes set.
    pub fn promotes(&self, category: Category) -> bool {
        self.promotes.contains(&category)
    }

    /// `true` if `category` is in the inhibits set.
    pub fn inhibits(&self, category: Category) -> bool {
        self.inhibits.contains(&category)
    }
}

/// A recorded route from one category into another, with the condition under
/// which it happens.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossPath {
    /// Target entity id.
    pub target: String,
    /// Human-readable condition.
    pub condition: String,
}

/// Explicit compatibility exception between two sets of entity ids.
///
/// A pair matches when one id is in `left` and the other in `right`, in
/// either order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynergyRule {
    /// Short description.
    pub label: String,
    /// First id set.
    pub left: Vec<String>,
    /// Second id set.
    pub right: Vec<String>,
    /// Synergy score used when the rule matches, in [−1, 1].
    pub bonus: f64,
}

impl SynergyRule {
    /// Build a rule from id slices.
    pub fn new(label: &str, left: &[&str], right: &[&str], bonus: f64) -> Self {
        Self {
            label: label.to_owned(),
            left: left.iter().map(|s| (*s).to_owned()).collect(),
            right: right.iter().map(|s| (*s).to_owned()).collect(),
            bonus,
        }
    }

    /// Does the unordered pair `{a, b}` match this rule?
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let in_left = |id: &str| self.left.iter().any(|x| x == id);
        let in_right = |id: &str| self.right.iter().any(|x| x == id);
        (in_left(a) && in_right(b)) || (in_left(b) && in_right(a))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ResolvedCross {
    pub(crate) target: usize,
    pub(crate) condition: String,
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Optional constraints for listing entities. The default matches everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityFilter {
    /// Keep only this category.
    pub category: Option<Category>,
    /// Keep only entities with this dominant domain.
    pub dominant_domain: Option<Domain>,
}

impl EntityFilter {
    /// Does `entity` satisfy every set constraint?
    pub fn matches(&self, entity: &EntityType) -> bool {
        self.category.map_or(true, |c| entity.category == c)
            && self.dominant_domain.map_or(true, |d| entity.dominant_domain() == d)
    }
}

/// Optional constraints for listing forces. The default matches everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceFilter {
    /// Keep only this domain.
    pub domain: Option<Domain>,
    /// Keep only this action kind.
    pub action: Option<ActionKind>,
    /// Keep only forces costing at most this much.
    pub max_cost: Option<u8>,
    /// Keep only forces at least this rare.
    pub min_rarity: Option<Rarity>,
}

impl ForceFilter {
    /// Does `force` satisfy every set constraint?
    pub fn matches(&self, force: &Force) -> bool {
        self.domain.map_or(true, |d| force.domain == d)
            && self.action.map_or(true, |a| force.action == a)
            && self.max_cost.map_or(true, |c| force.cost <= c)
            && self.min_rarity.map_or(true, |r| force.rarity >= r)
    }
}

/// Optional constraints for listing work items. The default matches everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkFilter {
    /// Keep only this domain.
    pub domain: Option<Domain>,
    /// Keep only this pattern.
    pub pattern: Option<WorkPattern>,
    /// Keep only items at most this difficult.
    pub max_difficulty: Option<u8>,
}

impl WorkFilter {
    /// Does `work` satisfy every set constraint?
    pub fn matches(&self, work: &WorkItem) -> bool {
        self.domain.map_or(true, |d| work.domain == d)
            && self.pattern.map_or(true, |p| work.pattern == p)
            && self.max_difficulty.map_or(true, |m| work.difficulty <= m)
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Read-only taxonomy: catalogs, indices and the static tables the engines use.
#[derive(Clone, Debug)]
pub struct Registry {
    entities: Vec<EntityType>,
    forces: Vec<Force>,
    work_items: Vec<WorkItem>,
    entity_index: HashMap<String, usize>,
    force_index: HashMap<String, usize>,
    work_index: HashMap<String, usize>,
    forward: Vec<heapless::Vec<usize, MAX_FORWARD>>,
    reverse: Vec<Option<usize>>,
    cross: Vec<Vec<ResolvedCross>>,
    effects: Vec<ForceEffect>,
    synergy: Vec<SynergyRule>,
    base_matrix: [[f64; 3]; 3],
}

impl Registry {
    /// The built-in 72 × 3 catalog.
    ///
    /// # Panics
    ///
    /// Only if the compiled-in static tables are inconsistent, which the
    /// crate's own tests rule out. The registry is populated atomically or
    /// not at all.
    pub fn builtin() -> Self {
        match catalog::builtin().build() {
            Ok(registry) => registry,
            Err(e) => panic!("built-in catalog is inconsistent: {e}"),
        }
    }

    /// Start a fixture registry. Force effects and the base matrix start out
    /// with the built-in values; catalogs start empty.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    // ── id lookups ───────────────────────────────────────────────────────────

    /// Entity Type by id.
    pub fn entity(&self, id: &str) -> Result<&EntityType> {
        self.entity_idx(id).map(|i| &self.entities[i])
    }

    /// Force by id.
    pub fn force(&self, id: &str) -> Result<&Force> {
        self.force_idx(id).map(|i| &self.forces[i])
    }

    /// Work Item by id.
    pub fn work_item(&self, id: &str) -> Result<&WorkItem> {
        self.work_index
            .get(id)
            .map(|&i| &self.work_items[i])
            .ok_or_else(|| Error::not_found(CatalogKind::WorkItem, id))
    }

    // ── listings ─────────────────────────────────────────────────────────────

    /// Every entity in catalog order.
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    /// Every force in catalog order.
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    /// Every work item in catalog order.
    pub fn work_items(&self) -> &[WorkItem] {
        &self.work_items
    }

    /// Entities of one category.
    pub fn entities_in(&self, category: Category) -> impl Iterator<Item = &EntityType> {
        self.entities.iter().filter(move |e| e.category == category)
    }

    /// Forces of one domain.
    pub fn forces_in(&self, domain: Domain) -> impl Iterator<Item = &Force> {
        self.forces.iter().filter(move |f| f.domain == domain)
    }

    /// Work items of one domain.
    pub fn work_items_in(&self, domain: Domain) -> impl Iterator<Item = &WorkItem> {
        self.work_items.iter().filter(move |w| w.domain == domain)
    }

    /// Entities satisfying an arbitrary predicate.
    pub fn entities_where<P>(&self, predicate: P) -> Vec<&EntityType>
    where
        P: Fn(&EntityType) -> bool,
    {
        self.entities.iter().filter(|e| predicate(e)).collect()
    }

    /// Forces satisfying an arbitrary predicate.
    pub fn forces_where<P>(&self, predicate: P) -> Vec<&Force>
    where
        P: Fn(&Force) -> bool,
    {
        self.forces.iter().filter(|f| predicate(f)).collect()
    }

    /// Work items satisfying an arbitrary predicate.
    pub fn work_items_where<P>(&self, predicate: P) -> Vec<&WorkItem>
    where
        P: Fn(&WorkItem) -> bool,
    {
        self.work_items.iter().filter(|w| predicate(w)).collect()
    }

    // ── static tables ────────────────────────────────────────────────────────

    /// Forward-evolution candidates of an entity, in table order.
    pub fn forward_candidates(&self, id: &str) -> Result<Vec<&EntityType>> {
        let i = self.entity_idx(id)?;
        Ok(self.forward[i].iter().map(|&t| &self.entities[t]).collect())
    }

    /// First entity (in catalog order) that lists `id` as a forward candidate.
    pub fn predecessor(&self, id: &str) -> Result<Option<&EntityType>> {
        let i = self.entity_idx(id)?;
        Ok(self.reverse[i].map(|p| &self.entities[p]))
    }

    /// Cross-category routes out of an entity, with their conditions.
    pub fn cross_paths(&self, id: &str) -> Result<Vec<(&EntityType, &str)>> {
        let i = self.entity_idx(id)?;
        Ok(self.cross[i]
            .iter()
            .map(|c| (&self.entities[c.target], c.condition.as_str()))
            .collect())
    }

    /// Force-effect row for `(domain, action)`.
    pub fn force_effect(&self, domain: Domain, action: ActionKind) -> &ForceEffect {
        &self.effects[effect_slot(domain, action)]
    }

    /// Ordered synergy exceptions.
    pub fn synergy_rules(&self) -> &[SynergyRule] {
        &self.synergy
    }

    /// Base compatibility of two categories, in [0, 1]. Symmetric.
    pub fn base_compatibility(&self, a: Category, b: Category) -> f64 {
        self.base_matrix[a.index()][b.index()]
    }

    // ── index plumbing for the engines ───────────────────────────────────────

    pub(crate) fn entity_idx(&self, id: &str) -> Result<usize> {
        self.entity_index
            .get(id)
            .copied()
            .ok_or_else(|| Error::not_found(CatalogKind::Entity, id))
    }

    pub(crate) fn force_idx(&self, id: &str) -> Result<usize> {
        self.force_index
            .get(id)
            .copied()
            .ok_or_else(|| Error::not_found(CatalogKind::Force, id))
    }

    pub(crate) fn entity_at(&self, idx: usize) -> &EntityType {
        &self.entities[idx]
    }

    pub(crate) fn forward_of(&self, idx: usize) -> &[usize] {
        &self.forward[idx]
    }

    pub(crate) fn reverse_of(&self, idx: usize) -> Option<usize> {
        self.reverse[idx]
    }

    pub(crate) fn cross_of(&self, idx: usize) -> &[ResolvedCross] {
        &self.cross[idx]
    }
}

fn effect_slot(domain: Domain, action: ActionKind) -> usize {
    domain.index() * ActionKind::ALL.len() + action.index()
}

// ─── RegistryBuilder ─────────────────────────────────────────────────────────

/// Validating builder for a [`Registry`].
///
/// ```rust
/// use morphos_core::registry::Registry;
/// use morphos_core::taxonomy::{Category, EntityType};
///
/// let registry = Registry::builder()
///     .entity(EntityType::new("T01", "Laborer", Category::Talent, 1, [78, 29, 61, 27, 48, 55]))
///     .entity(EntityType::new("T02", "Builder", Category::Talent, 2, [83, 39, 58, 40, 38, 51]))
///     .evolution("T01", &["T02"])
///     .build()
///     .unwrap();
/// assert_eq!(registry.predecessor("T02").unwrap().unwrap().id, "T01");
/// ```
#[derive(Clone, Debug)]
pub struct RegistryBuilder {
    entities: Vec<EntityType>,
    forces: Vec<Force>,
    work_items: Vec<WorkItem>,
    evolution: Vec<(String, Vec<String>)>,
    cross: Vec<(String, CrossPath)>,
    effects: Vec<ForceEffect>,
    synergy: Vec<SynergyRule>,
    base_matrix: [[f64; 3]; 3],
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Empty catalogs with the built-in effect table and base matrix.
    pub fn new() -> Self {
        let mut effects = Vec::with_capacity(EFFECT_SLOTS);
        for domain in Domain::ALL {
            for action in ActionKind::ALL {
                effects.push(catalog::default_force_effect(domain, action));
            }
        }
        Self {
            entities: Vec::new(),
            forces: Vec::new(),
            work_items: Vec::new(),
            evolution: Vec::new(),
            cross: Vec::new(),
            effects,
            synergy: Vec::new(),
            base_matrix: catalog::BASE_MATRIX,
        }
    }

    /// Add an Entity Type.
    pub fn entity(mut self, entity: EntityType) -> Self {
        self.entities.push(entity);
        self
    }

    /// Add a Force.
    pub fn force(mut self, force: Force) -> Self {
        self.forces.push(force);
        self
    }

    /// Add a Work Item.
    pub fn work_item(mut self, work: WorkItem) -> Self {
        self.work_items.push(work);
        self
    }

    /// Append forward-evolution candidates for `source`.
    pub fn evolution(mut self, source: &str, targets: &[&str]) -> Self {
        self.evolution.push((
            source.to_owned(),
            targets.iter().map(|t| (*t).to_owned()).collect(),
        ));
        self
    }

    /// Add a cross-category route.
    pub fn cross_path(mut self, source: &str, target: &str, condition: &str) -> Self {
        self.cross.push((
            source.to_owned(),
            CrossPath { target: target.to_owned(), condition: condition.to_owned() },
        ));
        self
    }

    /// Append a synergy exception. Earlier rules take precedence.
    pub fn synergy(mut self, rule: SynergyRule) -> Self {
        self.synergy.push(rule);
        self
    }

    /// Replace the force-effect row for `(domain, action)`.
    pub fn force_effect(mut self, domain: Domain, action: ActionKind, effect: ForceEffect) -> Self {
        self.effects[effect_slot(domain, action)] = effect;
        self
    }

    /// Set the base compatibility of two categories (both orientations).
    pub fn base_compatibility(mut self, a: Category, b: Category, value: f64) -> Self {
        self.base_matrix[a.index()][b.index()] = value;
        self.base_matrix[b.index()][a.index()] = value;
        self
    }

    /// Validate everything and produce the registry.
    pub fn build(self) -> Result<Registry> {
        {
            let mut seen: HashSet<&str> = HashSet::new();
            for id in self
                .entities
                .iter()
                .map(|e| e.id.as_str())
                .chain(self.forces.iter().map(|f| f.id.as_str()))
                .chain(self.work_items.iter().map(|w| w.id.as_str()))
            {
                if !seen.insert(id) {
                    return Err(Error::invalid(format!("duplicate id '{id}'")));
                }
            }
        }

        let mut force_slots: HashSet<(Domain, ActionKind)> = HashSet::new();
        for f in &self.forces {
            if f.cost > 10 {
                return Err(Error::invalid(format!("force '{}' cost {} exceeds 10", f.id, f.cost)));
            }
            if !force_slots.insert((f.domain, f.action)) {
                return Err(Error::invalid(format!(
                    "second force for ({}, {}): '{}'",
                    f.domain, f.action, f.id
                )));
            }
        }

        let mut work_slots: HashSet<(Domain, WorkPattern)> = HashSet::new();
        for w in &self.work_items {
            if !(1..=5).contains(&w.difficulty) {
                return Err(Error::invalid(format!(
                    "work item '{}' difficulty {} outside 1..=5",
                    w.id, w.difficulty
                )));
            }
            if !work_slots.insert((w.domain, w.pattern)) {
                return Err(Error::invalid(format!(
                    "second work item for ({}, {}): '{}'",
                    w.domain, w.pattern, w.id
                )));
            }
        }

        for row in &self.base_matrix {
            if row.iter().any(|v| !(0.0..=1.0).contains(v)) {
                return Err(Error::invalid("base compatibility values must lie in [0, 1]"));
            }
        }

        let entity_index: HashMap<String, usize> = self
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        let resolve = |id: &str, what: &str| -> Result<usize> {
            entity_index
                .get(id)
                .copied()
                .ok_or_else(|| Error::invalid(format!("{what} references unknown entity '{id}'")))
        };

        let n = self.entities.len();
        let mut forward: Vec<heapless::Vec<usize, MAX_FORWARD>> = vec![heapless::Vec::new(); n];
        for (source, targets) in &self.evolution {
            let s = resolve(source.as_str(), "evolution table")?;
            for t in targets {
                let t = resolve(t.as_str(), "evolution table")?;
                if t == s {
                    return Err(Error::invalid(format!("'{source}' evolves into itself")));
                }
                forward[s].push(t).map_err(|_| {
                    Error::invalid(format!(
                        "'{source}' lists more than {MAX_FORWARD} evolution candidates"
                    ))
                })?;
            }
        }

        let mut reverse: Vec<Option<usize>> = vec![None; n];
        for (s, targets) in forward.iter().enumerate() {
            for &t in targets {
                if reverse[t].is_none() {
                    reverse[t] = Some(s);
                }
            }
        }

        let mut cross: Vec<Vec<ResolvedCross>> = vec![Vec::new(); n];
        for (source, path) in &self.cross {
            let s = resolve(source.as_str(), "cross-category table")?;
            let t = resolve(path.target.as_str(), "cross-category table")?;
            if self.entities[s].category == self.entities[t].category {
                return Err(Error::invalid(format!(
                    "cross path '{source}' -> '{}' stays inside {}",
                    path.target, self.entities[s].category
                )));
            }
            cross[s].push(ResolvedCross { target: t, condition: path.condition.clone() });
        }

        for rule in &self.synergy {
            if !(-1.0..=1.0).contains(&rule.bonus) {
                return Err(Error::invalid(format!(
                    "synergy rule '{}' bonus {} outside [-1, 1]",
                    rule.label, rule.bonus
                )));
            }
            for id in rule.left.iter().chain(rule.right.iter()) {
                resolve(id.as_str(), "synergy rule")?;
            }
        }

        let force_index = self.forces.iter().enumerate().map(|(i, f)| (f.id.clone(), i)).collect();
        let work_index =
            self.work_items.iter().enumerate().map(|(i, w)| (w.id.clone(), i)).collect();

        tracing::debug!(
            entities = self.entities.len(),
            forces = self.forces.len(),
            work_items = self.work_items.len(),
            synergy_rules = self.synergy.len(),
            "registry built"
        );

        Ok(Registry {
            entities: self.entities,
            forces: self.forces,
            work_items: self.work_items,
            entity_index,
            force_index,
            work_index,
            forward,
            reverse,
            cross,
            effects: self.effects,
            synergy: self.synergy,
            base_matrix: self.base_matrix,
        })
    }
}
