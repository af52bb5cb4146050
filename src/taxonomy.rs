/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Closed vocabularies and the three catalog record types.
//!
//! Categories, domains, action kinds and work patterns are sum types with
//! exhaustive matching, so every table keyed by them is checked by the
//! compiler when a variant is added or removed.
//!
//! # Domain ↔ attribute correspondence
//!
//! ```text
//! Attribute        Domain
//! ───────────────  ─────────
//! execution        Physical
//! discipline       Temporal
//! resourcefulness  Material
//! analysis         Cognitive
//! leadership       Social
//! empathy          Emotional
//! ```
//!
//! An entity's *dominant domain* is the domain of its highest attribute.

use core::fmt;

// ─── Category ────────────────────────────────────────────────────────────────

/// Top-level grouping of Entity Types, ordered by prestige.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Hands-on contributors (`T` ids). Base prestige.
    Talent,
    /// People who direct others (`L` ids). Middle prestige.
    Leader,
    /// Field-defining figures (`V` ids). Highest prestige.
    Visionary,
}

impl Category {
    /// All categories in prestige order.
    pub const ALL: [Category; 3] = [Category::Talent, Category::Leader, Category::Visionary];

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Id prefix used by the built-in catalog.
    pub fn prefix(self) -> char {
        match self {
            Category::Talent => 'T',
            Category::Leader => 'L',
            Category::Visionary => 'V',
        }
    }

    /// Domains this category structurally works in.
    pub fn affinity(self) -> DomainSet {
        match self {
            Category::Talent => {
                DomainSet::of(&[Domain::Physical, Domain::Temporal, Domain::Material])
            }
            Category::Leader => DomainSet::of(&[Domain::Material, Domain::Social, Domain::Emotional]),
            Category::Visionary => {
                DomainSet::of(&[Domain::Cognitive, Domain::Temporal, Domain::Emotional])
            }
        }
    }

    /// Action kinds that suit this category's way of changing.
    pub fn aligned_actions(self) -> &'static [ActionKind] {
        match self {
            Category::Talent => &[
                ActionKind::Inject,
                ActionKind::Amplify,
                ActionKind::Accelerate,
                ActionKind::Upgrade,
            ],
            Category::Leader => &[
                ActionKind::Amplify,
                ActionKind::Redirect,
                ActionKind::Merge,
                ActionKind::Lock,
            ],
            Category::Visionary => &[
                ActionKind::Upgrade,
                ActionKind::Redirect,
                ActionKind::Split,
                ActionKind::Inject,
            ],
        }
    }

    /// Cost multiplier factor applied when a transformation lands in this category.
    pub fn cost_factor(self) -> f64 {
        match self {
            Category::Talent => 1.0,
            Category::Leader => 2.0,
            Category::Visionary => 3.0,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Talent => "Talent",
            Category::Leader => "Leader",
            Category::Visionary => "Visionary",
        })
    }
}

// ─── Domain ──────────────────────────────────────────────────────────────────

/// One of the six resource dimensions shared by Forces and Work Items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    /// Bodies, tools, effort.
    Physical,
    /// Schedules, pace, timing.
    Temporal,
    /// Money, goods, supplies.
    Material,
    /// Knowledge and reasoning.
    Cognitive,
    /// Relationships and standing.
    Social,
    /// Morale and feeling.
    Emotional,
}

impl Domain {
    /// All domains in catalog order.
    pub const ALL: [Domain; 6] = [
        Domain::Physical,
        Domain::Temporal,
        Domain::Material,
        Domain::Cognitive,
        Domain::Social,
        Domain::Emotional,
    ];

    /// Position in [`Domain::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fixed adjacency table. Symmetric; every domain has 2–3 neighbours.
    pub fn neighbors(self) -> &'static [Domain] {
        match self {
            Domain::Physical => &[Domain::Temporal, Domain::Material],
            Domain::Temporal => &[Domain::Physical, Domain::Cognitive],
            Domain::Material => &[Domain::Physical, Domain::Social, Domain::Cognitive],
            Domain::Cognitive => &[Domain::Temporal, Domain::Material, Domain::Emotional],
            Domain::Social => &[Domain::Material, Domain::Emotional],
            Domain::Emotional => &[Domain::Cognitive, Domain::Social],
        }
    }

    /// The attribute dimension that expresses this domain.
    pub fn attribute(self) -> Attribute {
        Attribute::ALL[self.index()]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Domain::Physical => "Physical",
            Domain::Temporal => "Temporal",
            Domain::Material => "Material",
            Domain::Cognitive => "Cognitive",
            Domain::Social => "Social",
            Domain::Emotional => "Emotional",
        })
    }
}

// ─── DomainSet ───────────────────────────────────────────────────────────────

/// Small set of domains stored as a bitmask (bit `i` = `Domain::ALL[i]`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DomainSet(u8);

impl DomainSet {
    /// The empty set.
    pub const EMPTY: DomainSet = DomainSet(0);

    /// Set containing exactly the given domains.
    pub fn of(domains: &[Domain]) -> Self {
        domains.iter().fold(Self::EMPTY, |set, &d| set.with(d))
    }

    /// This set plus `domain`.
    pub fn with(self, domain: Domain) -> Self {
        DomainSet(self.0 | (1 << domain.index()))
    }

    /// Membership test.
    pub fn contains(self, domain: Domain) -> bool {
        self.0 & (1 << domain.index()) != 0
    }

    /// Number of domains in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// `true` when no domain is present.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in catalog order.
    pub fn iter(self) -> impl Iterator<Item = Domain> {
        Domain::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    /// Raw bitmask.
    pub fn bits(self) -> u8 {
        self.0
    }
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// The six named attribute dimensions of an Entity Type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    /// Getting physical work done.
    Execution,
    /// Keeping pace and commitments.
    Discipline,
    /// Making the most of material means.
    Resourcefulness,
    /// Reasoning and investigation.
    Analysis,
    /// Directing and rallying others.
    Leadership,
    /// Reading and caring for others.
    Empathy,
}

impl Attribute {
    /// All dimensions in vector order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Execution,
        Attribute::Discipline,
        Attribute::Resourcefulness,
        Attribute::Analysis,
        Attribute::Leadership,
        Attribute::Empathy,
    ];

    /// Position in the attribute vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Domain this dimension expresses.
    pub fn domain(self) -> Domain {
        Domain::ALL[self.index()]
    }
}

/// Number of attribute dimensions.
pub const ATTRIBUTE_DIM: usize = 6;

/// Fixed-size attribute vector. Values are clamped to [0, 100] on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[u8; ATTRIBUTE_DIM]"))]
pub struct AttributeVector([u8; ATTRIBUTE_DIM]);

impl From<[u8; ATTRIBUTE_DIM]> for AttributeVector {
    fn from(values: [u8; ATTRIBUTE_DIM]) -> Self {
        Self::new(values)
    }
}

impl AttributeVector {
    /// Build a vector, clamping every value to 100.
    pub fn new(values: [u8; ATTRIBUTE_DIM]) -> Self {
        Self(values.map(|v| v.min(100)))
    }

    /// Value of one dimension.
    pub fn get(&self, attribute: Attribute) -> u8 {
        self.0[attribute.index()]
    }

    /// Raw values in vector order.
    pub fn values(&self) -> &[u8; ATTRIBUTE_DIM] {
        &self.0
    }

    /// Domain of the highest attribute; ties go to the earlier dimension.
    pub fn dominant_domain(&self) -> Domain {
        let mut best = 0;
        for i in 1..ATTRIBUTE_DIM {
            if self.0[i] > self.0[best] {
                best = i;
            }
        }
        Domain::ALL[best]
    }
}

// ─── ActionKind ──────────────────────────────────────────────────────────────

/// The twelve ways a Force acts on its domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Add a resource.
    Inject,
    /// Remove a resource.
    Drain,
    /// Strengthen what is present.
    Amplify,
    /// Let what is present wear away.
    Decay,
    /// Speed up.
    Accelerate,
    /// Slow down.
    Decelerate,
    /// Point the same energy elsewhere.
    Redirect,
    /// Freeze the current state.
    Lock,
    /// Raise a level.
    Upgrade,
    /// Drop a level.
    Downgrade,
    /// Combine with something else.
    Merge,
    /// Divide into parts.
    Split,
}

/// Whether an action kind tends to build a category up or wear it down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Inject, Amplify, Accelerate, Upgrade, Merge.
    Promoting,
    /// Drain, Decay, Decelerate, Downgrade, Split.
    Demoting,
    /// Redirect, Lock.
    Neutral,
}

impl ActionKind {
    /// All action kinds in catalog order.
    pub const ALL: [ActionKind; 12] = [
        ActionKind::Inject,
        ActionKind::Drain,
        ActionKind::Amplify,
        ActionKind::Decay,
        ActionKind::Accelerate,
        ActionKind::Decelerate,
        ActionKind::Redirect,
        ActionKind::Lock,
        ActionKind::Upgrade,
        ActionKind::Downgrade,
        ActionKind::Merge,
        ActionKind::Split,
    ];

    /// Position in [`ActionKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Effect-table polarity.
    pub fn polarity(self) -> Polarity {
        match self {
            ActionKind::Inject
            | ActionKind::Amplify
            | ActionKind::Accelerate
            | ActionKind::Upgrade
            | ActionKind::Merge => Polarity::Promoting,
            ActionKind::Drain
            | ActionKind::Decay
            | ActionKind::Decelerate
            | ActionKind::Downgrade
            | ActionKind::Split => Polarity::Demoting,
            ActionKind::Redirect | ActionKind::Lock => Polarity::Neutral,
        }
    }

    /// Kinds that move an entity forward along its evolution path.
    pub fn evolves_forward(self) -> bool {
        matches!(self, ActionKind::Amplify | ActionKind::Upgrade | ActionKind::Inject)
    }

    /// Kinds that move an entity back along a reverse evolution edge.
    pub fn evolves_backward(self) -> bool {
        matches!(self, ActionKind::Decay | ActionKind::Downgrade | ActionKind::Drain)
    }

    /// Signed magnitude of the side effect on the force's own domain.
    pub fn own_domain_effect(self) -> i8 {
        match self {
            ActionKind::Inject => 2,
            ActionKind::Drain => -2,
            ActionKind::Amplify => 3,
            ActionKind::Decay => -3,
            ActionKind::Accelerate => 2,
            ActionKind::Decelerate => -1,
            ActionKind::Redirect => 1,
            ActionKind::Lock => 0,
            ActionKind::Upgrade => 2,
            ActionKind::Downgrade => -2,
            ActionKind::Merge => 1,
            ActionKind::Split => -1,
        }
    }

    /// Upgrade and Downgrade cannot be undone; everything else can.
    pub fn is_reversible(self) -> bool {
        !matches!(self, ActionKind::Upgrade | ActionKind::Downgrade)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::Inject => "inject",
            ActionKind::Drain => "drain",
            ActionKind::Amplify => "amplify",
            ActionKind::Decay => "decay",
            ActionKind::Accelerate => "accelerate",
            ActionKind::Decelerate => "decelerate",
            ActionKind::Redirect => "redirect",
            ActionKind::Lock => "lock",
            ActionKind::Upgrade => "upgrade",
            ActionKind::Downgrade => "downgrade",
            ActionKind::Merge => "merge",
            ActionKind::Split => "split",
        })
    }
}

// ─── Rarity ──────────────────────────────────────────────────────────────────

/// Ordinal rarity of a Force.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    /// Everyday.
    Common,
    /// Occasional.
    Uncommon,
    /// Hard to come by.
    Rare,
    /// Exceptional.
    Epic,
    /// Once in a generation.
    Legendary,
}

// ─── WorkPattern ─────────────────────────────────────────────────────────────

/// The twelve task archetypes a Work Item follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorkPattern {
    /// Bring something new into existence.
    Create,
    /// Assemble from parts.
    Build,
    /// Grow an existing capability.
    Develop,
    /// Keep things running.
    Maintain,
    /// Make it better with the same means.
    Optimize,
    /// Watch and report.
    Monitor,
    /// Obtain from outside.
    Acquire,
    /// Link separate parties.
    Connect,
    /// Hand out.
    Distribute,
    /// Guard against loss.
    Protect,
    /// Restore after loss.
    Recover,
    /// Change into something else.
    Transform,
}

impl WorkPattern {
    /// All patterns in catalog order.
    pub const ALL: [WorkPattern; 12] = [
        WorkPattern::Create,
        WorkPattern::Build,
        WorkPattern::Develop,
        WorkPattern::Maintain,
        WorkPattern::Optimize,
        WorkPattern::Monitor,
        WorkPattern::Acquire,
        WorkPattern::Connect,
        WorkPattern::Distribute,
        WorkPattern::Protect,
        WorkPattern::Recover,
        WorkPattern::Transform,
    ];

    /// Position in [`WorkPattern::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WorkPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkPattern::Create => "create",
            WorkPattern::Build => "build",
            WorkPattern::Develop => "develop",
            WorkPattern::Maintain => "maintain",
            WorkPattern::Optimize => "optimize",
            WorkPattern::Monitor => "monitor",
            WorkPattern::Acquire => "acquire",
            WorkPattern::Connect => "connect",
            WorkPattern::Distribute => "distribute",
            WorkPattern::Protect => "protect",
            WorkPattern::Recover => "recover",
            WorkPattern::Transform => "transform",
        })
    }
}

// ─── Difficulty & duration ───────────────────────────────────────────────────

/// How hard a transformation is to pull off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Small step within a category.
    Easy,
    /// Moderate step within a category.
    Medium,
    /// Large step, or a category change with an ordinary force.
    Hard,
    /// Very large step, or a category change with an epic force.
    Expert,
    /// Category change with a legendary force.
    Legendary,
}

/// Coarse label for a [`DurationEstimate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationBand {
    /// No time at all.
    Immediate,
    /// Up to a week.
    Short,
    /// Up to a month.
    Medium,
    /// Up to four months.
    Long,
    /// Longer than four months.
    Extended,
}

/// Estimated wall-clock duration, in days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationEstimate {
    /// Whole days.
    pub days: u32,
}

impl DurationEstimate {
    /// Estimate of `days` days.
    pub const fn days(days: u32) -> Self {
        Self { days }
    }

    /// Coarse band this estimate falls in.
    pub fn band(&self) -> DurationBand {
        match self.days {
            0 => DurationBand::Immediate,
            1..=7 => DurationBand::Short,
            8..=30 => DurationBand::Medium,
            31..=120 => DurationBand::Long,
            _ => DurationBand::Extended,
        }
    }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// One of the classified actors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityType {
    /// Globally unique id, e.g. `"L21"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Top-level group.
    pub category: Category,
    /// Within-category index (1-based).
    pub ordinal: u8,
    /// Attribute vector, every value in [0, 100].
    pub attributes: AttributeVector,
}

impl EntityType {
    /// Build an entity; attribute values above 100 are clamped.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        ordinal: u8,
        attributes: [u8; ATTRIBUTE_DIM],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            ordinal,
            attributes: AttributeVector::new(attributes),
        }
    }

    /// Domain of the entity's strongest attribute.
    pub fn dominant_domain(&self) -> Domain {
        self.attributes.dominant_domain()
    }

    /// Shorthand for one attribute value.
    pub fn attribute(&self, attribute: Attribute) -> u8 {
        self.attributes.get(attribute)
    }
}

/// An external action applied to an Entity Type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Force {
    /// Globally unique id, e.g. `"F51"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Domain the force acts in.
    pub domain: Domain,
    /// How it acts.
    pub action: ActionKind,
    /// Resource cost, 0–10.
    pub cost: u8,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Duration of applying the force when it changes nothing.
    pub nominal_duration: DurationEstimate,
}

/// A task archetype used for resonance scoring.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkItem {
    /// Globally unique id, e.g. `"W07"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Domain the work belongs to.
    pub domain: Domain,
    /// Which archetype it follows.
    pub pattern: WorkPattern,
    /// 1 (trivial) to 5 (hardest).
    pub difficulty: u8,
    /// Domains consumed.
    pub input_domains: DomainSet,
    /// Domain produced.
    pub output_domain: Domain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_is_symmetric_with_two_or_three_neighbours() {
        for d in Domain::ALL {
            let n = d.neighbors();
            assert!((2..=3).contains(&n.len()), "{d} has {} neighbours", n.len());
            for other in n {
                assert!(other.neighbors().contains(&d), "{d} -> {other} not mirrored");
            }
        }
    }

    #[test]
    fn test_attribute_vector_clamps_to_100() {
        let v = AttributeVector::new([150, 0, 100, 101, 255, 42]);
        assert_eq!(v.values(), &[100, 0, 100, 100, 100, 42]);
    }

    #[test]
    fn test_dominant_domain_breaks_ties_toward_first_dimension() {
        let v = AttributeVector::new([50, 80, 80, 10, 10, 10]);
        assert_eq!(v.dominant_domain(), Domain::Temporal);
        let v = AttributeVector::new([10, 20, 30, 40, 90, 50]);
        assert_eq!(v.dominant_domain(), Domain::Social);
    }

    #[test]
    fn test_attribute_and_domain_indices_line_up() {
        for a in Attribute::ALL {
            assert_eq!(a.domain().attribute(), a);
        }
        assert_eq!(Attribute::Leadership.domain(), Domain::Social);
        assert_eq!(Attribute::Execution.domain(), Domain::Physical);
    }

    #[test]
    fn test_domain_set_membership() {
        let s = DomainSet::of(&[Domain::Social, Domain::Physical, Domain::Social]);
        assert_eq!(s.len(), 2);
        assert!(s.contains(Domain::Social));
        assert!(!s.contains(Domain::Emotional));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![Domain::Physical, Domain::Social]);
        assert!(DomainSet::EMPTY.is_empty());
    }

    #[test]
    fn test_every_action_has_exactly_one_polarity_group() {
        let promoting = ActionKind::ALL
            .iter()
            .filter(|a| a.polarity() == Polarity::Promoting)
            .count();
        let demoting = ActionKind::ALL
            .iter()
            .filter(|a| a.polarity() == Polarity::Demoting)
            .count();
        assert_eq!(promoting, 5);
        assert_eq!(demoting, 5);
        for a in ActionKind::ALL {
            assert!(!(a.evolves_forward() && a.evolves_backward()));
        }
    }

    #[test]
    fn test_rarity_is_ordered() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_duration_bands() {
        assert_eq!(DurationEstimate::days(0).band(), DurationBand::Immediate);
        assert_eq!(DurationEstimate::days(7).band(), DurationBand::Short);
        assert_eq!(DurationEstimate::days(14).band(), DurationBand::Medium);
        assert_eq!(DurationEstimate::days(90).band(), DurationBand::Long);
        assert_eq!(DurationEstimate::days(365).band(), DurationBand::Extended);
    }
}
