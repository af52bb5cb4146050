/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Built-in static definitions: 72 Entity Types, 72 Forces, 72 Work Items,
//! and the tables the engines consult.
//!
//! Entity rows are `(id, name, category, ordinal, attributes)` with attributes
//! in `[execution, discipline, resourcefulness, analysis, leadership, empathy]`
//! order. Within each category, ordinals come in blocks of four by dominant
//! domain:
//!
//! ```text
//! 1–4 Physical   5–8 Temporal   9–12 Material
//! 13–16 Cognitive   17–20 Emotional   21–24 Social
//! ```
//!
//! Forces and work items are generated domain-major from the tables below, so
//! `F{d*12 + a + 1}` is domain `d` × action `a` and `F51` is Social × Amplify.

use crate::registry::{ForceEffect, RegistryBuilder, SynergyRule};
use crate::taxonomy::{
    ActionKind, Category, Domain, DomainSet, DurationEstimate, EntityType, Force, Polarity,
    Rarity, WorkItem, WorkPattern,
};

type EntityRow = (&'static str, &'static str, Category, u8, [u8; 6]);

/// Base category compatibility, indexed by [`Category::index`]. Symmetric.
pub(crate) const BASE_MATRIX: [[f64; 3]; 3] = [
    // Talent  Leader  Visionary
    [0.3, 0.7, 0.5], // Talent
    [0.7, 0.4, 0.6], // Leader
    [0.5, 0.6, 0.2], // Visionary
];

const ENTITIES: &[EntityRow] = &[
    ("T01", "Laborer", Category::Talent, 1, [78, 29, 61, 27, 48, 55]),
    ("T02", "Builder", Category::Talent, 2, [83, 39, 58, 40, 38, 51]),
    ("T03", "Mechanic", Category::Talent, 3, [86, 27, 52, 45, 37, 46]),
    ("T04", "Athlete", Category::Talent, 4, [92, 35, 33, 21, 62, 46]),
    ("T05", "Courier", Category::Talent, 5, [72, 76, 58, 55, 58, 43]),
    ("T06", "Scheduler", Category::Talent, 6, [67, 81, 54, 30, 22, 62]),
    ("T07", "Timekeeper", Category::Talent, 7, [47, 86, 42, 24, 18, 21]),
    ("T08", "Dispatcher", Category::Talent, 8, [65, 91, 25, 45, 42, 23]),
    ("T09", "Trader", Category::Talent, 9, [57, 41, 75, 21, 41, 62]),
    ("T10", "Bookkeeper", Category::Talent, 10, [53, 18, 80, 36, 51, 53]),
    ("T11", "Quartermaster", Category::Talent, 11, [57, 23, 84, 41, 52, 49]),
    ("T12", "Scavenger", Category::Talent, 12, [40, 34, 89, 18, 25, 54]),
    ("T13", "Analyst", Category::Talent, 13, [41, 31, 18, 77, 28, 31]),
    ("T14", "Researcher", Category::Talent, 14, [54, 41, 36, 83, 18, 31]),
    ("T15", "Engineer", Category::Talent, 15, [53, 33, 24, 85, 31, 41]),
    ("T16", "Archivist", Category::Talent, 16, [72, 27, 56, 93, 31, 27]),
    ("T17", "Caretaker", Category::Talent, 17, [69, 55, 51, 48, 48, 74]),
    ("T18", "Listener", Category::Talent, 18, [40, 48, 47, 37, 34, 83]),
    ("T19", "Performer", Category::Talent, 19, [44, 43, 49, 41, 41, 85]),
    ("T20", "Artist", Category::Talent, 20, [67, 44, 49, 36, 49, 93]),
    ("T21", "Recruiter", Category::Talent, 21, [54, 42, 45, 37, 77, 40]),
    ("T22", "Host", Category::Talent, 22, [54, 47, 55, 60, 82, 58]),
    ("T23", "Networker", Category::Talent, 23, [64, 21, 27, 40, 85, 38]),
    ("T24", "Envoy", Category::Talent, 24, [55, 45, 42, 22, 91, 39]),
    ("L01", "Foreman", Category::Leader, 1, [78, 25, 42, 50, 55, 27]),
    ("L02", "Drill Sergeant", Category::Leader, 2, [80, 44, 37, 37, 65, 46]),
    ("L03", "Site Captain", Category::Leader, 3, [84, 36, 33, 47, 60, 22]),
    ("L04", "Field Marshal", Category::Leader, 4, [93, 53, 30, 41, 71, 55]),
    ("L05", "Planner", Category::Leader, 5, [19, 78, 60, 30, 62, 56]),
    ("L06", "Program Director", Category::Leader, 6, [40, 79, 51, 54, 60, 38]),
    ("L07", "Operations Chief", Category::Leader, 7, [58, 85, 44, 30, 63, 25]),
    ("L08", "Release Manager", Category::Leader, 8, [28, 89, 45, 38, 58, 45]),
    ("L09", "Steward", Category::Leader, 9, [21, 24, 76, 60, 72, 43]),
    ("L10", "Treasurer", Category::Leader, 10, [25, 46, 79, 50, 66, 58]),
    ("L11", "Merchant Lord", Category::Leader, 11, [23, 58, 85, 62, 67, 24]),
    ("L12", "Procurement Head", Category::Leader, 12, [34, 46, 93, 32, 63, 29]),
    ("L13", "Chief Scientist", Category::Leader, 13, [32, 51, 21, 75, 58, 22]),
    ("L14", "Architect", Category::Leader, 14, [32, 57, 61, 83, 66, 48]),
    ("L15", "Strategist", Category::Leader, 15, [39, 49, 21, 87, 56, 47]),
    ("L16", "Head Librarian", Category::Leader, 16, [18, 57, 31, 93, 65, 60]),
    ("L17", "Mentor", Category::Leader, 17, [60, 45, 61, 44, 57, 76]),
    ("L18", "Coach", Category::Leader, 18, [33, 20, 19, 42, 69, 80]),
    ("L19", "Chaplain", Category::Leader, 19, [36, 27, 33, 51, 60, 87]),
    ("L20", "Creative Director", Category::Leader, 20, [26, 61, 61, 55, 58, 90]),
    ("L21", "Commander", Category::Leader, 21, [29, 25, 52, 33, 78, 29]),
    ("L22", "Diplomat", Category::Leader, 22, [29, 35, 47, 22, 80, 21]),
    ("L23", "Campaigner", Category::Leader, 23, [29, 42, 28, 55, 87, 49]),
    ("L24", "Chancellor", Category::Leader, 24, [53, 21, 54, 61, 89, 41]),
    ("V01", "Titan", Category::Visionary, 1, [79, 35, 34, 39, 28, 54]),
    ("V02", "Pathfinder", Category::Visionary, 2, [84, 47, 40, 20, 58, 37]),
    ("V03", "Grand Artificer", Category::Visionary, 3, [88, 61, 21, 42, 57, 20]),
    ("V04", "Champion", Category::Visionary, 4, [93, 35, 36, 24, 18, 49]),
    ("V05", "Prophet", Category::Visionary, 5, [38, 77, 35, 23, 19, 58]),
    ("V06", "Oracle", Category::Visionary, 6, [44, 84, 53, 26, 37, 29]),
    ("V07", "Timeweaver", Category::Visionary, 7, [27, 90, 47, 29, 20, 55]),
    ("V08", "Historian", Category::Visionary, 8, [38, 91, 45, 36, 42, 22]),
    ("V09", "Magnate", Category::Visionary, 9, [45, 54, 76, 42, 50, 41]),
    ("V10", "Alchemist", Category::Visionary, 10, [46, 38, 81, 22, 25, 39]),
    ("V11", "Tycoon", Category::Visionary, 11, [30, 43, 87, 40, 32, 21]),
    ("V12", "Patron", Category::Visionary, 12, [30, 41, 91, 46, 33, 61]),
    ("V13", "Polymath", Category::Visionary, 13, [43, 46, 38, 79, 23, 53]),
    ("V14", "Inventor", Category::Visionary, 14, [34, 38, 18, 85, 21, 62]),
    ("V15", "Philosopher", Category::Visionary, 15, [27, 30, 46, 88, 31, 25]),
    ("V16", "Sage", Category::Visionary, 16, [60, 41, 61, 94, 29, 31]),
    ("V17", "Healer", Category::Visionary, 17, [30, 44, 53, 24, 43, 77]),
    ("V18", "Poet", Category::Visionary, 18, [25, 26, 61, 48, 51, 84]),
    ("V19", "Dreamer", Category::Visionary, 19, [55, 30, 28, 48, 26, 90]),
    ("V20", "Muse", Category::Visionary, 20, [18, 54, 38, 19, 45, 93]),
    ("V21", "Sovereign", Category::Visionary, 21, [57, 35, 58, 25, 80, 19]),
    ("V22", "Reformer", Category::Visionary, 22, [58, 30, 47, 50, 81, 20]),
    ("V23", "Revolutionary", Category::Visionary, 23, [37, 35, 25, 18, 88, 50]),
    ("V24", "Unifier", Category::Visionary, 24, [47, 44, 24, 58, 91, 52]),
];

const EVOLUTION: &[(&str, &[&str])] = &[
    ("T01", &["T02", "T05", "T09"]),
    ("T02", &["T03", "T06"]),
    ("T03", &["T04", "T07"]),
    ("T04", &["T08"]),
    ("T05", &["T06", "T09", "T13"]),
    ("T06", &["T07", "T10"]),
    ("T07", &["T08", "T11"]),
    ("T08", &["T12"]),
    ("T09", &["T10", "T13", "T17"]),
    ("T10", &["T11", "T14"]),
    ("T11", &["T12", "T15"]),
    ("T12", &["T16"]),
    ("T13", &["T14", "T17", "T21"]),
    ("T14", &["T15", "T18"]),
    ("T15", &["T16", "T19"]),
    ("T16", &["T20"]),
    ("T17", &["T18", "T21"]),
    ("T18", &["T19", "T22"]),
    ("T19", &["T20", "T23"]),
    ("T20", &["T24"]),
    ("T21", &["T22"]),
    ("T22", &["T23"]),
    ("T23", &["T24"]),
    ("L01", &["L02", "L05", "L09"]),
    ("L02", &["L03", "L06"]),
    ("L03", &["L04", "L07"]),
    ("L04", &["L08"]),
    ("L05", &["L06", "L09", "L13"]),
    ("L06", &["L07", "L10"]),
    ("L07", &["L08", "L11"]),
    ("L08", &["L12"]),
    ("L09", &["L10", "L13", "L17"]),
    ("L10", &["L11", "L14"]),
    ("L11", &["L12", "L15"]),
    ("L12", &["L16"]),
    ("L13", &["L14", "L17", "L21"]),
    ("L14", &["L15", "L18"]),
    ("L15", &["L16", "L19"]),
    ("L16", &["L20"]),
    ("L17", &["L18", "L21"]),
    ("L18", &["L19", "L22"]),
    ("L19", &["L20", "L23"]),
    ("L20", &["L24"]),
    ("L21", &["L22"]),
    ("L22", &["L23"]),
    ("L23", &["L24"]),
    ("V01", &["V02", "V05", "V09"]),
    ("V02", &["V03", "V06"]),
    ("V03", &["V04", "V07"]),
    ("V04", &["V08"]),
    ("V05", &["V06", "V09", "V13"]),
    ("V06", &["V07", "V10"]),
    ("V07", &["V08", "V11"]),
    ("V08", &["V12"]),
    ("V09", &["V10", "V13", "V17"]),
    ("V10", &["V11", "V14"]),
    ("V11", &["V12", "V15"]),
    ("V12", &["V16"]),
    ("V13", &["V14", "V17", "V21"]),
    ("V14", &["V15", "V18"]),
    ("V15", &["V16", "V19"]),
    ("V16", &["V20"]),
    ("V17", &["V18", "V21"]),
    ("V18", &["V19", "V22"]),
    ("V19", &["V20", "V23"]),
    ("V20", &["V24"]),
    ("V21", &["V22"]),
    ("V22", &["V23"]),
    ("V23", &["V24"]),
];

const CROSS_PATHS: &[(&str, &str, &str)] = &[
    ("T03", "L03", "Carries hands-on responsibility for a full cycle"),
    ("T04", "L04", "Carries hands-on responsibility for a full cycle"),
    ("T07", "L07", "Carries scheduling responsibility for a full cycle"),
    ("T08", "L08", "Carries scheduling responsibility for a full cycle"),
    ("T11", "L11", "Carries resource responsibility for a full cycle"),
    ("T12", "L12", "Carries resource responsibility for a full cycle"),
    ("T15", "L15", "Carries research responsibility for a full cycle"),
    ("T16", "L16", "Carries research responsibility for a full cycle"),
    ("T19", "L19", "Carries care responsibility for a full cycle"),
    ("T20", "L20", "Carries care responsibility for a full cycle"),
    ("T23", "L23", "Carries community responsibility for a full cycle"),
    ("T24", "L24", "Carries community responsibility for a full cycle"),
    ("L03", "V03", "Recognized as redefining hands-on practice"),
    ("L04", "V04", "Recognized as redefining hands-on practice"),
    ("L07", "V07", "Recognized as redefining scheduling practice"),
    ("L08", "V08", "Recognized as redefining scheduling practice"),
    ("L11", "V11", "Recognized as redefining resource practice"),
    ("L12", "V12", "Recognized as redefining resource practice"),
    ("L15", "V15", "Recognized as redefining research practice"),
    ("L16", "V16", "Recognized as redefining research practice"),
    ("L19", "V19", "Recognized as redefining care practice"),
    ("L20", "V20", "Recognized as redefining care practice"),
    ("L23", "V23", "Recognized as redefining community practice"),
    ("L24", "V24", "Recognized as redefining community practice"),
    ("V01", "L01", "Accepts day-to-day hands-on stewardship"),
    ("V05", "L05", "Accepts day-to-day scheduling stewardship"),
    ("V09", "L09", "Accepts day-to-day resource stewardship"),
    ("V13", "L13", "Accepts day-to-day research stewardship"),
    ("V17", "L17", "Accepts day-to-day care stewardship"),
    ("V21", "L21", "Accepts day-to-day community stewardship"),
];
const FORCE_NAMES: [[&str; 12]; 6] = [
    // inject, drain, amplify, decay, accelerate, decelerate,
    // redirect, lock, upgrade, downgrade, merge, split
    [
        "Adrenaline", "Exhaustion", "Surge", "Atrophy", "Sprint", "Fatigue",
        "Refocus Effort", "Brace", "Forge Body", "Wear Down", "Join Crews", "Divide Labor",
    ],
    [
        "Deadline", "Delay", "Momentum", "Drift", "Fast Track", "Slowdown",
        "Reschedule", "Freeze Schedule", "Promotion Cycle", "Demotion Cycle", "Sync Calendars", "Fork Timeline",
    ],
    [
        "Windfall", "Austerity", "Compound", "Depreciate", "Stimulus", "Rationing",
        "Reallocate", "Escrow", "Capitalize", "Liquidate", "Pool Funds", "Partition Assets",
    ],
    [
        "Insight", "Overload", "Deep Study", "Forgetting", "Crash Course", "Doubt",
        "Reframe", "Dogma", "Enlightenment", "Confusion", "Synthesis", "Specialize",
    ],
    [
        "Endorsement", "Isolation", "Rally", "Scandal", "Networking Blitz", "Gatekeeping",
        "Realign Loyalties", "Entrench", "Coronation", "Exile", "Alliance", "Schism",
    ],
    [
        "Inspiration", "Burnout", "Passion", "Disillusion", "Euphoria", "Melancholy",
        "Catharsis", "Numbness", "Transcendence", "Heartbreak", "Empathy Bond", "Estrangement",
    ],
];

const WORK_NAMES: [[&str; 12]; 6] = [
    // create, build, develop, maintain, optimize, monitor,
    // acquire, connect, distribute, protect, recover, transform
    [
        "Prototype Craft", "Assemble Rig", "Train Crew", "Service Equipment", "Streamline Line", "Inspect Site",
        "Source Tools", "Link Workshops", "Dispatch Cargo", "Secure Perimeter", "Repair Damage", "Retrofit Plant",
    ],
    [
        "Draft Roadmap", "Build Schedule", "Grow Cadence", "Keep Calendar", "Tighten Cycle", "Track Milestones",
        "Buy Time", "Align Timelines", "Stagger Releases", "Guard Deadlines", "Recover Slippage", "Re-plan Program",
    ],
    [
        "Found Venture", "Stock Warehouse", "Grow Portfolio", "Balance Books", "Cut Costs", "Audit Accounts",
        "Raise Capital", "Open Trade Route", "Allocate Budget", "Hedge Risk", "Restore Reserves", "Restructure Holdings",
    ],
    [
        "Formulate Theory", "Build Model", "Extend Research", "Curate Knowledge", "Refine Method", "Review Results",
        "License Patent", "Cross-pollinate Labs", "Publish Findings", "Guard Secrets", "Rebuild Archive", "Shift Paradigm",
    ],
    [
        "Found Community", "Build Coalition", "Grow Network", "Tend Relationships", "Streamline Governance", "Gauge Sentiment",
        "Win Endorsements", "Broker Introductions", "Spread Message", "Defend Reputation", "Mend Alliances", "Reform Institution",
    ],
    [
        "Compose Work", "Build Morale", "Nurture Growth", "Sustain Spirit", "Channel Passion", "Check Wellbeing",
        "Earn Devotion", "Bond Teams", "Share Joy", "Shield From Burnout", "Heal Grief", "Renew Purpose",
    ],
];


fn domain_offset(domain: Domain) -> i8 {
    match domain {
        Domain::Temporal | Domain::Cognitive => 1,
        Domain::Emotional => 2,
        Domain::Physical | Domain::Material | Domain::Social => 0,
    }
}

fn base_cost(action: ActionKind) -> i8 {
    match action {
        ActionKind::Inject | ActionKind::Drain => 3,
        ActionKind::Amplify | ActionKind::Decay | ActionKind::Decelerate => 4,
        ActionKind::Accelerate | ActionKind::Redirect => 5,
        ActionKind::Lock => 2,
        ActionKind::Upgrade => 8,
        ActionKind::Downgrade => 7,
        ActionKind::Merge | ActionKind::Split => 6,
    }
}

fn rarity(domain: Domain, action: ActionKind) -> Rarity {
    match action {
        ActionKind::Inject | ActionKind::Drain | ActionKind::Lock => Rarity::Common,
        ActionKind::Amplify | ActionKind::Decay | ActionKind::Accelerate | ActionKind::Decelerate => {
            Rarity::Uncommon
        }
        ActionKind::Redirect | ActionKind::Merge | ActionKind::Split => Rarity::Rare,
        ActionKind::Upgrade if matches!(domain, Domain::Cognitive | Domain::Emotional) => {
            Rarity::Legendary
        }
        ActionKind::Upgrade | ActionKind::Downgrade => Rarity::Epic,
    }
}

fn nominal_days(action: ActionKind) -> u32 {
    match action {
        ActionKind::Inject | ActionKind::Drain => 3,
        ActionKind::Amplify | ActionKind::Decelerate => 7,
        ActionKind::Decay | ActionKind::Merge => 14,
        ActionKind::Accelerate => 2,
        ActionKind::Redirect => 5,
        ActionKind::Lock => 1,
        ActionKind::Upgrade => 30,
        ActionKind::Downgrade => 21,
        ActionKind::Split => 10,
    }
}

fn base_difficulty(pattern: WorkPattern) -> i8 {
    match pattern {
        WorkPattern::Monitor => 1,
        WorkPattern::Maintain | WorkPattern::Acquire | WorkPattern::Connect => 2,
        WorkPattern::Build | WorkPattern::Develop | WorkPattern::Distribute | WorkPattern::Protect => 3,
        WorkPattern::Create | WorkPattern::Optimize | WorkPattern::Recover => 4,
        WorkPattern::Transform => 5,
    }
}

fn difficulty_offset(domain: Domain) -> i8 {
    match domain {
        Domain::Cognitive | Domain::Emotional => 1,
        Domain::Physical => -1,
        Domain::Temporal | Domain::Material | Domain::Social => 0,
    }
}

/// Second domain a pattern consumes besides its own.
fn companion_input(pattern: WorkPattern) -> Domain {
    match pattern {
        WorkPattern::Create | WorkPattern::Build | WorkPattern::Develop => Domain::Material,
        WorkPattern::Maintain | WorkPattern::Monitor | WorkPattern::Protect => Domain::Temporal,
        WorkPattern::Acquire | WorkPattern::Connect | WorkPattern::Distribute => Domain::Social,
        WorkPattern::Optimize | WorkPattern::Recover | WorkPattern::Transform => Domain::Cognitive,
    }
}

fn catalog_id(prefix: char, domain: Domain, slot: usize) -> String {
    format!("{prefix}{:02}", domain.index() * 12 + slot + 1)
}

/// Force-effect row for `(domain, action)`.
pub(crate) fn default_force_effect(domain: Domain, action: ActionKind) -> ForceEffect {
    let mut effect = ForceEffect::default();
    // One slot per category, so neither list can outgrow its capacity.
    let aligned: heapless::Vec<Category, 3> =
        Category::ALL.into_iter().filter(|c| c.affinity().contains(domain)).collect();
    let visionary: heapless::Vec<Category, 3> = core::iter::once(Category::Visionary).collect();
    // Redirect and Lock are neutral, so only their Visionary row is set.
    match (action.polarity(), action) {
        (Polarity::Promoting, _) => effect.promotes = aligned,
        (Polarity::Demoting, _) => effect.inhibits = aligned,
        (Polarity::Neutral, ActionKind::Redirect) => effect.promotes = visionary,
        (Polarity::Neutral, ActionKind::Lock) => effect.inhibits = visionary,
        (Polarity::Neutral, _) => {}
    }
    effect.category_shift = match action {
        ActionKind::Upgrade => 20,
        ActionKind::Downgrade | ActionKind::Redirect => 15,
        ActionKind::Merge | ActionKind::Split => 10,
        ActionKind::Amplify if matches!(domain, Domain::Cognitive | Domain::Social) => 5,
        _ => 0,
    };
    effect
}

fn builtin_forces() -> impl Iterator<Item = Force> {
    Domain::ALL.into_iter().flat_map(|domain| {
        ActionKind::ALL.into_iter().map(move |action| Force {
            id: catalog_id('F', domain, action.index()),
            name: FORCE_NAMES[domain.index()][action.index()].to_owned(),
            domain,
            action,
            cost: (base_cost(action) + domain_offset(domain)).clamp(0, 10) as u8,
            rarity: rarity(domain, action),
            nominal_duration: DurationEstimate::days(nominal_days(action)),
        })
    })
}

fn builtin_work_items() -> impl Iterator<Item = WorkItem> {
    Domain::ALL.into_iter().flat_map(|domain| {
        WorkPattern::ALL.into_iter().map(move |pattern| WorkItem {
            id: catalog_id('W', domain, pattern.index()),
            name: WORK_NAMES[domain.index()][pattern.index()].to_owned(),
            domain,
            pattern,
            difficulty: (base_difficulty(pattern) + difficulty_offset(domain)).clamp(1, 5) as u8,
            input_domains: DomainSet::of(&[domain, companion_input(pattern)]),
            output_domain: domain,
        })
    })
}

fn builtin_synergy() -> Vec<SynergyRule> {
    vec![
        SynergyRule::new("crew and foreman", &["L01", "L02", "L03", "L04"], &["T01", "T02", "T03", "T04"], 0.8),
        SynergyRule::new("lab partners", &["V13", "V14", "V15", "V16"], &["T13", "T14", "T15", "T16"], 0.7),
        SynergyRule::new("disrupter and keeper", &["V23"], &["L07", "L16"], -0.9),
        SynergyRule::new("competing sovereigns", &["V21", "V23"], &["V22", "V24"], -0.7),
        SynergyRule::new("contested command", &["L21", "L24"], &["L23", "V21"], -0.6),
        SynergyRule::new("ledger and market", &["T10", "T11"], &["L10", "L11", "V11"], 0.6),
        SynergyRule::new("care circle", &["T17", "T18", "L17"], &["V17", "L19"], 0.5),
    ]
}

/// Builder pre-loaded with the whole built-in catalog.
pub(crate) fn builtin() -> RegistryBuilder {
    let mut b = RegistryBuilder::new();
    for &(id, name, category, ordinal, attributes) in ENTITIES {
        b = b.entity(EntityType::new(id, name, category, ordinal, attributes));
    }
    for force in builtin_forces() {
        b = b.force(force);
    }
    for work in builtin_work_items() {
        b = b.work_item(work);
    }
    for &(source, targets) in EVOLUTION {
        b = b.evolution(source, targets);
    }
    for &(source, target, condition) in CROSS_PATHS {
        b = b.cross_path(source, target, condition);
    }
    for rule in builtin_synergy() {
        b = b.synergy(rule);
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::taxonomy::Attribute;

    #[test]
    fn test_entity_blocks_match_dominant_domain() {
        let blocks = [
            Domain::Physical,
            Domain::Temporal,
            Domain::Material,
            Domain::Cognitive,
            Domain::Emotional,
            Domain::Social,
        ];
        for &(id, _, _, ordinal, attributes) in ENTITIES {
            let e = EntityType::new(id, id, Category::Talent, ordinal, attributes);
            let expected = blocks[(ordinal as usize - 1) / 4];
            assert_eq!(e.dominant_domain(), expected, "{id}");
        }
    }

    #[test]
    fn test_entity_ids_encode_category_and_ordinal() {
        for &(id, _, category, ordinal, _) in ENTITIES {
            assert_eq!(id, format!("{}{:02}", category.prefix(), ordinal));
        }
    }

    #[test]
    fn test_force_ids_are_domain_major() {
        let r = Registry::builtin();
        let f51 = r.force("F51").unwrap();
        assert_eq!(f51.domain, Domain::Social);
        assert_eq!(f51.action, ActionKind::Amplify);
        assert_eq!(r.force("F01").unwrap().action, ActionKind::Inject);
        assert_eq!(r.force("F72").unwrap().domain, Domain::Emotional);
        assert_eq!(r.force("F72").unwrap().action, ActionKind::Split);
    }

    #[test]
    fn test_force_costs_and_rarities() {
        let r = Registry::builtin();
        for f in r.forces() {
            assert!(f.cost <= 10, "{}", f.id);
        }
        // Emotional upgrade: 8 + 2.
        let f = r.force("F69").unwrap();
        assert_eq!(f.action, ActionKind::Upgrade);
        assert_eq!(f.cost, 10);
        assert_eq!(f.rarity, Rarity::Legendary);
        assert_eq!(r.force("F09").unwrap().rarity, Rarity::Epic);
    }

    #[test]
    fn test_work_items_consume_own_domain() {
        let r = Registry::builtin();
        for w in r.work_items() {
            assert!(w.input_domains.contains(w.domain), "{}", w.id);
            assert_eq!(w.output_domain, w.domain);
            assert!((1..=5).contains(&w.difficulty));
        }
        let monitor = r.work_item("W06").unwrap();
        assert_eq!(monitor.pattern, WorkPattern::Monitor);
        assert_eq!(monitor.difficulty, 1);
    }

    #[test]
    fn test_effect_table_promotes_aligned_categories() {
        let social_amplify = default_force_effect(Domain::Social, ActionKind::Amplify);
        assert!(social_amplify.promotes(Category::Leader));
        assert!(!social_amplify.promotes(Category::Talent));
        assert_eq!(social_amplify.category_shift, 5);

        let physical_decay = default_force_effect(Domain::Physical, ActionKind::Decay);
        assert!(physical_decay.inhibits(Category::Talent));
        assert_eq!(physical_decay.category_shift, 0);

        let lock = default_force_effect(Domain::Cognitive, ActionKind::Lock);
        assert!(lock.inhibits(Category::Visionary));
        assert!(lock.promotes.is_empty());

        let temporal_inject = default_force_effect(Domain::Temporal, ActionKind::Inject);
        assert_eq!(temporal_inject.promotes.as_slice(), &[Category::Talent, Category::Visionary]);
        assert!(temporal_inject.inhibits.is_empty());

        let redirect = default_force_effect(Domain::Emotional, ActionKind::Redirect);
        assert_eq!(redirect.promotes.as_slice(), &[Category::Visionary]);
        assert!(redirect.inhibits.is_empty());
        assert_eq!(redirect.category_shift, 15);
    }

    #[test]
    fn test_some_pairs_trigger_leadership_execution_heuristic() {
        let strong_leaders = ENTITIES.iter().filter(|r| r.4[Attribute::Leadership.index()] > 70).count();
        let strong_doers = ENTITIES.iter().filter(|r| r.4[Attribute::Execution.index()] > 70).count();
        assert!(strong_leaders > 0 && strong_doers > 0);
    }
}
