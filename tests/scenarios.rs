//! Concrete regression scenarios and the error taxonomy, through the public
//! facade only.

use morphos_core::{
    ActionKind, CatalogKind, Category, Classification, Domain, DurationEstimate, EntityFilter,
    EntityType, Error, Force, Morphos, Rarity, Registry, SearchConfig, SynergyRule,
};

// ─── helpers ─────────────────────────────────────────────────────────────────

fn force(id: &str, domain: Domain, action: ActionKind) -> Force {
    Force {
        id: id.into(),
        name: id.into(),
        domain,
        action,
        cost: 5,
        rarity: Rarity::Common,
        nominal_duration: DurationEstimate::days(3),
    }
}

/// Two talents and a leader with hand-picked attributes.
fn fixture() -> Registry {
    Registry::builder()
        .entity(EntityType::new("A1", "Doer", Category::Talent, 1, [90, 40, 40, 40, 40, 40]))
        .entity(EntityType::new("A2", "Keeper", Category::Talent, 2, [95, 40, 40, 40, 40, 40]))
        .entity(EntityType::new("B1", "Boss", Category::Leader, 1, [40, 40, 40, 40, 90, 40]))
        .force(force("P+", Domain::Physical, ActionKind::Amplify))
        .force(force("S+", Domain::Social, ActionKind::Upgrade))
        .evolution("A1", &["A2"])
        .cross_path("A2", "B1", "Takes the crew")
        .synergy(SynergyRule::new("pair", &["A1"], &["A2"], 1.0))
        .build()
        .unwrap()
}

// ─── scenario 1: self interaction ────────────────────────────────────────────

/// Self-interaction uses T–T base 0.3 and a zero difference on every
/// dimension (weight 0.7, magnitude = value / 100).
#[test]
fn test_self_interaction_baseline() {
    let m = Morphos::new();
    let r = m.interact("T01", "T01").unwrap();
    assert_eq!(r.coefficient, -0.25);
    assert_eq!(r.classification, Classification::Neutral);
    assert!((r.components.category - -0.4).abs() < 1e-12);
    let t01 = m.registry().entity("T01").unwrap();
    let mean: f64 = t01.attributes.values().iter().map(|&v| 0.7 * f64::from(v) / 100.0).sum::<f64>() / 6.0;
    assert!((r.components.attribute - (mean - 0.5) * 2.0).abs() < 1e-12);
    assert_eq!(r.components.synergy, 0.0);
}

// ─── scenario 2: domain-matched amplify ──────────────────────────────────────

#[test]
fn test_domain_matched_amplify_clears_fifty_five() {
    let m = Morphos::new();
    let l21 = m.registry().entity("L21").unwrap();
    let f51 = m.registry().force("F51").unwrap();
    assert_eq!(l21.dominant_domain(), f51.domain);
    assert_eq!(f51.action, ActionKind::Amplify);

    let t = m.transform("L21", "F51").unwrap();
    assert!(t.primary_probability >= 55);
    assert_eq!(t.primary_probability, 80);
    assert_eq!(t.primary_target, "L22");
    // Social amplify carries a category shift, but L21 has no cross path.
    assert!(t.alternatives.is_empty());
}

// ─── scenario 3: source equals target ────────────────────────────────────────

#[test]
fn test_find_paths_to_self_is_empty() {
    let m = Morphos::new();
    for id in ["T01", "L12", "V24"] {
        assert!(m.find_paths(id, id, 3).unwrap().is_empty());
    }
}

// ─── multi-step routes ───────────────────────────────────────────────────────

#[test]
fn test_best_route_up_the_physical_ladder() {
    let m = Morphos::new();
    let paths = m.find_paths("T01", "T08", 5).unwrap();
    assert_eq!(paths.len(), 5);
    assert_eq!(paths[0].entities, ["T01", "T02", "T03", "T04", "T08"]);
    assert_eq!(paths[0].step_probabilities, [80, 80, 80, 70]);
    assert!((paths[0].total_probability - 35.84).abs() < 1e-9);
    assert_eq!(paths[0].duration, DurationEstimate::days(56));
}

#[test]
fn test_cross_category_route_uses_alternative_edge() {
    let m = Morphos::new();
    let paths = m.find_paths("T03", "L03", 1).unwrap();
    // Upgrade has the largest category shift, capped at 30: one path per
    // upgrade force, in domain order.
    let forces: Vec<&str> = paths.iter().map(|p| p.forces[0].as_str()).collect();
    assert_eq!(forces, ["F09", "F21", "F33", "F45", "F57"]);
    for p in &paths {
        assert_eq!(p.step_probabilities, [30]);
        assert_eq!(m.registry().force(&p.forces[0]).unwrap().action, ActionKind::Upgrade);
    }
}

// ─── fixture registry ────────────────────────────────────────────────────────

#[test]
fn test_fixture_registry_drives_every_engine() {
    let m = Morphos::with_registry(fixture(), SearchConfig::default());
    assert_eq!(m.list_entities(None).len(), 3);

    // Explicit rule with full bonus, in both orders.
    let ab = m.interact("A1", "A2").unwrap();
    assert_eq!(ab.components.synergy, 1.0);
    assert_eq!(ab.coefficient, m.interact("A2", "A1").unwrap().coefficient);

    // Strong leader next to a strong executor.
    assert_eq!(m.interact("B1", "A1").unwrap().components.synergy, 0.5);

    // A1 → A2 under Physical amplify: 30 + 25 + 15 + 10.
    let t = m.transform("A1", "P+").unwrap();
    assert_eq!(t.primary_target, "A2");
    assert_eq!(t.primary_probability, 80);

    // A2 reaches B1 only through the cross path opened by an upgrade. The
    // off-domain upgrade also climbs A1 → A2, at the 30 base.
    let paths = m.find_paths("A1", "B1", 2).unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].entities, ["A1", "A2", "B1"]);
    assert_eq!(paths[0].forces, ["P+", "S+"]);
    assert_eq!(paths[0].step_probabilities, [80, 30]);
    assert_eq!(paths[1].forces, ["S+", "S+"]);
    assert!((paths[1].total_probability - 9.0).abs() < 1e-9);

    let leaders = EntityFilter { category: Some(Category::Leader), ..EntityFilter::default() };
    assert_eq!(m.list_entities(Some(&leaders)).len(), 1);
}

/// A talent and a leader sitting 40 apart on every dimension, with the
/// category base and the synergy bonus both at their maximum.
#[test]
fn test_composite_of_exactly_seventy_is_resonance() {
    let registry = Registry::builder()
        .entity(EntityType::new("LO", "Low", Category::Talent, 1, [30; 6]))
        .entity(EntityType::new("HI", "High", Category::Leader, 1, [70; 6]))
        .base_compatibility(Category::Talent, Category::Leader, 1.0)
        .synergy(SynergyRule::new("edge", &["LO"], &["HI"], 1.0))
        .build()
        .unwrap();
    let m = Morphos::with_registry(registry, SearchConfig::default());

    for (a, b) in [("LO", "HI"), ("HI", "LO")] {
        let r = m.interact(a, b).unwrap();
        assert_eq!(r.components.category, 1.0);
        assert_eq!(r.components.attribute, 0.0);
        assert_eq!(r.components.synergy, 1.0);
        assert_eq!(r.coefficient, 0.7);
        assert_eq!(r.classification, Classification::Resonance);
    }
}

// ─── error taxonomy ──────────────────────────────────────────────────────────

#[test]
fn test_unknown_ids_report_their_catalog() {
    let m = Morphos::new();
    assert_eq!(
        m.interact("T01", "Z99").unwrap_err(),
        Error::NotFound { kind: CatalogKind::Entity, id: "Z99".into() }
    );
    assert_eq!(
        m.transform("T01", "F73").unwrap_err(),
        Error::NotFound { kind: CatalogKind::Force, id: "F73".into() }
    );
    assert_eq!(
        m.score("T01", "F01", "W73").unwrap_err(),
        Error::NotFound { kind: CatalogKind::WorkItem, id: "W73".into() }
    );
    // Ids are case-sensitive.
    assert!(m.transform("t01", "F01").unwrap_err().is_not_found());
}

#[test]
fn test_zero_steps_is_invalid_not_empty() {
    let m = Morphos::new();
    let err = m.find_paths("T01", "T02", 0).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(!err.is_not_found());
}

#[test]
fn test_unknown_id_beats_bad_depth() {
    let m = Morphos::new();
    assert!(m.find_paths("nope", "T02", 0).unwrap_err().is_not_found());
}
