//! # Morphos walkthrough
//!
//! Tours the four engines over the built-in catalog: who works well with a
//! commander, what a social amplify does to them, how a laborer climbs to
//! dispatcher, and which forces best suit a piece of work.
//!
//! ```bash
//! RUST_LOG=morphos_core=debug cargo run --example walkthrough
//! ```

use morphos_core::{Category, EntityFilter, Morphos, Result};
use tracing_subscriber::EnvFilter;

// ── Display helpers ───────────────────────────────────────────────────────────

fn bar(v: f64, max: f64) -> String {
    let filled = ((v / max).clamp(0.0, 1.0) * 20.0).round() as usize;
    let empty = 20usize.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

fn heading(title: &str) {
    println!("\n── {title} {}", "─".repeat(70usize.saturating_sub(title.len() + 4)));
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║  Morphos — taxonomy, compatibility, transformation, path search     ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝");

    let m = Morphos::new();
    let leaders = EntityFilter { category: Some(Category::Leader), ..EntityFilter::default() };
    println!(
        "\n  {} entities ({} leaders), {} forces, {} work items",
        m.list_entities(None).len(),
        m.list_entities(Some(&leaders)).len(),
        m.list_forces(None).len(),
        m.list_work_items(None).len(),
    );

    heading("Best partners for L21");
    for r in m.rank_partners("L21", 5)? {
        let name = &m.registry().entity(&r.entity_b)?.name;
        println!(
            "  {:<4} {:<18} {} {:+.2} {:<9} {}",
            r.entity_b,
            name,
            bar(r.coefficient + 1.0, 2.0),
            r.coefficient,
            r.classification.label(),
            r.outcome_text,
        );
    }

    heading("L21 under F51");
    let t = m.transform("L21", "F51")?;
    println!(
        "  {} → {} at {}% | {:?} | {} days | cost ×{:.2} | reversible: {}",
        t.source, t.primary_target, t.primary_probability, t.difficulty, t.duration.days, t.cost_multiplier, t.reversible,
    );
    for s in &t.side_effects {
        println!("    {:<10} {:+}", s.domain.to_string(), s.magnitude);
    }
    for roll in [10, 79, 80, 99] {
        println!("    roll {roll:>2} → {}", t.outcome_for_roll(roll));
    }

    heading("T03 under F09 (upgrade opens a cross-category route)");
    let t = m.transform("T03", "F09")?;
    println!("  primary {} at {}%", t.primary_target, t.primary_probability);
    for alt in &t.alternatives {
        println!("  alt     {} at {}% — {}", alt.target, alt.probability, alt.condition);
    }

    heading("Routes T01 → T08 within 5 steps");
    for p in m.find_paths("T01", "T08", 5)? {
        println!(
            "  {} {:>6.2}% | {:>3} days | {} via {}",
            bar(p.total_probability, 100.0),
            p.total_probability,
            p.duration.days,
            p.entities.join(" → "),
            p.forces.join(", "),
        );
    }

    heading("Forces for L21 on W27");
    let work = m.registry().work_item("W27")?;
    println!("  {} ({}, difficulty {})", work.name, work.domain, work.difficulty);
    for rec in m.recommend_forces("L21", "W27", 5)? {
        let force = m.registry().force(&rec.force)?;
        println!(
            "  {:<4} {:<24} {} {:>3} (ef {} fw {} ew {} adj {:+})",
            rec.force,
            force.name,
            bar(f64::from(rec.score.total), 100.0),
            rec.score.total,
            rec.score.entity_force,
            rec.score.force_work,
            rec.score.entity_work,
            rec.score.difficulty_adjustment,
        );
    }

    Ok(())
}
