use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use depthgen_core::logging::{LogLevel, TracingConfig, init_tracing};
use depthgen_core::mapgen::{SpawnTable, max_for_floor, sample_entities};
use depthgen_core::{DungeonConfig, SpawnConfig, Template};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TableKind {
    Monsters,
    Items,
}

#[derive(Parser)]
#[command(author, version, about = "Sample a spawn table and report the distribution", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1)]
    floor: u32,
    /// Number of independent draws
    #[arg(short = 'n', long, default_value_t = 100_000)]
    samples: usize,
    #[arg(short, long, value_enum, default_value_t = TableKind::Monsters)]
    table: TableKind,
    /// TOML config whose `[spawns]` section replaces the standard tables
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TemplateStats {
    template: Template,
    weight: f64,
    expected: f64,
    observed: f64,
    count: usize,
}

#[derive(Serialize)]
struct Report {
    floor: u32,
    samples: usize,
    max_per_room: i32,
    templates: Vec<TemplateStats>,
}

fn build_report(
    table: &SpawnTable,
    max_per_room: i32,
    floor: u32,
    samples: usize,
    seed: u64,
) -> Result<Report> {
    let eligible = table
        .eligible_at(floor)
        .with_context(|| format!("Failed to evaluate spawn weights at floor {floor}"))?;
    let total_weight: f64 = eligible.iter().map(|&(_, weight)| weight).sum();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let drawn = sample_entities(table, samples, floor, &mut rng)
        .with_context(|| format!("Failed to sample floor {floor}"))?;
    let mut counts: BTreeMap<Template, usize> = BTreeMap::new();
    for template in drawn {
        *counts.entry(template).or_insert(0) += 1;
    }

    let templates = eligible
        .into_iter()
        .map(|(template, weight)| {
            let count = counts.get(&template).copied().unwrap_or(0);
            TemplateStats {
                template,
                weight,
                expected: weight / total_weight,
                observed: count as f64 / samples.max(1) as f64,
                count,
            }
        })
        .collect();

    Ok(Report { floor, samples, max_per_room, templates })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&TracingConfig::with_generation_level(LogLevel::Info));

    let spawns = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading spawn tables");
            DungeonConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
                .spawns
        }
        None => SpawnConfig::standard(),
    };

    let (table, cap_curve) = match args.table {
        TableKind::Monsters => (&spawns.monsters, &spawns.max_monsters_per_room),
        TableKind::Items => (&spawns.items, &spawns.max_items_per_room),
    };
    let max_per_room = max_for_floor(cap_curve, args.floor)
        .with_context(|| format!("Failed to evaluate the per-room cap at floor {}", args.floor))?;

    let report = build_report(table, max_per_room, args.floor, args.samples, args.seed)?;
    if report.templates.is_empty() {
        bail!("nothing in the {:?} table can spawn on floor {}", args.table, args.floor);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "Floor {}: {} draws, up to {} per room",
        report.floor, report.samples, report.max_per_room
    );
    for stats in &report.templates {
        println!(
            "{:<18} weight {:>6.2}  expected {:>6.2}%  observed {:>6.2}%  ({})",
            stats.template.key(),
            stats.weight,
            stats.expected * 100.0,
            stats.observed * 100.0,
            stats.count
        );
    }

    Ok(())
}
