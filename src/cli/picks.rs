use anyhow::{Context, Result};
use std::path::PathBuf;

use xpick::config::SessionConfig;
use xpick::picks::PickStore;
use xpick::timefmt::format_timestamp;

/// Load a pick file against the configured phases and summarize it
pub fn run(file: PathBuf, config: SessionConfig) -> Result<()> {
    let phases = config.build_phases()?;
    for warning in phases.warnings() {
        eprintln!("warning: {}", warning);
    }

    let mut store = PickStore::new();
    store
        .load(&file, &phases)
        .with_context(|| format!("Failed to load picks from {}", file.display()))?;

    println!("xpick Pick File");
    println!("===============");
    println!("File: {}", file.display());
    println!("Picks: {}", store.len());
    println!();

    for phase in &phases {
        let picks: Vec<_> = store.iter().filter(|p| p.phase == phase.label).collect();
        if picks.is_empty() {
            println!("  {:<6} {} (no picks)", phase.label, phase.color);
            continue;
        }
        let first = picks.iter().map(|p| p.time).min().unwrap_or_default();
        let last = picks.iter().map(|p| p.time).max().unwrap_or_default();
        let nearest = picks.iter().map(|p| p.distance).fold(f64::INFINITY, f64::min);
        let farthest = picks
            .iter()
            .map(|p| p.distance)
            .fold(f64::NEG_INFINITY, f64::max);
        println!(
            "  {:<6} {} {:>5} picks, {} .. {}, {:.1} .. {:.1} m",
            phase.label,
            phase.color,
            picks.len(),
            format_timestamp(&first),
            format_timestamp(&last),
            nearest,
            farthest
        );
    }
    Ok(())
}
