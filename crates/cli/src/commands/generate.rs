// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::{bail, Context};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use fixmac_cosim::{load_scenarios, run_batch, BatchReport, GeneratorConfig, ScenarioConfig};
use std::path::Path;

pub fn run(
    config_path: &Path,
    out: &Path,
    seed: Option<u64>,
    fail_fast: bool,
) -> anyhow::Result<()> {
    let scenarios = load_scenarios(config_path)
        .with_context(|| format!("Failed to load scenarios from {}", config_path.display()))?;
    run_scenarios(&scenarios, out, seed, fail_fast)
}

/// Runs a batch, prints the summary table and fails if any scenario failed.
pub fn run_scenarios(
    scenarios: &[ScenarioConfig],
    out: &Path,
    seed: Option<u64>,
    fail_fast: bool,
) -> anyhow::Result<()> {
    let mut config = GeneratorConfig {
        output_root: out.to_path_buf(),
        fail_fast,
        ..GeneratorConfig::default()
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let report = run_batch(&config, scenarios);
    print_report(&report);

    if !report.is_ok() {
        bail!(
            "{} of {} scenarios failed",
            report.failed.len(),
            report.failed.len() + report.succeeded.len()
        );
    }
    Ok(())
}

pub fn print_report(report: &BatchReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Scenario", "Status", "Files", "Overflows", "Details"]);

    for generated in &report.succeeded {
        let m = &generated.manifest;
        table.add_row(vec![
            m.scenario.clone(),
            "OK".to_string(),
            m.files.len().to_string(),
            m.overflows.to_string(),
            format!("{} (seed {})", generated.dir.display(), m.seed),
        ]);
    }
    for (name, err) in &report.failed {
        table.add_row(vec![
            name.clone(),
            "FAILED".to_string(),
            "-".to_string(),
            "-".to_string(),
            err.to_string(),
        ]);
    }

    println!("\nGeneration Report\n");
    println!("{table}\n");
}
