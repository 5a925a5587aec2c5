// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::{bail, Context};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use fixmac_cosim::{builtin_suite, load_scenarios, verify, Discrepancy};
use std::path::Path;

/// Regenerates each scenario and compares it against `dir/<name>`.
/// Without a config the built-in suite is checked.
pub fn run(config_path: Option<&Path>, dir: &Path) -> anyhow::Result<()> {
    let scenarios = match config_path {
        Some(path) => load_scenarios(path)
            .with_context(|| format!("Failed to load scenarios from {}", path.display()))?,
        None => builtin_suite()?,
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Scenario", "Status", "Details"]);

    let mut failures = 0;
    for scenario in &scenarios {
        let scenario_dir = dir.join(&scenario.name);
        let report = verify(&scenario_dir, scenario)
            .with_context(|| format!("Failed to verify {}", scenario_dir.display()))?;

        if report.is_ok() {
            table.add_row(vec![
                scenario.name.clone(),
                "VERIFIED".to_string(),
                format!("{} files, BLAKE3", report.checked),
            ]);
        } else {
            failures += 1;
            let details: Vec<String> = report.discrepancies.iter().map(describe).collect();
            table.add_row(vec![
                scenario.name.clone(),
                "MISMATCH".to_string(),
                details.join("\n"),
            ]);
        }
    }

    println!("\nVerification Report\n");
    println!("{table}\n");

    if failures > 0 {
        bail!("{failures} of {} scenarios do not match", scenarios.len());
    }
    Ok(())
}

fn describe(d: &Discrepancy) -> String {
    match d {
        Discrepancy::Regenerated {
            file,
            expected,
            found,
        } => format!("{file}: regenerated {}, manifest {}", short(found), short(expected)),
        Discrepancy::OnDisk {
            file,
            expected,
            found,
        } => format!("{file}: on disk {}, manifest {}", short(found), short(expected)),
        Discrepancy::Missing(file) => format!("{file}: missing"),
        Discrepancy::Unexpected(file) => format!("{file}: not in both file sets"),
    }
}

fn short(digest: &str) -> &str {
    digest.get(..16).unwrap_or(digest)
}
