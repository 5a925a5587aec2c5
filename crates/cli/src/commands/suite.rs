// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::generate::run_scenarios;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use fixmac_cosim::{builtin_suite, find_builtin, ScenarioKind};
use std::path::Path;

/// Generates the built-in suite, or just the named scenario.
pub fn run(
    out: &Path,
    only: Option<&str>,
    seed: Option<u64>,
    fail_fast: bool,
) -> anyhow::Result<()> {
    let scenarios = match only {
        Some(name) => vec![find_builtin(name)?],
        None => builtin_suite()?,
    };
    run_scenarios(&scenarios, out, seed, fail_fast)
}

/// Prints the built-in scenarios without generating anything.
pub fn list() -> anyhow::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Scenario", "Kind", "Formats"]);

    for s in builtin_suite()? {
        let formats = match &s.kind {
            ScenarioKind::DspMac {
                fmt_mult_a,
                fmt_mult_b,
                fmt_add,
                fmt_result,
            } => format!("{fmt_mult_a} * {fmt_mult_b} + {fmt_add} -> {fmt_result}"),
            ScenarioKind::DotProduct {
                dimension,
                fmt_a,
                fmt_b,
                fmt_result,
                ..
            } => format!("[{dimension}] {fmt_a} . {fmt_b} -> {fmt_result}"),
            ScenarioKind::MatrixVectorProduct {
                rows,
                cols,
                fmt_matrix,
                fmt_vector,
                fmt_result,
                ..
            } => format!("[{rows}x{cols}] {fmt_matrix} x {fmt_vector} -> {fmt_result}"),
        };
        table.add_row(vec![s.name.clone(), s.kind.name().to_string(), formats]);
    }

    println!("\nBuilt-in Scenarios\n");
    println!("{table}\n");
    Ok(())
}
