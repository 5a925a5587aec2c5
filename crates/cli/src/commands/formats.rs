// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use fixmac_kernel::{derive_add_format, derive_mult_format, FixFormat};

/// Prints both operand formats and the exact product and sum formats.
pub fn run(a: &str, b: &str) -> anyhow::Result<()> {
    let fa: FixFormat = a.parse().with_context(|| format!("Invalid format {a:?}"))?;
    let fb: FixFormat = b.parse().with_context(|| format!("Invalid format {b:?}"))?;
    let rows = vec![
        ("A", fa),
        ("B", fb),
        ("A * B", derive_mult_format(fa, fb)?),
        ("A + B", derive_add_format(fa, fb)?),
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "Format", "Width", "Min", "Max", "Step"]);
    for (label, f) in rows {
        table.add_row(vec![
            label.to_string(),
            f.to_string(),
            f.width().to_string(),
            f.min_value().to_string(),
            f.max_value().to_string(),
            f.step().to_string(),
        ]);
    }

    println!("\n{table}\n");
    Ok(())
}
