// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Built-in scenario suite and the batch runner.

use crate::config::GeneratorConfig;
use crate::error::{CosimError, Result};
use crate::scenario::{generate, GenerationReport, ScenarioConfig, ScenarioKind};
use fixmac_kernel::config::{DEFAULT_ROUND, DEFAULT_SATURATE};
use fixmac_kernel::{FixFormat, FormatError, MatrixPattern};

fn parse(s: &str) -> std::result::Result<FixFormat, FormatError> {
    s.parse()
}

fn scenario(name: &str, kind: ScenarioKind) -> ScenarioConfig {
    ScenarioConfig {
        name: name.to_string(),
        seed: None,
        round: DEFAULT_ROUND,
        saturate: DEFAULT_SATURATE,
        kind,
    }
}

fn dsp_mac(name: &str, [a, b, add, result]: [&str; 4]) -> Result<ScenarioConfig> {
    Ok(scenario(
        name,
        ScenarioKind::DspMac {
            fmt_mult_a: parse(a)?,
            fmt_mult_b: parse(b)?,
            fmt_add: parse(add)?,
            fmt_result: parse(result)?,
        },
    ))
}

fn dot_product(name: &str, dimension: usize, [a, b, result]: [&str; 3]) -> Result<ScenarioConfig> {
    Ok(scenario(
        name,
        ScenarioKind::DotProduct {
            dimension,
            fmt_a: parse(a)?,
            fmt_b: parse(b)?,
            fmt_result: parse(result)?,
            num_random: 3,
        },
    ))
}

fn matrix_vector(
    name: &str,
    (num_test_vectors, matrix_pattern, rows, cols): (usize, MatrixPattern, usize, usize),
    [matrix, vector, result]: [&str; 3],
) -> Result<ScenarioConfig> {
    Ok(scenario(
        name,
        ScenarioKind::MatrixVectorProduct {
            rows,
            cols,
            num_test_vectors,
            matrix_pattern,
            fmt_matrix: parse(matrix)?,
            fmt_vector: parse(vector)?,
            fmt_result: parse(result)?,
        },
    ))
}

/// The nine reference configurations, three per scenario kind.
pub fn builtin_suite() -> Result<Vec<ScenarioConfig>> {
    use MatrixPattern::{Ascending, Descending};
    Ok(vec![
        dsp_mac("dsp_mac_u4_4", ["(0,4,4)", "(0,4,4)", "(0,8,8)", "(0,9,8)"])?,
        dsp_mac("dsp_mac_s5_8", ["(1,5,8)", "(1,7,9)", "(1,13,17)", "(1,14,17)"])?,
        dsp_mac("dsp_mac_mixed", ["(0,11,-4)", "(1,6,2)", "(0,4,5)", "(1,17,5)"])?,
        dot_product("dot_product_d4", 4, ["(0,4,4)", "(0,4,4)", "(0,10,8)"])?,
        dot_product("dot_product_d32", 32, ["(1,3,2)", "(1,5,8)", "(1,13,10)"])?,
        dot_product("dot_product_d100", 100, ["(1,7,-2)", "(0,2,8)", "(0,16,6)"])?,
        matrix_vector(
            "mvp_32x32_desc",
            (16, Descending, 32, 32),
            ["(0,4,12)", "(0,4,12)", "(0,13,24)"],
        )?,
        matrix_vector(
            "mvp_4x4_asc",
            (8, Ascending, 4, 4),
            ["(0,8,1)", "(0,3,5)", "(0,13,6)"],
        )?,
        matrix_vector(
            "mvp_17x4_desc",
            (10, Descending, 17, 4),
            ["(0,3,8)", "(0,8,4)", "(0,13,12)"],
        )?,
    ])
}

pub fn find_builtin(name: &str) -> Result<ScenarioConfig> {
    builtin_suite()?
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| CosimError::UnknownScenario(name.to_string()))
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<GenerationReport>,
    pub failed: Vec<(String, CosimError)>,
}

impl BatchReport {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_overflows(&self) -> usize {
        self.succeeded.iter().map(|r| r.manifest.overflows).sum()
    }
}

/// Runs every scenario into `output_root/<name>`.
///
/// A failing scenario is recorded and the batch moves on, unless
/// `fail_fast` is set. Scenarios without a seed use the batch seed.
pub fn run_batch(config: &GeneratorConfig, scenarios: &[ScenarioConfig]) -> BatchReport {
    let mut report = BatchReport::default();
    for scenario in scenarios {
        let mut scenario = scenario.clone();
        scenario.seed.get_or_insert(config.seed);
        let dir = config.output_root.join(&scenario.name);

        match generate(&dir, &scenario) {
            Ok(generated) => report.succeeded.push(generated),
            Err(e) => {
                tracing::error!(scenario = %scenario.name, error = %e, "scenario failed");
                report.failed.push((scenario.name.clone(), e));
                if config.fail_fast {
                    break;
                }
            }
        }
    }
    tracing::info!(
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        overflows = report.total_overflows(),
        "batch finished"
    );
    report
}
