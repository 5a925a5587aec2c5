// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Scenario definitions and golden-output generation.
//!
//! A scenario builds its stimulus from one seeded generator, runs it through
//! the fixed-point operators and renders every signal as a cosim file. The
//! draw order is fixed per scenario kind so a seed always reproduces the same
//! files.

use crate::error::Result;
use crate::manifest::Manifest;
use crate::writer::{CosimFile, CosimWriter};
use fixmac_kernel::config::DEFAULT_SEED;
use fixmac_kernel::{
    derive_mult_format, FixAdder, FixDotProduct, FixFormat, FixMultiplier, FixOperator,
    FixValue, MatrixPattern, MatrixVectorProduct, OverflowLog, RoundMode, SaturateMode,
    StimulusGenerator, SweepDirection,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DSP_SAMPLES: usize = 200;
const DSP_SWEEP: usize = 100;

fn default_random_vectors() -> usize {
    3
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub round: RoundMode,
    #[serde(default)]
    pub saturate: SaturateMode,
    #[serde(flatten)]
    pub kind: ScenarioKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// `a * b + add`, sample by sample.
    DspMac {
        fmt_mult_a: FixFormat,
        fmt_mult_b: FixFormat,
        fmt_add: FixFormat,
        fmt_result: FixFormat,
    },
    /// Every pairing of two vector sets through one dot product.
    DotProduct {
        dimension: usize,
        fmt_a: FixFormat,
        fmt_b: FixFormat,
        fmt_result: FixFormat,
        #[serde(default = "default_random_vectors")]
        num_random: usize,
    },
    /// A pattern matrix against a set of test vectors.
    MatrixVectorProduct {
        rows: usize,
        cols: usize,
        num_test_vectors: usize,
        matrix_pattern: MatrixPattern,
        fmt_matrix: FixFormat,
        fmt_vector: FixFormat,
        fmt_result: FixFormat,
    },
}

impl ScenarioKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::DspMac { .. } => "dsp_mac",
            ScenarioKind::DotProduct { .. } => "dot_product",
            ScenarioKind::MatrixVectorProduct { .. } => "matrix_vector_product",
        }
    }
}

/// Rendered files of one scenario plus its overflow tally.
#[derive(Debug)]
pub struct ScenarioOutput {
    pub seed: u64,
    pub files: Vec<CosimFile>,
    pub overflows: Vec<(&'static str, usize)>,
}

impl ScenarioOutput {
    pub fn overflow_count(&self) -> usize {
        self.overflows.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug)]
pub struct GenerationReport {
    pub name: String,
    pub dir: PathBuf,
    pub manifest: Manifest,
}

impl ScenarioConfig {
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Computes every file in memory without touching the filesystem.
    pub fn render(&self) -> Result<ScenarioOutput> {
        let seed = self.effective_seed();
        let mut stim = StimulusGenerator::new(seed);
        let mut log = OverflowLog::new();

        let files = match &self.kind {
            ScenarioKind::DspMac {
                fmt_mult_a,
                fmt_mult_b,
                fmt_add,
                fmt_result,
            } => self.render_dsp_mac(
                &mut stim,
                &mut log,
                [*fmt_mult_a, *fmt_mult_b, *fmt_add, *fmt_result],
            )?,
            ScenarioKind::DotProduct {
                dimension,
                fmt_a,
                fmt_b,
                fmt_result,
                num_random,
            } => {
                let dot =
                    FixDotProduct::new(*fmt_a, *fmt_b, *fmt_result, self.round, self.saturate)?;
                let set_a = stim.vector_set(*fmt_a, *dimension, *num_random)?;
                let set_b = stim.vector_set(*fmt_b, *dimension, *num_random)?;
                let (left, right) = StimulusGenerator::cross_product(&set_a, &set_b);

                let results = left
                    .iter()
                    .zip(&right)
                    .map(|(a, b)| dot.calc(a, b, &mut log))
                    .collect::<fixmac_kernel::Result<Vec<_>>>()?;

                vec![
                    CosimFile::from_records("vector_a.fix", &left, *fmt_a, *dimension)?,
                    CosimFile::from_records("vector_b.fix", &right, *fmt_b, *dimension)?,
                    CosimFile::from_values("result.fix", &results, *fmt_result)?,
                ]
            }
            ScenarioKind::MatrixVectorProduct {
                rows,
                cols,
                num_test_vectors,
                matrix_pattern,
                fmt_matrix,
                fmt_vector,
                fmt_result,
            } => {
                let mvp = MatrixVectorProduct::new(
                    *fmt_matrix,
                    *fmt_vector,
                    *fmt_result,
                    self.round,
                    self.saturate,
                )?;
                let vectors =
                    stim.vector_set(*fmt_vector, *cols, num_test_vectors.saturating_sub(2))?;
                let matrix = stim.matrix(*fmt_matrix, *rows, *cols, *matrix_pattern);

                let results = vectors
                    .iter()
                    .map(|v| mvp.calc(&matrix, v, &mut log))
                    .collect::<fixmac_kernel::Result<Vec<_>>>()?;

                vec![
                    CosimFile::from_records("in_matrix.fix", &matrix, *fmt_matrix, *cols)?,
                    CosimFile::from_records("in_vector.fix", &vectors, *fmt_vector, *cols)?,
                    CosimFile::from_records("result.fix", &results, *fmt_result, *rows)?,
                ]
            }
        };

        Ok(ScenarioOutput {
            seed,
            files,
            overflows: log.summary(),
        })
    }

    fn render_dsp_mac(
        &self,
        stim: &mut StimulusGenerator,
        log: &mut OverflowLog,
        [fmt_a, fmt_b, fmt_add, fmt_result]: [FixFormat; 4],
    ) -> Result<Vec<CosimFile>> {
        let fmt_product = derive_mult_format(fmt_a, fmt_b)?;
        let mult = FixMultiplier::new(fmt_a, fmt_b, fmt_product, self.round, self.saturate)?;
        let add = FixAdder::new(fmt_product, fmt_add, fmt_result, self.round, self.saturate)?;

        let mult_a = [
            stim.sweep(fmt_a, DSP_SWEEP, SweepDirection::Forward)?,
            stim.uniform(fmt_a, DSP_SAMPLES - DSP_SWEEP)?,
        ]
        .concat();
        let mult_b = up_down_random(stim, fmt_b)?;
        let add_in = up_down_random(stim, fmt_add)?;

        let products = mult.process_slice(&mult_a, &mult_b, log)?;
        let results = add.process_slice(&products, &add_in, log)?;

        Ok(vec![
            CosimFile::from_values("in_mult_a_i.fix", &mult_a, fmt_a)?,
            CosimFile::from_values("in_mult_b_i.fix", &mult_b, fmt_b)?,
            CosimFile::from_values("in_add_i.fix", &add_in, fmt_add)?,
            CosimFile::from_values("out_result_o.fix", &results, fmt_result)?,
        ])
    }
}

/// Half the sweep up, half back down, then uniform fill.
fn up_down_random(stim: &mut StimulusGenerator, fmt: FixFormat) -> Result<Vec<FixValue>> {
    let half = DSP_SWEEP / 2;
    Ok([
        stim.sweep(fmt, half, SweepDirection::Forward)?,
        stim.sweep(fmt, half, SweepDirection::Reverse)?,
        stim.uniform(fmt, DSP_SAMPLES - DSP_SWEEP)?,
    ]
    .concat())
}

/// Renders the scenario and writes its files plus `manifest.json` into
/// `output_dir`.
pub fn generate(output_dir: &Path, config: &ScenarioConfig) -> Result<GenerationReport> {
    let span = tracing::info_span!("scenario", name = %config.name, kind = config.kind.name());
    let _guard = span.enter();

    let output = config.render()?;
    let writer = CosimWriter::new(output_dir)?;
    for file in &output.files {
        writer.write(file)?;
    }

    let manifest = Manifest::new(config, &output);
    manifest.write_to(output_dir)?;

    tracing::info!(
        files = output.files.len(),
        overflows = output.overflow_count(),
        seed = output.seed,
        "scenario generated"
    );
    Ok(GenerationReport {
        name: config.name.clone(),
        dir: output_dir.to_path_buf(),
        manifest,
    })
}
