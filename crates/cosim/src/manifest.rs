// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! `manifest.json`: what a scenario run produced, with BLAKE3 digests so a
//! later run can prove it regenerates the same bits.

use crate::error::Result;
use crate::scenario::{ScenarioConfig, ScenarioOutput};
use fixmac_kernel::FixFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub format: FixFormat,
    pub dim: usize,
    pub records: usize,
    /// Lowercase hex BLAKE3 of the file bytes.
    pub blake3: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub scenario: String,
    pub kind: String,
    pub seed: u64,
    pub files: Vec<FileEntry>,
    pub overflows: usize,
    #[serde(default)]
    pub overflows_by_operator: BTreeMap<String, usize>,
}

impl Manifest {
    pub fn new(config: &ScenarioConfig, output: &ScenarioOutput) -> Self {
        let files = output
            .files
            .iter()
            .map(|f| FileEntry {
                name: f.name.clone(),
                format: f.format,
                dim: f.dim,
                records: f.records,
                blake3: to_hex(&f.digest()),
            })
            .collect();
        Self {
            scenario: config.name.clone(),
            kind: config.kind.name().to_string(),
            seed: output.seed,
            files,
            overflows: output.overflow_count(),
            overflows_by_operator: output
                .overflows
                .iter()
                .map(|(op, n)| (op.to_string(), *n))
                .collect(),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(MANIFEST_FILE), json)?;
        Ok(())
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let text = fs::read_to_string(dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn to_hex(digest: &[u8; 32]) -> String {
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Discrepancy {
    /// The regenerated file's digest differs from the manifest.
    Regenerated {
        file: String,
        expected: String,
        found: String,
    },
    /// The bytes on disk no longer match the manifest.
    OnDisk {
        file: String,
        expected: String,
        found: String,
    },
    Missing(String),
    /// Listed in one file set but not the other.
    Unexpected(String),
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub checked: usize,
    pub discrepancies: Vec<Discrepancy>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Regenerates `config` in memory and compares it against the manifest and
/// files stored in `dir`. An unseeded config reuses the recorded seed.
pub fn verify(dir: &Path, config: &ScenarioConfig) -> Result<VerifyReport> {
    let stored = Manifest::load(dir)?;
    let mut config = config.clone();
    config.seed.get_or_insert(stored.seed);
    let fresh = Manifest::new(&config, &config.render()?);
    let mut report = VerifyReport::default();

    for entry in &fresh.files {
        let Some(old) = stored.files.iter().find(|e| e.name == entry.name) else {
            report
                .discrepancies
                .push(Discrepancy::Unexpected(entry.name.clone()));
            continue;
        };
        report.checked += 1;
        if old.blake3 != entry.blake3 {
            report.discrepancies.push(Discrepancy::Regenerated {
                file: entry.name.clone(),
                expected: old.blake3.clone(),
                found: entry.blake3.clone(),
            });
        }

        let path = dir.join(&entry.name);
        if !path.exists() {
            report
                .discrepancies
                .push(Discrepancy::Missing(entry.name.clone()));
            continue;
        }
        let digest: [u8; 32] = blake3::hash(&fs::read(&path)?).into();
        let on_disk = to_hex(&digest);
        if on_disk != old.blake3 {
            report.discrepancies.push(Discrepancy::OnDisk {
                file: entry.name.clone(),
                expected: old.blake3.clone(),
                found: on_disk,
            });
        }
    }
    for old in &stored.files {
        if !fresh.files.iter().any(|e| e.name == old.name) {
            report
                .discrepancies
                .push(Discrepancy::Unexpected(old.name.clone()));
        }
    }

    if report.is_ok() {
        tracing::info!(scenario = %config.name, files = report.checked, "verified");
    } else {
        tracing::warn!(
            scenario = %config.name,
            discrepancies = report.discrepancies.len(),
            "verification failed"
        );
    }
    Ok(report)
}
