// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::Result;
use crate::scenario::ScenarioConfig;
use fixmac_kernel::config::DEFAULT_SEED;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings shared by every scenario of one batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Each scenario writes into `output_root/<name>`.
    pub output_root: PathBuf,
    /// Used by scenarios that do not set their own seed.
    pub seed: u64,
    /// Stop at the first failing scenario instead of recording it.
    pub fail_fast: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("cosim"),
            seed: DEFAULT_SEED,
            fail_fast: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioFile {
    Many(Vec<ScenarioConfig>),
    One(Box<ScenarioConfig>),
}

/// Parses a JSON scenario list; a single object counts as a list of one.
pub fn parse_scenarios(json: &str) -> Result<Vec<ScenarioConfig>> {
    Ok(match serde_json::from_str(json)? {
        ScenarioFile::Many(list) => list,
        ScenarioFile::One(one) => vec![*one],
    })
}

pub fn load_scenarios(path: &Path) -> Result<Vec<ScenarioConfig>> {
    let text = fs::read_to_string(path)?;
    let scenarios = parse_scenarios(&text)?;
    tracing::debug!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioKind;
    use fixmac_kernel::{MatrixPattern, RoundMode, SaturateMode};

    #[test]
    fn test_single_object() {
        let json = r#"{
            "kind": "dot_product",
            "name": "dot4",
            "dimension": 4,
            "fmt_a": "(0,4,4)",
            "fmt_b": "(0,4,4)",
            "fmt_result": "(0,10,8)"
        }"#;
        let scenarios = parse_scenarios(json).unwrap();
        assert_eq!(scenarios.len(), 1);
        let s = &scenarios[0];
        assert_eq!(s.name, "dot4");
        assert_eq!(s.seed, None);
        assert_eq!(s.round, RoundMode::Truncate);
        assert_eq!(s.saturate, SaturateMode::SaturateWarn);
        assert!(matches!(
            s.kind,
            ScenarioKind::DotProduct { dimension: 4, num_random: 3, .. }
        ));
    }

    #[test]
    fn test_array_with_overrides() {
        let json = r#"[
            {
                "kind": "dsp_mac",
                "name": "mac",
                "seed": 7,
                "round": "conv_even",
                "saturate": "wrap",
                "fmt_mult_a": "(1,5,8)",
                "fmt_mult_b": "(1,7,9)",
                "fmt_add": "(1,13,17)",
                "fmt_result": "(1,14,17)"
            },
            {
                "kind": "matrix_vector_product",
                "name": "mvp",
                "rows": 4,
                "cols": 4,
                "num_test_vectors": 8,
                "matrix_pattern": "ASCENDING",
                "fmt_matrix": "(0,8,1)",
                "fmt_vector": "(0,3,5)",
                "fmt_result": "(0,13,6)"
            }
        ]"#;
        let scenarios = parse_scenarios(json).unwrap();
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].seed, Some(7));
        assert_eq!(scenarios[0].round, RoundMode::ConvEven);
        assert_eq!(scenarios[0].saturate, SaturateMode::Wrap);
        assert!(matches!(
            scenarios[1].kind,
            ScenarioKind::MatrixVectorProduct {
                matrix_pattern: MatrixPattern::Ascending,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_format_is_rejected() {
        let json = r#"{
            "kind": "dot_product",
            "name": "bad",
            "dimension": 4,
            "fmt_a": "(0,0,0)",
            "fmt_b": "(0,4,4)",
            "fmt_result": "(0,10,8)"
        }"#;
        assert!(parse_scenarios(json).is_err());
    }

    #[test]
    fn test_default_generator_config() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.seed, 42);
        assert!(!cfg.fail_fast);
    }
}
