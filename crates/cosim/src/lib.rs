// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Golden-output generation for hardware co-simulation.

pub mod config;
pub mod error;
pub mod manifest;
pub mod scenario;
pub mod suite;
pub mod writer;

pub use config::{load_scenarios, parse_scenarios, GeneratorConfig};
pub use error::{CosimError, Result};
pub use manifest::{verify, Discrepancy, Manifest, VerifyReport};
pub use scenario::{generate, GenerationReport, ScenarioConfig, ScenarioKind};
pub use suite::{builtin_suite, find_builtin, run_batch, BatchReport};
pub use writer::{CosimFile, CosimWriter};
