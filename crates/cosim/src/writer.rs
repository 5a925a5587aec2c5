// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Co-simulation interchange files.
//!
//! One record per line. A record holds `dim` values separated by a single
//! space; each value is the stored bit pattern of its scaled integer
//! (two's complement within the format width), as lowercase hex padded to
//! `ceil(width / 4)` digits. The file carries no header: the test bench
//! knows the format of every signal.

use crate::error::{CosimError, Result};
use fixmac_kernel::{FixFormat, FixValue};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use std::fs;
use std::path::{Path, PathBuf};

/// A rendered signal file, not yet on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosimFile {
    pub name: String,
    pub format: FixFormat,
    pub dim: usize,
    pub records: usize,
    pub contents: String,
}

impl CosimFile {
    /// One value per record.
    pub fn from_values(
        name: impl Into<String>,
        values: &[FixValue],
        format: FixFormat,
    ) -> Result<Self> {
        let name = name.into();
        let mut contents = String::new();
        for v in values {
            check_format(&name, v, format)?;
            contents.push_str(&encode_value(v));
            contents.push('\n');
        }
        Ok(Self {
            name,
            format,
            dim: 1,
            records: values.len(),
            contents,
        })
    }

    /// `dim` values per record; every record must have exactly `dim` values.
    pub fn from_records<R: AsRef<[FixValue]>>(
        name: impl Into<String>,
        records: &[R],
        format: FixFormat,
        dim: usize,
    ) -> Result<Self> {
        let name = name.into();
        let mut contents = String::new();
        for (line, record) in records.iter().enumerate() {
            let record = record.as_ref();
            if record.len() != dim {
                return Err(CosimError::InvalidRecordShape {
                    file: name,
                    line: line + 1,
                    expected: dim,
                    actual: record.len(),
                });
            }
            for (i, v) in record.iter().enumerate() {
                check_format(&name, v, format)?;
                if i > 0 {
                    contents.push(' ');
                }
                contents.push_str(&encode_value(v));
            }
            contents.push('\n');
        }
        Ok(Self {
            name,
            format,
            dim,
            records: records.len(),
            contents,
        })
    }

    pub fn digest(&self) -> [u8; 32] {
        blake3::hash(self.contents.as_bytes()).into()
    }
}

fn check_format(file: &str, v: &FixValue, format: FixFormat) -> Result<()> {
    if v.format() != format {
        return Err(CosimError::FormatMismatch {
            file: file.to_string(),
            expected: format,
            found: v.format(),
        });
    }
    Ok(())
}

fn hex_digits(format: FixFormat) -> usize {
    (format.width() as usize + 3) / 4
}

/// Stored bits of `v` as zero-padded lowercase hex.
pub fn encode_value(v: &FixValue) -> String {
    let digits = hex_digits(v.format());
    format!("{:0>digits$}", v.to_bits().to_str_radix(16))
}

/// Inverse of [`encode_value`].
pub fn decode_value(token: &str, format: FixFormat) -> Option<FixValue> {
    if token.is_empty() || token.len() > hex_digits(format) {
        return None;
    }
    let bits = BigInt::parse_bytes(token.as_bytes(), 16)?;
    let width = format.width() as usize;
    let modulus = BigInt::one() << width;
    if bits < BigInt::zero() || bits >= modulus {
        return None;
    }
    let raw = if format.signed() && bits >= (BigInt::one() << (width - 1)) {
        bits - modulus
    } else {
        bits
    };
    FixValue::new(raw, format).ok()
}

/// Parses a signal file back into records of `dim` values.
pub fn read_records(path: &Path, format: FixFormat, dim: usize) -> Result<Vec<Vec<FixValue>>> {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = fs::read_to_string(path)?;

    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split(' ').collect();
        if tokens.len() != dim {
            return Err(CosimError::InvalidRecordShape {
                file,
                line: i + 1,
                expected: dim,
                actual: tokens.len(),
            });
        }
        let record = tokens
            .iter()
            .map(|t| {
                decode_value(t, format).ok_or_else(|| CosimError::InvalidValue {
                    file: file.clone(),
                    line: i + 1,
                    token: t.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        records.push(record);
    }
    Ok(records)
}

/// Writes rendered files into one output directory.
pub struct CosimWriter {
    dir: PathBuf,
}

impl CosimWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn write(&self, file: &CosimFile) -> Result<PathBuf> {
        let path = self.dir.join(&file.name);
        fs::write(&path, file.contents.as_bytes())?;
        tracing::info!(
            file = %file.name,
            format = %file.format,
            records = file.records,
            "wrote cosim file"
        );
        Ok(path)
    }
}
