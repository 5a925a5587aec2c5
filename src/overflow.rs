// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Non-fatal overflow notifications.
//!
//! Operators configured with a reporting saturation mode push a notice here
//! instead of failing; the batch keeps going like the hardware does.

use crate::format::FixFormat;
use crate::value::FixValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverflowNotice {
    /// Operator that produced the value (`"mult"`, `"add"`, ...).
    pub operator: &'static str,
    /// Exact value before narrowing.
    pub exact: FixValue,
    pub target: FixFormat,
    /// Value actually produced (clamped or wrapped).
    pub result: FixValue,
}

/// Overflow notices collected during one generation pass.
#[derive(Debug, Default)]
pub struct OverflowLog {
    notices: Vec<OverflowNotice>,
}

impl OverflowLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, notice: OverflowNotice) {
        tracing::warn!(
            operator = notice.operator,
            target = %notice.target,
            exact = notice.exact.to_real(),
            result = notice.result.to_real(),
            "fixed-point overflow"
        );
        self.notices.push(notice);
    }

    pub fn count(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn notices(&self) -> &[OverflowNotice] {
        &self.notices
    }

    /// Count per operator name, in first-seen order.
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        let mut summary: Vec<(&'static str, usize)> = Vec::new();
        for notice in &self.notices {
            match summary.iter_mut().find(|(op, _)| *op == notice.operator) {
                Some((_, n)) => *n += 1,
                None => summary.push((notice.operator, 1)),
            }
        }
        summary
    }

    /// Forgets everything recorded so far.
    pub fn reset(&mut self) {
        self.notices.clear();
    }
}
