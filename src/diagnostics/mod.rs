//! Diagnostics module for score well-formedness
//!
//! Read-only checks over a score tree and its spanners. Broken invariants
//! (which public operations never produce) are reported as errors;
//! questionable but legal notation is reported as warnings.

pub mod spanners;
pub mod tree;

use serde::{Deserialize, Serialize};

use crate::models::{ComponentId, SpannerId};
use crate::score::Score;

/// How serious a finding is
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// A structural invariant is broken
    Error,
    /// Legal but likely unintended notation
    Warning,
    Info,
}

/// What a diagnostic points at
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticTarget {
    Component(ComponentId),
    Spanner(SpannerId),
}

/// A diagnostic mark highlighting an issue on one component or spanner
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DiagnosticMark {
    pub target: DiagnosticTarget,
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g., "spanner_gap", "receptor_missing")
    pub kind: String,
    pub message: String,
}

impl DiagnosticMark {
    pub fn new(
        target: DiagnosticTarget,
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            target,
            severity,
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Findings for one subtree, in discovery order
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Diagnostics {
    pub marks: Vec<DiagnosticMark>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn add(&mut self, mark: DiagnosticMark) {
        self.marks.push(mark);
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = DiagnosticMark>) {
        self.marks.extend(marks);
    }

    /// True when some finding is a broken invariant
    pub fn has_errors(&self) -> bool {
        self.marks
            .iter()
            .any(|m| m.severity == DiagnosticSeverity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Marks of one kind
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a DiagnosticMark> + 'a {
        self.marks.iter().filter(move |m| m.kind == kind)
    }
}

/// Run every check over the tree under `root` and the spanners touching it
pub fn check_score(score: &Score, root: ComponentId) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(tree::analyze_parentage(score, root));
    diagnostics.extend(spanners::analyze_spanners(score, root));
    if !diagnostics.is_empty() {
        log::debug!("{} diagnostics under {}", diagnostics.marks.len(), root);
    }
    diagnostics
}
