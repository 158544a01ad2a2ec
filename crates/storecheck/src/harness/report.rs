//! Per-case and per-suite run reports
//!
//! Reports are plain serializable data so CI can ingest a run as JSON.
//! A case either passed with a classified outcome or failed at a named
//! step; lenient classifications never count as failures.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::driver::Engine;
use crate::error::Result;
use crate::outcome::Outcome;

/// Orchestration step a hard failure is attributed to.
///
/// Hover and scroll probes never appear here: their errors are
/// downgraded to warnings by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Acquire,
    Navigate,
    Maximize,
    OpenSignup,
    AwaitModal,
    FillCredentials,
    Submit,
    AwaitPopup,
    Screenshot,
    Release,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Acquire => "acquire",
            Step::Navigate => "navigate",
            Step::Maximize => "maximize",
            Step::OpenSignup => "open-signup",
            Step::AwaitModal => "await-modal",
            Step::FillCredentials => "fill-credentials",
            Step::Submit => "submit",
            Step::AwaitPopup => "await-popup",
            Step::Screenshot => "screenshot",
            Step::Release => "release",
        };
        f.write_str(label)
    }
}

/// Terminal status of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    Passed { outcome: Outcome },
    Failed { step: Step, reason: String },
}

/// Result of one (engine, credential record) test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub engine: Engine,
    pub identifier: String,
    #[serde(flatten)]
    pub status: CaseStatus,
    /// Screenshot path when the capture step was reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    pub duration_ms: u64,
}

impl CaseReport {
    pub fn passed(
        engine: Engine,
        identifier: impl Into<String>,
        outcome: Outcome,
        artifact: PathBuf,
        duration_ms: u64,
    ) -> Self {
        Self {
            engine,
            identifier: identifier.into(),
            status: CaseStatus::Passed { outcome },
            artifact: Some(artifact),
            duration_ms,
        }
    }

    pub fn failed(
        engine: Engine,
        identifier: impl Into<String>,
        step: Step,
        reason: impl Into<String>,
        artifact: Option<PathBuf>,
        duration_ms: u64,
    ) -> Self {
        Self {
            engine,
            identifier: identifier.into(),
            status: CaseStatus::Failed {
                step,
                reason: reason.into(),
            },
            artifact,
            duration_ms,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, CaseStatus::Failed { .. })
    }

    /// Classified outcome for passing cases.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            CaseStatus::Passed { outcome } => Some(outcome),
            CaseStatus::Failed { .. } => None,
        }
    }
}

/// Aggregated results of a full engines-by-records run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn new(cases: Vec<CaseReport>) -> Self {
        Self { cases }
    }

    pub fn has_failures(&self) -> bool {
        self.cases.iter().any(CaseReport::is_failure)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|case| case.is_failure())
    }

    /// Standard test-runner exit convention: nonzero only when a case hit
    /// a hard failure. Lenient classifications alone exit zero.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() { 1 } else { 0 }
    }

    /// Serializes the report for CI ingestion.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Emits one tracing line per case plus a run total.
    pub fn log_summary(&self) {
        for case in &self.cases {
            match &case.status {
                CaseStatus::Passed { outcome } => tracing::info!(
                    engine = %case.engine,
                    identifier = %case.identifier,
                    %outcome,
                    duration_ms = case.duration_ms,
                    "case passed"
                ),
                CaseStatus::Failed { step, reason } => tracing::error!(
                    engine = %case.engine,
                    identifier = %case.identifier,
                    step = %step,
                    reason = %reason,
                    duration_ms = case.duration_ms,
                    "case failed"
                ),
            }
        }
        let failed = self.failures().count();
        tracing::info!(
            total = self.cases.len(),
            passed = self.cases.len() - failed,
            failed,
            "suite finished"
        );
    }
}
