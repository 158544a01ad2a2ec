//! Harness core: per-case orchestration, suite iteration, and reporting.

pub mod report;
pub mod scenario;
pub mod suite;

pub use report::{CaseReport, CaseStatus, Step, SuiteReport};
pub use scenario::SignupScenario;
pub use suite::Suite;
