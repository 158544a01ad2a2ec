//! storecheck: cross-engine signup-flow regression harness
//!
//! Drives a real web browser against the demo storefront, exercises the
//! signup flow once per (engine, credential record) combination, and
//! classifies each case from the text of the post-submit alert - or its
//! absence. Browser provisioning and page interaction stay behind the
//! [`SessionFactory`] / [`Session`] / [`SignupDriver`] traits, so any
//! binding (or a scripted fake in tests) can sit on the other side.
//!
//! A case walks a fixed sequence: acquire and maximize a session, probe
//! the category list with hovers, probe scrolling, open the signup modal
//! under a bounded wait, submit the credentials, classify the popup,
//! capture a screenshot artifact, and release the session - the release
//! happens on every exit path. Bounded waits poll; nothing sleeps a fixed
//! delay hoping the page catches up.
//!
//! # Examples
//!
//! ```ignore
//! use storecheck::{HarnessConfig, Suite};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Any SessionFactory implementation: real browser bindings in
//!     // production, a scripted fake in tests.
//!     let factory = my_bindings::BrowserFactory::new().await?;
//!
//!     let config = HarnessConfig::from_env()?;
//!     let report = Suite::new(&factory, config).run().await?;
//!
//!     println!("{}", report.to_json()?);
//!     std::process::exit(report.exit_code());
//! }
//! ```

pub mod artifact;
mod config;
pub mod driver;
mod error;
mod fixture;
pub mod harness;
mod outcome;
pub mod wait;

// Re-export error types
pub use error::{Error, Result};

// Re-export configuration
pub use config::HarnessConfig;

// Re-export collaborator interfaces
pub use driver::{DriverFuture, Engine, Session, SessionFactory, SessionGuard, SignupDriver};

// Re-export the data provider and its record type
pub use fixture::{CredentialRecord, DataProvider, FIXTURE_HEADER};

// Re-export classification
pub use outcome::{ALREADY_EXISTS_MARKER, Outcome, SUCCESS_MARKER};

// Re-export the harness core
pub use harness::{CaseReport, CaseStatus, SignupScenario, Step, Suite, SuiteReport};
