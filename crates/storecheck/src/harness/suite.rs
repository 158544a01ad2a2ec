//! Suite runner - the full engines-by-records product
//!
//! One scenario per (engine, record) combination, run sequentially. The
//! harness introduces no parallelism of its own, but cases share no state
//! (the fixture is regenerated once, up front, and read-only afterward),
//! so an external runner may shard them across processes.

use crate::config::HarnessConfig;
use crate::driver::SessionFactory;
use crate::error::Result;
use crate::fixture::DataProvider;
use crate::harness::report::SuiteReport;
use crate::harness::scenario::SignupScenario;

pub struct Suite<'a> {
    factory: &'a dyn SessionFactory,
    config: HarnessConfig,
}

impl<'a> Suite<'a> {
    pub fn new(factory: &'a dyn SessionFactory, config: HarnessConfig) -> Self {
        Self { factory, config }
    }

    /// Runs every (engine, record) case and aggregates their reports.
    ///
    /// The only error this returns is a fixture failure during the setup
    /// phase, which aborts the run before any case starts (no valid
    /// inputs). Case-level failures never abort the suite; they land in
    /// the report and drive its exit code.
    pub async fn run(&self) -> Result<SuiteReport> {
        let provider = DataProvider::new(self.config.fixture_path.clone());
        let records = provider.load_records().await?;

        tracing::info!(
            engines = self.config.engines.len(),
            records = records.len(),
            "running signup suite"
        );

        let scenario = SignupScenario::new(&self.config);
        let mut cases = Vec::with_capacity(self.config.engines.len() * records.len());
        for &engine in &self.config.engines {
            for record in &records {
                cases.push(scenario.run(self.factory, engine, record).await);
            }
        }

        let report = SuiteReport::new(cases);
        report.log_summary();
        Ok(report)
    }
}
