//! Report runner for evaluating the catalog over one loaded snapshot
//!
//! Loads the dataset once, then runs any subset of reports against it. The
//! snapshot is never mutated, so independent reports run in parallel.

use crate::config::AnalysisConfig;
use crate::dataset::{load_dataset, Dataset};
use crate::error::Result;
use crate::reports::{run_report, ReportKind, ReportOutput};
use log::debug;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Pre-loaded runner for the report catalog
///
/// # Example
/// ```ignore
/// let runner = ReportRunner::from_dir("data", AnalysisConfig::default())?;
/// for output in runner.run_all()? {
///     println!("{}: {} rows", output.kind(), output.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ReportRunner {
    dataset: Dataset,
    config: AnalysisConfig,
}

impl ReportRunner {
    pub fn new(dataset: Dataset, config: AnalysisConfig) -> Self {
        Self { dataset, config }
    }

    /// Create runner by loading the CSV snapshot in `dir`
    pub fn from_dir<P: AsRef<Path>>(dir: P, config: AnalysisConfig) -> Result<Self> {
        Ok(Self::new(load_dataset(dir)?, config))
    }

    /// Run a single report
    pub fn run(&self, kind: ReportKind) -> Result<ReportOutput> {
        let start = Instant::now();
        let output = run_report(kind, &self.dataset, &self.config)?;
        debug!(
            "Report {} ({}) produced {} rows in {:?}",
            kind.number(),
            kind,
            output.len(),
            start.elapsed()
        );
        Ok(output)
    }

    /// Run several reports in parallel; outputs keep the order of `kinds`
    pub fn run_many(&self, kinds: &[ReportKind]) -> Result<Vec<ReportOutput>> {
        kinds.par_iter().map(|&kind| self.run(kind)).collect()
    }

    /// Run the whole catalog in parallel
    pub fn run_all(&self) -> Result<Vec<ReportOutput>> {
        self.run_many(&ReportKind::ALL)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Mutable access for changing the as-of date or window between runs
    pub fn config_mut(&mut self) -> &mut AnalysisConfig {
        &mut self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ClaimStatus;
    use crate::fixtures::{config, date, sample_dataset};

    #[test]
    fn test_run_all_in_catalog_order() {
        let runner = ReportRunner::new(sample_dataset(), config());
        let outputs = runner.run_all().unwrap();

        let kinds: Vec<ReportKind> = outputs.iter().map(|o| o.kind()).collect();
        assert_eq!(kinds, ReportKind::ALL.to_vec());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dataset = sample_dataset();
        let config = config();
        let runner = ReportRunner::new(dataset.clone(), config.clone());

        let parallel = runner.run_all().unwrap();
        for output in parallel {
            let sequential = run_report(output.kind(), &dataset, &config).unwrap();
            assert_eq!(output, sequential);
        }
    }

    #[test]
    fn test_changing_as_of_moves_window() {
        let mut runner = ReportRunner::new(sample_dataset(), config());
        // Window 2020-12-31..=2021-12-31 holds only claim 8, an approval on a cancelled policy
        runner.config_mut().as_of = date(2021, 12, 31);

        let output = runner.run(ReportKind::RejectedClaimsByType).unwrap();
        assert!(output.is_empty());

        let output = runner.run(ReportKind::DormantActivePolicies).unwrap();
        match output {
            ReportOutput::DormantActivePolicies(row) => {
                assert_eq!(row.active_policies, 5);
                assert_eq!(row.with_recent_claims, 0);
            }
            other => panic!("unexpected output {:?}", other.kind()),
        }
    }

    #[test]
    fn test_invalid_records_do_not_stop_reports() {
        let sample = sample_dataset();
        let mut claims = sample.claims().to_vec();
        claims[0].claim_status = ClaimStatus::Approved;
        claims[0].approved_amount = claims[0].claim_amount + 1.0;
        let dataset =
            Dataset::new(sample.policyholders().to_vec(), sample.policies().to_vec(), claims);
        assert_eq!(dataset.invalid_records().len(), 1);

        let runner = ReportRunner::new(dataset, config());
        let outputs = runner.run_all().unwrap();
        assert_eq!(outputs.len(), 10);
        assert_eq!(
            runner.run(ReportKind::PolicyStatusByType).unwrap(),
            run_report(ReportKind::PolicyStatusByType, &sample, &config()).unwrap()
        );
    }

    #[test]
    fn test_from_dir_loads_sample_data() {
        let runner = ReportRunner::from_dir("data", config()).unwrap();
        assert_eq!(runner.run_all().unwrap().len(), 10);
    }
}
