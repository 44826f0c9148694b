use crate::config::toml_config::BatchConfig;
use crate::core::etl::EtlEngine;
use crate::core::pipeline::DatasetPipeline;
use crate::core::summary::{mismatch_table, CountMismatch, ProvinceIndex};
use crate::core::{Dataset, EtlOutcome, Storage};
use crate::utils::error::{EtlError, ErrorSeverity, Result};

pub struct BatchReport {
    pub outcomes: Vec<EtlOutcome>,
    pub failures: Vec<(String, EtlError)>,
    /// `None` when reconciliation was disabled or lacked its inputs.
    pub mismatches: Option<Vec<CountMismatch>>,
}

impl BatchReport {
    pub fn worst_severity(&self) -> Option<ErrorSeverity> {
        self.failures.iter().map(|(_, e)| e.severity()).max()
    }
}

/// Cross-checks the facility counts declared on the first geo dataset
/// against the first hospital and lab datasets of the batch.
pub fn reconcile_outcomes(outcomes: &[EtlOutcome]) -> Option<Vec<CountMismatch>> {
    let mut hospitals = None;
    let mut labs = None;
    let mut geo = None;

    for outcome in outcomes {
        match &outcome.dataset {
            Dataset::Hospitals(h) if hospitals.is_none() => hospitals = Some(h.as_slice()),
            Dataset::Labs(l) if labs.is_none() => labs = Some(l.as_slice()),
            Dataset::Geo(g) if geo.is_none() => geo = Some(g),
            _ => {}
        }
    }

    let index = ProvinceIndex::from_facilities(hospitals?, labs?);
    Some(index.reconcile(geo?))
}

/// Runs every enabled dataset of `config` in order. A failing dataset is
/// recorded and the remaining ones still run.
pub async fn run_batch<S: Storage + Clone>(config: &BatchConfig, storage: S) -> Result<BatchReport> {
    let mut outcomes = Vec::new();
    let mut failures = Vec::new();

    for job in config.jobs() {
        let name = job.name.clone();
        tracing::info!("▶ Running dataset '{}' ({})", name, job.kind);

        let engine = EtlEngine::new(DatasetPipeline::new(storage.clone(), job));
        match engine.run().await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                tracing::error!("❌ Dataset '{}' failed: {}", name, e);
                failures.push((name, e));
            }
        }
    }

    let mismatches = if config.reconcile_enabled() {
        match reconcile_outcomes(&outcomes) {
            Some(mismatches) => {
                for m in &mismatches {
                    tracing::warn!(
                        "Province '{}' declares {} hospitals / {} labs, feeds list {} / {}",
                        m.province,
                        m.declared_hospitals,
                        m.declared_labs,
                        m.counted_hospitals,
                        m.counted_labs
                    );
                }
                let path = format!(
                    "{}/reconcile.csv",
                    config.load.output_path.trim_end_matches('/')
                );
                storage
                    .write_file(&path, mismatch_table(&mismatches)?.as_bytes())
                    .await?;
                Some(mismatches)
            }
            None => {
                tracing::warn!("Reconciliation needs a hospital, a lab and a geo dataset; skipped");
                None
            }
        }
    } else {
        None
    };

    Ok(BatchReport {
        outcomes,
        failures,
        mismatches,
    })
}
