use crate::core::io::{discotope, interpro};
use crate::engine::boundaries::load_boundaries;
use crate::engine::config::PipelineConfig;
use crate::engine::error::EngineError;
use crate::engine::filter::{FilterStats, filter_epitopes};
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoPredictions { dir: PathBuf },
    NoAnnotation { path: PathBuf },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoPredictions { dir } => {
                write!(f, "no prediction CSVs in {}", dir.display())
            }
            SkipReason::NoAnnotation { path } => {
                write!(f, "annotation file {} not found", path.display())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProteinOutcome {
    Written { path: PathBuf, stats: FilterStats },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinReport {
    pub protein: String,
    pub outcome: ProteinOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub proteins: Vec<ProteinReport>,
}

impl PipelineReport {
    pub fn written(&self) -> usize {
        self.proteins
            .iter()
            .filter(|p| matches!(p.outcome, ProteinOutcome::Written { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.proteins.len() - self.written()
    }
}

/// `<output_dir>/<protein>_filtered_epitopes_Interpro_Epitopetrue.csv`
pub fn output_path(output_dir: &Path, protein: &str) -> PathBuf {
    output_dir.join(format!(
        "{protein}_filtered_epitopes_Interpro_Epitopetrue.csv"
    ))
}

/// Filters every configured protein in turn.
///
/// Missing predictions or annotations skip that protein only; malformed
/// inputs abort the whole run.
#[instrument(skip_all, name = "filter_pipeline")]
pub fn run(
    config: &PipelineConfig,
    reporter: &ProgressReporter,
) -> Result<PipelineReport, EngineError> {
    std::fs::create_dir_all(&config.output_dir).map_err(|e| EngineError::OutputDir {
        path: config.output_dir.to_string_lossy().to_string(),
        source: e,
    })?;

    reporter.report(Progress::BatchStart {
        total_proteins: config.proteins.len() as u64,
    });

    let mut report = PipelineReport::default();
    for protein in &config.proteins {
        reporter.report(Progress::ProteinStart {
            protein: protein.clone(),
        });
        let outcome = process_protein(protein, config)?;
        if let ProteinOutcome::Skipped(reason) = &outcome {
            reporter.report(Progress::Message(format!("{protein}: skipped, {reason}")));
        }
        reporter.report(Progress::ProteinFinish {
            protein: protein.clone(),
            written: matches!(outcome, ProteinOutcome::Written { .. }),
        });
        report.proteins.push(ProteinReport {
            protein: protein.clone(),
            outcome,
        });
    }

    reporter.report(Progress::BatchFinish);
    info!(
        "Filtering finished: {} written, {} skipped.",
        report.written(),
        report.skipped()
    );
    Ok(report)
}

pub fn process_protein(
    protein: &str,
    config: &PipelineConfig,
) -> Result<ProteinOutcome, EngineError> {
    let Some(table) = discotope::load_protein(&config.discotope_dir, protein)? else {
        let dir = discotope::prediction_dir(&config.discotope_dir, protein);
        warn!("No CSV files found for {}, skipping.", protein);
        return Ok(ProteinOutcome::Skipped(SkipReason::NoPredictions { dir }));
    };

    let tsv_path = interpro::annotation_path(&config.annotation_dir, protein);
    if !tsv_path.is_file() {
        warn!(
            "Annotation file {:?} not found for {}, skipping.",
            tsv_path, protein
        );
        return Ok(ProteinOutcome::Skipped(SkipReason::NoAnnotation {
            path: tsv_path,
        }));
    }

    let boundaries = load_boundaries(&tsv_path, &config.filter.domains)?;
    let (filtered, stats) = filter_epitopes(&table, &boundaries, &config.filter.thresholds)?;

    let out_path = output_path(&config.output_dir, protein);
    discotope::write_table(&filtered, &out_path)?;
    info!(
        "{}: kept {} of {} rows, written to {:?}",
        protein,
        stats.kept,
        stats.total,
        out_path
    );

    Ok(ProteinOutcome::Written {
        path: out_path,
        stats,
    })
}
