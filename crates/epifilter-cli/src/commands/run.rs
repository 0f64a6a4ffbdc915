use crate::cli::RunArgs;
use crate::config::PartialFilterConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use epifilter::engine::progress::ProgressReporter;
use epifilter::workflows::pipeline::{self, PipelineReport, ProteinOutcome};
use std::fmt::Write as _;
use tracing::info;

pub fn run(args: RunArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialFilterConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!(
        "Filtering {} protein(s): predictions from {:?}, annotations from {:?}, output to {:?}",
        config.proteins.len(),
        config.discotope_dir,
        config.annotation_dir,
        config.output_dir
    );

    let progress_handler = CliProgressHandler::new(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let report = pipeline::run(&config, &reporter)?;

    if !quiet {
        print!("{}", render_summary(&report));
    }
    Ok(())
}

fn render_summary(report: &PipelineReport) -> String {
    let mut out = String::new();
    for entry in &report.proteins {
        let _ = match &entry.outcome {
            ProteinOutcome::Written { path, stats } => writeln!(
                out,
                "✓ {:<8} kept {:>5} of {:>5} high-confidence epitopes \
                 (N-term {}, C-term {}, anchor {}, bad res_id {}) -> {}",
                entry.protein,
                stats.kept,
                stats.high_confidence,
                stats.excluded_n_terminal,
                stats.excluded_c_terminal,
                stats.excluded_anchor,
                stats.invalid_residue,
                path.display()
            ),
            ProteinOutcome::Skipped(reason) => {
                writeln!(out, "- {:<8} skipped: {}", entry.protein, reason)
            }
        };
    }
    let _ = writeln!(
        out,
        "{} protein(s) written, {} skipped.",
        report.written(),
        report.skipped()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use epifilter::engine::filter::FilterStats;
    use epifilter::workflows::pipeline::{ProteinReport, SkipReason};
    use std::path::PathBuf;

    #[test]
    fn summary_lists_written_and_skipped_proteins() {
        let report = PipelineReport {
            proteins: vec![
                ProteinReport {
                    protein: "pspA".to_string(),
                    outcome: ProteinOutcome::Written {
                        path: PathBuf::from("out/pspA.csv"),
                        stats: FilterStats {
                            total: 10,
                            high_confidence: 6,
                            excluded_n_terminal: 2,
                            kept: 4,
                            ..Default::default()
                        },
                    },
                },
                ProteinReport {
                    protein: "zmpB".to_string(),
                    outcome: ProteinOutcome::Skipped(SkipReason::NoAnnotation {
                        path: PathBuf::from("tsv/filtered.zmpB_all_seqs.aa.tsv"),
                    }),
                },
            ],
        };

        let summary = render_summary(&report);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("✓ pspA"));
        assert!(lines[0].contains("kept     4 of     6"));
        assert!(lines[0].contains("N-term 2"));
        assert!(lines[1].contains("zmpB"));
        assert!(lines[1].contains("not found"));
        assert_eq!(lines[2], "1 protein(s) written, 1 skipped.");
    }
}
