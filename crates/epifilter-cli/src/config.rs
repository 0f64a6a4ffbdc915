mod defaults;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use defaults::DefaultsConfig;
use epifilter::engine::config as core_config;
use epifilter::engine::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPathsConfig {
    discotope_dir: Option<PathBuf>,
    annotation_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDomainsConfig {
    n_terminal: Option<Vec<String>>,
    c_terminal: Option<Vec<String>>,
    anchor: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialThresholdsConfig {
    min_confidence: Option<f64>,
    min_rsa: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialFilterConfig {
    proteins: Option<Vec<String>>,
    paths: Option<PartialPathsConfig>,
    domains: Option<PartialDomainsConfig>,
    thresholds: Option<PartialThresholdsConfig>,
}

impl PartialFilterConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` if given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<core_config::PipelineConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let domains = self.take_domain_sets()?;
        let thresholds = self.take_thresholds()?;
        let paths = self.paths.take().unwrap_or_default();

        let proteins = if !args.proteins.is_empty() {
            args.proteins.clone()
        } else {
            self.proteins.take().unwrap_or_else(|| {
                core_config::DEFAULT_PROTEINS
                    .map(String::from)
                    .to_vec()
            })
        };

        core_config::PipelineConfigBuilder::new()
            .discotope_dir(
                args.discotope_dir
                    .clone()
                    .or(paths.discotope_dir)
                    .unwrap_or(defaults.discotope_dir),
            )
            .annotation_dir(
                args.annotation_dir
                    .clone()
                    .or(paths.annotation_dir)
                    .unwrap_or(defaults.annotation_dir),
            )
            .output_dir(
                args.output_dir
                    .clone()
                    .or(paths.output_dir)
                    .unwrap_or(defaults.output_dir),
            )
            .proteins(proteins)
            .domains(domains)
            .thresholds(thresholds)
            .build()
            .map_err(|e| CliError::Engine(EngineError::from(e)))
    }

    /// Resolves the domain accession sets, falling back to the built-in sets
    /// for any category the file leaves out.
    pub fn take_domain_sets(&mut self) -> Result<core_config::DomainSets> {
        let partial = self.domains.take().unwrap_or_default();
        let defaults = core_config::DomainSets::default();
        let anchor = partial.anchor.unwrap_or(defaults.anchor);
        if anchor.trim().is_empty() {
            return Err(CliError::Config(
                "`domains.anchor` cannot be empty.".to_string(),
            ));
        }
        Ok(core_config::DomainSets {
            n_terminal: partial
                .n_terminal
                .map(|v| v.into_iter().collect())
                .unwrap_or(defaults.n_terminal),
            c_terminal: partial
                .c_terminal
                .map(|v| v.into_iter().collect())
                .unwrap_or(defaults.c_terminal),
            anchor,
        })
    }

    fn take_thresholds(&mut self) -> Result<core_config::Thresholds> {
        let partial = self.thresholds.take().unwrap_or_default();
        let defaults = core_config::Thresholds::default();
        let thresholds = core_config::Thresholds {
            min_confidence: partial.min_confidence.unwrap_or(defaults.min_confidence),
            min_rsa: partial.min_rsa.or(defaults.min_rsa),
        };
        if thresholds.min_confidence.is_nan() || thresholds.min_rsa.is_some_and(f64::is_nan) {
            return Err(CliError::Config("Thresholds cannot be NaN.".to_string()));
        }
        Ok(thresholds)
    }

    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
            let float = || -> Result<f64> {
                value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })
            };
            let accessions = || -> Result<Vec<String>> {
                parser::parse_accession_list(value_str)
                    .map_err(|e| CliError::Argument(e.to_string()))
            };

            match key {
                "paths.discotope-dir" => {
                    self.paths
                        .get_or_insert_with(Default::default)
                        .discotope_dir = Some(PathBuf::from(value_str));
                }
                "paths.annotation-dir" => {
                    self.paths
                        .get_or_insert_with(Default::default)
                        .annotation_dir = Some(PathBuf::from(value_str));
                }
                "paths.output-dir" => {
                    self.paths.get_or_insert_with(Default::default).output_dir =
                        Some(PathBuf::from(value_str));
                }
                "domains.n-terminal" => {
                    self.domains
                        .get_or_insert_with(Default::default)
                        .n_terminal = Some(accessions()?);
                }
                "domains.c-terminal" => {
                    self.domains
                        .get_or_insert_with(Default::default)
                        .c_terminal = Some(accessions()?);
                }
                "domains.anchor" => {
                    self.domains.get_or_insert_with(Default::default).anchor =
                        Some(value_str.to_string());
                }
                "thresholds.min-confidence" => {
                    self.thresholds
                        .get_or_insert_with(Default::default)
                        .min_confidence = Some(float()?);
                }
                "thresholds.min-rsa" => {
                    self.thresholds
                        .get_or_insert_with(Default::default)
                        .min_rsa = Some(float()?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
