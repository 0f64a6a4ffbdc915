use crate::core::models::domain::DomainCategory;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PROTEINS: [&str; 4] = ["pspA", "pspC", "zmpA", "zmpB"];
pub const DEFAULT_N_TERMINAL_DOMAINS: [&str; 2] = ["PF04650", "PS50847"];
pub const DEFAULT_C_TERMINAL_DOMAINS: [&str; 2] = ["PF01473", "PF19127"];
pub const DEFAULT_ANCHOR_DOMAIN: &str = "PF00746";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("The protein list is empty")]
    EmptyProteinList,
}

/// Accession sets used to classify domain hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSets {
    pub n_terminal: HashSet<String>,
    pub c_terminal: HashSet<String>,
    pub anchor: String,
}

impl DomainSets {
    /// Classifies an accession, checking the N-terminal set first, then the
    /// C-terminal set, then the anchor accession.
    pub fn classify(&self, accession: &str) -> Option<DomainCategory> {
        if self.n_terminal.contains(accession) {
            Some(DomainCategory::NTerminal)
        } else if self.c_terminal.contains(accession) {
            Some(DomainCategory::CTerminal)
        } else if self.anchor == accession {
            Some(DomainCategory::Anchor)
        } else {
            None
        }
    }
}

impl Default for DomainSets {
    fn default() -> Self {
        Self {
            n_terminal: DEFAULT_N_TERMINAL_DOMAINS.map(String::from).into(),
            c_terminal: DEFAULT_C_TERMINAL_DOMAINS.map(String::from).into(),
            anchor: DEFAULT_ANCHOR_DOMAIN.to_string(),
        }
    }
}

/// Pre-filter thresholds. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub min_confidence: f64,
    pub min_rsa: Option<f64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            min_rsa: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterConfig {
    pub domains: DomainSets,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub discotope_dir: PathBuf,
    pub annotation_dir: PathBuf,
    pub output_dir: PathBuf,
    pub proteins: Vec<String>,
    pub filter: FilterConfig,
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    discotope_dir: Option<PathBuf>,
    annotation_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    proteins: Option<Vec<String>>,
    domains: Option<DomainSets>,
    thresholds: Option<Thresholds>,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discotope_dir(mut self, path: PathBuf) -> Self {
        self.discotope_dir = Some(path);
        self
    }

    pub fn annotation_dir(mut self, path: PathBuf) -> Self {
        self.annotation_dir = Some(path);
        self
    }

    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }

    pub fn proteins(mut self, proteins: Vec<String>) -> Self {
        self.proteins = Some(proteins);
        self
    }

    pub fn domains(mut self, domains: DomainSets) -> Self {
        self.domains = Some(domains);
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let proteins = self
            .proteins
            .unwrap_or_else(|| DEFAULT_PROTEINS.map(String::from).to_vec());
        if proteins.is_empty() {
            return Err(ConfigError::EmptyProteinList);
        }

        Ok(PipelineConfig {
            discotope_dir: self
                .discotope_dir
                .ok_or(ConfigError::MissingParameter("discotope_dir"))?,
            annotation_dir: self
                .annotation_dir
                .ok_or(ConfigError::MissingParameter("annotation_dir"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            proteins,
            filter: FilterConfig {
                domains: self.domains.unwrap_or_default(),
                thresholds: self.thresholds.unwrap_or_default(),
            },
        })
    }
}
