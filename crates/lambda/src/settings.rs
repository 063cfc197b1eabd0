//! Deployment configuration

use anyhow::{Context, Result};
use classifier::{ClassifierConfig, DEFAULT_CONTENT_TYPE};
use config::{Config, Environment};
use fetcher::FetcherConfig;
use gate::{GateConfig, DEFAULT_CLASS_LABELS, DEFAULT_THRESHOLD};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix, e.g. `PIPELINE_ENDPOINT_NAME`
pub const ENV_PREFIX: &str = "PIPELINE";

/// Settings fixed per deployment and shared by the three functions
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineConfig {
    /// Inference endpoint name (classifier only)
    #[serde(default)]
    pub endpoint_name: Option<String>,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default = "default_threshold")]
    pub confidence_threshold: f64,
    #[serde(default = "default_class_labels")]
    pub class_labels: Vec<String>,
    /// Bucket written into re-emitted payloads; source bucket when unset
    #[serde(default)]
    pub output_bucket: Option<String>,
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_class_labels() -> Vec<String> {
    DEFAULT_CLASS_LABELS.iter().map(|l| l.to_string()).collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint_name: None,
            content_type: default_content_type(),
            confidence_threshold: default_threshold(),
            class_labels: default_class_labels(),
            output_bucket: None,
            scratch_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Load from `PIPELINE_*` process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_environment(environment())
    }

    fn from_environment(env: Environment) -> Result<Self> {
        Config::builder()
            .add_source(env)
            .build()
            .context("failed to read pipeline configuration")?
            .try_deserialize()
            .context("invalid pipeline configuration")
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            scratch_dir: self.scratch_dir.clone(),
        }
    }

    pub fn classifier_config(&self) -> Result<ClassifierConfig> {
        let endpoint_name = self
            .endpoint_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .with_context(|| format!("{}_ENDPOINT_NAME is not set", ENV_PREFIX))?;

        Ok(ClassifierConfig {
            endpoint_name: endpoint_name.to_string(),
            content_type: self.content_type.clone(),
        })
    }

    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            threshold: self.confidence_threshold,
            class_labels: self.class_labels.clone(),
        }
    }

    /// Destination bucket override, ignoring an empty value
    pub fn output_bucket(&self) -> Option<&str> {
        self.output_bucket.as_deref().filter(|b| !b.is_empty())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("class_labels")
}
