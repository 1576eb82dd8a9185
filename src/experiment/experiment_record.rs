//! Experiment Record - root entity for experiment tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ExperimentConfig;
use crate::Result;

/// A tracked benchmark experiment.
///
/// Root entity of the tracking schema. Runs of the same configuration
/// (typically with different seeds) share one experiment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentRecord {
    experiment_id: String,
    name: String,
    created_at: DateTime<Utc>,
    config: Option<serde_json::Value>,
}

impl ExperimentRecord {
    /// Create a record without a configuration snapshot.
    #[must_use]
    pub fn new(experiment_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            name: name.into(),
            created_at: Utc::now(),
            config: None,
        }
    }

    /// Create a record holding a snapshot of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the configuration cannot be
    /// serialized.
    pub fn for_config(
        experiment_id: impl Into<String>,
        name: impl Into<String>,
        config: &ExperimentConfig,
    ) -> Result<Self> {
        Ok(Self {
            config: Some(serde_json::to_value(config)?),
            ..Self::new(experiment_id, name)
        })
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the raw configuration snapshot, if any.
    #[must_use]
    pub const fn config(&self) -> Option<&serde_json::Value> {
        self.config.as_ref()
    }

    /// Parse the snapshot back into a validated [`ExperimentConfig`].
    ///
    /// `None` if the record carries no snapshot.
    #[must_use]
    pub fn benchmark_config(&self) -> Option<Result<ExperimentConfig>> {
        self.config.as_ref().map(|value| -> Result<ExperimentConfig> {
            let config = ExperimentConfig::deserialize(value)?;
            config.validate()?;
            Ok(config)
        })
    }
}
