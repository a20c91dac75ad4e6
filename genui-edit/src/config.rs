use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{EditError, EditResult};
use crate::invoker::Candidate;
use crate::prompt::DEFAULT_TEMPERATURE;

/// Edit settings, usually read from a YAML file:
///
/// ```yaml
/// candidates:
///   - id: gemini-2.5-flash
///     timeout_ms: 15000
/// frame_interval_ms: 16
/// temperature: 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditConfig {
    #[serde(default = "default_candidates")]
    pub candidates: Vec<CandidateConfig>,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateConfig {
    pub id: String,
    pub timeout_ms: u64,
}

fn default_candidates() -> Vec<CandidateConfig> {
    [
        ("gemini-2.5-flash", 15_000),
        ("gemini-2.0-flash", 15_000),
        ("gemini-2.5-pro", 20_000),
        ("gemini-3.0-pro", 20_000),
    ]
    .into_iter()
    .map(|(id, timeout_ms)| CandidateConfig {
        id: id.to_string(),
        timeout_ms,
    })
    .collect()
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            frame_interval_ms: default_frame_interval_ms(),
            temperature: default_temperature(),
        }
    }
}

impl EditConfig {
    pub fn from_yaml_str(yaml: &str) -> EditResult<Self> {
        let config: EditConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> EditResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(
            "Loaded edit config from {} ({} candidate(s))",
            path.display(),
            config.candidates.len()
        );
        Ok(config)
    }

    pub fn to_yaml(&self) -> EditResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> EditResult<()> {
        if let Some(c) = self.candidates.iter().find(|c| c.id.trim().is_empty()) {
            return Err(EditError::Config(format!(
                "candidate with timeout {}ms has an empty id",
                c.timeout_ms
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(EditError::Config("frame_interval_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.candidates
            .iter()
            .map(|c| Candidate::new(c.id.clone(), Duration::from_millis(c.timeout_ms)))
            .collect()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
