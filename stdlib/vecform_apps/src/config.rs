//! Deployment configuration files
//!
//! ```toml
//! app = "kidney-stone"
//!
//! [model]
//! path = "savemodel/kidney_stone.json"
//!
//! [result]
//! kind = "discrete"
//! otherwise = { message = "Low risk", severity = "success" }
//! classes = [{ code = 1, message = "High risk", severity = "alert" }]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::result_format::ResultFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Deployment identifier, e.g. `dengue`
    pub app: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ArtifactRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<ArtifactRef>,

    /// Replaces the deployment's built-in label table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultFormat>,
}

impl DeploymentConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<DeploymentConfig>(text)
    }

    /// Read a config file; relative artifact paths are taken from its directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            for artifact in [&mut config.model, &mut config.encoder].into_iter().flatten() {
                if artifact.path.is_relative() {
                    artifact.path = base.join(&artifact.path);
                }
            }
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Severity;

    #[test]
    fn parse_minimal() {
        let config = DeploymentConfig::parse("app = \"typhoid\"\n").unwrap();
        assert_eq!(config.app, "typhoid");
        assert!(config.model.is_none());
        assert!(config.result.is_none());
    }

    #[test]
    fn parse_result_override() {
        let config = DeploymentConfig::parse(
            r#"
app = "kidney-stone"

[model]
path = "/models/kidney.json"

[result]
kind = "discrete"
otherwise = { message = "Low risk" }
classes = [{ code = 1, message = "High risk", severity = "alert" }]
"#,
        )
        .unwrap();
        assert_eq!(
            config.model,
            Some(ArtifactRef {
                path: "/models/kidney.json".into()
            })
        );
        let Some(ResultFormat::Discrete { classes, otherwise }) = config.result else {
            panic!("expected discrete result format");
        };
        assert_eq!(classes[0].severity, Severity::Alert);
        assert_eq!(otherwise.severity, Severity::Success);
    }

    #[test]
    fn load_resolves_relative_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dengue.toml");
        fs::write(
            &path,
            "app = \"dengue\"\n[model]\npath = \"dengue.json\"\n[encoder]\npath = \"/abs/encoder.json\"\n",
        )
        .unwrap();
        let config = DeploymentConfig::load(&path).unwrap();
        assert_eq!(config.model.unwrap().path, dir.path().join("dengue.json"));
        assert_eq!(config.encoder.unwrap().path, PathBuf::from("/abs/encoder.json"));
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = DeploymentConfig::load(dir.path().join("none.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));

        let path = dir.path().join("bad.toml");
        fs::write(&path, "model = 3\n").unwrap();
        let bad = DeploymentConfig::load(&path).unwrap_err();
        assert!(matches!(bad, ConfigError::Parse { .. }));
    }

    #[test]
    fn to_toml_round_trips() {
        let config = DeploymentConfig {
            app: "car-price".into(),
            model: Some(ArtifactRef {
                path: "car.json".into(),
            }),
            encoder: None,
            result: None,
        };
        let text = config.to_toml().unwrap();
        assert_eq!(DeploymentConfig::parse(&text).unwrap(), config);
    }
}
