use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// Where a candidate schema's baseline lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BaselineSource {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "schemaPath")]
    pub schema_path: String,
}

/// Ordered mapping from candidate schema path to its baseline source.
/// Iteration order is the manifest document order.
pub type Config = IndexMap<String, BaselineSource>;

/// The manifest key holding the configuration mapping.
pub const MANIFEST_KEY: &str = "graphql-doctor";

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    MissingSection,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "invalid manifest JSON: {e}"),
            ConfigError::MissingSection => {
                write!(f, "manifest has no '{MANIFEST_KEY}' section")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read the configuration mapping out of a manifest document
/// (a package.json-style JSON object with a `graphql-doctor` key).
pub fn from_manifest(manifest: &str) -> Result<Config, ConfigError> {
    #[derive(Deserialize)]
    struct Manifest {
        #[serde(rename = "graphql-doctor")]
        section: Option<Config>,
    }

    let manifest: Manifest = serde_json::from_str(manifest).map_err(ConfigError::Json)?;
    manifest.section.ok_or(ConfigError::MissingSection)
}
