use crate::error::{ConvertError, Result};
use crate::report::sarif::{build_run, Run};
use crate::types::report::Report;
use std::collections::BTreeMap;
use std::fmt;

pub const VERSION_2_1_0: &str = "2.1.0";
pub const VERSION_2_2: &str = "2.2";
pub const DEFAULT_VERSION: &str = VERSION_2_1_0;

const SCHEMA_2_1_0: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const SCHEMA_2_2: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/2.2-prerelease-2024-08-08/sarif-2.2/schema/sarif-2-2.schema.json";

/// One supported SARIF schema variant.
#[derive(Clone, Copy)]
pub struct SchemaVersion {
    pub id: &'static str,
    pub schema_uri: &'static str,
    /// Value written to the document's `version` field.
    pub version: &'static str,
    pub build_run: fn(&Report) -> Run<'_>,
}

impl fmt::Debug for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaVersion")
            .field("id", &self.id)
            .field("schema_uri", &self.schema_uri)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Lookup table from version id to schema variant.
///
/// Built once at startup and shared by reference; nothing mutates it
/// after construction.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    versions: BTreeMap<&'static str, SchemaVersion>,
}

impl VersionRegistry {
    pub fn empty() -> Self {
        Self {
            versions: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::empty()
            .register(SchemaVersion {
                id: VERSION_2_1_0,
                schema_uri: SCHEMA_2_1_0,
                version: VERSION_2_1_0,
                build_run,
            })
            .register(SchemaVersion {
                id: VERSION_2_2,
                schema_uri: SCHEMA_2_2,
                version: VERSION_2_2,
                build_run,
            })
    }

    /// Adds `version`, replacing any entry with the same id.
    pub fn register(mut self, version: SchemaVersion) -> Self {
        self.versions.insert(version.id, version);
        self
    }

    pub fn lookup(&self, id: &str) -> Result<&SchemaVersion> {
        self.versions
            .get(id)
            .ok_or_else(|| ConvertError::UnsupportedVersion {
                requested: id.to_string(),
                supported: self.supported_versions().join(", "),
            })
    }

    /// Registered version ids, sorted.
    pub fn supported_versions(&self) -> Vec<&'static str> {
        self.versions.keys().copied().collect()
    }
}
