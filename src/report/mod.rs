pub mod sarif;
pub mod version;

use crate::error::{ConvertError, Result};
use crate::types::report::Report;
use sarif::SarifLog;
use tracing::debug;
use version::VersionRegistry;

/// Renders `report` as a SARIF document for the requested schema version.
///
/// The version is resolved before anything is rendered. Pretty output uses
/// two-space indentation and keeps the compact field order. Both forms end
/// with a single newline.
pub fn serialize(
    registry: &VersionRegistry,
    report: &Report,
    version: &str,
    pretty: bool,
) -> Result<Vec<u8>> {
    let schema = registry.lookup(version)?;
    let log = SarifLog {
        schema: schema.schema_uri,
        version: schema.version,
        runs: vec![(schema.build_run)(report)],
    };

    let mut rendered = if pretty {
        serde_json::to_vec_pretty(&log)
    } else {
        serde_json::to_vec(&log)
    }
    .map_err(ConvertError::Serialization)?;
    rendered.push(b'\n');

    debug!(
        version = schema.id,
        pretty,
        bytes = rendered.len(),
        "serialized SARIF report"
    );
    Ok(rendered)
}
