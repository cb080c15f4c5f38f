use crate::analyze::{self, ToolInfo};
use crate::error::{ConvertError, Result};
use crate::report::{self, version::VersionRegistry, version::DEFAULT_VERSION};
use crate::testjson;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub sarif_version: String,
    pub pretty: bool,
    pub tool: ToolInfo,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sarif_version: DEFAULT_VERSION.to_string(),
            pretty: false,
            tool: ToolInfo::default(),
        }
    }
}

/// Converts a `go test -json` file into a SARIF file using the built-in schema versions.
// The binary builds its registry once for `--help` and calls `convert_with_registry`.
#[cfg_attr(not(test), allow(dead_code))]
pub fn convert_to_sarif(input: &Path, output: &Path, options: &ConvertOptions) -> Result<()> {
    convert_with_registry(&VersionRegistry::builtin(), input, output, options)
}

pub fn convert_with_registry(
    registry: &VersionRegistry,
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<()> {
    // Reject unknown versions before touching either file.
    registry.lookup(&options.sarif_version)?;

    let events = testjson::parse_file(input)?;
    let report = analyze::build_report(&events, &options.tool);
    let rendered = report::serialize(registry, &report, &options.sarif_version, options.pretty)?;
    write_atomic(output, &rendered)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        version = %options.sarif_version,
        results = report.results.len(),
        "SARIF report written"
    );
    Ok(())
}

/// Writes through a temp file in the destination directory so a failed
/// write never leaves a truncated report behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source| ConvertError::WriteOutput {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(bytes).map_err(write_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Temp files start at 0600; reports are read by other CI steps.
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(OUTPUT_MODE))
            .map_err(write_error)?;
    }
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
