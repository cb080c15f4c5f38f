use crate::report::version::{VersionRegistry, DEFAULT_VERSION};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

pub const APP_NAME: &str = "go-test-sarif";

const BUILD_COMMIT: Option<&str> = option_env!("GO_TEST_SARIF_COMMIT");
const BUILD_DATE: Option<&str> = option_env!("GO_TEST_SARIF_BUILD_DATE");
const BUILT_BY: Option<&str> = option_env!("GO_TEST_SARIF_BUILT_BY");

#[derive(Parser, Debug)]
#[command(
    name = "go-test-sarif",
    about = "Convert go test -json output to SARIF",
    disable_version_flag = true
)]
pub struct Cli {
    /// go test -json output to read
    #[arg(required_unless_present = "version")]
    pub input: Option<PathBuf>,

    /// SARIF file to write
    #[arg(required_unless_present = "version")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "VERSION")]
    pub sarif_version: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Config file (default: ./go-test-sarif.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Display version information
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}

impl Cli {
    /// Parses process arguments, listing the registry's versions in `--help`.
    pub fn try_parse_with(registry: &VersionRegistry) -> Result<Self, clap::Error> {
        let supported = registry.supported_versions().join(", ");
        let matches = Self::command()
            .mut_arg("sarif_version", |arg| {
                arg.help(format!(
                    "SARIF version ({supported}) [default: {DEFAULT_VERSION}]"
                ))
            })
            .try_get_matches()?;
        Self::from_arg_matches(&matches)
    }
}

pub fn version_text() -> String {
    format!(
        "{APP_NAME} {}\n  commit: {}\n  built at: {}\n  built by: {}\n",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT.unwrap_or("none"),
        BUILD_DATE.unwrap_or("unknown"),
        BUILT_BY.unwrap_or("unknown"),
    )
}
