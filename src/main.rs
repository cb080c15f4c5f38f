mod analyze;
mod cli;
mod config;
mod converter;
mod error;
mod logging;
mod report;
mod testjson;
mod types;

use crate::analyze::ToolInfo;
use crate::converter::ConvertOptions;
use crate::error::ConvertError;
use crate::report::version::{VersionRegistry, DEFAULT_VERSION};
use crate::types::config::SarifConfig;
use tracing::debug;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

fn resolve_options(cli: &cli::Cli, cfg: &SarifConfig) -> ConvertOptions {
    let defaults = ToolInfo::default();
    let tool = ToolInfo {
        name: cfg
            .tool_name()
            .map(str::to_string)
            .unwrap_or(defaults.name),
        information_uri: cfg
            .tool_information_uri()
            .map(str::to_string)
            .or(defaults.information_uri),
    };

    ConvertOptions {
        sarif_version: cli
            .sarif_version
            .as_deref()
            .or(cfg.sarif_version())
            .unwrap_or(DEFAULT_VERSION)
            .to_string(),
        pretty: cli.pretty || cfg.pretty().unwrap_or(false),
        tool,
    }
}

fn run(cli: cli::Cli, registry: &VersionRegistry) -> Result<i32, ConvertError> {
    if cli.version {
        print!("{}", cli::version_text());
        return Ok(exit_code::SUCCESS);
    }

    let (Some(input), Some(output)) = (cli.input.as_deref(), cli.output.as_deref()) else {
        eprintln!("Usage: {} [options] <input.json> <output.sarif>", cli::APP_NAME);
        return Ok(exit_code::FAILURE);
    };

    let loaded = config::load_config(cli.config.as_deref())?;
    let options = resolve_options(&cli, &loaded);
    debug!(?options, "resolved conversion options");

    converter::convert_with_registry(registry, input, output, &options)?;
    println!("SARIF report generated: {}", output.display());
    Ok(exit_code::SUCCESS)
}

fn main() {
    let registry = VersionRegistry::builtin();

    let cli = match cli::Cli::try_parse_with(&registry) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            if e.use_stderr() {
                std::process::exit(exit_code::FAILURE);
            }
            return;
        }
    };

    if let Err(e) = logging::init_tracing() {
        eprintln!("warning: {}", e);
    }

    match run(cli, &registry) {
        Ok(code) => {
            if code != exit_code::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code::FAILURE);
        }
    }
}
