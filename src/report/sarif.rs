use crate::types::report::{Level, LogicalLocation, Report};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    pub schema: &'a str,
    pub version: &'a str,
    pub runs: Vec<Run<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Run<'a> {
    pub tool: Tool<'a>,
    pub results: Vec<SarifResult<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Tool<'a> {
    pub driver: Driver<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information_uri: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ReportingDescriptor<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingDescriptor<'a> {
    pub id: &'a str,
    pub short_description: Message<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult<'a> {
    pub rule_id: &'a str,
    pub level: Level,
    pub message: Message<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLogicalLocation {
    pub fully_qualified_name: String,
    pub kind: &'static str,
}

impl From<&LogicalLocation> for SarifLogicalLocation {
    fn from(location: &LogicalLocation) -> Self {
        let (fully_qualified_name, kind) = match (location.module(), location.function()) {
            (Some(module), Some(function)) => (format!("{module}.{function}"), "function"),
            (None, Some(function)) => (function.to_string(), "function"),
            (Some(module), None) => (module.to_string(), "module"),
            // LogicalLocation::new never builds an empty location.
            (None, None) => (String::new(), "module"),
        };
        Self {
            fully_qualified_name,
            kind,
        }
    }
}

/// Maps the report onto the run layout shared by SARIF 2.1.0 and 2.2.
pub fn build_run(report: &Report) -> Run<'_> {
    let rules = report
        .rules
        .iter()
        .map(|rule| ReportingDescriptor {
            id: &rule.id,
            short_description: Message {
                text: &rule.description,
            },
        })
        .collect();

    let results = report
        .results
        .iter()
        .map(|finding| SarifResult {
            rule_id: &finding.rule_id,
            level: finding.level,
            message: Message {
                text: &finding.message,
            },
            logical_locations: finding
                .location
                .iter()
                .map(SarifLogicalLocation::from)
                .collect(),
        })
        .collect();

    Run {
        tool: Tool {
            driver: Driver {
                name: &report.tool_name,
                information_uri: report.tool_info_uri.as_deref(),
                rules,
            },
        },
        results,
    }
}
