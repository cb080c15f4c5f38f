use crate::types::event::{Action, TestEvent};
use crate::types::report::{Finding, Level, LogicalLocation, Report, Rule};
use tracing::{debug, warn};

pub const TEST_FAILURE_RULE_ID: &str = "test-failure";
pub const TEST_FAILURE_DESCRIPTION: &str = "go test failure";

pub const DEFAULT_TOOL_NAME: &str = "go-test-sarif";
pub const DEFAULT_TOOL_INFO_URI: &str = "https://golang.org/cmd/go/";

/// Identity of the tool recorded in the SARIF driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub information_uri: Option<String>,
}

impl Default for ToolInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_TOOL_NAME.to_string(),
            information_uri: Some(DEFAULT_TOOL_INFO_URI.to_string()),
        }
    }
}

pub fn build_report(events: &[TestEvent], tool: &ToolInfo) -> Report {
    let results: Vec<Finding> = events.iter().filter_map(failure_finding).collect();

    debug!(
        events = events.len(),
        results = results.len(),
        "built report from test events"
    );

    Report {
        tool_name: tool.name.clone(),
        tool_info_uri: tool.information_uri.clone(),
        rules: vec![Rule::new(TEST_FAILURE_RULE_ID, TEST_FAILURE_DESCRIPTION)],
        results,
    }
}

fn failure_finding(event: &TestEvent) -> Option<Finding> {
    if event.action != Action::Fail {
        return None;
    }

    let location = LogicalLocation::new(event.package_name(), event.test_name());
    if location.is_none() {
        warn!(
            action = event.action.as_str(),
            "skipping fail event without package or test name"
        );
        return None;
    }

    debug!(
        package = %event.package,
        test = event.test_name().unwrap_or_default(),
        time = ?event.time,
        elapsed = ?event.elapsed,
        failed_build = ?event.failed_build,
        "recording test failure"
    );

    Some(Finding {
        rule_id: TEST_FAILURE_RULE_ID.to_string(),
        level: Level::Error,
        message: event.output.clone().unwrap_or_default(),
        location,
    })
}
