use serde::Serialize;

/// Version-agnostic SARIF report assembled from test events.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub tool_name: String,
    pub tool_info_uri: Option<String>,
    pub rules: Vec<Rule>,
    pub results: Vec<Finding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub description: String,
}

impl Rule {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    #[allow(dead_code)]
    Warning,
    #[allow(dead_code)]
    Note,
}

/// A single SARIF result: one failed test or package.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub rule_id: String,
    pub level: Level,
    pub message: String,
    pub location: Option<LogicalLocation>,
}

/// Where a finding happened, by name rather than file coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLocation {
    module: Option<String>,
    function: Option<String>,
}

impl LogicalLocation {
    /// Returns `None` unless at least one of `module` or `function` is non-empty.
    pub fn new(module: Option<&str>, function: Option<&str>) -> Option<Self> {
        let module = module.filter(|m| !m.is_empty()).map(str::to_string);
        let function = function.filter(|f| !f.is_empty()).map(str::to_string);
        if module.is_none() && function.is_none() {
            return None;
        }
        Some(Self { module, function })
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }
}
