use serde::Deserialize;

/// Contents of `go-test-sarif.toml` after global and project layers are merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SarifConfig {
    pub sarif: Option<OutputConfig>,
    pub tool: Option<ToolConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub version: Option<String>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    pub name: Option<String>,
    pub information_uri: Option<String>,
}

impl SarifConfig {
    pub fn sarif_version(&self) -> Option<&str> {
        self.sarif
            .as_ref()
            .and_then(|sarif| sarif.version.as_deref())
    }

    pub fn pretty(&self) -> Option<bool> {
        self.sarif.as_ref().and_then(|sarif| sarif.pretty)
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.tool.as_ref().and_then(|tool| tool.name.as_deref())
    }

    pub fn tool_information_uri(&self) -> Option<&str> {
        self.tool
            .as_ref()
            .and_then(|tool| tool.information_uri.as_deref())
    }
}
