use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Action tag carried by each `go test -json` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Start,
    Run,
    Pause,
    Cont,
    Pass,
    Bench,
    Fail,
    Output,
    Skip,
    BuildOutput,
    BuildFail,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Run => "run",
            Self::Pause => "pause",
            Self::Cont => "cont",
            Self::Pass => "pass",
            Self::Bench => "bench",
            Self::Fail => "fail",
            Self::Output => "output",
            Self::Skip => "skip",
            Self::BuildOutput => "build-output",
            Self::BuildFail => "build-fail",
            Self::Unknown => "unknown",
        }
    }
}

/// One decoded line of `go test -json` output.
///
/// Absent optional fields stay `None`; an explicit `"Elapsed": 0` is kept
/// distinct from a record that never carried an elapsed time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestEvent {
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: Action,
    #[serde(default, deserialize_with = "null_as_default")]
    pub package: String,
    #[serde(default)]
    pub test: Option<String>,
    #[serde(default)]
    pub elapsed: Option<f64>,
    #[serde(default)]
    pub output: Option<String>,
    /// Import path of the package whose build failed.
    #[serde(default)]
    pub failed_build: Option<String>,
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TestEvent {
    /// Test name, treating an empty string the same as an absent field.
    pub fn test_name(&self) -> Option<&str> {
        self.test.as_deref().filter(|name| !name.is_empty())
    }

    pub fn package_name(&self) -> Option<&str> {
        Some(self.package.as_str()).filter(|name| !name.is_empty())
    }
}
