use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Incoming problem, as sent by the browser extension
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDescription {
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub memory_limit: i64,
    #[serde(default)]
    pub time_limit: i64,
    #[serde(default)]
    pub tests: Vec<TestCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

// Response bodies
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    #[serde(rename = "PORT")]
    pub port: &'static str,
}

impl HealthResponse {
    pub fn started() -> Self {
        Self { port: "STARTED" }
    }
}

#[derive(Debug, Serialize)]
pub struct ScaffoldResponse {
    pub directory: PathBuf,
    pub code_file: PathBuf,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
