use open_in_git_host::Mapping;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MappingView {
    pub base_dir: String,
    pub host_type: String,
    pub host_url: String,
    pub project: String,
    pub repository: String,
}

impl From<&Mapping> for MappingView {
    fn from(mapping: &Mapping) -> Self {
        Self {
            base_dir: mapping.base_dir.display().to_string(),
            host_type: mapping.host_type.to_string(),
            host_url: mapping.host_url.clone(),
            project: mapping.project.clone(),
            repository: mapping.repository.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlView {
    pub url: Option<String>,
    pub file: String,
    pub path: Option<String>,
    pub branch: Option<String>,
    pub line: Option<u32>,
    pub host_type: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostView {
    pub host_type: String,
    pub template: String,
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
