//! Local directory to remote repository mappings.
//!
//! A mapping says "files under `base_dir` live in `project/repository` on
//! `host_url`, a `host_type` host". It is what turns an on-disk file into a
//! [`Context`].

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::context::Context;
use crate::error::UrlError;
use crate::host::HostType;
use crate::registry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub base_dir: PathBuf,
    pub host_type: HostType,
    pub host_url: String,
    pub project: String,
    pub repository: String,
}

impl Mapping {
    /// Forward-slash path of `file` relative to `base_dir`, or `None` when the
    /// file is outside it.
    pub fn relative_path(&self, file: &Path) -> Option<Result<String, UrlError>> {
        let rest = file.strip_prefix(&self.base_dir).ok()?;
        let mut segments = Vec::new();
        for component in rest.components() {
            match component {
                Component::Normal(segment) => match segment.to_str() {
                    Some(segment) => segments.push(segment),
                    None => {
                        return Some(Err(UrlError::encoding(
                            "path",
                            format!("'{}' is not valid UTF-8", rest.display()),
                        )));
                    }
                },
                _ => {
                    return Some(Err(UrlError::invalid(
                        "path",
                        format!("'{}' is not a normalized path", rest.display()),
                    )));
                }
            }
        }
        Some(Ok(segments.join("/")))
    }

    pub fn context_for(
        &self,
        file: &Path,
        branch: &str,
        line: Option<u32>,
    ) -> Result<Option<Context>, UrlError> {
        let Some(path) = self.relative_path(file).transpose()? else {
            return Ok(None);
        };
        Ok(Some(
            Context::new(
                self.host_url.clone(),
                self.project.clone(),
                self.repository.clone(),
                path,
                branch,
            )
            .with_line(line),
        ))
    }

    pub fn url_for(
        &self,
        file: &Path,
        branch: &str,
        line: Option<u32>,
    ) -> Result<Option<Url>, UrlError> {
        let Some(ctx) = self.context_for(file, branch, line)? else {
            return Ok(None);
        };
        debug!(host = %self.host_type, path = ctx.path(), branch, ?line, "building remote url");
        registry::strategy_for(self.host_type)
            .url_from_context(&ctx)
            .map(Some)
    }
}

/// Picks the mapping covering `file`; the deepest `base_dir` wins.
pub fn find_for_file<'a>(mappings: &'a [Mapping], file: &Path) -> Option<&'a Mapping> {
    mappings
        .iter()
        .filter(|mapping| file.starts_with(&mapping.base_dir))
        .max_by_key(|mapping| mapping.base_dir.components().count())
}

/// Host, project and repository recovered from a git remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteLocation {
    pub host_url: String,
    pub domain: String,
    pub project: String,
    pub repository: String,
}

impl RemoteLocation {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw: String = raw.trim().chars().filter(|c| !c.is_control()).collect();

        // scp-like `[user@]host:path`
        let (host_url, domain, path) = if !raw.contains("://")
            && let Some((host, path)) = raw.split_once(':')
        {
            let host = host.rsplit_once('@').map_or(host, |(_, host)| host);
            if host.is_empty() || host.contains('/') {
                return None;
            }
            (format!("https://{host}"), host.to_string(), path.to_string())
        } else {
            let url = Url::parse(&raw).ok()?;
            let domain = url.host_str()?.to_string();
            let host_url = match url.scheme() {
                "http" | "https" => match url.port() {
                    Some(port) => format!("{}://{domain}:{port}", url.scheme()),
                    None => format!("{}://{domain}", url.scheme()),
                },
                "ssh" | "git" => format!("https://{domain}"),
                _ => return None,
            };
            (host_url, domain, url.path().to_string())
        };

        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let (project, repository) = path.rsplit_once('/')?;
        if project.is_empty() || repository.is_empty() {
            return None;
        }

        Some(Self {
            host_url,
            domain,
            project: decode_or_keep(project),
            repository: decode_or_keep(repository),
        })
    }
}

/// Rewrites an `http://` host URL to `https://`; anything else is returned
/// unchanged.
pub fn force_https(host_url: &str) -> String {
    match host_url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => host_url.to_string(),
    }
}

fn decode_or_keep(value: &str) -> String {
    crate::encoding::decode(value).unwrap_or_else(|_| value.to_string())
}
