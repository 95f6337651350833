//! Per-provider URL strategies.
//!
//! A provider is a [`Template`]: the literal and substituted path parts of its
//! file-view URL, where the branch goes, and how it anchors a line. Adding a
//! provider means adding a template and a [`HostType`] variant; the renderer is
//! shared.

mod bitbucket;
mod bitbucket_server;
mod gitea;
mod github;
mod gitlab;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use crate::context::Context;
use crate::encoding::{
    check_representable, encode_path, encode_path_segment, encode_query_value,
};
use crate::error::UrlError;

pub trait HostStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn url_from_context(&self, ctx: &Context) -> Result<Url, UrlError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Literal(&'static str),
    Project,
    Repository,
    Branch,
    Path,
}

/// Branch carried as a query parameter, e.g. `?at=refs%2fheads%2fmain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchQuery {
    pub key: &'static str,
    pub prefix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAnchor {
    /// `<file name>-<line>`, line rendered as given.
    FileLine,
    /// `<prefix><line + 1>` for hosts that number lines from one.
    OneBased(&'static str),
}

impl LineAnchor {
    fn render(self, file_name: &str, line: u32) -> String {
        match self {
            LineAnchor::FileLine => format!("{}-{line}", encode_path_segment(file_name)),
            LineAnchor::OneBased(prefix) => format!("{prefix}{}", u64::from(line) + 1),
        }
    }

    fn pattern(self) -> String {
        match self {
            LineAnchor::FileLine => "{file}-{line}".to_string(),
            LineAnchor::OneBased(prefix) => format!("{prefix}{{line+1}}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub parts: &'static [Part],
    pub branch_query: Option<BranchQuery>,
    pub anchor: LineAnchor,
}

impl Template {
    /// Human-readable shape of the URLs this template produces.
    pub fn pattern(&self) -> String {
        let mut out = String::from("{host}");
        for part in self.parts {
            out.push('/');
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Project => out.push_str("{project}"),
                Part::Repository => out.push_str("{repository}"),
                Part::Branch => out.push_str("{branch}"),
                Part::Path => out.push_str("{path}"),
            }
        }
        if let Some(query) = self.branch_query {
            out.push_str(&format!("?{}={}{{branch}}", query.key, query.prefix));
        }
        out.push('#');
        out.push_str(&self.anchor.pattern());
        out
    }
}

impl HostStrategy for Template {
    fn name(&self) -> &'static str {
        self.name
    }

    fn url_from_context(&self, ctx: &Context) -> Result<Url, UrlError> {
        ctx.validate()?;
        for (field, value) in [
            ("host url", ctx.host_url()),
            ("project", ctx.project()),
            ("repository", ctx.repository()),
            ("path", ctx.path()),
            ("branch", ctx.branch()),
        ] {
            check_representable(field, value)?;
        }

        let mut out = String::from(ctx.host_url());
        for part in self.parts {
            out.push('/');
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Project => out.push_str(&encode_path(ctx.project())),
                Part::Repository => out.push_str(&encode_path_segment(ctx.repository())),
                Part::Branch => out.push_str(&encode_path_segment(ctx.branch())),
                Part::Path => out.push_str(&encode_path(ctx.path())),
            }
        }

        if let Some(query) = self.branch_query {
            let value = format!("{}{}", query.prefix, ctx.branch());
            out.push('?');
            out.push_str(query.key);
            out.push('=');
            out.push_str(&encode_query_value(&value));
        }

        if let Some(line) = ctx.line() {
            out.push('#');
            out.push_str(&self.anchor.render(ctx.file_name(), line));
        }

        trace!(host = self.name, url = %out, "rendered remote url");
        Url::parse(&out).map_err(|err| UrlError::encoding("url", format!("'{out}': {err}")))
    }
}

/// The closed set of supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostType {
    #[serde(rename = "bitbucket")]
    Bitbucket,
    #[serde(rename = "bitbucket-server")]
    BitbucketServer,
    #[serde(rename = "github")]
    Github,
    #[serde(rename = "gitlab")]
    Gitlab,
    #[serde(rename = "gitea")]
    Gitea,
}

impl HostType {
    pub const ALL: [HostType; 5] = [
        HostType::Bitbucket,
        HostType::BitbucketServer,
        HostType::Github,
        HostType::Gitlab,
        HostType::Gitea,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HostType::Bitbucket => "bitbucket",
            HostType::BitbucketServer => "bitbucket-server",
            HostType::Github => "github",
            HostType::Gitlab => "gitlab",
            HostType::Gitea => "gitea",
        }
    }

    pub fn template(self) -> &'static Template {
        match self {
            HostType::Bitbucket => &bitbucket::TEMPLATE,
            HostType::BitbucketServer => &bitbucket_server::TEMPLATE,
            HostType::Github => &github::TEMPLATE,
            HostType::Gitlab => &gitlab::TEMPLATE,
            HostType::Gitea => &gitea::TEMPLATE,
        }
    }

    /// Guesses the provider from a well-known domain name.
    pub fn infer_from_domain(domain: &str) -> Option<HostType> {
        let domain = domain.to_ascii_lowercase();
        match domain.as_str() {
            "bitbucket.org" => Some(HostType::Bitbucket),
            "github.com" => Some(HostType::Github),
            "gitlab.com" => Some(HostType::Gitlab),
            "codeberg.org" | "gitea.com" => Some(HostType::Gitea),
            d if d.starts_with("bitbucket.") => Some(HostType::BitbucketServer),
            d if d.starts_with("github.") => Some(HostType::Github),
            d if d.starts_with("gitlab.") => Some(HostType::Gitlab),
            d if d.starts_with("gitea.") => Some(HostType::Gitea),
            _ => None,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostType {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HostType::ALL
            .into_iter()
            .find(|host| host.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UrlError::UnsupportedHost(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_type_parses_case_insensitively() {
        assert_eq!("GitHub".parse::<HostType>().unwrap(), HostType::Github);
        assert_eq!(
            "bitbucket-server".parse::<HostType>().unwrap(),
            HostType::BitbucketServer
        );
    }

    #[test]
    fn unknown_host_type_is_unsupported() {
        let err = "sourcehut".parse::<HostType>().unwrap_err();
        assert_eq!(err, UrlError::UnsupportedHost("sourcehut".to_string()));
    }

    #[test]
    fn host_type_serializes_as_identifier() {
        let json = serde_json::to_string(&HostType::BitbucketServer).unwrap();
        assert_eq!(json, "\"bitbucket-server\"");
        let back: HostType = serde_json::from_str("\"gitlab\"").unwrap();
        assert_eq!(back, HostType::Gitlab);
    }

    #[test]
    fn infers_host_type_from_domain() {
        assert_eq!(
            HostType::infer_from_domain("bitbucket.org"),
            Some(HostType::Bitbucket)
        );
        assert_eq!(
            HostType::infer_from_domain("bitbucket.acme.internal"),
            Some(HostType::BitbucketServer)
        );
        assert_eq!(
            HostType::infer_from_domain("GitHub.com"),
            Some(HostType::Github)
        );
        assert_eq!(
            HostType::infer_from_domain("gitlab.acme.io"),
            Some(HostType::Gitlab)
        );
        assert_eq!(
            HostType::infer_from_domain("codeberg.org"),
            Some(HostType::Gitea)
        );
        assert_eq!(HostType::infer_from_domain("git.acme.io"), None);
    }

    #[test]
    fn pattern_describes_template() {
        assert_eq!(
            HostType::Bitbucket.template().pattern(),
            "{host}/{project}/{repository}/src/HEAD/{path}?at={branch}#{file}-{line}"
        );
        assert_eq!(
            HostType::Github.template().pattern(),
            "{host}/{project}/{repository}/blob/{branch}/{path}#L{line+1}"
        );
    }

    #[test]
    fn control_characters_fail_encoding() {
        let ctx = Context::new("https://github.com", "acme", "repo", "src/a\u{0}.rs", "main");
        let err = HostType::Github
            .template()
            .url_from_context(&ctx)
            .unwrap_err();
        assert!(matches!(err, UrlError::EncodingFailure { field: "path", .. }));
    }

    #[test]
    fn invalid_context_is_reported_before_encoding() {
        let ctx = Context::new("https://github.com", "acme", "repo", "", "main\n");
        let err = HostType::Github
            .template()
            .url_from_context(&ctx)
            .unwrap_err();
        assert!(matches!(err, UrlError::InvalidContext { field: "path", .. }));
    }
}
