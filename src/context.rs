use serde::Serialize;
use url::Url;

use crate::error::UrlError;

/// Where the user is: a file at a branch in a remote repository, optionally
/// at a caret line.
///
/// `line` is zero-based. `Some(0)` is a real line and always produces an
/// anchor; only `None` means "no anchor".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Context {
    host_url: String,
    project: String,
    repository: String,
    path: String,
    branch: String,
    line: Option<u32>,
}

impl Context {
    pub fn new(
        host_url: impl Into<String>,
        project: impl Into<String>,
        repository: impl Into<String>,
        path: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            host_url: host_url.into(),
            project: project.into(),
            repository: repository.into(),
            path: path.into(),
            branch: branch.into(),
            line: None,
        }
    }

    pub fn with_line(self, line: Option<u32>) -> Self {
        Self { line, ..self }
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Last segment of `path`, without any directory components.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Checks the structural invariants and returns the parsed host URL.
    pub fn validate(&self) -> Result<Url, UrlError> {
        let host = Url::parse(&self.host_url)
            .map_err(|err| UrlError::invalid("host url", format!("'{}': {err}", self.host_url)))?;
        if !matches!(host.scheme(), "http" | "https") {
            return Err(UrlError::invalid(
                "host url",
                format!("'{}' must use http or https", self.host_url),
            ));
        }
        if host.host_str().is_none() {
            return Err(UrlError::invalid(
                "host url",
                format!("'{}' has no host", self.host_url),
            ));
        }
        if host.query().is_some() || host.fragment().is_some() {
            return Err(UrlError::invalid(
                "host url",
                format!("'{}' must not carry a query or fragment", self.host_url),
            ));
        }
        if self.host_url.ends_with('/') {
            return Err(UrlError::invalid(
                "host url",
                format!("'{}' must not end with '/'", self.host_url),
            ));
        }
        if let Some((_, rest)) = self.host_url.split_once("://")
            && rest.split('/').skip(1).any(is_dot_segment)
        {
            return Err(UrlError::invalid(
                "host url",
                format!("'{}' contains a '.' or '..' segment", self.host_url),
            ));
        }

        require_segments("project", &self.project)?;

        if self.repository.is_empty() {
            return Err(UrlError::invalid("repository", "must not be empty"));
        }
        if self.repository.contains('/') {
            return Err(UrlError::invalid(
                "repository",
                format!("'{}' must not contain '/'", self.repository),
            ));
        }
        if is_dot_segment(&self.repository) {
            return Err(UrlError::invalid(
                "repository",
                format!("'{}' is a relative path segment", self.repository),
            ));
        }

        if self.path.starts_with('/') {
            return Err(UrlError::invalid(
                "path",
                format!("'{}' must be relative to the repository root", self.path),
            ));
        }
        require_segments("path", &self.path)?;

        if self.branch.is_empty() {
            return Err(UrlError::invalid("branch", "must not be empty"));
        }
        if is_dot_segment(&self.branch) {
            return Err(UrlError::invalid(
                "branch",
                format!("'{}' is a relative path segment", self.branch),
            ));
        }

        Ok(host)
    }
}

fn require_segments(field: &'static str, value: &str) -> Result<(), UrlError> {
    if value.is_empty() {
        return Err(UrlError::invalid(field, "must not be empty"));
    }
    if value.split('/').any(str::is_empty) {
        return Err(UrlError::invalid(
            field,
            format!("'{value}' contains an empty path segment"),
        ));
    }
    if value.split('/').any(is_dot_segment) {
        return Err(UrlError::invalid(
            field,
            format!("'{value}' contains a '.' or '..' segment"),
        ));
    }
    Ok(())
}

/// URL parsers collapse these, so they never reach the host verbatim.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context::new(
            "https://bitbucket.org",
            "foo",
            "bar",
            "src/Bar.java",
            "master",
        )
    }

    fn invalid_field(ctx: &Context) -> &'static str {
        match ctx.validate() {
            Err(UrlError::InvalidContext { field, .. }) => field,
            other => panic!("expected invalid context, got {other:?}"),
        }
    }

    #[test]
    fn valid_context_returns_host() {
        let host = context().validate().unwrap();
        assert_eq!(host.host_str(), Some("bitbucket.org"));
    }

    #[test]
    fn host_url_may_carry_a_path_prefix() {
        let ctx = Context::new("https://example.com/git", "foo", "bar", "a.rs", "main");
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn zero_line_is_kept() {
        let ctx = context().with_line(Some(0));
        assert_eq!(ctx.line(), Some(0));
        assert_ne!(ctx, context());
    }

    #[test]
    fn file_name_is_last_segment() {
        let ctx = Context::new("https://h", "p", "r", "a/b/Foo Bar.java", "main");
        assert_eq!(ctx.file_name(), "Foo Bar.java");
        let ctx = Context::new("https://h", "p", "r", "README.md", "main");
        assert_eq!(ctx.file_name(), "README.md");
    }

    #[test]
    fn rejects_malformed_host_url() {
        let ctx = Context::new("bitbucket.org", "foo", "bar", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "host url");
        let ctx = Context::new("ftp://bitbucket.org", "foo", "bar", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "host url");
        let ctx = Context::new("https://bitbucket.org/", "foo", "bar", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "host url");
        let ctx = Context::new("https://bitbucket.org?x=1", "foo", "bar", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "host url");
    }

    #[test]
    fn rejects_empty_and_leading_slash_path() {
        let ctx = Context::new("https://h", "p", "r", "", "main");
        assert_eq!(invalid_field(&ctx), "path");
        let ctx = Context::new("https://h", "p", "r", "/src/Bar.java", "main");
        assert_eq!(invalid_field(&ctx), "path");
        let ctx = Context::new("https://h", "p", "r", "src//Bar.java", "main");
        assert_eq!(invalid_field(&ctx), "path");
    }

    #[test]
    fn rejects_bad_project_repository_and_branch() {
        let ctx = Context::new("https://h", "", "r", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "project");
        let ctx = Context::new("https://h", "group/", "r", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "project");
        let ctx = Context::new("https://h", "p", "a/b", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "repository");
        let ctx = Context::new("https://h", "p", "r", "a.rs", "");
        assert_eq!(invalid_field(&ctx), "branch");
    }

    #[test]
    fn rejects_dot_segments_in_every_field() {
        let ctx = Context::new("https://h", "./acme", "r", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "project");
        let ctx = Context::new("https://h", "acme/..", "r", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "project");
        let ctx = Context::new("https://h", "p", "..", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "repository");
        let ctx = Context::new("https://h", "p", ".", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "repository");
        let ctx = Context::new("https://h", "p", "r", "a/../b.rs", "main");
        assert_eq!(invalid_field(&ctx), "path");
        let ctx = Context::new("https://h", "p", "r", "./lib.rs", "main");
        assert_eq!(invalid_field(&ctx), "path");
        let ctx = Context::new("https://h", "p", "r", "a.rs", "..");
        assert_eq!(invalid_field(&ctx), "branch");
        let ctx = Context::new("https://h/git/..", "p", "r", "a.rs", "main");
        assert_eq!(invalid_field(&ctx), "host url");
    }

    #[test]
    fn dots_inside_names_are_valid() {
        let ctx = Context::new("https://h", "my.org", "repo.rs", ".github/ci..yml", "v1.2");
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn nested_project_is_valid() {
        let ctx = Context::new("https://gitlab.com", "group/sub group", "r", "a.rs", "main");
        assert!(ctx.validate().is_ok());
    }
}
