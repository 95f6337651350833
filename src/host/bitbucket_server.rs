//! Self-hosted BitBucket (Server / Data Center).

use super::{BranchQuery, LineAnchor, Part, Template};

pub(super) static TEMPLATE: Template = Template {
    name: "bitbucket-server",
    parts: &[
        Part::Literal("projects"),
        Part::Project,
        Part::Literal("repos"),
        Part::Repository,
        Part::Literal("browse"),
        Part::Path,
    ],
    branch_query: Some(BranchQuery {
        key: "at",
        prefix: "refs/heads/",
    }),
    anchor: LineAnchor::OneBased(""),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::host::HostStrategy;

    #[test]
    fn browse_url_with_full_ref_and_line() {
        let ctx = Context::new(
            "https://bitbucket.acme.io",
            "PLAT",
            "api",
            "src/main/App.java",
            "feature/login",
        )
        .with_line(Some(41));
        assert_eq!(
            TEMPLATE.url_from_context(&ctx).unwrap().as_str(),
            "https://bitbucket.acme.io/projects/PLAT/repos/api/browse/src/main/App.java?at=refs%2fheads%2ffeature%2flogin#42"
        );
    }

    #[test]
    fn no_fragment_without_line() {
        let ctx = Context::new("https://bitbucket.acme.io", "PLAT", "api", "pom.xml", "main");
        let url = TEMPLATE.url_from_context(&ctx).unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some("at=refs%2fheads%2fmain"));
    }
}
