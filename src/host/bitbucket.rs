//! BitBucket Cloud: `{host}/{project}/{repo}/src/HEAD/{path}?at={branch}#{file}-{line}`.

use super::{BranchQuery, LineAnchor, Part, Template};

pub(super) static TEMPLATE: Template = Template {
    name: "bitbucket",
    parts: &[
        Part::Project,
        Part::Repository,
        Part::Literal("src/HEAD"),
        Part::Path,
    ],
    branch_query: Some(BranchQuery {
        key: "at",
        prefix: "",
    }),
    anchor: LineAnchor::FileLine,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::host::HostStrategy;

    fn url(ctx: &Context) -> String {
        TEMPLATE.url_from_context(ctx).unwrap().to_string()
    }

    #[test]
    fn branch_goes_in_query_without_line() {
        let ctx = Context::new("https://bitbucket.org", "foo", "bar", "src/Bar.java", "master");
        assert_eq!(
            url(&ctx),
            "https://bitbucket.org/foo/bar/src/HEAD/src/Bar.java?at=master"
        );
    }

    #[test]
    fn line_anchor_uses_file_name() {
        let ctx = Context::new("https://bitbucket.org", "foo", "bar", "FooBar/Bar.java", "foo-bar")
            .with_line(Some(10));
        assert_eq!(
            url(&ctx),
            "https://bitbucket.org/foo/bar/src/HEAD/FooBar/Bar.java?at=foo-bar#Bar.java-10"
        );
    }

    #[test]
    fn spaces_slashes_and_zero_line() {
        let ctx = Context::new(
            "https://bitbucket.org",
            "foo bar",
            "bar",
            "Foo Bar/Bar.java",
            "misc/foo-bar",
        )
        .with_line(Some(0));
        assert_eq!(
            url(&ctx),
            "https://bitbucket.org/foo%20bar/bar/src/HEAD/Foo%20Bar/Bar.java?at=misc%2ffoo-bar#Bar.java-0"
        );
    }

    #[test]
    fn file_name_with_space_is_encoded_in_anchor() {
        let ctx = Context::new("https://bitbucket.org", "foo", "bar", "docs/Read Me.md", "main")
            .with_line(Some(3));
        assert!(url(&ctx).ends_with("#Read%20Me.md-3"));
    }
}
