use super::{LineAnchor, Part, Template};

pub(super) static TEMPLATE: Template = Template {
    name: "github",
    parts: &[
        Part::Project,
        Part::Repository,
        Part::Literal("blob"),
        Part::Branch,
        Part::Path,
    ],
    branch_query: None,
    anchor: LineAnchor::OneBased("L"),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::host::HostStrategy;

    #[test]
    fn blob_url_with_one_based_line() {
        let ctx = Context::new("https://github.com", "acme", "widgets", "src/lib.rs", "main")
            .with_line(Some(0));
        assert_eq!(
            TEMPLATE.url_from_context(&ctx).unwrap().as_str(),
            "https://github.com/acme/widgets/blob/main/src/lib.rs#L1"
        );
    }

    #[test]
    fn branch_slash_is_encoded_in_path() {
        let ctx = Context::new(
            "https://github.com",
            "acme",
            "widgets",
            "docs/User Guide.md",
            "feature/foo",
        );
        assert_eq!(
            TEMPLATE.url_from_context(&ctx).unwrap().as_str(),
            "https://github.com/acme/widgets/blob/feature%2Ffoo/docs/User%20Guide.md"
        );
    }
}
