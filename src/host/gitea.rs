use super::{LineAnchor, Part, Template};

pub(super) static TEMPLATE: Template = Template {
    name: "gitea",
    parts: &[
        Part::Project,
        Part::Repository,
        Part::Literal("src/branch"),
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
    fn src_branch_url() {
        let ctx = Context::new("https://codeberg.org", "forgejo", "forgejo", "Makefile", "forgejo")
            .with_line(Some(99));
        assert_eq!(
            TEMPLATE.url_from_context(&ctx).unwrap().as_str(),
            "https://codeberg.org/forgejo/forgejo/src/branch/forgejo/Makefile#L100"
        );
    }
}
