use super::{LineAnchor, Part, Template};

pub(super) static TEMPLATE: Template = Template {
    name: "gitlab",
    parts: &[
        Part::Project,
        Part::Repository,
        Part::Literal("-/blob"),
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
    fn subgroups_keep_their_separators() {
        let ctx = Context::new(
            "https://gitlab.com",
            "acme/platform team",
            "billing",
            "app/models/invoice.rb",
            "release/2.0",
        )
        .with_line(Some(9));
        assert_eq!(
            TEMPLATE.url_from_context(&ctx).unwrap().as_str(),
            "https://gitlab.com/acme/platform%20team/billing/-/blob/release%2F2.0/app/models/invoice.rb#L10"
        );
    }
}
