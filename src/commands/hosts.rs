use anyhow::Result;
use open_in_git_host::registry;

use crate::views::{HostView, print_json};

pub fn run(porcelain: bool) -> Result<()> {
    let views: Vec<HostView> = registry::supported()
        .iter()
        .map(|host| HostView {
            host_type: host.to_string(),
            template: host.template().pattern(),
        })
        .collect();

    if porcelain {
        return print_json(&views);
    }

    for view in &views {
        println!("{:<16}  {}", view.host_type, view.template);
    }
    Ok(())
}
