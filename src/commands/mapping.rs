use std::io::{IsTerminal, stdout};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use crossterm::style::Stylize;
use open_in_git_host::mapping::force_https;
use open_in_git_host::{Context as UrlContext, HostType, Mapping, RemoteLocation, registry};

use crate::args::{MappingAddArgs, MappingInferArgs};
use crate::db::Database;
use crate::git::Git;
use crate::ui::interaction::{confirm_select_yes_no, is_interactive, select};
use crate::views::{MappingView, print_json};

pub fn add(db: &Database, git: &Git, args: &MappingAddArgs, porcelain: bool) -> Result<()> {
    let host_type = match args.host_type.as_deref() {
        Some(id) => id.parse::<HostType>()?,
        None => pick_host_type()?,
    };
    let base_dir = match &args.base_dir {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", dir.display()))?,
        None => git.root().clone(),
    };
    let mut host_url = args.host_url.trim().trim_end_matches('/').to_string();
    if args.force_ssl {
        host_url = force_https(&host_url);
    }
    let mapping = Mapping {
        base_dir,
        host_type,
        host_url,
        project: args.project.trim().trim_matches('/').to_string(),
        repository: args.repository.trim().to_string(),
    };
    store(db, &mapping, "add", porcelain)
}

pub fn infer(db: &Database, git: &Git, args: &MappingInferArgs, porcelain: bool) -> Result<()> {
    let raw = git
        .remote_url(&args.remote)?
        .ok_or_else(|| anyhow!("no '{}' remote configured", args.remote))?;
    let location = RemoteLocation::parse(&raw).ok_or_else(|| {
        anyhow!(
            "unable to derive a web location from remote '{}' ({raw})",
            args.remote
        )
    })?;
    let host_type = match args.host_type.as_deref() {
        Some(id) => id.parse::<HostType>()?,
        None => HostType::infer_from_domain(&location.domain).ok_or_else(|| {
            anyhow!(
                "cannot infer host type for '{}'; pass --host-type",
                location.domain
            )
        })?,
    };
    let mapping = Mapping {
        base_dir: git.root().clone(),
        host_type,
        host_url: if args.force_ssl {
            force_https(&location.host_url)
        } else {
            location.host_url
        },
        project: location.project,
        repository: location.repository,
    };
    store(db, &mapping, "infer", porcelain)
}

pub fn list(db: &Database, porcelain: bool) -> Result<()> {
    let mappings = db.list_mappings()?;
    if porcelain {
        let views: Vec<MappingView> = mappings.iter().map(MappingView::from).collect();
        return print_json(&views);
    }

    if mappings.is_empty() {
        println!("no mappings configured");
        return Ok(());
    }

    let should_color = stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    for mapping in &mappings {
        let base = mapping.base_dir.display().to_string();
        let host = format!("{:<16}", mapping.host_type.as_str());
        let remote = format!(
            "{}/{}/{}",
            mapping.host_url, mapping.project, mapping.repository
        );
        if should_color {
            println!("{}  {}  {}", base.bold(), host.cyan(), remote.dark_grey());
        } else {
            println!("{base}  {host}  {remote}");
        }
    }
    Ok(())
}

pub fn remove(
    db: &Database,
    git: &Git,
    base_dir_arg: Option<&Path>,
    porcelain: bool,
    yes: bool,
) -> Result<()> {
    let mappings = db.list_mappings()?;
    let mut assumed_target = false;

    let base_dir = if let Some(dir) = base_dir_arg {
        dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
    } else if mappings.is_empty() {
        let payload = serde_json::json!({
            "base_dir": null,
            "action": "remove",
            "status": "noop",
            "reason": "no mappings configured"
        });
        if porcelain {
            print_json(&payload)?;
        } else {
            println!("no mappings configured; nothing to remove");
        }
        return Ok(());
    } else if mappings.len() == 1 {
        let assumed = mappings[0].base_dir.clone();
        if !porcelain {
            println!(
                "assuming mapping '{}' (only configured mapping)",
                assumed.display()
            );
        }
        assumed_target = true;
        assumed
    } else if is_interactive() {
        let items: Vec<String> = mappings
            .iter()
            .map(|m| format!("{}  ({})", m.base_dir.display(), m.host_type))
            .collect();
        let default_idx = mappings
            .iter()
            .position(|m| &m.base_dir == git.root())
            .unwrap_or(0);
        let idx = select(
            "Select mapping to remove (↑/↓ to navigate, Enter to select, Ctrl-C to cancel)",
            &items,
            default_idx,
        )?;
        mappings[idx].base_dir.clone()
    } else {
        return Err(anyhow!(
            "base directory required in non-interactive mode; pass open-in-git-host mapping remove <BASE_DIR>"
        ));
    };

    if assumed_target && !yes {
        if is_interactive() {
            let confirmed =
                confirm_select_yes_no(&format!("Remove mapping '{}'?", base_dir.display()))?;
            if !confirmed {
                if !porcelain {
                    println!("mapping not removed: confirmation declined; no changes made");
                }
                return Ok(());
            }
        } else {
            return Err(anyhow!(
                "mapping was auto-selected as '{}'; rerun with an explicit base directory or pass --yes",
                base_dir.display()
            ));
        }
    }

    if !db.remove_mapping(&base_dir)? {
        return Err(anyhow!("no mapping for '{}'", base_dir.display()));
    }

    if porcelain {
        return print_json(&serde_json::json!({
            "base_dir": base_dir.display().to_string(),
            "action": "remove",
            "status": "ok"
        }));
    }
    println!("removed mapping for '{}'", base_dir.display());
    Ok(())
}

fn store(db: &Database, mapping: &Mapping, action: &str, porcelain: bool) -> Result<()> {
    check_renders(mapping)?;
    let replaced = db.mapping_by_base_dir(&mapping.base_dir)?.is_some();
    db.upsert_mapping(mapping)?;

    if porcelain {
        return print_json(&serde_json::json!({
            "action": action,
            "status": "ok",
            "replaced": replaced,
            "mapping": MappingView::from(mapping),
        }));
    }
    println!(
        "{} '{}' to {} {}/{}/{}",
        if replaced { "remapped" } else { "mapped" },
        mapping.base_dir.display(),
        mapping.host_type,
        mapping.host_url,
        mapping.project,
        mapping.repository
    );
    Ok(())
}

/// Renders a throwaway URL so an unusable mapping is rejected before it is stored.
fn check_renders(mapping: &Mapping) -> Result<()> {
    let ctx = UrlContext::new(
        mapping.host_url.clone(),
        mapping.project.clone(),
        mapping.repository.clone(),
        "README.md",
        "main",
    );
    registry::strategy_for(mapping.host_type)
        .url_from_context(&ctx)
        .with_context(|| {
            format!(
                "mapping for '{}' cannot produce {} urls",
                mapping.base_dir.display(),
                mapping.host_type
            )
        })?;
    Ok(())
}

fn pick_host_type() -> Result<HostType> {
    if !is_interactive() {
        return Err(anyhow!(
            "host type required in non-interactive mode; pass --host-type"
        ));
    }
    let hosts = registry::supported();
    let labels: Vec<String> = hosts
        .iter()
        .map(|host| format!("{:<16}  {}", host.as_str(), host.template().pattern()))
        .collect();
    let idx = select("Select host type", &labels, 0)?;
    Ok(hosts[idx])
}
