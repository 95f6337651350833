use std::process::Command;

use anyhow::{Context, Result, anyhow};
use open_in_git_host::mapping::find_for_file;
use open_in_git_host::registry;
use tracing::debug;

use crate::args::UrlArgs;
use crate::db::Database;
use crate::git::Git;
use crate::views::{UrlView, print_json};

pub fn run(db: &Database, git: &Git, args: &UrlArgs, porcelain: bool) -> Result<()> {
    let file = args
        .file
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", args.file.display()))?;
    let mappings = db.list_mappings()?;

    let Some(mapping) = find_for_file(&mappings, &file) else {
        let reason = format!("no mapping covers {}", file.display());
        if porcelain {
            return print_json(&UrlView {
                url: None,
                file: file.display().to_string(),
                path: None,
                branch: None,
                line: args.line,
                host_type: None,
                reason: Some(reason),
            });
        }
        eprintln!(
            "warning: {reason}; add one with `open-in-git-host mapping add` or `open-in-git-host mapping infer`"
        );
        return Ok(());
    };
    debug!(base_dir = %mapping.base_dir.display(), host = %mapping.host_type, "selected mapping");

    let branch = match &args.branch {
        Some(branch) => branch.clone(),
        None => git
            .current_branch()?
            .ok_or_else(|| anyhow!("HEAD is detached; pass --branch to choose a branch"))?,
    };
    // Editors show 1-based lines; the caret line is zero-based.
    let caret = args.line.map(|line| line.saturating_sub(1));

    let ctx = mapping
        .context_for(&file, &branch, caret)?
        .ok_or_else(|| anyhow!("{} is outside {}", file.display(), mapping.base_dir.display()))?;
    let url = registry::strategy_for(mapping.host_type)
        .url_from_context(&ctx)
        .with_context(|| {
            format!(
                "failed to build {} url for {}",
                mapping.host_type,
                file.display()
            )
        })?;

    if args.open {
        open_in_browser(url.as_str())?;
    }

    if porcelain {
        return print_json(&UrlView {
            url: Some(url.to_string()),
            file: file.display().to_string(),
            path: Some(ctx.path().to_string()),
            branch: Some(branch),
            line: args.line,
            host_type: Some(mapping.host_type.to_string()),
            reason: None,
        });
    }

    println!("{url}");
    Ok(())
}

fn open_in_browser(url: &str) -> Result<()> {
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };
    let status = cmd
        .arg(url)
        .status()
        .context("failed to launch the system browser")?;
    if !status.success() {
        return Err(anyhow!("browser launcher exited with {status}"));
    }
    Ok(())
}
