use anyhow::{Result, anyhow};
use clap::CommandFactory;

use crate::args::Cli;
use crate::ui::interaction::{is_interactive, select};

pub fn run(shell: Option<clap_complete::Shell>) -> Result<()> {
    let shell = if let Some(shell) = shell {
        shell
    } else if is_interactive() {
        let shells = [
            clap_complete::Shell::Bash,
            clap_complete::Shell::Zsh,
            clap_complete::Shell::Fish,
            clap_complete::Shell::Elvish,
            clap_complete::Shell::PowerShell,
        ];
        let labels: Vec<String> = shells.iter().map(|shell| shell.to_string()).collect();
        let idx = select("Select shell for completion script", &labels, 1)?;
        shells[idx]
    } else {
        return Err(anyhow!(
            "shell required in non-interactive mode; pass open-in-git-host completions <shell>"
        ));
    };

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
    Ok(())
}
