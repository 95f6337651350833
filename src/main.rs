mod app;
mod args;
mod commands;
mod db;
mod git;
mod ui;
mod views;

use anyhow::Result;
use crossterm::style::Stylize;

fn main() -> Result<()> {
    if let Err(err) = app::run() {
        if err.downcast_ref::<ui::interaction::UserCancelled>().is_some() {
            eprintln!("\n{}", "cancelled by user".red().bold());
            std::process::exit(130);
        }
        return Err(err);
    }
    Ok(())
}
