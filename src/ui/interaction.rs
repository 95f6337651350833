use std::io::{IsTerminal, stdin, stdout};

use anyhow::Result;
use dialoguer::console::Term;
use dialoguer::{Select, theme::ColorfulTheme};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("cancelled by user")]
pub struct UserCancelled;

pub fn is_interactive() -> bool {
    stdout().is_terminal() && stdin().is_terminal()
}

pub fn prompt_or_cancel<T>(result: dialoguer::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            let _ = Term::stdout().show_cursor();
            let _ = Term::stderr().show_cursor();
            match err {
                dialoguer::Error::IO(io_err)
                    if io_err.kind() == std::io::ErrorKind::Interrupted =>
                {
                    Err(UserCancelled.into())
                }
                other => Err(other.into()),
            }
        }
    }
}

pub fn select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    let theme = ColorfulTheme::default();
    prompt_or_cancel(
        Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact(),
    )
}

pub fn confirm_select_yes_no(prompt: &str) -> Result<bool> {
    let options = ["Yes".to_string(), "No".to_string()];
    Ok(select(prompt, &options, 0)? == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_interrupt_maps_to_user_cancelled_error() {
        let err = dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::Interrupted,
            "ctrl-c",
        ));
        let result = prompt_or_cancel::<()>(Err(err));
        assert!(result.is_err());
        let got = result.unwrap_err();
        assert!(got.downcast_ref::<UserCancelled>().is_some());
    }

    #[test]
    fn other_prompt_errors_pass_through() {
        let err = dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        ));
        let got = prompt_or_cancel::<()>(Err(err)).unwrap_err();
        assert!(got.downcast_ref::<UserCancelled>().is_none());
    }
}
