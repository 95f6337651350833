//! Maps a configured host type to its strategy.
//!
//! Selection never looks at a [`Context`](crate::Context); validating the
//! context is the strategy's job.

use crate::error::UrlError;
use crate::host::{HostStrategy, HostType};

pub fn strategy_for(host: HostType) -> &'static dyn HostStrategy {
    host.template()
}

pub fn resolve(identifier: &str) -> Result<&'static dyn HostStrategy, UrlError> {
    let host: HostType = identifier.parse()?;
    Ok(strategy_for(host))
}

pub fn supported() -> &'static [HostType] {
    &HostType::ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_supported_identifier() {
        for host in supported() {
            let strategy = resolve(host.as_str()).unwrap();
            assert_eq!(strategy.name(), host.as_str());
        }
    }

    #[test]
    fn unknown_identifier_is_unsupported() {
        let err = resolve("perforce").err().unwrap();
        assert_eq!(err, UrlError::UnsupportedHost("perforce".to_string()));
        assert!(resolve("").is_err());
    }
}
