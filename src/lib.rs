//! Build the web URL of a file (and optionally a line) on a remote git host.
//!
//! ```
//! use open_in_git_host::{Context, registry};
//!
//! let ctx = Context::new("https://bitbucket.org", "foo", "bar", "src/Bar.java", "master")
//!     .with_line(Some(10));
//! let url = registry::resolve("bitbucket")?.url_from_context(&ctx)?;
//! assert_eq!(
//!     url.as_str(),
//!     "https://bitbucket.org/foo/bar/src/HEAD/src/Bar.java?at=master#Bar.java-10"
//! );
//! # Ok::<(), open_in_git_host::UrlError>(())
//! ```

pub mod context;
pub mod encoding;
pub mod error;
pub mod host;
pub mod mapping;
pub mod registry;

pub use context::Context;
pub use error::UrlError;
pub use host::{HostStrategy, HostType};
pub use mapping::{Mapping, RemoteLocation};
