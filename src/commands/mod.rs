pub mod completions;
pub mod hosts;
pub mod mapping;
pub mod url;
