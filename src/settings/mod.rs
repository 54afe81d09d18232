//! Configuration loading and resolution.
//!
//! Sources are layered lowest to highest: the user config file, project-local
//! `.seek.toml`/`seek.toml`, explicit `--config` files, `SEEK__*` environment
//! variables and finally command-line flags. [`load`] returns the validated
//! [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;
mod util;

pub use loader::load;
pub use resolved::ResolvedConfig;
