//! Launcher configuration.
//!
//! Two layers live here:
//!
//! - [`LauncherConfig`]: the optional `launcher.yaml` file. Unknown fields are
//!   ignored for forward compatibility and every field has a default, so an
//!   absent file behaves like `python -m src.main`.
//! - [`LaunchConfig`]: the fully resolved, immutable object built once at
//!   startup and handed by value to the launcher.

mod launch;
mod model;
mod operations;


// Re-export public API
pub use launch::LaunchConfig;
pub use model::{DEFAULT_CONFIG_FILE, LauncherConfig};
