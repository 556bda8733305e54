//! CLI command implementations for pytemplate.
//!
//! Each module corresponds to a subcommand (`pytemplate <command>`).

pub mod configure;
pub mod defaults;
pub mod inspect;
