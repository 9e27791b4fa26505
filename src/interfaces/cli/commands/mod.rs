//! CLI command implementations

mod config_gen;
mod plots_check;

pub use config_gen::config_generate;
pub use plots_check::plots_check;
