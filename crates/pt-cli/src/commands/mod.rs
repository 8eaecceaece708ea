//! CLI subcommand implementations.

pub mod projects;
pub mod show_catalog;
pub mod sync_config;
pub mod sync_entries;
pub mod time_entries;
pub mod util;
