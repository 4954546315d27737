//! CLI subcommand implementations for the hhwatch binary.

pub mod doctor;
pub mod run_cmd;
