//! Presentation layer for duty-enrich
//!
//! This crate contains the CLI definitions and the output renderers
//! (JSON, pretty JSON and TOON).

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    AlertsArgs, ChangesArgs, ChannelsArgs, Cli, Command, EscalationRulesArgs, IncidentsArgs,
    InvalidArgs, MembersArgs, SimilarArgs, TeamsArgs, TimelineArgs,
};
pub use output::{ConsoleFormatter, OutputRenderer, to_toon};
