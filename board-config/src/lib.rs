//! Board Option Engine
//!
//! A declarative option engine for the board application:
//! - One static option table drives parsing of command lines and settings files
//! - Three quoting grammars (`{...}`, `"..."`/`'...'`, bare) with escape decoding
//! - Positional arguments mapped to options by sniffing their content
//! - `@file` indirection and settings-file options parsed recursively
//! - A serializer whose output the parser re-reads to the identical values
//!
//! # Architecture
//!
//! The engine half is independent of the board application and generic over
//! the state type it writes into.
//!
//! - [`schema`] - Option descriptors, typed storage lenses, the immutable schema
//! - [`source`] - Character sources over strings and files
//! - [`parser`] - The option-text lexer/parser
//! - [`decode`] - Per-type value conversion
//! - [`inference`] - Positional argument inference
//! - [`defaults`] - Default-application pass
//! - [`writer`] - Settings serializer
//! - [`engine`] - [`OptionEngine`] facade
//!
//! The application half supplies the content:
//!
//! - [`appdata`] - Program state of the board application
//! - [`options`] - Its option table
//! - [`frontend`] - Its collaborator hooks
//! - [`startup`] - Startup and save sequences

pub mod appdata;
pub mod cmdline;
pub mod config;
pub mod decode;
pub mod defaults;
pub mod engine;
pub mod frontend;
pub mod host;
pub mod inference;
pub mod lookup;
pub mod options;
pub mod parser;
pub mod schema;
pub mod source;
pub mod startup;
pub mod usage;
pub mod writer;

// Re-export commonly used types
pub use appdata::AppData;
pub use config::{Dialect, EngineConfig};
pub use engine::OptionEngine;
pub use host::Host;
pub use parser::{ParseMode, ParseReport};
pub use schema::{DefaultValue, Lens, OptionDescriptor, OptionKind, Schema};

/// Errors that can occur during option parsing and saving
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized argument {0}")]
    UnrecognizedOption(String),

    #[error("No value provided for argument {0}")]
    MissingValue(String),

    #[error("Bad integer value {0}")]
    BadInteger(String),

    #[error("Unrecognized boolean argument value {0}")]
    BadBoolean(String),

    #[error("Incomplete \\ escape in value for {0}")]
    IncompleteEscape(String),

    #[error("Failed to open indirection file {0}")]
    IndirectionOpenFailed(String),

    #[error("Indirection nested too deeply at {0}")]
    IndirectionTooDeep(String),

    #[error("Unexpected positional argument {0}")]
    UnexpectedPositional(String),

    #[error("Invalid value for {option}: {message}")]
    Hook { option: String, message: String },

    #[error("Option table error: {0}")]
    Schema(String),
}

impl ConfigError {
    /// Process exit status for a fatal error
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Io(_) => 1,
            _ => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
