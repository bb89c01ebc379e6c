//! Command-line driver for the `.mly` recognizer.
//!
//! The binary is a thin layer over [`mly_parse`]: argument handling lives in
//! [`config`], per-file work in [`commands`]. Everything that produces output
//! renders into strings first so files can be processed in parallel and
//! printed in argument order.

pub mod commands;
pub mod config;

use std::sync::Once;

pub use commands::{process_file, run, FileReport};
pub use config::{parse_args, CliConfig, Command, OutputFormat, UsageError};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber when `RUST_LOG` is set.
///
/// ```bash
/// RUST_LOG=mly_parse=debug mly check grammar.mly
/// RUST_LOG=mly_parse=trace mly parse grammar.mly
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            use tracing_subscriber::prelude::*;
            use tracing_subscriber::EnvFilter;

            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}
