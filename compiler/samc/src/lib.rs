//! SamBasic driver.
//!
//! Feeds program text to an [`Interpreter`] line by line, stores numbered
//! lines, executes the rest as immediate commands and turns outcomes into a
//! process exit status. Internal failures end in a crash dump.

mod crash;
mod driver;

use std::sync::Once;

pub use crash::{crash_file_name, render_crash_log, write_crash_dump};
pub use driver::{split_numbered, Driver};
pub use sam_eval::{Interpreter, InterpreterBuilder};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Only takes effect when `RUST_LOG` is set. Spans render as an indented
/// tree on stderr so nested statement bodies are easy to follow. Safe to call
/// more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .with(filter)
                .init();
        }
    });
}
