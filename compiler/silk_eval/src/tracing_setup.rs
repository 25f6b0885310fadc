//! Opt-in diagnostic output.
//!
//! Enable with `RUST_LOG=silk_eval=debug` (or `=trace` for per-node spans).
//! Output is an indented span tree; set `SILK_LOG_FORMAT=flat` for one line
//! per event instead.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a global subscriber when `RUST_LOG` is set.
///
/// Safe to call any number of times. Does nothing if `RUST_LOG` is unset or
/// another global subscriber is already installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let flat = std::env::var("SILK_LOG_FORMAT").is_ok_and(|format| format == "flat");
        let tree_layer = (!flat).then(|| {
            HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true)
                .with_bracketed_fields(true)
        });
        let flat_layer = flat.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
        });

        // Fails only if the embedder installed its own subscriber first.
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tree_layer)
            .with(flat_layer)
            .try_init();
    });
}
