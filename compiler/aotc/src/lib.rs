//! Ahead-of-time bootstrap compiler.
//!
//! Reads a registry of declarative component definitions and produces the
//! Java source that registers every component without runtime reflection.
//!
//! # Pipeline
//!
//! ```text
//! Registry (input)
//!     │
//!     ▼
//! collect ──► exclude types, infrastructure first
//!     │
//!     ▼
//! DescriptorBuilder ──► InstanceDescriptor | unresolved | fatal
//!     │
//!     ▼
//! BootstrapEmitter ──► UnitRegistry + ReflectionFacts
//!     │
//!     ▼
//! finalize() ──► CompileOutput
//! ```
//!
//! # Debugging
//!
//! - `RUST_LOG=aotc=debug`: phase boundaries and unresolved components
//! - `RUST_LOG=aot_resolve=trace`: candidate filtering per definition
//! - `RUST_LOG=aot_codegen=debug`: unit placement of every statement

mod config;
mod error;
mod output;
mod pipeline;

use std::sync::Once;

pub use aot_codegen::{EventListenerRequest, FactRecord, GeneratedUnit, ReflectionFlags, UnitKey};
pub use config::{GeneratorConfig, DEFAULT_ROOT_NAMESPACE, DEFAULT_UNIT_NAME};
pub use error::CompileError;
pub use output::CompileOutput;
pub use pipeline::BootstrapCompiler;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Nothing is installed unless `RUST_LOG` is
/// set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
