//! # Bridge Error Types
//!
//! Startup and configuration failures. Per-frame anomalies never land
//! here; those are logged and dropped so the render loop keeps running.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while standing up or configuring the bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The engine module could not be loaded from disk.
    #[error("failed to load engine module {}", path.display())]
    EngineLoad {
        /// Path the loader was pointed at.
        path: PathBuf,
        /// The underlying loader error.
        #[source]
        source: libloading::Error,
    },

    /// The engine module is missing its entry point.
    #[error("engine module has no `{symbol}` entry point")]
    EntryPoint {
        /// The symbol that was looked up.
        symbol: String,
        /// The underlying loader error.
        #[source]
        source: libloading::Error,
    },

    /// The engine's init returned no update function.
    #[error("engine returned a null update pointer")]
    NullUpdatePointer,

    /// Dynamic loading requested but no module path configured.
    #[error("no engine module path configured")]
    MissingEnginePath,

    /// Config file could not be read.
    #[error("failed to read config {}", path.display())]
    ConfigRead {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::BridgeConfig`].
    #[error("invalid config {}", path.display())]
    ConfigParse {
        /// The file that was being parsed.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
