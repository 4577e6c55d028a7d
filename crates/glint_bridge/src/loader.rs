//! Locating and initializing the engine module.
//!
//! Dev builds load the engine as a dylib so it can be swapped without
//! relinking the host; release builds can link it in behind the
//! `static-engine` feature.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::path::PathBuf;

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::ffi::{EngineEntry, HostCallbacks, InitFn, UpdateFn, INIT_SYMBOL};

/// A loaded, initialized engine instance.
#[derive(Debug)]
pub struct EngineSession {
    update: UpdateFn,
    app: *mut c_void,
    // Dropped last; unloading the module invalidates `update`.
    _module: Option<libloading::Library>,
}

impl EngineSession {
    /// Wraps an initialized engine entry.
    #[must_use]
    pub fn new(update: UpdateFn, app: *mut c_void, module: Option<libloading::Library>) -> Self {
        Self {
            update,
            app,
            _module: module,
        }
    }

    /// The engine's per-frame entry point.
    #[must_use]
    pub fn update_fn(&self) -> UpdateFn {
        self.update
    }

    /// The engine's opaque state pointer.
    #[must_use]
    pub fn app(&self) -> *mut c_void {
        self.app
    }

    fn from_entry(entry: EngineEntry, module: Option<libloading::Library>) -> BridgeResult<Self> {
        let update = entry.update.ok_or(BridgeError::NullUpdatePointer)?;
        Ok(Self::new(update, entry.app, module))
    }
}

/// How an engine module is found and initialized.
pub trait EngineLoader {
    /// Loads the engine and runs its init with `callbacks`.
    fn load(&self, callbacks: HostCallbacks) -> BridgeResult<EngineSession>;
}

/// Loads the engine from a dynamic library on disk.
pub struct DylibEngineLoader {
    path: PathBuf,
}

impl DylibEngineLoader {
    /// Loader for the module at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EngineLoader for DylibEngineLoader {
    fn load(&self, callbacks: HostCallbacks) -> BridgeResult<EngineSession> {
        tracing::info!(path = %self.path.display(), "loading engine module");
        // Module init code runs here; the module must be trusted.
        let module = unsafe { libloading::Library::new(&self.path) }.map_err(|source| {
            BridgeError::EngineLoad {
                path: self.path.clone(),
                source,
            }
        })?;
        let init = unsafe { module.get::<InitFn>(INIT_SYMBOL.as_bytes()) }.map_err(|source| {
            BridgeError::EntryPoint {
                symbol: INIT_SYMBOL.to_owned(),
                source,
            }
        })?;
        let entry = unsafe { init(callbacks) };
        drop(init);
        EngineSession::from_entry(entry, Some(module))
    }
}

/// Uses the engine linked into the host binary.
#[cfg(feature = "static-engine")]
pub struct LinkedEngineLoader;

#[cfg(feature = "static-engine")]
extern "C" {
    fn glint_engine_init(callbacks: HostCallbacks) -> EngineEntry;
}

#[cfg(feature = "static-engine")]
impl EngineLoader for LinkedEngineLoader {
    fn load(&self, callbacks: HostCallbacks) -> BridgeResult<EngineSession> {
        tracing::info!("initializing statically linked engine");
        let entry = unsafe { glint_engine_init(callbacks) };
        EngineSession::from_entry(entry, None)
    }
}

/// The loader the build configuration calls for: the linked engine when
/// `static-engine` is on, otherwise a dylib loader for the configured
/// module path.
pub fn default_loader(config: &BridgeConfig) -> BridgeResult<Box<dyn EngineLoader>> {
    #[cfg(feature = "static-engine")]
    {
        let _ = config;
        Ok(Box::new(LinkedEngineLoader))
    }
    #[cfg(not(feature = "static-engine"))]
    {
        match &config.engine_path {
            Some(path) => Ok(Box::new(DylibEngineLoader::new(path))),
            None => Err(BridgeError::MissingEnginePath),
        }
    }
}
