//! Batch entry point that hides all engine wiring.

use routeforge_config::EngineConfig;
use routeforge_core::RouteCatalog;
use routeforge_solver::{BatchOptions, BatchResult, RouteEngine};

/// Configuration file read by [`run_catalog`] from the working directory.
pub const CONFIG_FILE: &str = "routeforge.toml";

/// Runs a catalog with the configuration in [`CONFIG_FILE`].
///
/// A missing or unreadable file falls back to the defaults, as does a file
/// that fails validation.
pub fn run_catalog<C>(catalog: &C) -> BatchResult
where
    C: RouteCatalog + ?Sized,
{
    #[cfg(feature = "console")]
    routeforge_console::init();

    let config = EngineConfig::load(CONFIG_FILE).unwrap_or_default();
    let options = BatchOptions::from_config(&config);
    let engine = RouteEngine::new(config).unwrap_or_else(|_| RouteEngine::with_defaults());

    engine.run_batch(catalog, &options)
}
