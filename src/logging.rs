//! Tracing subscriber setup.
//!
//! The filter sits behind a reload layer so `verbose = true` from the config
//! file, which is only known after the subscriber is up, can still raise it.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "nudgemon=debug"
    } else {
        "nudgemon=info"
    }
}

/// Handle for adjusting the installed filter.
pub struct LogHandle {
    /// `None` when `RUST_LOG` chose the filter.
    filter: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// Switches between the default and verbose filters. No-op under `RUST_LOG`.
    pub fn set_verbose(&self, verbose: bool) {
        let Some(handle) = &self.filter else {
            return;
        };
        if let Err(e) = handle.reload(EnvFilter::new(default_filter(verbose))) {
            tracing::warn!(error = %e, "Failed to update log filter");
        }
    }
}

/// Builds the reloadable filter layer. `env` wins over `verbose` when set.
fn filter_layer(
    verbose: bool,
    env: Option<EnvFilter>,
) -> (reload::Layer<EnvFilter, Registry>, LogHandle) {
    let from_env = env.is_some();
    let filter = env.unwrap_or_else(|| EnvFilter::new(default_filter(verbose)));
    let (layer, handle) = reload::Layer::new(filter);
    let handle = LogHandle {
        filter: (!from_env).then_some(handle),
    };
    (layer, handle)
}

/// Installs the global fmt subscriber. `RUST_LOG` takes precedence.
pub fn init(verbose: bool) -> LogHandle {
    let (filter, handle) = filter_layer(verbose, EnvFilter::try_from_default_env().ok());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(false), "nudgemon=info");
        assert_eq!(default_filter(true), "nudgemon=debug");
    }

    #[test]
    fn test_set_verbose_raises_filter() {
        let (filter, handle) = filter_layer(false, None);
        let subscriber = tracing_subscriber::registry().with(filter);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::INFO));
            assert!(!tracing::enabled!(Level::DEBUG));

            handle.set_verbose(true);
            assert!(tracing::enabled!(Level::DEBUG));
        });
    }

    #[test]
    fn test_env_filter_is_not_overridden() {
        let (_filter, handle) = filter_layer(false, Some(EnvFilter::new("warn")));
        assert!(handle.filter.is_none());
    }
}
