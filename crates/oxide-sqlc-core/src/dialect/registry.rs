//! Process-wide dialect registry.
//!
//! The map is created on first use with the `default` dialect in it.
//! Registration takes the write lock; lookups share the read lock and hand
//! out `Arc` clones, so a compilation never holds the lock while rendering.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use super::DialectOptions;
use crate::error::{Result, SqlError};

/// Name of the dialect that is always registered.
pub const DEFAULT_DIALECT: &str = "default";

type Registry = RwLock<BTreeMap<String, Arc<DialectOptions>>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let mut map = BTreeMap::new();
        map.insert(
            String::from(DEFAULT_DIALECT),
            Arc::new(DialectOptions::default()),
        );
        RwLock::new(map)
    })
}

/// Registers `options` under `name`. The last registration of a name wins.
pub fn register_dialect(name: impl Into<String>, options: DialectOptions) {
    let name = name.into();
    let mut map = registry().write().unwrap_or_else(PoisonError::into_inner);
    let replaced = map.insert(name.clone(), Arc::new(options)).is_some();
    debug!(dialect = %name, replaced, "registered SQL dialect");
}

/// Returns the options registered under `name`.
///
/// # Errors
///
/// Returns [`SqlError::DialectNotFound`] when nothing is registered under
/// `name`.
pub fn lookup_dialect(name: &str) -> Result<Arc<DialectOptions>> {
    let map = registry().read().unwrap_or_else(PoisonError::into_inner);
    map.get(name)
        .cloned()
        .ok_or_else(|| SqlError::DialectNotFound(String::from(name)))
}

/// Names of every registered dialect, sorted.
#[must_use]
pub fn registered_dialects() -> Vec<String> {
    let map = registry().read().unwrap_or_else(PoisonError::into_inner);
    map.keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_always_present() {
        let options = lookup_dialect(DEFAULT_DIALECT).unwrap();
        assert_eq!(*options, DialectOptions::default());
        assert!(registered_dialects().contains(&String::from("default")));
    }

    #[test]
    fn test_unknown_dialect() {
        let err = lookup_dialect("registry-test-missing").unwrap_err();
        assert_eq!(
            err,
            SqlError::DialectNotFound(String::from("registry-test-missing"))
        );
    }

    #[test]
    fn test_last_registration_wins() {
        register_dialect(
            "registry-test-replace",
            DialectOptions {
                placeholder_fragment: String::from(":"),
                ..DialectOptions::default()
            },
        );
        register_dialect(
            "registry-test-replace",
            DialectOptions {
                placeholder_fragment: String::from("$"),
                ..DialectOptions::default()
            },
        );
        let options = lookup_dialect("registry-test-replace").unwrap();
        assert_eq!(options.placeholder_fragment, "$");
    }
}
