//! SQL dialect support.
//!
//! Different databases spell the same statement differently. A dialect is
//! described by a [`DialectOptions`] value and published in a process-wide
//! registry under its name; the compiler only ever reads that value.

mod generic;
mod options;
pub mod registry;

pub use generic::GenericDialect;
pub use options::{
    default_bitwise_operators, default_boolean_operators, default_compounds,
    default_delete_order, default_insert_order, default_join_types, default_locks,
    default_select_order, default_update_order, DialectOptions, SqlFragment,
};
pub use registry::{lookup_dialect, register_dialect, registered_dialects, DEFAULT_DIALECT};

/// A named dialect shipped as a crate.
pub trait Dialect {
    /// Returns the name the dialect is registered under.
    fn name(&self) -> &'static str;

    /// Returns the dialect's settings.
    fn options(&self) -> DialectOptions;

    /// Registers the dialect, replacing any previous registration of the name.
    fn register(&self) {
        register_dialect(self.name(), self.options());
    }
}
