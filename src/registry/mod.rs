//! Package state store.
//!
//! The [`PackageRegistry`] is the only object shared between truck runs; it
//! enforces forward-only status transitions and fixed truck assignment.

mod package_registry;

pub use package_registry::PackageRegistry;
