//! Accelerator hardware catalog for the ClusterFit sizing advisor.
//!
//! This crate is deliberately free of sizing logic: it defines the
//! [`AcceleratorSpec`] record, ships a built-in table of current parts,
//! and loads operator-supplied catalogs from TOML. The advisor in
//! `clusterfit-core` treats any catalog as an opaque, immutable input, so
//! recommendations can be tested against synthetic hardware tables.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`spec`] | [`AcceleratorSpec`], [`Vendor`] |
//! | [`builtin`] | The built-in spec table |
//! | [`load`] | [`Catalog`], TOML parsing and validation |

pub mod builtin;
pub mod load;
pub mod spec;

pub use load::{Catalog, CatalogError};
pub use spec::{AcceleratorSpec, Vendor};

/// Look up a built-in accelerator spec by name.
pub fn accelerator_by_name(name: &str) -> Option<AcceleratorSpec> {
    builtin::accelerators().into_iter().find(|s| s.name == name)
}

/// Names of all built-in accelerators.
pub fn available_accelerators() -> Vec<String> {
    builtin::accelerators()
        .into_iter()
        .map(|s| s.name)
        .collect()
}
