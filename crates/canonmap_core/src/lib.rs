//! Declarative mapping between native Rust types and JSON, TOML, and YAML values.

/// Canonical values, field and struct descriptors, the registry, and format adaptors.
pub mod map;
