//! Workspace tooling package. See `crates/` for the library and CLI.
