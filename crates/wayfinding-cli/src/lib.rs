//! Wayfinding CLI library.
//!
//! This crate provides the pieces of the command-line front end that are
//! independent of argument parsing: locating the building graph and choosing
//! an output format.

pub mod output;
pub mod source;
