//! Shared utilities.
//!
//! Shell quoting for logged command lines, and test helpers.

pub mod shell;

#[cfg(test)]
pub mod testutil;
