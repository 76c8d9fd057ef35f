//! Shared utilities for the CellML encapsulation tools

pub mod error;
