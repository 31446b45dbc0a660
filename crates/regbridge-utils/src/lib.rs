//! Filesystem and mount utilities shared by the regbridge crates.

pub mod error;
pub mod fs;
pub mod mount;
