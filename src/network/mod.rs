// file: src/network/mod.rs
// version: 2.0.0
// guid: n3tw0rk0-0001-4abc-9def-0123456789ab

//! Network operations

pub mod release;

pub use release::ReleaseCheck;
