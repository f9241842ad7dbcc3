//! Common utilities for building and using the nftm tools.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod constants;
pub mod errors;
pub mod fs;
pub mod traits;

pub use constants::*;
pub use traits::*;
