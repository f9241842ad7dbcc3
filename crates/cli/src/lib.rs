//! # nftm-cli
//!
//! Command line utilities shared by the nftm binaries.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod handler;
pub mod opts;
pub mod utils;
