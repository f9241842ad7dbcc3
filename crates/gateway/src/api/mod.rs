//! The API surface, one module per resource group.

mod activities;
mod collections;
mod items;
mod market;
mod orders;
