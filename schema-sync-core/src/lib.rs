#![doc = "schema-sync-core: core logic library for schema-sync."]

//! Keeps a nested schema checkout in sync with upstream, regenerates bindings
//! with an external schema compiler and writes an index re-exporting them.
//!
//! # Usage
//! Build a [`config::SyncConfig`], pick a [`contract::CommandRunner`]
//! (usually [`command::SystemRunner`]) and call [`synchronise::synchronise`].

pub mod command;
pub mod config;
pub mod contract;
pub mod error;
pub mod fs;
pub mod generate;
pub mod index;
pub mod repository;
pub mod synchronise;
pub mod toolchain;
