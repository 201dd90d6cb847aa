//! Steam library reconciliation engine.
//!
//! Reconciles the app folders found in on-disk library roots against the
//! remote app catalog, deciding which folder corresponds to which catalog
//! entry when no authoritative record exists yet — and writes the minimal
//! install records that let the client re-adopt the folders it finds.
//!
//! The public API is organised into five layers:
//!
//! - **[`vdf`]** — codec for the client's nested key/value text format
//! - **[`catalog`]**, **[`lookup`]**, **[`library`]** — catalog index,
//!   persisted lookup table, and on-disk library access
//! - **[`resolver`]** — the cascading match resolver
//! - **[`record`]** — minimal install record builder
//! - **[`commands`]** — top-level subcommand orchestration (`scan`, `adopt`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod error;
pub mod library;
pub mod logging;
pub mod lookup;
pub mod record;
pub mod resolver;
pub mod vdf;
