//! LexQuest Core — shared domain vocabulary.
//!
//! This crate defines the identifiers, catalog types, progress facts and
//! collaborator traits that every play mode depends on. It contains no
//! infrastructure code.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod content;
pub mod error;
pub mod ids;
pub mod progress;
pub mod rng;
