//! Command-line front end for the lockscan assessment engine.
//!
//! This crate plays the document-parsing collaborator: it reads
//! plain-text contract files, splits them into text blocks, and feeds
//! the blocks to `lockscan-engine`. The engine itself performs no I/O.

pub mod blocks;
pub mod report;
