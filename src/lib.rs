//! # pairview - Pairwise Alignment Viewer
//!
//! A terminal viewer comparing two pre-aligned amino acid sequences
//! position by position, using ratatui.
//!
//! ## Architecture
//!
//! - `residue`: residue color table (chemical classes, fallback color)
//! - `compare`: equal-length comparison producing per-column render descriptors
//! - `validate`: input rules (required, alphabet, equal length) and normalization
//! - `fasta`: FASTA parsing for pre-filling the form
//! - `clipboard`: clipboard capability (OSC 52 terminal escape, in-memory)
//! - `session_log`: optional per-session log file
//! - `model`: form, alignment view and notification state
//! - `event`: keyboard event handling
//! - `ui`: TUI rendering with ratatui
//! - `export`: colored or plain printing for non-interactive use
//! - `controller`: orchestration of the terminal loop

pub mod clipboard;
pub mod compare;
pub mod controller;
pub mod event;
pub mod export;
pub mod fasta;
pub mod model;
pub mod residue;
pub mod session_log;
pub mod ui;
pub mod validate;
