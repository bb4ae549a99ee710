//! Core functionality for the quill documentation linter
//!
//! This crate provides the core linting functionality including:
//! - Declaration and doc comment models
//! - Rule checking and diagnostic generation
//! - Configuration management
//! - File discovery and processing

pub mod analyze;
pub mod ast;
pub mod check;
pub mod config;
pub mod declaration;
pub mod diagnostic;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod jsdoc;
pub mod lints;
pub mod location;
pub mod mode;
pub mod resolve;
pub mod rule_set;
pub mod settings;
pub mod toml;
pub mod utils_ast;
