//! # astgen
//!
//! Generates AST node types and their visitor interfaces from a compact grammar.
//!
//! File Layout
//!
//! The compiler is split in stages that can be tested on their own:
//! src/astgen
//!   ├── grammar        One grammar line -> NodeSpec (logos lexer + splitter)
//!   ├── placeholder    `$base$` substitution, applied before any parsing
//!   ├── dispatch       Dispatch conventions and the shapes they produce
//!   ├── group          Group definitions and their resolved form
//!   ├── emitter        Per-node fragments, one entry point per shape
//!   ├── compiler       Group -> two documents (types + visitors)
//!   ├── target(s)      Language renditions (C#, Rust) and their registry
//!   └── writer         Persisting documents to disk
//!
//! A grammar block looks like:
//!
//! ```text
//! Binary   : $base$ Left, Token Operator, $base$ Right
//! Literal  : Token Value
//! Break    :
//! ```

#![allow(rustdoc::invalid_html_tags)]

pub mod astgen;
