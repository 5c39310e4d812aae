//! Core of the AST generator.
//!
//! The public entry point is [`compiler::compile`], which takes a [`group::GroupDefinition`]
//! and a [`target::Target`] and returns the two documents of the group. The stages it runs
//! are public too, so tooling (and tests) can stop after resolution or parsing.

pub mod compiler;
pub mod dispatch;
pub mod document;
pub mod emitter;
pub mod error;
pub mod grammar;
pub mod group;
pub mod naming;
pub mod placeholder;
pub mod registry;
pub mod target;
pub mod targets;
pub mod writer;

pub use compiler::{compile, GroupOutput};
pub use dispatch::{DispatchConvention, DispatchShape, ResultKind};
pub use document::{DocumentKind, GeneratedDocument};
pub use error::GenerationError;
pub use grammar::{parse_line, FieldSpec, MalformedLine, NodeSpec};
pub use group::{AstGroupSpec, GroupDefinition};
pub use naming::NodeNaming;
pub use registry::TargetRegistry;
pub use target::Target;
pub use writer::{ArtifactWriter, WriteError, WriteMode, WriteReport};
