//! Built-in targets

pub mod csharp;
pub mod rust;

pub use csharp::CSharpTarget;
pub use rust::RustTarget;
