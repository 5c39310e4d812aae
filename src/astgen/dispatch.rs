//! Dispatch conventions
//!
//! A dispatch shape describes one visitor convention: what the visitor returns and how
//! many generic parameters its interface takes. A convention selects the shapes that are
//! emitted for a group, and every shape gets its own entry point, interface and method
//! names so that no two shapes ever differ only by return type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a visitor method produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResultKind {
    /// A value of the visitor's generic result type
    Value,
    /// Nothing; the visitor works through side effects
    Effect,
}

/// One dispatch convention to emit: `(result kind, generic arity)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DispatchShape {
    pub result: ResultKind,
    pub generic_arity: u8,
}

impl DispatchShape {
    pub const VALUE: DispatchShape = DispatchShape {
        result: ResultKind::Value,
        generic_arity: 1,
    };

    pub const EFFECT: DispatchShape = DispatchShape {
        result: ResultKind::Effect,
        generic_arity: 0,
    };

    /// Suffix appended to entry point, interface and method names of this shape
    pub fn suffix(&self) -> &'static str {
        match self.result {
            ResultKind::Value => "",
            ResultKind::Effect => "Effect",
        }
    }

    pub fn is_generic(&self) -> bool {
        self.generic_arity > 0
    }
}

/// Which dispatch shapes a group emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchConvention {
    #[default]
    ValueReturning,
    EffectOnly,
    Both,
}

impl DispatchConvention {
    /// Shapes in emission order
    pub fn shapes(&self) -> &'static [DispatchShape] {
        match self {
            DispatchConvention::ValueReturning => &[DispatchShape::VALUE],
            DispatchConvention::EffectOnly => &[DispatchShape::EFFECT],
            DispatchConvention::Both => &[DispatchShape::VALUE, DispatchShape::EFFECT],
        }
    }

    pub fn all() -> [DispatchConvention; 3] {
        [
            DispatchConvention::ValueReturning,
            DispatchConvention::EffectOnly,
            DispatchConvention::Both,
        ]
    }
}

impl fmt::Display for DispatchConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchConvention::ValueReturning => write!(f, "value-returning"),
            DispatchConvention::EffectOnly => write!(f, "effect-only"),
            DispatchConvention::Both => write!(f, "both"),
        }
    }
}

impl FromStr for DispatchConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value-returning" | "value" => Ok(DispatchConvention::ValueReturning),
            "effect-only" | "effect" => Ok(DispatchConvention::EffectOnly),
            "both" => Ok(DispatchConvention::Both),
            other => Err(format!(
                "unknown dispatch convention '{}' (expected 'value-returning', 'effect-only' or 'both')",
                other
            )),
        }
    }
}
