//! Self-reference placeholder resolution
//!
//! Grammar text may use `$base$` wherever a field should hold "any node of this group".
//! The token is replaced by the group's base type name on the whole block, before lines
//! are split or parsed, so the same grammar can serve groups with different base types.

/// Token standing for the base type of the group being compiled
pub const PLACEHOLDER: &str = "$base$";

/// Replace every placeholder in `text` with `base_type`
pub fn resolve(text: &str, base_type: &str) -> String {
    text.replace(PLACEHOLDER, base_type)
}

pub fn contains_placeholder(text: &str) -> bool {
    text.contains(PLACEHOLDER)
}
