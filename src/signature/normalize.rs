//! Signature normalization

use super::parse::Signature;
use serde::{Deserialize, Serialize};

/// Canonicalization pass applied to every signature before comparison
pub trait Normalizer: Send + Sync {
    fn normalize(&self, signature: &str) -> String;
}

/// Default normalization.
///
/// Drops insignificant whitespace, keeping one space between adjacent
/// words (`const int`), and optionally rewrites top-level `const T&`
/// parameters to `T` so value and const-reference parameters compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalNormalizer {
    pub collapse_const_refs: bool,
}

impl Default for CanonicalNormalizer {
    fn default() -> Self {
        Self {
            collapse_const_refs: true,
        }
    }
}

impl CanonicalNormalizer {
    /// Whitespace only
    pub const fn verbatim() -> Self {
        Self {
            collapse_const_refs: false,
        }
    }
}

impl Normalizer for CanonicalNormalizer {
    fn normalize(&self, signature: &str) -> String {
        let compact = compact_whitespace(signature);
        let Some(mut parsed) = Signature::parse(&compact) else {
            return compact;
        };
        if self.collapse_const_refs {
            for param in parsed.params.iter_mut() {
                if let Some(inner) = strip_const_ref(param) {
                    *param = inner.to_string();
                }
            }
        }
        parsed.to_string()
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn compact_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space && is_word_char(c) && out.chars().last().map_or(false, is_word_char) {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// `const T&` → `T`; rvalue references and pointers are left alone
fn strip_const_ref(param: &str) -> Option<&str> {
    let rest = param.strip_prefix("const ")?;
    let inner = rest.strip_suffix('&')?;
    if inner.ends_with('&') || inner.is_empty() {
        return None;
    }
    Some(inner.trim_end())
}
