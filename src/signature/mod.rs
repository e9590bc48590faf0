//! Signature synthesis - canonical text describing a callable's types
//!
//! Input signatures are built incrementally: the opening token, then one
//! descriptor per parameter separated by commas, then `)`. Both signatures
//! pass through the injected normalizer before they are considered
//! canonical.

mod normalize;
mod parse;

pub use normalize::{CanonicalNormalizer, Normalizer};
pub use parse::Signature;

use crate::adapter::Callable;
use crate::errors::{ProxyError, ProxyResult, TypePosition};
use crate::invoke::{Param, ReturnType};
use crate::meta::{RawType, TypeRegistry};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tokens identifying proxy signatures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureStyle {
    pub input_token: String,
    pub output_token: String,
    pub void_marker: String,
}

impl Default for SignatureStyle {
    fn default() -> Self {
        Self {
            input_token: "_proxy_in".to_string(),
            output_token: "_proxy_out".to_string(),
            void_marker: "void".to_string(),
        }
    }
}

impl SignatureStyle {
    /// Reject tokens that would not survive parsing as `token(...)`
    pub fn validate(&self) -> ProxyResult<()> {
        for token in [&self.input_token, &self.output_token, &self.void_marker] {
            let invalid = |reason| {
                Err(ProxyError::InvalidStyle {
                    token: token.clone(),
                    reason,
                })
            };
            if token.is_empty() {
                return invalid("token is empty");
            }
            if token.trim() != token.as_str() {
                return invalid("surrounding whitespace");
            }
            if token.contains(|c| matches!(c, '(' | ')' | ',')) {
                return invalid("contains signature punctuation");
            }
        }
        if self.input_token == self.output_token {
            return Err(ProxyError::InvalidStyle {
                token: self.output_token.clone(),
                reason: "input and output tokens must differ",
            });
        }
        Ok(())
    }
}

/// Look up the registered name of a raw type
fn lookup(
    registry: &dyn TypeRegistry,
    raw: RawType,
    position: TypePosition,
) -> ProxyResult<Arc<str>> {
    registry
        .type_name(raw.id)
        .ok_or(ProxyError::UnregisteredType {
            type_name: raw.rust_name,
            position,
        })
}

/// Qualified descriptor of parameter `P` at 1-based `position`
pub fn param_descriptor<P: Param>(
    registry: &dyn TypeRegistry,
    position: usize,
) -> ProxyResult<String> {
    let base = lookup(
        registry,
        RawType::of::<P::Raw>(),
        TypePosition::Param(position),
    )?;
    Ok(P::QUALIFIERS.decorate(&base))
}

/// Append parameter `position` to an open input signature
#[doc(hidden)]
pub fn push_param<P: Param>(
    registry: &dyn TypeRegistry,
    signature: &mut String,
    position: usize,
) -> ProxyResult<()> {
    let descriptor = param_descriptor::<P>(registry, position)?;
    if position > 1 {
        signature.push(',');
    }
    signature.push_str(&descriptor);
    Ok(())
}

/// Builds canonical signatures against an injected registry and normalizer
#[derive(Clone, Copy)]
pub struct SignatureSynthesizer<'r> {
    registry: &'r dyn TypeRegistry,
    normalizer: &'r dyn Normalizer,
    style: &'r SignatureStyle,
}

static DEFAULT_STYLE: Lazy<SignatureStyle> = Lazy::new(SignatureStyle::default);

impl<'r> SignatureSynthesizer<'r> {
    pub fn new(registry: &'r dyn TypeRegistry, normalizer: &'r dyn Normalizer) -> Self {
        Self {
            registry,
            normalizer,
            style: &DEFAULT_STYLE,
        }
    }

    pub fn with_style(mut self, style: &'r SignatureStyle) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn registry(&self) -> &'r dyn TypeRegistry {
        self.registry
    }

    #[inline]
    pub fn style(&self) -> &'r SignatureStyle {
        self.style
    }

    /// Run host-supplied text through the same normalizer as synthesized text
    #[inline]
    pub fn normalize(&self, signature: &str) -> String {
        self.normalizer.normalize(signature)
    }

    /// `<input token>(d1,...,dN)`, normalized
    pub fn input_signature<F, M>(&self) -> ProxyResult<String>
    where
        F: Callable<M>,
    {
        let mut signature = String::with_capacity(self.style.input_token.len() + 16 * F::ARITY + 2);
        signature.push_str(&self.style.input_token);
        signature.push('(');
        F::write_params(self.registry, &mut signature)?;
        signature.push(')');
        Ok(self.normalizer.normalize(&signature))
    }

    /// Descriptor of the return type, the void marker when there is none.
    ///
    /// A return type registered under the void marker is rejected, so value
    /// and void outputs never share a signature.
    pub fn return_descriptor<R: ReturnType>(&self) -> ProxyResult<Arc<str>> {
        let Some(raw) = R::meta_type() else {
            return Ok(Arc::from(self.style.void_marker.as_str()));
        };
        let name = lookup(self.registry, raw, TypePosition::Return)?;
        if *name == *self.style.void_marker {
            return Err(ProxyError::InvalidTypeName {
                name: name.to_string(),
                reason: "collides with the void marker",
            });
        }
        Ok(name)
    }

    /// `<output token>(descriptor)`, normalized
    pub fn output_signature<R: ReturnType>(&self) -> ProxyResult<String> {
        let descriptor = self.return_descriptor::<R>()?;
        Ok(self.wrap_output(&descriptor))
    }

    pub(crate) fn wrap_output(&self, descriptor: &str) -> String {
        let signature = format!("{}({})", self.style.output_token, descriptor);
        self.normalizer.normalize(&signature)
    }
}
