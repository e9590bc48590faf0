//! sigproxy - typed callables for textual signal/slot runtimes
//!
//! Wraps an ordinary function of up to five parameters into an adapter that
//! exposes what a dynamically-typed dispatch runtime needs: a canonical
//! input signature, a canonical output signature, and an `invoke` entry
//! point taking type-erased argument slots.
//!
//! ```ignore
//! use sigproxy::{meta, Adapter, CanonicalNormalizer, SignatureSynthesizer};
//!
//! fn mul(a: i32, b: i32) -> i32 { a * b }
//!
//! let normalizer = CanonicalNormalizer::default();
//! let synth = SignatureSynthesizer::new(meta::global(), &normalizer);
//! let adapter = Adapter::new(mul, &synth)?;
//! assert_eq!(adapter.signature_in(), "_proxy_in(i32,i32)");
//! assert_eq!(adapter.signature_out(), "_proxy_out(i32)");
//! ```

pub mod adapter;
pub mod config;
pub mod connections;
pub mod errors;
pub mod invoke;
pub mod logging;
pub mod meta;
pub mod signature;

// Re-export core types
pub use adapter::{Adapter, Callable, Function, MAX_ARITY};
pub use config::ProxyConfig;
pub use connections::{ConnectionId, ProxyConnections, ProxyStats, SignalHost};
pub use errors::{ProxyError, ProxyResult, TypePosition};
pub use invoke::{ArgBundle, Param, ReturnType, Slot};
pub use meta::{Const, MetaType, MetaTypeRegistry, MetaValue, Qualifiers, TypeRegistry};
pub use signature::{
    CanonicalNormalizer, Normalizer, Signature, SignatureStyle, SignatureSynthesizer,
};
