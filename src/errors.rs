//! Error types for adapter construction, registries and connections

use std::fmt;

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Where an unresolved type appeared in a callable's signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    /// 1-based parameter position
    Param(usize),
    Return,
}

impl fmt::Display for TypePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(index) => write!(f, "parameter {}", index),
            Self::Return => write!(f, "return value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// A parameter or return type has no entry in the type registry
    UnregisteredType {
        type_name: &'static str,
        position: TypePosition,
    },
    /// A registry name that would garble signatures
    InvalidTypeName { name: String, reason: &'static str },
    /// A signature token or void marker that would garble signatures
    InvalidStyle { token: String, reason: &'static str },
    /// The name, or the type, is already bound differently
    DuplicateTypeName { name: String },
    /// The host knows no such signal on the sender
    UnknownSignal { signature: String },
    /// The host knows no such slot on the receiver
    UnknownSlot { signature: String },
    /// The host rejected the argument lists as incompatible
    IncompatibleSignature { emitted: String, accepted: String },
    /// The host refused to route the signal to the proxy
    SubscribeFailed { signature: String },
    UnknownConnection { id: u64 },
    Config { path: String, message: String },
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredType { type_name, position } => {
                write!(f, "Type {} used as {} is not registered", type_name, position)
            }
            Self::InvalidTypeName { name, reason } => {
                write!(f, "Invalid type name '{}': {}", name, reason)
            }
            Self::InvalidStyle { token, reason } => {
                write!(f, "Invalid signature token '{}': {}", token, reason)
            }
            Self::DuplicateTypeName { name } => {
                write!(f, "Type name '{}' conflicts with an existing registration", name)
            }
            Self::UnknownSignal { signature } => {
                write!(f, "No such signal: {}", signature)
            }
            Self::UnknownSlot { signature } => {
                write!(f, "No such slot: {}", signature)
            }
            Self::IncompatibleSignature { emitted, accepted } => {
                write!(f, "Incompatible signatures: {} cannot feed {}", emitted, accepted)
            }
            Self::SubscribeFailed { signature } => {
                write!(f, "Host refused subscription to {}", signature)
            }
            Self::UnknownConnection { id } => {
                write!(f, "Unknown connection: {}", id)
            }
            Self::Config { path, message } => {
                write!(f, "Config error in {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for ProxyError {}

impl ProxyError {
    /// Errors raised while building an adapter, before any host interaction
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredType { .. } | Self::InvalidTypeName { .. }
        )
    }
}
