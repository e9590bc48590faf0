//! Type registry - maps type identity to descriptor names
//!
//! Uses a pair of concurrent maps so both directions are O(1) and
//! registration from several threads is safe.

use super::{builtins, MetaType, RawType};
use crate::errors::{ProxyError, ProxyResult};
use crate::logging::log_type_registered;
use core::any::TypeId;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Descriptor lookup capability injected into signature synthesis
pub trait TypeRegistry: Send + Sync {
    /// Registered name for an unqualified type, `None` on a lookup miss
    fn type_name(&self, id: TypeId) -> Option<Arc<str>>;
}

/// Process-wide registry, pre-populated with the builtins
static GLOBAL: Lazy<MetaTypeRegistry> = Lazy::new(MetaTypeRegistry::with_builtins);

/// Shared registry for callers that do not inject their own
pub fn global() -> &'static MetaTypeRegistry {
    &GLOBAL
}

/// Thread-safe name registry
#[derive(Debug, Default)]
pub struct MetaTypeRegistry {
    /// TypeId → name
    names: DashMap<TypeId, Arc<str>>,
    /// name → TypeId
    ids: DashMap<Arc<str>, TypeId>,
}

impl MetaTypeRegistry {
    /// Empty registry; every lookup misses until types are registered
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let registry = Self {
            names: DashMap::with_capacity(64),
            ids: DashMap::with_capacity(64),
        };
        builtins::register_builtins(&registry);
        registry
    }

    /// Register `T` under `name`.
    ///
    /// Registering the same pair twice is a no-op. Binding a taken name to
    /// another type, or a registered type to another name, fails and
    /// leaves the registry unchanged.
    pub fn register<T: MetaType>(&self, name: &str) -> ProxyResult<()> {
        self.register_raw(RawType::of::<T>(), name)
    }

    fn register_raw(&self, raw: RawType, name: &str) -> ProxyResult<()> {
        validate_type_name(name)?;

        let key: Arc<str> = Arc::from(name);
        // Lock order: ids, then names
        match self.ids.entry(key.clone()) {
            Entry::Occupied(existing) => {
                if *existing.get() == raw.id {
                    Ok(())
                } else {
                    Err(ProxyError::DuplicateTypeName { name: name.to_string() })
                }
            }
            Entry::Vacant(vacant) => match self.names.entry(raw.id) {
                Entry::Occupied(bound) => Err(ProxyError::DuplicateTypeName {
                    name: bound.get().to_string(),
                }),
                Entry::Vacant(slot) => {
                    slot.insert(key.clone());
                    vacant.insert(raw.id);
                    log_type_registered(name, raw.rust_name);
                    Ok(())
                }
            },
        }
    }

    pub(crate) fn insert_raw(&self, raw: RawType, name: &str) {
        let registered = self.register_raw(raw, name);
        debug_assert!(registered.is_ok(), "builtin {} rejected", name);
    }

    /// Name registered for `T`
    pub fn name_of<T: 'static>(&self) -> Option<Arc<str>> {
        self.type_name(TypeId::of::<T>())
    }

    /// Type bound to `name`
    pub fn type_id_of(&self, name: &str) -> Option<TypeId> {
        self.ids.get(name).map(|id| *id)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.names.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TypeRegistry for MetaTypeRegistry {
    fn type_name(&self, id: TypeId) -> Option<Arc<str>> {
        self.names.get(&id).map(|name| name.value().clone())
    }
}

/// Reject names that would garble signature text.
///
/// Names must be non-empty, trimmed, free of parentheses and `&`, keep
/// commas inside balanced `<>`, and must not collide with the `const`
/// qualifier or the `void` marker.
pub fn validate_type_name(name: &str) -> ProxyResult<()> {
    let invalid = |reason| {
        Err(ProxyError::InvalidTypeName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name.trim() != name {
        return invalid("surrounding whitespace");
    }
    if name == "void" {
        return invalid("reserved for callables without a result");
    }
    if name == "const" || name.starts_with("const ") {
        return invalid("const qualification is applied per parameter");
    }

    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '(' | ')' | '&' => return invalid("contains signature punctuation"),
            '<' => depth += 1,
            '>' => {
                if depth == 0 {
                    return invalid("unbalanced angle brackets");
                }
                depth -= 1;
            }
            ',' if depth == 0 => return invalid("top-level comma"),
            c if c.is_control() => return invalid("control character"),
            _ => {}
        }
    }
    if depth != 0 {
        return invalid("unbalanced angle brackets");
    }

    Ok(())
}
