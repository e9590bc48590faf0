//! Owned result containers

use super::MetaType;
use core::any::{Any, TypeId};
use core::fmt;
use std::sync::Arc;

/// Uniquely-owned, type-erased value produced by an invocation.
///
/// Moving a `MetaValue` out of the result slot is the single point where
/// the host takes ownership of a result.
pub struct MetaValue {
    type_id: TypeId,
    type_name: Arc<str>,
    value: Box<dyn Any>,
}

impl MetaValue {
    pub fn new<T: MetaType>(value: T, type_name: Arc<str>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name,
            value: Box::new(value),
        }
    }

    /// Registered descriptor of the contained type
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the value back out, or return the container unchanged
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        let Self { type_id, type_name, value } = self;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|value| Self {
            type_id,
            type_name,
            value,
        })
    }

    /// Address of the contained value, for forwarding through a slot
    #[inline]
    pub(crate) fn as_ptr(&self) -> *const () {
        &*self.value as *const dyn Any as *const ()
    }
}

impl fmt::Debug for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
