//! Argument bundles
//!
//! Slot 0 is reserved for the host's own return value; parameters start at
//! slot 1, in declared order.

use crate::meta::MetaValue;
use core::any::TypeId;
use core::marker::PhantomData;
use smallvec::SmallVec;

/// One type-erased argument handle
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    ptr: *mut (),
    tag: Option<TypeId>,
    writable: bool,
}

impl Slot {
    /// Null slot, used for the reserved position 0
    #[inline]
    pub const fn reserved() -> Self {
        Self {
            ptr: core::ptr::null_mut(),
            tag: None,
            writable: false,
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut () {
        self.ptr
    }

    /// Type of the pointee when the slot was built from a typed reference
    #[inline]
    pub fn tag(&self) -> Option<TypeId> {
        self.tag
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Debug-build check of the slot against the parameter reading it.
    /// Untagged slots come from raw host pointers and are trusted.
    #[inline]
    pub(crate) fn debug_check<T: 'static>(&self, needs_write: bool) {
        debug_assert!(!self.ptr.is_null(), "argument slot is null");
        if let Some(tag) = self.tag {
            debug_assert!(
                tag == TypeId::of::<T>(),
                "argument slot holds a different type than {}",
                core::any::type_name::<T>()
            );
            debug_assert!(
                !needs_write || self.writable,
                "mutable parameter {} read from a shared slot",
                core::any::type_name::<T>()
            );
        }
    }
}

/// Ordered argument slots, borrowed for the duration of one call
#[derive(Debug, Clone)]
pub struct ArgBundle<'a> {
    slots: SmallVec<[Slot; 6]>,
    _borrow: PhantomData<&'a mut ()>,
}

impl<'a> ArgBundle<'a> {
    /// Bundle holding only the reserved slot
    pub fn new() -> Self {
        let mut slots = SmallVec::new();
        slots.push(Slot::reserved());
        Self {
            slots,
            _borrow: PhantomData,
        }
    }

    /// Append a read-only argument
    pub fn arg<T: 'static>(mut self, value: &'a T) -> Self {
        self.slots.push(Slot {
            ptr: value as *const T as *mut (),
            tag: Some(TypeId::of::<T>()),
            writable: false,
        });
        self
    }

    /// Append an argument a `&mut T` parameter may modify
    pub fn arg_mut<T: 'static>(mut self, value: &'a mut T) -> Self {
        self.slots.push(Slot {
            ptr: value as *mut T as *mut (),
            tag: Some(TypeId::of::<T>()),
            writable: true,
        });
        self
    }

    /// Append a result produced by another invocation
    pub fn meta(mut self, value: &'a MetaValue) -> Self {
        self.slots.push(Slot {
            ptr: value.as_ptr() as *mut (),
            tag: Some(value.type_id()),
            writable: false,
        });
        self
    }

    /// Wrap a raw host slot array, reserved slot included.
    ///
    /// # Safety
    /// Every pointer past index 0 must stay valid for `'a`, and be valid
    /// for writes wherever a `&mut` parameter will read it.
    pub unsafe fn from_raw(ptrs: &'a [*mut ()]) -> Self {
        let mut slots: SmallVec<[Slot; 6]> = ptrs
            .iter()
            .map(|&ptr| Slot {
                ptr,
                tag: None,
                writable: true,
            })
            .collect();
        if slots.is_empty() {
            slots.push(Slot::reserved());
        }
        Self {
            slots,
            _borrow: PhantomData,
        }
    }

    /// Number of slots including the reserved one
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Never true: the reserved slot is always present
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of argument slots
    #[inline]
    pub fn arity(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Slot for a parameter position; panics past the end of the bundle
    #[inline]
    pub(crate) fn slot_at(&self, index: usize) -> &Slot {
        match self.slots.get(index) {
            Some(slot) => slot,
            None => panic!(
                "argument slot {} requested from a bundle of arity {}",
                index,
                self.arity()
            ),
        }
    }
}

impl Default for ArgBundle<'_> {
    fn default() -> Self {
        Self::new()
    }
}
