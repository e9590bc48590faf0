//! Typed accessors for argument slots

use super::args::Slot;
use crate::meta::{Const, MetaType, Qualifiers};

/// A parameter type an adapter can read out of a slot.
///
/// `Item<'a>` is what the callable receives; it borrows from the bundle
/// for reference parameters. By-value impls come from
/// `declare_metatype!`.
pub trait Param {
    /// Unqualified type looked up in the registry
    type Raw: MetaType;
    type Item<'a>;
    const QUALIFIERS: Qualifiers;

    /// # Safety
    /// The slot must point to a live `Self::Raw`, writable when the
    /// parameter is a mutable reference.
    unsafe fn fetch<'a>(slot: &'a Slot) -> Self::Item<'a>;
}

pub type ParamItem<'a, P> = <P as Param>::Item<'a>;

/// Copy a by-value argument out of its slot.
///
/// # Safety
/// The slot must point to a live `T`.
#[doc(hidden)]
#[inline]
pub unsafe fn fetch_cloned<T: MetaType>(slot: &Slot) -> T {
    slot.debug_check::<T>(false);
    (*(slot.as_ptr() as *const T)).clone()
}

impl<T: MetaType> Param for Const<T> {
    type Raw = T;
    type Item<'a> = Const<T>;
    const QUALIFIERS: Qualifiers = Qualifiers::CONST;

    #[inline]
    unsafe fn fetch<'a>(slot: &'a Slot) -> Self::Item<'a> {
        Const(fetch_cloned::<T>(slot))
    }
}

impl<'r, T: MetaType> Param for &'r T {
    type Raw = T;
    type Item<'a> = &'a T;
    const QUALIFIERS: Qualifiers = Qualifiers::CONST_REF;

    #[inline]
    unsafe fn fetch<'a>(slot: &'a Slot) -> Self::Item<'a> {
        slot.debug_check::<T>(false);
        &*(slot.as_ptr() as *const T)
    }
}

impl<'r, T: MetaType> Param for &'r mut T {
    type Raw = T;
    type Item<'a> = &'a mut T;
    const QUALIFIERS: Qualifiers = Qualifiers::REF;

    #[inline]
    unsafe fn fetch<'a>(slot: &'a Slot) -> Self::Item<'a> {
        slot.debug_check::<T>(true);
        &mut *(slot.as_ptr() as *mut T)
    }
}
