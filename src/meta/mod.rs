//! Type descriptors - canonical names for types crossing the proxy boundary
//!
//! Architecture:
//! - `registry.rs` - name lookup capability and the concurrent `MetaTypeRegistry`
//! - `value.rs` - `MetaValue`, the owned container handed back for results
//! - `builtins.rs` - primitive and `String` declarations

mod builtins;
mod registry;
mod value;

pub use builtins::BUILTIN_NAMES;
pub use registry::{global, validate_type_name, MetaTypeRegistry, TypeRegistry};
pub use value::MetaValue;

use core::any::TypeId;
use core::ops::{Deref, DerefMut};

/// Types that can travel through argument slots and result containers.
///
/// Implemented by `declare_metatype!`, which also wires up by-value
/// parameter and return handling for the type.
pub trait MetaType: Clone + 'static {}

/// Identity of an unqualified type, used for registry lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawType {
    pub id: TypeId,
    pub rust_name: &'static str,
}

impl RawType {
    #[inline]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            rust_name: core::any::type_name::<T>(),
        }
    }
}

/// Const/reference qualification of a parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Qualifiers {
    pub is_const: bool,
    pub is_ref: bool,
}

impl Qualifiers {
    pub const NONE: Self = Self { is_const: false, is_ref: false };
    pub const CONST: Self = Self { is_const: true, is_ref: false };
    pub const REF: Self = Self { is_const: false, is_ref: true };
    pub const CONST_REF: Self = Self { is_const: true, is_ref: true };

    /// Apply the qualifiers to a base descriptor: `const ` prefix, `&` suffix
    pub fn decorate(self, base: &str) -> String {
        let mut out = String::with_capacity(base.len() + 7);
        if self.is_const {
            out.push_str("const ");
        }
        out.push_str(base);
        if self.is_ref {
            out.push('&');
        }
        out
    }
}

/// By-value parameter marked const (`const T` in signatures)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Const<T>(pub T);

impl<T> Const<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Const<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Const<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

/// Declare types as meta types.
///
/// Generates `MetaType`, by-value `Param` and `ReturnType` impls. The
/// name used in signatures still has to be registered with a
/// `TypeRegistry` before adapters using the type can be built.
///
/// ```ignore
/// #[derive(Clone)]
/// struct Point { x: i32, y: i32 }
/// sigproxy::declare_metatype!(Point);
/// registry.register::<Point>("Point")?;
/// ```
#[macro_export]
macro_rules! declare_metatype {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::meta::MetaType for $ty {}

            impl $crate::invoke::Param for $ty {
                type Raw = $ty;
                type Item<'a> = $ty;
                const QUALIFIERS: $crate::meta::Qualifiers = $crate::meta::Qualifiers::NONE;

                #[inline]
                unsafe fn fetch<'a>(slot: &'a $crate::invoke::Slot) -> Self::Item<'a> {
                    $crate::invoke::fetch_cloned::<$ty>(slot)
                }
            }

            impl $crate::invoke::ReturnType for $ty {
                #[inline]
                fn meta_type() -> ::core::option::Option<$crate::meta::RawType> {
                    ::core::option::Option::Some($crate::meta::RawType::of::<$ty>())
                }

                #[inline]
                fn store(
                    self,
                    result: &mut ::core::option::Option<$crate::meta::MetaValue>,
                    type_name: &::std::sync::Arc<str>,
                ) {
                    *result = ::core::option::Option::Some(
                        $crate::meta::MetaValue::new(self, ::std::sync::Arc::clone(type_name)),
                    );
                }
            }
        )+
    };
}
