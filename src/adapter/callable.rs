//! Per-arity callable dispatch
//!
//! `Callable<Marker>` is implemented once per supported arity. `Marker` is
//! the callable's `fn(P1, ..., PN) -> R` shape, which lets the compiler
//! pick the impl from the function type alone.

use crate::errors::ProxyResult;
use crate::invoke::{ArgBundle, Param, ParamItem, ReturnType};
use crate::meta::TypeRegistry;
use crate::signature::push_param;

/// Highest arity an adapter accepts
pub const MAX_ARITY: usize = 5;

/// A function value that can be wrapped into an adapter
pub trait Callable<Marker>: 'static {
    const ARITY: usize;
    type Output: ReturnType;

    /// Append the descriptors of parameters `1..=ARITY`, comma separated
    fn write_params(registry: &dyn TypeRegistry, signature: &mut String) -> ProxyResult<()>;

    /// Read the arguments out of `args` and call through.
    ///
    /// # Safety
    /// Slots `1..=ARITY` must point to live values of the parameter types.
    unsafe fn call(&self, args: &ArgBundle<'_>) -> Self::Output;
}

macro_rules! impl_callable {
    ($arity:literal; $($param:ident $arg:ident $index:literal),*) => {
        impl<Func, Ret, $($param),*> Callable<fn($($param,)*) -> Ret> for Func
        where
            Func: 'static,
            for<'f> &'f Func: Fn($($param),*) -> Ret + Fn($(ParamItem<'_, $param>),*) -> Ret,
            Ret: ReturnType,
            $($param: Param,)*
        {
            const ARITY: usize = $arity;
            type Output = Ret;

            #[allow(unused_variables)]
            fn write_params(
                registry: &dyn TypeRegistry,
                signature: &mut String,
            ) -> ProxyResult<()> {
                $(push_param::<$param>(registry, signature, $index)?;)*
                Ok(())
            }

            #[allow(unused_variables)]
            #[inline]
            unsafe fn call(&self, args: &ArgBundle<'_>) -> Ret {
                // Calling through a generic helper lets the compiler pick the
                // second `Fn` bound for the borrowed argument types.
                fn call_inner<Ret, $($param),*>(
                    f: impl Fn($($param),*) -> Ret,
                    $($arg: $param,)*
                ) -> Ret {
                    f($($arg),*)
                }

                $(let $arg = <$param as Param>::fetch(args.slot_at($index));)*
                call_inner(self, $($arg),*)
            }
        }
    };
}

impl_callable!(0;);
impl_callable!(1; P1 a1 1);
impl_callable!(2; P1 a1 1, P2 a2 2);
impl_callable!(3; P1 a1 1, P2 a2 2, P3 a3 3);
impl_callable!(4; P1 a1 1, P2 a2 2, P3 a3 3, P4 a4 4);
impl_callable!(5; P1 a1 1, P2 a2 2, P3 a3 3, P4 a4 4, P5 a5 5);
