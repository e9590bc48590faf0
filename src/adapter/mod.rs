//! Adapters - a callable plus its signatures and call thunk
//!
//! Construction is the only fallible step: both signatures are synthesized
//! up front, so an unregistered type is reported when the callable is
//! wrapped, never when it is called.

mod callable;

pub use callable::{Callable, MAX_ARITY};

use crate::errors::ProxyResult;
use crate::invoke::{ArgBundle, ReturnType};
use crate::logging::{log_adapter_created, log_adapter_rejected, log_invoke};
use crate::meta::MetaValue;
use crate::signature::SignatureSynthesizer;
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

/// Object-safe view of an adapter, as stored by a connection table
pub trait Function {
    /// Normalized `_proxy_in(...)` form, one descriptor per parameter
    fn signature_in(&self) -> &str;

    /// Normalized `_proxy_out(...)` form wrapping the return descriptor
    fn signature_out(&self) -> &str;

    fn arity(&self) -> usize;

    /// Call the wrapped callable with arguments from `args`.
    ///
    /// Value-returning callables replace `*result` with a fresh container;
    /// void callables leave it untouched.
    ///
    /// # Safety
    /// Slots `1..=arity` of `args` must point to live values of the
    /// callable's parameter types. Matching signatures before calling is
    /// what establishes this.
    unsafe fn invoke(&self, result: &mut Option<MetaValue>, args: &ArgBundle<'_>);
}

/// A callable wrapped for a textual signal/slot runtime
pub struct Adapter<F, M> {
    func: F,
    signature_in: String,
    signature_out: String,
    return_name: Arc<str>,
    _marker: PhantomData<fn() -> M>,
}

impl<F, M> Adapter<F, M>
where
    F: Callable<M>,
{
    /// Wrap `func`, synthesizing both signatures
    pub fn new(func: F, synthesizer: &SignatureSynthesizer<'_>) -> ProxyResult<Self> {
        let synthesized = synthesizer.input_signature::<F, M>().and_then(|signature_in| {
            synthesizer
                .return_descriptor::<F::Output>()
                .map(|return_name| (signature_in, return_name))
        });

        let (signature_in, return_name) = match synthesized {
            Ok(parts) => parts,
            Err(err) => {
                log_adapter_rejected(core::any::type_name::<F>(), &err);
                return Err(err);
            }
        };
        let signature_out = synthesizer.wrap_output(&return_name);
        log_adapter_created(&signature_in, &signature_out);

        Ok(Self {
            func,
            signature_in,
            signature_out,
            return_name,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn signature_in(&self) -> &str {
        &self.signature_in
    }

    #[inline]
    pub fn signature_out(&self) -> &str {
        &self.signature_out
    }

    /// Descriptor stamped on results (the void marker for void callables)
    #[inline]
    pub fn return_name(&self) -> &str {
        &self.return_name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        F::ARITY
    }

    /// See [`Function::invoke`].
    ///
    /// # Safety
    /// Same contract as [`Function::invoke`].
    #[inline]
    pub unsafe fn invoke(&self, result: &mut Option<MetaValue>, args: &ArgBundle<'_>) {
        log_invoke(&self.signature_in, args.arity());
        self.func.call(args).store(result, &self.return_name);
    }
}

impl<F, M> Adapter<F, M>
where
    F: Callable<M> + Send + Sync,
    M: 'static,
{
    pub fn into_function(self) -> Arc<dyn Function + Send + Sync> {
        Arc::new(self)
    }
}

impl<F, M> Function for Adapter<F, M>
where
    F: Callable<M>,
    M: 'static,
{
    fn signature_in(&self) -> &str {
        &self.signature_in
    }

    fn signature_out(&self) -> &str {
        &self.signature_out
    }

    fn arity(&self) -> usize {
        F::ARITY
    }

    unsafe fn invoke(&self, result: &mut Option<MetaValue>, args: &ArgBundle<'_>) {
        Adapter::invoke(self, result, args)
    }
}

impl<F, M> fmt::Debug for Adapter<F, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("signature_in", &self.signature_in)
            .field("signature_out", &self.signature_out)
            .finish_non_exhaustive()
    }
}
