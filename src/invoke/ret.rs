//! Result storage - value-returning and void call shapes

use crate::meta::{MetaValue, RawType};
use std::sync::Arc;

/// Return type of an adaptable callable.
///
/// The impl for `()` is the void shape and never touches the result slot.
/// Value impls come from `declare_metatype!`.
pub trait ReturnType: 'static {
    /// `None` for callables that return nothing
    fn meta_type() -> Option<RawType>;

    /// Move the result into the host's result slot
    fn store(self, result: &mut Option<MetaValue>, type_name: &Arc<str>);
}

impl ReturnType for () {
    #[inline]
    fn meta_type() -> Option<RawType> {
        None
    }

    #[inline]
    fn store(self, _result: &mut Option<MetaValue>, _type_name: &Arc<str>) {}
}
