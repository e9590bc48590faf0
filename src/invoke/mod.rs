//! Type-erased invocation - unpack argument slots into typed parameters
//!
//! Design: no runtime type checks in release builds. Safety comes from the
//! host matching signatures before it ever calls an adapter.
//!
//! Architecture:
//! - `args.rs` - `Slot` and `ArgBundle`, the slot-array calling convention
//! - `param.rs` - `Param`, typed accessors per qualification
//! - `ret.rs` - `ReturnType`, value-returning vs void storage

mod args;
mod param;
mod ret;

pub use args::{ArgBundle, Slot};
pub use param::{fetch_cloned, Param, ParamItem};
pub use ret::ReturnType;
