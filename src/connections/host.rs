//! Host runtime interface

use super::ConnectionId;
use crate::invoke::ArgBundle;
use core::fmt::Debug;
use core::hash::Hash;

/// The event-dispatch runtime a proxy plugs into.
///
/// Signatures passed in are already normalized.
pub trait SignalHost {
    /// Identity of senders and receivers
    type ObjectId: Copy + Eq + Hash + Debug;

    fn signal_index(&self, sender: Self::ObjectId, signature: &str) -> Option<usize>;

    fn slot_index(&self, receiver: Self::ObjectId, signature: &str) -> Option<usize>;

    /// Whether arguments emitted as `emitted` can feed `accepted`
    fn check_connect_args(&self, emitted: &str, accepted: &str) -> bool;

    /// Arrange for `connection` to be activated whenever the signal fires
    fn subscribe(&self, sender: Self::ObjectId, signal: usize, connection: ConnectionId) -> bool;

    fn unsubscribe(&self, sender: Self::ObjectId, signal: usize, connection: ConnectionId);

    /// Call slot `slot` on `receiver` with `args`
    fn deliver(&self, receiver: Self::ObjectId, slot: usize, args: &ArgBundle<'_>);
}

impl<H: SignalHost + ?Sized> SignalHost for &H {
    type ObjectId = H::ObjectId;

    fn signal_index(&self, sender: Self::ObjectId, signature: &str) -> Option<usize> {
        (**self).signal_index(sender, signature)
    }

    fn slot_index(&self, receiver: Self::ObjectId, signature: &str) -> Option<usize> {
        (**self).slot_index(receiver, signature)
    }

    fn check_connect_args(&self, emitted: &str, accepted: &str) -> bool {
        (**self).check_connect_args(emitted, accepted)
    }

    fn subscribe(&self, sender: Self::ObjectId, signal: usize, connection: ConnectionId) -> bool {
        (**self).subscribe(sender, signal, connection)
    }

    fn unsubscribe(&self, sender: Self::ObjectId, signal: usize, connection: ConnectionId) {
        (**self).unsubscribe(sender, signal, connection)
    }

    fn deliver(&self, receiver: Self::ObjectId, slot: usize, args: &ArgBundle<'_>) {
        (**self).deliver(receiver, slot, args)
    }
}
