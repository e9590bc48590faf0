//! Connection bookkeeping - adapters keyed by sender/receiver pairs
//!
//! The table never matches signatures itself. Resolution, compatibility
//! checks, subscription and delivery all go through the host runtime's
//! `SignalHost` implementation; the table only stores what the host
//! accepted and drives adapters when the host reports an emission.

mod host;

pub use host::SignalHost;

use crate::adapter::{Adapter, Callable, Function};
use crate::errors::{ProxyError, ProxyResult};
use crate::invoke::ArgBundle;
use crate::logging::{log_connection_rejected, log_delivery};
use crate::meta::MetaValue;
use crate::signature::SignatureSynthesizer;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handle returned by a successful connection
pub type ConnectionId = u64;

struct Receiver<O> {
    adapter: Arc<dyn Function + Send + Sync>,
    sender: O,
    signal: usize,
    receiver: O,
    method: usize,
}

/// Connection statistics for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyStats {
    pub connections: usize,
    pub activations: u64,
    pub rejected: u64,
}

/// Owns the adapters registered through one proxy
pub struct ProxyConnections<'r, H: SignalHost> {
    host: H,
    synthesizer: SignatureSynthesizer<'r>,
    receivers: RwLock<HashMap<ConnectionId, Receiver<H::ObjectId>>>,
    next_id: AtomicU64,
    activations: AtomicU64,
    rejected: AtomicU64,
}

impl<'r, H: SignalHost> ProxyConnections<'r, H> {
    pub fn new(host: H, synthesizer: SignatureSynthesizer<'r>) -> Self {
        Self {
            host,
            synthesizer,
            receivers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            activations: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Route `signal` on `sender` through `func` into `method` on `receiver`.
    ///
    /// On failure nothing is stored and the host is left unsubscribed.
    pub fn connect<F, M>(
        &self,
        sender: H::ObjectId,
        signal: &str,
        func: F,
        receiver: H::ObjectId,
        method: &str,
    ) -> ProxyResult<ConnectionId>
    where
        F: Callable<M> + Send + Sync,
        M: 'static,
    {
        let signal = self.synthesizer.normalize(signal);
        let method = self.synthesizer.normalize(method);

        let result = self.register(sender, &signal, func, receiver, &method);
        if let Err(err) = &result {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            log_connection_rejected(&signal, &method, err);
        }
        result
    }

    /// Boolean form of [`connect`](Self::connect)
    pub fn try_connect<F, M>(
        &self,
        sender: H::ObjectId,
        signal: &str,
        func: F,
        receiver: H::ObjectId,
        method: &str,
    ) -> bool
    where
        F: Callable<M> + Send + Sync,
        M: 'static,
    {
        self.connect(sender, signal, func, receiver, method).is_ok()
    }

    fn register<F, M>(
        &self,
        sender: H::ObjectId,
        signal: &str,
        func: F,
        receiver: H::ObjectId,
        method: &str,
    ) -> ProxyResult<ConnectionId>
    where
        F: Callable<M> + Send + Sync,
        M: 'static,
    {
        let adapter = Adapter::new(func, &self.synthesizer)?;

        let signal_index = self
            .host
            .signal_index(sender, signal)
            .ok_or_else(|| ProxyError::UnknownSignal {
                signature: signal.to_string(),
            })?;
        let method_index = self
            .host
            .slot_index(receiver, method)
            .ok_or_else(|| ProxyError::UnknownSlot {
                signature: method.to_string(),
            })?;

        if !self.host.check_connect_args(signal, adapter.signature_in()) {
            return Err(ProxyError::IncompatibleSignature {
                emitted: signal.to_string(),
                accepted: adapter.signature_in().to_string(),
            });
        }
        if !self.host.check_connect_args(adapter.signature_out(), method) {
            return Err(ProxyError::IncompatibleSignature {
                emitted: adapter.signature_out().to_string(),
                accepted: method.to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if !self.host.subscribe(sender, signal_index, id) {
            return Err(ProxyError::SubscribeFailed {
                signature: signal.to_string(),
            });
        }

        self.receivers.write().insert(
            id,
            Receiver {
                adapter: adapter.into_function(),
                sender,
                signal: signal_index,
                receiver,
                method: method_index,
            },
        );
        Ok(id)
    }

    /// Run the adapter for `id` and deliver its result to the receiver.
    ///
    /// Void adapters deliver an empty bundle; value adapters deliver the
    /// result in slot 1. No lock is held while the adapter or the host run,
    /// so deliveries may emit again or disconnect.
    ///
    /// # Safety
    /// `args` must carry the arguments of the signal `id` was connected to.
    pub unsafe fn activate(&self, id: ConnectionId, args: &ArgBundle<'_>) -> ProxyResult<()> {
        let (adapter, receiver, method) = {
            let receivers = self.receivers.read();
            let entry = receivers
                .get(&id)
                .ok_or(ProxyError::UnknownConnection { id })?;
            (Arc::clone(&entry.adapter), entry.receiver, entry.method)
        };

        let mut result: Option<MetaValue> = None;
        adapter.invoke(&mut result, args);
        self.activations.fetch_add(1, Ordering::Relaxed);

        log_delivery(id, result.is_some());
        match &result {
            Some(value) => self.host.deliver(receiver, method, &ArgBundle::new().meta(value)),
            None => self.host.deliver(receiver, method, &ArgBundle::new()),
        }
        Ok(())
    }

    /// Drop one connection; false when it was unknown
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let removed = self.receivers.write().remove(&id);
        match removed {
            Some(entry) => {
                self.host.unsubscribe(entry.sender, entry.signal, id);
                true
            }
            None => false,
        }
    }

    /// Drop every connection delivering to `receiver`, returning the count
    pub fn disconnect_receiver(&self, receiver: H::ObjectId) -> usize {
        let removed: Vec<(ConnectionId, Receiver<H::ObjectId>)> = {
            let mut receivers = self.receivers.write();
            let ids: Vec<ConnectionId> = receivers
                .iter()
                .filter(|(_, entry)| entry.receiver == receiver)
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter()
                .filter_map(|id| receivers.remove(&id).map(|entry| (id, entry)))
                .collect()
        };

        for (id, entry) in &removed {
            self.host.unsubscribe(entry.sender, entry.signal, *id);
        }
        removed.len()
    }

    /// Signatures of a stored connection, `(in, out)`
    pub fn signatures(&self, id: ConnectionId) -> Option<(String, String)> {
        self.receivers.read().get(&id).map(|entry| {
            (
                entry.adapter.signature_in().to_string(),
                entry.adapter.signature_out().to_string(),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.receivers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.read().is_empty()
    }

    pub fn stats(&self) -> ProxyStats {
        ProxyStats {
            connections: self.len(),
            activations: self.activations.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}
