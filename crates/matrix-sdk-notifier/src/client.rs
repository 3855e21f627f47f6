// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The interface to the sync client, and a reusable store of event handlers
//! for implementations of it.
//!
//! ### How it works
//!
//! Every `add_*_handler` method of [`NotifierClient`] returns an
//! [`EventHandlerHandle`], unique to that registration. Passing it back to
//! [`NotifierClient::remove_event_handler`] removes that very handler, and
//! nothing else: two components subscribing the same kind of events never
//! step on each other.
//!
//! [`EventHandlerStore`] implements the bookkeeping: a client embeds one,
//! forwards the `add_*_handler`/`remove_event_handler` calls to it, and calls
//! [`EventHandlerStore::handle_timeline`] and friends whenever its sync loop
//! produces something.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        Arc, RwLock,
        atomic::{AtomicU64, Ordering::SeqCst},
    },
};

use ruma::{OwnedUserId, push::Action};
use tracing::trace;

use crate::{NotifiableEvent, RoomReceiptUpdate, RoomTimelineUpdate, SyncState};

/// A handler for timeline updates.
pub type TimelineHandlerFn = dyn Fn(&RoomTimelineUpdate) + Send + Sync;
/// A handler for read receipts.
pub type ReceiptHandlerFn = dyn Fn(&RoomReceiptUpdate) + Send + Sync;
/// A handler for sync state changes.
pub type SyncStateHandlerFn = dyn Fn(SyncState) + Send + Sync;

/// The kind of events a handler was registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandlerKind {
    /// Timeline updates.
    Timeline,
    /// Read receipts.
    Receipt,
    /// Sync state changes.
    SyncState,
}

/// Handle to remove a registered event handler by passing it to
/// [`NotifierClient::remove_event_handler`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventHandlerHandle {
    kind: HandlerKind,
    handler_id: u64,
}

impl EventHandlerHandle {
    /// Create a handle, for clients which don't use an
    /// [`EventHandlerStore`].
    ///
    /// `handler_id` must be unique among the handlers of the client.
    pub fn new(kind: HandlerKind, handler_id: u64) -> Self {
        Self { kind, handler_id }
    }

    /// The kind of events the handler was registered for.
    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    /// The unique identifier of the handler.
    pub fn handler_id(&self) -> u64 {
        self.handler_id
    }
}

/// What the notifier needs from the sync client.
pub trait NotifierClient: fmt::Debug + Send + Sync {
    /// The user ID of the logged-in user, if any.
    fn own_user_id(&self) -> Option<OwnedUserId>;

    /// Evaluate the push rules of the user against `event`.
    fn push_actions_for_event(&self, event: &NotifiableEvent) -> Vec<Action>;

    /// Call `handler` for every event added to a room timeline.
    fn add_timeline_handler(&self, handler: Box<TimelineHandlerFn>) -> EventHandlerHandle;

    /// Call `handler` for every read receipt.
    fn add_receipt_handler(&self, handler: Box<ReceiptHandlerFn>) -> EventHandlerHandle;

    /// Call `handler` whenever the sync state changes.
    fn add_sync_state_handler(&self, handler: Box<SyncStateHandlerFn>) -> EventHandlerHandle;

    /// Remove the handler `handle` was returned for.
    ///
    /// Removing an unknown handle is a no-op.
    fn remove_event_handler(&self, handle: EventHandlerHandle);
}

/// The handlers registered on a [`NotifierClient`].
#[derive(Default)]
pub struct EventHandlerStore {
    timeline: RwLock<BTreeMap<u64, Arc<TimelineHandlerFn>>>,
    receipt: RwLock<BTreeMap<u64, Arc<ReceiptHandlerFn>>>,
    sync_state: RwLock<BTreeMap<u64, Arc<SyncStateHandlerFn>>>,
    counter: AtomicU64,
}

impl fmt::Debug for EventHandlerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlerStore").field("len", &self.len()).finish_non_exhaustive()
    }
}

impl EventHandlerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&self, kind: HandlerKind) -> EventHandlerHandle {
        EventHandlerHandle { kind, handler_id: self.counter.fetch_add(1, SeqCst) }
    }

    /// Register a timeline handler.
    pub fn add_timeline_handler(&self, handler: Box<TimelineHandlerFn>) -> EventHandlerHandle {
        let handle = self.next_handle(HandlerKind::Timeline);
        self.timeline.write().unwrap().insert(handle.handler_id, handler.into());
        handle
    }

    /// Register a receipt handler.
    pub fn add_receipt_handler(&self, handler: Box<ReceiptHandlerFn>) -> EventHandlerHandle {
        let handle = self.next_handle(HandlerKind::Receipt);
        self.receipt.write().unwrap().insert(handle.handler_id, handler.into());
        handle
    }

    /// Register a sync state handler.
    pub fn add_sync_state_handler(&self, handler: Box<SyncStateHandlerFn>) -> EventHandlerHandle {
        let handle = self.next_handle(HandlerKind::SyncState);
        self.sync_state.write().unwrap().insert(handle.handler_id, handler.into());
        handle
    }

    /// Remove a handler.
    ///
    /// Returns whether a handler was actually removed.
    pub fn remove(&self, handle: &EventHandlerHandle) -> bool {
        let removed = match handle.kind {
            HandlerKind::Timeline => {
                self.timeline.write().unwrap().remove(&handle.handler_id).is_some()
            }
            HandlerKind::Receipt => {
                self.receipt.write().unwrap().remove(&handle.handler_id).is_some()
            }
            HandlerKind::SyncState => {
                self.sync_state.write().unwrap().remove(&handle.handler_id).is_some()
            }
        };

        trace!(?handle, removed, "Removing event handler");
        removed
    }

    /// The number of registered handlers, of all kinds.
    pub fn len(&self) -> usize {
        self.timeline.read().unwrap().len()
            + self.receipt.read().unwrap().len()
            + self.sync_state.read().unwrap().len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call all the timeline handlers, in registration order.
    ///
    /// Handlers may add or remove handlers; such changes take effect for the
    /// next update.
    pub fn handle_timeline(&self, update: &RoomTimelineUpdate) {
        let handlers: Vec<_> = self.timeline.read().unwrap().values().cloned().collect();
        for handler in handlers {
            handler(update);
        }
    }

    /// Call all the receipt handlers, in registration order.
    pub fn handle_receipt(&self, update: &RoomReceiptUpdate) {
        let handlers: Vec<_> = self.receipt.read().unwrap().values().cloned().collect();
        for handler in handlers {
            handler(update);
        }
    }

    /// Call all the sync state handlers, in registration order.
    pub fn handle_sync_state(&self, state: SyncState) {
        let handlers: Vec<_> = self.sync_state.read().unwrap().values().cloned().collect();
        for handler in handlers {
            handler(state);
        }
    }
}
