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

#![doc = include_str!("../README.md")]
//!
//! ## Overview
//!
//! The entry point is the [`Notifier`], built with [`Notifier::builder`]:
//!
//! - it subscribes to the timeline, receipt and sync-state streams of a
//!   [`NotifierClient`] when [`Notifier::start`] is called, and unsubscribes
//!   in [`Notifier::stop`];
//! - it waits for the sync to be live before notifying anything, so the
//!   initial catch-up never floods the desktop;
//! - it asks the client for the push actions of every eligible event, and
//!   shows a popup through the [`NotificationPlatform`] and/or plays the
//!   [`NotificationSound`];
//! - it forgets (and clears) all the notifications of a room once its unread
//!   notification count drops to zero.
//!
//! User preferences are kept in a [`SettingsStore`]; when none is given, a
//! [`MemorySettingsStore`] is used.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

mod client;
pub mod error;
mod event;
mod notifier;
mod platform;
mod push;
mod registry;
mod settings;
mod sync_state;

pub use self::{
    client::{
        EventHandlerHandle, EventHandlerStore, HandlerKind, NotifierClient, ReceiptHandlerFn,
        SyncStateHandlerFn, TimelineHandlerFn,
    },
    error::{NotifierError, Result},
    event::{
        EventFormatter, EventSender, NotifiableEvent, RoomReceiptUpdate, RoomSnapshot,
        RoomTimelineUpdate, TimelineData, TimelineId,
    },
    notifier::{Notifier, NotifierBuilder, NotifierUpdate},
    platform::{
        NotificationAvatar, NotificationContent, NotificationHandle, NotificationPlatform,
        NotificationSound, PermissionOutcome,
    },
    push::PushActions,
    registry::NotificationRegistry,
    settings::{MemorySettingsStore, NotifierSettingsSnapshot, SettingKey, SettingsStore},
    sync_state::{Readiness, SyncState},
};
