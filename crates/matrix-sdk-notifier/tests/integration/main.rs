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

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering::SeqCst},
};

use async_trait::async_trait;
use matrix_sdk_notifier::{
    EventFormatter, EventHandlerHandle, EventHandlerStore, EventSender, NotifiableEvent,
    NotificationContent, NotificationHandle, NotificationPlatform, NotificationSound,
    NotifierClient, PermissionOutcome, ReceiptHandlerFn, Result, RoomReceiptUpdate,
    RoomSnapshot, RoomTimelineUpdate, SyncState, SyncStateHandlerFn, TimelineHandlerFn,
    TimelineId,
};
use ruma::{
    OwnedUserId, RoomId, UserId,
    events::TimelineEventType,
    owned_event_id,
    push::{Action, Tweak},
    user_id,
};
use tracing_subscriber::EnvFilter;

mod lifecycle;
mod settings;

/// Show the logs of the notifier, filtered with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A sync client with very simple push rules: every message notifies, and
/// mentions of the current user come with a sound.
#[derive(Debug, Default)]
struct FakeSyncClient {
    handlers: EventHandlerStore,
}

impl FakeSyncClient {
    fn own_user() -> &'static UserId {
        user_id!("@me:localhost")
    }

    fn sync_state(&self, state: SyncState) {
        self.handlers.handle_sync_state(state);
    }

    fn timeline(&self, update: RoomTimelineUpdate) {
        self.handlers.handle_timeline(&update);
    }

    fn read(&self, room: RoomSnapshot) {
        self.handlers.handle_receipt(&RoomReceiptUpdate {
            event_id: owned_event_id!("$read"),
            room: room.with_unread_notification_count(0),
        });
    }
}

impl NotifierClient for FakeSyncClient {
    fn own_user_id(&self) -> Option<OwnedUserId> {
        Some(Self::own_user().to_owned())
    }

    fn push_actions_for_event(&self, event: &NotifiableEvent) -> Vec<Action> {
        if event.event_type != TimelineEventType::RoomMessage {
            return Vec::new();
        }

        let mut actions = vec![Action::Notify];
        if event.body.as_deref().is_some_and(|body| body.contains("@me")) {
            actions.push(Action::SetTweak(Tweak::Sound("default".into())));
        }
        actions
    }

    fn add_timeline_handler(&self, handler: Box<TimelineHandlerFn>) -> EventHandlerHandle {
        self.handlers.add_timeline_handler(handler)
    }

    fn add_receipt_handler(&self, handler: Box<ReceiptHandlerFn>) -> EventHandlerHandle {
        self.handlers.add_receipt_handler(handler)
    }

    fn add_sync_state_handler(&self, handler: Box<SyncStateHandlerFn>) -> EventHandlerHandle {
        self.handlers.add_sync_state_handler(handler)
    }

    fn remove_event_handler(&self, handle: EventHandlerHandle) {
        self.handlers.remove(&handle);
    }
}

/// A desktop that lists the popups currently on screen.
#[derive(Debug, Default)]
struct FakeDesktop {
    denies_permission: AtomicBool,
    focused: AtomicBool,
    counter: AtomicUsize,
    on_screen: Mutex<Vec<(NotificationHandle, NotificationContent)>>,
}

impl FakeDesktop {
    fn titles(&self) -> Vec<String> {
        self.on_screen.lock().unwrap().iter().map(|(_, content)| content.title.clone()).collect()
    }

    fn bodies(&self) -> Vec<String> {
        self.on_screen.lock().unwrap().iter().map(|(_, content)| content.body.clone()).collect()
    }
}

#[async_trait]
impl NotificationPlatform for FakeDesktop {
    fn supports_notifications(&self) -> bool {
        true
    }

    fn permission_granted(&self) -> bool {
        !self.denies_permission.load(SeqCst)
    }

    async fn request_permission(&self) -> PermissionOutcome {
        if self.denies_permission.load(SeqCst) {
            PermissionOutcome::Denied
        } else {
            PermissionOutcome::Granted
        }
    }

    fn has_focus(&self) -> bool {
        self.focused.load(SeqCst)
    }

    fn display_notification(&self, content: &NotificationContent) -> Option<NotificationHandle> {
        let id = self.counter.fetch_add(1, SeqCst);
        let handle = NotificationHandle::new(format!("notification-{id}"));
        self.on_screen.lock().unwrap().push((handle.clone(), content.clone()));
        Some(handle)
    }

    fn clear_notification(&self, handle: &NotificationHandle) -> Result<()> {
        self.on_screen.lock().unwrap().retain(|(on_screen, _)| on_screen != handle);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct FakeSpeaker {
    plays: AtomicUsize,
}

impl NotificationSound for FakeSpeaker {
    fn play(&self) {
        self.plays.fetch_add(1, SeqCst);
    }
}

/// Describes events by their sender; events without one have no text.
#[derive(Debug)]
struct SenderFormatter;

impl EventFormatter for SenderFormatter {
    fn text_for_event(&self, event: &NotifiableEvent) -> Option<String> {
        let sender = event.sender.as_ref()?;
        Some(format!("{} sent a message", sender.display_name))
    }
}

fn room(room_id: &RoomId, name: &str, timeline: u64) -> RoomSnapshot {
    RoomSnapshot::new(room_id.to_owned(), name, TimelineId::new(timeline))
        .with_unread_notification_count(1)
}

fn message(
    room: &RoomSnapshot,
    sender: &UserId,
    sender_name: &str,
    body: &str,
) -> RoomTimelineUpdate {
    let event = NotifiableEvent::new(
        owned_event_id!("$message"),
        room.room_id.clone(),
        TimelineEventType::RoomMessage,
    )
    .with_sender(EventSender::new(sender.to_owned(), sender_name))
    .with_body(body);

    RoomTimelineUpdate::live(event, room.clone())
}
