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

//! The views of rooms and events the sync client hands over to the notifier.

use std::fmt;

use ruma::{
    OwnedEventId, OwnedMxcUri, OwnedRoomId, OwnedUserId,
    events::{TimelineEventType, room::member::MembershipState},
};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Identifies one timeline (set) of a room.
///
/// A room has one canonical, unfiltered timeline, and possibly a number of
/// filtered ones; events get delivered once per timeline they're inserted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineId(u64);

impl TimelineId {
    /// Create a new `TimelineId` from the client's own numbering.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What the notifier needs to know about a room, at the time an event or a
/// receipt was received.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomSnapshot {
    /// The room identifier.
    pub room_id: OwnedRoomId,

    /// The computed display name of the room.
    pub display_name: String,

    /// The number of unread notifications of the current user in this room.
    pub unread_notification_count: u64,

    /// The membership of the current user, if known.
    pub own_membership: Option<MembershipState>,

    /// The room's canonical, unfiltered timeline.
    pub unfiltered_timeline: TimelineId,
}

impl RoomSnapshot {
    /// Create a snapshot of a room without unread notifications.
    pub fn new(
        room_id: OwnedRoomId,
        display_name: impl Into<String>,
        unfiltered_timeline: TimelineId,
    ) -> Self {
        Self {
            room_id,
            display_name: display_name.into(),
            unread_notification_count: 0,
            own_membership: None,
            unfiltered_timeline,
        }
    }

    /// Set the unread notification count.
    pub fn with_unread_notification_count(mut self, count: u64) -> Self {
        self.unread_notification_count = count;
        self
    }

    /// Set the membership of the current user.
    pub fn with_own_membership(mut self, membership: MembershipState) -> Self {
        self.own_membership = Some(membership);
        self
    }
}

/// The member who sent an event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventSender {
    /// The user ID of the sender.
    pub user_id: OwnedUserId,

    /// The disambiguated display name of the sender in the room.
    pub display_name: String,

    /// The avatar of the sender, if any.
    pub avatar_url: Option<OwnedMxcUri>,
}

impl EventSender {
    /// Create a new sender without an avatar.
    pub fn new(user_id: OwnedUserId, display_name: impl Into<String>) -> Self {
        Self { user_id, display_name: display_name.into(), avatar_url: None }
    }

    /// Set the avatar of the sender.
    pub fn with_avatar_url(mut self, avatar_url: OwnedMxcUri) -> Self {
        self.avatar_url = Some(avatar_url);
        self
    }
}

/// A timeline event that may be worth notifying about.
#[derive(Clone, Debug, PartialEq)]
pub struct NotifiableEvent {
    /// The event ID.
    pub event_id: OwnedEventId,

    /// The room the event was sent in.
    pub room_id: OwnedRoomId,

    /// The type of the event.
    pub event_type: TimelineEventType,

    /// The sender of the event; synthetic events don't have one.
    pub sender: Option<EventSender>,

    /// The literal `body` field of the event content, if it has one.
    pub body: Option<String>,
}

impl NotifiableEvent {
    /// Create an event without sender nor body.
    pub fn new(event_id: OwnedEventId, room_id: OwnedRoomId, event_type: TimelineEventType) -> Self {
        Self { event_id, room_id, event_type, sender: None, body: None }
    }

    /// Set the sender.
    pub fn with_sender(mut self, sender: EventSender) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Set the `body` of the content.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The `body` of the content, unless it's missing or empty.
    pub fn non_empty_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

/// Extra information about where an event was inserted.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineData {
    /// The timeline the event was inserted in.
    pub timeline: TimelineId,

    /// Whatever else the sync client wants to pass along.
    pub extra: JsonMap<String, JsonValue>,
}

impl TimelineData {
    /// Create timeline data for an event inserted in `timeline`.
    pub fn new(timeline: TimelineId) -> Self {
        Self { timeline, extra: JsonMap::new() }
    }
}

/// An event was added to (or removed from) a room timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomTimelineUpdate {
    /// The event.
    pub event: NotifiableEvent,

    /// The room the event belongs to, if the client knows it.
    pub room: Option<RoomSnapshot>,

    /// Whether the event was inserted at the start of the timeline, i.e. it's
    /// coming from back-pagination.
    pub to_start_of_timeline: bool,

    /// Whether the event was removed from the timeline.
    pub removed: bool,

    /// Where the event was inserted.
    pub data: TimelineData,
}

impl RoomTimelineUpdate {
    /// A live event appended to the room's unfiltered timeline.
    pub fn live(event: NotifiableEvent, room: RoomSnapshot) -> Self {
        let data = TimelineData::new(room.unfiltered_timeline);
        Self { event, room: Some(room), to_start_of_timeline: false, removed: false, data }
    }

    /// Mark the event as coming from back-pagination.
    pub fn back_paginated(mut self) -> Self {
        self.to_start_of_timeline = true;
        self
    }

    /// Change the timeline the event was inserted in.
    pub fn in_timeline(mut self, timeline: TimelineId) -> Self {
        self.data.timeline = timeline;
        self
    }
}

/// A read receipt was received in a room.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomReceiptUpdate {
    /// The event the receipt points to.
    pub event_id: OwnedEventId,

    /// The room, with its counts already updated by the receipt.
    pub room: RoomSnapshot,
}

/// Turns an event into the human-readable text of a notification.
pub trait EventFormatter: fmt::Debug + Send + Sync {
    /// The text describing `event`, or `None` if the event can't be
    /// described, in which case no popup is shown for it.
    fn text_for_event(&self, event: &NotifiableEvent) -> Option<String>;
}
