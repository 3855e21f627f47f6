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

use ruma::events::TimelineEventType;

use crate::{NotifiableEvent, NotificationAvatar, NotificationContent, RoomSnapshot};

/// Compute what a popup for `event` looks like.
///
/// `text` is what the formatter made of the event; the literal body of the
/// event wins over it.
pub(super) fn notification_content(
    event: &NotifiableEvent,
    room: &RoomSnapshot,
    text: String,
    avatar_size: u32,
) -> NotificationContent {
    let title = match &event.sender {
        // Membership changes read "Alice joined the room", and in DMs the
        // room is usually named after the sender already.
        Some(sender)
            if sender.display_name != room.display_name
                && event.event_type != TimelineEventType::RoomMember =>
        {
            format!("{} ({})", sender.display_name, room.display_name)
        }
        _ => room.display_name.clone(),
    };

    let body = event.non_empty_body().map(ToOwned::to_owned).unwrap_or(text);

    let avatar = event
        .sender
        .as_ref()
        .and_then(|sender| sender.avatar_url.clone())
        .map(|url| NotificationAvatar { url, width: avatar_size, height: avatar_size });

    NotificationContent { room_id: event.room_id.clone(), title, body, avatar }
}
