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

use std::collections::HashMap;

use ruma::{OwnedRoomId, RoomId};

use crate::NotificationHandle;

/// The notifications currently displayed for each room, in display order.
///
/// A room only has an entry while it has at least one notification: taking
/// the notifications of a room removes its entry.
#[derive(Debug, Default)]
pub struct NotificationRegistry {
    by_room: HashMap<OwnedRoomId, Vec<NotificationHandle>>,
}

impl NotificationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a notification displayed for `room_id`.
    pub fn push(&mut self, room_id: &RoomId, handle: NotificationHandle) {
        self.by_room.entry(room_id.to_owned()).or_default().push(handle);
    }

    /// Forget all the notifications of `room_id`, and return them in display
    /// order.
    pub fn take(&mut self, room_id: &RoomId) -> Option<Vec<NotificationHandle>> {
        self.by_room.remove(room_id)
    }

    /// The notifications of `room_id`, in display order.
    pub fn get(&self, room_id: &RoomId) -> Option<&[NotificationHandle]> {
        self.by_room.get(room_id).map(Vec::as_slice)
    }

    /// The number of rooms with notifications.
    pub fn len(&self) -> usize {
        self.by_room.len()
    }

    /// Whether no room has notifications.
    pub fn is_empty(&self) -> bool {
        self.by_room.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.by_room.clear();
    }
}
