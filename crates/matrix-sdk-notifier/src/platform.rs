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

//! Interfaces to the desktop the notifications get rendered on.

use std::fmt;

use async_trait::async_trait;
use ruma::{OwnedMxcUri, OwnedRoomId};

use crate::Result;

/// An opaque token referring to a notification currently displayed by a
/// [`NotificationPlatform`].
///
/// Only the platform that issued it can make sense of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NotificationHandle(String);

impl NotificationHandle {
    /// Wrap a platform-specific identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The platform-specific identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the user answered a permission request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// Notifications are allowed.
    Granted,
    /// Notifications were explicitly refused.
    Denied,
    /// The prompt was closed without an answer.
    Dismissed,
}

/// The avatar to show next to a notification: a square, cropped thumbnail of
/// the sender's avatar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationAvatar {
    /// The `mxc://` URI of the full-size avatar.
    pub url: OwnedMxcUri,
    /// The requested thumbnail width, in pixels.
    pub width: u32,
    /// The requested thumbnail height, in pixels.
    pub height: u32,
}

/// Everything needed to render one notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationContent {
    /// The room the notification is about.
    pub room_id: OwnedRoomId,
    /// The notification title.
    pub title: String,
    /// The notification message.
    pub body: String,
    /// The avatar of the sender, if any.
    pub avatar: Option<NotificationAvatar>,
}

/// A native notification backend.
#[async_trait]
pub trait NotificationPlatform: fmt::Debug + Send + Sync {
    /// Can this platform display notifications at all?
    fn supports_notifications(&self) -> bool;

    /// Did the user allow notifications?
    fn permission_granted(&self) -> bool;

    /// Prompt the user for the permission to display notifications.
    ///
    /// Resolves once the user answered, or dismissed the prompt.
    async fn request_permission(&self) -> PermissionOutcome;

    /// Does the application window have the user's focus?
    fn has_focus(&self) -> bool;

    /// Display a notification.
    ///
    /// Returns a handle if the platform supports clearing the notification
    /// later on, `None` otherwise.
    fn display_notification(&self, content: &NotificationContent) -> Option<NotificationHandle>;

    /// Clear a notification previously returned by
    /// [`NotificationPlatform::display_notification`].
    fn clear_notification(&self, handle: &NotificationHandle) -> Result<()>;
}

/// The alert sound played along with notifications.
pub trait NotificationSound: fmt::Debug + Send + Sync {
    /// Rewind the sound and play it.
    ///
    /// This must not block until the playback is over. Calling it while the
    /// sound is still playing restarts it.
    fn play(&self);
}
