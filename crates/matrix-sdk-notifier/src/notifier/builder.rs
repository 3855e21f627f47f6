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

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use super::{Notifier, NotifierInner, NotifierState};
use crate::{
    EventFormatter, MemorySettingsStore, NotificationPlatform, NotificationSound, NotifierClient,
    SettingsStore, settings::Settings,
};

/// The default size, in pixels, of the avatar thumbnails shown in
/// notifications.
const DEFAULT_AVATAR_SIZE: u32 = 40;

/// The default number of [`NotifierUpdate`](super::NotifierUpdate)s kept for
/// slow subscribers.
const DEFAULT_UPDATE_CAPACITY: usize = 16;

/// Builder for a [`Notifier`].
///
/// Get one with [`Notifier::builder`].
#[derive(Clone, Debug)]
pub struct NotifierBuilder {
    /// The sync client.
    client: Arc<dyn NotifierClient>,

    /// Turns events into notification text.
    formatter: Arc<dyn EventFormatter>,

    /// Where popups are displayed, if anywhere.
    platform: Option<Arc<dyn NotificationPlatform>>,

    /// The alert sound, if any.
    sound: Option<Arc<dyn NotificationSound>>,

    /// Where the preferences live.
    settings_store: Option<Arc<dyn SettingsStore>>,

    /// Width and height of the avatar thumbnails.
    avatar_size: u32,

    /// Capacity of the updates channel.
    update_capacity: usize,
}

impl NotifierBuilder {
    pub(super) fn new(client: Arc<dyn NotifierClient>, formatter: Arc<dyn EventFormatter>) -> Self {
        Self {
            client,
            formatter,
            platform: None,
            sound: None,
            settings_store: None,
            avatar_size: DEFAULT_AVATAR_SIZE,
            update_capacity: DEFAULT_UPDATE_CAPACITY,
        }
    }

    /// Display popups through this platform.
    ///
    /// Without a platform, no popup is ever shown and notifications can't be
    /// enabled.
    pub fn with_platform(mut self, platform: Arc<dyn NotificationPlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Play this sound for events whose push actions ask for one.
    pub fn with_sound(mut self, sound: Arc<dyn NotificationSound>) -> Self {
        self.sound = Some(sound);
        self
    }

    /// Persist the preferences in this store.
    ///
    /// Defaults to a [`MemorySettingsStore`], which forgets everything once
    /// the notifier is dropped.
    pub fn with_settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.settings_store = Some(store);
        self
    }

    /// Set the size, in pixels, of the square avatar thumbnails requested for
    /// notifications. Defaults to 40.
    pub fn with_avatar_size(mut self, size: u32) -> Self {
        self.avatar_size = size;
        self
    }

    /// Set how many [`NotifierUpdate`](super::NotifierUpdate)s are buffered
    /// for each subscriber before the oldest ones get dropped. Defaults to
    /// 16.
    pub fn with_update_capacity(mut self, capacity: usize) -> Self {
        self.update_capacity = capacity;
        self
    }

    /// Finish setting up the [`Notifier`].
    ///
    /// The notifier doesn't listen to the client until [`Notifier::start`]
    /// is called.
    pub fn build(self) -> Notifier {
        let store =
            self.settings_store.unwrap_or_else(|| Arc::new(MemorySettingsStore::new()));
        let (updates, _) = broadcast::channel(self.update_capacity.max(1));

        Notifier {
            inner: Arc::new(NotifierInner {
                client: self.client,
                formatter: self.formatter,
                platform: self.platform,
                sound: self.sound,
                settings: Settings::new(store),
                avatar_size: self.avatar_size,
                state: Mutex::new(NotifierState::default()),
                updates,
            }),
        }
    }
}
