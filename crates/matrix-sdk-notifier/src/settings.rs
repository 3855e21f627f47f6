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

//! Persistence of the notification preferences.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

/// A durable key-value store for user preferences.
pub trait SettingsStore: fmt::Debug + Send + Sync {
    /// Get the value stored for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` for `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory, non-persistent implementation of the [`SettingsStore`].
///
/// Default if no other is configured.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySettingsStore {
    /// Create a new empty `MemorySettingsStore`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().unwrap().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// The preferences of the notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Whether popups are enabled.
    NotificationsEnabled,
    /// Whether the alert sound is enabled.
    AudioNotificationsEnabled,
    /// Whether the "enable notifications" banner was dismissed.
    NotificationsHidden,
}

impl SettingKey {
    /// The key under which the preference is persisted.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotificationsEnabled => "notifications_enabled",
            Self::AudioNotificationsEnabled => "audio_notifications_enabled",
            Self::NotificationsHidden => "notifications_hidden",
        }
    }
}

/// The effective values of the notifier preferences, e.g. for a settings
/// screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierSettingsSnapshot {
    /// Whether popups will be shown.
    pub enabled: bool,
    /// Whether the alert sound will be played.
    pub audio_enabled: bool,
    /// Whether the "enable notifications" banner is hidden.
    pub toolbar_hidden: bool,
}

/// Boolean flags on top of a [`SettingsStore`].
///
/// Store failures are logged; a failed read behaves like a missing value and
/// a failed write is lost.
#[derive(Clone, Debug)]
pub(crate) struct Settings {
    store: Arc<dyn SettingsStore>,
}

impl Settings {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Read a flag; `None` if it was never set.
    ///
    /// Any stored value other than `"true"` reads as `false`.
    pub fn flag(&self, key: SettingKey) -> Option<bool> {
        match self.store.get(key.as_str()) {
            Ok(value) => value.map(|value| value == "true"),
            Err(error) => {
                warn!(key = key.as_str(), "Couldn't read notification setting: {error}");
                None
            }
        }
    }

    pub fn set_flag(&self, key: SettingKey, value: bool) {
        let value = if value { "true" } else { "false" };

        if let Err(error) = self.store.set(key.as_str(), value) {
            warn!(key = key.as_str(), "Couldn't persist notification setting: {error}");
        }
    }
}
