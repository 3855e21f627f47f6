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

//! The notification dispatcher.
//!
//! The [`Notifier`] listens to the sync client and decides, for every event
//! added to a room timeline, whether to show a popup, play the alert sound,
//! or do nothing at all. An event is considered only if:
//!
//! - it's a live event, not one fetched by back-pagination;
//! - the client knows the room it belongs to;
//! - the sync is live, see [`Readiness`];
//! - it wasn't sent by the current user;
//! - it was inserted in the room's unfiltered timeline, so that events
//!   showing up in several filtered timelines only count once.
//!
//! Then the push rules of the user decide whether it notifies, and whether
//! with a sound.
//!
//! Popups are remembered per room until a read receipt brings the unread
//! notification count of that room down to zero, at which point they're
//! cleared all at once.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use ruma::RoomId;
use tokio::sync::broadcast;
use tracing::{debug, instrument, trace, warn};

use crate::{
    EventFormatter, EventHandlerHandle, NotifiableEvent, NotificationHandle,
    NotificationPlatform, NotificationRegistry, NotificationSound, NotifierClient,
    NotifierSettingsSnapshot, PermissionOutcome, PushActions, Readiness, RoomReceiptUpdate,
    RoomSnapshot, RoomTimelineUpdate, SettingKey, SyncState, settings::Settings,
};

mod builder;
mod content;

pub use self::builder::NotifierBuilder;
use self::content::notification_content;

/// Sent to the [`Notifier::subscribe`]rs whenever the notification
/// preferences might have changed, so settings screens and the "enable
/// notifications" banner can refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotifierUpdate {
    /// Whether popups are enabled now.
    pub enabled: bool,
}

/// Decides which events deserve a desktop notification, and shows them.
///
/// Cloning is cheap; all clones share the same state. The notifier
/// unsubscribes from the client when the last clone is dropped.
#[derive(Clone, Debug)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

#[derive(Debug)]
struct NotifierInner {
    client: Arc<dyn NotifierClient>,
    formatter: Arc<dyn EventFormatter>,
    platform: Option<Arc<dyn NotificationPlatform>>,
    sound: Option<Arc<dyn NotificationSound>>,
    settings: Settings,
    avatar_size: u32,
    state: Mutex<NotifierState>,
    updates: broadcast::Sender<NotifierUpdate>,
}

#[derive(Debug, Default)]
struct NotifierState {
    readiness: Readiness,
    registry: NotificationRegistry,

    /// Whether the banner was hidden for this session only.
    toolbar_hidden: bool,

    /// Set while started.
    subscriptions: Option<Subscriptions>,
}

#[derive(Debug)]
struct Subscriptions {
    timeline: EventHandlerHandle,
    receipt: EventHandlerHandle,
    sync_state: EventHandlerHandle,
}

impl Subscriptions {
    fn remove(self, client: &dyn NotifierClient) {
        client.remove_event_handler(self.timeline);
        client.remove_event_handler(self.receipt);
        client.remove_event_handler(self.sync_state);
    }
}

impl Drop for NotifierInner {
    fn drop(&mut self) {
        let subscriptions =
            self.state.get_mut().unwrap_or_else(PoisonError::into_inner).subscriptions.take();

        if let Some(subscriptions) = subscriptions {
            debug!("Notifier dropped while started, unsubscribing");
            subscriptions.remove(self.client.as_ref());
        }
    }
}

impl Notifier {
    /// Start building a notifier for `client`, turning events into text with
    /// `formatter`.
    pub fn builder(
        client: Arc<dyn NotifierClient>,
        formatter: Arc<dyn EventFormatter>,
    ) -> NotifierBuilder {
        NotifierBuilder::new(client, formatter)
    }

    /// Subscribe to the timeline, receipt and sync-state updates of the
    /// client.
    ///
    /// Nothing is notified until the client reports the sync is live. The
    /// notifications remembered from a previous run are forgotten, and the
    /// banner is no longer hidden, unless it was hidden persistently.
    ///
    /// Does nothing if the notifier is already started.
    pub fn start(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();

            if state.subscriptions.is_some() {
                debug!("Notifier already started");
                return;
            }

            state.readiness = Readiness::NotReady;
            state.registry.clear();
            state.toolbar_hidden = false;
        }

        // Register outside of the state lock: a client is allowed to invoke a
        // handler right away.
        let timeline = self.inner.client.add_timeline_handler(Box::new({
            let inner = Arc::downgrade(&self.inner);
            move |update: &RoomTimelineUpdate| {
                if let Some(inner) = Weak::upgrade(&inner) {
                    inner.on_room_timeline(update);
                }
            }
        }));
        let receipt = self.inner.client.add_receipt_handler(Box::new({
            let inner = Arc::downgrade(&self.inner);
            move |update: &RoomReceiptUpdate| {
                if let Some(inner) = Weak::upgrade(&inner) {
                    inner.on_room_receipt(update);
                }
            }
        }));
        let sync_state = self.inner.client.add_sync_state_handler(Box::new({
            let inner = Arc::downgrade(&self.inner);
            move |sync_state| {
                if let Some(inner) = Weak::upgrade(&inner) {
                    inner.on_sync_state(sync_state);
                }
            }
        }));
        let subscriptions = Subscriptions { timeline, receipt, sync_state };

        let mut state = self.inner.state.lock().unwrap();

        if state.subscriptions.is_some() {
            // Another call to `start` won the race.
            drop(state);
            subscriptions.remove(self.inner.client.as_ref());
            return;
        }

        state.subscriptions = Some(subscriptions);

        debug!("Notifier started");
    }

    /// Unsubscribe from the client.
    ///
    /// Does nothing if the notifier isn't started.
    pub fn stop(&self) {
        let subscriptions = {
            let mut state = self.inner.state.lock().unwrap();
            state.readiness = Readiness::NotReady;
            state.subscriptions.take()
        };

        if let Some(subscriptions) = subscriptions {
            subscriptions.remove(self.inner.client.as_ref());
            debug!("Notifier stopped");
        }
    }

    /// Is the notifier subscribed to the client?
    pub fn is_started(&self) -> bool {
        self.inner.state.lock().unwrap().subscriptions.is_some()
    }

    /// Whether the sync is live enough for events to be notified.
    pub fn readiness(&self) -> Readiness {
        self.inner.state.lock().unwrap().readiness
    }

    /// Subscribe to [`NotifierUpdate`]s.
    pub fn subscribe(&self) -> broadcast::Receiver<NotifierUpdate> {
        self.inner.updates.subscribe()
    }

    /// The popups currently displayed for `room_id`, oldest first.
    pub fn outstanding_notifications(&self, room_id: &RoomId) -> Vec<NotificationHandle> {
        let state = self.inner.state.lock().unwrap();
        state.registry.get(room_id).map(<[_]>::to_vec).unwrap_or_default()
    }

    /// Does the platform support desktop notifications?
    pub fn supports_desktop_notifications(&self) -> bool {
        self.inner.platform.as_ref().is_some_and(|platform| platform.supports_notifications())
    }

    /// Did the user allow desktop notifications?
    pub fn have_permission(&self) -> bool {
        self.inner.platform.as_ref().is_some_and(|platform| platform.permission_granted())
    }

    /// Will popups be shown?
    ///
    /// They're enabled by default, as soon as the platform allows them.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    /// Will the alert sound be played?
    ///
    /// Until it's explicitly set, this follows [`Notifier::is_enabled`].
    pub fn is_audio_enabled(&self) -> bool {
        self.inner.is_audio_enabled()
    }

    /// Is the "enable notifications" banner hidden?
    pub fn is_toolbar_hidden(&self) -> bool {
        let persisted = self.inner.settings.flag(SettingKey::NotificationsHidden) == Some(true);
        persisted || self.inner.state.lock().unwrap().toolbar_hidden
    }

    /// The effective preferences.
    pub fn settings(&self) -> NotifierSettingsSnapshot {
        NotifierSettingsSnapshot {
            enabled: self.is_enabled(),
            audio_enabled: self.is_audio_enabled(),
            toolbar_hidden: self.is_toolbar_hidden(),
        }
    }

    /// Enable or disable popups.
    ///
    /// Enabling asks the platform for the permission to display
    /// notifications first, and only takes effect if the user grants it.
    /// It also brings the banner back, should it be hidden.
    ///
    /// As long as the alert sound wasn't explicitly configured, it's pinned
    /// to its current value, so it doesn't change along with popups.
    pub async fn set_enabled(&self, enable: bool) {
        let settings = &self.inner.settings;

        if settings.flag(SettingKey::AudioNotificationsEnabled).is_none() {
            settings.set_flag(SettingKey::AudioNotificationsEnabled, self.is_audio_enabled());
        }

        if !enable {
            settings.set_flag(SettingKey::NotificationsEnabled, false);
            self.inner.notify_update(false);
            return;
        }

        let Some(platform) = self.inner.platform.clone() else {
            debug!("No notification platform, can't enable notifications");
            return;
        };

        let outcome = platform.request_permission().await;
        if outcome != PermissionOutcome::Granted {
            debug!(?outcome, "Permission to display notifications not granted");
            return;
        }

        settings.set_flag(SettingKey::NotificationsEnabled, true);
        self.inner.state.lock().unwrap().toolbar_hidden = false;
        settings.set_flag(SettingKey::NotificationsHidden, false);
        self.inner.notify_update(true);
    }

    /// Enable or disable the alert sound.
    pub fn set_audio_enabled(&self, enable: bool) {
        self.inner.settings.set_flag(SettingKey::AudioNotificationsEnabled, enable);
    }

    /// Hide or show the "enable notifications" banner.
    ///
    /// If `persistent` is false, this only lasts until the next
    /// [`Notifier::start`].
    pub fn set_toolbar_hidden(&self, hidden: bool, persistent: bool) {
        self.inner.state.lock().unwrap().toolbar_hidden = hidden;

        if persistent {
            self.inner.settings.set_flag(SettingKey::NotificationsHidden, hidden);
        }

        // Only once saved, so subscribers read the new value.
        self.inner.notify_update(self.is_enabled());
    }

    /// Hide or show the "enable notifications" banner, for good.
    pub fn hide_toolbar(&self, hidden: bool) {
        self.set_toolbar_hidden(hidden, true);
    }
}

impl NotifierInner {
    /// Popups can be shown at all.
    fn is_possible(&self) -> bool {
        self.platform.as_ref().is_some_and(|platform| {
            platform.supports_notifications() && platform.permission_granted()
        })
    }

    fn is_enabled(&self) -> bool {
        self.is_possible() && self.settings.flag(SettingKey::NotificationsEnabled).unwrap_or(true)
    }

    fn is_audio_enabled(&self) -> bool {
        self.settings
            .flag(SettingKey::AudioNotificationsEnabled)
            .unwrap_or_else(|| self.is_enabled())
    }

    fn notify_update(&self, enabled: bool) {
        // No receivers is fine.
        let _ = self.updates.send(NotifierUpdate { enabled });
    }

    fn on_sync_state(&self, sync_state: SyncState) {
        let mut state = self.state.lock().unwrap();
        let readiness = state.readiness.apply(sync_state);

        if readiness != state.readiness {
            debug!(?sync_state, ?readiness, "Notifier readiness changed");
            state.readiness = readiness;
        }
    }

    #[instrument(
        skip_all,
        fields(room_id = %update.event.room_id, event_id = %update.event.event_id)
    )]
    fn on_room_timeline(&self, update: &RoomTimelineUpdate) {
        if update.to_start_of_timeline {
            trace!("Ignoring back-paginated event");
            return;
        }

        let Some(room) = &update.room else {
            trace!("Ignoring event of an unknown room");
            return;
        };

        if !self.state.lock().unwrap().readiness.is_ready() {
            trace!("Ignoring event received before the sync is live");
            return;
        }

        let is_own_event = match (&update.event.sender, self.client.own_user_id()) {
            (Some(sender), Some(own_user_id)) => sender.user_id == own_user_id,
            _ => false,
        };
        if is_own_event {
            trace!("Ignoring own event");
            return;
        }

        if update.data.timeline != room.unfiltered_timeline {
            trace!(timeline = update.data.timeline.get(), "Ignoring event of a filtered timeline");
            return;
        }

        let actions = PushActions::from_actions(&self.client.push_actions_for_event(&update.event));
        if !actions.notify {
            trace!("Event doesn't notify");
            return;
        }

        if self.is_enabled() {
            self.display_popup_notification(&update.event, room);
        }

        if actions.sound && self.is_audio_enabled() {
            self.play_audio_notification();
        }
    }

    fn display_popup_notification(&self, event: &NotifiableEvent, room: &RoomSnapshot) {
        let Some(platform) = &self.platform else {
            return;
        };

        if platform.has_focus() {
            debug!("Not showing a popup, the application has the focus");
            return;
        }

        let Some(text) = self.formatter.text_for_event(event) else {
            debug!("Not showing a popup, the event has no text");
            return;
        };

        let content = notification_content(event, room, text, self.avatar_size);
        debug!(title = %content.title, "Showing popup");

        if let Some(handle) = platform.display_notification(&content) {
            self.state.lock().unwrap().registry.push(&event.room_id, handle);
        }
    }

    fn play_audio_notification(&self) {
        if let Some(sound) = &self.sound {
            debug!("Playing the alert sound");
            sound.play();
        }
    }

    #[instrument(skip_all, fields(room_id = %update.room.room_id, event_id = %update.event_id))]
    fn on_room_receipt(&self, update: &RoomReceiptUpdate) {
        if update.room.unread_notification_count > 0 {
            return;
        }

        let Some(handles) = self.state.lock().unwrap().registry.take(&update.room.room_id) else {
            return;
        };

        let Some(platform) = &self.platform else {
            return;
        };

        debug!(count = handles.len(), "Room fully read, clearing its notifications");

        for handle in handles {
            if let Err(error) = platform.clear_notification(&handle) {
                warn!(%handle, "Couldn't clear notification: {error}");
            }
        }
    }
}
