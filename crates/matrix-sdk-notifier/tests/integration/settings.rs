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

use std::sync::{Arc, atomic::Ordering::SeqCst};

use assert_matches2::assert_matches;
use matrix_sdk_notifier::{
    MemorySettingsStore, Notifier, NotifierSettingsSnapshot, NotifierUpdate, SettingsStore,
    SyncState,
};
use ruma::{room_id, user_id};

use crate::{
    FakeDesktop, FakeSpeaker, FakeSyncClient, SenderFormatter, init_tracing, message, room,
};

fn notifier(
    client: &Arc<FakeSyncClient>,
    desktop: &Arc<FakeDesktop>,
    store: &MemorySettingsStore,
) -> Notifier {
    Notifier::builder(client.clone(), Arc::new(SenderFormatter))
        .with_platform(desktop.clone())
        .with_settings_store(Arc::new(store.clone()))
        .build()
}

#[tokio::test]
async fn test_preferences_survive_a_restart() {
    init_tracing();
    let client = Arc::new(FakeSyncClient::default());
    let desktop = Arc::new(FakeDesktop::default());
    let store = MemorySettingsStore::new();

    let first = notifier(&client, &desktop, &store);
    assert_eq!(
        first.settings(),
        NotifierSettingsSnapshot { enabled: true, audio_enabled: true, toolbar_hidden: false }
    );

    first.set_enabled(false).await;
    first.hide_toolbar(true);
    drop(first);

    let second = notifier(&client, &desktop, &store);
    assert_eq!(
        second.settings(),
        NotifierSettingsSnapshot { enabled: false, audio_enabled: true, toolbar_hidden: true }
    );
    assert_eq!(store.get("notifications_enabled").unwrap().as_deref(), Some("false"));
    assert_eq!(store.get("audio_notifications_enabled").unwrap().as_deref(), Some("true"));
    assert_eq!(store.get("notifications_hidden").unwrap().as_deref(), Some("true"));
}

#[tokio::test]
async fn test_disabled_popups_keep_the_sound() {
    init_tracing();
    let client = Arc::new(FakeSyncClient::default());
    let desktop = Arc::new(FakeDesktop::default());
    let speaker = Arc::new(FakeSpeaker::default());
    let notifier = Notifier::builder(client.clone(), Arc::new(SenderFormatter))
        .with_platform(desktop.clone())
        .with_sound(speaker.clone())
        .build();

    notifier.set_enabled(false).await;
    notifier.start();
    client.sync_state(SyncState::Syncing);

    let dm = room(room_id!("!dm:localhost"), "Bob", 1);
    client.timeline(message(&dm, user_id!("@bob:localhost"), "Bob", "ping @me"));

    assert!(desktop.titles().is_empty());
    assert_eq!(speaker.plays.load(SeqCst), 1);
}

#[tokio::test]
async fn test_enabling_and_disabling_reports_updates() {
    init_tracing();
    let client = Arc::new(FakeSyncClient::default());
    let desktop = Arc::new(FakeDesktop::default());
    let store = MemorySettingsStore::new();
    let notifier = notifier(&client, &desktop, &store);
    let mut updates = notifier.subscribe();

    notifier.set_enabled(false).await;
    assert_matches!(updates.recv().await, Ok(NotifierUpdate { enabled: false }));

    notifier.set_enabled(true).await;
    assert_matches!(updates.recv().await, Ok(NotifierUpdate { enabled: true }));
    assert!(notifier.is_enabled());

    // The user changes their mind at the OS level.
    desktop.denies_permission.store(true, SeqCst);
    assert!(!notifier.is_enabled());
    notifier.set_enabled(true).await;
    assert!(!notifier.is_enabled());
    assert_eq!(store.get("notifications_enabled").unwrap().as_deref(), Some("true"));

    notifier.set_toolbar_hidden(true, false);
    assert_matches!(updates.recv().await, Ok(NotifierUpdate { enabled: false }));
    assert!(updates.is_empty());
}
