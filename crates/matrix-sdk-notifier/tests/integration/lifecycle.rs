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

use matrix_sdk_notifier::{Notifier, Readiness, SyncState, TimelineId};
use ruma::{room_id, user_id};

use crate::{
    FakeDesktop, FakeSpeaker, FakeSyncClient, SenderFormatter, init_tracing, message, room,
};

fn notifier(client: &Arc<FakeSyncClient>, desktop: &Arc<FakeDesktop>) -> Notifier {
    Notifier::builder(client.clone(), Arc::new(SenderFormatter))
        .with_platform(desktop.clone())
        .build()
}

#[test]
fn test_a_day_of_notifications() {
    init_tracing();
    let client = Arc::new(FakeSyncClient::default());
    let desktop = Arc::new(FakeDesktop::default());
    let speaker = Arc::new(FakeSpeaker::default());
    let notifier = Notifier::builder(client.clone(), Arc::new(SenderFormatter))
        .with_platform(desktop.clone())
        .with_sound(speaker.clone())
        .build();

    let work = room(room_id!("!work:localhost"), "Work", 1);
    let dm = room(room_id!("!dm:localhost"), "Bob", 2);
    let alice = user_id!("@alice:localhost");
    let bob = user_id!("@bob:localhost");

    notifier.start();

    // The initial sync brings the backlog in; none of it pops up.
    client.timeline(message(&work, alice, "Alice", "yesterday's news"));
    client.sync_state(SyncState::Prepared);
    assert_eq!(notifier.readiness(), Readiness::Ready);

    // Older messages, loaded by scrolling up.
    client.timeline(message(&work, alice, "Alice", "even older news").back_paginated());
    assert!(desktop.titles().is_empty());

    client.timeline(message(&work, alice, "Alice", "standup in 5"));
    client.timeline(message(&dm, bob, "Bob", "hey @me, lunch?"));
    client.timeline(message(&work, FakeSyncClient::own_user(), "Me", "omw"));
    // The same event, seen through a search timeline.
    let searched = message(&work, alice, "Alice", "standup in 5").in_timeline(TimelineId::new(9));
    client.timeline(searched);

    assert_eq!(desktop.titles(), ["Alice (Work)", "Bob"]);
    assert_eq!(desktop.bodies(), ["standup in 5", "hey @me, lunch?"]);
    assert_eq!(speaker.plays.load(SeqCst), 1);

    // Reading the DM clears its popup only.
    client.read(dm.clone());
    assert_eq!(desktop.titles(), ["Alice (Work)"]);
    assert!(notifier.outstanding_notifications(&dm.room_id).is_empty());
    assert_eq!(notifier.outstanding_notifications(&work.room_id).len(), 1);

    // While the window is focused, nothing pops up.
    desktop.focused.store(true, SeqCst);
    client.timeline(message(&work, alice, "Alice", "anyone?"));
    assert_eq!(desktop.titles(), ["Alice (Work)"]);
    desktop.focused.store(false, SeqCst);

    // The connection drops and comes back.
    client.sync_state(SyncState::Reconnecting);
    client.sync_state(SyncState::Catchup);
    client.timeline(message(&work, alice, "Alice", "back online"));
    assert_eq!(desktop.titles(), ["Alice (Work)", "Alice (Work)"]);

    client.read(work.clone());
    assert!(desktop.titles().is_empty());

    client.sync_state(SyncState::Stopped);
    client.timeline(message(&work, alice, "Alice", "bye"));
    assert!(desktop.titles().is_empty());

    notifier.stop();
    assert!(client.handlers.is_empty());
}

#[test]
fn test_two_notifiers_on_one_client() {
    init_tracing();
    let client = Arc::new(FakeSyncClient::default());
    let first_desktop = Arc::new(FakeDesktop::default());
    let second_desktop = Arc::new(FakeDesktop::default());
    let first = notifier(&client, &first_desktop);
    let second = notifier(&client, &second_desktop);

    first.start();
    second.start();
    assert_eq!(client.handlers.len(), 6);

    first.stop();
    assert_eq!(client.handlers.len(), 3);

    client.sync_state(SyncState::Syncing);
    let work = room(room_id!("!work:localhost"), "Work", 1);
    client.timeline(message(&work, user_id!("@alice:localhost"), "Alice", "hi"));

    assert!(first_desktop.titles().is_empty());
    assert_eq!(second_desktop.titles(), ["Alice (Work)"]);

    drop(second);
    assert!(client.handlers.is_empty());
}
