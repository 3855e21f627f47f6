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

use ruma::push::{Action, Tweak};

/// The parts of the push actions of an event the notifier cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushActions {
    /// Whether the event should notify.
    pub notify: bool,

    /// Whether a sound should be played along with the notification.
    pub sound: bool,
}

impl PushActions {
    /// Summarize the push actions the push rules evaluated for an event.
    pub fn from_actions(actions: &[Action]) -> Self {
        let notify = actions.iter().any(|action| action.should_notify());
        let sound =
            actions.iter().any(|action| matches!(action, Action::SetTweak(Tweak::Sound(_))));

        Self { notify, sound }
    }
}
