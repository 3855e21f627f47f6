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

/// The state of the sync loop, as reported by the sync client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncState {
    /// The initial sync has been processed and the local state is usable.
    Prepared,
    /// A regular, live sync request completed.
    Syncing,
    /// The connection came back and the client is catching up on what it
    /// missed.
    Catchup,
    /// The connection was lost and the client is trying to get it back.
    Reconnecting,
    /// The sync loop was stopped.
    Stopped,
    /// The sync loop failed.
    Error,
}

/// Whether timeline events may trigger notifications.
///
/// Until the sync client is live, the timeline is being filled with the
/// backlog, which must never result in notifications.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Readiness {
    /// The sync client hasn't caught up yet, or was stopped.
    #[default]
    NotReady,
    /// The sync client is live.
    Ready,
}

impl Readiness {
    /// Compute the readiness after the sync client reported `state`.
    ///
    /// States other than the ones starting or stopping the live sync keep the
    /// current readiness.
    pub fn apply(self, state: SyncState) -> Self {
        match state {
            SyncState::Prepared | SyncState::Syncing => Self::Ready,
            SyncState::Stopped | SyncState::Error => Self::NotReady,
            SyncState::Catchup | SyncState::Reconnecting => self,
        }
    }

    /// Is it [`Readiness::Ready`]?
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}
