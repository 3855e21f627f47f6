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

//! Error conditions.
//!
//! None of the [`Notifier`](crate::Notifier) operations fail: these errors are
//! what the external collaborators report, and the notifier logs them before
//! carrying on without the failed feature.

use thiserror::Error;

/// Result type of the notifier collaborators.
pub type Result<T, E = NotifierError> = std::result::Result<T, E>;

/// Errors reported by the collaborators of the notifier.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NotifierError {
    /// The platform notification backend couldn't perform an operation.
    #[error(transparent)]
    Platform(Box<dyn std::error::Error + Send + Sync>),

    /// The platform doesn't know about this notification handle (anymore),
    /// e.g. because the user already dismissed the notification.
    #[error("the notification `{0}` is unknown to the platform")]
    UnknownNotification(String),

    /// The settings store couldn't read or write a value.
    #[error(transparent)]
    SettingsStore(Box<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Create a new [`Platform`][Self::Platform] error.
    ///
    /// Shorthand for `NotifierError::Platform(Box::new(error))`.
    #[inline]
    pub fn platform<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Platform(Box::new(error))
    }

    /// Create a new [`SettingsStore`][Self::SettingsStore] error.
    ///
    /// Shorthand for `NotifierError::SettingsStore(Box::new(error))`.
    #[inline]
    pub fn settings_store<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SettingsStore(Box::new(error))
    }
}
