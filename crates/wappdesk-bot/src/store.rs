// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide conversation store with per-phone mutual exclusion.
//!
//! Two webhook deliveries for the same phone are processed strictly one
//! after the other; different phones proceed fully in parallel. The raw map
//! is never exposed: callers get scoped access through [`ConversationStore::acquire`].
//!
//! A background sweep evicts conversations idle past the configured timeout.
//! The sweep skips any entry whose lock is currently held, so it can never
//! evict a conversation mid-transition.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::machine::Conversation;

/// Keyed conversation state table (canonical phone -> conversation).
pub struct ConversationStore {
    entries: DashMap<String, Arc<Mutex<Conversation>>>,
    idle_timeout: Duration,
}

impl ConversationStore {
    /// New store evicting conversations idle longer than `idle_timeout`.
    pub fn new(idle_timeout: Duration) -> Arc<Self> {
        Arc::new(Self {
            entries: DashMap::new(),
            idle_timeout,
        })
    }

    /// Acquire the per-phone lock, creating a fresh idle conversation if the
    /// phone has none.
    ///
    /// Two invariants hold on return:
    /// - the guarded entry is the one currently in the map (an entry swept
    ///   away while we waited for its lock is detected and retried), and
    /// - the conversation is not stale: one idle past the timeout is reset
    ///   in place, so a message arriving before the sweep still starts a
    ///   fresh conversation.
    pub async fn acquire(&self, phone: &str) -> OwnedMutexGuard<Conversation> {
        loop {
            let entry = self
                .entries
                .entry(phone.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Conversation::new(phone))))
                .clone();
            let mut guard = entry.clone().lock_owned().await;

            let still_current = self
                .entries
                .get(phone)
                .is_some_and(|current| Arc::ptr_eq(current.value(), &entry));
            if !still_current {
                continue;
            }

            if guard.idle_for() > self.idle_timeout {
                debug!(phone, "resetting stale conversation");
                *guard = Conversation::new(phone);
            }
            return guard;
        }
    }

    /// Number of live conversations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove conversations idle past the timeout. Entries whose lock is
    /// held (an in-flight transition) are left alone. Returns the number of
    /// evicted conversations.
    pub fn sweep(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| match entry.try_lock() {
            Ok(guard) => guard.idle_for() <= self.idle_timeout,
            Err(_) => true,
        });
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, "swept idle conversations");
        }
        removed
    }

    /// Spawn the periodic sweep task. Owned by the store's lifecycle:
    /// started on init, stopped via [`SweeperHandle::shutdown`].
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> SweeperHandle {
        let store = self.clone();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(interval);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick fires immediately; skip it.
            tick.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tick.tick() => {
                        store.sweep();
                    }
                }
            }
            debug!("conversation sweeper stopped");
        });
        info!(interval_secs = interval.as_secs(), "conversation sweeper started");
        SweeperHandle { cancel, handle }
    }
}

/// Handle to the running sweep task.
pub struct SweeperHandle {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweep task and wait for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}
