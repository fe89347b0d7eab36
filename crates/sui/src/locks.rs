//! Expiring in-process locks on object ids.
//!
//! Two transactions built concurrently from the same process must not
//! reference the same gas coin or the same owned object version. A lock
//! older than the manager's timeout is treated as released.

use anyhow::{Result, anyhow};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use sui_sdk_types as sui;
use tracing::debug;

use crate::constants::{COIN_LOCK_TIMEOUT_SECS, OBJECT_LOCK_TIMEOUT_SECS};

/// Released when dropped.
pub struct LockGuard<K: Eq + Hash + Copy + Display> {
    manager: LockManager<K>,
    key: K,
    token: u64,
}

impl<K: Eq + Hash + Copy + Display> LockGuard<K> {
    pub fn key(&self) -> K {
        self.key
    }
}

impl<K: Eq + Hash + Copy + Display> Drop for LockGuard<K> {
    fn drop(&mut self) {
        self.manager.release(self.key, self.token);
    }
}

/// When a lock was taken and the token of the guard that took it.
#[derive(Clone, Copy)]
struct Held {
    locked_at: Instant,
    token: u64,
}

#[derive(Clone)]
pub struct LockManager<K: Eq + Hash + Copy + Display> {
    name: &'static str,
    locks: Arc<Mutex<HashMap<K, Held>>>,
    next_token: Arc<AtomicU64>,
    lock_timeout: Duration,
}

impl<K: Eq + Hash + Copy + Display> LockManager<K> {
    pub fn new(name: &'static str, lock_timeout: Duration) -> Self {
        Self {
            name,
            locks: Arc::new(Mutex::new(HashMap::new())),
            next_token: Arc::new(AtomicU64::new(0)),
            lock_timeout,
        }
    }

    fn purge_expired(&self, locks: &mut HashMap<K, Held>, now: Instant) {
        locks.retain(|_, held| now.duration_since(held.locked_at) < self.lock_timeout);
    }

    /// `None` when `key` is held by someone else.
    pub fn try_lock(&self, key: K) -> Option<LockGuard<K>> {
        let mut locks = self.locks.lock();
        let now = Instant::now();
        self.purge_expired(&mut locks, now);

        match locks.entry(key) {
            Entry::Occupied(_) => {
                debug!("{} {} is already locked", self.name, key);
                None
            }
            Entry::Vacant(entry) => {
                let token = self.next_token.fetch_add(1, Ordering::Relaxed);
                entry.insert(Held {
                    locked_at: now,
                    token,
                });
                Some(LockGuard {
                    manager: self.clone(),
                    key,
                    token,
                })
            }
        }
    }

    /// Retry with a linearly growing delay until the lock is free.
    pub async fn lock_with_retry(&self, key: K, max_retries: u32) -> Result<LockGuard<K>> {
        const RETRY_DELAY_MS: u64 = 100;

        for attempt in 1..=max_retries {
            if let Some(guard) = self.try_lock(key) {
                return Ok(guard);
            }
            if attempt < max_retries {
                debug!(
                    "{} {} is locked, retrying (attempt {}/{})",
                    self.name, key, attempt, max_retries
                );
                tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64)).await;
            }
        }
        Err(anyhow!(
            "Failed to lock {} {} after {} attempts",
            self.name,
            key,
            max_retries
        ))
    }

    pub fn is_locked(&self, key: K) -> bool {
        let mut locks = self.locks.lock();
        self.purge_expired(&mut locks, Instant::now());
        locks.contains_key(&key)
    }

    /// Only the guard that holds the current entry may remove it. A guard
    /// whose lock expired and was taken over leaves the new holder alone.
    fn release(&self, key: K, token: u64) {
        let mut locks = self.locks.lock();
        match locks.get(&key) {
            Some(held) if held.token == token => {
                locks.remove(&key);
                debug!("Released lock on {} {}", self.name, key);
            }
            Some(_) => debug!(
                "Lock on {} {} expired and is now held by another caller",
                self.name, key
            ),
            None => {}
        }
    }
}

pub type ObjectLockGuard = LockGuard<sui::Address>;

static COIN_LOCKS: OnceLock<LockManager<sui::Address>> = OnceLock::new();
static OBJECT_LOCKS: OnceLock<LockManager<sui::Address>> = OnceLock::new();

pub fn coin_locks() -> &'static LockManager<sui::Address> {
    COIN_LOCKS.get_or_init(|| {
        LockManager::new("coin", Duration::from_secs(COIN_LOCK_TIMEOUT_SECS))
    })
}

pub fn object_locks() -> &'static LockManager<sui::Address> {
    OBJECT_LOCKS.get_or_init(|| {
        LockManager::new("object", Duration::from_secs(OBJECT_LOCK_TIMEOUT_SECS))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_guard_releases_on_drop() {
        let manager = LockManager::new("object", Duration::from_secs(1));
        let id = sui::Address::from_str("0x123").unwrap();

        let first = manager.try_lock(id);
        assert!(first.is_some());
        assert!(manager.try_lock(id).is_none());
        assert!(manager.is_locked(id));

        drop(first);
        assert!(!manager.is_locked(id));
        assert!(manager.try_lock(id).is_some());
    }

    #[test]
    fn test_lock_expires() {
        let manager = LockManager::new("coin", Duration::from_millis(0));
        let id = sui::Address::from_str("0x456").unwrap();

        let _held = manager.try_lock(id);
        std::thread::sleep(Duration::from_millis(5));
        assert!(manager.try_lock(id).is_some());
    }

    #[test]
    fn test_expired_guard_does_not_release_new_holder() {
        let manager = LockManager::new("coin", Duration::from_millis(50));
        let id = sui::Address::from_str("0xabc").unwrap();

        let stale = manager.try_lock(id).unwrap();
        std::thread::sleep(Duration::from_millis(80));
        let second = manager.try_lock(id).unwrap();

        drop(stale);
        assert!(manager.is_locked(id));
        assert!(manager.try_lock(id).is_none());

        drop(second);
        assert!(!manager.is_locked(id));
    }

    #[tokio::test]
    async fn test_lock_with_retry_gives_up() {
        let manager = LockManager::new("object", Duration::from_secs(5));
        let id = sui::Address::from_str("0x789").unwrap();

        let _held = manager.try_lock(id);
        assert!(manager.lock_with_retry(id, 2).await.is_err());
    }
}
