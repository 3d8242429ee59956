//! Page scroll lock held while a modal view is on screen

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared flag telling the page grid to stop scrolling.
///
/// The flag is only ever changed through [`ScrollLockGuard`]: acquiring a
/// guard locks, dropping the last guard unlocks.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        let previous = self.holders.fetch_add(1, Ordering::SeqCst);
        if previous == 0 {
            log::debug!("🔒 Page scroll locked");
        }
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }
}

/// Releases the scroll lock on drop
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let previous = self.holders.fetch_sub(1, Ordering::SeqCst);
        if previous == 1 {
            log::debug!("🔓 Page scroll unlocked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let lock = ScrollLock::new();
        assert!(!lock.is_locked());

        let guard = lock.acquire();
        assert!(lock.is_locked());

        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_clones_share_state() {
        let lock = ScrollLock::new();
        let observer = lock.clone();

        let first = lock.acquire();
        let second = observer.acquire();
        drop(first);
        assert!(observer.is_locked());

        drop(second);
        assert!(!lock.is_locked());
    }
}
