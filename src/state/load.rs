//! Image load-state bookkeeping for the grids
//!
//! States are keyed by position in the rendered list, not by artwork id.
//! When a filter change puts a different image at a position, that position
//! goes back to `Pending` even if the image was already shown elsewhere.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cross-fade from placeholder to image
pub const FADE_DURATION: Duration = Duration::from_millis(300);
/// Positions requested before the rest of the grid
pub const EAGER_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded { at: Instant },
    /// Terminal; the grid shows a fallback tile
    Failed,
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded { .. })
    }

    /// Opacity of the real image, 0.0 to 1.0
    pub fn fade_progress(&self, now: Instant) -> f32 {
        match self {
            LoadState::Loaded { at } => {
                let elapsed = now.saturating_duration_since(*at).as_secs_f32();
                (elapsed / FADE_DURATION.as_secs_f32()).min(1.0)
            }
            _ => 0.0,
        }
    }
}

/// Load states of one rendered grid
#[derive(Debug, Clone, Default)]
pub struct LoadStates {
    /// Image reference bound to each position
    bound: Vec<String>,
    states: HashMap<usize, LoadState>,
    /// Bumped whenever the bound list changes; stale completions carry an old value
    generation: u64,
}

impl LoadStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn get(&self, position: usize) -> LoadState {
        self.states.get(&position).copied().unwrap_or(LoadState::Pending)
    }

    /// Bind a new rendered list.
    ///
    /// Positions whose image reference changed are reset to `Pending`.
    /// Returns the positions that need a load request, eager ones first.
    pub fn rebind(&mut self, references: Vec<String>) -> Vec<usize> {
        self.generation += 1;

        for (position, reference) in references.iter().enumerate() {
            if self.bound.get(position) != Some(reference) {
                self.states.remove(&position);
            }
        }
        self.states.retain(|&position, _| position < references.len());
        self.bound = references;

        let pending: Vec<usize> = (0..self.bound.len())
            .filter(|&position| self.get(position) == LoadState::Pending)
            .collect();

        if !pending.is_empty() {
            log::debug!(
                "🖼️  {} of {} grid positions pending (generation {})",
                pending.len(),
                self.bound.len(),
                self.generation
            );
        }

        pending
    }

    /// The image reference at a position
    pub fn reference(&self, position: usize) -> Option<&str> {
        self.bound.get(position).map(String::as_str)
    }

    /// Record a decode result. Ignored when it belongs to an older
    /// generation or no longer matches the bound reference.
    pub fn complete(
        &mut self,
        generation: u64,
        position: usize,
        reference: &str,
        loaded: bool,
        now: Instant,
    ) -> bool {
        if generation != self.generation || self.reference(position) != Some(reference) {
            log::debug!("⏭️  Ignoring stale load result for position {}", position);
            return false;
        }

        let state = if loaded {
            LoadState::Loaded { at: now }
        } else {
            LoadState::Failed
        };
        self.states.insert(position, state);
        true
    }

    /// Pending positions bound to `reference`
    pub fn pending_with(&self, reference: &str) -> Vec<usize> {
        self.bound
            .iter()
            .enumerate()
            .filter(|(position, bound)| {
                bound.as_str() == reference && self.get(*position) == LoadState::Pending
            })
            .map(|(position, _)| position)
            .collect()
    }

    /// True while any position is mid cross-fade
    pub fn is_fading(&self, now: Instant) -> bool {
        self.states.values().any(|state| {
            state.is_loaded() && state.fade_progress(now) < 1.0
        })
    }

    /// Forget everything (the view was left)
    pub fn clear(&mut self) {
        self.generation += 1;
        self.bound.clear();
        self.states.clear();
    }
}

/// Eager positions first, then the rest in order
pub fn request_order(pending: &[usize]) -> (Vec<usize>, Vec<usize>) {
    pending.iter().copied().partition(|&position| position < EAGER_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_all_positions_start_pending() {
        let mut loads = LoadStates::new();
        let pending = loads.rebind(refs(&["a", "b", "c"]));
        assert_eq!(pending, vec![0, 1, 2]);
        assert_eq!(loads.get(1), LoadState::Pending);
    }

    #[test]
    fn test_complete_marks_loaded_or_failed() {
        let mut loads = LoadStates::new();
        loads.rebind(refs(&["a", "b"]));
        let now = Instant::now();
        let generation = loads.generation();

        assert!(loads.complete(generation, 0, "a", true, now));
        assert!(loads.complete(generation, 1, "b", false, now));

        assert!(loads.get(0).is_loaded());
        assert_eq!(loads.get(1), LoadState::Failed);
        assert_eq!(loads.get(1).fade_progress(now), 0.0);
    }

    #[test]
    fn test_reshuffle_resets_changed_positions() {
        let mut loads = LoadStates::new();
        loads.rebind(refs(&["a", "b", "c"]));
        let now = Instant::now();
        let generation = loads.generation();
        for (position, reference) in ["a", "b", "c"].iter().enumerate() {
            loads.complete(generation, position, reference, true, now);
        }

        // "c" moves to position 1: it was loaded, but position 1 flashes again
        let pending = loads.rebind(refs(&["a", "c"]));
        assert_eq!(pending, vec![1]);
        assert!(loads.get(0).is_loaded());
        assert_eq!(loads.get(1), LoadState::Pending);
        assert_eq!(loads.get(2), LoadState::Pending);
        assert_eq!(loads.len(), 2);
    }

    #[test]
    fn test_stale_results_are_ignored() {
        let mut loads = LoadStates::new();
        loads.rebind(refs(&["a", "b"]));
        let old_generation = loads.generation();

        loads.rebind(refs(&["b"]));
        assert!(!loads.complete(old_generation, 0, "a", true, Instant::now()));

        // Right generation, wrong image
        assert!(!loads.complete(loads.generation(), 0, "a", true, Instant::now()));
        assert_eq!(loads.get(0), LoadState::Pending);

        loads.clear();
        assert_eq!(loads.len(), 0);
    }

    #[test]
    fn test_fade_progress() {
        let start = Instant::now();
        let state = LoadState::Loaded { at: start };

        assert_eq!(state.fade_progress(start), 0.0);
        assert!((state.fade_progress(start + FADE_DURATION / 2) - 0.5).abs() < 1e-3);
        assert_eq!(state.fade_progress(start + FADE_DURATION * 2), 1.0);

        let mut loads = LoadStates::new();
        loads.rebind(refs(&["a"]));
        loads.complete(loads.generation(), 0, "a", true, start);
        assert!(loads.is_fading(start + FADE_DURATION / 3));
        assert!(!loads.is_fading(start + FADE_DURATION));
    }

    #[test]
    fn test_pending_with_finds_shared_references() {
        let mut loads = LoadStates::new();
        loads.rebind(refs(&["a", "b", "a"]));
        assert_eq!(loads.pending_with("a"), vec![0, 2]);

        loads.complete(loads.generation(), 0, "a", true, Instant::now());
        assert_eq!(loads.pending_with("a"), vec![2]);
        assert!(loads.pending_with("zzz").is_empty());
    }

    #[test]
    fn test_request_order_puts_eager_first() {
        let (eager, rest) = request_order(&[0, 2, 3, 5, 8]);
        assert_eq!(eager, vec![0, 2, 3]);
        assert_eq!(rest, vec![5, 8]);
    }
}
