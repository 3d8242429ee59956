//! A mounted grid page: the rendered list, its load states and its lightbox

use super::gesture::GestureThresholds;
use super::lightbox::{Lightbox, LightboxError};
use super::load::LoadStates;
use super::scroll_lock::ScrollLock;

#[derive(Debug)]
pub struct CollectionView {
    /// Catalog indices of the rendered items, in display order
    visible: Vec<usize>,
    loads: LoadStates,
    lightbox: Lightbox,
    filters_revealed: bool,
    /// Bumped on every unmount so that timers of a previous visit are ignored
    mount: u64,
}

impl CollectionView {
    pub fn new(scroll_lock: ScrollLock, thresholds: GestureThresholds) -> Self {
        Self {
            visible: Vec::new(),
            loads: LoadStates::new(),
            lightbox: Lightbox::new(scroll_lock, thresholds),
            filters_revealed: false,
            mount: 0,
        }
    }

    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn loads(&self) -> &LoadStates {
        &self.loads
    }

    pub fn loads_mut(&mut self) -> &mut LoadStates {
        &mut self.loads
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    /// Replace the rendered list after a filter change.
    ///
    /// `references` holds the image reference of each visible item.
    /// Returns the grid positions that need a load request.
    pub fn show(&mut self, visible: Vec<usize>, references: Vec<String>) -> Vec<usize> {
        debug_assert_eq!(visible.len(), references.len());
        let shown = self.open_item();
        self.visible = visible;
        self.lightbox.sync_len(self.visible.len());
        if self.lightbox.is_open() && self.open_item() != shown {
            self.lightbox.retarget();
        }
        self.loads.rebind(references)
    }

    /// Open the lightbox on a grid position
    pub fn open(&mut self, position: usize) -> Result<(), LightboxError> {
        self.lightbox.open(position, self.visible.len())
    }

    /// Catalog index of the image shown in the lightbox
    pub fn open_item(&self) -> Option<usize> {
        self.lightbox
            .index()
            .and_then(|position| self.visible.get(position).copied())
    }

    pub fn filters_revealed(&self) -> bool {
        self.filters_revealed
    }

    pub fn mount(&self) -> u64 {
        self.mount
    }

    /// Reveal the filter bar if the timer belongs to the current visit
    pub fn reveal_filters(&mut self, mount: u64) -> bool {
        if mount != self.mount {
            return false;
        }
        self.filters_revealed = true;
        true
    }

    /// The page was left: drop everything scoped to this visit
    pub fn unmount(&mut self) {
        self.lightbox.close();
        self.loads.clear();
        self.visible.clear();
        self.filters_revealed = false;
        self.mount += 1;
    }
}
