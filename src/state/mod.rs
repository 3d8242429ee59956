/// State management module
///
/// This module handles all application state, including:
/// - Static portfolio content and facet options (catalog.rs, data.rs)
/// - Filter composition over the catalog (filter.rs)
/// - Per-position image load bookkeeping (load.rs)
/// - The lightbox controller and what it owns while open
///   (lightbox.rs, gesture.rs, zoom.rs, scroll_lock.rs)
/// - A mounted grid page tying these together (view.rs)

pub mod catalog;
pub mod data;
pub mod filter;
pub mod gesture;
pub mod lightbox;
pub mod load;
pub mod scroll_lock;
pub mod view;
pub mod zoom;
