/// User interface module
///
/// Views are plain functions over application state:
/// - Navigation, static pages and footer (pages.rs)
/// - Filter bars (filters.rs)
/// - Image grid with load states (gallery.rs)
/// - Lightbox overlay and keyboard shortcuts (lightbox.rs)
/// - Canvas surface drawing the zoomed image and reading pointer input (canvas.rs)

pub mod canvas;
pub mod filters;
pub mod gallery;
pub mod lightbox;
pub mod pages;
