/// Image asset module
///
/// This module handles the image files behind the content bundle:
/// - Background decoding with blurred placeholders (loader.rs)
/// - Startup check of the assets folder (index.rs)

pub mod index;
pub mod loader;
