use iced::widget::{column, container, row, stack, text};
use iced::{keyboard, time, Element, Length, Subscription, Task, Theme};
use std::collections::HashSet;
use std::time::{Duration, Instant};

mod assets;
mod config;
mod state;
mod ui;

use assets::loader::{self, DecodedImage, ImageCache, LoadError};
use config::{Settings, ThemeChoice};
use state::catalog::Catalog;
use state::data::GridItem;
use state::filter::{
    CategoryFilter, ExhibitionFilter, FilterSelection, KindFilter, WorkFilter, YearFilter,
};
use state::lightbox::LightboxAction;
use state::load::{request_order, LoadState};
use state::scroll_lock::ScrollLock;
use state::view::CollectionView;
use ui::canvas::PointerEvent;
use ui::filters::Facets;

/// Frame interval while something is cross-fading
const FADE_TICK: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Gallery,
    Works,
    Biography,
    Exhibitions,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Gallery,
        Page::Works,
        Page::Biography,
        Page::Exhibitions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Gallery => "Gallery",
            Page::Works => "Work in progress",
            Page::Biography => "Biography",
            Page::Exhibitions => "Exhibitions",
        }
    }

    /// The image collection shown on this page, if any
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Page::Gallery => Some(Collection::Artworks),
            Page::Works => Some(Collection::Works),
            _ => None,
        }
    }
}

/// The two image grids of the portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Artworks,
    Works,
}

impl Collection {
    const ALL: [Collection; 2] = [Collection::Artworks, Collection::Works];
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Page),
    ToggleTheme,
    /// A grid tile was clicked
    OpenImage(Collection, usize),
    /// Close or step the open lightbox (buttons and keyboard)
    Lightbox(LightboxAction),
    ToggleZoom,
    /// Pointer input on the lightbox image
    Pointer {
        event: PointerEvent,
        half_extent: cgmath::Vector2<f32>,
    },
    /// Background decode finished for a grid position
    ImageLoaded {
        collection: Collection,
        generation: u64,
        position: usize,
        reference: String,
        result: Result<DecodedImage, LoadError>,
    },
    ArtworkYear(YearFilter),
    ArtworkCategory(CategoryFilter),
    ArtworkExhibition(ExhibitionFilter),
    WorkYear(YearFilter),
    WorkKind(KindFilter),
    ResetFilters(Collection),
    /// The filter bar reveal timer of a page visit fired
    RevealFilters { collection: Collection, mount: u64 },
    Tick(Instant),
}

/// Main application state
struct Portfolio {
    catalog: Catalog,
    settings: Settings,
    page: Page,
    facets: Facets,
    scroll_lock: ScrollLock,
    images: ImageCache,
    /// References with a decode in progress
    in_flight: HashSet<String>,
    artworks: CollectionView,
    artwork_filter: FilterSelection,
    works: CollectionView,
    work_filter: WorkFilter,
    /// Clock used by the views for cross-fades
    now: Instant,
}

impl Portfolio {
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load_or_default();

        // The bundle is compiled in; if it does not parse there is nothing to show
        let catalog = Catalog::embedded().expect("Bundled portfolio content is invalid");

        log::info!("📁 Assets directory: {}", settings.assets_dir.display());
        assets::index::scan(&settings.assets_dir, catalog.image_references());

        let facets = Facets {
            years: YearFilter::options(&catalog.years()),
            categories: CategoryFilter::options(&catalog.categories()),
            exhibitions: ExhibitionFilter::options(&catalog.exhibitions()),
            work_years: YearFilter::options(&catalog.work_years()),
            work_kinds: KindFilter::options(&catalog.work_kinds()),
        };

        let scroll_lock = ScrollLock::new();
        let thresholds = settings.gestures;

        (
            Portfolio {
                catalog,
                settings,
                page: Page::Home,
                facets,
                artworks: CollectionView::new(scroll_lock.clone(), thresholds),
                works: CollectionView::new(scroll_lock.clone(), thresholds),
                scroll_lock,
                images: ImageCache::new(),
                in_flight: HashSet::new(),
                artwork_filter: FilterSelection::default(),
                work_filter: WorkFilter::default(),
                now: Instant::now(),
            },
            Task::none(),
        )
    }

    fn view_of(&self, collection: Collection) -> &CollectionView {
        match collection {
            Collection::Artworks => &self.artworks,
            Collection::Works => &self.works,
        }
    }

    fn view_of_mut(&mut self, collection: Collection) -> &mut CollectionView {
        match collection {
            Collection::Artworks => &mut self.artworks,
            Collection::Works => &mut self.works,
        }
    }

    /// The collection of the current page
    fn active(&self) -> Option<Collection> {
        self.page.collection()
    }

    fn lightbox_open(&self) -> bool {
        self.active()
            .is_some_and(|collection| self.view_of(collection).lightbox().is_open())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        self.now = Instant::now();

        match message {
            Message::Navigate(page) => self.navigate(page),

            Message::ToggleTheme => {
                self.settings.theme = match self.settings.theme {
                    ThemeChoice::Light => ThemeChoice::Dark,
                    ThemeChoice::Dark => ThemeChoice::Light,
                };
                if let Err(e) = self.settings.save() {
                    log::warn!("⚠️  Could not save settings: {}", e);
                }
                Task::none()
            }

            Message::OpenImage(collection, position) => {
                if let Err(e) = self.view_of_mut(collection).open(position) {
                    log::warn!("⚠️  {}", e);
                    return Task::none();
                }
                self.sync_lightbox(collection)
            }

            Message::Lightbox(action) => {
                let Some(collection) = self.active() else {
                    return Task::none();
                };
                if self.view_of_mut(collection).lightbox_mut().apply(action) {
                    self.sync_lightbox(collection)
                } else {
                    Task::none()
                }
            }

            Message::ToggleZoom => {
                if let Some(collection) = self.active() {
                    self.view_of_mut(collection).lightbox_mut().toggle_zoom();
                }
                Task::none()
            }

            Message::Pointer { event, half_extent } => self.pointer(event, half_extent),

            Message::ImageLoaded {
                collection,
                generation,
                position,
                reference,
                result,
            } => {
                self.image_loaded(collection, generation, position, reference, result);
                Task::none()
            }

            Message::ArtworkYear(year) => {
                self.artwork_filter.year = year;
                self.refresh(Collection::Artworks)
            }
            Message::ArtworkCategory(category) => {
                self.artwork_filter.category = category;
                self.refresh(Collection::Artworks)
            }
            Message::ArtworkExhibition(exhibition) => {
                self.artwork_filter.exhibition = exhibition;
                self.refresh(Collection::Artworks)
            }
            Message::WorkYear(year) => {
                self.work_filter.year = year;
                self.refresh(Collection::Works)
            }
            Message::WorkKind(kind) => {
                self.work_filter.kind = kind;
                self.refresh(Collection::Works)
            }
            Message::ResetFilters(collection) => {
                match collection {
                    Collection::Artworks => self.artwork_filter.reset(),
                    Collection::Works => self.work_filter.reset(),
                }
                self.refresh(collection)
            }

            Message::RevealFilters { collection, mount } => {
                self.view_of_mut(collection).reveal_filters(mount);
                Task::none()
            }

            Message::Tick(now) => {
                self.now = now;
                Task::none()
            }
        }
    }

    /// Leave the current page and mount the next one
    fn navigate(&mut self, page: Page) -> Task<Message> {
        if page == self.page {
            return Task::none();
        }

        if let Some(collection) = self.active() {
            self.view_of_mut(collection).unmount();
        }
        log::debug!("🧭 {} -> {}", self.page.label(), page.label());
        self.page = page;

        let Some(collection) = page.collection() else {
            return Task::none();
        };

        let mount = self.view_of(collection).mount();
        let delay = Duration::from_millis(self.settings.filter_reveal_delay_ms);
        let reveal = Task::perform(tokio::time::sleep(delay), move |_| {
            Message::RevealFilters { collection, mount }
        });

        Task::batch([self.refresh(collection), reveal])
    }

    /// Re-apply the filters of a collection and request the images it now shows
    fn refresh(&mut self, collection: Collection) -> Task<Message> {
        let (visible, references): (Vec<usize>, Vec<String>) = match collection {
            Collection::Artworks => {
                let artworks = self.catalog.artworks();
                self.artwork_filter
                    .apply_indices(artworks)
                    .into_iter()
                    .map(|index| (index, artworks[index].image().to_string()))
                    .unzip()
            }
            Collection::Works => {
                let works = self.catalog.works();
                self.work_filter
                    .apply_indices(works)
                    .into_iter()
                    .map(|index| (index, works[index].image().to_string()))
                    .unzip()
            }
        };

        let pending = self.view_of_mut(collection).show(visible, references);
        let (eager, rest) = request_order(&pending);

        let eager = self.request_all(collection, &eager);
        let rest = self.request_all(collection, &rest);
        let lightbox = self.sync_lightbox(collection);

        Task::batch([eager.chain(rest), lightbox])
    }

    fn request_all(&mut self, collection: Collection, positions: &[usize]) -> Task<Message> {
        let mut tasks = Vec::new();
        for &position in positions {
            if let Some(task) = self.request(collection, position) {
                tasks.push(task);
            }
        }
        Task::batch(tasks)
    }

    /// Start decoding the image at a grid position unless it is cached or already underway
    fn request(&mut self, collection: Collection, position: usize) -> Option<Task<Message>> {
        let now = self.now;
        let loads = self.view_of(collection).loads();
        let reference = loads.reference(position)?.to_string();
        let generation = loads.generation();

        if let Some(cached) = self.images.get(&reference) {
            let loaded = cached.is_ok();
            self.view_of_mut(collection)
                .loads_mut()
                .complete(generation, position, &reference, loaded, now);
            return None;
        }

        if !self.in_flight.insert(reference.clone()) {
            return None;
        }

        let path = loader::resolve(&self.settings.assets_dir, &reference);
        Some(Task::perform(
            loader::load_image(path),
            image_loaded_message(collection, generation, position, reference),
        ))
    }

    fn image_loaded(
        &mut self,
        collection: Collection,
        generation: u64,
        position: usize,
        reference: String,
        result: Result<DecodedImage, LoadError>,
    ) {
        let now = self.now;
        let loaded = result.is_ok();
        if let Err(e) = &result {
            log::warn!("❌ {}", e);
        }

        self.in_flight.remove(&reference);
        self.images.insert(reference.clone(), result);
        log::debug!("🗂️  {} images cached, {} decoding", self.images.len(), self.in_flight.len());

        self.view_of_mut(collection)
            .loads_mut()
            .complete(generation, position, &reference, loaded, now);

        // Positions bound to the same file since the request was made
        for collection in Collection::ALL {
            let loads = self.view_of_mut(collection).loads_mut();
            let current = loads.generation();
            for position in loads.pending_with(&reference) {
                loads.complete(current, position, &reference, loaded, now);
            }
            self.settle_lightbox(collection);
        }
    }

    /// Make sure the image shown in the lightbox is decoded or on its way
    fn sync_lightbox(&mut self, collection: Collection) -> Task<Message> {
        let Some(position) = self.view_of(collection).lightbox().index() else {
            return Task::none();
        };

        let task = self.request(collection, position).unwrap_or_else(Task::none);
        self.settle_lightbox(collection);
        task
    }

    /// Mark the lightbox image as loaded once its decode result is cached
    fn settle_lightbox(&mut self, collection: Collection) {
        let now = self.now;
        let view = self.view_of(collection);
        let Some(position) = view.lightbox().index() else {
            return;
        };
        if view.lightbox().load_state() != LoadState::Pending {
            return;
        }
        let Some(reference) = view.loads().reference(position) else {
            return;
        };
        let Some(cached) = self.images.get(reference) else {
            return;
        };

        let loaded = cached.is_ok();
        self.view_of_mut(collection)
            .lightbox_mut()
            .complete_load(position, loaded, now);
    }

    fn pointer(&mut self, event: PointerEvent, half_extent: cgmath::Vector2<f32>) -> Task<Message> {
        let Some(collection) = self.active() else {
            return Task::none();
        };
        let at = self.now;
        let lightbox = self.view_of_mut(collection).lightbox_mut();
        let point = |p: iced::Point| cgmath::Point2::new(p.x, p.y);

        match event {
            PointerEvent::Pressed { kind, position } => {
                lightbox.pointer_pressed(kind, point(position), at, half_extent);
            }
            PointerEvent::Moved { position, delta } => {
                let delta = cgmath::Vector2::new(delta.x, delta.y);
                lightbox.pointer_moved(point(position), delta, at, half_extent);
            }
            PointerEvent::Released { position } => {
                let outcome = lightbox.pointer_released(point(position), at);
                log::debug!("👆 Gesture resolved: {:?}", outcome);
                return self.sync_lightbox(collection);
            }
            PointerEvent::Cancelled => lightbox.pointer_cancelled(),
            PointerEvent::Wheel { lines } => {
                lightbox.wheel(lines, half_extent);
            }
            PointerEvent::Pinch { ratio } => {
                lightbox.pinch(ratio, half_extent);
            }
        }
        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content: Element<Message> = match self.page {
            Page::Home => ui::pages::home(&self.catalog),
            Page::Gallery => self.collection_page(Collection::Artworks),
            Page::Works => self.collection_page(Collection::Works),
            Page::Biography => ui::pages::biography(&self.catalog),
            Page::Exhibitions => ui::pages::exhibitions(&self.catalog),
        };

        let body = column![
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(24),
            ui::pages::footer(&self.catalog),
        ];

        let layout = row![ui::pages::sidebar(self.page, self.settings.theme), body];

        match self.lightbox_overlay() {
            Some(overlay) => stack![layout, overlay].into(),
            None => layout.into(),
        }
    }

    fn collection_page(&self, collection: Collection) -> Element<Message> {
        let view = self.view_of(collection);
        let columns = self.settings.grid_columns;
        let locked = self.scroll_lock.is_locked();

        let (title, filters, grid) = match collection {
            Collection::Artworks => (
                "Gallery",
                ui::filters::artworks(&self.facets, &self.artwork_filter),
                ui::gallery::view(
                    self.catalog.artworks(),
                    view,
                    &self.images,
                    collection,
                    columns,
                    locked,
                    self.now,
                ),
            ),
            Collection::Works => (
                "Work in progress",
                ui::filters::works(&self.facets, &self.work_filter),
                ui::gallery::view(
                    self.catalog.works(),
                    view,
                    &self.images,
                    collection,
                    columns,
                    locked,
                    self.now,
                ),
            ),
        };

        let mut page = column![text(title).size(32)].spacing(20);
        if view.filters_revealed() {
            page = page.push(filters);
        }
        page.push(grid).into()
    }

    fn lightbox_overlay(&self) -> Option<Element<Message>> {
        let collection = self.active()?;
        let view = self.view_of(collection);
        let index = view.open_item()?;

        let item: &dyn GridItem = match collection {
            Collection::Artworks => self.catalog.artworks().get(index)? as &dyn GridItem,
            Collection::Works => self.catalog.works().get(index)? as &dyn GridItem,
        };
        let image = self.images.image(item.image());

        Some(ui::lightbox::view(view.lightbox(), item, image, self.now))
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = if self.lightbox_open() {
            keyboard::on_key_press(ui::lightbox::key_action)
        } else {
            Subscription::none()
        };

        let fading = self.active().is_some_and(|collection| {
            let view = self.view_of(collection);
            let lightbox_load = view.lightbox().load_state();
            view.loads().is_fading(self.now)
                || (lightbox_load.is_loaded() && lightbox_load.fade_progress(self.now) < 1.0)
        });
        let ticks = if fading {
            time::every(FADE_TICK).map(Message::Tick)
        } else {
            Subscription::none()
        };

        Subscription::batch([keys, ticks])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.settings.theme {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}

/// Wraps a decode result for the position it was requested for
fn image_loaded_message(
    collection: Collection,
    generation: u64,
    position: usize,
    reference: String,
) -> impl Fn(Result<DecodedImage, LoadError>) -> Message {
    move |result| Message::ImageLoaded {
        collection,
        generation,
        position,
        reference: reference.clone(),
        result,
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Portfolio", Portfolio::update, Portfolio::view)
        .subscription(Portfolio::subscription)
        .theme(Portfolio::theme)
        .centered()
        .run_with(Portfolio::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_loaded_message_keeps_reference() {
        let wrap = image_loaded_message(Collection::Works, 3, 7, "/images/works/7.jpg".to_string());

        for _ in 0..2 {
            let message = wrap(Err(LoadError::Join("cancelled".into())));
            match message {
                Message::ImageLoaded {
                    collection,
                    generation,
                    position,
                    reference,
                    result,
                } => {
                    assert_eq!(collection, Collection::Works);
                    assert_eq!((generation, position), (3, 7));
                    assert_eq!(reference, "/images/works/7.jpg");
                    assert!(result.is_err());
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
    }
}
