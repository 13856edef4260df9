//! Application shell: routing, page lifecycle and async wiring
//!
//! Every navigation mounts a fresh page with a new `MountId`. Requests are
//! issued as `Task`s whose result messages carry that id; `update` drops
//! any result whose id is no longer current.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use iced::widget::image::Handle;
use iced::{Element, Subscription, Task, Theme};
use tracing::{debug, info};

use crate::api::{CatalogClient, Envelope};
use crate::config::StorefrontConfig;
use crate::route::Route;
use crate::state::animation::{IndicatorStyle, LoadingIndicator, Reveal};
use crate::state::catalog::{CatalogView, Filter};
use crate::state::data::Product;
use crate::state::detail::{DetailPhase, DetailView, NextStep};
use crate::state::hero::{self, Carousel};
use crate::state::MountId;
use crate::ui;

const APP_TITLE: &str = "Golden Extreme Auto Spare Parts";
/// Redraw cadence while something is animating
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Mount the page for a route
    Navigate(Route),
    /// Catalog page: product list arrived
    ProductsLoaded(MountId, Envelope<Vec<Product>>),
    /// Detail page: ordering list arrived (first request)
    DetailCatalogLoaded(MountId, Envelope<Vec<Product>>),
    /// Detail page: the product itself arrived (second request)
    DetailProductLoaded(MountId, Envelope<Product>),
    /// Product artwork download finished
    ArtworkLoaded(String, Envelope<Vec<u8>>),
    SelectFilter(Filter),
    LoadMore,
    PreviousProduct,
    NextProduct,
    OpenDetails,
    CloseDetails,
    /// Dot navigation on the carousel
    SlideSelected(usize),
    /// Automatic carousel advance
    SlideTimer,
    /// Animation frame
    Tick(Instant),
}

/// The currently mounted page
#[derive(Debug)]
pub enum Page {
    Home {
        carousel: Carousel,
        banner: Reveal,
        /// Covers the carousel until its content delay has passed
        indicator: LoadingIndicator,
    },
    Catalog {
        view: CatalogView,
        indicator: LoadingIndicator,
    },
    Product {
        view: DetailView,
        indicator: LoadingIndicator,
    },
}

#[derive(Debug, Clone)]
enum Artwork {
    Pending,
    Ready(Handle),
    Failed,
}

/// Downloaded product artwork, keyed by image URL
///
/// Shared across pages: an image fetched for the grid is reused by the
/// detail page. Failed downloads are remembered and not retried.
#[derive(Debug, Default)]
pub struct ArtworkCache {
    entries: HashMap<String, Artwork>,
}

impl ArtworkCache {
    /// Mark `url` as requested; false if it is already known
    fn begin(&mut self, url: &str) -> bool {
        if url.is_empty() || self.entries.contains_key(url) {
            return false;
        }
        self.entries.insert(url.to_string(), Artwork::Pending);
        true
    }

    fn finish(&mut self, url: String, response: Envelope<Vec<u8>>) {
        let entry = match response {
            Envelope::Success(bytes) => Artwork::Ready(Handle::from_bytes(bytes)),
            Envelope::Failure(_) => Artwork::Failed,
        };
        self.entries.insert(url, entry);
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        match self.entries.get(url) {
            Some(Artwork::Ready(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn is_pending(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(Artwork::Pending))
    }
}

/// Main application state
pub struct Storefront {
    client: CatalogClient,
    route: Route,
    page: Page,
    mount: MountId,
    artwork: ArtworkCache,
    logo: Handle,
    /// Hero slide images keyed by their asset path
    slide_images: HashMap<&'static str, Handle>,
    /// Time of the last animation frame
    now: Instant,
}

impl Storefront {
    /// Create the application on the landing page
    pub fn new(config: StorefrontConfig, client: CatalogClient) -> (Self, Task<Message>) {
        let slide_images = hero::default_slides()
            .iter()
            .map(|slide| (slide.image, Handle::from_path(config.asset_dir.join(slide.image))))
            .collect();

        info!(api = %client.base_url(), assets = %config.asset_dir.display(), "storefront starting");

        let now = Instant::now();
        let app = Self {
            client,
            route: Route::Home,
            page: Page::Home {
                carousel: Carousel::new(hero::default_slides(), now),
                banner: Reveal::new(now),
                indicator: LoadingIndicator::new(IndicatorStyle::Spinner, now),
            },
            mount: MountId::default(),
            artwork: ArtworkCache::default(),
            logo: Handle::from_path(config.logo_path()),
            slide_images,
            now,
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        let page = match &self.page {
            Page::Home { .. } => return APP_TITLE.to_string(),
            Page::Catalog { view, .. } => view.category().title.to_string(),
            Page::Product { view, .. } => match view.product() {
                Some(product) => product.name.clone(),
                None => "Product".to_string(),
            },
        };
        format!("{page} | {APP_TITLE}")
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.mount(route),

            Message::ProductsLoaded(mount, response) => {
                if self.is_stale(mount, "product list") {
                    return Task::none();
                }
                let Page::Catalog { view, .. } = &mut self.page else {
                    return Task::none();
                };
                view.apply_products(response);
                self.request_catalog_artwork()
            }

            Message::DetailCatalogLoaded(mount, response) => {
                if self.is_stale(mount, "catalog ordering") {
                    return Task::none();
                }
                let Page::Product { view, .. } = &mut self.page else {
                    return Task::none();
                };
                match view.apply_catalog(response) {
                    NextStep::FetchProduct(id) => {
                        let client = self.client.clone();
                        Task::perform(
                            async move { client.get_product_by_id(&id).await },
                            move |response| Message::DetailProductLoaded(mount, response),
                        )
                    }
                    NextStep::Done => Task::none(),
                }
            }

            Message::DetailProductLoaded(mount, response) => {
                if self.is_stale(mount, "product") {
                    return Task::none();
                }
                let Page::Product { view, .. } = &mut self.page else {
                    return Task::none();
                };
                view.apply_product(response);
                match view.product().map(|p| p.image.clone()) {
                    Some(url) => self.request_artwork(url),
                    None => Task::none(),
                }
            }

            Message::ArtworkLoaded(url, response) => {
                if let Envelope::Failure(error) = &response {
                    debug!(url = %url, %error, "artwork unavailable");
                }
                self.artwork.finish(url, response);
                Task::none()
            }

            Message::SelectFilter(filter) => {
                if let Page::Catalog { view, .. } = &mut self.page {
                    view.select_filter(filter);
                }
                self.request_catalog_artwork()
            }

            Message::LoadMore => {
                if let Page::Catalog { view, .. } = &mut self.page {
                    view.load_more();
                }
                self.request_catalog_artwork()
            }

            Message::PreviousProduct | Message::NextProduct => {
                let target = match &self.page {
                    Page::Product { view, .. } => {
                        if matches!(message, Message::PreviousProduct) {
                            view.prev_target().map(str::to_string)
                        } else {
                            view.next_target().map(str::to_string)
                        }
                    }
                    _ => None,
                };
                match target {
                    Some(id) => self.mount(Route::Product(id)),
                    None => Task::none(),
                }
            }

            Message::OpenDetails => {
                if let Page::Product { view, .. } = &mut self.page {
                    view.open_modal();
                }
                Task::none()
            }

            Message::CloseDetails => {
                if let Page::Product { view, .. } = &mut self.page {
                    view.close_modal();
                }
                Task::none()
            }

            Message::SlideSelected(index) => {
                self.now = Instant::now();
                if let Page::Home { carousel, .. } = &mut self.page {
                    carousel.select(index, self.now);
                }
                Task::none()
            }

            Message::SlideTimer => {
                self.now = Instant::now();
                if let Page::Home { carousel, .. } = &mut self.page {
                    carousel.advance(self.now);
                }
                Task::none()
            }

            Message::Tick(now) => {
                self.now = now;
                Task::none()
            }
        }
    }

    /// Build the user interface
    pub fn view(&self) -> Element<'_, Message> {
        let content = match &self.page {
            Page::Home {
                carousel,
                banner,
                indicator,
            } => {
                let spinner = ui::spinner::view(&self.logo, indicator.style(), indicator.frame(self.now));
                ui::hero::view(carousel, banner, &self.slide_images, spinner, self.now)
            }
            Page::Catalog { view, indicator } => {
                let spinner = ui::spinner::view(&self.logo, indicator.style(), indicator.frame(self.now));
                ui::catalog::view(view, &self.artwork, spinner)
            }
            Page::Product { view, indicator } => {
                let spinner = ui::spinner::view(&self.logo, indicator.style(), indicator.frame(self.now));
                ui::detail::view(view, &self.artwork, spinner)
            }
        };
        ui::shell::view(&self.route, content)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();
        // The timer identity does not change on manual selection, so the
        // automatic cadence is never reset by the dots.
        if matches!(self.page, Page::Home { .. }) {
            subscriptions.push(iced::time::every(hero::SLIDE_INTERVAL).map(|_| Message::SlideTimer));
        }
        if self.animating() {
            subscriptions.push(iced::time::every(FRAME_INTERVAL).map(Message::Tick));
        }
        Subscription::batch(subscriptions)
    }

    pub fn theme(&self) -> Theme {
        ui::style::theme()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    /// Replace the current page with the one for `route`
    fn mount(&mut self, route: Route) -> Task<Message> {
        self.mount = self.mount.next();
        self.now = Instant::now();
        let mount = self.mount;
        let now = self.now;
        info!(route = %route, "navigating");

        let (page, task) = match &route {
            Route::Home => (
                Page::Home {
                    carousel: Carousel::new(hero::default_slides(), now),
                    banner: Reveal::new(now),
                    indicator: LoadingIndicator::new(IndicatorStyle::Spinner, now),
                },
                Task::none(),
            ),
            Route::Catalog(category) => {
                let client = self.client.clone();
                let task = Task::perform(
                    async move { client.get_products().await },
                    move |response| Message::ProductsLoaded(mount, response),
                );
                (
                    Page::Catalog {
                        view: CatalogView::new(*category),
                        indicator: LoadingIndicator::new(IndicatorStyle::Spinner, now),
                    },
                    task,
                )
            }
            Route::Product(id) => {
                let (view, fetch) = DetailView::new(id.clone());
                let task = if fetch {
                    let client = self.client.clone();
                    Task::perform(
                        async move { client.get_products().await },
                        move |response| Message::DetailCatalogLoaded(mount, response),
                    )
                } else {
                    Task::none()
                };
                (
                    Page::Product {
                        view,
                        indicator: LoadingIndicator::new(IndicatorStyle::Pulse, now),
                    },
                    task,
                )
            }
        };

        self.route = route;
        self.page = page;
        task
    }

    fn is_stale(&self, mount: MountId, what: &str) -> bool {
        if mount == self.mount {
            return false;
        }
        debug!(?mount, current = ?self.mount, what, "dropping stale response");
        true
    }

    /// Fetch artwork for every product currently shown in the grid
    fn request_catalog_artwork(&mut self) -> Task<Message> {
        let Page::Catalog { view, .. } = &self.page else {
            return Task::none();
        };
        let urls: Vec<String> = view.displayed().iter().map(|p| p.image.clone()).collect();
        Task::batch(urls.into_iter().map(|url| self.request_artwork(url)))
    }

    fn request_artwork(&mut self, url: String) -> Task<Message> {
        if !self.artwork.begin(&url) {
            return Task::none();
        }
        let client = self.client.clone();
        Task::perform(
            async move {
                let response = client.fetch_image(&url).await;
                (url, response)
            },
            |(url, response)| Message::ArtworkLoaded(url, response),
        )
    }

    fn animating(&self) -> bool {
        match &self.page {
            Page::Home {
                carousel,
                banner,
                ..
            } => {
                !carousel.content_ready(self.now)
                    || carousel.animating(self.now)
                    || !banner.finished(hero::BANNER_BLOCKS, self.now)
            }
            Page::Catalog { view, .. } => view.is_loading(),
            Page::Product { view, .. } => {
                matches!(view.phase(), DetailPhase::Loading)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::Phase;
    use crate::state::data::Category;

    fn app() -> Storefront {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        let client = CatalogClient::new(config.api_base_url.clone()).unwrap();
        let (app, _) = Storefront::new(config, client);
        app
    }

    fn product(id: &str, category: &str, subcategory: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            image: String::new(),
            description: String::new(),
            specifications: None,
        }
    }

    fn batteries(n: usize) -> Envelope<Vec<Product>> {
        Envelope::Success(
            (0..n)
                .map(|i| product(&format!("b{i}"), "battery", "AGM"))
                .collect(),
        )
    }

    fn catalog_view(app: &Storefront) -> &CatalogView {
        match app.page() {
            Page::Catalog { view, .. } => view,
            other => panic!("expected catalog page, got {other:?}"),
        }
    }

    fn detail_view(app: &Storefront) -> &DetailView {
        match app.page() {
            Page::Product { view, .. } => view,
            other => panic!("expected product page, got {other:?}"),
        }
    }

    #[test]
    fn test_starts_on_home() {
        let app = app();
        assert_eq!(app.route(), &Route::Home);
        assert!(matches!(app.page(), Page::Home { .. }));
        assert_eq!(app.title(), APP_TITLE);
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::Catalog(Category::BATTERIES)));
        let old = app.mount_id();
        let _ = app.update(Message::Navigate(Route::Catalog(Category::TYRES)));
        assert_ne!(app.mount_id(), old);

        let _ = app.update(Message::ProductsLoaded(old, batteries(3)));
        assert!(catalog_view(&app).is_loading());

        let _ = app.update(Message::ProductsLoaded(app.mount_id(), batteries(3)));
        let view = catalog_view(&app);
        assert_eq!(view.phase(), &Phase::Ready);
        assert_eq!(view.filtered_count(), 0, "tyre page ignores batteries");
    }

    #[test]
    fn test_catalog_pagination_through_messages() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::Catalog(Category::BATTERIES)));
        let _ = app.update(Message::ProductsLoaded(app.mount_id(), batteries(23)));
        assert_eq!(catalog_view(&app).displayed_count(), 10);

        let _ = app.update(Message::LoadMore);
        let _ = app.update(Message::LoadMore);
        assert_eq!(catalog_view(&app).displayed_count(), 23);
        assert!(!catalog_view(&app).has_more());

        let _ = app.update(Message::SelectFilter(Filter::Subcategory("AGM".to_string())));
        assert_eq!(catalog_view(&app).cursor(), 10);
        assert_eq!(app.title(), "Batteries | Golden Extreme Auto Spare Parts");
    }

    #[test]
    fn test_detail_flow_and_neighbor_navigation() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::Product("b1".to_string())));
        let mount = app.mount_id();

        let _ = app.update(Message::DetailCatalogLoaded(mount, batteries(3)));
        assert!(detail_view(&app).is_loading());

        let _ = app.update(Message::DetailProductLoaded(
            mount,
            Envelope::Success(product("b1", "battery", "AGM")),
        ));
        assert_eq!(detail_view(&app).product().map(|p| p.id.as_str()), Some("b1"));
        assert_eq!(app.title(), "Product b1 | Golden Extreme Auto Spare Parts");

        let _ = app.update(Message::OpenDetails);
        assert!(detail_view(&app).modal_open());
        let _ = app.update(Message::CloseDetails);
        assert!(!detail_view(&app).modal_open());

        let _ = app.update(Message::NextProduct);
        assert_eq!(app.route(), &Route::Product("b2".to_string()));
        assert_ne!(app.mount_id(), mount);
        assert!(detail_view(&app).is_loading());

        // The previous product's response arrives late
        let _ = app.update(Message::DetailProductLoaded(
            mount,
            Envelope::Success(product("b1", "battery", "AGM")),
        ));
        assert!(detail_view(&app).is_loading());
    }

    #[test]
    fn test_next_disabled_on_last_product() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::Product("b2".to_string())));
        let mount = app.mount_id();
        let _ = app.update(Message::DetailCatalogLoaded(mount, batteries(3)));
        let _ = app.update(Message::NextProduct);
        assert_eq!(app.mount_id(), mount);
        assert_eq!(app.route(), &Route::Product("b2".to_string()));
    }

    #[test]
    fn test_empty_id_needs_no_request() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::Product(String::new())));
        assert_eq!(
            detail_view(&app).phase(),
            &DetailPhase::Failed("Product ID is required".to_string())
        );
    }

    #[test]
    fn test_slide_messages_only_touch_home() {
        let mut app = app();
        let _ = app.update(Message::SlideSelected(2));
        match app.page() {
            Page::Home { carousel, .. } => assert_eq!(carousel.current(), 2),
            other => panic!("expected home page, got {other:?}"),
        }
        let _ = app.update(Message::SlideTimer);
        match app.page() {
            Page::Home { carousel, .. } => assert_eq!(carousel.current(), 0),
            other => panic!("expected home page, got {other:?}"),
        }
    }

    #[test]
    fn test_artwork_cache() {
        let mut cache = ArtworkCache::default();
        assert!(!cache.begin(""));
        assert!(cache.begin("/img/a.webp"));
        assert!(!cache.begin("/img/a.webp"));
        assert!(cache.is_pending("/img/a.webp"));

        cache.finish("/img/a.webp".to_string(), Envelope::Failure("404".to_string()));
        assert!(!cache.is_pending("/img/a.webp"));
        assert!(cache.get("/img/a.webp").is_none());
        assert!(!cache.begin("/img/a.webp"), "failures are not retried");

        cache.finish("/img/b.webp".to_string(), Envelope::Success(vec![1, 2, 3]));
        assert!(cache.get("/img/b.webp").is_some());
    }
}
