#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use std::collections::HashMap;
use std::time::Duration;

use iced::widget::image::Handle;
use iced::{Element, Task, Theme};
use tracing::{debug, error, info, warn};

mod api;
mod config;
mod state;
mod ui;

use api::models::SearchPage;
use api::{ApiClient, ApiError, Dog};
use config::Config;
use state::favorites::FavoritesStore;
use state::search::{filter_by_name, FilterForm, ResultsState, SearchQuery};
use state::session::Session;
use state::storage::{MemoryStorage, SqliteStorage, StoragePort};

/// Keystrokes within this window coalesce into one search
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Which screen is showing. Everything but Login is gated on the
/// session flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Search,
    Favorites,
    Match,
}

/// Main application state
pub struct ShelterMatch {
    pub api: ApiClient,
    pub session: Session,
    pub favorites: FavoritesStore,
    pub screen: Screen,

    // Login form
    pub login_name: String,
    pub login_email: String,
    pub login_error: Option<String>,
    pub logging_in: bool,

    // Reference data
    pub breeds: Vec<String>,
    pub zip_codes: Vec<String>,

    // Search
    pub form: FilterForm,
    pub results: ResultsState,
    pub total: u64,
    /// Identifier order of the current page, used to re-order fetched
    /// records (the service does not preserve request order)
    pub page_ids: Vec<String>,
    /// Generation of the newest issued search; older completions are
    /// stale and get dropped
    pub search_generation: u64,
    /// Sequence of the newest name keystroke; older timers are
    /// superseded and fire into the void
    pub debounce_seq: u64,

    // Downloaded dog photos, keyed by dog id
    pub images: HashMap<String, Handle>,

    // Favorites screen
    pub favorite_dogs: Vec<Dog>,
    pub favorites_loading: bool,

    // Match screen
    pub matched: Option<Dog>,
    pub matching: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Screen),

    // Login / logout
    LoginNameChanged(String),
    LoginEmailChanged(String),
    LoginSubmitted,
    LoginCompleted(Result<(), ApiError>),
    LogoutRequested,
    LogoutCompleted(Result<(), ApiError>),

    // Reference data
    BreedsLoaded(Result<Vec<String>, ApiError>),
    ZipCodesLoaded(Result<Vec<String>, ApiError>),

    // Filters and search
    NameInput(String),
    DebounceElapsed(u64),
    BreedSelected(String),
    BreedCleared,
    ZipCodeChanged(String),
    AgeMinChanged(String),
    AgeMaxChanged(String),
    SortToggled,
    PageSelected(u64),
    SearchRequested,
    SearchCompleted {
        generation: u64,
        result: Result<SearchPage, ApiError>,
    },
    DogsLoaded {
        generation: u64,
        result: Result<Vec<Dog>, ApiError>,
    },
    ImageLoaded {
        id: String,
        result: Result<Vec<u8>, ApiError>,
    },

    // Favorites
    FavoriteToggled(String),
    FavoritesCleared,
    FavoriteDogsLoaded(Result<Vec<Dog>, ApiError>),

    // Match
    MatchRequested,
    MatchCompleted(Result<Dog, ApiError>),
}

impl ShelterMatch {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::load();
        let api = ApiClient::new(&config.api_base_url);

        let session = Session::load(open_port());
        let favorites = FavoritesStore::load(open_port());

        let screen = if session.is_authenticated() {
            Screen::Search
        } else {
            Screen::Login
        };
        info!(
            "starting on {:?} with {} favorite(s)",
            screen,
            favorites.len()
        );

        let mut app = Self::with_parts(api, session, favorites);
        app.screen = screen;

        let task = if app.screen == Screen::Search {
            app.enter_search()
        } else {
            Task::none()
        };

        (app, task)
    }

    fn with_parts(api: ApiClient, session: Session, favorites: FavoritesStore) -> Self {
        ShelterMatch {
            api,
            session,
            favorites,
            screen: Screen::Login,
            login_name: String::new(),
            login_email: String::new(),
            login_error: None,
            logging_in: false,
            breeds: Vec::new(),
            zip_codes: Vec::new(),
            form: FilterForm::default(),
            results: ResultsState::Idle,
            total: 0,
            page_ids: Vec::new(),
            search_generation: 0,
            debounce_seq: 0,
            images: HashMap::new(),
            favorite_dogs: Vec::new(),
            favorites_loading: false,
            matched: None,
            matching: false,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(screen) => self.navigate(screen),

            Message::LoginNameChanged(value) => {
                self.login_name = value;
                Task::none()
            }
            Message::LoginEmailChanged(value) => {
                self.login_email = value;
                Task::none()
            }
            Message::LoginSubmitted => {
                let name = self.login_name.trim().to_string();
                let email = self.login_email.trim().to_string();

                // Client-side validation happens before any request.
                if name.is_empty() || email.is_empty() {
                    self.login_error =
                        Some("Please enter both your name and email.".to_string());
                    return Task::none();
                }

                self.login_error = None;
                self.logging_in = true;
                let api = self.api.clone();
                Task::perform(
                    async move { api.login(&name, &email).await },
                    Message::LoginCompleted,
                )
            }
            Message::LoginCompleted(result) => {
                self.logging_in = false;
                match result {
                    Ok(()) => {
                        self.session.log_in();
                        self.screen = Screen::Search;
                        self.enter_search()
                    }
                    Err(e) => {
                        error!("login failed: {e}");
                        self.login_error = Some("Login failed. Please try again.".to_string());
                        Task::none()
                    }
                }
            }
            Message::LogoutRequested => {
                let api = self.api.clone();
                // The flag clears and the UI resets no matter what the
                // logout request itself does.
                self.session.log_out();
                self.screen = Screen::Login;
                self.form = FilterForm::default();
                self.results = ResultsState::Idle;
                self.total = 0;
                self.page_ids.clear();
                self.matched = None;
                Task::perform(async move { api.logout().await }, Message::LogoutCompleted)
            }
            Message::LogoutCompleted(result) => {
                if let Err(e) = result {
                    warn!("logout request failed: {e}");
                }
                Task::none()
            }

            Message::BreedsLoaded(result) => {
                match result {
                    Ok(breeds) => {
                        info!("loaded {} breeds", breeds.len());
                        self.breeds = breeds;
                    }
                    Err(e) => warn!("could not load breed list: {e}"),
                }
                Task::none()
            }
            Message::ZipCodesLoaded(result) => {
                match result {
                    Ok(zips) => {
                        debug!("loaded {} zip codes", zips.len());
                        self.zip_codes = zips;
                    }
                    Err(e) => warn!("could not load zip code list: {e}"),
                }
                Task::none()
            }

            Message::NameInput(value) => {
                self.form.name = value;
                if !self.form.name.trim().is_empty() {
                    // Name search and attribute search are exclusive.
                    self.form.clear_attributes();
                }
                self.debounce_seq += 1;
                let seq = self.debounce_seq;
                Task::perform(tokio::time::sleep(DEBOUNCE), move |_| {
                    Message::DebounceElapsed(seq)
                })
            }
            Message::DebounceElapsed(seq) => {
                if seq != self.debounce_seq {
                    // A newer keystroke restarted the countdown.
                    return Task::none();
                }
                self.form.page = 0;
                self.start_search()
            }
            Message::BreedSelected(breed) => {
                self.form.breed = breed;
                self.form.name.clear();
                self.form.page = 0;
                self.start_search()
            }
            Message::BreedCleared => {
                self.form.breed.clear();
                self.form.page = 0;
                self.start_search()
            }
            Message::ZipCodeChanged(value) => {
                self.form.zip_code = value;
                self.form.name.clear();
                Task::none()
            }
            Message::AgeMinChanged(value) => {
                self.form.set_age_min(value);
                self.form.name.clear();
                self.form.page = 0;
                self.start_search()
            }
            Message::AgeMaxChanged(value) => {
                self.form.set_age_max(value);
                self.form.name.clear();
                self.form.page = 0;
                self.start_search()
            }
            Message::SortToggled => {
                self.form.sort = self.form.sort.toggled();
                self.start_search()
            }
            Message::PageSelected(page) => {
                self.form.page = page;
                self.start_search()
            }
            Message::SearchRequested => self.start_search(),

            Message::SearchCompleted { generation, result } => {
                if generation < self.search_generation {
                    debug!("dropping stale search response (gen {generation})");
                    return Task::none();
                }
                match result {
                    Ok(page) => {
                        self.total = page.total;
                        self.page_ids = page.result_ids;
                        if self.page_ids.is_empty() {
                            // "No results" is its own state, distinct
                            // from "not yet searched".
                            self.results = ResultsState::Empty;
                            return Task::none();
                        }
                        let api = self.api.clone();
                        let ids = self.page_ids.clone();
                        Task::perform(
                            async move { api.dogs(&ids).await },
                            move |result| Message::DogsLoaded { generation, result },
                        )
                    }
                    Err(e) => {
                        // Total keeps its last known value; the list
                        // clears and loading stops.
                        error!("search failed: {e}");
                        self.page_ids.clear();
                        self.results = ResultsState::Empty;
                        Task::none()
                    }
                }
            }
            Message::DogsLoaded { generation, result } => {
                if generation < self.search_generation {
                    debug!("dropping stale record response (gen {generation})");
                    return Task::none();
                }
                match result {
                    Ok(dogs) => {
                        let dogs = order_by_ids(dogs, &self.page_ids);
                        let dogs = filter_by_name(dogs, &self.form.name);
                        let photos = self.photo_tasks(&dogs);
                        self.results = if dogs.is_empty() {
                            ResultsState::Empty
                        } else {
                            ResultsState::Loaded(dogs)
                        };
                        photos
                    }
                    Err(e) => {
                        error!("could not resolve dog records: {e}");
                        self.results = ResultsState::Empty;
                        Task::none()
                    }
                }
            }
            Message::ImageLoaded { id, result } => {
                match result {
                    Ok(bytes) => {
                        self.images.insert(id, Handle::from_bytes(bytes));
                    }
                    Err(e) => debug!("photo download failed for {id}: {e}"),
                }
                Task::none()
            }

            Message::FavoriteToggled(id) => {
                self.favorites.toggle(&id);
                // Keep the favorites screen in sync without a refetch.
                let favorites = &self.favorites;
                self.favorite_dogs.retain(|dog| favorites.contains(&dog.id));
                Task::none()
            }
            Message::FavoritesCleared => {
                self.favorites.clear();
                self.favorite_dogs.clear();
                Task::none()
            }
            Message::FavoriteDogsLoaded(result) => {
                self.favorites_loading = false;
                match result {
                    Ok(dogs) => {
                        let dogs = order_by_ids(dogs, self.favorites.ids());
                        let photos = self.photo_tasks(&dogs);
                        self.favorite_dogs = dogs;
                        photos
                    }
                    Err(e) => {
                        warn!("could not resolve favorite records: {e}");
                        self.favorite_dogs.clear();
                        Task::none()
                    }
                }
            }

            Message::MatchRequested => {
                if self.favorites.is_empty() || self.matching {
                    return Task::none();
                }
                self.matching = true;
                let api = self.api.clone();
                let ids = self.favorites.ids().to_vec();
                Task::perform(find_match(api, ids), Message::MatchCompleted)
            }
            Message::MatchCompleted(result) => {
                self.matching = false;
                match result {
                    Ok(dog) => {
                        info!("matched with {} ({})", dog.name, dog.id);
                        let photos = self.photo_tasks(std::slice::from_ref(&dog));
                        self.matched = Some(dog);
                        photos
                    }
                    Err(e) => {
                        // Whatever was on screen before stays there.
                        error!("match request failed: {e}");
                        Task::none()
                    }
                }
            }
        }
    }

    fn navigate(&mut self, screen: Screen) -> Task<Message> {
        if screen != Screen::Login && !self.session.is_authenticated() {
            self.screen = Screen::Login;
            return Task::none();
        }
        self.screen = screen;

        if screen == Screen::Favorites {
            let ids = self.favorites.ids().to_vec();
            if ids.is_empty() {
                // An empty list never triggers a fetch.
                self.favorite_dogs.clear();
                return Task::none();
            }
            self.favorites_loading = true;
            let api = self.api.clone();
            return Task::perform(
                async move { api.dogs(&ids).await },
                Message::FavoriteDogsLoaded,
            );
        }

        Task::none()
    }

    /// Issue one search for the current form state and bump the
    /// generation so any still-in-flight older search lands stale.
    fn start_search(&mut self) -> Task<Message> {
        self.results = ResultsState::Loading;
        self.search_generation += 1;
        let generation = self.search_generation;

        let query = SearchQuery::from_form(&self.form);
        let api = self.api.clone();
        Task::perform(async move { api.search(&query).await }, move |result| {
            Message::SearchCompleted { generation, result }
        })
    }

    /// Kick off the search screen: reference data plus a first search.
    fn enter_search(&mut self) -> Task<Message> {
        let api = self.api.clone();
        let breeds = Task::perform(
            async move { api.breeds().await },
            Message::BreedsLoaded,
        );
        let api = self.api.clone();
        let zips = Task::perform(
            async move { api.zip_codes().await },
            Message::ZipCodesLoaded,
        );
        Task::batch([breeds, zips, self.start_search()])
    }

    /// Photo downloads for any record whose image is not cached yet.
    fn photo_tasks(&self, dogs: &[Dog]) -> Task<Message> {
        let mut tasks = Vec::new();
        for dog in dogs {
            if dog.img.is_empty() || self.images.contains_key(&dog.id) {
                continue;
            }
            let api = self.api.clone();
            let id = dog.id.clone();
            let url = dog.img.clone();
            tasks.push(Task::perform(
                async move { api.image(&url).await },
                move |result| Message::ImageLoaded {
                    id: id.clone(),
                    result,
                },
            ));
        }
        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match self.screen {
            Screen::Login => ui::login::view(self),
            Screen::Search => ui::search::view(self),
            Screen::Favorites => ui::favorites::view(self),
            Screen::Match => ui::matching::view(self),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Open durable storage, falling back to an in-memory port (and an
/// ephemeral session) when the data directory is unusable.
fn open_port() -> Box<dyn StoragePort> {
    match SqliteStorage::open_default() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            warn!("falling back to in-memory storage: {e}");
            Box::new(MemoryStorage::new())
        }
    }
}

/// Re-order fetched records to the identifier order we asked for.
/// The service makes no ordering promise, so records are indexed by
/// id rather than trusted positionally.
fn order_by_ids(mut dogs: Vec<Dog>, ids: &[String]) -> Vec<Dog> {
    let position = |id: &str| ids.iter().position(|v| v == id).unwrap_or(usize::MAX);
    dogs.sort_by_key(|dog| position(&dog.id));
    dogs
}

/// Ask the service for a match among `ids`, then resolve it to a full
/// record. Both steps run sequentially inside one task.
async fn find_match(api: ApiClient, ids: Vec<String>) -> Result<Dog, ApiError> {
    let matched_id = api.match_dogs(&ids).await?;

    if !ids.contains(&matched_id) {
        // The service is authoritative; display it anyway.
        warn!("match id {matched_id} is not among the submitted favorites");
    }

    let dogs = api.dogs(&[matched_id.clone()]).await?;
    dogs.into_iter()
        .find(|dog| dog.id == matched_id)
        .ok_or_else(|| ApiError::Decode(format!("no record returned for match id {matched_id}")))
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    iced::application(
        "Shelter Match",
        ShelterMatch::update,
        ShelterMatch::view,
    )
    .theme(ShelterMatch::theme)
    .centered()
    .run_with(ShelterMatch::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str, name: &str) -> Dog {
        Dog {
            id: id.to_string(),
            img: String::new(),
            name: name.to_string(),
            age: 2,
            zip_code: "60601".to_string(),
            breed: "Poodle".to_string(),
        }
    }

    fn test_app() -> ShelterMatch {
        let mut app = ShelterMatch::with_parts(
            ApiClient::new("http://127.0.0.1:1"),
            Session::load(Box::new(MemoryStorage::new())),
            FavoritesStore::load(Box::new(MemoryStorage::new())),
        );
        app.session.log_in();
        app.screen = Screen::Search;
        app
    }

    #[test]
    fn test_stale_search_response_is_discarded() {
        let mut app = test_app();
        app.search_generation = 2;
        app.results = ResultsState::Loading;

        let _ = app.update(Message::SearchCompleted {
            generation: 1,
            result: Ok(SearchPage {
                result_ids: vec!["old".to_string()],
                total: 99,
            }),
        });

        assert_eq!(app.results, ResultsState::Loading);
        assert_eq!(app.total, 0);
        assert!(app.page_ids.is_empty());
    }

    #[test]
    fn test_empty_page_shows_empty_state_not_idle() {
        let mut app = test_app();
        app.search_generation = 1;
        app.results = ResultsState::Loading;

        let _ = app.update(Message::SearchCompleted {
            generation: 1,
            result: Ok(SearchPage {
                result_ids: vec![],
                total: 0,
            }),
        });

        assert_eq!(app.results, ResultsState::Empty);
        assert_eq!(app.total, 0);
    }

    #[test]
    fn test_search_failure_clears_list_and_keeps_total() {
        let mut app = test_app();
        app.search_generation = 1;
        app.total = 120;
        app.results = ResultsState::Loading;

        let _ = app.update(Message::SearchCompleted {
            generation: 1,
            result: Err(ApiError::Network("connection refused".to_string())),
        });

        assert_eq!(app.results, ResultsState::Empty);
        assert_eq!(app.total, 120);
    }

    #[test]
    fn test_records_are_reordered_and_name_filtered() {
        let mut app = test_app();
        app.search_generation = 1;
        app.page_ids = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        app.form.name = "rex".to_string();

        let _ = app.update(Message::DogsLoaded {
            generation: 1,
            result: Ok(vec![
                dog("a", "Rexy"),
                dog("b", "T-Rex"),
                dog("c", "Bella"),
            ]),
        });

        match &app.results {
            ResultsState::Loaded(dogs) => {
                let names: Vec<_> = dogs.iter().map(|d| d.name.as_str()).collect();
                // Page order b, a; Bella dropped by the name pass.
                assert_eq!(names, ["T-Rex", "Rexy"]);
            }
            other => panic!("expected loaded results, got {other:?}"),
        }
    }

    #[test]
    fn test_match_success_displays_the_matched_record() {
        let mut app = test_app();
        app.favorites.toggle("d1");
        app.favorites.toggle("d2");

        let _ = app.update(Message::MatchCompleted(Ok(dog("d2", "Bella"))));

        assert_eq!(app.matched.as_ref().map(|d| d.id.as_str()), Some("d2"));
        assert!(!app.matching);
    }

    #[test]
    fn test_match_failure_keeps_previous_match() {
        let mut app = test_app();
        app.matched = Some(dog("d1", "Rex"));
        app.matching = true;

        let _ = app.update(Message::MatchCompleted(Err(ApiError::Status {
            status: 500,
        })));

        assert_eq!(app.matched.as_ref().map(|d| d.id.as_str()), Some("d1"));
        assert!(!app.matching);
    }

    #[test]
    fn test_match_request_requires_favorites() {
        let mut app = test_app();
        let _ = app.update(Message::MatchRequested);
        assert!(!app.matching);
    }

    #[test]
    fn test_login_validation_blocks_empty_fields() {
        let mut app = test_app();
        app.screen = Screen::Login;
        app.login_name = "  ".to_string();
        app.login_email = String::new();

        let _ = app.update(Message::LoginSubmitted);

        assert!(app.login_error.is_some());
        assert!(!app.logging_in);
    }

    #[test]
    fn test_breed_selection_clears_name() {
        let mut app = test_app();
        app.form.name = "rex".to_string();

        let _ = app.update(Message::BreedSelected("Poodle".to_string()));

        assert!(app.form.name.is_empty());
        assert_eq!(app.form.breed, "Poodle");
        assert_eq!(app.form.page, 0);
        assert_eq!(app.results, ResultsState::Loading);
    }

    #[test]
    fn test_stale_debounce_timer_does_not_search() {
        let mut app = test_app();
        app.debounce_seq = 5;

        let _ = app.update(Message::DebounceElapsed(3));

        assert_eq!(app.results, ResultsState::Idle);
        assert_eq!(app.search_generation, 0);
    }

    #[test]
    fn test_current_debounce_timer_searches() {
        let mut app = test_app();
        app.debounce_seq = 5;
        app.form.page = 3;

        let _ = app.update(Message::DebounceElapsed(5));

        assert_eq!(app.form.page, 0);
        assert_eq!(app.results, ResultsState::Loading);
        assert_eq!(app.search_generation, 1);
    }

    #[test]
    fn test_navigating_to_empty_favorites_clears_without_fetch() {
        let mut app = test_app();
        app.favorite_dogs = vec![dog("ghost", "Ghost")];

        let _ = app.update(Message::Navigate(Screen::Favorites));

        assert_eq!(app.screen, Screen::Favorites);
        assert!(app.favorite_dogs.is_empty());
        assert!(!app.favorites_loading);
    }

    #[test]
    fn test_toggle_removes_record_from_favorites_screen() {
        let mut app = test_app();
        app.favorites.toggle("d1");
        app.favorites.toggle("d2");
        app.favorite_dogs = vec![dog("d1", "Rex"), dog("d2", "Bella")];

        let _ = app.update(Message::FavoriteToggled("d1".to_string()));

        assert!(!app.favorites.contains("d1"));
        let ids: Vec<_> = app.favorite_dogs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["d2"]);
    }

    #[test]
    fn test_navigation_is_gated_on_session() {
        let mut app = test_app();
        app.session.log_out();

        let _ = app.update(Message::Navigate(Screen::Search));

        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn test_logout_resets_ui_state() {
        let mut app = test_app();
        app.total = 50;
        app.results = ResultsState::Loaded(vec![dog("d1", "Rex")]);
        app.matched = Some(dog("d2", "Bella"));

        let _ = app.update(Message::LogoutRequested);

        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
        assert_eq!(app.results, ResultsState::Idle);
        assert_eq!(app.total, 0);
        assert!(app.matched.is_none());
    }

    #[test]
    fn test_order_by_ids_handles_unknown_ids() {
        let dogs = vec![dog("x", "Stray"), dog("a", "Rex")];
        let ordered = order_by_ids(dogs, &["a".to_string()]);
        let ids: Vec<_> = ordered.iter().map(|d| d.id.as_str()).collect();
        // Known ids first in page order, unknowns sink to the end.
        assert_eq!(ids, ["a", "x"]);
    }
}
