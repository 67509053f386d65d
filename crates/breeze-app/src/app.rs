//! The application shell.
//!
//! `WeatherApp` owns all mutable UI state and is driven from a single thread:
//! user actions call its methods, async results are applied by
//! [`WeatherApp::process_messages`], and the view layer renders from
//! [`WeatherApp::snapshot`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use breeze_auth::{
    AuthAction, AuthOutcome, CredentialForm, Credentials, LoginForm, SessionUser, SignupForm,
};
use breeze_core::{AppError, Config, UiConfig};
use breeze_weather::{
    CurrentRow, DailyRow, HourlyCell, LocationProvider, Units, WeatherFetchResult, WeatherPanel,
};
use chrono::NaiveDate;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::app_services::{weather_units, AppServices};
use crate::banner::WelcomeBanner;
use crate::drawer::Drawer;
use crate::navigation::{NavEvent, Screen};
use crate::services::{
    request_auth_submit, request_weather_fetch, AuthServiceMessage, WeatherServiceMessage,
};

/// Immutable view of the whole UI at one instant.
#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub screen: Screen,
    pub user: Option<SessionUser>,
    pub banner: Option<BannerView>,
    pub menu_available: bool,
    pub drawer: DrawerView,
    pub weather: WeatherView,
    pub login: Option<LoginForm>,
    pub signup: Option<SignupForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BannerView {
    pub message: String,
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerView {
    pub offset: f32,
    pub width: f32,
    pub visible: bool,
    pub overlay_alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    pub current: CurrentRow,
    pub hourly: Vec<HourlyCell>,
    pub daily: Vec<DailyRow>,
    pub loading: bool,
}

/// Cancellation and staleness tracking for one kind of request.
#[derive(Debug)]
struct RequestSlot {
    ticket: u64,
    cancel: CancellationToken,
}

impl RequestSlot {
    fn new(cancel: CancellationToken) -> Self {
        Self { ticket: 0, cancel }
    }

    /// Cancel whatever is outstanding and start a new generation.
    fn renew(&mut self, cancel: CancellationToken) {
        self.cancel.cancel();
        self.ticket += 1;
        self.cancel = cancel;
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.ticket == ticket
    }
}

pub struct WeatherApp {
    services: AppServices,
    screen: Screen,

    login: Option<LoginForm>,
    signup: Option<SignupForm>,
    form_request: RequestSlot,

    panel: WeatherPanel,
    weather_request: RequestSlot,
    weather_loading: bool,

    session: Option<SessionUser>,
    banner: Option<WelcomeBanner>,
    banner_duration: Duration,
    drawer: Drawer,
}

impl WeatherApp {
    pub fn new(services: AppServices, ui: &UiConfig, units: Units) -> Self {
        let form_request = RequestSlot::new(services.request_token());
        let weather_request = RequestSlot::new(services.request_token());

        Self {
            services,
            screen: Screen::Weather,
            login: None,
            signup: None,
            form_request,
            panel: WeatherPanel::new(units),
            weather_request,
            weather_loading: false,
            session: None,
            banner: None,
            banner_duration: Duration::from_secs(ui.welcome_banner_secs),
            drawer: Drawer::new(ui.drawer_width),
        }
    }

    /// Build the app with HTTP backends from `config`.
    pub fn from_config(config: &Config, runtime: Handle) -> Result<Self, AppError> {
        let services = AppServices::from_config(config, runtime)?;
        Ok(Self::new(
            services,
            &config.ui,
            weather_units(config.weather.units),
        ))
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&SessionUser> {
        self.session.as_ref()
    }

    pub fn is_weather_loading(&self) -> bool {
        self.weather_loading
    }

    // =========== Weather ===========

    /// Start a weather fetch for the current location. Any fetch still in
    /// flight is cancelled and its result ignored.
    pub fn mount(&mut self) {
        self.weather_request.renew(self.services.request_token());
        self.weather_loading = true;

        tracing::info!("Weather fetch {} requested", self.weather_request.ticket);
        request_weather_fetch(
            self.services.runtime(),
            self.services.weather_sender(),
            self.services.weather(),
            self.services.location(),
            self.services.fallback(),
            self.weather_request.ticket,
            self.weather_request.cancel.clone(),
        );
    }

    /// Replace the location source and refetch if the weather screen is up.
    pub fn set_location(&mut self, location: Arc<dyn LocationProvider>) {
        self.services.set_location(location);
        if self.screen == Screen::Weather {
            self.mount();
        }
    }

    // =========== Navigation ===========

    /// Apply a navigation event and return the resulting screen.
    pub fn navigate(&mut self, event: NavEvent) -> Screen {
        let next = self.screen.transition(event);
        if next == self.screen {
            return next;
        }

        tracing::info!("Navigate {:?} -> {:?} on {:?}", self.screen, next, event);
        if self.screen.has_form() {
            self.teardown_form();
        }
        self.screen = next;
        self.drawer.close();

        match next {
            Screen::Login => {
                self.form_request.renew(self.services.request_token());
                self.login = Some(LoginForm::new());
            }
            Screen::Signup => {
                self.form_request.renew(self.services.request_token());
                self.signup = Some(SignupForm::new());
            }
            Screen::Weather => self.mount(),
        }
        next
    }

    /// Drop the visible form, its credentials, and any request it started.
    fn teardown_form(&mut self) {
        self.form_request.renew(self.services.request_token());
        self.login = None;
        self.signup = None;
    }

    // =========== Forms ===========

    pub fn edit_email(&mut self, value: &str) {
        if let Some(form) = self.login.as_mut() {
            form.set_email(value);
        } else if let Some(form) = self.signup.as_mut() {
            form.set_email(value);
        }
    }

    pub fn edit_password(&mut self, value: &str) {
        if let Some(form) = self.login.as_mut() {
            form.set_password(value);
        } else if let Some(form) = self.signup.as_mut() {
            form.set_password(value);
        }
    }

    pub fn edit_confirm_password(&mut self, value: &str) {
        if let Some(form) = self.signup.as_mut() {
            form.set_confirm_password(value);
        }
    }

    pub fn dismiss_api_error(&mut self) {
        if let Some(form) = self.login.as_mut() {
            form.dismiss_api_error();
        } else if let Some(form) = self.signup.as_mut() {
            form.dismiss_api_error();
        }
    }

    /// Validate the login form and, if it passes, send the request.
    /// Returns whether a request was issued.
    pub fn submit_login(&mut self) -> bool {
        let credentials = match self.login.as_mut() {
            Some(form) => form.begin_submit(),
            None => {
                tracing::debug!("submit_login ignored: login form not shown");
                return false;
            }
        };
        self.dispatch(AuthAction::Login, credentials)
    }

    /// Validate the signup form and, if it passes, send the request.
    /// Returns whether a request was issued.
    pub fn submit_signup(&mut self) -> bool {
        let credentials = match self.signup.as_mut() {
            Some(form) => form.begin_submit(),
            None => {
                tracing::debug!("submit_signup ignored: signup form not shown");
                return false;
            }
        };
        self.dispatch(AuthAction::Signup, credentials)
    }

    fn dispatch(&mut self, action: AuthAction, credentials: Option<Credentials>) -> bool {
        let Some(credentials) = credentials else {
            return false;
        };

        request_auth_submit(
            self.services.runtime(),
            self.services.auth_sender(),
            self.services.auth(),
            self.form_request.ticket,
            action,
            credentials,
            self.form_request.cancel.clone(),
        );
        true
    }

    // =========== Async results ===========

    /// Apply every result that has arrived since the last call.
    /// Returns how many were applied; stale results are dropped.
    pub fn process_messages(&mut self) -> usize {
        let mut applied = 0;

        while let Some(message) = self.services.try_recv_auth() {
            let AuthServiceMessage::SubmitDone {
                ticket,
                action,
                outcome,
            } = message;
            if self.apply_auth(ticket, action, outcome) {
                applied += 1;
            }
        }

        while let Some(message) = self.services.try_recv_weather() {
            let WeatherServiceMessage::FetchDone { ticket, result } = message;
            if self.apply_weather(ticket, result) {
                applied += 1;
            }
        }

        applied
    }

    fn apply_auth(&mut self, ticket: u64, action: AuthAction, outcome: AuthOutcome) -> bool {
        if !self.form_request.is_current(ticket) {
            tracing::debug!("Discarding stale {:?} result (ticket {})", action, ticket);
            return false;
        }

        let resolved = match action {
            AuthAction::Login => self.login.as_mut().map(|f| f.resolve(&outcome)),
            AuthAction::Signup => self.signup.as_mut().map(|f| f.resolve(&outcome)),
        };
        if resolved.is_none() {
            tracing::debug!("Discarding {:?} result: form not shown", action);
            return false;
        }

        match outcome {
            AuthOutcome::Success { email, .. } => {
                let user = SessionUser::from_email(&email);
                tracing::info!("{:?} succeeded, signed in as {}", action, user.display_name);
                self.banner = Some(WelcomeBanner::new(
                    user.welcome_message(),
                    Instant::now(),
                    self.banner_duration,
                ));
                self.session = Some(user);
                self.navigate(NavEvent::AuthSucceeded);
            }
            AuthOutcome::Failure { message } => {
                tracing::warn!("{:?} failed: {}", action, message);
            }
        }
        true
    }

    fn apply_weather(&mut self, ticket: u64, result: WeatherFetchResult) -> bool {
        if !self.weather_request.is_current(ticket) {
            tracing::debug!("Discarding stale weather result (ticket {})", ticket);
            return false;
        }
        self.weather_loading = false;
        self.panel.apply(result);
        true
    }

    // =========== Session ===========

    /// Expire the welcome banner once its time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.banner = None;
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.session.take() {
            tracing::info!("{} signed out", user.display_name);
        }
        self.banner = None;
        self.drawer.close();
    }

    // =========== Drawer ===========

    /// The menu exists only for a signed-in user.
    pub fn menu_available(&self) -> bool {
        self.session.is_some()
    }

    pub fn toggle_drawer(&mut self) {
        if self.menu_available() {
            self.drawer.toggle();
        }
    }

    pub fn drawer_drag_start(&mut self, x: f32) -> bool {
        self.menu_available() && self.drawer.begin_drag(x)
    }

    pub fn drawer_drag(&mut self, delta: f32) {
        self.drawer.drag_by(delta);
    }

    pub fn drawer_drag_end(&mut self) {
        self.drawer.end_drag();
    }

    pub fn drawer_drag_cancel(&mut self) {
        self.drawer.cancel_drag();
    }

    pub fn tap_overlay(&mut self) {
        self.drawer.tap_overlay();
    }

    // =========== Rendering ===========

    pub fn snapshot(&self) -> AppSnapshot {
        self.snapshot_at(Instant::now(), chrono::Local::now().date_naive())
    }

    /// Snapshot with an explicit clock, for deterministic rendering.
    pub fn snapshot_at(&self, now: Instant, today: NaiveDate) -> AppSnapshot {
        AppSnapshot {
            screen: self.screen,
            user: self.session.clone(),
            banner: self
                .banner
                .as_ref()
                .filter(|b| !b.is_expired(now))
                .map(|b| BannerView {
                    message: b.message().to_string(),
                    progress: b.progress(now),
                }),
            menu_available: self.menu_available(),
            drawer: DrawerView {
                offset: self.drawer.offset(),
                width: self.drawer.width(),
                visible: self.drawer.is_visible(),
                overlay_alpha: self.drawer.overlay_alpha(),
            },
            weather: WeatherView {
                current: self.panel.current_row(),
                hourly: self.panel.hourly(),
                daily: self.panel.daily(today),
                loading: self.weather_loading,
            },
            login: self.login.clone(),
            signup: self.signup.clone(),
        }
    }

    /// Cancel all in-flight work.
    pub fn shutdown(&self) {
        self.services.shutdown();
    }
}
