//! One controller per page load, owning the page's selection board and the
//! epoch that retires its in-flight work.

mod actions;
mod forms;

pub use forms::{EVENT_CREATED, LOGIN_OK, REGISTER_OK, VENUE_CREATED};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eventra_core::{
    routes, AuthGateway, BookingFlow, PaymentStep, SeatBoard, SharedBoard, TokenStore, Transport,
    Ui, ViewEpoch, ViewGuard,
};
use eventra_shared::Id;
use tracing::{debug, info};

use crate::api::EventraApi;
use crate::error::ClientResult;
use crate::view::{admin, bookings, events, nav, seats, Action, AdminTab, Element};

/// Collaborators shared by every page of a running client.
pub struct Context {
    pub gateway: Arc<AuthGateway>,
    pub api: EventraApi,
    pub flow: BookingFlow,
    pub ui: Arc<dyn Ui>,
}

impl Context {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
        ui: Arc<dyn Ui>,
        payment: Arc<dyn PaymentStep>,
    ) -> Self {
        let gateway = Arc::new(AuthGateway::new(transport, store, ui.clone()));
        Self {
            api: EventraApi::new(gateway.clone()),
            flow: BookingFlow::new(gateway.clone(), payment, ui.clone()),
            gateway,
            ui,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Event(Id),
    MyBookings,
    Organizer,
    CreateVenue,
    CreateEvent,
    Admin,
    /// Pages with nothing to load beyond the nav bar (login, register, ...).
    Other(String),
}

impl Route {
    pub fn parse(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        match path {
            "/" | "/index.html" => Route::Home,
            routes::PAGE_MY_BOOKINGS => Route::MyBookings,
            routes::PAGE_ORGANIZER => Route::Organizer,
            routes::PAGE_CREATE_VENUE => Route::CreateVenue,
            routes::PAGE_CREATE_EVENT => Route::CreateEvent,
            routes::PAGE_ADMIN => Route::Admin,
            _ => match path.strip_prefix("/events/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Event(Id::from(id)),
                _ => Route::Other(path.to_string()),
            },
        }
    }
}

/// A loaded page: the nav bar plus whatever sections loaded successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub route: Route,
    pub nav: Element,
    pub sections: Vec<Element>,
}

impl View {
    pub fn section(&self, id: &str) -> Option<&Element> {
        self.sections.iter().find_map(|s| s.by_id(id))
    }

    pub fn actions(&self) -> Vec<&Action> {
        let mut all = self.nav.actions();
        for section in &self.sections {
            all.extend(section.actions());
        }
        all
    }

    pub fn to_html(&self) -> String {
        let mut out = self.nav.to_html();
        for section in &self.sections {
            out.push_str(&section.to_html());
        }
        out
    }

    pub fn outline(&self) -> String {
        let mut out = self.nav.outline();
        for section in &self.sections {
            out.push_str(&section.outline());
        }
        out
    }
}

struct PageState {
    route: Route,
    board: SharedBoard,
    admin_tab: AdminTab,
}

pub struct PageController {
    ctx: Arc<Context>,
    state: Mutex<PageState>,
    epoch: ViewEpoch,
}

impl PageController {
    pub fn new(ctx: Arc<Context>) -> Self {
        Self {
            ctx,
            state: Mutex::new(PageState {
                route: Route::Other(String::new()),
                board: SharedBoard::default(),
                admin_tab: AdminTab::default(),
            }),
            epoch: ViewEpoch::new(),
        }
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.ctx
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn route(&self) -> Route {
        self.state().route.clone()
    }

    pub fn board(&self) -> SharedBoard {
        self.state().board.clone()
    }

    pub fn admin_tab(&self) -> AdminTab {
        self.state().admin_tab
    }

    /// Retires the current page; completions started before this are ignored.
    pub fn teardown(&self) {
        self.epoch.invalidate();
    }

    /// Replaces the current page with `location` and fetches its data.
    pub async fn load(&self, location: &str) -> View {
        self.teardown();
        let route = Route::parse(location);
        {
            let mut state = self.state();
            state.route = route.clone();
            state.board = SharedBoard::default();
            state.admin_tab = AdminTab::default();
        }
        let guard = self.epoch.guard();
        info!(location, route = ?route, "Loading page");

        let api = &self.ctx.api;
        let sections: Vec<Element> = match &route {
            Route::Home => section(api.public_events().await, "public events", |e| events::public_events(e))
                .into_iter()
                .collect(),
            Route::Event(event_id) => self.load_event(event_id, &guard).await,
            Route::MyBookings => section(api.my_bookings().await, "bookings", |b| bookings::my_bookings(b))
                .into_iter()
                .collect(),
            Route::Organizer => [
                section(api.organizer_stats().await, "organizer stats", events::organizer_stats),
                section(api.organizer_events().await, "organizer events", |e| events::organizer_events(e)),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Route::CreateEvent => section(api.venues().await, "venues", |v| forms::venue_select(v))
                .into_iter()
                .collect(),
            Route::Admin => {
                let mut sections: Vec<Element> =
                    section(api.admin_stats().await, "admin stats", admin::admin_stats).into_iter().collect();
                sections.push(admin::tabs(AdminTab::Users));
                sections.extend(section(api.admin_users().await, "users", |u| admin::users_table(u)));
                sections
            }
            Route::CreateVenue | Route::Other(_) => Vec::new(),
        };

        if !guard.is_current() {
            debug!(location, "Page replaced while loading");
        }
        View {
            route,
            nav: nav::nav(&self.ctx.gateway.session()),
            sections,
        }
    }

    async fn load_event(&self, event_id: &Id, guard: &ViewGuard) -> Vec<Element> {
        let mut sections: Vec<Element> =
            section(self.ctx.api.event(event_id).await, "event details", events::event_info)
                .into_iter()
                .collect();

        match self.ctx.api.seats(event_id).await {
            Ok(list) if guard.is_current() => {
                let board = self.board();
                *board.lock() = SeatBoard::new(list);
                sections.push(self.event_panel(&board));
            }
            Ok(_) => debug!(event_id = %event_id, "Seat map arrived for a replaced page"),
            Err(e) => e.log("seat map"),
        }
        sections
    }

    /// Seat map plus booking summary, both derived from the board.
    fn event_panel(&self, board: &SharedBoard) -> Element {
        let board = board.lock();
        Element::new("div")
            .id("eventPanel")
            .child(seats::seat_map(&board))
            .child(seats::summary(&board.summary(), board.checkout()))
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.epoch.invalidate();
    }
}

fn section<T>(loaded: ClientResult<T>, what: &str, render: impl FnOnce(&T) -> Element) -> Option<Element> {
    match loaded {
        Ok(data) => Some(render(&data)),
        Err(e) => {
            e.log(what);
            None
        }
    }
}
