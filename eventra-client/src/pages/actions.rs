use eventra_core::{routes, BookingOutcome};
use eventra_shared::models::{EventStatus, Role};
use eventra_shared::Id;
use tracing::{debug, info};

use super::{PageController, Route};
use crate::error::ClientError;
use crate::view::{admin, events, seats, Action, AdminTab, Element};

impl PageController {
    /// Runs the handler an action was rendered with.
    ///
    /// Returns the fragment to swap into the page, if the action changed one.
    pub async fn dispatch(&self, action: Action) -> Option<Element> {
        debug!(action = ?action, "Dispatching");
        match action {
            Action::BookTickets { event_id } => {
                let location = if self.ctx.gateway.session().is_authenticated() {
                    routes::event_page(&event_id)
                } else {
                    routes::PAGE_LOGIN.to_string()
                };
                self.ctx.ui.navigate(&location);
                None
            }
            Action::ToggleSeat { seat_id } => {
                let board = self.board();
                let result = board.lock().toggle(&seat_id);
                debug!(seat_id = %seat_id, result = ?result, "Seat toggled");
                Some(self.event_panel(&board))
            }
            Action::OpenCheckout => {
                let board = self.board();
                let board = board.lock();
                let checkout = board.checkout();
                checkout
                    .enabled
                    .then(|| seats::payment_modal(&board.summary(), checkout))
            }
            Action::Pay => {
                self.checkout().await?;
                Some(self.event_panel(&self.board()))
            }
            Action::ManageEvent {
                event_id,
                title,
                status,
            } => self.manage(&event_id, &title, status).await,
            Action::SetEventStatus { event_id, status } => self.set_event_status(&event_id, status).await,
            Action::AdminSetEventStatus { event_id, status } => {
                self.admin_set_event_status(&event_id, status).await
            }
            Action::ChangeRole { user_id, role } => self.change_role(&user_id, role).await,
            Action::ShowAdminTab(tab) => self.show_admin_tab(tab).await,
            Action::Logout => {
                self.ctx.gateway.logout();
                None
            }
        }
    }

    /// Books the current selection on an event page.
    ///
    /// `None` off an event page, or when the page was replaced meanwhile.
    pub async fn checkout(&self) -> Option<BookingOutcome> {
        let (event_id, board) = {
            let state = self.state();
            match &state.route {
                Route::Event(id) => (id.clone(), state.board.clone()),
                _ => return None,
            }
        };
        let guard = self.epoch.guard();
        let outcome = self.ctx.flow.checkout(&event_id, &board, &guard).await;
        info!(event_id = %event_id, outcome = ?outcome, "Checkout finished");
        if outcome == BookingOutcome::Stale {
            return None;
        }
        Some(outcome)
    }

    async fn manage(&self, event_id: &Id, title: &str, status: EventStatus) -> Option<Element> {
        let guard = self.epoch.guard();
        let analytics = self.ctx.api.event_analytics(event_id).await;
        let bookings = self.ctx.api.event_bookings(event_id).await;
        if !guard.is_current() {
            return None;
        }
        let analytics = analytics.map_err(|e| e.log("event analytics")).ok();
        let bookings = bookings.map_err(|e| e.log("event bookings")).ok();
        Some(events::manage_panel(
            event_id,
            title,
            status,
            analytics.as_ref(),
            bookings.as_deref(),
        ))
    }

    async fn set_event_status(&self, event_id: &Id, status: EventStatus) -> Option<Element> {
        if !self
            .ctx
            .ui
            .confirm(&format!("Are you sure you want to change status to {}?", status))
        {
            return None;
        }
        let guard = self.epoch.guard();
        match self.ctx.api.set_event_status(event_id, status).await {
            Ok(_) => {
                info!(event_id = %event_id, status = %status, "Event status changed");
                self.ctx.ui.alert(&format!("Event {}!", status));
            }
            Err(e) => {
                e.report(self.ctx.ui.as_ref());
                return None;
            }
        }
        let list = self.ctx.api.organizer_events().await;
        if !guard.is_current() {
            return None;
        }
        list.map(|e| events::organizer_events(&e))
            .map_err(|e| e.log("organizer events"))
            .ok()
    }

    async fn admin_set_event_status(&self, event_id: &Id, status: EventStatus) -> Option<Element> {
        if !self.ctx.ui.confirm(&format!("Change status to {}?", status)) {
            return None;
        }
        let result = self.ctx.api.admin_set_event_status(event_id, status).await;
        if !self.after_admin_update(result, "Event status updated") {
            return None;
        }
        self.show_admin_tab(AdminTab::Events).await
    }

    async fn change_role(&self, user_id: &Id, role: Role) -> Option<Element> {
        if !self.ctx.ui.confirm("Change user role?") {
            return None;
        }
        let result = self.ctx.api.set_user_role(user_id, role).await;
        if !self.after_admin_update(result, "Role updated") {
            return None;
        }
        self.show_admin_tab(AdminTab::Users).await
    }

    /// Alerts the outcome of an admin update. `false` when the table should
    /// not be reloaded.
    fn after_admin_update(&self, result: Result<Option<String>, ClientError>, success: &str) -> bool {
        match result {
            Ok(_) => {
                self.ctx.ui.alert(success);
                true
            }
            Err(e @ ClientError::Validation(_)) => {
                e.report(self.ctx.ui.as_ref());
                true
            }
            Err(e) => {
                e.report(self.ctx.ui.as_ref());
                false
            }
        }
    }

    async fn show_admin_tab(&self, tab: AdminTab) -> Option<Element> {
        self.state().admin_tab = tab;
        let guard = self.epoch.guard();
        let table = match tab {
            AdminTab::Users => self
                .ctx
                .api
                .admin_users()
                .await
                .map(|u| admin::users_table(&u)),
            AdminTab::Events => self
                .ctx
                .api
                .admin_events()
                .await
                .map(|e| admin::events_table(&e)),
        };
        if !guard.is_current() {
            return None;
        }
        match table {
            Ok(table) => Some(
                Element::new("div")
                    .id("adminSection")
                    .child(admin::tabs(tab))
                    .child(table),
            ),
            Err(e) => {
                e.log("admin table");
                None
            }
        }
    }
}
