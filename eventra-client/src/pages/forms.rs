use eventra_core::routes;
use eventra_shared::models::{LoginRequest, NewEvent, NewVenue, RegisterRequest, Venue};
use tracing::info;

use super::PageController;
use crate::view::Element;

pub const LOGIN_OK: &str = "Login successful!";
pub const REGISTER_OK: &str = "Registration successful! Please login.";
pub const VENUE_CREATED: &str = "Venue Created!";
pub const EVENT_CREATED: &str = "Event Created!";

/// Venue dropdown of the create-event form.
pub(crate) fn venue_select(venues: &[Venue]) -> Element {
    Element::new("select").id("venue_id").children(venues.iter().map(|v| {
        Element::new("option")
            .attr("value", v.id.as_str())
            .text(&v.name)
    }))
}

impl PageController {
    /// Stores the returned tokens and role, then sends the user to their home.
    pub async fn submit_login(&self, form: LoginRequest) -> bool {
        match self.ctx.api.login(&form).await {
            Ok(res) => {
                self.ctx
                    .gateway
                    .store()
                    .set(&res.access_token, Some(&res.refresh_token), Some(res.role));
                info!(username = %form.username, role = %res.role, "Logged in");
                self.ctx.ui.alert(LOGIN_OK);
                self.ctx.ui.navigate(&res.role.home_path());
                true
            }
            Err(e) => {
                e.report(self.ctx.ui.as_ref());
                false
            }
        }
    }

    pub async fn submit_register(&self, form: RegisterRequest) -> bool {
        match self.ctx.api.register(&form).await {
            Ok(_) => {
                info!(username = %form.username, "Registered");
                self.ctx.ui.alert(REGISTER_OK);
                self.ctx.ui.navigate(routes::PAGE_LOGIN);
                true
            }
            Err(e) => {
                e.report(self.ctx.ui.as_ref());
                false
            }
        }
    }

    pub async fn submit_venue(&self, form: NewVenue) -> bool {
        let created = self.ctx.api.create_venue(&form).await;
        self.after_create(created.map(|c| c.id), VENUE_CREATED)
    }

    pub async fn submit_event(&self, form: NewEvent) -> bool {
        let created = self.ctx.api.create_event(&form).await;
        self.after_create(created.map(|c| c.id), EVENT_CREATED)
    }

    fn after_create(
        &self,
        created: crate::error::ClientResult<Option<eventra_shared::Id>>,
        message: &str,
    ) -> bool {
        match created {
            Ok(id) => {
                info!(id = ?id, "{}", message);
                self.ctx.ui.alert(message);
                let dashboard = self
                    .ctx
                    .gateway
                    .session()
                    .role
                    .map_or(routes::PAGE_ORGANIZER, |r| r.dashboard_path());
                self.ctx.ui.navigate(dashboard);
                true
            }
            Err(e) => {
                e.report(self.ctx.ui.as_ref());
                false
            }
        }
    }
}
