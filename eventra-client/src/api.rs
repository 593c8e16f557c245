use std::sync::Arc;

use eventra_core::{routes, ApiRequest, ApiResponse, AuthGateway};
use eventra_shared::models::{
    AdminEvent, AdminStats, AdminUser, Created, EventAnalytics, EventBooking, EventDetails,
    EventStatus, LoginRequest, LoginResponse, MyBooking, NewEvent, NewVenue, OrganizerEvent,
    OrganizerStats, PublicEvent, RegisterRequest, Role, RoleUpdate, Seat, StatusUpdate, Venue,
};
use eventra_shared::Id;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult, FALLBACK_MESSAGE};

/// Typed view of the backend REST surface.
///
/// Public endpoints go out bare, everything else through the gateway's
/// authenticated path.
#[derive(Clone)]
pub struct EventraApi {
    gateway: Arc<AuthGateway>,
}

impl EventraApi {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<AuthGateway> {
        &self.gateway
    }

    // Auth

    pub async fn login(&self, body: &LoginRequest) -> ClientResult<LoginResponse> {
        let response = self.gateway.fetch(ApiRequest::post(routes::AUTH_LOGIN).json(body)?).await?;
        decode(&response)
    }

    pub async fn register(&self, body: &RegisterRequest) -> ClientResult<Option<String>> {
        let response = self.gateway.fetch(ApiRequest::post(routes::AUTH_REGISTER).json(body)?).await?;
        accepted(&response)
    }

    // Events

    pub async fn public_events(&self) -> ClientResult<Vec<PublicEvent>> {
        let response = self.gateway.fetch(ApiRequest::get(routes::EVENTS)).await?;
        decode(&response)
    }

    pub async fn event(&self, event_id: &Id) -> ClientResult<EventDetails> {
        let response = self.gateway.fetch(ApiRequest::get(routes::event(event_id))).await?;
        decode(&response)
    }

    pub async fn seats(&self, event_id: &Id) -> ClientResult<Vec<Seat>> {
        let response = self.gateway.fetch(ApiRequest::get(routes::event_seats(event_id))).await?;
        decode(&response)
    }

    pub async fn venues(&self) -> ClientResult<Vec<Venue>> {
        self.authed(ApiRequest::get(routes::VENUES)).await
    }

    pub async fn create_venue(&self, venue: &NewVenue) -> ClientResult<Created> {
        self.authed(ApiRequest::post(routes::VENUES).json(venue)?).await
    }

    pub async fn create_event(&self, event: &NewEvent) -> ClientResult<Created> {
        self.authed(ApiRequest::post(routes::EVENTS).json(event)?).await
    }

    pub async fn organizer_events(&self) -> ClientResult<Vec<OrganizerEvent>> {
        self.authed(ApiRequest::get(routes::ORGANIZER_EVENTS)).await
    }

    pub async fn organizer_stats(&self) -> ClientResult<OrganizerStats> {
        self.authed(ApiRequest::get(routes::ORGANIZER_STATS)).await
    }

    pub async fn event_analytics(&self, event_id: &Id) -> ClientResult<EventAnalytics> {
        self.authed(ApiRequest::get(routes::event_analytics(event_id))).await
    }

    pub async fn event_bookings(&self, event_id: &Id) -> ClientResult<Vec<EventBooking>> {
        self.authed(ApiRequest::get(routes::event_bookings(event_id))).await
    }

    pub async fn set_event_status(&self, event_id: &Id, status: EventStatus) -> ClientResult<Option<String>> {
        let request = ApiRequest::patch(routes::event_status(event_id)).json(&StatusUpdate { status })?;
        self.authed_message(request).await
    }

    // Bookings

    pub async fn my_bookings(&self) -> ClientResult<Vec<MyBooking>> {
        self.authed(ApiRequest::get(routes::BOOKINGS_MINE)).await
    }

    // Admin

    pub async fn admin_stats(&self) -> ClientResult<AdminStats> {
        self.authed(ApiRequest::get(routes::ADMIN_STATS)).await
    }

    pub async fn admin_users(&self) -> ClientResult<Vec<AdminUser>> {
        self.authed(ApiRequest::get(routes::ADMIN_USERS)).await
    }

    pub async fn admin_events(&self) -> ClientResult<Vec<AdminEvent>> {
        self.authed(ApiRequest::get(routes::ADMIN_EVENTS)).await
    }

    pub async fn set_user_role(&self, user_id: &Id, role: Role) -> ClientResult<Option<String>> {
        let request = ApiRequest::patch(routes::admin_user_role(user_id)).json(&RoleUpdate { role })?;
        self.authed_message(request).await
    }

    pub async fn admin_set_event_status(&self, event_id: &Id, status: EventStatus) -> ClientResult<Option<String>> {
        let request = ApiRequest::patch(routes::admin_event_status(event_id)).json(&StatusUpdate { status })?;
        self.authed_message(request).await
    }

    async fn authed<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let response = self.send_authed(request).await?;
        decode(&response)
    }

    async fn authed_message(&self, request: ApiRequest) -> ClientResult<Option<String>> {
        let response = self.send_authed(request).await?;
        accepted(&response)
    }

    /// A 401 that ended the session maps to `AuthRequired`; the synthetic
    /// "Please login first" answer stays a plain rejection.
    async fn send_authed(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let had_session = self.gateway.session().is_authenticated();
        let response = self.gateway.auth_fetch(request).await?;
        if !response.is_success() && had_session && !self.gateway.session().is_authenticated() {
            return Err(ClientError::AuthRequired);
        }
        Ok(response)
    }
}

fn rejection(response: &ApiResponse) -> ClientError {
    ClientError::Validation(response.message().unwrap_or_else(|| FALLBACK_MESSAGE.to_string()))
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> ClientResult<T> {
    if !response.is_success() {
        return Err(rejection(response));
    }
    Ok(response.json()?)
}

fn accepted(response: &ApiResponse) -> ClientResult<Option<String>> {
    if !response.is_success() {
        return Err(rejection(response));
    }
    Ok(response.message())
}
