use std::sync::Arc;

use eventra_shared::models::RefreshResponse;
use tracing::{debug, info, warn};

use crate::routes;
use crate::session::{Session, TokenStore};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::ui::Ui;
use crate::CoreResult;

pub const LOGIN_FIRST: &str = "Please login first";

/// Where a single authenticated call currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    NoToken,
    Authorized,
    Refreshing,
    Retried,
    LoggedOut,
}

/// Wraps outbound calls with bearer injection and a one-shot
/// refresh-and-retry on 401.
pub struct AuthGateway {
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    ui: Arc<dyn Ui>,
}

impl AuthGateway {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn TokenStore>, ui: Arc<dyn Ui>) -> Self {
        Self {
            transport,
            store,
            ui,
        }
    }

    pub fn session(&self) -> Session {
        self.store.get()
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Public endpoint, no credentials attached.
    pub async fn fetch(&self, request: ApiRequest) -> CoreResult<ApiResponse> {
        self.transport.send(request).await
    }

    /// Authenticated call.
    ///
    /// Without an access token nothing is sent and a synthetic 401 carrying
    /// "Please login first" comes back. A 401 from the backend triggers at
    /// most one refresh and one retry; every other status is returned as-is.
    pub async fn auth_fetch(&self, request: ApiRequest) -> CoreResult<ApiResponse> {
        let session = self.store.get();
        let Some(token) = session.access_token() else {
            debug!(state = ?AuthState::NoToken, path = %request.path, "Skipping request without session");
            return Ok(ApiResponse::login_required());
        };

        debug!(state = ?AuthState::Authorized, method = %request.method, path = %request.path, "Sending authenticated request");
        let response = self.transport.send(request.clone().with_bearer(token)).await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        let Some(refresh_token) = session.refresh_token() else {
            warn!(path = %request.path, "Access token rejected and no refresh token stored");
            self.logout();
            return Ok(response);
        };

        debug!(state = ?AuthState::Refreshing, path = %request.path, "Access token rejected, refreshing");
        let refresh = self
            .transport
            .send(ApiRequest::post(routes::AUTH_REFRESH).with_bearer(refresh_token))
            .await?;

        if !refresh.is_success() {
            warn!(status = refresh.status, "Token refresh rejected");
            self.logout();
            return Ok(refresh);
        }

        let access_token = match refresh.json::<RefreshResponse>() {
            Ok(body) => body.access_token,
            Err(e) => {
                warn!(error = %e, "Token refresh returned an unreadable body");
                self.logout();
                return Ok(refresh);
            }
        };

        self.store.set(&access_token, None, None);
        debug!(state = ?AuthState::Retried, path = %request.path, "Retrying with refreshed token");
        self.transport.send(request.with_bearer(&access_token)).await
    }

    /// Clears the session and sends the user to the login page.
    pub fn logout(&self) {
        self.store.clear();
        info!(state = ?AuthState::LoggedOut, "Session cleared");
        self.ui.navigate(routes::PAGE_LOGIN);
    }
}
