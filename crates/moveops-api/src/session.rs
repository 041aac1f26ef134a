//! Auth & session operations

use moveops_client::{ApiClient, RequestOptions, Result};
use moveops_core::types::{CsrfResponse, LoginRequest, SessionPayload};
use reqwest::Method;
use tracing::info;

/// Sign in. The only mutating call that skips CSRF: it precedes token
/// issuance. The session cookie arrives on the response and lands in the
/// client's cookie store.
pub async fn login(client: &ApiClient, credentials: &LoginRequest) -> Result<SessionPayload> {
    let session = client
        .request_json(
            Method::POST,
            "/auth/login",
            Some(credentials),
            RequestOptions::without_csrf(),
        )
        .await?;
    info!("Signed in");
    Ok(session)
}

/// Session probe on app load. "Not logged in" is an expected outcome here,
/// so the 401 auth signal is suppressed and surfaces as a plain status error.
pub async fn me(client: &ApiClient) -> Result<SessionPayload> {
    client
        .get_json("/auth/me", RequestOptions::suppressing_auth_redirect())
        .await
}

/// Fetch the session's CSRF token directly. Most callers never need this;
/// the client attaches tokens to mutating calls on its own.
pub async fn csrf(client: &ApiClient) -> Result<CsrfResponse> {
    client.get_json("/auth/csrf", RequestOptions::default()).await
}

/// Sign out and drop the cached CSRF token. The token is invalidated even
/// though the logout call itself still needs it attached.
pub async fn logout(client: &ApiClient) -> Result<()> {
    client
        .request_json::<(), ()>(Method::POST, "/auth/logout", None, RequestOptions::default())
        .await?;
    client.csrf().invalidate();
    info!("Signed out");
    Ok(())
}
