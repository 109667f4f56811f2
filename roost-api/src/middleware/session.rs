use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use roost_core::session::{Role, Session};

use crate::error::AppError;

// Identity is asserted by the auth gateway in front of this service
pub const UID_HEADER: &str = "x-roost-uid";
pub const ROLE_HEADER: &str = "x-roost-role";
pub const EMAIL_HEADER: &str = "x-roost-email";
pub const NAME_HEADER: &str = "x-roost-name";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub fn session_from_headers(headers: &HeaderMap) -> Result<Session, AppError> {
    let uid = header(headers, UID_HEADER)
        .ok_or_else(|| AppError::AuthenticationError("Sign in required".to_string()))?;

    let role = match header(headers, ROLE_HEADER) {
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|e| AppError::AuthenticationError(e.to_string()))?,
        None => Role::Guest,
    };

    let mut session = Session::new(uid, role);
    if let Some(email) = header(headers, EMAIL_HEADER) {
        session = session.with_email(email);
    }
    if let Some(name) = header(headers, NAME_HEADER) {
        session = session.with_display_name(name);
    }
    Ok(session)
}

/// Resolve the caller's session and hand it to the handler as an extension.
pub async fn session_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    let session = session_from_headers(req.headers())?;
    tracing::debug!(uid = %session.uid, role = %session.role, "Session resolved");

    req.extensions_mut().insert(session.into_handle());
    Ok(next.run(req).await)
}
