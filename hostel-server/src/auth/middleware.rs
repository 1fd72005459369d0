//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService, extractor::authenticate};
use crate::core::ServerState;
use crate::security_log;

/// Routes reachable without a token
const PUBLIC_API_ROUTES: &[&str] = &[
    "/api/auth/login",
    "/api/auth/register",
    "/api/food/daily-menu",
    "/api/food/verify-qr",
];

fn is_public_route(path: &str) -> bool {
    !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path)
}

/// Require a logged-in account.
///
/// Applied at the router level. Validates `Authorization: Bearer <token>` and
/// stores the [`CurrentUser`] in the request extensions. CORS preflight
/// requests, non-API paths and [`PUBLIC_API_ROUTES`] pass through.
///
/// | Failure | Status |
/// |---------|--------|
/// | no Authorization header | 401 NotAuthenticated |
/// | expired token | 401 TokenExpired |
/// | bad token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS || is_public_route(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let user = authenticate(state.get_jwt_service(), token, req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require the `admin` role. Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            account_id = user.id,
            email = user.email.clone(),
            role = user.role.as_str()
        );
        return Err(AppError::new(shared::ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_route("/health"));
        assert!(is_public_route("/api/auth/login"));
        assert!(is_public_route("/api/food/verify-qr"));
        assert!(!is_public_route("/api/food/buy"));
        assert!(!is_public_route("/api/auth/me"));
        assert!(!is_public_route("/api/leave/1/status"));
    }
}
