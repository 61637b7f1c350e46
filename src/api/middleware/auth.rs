//! Admin token check for the `/api` routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Lets the request through only when it carries the admin token.
///
/// ```text
/// Authorization: Bearer <ADMIN_TOKEN>
/// ```
///
/// # Errors
///
/// `401 Unauthorized` with `WWW-Authenticate: Bearer` when the header is
/// absent, not a Bearer credential, or holds another token.
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/purge", post(purge_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => token,
        Err(_) => {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            ));
        }
    };
    st.auth_service.authenticate(&token)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}
