//! Request authentication middleware.
//!
//! Runs once per inbound request, before routing. A valid bearer token
//! attaches a [`Principal`] to the request extensions; a missing or invalid
//! token leaves the request anonymous and lets it proceed. Rejection of
//! anonymous requests on protected routes is the access policy's job
//! ([`crate::middleware::policy`]), not this filter's.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::modules::auth::model::Principal;
use crate::state::AppState;
use crate::utils::jwt::verify_token;

pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Some(token) = bearer {
        // The invalid branch is deliberate fail-open: verification errors are
        // not surfaced here, the request just stays anonymous.
        match verify_token(token, &state.jwt_config) {
            Ok(claims) => {
                req.extensions_mut().insert(Principal::from(claims));
            }
            Err(reason) => {
                debug!(%reason, "Bearer token rejected, continuing as anonymous");
            }
        }
    }

    next.run(req).await
}
