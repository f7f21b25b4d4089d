use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    auth,
    model::{CrudRepository, ResourceTyped, entity::UserEntity},
    web::{AppState, AuthenticatedUser, RequestContext, error::WebError},
};

pub static AUTH_TOKEN: &str = "SID";

/// Resolves the session cookie into a [`RequestContext`].
///
/// Missing, expired or forged tokens and tokens of deleted users all yield an
/// anonymous context; only storage failures reject the request.
pub async fn extract_context_fn(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let ctx = match cookies.get(AUTH_TOKEN) {
        Some(token) => resolve_user(&state, token.value()).await?,
        None => None,
    };

    req.extensions_mut().insert(RequestContext::new(ctx));
    Ok(next.run(req).await)
}

async fn resolve_user(state: &AppState, token: &str) -> Result<Option<AuthenticatedUser>, WebError> {
    let id = match auth::read_session(token, state.config().app().jwt()) {
        Ok(id) => id,
        Err(e) if e.is_rejected_session() => {
            tracing::debug!("ignoring session cookie: {}", e);
            return Ok(None);
        }
        Err(e) => return Err(WebError::server_crypt_error(e)),
    };

    let user = UserEntity::find_by_id(state.pool(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    Ok(user.map(|u| AuthenticatedUser::new(u.id(), u.username().to_string(), u.full_name())))
}
