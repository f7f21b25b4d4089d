use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect},
    routing::get,
};
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use uuid::Uuid;

use crate::{
    auth::{hash_password, issue_session, verify_password},
    model::{
        CrudRepository, ResourceTyped,
        entity::{UserEntity, UserEntityCreate},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::account::{FormContext, LoginForm, RegistrationForm},
        error::ErrorResponse,
        middlewares::{self, AUTH_TOKEN},
        routes::INDEX_PATH,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    let with_context = Router::new()
        .route("/verify", get(account_verify_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ));

    Router::new()
        .route(
            "/registration",
            get(registration_page_handler).post(registration_handler),
        )
        .route("/login", get(login_page_handler).post(login_handler))
        .route("/logout", get(logout_handler).post(logout_handler))
        .merge(with_context)
        .with_state(state)
}

fn issue_session_cookie(state: &AppState, cookies: &Cookies, user_id: Uuid) -> WebResult<()> {
    let app = state.config().app();
    let token =
        issue_session(user_id, app.session_ttl(), app.jwt()).map_err(WebError::server_crypt_error)?;

    let mut cookie = Cookie::new(AUTH_TOKEN, token);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1/account/registration",
    description = "Registration page context",
    responses(
        (status = 200, description = "Empty form", body = FormContext),
    ),
    tag = "account"
)]
pub async fn registration_page_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(FormContext::default()))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/registration",
    request_body(content = RegistrationForm, content_type = "application/x-www-form-urlencoded"),
    description = "Creates a user, signs them in and redirects to the course index",
    responses(
        (status = 303, description = "User created, session cookie set"),
        (status = 409, description = "User already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "account"
)]
#[tracing::instrument(skip_all)]
pub async fn registration_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RegistrationForm>,
) -> WebResult<impl IntoResponse> {
    let found = UserEntity::find_by_username(state.pool(), &form.username)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    if found.is_some() {
        return Err(WebError::registration_conflict());
    }

    let hash = hash_password(&form.password).map_err(WebError::server_crypt_error)?;
    let payload = UserEntityCreate {
        username: form.username,
        password_hash: hash,
        first_name: form.first_name,
        last_name: form.last_name,
    };

    // a concurrent registration may still win the race for the username
    let created = UserEntity::create(state.pool(), payload)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                WebError::registration_conflict()
            } else {
                WebError::resource_fetch_error(UserEntity::get_resource_type(), e)
            }
        })?;

    issue_session_cookie(&state, &cookies, created.id())?;
    tracing::info!(user_id = %created.id(), username = created.username(), "user registered");

    Ok(Redirect::to(INDEX_PATH))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/login",
    description = "Login page context",
    responses(
        (status = 200, description = "Empty form", body = FormContext),
    ),
    tag = "account"
)]
pub async fn login_page_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(FormContext::default()))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    description = "Authorizes user in the system and redirects to the course index",
    responses(
        (status = 303, description = "User signed in, session cookie set"),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "account"
)]
#[tracing::instrument(skip_all)]
pub async fn login_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> WebResult<impl IntoResponse> {
    let found = UserEntity::find_by_username(state.pool(), &form.username)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    let Some(found) = found else {
        return Err(WebError::auth_invalid_credentials());
    };

    let is_verified =
        verify_password(found.hash(), &form.password).map_err(WebError::server_crypt_error)?;

    if !is_verified {
        return Err(WebError::auth_invalid_credentials());
    }

    issue_session_cookie(&state, &cookies, found.id())?;
    tracing::debug!(user_id = %found.id(), "user signed in");

    Ok(Redirect::to(INDEX_PATH))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/logout",
    description = "Drops the session cookie and redirects to the course index",
    responses(
        (status = 303, description = "Signed out"),
    ),
    tag = "account"
)]
pub async fn logout_handler(cookies: Cookies) -> impl IntoResponse {
    let mut cookie = Cookie::new(AUTH_TOKEN, "");
    cookie.set_path("/");
    cookies.remove(cookie);

    Redirect::to(INDEX_PATH)
}

#[utoipa::path(
    get,
    path = "/api/v1/account/verify",
    description = "Checks whether the session cookie belongs to a user",
    responses(
        (status = 200, description = "Signed in"),
        (status = 401, description = "Anonymous"),
    ),
    tag = "account",
    security(
        ("cookie" = [])
    )
)]
pub async fn account_verify_handler(ctx: RequestContext) -> impl IntoResponse {
    if ctx.maybe_user().is_none() {
        return StatusCode::UNAUTHORIZED;
    }

    StatusCode::OK
}
