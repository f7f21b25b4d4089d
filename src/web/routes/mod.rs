use crate::web::{AppState, doc::ApiDoc};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod account;
pub mod courses;
pub mod exam;

/// Course index, the landing page after sign in/out.
pub const INDEX_PATH: &str = "/api/v1/courses";

pub fn course_path(course_id: i64) -> String {
    format!("{INDEX_PATH}/{course_id}")
}

pub fn exam_result_path(course_id: i64, submission_id: i64) -> String {
    format!("{INDEX_PATH}/{course_id}/submissions/{submission_id}")
}

pub fn build_app<S: Send + Sync + Clone + 'static>(state: AppState) -> Router<S> {
    let config = state.config();

    let mut router = Router::new()
        .nest("/api/v1/account", account::routes(state.clone()))
        .nest(
            INDEX_PATH,
            courses::routes(state.clone()).merge(exam::routes(state.clone())),
        )
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if config.app().docs() {
        let openapi = ApiDoc::openapi();

        router = router.merge(SwaggerUi::new("/api/v1/docs").url("/api-doc/openapi.json", openapi));
    }

    router
}
