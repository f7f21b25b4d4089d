use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};

use crate::{
    model::{
        CrudRepository, ResourceTyped,
        entity::{Choice, Course, CourseWithStatusRow, Enrollment, EnrollmentMode, Lesson, Question},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::courses::{CourseDetailResponse, CourseListResponse, EnrollmentResponse},
        error::ErrorResponse,
        middlewares,
        routes::course_path,
    },
};

/// How many courses the index shows.
pub const TOP_COURSES: i64 = 10;

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(course_list_handler))
        .route("/{course_id}", get(course_detail_handler))
        .route("/{course_id}/enroll", post(course_enroll_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

async fn find_course(state: &AppState, course_id: i64) -> WebResult<Course> {
    Course::find_by_id(state.pool(), course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Course::get_resource_type()))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    description = "Ten most enrolled courses, flagged with the visitor's enrollment status",
    responses(
        (status = 200, description = "Course index", body = CourseListResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "courses",
    security(
        ("cookie" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn course_list_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let rows = CourseWithStatusRow::fetch_top(state.pool(), ctx.maybe_user_id(), TOP_COURSES)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    let body = CourseListResponse {
        user: ctx.maybe_user().map(|u| u.username().to_string()),
        full_name: ctx.maybe_user().map(|u| u.full_name().to_string()),
        course_list: rows.into_iter().map(Into::into).collect(),
    };

    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}",
    description = "Course with its lessons and exam questions",
    params(
        ("course_id" = i64, Path, description = "Course id"),
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "courses",
    security(
        ("cookie" = [])
    )
)]
#[tracing::instrument(skip(ctx, state))]
pub async fn course_detail_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> WebResult<impl IntoResponse> {
    let course = find_course(&state, course_id).await?;
    let mm = state.pool();

    let enrollment = async {
        match ctx.maybe_user_id() {
            Some(user_id) => Enrollment::find_by_user_and_course(mm, user_id, course_id).await,
            None => Ok(None),
        }
    };

    let (lessons, questions, choices, enrollment) = tokio::try_join!(
        Lesson::find_all_by_course(mm, course_id),
        Question::find_all_by_course(mm, course_id),
        Choice::find_all_by_course(mm, course_id),
        enrollment,
    )
    .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    let body = CourseDetailResponse::from_entities(
        course,
        enrollment.as_ref().map(EnrollmentResponse::from),
        lessons,
        questions,
        choices,
    );
    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/{course_id}/enroll",
    description = "Enrolls the signed in user (mode `honor`) unless already enrolled. \
                   Anonymous visitors and repeated calls are silently ignored.",
    params(
        ("course_id" = i64, Path, description = "Course id"),
    ),
    responses(
        (status = 303, description = "Redirect to the course page"),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "courses",
    security(
        ("cookie" = [])
    )
)]
#[tracing::instrument(skip(ctx, state))]
pub async fn course_enroll_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> WebResult<impl IntoResponse> {
    let course = find_course(&state, course_id).await?;

    if let Some(user) = ctx.maybe_user() {
        let created = Enrollment::enroll(state.pool(), user.user_id(), course.id(), EnrollmentMode::Honor)
            .await
            .map_err(|e| WebError::resource_fetch_error(Enrollment::get_resource_type(), e))?;

        match created {
            Some(enrollment) => tracing::info!(
                enrollment_id = enrollment.id(),
                user_id = %user.user_id(),
                "user enrolled"
            ),
            None => tracing::debug!(user_id = %user.user_id(), "already enrolled"),
        }
    }

    Ok(Redirect::to(&course_path(course.id())))
}
