use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};

use crate::{
    exam::{SelectedAnswers, extract_answers, grade_exam},
    model::{
        CrudRepository, ResourceTyped,
        entity::{Choice, Course, Enrollment, Question, Submission, SubmissionCreate},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::exam::ExamResultResponse,
        error::ErrorResponse,
        middlewares,
        routes::exam_result_path,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/{course_id}/submit", post(exam_submit_handler))
        .route(
            "/{course_id}/submissions/{submission_id}",
            get(exam_result_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/{course_id}/submit",
    description = "Records an exam attempt. Every form field named `choice*` carries the id of a selected choice.",
    params(
        ("course_id" = i64, Path, description = "Course id"),
    ),
    responses(
        (status = 303, description = "Redirect to the exam result"),
        (status = 400, description = "Malformed or foreign choice id", body = ErrorResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 403, description = "Not enrolled in the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "exam",
    security(
        ("cookie" = [])
    )
)]
#[tracing::instrument(skip(ctx, state, fields))]
pub async fn exam_submit_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Form(fields): Form<Vec<(String, String)>>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let mm = state.pool();

    let course = Course::find_by_id(mm, course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Course::get_resource_type()))?;

    let enrollment = Enrollment::find_by_user_and_course(mm, user.user_id(), course.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Enrollment::get_resource_type(), e))?
        .ok_or(WebError::not_enrolled(course.id()))?;

    let selected = extract_answers(&fields).map_err(WebError::invalid_answers)?;
    let course_choices = Choice::find_all_by_course(mm, course.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Choice::get_resource_type(), e))?;
    let answers =
        SelectedAnswers::resolve(&selected, &course_choices).map_err(WebError::invalid_answers)?;

    if answers.is_empty() {
        tracing::debug!("empty exam submission");
    }

    let submission = Submission::create(mm, SubmissionCreate::new(enrollment.id(), answers.choice_ids()))
        .await
        .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

    tracing::info!(
        submission_id = submission.id(),
        enrollment_id = enrollment.id(),
        choices = answers.pairs().len(),
        "exam submitted"
    );

    Ok(Redirect::to(&exam_result_path(course.id(), submission.id())))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/submissions/{submission_id}",
    description = "Grades a submission. Questions earn their full grade only when exactly the correct choices were selected.",
    params(
        ("course_id" = i64, Path, description = "Course id"),
        ("submission_id" = i64, Path, description = "Submission id"),
    ),
    responses(
        (status = 200, description = "Score breakdown", body = ExamResultResponse),
        (status = 404, description = "Course or submission not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "exam"
)]
#[tracing::instrument(skip(state))]
pub async fn exam_result_handler(
    State(state): State<AppState>,
    Path((course_id, submission_id)): Path<(i64, i64)>,
) -> WebResult<impl IntoResponse> {
    let mm = state.pool();

    let course = Course::find_by_id(mm, course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Course::get_resource_type()))?;

    let submission = Submission::find_in_course(mm, submission_id, course.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Submission::get_resource_type()))?;

    let (questions, course_choices, selected) = tokio::try_join!(
        Question::find_all_by_course(mm, course.id()),
        Choice::find_all_by_course(mm, course.id()),
        Choice::find_all_by_submission(mm, submission.id()),
    )
    .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

    let result = grade_exam(&questions, &course_choices, &selected);
    tracing::debug!(
        total_score = result.total_score,
        max_score = result.max_score,
        "exam graded"
    );

    Ok((StatusCode::OK, Json(ExamResultResponse::new(course, submission, &result))))
}
