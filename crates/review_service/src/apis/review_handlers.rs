use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html};
use minijinja::context;
use tracing::debug;

use crate::{
    apis::{
        api_models::{
            query::{CommentFormQuery, ListReviewsQuery, ReviewFormQuery},
            request::{CreateCommentRequest, CreateReviewRequest},
        },
        extractors::{FormBody, QueryParams},
        middlewares::authentication::CurrentUser,
    },
    models::{review_comments::ReviewCommentDraft, reviews::ReviewDraft},
    services::render_service::{
        Layout, COMMENT_FORM_TEMPLATE, FORM_TEMPLATE, INDEX_TEMPLATE, LIST_TEMPLATE,
    },
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

pub const TAG: &str = "reviews";

/// Reviews landing page
#[utoipa::path(
    get,
    tag = TAG,
    path = "/",
    operation_id = "reviewsIndex",
    responses(
        (status = 200, description = "Reviews page", body = String, content_type = "text/html"),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    )
)]
pub(super) async fn index(
    State(app_state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    app_state
        .render_service
        .render(INDEX_TEMPLATE, context! {}, Layout::Application)
}

/// List the reviews of a rule failure as an HTML fragment
#[utoipa::path(
    get,
    tag = TAG,
    path = "/list",
    operation_id = "listReviews",
    responses(
        (status = 200, description = "Review list fragment", body = String, content_type = "text/html"),
        (status = 400, description = "Missing or invalid rule failure", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(ListReviewsQuery)
)]
pub(super) async fn list(
    State(app_state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<ListReviewsQuery>,
) -> Result<Html<String>, AppError> {
    render_list(&app_state, query.rule_failure_id).await
}

/// Form for reviewing a violation, prefilled with an unsaved review
#[utoipa::path(
    get,
    tag = TAG,
    path = "/form",
    operation_id = "reviewForm",
    responses(
        (status = 200, description = "Review form fragment", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or invalid user identity", body = ErrorPayload)
    ),
    params(
        ReviewFormQuery,
        ("x-user-id" = uuid::Uuid, Header, description = "Authenticated user")
    )
)]
pub(super) async fn form(
    State(app_state): State<Arc<AppState>>,
    current_user: CurrentUser,
    QueryParams(query): QueryParams<ReviewFormQuery>,
) -> Result<Html<String>, AppError> {
    let review = ReviewDraft::new(query.violation_id, current_user.id);
    app_state
        .render_service
        .render(FORM_TEMPLATE, context! { review => review }, Layout::None)
}

/// Form for commenting on an existing review
#[utoipa::path(
    get,
    tag = TAG,
    path = "/form_comment",
    operation_id = "reviewCommentForm",
    responses(
        (status = 200, description = "Comment form fragment", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or invalid user identity", body = ErrorPayload)
    ),
    params(
        CommentFormQuery,
        ("x-user-id" = uuid::Uuid, Header, description = "Authenticated user")
    )
)]
pub(super) async fn form_comment(
    State(app_state): State<Arc<AppState>>,
    current_user: CurrentUser,
    QueryParams(query): QueryParams<CommentFormQuery>,
) -> Result<Html<String>, AppError> {
    let review_comment = ReviewCommentDraft::for_review(query.review_id, current_user.id);
    app_state.render_service.render(
        COMMENT_FORM_TEMPLATE,
        context! {
            review_comment => review_comment,
            rule_failure_id => query.rule_failure_id,
        },
        Layout::None,
    )
}

/// Create a review with its first comment, then render the rule failure's reviews
#[utoipa::path(
    post,
    tag = TAG,
    path = "/",
    operation_id = "createReview",
    request_body(content = CreateReviewRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Review created; updated review list fragment", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or invalid user identity", body = ErrorPayload),
        (status = 415, description = "Body is not form-encoded", body = ErrorPayload),
        (status = 422, description = "Invalid review or comment", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(("x-user-id" = uuid::Uuid, Header, description = "Authenticated user"))
)]
pub(super) async fn create(
    State(app_state): State<Arc<AppState>>,
    current_user: CurrentUser,
    FormBody(body): FormBody<CreateReviewRequest>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let review = app_state
        .review_service
        .create_review(current_user.id, body)
        .await?;
    let html = render_list(&app_state, review.rule_failure_id).await?;
    Ok((StatusCode::CREATED, html))
}

/// Comment on an existing review, then render the rule failure's reviews
#[utoipa::path(
    post,
    tag = TAG,
    path = "/comments",
    operation_id = "createReviewComment",
    request_body(content = CreateCommentRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Comment created; updated review list fragment", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or invalid user identity", body = ErrorPayload),
        (status = 404, description = "Review not found", body = ErrorPayload),
        (status = 415, description = "Body is not form-encoded", body = ErrorPayload),
        (status = 422, description = "Invalid comment", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(("x-user-id" = uuid::Uuid, Header, description = "Authenticated user"))
)]
pub(super) async fn create_comment(
    State(app_state): State<Arc<AppState>>,
    current_user: CurrentUser,
    FormBody(body): FormBody<CreateCommentRequest>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let review = app_state
        .review_service
        .create_comment(current_user.id, body)
        .await?;
    let html = render_list(&app_state, review.rule_failure_id).await?;
    Ok((StatusCode::CREATED, html))
}

async fn render_list(app_state: &AppState, rule_failure_id: i64) -> Result<Html<String>, AppError> {
    let reviews = app_state.review_service.list_reviews(rule_failure_id).await?;
    debug!(
        "Rendering {} reviews for rule failure {}",
        reviews.len(),
        rule_failure_id
    );
    app_state.render_service.render(
        LIST_TEMPLATE,
        context! {
            rule_failure_id => rule_failure_id,
            reviews => reviews,
        },
        Layout::None,
    )
}
