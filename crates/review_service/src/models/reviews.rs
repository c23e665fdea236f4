use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::review_comments::{ReviewComment, ReviewCommentDraft};

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "review_type", rename_all = "snake_case")]
pub enum ReviewType {
    #[default]
    Comment,
    FalsePositive,
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "review_status", rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Open,
    Closed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "review_severity", rename_all = "snake_case")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

/// A persisted review attached to a single rule failure.
#[derive(Clone, Debug, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub rule_failure_id: i64,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    pub severity: Option<Severity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated review fields, ready to be inserted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewReview {
    pub rule_failure_id: i64,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    pub severity: Option<Severity>,
}

/// An unsaved review, used to prefill the review form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewDraft {
    pub id: Option<Uuid>,
    pub rule_failure_id: i64,
    pub user_id: Uuid,
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    pub comment: ReviewCommentDraft,
}

impl ReviewDraft {
    pub fn new(rule_failure_id: i64, user_id: Uuid) -> Self {
        Self {
            id: None,
            rule_failure_id,
            user_id,
            review_type: ReviewType::default(),
            status: ReviewStatus::default(),
            comment: ReviewCommentDraft::placeholder(user_id),
        }
    }
}

/// A review together with its comments, in creation order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewWithComments {
    #[serde(flatten)]
    pub review: Review,
    pub comments: Vec<ReviewComment>,
}
