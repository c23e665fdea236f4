use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const REVIEW_TEXT_PLACEHOLDER: &str = "Enter your review here";

#[derive(Clone, Debug, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct ReviewComment {
    pub id: Uuid,
    pub review_id: Uuid,
    pub user_id: Uuid,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewReviewComment {
    pub review_id: Uuid,
    pub user_id: Uuid,
    pub review_text: String,
}

/// An unsaved comment. `review_id` stays empty while the parent review is
/// itself unsaved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewCommentDraft {
    pub id: Option<Uuid>,
    pub review_id: Option<Uuid>,
    pub user_id: Uuid,
    pub review_text: String,
}

impl ReviewCommentDraft {
    pub fn placeholder(user_id: Uuid) -> Self {
        Self {
            id: None,
            review_id: None,
            user_id,
            review_text: REVIEW_TEXT_PLACEHOLDER.to_string(),
        }
    }

    pub fn for_review(review_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: None,
            review_id: Some(review_id),
            user_id,
            review_text: String::new(),
        }
    }
}
