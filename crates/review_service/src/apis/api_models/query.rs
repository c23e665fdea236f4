use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReviewsQuery {
    /// Rule failure whose reviews are listed
    pub rule_failure_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReviewFormQuery {
    /// Rule failure the new review will be attached to
    pub violation_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CommentFormQuery {
    pub review_id: Uuid,
    pub rule_failure_id: i64,
}
