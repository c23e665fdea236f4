use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    review_comments::{NewReviewComment, ReviewComment},
    reviews::{NewReview, Review},
};

/// Persistence for reviews and their comments.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, sqlx::Error>;

    /// Reviews attached to a rule failure, oldest first.
    async fn list_by_rule_failure(&self, rule_failure_id: i64) -> Result<Vec<Review>, sqlx::Error>;

    /// Comments of the given reviews, oldest first.
    async fn list_comments(&self, review_ids: &[Uuid]) -> Result<Vec<ReviewComment>, sqlx::Error>;

    /// Inserts a review and its first comment atomically. The comment is
    /// linked to the new review and shares its author.
    async fn create_with_comment(
        &self,
        review: NewReview,
        review_text: String,
    ) -> Result<(Review, ReviewComment), sqlx::Error>;

    async fn create_comment(&self, comment: NewReviewComment)
        -> Result<ReviewComment, sqlx::Error>;
}

const REVIEW_COLUMNS: &str =
    "id, rule_failure_id, user_id, title, review_type, status, severity, created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, review_id, user_id, review_text, created_at, updated_at";
/// `seq` is a per-table sequence, so ties on `created_at` keep insertion order.
const CREATION_ORDER: &str = "ORDER BY created_at, seq";

fn list_reviews_query() -> String {
    format!(
        "SELECT {} FROM reviews WHERE rule_failure_id = $1 {}",
        REVIEW_COLUMNS, CREATION_ORDER
    )
}

fn list_comments_query() -> String {
    format!(
        "SELECT {} FROM review_comments WHERE review_id = ANY($1) {}",
        COMMENT_COLUMNS, CREATION_ORDER
    )
}

pub struct PgReviewRepository {
    db: Arc<PgPool>,
}

impl PgReviewRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        PgReviewRepository { db }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS);
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await
    }

    async fn list_by_rule_failure(&self, rule_failure_id: i64) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&list_reviews_query())
            .bind(rule_failure_id)
            .fetch_all(self.db.as_ref())
            .await
    }

    async fn list_comments(&self, review_ids: &[Uuid]) -> Result<Vec<ReviewComment>, sqlx::Error> {
        if review_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, ReviewComment>(&list_comments_query())
            .bind(review_ids)
            .fetch_all(self.db.as_ref())
            .await
    }

    async fn create_with_comment(
        &self,
        review: NewReview,
        review_text: String,
    ) -> Result<(Review, ReviewComment), sqlx::Error> {
        let now = Utc::now();
        let mut tx = self.db.begin().await?;

        let insert_review = format!(
            "INSERT INTO reviews (id, rule_failure_id, user_id, title, review_type, status, severity, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {}",
            REVIEW_COLUMNS
        );
        let saved_review = sqlx::query_as::<_, Review>(&insert_review)
            .bind(Uuid::new_v4())
            .bind(review.rule_failure_id)
            .bind(review.user_id)
            .bind(&review.title)
            .bind(review.review_type)
            .bind(review.status)
            .bind(review.severity)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        let insert_comment = format!(
            "INSERT INTO review_comments (id, review_id, user_id, review_text, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {}",
            COMMENT_COLUMNS
        );
        let saved_comment = sqlx::query_as::<_, ReviewComment>(&insert_comment)
            .bind(Uuid::new_v4())
            .bind(saved_review.id)
            .bind(saved_review.user_id)
            .bind(&review_text)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(
            "Created review {} with comment {} for rule failure {}",
            saved_review.id, saved_comment.id, saved_review.rule_failure_id
        );

        Ok((saved_review, saved_comment))
    }

    async fn create_comment(
        &self,
        comment: NewReviewComment,
    ) -> Result<ReviewComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO review_comments (id, review_id, user_id, review_text, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {}",
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, ReviewComment>(&query)
            .bind(Uuid::new_v4())
            .bind(comment.review_id)
            .bind(comment.user_id)
            .bind(&comment.review_text)
            .bind(Utc::now())
            .fetch_one(self.db.as_ref())
            .await
    }
}
