use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    review_comments::{NewReviewComment, ReviewComment},
    reviews::{NewReview, Review},
};

use super::review_repository::ReviewRepository;

#[derive(Default)]
struct Tables {
    reviews: Vec<Review>,
    comments: Vec<ReviewComment>,
}

/// Process-local store used when no database is configured, and by tests.
/// Rows are kept in insertion order.
#[derive(Default)]
pub struct InMemoryReviewRepository {
    tables: RwLock<Tables>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_rule_failure(&self, rule_failure_id: i64) -> Result<Vec<Review>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.rule_failure_id == rule_failure_id)
            .cloned()
            .collect())
    }

    async fn list_comments(&self, review_ids: &[Uuid]) -> Result<Vec<ReviewComment>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| review_ids.contains(&c.review_id))
            .cloned()
            .collect())
    }

    async fn create_with_comment(
        &self,
        review: NewReview,
        review_text: String,
    ) -> Result<(Review, ReviewComment), sqlx::Error> {
        let now = Utc::now();
        let saved_review = Review {
            id: Uuid::new_v4(),
            rule_failure_id: review.rule_failure_id,
            user_id: review.user_id,
            title: review.title,
            review_type: review.review_type,
            status: review.status,
            severity: review.severity,
            created_at: now,
            updated_at: now,
        };
        let saved_comment = ReviewComment {
            id: Uuid::new_v4(),
            review_id: saved_review.id,
            user_id: saved_review.user_id,
            review_text,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write().await;
        tables.reviews.push(saved_review.clone());
        tables.comments.push(saved_comment.clone());

        Ok((saved_review, saved_comment))
    }

    async fn create_comment(
        &self,
        comment: NewReviewComment,
    ) -> Result<ReviewComment, sqlx::Error> {
        let mut tables = self.tables.write().await;
        if !tables.reviews.iter().any(|r| r.id == comment.review_id) {
            // Same outcome as the foreign key violation in Postgres.
            return Err(sqlx::Error::RowNotFound);
        }

        let now = Utc::now();
        let saved = ReviewComment {
            id: Uuid::new_v4(),
            review_id: comment.review_id,
            user_id: comment.user_id,
            review_text: comment.review_text,
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(saved.clone());

        Ok(saved)
    }
}
