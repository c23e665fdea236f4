use std::{collections::HashMap, sync::Arc};

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    apis::api_models::request::{CreateCommentRequest, CreateReviewRequest},
    models::{
        review_comments::ReviewComment,
        reviews::{Review, ReviewWithComments},
    },
    repositories::review_repository::ReviewRepository,
    utils::errors::app_error::AppError,
};

#[derive(Clone)]
pub struct ReviewService {
    repository: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_reviews(
        &self,
        rule_failure_id: i64,
    ) -> Result<Vec<ReviewWithComments>, AppError> {
        let reviews = self.repository.list_by_rule_failure(rule_failure_id).await?;
        let review_ids: Vec<Uuid> = reviews.iter().map(|r| r.id).collect();
        let comments = self.repository.list_comments(&review_ids).await?;

        let mut by_review: HashMap<Uuid, Vec<ReviewComment>> = HashMap::new();
        for comment in comments {
            by_review.entry(comment.review_id).or_default().push(comment);
        }

        Ok(reviews
            .into_iter()
            .map(|review| ReviewWithComments {
                comments: by_review.remove(&review.id).unwrap_or_default(),
                review,
            })
            .collect())
    }

    /// Creates a review and its opening comment, both authored by `user_id`.
    pub async fn create_review(
        &self,
        user_id: Uuid,
        request: CreateReviewRequest,
    ) -> Result<Review, AppError> {
        let (review_params, comment_params) = request.into_params();
        let review_text = comment_params.validated_text()?;
        let new_review = review_params.validate(user_id)?;

        let (review, comment) = self
            .repository
            .create_with_comment(new_review, review_text)
            .await?;
        info!(
            "User {} reviewed rule failure {} (review {}, comment {})",
            user_id, review.rule_failure_id, review.id, comment.id
        );

        Ok(review)
    }

    /// Adds a comment to an existing review and returns that review.
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        request: CreateCommentRequest,
    ) -> Result<Review, AppError> {
        let new_comment = request.into_params().validate(user_id)?;

        let review = self
            .repository
            .find_by_id(new_comment.review_id)
            .await?
            .ok_or_else(|| {
                warn!("Review {} not found", new_comment.review_id);
                AppError::NotFound(format!("Review {} not found", new_comment.review_id))
            })?;

        let comment = self.repository.create_comment(new_comment).await?;
        info!(
            "User {} commented on review {} (comment {})",
            user_id, review.id, comment.id
        );

        Ok(review)
    }
}
