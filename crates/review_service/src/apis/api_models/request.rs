use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{
        review_comments::NewReviewComment,
        reviews::{NewReview, ReviewStatus, ReviewType, Severity},
    },
    utils::{errors::app_error::AppError, serde_utils::empty_string_as_none},
};

pub const MAX_TITLE_LENGTH: usize = 500;
pub const MAX_REVIEW_TEXT_LENGTH: usize = 4000;

/// Review fields a client may assign. The author is never read from here.
#[derive(Debug, Clone, Default)]
pub struct ReviewParams {
    pub rule_failure_id: i64,
    pub title: Option<String>,
    pub review_type: Option<ReviewType>,
    pub status: Option<ReviewStatus>,
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewCommentParams {
    pub review_id: Option<Uuid>,
    pub review_text: String,
}

/// Body posted by the review form. Field names are the form's input names.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct CreateReviewRequest {
    #[serde(rename = "review[rule_failure_id]")]
    pub rule_failure_id: i64,
    #[serde(
        rename = "review[title]",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub title: Option<String>,
    #[serde(
        rename = "review[review_type]",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub review_type: Option<ReviewType>,
    #[serde(
        rename = "review[status]",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub status: Option<ReviewStatus>,
    #[serde(
        rename = "review[severity]",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub severity: Option<Severity>,
    #[serde(rename = "review_comment[review_text]")]
    pub review_text: String,
}

/// Body posted by the comment form.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentRequest {
    #[serde(
        rename = "review_comment[review_id]",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub review_id: Option<Uuid>,
    #[serde(rename = "review_comment[review_text]")]
    pub review_text: String,
}

impl CreateReviewRequest {
    pub fn into_params(self) -> (ReviewParams, ReviewCommentParams) {
        (
            ReviewParams {
                rule_failure_id: self.rule_failure_id,
                title: self.title,
                review_type: self.review_type,
                status: self.status,
                severity: self.severity,
            },
            ReviewCommentParams {
                review_id: None,
                review_text: self.review_text,
            },
        )
    }
}

impl CreateCommentRequest {
    pub fn into_params(self) -> ReviewCommentParams {
        ReviewCommentParams {
            review_id: self.review_id,
            review_text: self.review_text,
        }
    }
}

impl ReviewParams {
    pub fn validate(self, user_id: Uuid) -> Result<NewReview, AppError> {
        if self.rule_failure_id <= 0 {
            return Err(AppError::validation(
                "rule_failure_id",
                "must be a positive identifier",
            ));
        }

        let title = match self.title.map(|t| t.trim().to_string()) {
            Some(t) if t.is_empty() => None,
            Some(t) => {
                check_length("title", &t, MAX_TITLE_LENGTH)?;
                Some(t)
            }
            None => None,
        };

        Ok(NewReview {
            rule_failure_id: self.rule_failure_id,
            user_id,
            title,
            review_type: self.review_type.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            severity: self.severity,
        })
    }
}

impl ReviewCommentParams {
    /// Validates the text only; the parent review is decided by the caller.
    pub fn validated_text(&self) -> Result<String, AppError> {
        let text = self.review_text.trim();
        if text.is_empty() {
            return Err(AppError::validation("review_text", "can't be blank"));
        }
        check_length("review_text", text, MAX_REVIEW_TEXT_LENGTH)?;
        Ok(text.to_string())
    }

    pub fn validate(self, user_id: Uuid) -> Result<NewReviewComment, AppError> {
        let review_text = self.validated_text()?;
        let review_id = self
            .review_id
            .ok_or_else(|| AppError::validation("review_id", "is required"))?;

        Ok(NewReviewComment {
            review_id,
            user_id,
            review_text,
        })
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let length = value.chars().count();
    if length > max {
        return Err(AppError::validation(
            field,
            format!(
                "length ({}) is longer than the maximum authorized ({})",
                length, max
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header, Request},
        Form,
    };
    use rstest::rstest;

    use super::*;

    fn field_of(err: AppError) -> String {
        match err {
            AppError::ValidationError { field, .. } => field,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn review_params_apply_defaults_and_current_user() {
        let user_id = Uuid::new_v4();
        let params = ReviewParams {
            rule_failure_id: 7,
            title: Some("  Null check missing  ".to_string()),
            ..Default::default()
        };

        let review = params.validate(user_id).unwrap();

        assert_eq!(review.rule_failure_id, 7);
        assert_eq!(review.user_id, user_id);
        assert_eq!(review.title.as_deref(), Some("Null check missing"));
        assert_eq!(review.review_type, ReviewType::Comment);
        assert_eq!(review.status, ReviewStatus::Open);
        assert_eq!(review.severity, None);
    }

    #[test]
    fn blank_title_is_dropped() {
        let params = ReviewParams {
            rule_failure_id: 1,
            title: Some("   ".to_string()),
            ..Default::default()
        };

        assert_eq!(params.validate(Uuid::new_v4()).unwrap().title, None);
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn non_positive_rule_failure_is_rejected(#[case] rule_failure_id: i64) {
        let params = ReviewParams {
            rule_failure_id,
            ..Default::default()
        };

        let err = params.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(field_of(err), "rule_failure_id");
    }

    #[test]
    fn overlong_title_is_rejected() {
        let params = ReviewParams {
            rule_failure_id: 1,
            title: Some("a".repeat(MAX_TITLE_LENGTH + 1)),
            ..Default::default()
        };

        let err = params.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid title: length (501) is longer than the maximum authorized (500)"
        );
    }

    #[rstest]
    #[case("")]
    #[case("   \n\t")]
    fn blank_review_text_is_rejected(#[case] text: &str) {
        let params = ReviewCommentParams {
            review_id: Some(Uuid::new_v4()),
            review_text: text.to_string(),
        };

        let err = params.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(field_of(err), "review_text");
    }

    #[test]
    fn review_text_at_the_limit_is_accepted() {
        let params = ReviewCommentParams {
            review_id: Some(Uuid::new_v4()),
            review_text: "é".repeat(MAX_REVIEW_TEXT_LENGTH),
        };

        assert!(params.validate(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn overlong_review_text_is_rejected() {
        let params = ReviewCommentParams {
            review_id: Some(Uuid::new_v4()),
            review_text: "a".repeat(MAX_REVIEW_TEXT_LENGTH + 1),
        };

        let err = params.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(field_of(err), "review_text");
    }

    #[test]
    fn comment_without_review_is_rejected() {
        let params = ReviewCommentParams {
            review_id: None,
            review_text: "Looks like a false positive".to_string(),
        };

        let err = params.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(field_of(err), "review_id");
    }

    async fn form<T: serde::de::DeserializeOwned>(body: &'static str) -> Result<T, String> {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        Form::<T>::from_request(request, &())
            .await
            .map(|Form(value)| value)
            .map_err(|rejection| rejection.body_text())
    }

    #[tokio::test]
    async fn unknown_fields_are_not_assignable() {
        let body = "review%5Brule_failure_id%5D=3&review%5Buser_id%5D=x&review_comment%5Breview_text%5D=hi";

        let err = form::<CreateReviewRequest>(body).await.unwrap_err();
        assert!(err.contains("`review[user_id]`"));
    }

    #[tokio::test]
    async fn review_form_fields_map_to_params() {
        let body = "review%5Brule_failure_id%5D=3&review%5Breview_type%5D=false_positive&review%5Bstatus%5D=open&review%5Btitle%5D=&review%5Bseverity%5D=major&review_comment%5Breview_text%5D=Not+reachable";

        let (review, comment) = form::<CreateReviewRequest>(body)
            .await
            .unwrap()
            .into_params();
        assert_eq!(review.rule_failure_id, 3);
        assert_eq!(review.title, None);
        assert_eq!(review.review_type, Some(ReviewType::FalsePositive));
        assert_eq!(review.status, Some(ReviewStatus::Open));
        assert_eq!(review.severity, Some(Severity::Major));
        assert_eq!(comment.review_id, None);
        assert_eq!(comment.review_text, "Not reachable");
    }

    #[tokio::test]
    async fn empty_severity_option_is_none() {
        let body = "review%5Brule_failure_id%5D=3&review%5Bseverity%5D=&review_comment%5Breview_text%5D=x";

        let request = form::<CreateReviewRequest>(body).await.unwrap();
        assert_eq!(request.severity, None);
    }
}
