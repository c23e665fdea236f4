use axum::response::Html;
use minijinja::{context, Environment};
use serde::Serialize;

use crate::utils::errors::app_error::AppError;

pub const LAYOUT_TEMPLATE: &str = "layout.html";
pub const INDEX_TEMPLATE: &str = "reviews/index.html";
pub const LIST_TEMPLATE: &str = "reviews/_list.html";
pub const FORM_TEMPLATE: &str = "reviews/_form.html";
pub const COMMENT_FORM_TEMPLATE: &str = "reviews/_comment_form.html";

const TEMPLATES: [(&str, &str); 5] = [
    (LAYOUT_TEMPLATE, include_str!("../../templates/layout.html")),
    (
        INDEX_TEMPLATE,
        include_str!("../../templates/reviews/index.html"),
    ),
    (
        LIST_TEMPLATE,
        include_str!("../../templates/reviews/_list.html"),
    ),
    (
        FORM_TEMPLATE,
        include_str!("../../templates/reviews/_form.html"),
    ),
    (
        COMMENT_FORM_TEMPLATE,
        include_str!("../../templates/reviews/_comment_form.html"),
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Bare fragment, for partial page updates
    None,
    /// Wrapped in the application page layout
    Application,
}

/// Renders the embedded review templates.
pub struct RenderService {
    env: Environment<'static>,
}

impl RenderService {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(
        &self,
        name: &str,
        ctx: S,
        layout: Layout,
    ) -> Result<Html<String>, AppError> {
        let body = self.env.get_template(name)?.render(ctx)?;
        match layout {
            Layout::None => Ok(Html(body)),
            Layout::Application => {
                let page = self
                    .env
                    .get_template(LAYOUT_TEMPLATE)?
                    .render(context! { content => body })?;
                Ok(Html(page))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{
        review_comments::{ReviewComment, ReviewCommentDraft},
        reviews::{Review, ReviewDraft, ReviewStatus, ReviewType, ReviewWithComments, Severity},
    };

    fn renderer() -> RenderService {
        RenderService::new().unwrap()
    }

    fn review_with_comment(text: &str) -> ReviewWithComments {
        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4(),
            rule_failure_id: 12,
            user_id: Uuid::new_v4(),
            title: Some("Unused import".to_string()),
            review_type: ReviewType::FalsePositive,
            status: ReviewStatus::Open,
            severity: Some(Severity::Minor),
            created_at: now,
            updated_at: now,
        };
        let comment = ReviewComment {
            id: Uuid::new_v4(),
            review_id: review.id,
            user_id: review.user_id,
            review_text: text.to_string(),
            created_at: now,
            updated_at: now,
        };
        ReviewWithComments {
            review,
            comments: vec![comment],
        }
    }

    #[test]
    fn index_is_wrapped_in_layout() {
        let html = renderer()
            .render(INDEX_TEMPLATE, context! {}, Layout::Application)
            .unwrap();

        assert!(html.0.contains("<html"));
        assert!(html.0.contains("id=\"reviews\""));
    }

    #[test]
    fn list_fragment_has_no_layout() {
        let reviews = vec![review_with_comment("Generated code")];
        let html = renderer()
            .render(
                LIST_TEMPLATE,
                context! { rule_failure_id => 12, reviews => reviews },
                Layout::None,
            )
            .unwrap();

        assert!(!html.0.contains("<html"));
        assert!(html.0.contains("Generated code"));
        assert!(html.0.contains("Unused import"));
        assert!(html.0.contains("false_positive"));
        assert!(html.0.contains("minor"));
    }

    #[test]
    fn empty_list_says_so() {
        let reviews: Vec<ReviewWithComments> = Vec::new();
        let html = renderer()
            .render(
                LIST_TEMPLATE,
                context! { rule_failure_id => 12, reviews => reviews },
                Layout::None,
            )
            .unwrap();

        assert!(html.0.contains("No reviews yet"));
    }

    #[test]
    fn comment_text_is_escaped() {
        let reviews = vec![review_with_comment("<script>alert(1)</script>")];
        let html = renderer()
            .render(
                LIST_TEMPLATE,
                context! { rule_failure_id => 12, reviews => reviews },
                Layout::None,
            )
            .unwrap();

        assert!(!html.0.contains("<script>"));
        assert!(html.0.contains("&lt;script&gt;"));
    }

    #[test]
    fn review_form_shows_placeholder() {
        let draft = ReviewDraft::new(33, Uuid::new_v4());
        let html = renderer()
            .render(FORM_TEMPLATE, context! { review => draft }, Layout::None)
            .unwrap();

        assert!(html.0.contains("Enter your review here"));
        assert!(html.0.contains("value=\"33\""));
    }

    #[test]
    fn comment_form_targets_review() {
        let review_id = Uuid::new_v4();
        let draft = ReviewCommentDraft::for_review(review_id, Uuid::new_v4());
        let html = renderer()
            .render(
                COMMENT_FORM_TEMPLATE,
                context! { review_comment => draft, rule_failure_id => 4 },
                Layout::None,
            )
            .unwrap();

        assert!(html.0.contains(&review_id.to_string()));
    }
}
