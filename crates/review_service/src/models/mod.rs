pub mod review_comments;
pub mod reviews;
