use dotenv::dotenv;
use review_service::settings;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let settings = settings::load_settings()?;
    review_service::init_tracing(&settings);

    let database_url = settings
        .database_url
        .as_deref()
        .ok_or("DATABASE_URL must be set to seed reviews")?;
    let db = review_service::setup_database(database_url).await?;
    sqlx::migrate!().run(db.as_ref()).await?;

    seed::seed_data(db).await?;
    info!("Seed data inserted successfully");

    Ok(())
}

mod seed {
    use std::sync::Arc;

    use fake::{
        faker::lorem::en::{Paragraph, Sentence},
        Fake,
    };
    use review_service::{
        models::{
            review_comments::NewReviewComment,
            reviews::{NewReview, ReviewStatus, ReviewType, Severity},
        },
        repositories::review_repository::{PgReviewRepository, ReviewRepository},
    };
    use sqlx::PgPool;
    use tracing::info;
    use uuid::Uuid;

    const RULE_FAILURES: i64 = 5;
    const REVIEWS_PER_FAILURE: usize = 3;
    const SEVERITIES: [Severity; 5] = [
        Severity::Info,
        Severity::Minor,
        Severity::Major,
        Severity::Critical,
        Severity::Blocker,
    ];

    #[derive(sqlx::FromRow)]
    struct ReviewCount {
        count: i64,
    }

    pub async fn seed_data(db: Arc<PgPool>) -> Result<(), Box<dyn std::error::Error>> {
        let review_count =
            sqlx::query_as::<_, ReviewCount>("SELECT COUNT(*) AS count FROM reviews")
                .fetch_one(db.as_ref())
                .await?;
        if review_count.count > 0 {
            info!("Data already exists, skipping seed");
            return Ok(());
        }

        let repository = PgReviewRepository::new(db);
        let user_ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();

        for rule_failure_id in 1..=RULE_FAILURES {
            for i in 0..REVIEWS_PER_FAILURE {
                let author = user_ids[i % user_ids.len()];
                let review = NewReview {
                    rule_failure_id,
                    user_id: author,
                    title: Some(Sentence(3..7).fake()),
                    review_type: if i == 0 {
                        ReviewType::FalsePositive
                    } else {
                        ReviewType::Comment
                    },
                    status: ReviewStatus::Open,
                    severity: Some(SEVERITIES[i % SEVERITIES.len()]),
                };
                let (saved, _) = repository
                    .create_with_comment(review, Paragraph(1..3).fake())
                    .await?;

                let replier = user_ids[(i + 1) % user_ids.len()];
                repository
                    .create_comment(NewReviewComment {
                        review_id: saved.id,
                        user_id: replier,
                        review_text: Sentence(4..12).fake(),
                    })
                    .await?;
            }
        }

        info!(
            "Seeded {} reviews",
            RULE_FAILURES as usize * REVIEWS_PER_FAILURE
        );
        Ok(())
    }
}
