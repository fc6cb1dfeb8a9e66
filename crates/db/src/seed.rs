//! Sample cards inserted into an empty database at startup.

use chrono::Utc;
use mindcard_core::card::{CardStatus, NewCard, Priority};

use crate::repositories::CardRepo;
use crate::DbPool;

/// Author recorded on every sample card.
pub const SAMPLE_AUTHOR: &str = "admin";

fn sample(
    title: &str,
    content: &str,
    category: &str,
    tags: &str,
    priority: Priority,
    color: &str,
) -> NewCard {
    NewCard {
        title: title.to_string(),
        content: Some(content.to_string()),
        category: Some(category.to_string()),
        tags: Some(tags.to_string()),
        priority: priority.value(),
        status: CardStatus::Active,
        color: color.to_string(),
        is_favorite: false,
        is_public: true,
        view_count: 0,
        created_by: Some(SAMPLE_AUTHOR.to_string()),
        updated_by: Some(SAMPLE_AUTHOR.to_string()),
    }
}

/// The five sample cards.
pub fn sample_cards() -> Vec<NewCard> {
    vec![
        sample(
            "Learn Java Spring Boot",
            "Spring Boot makes it easy to build stand-alone, production-grade \
             Spring applications. Cover auto-configuration, starters and Actuator.",
            "Learning",
            "Java,Spring Boot,Backend",
            Priority::High,
            "#FFE4B5",
        ),
        sample(
            "Project management best practices",
            "Agile delivery, Scrum ceremonies, keeping communication open and \
             tracking risk early.",
            "Work",
            "Project management,Agile,Teamwork",
            Priority::Medium,
            "#E6F3FF",
        ),
        sample(
            "Healthy lifestyle",
            "Exercise regularly, eat balanced meals, sleep enough and keep a \
             positive outlook.",
            "Life",
            "Health,Exercise,Habits",
            Priority::Medium,
            "#F0FFF0",
        ),
        sample(
            "Reading notes - Deep Work",
            "Deep work is the ability to focus without distraction on a \
             cognitively demanding task. Schedule it, protect it, measure it.",
            "Reading",
            "Reading notes,Focus,Productivity",
            Priority::Low,
            "#FFF8DC",
        ),
        sample(
            "Travel plan - Japan",
            "Tokyo, Kyoto and Osaka. Book the rail pass, plan temple visits and \
             leave a day for food markets.",
            "Travel",
            "Travel,Japan,Planning",
            Priority::Medium,
            "#FFE4E1",
        ),
    ]
}

/// Insert the sample cards if the table is empty. Returns how many were
/// inserted (zero when cards already exist).
pub async fn seed_sample_cards(pool: &DbPool) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if CardRepo::count_all(&mut tx).await? > 0 {
        tracing::debug!("Cards present, skipping sample data");
        return Ok(0);
    }

    let now = Utc::now();
    let cards = sample_cards();
    for card in &cards {
        CardRepo::insert(&mut tx, card, now).await?;
    }
    tx.commit().await?;

    tracing::info!(count = cards.len(), "Inserted sample cards");
    Ok(cards.len())
}
