//! SQLite-backed perspective repository
//!
//! The `UNIQUE(article_id, persona_id)` table constraint is what makes the
//! batch orchestrator safe under concurrent requests; a losing writer gets
//! [`StoreError::Duplicate`] and re-reads.

use super::{
    conversion_error, decode_list, decode_timestamp, encode_list, encode_timestamp, sql_limit,
    store_error, with_conn, DbPool,
};
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use vantage_application::{PerspectiveRepository, StoreError};
use vantage_domain::{Perspective, Sentiment};

const COLUMNS: &str =
    "id, article_id, persona_id, headline, content, key_points, sentiment, generated, created_at";

pub struct SqlitePerspectiveRepository {
    pool: DbPool,
}

impl SqlitePerspectiveRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_perspective(row: &Row<'_>) -> rusqlite::Result<Perspective> {
    let key_points: String = row.get(5)?;
    let sentiment: String = row.get(6)?;
    let created_at: String = row.get(8)?;

    Ok(Perspective {
        id: row.get(0)?,
        article_id: row.get(1)?,
        persona_id: row.get(2)?,
        headline: row.get(3)?,
        content: row.get(4)?,
        key_points: decode_list(&key_points)?,
        sentiment: sentiment.parse::<Sentiment>().map_err(conversion_error)?,
        generated: row.get(7)?,
        created_at: decode_timestamp(&created_at)?,
    })
}

#[async_trait]
impl PerspectiveRepository for SqlitePerspectiveRepository {
    async fn insert(&self, perspective: &Perspective) -> Result<(), StoreError> {
        let perspective = perspective.clone();
        with_conn(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO perspectives (id, article_id, persona_id, headline, content,
                                           key_points, sentiment, generated, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    perspective.id,
                    perspective.article_id,
                    perspective.persona_id,
                    perspective.headline,
                    perspective.content,
                    encode_list(&perspective.key_points)?,
                    perspective.sentiment.to_string(),
                    perspective.generated,
                    encode_timestamp(&perspective.created_at),
                ],
            )
            .map_err(store_error)?;
            Ok(())
        })
        .await
    }

    async fn find_for_pair(
        &self,
        article_id: &str,
        persona_id: &str,
    ) -> Result<Option<Perspective>, StoreError> {
        let article_id = article_id.to_string();
        let persona_id = persona_id.to_string();
        with_conn(&self.pool, move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {COLUMNS} FROM perspectives
                     WHERE article_id = ?1 AND persona_id = ?2"
                ),
                params![article_id, persona_id],
                row_to_perspective,
            )
            .optional()
            .map_err(store_error)
        })
        .await
    }

    async fn list_for_article(&self, article_id: &str) -> Result<Vec<Perspective>, StoreError> {
        let article_id = article_id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {COLUMNS} FROM perspectives
                     WHERE article_id = ?1 ORDER BY created_at"
                ))
                .map_err(store_error)?;
            let rows = stmt
                .query_map(params![article_id], row_to_perspective)
                .map_err(store_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(store_error)
        })
        .await
    }

    async fn list_for_persona(
        &self,
        persona_id: &str,
        limit: usize,
    ) -> Result<Vec<Perspective>, StoreError> {
        let persona_id = persona_id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {COLUMNS} FROM perspectives
                     WHERE persona_id = ?1 ORDER BY created_at DESC LIMIT ?2"
                ))
                .map_err(store_error)?;
            let rows = stmt
                .query_map(params![persona_id, sql_limit(limit)], row_to_perspective)
                .map_err(store_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(store_error)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Database, SqliteArticleRepository, SqlitePersonaRepository};
    use chrono::Utc;
    use vantage_application::{ArticleRepository, PersonaRepository};
    use vantage_domain::{
        Article, Persona, PersonaCategory, PerspectiveDraft, Slug,
    };

    struct Fixture {
        _dir: tempfile::TempDir,
        repo: SqlitePerspectiveRepository,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();

        let articles = SqliteArticleRepository::new(db.pool());
        let personas = SqlitePersonaRepository::new(db.pool());

        let article = Article::new(
            "art-1",
            Slug::new("test-event").unwrap(),
            "Test Event",
            "admin",
            Utc::now(),
        )
        .with_summary("s")
        .with_content("c")
        .with_category("General");
        articles.insert(&article).await.unwrap();

        for (id, slug) in [("per-1", "ada"), ("per-2", "ben")] {
            let persona = Persona::new(
                id,
                Slug::new(slug).unwrap(),
                slug.to_uppercase(),
                "Commentator",
                PersonaCategory::Professional,
                Utc::now(),
            )
            .with_description("d")
            .with_traits(vec!["curious".to_string()])
            .with_speaking_style("plain")
            .with_expertise("things");
            personas.insert(&persona).await.unwrap();
        }

        Fixture {
            _dir: dir,
            repo: SqlitePerspectiveRepository::new(db.pool()),
        }
    }

    fn record(id: &str, article_id: &str, persona_id: &str) -> Perspective {
        Perspective::from_draft(
            id,
            article_id,
            persona_id,
            PerspectiveDraft {
                headline: "A Take".to_string(),
                content: "Body".to_string(),
                key_points: vec!["one".to_string(), "two".to_string()],
                sentiment: Sentiment::Mixed,
            },
            true,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find_for_pair() {
        let fx = fixture().await;
        fx.repo.insert(&record("v-1", "art-1", "per-1")).await.unwrap();

        let found = fx
            .repo
            .find_for_pair("art-1", "per-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, "v-1");
        assert_eq!(found.key_points, vec!["one", "two"]);
        assert_eq!(found.sentiment, Sentiment::Mixed);
        assert!(found.generated);

        assert!(fx
            .repo
            .find_for_pair("art-1", "per-2")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_pair_uniqueness_enforced() {
        let fx = fixture().await;
        fx.repo.insert(&record("v-1", "art-1", "per-1")).await.unwrap();

        // Same pair, different id: the constraint rejects it
        let err = fx
            .repo
            .insert(&record("v-2", "art-1", "per-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));

        // A different persona for the same article is fine
        fx.repo.insert(&record("v-3", "art-1", "per-2")).await.unwrap();
        assert_eq!(fx.repo.list_for_article("art-1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_for_persona_applies_limit() {
        let fx = fixture().await;
        fx.repo.insert(&record("v-1", "art-1", "per-1")).await.unwrap();

        let listed = fx.repo.list_for_persona("per-1", 10).await.unwrap();
        assert_eq!(listed.len(), 1);

        let none = fx.repo.list_for_persona("per-1", 0).await.unwrap();
        assert!(none.is_empty());

        // Oversized caps saturate rather than wrapping into a negative LIMIT
        let all = fx
            .repo
            .list_for_persona("per-1", usize::MAX)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_writers_leave_one_record_per_pair() {
        let fx = fixture().await;
        let repo = std::sync::Arc::new(fx.repo);

        let a = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.insert(&record("v-1", "art-1", "per-1")).await })
        };
        let b = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.insert(&record("v-2", "art-1", "per-1")).await })
        };
        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        // Exactly one writer wins; the loser sees Duplicate, never Backend
        assert!(a.is_ok() != b.is_ok());
        let lost = if a.is_err() { a } else { b };
        assert!(matches!(lost.unwrap_err(), StoreError::Duplicate));
        assert_eq!(repo.list_for_article("art-1").await.unwrap().len(), 1);
    }
}
