//! SQLite-backed article repository

use super::{
    conversion_error, decode_list, decode_timestamp, encode_list, encode_timestamp, sql_limit,
    store_error, with_conn, DbPool,
};
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use vantage_application::{ArticleFilter, ArticleRepository, StoreError};
use vantage_domain::{Article, Slug};

const COLUMNS: &str = "id, slug, title, summary, content, image_url, category, tags, \
                       published, featured, published_at, author, created_at";

pub struct SqliteArticleRepository {
    pool: DbPool,
}

impl SqliteArticleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_article(row: &Row<'_>) -> rusqlite::Result<Article> {
    let slug: String = row.get(1)?;
    let tags: String = row.get(7)?;
    let published_at: Option<String> = row.get(10)?;
    let created_at: String = row.get(12)?;

    Ok(Article {
        id: row.get(0)?,
        slug: Slug::new(slug).map_err(conversion_error)?,
        title: row.get(2)?,
        summary: row.get(3)?,
        content: row.get(4)?,
        image_url: row.get(5)?,
        category: row.get(6)?,
        tags: decode_list(&tags)?,
        published: row.get(8)?,
        featured: row.get(9)?,
        published_at: published_at.as_deref().map(decode_timestamp).transpose()?,
        author: row.get(11)?,
        created_at: decode_timestamp(&created_at)?,
    })
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    async fn insert(&self, article: &Article) -> Result<(), StoreError> {
        let article = article.clone();
        with_conn(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO articles (id, slug, title, summary, content, image_url, category,
                                       tags, published, featured, published_at, author, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    article.id,
                    article.slug.as_str(),
                    article.title,
                    article.summary,
                    article.content,
                    article.image_url,
                    article.category,
                    encode_list(&article.tags)?,
                    article.published,
                    article.featured,
                    article.published_at.as_ref().map(encode_timestamp),
                    article.author,
                    encode_timestamp(&article.created_at),
                ],
            )
            .map_err(store_error)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, article: &Article) -> Result<(), StoreError> {
        let article = article.clone();
        with_conn(&self.pool, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE articles
                     SET title = ?2, summary = ?3, content = ?4, image_url = ?5, category = ?6,
                         tags = ?7, published = ?8, featured = ?9, published_at = ?10
                     WHERE id = ?1",
                    params![
                        article.id,
                        article.title,
                        article.summary,
                        article.content,
                        article.image_url,
                        article.category,
                        encode_list(&article.tags)?,
                        article.published,
                        article.featured,
                        article.published_at.as_ref().map(encode_timestamp),
                    ],
                )
                .map_err(store_error)?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), StoreError> {
        let slug = slug.to_string();
        with_conn(&self.pool, move |conn| {
            let changed = conn
                .execute("DELETE FROM articles WHERE slug = ?1", params![slug])
                .map_err(store_error)?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, StoreError> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM articles WHERE id = ?1"),
                params![id],
                row_to_article,
            )
            .optional()
            .map_err(store_error)
        })
        .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, StoreError> {
        let slug = slug.to_string();
        with_conn(&self.pool, move |conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM articles WHERE slug = ?1"),
                params![slug],
                row_to_article,
            )
            .optional()
            .map_err(store_error)
        })
        .await
    }

    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>, StoreError> {
        with_conn(&self.pool, move |conn| {
            let mut sql = format!("SELECT {COLUMNS} FROM articles WHERE 1=1");
            let mut binds: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
            if filter.published_only {
                sql.push_str(" AND published = 1");
            }
            if filter.featured_only {
                sql.push_str(" AND featured = 1");
            }
            if let Some(category) = &filter.category {
                sql.push_str(" AND category = ?");
                binds.push(Box::new(category.clone()));
            }
            sql.push_str(" ORDER BY created_at DESC LIMIT ?");
            binds.push(Box::new(sql_limit(filter.limit)));

            let mut stmt = conn.prepare(&sql).map_err(store_error)?;
            let rows = stmt
                .query_map(
                    rusqlite::params_from_iter(binds.iter().map(|b| b.as_ref())),
                    row_to_article,
                )
                .map_err(store_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(store_error)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;
    use chrono::Utc;

    fn repo() -> (tempfile::TempDir, SqliteArticleRepository) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        (dir, SqliteArticleRepository::new(db.pool()))
    }

    fn sample(id: &str, slug: &str) -> Article {
        Article::new(id, Slug::new(slug).unwrap(), "Test Event", "admin", Utc::now())
            .with_summary("A thing happened.")
            .with_content("Details.")
            .with_category("General")
            .with_tags(vec!["news".to_string()])
    }

    #[tokio::test]
    async fn test_insert_and_find_round_trip() {
        let (_dir, repo) = repo();
        let article = sample("a-1", "test-event");
        repo.insert(&article).await.unwrap();

        let found = repo.find_by_slug("test-event").await.unwrap().unwrap();
        assert_eq!(found.id, "a-1");
        assert_eq!(found.title, "Test Event");
        assert_eq!(found.tags, vec!["news"]);
        assert!(!found.published);

        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_slug_rejected() {
        let (_dir, repo) = repo();
        repo.insert(&sample("a-1", "test-event")).await.unwrap();
        let err = repo.insert(&sample("a-2", "test-event")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn test_update_persists_publish_state() {
        let (_dir, repo) = repo();
        let mut article = sample("a-1", "test-event");
        repo.insert(&article).await.unwrap();

        article.publish(Utc::now());
        repo.update(&article).await.unwrap();

        let found = repo.find_by_id("a-1").await.unwrap().unwrap();
        assert!(found.published);
        assert!(found.published_at.is_some());
    }

    #[tokio::test]
    async fn test_list_filters_published_and_category() {
        let (_dir, repo) = repo();
        let mut published = sample("a-1", "one");
        published.publish(Utc::now());
        repo.insert(&published).await.unwrap();
        repo.insert(&sample("a-2", "two")).await.unwrap();

        let listed = repo.list(ArticleFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "a-1");

        let all = repo
            .list(ArticleFilter {
                published_only: false,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let none = repo
            .list(ArticleFilter {
                category: Some("Sports".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_accepts_oversized_limit() {
        let (_dir, repo) = repo();
        for (id, slug) in [("a-1", "one"), ("a-2", "two")] {
            let mut article = sample(id, slug);
            article.publish(Utc::now());
            repo.insert(&article).await.unwrap();
        }

        // A cap past i64 range must behave like "everything", not wrap into
        // a negative SQL LIMIT.
        let listed = repo
            .list(ArticleFilter {
                limit: usize::MAX,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);

        let capped = repo
            .list(ArticleFilter {
                limit: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(capped.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_slug() {
        let (_dir, repo) = repo();
        repo.insert(&sample("a-1", "test-event")).await.unwrap();
        repo.delete_by_slug("test-event").await.unwrap();
        assert!(repo.find_by_slug("test-event").await.unwrap().is_none());

        let err = repo.delete_by_slug("test-event").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
