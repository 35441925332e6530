//! SQLite-backed persona repository

use super::{
    conversion_error, decode_list, decode_timestamp, encode_list, encode_timestamp, store_error,
    with_conn, DbPool,
};
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use vantage_application::{PersonaRepository, StoreError};
use vantage_domain::{Persona, PersonaCategory, Slug};

const COLUMNS: &str = "id, slug, name, title, description, image_url, traits, \
                       speaking_style, expertise, quirks, category, active, created_at";

pub struct SqlitePersonaRepository {
    pool: DbPool,
}

impl SqlitePersonaRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_persona(row: &Row<'_>) -> rusqlite::Result<Persona> {
    let slug: String = row.get(1)?;
    let traits: String = row.get(6)?;
    let quirks: String = row.get(9)?;
    let category: String = row.get(10)?;
    let created_at: String = row.get(12)?;

    Ok(Persona {
        id: row.get(0)?,
        slug: Slug::new(slug).map_err(conversion_error)?,
        name: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        image_url: row.get(5)?,
        traits: decode_list(&traits)?,
        speaking_style: row.get(7)?,
        expertise: row.get(8)?,
        quirks: decode_list(&quirks)?,
        category: category
            .parse::<PersonaCategory>()
            .map_err(conversion_error)?,
        active: row.get(11)?,
        created_at: decode_timestamp(&created_at)?,
    })
}

#[async_trait]
impl PersonaRepository for SqlitePersonaRepository {
    async fn insert(&self, persona: &Persona) -> Result<(), StoreError> {
        let persona = persona.clone();
        with_conn(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO personas (id, slug, name, title, description, image_url, traits,
                                       speaking_style, expertise, quirks, category, active,
                                       created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    persona.id,
                    persona.slug.as_str(),
                    persona.name,
                    persona.title,
                    persona.description,
                    persona.image_url,
                    encode_list(&persona.traits)?,
                    persona.speaking_style,
                    persona.expertise,
                    encode_list(&persona.quirks)?,
                    persona.category.to_string(),
                    persona.active,
                    encode_timestamp(&persona.created_at),
                ],
            )
            .map_err(store_error)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, persona: &Persona) -> Result<(), StoreError> {
        let persona = persona.clone();
        with_conn(&self.pool, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE personas
                     SET name = ?2, title = ?3, description = ?4, image_url = ?5, traits = ?6,
                         speaking_style = ?7, expertise = ?8, quirks = ?9, category = ?10,
                         active = ?11
                     WHERE id = ?1",
                    params![
                        persona.id,
                        persona.name,
                        persona.title,
                        persona.description,
                        persona.image_url,
                        encode_list(&persona.traits)?,
                        persona.speaking_style,
                        persona.expertise,
                        encode_list(&persona.quirks)?,
                        persona.category.to_string(),
                        persona.active,
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
                .execute("DELETE FROM personas WHERE slug = ?1", params![slug])
                .map_err(store_error)?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Persona>, StoreError> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM personas WHERE id = ?1"),
                params![id],
                row_to_persona,
            )
            .optional()
            .map_err(store_error)
        })
        .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Persona>, StoreError> {
        let slug = slug.to_string();
        with_conn(&self.pool, move |conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM personas WHERE slug = ?1"),
                params![slug],
                row_to_persona,
            )
            .optional()
            .map_err(store_error)
        })
        .await
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<Persona>, StoreError> {
        // One lookup per id keeps the caller's order without a post-sort;
        // batch sizes here are a handful of personas at most.
        let ids = ids.to_vec();
        with_conn(&self.pool, move |conn| {
            let mut stmt = conn
                .prepare(&format!("SELECT {COLUMNS} FROM personas WHERE id = ?1"))
                .map_err(store_error)?;

            let mut found = Vec::with_capacity(ids.len());
            for id in &ids {
                if let Some(persona) = stmt
                    .query_row(params![id], row_to_persona)
                    .optional()
                    .map_err(store_error)?
                {
                    found.push(persona);
                }
            }
            Ok(found)
        })
        .await
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<Persona>, StoreError> {
        with_conn(&self.pool, move |conn| {
            let sql = if include_inactive {
                format!("SELECT {COLUMNS} FROM personas ORDER BY name")
            } else {
                format!("SELECT {COLUMNS} FROM personas WHERE active = 1 ORDER BY name")
            };
            let mut stmt = conn.prepare(&sql).map_err(store_error)?;
            let rows = stmt.query_map([], row_to_persona).map_err(store_error)?;
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

    fn repo() -> (tempfile::TempDir, SqlitePersonaRepository) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        (dir, SqlitePersonaRepository::new(db.pool()))
    }

    fn sample(id: &str, slug: &str, name: &str) -> Persona {
        Persona::new(
            id,
            Slug::new(slug).unwrap(),
            name,
            "Commentator",
            PersonaCategory::Professional,
            Utc::now(),
        )
        .with_description("d")
        .with_traits(vec!["curious".to_string(), "direct".to_string()])
        .with_speaking_style("plain")
        .with_expertise("things")
        .with_quirks(vec!["quotes proverbs".to_string()])
    }

    #[tokio::test]
    async fn test_insert_and_find_round_trip() {
        let (_dir, repo) = repo();
        repo.insert(&sample("p-1", "ada", "Ada")).await.unwrap();

        let found = repo.find_by_slug("ada").await.unwrap().unwrap();
        assert_eq!(found.name, "Ada");
        assert_eq!(found.traits, vec!["curious", "direct"]);
        assert_eq!(found.category, PersonaCategory::Professional);
        assert!(found.active);
    }

    #[tokio::test]
    async fn test_find_many_preserves_order_and_drops_unknown() {
        let (_dir, repo) = repo();
        repo.insert(&sample("p-1", "ada", "Ada")).await.unwrap();
        repo.insert(&sample("p-2", "ben", "Ben")).await.unwrap();

        let found = repo
            .find_many(&[
                "p-2".to_string(),
                "ghost".to_string(),
                "p-1".to_string(),
            ])
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-2", "p-1"]);
    }

    #[tokio::test]
    async fn test_list_hides_inactive_by_default() {
        let (_dir, repo) = repo();
        let mut inactive = sample("p-1", "ada", "Ada");
        inactive.active = false;
        repo.insert(&inactive).await.unwrap();
        repo.insert(&sample("p-2", "ben", "Ben")).await.unwrap();

        assert_eq!(repo.list(false).await.unwrap().len(), 1);
        assert_eq!(repo.list(true).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let (_dir, repo) = repo();
        repo.insert(&sample("p-1", "ada", "Ada")).await.unwrap();
        let err = repo.insert(&sample("p-2", "ada", "Other")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }
}
