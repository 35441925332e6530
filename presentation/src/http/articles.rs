//! Article endpoints

use super::auth::require_admin;
use super::error::ApiError;
use super::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vantage_application::{ArticleFilter, StoreError};
use vantage_domain::{Article, ArticleUpdate, Perspective, Slug};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub perspectives: Vec<Perspective>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let filter = ArticleFilter {
        category: query.category,
        featured_only: query.featured,
        limit: query.limit.unwrap_or(ArticleFilter::default().limit),
        ..Default::default()
    };
    Ok(Json(state.articles.list(filter).await?))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleDetail>, ApiError> {
    let article = state
        .articles
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("article".to_string()))?;
    let perspectives = state.perspectives.list_for_article(&article.id).await?;
    Ok(Json(ArticleDetail {
        article,
        perspectives,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateArticle>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    require_admin(&state, &headers)?;

    let slug = Slug::from_text(&payload.title)?;
    let article = build_article(payload, slug)?;

    match state.articles.insert(&article).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(article))),
        // Slug taken: retry once with a uniquifying suffix
        Err(StoreError::Duplicate) => {
            let suffix = Uuid::new_v4().to_string();
            let suffix = &suffix[..8];
            let slug = Slug::from_text_with_suffix(&article.title, suffix)?;
            let retried = Article {
                slug,
                ..article
            };
            state.articles.insert(&retried).await?;
            Ok((StatusCode::CREATED, Json(retried)))
        }
        Err(e) => Err(e.into()),
    }
}

fn build_article(payload: CreateArticle, slug: Slug) -> Result<Article, ApiError> {
    let now = Utc::now();
    let mut article = Article::new(Uuid::new_v4().to_string(), slug, payload.title, "admin", now)
        .with_summary(payload.summary)
        .with_content(payload.content)
        .with_category(payload.category)
        .with_tags(payload.tags);
    if let Some(url) = payload.image_url {
        article = article.with_image_url(url);
    }
    if payload.featured {
        article = article.featured();
    }
    if payload.published {
        article.publish(now);
    }
    article.validate()?;
    Ok(article)
}

pub async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ArticleUpdate>,
) -> Result<Json<Article>, ApiError> {
    require_admin(&state, &headers)?;

    let mut article = state
        .articles
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("article".to_string()))?;
    article.apply_update(payload, Utc::now());
    article.validate()?;
    state.articles.update(&article).await?;
    Ok(Json(article))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    require_admin(&state, &headers)?;

    match state.articles.delete_by_slug(&slug).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound) => Err(ApiError::NotFound("article".to_string())),
        Err(e) => Err(e.into()),
    }
}
