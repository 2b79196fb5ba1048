use crate::domain::article::{ArticleView, Comment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub author_id: i64,
    pub favorited: bool,
    pub favorites_count: usize,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleView<'_>> for ArticleDto {
    fn from(view: ArticleView<'_>) -> Self {
        let article = view.article();
        let contents = article.contents();
        Self {
            id: article.id().into(),
            slug: contents.slug().to_string(),
            title: contents.title().to_string(),
            description: contents.description().as_str().to_owned(),
            body: contents.body().as_str().to_owned(),
            tag_list: contents
                .tags()
                .iter()
                .map(|tag| tag.as_str().to_owned())
                .collect(),
            author_id: article.author().into(),
            favorited: view.is_favorited(),
            favorites_count: article.favorited_count(),
            created_at: article.created_at(),
            updated_at: article.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Comment> for CommentDto {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.into(),
            body: comment.body.as_str().to_owned(),
            author_id: comment.author.into(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
