// tests/support/builders.rs
use chrono::{DateTime, Utc};
use conduit_core::domain::article::*;
use conduit_core::domain::user::UserId;

use super::mocks::fixed_now;

pub fn user(id: i64) -> UserId {
    UserId::new(id).unwrap()
}

pub struct ArticleBuilder {
    id: i64,
    author_id: i64,
    title: String,
    description: String,
    body: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            id: 1,
            author_id: 1,
            title: "Test Article".into(),
            description: "Test description".into(),
            body: "Test body".into(),
            tags: Vec::new(),
            created_at: fixed_now(),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn author(mut self, author_id: i64) -> Self {
        self.author_id = author_id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Article {
        let contents = ArticleContents::new(
            ArticleTitle::new(self.title).unwrap(),
            ArticleDescription::new(self.description).unwrap(),
            ArticleBody::new(self.body).unwrap(),
            self.tags.into_iter().map(|t| Tag::new(t).unwrap()),
        );
        Article::new(
            ArticleId::new(self.id).unwrap(),
            UserId::new(self.author_id).unwrap(),
            contents,
            self.created_at,
        )
    }
}
