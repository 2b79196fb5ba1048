// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::article::{Article, ArticleRepository, ArticleSlug},
};

pub struct ArticleCommandService {
    pub(super) repo: Arc<dyn ArticleRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(repo: Arc<dyn ArticleRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub(super) async fn load_by_slug(&self, slug: &str) -> ApplicationResult<Article> {
        let slug = ArticleSlug::new(slug)?;
        self.repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }
}
