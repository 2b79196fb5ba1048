use std::sync::Arc;

use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::article::{Article, ArticleRepository, ArticleSlug},
};

pub struct ArticleQueryService {
    pub(super) repo: Arc<dyn ArticleRepository>,
}

impl ArticleQueryService {
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    pub(super) async fn find_article(&self, slug: String) -> ApplicationResult<Article> {
        let slug = ArticleSlug::new(slug)?;
        self.repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }
}
