// tests/support/mocks/article_repo.rs
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use conduit_core::domain::article::{
    Article, ArticleId, ArticleRepository, ArticleSlug, NewArticle,
};
use conduit_core::domain::errors::{DomainError, DomainResult};

/// Stores whole aggregates in memory, enforcing slug uniqueness and the
/// version check like the database does.
#[derive(Default)]
pub struct InMemoryArticleRepository {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    articles: HashMap<i64, Article>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let repo = Self::default();
        {
            let mut inner = repo.inner.lock().unwrap();
            for article in articles {
                let id = i64::from(article.id());
                inner.next_id = inner.next_id.max(id);
                inner.articles.insert(id, article);
            }
        }
        repo
    }

    pub fn get(&self, id: ArticleId) -> Option<Article> {
        self.inner
            .lock()
            .unwrap()
            .articles
            .get(&i64::from(id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().articles.len()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .articles
            .values()
            .any(|a| a.contents().slug() == article.contents.slug())
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        inner.next_id += 1;
        let id = ArticleId::new(inner.next_id)?;
        let stored = Article::new(id, article.author, article.contents, article.created_at);
        inner.articles.insert(i64::from(id), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.get(id))
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .articles
            .values()
            .find(|a| a.contents().slug() == slug)
            .cloned())
    }

    async fn save(&self, article: &mut Article) -> DomainResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let id = i64::from(article.id());
        if inner
            .articles
            .iter()
            .any(|(other, a)| *other != id && a.contents().slug() == article.contents().slug())
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let slot = inner
            .articles
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("article {id} not found")))?;
        if slot.version() != article.version() {
            return Err(DomainError::Conflict(format!(
                "article {id} was modified concurrently"
            )));
        }
        article.mark_saved();
        *slot = article.clone();
        Ok(())
    }

    async fn delete_by_id(&self, id: ArticleId) -> DomainResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .articles
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("article {id} not found")))
    }
}
