use crate::domain::article::entity::{Article, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Loads and stores the article aggregate as a unit. Comments, favorites
/// and tags are written together with their article.
///
/// `save` is optimistic: it fails with `DomainError::Conflict` when the
/// stored article has moved past `article.version()`, and advances the
/// version of `article` when it succeeds.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    async fn save(&self, article: &mut Article) -> DomainResult<()>;
    async fn delete_by_id(&self, id: ArticleId) -> DomainResult<()>;
}
