use super::ArticleQueryService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::user::UserId,
};

pub struct GetArticleBySlugQuery {
    pub slug: String,
}

impl ArticleQueryService {
    /// `favorited` in the result reflects `viewer`; anonymous callers always
    /// see `false`.
    pub async fn get_article_by_slug(
        &self,
        viewer: Option<UserId>,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        let article = self.find_article(query.slug).await?;
        Ok(article.view_for(viewer).into())
    }
}
