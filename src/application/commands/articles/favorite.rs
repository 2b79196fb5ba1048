// src/application/commands/articles/favorite.rs
use super::ArticleCommandService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::user::UserId,
};

pub struct FavoriteArticleCommand {
    pub slug: String,
}

impl ArticleCommandService {
    pub async fn favorite_article(
        &self,
        actor: UserId,
        command: FavoriteArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut article = self.load_by_slug(&command.slug).await?;
        article.after_user_favorites_article(actor);
        self.repo.save(&mut article).await?;

        tracing::debug!(
            article_id = %article.id(),
            user = %actor,
            favorites = article.favorited_count(),
            "article favorited"
        );

        Ok(article.update_favorite_by_user(actor).into())
    }

    pub async fn unfavorite_article(
        &self,
        actor: UserId,
        command: FavoriteArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut article = self.load_by_slug(&command.slug).await?;
        article.after_user_unfavorites_article(actor);
        self.repo.save(&mut article).await?;

        tracing::debug!(
            article_id = %article.id(),
            user = %actor,
            favorites = article.favorited_count(),
            "article unfavorited"
        );

        Ok(article.update_favorite_by_user(actor).into())
    }
}
