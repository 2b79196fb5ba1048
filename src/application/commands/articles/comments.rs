// src/application/commands/articles/comments.rs
use super::ArticleCommandService;
use crate::{
    application::{dto::CommentDto, error::ApplicationResult},
    domain::{
        article::{CommentBody, CommentId},
        user::UserId,
    },
};

pub struct AddCommentCommand {
    pub slug: String,
    pub body: String,
}

pub struct DeleteCommentCommand {
    pub slug: String,
    pub comment_id: i64,
}

impl ArticleCommandService {
    pub async fn add_comment(
        &self,
        actor: UserId,
        command: AddCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let body = CommentBody::new(command.body)?;
        let mut article = self.load_by_slug(&command.slug).await?;

        let now = self.clock.now();
        let comment = CommentDto::from(article.add_comment(actor, body, now));
        article.touch(now);
        self.repo.save(&mut article).await?;

        tracing::info!(
            article_id = %article.id(),
            comment_id = comment.id,
            author = %actor,
            "comment added"
        );

        Ok(comment)
    }

    pub async fn delete_comment(
        &self,
        actor: UserId,
        command: DeleteCommentCommand,
    ) -> ApplicationResult<()> {
        let comment_id = CommentId(command.comment_id);
        let mut article = self.load_by_slug(&command.slug).await?;

        let removed = article.remove_comment_by_user(actor, comment_id)?;
        self.repo.save(&mut article).await?;

        tracing::info!(
            article_id = %article.id(),
            comment_id = %removed.id,
            removed_by = %actor,
            "comment removed"
        );

        Ok(())
    }
}
