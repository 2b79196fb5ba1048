use crate::domain::article::comment::Comment;
use crate::domain::article::entity::Article;
use crate::domain::user::UserId;

/// A comment may be removed by the article's author or by whoever wrote it.
pub struct CanRemoveCommentSpec<'a> {
    article: &'a Article,
    comment: &'a Comment,
    user_id: UserId,
}

impl<'a> CanRemoveCommentSpec<'a> {
    pub fn new(article: &'a Article, comment: &'a Comment, user_id: UserId) -> Self {
        Self {
            article,
            comment,
            user_id,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.article.is_written_by(self.user_id) || self.comment.is_written_by(self.user_id)
    }
}

/// Only the author may edit or delete an article.
pub struct CanModifyArticleSpec<'a> {
    article: &'a Article,
    user_id: UserId,
}

impl<'a> CanModifyArticleSpec<'a> {
    pub fn new(article: &'a Article, user_id: UserId) -> Self {
        Self { article, user_id }
    }

    pub fn is_satisfied(&self) -> bool {
        self.article.is_written_by(self.user_id)
    }
}
