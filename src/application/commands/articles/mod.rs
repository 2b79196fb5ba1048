// src/application/commands/articles/mod.rs
mod comments;
mod create;
mod delete;
mod favorite;
mod ownership;
mod service;
mod update;

pub use comments::{AddCommentCommand, DeleteCommentCommand};
pub use create::{CreateArticleCommand, CreateArticleCommandBuilder};
pub use delete::DeleteArticleCommand;
pub use favorite::FavoriteArticleCommand;
pub use service::ArticleCommandService;
pub use update::UpdateArticleCommand;
