pub mod comment;
pub mod contents;
pub mod entity;
pub mod repository;
pub mod specifications;
pub mod update_request;
pub mod value_objects;

pub use comment::Comment;
pub use contents::ArticleContents;
pub use entity::{Article, ArticleKey, ArticleRecord, ArticleView, NewArticle};
pub use repository::ArticleRepository;
pub use update_request::{ArticleUpdateRequest, ArticleUpdateRequestBuilder};
pub use value_objects::{
    ArticleBody, ArticleDescription, ArticleId, ArticleSlug, ArticleTitle, CommentBody, CommentId,
    Tag,
};
