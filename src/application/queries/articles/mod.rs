mod comments;
mod get_by_slug;
mod service;

pub use comments::ListCommentsQuery;
pub use get_by_slug::GetArticleBySlugQuery;
pub use service::ArticleQueryService;
