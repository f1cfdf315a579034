use crate::model::{Article, Comment};

/// Predicate for article lookups. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub author_id: Option<String>,
    pub board_id: Option<String>,
}

impl ArticleFilter {
    pub fn by_author(author_id: impl Into<String>) -> Self {
        Self {
            author_id: Some(author_id.into()),
            ..Default::default()
        }
    }

    pub fn by_board(board_id: impl Into<String>) -> Self {
        Self {
            board_id: Some(board_id.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        self.author_id
            .as_deref()
            .is_none_or(|id| article.author_id == id)
            && self.board_id.as_deref().is_none_or(|id| article.board_id == id)
    }
}

/// Predicate for comment lookups. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub author_id: Option<String>,
    pub board_id: Option<String>,
    pub article_id: Option<String>,
}

impl CommentFilter {
    pub fn by_author(author_id: impl Into<String>) -> Self {
        Self {
            author_id: Some(author_id.into()),
            ..Default::default()
        }
    }

    pub fn by_board(board_id: impl Into<String>) -> Self {
        Self {
            board_id: Some(board_id.into()),
            ..Default::default()
        }
    }

    pub fn by_article(article_id: impl Into<String>) -> Self {
        Self {
            article_id: Some(article_id.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        self.author_id
            .as_deref()
            .is_none_or(|id| comment.author_id == id)
            && self.board_id.as_deref().is_none_or(|id| comment.board_id == id)
            && self
                .article_id
                .as_deref()
                .is_none_or(|id| comment.article_id == id)
    }
}
