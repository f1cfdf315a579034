use super::input::{ArticlePatch, CommentPatch, NewArticle, NewComment};
use super::types::PostType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub author_id: String,
    pub board_id: String,

    #[serde(rename = "type", default)]
    pub post_type: PostType,

    pub publish_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modify_date: Option<DateTime<Utc>>,

    pub title: String,
    pub content: String,
}

impl Article {
    pub fn from_draft(id: String, draft: NewArticle) -> Self {
        Self {
            id,
            author_id: draft.author_id,
            board_id: draft.board_id,
            post_type: draft.post_type,
            publish_date: Utc::now(),
            modify_date: None,
            title: draft.title,
            content: draft.content,
        }
    }

    pub fn is_owned_by(&self, author_id: &str) -> bool {
        self.author_id == author_id
    }

    /// Applies the supplied fields and stamps `modify_date`.
    pub fn apply(&mut self, patch: ArticlePatch) {
        if let Some(board_id) = patch.board_id {
            self.board_id = board_id;
        }
        if let Some(post_type) = patch.post_type {
            self.post_type = post_type;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.modify_date = Some(Utc::now());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub board_id: String,
    pub article_id: String,

    #[serde(rename = "type", default)]
    pub post_type: PostType,

    pub publish_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modify_date: Option<DateTime<Utc>>,

    pub content: String,
}

impl Comment {
    pub fn from_draft(id: String, draft: NewComment) -> Self {
        Self {
            id,
            author_id: draft.author_id,
            board_id: draft.board_id,
            article_id: draft.article_id,
            post_type: draft.post_type,
            publish_date: Utc::now(),
            modify_date: None,
            content: draft.content,
        }
    }

    pub fn is_owned_by(&self, author_id: &str) -> bool {
        self.author_id == author_id
    }

    pub fn apply(&mut self, patch: CommentPatch) {
        if let Some(post_type) = patch.post_type {
            self.post_type = post_type;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.modify_date = Some(Utc::now());
    }
}
