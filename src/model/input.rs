use super::types::PostType;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub nickname: String,
    pub school: String,
}

#[derive(Debug, Clone)]
pub struct NewBoard {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author_id: String,
    pub board_id: String,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub author_id: String,
    pub board_id: String,
    pub article_id: String,
    pub post_type: PostType,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub school: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticlePatch {
    pub board_id: Option<String>,
    pub post_type: Option<PostType>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    pub post_type: Option<PostType>,
    pub content: Option<String>,
}
