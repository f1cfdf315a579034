use crate::error::BoardqlError;
use crate::model::{
    self, Article as ModelArticle, Board as ModelBoard, Comment as ModelComment, User as ModelUser,
};
use crate::storage::{ArticleFilter, CommentFilter};
use async_graphql::{ComplexObject, Context, Enum, ErrorExtensions, ID, SimpleObject};

use super::schema::store;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum PostType {
    Normal,
    Announcement,
}

impl From<model::PostType> for PostType {
    fn from(t: model::PostType) -> Self {
        match t {
            model::PostType::Normal => PostType::Normal,
            model::PostType::Announcement => PostType::Announcement,
        }
    }
}

impl From<PostType> for model::PostType {
    fn from(t: PostType) -> Self {
        match t {
            PostType::Normal => model::PostType::Normal,
            PostType::Announcement => model::PostType::Announcement,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub nickname: String,
    pub school: String,
}

impl From<ModelUser> for User {
    fn from(u: ModelUser) -> Self {
        Self {
            id: ID(u.id),
            name: u.name,
            nickname: u.nickname,
            school: u.school,
        }
    }
}

#[ComplexObject]
impl User {
    /// Articles written by this user
    async fn articles(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Article>> {
        let articles = store(ctx)?
            .articles(ArticleFilter::by_author(self.id.as_str()))
            .await
            .map_err(|e| e.extend())?;
        Ok(articles.into_iter().map(Into::into).collect())
    }

    /// Comments written by this user
    async fn comments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Comment>> {
        let comments = store(ctx)?
            .comments(CommentFilter::by_author(self.id.as_str()))
            .await
            .map_err(|e| e.extend())?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Board {
    pub id: ID,
    pub name: String,
}

impl From<ModelBoard> for Board {
    fn from(b: ModelBoard) -> Self {
        Self {
            id: ID(b.id),
            name: b.name,
        }
    }
}

#[ComplexObject]
impl Board {
    /// Articles posted to this board
    async fn articles(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Article>> {
        let articles = store(ctx)?
            .articles(ArticleFilter::by_board(self.id.as_str()))
            .await
            .map_err(|e| e.extend())?;
        Ok(articles.into_iter().map(Into::into).collect())
    }

    /// Comments on articles of this board
    async fn comments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Comment>> {
        let comments = store(ctx)?
            .comments(CommentFilter::by_board(self.id.as_str()))
            .await
            .map_err(|e| e.extend())?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Article {
    pub id: ID,
    pub author_id: ID,
    pub board_id: ID,
    #[graphql(name = "type")]
    pub post_type: PostType,
    pub publish_date: String,
    pub modify_date: Option<String>,
    pub title: String,
    pub content: String,
}

impl From<ModelArticle> for Article {
    fn from(a: ModelArticle) -> Self {
        Self {
            id: ID(a.id),
            author_id: ID(a.author_id),
            board_id: ID(a.board_id),
            post_type: a.post_type.into(),
            publish_date: a.publish_date.to_rfc3339(),
            modify_date: a.modify_date.map(|d| d.to_rfc3339()),
            title: a.title,
            content: a.content,
        }
    }
}

#[ComplexObject]
impl Article {
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<User> {
        resolve_user(ctx, &self.author_id).await
    }

    async fn board(&self, ctx: &Context<'_>) -> async_graphql::Result<Board> {
        resolve_board(ctx, &self.board_id).await
    }

    async fn comments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Comment>> {
        let comments = store(ctx)?
            .comments(CommentFilter::by_article(self.id.as_str()))
            .await
            .map_err(|e| e.extend())?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Comment {
    pub id: ID,
    pub author_id: ID,
    pub board_id: ID,
    pub article_id: ID,
    #[graphql(name = "type")]
    pub post_type: PostType,
    pub publish_date: String,
    pub modify_date: Option<String>,
    pub content: String,
}

impl From<ModelComment> for Comment {
    fn from(c: ModelComment) -> Self {
        Self {
            id: ID(c.id),
            author_id: ID(c.author_id),
            board_id: ID(c.board_id),
            article_id: ID(c.article_id),
            post_type: c.post_type.into(),
            publish_date: c.publish_date.to_rfc3339(),
            modify_date: c.modify_date.map(|d| d.to_rfc3339()),
            content: c.content,
        }
    }
}

#[ComplexObject]
impl Comment {
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<User> {
        resolve_user(ctx, &self.author_id).await
    }

    async fn board(&self, ctx: &Context<'_>) -> async_graphql::Result<Board> {
        resolve_board(ctx, &self.board_id).await
    }

    async fn article(&self, ctx: &Context<'_>) -> async_graphql::Result<Article> {
        store(ctx)?
            .article(&self.article_id)
            .await
            .map_err(|e| e.extend())?
            .map(Into::into)
            .ok_or_else(|| BoardqlError::not_found("Article", self.article_id.as_str()).extend())
    }
}

// Edges are looked up fresh on every resolution; the parent's fetch is not reused.
async fn resolve_user(ctx: &Context<'_>, id: &str) -> async_graphql::Result<User> {
    store(ctx)?
        .user(id)
        .await
        .map_err(|e| e.extend())?
        .map(Into::into)
        .ok_or_else(|| BoardqlError::not_found("User", id).extend())
}

async fn resolve_board(ctx: &Context<'_>, id: &str) -> async_graphql::Result<Board> {
    store(ctx)?
        .board(id)
        .await
        .map_err(|e| e.extend())?
        .map(Into::into)
        .ok_or_else(|| BoardqlError::not_found("Board", id).extend())
}
