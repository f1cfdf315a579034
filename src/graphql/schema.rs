use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, ID, Object, Schema};

use crate::error::BoardqlError;
use crate::model::{
    ArticlePatch, CommentPatch, NewArticle, NewBoard, NewComment, NewUser, UserPatch,
};
use crate::storage::{ArticleFilter, CommentFilter, ForumStore};
use crate::validation;

use super::ownership::{owned_article, owned_comment};
use super::types::*;

pub type ForumSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct AppState {
    pub store: Arc<dyn ForumStore>,
}

/// Builds the schema around an injected store handle.
pub fn build_schema(store: Arc<dyn ForumStore>) -> ForumSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(AppState { store })
        .finish()
}

pub(crate) fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a dyn ForumStore> {
    Ok(ctx.data::<AppState>()?.store.as_ref())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get a single user by ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<User>> {
        let user = store(ctx)?.user(&id).await.map_err(|e| e.extend())?;
        Ok(user.map(Into::into))
    }

    /// List all users
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        let users = store(ctx)?.users().await.map_err(|e| e.extend())?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Get a single board by ID
    async fn board(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Board>> {
        let board = store(ctx)?.board(&id).await.map_err(|e| e.extend())?;
        Ok(board.map(Into::into))
    }

    /// List all boards
    async fn boards(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Board>> {
        let boards = store(ctx)?.boards().await.map_err(|e| e.extend())?;
        Ok(boards.into_iter().map(Into::into).collect())
    }

    /// Get a single article by ID
    async fn article(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Article>> {
        let article = store(ctx)?.article(&id).await.map_err(|e| e.extend())?;
        Ok(article.map(Into::into))
    }

    /// List articles, optionally narrowed to an author and/or a board
    async fn articles(
        &self,
        ctx: &Context<'_>,
        user_id: Option<ID>,
        board_id: Option<ID>,
    ) -> async_graphql::Result<Vec<Article>> {
        let filter = ArticleFilter {
            author_id: user_id.map(|id| id.0),
            board_id: board_id.map(|id| id.0),
        };
        find_articles(ctx, filter).await
    }

    /// Articles written by a user
    async fn articles_from_user(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
    ) -> async_graphql::Result<Vec<Article>> {
        find_articles(ctx, ArticleFilter::by_author(user_id.0)).await
    }

    /// Articles posted to a board
    async fn articles_from_board(
        &self,
        ctx: &Context<'_>,
        board_id: ID,
    ) -> async_graphql::Result<Vec<Article>> {
        find_articles(ctx, ArticleFilter::by_board(board_id.0)).await
    }

    /// Get a single comment by ID
    async fn comment(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Comment>> {
        let comment = store(ctx)?.comment(&id).await.map_err(|e| e.extend())?;
        Ok(comment.map(Into::into))
    }

    /// List comments, optionally narrowed to an author and/or an article
    async fn comments(
        &self,
        ctx: &Context<'_>,
        user_id: Option<ID>,
        article_id: Option<ID>,
    ) -> async_graphql::Result<Vec<Comment>> {
        let filter = CommentFilter {
            author_id: user_id.map(|id| id.0),
            article_id: article_id.map(|id| id.0),
            ..Default::default()
        };
        find_comments(ctx, filter).await
    }

    /// Comments written by a user
    async fn comments_from_user(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
    ) -> async_graphql::Result<Vec<Comment>> {
        find_comments(ctx, CommentFilter::by_author(user_id.0)).await
    }

    /// Comments on an article
    async fn comments_from_article(
        &self,
        ctx: &Context<'_>,
        article_id: ID,
    ) -> async_graphql::Result<Vec<Comment>> {
        find_comments(ctx, CommentFilter::by_article(article_id.0)).await
    }
}

async fn find_articles(
    ctx: &Context<'_>,
    filter: ArticleFilter,
) -> async_graphql::Result<Vec<Article>> {
    let articles = store(ctx)?.articles(filter).await.map_err(|e| e.extend())?;
    Ok(articles.into_iter().map(Into::into).collect())
}

async fn find_comments(
    ctx: &Context<'_>,
    filter: CommentFilter,
) -> async_graphql::Result<Vec<Comment>> {
    let comments = store(ctx)?.comments(filter).await.map_err(|e| e.extend())?;
    Ok(comments.into_iter().map(Into::into).collect())
}

/// Collapses a failed mutation into `false`, keeping the cause in the log.
fn succeeded<T>(operation: &str, result: Result<T, BoardqlError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(operation, error = %e, code = e.code(), "Mutation rejected");
            false
        }
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register a new user. Returns false if the user could not be stored.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        nickname: String,
        school: String,
    ) -> async_graphql::Result<bool> {
        let store = store(ctx)?;
        let draft = NewUser {
            name,
            nickname,
            school,
        };

        let result = match validation::validate_new_user(&draft) {
            Ok(()) => store.create_user(draft).await,
            Err(e) => Err(e),
        };
        if let Ok(ref user) = result {
            tracing::info!(id = %user.id, name = %user.name, "Created user");
        }
        Ok(succeeded("createUser", result))
    }

    /// Update the supplied fields of a user
    async fn modify_user(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        name: Option<String>,
        nickname: Option<String>,
        school: Option<String>,
    ) -> async_graphql::Result<User> {
        let patch = UserPatch {
            name,
            nickname,
            school,
        };
        validation::validate_user_patch(&patch).map_err(|e| e.extend())?;

        let user = store(ctx)?
            .update_user(&user_id, patch)
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(id = %user.id, "Modified user");
        Ok(user.into())
    }

    /// Delete a user. Refused while the user still owns articles or comments.
    async fn delete_user(&self, ctx: &Context<'_>, user_id: ID) -> async_graphql::Result<bool> {
        let result = store(ctx)?.delete_user(&user_id).await;
        if result.is_ok() {
            tracing::info!(id = %user_id.as_str(), "Deleted user");
        }
        Ok(succeeded("deleteUser", result))
    }

    /// Create a new board. Returns false if the board could not be stored.
    async fn create_board(&self, ctx: &Context<'_>, name: String) -> async_graphql::Result<bool> {
        let store = store(ctx)?;
        let result = match validation::validate_name("Board name", &name) {
            Ok(()) => store.create_board(NewBoard { name }).await,
            Err(e) => Err(e),
        };
        if let Ok(ref board) = result {
            tracing::info!(id = %board.id, name = %board.name, "Created board");
        }
        Ok(succeeded("createBoard", result))
    }

    /// Delete a board. Refused while articles or comments are still on it.
    async fn delete_board(&self, ctx: &Context<'_>, board_id: ID) -> async_graphql::Result<bool> {
        let result = store(ctx)?.delete_board(&board_id).await;
        if result.is_ok() {
            tracing::info!(id = %board_id.as_str(), "Deleted board");
        }
        Ok(succeeded("deleteBoard", result))
    }

    /// Post a new article to a board
    async fn post_article(
        &self,
        ctx: &Context<'_>,
        author_id: ID,
        board_id: ID,
        #[graphql(name = "type")] post_type: PostType,
        title: String,
        content: String,
    ) -> async_graphql::Result<Article> {
        let draft = NewArticle {
            author_id: author_id.0,
            board_id: board_id.0,
            post_type: post_type.into(),
            title,
            content,
        };
        validation::validate_new_article(&draft).map_err(|e| e.extend())?;

        let article = store(ctx)?
            .create_article(draft)
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(id = %article.id, author = %article.author_id, board = %article.board_id, "Posted article");
        Ok(article.into())
    }

    /// Update the supplied fields of an article owned by `authorId`
    async fn modify_article(
        &self,
        ctx: &Context<'_>,
        article_id: ID,
        author_id: ID,
        board_id: Option<ID>,
        #[graphql(name = "type")] post_type: Option<PostType>,
        title: Option<String>,
        content: Option<String>,
    ) -> async_graphql::Result<Article> {
        let store = store(ctx)?;
        let patch = ArticlePatch {
            board_id: board_id.map(|id| id.0),
            post_type: post_type.map(Into::into),
            title,
            content,
        };
        validation::validate_article_patch(&patch).map_err(|e| e.extend())?;

        owned_article(store, &article_id, &author_id)
            .await
            .map_err(|e| e.extend())?;
        let article = store
            .update_article(&article_id, patch)
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(id = %article.id, author = %article.author_id, "Modified article");
        Ok(article.into())
    }

    /// Delete an article and its comments. False unless `authorId` owns it.
    async fn delete_article(
        &self,
        ctx: &Context<'_>,
        author_id: ID,
        article_id: ID,
    ) -> async_graphql::Result<bool> {
        let store = store(ctx)?;
        let result = match owned_article(store, &article_id, &author_id).await {
            Ok(_) => store.delete_article(&article_id, &author_id).await,
            Err(e) => Err(e),
        };
        if result.is_ok() {
            tracing::info!(id = %article_id.as_str(), author = %author_id.as_str(), "Deleted article");
        }
        Ok(succeeded("deleteArticle", result))
    }

    /// Comment on an article
    async fn post_comment(
        &self,
        ctx: &Context<'_>,
        author_id: ID,
        board_id: ID,
        article_id: ID,
        #[graphql(name = "type")] post_type: PostType,
        content: String,
    ) -> async_graphql::Result<Comment> {
        let draft = NewComment {
            author_id: author_id.0,
            board_id: board_id.0,
            article_id: article_id.0,
            post_type: post_type.into(),
            content,
        };
        validation::validate_new_comment(&draft).map_err(|e| e.extend())?;

        let comment = store(ctx)?
            .create_comment(draft)
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(id = %comment.id, author = %comment.author_id, article = %comment.article_id, "Posted comment");
        Ok(comment.into())
    }

    /// Update the supplied fields of a comment owned by `authorId`
    async fn modify_comment(
        &self,
        ctx: &Context<'_>,
        comment_id: ID,
        author_id: ID,
        #[graphql(name = "type")] post_type: Option<PostType>,
        content: Option<String>,
    ) -> async_graphql::Result<Comment> {
        let store = store(ctx)?;
        let patch = CommentPatch {
            post_type: post_type.map(Into::into),
            content,
        };
        validation::validate_comment_patch(&patch).map_err(|e| e.extend())?;

        owned_comment(store, &comment_id, &author_id)
            .await
            .map_err(|e| e.extend())?;
        let comment = store
            .update_comment(&comment_id, patch)
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(id = %comment.id, author = %comment.author_id, "Modified comment");
        Ok(comment.into())
    }

    /// Delete a comment. False unless `authorId` owns it.
    async fn delete_comment(
        &self,
        ctx: &Context<'_>,
        author_id: ID,
        comment_id: ID,
    ) -> async_graphql::Result<bool> {
        let store = store(ctx)?;
        let result = match owned_comment(store, &comment_id, &author_id).await {
            Ok(_) => store.delete_comment(&comment_id, &author_id).await,
            Err(e) => Err(e),
        };
        if result.is_ok() {
            tracing::info!(id = %comment_id.as_str(), author = %author_id.as_str(), "Deleted comment");
        }
        Ok(succeeded("deleteComment", result))
    }
}
