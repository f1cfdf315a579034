//! Input validation for forum records.

use crate::error::{BoardqlError, Result};
use crate::model::{ArticlePatch, CommentPatch, NewArticle, NewComment, NewUser, UserPatch};

/// Maximum allowed length for names, nicknames, schools and board names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum allowed length for an article title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for article or comment content.
pub const MAX_CONTENT_LENGTH: usize = 50_000;

/// Maximum allowed length for a record ID.
pub const MAX_ID_LENGTH: usize = 64;

fn validate_text(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BoardqlError::Validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max {
        return Err(BoardqlError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn validate_name(field: &str, name: &str) -> Result<()> {
    validate_text(field, name, MAX_NAME_LENGTH)
}

pub fn validate_title(title: &str) -> Result<()> {
    validate_text("Title", title, MAX_TITLE_LENGTH)
}

pub fn validate_content(content: &str) -> Result<()> {
    validate_text("Content", content, MAX_CONTENT_LENGTH)
}

/// Validates a caller-supplied ID before it reaches the store.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(BoardqlError::Validation("ID cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(BoardqlError::Validation(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_new_user(user: &NewUser) -> Result<()> {
    validate_name("Name", &user.name)?;
    validate_name("Nickname", &user.nickname)?;
    validate_name("School", &user.school)
}

pub fn validate_user_patch(patch: &UserPatch) -> Result<()> {
    if let Some(ref name) = patch.name {
        validate_name("Name", name)?;
    }
    if let Some(ref nickname) = patch.nickname {
        validate_name("Nickname", nickname)?;
    }
    if let Some(ref school) = patch.school {
        validate_name("School", school)?;
    }
    Ok(())
}

pub fn validate_new_article(article: &NewArticle) -> Result<()> {
    validate_id(&article.author_id)?;
    validate_id(&article.board_id)?;
    validate_title(&article.title)?;
    validate_content(&article.content)
}

pub fn validate_article_patch(patch: &ArticlePatch) -> Result<()> {
    if let Some(ref board_id) = patch.board_id {
        validate_id(board_id)?;
    }
    if let Some(ref title) = patch.title {
        validate_title(title)?;
    }
    if let Some(ref content) = patch.content {
        validate_content(content)?;
    }
    Ok(())
}

pub fn validate_new_comment(comment: &NewComment) -> Result<()> {
    validate_id(&comment.author_id)?;
    validate_id(&comment.board_id)?;
    validate_id(&comment.article_id)?;
    validate_content(&comment.content)
}

pub fn validate_comment_patch(patch: &CommentPatch) -> Result<()> {
    if let Some(ref content) = patch.content {
        validate_content(content)?;
    }
    Ok(())
}
