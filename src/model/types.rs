use crate::error::{BoardqlError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Flag carried by articles and comments: pinned announcement or regular post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Normal,
    Announcement,
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostType::Normal => write!(f, "normal"),
            PostType::Announcement => write!(f, "announcement"),
        }
    }
}

impl FromStr for PostType {
    type Err = BoardqlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(PostType::Normal),
            "announcement" | "notice" => Ok(PostType::Announcement),
            _ => Err(BoardqlError::Validation(format!("Invalid post type: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_type_parse() {
        assert_eq!("Announcement".parse::<PostType>().unwrap(), PostType::Announcement);
        assert_eq!("normal".parse::<PostType>().unwrap(), PostType::Normal);
        assert!("sticky".parse::<PostType>().is_err());
    }

    #[test]
    fn test_post_type_serde() {
        let json = serde_json::to_string(&PostType::Announcement).unwrap();
        assert_eq!(json, "\"announcement\"");
    }
}
