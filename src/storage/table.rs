use crate::config::IdMode;
use crate::error::{BoardqlError, Result};
use crate::model::{Article, Board, Comment, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A stored entity addressable by its primary key.
pub trait Record: Clone {
    /// Entity name used in error messages.
    const ENTITY: &'static str;
    /// Prefix prepended to generated ids.
    const PREFIX: &'static str;

    fn id(&self) -> &str;
}

impl Record for User {
    const ENTITY: &'static str = "User";
    const PREFIX: &'static str = "user-";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Board {
    const ENTITY: &'static str = "Board";
    const PREFIX: &'static str = "board-";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Article {
    const ENTITY: &'static str = "Article";
    const PREFIX: &'static str = "article-";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Comment {
    const ENTITY: &'static str = "Comment";
    const PREFIX: &'static str = "comment-";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Rows of one entity kind, kept in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Record> Table<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.rows.iter_mut().find(|r| r.id() == id)
    }

    /// Fetches a row or fails with a not-found error naming the entity.
    pub fn require(&self, id: &str) -> Result<&T> {
        self.get(id).ok_or_else(|| BoardqlError::not_found(T::ENTITY, id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.clone()
    }

    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.iter().filter(|r| pred(r)).cloned().collect()
    }

    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.rows.iter().filter(|r| pred(r)).count()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.rows.iter_mut()
    }

    pub fn insert(&mut self, row: T) {
        self.rows.push(row);
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.rows.iter().position(|r| r.id() == id)?;
        Some(self.rows.remove(pos))
    }

    /// Removes every row matching `pred` and returns them.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        let (removed, kept): (Vec<T>, Vec<T>) = self.rows.drain(..).partition(|r| pred(r));
        self.rows = kept;
        removed
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

const ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Hands out record ids. Ids that have ever been issued are never issued again:
/// sequential ids come from a counter that only moves forward, random ids are
/// checked against the ids retired by deletes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdAllocator {
    #[serde(default)]
    next: u64,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    retired: BTreeSet<String>,
}

impl IdAllocator {
    pub fn allocate<T: Record>(
        &mut self,
        mode: IdMode,
        length: usize,
        live: &Table<T>,
    ) -> String {
        loop {
            let suffix = match mode {
                IdMode::Sequential => {
                    self.next += 1;
                    format!("{:0>width$}", self.next, width = length)
                }
                IdMode::Random => nanoid::format(nanoid::rngs::default, &ALPHABET, length),
            };
            let id = format!("{}{}", T::PREFIX, suffix);
            if !live.contains(&id) && !self.retired.contains(&id) {
                return id;
            }
        }
    }

    /// Records a deleted id. Only random ids need remembering.
    pub fn retire(&mut self, mode: IdMode, id: &str) {
        if mode == IdMode::Random {
            self.retired.insert(id.to_string());
        }
    }
}
