use super::filter::{ArticleFilter, CommentFilter};
use super::snapshot::{ForumState, Snapshot};
use super::ForumStore;
use crate::config::{IdMode, StorageSettings};
use crate::error::{BoardqlError, Result};
use crate::model::{
    Article, ArticlePatch, Board, Comment, CommentPatch, NewArticle, NewBoard, NewComment,
    NewUser, User, UserPatch,
};
use async_trait::async_trait;
use std::path::Path;
use tokio::sync::RwLock;

/// In-process store. All tables live behind one lock, so each call is atomic
/// with respect to every other call.
pub struct MemoryStore {
    state: RwLock<ForumState>,
    id_mode: IdMode,
    id_length: usize,
    snapshot: Option<Snapshot>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store that is never written to disk.
    pub fn new() -> Self {
        let defaults = StorageSettings::default();
        Self::with_ids(defaults.id_mode, defaults.id_length)
    }

    pub fn with_ids(id_mode: IdMode, id_length: usize) -> Self {
        Self {
            state: RwLock::new(ForumState::default()),
            id_mode,
            id_length,
            snapshot: None,
        }
    }

    /// Opens a store from settings, loading the snapshot file when one is
    /// configured. Relative snapshot paths resolve against `root`.
    pub fn open(settings: &StorageSettings, root: &Path) -> Result<Self> {
        let mut store = Self::with_ids(settings.id_mode, settings.id_length);
        if let Some(path) = settings.snapshot_path(root) {
            let snapshot = Snapshot::new(path);
            store.state = RwLock::new(snapshot.load()?);
            store.snapshot = Some(snapshot);
        }
        Ok(store)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Flushes the state to the snapshot file, if any. The file write runs on
    /// the blocking pool.
    async fn commit(&self, state: &ForumState) -> Result<()> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };
        let content = Snapshot::encode(state)?;
        let target = snapshot.clone();
        tokio::task::spawn_blocking(move || target.write(&content))
            .await
            .map_err(|e| BoardqlError::Storage(format!("Snapshot writer failed: {}", e)))?
            .inspect_err(|e| {
                tracing::error!(path = %snapshot.path().display(), error = %e, "Failed to save snapshot");
            })
    }

    /// Runs `change` on a copy of the state. The copy replaces the live state
    /// only after it has been saved, so a failed write leaves nothing behind.
    async fn write<T, F>(&self, change: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut ForumState) -> Result<T> + Send,
    {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let out = change(&mut next)?;
        self.commit(&next).await?;
        *state = next;
        Ok(out)
    }
}

fn missing_reference(entity: &str, id: &str) -> BoardqlError {
    BoardqlError::Constraint(format!("{} {} does not exist", entity, id))
}

#[async_trait]
impl ForumStore for MemoryStore {
    async fn user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn users(&self) -> Result<Vec<User>> {
        Ok(self.state.read().await.users.all())
    }

    async fn create_user(&self, draft: NewUser) -> Result<User> {
        self.write(|state| {
            let ForumState { ids, users, .. } = state;
            let id = ids.allocate(self.id_mode, self.id_length, users);
            let user = User::from_draft(id, draft);
            users.insert(user.clone());
            Ok(user)
        })
        .await
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User> {
        self.write(|state| {
            let user = state
                .users
                .get_mut(id)
                .ok_or_else(|| BoardqlError::not_found("User", id))?;
            user.apply(patch);
            Ok(user.clone())
        })
        .await
    }

    async fn delete_user(&self, id: &str) -> Result<User> {
        self.write(|state| {
            state.users.require(id)?;

            let articles = state.articles.count(|a| a.author_id == id);
            let comments = state.comments.count(|c| c.author_id == id);
            if articles > 0 || comments > 0 {
                return Err(BoardqlError::Constraint(format!(
                    "User {} still owns {} article(s) and {} comment(s)",
                    id, articles, comments
                )));
            }

            let user = state
                .users
                .remove(id)
                .ok_or_else(|| BoardqlError::not_found("User", id))?;
            state.ids.retire(self.id_mode, id);
            Ok(user)
        })
        .await
    }

    async fn board(&self, id: &str) -> Result<Option<Board>> {
        Ok(self.state.read().await.boards.get(id).cloned())
    }

    async fn boards(&self) -> Result<Vec<Board>> {
        Ok(self.state.read().await.boards.all())
    }

    async fn create_board(&self, draft: NewBoard) -> Result<Board> {
        self.write(|state| {
            let ForumState { ids, boards, .. } = state;
            let id = ids.allocate(self.id_mode, self.id_length, boards);
            let board = Board::new(id, draft.name);
            boards.insert(board.clone());
            Ok(board)
        })
        .await
    }

    async fn delete_board(&self, id: &str) -> Result<Board> {
        self.write(|state| {
            state.boards.require(id)?;

            let articles = state.articles.count(|a| a.board_id == id);
            let comments = state.comments.count(|c| c.board_id == id);
            if articles > 0 || comments > 0 {
                return Err(BoardqlError::Constraint(format!(
                    "Board {} still holds {} article(s) and {} comment(s)",
                    id, articles, comments
                )));
            }

            let board = state
                .boards
                .remove(id)
                .ok_or_else(|| BoardqlError::not_found("Board", id))?;
            state.ids.retire(self.id_mode, id);
            Ok(board)
        })
        .await
    }

    async fn article(&self, id: &str) -> Result<Option<Article>> {
        Ok(self.state.read().await.articles.get(id).cloned())
    }

    async fn articles(&self, filter: ArticleFilter) -> Result<Vec<Article>> {
        Ok(self
            .state
            .read()
            .await
            .articles
            .filter(|a| filter.matches(a)))
    }

    async fn create_article(&self, draft: NewArticle) -> Result<Article> {
        self.write(|state| {
            if !state.users.contains(&draft.author_id) {
                return Err(missing_reference("User", &draft.author_id));
            }
            if !state.boards.contains(&draft.board_id) {
                return Err(missing_reference("Board", &draft.board_id));
            }

            let ForumState { ids, articles, .. } = state;
            let id = ids.allocate(self.id_mode, self.id_length, articles);
            let article = Article::from_draft(id, draft);
            articles.insert(article.clone());
            Ok(article)
        })
        .await
    }

    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Article> {
        self.write(|state| {
            if let Some(ref board_id) = patch.board_id {
                if !state.boards.contains(board_id) {
                    return Err(missing_reference("Board", board_id));
                }
            }

            let article = state
                .articles
                .get_mut(id)
                .ok_or_else(|| BoardqlError::not_found("Article", id))?;
            let moved = patch
                .board_id
                .as_deref()
                .is_some_and(|b| b != article.board_id);
            article.apply(patch);
            let article = article.clone();

            // comments follow their article to the new board
            if moved {
                for comment in state
                    .comments
                    .iter_mut()
                    .filter(|c| c.article_id == article.id)
                {
                    comment.board_id = article.board_id.clone();
                }
            }

            Ok(article)
        })
        .await
    }

    async fn delete_article(&self, id: &str, author_id: &str) -> Result<Article> {
        self.write(|state| {
            if !state
                .articles
                .get(id)
                .is_some_and(|a| a.is_owned_by(author_id))
            {
                return Err(BoardqlError::not_found("Article", id));
            }

            let article = state
                .articles
                .remove(id)
                .ok_or_else(|| BoardqlError::not_found("Article", id))?;
            let removed = state.comments.remove_where(|c| c.article_id == id);
            state.ids.retire(self.id_mode, id);
            for comment in &removed {
                state.ids.retire(self.id_mode, &comment.id);
            }
            if !removed.is_empty() {
                tracing::debug!(article = %id, comments = removed.len(), "Removed comments with article");
            }

            Ok(article)
        })
        .await
    }

    async fn comment(&self, id: &str) -> Result<Option<Comment>> {
        Ok(self.state.read().await.comments.get(id).cloned())
    }

    async fn comments(&self, filter: CommentFilter) -> Result<Vec<Comment>> {
        Ok(self
            .state
            .read()
            .await
            .comments
            .filter(|c| filter.matches(c)))
    }

    async fn create_comment(&self, draft: NewComment) -> Result<Comment> {
        self.write(|state| {
            if !state.users.contains(&draft.author_id) {
                return Err(missing_reference("User", &draft.author_id));
            }
            if !state.boards.contains(&draft.board_id) {
                return Err(missing_reference("Board", &draft.board_id));
            }
            let article = state
                .articles
                .get(&draft.article_id)
                .ok_or_else(|| missing_reference("Article", &draft.article_id))?;
            if article.board_id != draft.board_id {
                return Err(BoardqlError::Constraint(format!(
                    "Article {} is not on board {}",
                    draft.article_id, draft.board_id
                )));
            }

            let ForumState { ids, comments, .. } = state;
            let id = ids.allocate(self.id_mode, self.id_length, comments);
            let comment = Comment::from_draft(id, draft);
            comments.insert(comment.clone());
            Ok(comment)
        })
        .await
    }

    async fn update_comment(&self, id: &str, patch: CommentPatch) -> Result<Comment> {
        self.write(|state| {
            let comment = state
                .comments
                .get_mut(id)
                .ok_or_else(|| BoardqlError::not_found("Comment", id))?;
            comment.apply(patch);
            Ok(comment.clone())
        })
        .await
    }

    async fn delete_comment(&self, id: &str, author_id: &str) -> Result<Comment> {
        self.write(|state| {
            if !state
                .comments
                .get(id)
                .is_some_and(|c| c.is_owned_by(author_id))
            {
                return Err(BoardqlError::not_found("Comment", id));
            }

            let comment = state
                .comments
                .remove(id)
                .ok_or_else(|| BoardqlError::not_found("Comment", id))?;
            state.ids.retire(self.id_mode, id);
            Ok(comment)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostType;
    use tempfile::TempDir;

    async fn seed(store: &MemoryStore) -> (User, Board, Article) {
        let user = store
            .create_user(NewUser {
                name: "Kim".to_string(),
                nickname: "kimchi".to_string(),
                school: "SNU".to_string(),
            })
            .await
            .unwrap();
        let board = store
            .create_board(NewBoard {
                name: "free".to_string(),
            })
            .await
            .unwrap();
        let article = store
            .create_article(NewArticle {
                author_id: user.id.clone(),
                board_id: board.id.clone(),
                post_type: PostType::Normal,
                title: "Hello".to_string(),
                content: "First".to_string(),
            })
            .await
            .unwrap();
        (user, board, article)
    }

    fn comment_on(article: &Article, author_id: &str) -> NewComment {
        NewComment {
            author_id: author_id.to_string(),
            board_id: article.board_id.clone(),
            article_id: article.id.clone(),
            post_type: PostType::Normal,
            content: "reply".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_article_requires_board() {
        let store = MemoryStore::new();
        let (user, _, _) = seed(&store).await;

        let result = store
            .create_article(NewArticle {
                author_id: user.id.clone(),
                board_id: "board-missing".to_string(),
                post_type: PostType::Normal,
                title: "Orphan".to_string(),
                content: "nowhere".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BoardqlError::Constraint(_))));
        assert_eq!(store.articles(ArticleFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_comment_board_must_match_article() {
        let store = MemoryStore::new();
        let (user, _, article) = seed(&store).await;
        let other = store
            .create_board(NewBoard {
                name: "other".to_string(),
            })
            .await
            .unwrap();

        let mut draft = comment_on(&article, &user.id);
        draft.board_id = other.id;
        let result = store.create_comment(draft).await;
        assert!(matches!(result, Err(BoardqlError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_delete_user_restricted_by_content() {
        let store = MemoryStore::new();
        let (user, _, article) = seed(&store).await;

        let result = store.delete_user(&user.id).await;
        assert!(matches!(result, Err(BoardqlError::Constraint(_))));
        assert!(store.user(&user.id).await.unwrap().is_some());

        store.delete_article(&article.id, &user.id).await.unwrap();
        store.delete_user(&user.id).await.unwrap();
        assert!(store.user(&user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_board_restricted_by_articles() {
        let store = MemoryStore::new();
        let (_, board, _) = seed(&store).await;
        let result = store.delete_board(&board.id).await;
        assert!(matches!(result, Err(BoardqlError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_delete_article_checks_author_and_cascades() {
        let store = MemoryStore::new();
        let (user, _, article) = seed(&store).await;
        let comment = store
            .create_comment(comment_on(&article, &user.id))
            .await
            .unwrap();

        let wrong = store.delete_article(&article.id, "user-someone").await;
        assert!(matches!(wrong, Err(BoardqlError::NotFound { .. })));
        assert!(store.article(&article.id).await.unwrap().is_some());

        store.delete_article(&article.id, &user.id).await.unwrap();
        assert!(store.article(&article.id).await.unwrap().is_none());
        assert!(store.comment(&comment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_moving_article_moves_comments() {
        let store = MemoryStore::new();
        let (user, _, article) = seed(&store).await;
        let comment = store
            .create_comment(comment_on(&article, &user.id))
            .await
            .unwrap();
        let target = store
            .create_board(NewBoard {
                name: "archive".to_string(),
            })
            .await
            .unwrap();

        let moved = store
            .update_article(
                &article.id,
                ArticlePatch {
                    board_id: Some(target.id.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.board_id, target.id);

        let comment = store.comment(&comment.id).await.unwrap().unwrap();
        assert_eq!(comment.board_id, target.id);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryStore::with_ids(IdMode::Sequential, 4);
        let board = store
            .create_board(NewBoard {
                name: "tmp".to_string(),
            })
            .await
            .unwrap();
        store.delete_board(&board.id).await.unwrap();

        let next = store
            .create_board(NewBoard {
                name: "tmp".to_string(),
            })
            .await
            .unwrap();
        assert_ne!(board.id, next.id);
    }

    #[tokio::test]
    async fn test_filters() {
        let store = MemoryStore::new();
        let (user, board, article) = seed(&store).await;

        let by_author = store
            .articles(ArticleFilter::by_author(user.id.clone()))
            .await
            .unwrap();
        assert_eq!(by_author, vec![article.clone()]);
        assert!(
            store
                .articles(ArticleFilter::by_author("user-nobody"))
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            store
                .articles(ArticleFilter::by_board(board.id.clone()))
                .await
                .unwrap()
                .len(),
            1
        );

        store
            .create_comment(comment_on(&article, &user.id))
            .await
            .unwrap();
        assert_eq!(
            store
                .comments(CommentFilter::by_article(article.id.clone()))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_open_reloads_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let settings = StorageSettings {
            path: Some("forum.json".to_string()),
            ..Default::default()
        };

        let user_id = {
            let store = MemoryStore::open(&settings, temp_dir.path()).unwrap();
            let (user, _, _) = seed(&store).await;
            user.id
        };
        assert!(temp_dir.path().join("forum.json").exists());

        let reopened = MemoryStore::open(&settings, temp_dir.path()).unwrap();
        let user = reopened.user(&user_id).await.unwrap().unwrap();
        assert_eq!(user.nickname, "kimchi");

        // the id counter survives the reload
        let board = reopened
            .create_board(NewBoard {
                name: "second".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(board.id, "board-00000004");
        assert_eq!(reopened.articles(ArticleFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_state_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let settings = StorageSettings {
            path: Some("forum.json".to_string()),
            ..Default::default()
        };
        let store = MemoryStore::open(&settings, temp_dir.path()).unwrap();
        let (user, _, article) = seed(&store).await;

        // a directory where the snapshot should go makes every save fail
        let path = temp_dir.path().join("forum.json");
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let created = store
            .create_user(NewUser {
                name: "Lee".to_string(),
                nickname: "lee".to_string(),
                school: "KAIST".to_string(),
            })
            .await;
        assert!(matches!(created, Err(BoardqlError::Storage(_))));
        assert_eq!(store.users().await.unwrap().len(), 1);

        let patched = store
            .update_article(
                &article.id,
                ArticlePatch {
                    title: Some("Changed".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(patched.is_err());
        let current = store.article(&article.id).await.unwrap().unwrap();
        assert_eq!(current.title, "Hello");
        assert!(current.modify_date.is_none());

        assert!(store.delete_article(&article.id, &user.id).await.is_err());
        assert!(store.article(&article.id).await.unwrap().is_some());

        // once the path is writable again the next id follows the last saved one
        std::fs::remove_dir(&path).unwrap();
        let board = store
            .create_board(NewBoard {
                name: "retry".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(board.id, "board-00000004");
    }
}
