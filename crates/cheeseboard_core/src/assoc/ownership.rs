//! User 1..N Board association.

use crate::model::board::{Board, BoardField};
use crate::model::query::{Changes, Filter};
use crate::model::schema::Entity;
use crate::model::user::User;
use crate::repo::{BoardRepository, RepoError, RepoResult, Repository, UserRepository};
use rusqlite::Connection;

/// Traversal and mutation of board ownership.
pub struct Ownership<'conn> {
    users: UserRepository<'conn>,
    boards: BoardRepository<'conn>,
}

impl<'conn> Ownership<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            users: UserRepository::try_new(conn)?,
            boards: BoardRepository::try_new(conn)?,
        })
    }

    /// Makes `user` the owner of `board` and returns the updated board.
    pub fn add_board(&self, user: &User, board: &Board) -> RepoResult<Board> {
        self.require_user(user)?;
        self.boards
            .update(board, Changes::<BoardField>::new().user_id(Some(user.id)))
    }

    /// Boards owned by `user`, ordered by board id.
    pub fn boards_of(&self, user: &User) -> RepoResult<Vec<Board>> {
        self.require_user(user)?;
        self.boards.find_all(&owned_by(user))
    }

    pub fn count_boards(&self, user: &User) -> RepoResult<u64> {
        self.require_user(user)?;
        self.boards.count_where(&owned_by(user))
    }

    pub fn has_board(&self, user: &User, board: &Board) -> RepoResult<bool> {
        self.require_user(user)?;
        let current = self.require_board(board)?;
        Ok(current.user_id == Some(user.id))
    }

    /// Clears the owner of `board` if it is `user`.
    ///
    /// Returns `false` when `board` is owned by someone else or nobody.
    pub fn remove_board(&self, user: &User, board: &Board) -> RepoResult<bool> {
        self.require_user(user)?;
        let current = self.require_board(board)?;
        if current.user_id != Some(user.id) {
            return Ok(false);
        }
        self.boards.update(&current, Changes::<BoardField>::new().user_id(None))?;
        Ok(true)
    }

    /// Sets or clears (`None`) the owner of `board`.
    pub fn set_owner(&self, board: &Board, owner: Option<&User>) -> RepoResult<Board> {
        if let Some(user) = owner {
            self.require_user(user)?;
        }
        self.boards
            .update(board, Changes::<BoardField>::new().user_id(owner.map(|user| user.id)))
    }

    /// Current owner of `board`, read from storage rather than `board.user_id`.
    pub fn owner_of(&self, board: &Board) -> RepoResult<Option<User>> {
        let current = self.require_board(board)?;
        match current.user_id {
            Some(user_id) => self.users.find_by_id(user_id),
            None => Ok(None),
        }
    }

    fn require_user(&self, user: &User) -> RepoResult<User> {
        self.users
            .find_by_id(user.id)?
            .ok_or_else(|| RepoError::not_found(User::NAME, user.id))
    }

    fn require_board(&self, board: &Board) -> RepoResult<Board> {
        self.boards
            .find_by_id(board.id)?
            .ok_or_else(|| RepoError::not_found(Board::NAME, board.id))
    }
}

fn owned_by(user: &User) -> Filter<BoardField> {
    Filter::new().where_eq(BoardField::UserId, user.id)
}
