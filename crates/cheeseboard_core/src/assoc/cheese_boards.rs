//! Cheese N..M Board association through `Cheese_Board`.
//!
//! Duplicate adds are ignored: the pair stays a single link row and the
//! add call returns `false`.

use crate::model::board::Board;
use crate::model::cheese::Cheese;
use crate::model::link::{CheeseBoardLink, LinkOptions};
use crate::model::schema::Entity;
use crate::repo::{
    BoardRepository, CheeseRepository, LinkRepository, RepoError, RepoResult, Repository,
};
use rusqlite::Connection;

pub struct CheeseBoards<'conn> {
    cheeses: CheeseRepository<'conn>,
    boards: BoardRepository<'conn>,
    links: LinkRepository<'conn>,
}

impl<'conn> CheeseBoards<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            cheeses: CheeseRepository::try_new(conn)?,
            boards: BoardRepository::try_new(conn)?,
            links: LinkRepository::try_new(conn)?,
        })
    }

    /// Links `board` to `cheese`. Returns `false` if they were already linked.
    pub fn add_board_to_cheese(
        &self,
        cheese: &Cheese,
        board: &Board,
        options: LinkOptions,
    ) -> RepoResult<bool> {
        self.resolve_through(options)?;
        self.require_pair(cheese, board)?;
        self.links.insert(cheese.id, board.id)
    }

    /// Links `cheese` to `board`; same link row as [`Self::add_board_to_cheese`].
    pub fn add_cheese_to_board(
        &self,
        board: &Board,
        cheese: &Cheese,
        options: LinkOptions,
    ) -> RepoResult<bool> {
        self.add_board_to_cheese(cheese, board, options)
    }

    pub fn boards_of_cheese(&self, cheese: &Cheese) -> RepoResult<Vec<Board>> {
        self.require_cheese(cheese)?;
        self.links.boards_for_cheese(cheese.id)
    }

    pub fn cheeses_of_board(&self, board: &Board) -> RepoResult<Vec<Cheese>> {
        self.require_board(board)?;
        self.links.cheeses_for_board(board.id)
    }

    pub fn has_link(&self, cheese: &Cheese, board: &Board) -> RepoResult<bool> {
        self.require_pair(cheese, board)?;
        self.links.exists(cheese.id, board.id)
    }

    /// Unlinks the pair. Returns `false` if it was not linked.
    pub fn remove_link(&self, cheese: &Cheese, board: &Board) -> RepoResult<bool> {
        self.require_pair(cheese, board)?;
        self.links.delete(cheese.id, board.id)
    }

    /// Replaces every board linked to `cheese` with `boards`.
    pub fn set_boards_of_cheese(&self, cheese: &Cheese, boards: &[Board]) -> RepoResult<()> {
        self.require_cheese(cheese)?;
        for board in boards {
            self.require_board(board)?;
        }
        let board_ids = boards.iter().map(|board| board.id).collect::<Vec<_>>();
        self.links.replace_boards_for_cheese(cheese.id, &board_ids)
    }

    pub fn links(&self) -> RepoResult<Vec<CheeseBoardLink>> {
        self.links.list()
    }

    fn resolve_through(&self, options: LinkOptions) -> RepoResult<()> {
        match options.through {
            Some(spec) if spec != self.links.spec() => Err(RepoError::UnknownAssociation(spec.name)),
            _ => Ok(()),
        }
    }

    fn require_pair(&self, cheese: &Cheese, board: &Board) -> RepoResult<()> {
        self.require_cheese(cheese)?;
        self.require_board(board)
    }

    fn require_cheese(&self, cheese: &Cheese) -> RepoResult<()> {
        match self.cheeses.find_by_id(cheese.id)? {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found(Cheese::NAME, cheese.id)),
        }
    }

    fn require_board(&self, board: &Board) -> RepoResult<()> {
        match self.boards.find_by_id(board.id)? {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found(Board::NAME, board.id)),
        }
    }
}
