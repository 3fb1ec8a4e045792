use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PlayerName, RosterError, TableId};
use crate::engine::EngineError;
use crate::state::SnapshotError;
use crate::tournament::TournamentPhase;

/// Категория ошибки для внешнего слоя (что показывать пользователю).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    /// Ростер: нечётный, дубликат, переполнение, правка после старта.
    Roster,
    /// Не хватает колод/карт. Лечится только reset + новый конфиг.
    Resource,
    /// Жеребьёвка или рассадка исчерпали попытки; раунд можно повторить.
    Pairing,
    /// Не выбран (или выбран неверно) победитель за каким-то столом.
    IncompleteSubmission,
    /// Откатывать нечего.
    UndoUnavailable,
    /// Снапшот битый или не сходится с конфигом.
    Deserialization,
    /// Операция не подходит к текущей фазе турнира.
    InvalidState,
    /// Некорректный конфиг.
    Config,
}

/// Ошибки турнирного рантайма.
///
/// Любая ошибка означает: состояние турнира не изменилось.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("Resource allocation failed: {0}")]
    Resource(EngineError),

    #[error("Round pairing failed: {0}")]
    Pairing(EngineError),

    #[error("Table assignment failed: {0}")]
    Assignment(EngineError),

    #[error("Invalid tournament phase, expected {expected:?}, found {found:?}")]
    InvalidPhase {
        expected: TournamentPhase,
        found: TournamentPhase,
    },

    #[error("All {rounds} rounds completed")]
    RoundCapReached { rounds: u32 },

    #[error("Select winner for Table {table}")]
    IncompleteSubmission { table: TableId },

    #[error("{winner} does not play at Table {table}")]
    InvalidWinner { table: TableId, winner: PlayerName },

    #[error("Table {table} has no active pairing")]
    UnknownTable { table: TableId },

    #[error("Nothing to undo")]
    UndoUnavailable,

    #[error("Invalid state snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Invalid tournament config: {0}")]
    InvalidConfig(String),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::Roster(_) => ErrorKind::Roster,
            TournamentError::Resource(_) => ErrorKind::Resource,
            TournamentError::Pairing(_) | TournamentError::Assignment(_) => ErrorKind::Pairing,
            TournamentError::IncompleteSubmission { .. }
            | TournamentError::InvalidWinner { .. }
            | TournamentError::UnknownTable { .. } => ErrorKind::IncompleteSubmission,
            TournamentError::UndoUnavailable => ErrorKind::UndoUnavailable,
            TournamentError::Snapshot(_) => ErrorKind::Deserialization,
            TournamentError::InvalidPhase { .. } | TournamentError::RoundCapReached { .. } => {
                ErrorKind::InvalidState
            }
            TournamentError::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}
