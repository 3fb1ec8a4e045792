use serde::{Deserialize, Serialize};

use crate::domain::{PlayerName, RoundNo, TableId};
use crate::tournament::TournamentPhase;

/// DTO строки турнирной таблицы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingRowDto {
    /// Место (спортивная нумерация: 1,1,1,4).
    pub place: u32,
    pub player: PlayerName,
    pub score: u32,
    /// Баланс соперников (W-L).
    pub tiebreak: i64,
    pub wins: u32,
    pub losses: u32,
}

/// DTO пары текущего раунда вместе с ресурсами стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TablePairingDto {
    pub table: TableId,
    pub player_a: PlayerName,
    pub player_b: PlayerName,
    /// Очки игроков на момент жеребьёвки.
    pub score_a: u32,
    pub score_b: u32,
    pub decks: Vec<String>,
    pub map: Option<String>,
}

/// DTO ресурсов одного стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableResourcesDto {
    pub table: TableId,
    pub decks: Vec<String>,
    pub map: Option<String>,
}

/// Сводка по турниру для шапки фронта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentViewDto {
    pub phase: TournamentPhase,
    pub round_no: RoundNo,
    pub rounds: u32,
    pub num_tables: u32,
    pub players: Vec<PlayerName>,
    pub capacity: usize,
    /// Активных столов в текущем раунде (0 = раунд не идёт).
    pub active_tables: usize,
    pub can_undo: bool,
    pub undo_depth: usize,
    pub is_finished: bool,
}
