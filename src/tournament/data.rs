// src/tournament/data.rs

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{
    MatchRecord, Pairing, PlayerName, ResourceAssignment, Roster, RoundNo, TableId,
};

/// Фаза турнира.
///
/// Отдельно не хранится: выводится из данных (`TournamentData::phase`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TournamentPhase {
    NotStarted,
    AwaitingPairing,
    AwaitingResults,
    Finished,
}

/// Всё изменяемое состояние турнира одним значением.
///
/// Это же и единица отката: перед применением результатов раунда
/// рантайм кладёт полную копию в стек undo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TournamentData {
    /// Был ли вызван start (ресурсы розданы, ростер заморожен).
    pub started: bool,
    pub round_no: RoundNo,
    pub roster: Roster,
    pub scores: BTreeMap<PlayerName, u32>,
    pub prev_opponents: BTreeMap<PlayerName, BTreeSet<PlayerName>>,
    pub prev_tables: BTreeMap<PlayerName, BTreeSet<TableId>>,
    /// Пары текущего раунда. Не пусто = раунд ждёт результатов.
    pub current_tables: BTreeMap<TableId, Pairing>,
    pub resources: ResourceAssignment,
    pub match_log: Vec<MatchRecord>,
}

impl TournamentData {
    pub fn phase(&self, rounds: u32) -> TournamentPhase {
        if !self.started {
            TournamentPhase::NotStarted
        } else if !self.current_tables.is_empty() {
            TournamentPhase::AwaitingResults
        } else if self.round_no >= rounds {
            TournamentPhase::Finished
        } else {
            TournamentPhase::AwaitingPairing
        }
    }

    pub fn score_of(&self, name: &str) -> u32 {
        self.scores.get(name).copied().unwrap_or(0)
    }

    /// Применить результат одного стола: очки, обе стороны истории соперников,
    /// история столов обоих игроков и запись в протокол.
    pub(crate) fn record_result(
        &mut self,
        table: TableId,
        pair: &Pairing,
        winner: &str,
        points_for_win: u32,
    ) {
        *self.scores.entry(winner.to_string()).or_insert(0) += points_for_win;

        self.prev_opponents
            .entry(pair.a.clone())
            .or_default()
            .insert(pair.b.clone());
        self.prev_opponents
            .entry(pair.b.clone())
            .or_default()
            .insert(pair.a.clone());

        for p in pair.players() {
            self.prev_tables.entry(p.to_string()).or_default().insert(table);
        }

        self.match_log.push(MatchRecord {
            round: self.round_no,
            table,
            player_a: pair.a.clone(),
            player_b: pair.b.clone(),
            winner: winner.to_string(),
        });
    }
}
