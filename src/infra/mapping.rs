use std::collections::BTreeMap;

use crate::api::dto::{StandingRowDto, TablePairingDto, TableResourcesDto, TournamentViewDto};
use crate::domain::{Pairing, ResourceAssignment, TableId};
use crate::engine::RankedRow;
use crate::tournament::{TournamentData, TournamentRuntime};

/// Маппинг строки таблицы в DTO.
pub fn standing_to_dto(row: &RankedRow) -> StandingRowDto {
    StandingRowDto {
        place: row.place,
        player: row.standing.player.clone(),
        score: row.standing.score,
        tiebreak: row.standing.tiebreak,
        wins: row.standing.wins,
        losses: row.standing.losses,
    }
}

/// Пары раунда + ресурсы их столов, по возрастанию номера стола.
pub fn map_pairings_to_dto(
    pairings: &BTreeMap<TableId, Pairing>,
    data: &TournamentData,
) -> Vec<TablePairingDto> {
    pairings
        .iter()
        .map(|(&table, pair)| TablePairingDto {
            table,
            player_a: pair.a.clone(),
            player_b: pair.b.clone(),
            score_a: data.score_of(&pair.a),
            score_b: data.score_of(&pair.b),
            decks: data.resources.decks_for(table).to_vec(),
            map: data.resources.map_for(table).map(str::to_string),
        })
        .collect()
}

/// Ресурсы всех столов, у которых есть колоды или карта.
pub fn map_resources_to_dto(resources: &ResourceAssignment) -> Vec<TableResourcesDto> {
    let mut tables: Vec<TableId> = resources
        .decks
        .keys()
        .chain(resources.maps.keys())
        .copied()
        .collect();
    tables.sort_unstable();
    tables.dedup();

    tables
        .into_iter()
        .map(|table| TableResourcesDto {
            table,
            decks: resources.decks_for(table).to_vec(),
            map: resources.map_for(table).map(str::to_string),
        })
        .collect()
}

/// Сводка рантайма для фронта.
pub fn build_tournament_view(runtime: &TournamentRuntime) -> TournamentViewDto {
    let config = runtime.config();
    let data = runtime.data();

    TournamentViewDto {
        phase: runtime.phase(),
        round_no: data.round_no,
        rounds: config.rounds,
        num_tables: config.num_tables,
        players: data.roster.names().to_vec(),
        capacity: config.capacity(),
        active_tables: data.current_tables.len(),
        can_undo: runtime.can_undo(),
        undo_depth: runtime.undo_depth(),
        is_finished: runtime.is_finished(),
    }
}
