use serde::{Deserialize, Serialize};

use crate::infra::mapping::{
    build_tournament_view, map_pairings_to_dto, map_resources_to_dto, standing_to_dto,
};
use crate::state::TournamentSnapshot;
use crate::tournament::TournamentRuntime;

use super::dto::{StandingRowDto, TablePairingDto, TableResourcesDto, TournamentViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Таблица с местами.
    Standings,

    /// Пары текущего раунда (пусто, если раунд не идёт).
    CurrentPairings,

    /// Колоды и карты по столам.
    Resources,

    /// Сводка: фаза, раунд, ростер, undo.
    Status,

    /// Полный снапшот для сохранения.
    Snapshot,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Standings(Vec<StandingRowDto>),
    Pairings(Vec<TablePairingDto>),
    Resources(Vec<TableResourcesDto>),
    Status(TournamentViewDto),
    Snapshot(TournamentSnapshot),
}

/// Выполнить запрос над рантаймом.
pub fn run_query(runtime: &TournamentRuntime, query: Query) -> QueryResponse {
    match query {
        Query::Standings => QueryResponse::Standings(
            runtime.standings().iter().map(standing_to_dto).collect(),
        ),
        Query::CurrentPairings => QueryResponse::Pairings(map_pairings_to_dto(
            runtime.current_pairings(),
            runtime.data(),
        )),
        Query::Resources => QueryResponse::Resources(map_resources_to_dto(runtime.resources())),
        Query::Status => QueryResponse::Status(build_tournament_view(runtime)),
        Query::Snapshot => QueryResponse::Snapshot(runtime.capture()),
    }
}
