//! Алгоритмы швейцарского турнира.
//!
//! Все функции здесь чистые: на вход срез состояния + параметры,
//! на выход результат. Состояние меняет только `TournamentRuntime`.
//!   - `deal_decks` / `deal_maps` – одноразовая раздача ресурсов по столам
//!   - `make_pairs` – швейцарская жеребьёвка с избеганием реваншей
//!   - `assign_tables` – рассадка пар по столам с избеганием повторов
//!   - `compute_standings` – таблица, тай-брейк и места

pub mod assignment;
pub mod dealer;
pub mod errors;
pub mod pairing;
pub mod standings;

pub use assignment::{assign_tables, TableAssignment};
pub use dealer::{deal_decks, deal_maps};
pub use errors::EngineError;
pub use pairing::make_pairs;
pub use standings::{
    assign_places, compute_records, compute_standings, head_to_head, opponent_net_record,
    sort_standings, PlayerRecord, RankedRow, StandingRow,
};

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
