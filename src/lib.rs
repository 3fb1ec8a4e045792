//! Движок швейцарского турнира 1 на 1.
//!
//! Чётное число игроков (до 24) играет фиксированное число раундов
//! за фиксированными столами на двоих. Здесь живёт всё, что касается
//! алгоритмов: жеребьёвка по очкам без реваншей, рассадка без повторов
//! столов, таблица с тай-брейком и личными встречами, машина раундов с undo.
//!
//! Отрисовка, ввод и файловый ввод-вывод – снаружи: слой представления
//! работает через `api::Command` / `api::Query`, а сохранения идут
//! через `state::TournamentSnapshot`.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod state;
pub mod tournament;

pub use state::TournamentSnapshot;
pub use tournament::{TournamentError, TournamentPhase, TournamentRuntime};
