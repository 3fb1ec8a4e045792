// src/tournament/mod.rs

pub mod data;
pub mod errors;
pub mod runtime;

pub use data::{TournamentData, TournamentPhase};
pub use errors::{ErrorKind, TournamentError};
pub use runtime::TournamentRuntime;
