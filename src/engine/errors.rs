use crate::domain::{ResourceKind, TableId};

use thiserror::Error;

/// Ошибки алгоритмов движка (раздача ресурсов, жеребьёвка, рассадка).
///
/// Движок ничего не мутирует: любая ошибка означает, что результата нет,
/// а состояние турнира вызывающая сторона не трогала.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Need at least {needed} {kind}s, got {available}")]
    InsufficientPool {
        kind: ResourceKind,
        needed: usize,
        available: usize,
    },

    #[error("Cannot assemble distinct {kind}s for table {table}; diversify the pool")]
    NoDistinctItem { kind: ResourceKind, table: TableId },

    #[error("Odd number of players ({players}); an even roster is required")]
    OddRoster { players: usize },

    #[error("Could not construct Swiss pairs after {attempts} attempts")]
    PairingExhausted { attempts: u32 },

    #[error("More pairs ({pairs}) than tables ({tables})")]
    TooManyPairs { pairs: usize, tables: u32 },

    #[error("Could not assign tables to pairs after {attempts} attempts")]
    AssignmentExhausted { attempts: u32 },
}
