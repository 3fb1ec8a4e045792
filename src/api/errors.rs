use serde::{Deserialize, Serialize};

use crate::tournament::{ErrorKind, TournamentError};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON или сид).
    BadRequest(String),

    /// Ростер: нечётный, дубликат, переполнение, правка после старта.
    Roster(String),

    /// Не хватает колод/карт под конфиг. Нужен reset.
    Resource(String),

    /// Жеребьёвка/рассадка не сошлась. Раунд можно повторить.
    Pairing(String),

    /// Не выбран победитель за каким-то столом.
    IncompleteSubmission(String),

    /// Откатывать нечего (информационное).
    UndoUnavailable,

    /// Снапшот не загрузился, текущее состояние не тронуто.
    Snapshot(String),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Конфиг турнира некорректен.
    Config(String),
}

impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        let msg = err.to_string();
        match err.kind() {
            ErrorKind::Roster => ApiError::Roster(msg),
            ErrorKind::Resource => ApiError::Resource(msg),
            ErrorKind::Pairing => ApiError::Pairing(msg),
            ErrorKind::IncompleteSubmission => ApiError::IncompleteSubmission(msg),
            ErrorKind::UndoUnavailable => ApiError::UndoUnavailable,
            ErrorKind::Deserialization => ApiError::Snapshot(msg),
            ErrorKind::InvalidState => ApiError::InvalidCommand(msg),
            ErrorKind::Config => ApiError::Config(msg),
        }
    }
}
