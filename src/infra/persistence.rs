use std::collections::BTreeMap;

use crate::domain::RoundNo;
use crate::state::{SnapshotError, TournamentSnapshot};

/// Абстракция хранилища снапшотов.
///
/// Сам рантайм ничего не сохраняет: внешний слой (CLI, UI) решает,
/// когда делать автосейв/экспорт/импорт, и куда писать.
/// In-memory реализация нужна для тестов, файловая живёт в dev-CLI.
pub trait SnapshotStore {
    /// Загрузить снапшот по ключу.
    fn load(&self, key: &str) -> Result<Option<TournamentSnapshot>, SnapshotError>;

    /// Сохранить снапшот под ключом (перезаписывает).
    fn save(&mut self, key: &str, snapshot: &TournamentSnapshot) -> Result<(), SnapshotError>;

    /// Все ключи, отсортированные.
    fn keys(&self) -> Result<Vec<String>, SnapshotError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
/// Хранит JSON-строки, чтобы прогонять тот же кодек, что и файлы.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: BTreeMap<String, String>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<TournamentSnapshot>, SnapshotError> {
        self.snapshots
            .get(key)
            .map(|json| decode_snapshot(json))
            .transpose()
    }

    fn save(&mut self, key: &str, snapshot: &TournamentSnapshot) -> Result<(), SnapshotError> {
        let json = encode_snapshot(snapshot)?;
        self.snapshots.insert(key.to_string(), json);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, SnapshotError> {
        Ok(self.snapshots.keys().cloned().collect())
    }
}

/// Снапшот -> JSON (с отступами, UTF-8 как есть).
pub fn encode_snapshot(snapshot: &TournamentSnapshot) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(snapshot).map_err(|e| SnapshotError::Json(e.to_string()))
}

/// JSON -> снапшот. Структура проверяется позже, в `TournamentSnapshot::restore`.
pub fn decode_snapshot(json: &str) -> Result<TournamentSnapshot, SnapshotError> {
    serde_json::from_str(json).map_err(|e| SnapshotError::Json(e.to_string()))
}

/// Ключ автосейва: `{reason}_r{NN}_{seq:04}`, например `after_submit_r03_0007`.
///
/// `seq` различает сохранения одного раунда (повторная отправка после
/// отката не перезаписывает прежний файл).
pub fn autosave_key(reason: &str, round: RoundNo, seq: u32) -> String {
    format!("{}_r{:02}_{:04}", reason, round, seq)
}

/// Следующий номер автосейва: на единицу больше максимального суффикса
/// среди уже сохранённых ключей. Ключи без числового суффикса пропускаются.
pub fn next_autosave_seq(keys: &[String]) -> u32 {
    keys.iter()
        .filter_map(|k| k.rsplit_once('_'))
        .filter_map(|(_, tail)| tail.parse::<u32>().ok())
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
