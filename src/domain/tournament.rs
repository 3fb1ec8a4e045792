// src/domain/tournament.rs

use serde::{Deserialize, Serialize};

use crate::domain::resources::{default_deck_pool, default_map_pool};
use crate::domain::SEATS_PER_TABLE;

/// Штраф за повторную встречу в функции стоимости пары.
/// Больше любого возможного разрыва в очках, поэтому реванш
/// выбирается только когда альтернатив нет.
pub const REMATCH_PENALTY: u32 = 1000;

/// Конфигурация турнира.
///
/// Всё, что задаётся до старта и дальше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Количество столов (по два игрока за столом).
    pub num_tables: u32,

    /// Сколько раундов играется всего.
    pub rounds: u32,

    /// Сколько очков даёт победа.
    pub points_for_win: u32,

    /// Сколько разных колод выдаётся каждому столу.
    pub decks_per_table: usize,

    /// Потолок попыток для жеребьёвки и рассадки.
    ///
    /// Тесты ставят маленькое значение, чтобы детерминированно
    /// попадать в ветку ослабленного режима.
    pub max_attempts: u32,

    /// Пул колод (может быть длиннее нужного, может содержать дубликаты).
    pub deck_pool: Vec<String>,

    /// Пул карт (нужна хотя бы одна уникальная карта на стол).
    pub map_pool: Vec<String>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            num_tables: 12,
            rounds: 5,
            points_for_win: 1,
            decks_per_table: 4,
            max_attempts: 2000,
            deck_pool: default_deck_pool(),
            map_pool: default_map_pool(),
        }
    }
}

impl TournamentConfig {
    /// Уменьшенный конфиг для тестов и локальных прогонов:
    /// пулы по умолчанию, своё число столов и раундов.
    pub fn small(num_tables: u32, rounds: u32) -> Self {
        Self {
            num_tables,
            rounds,
            ..Self::default()
        }
    }

    /// Максимум игроков: два на каждый стол.
    pub fn capacity(&self) -> usize {
        self.num_tables as usize * SEATS_PER_TABLE
    }

    /// Структурная валидация конфига.
    ///
    /// Достаточность пулов колод/карт здесь не проверяется:
    /// это всплывает при старте турнира как ошибка ресурсов.
    pub fn validate_full(&self) -> Result<(), String> {
        if self.num_tables == 0 {
            return Err("TournamentConfig: num_tables = 0".into());
        }
        if self.rounds == 0 {
            return Err("TournamentConfig: rounds = 0".into());
        }
        if self.points_for_win == 0 {
            return Err("TournamentConfig: points_for_win = 0".into());
        }
        if self.decks_per_table == 0 {
            return Err("TournamentConfig: decks_per_table = 0".into());
        }
        if self.max_attempts == 0 {
            return Err("TournamentConfig: max_attempts = 0".into());
        }
        Ok(())
    }
}
