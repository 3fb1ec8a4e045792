use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    MatchRecord, Pairing, PlayerName, ResourceAssignment, Roster, RoundNo, TableId,
    TournamentConfig, SEATS_PER_TABLE,
};
use crate::engine::compute_records;
use crate::tournament::TournamentData;

/// Текущая версия формата снапшота.
pub const FORMAT_VERSION: u32 = 5;

/// Имя тай-брейка, которое пишется в meta.
pub const TIEBREAK_NAME: &str = "buchholz_wl";

/// Ошибки чтения снапшота.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Unsupported snapshot version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid state structure: {0}")]
    Invalid(String),

    #[error("Malformed snapshot JSON: {0}")]
    Json(String),

    #[error("Snapshot storage failed: {0}")]
    Io(String),
}

/// Параметры конфига, записанные в снапшот (для информации и проверки).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SnapshotConfigMeta {
    pub num_tables: u32,
    pub seats_per_table: usize,
    pub rounds: u32,
    pub points_for_win: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotMeta {
    pub version: u32,
    pub config: SnapshotConfigMeta,
    pub tiebreak: String,
}

/// Снапшот турнира для внешнего сохранения (JSON).
///
/// Рантайм сам файлов не пишет: `capture` отдаёт эту структуру,
/// `restore` принимает её обратно. Формат совместим со старыми
/// сохранениями: неизвестные поля игнорируются, `started` необязателен.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentSnapshot {
    pub meta: SnapshotMeta,
    pub round_no: RoundNo,
    pub players: Vec<PlayerName>,
    pub scores: BTreeMap<PlayerName, u32>,
    /// Игрок -> отсортированный список соперников.
    pub prev_opponents: BTreeMap<PlayerName, BTreeSet<PlayerName>>,
    /// Игрок -> отсортированный список столов.
    pub prev_tables: BTreeMap<PlayerName, BTreeSet<TableId>>,
    /// Стол -> [A, B] для раунда, ждущего результатов.
    pub current_table_pairs: BTreeMap<TableId, Pairing>,
    pub tables_to_decks: BTreeMap<TableId, Vec<String>>,
    pub tables_to_maps: BTreeMap<TableId, String>,
    pub match_log: Vec<MatchRecord>,
    /// Отсутствует в старых сохранениях: тогда выводится из данных.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<bool>,
}

impl TournamentSnapshot {
    /// Упаковать состояние рантайма в снапшот.
    pub fn capture(data: &TournamentData, config: &TournamentConfig) -> Self {
        Self {
            meta: SnapshotMeta {
                version: FORMAT_VERSION,
                config: SnapshotConfigMeta {
                    num_tables: config.num_tables,
                    seats_per_table: SEATS_PER_TABLE,
                    rounds: config.rounds,
                    points_for_win: config.points_for_win,
                },
                tiebreak: TIEBREAK_NAME.to_string(),
            },
            round_no: data.round_no,
            players: data.roster.names().to_vec(),
            scores: data.scores.clone(),
            prev_opponents: data.prev_opponents.clone(),
            prev_tables: data.prev_tables.clone(),
            current_table_pairs: data.current_tables.clone(),
            tables_to_decks: data.resources.decks.clone(),
            tables_to_maps: data.resources.maps.clone(),
            match_log: data.match_log.clone(),
            started: Some(data.started),
        }
    }

    /// Развернуть снапшот обратно в состояние, проверив структуру
    /// против текущего конфига.
    pub fn restore(self, config: &TournamentConfig) -> Result<TournamentData, SnapshotError> {
        if self.meta.version > FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.meta.version,
                supported: FORMAT_VERSION,
            });
        }

        let roster = Roster::from_names(self.players)
            .map_err(|e| SnapshotError::Invalid(e.to_string()))?;

        let started = self.started.unwrap_or_else(|| {
            !self.scores.is_empty() || !self.tables_to_decks.is_empty() || self.round_no > 0
        });

        let data = TournamentData {
            started,
            round_no: self.round_no,
            scores: if started {
                roster
                    .iter()
                    .map(|p| (p.clone(), self.scores.get(p).copied().unwrap_or(0)))
                    .collect()
            } else {
                BTreeMap::new()
            },
            roster,
            prev_opponents: self.prev_opponents,
            prev_tables: self.prev_tables,
            current_tables: self.current_table_pairs,
            resources: ResourceAssignment {
                decks: self.tables_to_decks,
                maps: self.tables_to_maps,
            },
            match_log: self.match_log,
        };

        // Очки, которых нет в ростере, молча потерялись бы при нормализации выше.
        if let Some(stray) = self.scores.keys().find(|p| !data.roster.contains(p)) {
            return Err(invalid(format!("score for unknown player {stray}")));
        }

        validate(&data, config)?;
        Ok(data)
    }
}

fn invalid(msg: impl Into<String>) -> SnapshotError {
    SnapshotError::Invalid(msg.into())
}

/// Структурная проверка загруженного состояния.
fn validate(data: &TournamentData, config: &TournamentConfig) -> Result<(), SnapshotError> {
    let roster = &data.roster;
    let table_ok = |t: TableId| (1..=config.num_tables).contains(&t);
    let known = |p: &str| -> Result<(), SnapshotError> {
        if roster.contains(p) {
            Ok(())
        } else {
            Err(invalid(format!("unknown player {p}")))
        }
    };

    if roster.len() > config.capacity() {
        return Err(invalid(format!(
            "{} players exceed capacity {}",
            roster.len(),
            config.capacity()
        )));
    }
    if data.round_no > config.rounds {
        return Err(invalid(format!(
            "round {} exceeds configured {} rounds",
            data.round_no, config.rounds
        )));
    }

    if !data.started {
        if data.round_no != 0 || !data.match_log.is_empty() || !data.current_tables.is_empty() {
            return Err(invalid("tournament not started but has round data"));
        }
        return Ok(());
    }

    if roster.len() % 2 == 1 {
        return Err(invalid(format!("odd roster of {} players", roster.len())));
    }

    for (p, opps) in &data.prev_opponents {
        known(p)?;
        for o in opps {
            known(o)?;
            if o == p {
                return Err(invalid(format!("{p} listed as own opponent")));
            }
        }
    }

    for (p, tables) in &data.prev_tables {
        known(p)?;
        if let Some(t) = tables.iter().find(|t| !table_ok(**t)) {
            return Err(invalid(format!("table {t} out of range for {p}")));
        }
    }

    let mut seated: HashSet<&str> = HashSet::new();
    for (&t, pair) in &data.current_tables {
        if !table_ok(t) {
            return Err(invalid(format!("current pairing on table {t} out of range")));
        }
        if pair.a == pair.b {
            return Err(invalid(format!("table {t} pairs {} with themselves", pair.a)));
        }
        for p in pair.players() {
            known(p)?;
            if !seated.insert(p) {
                return Err(invalid(format!("{p} seated twice in current round")));
            }
        }
    }
    if !data.current_tables.is_empty() && data.round_no == 0 {
        return Err(invalid("active pairings before round 1"));
    }

    if let Some(t) = data
        .resources
        .decks
        .keys()
        .chain(data.resources.maps.keys())
        .find(|t| !table_ok(**t))
    {
        return Err(invalid(format!("resources for table {t} out of range")));
    }

    for m in &data.match_log {
        known(&m.player_a)?;
        known(&m.player_b)?;
        if !m.is_consistent() {
            return Err(invalid(format!(
                "match {} vs {} has winner {}",
                m.player_a, m.player_b, m.winner
            )));
        }
        if !table_ok(m.table) {
            return Err(invalid(format!("match on table {} out of range", m.table)));
        }
        if m.round == 0 || m.round > data.round_no {
            return Err(invalid(format!("match in round {} not yet reached", m.round)));
        }
        if !data.current_tables.is_empty() && m.round == data.round_no {
            return Err(invalid(format!(
                "round {} has active pairings but is already in the match log",
                m.round
            )));
        }

        // История рематчей и столов должна покрывать протокол.
        for (p, o) in [(&m.player_a, &m.player_b), (&m.player_b, &m.player_a)] {
            if !data.prev_opponents.get(p).is_some_and(|opps| opps.contains(o)) {
                return Err(invalid(format!(
                    "history misses {p} vs {o} from round {}",
                    m.round
                )));
            }
            if !data.prev_tables.get(p).is_some_and(|ts| ts.contains(&m.table)) {
                return Err(invalid(format!(
                    "history misses table {} for {p} from round {}",
                    m.table, m.round
                )));
            }
        }
    }

    let records = compute_records(roster.names(), &data.match_log);
    for p in roster.iter() {
        let wins = records.get(p).map(|r| r.wins).unwrap_or(0);
        let expected = wins * config.points_for_win;
        if data.score_of(p) != expected {
            return Err(invalid(format!(
                "score of {p} is {} but match log gives {expected}",
                data.score_of(p)
            )));
        }
    }

    Ok(())
}
