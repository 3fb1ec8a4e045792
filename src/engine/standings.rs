// src/engine/standings.rs

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::{MatchRecord, PlayerName};

/// Победы/поражения игрока, посчитанные по протоколу.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRecord {
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    /// Чистый баланс: победы минус поражения.
    pub fn net(&self) -> i64 {
        i64::from(self.wins) - i64::from(self.losses)
    }
}

/// Строка таблицы до проставления мест.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingRow {
    pub player: PlayerName,
    pub score: u32,
    /// Тай-брейк: сумма балансов уникальных соперников.
    pub tiebreak: i64,
    pub wins: u32,
    pub losses: u32,
}

/// Строка таблицы с местом (спортивная нумерация 1,1,1,4).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedRow {
    pub place: u32,
    #[serde(flatten)]
    pub standing: StandingRow,
}

/// Победы и поражения всех игроков ростера.
/// Игрок без партий получает 0/0.
pub fn compute_records(
    players: &[PlayerName],
    match_log: &[MatchRecord],
) -> BTreeMap<PlayerName, PlayerRecord> {
    let mut out: BTreeMap<PlayerName, PlayerRecord> = players
        .iter()
        .map(|p| (p.clone(), PlayerRecord::default()))
        .collect();

    for m in match_log {
        out.entry(m.winner.clone()).or_default().wins += 1;
        out.entry(m.loser().to_string()).or_default().losses += 1;
    }

    out
}

/// Тай-брейк "баланс соперников" (Бухгольц по W-L).
///
/// Для каждого игрока: сумма по УНИКАЛЬНЫМ соперникам их (побед - поражений).
/// Повторная встреча с тем же соперником второй раз не учитывается.
pub fn opponent_net_record(
    players: &[PlayerName],
    match_log: &[MatchRecord],
) -> BTreeMap<PlayerName, i64> {
    let mut opponents: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for m in match_log {
        opponents
            .entry(m.player_a.as_str())
            .or_default()
            .insert(m.player_b.as_str());
        opponents
            .entry(m.player_b.as_str())
            .or_default()
            .insert(m.player_a.as_str());
    }

    let records = compute_records(players, match_log);

    players
        .iter()
        .map(|p| {
            let total = opponents
                .get(p.as_str())
                .map(|opps| {
                    opps.iter()
                        .map(|o| records.get(*o).map(PlayerRecord::net).unwrap_or(0))
                        .sum::<i64>()
                })
                .unwrap_or(0);
            (p.clone(), total)
        })
        .collect()
}

/// Результат личной встречи `a` и `b`.
///
/// `None`, если они не играли. При нескольких встречах решает последняя
/// по порядку протокола.
pub fn head_to_head<'a>(a: &str, b: &str, match_log: &'a [MatchRecord]) -> Option<&'a str> {
    match_log
        .iter()
        .rev()
        .find(|m| m.is_between(a, b))
        .map(|m| m.winner.as_str())
}

/// Отсортированная таблица.
///
/// Ключи: очки (убыв.), тай-брейк (убыв.), имя (возр.). Затем внутри
/// групп с равными очками и тай-брейком соседи переставляются по личной
/// встрече (с откатом на шаг назад после каждой перестановки).
///
/// Игроки, чьи личные встречи образуют цикл (A>B, B>C, C>A), между собой
/// остаются в порядке имён. Остальные пары группы по-прежнему решаются
/// личной встречей.
pub fn sort_standings(
    players: &[PlayerName],
    match_log: &[MatchRecord],
    points_for_win: u32,
) -> Vec<StandingRow> {
    let records = compute_records(players, match_log);
    let tiebreaks = opponent_net_record(players, match_log);

    let mut rows: Vec<StandingRow> = players
        .iter()
        .map(|p| {
            let rec = records.get(p).copied().unwrap_or_default();
            StandingRow {
                player: p.clone(),
                score: rec.wins * points_for_win,
                tiebreak: tiebreaks.get(p).copied().unwrap_or(0),
                wins: rec.wins,
                losses: rec.losses,
            }
        })
        .collect();

    rows.sort_by(|x, y| {
        y.score
            .cmp(&x.score)
            .then(y.tiebreak.cmp(&x.tiebreak))
            .then(x.player.cmp(&y.player))
    });

    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len() && same_bracket(&rows[start], &rows[end]) {
            end += 1;
        }

        let run = &mut rows[start..end];
        if run.len() > 1 {
            let cycles = head_to_head_cycles(run, match_log);
            if !cycles.is_empty() {
                debug!(
                    "standings: cyclic head-to-head among {} of {} players tied at score {}, keeping their name order",
                    cycles.len(),
                    run.len(),
                    run[0].score
                );
            }
            resolve_head_to_head(run, match_log, &cycles);
        }

        start = end;
    }

    rows
}

/// Проставить места по спортивной схеме.
///
/// Игрок делит место с предыдущим тогда и только тогда, когда у них равны
/// очки и тай-брейк И между ними нет результата личной встречи.
/// Иначе место = позиция в списке (1-based).
pub fn assign_places(rows: &[StandingRow], match_log: &[MatchRecord]) -> Vec<RankedRow> {
    let mut out: Vec<RankedRow> = Vec::with_capacity(rows.len());
    let mut place = 1u32;

    for (idx, row) in rows.iter().enumerate() {
        if idx > 0 {
            let prev = &rows[idx - 1];
            let shares_place = same_bracket(prev, row)
                && head_to_head(&prev.player, &row.player, match_log).is_none();
            if !shares_place {
                place = idx as u32 + 1;
            }
        }

        out.push(RankedRow {
            place,
            standing: row.clone(),
        });
    }

    out
}

/// Полная таблица: сортировка + места.
pub fn compute_standings(
    players: &[PlayerName],
    match_log: &[MatchRecord],
    points_for_win: u32,
) -> Vec<RankedRow> {
    let rows = sort_standings(players, match_log, points_for_win);
    assign_places(&rows, match_log)
}

fn same_bracket(x: &StandingRow, y: &StandingRow) -> bool {
    x.score == y.score && x.tiebreak == y.tiebreak
}

/// Соседняя перестановка: победитель личной встречи поднимается выше.
/// Пара из одной циклической компоненты не переставляется.
/// Пара меняется местами только если нижний выиграл, поэтому обратно она
/// уже не поменяется и цикл конечен.
fn resolve_head_to_head(
    run: &mut [StandingRow],
    match_log: &[MatchRecord],
    cycles: &BTreeMap<PlayerName, usize>,
) {
    let mut i = 0;
    while i + 1 < run.len() {
        let upper = &run[i].player;
        let lower = &run[i + 1].player;
        let same_cycle = matches!(
            (cycles.get(upper), cycles.get(lower)),
            (Some(x), Some(y)) if x == y
        );
        let lower_won = !same_cycle
            && head_to_head(upper, lower, match_log).is_some_and(|w| w == lower.as_str());

        if lower_won {
            run.swap(i, i + 1);
            if i > 0 {
                i -= 1;
                continue;
            }
        }
        i += 1;
    }
}

/// Компоненты сильной связности размером больше одного в отношении
/// "обыграл по последней личной встрече" внутри группы.
///
/// Ключ: игрок, значение: номер его компоненты. Игроки вне циклов
/// в карту не попадают.
fn head_to_head_cycles(
    run: &[StandingRow],
    match_log: &[MatchRecord],
) -> BTreeMap<PlayerName, usize> {
    let n = run.len();
    let mut reach = vec![vec![false; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match head_to_head(&run[i].player, &run[j].player, match_log) {
                Some(w) if w == run[i].player => reach[i][j] = true,
                Some(_) => reach[j][i] = true,
                None => {}
            }
        }
    }

    // Транзитивное замыкание (Уоршелл), группа не больше ростера.
    for k in 0..n {
        for i in 0..n {
            if !reach[i][k] {
                continue;
            }
            for j in 0..n {
                if reach[k][j] {
                    reach[i][j] = true;
                }
            }
        }
    }

    let mut out = BTreeMap::new();
    for i in 0..n {
        // Номер компоненты: наименьший индекс взаимно достижимой вершины.
        if let Some(root) = (0..n).find(|&j| j != i && reach[i][j] && reach[j][i]) {
            out.insert(run[i].player.clone(), root.min(i));
        }
    }
    out
}
