// src/engine/pairing.rs

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::{debug, warn};

use crate::domain::{Pairing, PlayerName, REMATCH_PENALTY};
use crate::engine::{EngineError, RandomSource};

/// Размер окна, внутри которого лесенка перемешивается перед каждой попыткой.
const LADDER_WINDOW: usize = 4;

/// Швейцарская жеребьёвка 1 на 1.
///
/// Вход:
///   - `players`: ростер (чётный);
///   - `scores`: очки игроков (нет записи = 0);
///   - `prev_opponents`: с кем игрок уже встречался;
///   - `max_attempts`: потолок строгих попыток.
///
/// Алгоритм:
///   1. Раскладываем игроков по группам очков, группы по убыванию,
///      внутри группы перемешиваем. Получается лесенка.
///   2. До `max_attempts` раз: перемешиваем лесенку окнами по 4 и
///      пробуем жадно собрать пары без реваншей. Первый свободный игрок
///      берёт соперника с минимальным штрафом `|разрыв очков|`.
///   3. Если строгий режим так и не собрался, один проход с разрешёнными
///      реваншами (штраф `+REMATCH_PENALTY` всё равно отодвигает их в конец).
pub fn make_pairs<R: RandomSource>(
    players: &[PlayerName],
    scores: &BTreeMap<PlayerName, u32>,
    prev_opponents: &BTreeMap<PlayerName, BTreeSet<PlayerName>>,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Vec<Pairing>, EngineError> {
    if players.len() % 2 == 1 {
        return Err(EngineError::OddRoster {
            players: players.len(),
        });
    }
    if players.is_empty() {
        return Err(EngineError::PairingExhausted { attempts: 0 });
    }

    let ctx = PairingContext {
        scores,
        prev_opponents,
    };

    let mut by_score: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for p in players {
        by_score.entry(ctx.score(p)).or_default().push(p.as_str());
    }

    let mut ladder: Vec<&str> = Vec::with_capacity(players.len());
    for (_, mut group) in by_score.into_iter().rev() {
        rng.shuffle(&mut group);
        ladder.extend(group);
    }

    for attempt in 1..=max_attempts {
        for window in ladder.chunks_mut(LADDER_WINDOW) {
            rng.shuffle(window);
        }

        if let Some(pairs) = ctx.try_build(&ladder, false) {
            debug!("swiss pairing: strict pass succeeded on attempt {}", attempt);
            return Ok(pairs);
        }
    }

    warn!(
        "swiss pairing: no rematch-free pairing after {} attempts, allowing rematches",
        max_attempts
    );

    ctx.try_build(&ladder, true)
        .ok_or(EngineError::PairingExhausted {
            attempts: max_attempts,
        })
}

/// Срез состояния, нужный для оценки пар.
struct PairingContext<'a> {
    scores: &'a BTreeMap<PlayerName, u32>,
    prev_opponents: &'a BTreeMap<PlayerName, BTreeSet<PlayerName>>,
}

impl PairingContext<'_> {
    fn score(&self, name: &str) -> u32 {
        self.scores.get(name).copied().unwrap_or(0)
    }

    fn already_played(&self, a: &str, b: &str) -> bool {
        let faced = |x: &str, y: &str| {
            self.prev_opponents
                .get(x)
                .is_some_and(|set| set.contains(y))
        };
        faced(a, b) || faced(b, a)
    }

    /// Один жадный проход по лесенке.
    /// `None`, если кому-то не нашлось допустимого соперника.
    fn try_build(&self, ladder: &[&str], allow_rematch: bool) -> Option<Vec<Pairing>> {
        let mut unpaired: VecDeque<&str> = ladder.iter().copied().collect();
        let mut pairs = Vec::with_capacity(ladder.len() / 2);

        while let Some(a) = unpaired.pop_front() {
            let mut best: Option<(usize, u32)> = None;

            for (i, &b) in unpaired.iter().enumerate() {
                let rematch = self.already_played(a, b);
                if rematch && !allow_rematch {
                    continue;
                }

                let penalty = self.score(a).abs_diff(self.score(b))
                    + if rematch { REMATCH_PENALTY } else { 0 };

                if best.map_or(true, |(_, best_pen)| penalty < best_pen) {
                    best = Some((i, penalty));
                }
            }

            let (idx, _) = best?;
            let b = unpaired.remove(idx)?;
            pairs.push(Pairing::new(a, b));
        }

        Some(pairs)
    }
}
