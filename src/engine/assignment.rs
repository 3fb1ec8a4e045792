// src/engine/assignment.rs

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};

use crate::domain::{ForcedRepeat, Pairing, PlayerName, TableId};
use crate::engine::{EngineError, RandomSource};

/// Результат рассадки раунда.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableAssignment {
    /// Стол -> пара. Каждый стол не больше одной пары.
    pub tables: BTreeMap<TableId, Pairing>,

    /// Вынужденные повторы столов (только из ослабленного режима).
    pub forced_repeats: Vec<ForcedRepeat>,
}

/// Рассадить пары по столам 1..=num_tables, избегая столов,
/// за которыми игроки уже сидели.
///
/// Штраф стола для пары = (1, если A уже сидел за ним) + (1, если B).
/// Строгий режим берёт только столы со штрафом 0 и при неудаче
/// повторяет всё с новым перемешиванием (до `max_attempts` раз).
/// После этого один ослабленный проход: выбирается стол с минимальным
/// штрафом, а каждый повтор попадает в `forced_repeats`.
pub fn assign_tables<R: RandomSource>(
    pairs: &[Pairing],
    prev_tables: &BTreeMap<PlayerName, BTreeSet<TableId>>,
    num_tables: u32,
    max_attempts: u32,
    rng: &mut R,
) -> Result<TableAssignment, EngineError> {
    if pairs.len() > num_tables as usize {
        return Err(EngineError::TooManyPairs {
            pairs: pairs.len(),
            tables: num_tables,
        });
    }
    if pairs.is_empty() {
        return Err(EngineError::AssignmentExhausted { attempts: 0 });
    }

    let seat = Seating {
        pairs,
        prev_tables,
        num_tables,
    };

    for attempt in 1..=max_attempts {
        if let Some(assignment) = seat.try_assign(true, rng) {
            debug!("table assignment: strict pass succeeded on attempt {}", attempt);
            return Ok(assignment);
        }
    }

    let assignment = seat
        .try_assign(false, rng)
        .ok_or(EngineError::AssignmentExhausted {
            attempts: max_attempts,
        })?;

    for repeat in &assignment.forced_repeats {
        warn!(
            "table assignment: forced repeat, {} returns to table {}",
            repeat.player, repeat.table
        );
    }

    Ok(assignment)
}

struct Seating<'a> {
    pairs: &'a [Pairing],
    prev_tables: &'a BTreeMap<PlayerName, BTreeSet<TableId>>,
    num_tables: u32,
}

impl Seating<'_> {
    fn has_used(&self, player: &str, table: TableId) -> bool {
        self.prev_tables
            .get(player)
            .is_some_and(|set| set.contains(&table))
    }

    fn try_assign<R: RandomSource>(&self, strict: bool, rng: &mut R) -> Option<TableAssignment> {
        let mut free_tables: Vec<TableId> = (1..=self.num_tables).collect();
        rng.shuffle(&mut free_tables);

        let mut out = TableAssignment::default();

        for pair in self.pairs {
            let mut best: Option<(usize, u32)> = None;

            for (i, &table) in free_tables.iter().enumerate() {
                let penalty = pair
                    .players()
                    .iter()
                    .filter(|p| self.has_used(p, table))
                    .count() as u32;

                if strict && penalty > 0 {
                    continue;
                }
                if best.map_or(true, |(_, best_pen)| penalty < best_pen) {
                    best = Some((i, penalty));
                }
            }

            let (idx, penalty) = best?;
            let table = free_tables.remove(idx);

            if penalty > 0 {
                for player in pair.players() {
                    if self.has_used(player, table) {
                        out.forced_repeats.push(ForcedRepeat {
                            player: player.to_string(),
                            table,
                        });
                    }
                }
            }

            out.tables.insert(table, pair.clone());
        }

        Some(out)
    }
}
