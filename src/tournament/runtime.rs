// src/tournament/runtime.rs

use std::collections::BTreeMap;

use log::{debug, info};

use crate::domain::{
    ForcedRepeat, Pairing, PlayerName, ResourceAssignment, RosterError, TableId,
    TournamentConfig,
};
use crate::engine::{
    assign_tables, compute_standings, deal_decks, deal_maps, make_pairs, RankedRow,
};
use crate::infra::DeterministicRng;
use crate::state::TournamentSnapshot;
use crate::tournament::{TournamentData, TournamentError, TournamentPhase};

/// Машина состояний турнира.
///
/// Единственный владелец изменяемого состояния: движки (жеребьёвка,
/// рассадка, таблица) получают только срезы и возвращают результат,
/// а применяет его рантайм.
///
/// Фазы:
///   NotStarted -> AwaitingPairing -> AwaitingResults -> AwaitingPairing -> ... -> Finished
///
/// Рантайм однопоточный. Если его встраивают в конкурентный хост,
/// все вызовы должны идти через один мьютекс или одну задачу.
#[derive(Debug)]
pub struct TournamentRuntime {
    config: TournamentConfig,
    data: TournamentData,
    /// Стек undo: состояние до каждого submit_results.
    history: Vec<TournamentData>,
    rng: DeterministicRng,
}

impl TournamentRuntime {
    /// Рантайм с RNG из системной энтропии.
    pub fn new(config: TournamentConfig) -> Result<Self, TournamentError> {
        Self::with_rng(config, DeterministicRng::from_entropy())
    }

    /// Рантайм с фиксированным сидом (воспроизводимые турниры, тесты).
    pub fn with_seed(config: TournamentConfig, seed: u64) -> Result<Self, TournamentError> {
        Self::with_rng(config, DeterministicRng::from_seed(seed))
    }

    fn with_rng(config: TournamentConfig, rng: DeterministicRng) -> Result<Self, TournamentError> {
        config
            .validate_full()
            .map_err(TournamentError::InvalidConfig)?;

        Ok(Self {
            config,
            data: TournamentData::default(),
            history: Vec::new(),
            rng,
        })
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn data(&self) -> &TournamentData {
        &self.data
    }

    pub fn phase(&self) -> TournamentPhase {
        self.data.phase(self.config.rounds)
    }

    pub fn round_no(&self) -> u32 {
        self.data.round_no
    }

    /// Пересеять RNG. Все последующие перемешивания воспроизводимы.
    pub fn set_seed(&mut self, seed: u64) {
        debug!("tournament: rng reseeded with {}", seed);
        self.rng = DeterministicRng::from_seed(seed);
    }

    /// Добавить игрока (только до старта).
    pub fn add_player(&mut self, name: impl Into<PlayerName>) -> Result<(), TournamentError> {
        if self.data.started {
            return Err(RosterError::EditAfterStart.into());
        }
        let capacity = self.config.capacity();
        self.data.roster.add(name, capacity)?;
        Ok(())
    }

    /// Убрать игрока (только до старта).
    pub fn remove_player(&mut self, name: &str) -> Result<(), TournamentError> {
        if self.data.started {
            return Err(RosterError::EditAfterStart.into());
        }
        self.data.roster.remove(name)?;
        Ok(())
    }

    /// Можно ли стартовать прямо сейчас. Ошибка объясняет, почему нет.
    pub fn can_start(&self) -> Result<(), TournamentError> {
        self.expect_phase(TournamentPhase::NotStarted)?;
        self.data
            .roster
            .validate_for_start(self.config.capacity())?;
        Ok(())
    }

    /// Старт турнира: NotStarted -> AwaitingPairing.
    ///
    /// Раздаёт колоды и карты по столам (один раз на весь турнир),
    /// обнуляет очки, истории и протокол, чистит стек undo.
    /// При нехватке пулов состояние не меняется.
    pub fn start(&mut self) -> Result<(), TournamentError> {
        self.can_start()?;

        let decks = deal_decks(
            &self.config.deck_pool,
            self.config.num_tables,
            self.config.decks_per_table,
            &mut self.rng,
        )
        .map_err(TournamentError::Resource)?;
        let maps = deal_maps(&self.config.map_pool, self.config.num_tables, &mut self.rng)
            .map_err(TournamentError::Resource)?;

        let roster = self.data.roster.clone();
        self.data = TournamentData {
            started: true,
            scores: roster.iter().map(|p| (p.clone(), 0)).collect(),
            roster,
            resources: ResourceAssignment { decks, maps },
            ..TournamentData::default()
        };
        self.history.clear();

        info!(
            "tournament: started with {} players on {} tables, {} rounds",
            self.data.roster.len(),
            self.config.num_tables,
            self.config.rounds
        );
        Ok(())
    }

    /// Можно ли жеребить следующий раунд.
    pub fn can_pair_next_round(&self) -> Result<(), TournamentError> {
        match self.phase() {
            TournamentPhase::AwaitingPairing => Ok(()),
            TournamentPhase::Finished => Err(TournamentError::RoundCapReached {
                rounds: self.config.rounds,
            }),
            found => Err(TournamentError::InvalidPhase {
                expected: TournamentPhase::AwaitingPairing,
                found,
            }),
        }
    }

    /// Жеребьёвка + рассадка: AwaitingPairing -> AwaitingResults.
    ///
    /// Возвращает вынужденные повторы столов (для показа пользователю).
    /// При ошибке номер раунда не растёт и ничего не меняется,
    /// раунд можно пробовать снова.
    pub fn pair_next_round(&mut self) -> Result<Vec<ForcedRepeat>, TournamentError> {
        self.can_pair_next_round()?;

        let pairs = make_pairs(
            self.data.roster.names(),
            &self.data.scores,
            &self.data.prev_opponents,
            self.config.max_attempts,
            &mut self.rng,
        )
        .map_err(TournamentError::Pairing)?;

        let assignment = assign_tables(
            &pairs,
            &self.data.prev_tables,
            self.config.num_tables,
            self.config.max_attempts,
            &mut self.rng,
        )
        .map_err(TournamentError::Assignment)?;

        self.data.current_tables = assignment.tables;
        self.data.round_no += 1;

        info!(
            "tournament: round {} paired, {} tables in play, {} forced table repeats",
            self.data.round_no,
            self.data.current_tables.len(),
            assignment.forced_repeats.len()
        );
        Ok(assignment.forced_repeats)
    }

    /// Проверка результатов без применения.
    ///
    /// Нужен победитель за каждым активным столом, и он должен сидеть
    /// за этим столом. Лишние столы в `winners` тоже ошибка.
    pub fn validate_submission(
        &self,
        winners: &BTreeMap<TableId, PlayerName>,
    ) -> Result<(), TournamentError> {
        self.expect_phase(TournamentPhase::AwaitingResults)?;

        if let Some(&table) = winners
            .keys()
            .find(|t| !self.data.current_tables.contains_key(*t))
        {
            return Err(TournamentError::UnknownTable { table });
        }

        for (&table, pair) in &self.data.current_tables {
            let winner = winners
                .get(&table)
                .ok_or(TournamentError::IncompleteSubmission { table })?;
            if !pair.contains(winner) {
                return Err(TournamentError::InvalidWinner {
                    table,
                    winner: winner.clone(),
                });
            }
        }

        Ok(())
    }

    /// Применить результаты раунда: AwaitingResults -> AwaitingPairing (или Finished).
    ///
    /// Перед мутацией полная копия состояния уходит в стек undo.
    pub fn submit_results(
        &mut self,
        winners: &BTreeMap<TableId, PlayerName>,
    ) -> Result<(), TournamentError> {
        self.validate_submission(winners)?;

        self.history.push(self.data.clone());

        let tables: BTreeMap<TableId, Pairing> = std::mem::take(&mut self.data.current_tables);
        for (table, pair) in &tables {
            if let Some(winner) = winners.get(table) {
                self.data
                    .record_result(*table, pair, winner, self.config.points_for_win);
            }
        }

        info!(
            "tournament: round {} results submitted ({} matches), phase {:?}",
            self.data.round_no,
            tables.len(),
            self.phase()
        );
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Глубина стека undo.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Откатить последний submit_results.
    ///
    /// Состояние восстанавливается целиком, включая пары раунда,
    /// так что результаты можно ввести заново.
    pub fn undo(&mut self) -> Result<(), TournamentError> {
        let snapshot = self
            .history
            .pop()
            .ok_or(TournamentError::UndoUnavailable)?;
        self.data = snapshot;

        info!(
            "tournament: undo, back to round {} awaiting results",
            self.data.round_no
        );
        Ok(())
    }

    /// Полный сброс: ростер, очки, истории, ресурсы, стек undo.
    /// Конфиг и RNG остаются.
    pub fn reset(&mut self) {
        self.data = TournamentData::default();
        self.history.clear();
        info!("tournament: reset");
    }

    /// Таблица с местами. До старта пустая.
    pub fn standings(&self) -> Vec<RankedRow> {
        if !self.data.started {
            return Vec::new();
        }
        compute_standings(
            self.data.roster.names(),
            &self.data.match_log,
            self.config.points_for_win,
        )
    }

    /// Пары текущего раунда (пусто, если раунд не активен).
    pub fn current_pairings(&self) -> &BTreeMap<TableId, Pairing> {
        &self.data.current_tables
    }

    pub fn resources(&self) -> &ResourceAssignment {
        &self.data.resources
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == TournamentPhase::Finished
    }

    /// Снять снапшот для внешнего сохранения.
    pub fn capture(&self) -> TournamentSnapshot {
        TournamentSnapshot::capture(&self.data, &self.config)
    }

    /// Загрузить снапшот. При любой ошибке текущее состояние не трогается.
    /// Стек undo очищается: он относится к другой истории.
    pub fn restore(&mut self, snapshot: TournamentSnapshot) -> Result<(), TournamentError> {
        let data = snapshot.restore(&self.config)?;
        self.data = data;
        self.history.clear();

        info!(
            "tournament: snapshot loaded, round {}, {} players, {} matches",
            self.data.round_no,
            self.data.roster.len(),
            self.data.match_log.len()
        );
        Ok(())
    }

    fn expect_phase(&self, expected: TournamentPhase) -> Result<(), TournamentError> {
        let found = self.phase();
        if found != expected {
            return Err(TournamentError::InvalidPhase { expected, found });
        }
        Ok(())
    }
}
