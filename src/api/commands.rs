use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::domain::{ForcedRepeat, PlayerName, RoundNo, TableId};
use crate::state::TournamentSnapshot;
use crate::tournament::TournamentRuntime;

/// Команда верхнего уровня: всё, что меняет состояние турнира.
///
/// Слой представления (UI, CLI) превращает действия пользователя
/// в эти команды и отдаёт их в `execute_command`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Добавить игрока (только до старта).
    AddPlayer { name: PlayerName },

    /// Убрать игрока (только до старта).
    RemovePlayer { name: PlayerName },

    /// Зафиксировать сид RNG для воспроизводимых жеребьёвок.
    SetSeed { seed: u64 },

    /// Старт турнира: раздача колод/карт, обнуление очков.
    Start,

    /// Жеребьёвка и рассадка следующего раунда.
    PairNextRound,

    /// Результаты раунда: стол -> победитель.
    SubmitResults { winners: BTreeMap<TableId, PlayerName> },

    /// Откатить последний submit.
    Undo,

    /// Полный сброс турнира.
    Reset,

    /// Загрузить ранее сохранённый снапшот.
    LoadSnapshot { snapshot: TournamentSnapshot },
}

/// Что получилось после команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Команда выполнена, дополнительных данных нет.
    Done,

    /// Раунд разыгран по столам. `forced_repeats` – вынужденные повторы столов.
    Paired {
        round: RoundNo,
        forced_repeats: Vec<ForcedRepeat>,
    },

    /// Результаты приняты.
    Submitted { round: RoundNo, finished: bool },

    /// Откат выполнен, раунд `round` снова ждёт результатов.
    Undone { round: RoundNo },
}

/// Разобрать текст сида из пользовательского ввода для `Command::SetSeed`.
pub fn parse_seed(text: &str) -> Result<u64, ApiError> {
    let text = text.trim();
    text.parse::<u64>().map_err(|_| {
        ApiError::BadRequest(format!(
            "seed must be a non-negative integer, got {:?}",
            text
        ))
    })
}

/// Выполнить команду над рантаймом.
pub fn execute_command(
    runtime: &mut TournamentRuntime,
    command: Command,
) -> Result<CommandOutcome, ApiError> {
    match command {
        Command::AddPlayer { name } => {
            runtime.add_player(name)?;
            Ok(CommandOutcome::Done)
        }
        Command::RemovePlayer { name } => {
            runtime.remove_player(&name)?;
            Ok(CommandOutcome::Done)
        }
        Command::SetSeed { seed } => {
            runtime.set_seed(seed);
            Ok(CommandOutcome::Done)
        }
        Command::Start => {
            runtime.start()?;
            Ok(CommandOutcome::Done)
        }
        Command::PairNextRound => {
            let forced_repeats = runtime.pair_next_round()?;
            Ok(CommandOutcome::Paired {
                round: runtime.round_no(),
                forced_repeats,
            })
        }
        Command::SubmitResults { winners } => {
            runtime.submit_results(&winners)?;
            Ok(CommandOutcome::Submitted {
                round: runtime.round_no(),
                finished: runtime.is_finished(),
            })
        }
        Command::Undo => {
            runtime.undo()?;
            Ok(CommandOutcome::Undone {
                round: runtime.round_no(),
            })
        }
        Command::Reset => {
            runtime.reset();
            Ok(CommandOutcome::Done)
        }
        Command::LoadSnapshot { snapshot } => {
            runtime.restore(snapshot)?;
            Ok(CommandOutcome::Done)
        }
    }
}
