use std::collections::BTreeMap;

use swiss_engine::domain::{PlayerName, TableId, TournamentConfig};
use swiss_engine::engine::RandomSource;
use swiss_engine::infra::DeterministicRng;
use swiss_engine::TournamentRuntime;

fn main() {
    println!("swiss_sim: прогон полного турнира со случайными победителями…");

    // Параметры прогона: `swiss_sim [seed] [players]`.
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let num_players: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(24);

    let config = TournamentConfig::default();
    let mut runtime = match TournamentRuntime::with_seed(config, seed) {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("[SIM] ОШИБКА конфига: {}", e);
            return;
        }
    };

    // Отдельный RNG для исходов матчей, чтобы не сбивать жеребьёвку.
    let mut outcome_rng = DeterministicRng::from_seed(seed.wrapping_add(1));

    for i in 1..=num_players {
        if let Err(e) = runtime.add_player(format!("Player {:02}", i)) {
            eprintln!("[SIM] ОШИБКА регистрации: {}", e);
            return;
        }
    }

    if let Err(e) = runtime.start() {
        eprintln!("[SIM] ОШИБКА старта: {}", e);
        return;
    }

    println!(
        "[SIM] seed={}, игроков {}, столов {}, раундов {}.",
        seed,
        num_players,
        runtime.config().num_tables,
        runtime.config().rounds
    );

    let mut total_forced = 0usize;

    while !runtime.is_finished() {
        let forced = match runtime.pair_next_round() {
            Ok(forced) => forced,
            Err(e) => {
                eprintln!("[SIM][round={}] ОШИБКА жеребьёвки: {}", runtime.round_no() + 1, e);
                return;
            }
        };
        total_forced += forced.len();

        println!();
        println!("--- Раунд {} ---", runtime.round_no());
        for (table, pair) in runtime.current_pairings() {
            println!("  стол {:>2}: {} vs {}", table, pair.a, pair.b);
        }
        for r in &forced {
            println!("  [!] {} повторно за столом {}", r.player, r.table);
        }

        let mut winners: BTreeMap<TableId, PlayerName> = BTreeMap::new();
        for (&table, pair) in runtime.current_pairings() {
            let mut seats = pair.players();
            outcome_rng.shuffle(&mut seats);
            winners.insert(table, seats[0].to_string());
        }

        if let Err(e) = runtime.submit_results(&winners) {
            eprintln!("[SIM][round={}] ОШИБКА результатов: {}", runtime.round_no(), e);
            return;
        }
    }

    println!();
    println!("=========== FINAL STANDINGS ===========");
    for row in runtime.standings() {
        let s = &row.standing;
        println!(
            "{:>3}. {:<12} очки={} W-L={}-{} TB={}",
            row.place, s.player, s.score, s.wins, s.losses, s.tiebreak
        );
    }
    println!("Вынужденных повторов столов: {}", total_forced);
    println!("=======================================");
}
