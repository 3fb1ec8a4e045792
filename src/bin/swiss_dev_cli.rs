// src/bin/swiss_dev_cli.rs

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use swiss_engine::api::{
    execute_command, parse_seed, run_query, ApiError, Command, CommandOutcome, Query,
    QueryResponse,
};
use swiss_engine::domain::{PlayerName, TableId, TournamentConfig};
use swiss_engine::infra::{
    autosave_key, decode_snapshot, encode_snapshot, next_autosave_seq, SnapshotStore,
};
use swiss_engine::state::{SnapshotError, TournamentSnapshot};
use swiss_engine::TournamentRuntime;

/// Каталог для автосейвов и экспортов.
const SAVE_DIR: &str = "saves";

fn main() {
    println!("swiss_dev_cli: швейцарский турнир, 12 столов x 2 игрока. `help` – список команд.");

    let mut runtime = match TournamentRuntime::new(TournamentConfig::default()) {
        Ok(rt) => rt,
        Err(e) => {
            println!("[CLI] ОШИБКА конфига: {}", e);
            return;
        }
    };
    let mut store = DirSnapshotStore::new(SAVE_DIR);
    let mut save_seq = store.keys().map(|k| next_autosave_seq(&k)).unwrap_or(1);
    let mut pending: BTreeMap<TableId, PlayerName> = BTreeMap::new();

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                println!("[CLI] ошибка чтения stdin: {}", e);
                break;
            }
        }

        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match cmd {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => break,
            "add" => report(execute_command(
                &mut runtime,
                Command::AddPlayer { name: rest.to_string() },
            )),
            "remove" => report(execute_command(
                &mut runtime,
                Command::RemovePlayer { name: rest.to_string() },
            )),
            "seed" => match parse_seed(rest) {
                Ok(seed) => report(execute_command(&mut runtime, Command::SetSeed { seed })),
                Err(e) => report(Err(e)),
            },
            "start" => {
                let result = execute_command(&mut runtime, Command::Start);
                if result.is_ok() {
                    autosave(&mut store, &mut save_seq, &runtime, "after_start");
                }
                report(result);
                print_resources(&runtime);
            }
            "pair" => {
                pending.clear();
                report(execute_command(&mut runtime, Command::PairNextRound));
                print_pairings(&runtime);
            }
            "win" => match parse_win(rest) {
                Some((table, name)) => {
                    pending.insert(table, name);
                    println!("[CLI] выбрано победителей: {}", pending.len());
                }
                None => println!("[CLI] формат: win <стол> <имя игрока>"),
            },
            "submit" => {
                let winners = pending.clone();
                let result = execute_command(&mut runtime, Command::SubmitResults { winners });
                if result.is_ok() {
                    pending.clear();
                    autosave(&mut store, &mut save_seq, &runtime, "after_submit");
                }
                report(result);
                print_standings(&runtime);
            }
            "undo" => {
                pending.clear();
                report(execute_command(&mut runtime, Command::Undo));
                print_pairings(&runtime);
            }
            "reset" => {
                pending.clear();
                report(execute_command(&mut runtime, Command::Reset));
            }
            "list" | "players" => print_players(&runtime),
            "standings" => print_standings(&runtime),
            "pairings" => print_pairings(&runtime),
            "resources" => print_resources(&runtime),
            "status" => print_status(&runtime),
            "export" => match export_to_file(&runtime, rest) {
                Ok(path) => println!("[CLI] сохранено в {}", path.display()),
                Err(e) => println!("[CLI] ОШИБКА экспорта: {}", e),
            },
            "import" => match import_from_file(rest) {
                Ok(snapshot) => {
                    pending.clear();
                    report(execute_command(
                        &mut runtime,
                        Command::LoadSnapshot { snapshot },
                    ));
                    print_status(&runtime);
                }
                Err(e) => println!("[CLI] ОШИБКА импорта: {}", e),
            },
            other => println!("[CLI] неизвестная команда {:?}, см. `help`", other),
        }
    }

    autosave(&mut store, &mut save_seq, &runtime, "on_exit");
    println!("[CLI] Завершение работы swiss_dev_cli.");
}

fn print_help() {
    println!("  add <имя>            добавить игрока (до старта)");
    println!("  remove <имя>         убрать игрока (до старта)");
    println!("  list                 список игроков");
    println!("  seed <число>         зафиксировать сид RNG");
    println!("  start                старт турнира, раздача колод и карт");
    println!("  pair                 жеребьёвка следующего раунда");
    println!("  win <стол> <имя>     выбрать победителя за столом");
    println!("  submit               отправить результаты раунда");
    println!("  undo                 откатить последний раунд");
    println!("  reset                сбросить турнир");
    println!("  standings | pairings | resources | status");
    println!("  export <файл> | import <файл>");
    println!("  quit");
}

fn parse_win(rest: &str) -> Option<(TableId, PlayerName)> {
    let (table, name) = rest.split_once(' ')?;
    let table = table.parse::<TableId>().ok()?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((table, name.to_string()))
}

fn report(result: Result<CommandOutcome, ApiError>) {
    match result {
        Ok(CommandOutcome::Done) => println!("[CLI] ok"),
        Ok(CommandOutcome::Paired {
            round,
            forced_repeats,
        }) => {
            println!("[CLI] раунд {} разыгран по столам.", round);
            for r in forced_repeats {
                println!(
                    "[CLI]   вынужденный повтор: {} снова за столом {}",
                    r.player, r.table
                );
            }
        }
        Ok(CommandOutcome::Submitted { round, finished }) => {
            println!("[CLI] результаты раунда {} приняты.", round);
            if finished {
                println!("[CLI] Турнир завершён.");
            }
        }
        Ok(CommandOutcome::Undone { round }) => {
            println!("[CLI] откат: раунд {} снова ждёт результатов.", round);
        }
        Err(ApiError::UndoUnavailable) => println!("[CLI] откатывать нечего."),
        Err(e) => println!("[CLI] ОШИБКА: {:?}", e),
    }
}

fn print_players(runtime: &TournamentRuntime) {
    if let QueryResponse::Status(view) = run_query(runtime, Query::Status) {
        println!("  игроков {}/{}:", view.players.len(), view.capacity);
        for (i, p) in view.players.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, p);
        }
    }
}

fn print_standings(runtime: &TournamentRuntime) {
    if let QueryResponse::Standings(rows) = run_query(runtime, Query::Standings) {
        println!("  {:>3}  {:<20} {:>5} {:>6} {:>5}", "#", "игрок", "очки", "W-L", "TB");
        for r in rows {
            println!(
                "  {:>3}  {:<20} {:>5} {:>3}-{:<2} {:>5}",
                r.place, r.player, r.score, r.wins, r.losses, r.tiebreak
            );
        }
    }
}

fn print_pairings(runtime: &TournamentRuntime) {
    if let QueryResponse::Pairings(rows) = run_query(runtime, Query::CurrentPairings) {
        if rows.is_empty() {
            println!("  (активного раунда нет)");
        }
        for p in rows {
            println!(
                "  стол {:>2}: {} ({}) vs {} ({}) | карта: {} | колоды: {}",
                p.table,
                p.player_a,
                p.score_a,
                p.player_b,
                p.score_b,
                p.map.as_deref().unwrap_or("-"),
                p.decks.join(", ")
            );
        }
    }
}

fn print_resources(runtime: &TournamentRuntime) {
    if let QueryResponse::Resources(rows) = run_query(runtime, Query::Resources) {
        for r in rows {
            println!(
                "  стол {:>2}: карта {} | колоды: {}",
                r.table,
                r.map.as_deref().unwrap_or("-"),
                r.decks.join(", ")
            );
        }
    }
}

fn print_status(runtime: &TournamentRuntime) {
    if let QueryResponse::Status(view) = run_query(runtime, Query::Status) {
        println!(
            "  фаза={:?} | раунд {}/{} | игроков {}/{} | активных столов {} | undo={}",
            view.phase,
            view.round_no,
            view.rounds,
            view.players.len(),
            view.capacity,
            view.active_tables,
            view.undo_depth
        );
    }
}

fn autosave(
    store: &mut DirSnapshotStore,
    seq: &mut u32,
    runtime: &TournamentRuntime,
    reason: &str,
) {
    let key = autosave_key(reason, runtime.round_no(), *seq);
    *seq = seq.saturating_add(1);
    if let Err(e) = store.save(&key, &runtime.capture()) {
        println!("[CLI] автосейв не удался: {}", e);
    }
}

fn export_to_file(runtime: &TournamentRuntime, path: &str) -> Result<PathBuf, SnapshotError> {
    if path.is_empty() {
        return Err(SnapshotError::Io("не указан путь".into()));
    }
    let path = PathBuf::from(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SnapshotError::Io(e.to_string()))?;
    }
    let json = encode_snapshot(&runtime.capture())?;
    fs::write(&path, json).map_err(|e| SnapshotError::Io(e.to_string()))?;
    Ok(path)
}

fn import_from_file(path: &str) -> Result<TournamentSnapshot, SnapshotError> {
    let json = fs::read_to_string(path)
        .map_err(|e| SnapshotError::Io(format!("не удалось прочитать {}: {}", path, e)))?;
    decode_snapshot(&json)
}

/// Файловое хранилище: один JSON на ключ в каталоге.
struct DirSnapshotStore {
    dir: PathBuf,
}

impl DirSnapshotStore {
    fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for DirSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<TournamentSnapshot>, SnapshotError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|e| SnapshotError::Io(e.to_string()))?;
        decode_snapshot(&json).map(Some)
    }

    fn save(&mut self, key: &str, snapshot: &TournamentSnapshot) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.dir).map_err(|e| SnapshotError::Io(e.to_string()))?;
        let json = encode_snapshot(snapshot)?;
        fs::write(self.path_for(key), json).map_err(|e| SnapshotError::Io(e.to_string()))
    }

    fn keys(&self) -> Result<Vec<String>, SnapshotError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(Vec::new()),
        };
        let mut keys: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                e.file_name()
                    .to_str()
                    .and_then(|n| n.strip_suffix(".json"))
                    .map(str::to_string)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }
}
