//! Coinche CLI
//!
//! Keep the roster, draw tables and track who owes what.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use coinche::{report, Clubhouse, Config, JsonFileStore, CONFIG_FILE};
use coinche_core::{names, Club, ImportPolicy, StatsSort, TableRef, Team, Theme};
use std::env;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

type House = Clubhouse<JsonFileStore>;

fn print_usage() {
    println!("Coinche session keeper");
    println!();
    println!("Usage:");
    println!("  coinche players");
    println!("  coinche player add <name>");
    println!("  coinche player rename <player> <new name>");
    println!("  coinche player rm <player> --yes");
    println!("  coinche reset-players --yes");
    println!("  coinche session new [YYYY-MM-DD]");
    println!("  coinche sessions");
    println!("  coinche attend <player>...");
    println!("  coinche absent <player>...");
    println!("  coinche round new");
    println!("  coinche round undo --yes");
    println!("  coinche rounds");
    println!("  coinche score <round> <table> <A|B> <points|->");
    println!("  coinche win <round> <table> <A|B|none>");
    println!("  coinche note <round> <table> <text>");
    println!("  coinche stats [--sort name|wins|rate|euros]");
    println!("  coinche pairs");
    println!("  coinche pot");
    println!("  coinche euro <amount>");
    println!("  coinche theme <auto|light|dark>");
    println!("  coinche export <json|csv> <file>");
    println!("  coinche import <file> --merge | --replace --yes");
    println!("  coinche wipe --yes");
    println!();
    println!("Players can be given by id or by name (accents and case ignored).");
    println!("Rounds and tables are numbered from 1 within the current session.");
}

fn setup_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Destructive commands need an explicit `--yes`
fn confirmed(args: &[String]) -> Result<()> {
    if args.iter().any(|a| a == "--yes" || a == "-y") {
        Ok(())
    } else {
        bail!("this command cannot be undone, add --yes to confirm")
    }
}

/// Positional arguments, flags removed
fn positional(args: &[String]) -> Vec<&str> {
    args.iter()
        .map(String::as_str)
        .filter(|a| !a.starts_with("--") && *a != "-y")
        .collect()
}

fn resolve_player(club: &Club, arg: &str) -> Result<String> {
    club.players()
        .iter()
        .find(|p| p.id == arg)
        .or_else(|| club.players().iter().find(|p| names::same_name(&p.name, arg)))
        .map(|p| p.id.clone())
        .ok_or_else(|| anyhow!("unknown player: {}", arg))
}

fn active_session_id(club: &Club) -> Result<String> {
    club.active_session()
        .map(|s| s.id.clone())
        .ok_or_else(|| anyhow!("no session yet, run `coinche session new` first"))
}

/// Resolve "<round> <table>" (1-based) in the active session
fn table_ref(club: &Club, round: &str, table: &str) -> Result<TableRef> {
    let session = club
        .active_session()
        .ok_or_else(|| anyhow!("no session yet"))?;
    let round_no: usize = round.parse().context("round must be a number")?;
    let table_no: usize = table.parse().context("table must be a number")?;
    let round = round_no
        .checked_sub(1)
        .and_then(|i| session.rounds.get(i))
        .ok_or_else(|| anyhow!("no round {} in the current session", round_no))?;
    let index = table_no
        .checked_sub(1)
        .ok_or_else(|| anyhow!("tables are numbered from 1"))?;
    Ok(TableRef::new(session.id.clone(), round.id.clone(), index))
}

fn parse_team(arg: &str) -> Result<Team> {
    arg.parse::<Team>().map_err(|e| anyhow!(e))
}

fn run_player(house: &mut House, args: &[String]) -> Result<()> {
    let pos = positional(args);
    match pos.as_slice() {
        ["add", name @ ..] if !name.is_empty() => {
            let name = name.join(" ");
            let id = house.execute(|club| club.add_player(&name))?;
            println!("Added {} ({})", name.trim(), id);
        }
        ["rename", player, new_name @ ..] if !new_name.is_empty() => {
            let id = resolve_player(house.club(), player)?;
            let new_name = new_name.join(" ");
            house.execute(|club| club.rename_player(&id, &new_name))?;
            println!("Renamed to {}", new_name.trim());
        }
        ["rm", player] => {
            confirmed(args)?;
            let id = resolve_player(house.club(), player)?;
            house.execute(|club| club.delete_player(&id))?;
            println!("Deleted {}", id);
        }
        _ => bail!("usage: coinche player add|rename|rm ..."),
    }
    Ok(())
}

fn run_attendance(house: &mut House, args: &[String], present: bool) -> Result<()> {
    if args.is_empty() {
        bail!("give at least one player");
    }
    let session = active_session_id(house.club())?;
    for arg in args {
        let id = resolve_player(house.club(), arg)?;
        house.execute(|club| club.set_attendance(&session, &id, present))?;
    }
    let club = house.club();
    let present = club.present_players(&session)?;
    println!("{} present", present.len());
    Ok(())
}

fn run_round(house: &mut House, args: &[String]) -> Result<()> {
    match positional(args).as_slice() {
        ["new"] => {
            house.create_round()?;
            let session = house
                .club()
                .active_session()
                .ok_or_else(|| anyhow!("no session yet"))?;
            println!("Round {} created", session.rounds.len());
            print!("{}", report::active_rounds(house.club()));
        }
        ["undo"] => {
            confirmed(args)?;
            match house.undo_round()? {
                Some(round) => println!("Round {} removed", round.id),
                None => println!("No round to undo"),
            }
        }
        _ => bail!("usage: coinche round new|undo"),
    }
    Ok(())
}

fn run_outcome(house: &mut House, command: &str, args: &[String]) -> Result<()> {
    let pos = positional(args);
    if pos.len() < 3 {
        bail!("usage: coinche {} <round> <table> ...", command);
    }
    let at = table_ref(house.club(), pos[0], pos[1])?;
    match command {
        "score" => {
            let team = parse_team(pos[2])?;
            let value = match pos.get(3) {
                None | Some(&"-") => None,
                Some(v) => Some(v.parse::<i32>().context("score must be a whole number")?),
            };
            house.execute(|club| club.set_score(&at, team, value))?;
        }
        "win" => {
            let team = match pos[2] {
                "none" | "-" => None,
                other => Some(parse_team(other)?),
            };
            let winner = house.execute(|club| club.set_winner(&at, team))?;
            match winner {
                Some(w) => println!("Team {} wins {}", w, at),
                None => println!("No winner for {}", at),
            }
        }
        "note" => {
            let text = pos[2..].join(" ");
            house.execute(|club| club.set_notes(&at, &text))?;
        }
        _ => unreachable!("dispatched from main"),
    }
    Ok(())
}

fn run_export(house: &House, args: &[String]) -> Result<()> {
    let pos = positional(args);
    let (format, path) = match pos.as_slice() {
        [format, path] => (*format, Path::new(*path)),
        _ => bail!("usage: coinche export <json|csv> <file>"),
    };
    let contents = match format {
        "json" => house.club().export_json()?,
        "csv" => house.club().export_csv(),
        other => bail!("unknown export format: {}", other),
    };
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    println!("Exported {} to {}", format, path.display());
    Ok(())
}

fn run_import(house: &mut House, args: &[String]) -> Result<()> {
    let pos = positional(args);
    let [path] = pos.as_slice() else {
        bail!("usage: coinche import <file> --merge | --replace --yes");
    };
    let policy = if args.iter().any(|a| a == "--replace") {
        confirmed(args)?;
        ImportPolicy::Replace
    } else if args.iter().any(|a| a == "--merge") {
        ImportPolicy::Merge
    } else {
        bail!("choose --merge or --replace");
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    house.execute(|club| club.import_json(&text, policy))?;
    println!(
        "Imported: {} players, {} sessions",
        house.club().players().len(),
        house.club().sessions().len()
    );
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let config = Config::load(Path::new(CONFIG_FILE))?;
    setup_tracing(&config);

    let store = JsonFileStore::new(config.data_file.clone());
    let mut house = Clubhouse::open(store, config.seed)?;
    info!(data_file = %config.data_file.display(), "club loaded");

    let rest = &args[1..];
    match args[0].as_str() {
        "players" => print!("{}", report::roster(house.club())),
        "player" => run_player(&mut house, rest)?,
        "reset-players" => {
            confirmed(rest)?;
            house.execute(|club| {
                club.reset_roster();
                Ok(())
            })?;
            println!("Roster cleared");
        }
        "session" => match positional(rest).as_slice() {
            ["new"] => {
                let id = house.execute(|club| Ok(club.create_session(None)))?;
                println!("Session {} created", id);
            }
            ["new", date] => {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .context("date must be YYYY-MM-DD")?;
                let id = house.execute(|club| Ok(club.create_session(Some(date))))?;
                println!("Session {} created", id);
            }
            _ => bail!("usage: coinche session new [YYYY-MM-DD]"),
        },
        "sessions" => {
            for s in house.club().sessions() {
                println!("{}  {}  {} present, {} rounds", s.date, s.id, s.attendance.len(), s.rounds.len());
            }
        }
        "attend" => run_attendance(&mut house, rest, true)?,
        "absent" => run_attendance(&mut house, rest, false)?,
        "round" => run_round(&mut house, rest)?,
        "rounds" => print!("{}", report::active_rounds(house.club())),
        "score" | "win" | "note" => run_outcome(&mut house, &args[0], rest)?,
        "stats" => {
            let sort = match rest.iter().position(|a| a == "--sort") {
                Some(i) => rest
                    .get(i + 1)
                    .ok_or_else(|| anyhow!("--sort needs a value"))?
                    .parse::<StatsSort>()
                    .map_err(|e| anyhow!(e))?,
                None => StatsSort::default(),
            };
            print!("{}", report::stats_table(&house.club().stats(sort)));
        }
        "pairs" => print!("{}", report::top_pairs(&house.club().pair_frequency())),
        "pot" => println!("Pot: {}", report::euros(house.club().total_pot())),
        "euro" => {
            let value: i64 = rest
                .first()
                .ok_or_else(|| anyhow!("usage: coinche euro <amount>"))?
                .parse()
                .context("amount must be a whole number")?;
            house.execute(|club| {
                club.set_euro_per_loss(value);
                Ok(())
            })?;
            println!("Losers now pay {} per table", report::euros(house.club().settings().euro_per_loss as u64));
        }
        "theme" => {
            let theme: Theme = rest
                .first()
                .ok_or_else(|| anyhow!("usage: coinche theme <auto|light|dark>"))?
                .parse()
                .map_err(|e: String| anyhow!(e))?;
            house.execute(|club| {
                club.set_theme(theme);
                Ok(())
            })?;
        }
        "export" => run_export(&house, rest)?,
        "import" => run_import(&mut house, rest)?,
        "wipe" => {
            confirmed(rest)?;
            house.execute(|club| {
                club.clear_all_data();
                Ok(())
            })?;
            println!("All data cleared");
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_usage();
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
