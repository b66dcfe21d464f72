// splat-rotations - asks "what's rotating when?" so you don't have to
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use splat_rotations_lib::{
    get_mode, parse, Mode, RuleKey, ScheduleConfig, ScheduleStore, SearchQuery, SearchResult,
};
use chrono::{DateTime, Utc};
use splat_rotations_lib::schedule::models::TimeSlot;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "query" => handle_query(&args[2..]).await,
        "schedule" => handle_schedule(&args[2..]).await,
        "rule" => handle_rule(&args[2..]).await,
        "parse" => handle_parse(&args[2..]),
        "status" => handle_status().await,
        "version" | "-v" | "--version" => {
            println!("splat-rotations v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

async fn handle_query(args: &[String]) -> anyhow::Result<()> {
    if args.is_empty() {
        eprintln!("Error: No query text provided");
        return Ok(());
    }

    let text = args.join(" ");
    let query = parse(&text);

    if query.should_ignore() {
        println!("Not a schedule query: '{}'", text);
        return Ok(());
    }

    let result = run_search(&query).await?;
    print_result(&result);
    Ok(())
}

async fn handle_schedule(args: &[String]) -> anyhow::Result<()> {
    // Same surface the chat slash commands expose.
    let identifier = match args.first().map(String::as_str) {
        Some("regular") => "REGULAR",
        Some("bankara") => "BANKARA",
        Some("open") => "OPEN",
        Some("challenge") => "CHALLENGE",
        Some("x") => "X",
        Some("salmon") => "SALMON",
        other => {
            eprintln!(
                "Error: expected one of regular|bankara|open|challenge|x|salmon, got '{}'",
                other.unwrap_or("")
            );
            return Ok(());
        }
    };

    let query = SearchQuery {
        original_text: identifier.to_string(),
        relative_offset: None,
        absolute_hour: None,
        mode: get_mode(identifier),
        rule: None,
    };

    let result = run_search(&query).await?;
    print_result(&result);
    Ok(())
}

async fn handle_rule(args: &[String]) -> anyhow::Result<()> {
    let rule = match args.first().map(String::as_str) {
        Some("turf-war") => RuleKey::TurfWar,
        Some("area") => RuleKey::Area,
        Some("rainmaker") => RuleKey::Goal,
        Some("tower-control") => RuleKey::Loft,
        Some("clam-blitz") => RuleKey::Clam,
        other => {
            eprintln!(
                "Error: expected one of turf-war|area|rainmaker|tower-control|clam-blitz, got '{}'",
                other.unwrap_or("")
            );
            return Ok(());
        }
    };

    // Rule lookups sweep every ranked queue, X included.
    let query = SearchQuery {
        original_text: rule.as_str().to_string(),
        relative_offset: None,
        absolute_hour: None,
        mode: get_mode("BYRULE"),
        rule: Some(rule),
    };

    let result = run_search(&query).await?;
    print_result(&result);
    Ok(())
}

fn handle_parse(args: &[String]) -> anyhow::Result<()> {
    if args.is_empty() {
        eprintln!("Error: No query text provided");
        return Ok(());
    }

    let text = args.join(" ");
    println!("{:#?}", parse(&text));
    Ok(())
}

async fn handle_status() -> anyhow::Result<()> {
    let store = build_store()?;
    let status = store.status().await;

    println!("\nsplat-rotations Status");
    println!("{}", "=".repeat(60));
    println!("  Versus cache updated: {}", format_updated(status.versus_updated));
    println!("  Salmon cache updated: {}", format_updated(status.salmon_updated));
    println!("\nSnapshot slots:");
    println!("  Regular:    {}", status.regular_slots);
    println!("  Challenge:  {}", status.challenge_slots);
    println!("  Open:       {}", status.open_slots);
    println!("  X:          {}", status.x_slots);
    println!("  Salmon Run: {}", status.salmon_slots);
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn run_search(query: &SearchQuery) -> anyhow::Result<SearchResult> {
    let store = build_store()?;
    store.maybe_refresh().await;
    Ok(store.search(query).await)
}

fn build_store() -> anyhow::Result<ScheduleStore> {
    let config = ScheduleConfig::from_env();
    Ok(ScheduleStore::new(&config)?)
}

fn print_result(result: &SearchResult) {
    if !result.found {
        println!("Not Found!");
        return;
    }

    for (mode, slot) in &result.slots {
        match slot {
            Some(slot) => print_slot(mode, slot),
            None => println!("{}: no matching slot", mode_label(mode)),
        }
    }
}

fn format_updated(updated: DateTime<Utc>) -> String {
    if updated == DateTime::<Utc>::MIN_UTC {
        "never".to_string()
    } else {
        updated.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

fn mode_label(mode: &Mode) -> &str {
    if mode.display_name.is_empty() {
        mode.id.as_str()
    } else {
        mode.display_name
    }
}

fn print_slot(mode: &Mode, slot: &TimeSlot) {
    println!("{}", "=".repeat(60));
    println!("{}", mode_label(mode));
    println!(
        "{} - {}",
        slot.start_time.format("%m/%d %H:%M"),
        slot.end_time.format("%m/%d %H:%M")
    );

    if let Some(stage) = &slot.stage {
        // Salmon Run: one stage, a weapon lineup, no rule.
        println!("Stage: {}", stage.name);
        for weapon in &slot.weapons {
            println!("  {}", weapon.name);
        }
    } else {
        if !slot.rule.name.is_empty() {
            println!("Rule: {}", slot.rule.name);
        }
        for stage in &slot.stages {
            println!("Stage: {}", stage.name);
        }
    }
}

fn print_usage() {
    println!(
        r#"splat-rotations v{} - rotation schedules from shorthand queries

USAGE:
    splat-rotations <COMMAND> [OPTIONS]

COMMANDS:
    query <text>           Resolve a shorthand query (e.g. 次のガチマ)
    schedule <mode>        Show the current slot for a mode
                           (regular|bankara|open|challenge|x|salmon)
    rule <rule>            Find the next slot playing a rule
                           (turf-war|area|rainmaker|tower-control|clam-blitz)
    parse <text>           Show how a query parses, without searching
    status                 Show cache freshness and snapshot sizes
    version                Show version
    help                   Show this help

EXAMPLES:
    splat-rotations query 次のガチマ
    splat-rotations query エリア20
    splat-rotations schedule bankara
    splat-rotations rule clam-blitz

CONFIGURATION:
    SPLAT3_API_SOURCE           Versus schedule endpoint
    SPLAT3_USER_AGENT           User-Agent for upstream requests
    SPLAT3_CACHE_DIR            Snapshot cache directory
    SPLAT3_CACHE_TTL_MINUTES    Snapshot freshness window (default 30)
"#,
        env!("CARGO_PKG_VERSION")
    );
}
