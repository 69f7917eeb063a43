//! yh: CLI binary for Yahtzee simulations.
//!
//! Subcommands:
//! - sim
//! - play
//! - score

use std::env;
use std::process;

use yh_core::{Category, Config, EngineConfig, GameEngine, PolicyKind};
use yh_eval::{TurnEvent, TurnSink};

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let Some(raw) = args.get(i + 1) else {
        eprintln!("Missing value for {flag}");
        process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {flag} value: {raw}");
        process::exit(1);
    })
}

fn parse_policy(args: &[String], i: usize) -> PolicyKind {
    let Some(raw) = args.get(i + 1) else {
        eprintln!("Missing value for --policy");
        process::exit(1);
    };
    raw.parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    })
}

fn cmd_sim(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut games: Option<u32> = None;
    let mut seed: Option<u64> = None;
    let mut policy: Option<PolicyKind> = None;
    let mut threads: Option<usize> = None;
    let mut deterministic = false;
    let mut log_path: Option<String> = None;
    let mut no_hist = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh sim

USAGE:
    yh sim [--config PATH] [--games N] [--seed S] [--policy NAME] [--threads N]
           [--deterministic] [--log PATH] [--no-hist]

OPTIONS:
    --config PATH     YAML config; flags below override its values
    --games N         Number of games to simulate (default: 10000)
    --seed S          Base seed (default: 0)
    --policy NAME     baseline | greedy-high | keep-high-random (default: baseline)
    --threads N       Worker threads (default: all cores)
    --deterministic   Event-keyed dice (common random numbers across policies)
    --log PATH        Append per-game and summary NDJSON events to PATH
    --no-hist         Skip printing histogram
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(parse_value(args, i, "--config"));
                i += 2;
            }
            "--games" => {
                games = Some(parse_value(args, i, "--games"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_value(args, i, "--seed"));
                i += 2;
            }
            "--policy" => {
                policy = Some(parse_policy(args, i));
                i += 2;
            }
            "--threads" => {
                threads = Some(parse_value(args, i, "--threads"));
                i += 2;
            }
            "--deterministic" => {
                deterministic = true;
                i += 1;
            }
            "--log" => {
                log_path = Some(parse_value(args, i, "--log"));
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `yh sim`: {}", other);
                eprintln!("Run `yh sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    let (cfg, config_hash) = match &config_path {
        Some(path) => {
            let cfg = Config::load(path).unwrap_or_else(|e| {
                eprintln!("Failed to load config: {e}");
                process::exit(1);
            });
            let bytes = std::fs::read(path).unwrap_or_else(|e| {
                eprintln!("Failed to read config file: {e}");
                process::exit(1);
            });
            (cfg, Some(yh_logging::hash_config_bytes(&bytes)))
        }
        None => (Config::default(), None),
    };

    let mut opts = yh_eval::SimOptions::from_config(&cfg).unwrap_or_else(|e| {
        eprintln!("Invalid config: {e}");
        process::exit(1);
    });
    if let Some(g) = games {
        opts.games = g;
    }
    if let Some(s) = seed {
        opts.seed = s;
    }
    if let Some(p) = policy {
        opts.policy = p;
    }
    if threads.is_some() {
        opts.threads = threads;
    }
    if deterministic {
        opts.deterministic_chance = true;
    }

    println!(
        "Running simulation: policy={}, games={}, seed={}, chance={}",
        opts.policy,
        opts.games,
        opts.seed,
        if opts.deterministic_chance {
            "deterministic"
        } else {
            "rng"
        }
    );

    let report = yh_eval::simulate(&opts).unwrap_or_else(|e| {
        eprintln!("Simulation failed: {e}");
        process::exit(1);
    });

    if let Some(path) = &log_path {
        yh_eval::write_report_ndjson(path, &report, cfg.simulation.log_flush_every, config_hash)
            .unwrap_or_else(|e| {
                eprintln!("Failed to write event log: {e}");
                process::exit(1);
            });
    }

    let Some(s) = report.summary() else {
        eprintln!("No games were played");
        process::exit(1);
    };

    println!();
    println!("Evaluation:");
    println!("  - Games: {}", s.games);
    println!(
        "  - Score: mean={:.2}, median={}, std={:.2}, min={}, max={}",
        s.mean, s.median, s.std_dev, s.min, s.max
    );
    println!("  - Upper bonus rate: {:.1}%", s.bonus_rate * 100.0);
    println!("  - Elapsed: {:.2}s", report.elapsed_secs);

    if !no_hist {
        println!();
        print!("{}", report.histogram(10));
    }
}

/// Prints each decision as it happens.
struct PrintSink;

impl TurnSink for PrintSink {
    fn on_turn(&mut self, ev: &TurnEvent) {
        match ev {
            TurnEvent::Reroll {
                round,
                dice_before,
                keep_mask,
                dice_after,
                rolls_left,
            } => {
                println!(
                    "round {:2}  dice {:?}  keep {}  -> {:?}  (rolls left: {})",
                    round + 1,
                    dice_before,
                    format_mask(keep_mask),
                    dice_after,
                    rolls_left
                );
            }
            TurnEvent::Commit {
                round,
                dice,
                category,
                score,
                final_score,
            } => {
                println!(
                    "round {:2}  dice {:?}  score {:<15} +{:<3} total {}",
                    round + 1,
                    dice,
                    category.name(),
                    score,
                    final_score
                );
            }
        }
    }
}

fn format_mask(mask: &[bool; 5]) -> String {
    mask.iter().map(|&k| if k { 'K' } else { '.' }).collect()
}

fn cmd_play(args: &[String]) {
    let mut seed: u64 = 0;
    let mut policy = PolicyKind::GreedyHigh;
    let mut deterministic = false;
    let mut verbose = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh play

USAGE:
    yh play [--seed S] [--policy NAME] [--deterministic] [--verbose]

OPTIONS:
    --seed S          Dice seed (default: 0)
    --policy NAME     baseline | greedy-high | keep-high-random (default: greedy-high)
    --deterministic   Event-keyed dice
    --verbose, -v     Print every reroll and commitment
"#
                );
                return;
            }
            "--seed" => {
                seed = parse_value(args, i, "--seed");
                i += 2;
            }
            "--policy" => {
                policy = parse_policy(args, i);
                i += 2;
            }
            "--deterministic" => {
                deterministic = true;
                i += 1;
            }
            "--verbose" | "-v" => {
                verbose = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `yh play`: {}", other);
                eprintln!("Run `yh play --help` for usage.");
                process::exit(1);
            }
        }
    }

    let cfg = EngineConfig {
        seed,
        deterministic_chance: deterministic,
    };
    let mut engine = GameEngine::new(&cfg, Some(policy.build(yh_eval::policy_seed(seed))));

    let report = if verbose {
        println!("Starting game (policy={}, seed={})...", policy, seed);
        yh_eval::play_game(&mut engine, 0, seed, &mut PrintSink)
    } else {
        yh_eval::play_game(&mut engine, 0, seed, &mut yh_eval::NoopSink)
    }
    .unwrap_or_else(|e| {
        eprintln!("Game failed: {e}");
        process::exit(1);
    });

    println!();
    println!("Category scores:");
    for r in &report.rounds {
        println!("  {:<15} {:3}", r.category.name(), r.score);
    }
    println!("Upper total: {} (bonus {})", report.upper_total, report.bonus);
    println!("Final score: {}", report.final_score);
}

fn cmd_score(args: &[String]) {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!(
            r#"yh score

USAGE:
    yh score <CATEGORY> <D1> <D2> <D3> <D4> <D5>

Prints the score of the five dice under CATEGORY.
Categories: 1 2 3 4 5 6 chance three_of_a_kind four_of_a_kind yahtzee
            full_house small_straight large_straight
"#
        );
        return;
    }
    if args.len() != 6 {
        eprintln!("Expected a category and exactly 5 dice");
        eprintln!("Run `yh score --help` for usage.");
        process::exit(1);
    }

    let mut dice = [0u8; 5];
    for (d, raw) in dice.iter_mut().zip(&args[1..]) {
        *d = match raw.parse::<u8>() {
            Ok(v) if (1..=6).contains(&v) => v,
            _ => {
                eprintln!("Invalid die value: {raw} (expected 1..=6)");
                process::exit(1);
            }
        };
    }

    match yh_core::score_named(&args[0], &dice) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("{e}");
            eprintln!(
                "Known categories: {}",
                Category::ALL.map(|c| c.name()).join(" ")
            );
            process::exit(1);
        }
    }
}

fn print_help() {
    eprintln!(
        r#"yh - Yahtzee engine CLI

USAGE:
    yh <COMMAND> [OPTIONS]

COMMANDS:
    sim       Simulate many games with a policy and report score statistics
    play      Play a single game and print the scorecard
    score     Score five dice under a category

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `yh <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("yh {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(1);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "sim" => cmd_sim(&args[2..]),
        "play" => cmd_play(&args[2..]),
        "score" => cmd_score(&args[2..]),
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run `yh --help` for usage.");
            process::exit(1);
        }
    }
}
