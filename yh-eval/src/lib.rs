//! yh-eval: game driver loop + Monte-Carlo policy evaluation.

pub mod driver;
pub mod stats;

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;
use yh_core::{splitmix64, EngineConfig, EngineError, GameEngine, PolicyKind};
use yh_logging::{
    now_ms, GameEventV1, NdjsonError, NdjsonWriter, RoundRecordV1, SimSummaryEventV1,
    VersionInfoV1,
};

pub use driver::{play_game, GameReport, NoopSink, RoundResult, TurnEvent, TurnSink, VecSink};
pub use stats::{ScoreHistogram, ScoreSummary};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seed stream for per-game policies, kept apart from the dice stream.
const POLICY_SEED_STREAM: u64 = 0x5EED_F00D_0000_0002;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid simulation config: {0}")]
    InvalidConfig(&'static str),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("illegal transition while applying action")]
    IllegalTransition,
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("event log error: {0}")]
    Log(#[from] NdjsonError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSpec {
    pub game_id: u64,
    pub episode_seed: u64,
}

/// Deterministic schedule of per-game seeds derived from `seed0`.
pub fn game_schedule(seed0: u64, games: u32) -> Result<Vec<GameSpec>, EvalError> {
    if games == 0 {
        return Err(EvalError::InvalidConfig("games must be > 0"));
    }
    Ok((0..games as u64)
        .map(|i| GameSpec {
            game_id: i,
            episode_seed: splitmix64(seed0 ^ i),
        })
        .collect())
}

/// Seed for the policy instance of a scheduled game.
pub fn policy_seed(episode_seed: u64) -> u64 {
    splitmix64(episode_seed ^ POLICY_SEED_STREAM)
}

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub games: u32,
    pub seed: u64,
    pub policy: PolicyKind,
    pub deterministic_chance: bool,
    /// Worker threads; None uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            games: 1_000,
            seed: 0,
            policy: PolicyKind::default(),
            deterministic_chance: false,
            threads: None,
        }
    }
}

impl SimOptions {
    pub fn from_config(cfg: &yh_core::Config) -> Result<Self, yh_core::ConfigError> {
        Ok(Self {
            games: cfg.simulation.games,
            seed: cfg.engine.seed,
            policy: cfg.simulation.policy_kind()?,
            deterministic_chance: cfg.engine.deterministic_chance,
            threads: cfg.simulation.threads,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub policy: PolicyKind,
    pub base_seed: u64,
    pub deterministic_chance: bool,
    /// Reports in schedule order.
    pub games: Vec<GameReport>,
    pub elapsed_secs: f64,
}

impl SimulationReport {
    pub fn scores(&self) -> Vec<u32> {
        self.games.iter().map(|g| g.final_score).collect()
    }

    pub fn summary(&self) -> Option<ScoreSummary> {
        ScoreSummary::from_games(&self.games)
    }

    pub fn histogram(&self, bucket_size: u32) -> ScoreHistogram {
        ScoreHistogram::from_games(&self.games, bucket_size)
    }
}

/// Play one scheduled game on a fresh engine.
pub fn run_scheduled_game(
    spec: GameSpec,
    policy: PolicyKind,
    deterministic_chance: bool,
) -> Result<GameReport, EvalError> {
    let cfg = EngineConfig {
        seed: spec.episode_seed,
        deterministic_chance,
    };
    let mut engine = GameEngine::new(&cfg, Some(policy.build(policy_seed(spec.episode_seed))));
    play_game(&mut engine, spec.game_id, spec.episode_seed, &mut NoopSink)
}

/// Simulate `opts.games` independent games in parallel.
///
/// Each game owns its engine and seeds, so the report does not depend on the
/// number of worker threads.
pub fn simulate(opts: &SimOptions) -> Result<SimulationReport, EvalError> {
    if opts.threads == Some(0) {
        return Err(EvalError::InvalidConfig("threads must be > 0"));
    }
    let schedule = game_schedule(opts.seed, opts.games)?;
    let start = Instant::now();

    let run = || -> Result<Vec<GameReport>, EvalError> {
        schedule
            .par_iter()
            .map(|&spec| run_scheduled_game(spec, opts.policy, opts.deterministic_chance))
            .collect()
    };
    let games = match opts.threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()?
            .install(run)?,
        None => run()?,
    };

    Ok(SimulationReport {
        policy: opts.policy,
        base_seed: opts.seed,
        deterministic_chance: opts.deterministic_chance,
        games,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

pub fn game_event(report: &GameReport) -> GameEventV1 {
    GameEventV1 {
        event: "game".to_string(),
        ts_ms: now_ms(),
        v: VersionInfoV1::default(),
        game_id: report.game_id,
        episode_seed: report.episode_seed,
        policy: report.policy.clone(),
        final_score: report.final_score,
        upper_total: report.upper_total,
        bonus: report.bonus,
        rounds: report
            .rounds
            .iter()
            .map(|r| RoundRecordV1 {
                round: r.round,
                dice: r.dice,
                category: r.category.name().to_string(),
                score: r.score,
            })
            .collect(),
    }
}

pub fn summary_event(
    report: &SimulationReport,
    config_hash: Option<String>,
) -> SimSummaryEventV1 {
    let s = report.summary().unwrap_or_default();
    SimSummaryEventV1 {
        event: "sim_summary".to_string(),
        ts_ms: now_ms(),
        v: VersionInfoV1::default(),
        policy: report.policy.name().to_string(),
        games: s.games as u64,
        base_seed: report.base_seed,
        deterministic_chance: report.deterministic_chance,
        config_hash,
        mean: s.mean,
        median: s.median,
        std_dev: s.std_dev,
        min: s.min,
        max: s.max,
        bonus_rate: s.bonus_rate,
        elapsed_ms: (report.elapsed_secs * 1000.0) as u64,
    }
}

/// Append one `game` line per game and a final `sim_summary` line.
pub fn write_report_ndjson(
    path: impl AsRef<Path>,
    report: &SimulationReport,
    flush_every: u64,
    config_hash: Option<String>,
) -> Result<(), EvalError> {
    let mut w = NdjsonWriter::open_append_with_flush(path, flush_every)?;
    w.write_events(report.games.iter().map(game_event))?;
    w.write_event(&summary_event(report, config_hash))?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod eval_tests;
