use crate::{
    game_schedule, policy_seed, run_scheduled_game, simulate, write_report_ndjson, EvalError,
    SimOptions,
};
use yh_core::PolicyKind;
use yh_logging::{read_ndjson_lenient, GameEventV1, SimSummaryEventV1};

#[test]
fn schedule_is_deterministic_and_distinct() {
    let a = game_schedule(42, 64).unwrap();
    let b = game_schedule(42, 64).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    for (i, spec) in a.iter().enumerate() {
        assert_eq!(spec.game_id, i as u64);
    }
    let mut seeds: Vec<u64> = a.iter().map(|s| s.episode_seed).collect();
    seeds.sort_unstable();
    seeds.dedup();
    assert_eq!(seeds.len(), 64);

    let c = game_schedule(43, 64).unwrap();
    assert_ne!(a, c);
}

#[test]
fn schedule_rejects_zero_games() {
    assert!(matches!(
        game_schedule(0, 0),
        Err(EvalError::InvalidConfig(_))
    ));
}

#[test]
fn policy_seed_differs_from_episode_seed() {
    for s in [0u64, 1, 99, u64::MAX] {
        assert_ne!(policy_seed(s), s);
    }
}

#[test]
fn report_is_independent_of_thread_count() {
    let base = SimOptions {
        games: 48,
        seed: 7,
        policy: PolicyKind::KeepHighRandom,
        deterministic_chance: false,
        threads: Some(1),
    };
    let one = simulate(&base).unwrap();
    let four = simulate(&SimOptions {
        threads: Some(4),
        ..base.clone()
    })
    .unwrap();
    let global = simulate(&SimOptions {
        threads: None,
        ..base
    })
    .unwrap();
    assert_eq!(one.games, four.games);
    assert_eq!(one.games, global.games);
}

#[test]
fn scheduled_game_matches_simulation_entry() {
    let opts = SimOptions {
        games: 5,
        seed: 11,
        policy: PolicyKind::GreedyHigh,
        deterministic_chance: true,
        threads: Some(2),
    };
    let report = simulate(&opts).unwrap();
    let spec = game_schedule(11, 5).unwrap()[3];
    let single = run_scheduled_game(spec, PolicyKind::GreedyHigh, true).unwrap();
    assert_eq!(report.games[3], single);
}

#[test]
fn summary_and_bonus_rate_are_consistent() {
    let report = simulate(&SimOptions {
        games: 200,
        seed: 3,
        policy: PolicyKind::GreedyHigh,
        deterministic_chance: false,
        threads: None,
    })
    .unwrap();
    let s = report.summary().unwrap();
    let scores = report.scores();
    assert_eq!(scores.len(), 200);
    assert_eq!(s.min, *scores.iter().min().unwrap());
    assert_eq!(s.max, *scores.iter().max().unwrap());
    assert!(s.mean >= s.min as f64 && s.mean <= s.max as f64);
    assert_eq!(s.games, 200);
    let hits = report.games.iter().filter(|g| g.got_bonus()).count();
    assert!((s.bonus_rate - hits as f64 / 200.0).abs() < 1e-12);
    for g in &report.games {
        assert_eq!(g.got_bonus(), g.upper_total >= 63);
        assert_eq!(g.policy, "greedy-high");
    }
}

#[test]
fn zero_threads_is_rejected() {
    let err = simulate(&SimOptions {
        threads: Some(0),
        ..SimOptions::default()
    })
    .unwrap_err();
    assert!(matches!(err, EvalError::InvalidConfig(_)));
}

#[test]
fn report_ndjson_has_one_line_per_game_plus_summary() {
    let report = simulate(&SimOptions {
        games: 6,
        seed: 1,
        policy: PolicyKind::Baseline,
        deterministic_chance: false,
        threads: Some(2),
    })
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim.ndjson");
    write_report_ndjson(&path, &report, 0, Some("abc".to_string())).unwrap();

    let lines: Vec<serde_json::Value> = read_ndjson_lenient(&path).unwrap();
    assert_eq!(lines.len(), 7);
    assert!(lines[..6].iter().all(|v| v["event"] == "game"));
    assert_eq!(lines[6]["event"], "sim_summary");

    let games: Vec<GameEventV1> = lines[..6]
        .iter()
        .map(|v| serde_json::from_value(v.clone()).unwrap())
        .collect();
    for (g, r) in games.iter().zip(report.games.iter()) {
        assert_eq!(g.final_score, r.final_score);
        assert_eq!(g.rounds.len(), 13);
    }

    let summary: SimSummaryEventV1 = serde_json::from_value(lines[6].clone()).unwrap();
    assert_eq!(summary.games, 6);
    assert_eq!(summary.policy, "baseline");
    assert_eq!(summary.config_hash.as_deref(), Some("abc"));
}
