//! Aggregates over finished games: score summary and text histogram.

use std::collections::BTreeMap;
use std::fmt;

use crate::driver::GameReport;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreSummary {
    pub games: usize,
    pub mean: f64,
    /// Upper median for even-sized samples.
    pub median: u32,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    /// Fraction of games that earned the upper-section bonus.
    pub bonus_rate: f64,
}

impl ScoreSummary {
    /// `None` when no game was played.
    pub fn from_games(games: &[GameReport]) -> Option<Self> {
        let mut scores: Vec<u32> = games.iter().map(|g| g.final_score).collect();
        scores.sort_unstable();
        let (&min, &max) = (scores.first()?, scores.last()?);

        let n = scores.len() as f64;
        let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / n;
        let var = scores
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        let bonus_games = games.iter().filter(|g| g.got_bonus()).count();

        Some(Self {
            games: scores.len(),
            mean,
            median: scores[scores.len() / 2],
            std_dev: var.sqrt(),
            min,
            max,
            bonus_rate: bonus_games as f64 / n,
        })
    }
}

/// Final scores grouped into fixed-width buckets, empty buckets included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreHistogram {
    bucket_size: u32,
    total: usize,
    /// (bucket lower bound, count), ascending and contiguous.
    buckets: Vec<(u32, usize)>,
}

impl ScoreHistogram {
    pub fn from_games(games: &[GameReport], bucket_size: u32) -> Self {
        let bucket_size = bucket_size.max(1);
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for g in games {
            *counts
                .entry(g.final_score - g.final_score % bucket_size)
                .or_default() += 1;
        }

        let buckets = match (counts.keys().next(), counts.keys().next_back()) {
            (Some(&lo), Some(&hi)) => (lo..=hi)
                .step_by(bucket_size as usize)
                .map(|b| (b, counts.get(&b).copied().unwrap_or(0)))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            bucket_size,
            total: games.len(),
            buckets,
        }
    }

    pub fn buckets(&self) -> &[(u32, usize)] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl fmt::Display for ScoreHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const BAR_WIDTH: usize = 50;
        if self.is_empty() {
            return Ok(());
        }
        let peak = self.buckets.iter().map(|&(_, c)| c).max().unwrap_or(1);
        let rule = "─".repeat(70);

        writeln!(
            f,
            "Score histogram (N={}, bin={}):",
            self.total, self.bucket_size
        )?;
        writeln!(f, "{rule}")?;
        for &(lo, count) in &self.buckets {
            let bar = "█".repeat(count * BAR_WIDTH / peak);
            writeln!(
                f,
                "{:3}-{:3} │{:<width$} {:5} ({:.1}%)",
                lo,
                lo + self.bucket_size - 1,
                bar,
                count,
                count as f64 * 100.0 / self.total as f64,
                width = BAR_WIDTH
            )?;
        }
        writeln!(f, "{rule}")
    }
}
