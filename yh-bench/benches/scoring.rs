use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yh_bench::gen_dice_samples;
use yh_core::{score, scores_for_dice, Category};

fn bench_scores_for_dice(c: &mut Criterion) {
    let mut g = c.benchmark_group("yh_core_scoring");
    for &n in &[256usize, 4096usize] {
        let samples = gen_dice_samples(n);
        g.bench_with_input(BenchmarkId::new("scores_for_dice_batch", n), &samples, |b, s| {
            b.iter(|| {
                for dice in s.iter() {
                    black_box(scores_for_dice(black_box(dice)));
                }
            })
        });
    }
    g.finish();
}

fn bench_single_category(c: &mut Criterion) {
    let samples = gen_dice_samples(4096);
    let mut g = c.benchmark_group("yh_core_score_category");
    for cat in [Category::FullHouse, Category::SmallStraight, Category::Sixes] {
        g.bench_with_input(BenchmarkId::new("score", cat.name()), &samples, |b, s| {
            b.iter(|| {
                for dice in s.iter() {
                    black_box(score(cat, black_box(dice)));
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_scores_for_dice, bench_single_category);
criterion_main!(benches);
