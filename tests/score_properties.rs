use utility_filter::config::ScoringConfig;
use utility_filter::scoring::UtilityScorer;
use utility_filter::{RawSignals, ScoreResult};

const TITLES: [&str; 4] = [
    "",
    "Weekly garden update",
    "YOU WON'T BELIEVE THIS SECRET 😱😱😱",
    "i tried the impossible challenge",
];

fn scorer() -> UtilityScorer {
    UtilityScorer::new(&ScoringConfig::default())
}

fn assert_bounded(result: &ScoreResult) {
    let d = &result.diagnostics;
    assert!((0.0..=100.0).contains(&result.score), "score {}", result.score);
    assert!((0.0..=1.0).contains(&result.clickbait_score));
    for value in [d.approval, d.volume, d.velocity, d.integrity, d.decay, d.clickbait, d.composite] {
        assert!((0.0..=1.0).contains(&value), "component {} out of range", value);
    }
    assert!(d.smoothed_ratio.is_finite());
    assert!(d.engagement_velocity.is_finite());
}

#[test]
fn outputs_stay_bounded_across_a_grid() {
    let scorer = scorer();
    for likes in [0, 1, 7, 120, 9_000, 2_000_000] {
        for dislikes in [0, 3, 400, 90_000] {
            for views in [0, 50, 10_000, 80_000_000] {
                for subscribers in [0, 1, 5_000, 30_000_000] {
                    for days_old in [0.0, 0.5, 6.9, 400.0, 9_000.0] {
                        for title in TITLES {
                            let raw = RawSignals::new(likes, dislikes, views, subscribers, days_old)
                                .with_title(title);
                            assert_bounded(&scorer.score_raw(&raw));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn extreme_and_negative_inputs_are_total() {
    let scorer = scorer();
    let raw = RawSignals {
        likes: Some(i64::MAX),
        dislikes: Some(i64::MAX),
        view_count: Some(-7),
        subscribers: Some(i64::MIN),
        days_old: Some(f64::INFINITY),
        title: Some("\u{0}\u{1F600}".to_string()),
    };
    assert_bounded(&scorer.score_raw(&raw));
}

#[test]
fn identical_input_gives_identical_output() {
    let scorer = scorer();
    let raw = RawSignals::new(3_400, 120, 91_000, 4_000, 18.0).with_title("Fixing a leaky tap");
    let first = scorer.score_raw(&raw);
    for _ in 0..10 {
        assert_eq!(scorer.score_raw(&raw), first);
    }
    let fresh = UtilityScorer::new(&ScoringConfig::default());
    assert_eq!(fresh.score_raw(&raw), first);
}

#[test]
fn more_likes_never_hurt() {
    let scorer = scorer();
    for dislikes in [0, 10, 500] {
        for views in [1_000, 100_000] {
            let mut previous: Option<ScoreResult> = None;
            for likes in (0..3_000).step_by(37) {
                let result = scorer.score_raw(&RawSignals::new(likes, dislikes, views, 2_000, 20.0));
                if let Some(prev) = previous.as_ref() {
                    assert!(result.diagnostics.approval + 1e-12 >= prev.diagnostics.approval);
                    assert!(result.diagnostics.volume >= prev.diagnostics.volume);
                    assert!(
                        result.score >= prev.score,
                        "likes {} dislikes {} views {}: {} < {}",
                        likes,
                        dislikes,
                        views,
                        result.score,
                        prev.score
                    );
                }
                previous = Some(result);
            }
        }
    }
}

#[test]
fn more_dislikes_never_raise_approval() {
    let scorer = scorer();
    for likes in [0, 25, 4_000, 120_000] {
        let mut previous = f64::INFINITY;
        let mut previous_ratio = f64::INFINITY;
        for dislikes in (0..5_000).step_by(41) {
            let result = scorer.score_raw(&RawSignals::new(likes, dislikes, 1_000_000, 2_000, 20.0));
            assert!(result.diagnostics.approval <= previous + 1e-12);
            assert!(result.diagnostics.smoothed_ratio <= previous_ratio + 1e-12);
            previous = result.diagnostics.approval;
            previous_ratio = result.diagnostics.smoothed_ratio;
        }
    }
}

#[test]
fn older_content_scores_lower() {
    let scorer = scorer();
    let fresh = scorer.score_raw(&RawSignals::new(5_000, 50, 200_000, 20_000, 1.0));
    let stale = scorer.score_raw(&RawSignals::new(5_000, 50, 200_000, 20_000, 3_000.0));
    assert!(stale.diagnostics.decay < fresh.diagnostics.decay);
    assert!(stale.score < fresh.score);
}
