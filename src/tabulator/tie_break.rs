//! Random resolution of ties between candidates or parties.

use crate::report::Narrator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::debug;

/// Picks one of `tied` equally ranked entries, returning its index.
/// `tied` is always at least 1.
pub trait TieBreaker {
    fn choose(&mut self, tied: usize) -> usize;
}

/// Uniform coin toss backed by a random number generator.
pub struct CoinToss<R = StdRng> {
    rng: R,
}

impl CoinToss<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible tosses, for replaying a count.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CoinToss<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TieBreaker for CoinToss<R> {
    fn choose(&mut self, tied: usize) -> usize {
        self.rng.gen_range(0..tied)
    }
}

/// Plays back a fixed list of picks, then keeps choosing the first entry.
#[derive(Debug, Default, Clone)]
pub struct Scripted {
    picks: VecDeque<usize>,
}

impl Scripted {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl TieBreaker for Scripted {
    fn choose(&mut self, tied: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % tied
    }
}

/// Tosses a coin between `tied` entries (id and display name), narrating the
/// contenders and the outcome. `kind` names the entries, e.g. "candidate".
pub fn coin_toss<T: Copy>(
    tied: &[(T, &str)],
    kind: &str,
    narrator: &mut Narrator,
    tie_breaker: &mut dyn TieBreaker,
) -> T {
    narrator.audit(format!(
        "Starting coin toss between the following {} {}s:",
        tied.len(),
        kind
    ));
    for (_, name) in tied {
        narrator.audit(format!("  {}", name));
    }

    let pick = tie_breaker.choose(tied.len());
    let (winner, name) = tied[pick];
    debug!(kind, tied = tied.len(), pick, "coin toss");
    narrator.audit(format!(
        "Randomly selected {} \"{}\" in coin toss.",
        kind, name
    ));
    winner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_toss_stays_in_range() {
        let mut toss = CoinToss::seeded(7);
        for tied in 1..10 {
            for _ in 0..100 {
                assert!(toss.choose(tied) < tied);
            }
        }
    }

    #[test]
    fn coin_toss_is_uniform_over_three_way_tie() {
        const TRIALS: usize = 3000;
        let mut toss = CoinToss::seeded(2021);
        let mut observed = [0usize; 3];
        for _ in 0..TRIALS {
            observed[toss.choose(3)] += 1;
        }

        let expected = TRIALS as f64 / 3.0;
        let chi_square: f64 = observed
            .iter()
            .map(|&count| (count as f64 - expected).powi(2) / expected)
            .sum();
        // 99.9th percentile of chi-square with two degrees of freedom
        assert!(chi_square < 13.816, "chi-square {} for {:?}", chi_square, observed);
    }

    #[test]
    fn coin_toss_is_uniform_over_two_way_tie() {
        const TRIALS: usize = 2000;
        let mut toss = CoinToss::seeded(99);
        let heads = (0..TRIALS).filter(|_| toss.choose(2) == 0).count();

        let expected = TRIALS as f64 / 2.0;
        let chi_square = 2.0 * (heads as f64 - expected).powi(2) / expected;
        assert!(chi_square < 10.828, "chi-square {} for {} heads", chi_square, heads);
    }

    #[test]
    fn scripted_picks_play_back_then_default() {
        let mut scripted = Scripted::new([2, 5]);
        assert_eq!(scripted.choose(3), 2);
        assert_eq!(scripted.choose(3), 2);
        assert_eq!(scripted.choose(3), 0);
    }

    #[test]
    fn narrated_toss_returns_the_picked_entry() {
        let mut narrator = Narrator::transcript();
        let mut scripted = Scripted::new([1]);
        let picked = coin_toss(
            &[(10, "Tie 1"), (20, "Tie 2"), (30, "Tie 3")],
            "candidate",
            &mut narrator,
            &mut scripted,
        );

        assert_eq!(picked, 20);
        let audit = narrator.audit_lines();
        assert_eq!(audit[0], "Starting coin toss between the following 3 candidates:");
        assert_eq!(audit.last().unwrap(), "Randomly selected candidate \"Tie 2\" in coin toss.");
    }
}
