//! Strip generation for the simulated device

use gf_gaff::ReelStrip;
use rand::Rng;
use rand::seq::SliceRandom;

/// Regular paying symbols (HP = high paying, LP = low paying)
pub const REGULAR_SYMBOLS: [&str; 10] = [
    "HP1", "HP2", "HP3", "HP4", "LP1", "LP2", "LP3", "LP4", "LP5", "LP6",
];

/// Generate one strip set: `reels` strips named `<set>_R<n>`
///
/// Every strip carries each special exactly once, spaced
/// `strip_length / specials.len()` stops apart, so a window no taller than
/// that spacing shows at most one special. Remaining stops are regular
/// symbols.
pub fn generate_strip_set<R: Rng>(
    rng: &mut R,
    set: &str,
    reels: usize,
    strip_length: usize,
    specials: &[String],
) -> Vec<ReelStrip> {
    (1..=reels)
        .map(|reel| {
            let mut symbols: Vec<String> = (0..strip_length)
                .map(|_| REGULAR_SYMBOLS[rng.random_range(0..REGULAR_SYMBOLS.len())].to_string())
                .collect();

            if !specials.is_empty() && strip_length >= specials.len() {
                let spacing = strip_length / specials.len();
                let offset = rng.random_range(0..spacing);
                let mut order = specials.to_vec();
                order.shuffle(rng);
                for (slot, special) in order.into_iter().enumerate() {
                    symbols[offset + slot * spacing] = special;
                }
            }

            ReelStrip::new(format!("{set}_R{reel}"), set, symbols)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_gaff::NameFilter;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn specials() -> Vec<String> {
        ["SCATTER", "WILD", "JP_GRAND", "JP_MAJOR", "JP_MINOR", "JP_MINI"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_names_and_sets() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let strips = generate_strip_set(&mut rng, "BG", 5, 30, &specials());
        let names: Vec<&str> = strips.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["BG_R1", "BG_R2", "BG_R3", "BG_R4", "BG_R5"]);
        assert!(strips.iter().all(|s| s.set == "BG" && s.len() == 30));
    }

    #[test]
    fn test_each_special_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for strip in generate_strip_set(&mut rng, "BG", 5, 30, &specials()) {
            for special in specials() {
                let count = strip.symbols.iter().filter(|s| **s == special).count();
                assert_eq!(count, 1, "{special} on {}", strip.name);
            }
        }
    }

    #[test]
    fn test_window_shows_at_most_one_special() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let filter = NameFilter::one_of(specials());
        for strip in generate_strip_set(&mut rng, "BG", 5, 30, &specials()) {
            for position in 0..strip.len() {
                assert!(strip.count_in_window(position, 3, &filter) <= 1);
            }
        }
    }

    #[test]
    fn test_same_seed_same_strips() {
        let a = generate_strip_set(&mut ChaCha8Rng::seed_from_u64(9), "FG_A", 5, 30, &specials());
        let b = generate_strip_set(&mut ChaCha8Rng::seed_from_u64(9), "FG_A", 5, 30, &specials());
        assert_eq!(a, b);
    }
}
