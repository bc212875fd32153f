//! Next/previous index selection.

use rand::Rng;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Pick the index to move to from `current` in a list of `len` tracks.
///
/// - no current track: index 0, whatever the mode;
/// - shuffle: a uniformly random index different from `current`
///   (0 when there is only one track);
/// - next wraps to the start, previous stops at 0.
///
/// Returns `None` for an empty list.
pub fn pick_index<R: Rng + ?Sized>(
    current: Option<usize>,
    len: usize,
    shuffle: bool,
    direction: Direction,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(i) = current else {
        return Some(0);
    };

    if shuffle {
        if len == 1 {
            return Some(0);
        }
        // Draw from the len - 1 other slots and step over `i`.
        let draw = rng.random_range(0..len - 1);
        return Some(if draw >= i { draw + 1 } else { draw });
    }

    Some(match direction {
        Direction::Next => (i + 1) % len,
        Direction::Previous => i.saturating_sub(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn empty_list_has_no_index() {
        assert_eq!(pick_index(None, 0, false, Direction::Next, &mut rng()), None);
        assert_eq!(pick_index(Some(0), 0, true, Direction::Previous, &mut rng()), None);
    }

    #[test]
    fn no_current_track_starts_at_zero() {
        for shuffle in [false, true] {
            for dir in [Direction::Next, Direction::Previous] {
                assert_eq!(pick_index(None, 5, shuffle, dir, &mut rng()), Some(0));
            }
        }
    }

    #[test]
    fn previous_does_not_wrap() {
        assert_eq!(pick_index(Some(0), 3, false, Direction::Previous, &mut rng()), Some(0));
        assert_eq!(pick_index(Some(2), 3, false, Direction::Previous, &mut rng()), Some(1));
    }

    #[test]
    fn next_wraps_to_start() {
        assert_eq!(pick_index(Some(2), 3, false, Direction::Next, &mut rng()), Some(0));
    }

    #[test]
    fn shuffle_with_single_track_returns_it() {
        let mut r = rng();
        for _ in 0..100 {
            assert_eq!(pick_index(Some(0), 1, true, Direction::Next, &mut r), Some(0));
        }
    }

    #[test]
    fn shuffle_reaches_every_other_index() {
        let mut r = rng();
        let mut seen = [false; 4];
        for _ in 0..500 {
            let i = pick_index(Some(1), 4, true, Direction::Next, &mut r).unwrap();
            seen[i] = true;
        }
        assert_eq!(seen, [true, false, true, true]);
    }

    proptest! {
        #[test]
        fn sequential_next_cycles(len in 1usize..50, start in 0usize..50) {
            let i = start % len;
            let got = pick_index(Some(i), len, false, Direction::Next, &mut rng()).unwrap();
            prop_assert_eq!(got, (i + 1) % len);
        }

        #[test]
        fn sequential_previous_steps_back_or_stays(len in 1usize..50, start in 0usize..50) {
            let i = start % len;
            let got = pick_index(Some(i), len, false, Direction::Previous, &mut rng()).unwrap();
            prop_assert_eq!(got, if i > 0 { i - 1 } else { 0 });
        }

        #[test]
        fn shuffle_always_changes_track(len in 2usize..50, start in 0usize..50, seed in any::<u64>()) {
            let i = start % len;
            let mut r = StdRng::seed_from_u64(seed);
            for dir in [Direction::Next, Direction::Previous] {
                let got = pick_index(Some(i), len, true, dir, &mut r).unwrap();
                prop_assert!(got < len);
                prop_assert_ne!(got, i);
            }
        }
    }
}
