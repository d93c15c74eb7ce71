//! Greedy max-min color selection (Glasbey et al., 2007).
//!
//! The builder keeps, for every candidate, its distance to the nearest
//! palette color. Each step folds the newest palette color into that field
//! and appends the candidate that is farthest from the palette. The field
//! persists between calls, so growing a palette from 10 to 20 colors does
//! the same work as building 20 at once and yields the same colors.

use cam02_ucs::Ucs;

/// Initial distance for every candidate, larger than any J'a'b' distance
pub const FAR_AWAY: f32 = 1000.0;

pub struct PaletteBuilder {
    candidates: Vec<Ucs>,
    palette: Vec<Ucs>,
    distances: Vec<f32>,
    warned_exhausted: bool,
}

impl PaletteBuilder {
    /// Seed with `base`, or with `seed` alone when `base` is empty.
    ///
    /// Every seed color except the last is folded into the distance field
    /// here; the last one is folded by the next `extend`.
    pub fn new(candidates: Vec<Ucs>, base: Vec<Ucs>, seed: Ucs) -> Self {
        let palette = if base.is_empty() { vec![seed] } else { base };
        let mut builder = Self {
            distances: vec![FAR_AWAY; candidates.len()],
            candidates,
            palette,
            warned_exhausted: false,
        };

        for i in 0..builder.palette.len() - 1 {
            let color = builder.palette[i];
            builder.fold(color);
        }

        builder
    }

    /// Grow the palette to `target` colors and return its first `target`
    /// entries. Requests at or below the current size do no work.
    pub fn extend(&mut self, target: usize) -> &[Ucs] {
        if target <= self.palette.len() {
            return &self.palette[..target];
        }

        let start = self.palette.len();
        while self.palette.len() < target {
            let last = self.palette[self.palette.len() - 1];
            self.fold(last);

            let next = match self.farthest() {
                Some(index) => self.candidates[index],
                None => {
                    if !self.warned_exhausted {
                        tracing::warn!(
                            size = self.palette.len(),
                            "No candidate colors available, repeating the last palette color"
                        );
                        self.warned_exhausted = true;
                    }
                    last
                }
            };
            self.palette.push(next);
        }

        tracing::debug!(
            from = start,
            to = target,
            min_distance = self.min_distance(),
            "Extended palette"
        );

        &self.palette[..target]
    }

    /// Lower every candidate's distance against `color`
    fn fold(&mut self, color: Ucs) {
        for (distance, candidate) in self.distances.iter_mut().zip(&self.candidates) {
            *distance = distance.min(candidate.distance(color));
        }
    }

    /// Index of the largest distance, lowest index on ties
    fn farthest(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, &distance) in self.distances.iter().enumerate() {
            match best {
                Some((_, current)) if distance <= current => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }

    pub fn palette(&self) -> &[Ucs] {
        &self.palette
    }

    pub fn len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Largest value left in the distance field: how far the most recently
    /// chosen color was from the rest of the palette when it was picked.
    pub fn min_distance(&self) -> f32 {
        self.distances.iter().copied().fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Ucs> {
        (0..n).map(|i| Ucs::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_empty_base_seeds_with_white() {
        let white = Ucs::new(100.0, 0.0, 0.0);
        let builder = PaletteBuilder::new(line(10), Vec::new(), white);

        assert_eq!(builder.palette(), &[white]);
        assert!(builder.distances().iter().all(|&d| d == FAR_AWAY));
    }

    #[test]
    fn test_base_folds_all_but_last() {
        let base = vec![Ucs::new(0.0, 0.0, 0.0), Ucs::new(9.0, 0.0, 0.0)];
        let builder = PaletteBuilder::new(line(10), base, Ucs::default());

        assert_eq!(builder.len(), 2);
        // Only the first base color is in the field
        assert_eq!(builder.distances()[3], 3.0);
        assert_eq!(builder.distances()[9], 9.0);
    }

    #[test]
    fn test_picks_farthest_point() {
        let white = Ucs::new(100.0, 0.0, 0.0);
        let mut builder = PaletteBuilder::new(line(101), Vec::new(), white);

        let palette = builder.extend(3).to_vec();
        assert_eq!(palette[0], white);
        assert_eq!(palette[1], Ucs::new(0.0, 0.0, 0.0));
        assert_eq!(palette[2], Ucs::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        let candidates = vec![
            Ucs::new(-5.0, 0.0, 0.0),
            Ucs::new(5.0, 0.0, 0.0),
            Ucs::new(0.0, 5.0, 0.0),
        ];
        let mut builder = PaletteBuilder::new(candidates, Vec::new(), Ucs::default());
        assert_eq!(builder.extend(2)[1], Ucs::new(-5.0, 0.0, 0.0));
    }

    #[test]
    fn test_extend_is_prefix_stable() {
        let candidates: Vec<Ucs> = (0..200)
            .map(|i| Ucs::new((i % 17) as f32 * 6.0, (i % 7) as f32 * 9.0, (i % 5) as f32 * 11.0))
            .collect();

        let mut stepwise = PaletteBuilder::new(candidates.clone(), Vec::new(), Ucs::default());
        stepwise.extend(4);
        stepwise.extend(9);
        let stepwise = stepwise.extend(15).to_vec();

        let mut direct = PaletteBuilder::new(candidates, Vec::new(), Ucs::default());
        assert_eq!(direct.extend(15), stepwise.as_slice());
    }

    #[test]
    fn test_shrinking_request_does_no_work() {
        let mut builder = PaletteBuilder::new(line(50), Vec::new(), Ucs::default());
        builder.extend(10);
        let distances = builder.distances().to_vec();

        assert_eq!(builder.extend(4).len(), 4);
        assert_eq!(builder.extend(10).len(), 10);
        assert_eq!(builder.len(), 10);
        assert_eq!(builder.distances(), distances.as_slice());
    }

    #[test]
    fn test_distance_field_never_increases() {
        let mut builder = PaletteBuilder::new(line(64), Vec::new(), Ucs::new(100.0, 0.0, 0.0));
        let mut previous = builder.distances().to_vec();
        for size in 2..12 {
            builder.extend(size);
            for (now, before) in builder.distances().iter().zip(&previous) {
                assert!(now <= before);
            }
            previous = builder.distances().to_vec();
        }
    }

    #[test]
    fn test_exhausted_pool_repeats_last() {
        let seed = Ucs::new(100.0, 0.0, 0.0);
        let mut builder = PaletteBuilder::new(Vec::new(), Vec::new(), seed);

        assert_eq!(builder.extend(3), &[seed, seed, seed]);
        assert_eq!(builder.candidate_count(), 0);
        assert_eq!(builder.min_distance(), 0.0);
    }

    #[test]
    fn test_small_pool_runs_out() {
        let seed = Ucs::new(100.0, 0.0, 0.0);
        let dark = Ucs::new(0.0, 0.0, 0.0);
        let grey = Ucs::new(50.0, 0.0, 0.0);
        let mut builder = PaletteBuilder::new(vec![dark, grey], Vec::new(), seed);

        // Once every candidate is in the palette the field is all zero and
        // the lowest index wins each tie
        assert_eq!(builder.extend(6), &[seed, dark, grey, dark, dark, dark]);
        assert_eq!(builder.len(), 6);
        assert_eq!(builder.min_distance(), 0.0);
        assert!(builder.distances().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_extend_zero() {
        let mut builder = PaletteBuilder::new(line(5), Vec::new(), Ucs::default());
        assert!(builder.extend(0).is_empty());
        assert_eq!(builder.len(), 1);
    }
}
