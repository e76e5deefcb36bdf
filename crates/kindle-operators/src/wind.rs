//! The 3x3 wind matrix.

use kindle_space::BoxSpace;

/// Direction-dependent fire spread probabilities.
///
/// Entry `[1 + dr][1 + dc]` is the probability that fire spreads to the
/// neighbour at offset `(dr, dc)` from a burning cell; `[0][1]` ("up") is
/// the chance fire climbs one row. The centre entry is carried for
/// completeness but never drives spread, since a cell is not its own
/// neighbour. Entries are not required to sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wind {
    probs: [[f64; 3]; 3],
}

impl Wind {
    /// Create a wind matrix.
    ///
    /// Returns `Err` if any entry lies outside `[0.0, 1.0]` (or is NaN).
    pub fn new(probs: [[f64; 3]; 3]) -> Result<Self, String> {
        let unit = BoxSpace::unit([3, 3]).map_err(|e| e.to_string())?;
        let flat: Vec<f64> = probs.iter().flatten().copied().collect();
        if !unit.contains_slice(&flat) {
            return Err(format!(
                "wind probabilities must lie in [0.0, 1.0], got {probs:?}"
            ));
        }
        Ok(Self { probs })
    }

    /// The same spread probability in every direction.
    pub fn uniform(p: f64) -> Result<Self, String> {
        Self::new([[p; 3]; 3])
    }

    /// Probability that fire travels by `(dr, dc)`, each in `-1..=1`.
    pub fn toward(&self, dr: i64, dc: i64) -> f64 {
        self.probs[(1 + dr) as usize][(1 + dc) as usize]
    }

    /// The raw matrix, rows top to bottom.
    pub fn matrix(&self) -> &[[f64; 3]; 3] {
        &self.probs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        let mut probs = [[0.5; 3]; 3];
        probs[2][1] = 1.2;
        assert!(Wind::new(probs).is_err());
        probs[2][1] = -0.1;
        assert!(Wind::new(probs).is_err());
        probs[2][1] = f64::NAN;
        assert!(Wind::new(probs).is_err());
    }

    #[test]
    fn accepts_bounds_without_normalization() {
        let wind = Wind::new([[1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]).unwrap();
        assert_eq!(wind.toward(-1, 0), 1.0);
        assert_eq!(wind.toward(0, 1), 0.0);
    }

    #[test]
    fn toward_indexes_by_offset() {
        let wind = Wind::new([[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9]]).unwrap();
        assert_eq!(wind.toward(-1, -1), 0.1);
        assert_eq!(wind.toward(-1, 0), 0.2);
        assert_eq!(wind.toward(0, 1), 0.6);
        assert_eq!(wind.toward(1, 1), 0.9);
    }
}
