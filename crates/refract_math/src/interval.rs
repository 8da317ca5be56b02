/// A range of accepted ray parameters.
///
/// Root selection uses the open form (`surrounds`) so that the lower bound
/// itself is never accepted: `Interval::above(0.0)` rejects a ray that starts
/// exactly on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Everything strictly greater than `min`, up to infinity.
    pub fn above(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }
}
