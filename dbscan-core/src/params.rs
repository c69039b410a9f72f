//! Density parameters shared by every engine.

/// The `(eps, min_points)` pair defining DBSCAN density.
///
/// Values are not validated: out-of-range settings degrade gracefully rather
/// than fail. A non-positive (or NaN) `eps` isolates every point, so only
/// exact duplicates remain neighbours, and `min_points <= 1` turns every
/// point into a core point.
///
/// # Examples
/// ```
/// use dbscan_core::DensityParams;
///
/// let params = DensityParams::new(0.5, 4);
/// assert_eq!(params.eps_squared(), 0.25);
/// assert_eq!(DensityParams::new(-1.0, 4).eps_squared(), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityParams {
    eps: f64,
    min_points: usize,
}

impl DensityParams {
    /// Creates a parameter pair.
    #[must_use]
    pub const fn new(eps: f64, min_points: usize) -> Self {
        Self { eps, min_points }
    }

    /// Returns the neighbourhood radius.
    #[rustfmt::skip]
    #[must_use]
    pub const fn eps(&self) -> f64 { self.eps }

    /// Returns the minimum neighbourhood size (the point itself included).
    #[rustfmt::skip]
    #[must_use]
    pub const fn min_points(&self) -> usize { self.min_points }

    /// Returns the squared radius every distance comparison is made against.
    ///
    /// Radii that are not strictly positive collapse to zero.
    #[must_use]
    pub fn eps_squared(&self) -> f64 {
        if self.eps > 0.0 {
            self.eps * self.eps
        } else {
            0.0
        }
    }
}
