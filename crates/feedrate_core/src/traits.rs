use crate::tag::Tag;
use nalgebra::SVector;

/// Anything a formula can read its inputs from.
pub trait ValueSource {
    /// Returns the value stored for `tag`, or `None` when it is unknown.
    fn lookup(&self, tag: Tag) -> Option<f64>;

    fn contains(&self, tag: Tag) -> bool {
        self.lookup(tag).is_some()
    }
}

/// A scalar function to be minimized over `N` parameters.
pub trait Objective<const N: usize> {
    fn evaluate(&self, params: &SVector<f64, N>) -> f64;
}

impl<const N: usize, F> Objective<N> for F
where
    F: Fn(&SVector<f64, N>) -> f64,
{
    fn evaluate(&self, params: &SVector<f64, N>) -> f64 {
        self(params)
    }
}
