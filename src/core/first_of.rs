// src/core/first_of.rs

/// Try `strategies` in order on the same input; the first `Some` wins.
///
/// Replaces "try pattern A, else B, else C" ladders. Strategies can be a homogeneous
/// array of closures or a `Vec<Box<dyn Fn(I) -> Option<T>>>`.
pub fn first_of<I, T, F>(input: I, strategies: impl IntoIterator<Item = F>) -> Option<T>
where
    I: Copy,
    F: Fn(I) -> Option<T>,
{
    strategies.into_iter().find_map(|strategy| strategy(input))
}
