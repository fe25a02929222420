//! Predicate witnesses for constrained values
//!
//! Numeric predicates compare against `A::default()`, which is zero for the
//! std number types.

use crate::witness;
use crate::witness::{Predicate, Witness};

witness! {
    /// Accepts every value
    pub struct Always;
}

impl<A: ?Sized> Predicate<A> for Always {
    #[inline]
    fn holds(_: &A) -> bool {
        true
    }

    fn describe() -> &'static str {
        "always satisfied"
    }
}

witness! {
    /// Strictly greater than zero
    pub struct Positive;
}

impl<A: PartialOrd + Default> Predicate<A> for Positive {
    #[inline]
    fn holds(x: &A) -> bool {
        *x > A::default()
    }

    fn describe() -> &'static str {
        "must be greater than zero"
    }
}

witness! {
    /// Greater than or equal to zero
    pub struct NonNegative;
}

impl<A: PartialOrd + Default> Predicate<A> for NonNegative {
    #[inline]
    fn holds(x: &A) -> bool {
        *x >= A::default()
    }

    fn describe() -> &'static str {
        "must be zero or greater"
    }
}

witness! {
    /// Not equal to zero
    pub struct NonZero;
}

impl<A: PartialEq + Default> Predicate<A> for NonZero {
    #[inline]
    fn holds(x: &A) -> bool {
        *x != A::default()
    }

    fn describe() -> &'static str {
        "must not be zero"
    }
}

witness! {
    /// Non-empty text or sequence
    pub struct NonEmpty;
}

impl Predicate<str> for NonEmpty {
    fn holds(x: &str) -> bool {
        !x.is_empty()
    }

    fn describe() -> &'static str {
        "must not be empty"
    }
}

impl Predicate<String> for NonEmpty {
    fn holds(x: &String) -> bool {
        !x.is_empty()
    }

    fn describe() -> &'static str {
        "must not be empty"
    }
}

impl<T> Predicate<[T]> for NonEmpty {
    fn holds(x: &[T]) -> bool {
        !x.is_empty()
    }

    fn describe() -> &'static str {
        "must not be empty"
    }
}

impl<T> Predicate<Vec<T>> for NonEmpty {
    fn holds(x: &Vec<T>) -> bool {
        !x.is_empty()
    }

    fn describe() -> &'static str {
        "must not be empty"
    }
}

/// At most `N` elements; text is measured in chars, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaxLen<const N: usize>;

impl<const N: usize> Witness for MaxLen<N> {}

impl<const N: usize> Predicate<str> for MaxLen<N> {
    fn holds(x: &str) -> bool {
        x.chars().count() <= N
    }

    fn describe() -> &'static str {
        "must not exceed the maximum length"
    }
}

impl<const N: usize> Predicate<String> for MaxLen<N> {
    fn holds(x: &String) -> bool {
        <Self as Predicate<str>>::holds(x)
    }

    fn describe() -> &'static str {
        "must not exceed the maximum length"
    }
}

impl<T, const N: usize> Predicate<Vec<T>> for MaxLen<N> {
    fn holds(x: &Vec<T>) -> bool {
        x.len() <= N
    }

    fn describe() -> &'static str {
        "must not exceed the maximum length"
    }
}

/// Integer within `MIN..=MAX`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InRange<const MIN: i128, const MAX: i128>;

impl<const MIN: i128, const MAX: i128> Witness for InRange<MIN, MAX> {}

impl<A, const MIN: i128, const MAX: i128> Predicate<A> for InRange<MIN, MAX>
where
    A: Copy + Into<i128>,
{
    #[inline]
    fn holds(x: &A) -> bool {
        (MIN..=MAX).contains(&(*x).into())
    }

    fn describe() -> &'static str {
        "must be within the allowed range"
    }
}

witness! {
    /// Both `P` and `Q` hold
    pub struct And<P, Q>;
}

impl<A: ?Sized, P: Predicate<A>, Q: Predicate<A>> Predicate<A> for And<P, Q> {
    #[inline]
    fn holds(x: &A) -> bool {
        P::holds(x) && Q::holds(x)
    }

    fn describe() -> &'static str {
        "must satisfy all of several conditions"
    }
}

witness! {
    /// `P` does not hold
    pub struct Not<P>;
}

impl<A: ?Sized, P: Predicate<A>> Predicate<A> for Not<P> {
    #[inline]
    fn holds(x: &A) -> bool {
        !P::holds(x)
    }

    fn describe() -> &'static str {
        "must fail the negated condition"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness::holds;

    #[test]
    fn test_always() {
        assert!(holds::<Always, _>(&-1));
        assert!(holds::<Always, str>(""));
    }

    #[test]
    fn test_positive() {
        assert!(holds::<Positive, _>(&5));
        assert!(!holds::<Positive, _>(&0));
        assert!(!holds::<Positive, _>(&-1));
        assert!(holds::<Positive, _>(&0.5f64));
        assert!(!holds::<Positive, _>(&f64::NAN));
    }

    #[test]
    fn test_non_negative_and_non_zero() {
        assert!(holds::<NonNegative, _>(&0u32));
        assert!(!holds::<NonNegative, _>(&-3i64));
        assert!(holds::<NonZero, _>(&-3i64));
        assert!(!holds::<NonZero, _>(&0i64));
    }

    #[test]
    fn test_non_empty() {
        assert!(holds::<NonEmpty, str>("x"));
        assert!(!holds::<NonEmpty, String>(&String::new()));
        assert!(holds::<NonEmpty, Vec<u8>>(&vec![0]));
        assert!(!holds::<NonEmpty, [u8]>(&[]));
    }

    #[test]
    fn test_max_len_counts_chars() {
        assert!(holds::<MaxLen<3>, str>("abc"));
        assert!(!holds::<MaxLen<3>, str>("abcd"));
        // three chars, six bytes
        assert!(holds::<MaxLen<3>, str>("éèê"));
        assert!(holds::<MaxLen<2>, Vec<u8>>(&vec![1, 2]));
    }

    #[test]
    fn test_in_range_inclusive() {
        type Percent = InRange<0, 100>;
        assert!(holds::<Percent, _>(&0u8));
        assert!(holds::<Percent, _>(&100i32));
        assert!(!holds::<Percent, _>(&101i64));
        assert!(!holds::<Percent, _>(&-1i16));
    }

    #[test]
    fn test_combinators() {
        type Small = And<Positive, Not<InRange<10, { i128::MAX }>>>;
        assert!(holds::<Small, _>(&9i32));
        assert!(!holds::<Small, _>(&10i32));
        assert!(!holds::<Small, _>(&0i32));
        assert_eq!(
            <Small as Predicate<i32>>::describe(),
            "must satisfy all of several conditions"
        );
    }
}
