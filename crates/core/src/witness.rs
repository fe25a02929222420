//! Witness contracts
//!
//! A witness is a zero-sized value standing for an implementation of a
//! contract. Behavior is chosen by naming the witness type at compile time:
//!
//! ```
//! use attest_core::witness::{self, Equality};
//! use attest_core::instances::{EqDefault, EqIgnoreCase};
//!
//! assert!(!witness::equals::<EqDefault, str>("Alpha", "ALPHA"));
//! assert!(witness::equals::<EqIgnoreCase, str>("Alpha", "ALPHA"));
//! assert_eq!(EqIgnoreCase::hash("Alpha"), EqIgnoreCase::hash("aLpHa"));
//! ```
//!
//! Contract operations are associated functions with no receiver. A witness
//! has nothing to read, so there is nothing to pass.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use rustc_hash::FxHasher;

/// Marker for stateless strategy types.
///
/// Implementors are zero-sized and trivially constructible. Two values of
/// the same witness type are interchangeable. Use [`witness!`](crate::witness!)
/// to declare one.
pub trait Witness: Copy + Default + Send + Sync + 'static {}

/// Equality and hashing over `A`.
///
/// Implementations must be reflexive, symmetric and transitive, and values
/// that compare equal must hash equally.
pub trait Equality<A: ?Sized>: Witness {
    /// Test `x` and `y` for equality
    fn equals(x: &A, y: &A) -> bool;

    /// Hash `x` consistently with [`equals`](Equality::equals)
    fn hash(x: &A) -> u64;
}

/// Total ordering over `A`, consistent with the witness's equality.
pub trait Order<A: ?Sized>: Equality<A> {
    /// Compare `x` with `y`
    fn compare(x: &A, y: &A) -> Ordering;
}

/// Validation rule over `A`.
pub trait Predicate<A: ?Sized>: Witness {
    /// Whether `x` satisfies the rule
    fn holds(x: &A) -> bool;

    /// Short human-readable statement of the rule
    fn describe() -> &'static str;
}

/// Equality of `x` and `y` under witness `W`
#[inline]
pub fn equals<W: Equality<A>, A: ?Sized>(x: &A, y: &A) -> bool {
    W::equals(x, y)
}

/// Hash of `x` under witness `W`
#[inline]
pub fn hash<W: Equality<A>, A: ?Sized>(x: &A) -> u64 {
    W::hash(x)
}

/// Ordering of `x` and `y` under witness `W`
#[inline]
pub fn compare<W: Order<A>, A: ?Sized>(x: &A, y: &A) -> Ordering {
    W::compare(x, y)
}

/// Whether `x` satisfies predicate `W`
#[inline]
pub fn holds<W: Predicate<A>, A: ?Sized>(x: &A) -> bool {
    W::holds(x)
}

/// Hash a value through its std `Hash` impl with a deterministic hasher.
pub(crate) fn fx_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Declare a witness type.
///
/// The plain form derives the std traits and checks at compile time that
/// the type is zero-sized. The generic form wraps its parameters in
/// `PhantomData<fn() -> ..>` so the witness is `Copy`, `Send` and `Sync`
/// whatever it is parameterized over.
///
/// ```
/// use attest_core::witness;
/// use attest_core::witness::{Equality, Witness};
///
/// witness! {
///     /// Compares integers by parity
///     pub struct EqParity;
/// }
///
/// impl Equality<i64> for EqParity {
///     fn equals(x: &i64, y: &i64) -> bool {
///         x.rem_euclid(2) == y.rem_euclid(2)
///     }
///
///     fn hash(x: &i64) -> u64 {
///         x.rem_euclid(2) as u64
///     }
/// }
///
/// assert!(witness::equals::<EqParity, _>(&3, &7));
/// ```
#[macro_export]
macro_rules! witness {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name;

        impl $crate::witness::Witness for $name {}

        const _: () = assert!(::core::mem::size_of::<$name>() == 0);
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident<$($param:ident),+ $(,)?>;) => {
        $(#[$meta])*
        $vis struct $name<$($param),+>(::core::marker::PhantomData<fn() -> ($($param,)+)>);

        impl<$($param),+> ::core::clone::Clone for $name<$($param),+> {
            #[inline]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$($param),+> ::core::marker::Copy for $name<$($param),+> {}

        impl<$($param),+> ::core::default::Default for $name<$($param),+> {
            #[inline]
            fn default() -> Self {
                $name(::core::marker::PhantomData)
            }
        }

        impl<$($param),+> ::core::fmt::Debug for $name<$($param),+> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        impl<$($param: 'static),+> $crate::witness::Witness for $name<$($param),+> {}
    };
}

/// A value whose std `Eq`, `Hash` and `Ord` come from witness `W`.
///
/// Lets a witness key the std collections:
///
/// ```
/// use std::collections::HashSet;
/// use attest_core::instances::EqIgnoreCase;
/// use attest_core::witness::ByWitness;
///
/// let mut seen = HashSet::new();
/// assert!(seen.insert(ByWitness::<EqIgnoreCase, _>::new("Tokio".to_string())));
/// assert!(!seen.insert(ByWitness::<EqIgnoreCase, _>::new("TOKIO".to_string())));
/// ```
pub struct ByWitness<W, A> {
    value: A,
    _witness: PhantomData<W>,
}

impl<W, A> ByWitness<W, A> {
    /// Wrap `value`
    pub fn new(value: A) -> Self {
        ByWitness {
            value,
            _witness: PhantomData,
        }
    }

    /// Borrow the wrapped value
    #[inline]
    pub fn get(&self) -> &A {
        &self.value
    }

    /// Consume and return the wrapped value
    pub fn into_inner(self) -> A {
        self.value
    }
}

impl<W, A: Clone> Clone for ByWitness<W, A> {
    fn clone(&self) -> Self {
        ByWitness::new(self.value.clone())
    }
}

impl<W, A: fmt::Debug> fmt::Debug for ByWitness<W, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByWitness").field(&self.value).finish()
    }
}

impl<W: Equality<A>, A> PartialEq for ByWitness<W, A> {
    fn eq(&self, other: &Self) -> bool {
        W::equals(&self.value, &other.value)
    }
}

impl<W: Equality<A>, A> Eq for ByWitness<W, A> {}

impl<W: Equality<A>, A> Hash for ByWitness<W, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(W::hash(&self.value));
    }
}

impl<W: Order<A>, A> PartialOrd for ByWitness<W, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Order<A>, A> Ord for ByWitness<W, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        W::compare(&self.value, &other.value)
    }
}
