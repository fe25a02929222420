//! Constrained wrapper type
//!
//! A `NewType<N, A, P, O>` owns one raw `A` that satisfied predicate `P` when
//! it was built. `N` is a tag giving the wrapper its own identity (two
//! wrappers over `i32` with the same predicate are still different types),
//! and `O` is the ordering witness behind its std `Eq`, `Hash` and `Ord`.
//!
//! ## Validation
//!
//! Construction is the only gate:
//! - `new()` and `map()` run the predicate
//! - deserialization goes through `new()`
//! - there is no `&mut` access to the raw value
//!
//! ## Examples
//!
//! ```
//! use attest_core::newtype;
//! use attest_core::predicate::Positive;
//!
//! newtype!(pub PositiveInt: i32 where Positive;);
//!
//! let five = PositiveInt::new(5).unwrap();
//! assert_eq!(*five.value(), 5);
//! assert!(PositiveInt::new(-1).is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::instances::OrdDefault;
use crate::predicate::Always;
use crate::witness::{Order, Predicate};

/// Validated wrapper around a raw value
pub struct NewType<N, A, P = Always, O = OrdDefault> {
    value: A,
    _marker: PhantomData<fn() -> (N, P, O)>,
}

impl<N, A, P: Predicate<A>, O> NewType<N, A, P, O> {
    /// Wrap `value`, validating it against `P`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the predicate does not hold. The value is
    /// never adjusted to make it fit.
    pub fn new(value: A) -> Result<Self, ValidationError> {
        if P::holds(&value) {
            Ok(NewType {
                value,
                _marker: PhantomData,
            })
        } else {
            Err(ValidationError::new(
                wrapper_name(std::any::type_name::<N>()),
                P::describe(),
            ))
        }
    }

    /// Check whether `value` would be accepted
    #[inline]
    pub fn is_valid(value: &A) -> bool {
        P::holds(value)
    }

    /// Transform the raw value and validate the result
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the mapped value fails the predicate.
    pub fn map(self, f: impl FnOnce(A) -> A) -> Result<Self, ValidationError> {
        Self::new(f(self.value))
    }
}

/// Wrapper name for errors: the tag's last path segment without `Tag`
fn wrapper_name(tag: &'static str) -> &'static str {
    let short = tag.rsplit("::").next().unwrap_or(tag);
    short.strip_suffix("Tag").unwrap_or(short)
}

impl<N, A, P, O> NewType<N, A, P, O> {
    /// Borrow the raw value
    #[inline]
    pub fn value(&self) -> &A {
        &self.value
    }

    /// Consume and return the raw value
    pub fn into_inner(self) -> A {
        self.value
    }
}

/// Access to the raw value behind a validated wrapper
///
/// The associated `Pred` and `Ord` types expose the predicate and ordering
/// witnesses the wrapper was declared with.
pub trait Constrained {
    /// Wrapped value type
    type Raw: ?Sized;
    /// Predicate witness the raw value satisfies
    type Pred;
    /// Ordering witness declared for the wrapper
    type Ord;

    /// Borrow the raw value
    fn raw(&self) -> &Self::Raw;
}

impl<N, A, P, O> Constrained for NewType<N, A, P, O> {
    type Raw = A;
    type Pred = P;
    type Ord = O;

    #[inline]
    fn raw(&self) -> &A {
        &self.value
    }
}

impl<N, A, P, O> AsRef<A> for NewType<N, A, P, O> {
    fn as_ref(&self) -> &A {
        &self.value
    }
}

impl<N, A, P, O> Deref for NewType<N, A, P, O> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.value
    }
}

impl<N, A: Clone, P, O> Clone for NewType<N, A, P, O> {
    fn clone(&self) -> Self {
        NewType {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<N, A: Copy, P, O> Copy for NewType<N, A, P, O> {}

impl<N, A: fmt::Debug, P, O> fmt::Debug for NewType<N, A, P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NewType").field(&self.value).finish()
    }
}

impl<N, A: fmt::Display, P, O> fmt::Display for NewType<N, A, P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

// Equality, hashing and ordering all come from `O`, so they always agree.
impl<N, A, P, O: Order<A>> PartialEq for NewType<N, A, P, O> {
    fn eq(&self, other: &Self) -> bool {
        O::equals(&self.value, &other.value)
    }
}

impl<N, A, P, O: Order<A>> Eq for NewType<N, A, P, O> {}

impl<N, A, P, O: Order<A>> Hash for NewType<N, A, P, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(O::hash(&self.value));
    }
}

impl<N, A, P, O: Order<A>> PartialOrd for NewType<N, A, P, O> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, A, P, O: Order<A>> Ord for NewType<N, A, P, O> {
    fn cmp(&self, other: &Self) -> Ordering {
        O::compare(&self.value, &other.value)
    }
}

impl<N, A: Serialize, P, O> Serialize for NewType<N, A, P, O> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, N, A, P, O> Deserialize<'de> for NewType<N, A, P, O>
where
    A: Deserialize<'de>,
    P: Predicate<A>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = A::deserialize(deserializer)?;
        NewType::new(value).map_err(serde::de::Error::custom)
    }
}

/// Declare a tagged `NewType` alias.
///
/// ```
/// use attest_core::newtype;
/// use attest_core::instances::OrdReverse;
/// use attest_core::instances::OrdDefault;
/// use attest_core::predicate::{NonEmpty, NonNegative};
///
/// newtype!(Anything: u8;);
/// newtype!(Name: String where NonEmpty;);
/// newtype!(Priority: i64 where NonNegative, ordered by OrdReverse<OrdDefault>;);
///
/// let high = Priority::new(10).unwrap();
/// let low = Priority::new(1).unwrap();
/// assert!(high < low);
/// assert!(Name::new(String::new()).is_err());
/// assert!(Anything::new(0).is_ok());
/// ```
#[macro_export]
macro_rules! newtype {
    ($(#[$meta:meta])* $vis:vis $name:ident: $raw:ty where $pred:ty, ordered by $ord:ty;) => {
        $crate::__private::paste! {
            #[doc = concat!("Tag type for [`", stringify!($name), "`]")]
            #[derive(Debug)]
            $vis enum [<$name Tag>] {}

            $(#[$meta])*
            $vis type $name = $crate::newtype::NewType<[<$name Tag>], $raw, $pred, $ord>;
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident: $raw:ty where $pred:ty;) => {
        $crate::newtype!(
            $(#[$meta])* $vis $name: $raw where $pred, ordered by $crate::instances::OrdDefault;
        );
    };
    ($(#[$meta:meta])* $vis:vis $name:ident: $raw:ty;) => {
        $crate::newtype!(
            $(#[$meta])* $vis $name: $raw where $crate::predicate::Always;
        );
    };
}
