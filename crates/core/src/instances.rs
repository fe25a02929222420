//! Standard witnesses
//!
//! - `EqDefault` / `OrdDefault`: the natural std `Eq`/`Hash`/`Ord` of a type
//! - `EqIgnoreCase` / `OrdIgnoreCase`: Unicode case-folded text
//! - `EqFloat` / `OrdFloat`: total float equality and ordering
//! - `OrdReverse<O>`: reversed ordering
//! - `EqOption<E>`, `EqSeq<E>`, `EqShared<E>`: lift a witness over a container

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHasher;

use crate::witness;
use crate::witness::{fx_hash, Equality, Order};

witness! {
    /// Default equality: defers to the type's own `Eq` and `Hash`.
    ///
    /// This is the witness chosen when a caller does not name one.
    pub struct EqDefault;
}

impl<A: Eq + Hash + ?Sized> Equality<A> for EqDefault {
    #[inline]
    fn equals(x: &A, y: &A) -> bool {
        x == y
    }

    #[inline]
    fn hash(x: &A) -> u64 {
        fx_hash(x)
    }
}

witness! {
    /// Default ordering: defers to the type's own `Ord`.
    pub struct OrdDefault;
}

impl<A: Ord + Hash + ?Sized> Equality<A> for OrdDefault {
    #[inline]
    fn equals(x: &A, y: &A) -> bool {
        x == y
    }

    #[inline]
    fn hash(x: &A) -> u64 {
        fx_hash(x)
    }
}

impl<A: Ord + Hash + ?Sized> Order<A> for OrdDefault {
    #[inline]
    fn compare(x: &A, y: &A) -> Ordering {
        x.cmp(y)
    }
}

witness! {
    /// Case-insensitive text equality.
    ///
    /// Both sides are compared after Unicode lowercase mapping, char by char.
    pub struct EqIgnoreCase;
}

witness! {
    /// Case-insensitive text ordering, consistent with [`EqIgnoreCase`].
    pub struct OrdIgnoreCase;
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn folded_hash(s: &str) -> u64 {
    let mut hasher = FxHasher::default();
    for c in fold(s) {
        hasher.write_u32(c as u32);
    }
    hasher.finish()
}

macro_rules! impl_ignore_case {
    ($witness:ty) => {
        impl Equality<str> for $witness {
            fn equals(x: &str, y: &str) -> bool {
                fold(x).eq(fold(y))
            }

            fn hash(x: &str) -> u64 {
                folded_hash(x)
            }
        }

        impl Equality<String> for $witness {
            fn equals(x: &String, y: &String) -> bool {
                <$witness as Equality<str>>::equals(x, y)
            }

            fn hash(x: &String) -> u64 {
                folded_hash(x)
            }
        }
    };
}

impl_ignore_case!(EqIgnoreCase);
impl_ignore_case!(OrdIgnoreCase);

impl Order<str> for OrdIgnoreCase {
    fn compare(x: &str, y: &str) -> Ordering {
        fold(x).cmp(fold(y))
    }
}

impl Order<String> for OrdIgnoreCase {
    fn compare(x: &String, y: &String) -> Ordering {
        fold(x).cmp(fold(y))
    }
}

witness! {
    /// Total float equality.
    ///
    /// Agrees with `total_cmp`: `NaN` equals itself and `-0.0 != 0.0`, so the
    /// relation is reflexive, unlike `PartialEq` on floats.
    pub struct EqFloat;
}

witness! {
    /// Total float ordering (`total_cmp`).
    pub struct OrdFloat;
}

macro_rules! impl_float {
    ($($float:ty),*) => {$(
        impl Equality<$float> for EqFloat {
            #[inline]
            fn equals(x: &$float, y: &$float) -> bool {
                x.total_cmp(y) == Ordering::Equal
            }

            #[inline]
            fn hash(x: &$float) -> u64 {
                fx_hash(&x.to_bits())
            }
        }

        impl Equality<$float> for OrdFloat {
            #[inline]
            fn equals(x: &$float, y: &$float) -> bool {
                <EqFloat as Equality<$float>>::equals(x, y)
            }

            #[inline]
            fn hash(x: &$float) -> u64 {
                <EqFloat as Equality<$float>>::hash(x)
            }
        }

        impl Order<$float> for OrdFloat {
            #[inline]
            fn compare(x: &$float, y: &$float) -> Ordering {
                x.total_cmp(y)
            }
        }
    )*};
}

impl_float!(f32, f64);

witness! {
    /// Reverses ordering witness `O`; equality is unchanged.
    pub struct OrdReverse<O>;
}

impl<A: ?Sized, O: Order<A>> Equality<A> for OrdReverse<O> {
    #[inline]
    fn equals(x: &A, y: &A) -> bool {
        O::equals(x, y)
    }

    #[inline]
    fn hash(x: &A) -> u64 {
        O::hash(x)
    }
}

impl<A: ?Sized, O: Order<A>> Order<A> for OrdReverse<O> {
    #[inline]
    fn compare(x: &A, y: &A) -> Ordering {
        O::compare(x, y).reverse()
    }
}

witness! {
    /// Lifts `E` over `Option`. `None` equals `None` and hashes to 0.
    pub struct EqOption<E>;
}

impl<A, E: Equality<A>> Equality<Option<A>> for EqOption<E> {
    fn equals(x: &Option<A>, y: &Option<A>) -> bool {
        match (x, y) {
            (Some(x), Some(y)) => E::equals(x, y),
            (None, None) => true,
            _ => false,
        }
    }

    fn hash(x: &Option<A>) -> u64 {
        x.as_ref().map_or(0, E::hash)
    }
}

impl<A, E: Order<A>> Order<Option<A>> for EqOption<E> {
    fn compare(x: &Option<A>, y: &Option<A>) -> Ordering {
        match (x, y) {
            (Some(x), Some(y)) => E::compare(x, y),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        }
    }
}

witness! {
    /// Lifts `E` element-wise over slices and vectors.
    pub struct EqSeq<E>;
}

impl<A, E: Equality<A>> Equality<[A]> for EqSeq<E> {
    fn equals(x: &[A], y: &[A]) -> bool {
        x.len() == y.len() && x.iter().zip(y).all(|(a, b)| E::equals(a, b))
    }

    fn hash(x: &[A]) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write_usize(x.len());
        for item in x {
            hasher.write_u64(E::hash(item));
        }
        hasher.finish()
    }
}

impl<A, E: Equality<A>> Equality<Vec<A>> for EqSeq<E> {
    fn equals(x: &Vec<A>, y: &Vec<A>) -> bool {
        <Self as Equality<[A]>>::equals(x, y)
    }

    fn hash(x: &Vec<A>) -> u64 {
        <Self as Equality<[A]>>::hash(x)
    }
}

impl<A, E: Order<A>> Order<[A]> for EqSeq<E> {
    fn compare(x: &[A], y: &[A]) -> Ordering {
        for (a, b) in x.iter().zip(y) {
            match E::compare(a, b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        x.len().cmp(&y.len())
    }
}

impl<A, E: Order<A>> Order<Vec<A>> for EqSeq<E> {
    fn compare(x: &Vec<A>, y: &Vec<A>) -> Ordering {
        <Self as Order<[A]>>::compare(x, y)
    }
}

witness! {
    /// Lifts `E` over shared pointers.
    ///
    /// Two handles to the same allocation are equal without consulting `E`.
    /// `E` is reflexive, so the shortcut gives the same answer delegation would.
    pub struct EqShared<E>;
}

impl<A: ?Sized, E: Equality<A>> Equality<Arc<A>> for EqShared<E> {
    fn equals(x: &Arc<A>, y: &Arc<A>) -> bool {
        Arc::ptr_eq(x, y) || E::equals(x, y)
    }

    fn hash(x: &Arc<A>) -> u64 {
        E::hash(x)
    }
}

impl<A: ?Sized, E: Equality<A>> Equality<Rc<A>> for EqShared<E> {
    fn equals(x: &Rc<A>, y: &Rc<A>) -> bool {
        Rc::ptr_eq(x, y) || E::equals(x, y)
    }

    fn hash(x: &Rc<A>) -> u64 {
        E::hash(x)
    }
}
