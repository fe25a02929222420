//! Equality and ordering of constrained wrappers
//!
//! The composers turn a witness over the raw type into a witness over
//! possibly-absent wrapper references, `Option<&W>`:
//!
//! | x | y | equals |
//! |---|---|--------|
//! | same reference | same reference | `true` |
//! | `None` | `None` | `true` |
//! | `None` | `Some` | `false` |
//! | `Some(a)` | `Some(b)` | `E::equals(a.raw(), b.raw())` |
//!
//! An absent reference hashes to `0`. A present one hashes by `E` over the
//! raw value.
//!
//! The composers are generic over any [`Constrained`] wrapper, so the same
//! type serves wrappers with or without a predicate and ordering witness; those
//! stay part of `W` and therefore visible to the type checker.
//!
//! ```
//! use attest_core::{newtype, witness};
//! use attest_core::eq_newtype::{EqNewType, EqNewTypeBy};
//! use attest_core::instances::EqIgnoreCase;
//! use attest_core::predicate::NonEmpty;
//!
//! newtype!(Tag: String where NonEmpty;);
//!
//! let a = Tag::new("Rust".to_string()).unwrap();
//! let b = Tag::new("RUST".to_string()).unwrap();
//!
//! assert!(!witness::equals::<EqNewType<Tag>, _>(&Some(&a), &Some(&b)));
//! assert!(witness::equals::<EqNewTypeBy<EqIgnoreCase, Tag>, _>(&Some(&a), &Some(&b)));
//! assert!(!witness::equals::<EqNewType<Tag>, _>(&Some(&a), &None));
//! ```

use std::cmp::Ordering;

use crate::instances::EqDefault;
use crate::newtype::Constrained;
use crate::witness;
use crate::witness::{Equality, Order};

witness! {
    /// Equality over `Option<&W>` with an explicit inner witness `E`.
    pub struct EqNewTypeBy<E, W>;
}

impl<'a, E, W> Equality<Option<&'a W>> for EqNewTypeBy<E, W>
where
    E: Equality<W::Raw>,
    W: Constrained + 'static,
{
    fn equals(x: &Option<&'a W>, y: &Option<&'a W>) -> bool {
        match (*x, *y) {
            (Some(x), Some(y)) if std::ptr::eq(x, y) => true,
            (None, Some(_)) | (Some(_), None) => false,
            (None, None) => true,
            (Some(x), Some(y)) => E::equals(x.raw(), y.raw()),
        }
    }

    fn hash(x: &Option<&'a W>) -> u64 {
        match x {
            None => 0,
            Some(x) => E::hash(x.raw()),
        }
    }
}

// Present values go through the same path as `Some(x)`.
impl<E, W> Equality<W> for EqNewTypeBy<E, W>
where
    E: Equality<W::Raw>,
    W: Constrained + 'static,
{
    #[inline]
    fn equals(x: &W, y: &W) -> bool {
        <Self as Equality<Option<&W>>>::equals(&Some(x), &Some(y))
    }

    #[inline]
    fn hash(x: &W) -> u64 {
        <Self as Equality<Option<&W>>>::hash(&Some(x))
    }
}

witness! {
    /// Equality over `Option<&W>` using the raw type's default equality.
    ///
    /// Same results as `EqNewTypeBy<EqDefault, W>`, which it forwards to.
    pub struct EqNewType<W>;
}

impl<'a, W> Equality<Option<&'a W>> for EqNewType<W>
where
    EqDefault: Equality<W::Raw>,
    W: Constrained + 'static,
{
    #[inline]
    fn equals(x: &Option<&'a W>, y: &Option<&'a W>) -> bool {
        <EqNewTypeBy<EqDefault, W> as Equality<Option<&'a W>>>::equals(x, y)
    }

    #[inline]
    fn hash(x: &Option<&'a W>) -> u64 {
        <EqNewTypeBy<EqDefault, W> as Equality<Option<&'a W>>>::hash(x)
    }
}

impl<W> Equality<W> for EqNewType<W>
where
    EqDefault: Equality<W::Raw>,
    W: Constrained + 'static,
{
    #[inline]
    fn equals(x: &W, y: &W) -> bool {
        <EqNewTypeBy<EqDefault, W> as Equality<W>>::equals(x, y)
    }

    #[inline]
    fn hash(x: &W) -> u64 {
        <EqNewTypeBy<EqDefault, W> as Equality<W>>::hash(x)
    }
}

witness! {
    /// Ordering over `Option<&W>` with an explicit inner witness `O`.
    ///
    /// Absent references order before present ones.
    pub struct OrdNewTypeBy<O, W>;
}

impl<'a, O, W> Equality<Option<&'a W>> for OrdNewTypeBy<O, W>
where
    O: Order<W::Raw>,
    W: Constrained + 'static,
{
    #[inline]
    fn equals(x: &Option<&'a W>, y: &Option<&'a W>) -> bool {
        <EqNewTypeBy<O, W> as Equality<Option<&'a W>>>::equals(x, y)
    }

    #[inline]
    fn hash(x: &Option<&'a W>) -> u64 {
        <EqNewTypeBy<O, W> as Equality<Option<&'a W>>>::hash(x)
    }
}

impl<'a, O, W> Order<Option<&'a W>> for OrdNewTypeBy<O, W>
where
    O: Order<W::Raw>,
    W: Constrained + 'static,
{
    fn compare(x: &Option<&'a W>, y: &Option<&'a W>) -> Ordering {
        match (*x, *y) {
            (Some(x), Some(y)) if std::ptr::eq(x, y) => Ordering::Equal,
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => O::compare(x.raw(), y.raw()),
        }
    }
}

witness! {
    /// Ordering over `Option<&W>` using the ordering witness `W` was declared with.
    pub struct OrdNewType<W>;
}

impl<'a, W> Equality<Option<&'a W>> for OrdNewType<W>
where
    W: Constrained + 'static,
    W::Ord: Order<W::Raw>,
{
    #[inline]
    fn equals(x: &Option<&'a W>, y: &Option<&'a W>) -> bool {
        <OrdNewTypeBy<W::Ord, W> as Equality<Option<&'a W>>>::equals(x, y)
    }

    #[inline]
    fn hash(x: &Option<&'a W>) -> u64 {
        <OrdNewTypeBy<W::Ord, W> as Equality<Option<&'a W>>>::hash(x)
    }
}

impl<'a, W> Order<Option<&'a W>> for OrdNewType<W>
where
    W: Constrained + 'static,
    W::Ord: Order<W::Raw>,
{
    #[inline]
    fn compare(x: &Option<&'a W>, y: &Option<&'a W>) -> Ordering {
        <OrdNewTypeBy<W::Ord, W> as Order<Option<&'a W>>>::compare(x, y)
    }
}
