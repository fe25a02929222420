//! Witness contracts and constrained values for Attest
//!
//! This crate defines the stateless strategy machinery used throughout the system:
//! - Witness: zero-sized strategy types selected at compile time
//! - Equality / Order / Predicate: the contracts witnesses implement
//! - Instances: default, case-insensitive, float and container witnesses
//! - Predicates: reusable validation rules (positive, non-empty, range, ...)
//! - NewType: validating wrapper whose constructor is the only gate
//! - EqNewType: equality and ordering of possibly-absent wrapper references

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod eq_newtype;
pub mod error;
pub mod instances;
pub mod newtype;
pub mod predicate;
pub mod witness;

pub use eq_newtype::{EqNewType, EqNewTypeBy, OrdNewType, OrdNewTypeBy};
pub use error::{Result, ValidationError};
pub use instances::{
    EqDefault, EqFloat, EqIgnoreCase, EqOption, EqSeq, EqShared, OrdDefault, OrdFloat,
    OrdIgnoreCase, OrdReverse,
};
pub use newtype::{Constrained, NewType};
pub use predicate::{And, Always, InRange, MaxLen, NonEmpty, NonNegative, NonZero, Not, Positive};
pub use witness::{ByWitness, Equality, Order, Predicate, Witness};

/// Re-exports used by the declaration macros
#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}
