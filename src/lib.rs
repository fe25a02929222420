//! Attest - stateless witnesses and capability-typed effects
//!
//! Two pieces share one idea: the caller picks, at compile time, which
//! strategy fulfils a contract.
//!
//! - Witnesses are zero-sized strategy types for equality, ordering and
//!   validation. [`NewType`] wraps a value behind a validating constructor,
//!   and [`EqNewType`] compares possibly-absent wrappers.
//! - Capabilities ([`HasFile`], [`HasCancel`], [`HasEncoding`]) describe
//!   what an effectful operation needs. Operations in [`ops`] are generic
//!   over any environment providing that set.
//!
//! # Quick Start
//!
//! ```
//! use attest::{newtype, ops, Positive, TestRuntime};
//!
//! newtype!(PositiveInt: i32 where Positive;);
//!
//! assert!(PositiveInt::new(-1).is_err());
//! let five = PositiveInt::new(5).unwrap();
//! assert_eq!(*five.value(), 5);
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let rt = TestRuntime::default();
//! ops::write_lines(&rt, "/greeting.txt", &["hello".to_string()]).await.unwrap();
//! assert_eq!(ops::read_lines(&rt, "/greeting.txt").await.unwrap(), vec!["hello"]);
//! # });
//! ```

pub use attest_core::{
    ByWitness, Constrained, EqDefault, EqFloat, EqIgnoreCase, EqNewType, EqNewTypeBy, EqOption,
    EqSeq, EqShared, Equality, NewType, OrdDefault, OrdFloat, OrdIgnoreCase, OrdNewType,
    OrdNewTypeBy, OrdReverse, Order, Predicate, ValidationError, Witness,
};
pub use attest_core::{newtype, witness};
pub use attest_core::{And, Always, InRange, MaxLen, NonEmpty, NonNegative, NonZero, Not, Positive};

pub use attest_io::{
    ops, CancellationToken, ConfigError, Encoding, EncodingFailure, FileError, FileErrorKind,
    FileIo, FileResult, HasCancel, HasEncoding, HasFile, LiveFileIo, LiveRuntime, MemoryFileIo,
    Runtime, RuntimeConfig, TestRuntime, TextReader, TextWriter, CONFIG_FILE_NAME,
};
