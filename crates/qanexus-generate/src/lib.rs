//! Random test-data generation for QA Nexus.
//!
//! [`DataGenerator`] owns two randomness providers: a cryptographically
//! strong source for identifiers, bytes and scalar primitives, and a fast
//! sampler for dates, addresses and statistical distributions. Both can be
//! seeded for reproducible runs:
//!
//! ```
//! use qanexus_generate::DataGenerator;
//!
//! let mut a = DataGenerator::seeded(7);
//! let mut b = DataGenerator::seeded(7);
//! assert_eq!(a.generate_int(1, 6).ok(), b.generate_int(1, 6).ok());
//! ```
//!
//! Every generator is also reachable by id through the
//! [`GeneratorRegistry`], which validates JSON params before dispatching.

pub mod errors;
pub mod generators;
pub mod params;
pub mod source;

pub use errors::ConfigurationError;
pub use generators::distributions::Complex;
pub use generators::identifiers::UuidVersion;
pub use generators::primitives::is_numeric;
pub use generators::semantic::FieldFormat;
pub use generators::{GeneratedValue, Generator, GeneratorContext, GeneratorRegistry};
pub use qanexus_core::is_prime;
pub use source::{DataGenerator, GeneratorDefaults, hash_seed};
