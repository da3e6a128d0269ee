// Copyright 2025 Irreducible Inc.

//! The DSTU 7564:2014 ("Kupyna") hash function.
//!
//! Two entry points share one engine:
//!
//! * [`Context`] and the one-shot [`hash`] take the digest width (32, 48 or 64 bytes) at runtime
//!   and report misuse through [`Error`].
//! * [`Kupyna256`], [`Kupyna384`] and [`Kupyna512`] implement the [`Digest`] trait.
//!
//! ```
//! use hex_literal::hex;
//! use kupyna::{Digest, Kupyna256};
//!
//! let digest = Kupyna256::digest(b"");
//! assert_eq!(
//! 	digest[..],
//! 	hex!("cd5101d1ccdf0d1d1f4ada56e888cd724ca1a0838a3521e7131d4fb78d0f5eb6")
//! );
//! assert_eq!(digest[..], kupyna::hash(b"", 32)?[..]);
//! # Ok::<(), kupyna::Error>(())
//! ```

pub mod context;
pub mod error;
pub mod hasher;
pub mod padding;
pub mod permutation;
pub mod state;
pub mod table;

pub use context::{hash, hash_into, Context, DigestWidth, Phase};
pub use digest::{self, Digest};
pub use error::{Error, ErrorKind};
pub use hasher::{Kupyna256, Kupyna384, Kupyna512, KupynaLongVar, KupynaShortVar};
pub use state::Shape;
