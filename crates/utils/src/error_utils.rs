// Copyright 2024-2025 Irreducible Inc.

//! Early-return helpers for functions returning `Result`.
//!
//! With the `bail_panic` feature both macros panic instead, which keeps the backtrace of the
//! first failure when debugging.

/// Returns `Err($err.into())` from the enclosing function.
#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

/// Returns `Err($err.into())` from the enclosing function.
#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

/// Bails with `$err` unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
