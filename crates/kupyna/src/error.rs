// Copyright 2025 Irreducible Inc.

use crate::context::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("output buffer holds {actual} bytes but the digest needs {needed}")]
	OutputTooSmall { needed: usize, actual: usize },
	#[error("message length overflows the byte counter")]
	MessageTooLong,
	#[error("unsupported digest width of {width} bytes, expected 32, 48 or 64")]
	UnsupportedWidth { width: usize },
	#[error("context is {actual}, operation requires it to be {expected}")]
	InvalidState { expected: Phase, actual: Phase },
	/// Returned when the pending-block buffer of a context cannot be reserved.
	#[error("failed to allocate {bytes} bytes for the context buffer")]
	Allocation { bytes: usize },
}

/// Stable classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	InvalidArgument,
	InvalidConfiguration,
	InvalidState,
	ResourceExhausted,
}

impl Error {
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::OutputTooSmall { .. } | Self::MessageTooLong => ErrorKind::InvalidArgument,
			Self::UnsupportedWidth { .. } => ErrorKind::InvalidConfiguration,
			Self::InvalidState { .. } => ErrorKind::InvalidState,
			Self::Allocation { .. } => ErrorKind::ResourceExhausted,
		}
	}
}

impl ErrorKind {
	/// The negative return code used by the C interface.
	pub const fn code(self) -> i32 {
		match self {
			Self::InvalidArgument => -1,
			Self::InvalidConfiguration => -2,
			Self::InvalidState => -3,
			Self::ResourceExhausted => -4,
		}
	}
}
