// Copyright 2025 Irreducible Inc.

//! Streaming hash context with a runtime-selected digest width.

use std::{cmp, fmt, io};

use kupyna_utils::{bail, ensure};
use tracing::{debug, instrument};

use crate::{
	error::Error,
	padding,
	state::{Shape, State, MAX_BLOCK_SIZE},
};

/// The three digest widths defined by DSTU 7564.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestWidth {
	W256,
	W384,
	W512,
}

impl DigestWidth {
	pub const ALL: [Self; 3] = [Self::W256, Self::W384, Self::W512];

	pub const fn bytes(self) -> usize {
		match self {
			Self::W256 => 32,
			Self::W384 => 48,
			Self::W512 => 64,
		}
	}

	pub const fn bits(self) -> usize {
		self.bytes() * 8
	}

	/// Widths up to 256 bits run on the small state, wider ones on the large state.
	pub const fn shape(self) -> Shape {
		match self {
			Self::W256 => Shape::Small,
			Self::W384 | Self::W512 => Shape::Large,
		}
	}
}

impl TryFrom<usize> for DigestWidth {
	type Error = Error;

	fn try_from(width: usize) -> Result<Self, Error> {
		match width {
			32 => Ok(Self::W256),
			48 => Ok(Self::W384),
			64 => Ok(Self::W512),
			_ => Err(Error::UnsupportedWidth { width }),
		}
	}
}

impl fmt::Display for DigestWidth {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Kupyna-{}", self.bits())
	}
}

/// Lifecycle phase of a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
	Uninitialized,
	Initialized,
	Finalized,
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Uninitialized => "uninitialized",
			Self::Initialized => "initialized",
			Self::Finalized => "finalized",
		})
	}
}

#[derive(Debug, Clone)]
enum Stage {
	Uninitialized,
	Initialized {
		width: DigestWidth,
		state: State,
		total_len: u64,
	},
	Finalized,
}

/// An incremental Kupyna computation.
///
/// A fresh context must be initialized with a digest width before it accepts data. After
/// [`Context::finalize`] it rejects further input until it is initialized again. Dropping the
/// context releases its buffer.
///
/// ```
/// use kupyna::Context;
///
/// let mut ctx = Context::new()?;
/// ctx.init(32)?;
/// ctx.update(b"Hello, ")?;
/// ctx.update(b"World!")?;
/// let digest = ctx.finalize()?;
/// assert_eq!(digest, kupyna::hash(b"Hello, World!", 32)?);
/// # Ok::<(), kupyna::Error>(())
/// ```
#[derive(Debug)]
pub struct Context {
	stage: Stage,
	/// Bytes of the current, not yet complete, block.
	pending: Vec<u8>,
}

impl Context {
	/// Allocates an uninitialized context.
	pub fn new() -> Result<Self, Error> {
		let mut pending = Vec::new();
		pending
			.try_reserve_exact(MAX_BLOCK_SIZE)
			.map_err(|_| Error::Allocation {
				bytes: MAX_BLOCK_SIZE,
			})?;
		Ok(Self {
			stage: Stage::Uninitialized,
			pending,
		})
	}

	/// Allocates a context and initializes it for a `width`-byte digest.
	pub fn with_width(width: usize) -> Result<Self, Error> {
		let mut ctx = Self::new()?;
		ctx.init(width)?;
		Ok(ctx)
	}

	pub fn phase(&self) -> Phase {
		match self.stage {
			Stage::Uninitialized => Phase::Uninitialized,
			Stage::Initialized { .. } => Phase::Initialized,
			Stage::Finalized => Phase::Finalized,
		}
	}

	/// The configured width, while the context accepts data.
	pub fn width(&self) -> Option<DigestWidth> {
		match self.stage {
			Stage::Initialized { width, .. } => Some(width),
			_ => None,
		}
	}

	/// Total number of message bytes absorbed since initialization.
	pub fn total_len(&self) -> Option<u64> {
		match self.stage {
			Stage::Initialized { total_len, .. } => Some(total_len),
			_ => None,
		}
	}

	/// Starts a new computation of a `width`-byte digest, discarding any previous one.
	///
	/// On an unsupported width the context is left as it was.
	pub fn init(&mut self, width: usize) -> Result<(), Error> {
		let width = DigestWidth::try_from(width)?;
		self.pending.clear();
		self.stage = Stage::Initialized {
			width,
			state: State::new(width.shape()),
			total_len: 0,
		};
		debug!(%width, shape = ?width.shape(), "initialized context");
		Ok(())
	}

	/// Absorbs `data`. Any split of a message into `update` calls yields the same digest.
	pub fn update(&mut self, mut data: &[u8]) -> Result<(), Error> {
		let phase = self.phase();
		let Stage::Initialized {
			state, total_len, ..
		} = &mut self.stage
		else {
			bail!(Error::InvalidState {
				expected: Phase::Initialized,
				actual: phase,
			});
		};
		let new_len = total_len
			.checked_add(data.len() as u64)
			.ok_or(Error::MessageTooLong)?;
		let block_size = state.shape().block_size();

		if !self.pending.is_empty() {
			let to_process = cmp::min(block_size - self.pending.len(), data.len());
			self.pending.extend_from_slice(&data[..to_process]);
			data = &data[to_process..];

			if self.pending.len() == block_size {
				state.compress(&self.pending);
				self.pending.clear();
			}
		}

		let mut blocks = data.chunks_exact(block_size);
		for block in &mut blocks {
			state.compress(block);
		}
		self.pending.extend_from_slice(blocks.remainder());

		*total_len = new_len;
		Ok(())
	}

	/// Pads the message, writes the digest into the front of `out` and returns its length.
	///
	/// Nothing is written when the context is not initialized or `out` is too short, and the
	/// context keeps its state in that case.
	pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize, Error> {
		let phase = self.phase();
		let Stage::Initialized {
			width,
			state,
			total_len,
		} = &mut self.stage
		else {
			bail!(Error::InvalidState {
				expected: Phase::Initialized,
				actual: phase,
			});
		};
		let width = *width;
		ensure!(
			out.len() >= width.bytes(),
			Error::OutputTooSmall {
				needed: width.bytes(),
				actual: out.len(),
			}
		);

		let padded = padding::pad(&self.pending, *total_len, state.shape());
		for block in padded.blocks() {
			state.compress(block);
		}
		state.finalize_into(&mut out[..width.bytes()]);
		debug!(%width, total_len = *total_len, "finalized context");

		self.pending.clear();
		self.stage = Stage::Finalized;
		Ok(width.bytes())
	}

	/// Like [`Context::finalize_into`], returning the digest by value.
	pub fn finalize(&mut self) -> Result<Vec<u8>, Error> {
		let Some(width) = self.width() else {
			bail!(Error::InvalidState {
				expected: Phase::Initialized,
				actual: self.phase(),
			});
		};
		let mut out = vec![0u8; width.bytes()];
		self.finalize_into(&mut out)?;
		Ok(out)
	}
}

impl Clone for Context {
	fn clone(&self) -> Self {
		let mut pending = Vec::with_capacity(MAX_BLOCK_SIZE);
		pending.extend_from_slice(&self.pending);
		Self {
			stage: self.stage.clone(),
			pending,
		}
	}
}

impl io::Write for Context {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.update(buf)
			.map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Hashes `data` in one call, returning a `width`-byte digest.
#[instrument(level = "trace", skip(data), fields(len = data.len()))]
pub fn hash(data: &[u8], width: usize) -> Result<Vec<u8>, Error> {
	let mut ctx = Context::with_width(width)?;
	ctx.update(data)?;
	ctx.finalize()
}

/// Hashes `data` in one call, writing a `width`-byte digest to the front of `out`.
///
/// `out` is untouched on failure.
#[instrument(level = "trace", skip(data, out), fields(len = data.len()))]
pub fn hash_into(data: &[u8], out: &mut [u8], width: usize) -> Result<(), Error> {
	let width = DigestWidth::try_from(width)?;
	ensure!(
		out.len() >= width.bytes(),
		Error::OutputTooSmall {
			needed: width.bytes(),
			actual: out.len(),
		}
	);
	let mut ctx = Context::with_width(width.bytes())?;
	ctx.update(data)?;
	ctx.finalize_into(out)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use proptest::prelude::*;

	use super::*;
	use crate::error::ErrorKind;

	#[test]
	fn test_init_rejects_unsupported_width() {
		let mut ctx = Context::new().unwrap();
		for width in [0, 16, 31, 33, 128] {
			let err = ctx.init(width).unwrap_err();
			assert_eq!(err, Error::UnsupportedWidth { width });
			assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
			assert_eq!(ctx.phase(), Phase::Uninitialized);
		}
		ctx.init(32).unwrap();
		assert_eq!(ctx.phase(), Phase::Initialized);
		assert_eq!(ctx.width(), Some(DigestWidth::W256));
	}

	#[test]
	fn test_failed_init_keeps_running_computation() {
		let mut ctx = Context::with_width(48).unwrap();
		ctx.update(b"Hello, ").unwrap();
		assert!(ctx.init(16).is_err());
		ctx.update(b"World!").unwrap();
		assert_eq!(ctx.finalize().unwrap(), hash(b"Hello, World!", 48).unwrap());
	}

	#[test]
	fn test_finalize_uninitialized_writes_nothing() {
		let mut ctx = Context::new().unwrap();
		let mut out = [0xa5u8; 64];
		let err = ctx.finalize_into(&mut out).unwrap_err();
		assert_eq!(
			err,
			Error::InvalidState {
				expected: Phase::Initialized,
				actual: Phase::Uninitialized,
			}
		);
		assert_eq!(err.kind(), ErrorKind::InvalidState);
		assert_eq!(out, [0xa5u8; 64]);
	}

	#[test]
	fn test_update_requires_init() {
		let mut ctx = Context::new().unwrap();
		assert_eq!(ctx.update(b"abc").unwrap_err().kind(), ErrorKind::InvalidState);
	}

	#[test]
	fn test_finalized_context_rejects_use_until_reinit() {
		let mut ctx = Context::with_width(32).unwrap();
		ctx.update(b"abc").unwrap();
		let first = ctx.finalize().unwrap();
		assert_eq!(ctx.phase(), Phase::Finalized);

		let expected = Error::InvalidState {
			expected: Phase::Initialized,
			actual: Phase::Finalized,
		};
		assert_eq!(ctx.update(b"abc").unwrap_err(), expected);
		assert_eq!(ctx.finalize().unwrap_err(), expected);

		ctx.init(32).unwrap();
		ctx.update(b"abc").unwrap();
		assert_eq!(ctx.finalize().unwrap(), first);
	}

	#[test]
	fn test_short_output_buffer() {
		let mut ctx = Context::with_width(64).unwrap();
		ctx.update(b"abc").unwrap();
		let mut out = [0u8; 48];
		let err = ctx.finalize_into(&mut out).unwrap_err();
		assert_eq!(
			err,
			Error::OutputTooSmall {
				needed: 64,
				actual: 48
			}
		);
		assert_eq!(err.kind(), ErrorKind::InvalidArgument);
		assert_eq!(out, [0u8; 48]);

		// The failed call must not have consumed the context.
		let mut out = [0u8; 80];
		assert_eq!(ctx.finalize_into(&mut out).unwrap(), 64);
		assert_eq!(out[..64], hash(b"abc", 64).unwrap()[..]);
		assert!(out[64..].iter().all(|&b| b == 0));
	}

	#[test]
	fn test_hash_into_leaves_output_on_error() {
		let mut out = [0x11u8; 32];
		assert_eq!(
			hash_into(b"abc", &mut out, 48).unwrap_err(),
			Error::OutputTooSmall {
				needed: 48,
				actual: 32
			}
		);
		assert_eq!(hash_into(b"abc", &mut out, 20).unwrap_err().kind(), ErrorKind::InvalidConfiguration);
		assert_eq!(out, [0x11u8; 32]);
	}

	#[test]
	fn test_total_len_tracks_input() {
		let mut ctx = Context::with_width(32).unwrap();
		ctx.update(&[0u8; 100]).unwrap();
		ctx.update(&[0u8; 28]).unwrap();
		assert_eq!(ctx.total_len(), Some(128));
		ctx.finalize().unwrap();
		assert_eq!(ctx.total_len(), None);
	}

	#[test]
	fn test_clone_keeps_full_block_buffer() {
		let mut ctx = Context::with_width(64).unwrap();
		ctx.update(&[0x42; 100]).unwrap();
		let mut forked = ctx.clone();
		assert!(forked.pending.capacity() >= MAX_BLOCK_SIZE);

		ctx.update(b"left").unwrap();
		forked.update(b"right").unwrap();
		let mut left = vec![0x42; 100];
		left.extend_from_slice(b"left");
		let mut right = vec![0x42; 100];
		right.extend_from_slice(b"right");
		assert_eq!(ctx.finalize().unwrap(), hash(&left, 64).unwrap());
		assert_eq!(forked.finalize().unwrap(), hash(&right, 64).unwrap());
	}

	#[test]
	fn test_io_write() {
		let mut ctx = Context::with_width(32).unwrap();
		ctx.write_all(b"Hello, World!").unwrap();
		assert_eq!(ctx.finalize().unwrap(), hash(b"Hello, World!", 32).unwrap());

		let mut ctx = Context::new().unwrap();
		assert!(ctx.write_all(b"x").is_err());
	}

	#[test]
	fn test_error_codes() {
		assert_eq!(ErrorKind::InvalidArgument.code(), -1);
		assert_eq!(ErrorKind::InvalidConfiguration.code(), -2);
		assert_eq!(ErrorKind::InvalidState.code(), -3);
		assert_eq!(ErrorKind::ResourceExhausted.code(), -4);
	}

	proptest! {
		#[test]
		fn test_chunk_invariance(
			data in prop::collection::vec(any::<u8>(), 0..600),
			cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
			width_index in 0..3usize,
		) {
			let width = DigestWidth::ALL[width_index].bytes();
			let mut cuts: Vec<usize> = cuts.iter().map(|cut| cut.index(data.len() + 1)).collect();
			cuts.sort_unstable();

			let mut ctx = Context::with_width(width).unwrap();
			let mut start = 0;
			for cut in cuts {
				ctx.update(&data[start..cut]).unwrap();
				start = cut;
			}
			ctx.update(&data[start..]).unwrap();

			prop_assert_eq!(ctx.finalize().unwrap(), hash(&data, width).unwrap());
		}

		#[test]
		fn test_byte_at_a_time(data in prop::collection::vec(any::<u8>(), 0..300)) {
			let mut ctx = Context::with_width(64).unwrap();
			for byte in &data {
				ctx.update(std::slice::from_ref(byte)).unwrap();
			}
			prop_assert_eq!(ctx.finalize().unwrap(), hash(&data, 64).unwrap());
		}
	}
}
