// Copyright 2025 Irreducible Inc.

//! Running state of the hash and the block-level operations on it.

use core::fmt;

use crate::{permutation, table::ROWS};

/// Column count of the 512-bit state used for digests of up to 256 bits.
pub const SMALL_COLUMNS: usize = 8;
/// Column count of the 1024-bit state used for 384- and 512-bit digests.
pub const LARGE_COLUMNS: usize = 16;
/// Block size of the large state, the largest block any context handles.
pub const MAX_BLOCK_SIZE: usize = LARGE_COLUMNS * ROWS;

/// Shape of the state matrix, fixed once the digest width is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
	/// 8 rows × 8 columns, 64-byte blocks.
	Small,
	/// 8 rows × 16 columns, 128-byte blocks.
	Large,
}

impl Shape {
	pub const fn columns(self) -> usize {
		match self {
			Self::Small => SMALL_COLUMNS,
			Self::Large => LARGE_COLUMNS,
		}
	}

	/// Byte size of the state, which is also the block size.
	pub const fn block_size(self) -> usize {
		self.columns() * ROWS
	}

	pub const fn rounds(self) -> usize {
		permutation::rounds(self.columns())
	}
}

/// The chaining value, tagged by its shape.
#[derive(Clone, PartialEq, Eq)]
pub enum State {
	Small([u64; SMALL_COLUMNS]),
	Large([u64; LARGE_COLUMNS]),
}

impl State {
	/// The initial value: all zero except row 0 of column 0, which holds the state size in
	/// bytes.
	pub fn new(shape: Shape) -> Self {
		match shape {
			Shape::Small => Self::Small(seed()),
			Shape::Large => Self::Large(seed()),
		}
	}

	pub fn shape(&self) -> Shape {
		match self {
			Self::Small(_) => Shape::Small,
			Self::Large(_) => Shape::Large,
		}
	}

	/// Folds one message block into the state: `S' = P(S ⊕ M) ⊕ Q(M) ⊕ S`.
	///
	/// # Panics
	///
	/// Panics if `block` is not exactly [`Shape::block_size`] bytes.
	pub fn compress(&mut self, block: &[u8]) {
		assert_eq!(block.len(), self.shape().block_size(), "block size does not match the state");
		match self {
			Self::Small(h) => compress(h, block),
			Self::Large(h) => compress(h, block),
		}
	}

	/// Applies the output transformation `Ω(S) = P(S) ⊕ S` and writes its trailing `out.len()`
	/// bytes into `out`. The state itself is left untouched.
	///
	/// # Panics
	///
	/// Panics if `out` is longer than the state.
	pub fn finalize_into(&self, out: &mut [u8]) {
		let mut bytes = [0u8; MAX_BLOCK_SIZE];
		let size = self.shape().block_size();
		assert!(out.len() <= size, "digest longer than the state");
		match self {
			Self::Small(h) => columns_to_bytes(&output_transform(h), &mut bytes[..size]),
			Self::Large(h) => columns_to_bytes(&output_transform(h), &mut bytes[..size]),
		}
		out.copy_from_slice(&bytes[size - out.len()..size]);
	}

	/// Serializes the raw chaining value, column by column.
	pub fn to_bytes(&self, out: &mut [u8]) {
		match self {
			Self::Small(h) => columns_to_bytes(h, out),
			Self::Large(h) => columns_to_bytes(h, out),
		}
	}
}

impl fmt::Debug for State {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "State::{:?} {{ ... }}", self.shape())
	}
}

fn seed<const C: usize>() -> [u64; C] {
	let mut state = [0u64; C];
	state[0] = (C * ROWS) as u64;
	state
}

fn compress<const C: usize>(h: &mut [u64; C], block: &[u8]) {
	let m = columns_from_bytes::<C>(block);

	let mut p_out = *h;
	xor_into(&mut p_out, &m);
	permutation::p(&mut p_out);

	let mut q_out = m;
	permutation::q(&mut q_out);

	xor_into(h, &p_out);
	xor_into(h, &q_out);
}

fn output_transform<const C: usize>(h: &[u64; C]) -> [u64; C] {
	let mut out = *h;
	permutation::p(&mut out);
	xor_into(&mut out, h);
	out
}

#[inline(always)]
fn xor_into<const C: usize>(h: &mut [u64; C], m: &[u64; C]) {
	for (a, b) in h.iter_mut().zip(m) {
		*a ^= b;
	}
}

/// Loads `8 * C` bytes into columns; byte `8j + i` becomes row `i` of column `j`.
pub fn columns_from_bytes<const C: usize>(bytes: &[u8]) -> [u64; C] {
	debug_assert_eq!(bytes.len(), C * ROWS);
	let mut state = [0u64; C];
	for (column, chunk) in state.iter_mut().zip(bytes.chunks_exact(ROWS)) {
		let mut word = [0u8; ROWS];
		word.copy_from_slice(chunk);
		*column = u64::from_le_bytes(word);
	}
	state
}

/// Inverse of [`columns_from_bytes`].
pub fn columns_to_bytes<const C: usize>(state: &[u64; C], out: &mut [u8]) {
	debug_assert_eq!(out.len(), C * ROWS);
	for (chunk, column) in out.chunks_exact_mut(ROWS).zip(state) {
		chunk.copy_from_slice(&column.to_le_bytes());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_shape_parameters() {
		assert_eq!(Shape::Small.block_size(), 64);
		assert_eq!(Shape::Large.block_size(), 128);
		assert_eq!(Shape::Small.rounds(), 10);
		assert_eq!(Shape::Large.rounds(), 14);
	}

	#[test]
	fn test_seed() {
		for shape in [Shape::Small, Shape::Large] {
			let state = State::new(shape);
			let mut bytes = vec![0u8; shape.block_size()];
			state.to_bytes(&mut bytes);
			assert_eq!(bytes[0] as usize, shape.block_size());
			assert!(bytes[1..].iter().all(|&b| b == 0));
			assert_eq!(state.shape(), shape);
		}
	}

	#[test]
	fn test_columns_round_trip() {
		let bytes: Vec<u8> = (0..128).collect();
		let columns = columns_from_bytes::<16>(&bytes);
		assert_eq!(columns[1], 0x0f0e_0d0c_0b0a_0908);
		let mut out = vec![0u8; 128];
		columns_to_bytes(&columns, &mut out);
		assert_eq!(out, bytes);
	}

	#[test]
	fn test_compress_is_feed_forward() {
		let block = [0x5au8; 64];
		let mut state = State::new(Shape::Small);
		state.compress(&block);

		let State::Small(h0) = State::new(Shape::Small) else {
			unreachable!()
		};
		let m = columns_from_bytes::<8>(&block);
		let mut expected = h0;
		let mut p_in = h0;
		xor_into(&mut p_in, &m);
		permutation::p(&mut p_in);
		let mut q_in = m;
		permutation::q(&mut q_in);
		xor_into(&mut expected, &p_in);
		xor_into(&mut expected, &q_in);
		assert_eq!(state, State::Small(expected));
	}

	#[test]
	#[should_panic(expected = "block size does not match the state")]
	fn test_compress_rejects_wrong_block() {
		State::new(Shape::Large).compress(&[0u8; 64]);
	}

	#[test]
	fn test_finalize_takes_trailing_bytes() {
		let state = State::new(Shape::Large);
		let mut full = [0u8; 64];
		let mut short = [0u8; 48];
		state.finalize_into(&mut full);
		state.finalize_into(&mut short);
		assert_eq!(full[16..], short);
	}
}
