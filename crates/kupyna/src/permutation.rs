// Copyright 2025 Irreducible Inc.

//! The two keyless permutations of Kupyna over an `8 × C` byte matrix.
//!
//! `P` (the standard's `T⊕`) XORs its round constants into the state, `Q` (`T+`) adds them
//! modulo 2^64 column by column. Both then run the same substitution, shift and diffusion layers.
//!
//! A column is stored as a little-endian `u64`, so the byte in row `i` of column `j` is
//! `(state[j] >> (8 * i)) as u8`. `C` is 8 for the 512-bit state and 16 for the 1024-bit state.

use crate::table::{gf_mul, mds, ROWS, SBOXES, TABLE};

/// Number of rounds of `P` and `Q` for a state with `columns` columns.
pub const fn rounds(columns: usize) -> usize {
	if columns == 8 {
		10
	} else {
		14
	}
}

/// Rotation offset of every row in the shift-bytes layer.
pub const fn shifts(columns: usize) -> [usize; ROWS] {
	if columns == 8 {
		[0, 1, 2, 3, 4, 5, 6, 7]
	} else {
		[0, 1, 2, 3, 4, 5, 6, 11]
	}
}

#[inline(always)]
fn byte(column: u64, row: usize) -> u8 {
	(column >> (8 * row)) as u8
}

/// XORs `(j << 4) ^ round` into row 0 of every column `j`.
pub fn add_round_constant_p<const C: usize>(state: &mut [u64; C], round: usize) {
	for (j, column) in state.iter_mut().enumerate() {
		*column ^= ((j << 4) ^ round) as u64;
	}
}

/// Adds `0x00F0F0F0F0F0F0F3 ^ ((((C - 1 - j) << 4) ^ round) << 56)` to every column `j`.
pub fn add_round_constant_q<const C: usize>(state: &mut [u64; C], round: usize) {
	for (j, column) in state.iter_mut().enumerate() {
		let high = ((((C - 1 - j) << 4) ^ round) as u64) << 56;
		*column = column.wrapping_add(0x00F0_F0F0_F0F0_F0F3 ^ high);
	}
}

pub fn sub_bytes<const C: usize>(state: &mut [u64; C]) {
	for column in state.iter_mut() {
		let mut out = 0u64;
		for row in 0..ROWS {
			out |= (SBOXES[row % 4][byte(*column, row) as usize] as u64) << (8 * row);
		}
		*column = out;
	}
}

/// Rotates row `i` so that the byte in column `j` lands in column `j + shifts(C)[i]`.
pub fn shift_bytes<const C: usize>(state: &mut [u64; C]) {
	rotate_rows(state, |shift| shift);
}

pub fn inverse_shift_bytes<const C: usize>(state: &mut [u64; C]) {
	rotate_rows(state, |shift| C - shift);
}

fn rotate_rows<const C: usize>(state: &mut [u64; C], offset: impl Fn(usize) -> usize) {
	let input = *state;
	let shifts = shifts(C);
	for (j, column) in state.iter_mut().enumerate() {
		let mut out = 0u64;
		for (row, &shift) in shifts.iter().enumerate() {
			let src = (j + C - offset(shift) % C) % C;
			out |= (byte(input[src], row) as u64) << (8 * row);
		}
		*column = out;
	}
}

/// Multiplies every column by the MDS matrix.
pub fn mix_columns<const C: usize>(state: &mut [u64; C]) {
	for column in state.iter_mut() {
		let mut out = 0u64;
		for row in 0..ROWS {
			let mut acc = 0u8;
			for b in 0..ROWS {
				acc ^= gf_mul(byte(*column, b), mds(row, b));
			}
			out |= (acc as u64) << (8 * row);
		}
		*column = out;
	}
}

/// `mix_columns ∘ shift_bytes ∘ sub_bytes` through the fused lookup table.
#[inline(always)]
fn sub_shift_mix<const C: usize>(state: &mut [u64; C]) {
	let input = *state;
	let shifts = shifts(C);
	for (j, column) in state.iter_mut().enumerate() {
		let mut out = 0u64;
		for (row, &shift) in shifts.iter().enumerate() {
			let src = (j + C - shift) % C;
			out ^= TABLE[row][byte(input[src], row) as usize];
		}
		*column = out;
	}
}

/// The `T⊕` permutation.
pub fn p<const C: usize>(state: &mut [u64; C]) {
	debug_assert!(C == 8 || C == 16);
	for round in 0..rounds(C) {
		add_round_constant_p(state, round);
		sub_shift_mix(state);
	}
}

/// The `T+` permutation.
pub fn q<const C: usize>(state: &mut [u64; C]) {
	debug_assert!(C == 8 || C == 16);
	for round in 0..rounds(C) {
		add_round_constant_q(state, round);
		sub_shift_mix(state);
	}
}
