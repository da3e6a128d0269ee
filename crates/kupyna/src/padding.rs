// Copyright 2025 Irreducible Inc.

//! Message padding: a `0x80` marker after the last message byte, zeros, and the message length
//! in bits as a 96-bit little-endian integer at the very end of the last block.

use crate::state::{Shape, MAX_BLOCK_SIZE};

/// Marker byte appended right after the message.
pub const MARKER: u8 = 0x80;

/// Width of the trailing length field in bytes.
pub const LENGTH_FIELD_BYTES: usize = 12;

/// The one or two blocks closing a message.
#[derive(Debug, Clone)]
pub struct PaddedTail {
	bytes: [u8; 2 * MAX_BLOCK_SIZE],
	len: usize,
	block_size: usize,
}

impl PaddedTail {
	pub fn blocks(&self) -> impl Iterator<Item = &[u8]> + '_ {
		self.bytes[..self.len].chunks_exact(self.block_size)
	}

	pub fn num_blocks(&self) -> usize {
		self.len / self.block_size
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes[..self.len]
	}
}

/// Pads the unprocessed `tail` of a message whose total length is `total_len` bytes.
///
/// `tail` must be shorter than a block: a message that ends on a block boundary is padded with
/// a whole extra block. The padding spills into a second block when fewer than
/// `1 + LENGTH_FIELD_BYTES` bytes are left after the tail.
pub fn pad(tail: &[u8], total_len: u64, shape: Shape) -> PaddedTail {
	let block_size = shape.block_size();
	debug_assert!(tail.len() < block_size);
	debug_assert_eq!(total_len % block_size as u64, tail.len() as u64);

	let num_blocks = if tail.len() + 1 + LENGTH_FIELD_BYTES <= block_size {
		1
	} else {
		2
	};
	let len = num_blocks * block_size;

	let mut bytes = [0u8; 2 * MAX_BLOCK_SIZE];
	bytes[..tail.len()].copy_from_slice(tail);
	bytes[tail.len()] = MARKER;
	let bit_len = u128::from(total_len) * 8;
	bytes[len - LENGTH_FIELD_BYTES..len]
		.copy_from_slice(&bit_len.to_le_bytes()[..LENGTH_FIELD_BYTES]);

	PaddedTail {
		bytes,
		len,
		block_size,
	}
}
