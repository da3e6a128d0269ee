// Copyright 2025 Irreducible Inc.

//! [`digest`] front end: Kupyna as RustCrypto-style hashers.
//!
//! The cores are generic over the state shape. The small core serves outputs of 1 to 32 bytes,
//! the large core 33 to 64 bytes; fixed widths wrap them in [`CtVariableCoreWrapper`], which
//! keeps the trailing bytes of the full output.

use core::{fmt, marker::PhantomData};

use digest::{
	block_buffer::Eager,
	consts::{U128, U32, U48, U64},
	core_api::{
		AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, CoreWrapper,
		CtVariableCoreWrapper, OutputSizeUser, RtVariableCoreWrapper, TruncSide, UpdateCore,
		VariableOutputCore,
	},
	generic_array::ArrayLength,
	typenum::{IsLess, True, Unsigned, U256},
	HashMarker, InvalidOutputSize, Output,
};

use crate::{
	padding,
	state::{Shape, State},
};

/// Compile-time description of a state shape.
pub trait KupynaShape: Clone {
	type BlockSize: ArrayLength<u8> + IsLess<U256, Output = True> + 'static;
	/// The widest output the shape serves.
	type OutputSize: ArrayLength<u8> + 'static;

	const SHAPE: Shape;
	const MIN_OUTPUT_SIZE: usize;
}

/// The 512-bit state.
#[derive(Debug, Clone, Copy)]
pub struct Short;

/// The 1024-bit state.
#[derive(Debug, Clone, Copy)]
pub struct Long;

impl KupynaShape for Short {
	type BlockSize = U64;
	type OutputSize = U32;

	const SHAPE: Shape = Shape::Small;
	const MIN_OUTPUT_SIZE: usize = 1;
}

impl KupynaShape for Long {
	type BlockSize = U128;
	type OutputSize = U64;

	const SHAPE: Shape = Shape::Large;
	const MIN_OUTPUT_SIZE: usize = 33;
}

/// Lowest-level core hasher state, generic over the state shape.
#[derive(Clone)]
pub struct KupynaVarCore<S: KupynaShape> {
	state: State,
	blocks_len: u64,
	_shape: PhantomData<S>,
}

pub type KupynaShortVarCore = KupynaVarCore<Short>;
pub type KupynaLongVarCore = KupynaVarCore<Long>;

/// Kupyna on the small state with an output size chosen at runtime.
pub type KupynaShortVar = RtVariableCoreWrapper<KupynaShortVarCore>;
/// Kupyna on the large state with an output size chosen at runtime.
pub type KupynaLongVar = RtVariableCoreWrapper<KupynaLongVarCore>;

/// Kupyna-256 hasher state.
pub type Kupyna256 = CoreWrapper<CtVariableCoreWrapper<KupynaShortVarCore, U32>>;
/// Kupyna-384 hasher state.
pub type Kupyna384 = CoreWrapper<CtVariableCoreWrapper<KupynaLongVarCore, U48>>;
/// Kupyna-512 hasher state.
pub type Kupyna512 = CoreWrapper<CtVariableCoreWrapper<KupynaLongVarCore, U64>>;

impl<S: KupynaShape> HashMarker for KupynaVarCore<S> {}

impl<S: KupynaShape> BlockSizeUser for KupynaVarCore<S> {
	type BlockSize = S::BlockSize;
}

impl<S: KupynaShape> BufferKindUser for KupynaVarCore<S> {
	type BufferKind = Eager;
}

impl<S: KupynaShape> UpdateCore for KupynaVarCore<S> {
	#[inline]
	fn update_blocks(&mut self, blocks: &[Block<Self>]) {
		self.blocks_len += blocks.len() as u64;
		for block in blocks {
			self.state.compress(block);
		}
	}
}

impl<S: KupynaShape> OutputSizeUser for KupynaVarCore<S> {
	type OutputSize = S::OutputSize;
}

impl<S: KupynaShape> VariableOutputCore for KupynaVarCore<S> {
	const TRUNC_SIDE: TruncSide = TruncSide::Right;

	#[inline]
	fn new(output_size: usize) -> Result<Self, InvalidOutputSize> {
		if !(S::MIN_OUTPUT_SIZE..=S::OutputSize::USIZE).contains(&output_size) {
			return Err(InvalidOutputSize);
		}
		Ok(Self {
			state: State::new(S::SHAPE),
			blocks_len: 0,
			_shape: PhantomData,
		})
	}

	#[inline]
	fn finalize_variable_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
		let tail = buffer.get_data();
		let total_len = self.blocks_len * S::BlockSize::U64 + tail.len() as u64;
		let padded = padding::pad(tail, total_len, S::SHAPE);
		for block in padded.blocks() {
			self.state.compress(block);
		}
		self.state.finalize_into(out);
	}
}

impl<S: KupynaShape> AlgorithmName for KupynaVarCore<S> {
	#[inline]
	fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Kupyna")
	}
}

impl<S: KupynaShape> fmt::Debug for KupynaVarCore<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("KupynaVarCore { ... }")
	}
}
