// Copyright 2025 Irreducible Inc.

//! C interface to the Kupyna hash.
//!
//! A context is an opaque heap object created by [`kupyna_alloc`] and released by
//! [`kupyna_free`]. Every other call returns [`KUPYNA_OK`] or one of the negative error codes
//! below; a failed call leaves the context as it was.

use std::{ptr, slice};

use kupyna::{Context, DigestWidth, Error, ErrorKind};
use tracing::warn;

pub const KUPYNA_OK: i32 = 0;
/// Null context, data or output pointer.
pub const KUPYNA_ERROR_NULL_CTX: i32 = ErrorKind::InvalidArgument.code();
/// Digest width other than 32, 48 or 64 bytes.
pub const KUPYNA_ERROR_INVALID_LEN: i32 = ErrorKind::InvalidConfiguration.code();
pub const KUPYNA_ERROR_NOT_INIT: i32 = ErrorKind::InvalidState.code();
pub const KUPYNA_ERROR_ALLOC: i32 = ErrorKind::ResourceExhausted.code();

/// Opaque hashing context.
pub struct KupynaCtx(Context);

/// Borrows `len` bytes at `data`. A null `data` is accepted only for an empty input.
unsafe fn input<'a>(data: *const u8, len: usize) -> Option<&'a [u8]> {
	if data.is_null() {
		(len == 0).then_some(&[][..])
	} else {
		Some(slice::from_raw_parts(data, len))
	}
}

fn status(result: Result<(), Error>) -> i32 {
	match result {
		Ok(()) => KUPYNA_OK,
		Err(err) => {
			warn!(%err, "kupyna call failed");
			err.kind().code()
		}
	}
}

/// Allocates an uninitialized context, or returns null when allocation fails.
#[no_mangle]
pub extern "C" fn kupyna_alloc() -> *mut KupynaCtx {
	match Context::new() {
		Ok(ctx) => Box::into_raw(Box::new(KupynaCtx(ctx))),
		Err(err) => {
			warn!(%err, "kupyna_alloc failed");
			ptr::null_mut()
		}
	}
}

/// Starts a computation of a `hash_len`-byte digest.
///
/// # Safety
///
/// `ctx` must be null or a pointer returned by [`kupyna_alloc`] that was not freed.
#[no_mangle]
pub unsafe extern "C" fn kupyna_init(ctx: *mut KupynaCtx, hash_len: usize) -> i32 {
	let Some(ctx) = ctx.as_mut() else {
		return KUPYNA_ERROR_NULL_CTX;
	};
	status(ctx.0.init(hash_len))
}

/// Absorbs `len` bytes at `data`.
///
/// # Safety
///
/// `ctx` must be null or a live context. `data` must be valid for reads of `len` bytes, and
/// may be null only when `len` is zero.
#[no_mangle]
pub unsafe extern "C" fn kupyna_update(ctx: *mut KupynaCtx, data: *const u8, len: usize) -> i32 {
	let Some(ctx) = ctx.as_mut() else {
		return KUPYNA_ERROR_NULL_CTX;
	};
	let Some(data) = input(data, len) else {
		return KUPYNA_ERROR_NULL_CTX;
	};
	status(ctx.0.update(data))
}

/// Writes the digest to `hash`. The context must be initialized again before reuse.
///
/// # Safety
///
/// `ctx` must be null or a live context. `hash` must be null or valid for writes of the width
/// passed to [`kupyna_init`].
#[no_mangle]
pub unsafe extern "C" fn kupyna_final(ctx: *mut KupynaCtx, hash: *mut u8) -> i32 {
	let Some(ctx) = ctx.as_mut() else {
		return KUPYNA_ERROR_NULL_CTX;
	};
	if hash.is_null() {
		return KUPYNA_ERROR_NULL_CTX;
	}
	let Some(width) = ctx.0.width() else {
		return KUPYNA_ERROR_NOT_INIT;
	};
	let out = slice::from_raw_parts_mut(hash, width.bytes());
	status(ctx.0.finalize_into(out).map(drop))
}

/// Releases a context. Null is ignored.
///
/// # Safety
///
/// `ctx` must be null or a live context; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn kupyna_free(ctx: *mut KupynaCtx) {
	if !ctx.is_null() {
		drop(Box::from_raw(ctx));
	}
}

/// Hashes `data_len` bytes at `data` into a `hash_len`-byte digest at `hash`.
///
/// # Safety
///
/// `data` must be valid for reads of `data_len` bytes, and may be null only when `data_len` is
/// zero. `hash` must be null or valid for writes of `hash_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn kupyna_hash(
	data: *const u8,
	data_len: usize,
	hash: *mut u8,
	hash_len: usize,
) -> i32 {
	let Some(data) = input(data, data_len) else {
		return KUPYNA_ERROR_NULL_CTX;
	};
	if hash.is_null() {
		return KUPYNA_ERROR_NULL_CTX;
	}
	if let Err(err) = DigestWidth::try_from(hash_len) {
		return status(Err(err));
	}
	let out = slice::from_raw_parts_mut(hash, hash_len);
	status(kupyna::hash_into(data, out, hash_len))
}
