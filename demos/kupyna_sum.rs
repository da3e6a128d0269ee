// Copyright 2025 Irreducible Inc.

use std::{
	fs::File,
	io::{self, BufReader},
	path::PathBuf,
};

use anyhow::{Context as _, Result};
use clap::Parser;
use kupyna::{Context, DigestWidth};
use kupyna_utils::tracing::init_tracing;

/// Print Kupyna (DSTU 7564) digests of files, or of standard input when no file is given.
#[derive(Debug, Parser)]
struct Args {
	/// Digest width in bytes: 32, 48 or 64.
	#[arg(short, long, default_value = "32", value_parser = parse_width)]
	width: DigestWidth,
	/// Hash this string instead of reading files.
	#[arg(short, long, conflicts_with = "files")]
	text: Option<String>,
	files: Vec<PathBuf>,
}

fn parse_width(arg: &str) -> Result<DigestWidth> {
	let bytes = arg.parse::<usize>()?;
	Ok(DigestWidth::try_from(bytes)?)
}

fn digest_reader(mut reader: impl io::Read, width: DigestWidth) -> Result<String> {
	let mut ctx = Context::with_width(width.bytes())?;
	let len = io::copy(&mut reader, &mut ctx)?;
	let digest = ctx.finalize()?;
	tracing::debug!(%width, len, "hashed input");
	Ok(hex::encode(digest))
}

fn main() -> Result<()> {
	init_tracing();

	let args = Args::parse();

	if let Some(text) = &args.text {
		println!("{}", hex::encode(kupyna::hash(text.as_bytes(), args.width.bytes())?));
		return Ok(());
	}

	if args.files.is_empty() {
		println!("{}  -", digest_reader(io::stdin().lock(), args.width)?);
		return Ok(());
	}

	for path in &args.files {
		let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
		let digest = digest_reader(BufReader::new(file), args.width)
			.with_context(|| format!("hashing {}", path.display()))?;
		println!("{digest}  {}", path.display());
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_width() {
		assert_eq!(parse_width("48").unwrap(), DigestWidth::W384);
		assert!(parse_width("40").is_err());
		assert!(parse_width("wide").is_err());
	}

	#[test]
	fn test_digest_reader() {
		let digest = digest_reader(&b"Hello, World!"[..], DigestWidth::W256).unwrap();
		assert_eq!(digest, "3adab8ab5c58f9651ce7fb8e4d218dc8401ff01cdcb8c09b87540b8d96550aec");
	}
}
