// Copyright 2025 Irreducible Inc.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use kupyna::{
	permutation::{p, q},
	Context, Digest, DigestWidth, Kupyna256, Kupyna512,
};
use rand::{thread_rng, RngCore};

fn bench_kupyna(c: &mut Criterion) {
	let mut group = c.benchmark_group("Kupyna");

	let mut rng = thread_rng();

	const N: usize = 1 << 16;
	let mut data = vec![0u8; N];
	rng.fill_bytes(&mut data);
	group.throughput(Throughput::Bytes(N as u64));

	for width in DigestWidth::ALL {
		group.bench_function(format!("{width} one-shot"), |bench| {
			bench.iter(|| kupyna::hash(&data, width.bytes()))
		});
		group.bench_function(format!("{width} streaming 1KiB chunks"), |bench| {
			bench.iter(|| {
				let mut ctx = Context::with_width(width.bytes())?;
				for chunk in data.chunks(1024) {
					ctx.update(chunk)?;
				}
				ctx.finalize()
			})
		});
	}

	group.bench_function("Kupyna256 Digest", |bench| {
		bench.iter(|| <Kupyna256 as Digest>::digest(&data))
	});
	group.bench_function("Kupyna512 Digest", |bench| {
		bench.iter(|| <Kupyna512 as Digest>::digest(&data))
	});

	group.finish()
}

fn bench_permutations(c: &mut Criterion) {
	let mut group = c.benchmark_group("Kupyna permutations");

	let mut rng = thread_rng();
	let mut small = [0u64; 8];
	small.iter_mut().for_each(|column| *column = rng.next_u64());
	let mut large = [0u64; 16];
	large.iter_mut().for_each(|column| *column = rng.next_u64());

	group.bench_function("P small", |bench| bench.iter(|| p(&mut small)));
	group.bench_function("Q small", |bench| bench.iter(|| q(&mut small)));
	group.bench_function("P large", |bench| bench.iter(|| p(&mut large)));
	group.bench_function("Q large", |bench| bench.iter(|| q(&mut large)));

	group.finish()
}

criterion_group!(hash, bench_kupyna, bench_permutations);
criterion_main!(hash);
