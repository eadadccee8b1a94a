use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sockfifo::RingBuffer;

const TOTAL_BYTES: usize = 16 * 1024 * 1024;

fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_get");
    group.throughput(Throughput::Bytes(TOTAL_BYTES as u64));

    for chunk in [64usize, 1024, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            let payload = vec![0x42u8; chunk];
            let mut out = vec![0u8; chunk];
            b.iter(|| {
                // 5000 is deliberately not a power of two: puts straddle the wrap
                let mut rb = RingBuffer::new(5000).unwrap();
                let mut moved = 0;
                while moved < TOTAL_BYTES {
                    rb.put(&payload).unwrap();
                    rb.get_into(&mut out).unwrap();
                    moved += chunk;
                }
                black_box(&out);
            });
        });
    }

    group.finish();
}

fn bench_windows(c: &mut Criterion) {
    let mut group = c.benchmark_group("reserve_commit");
    group.throughput(Throughput::Bytes(TOTAL_BYTES as u64));

    group.bench_function("window_pump_8k", |b| {
        let src = vec![0x17u8; 8192];
        b.iter(|| {
            let mut rb = RingBuffer::new(8192).unwrap();
            let mut moved = 0;
            while moved < TOTAL_BYTES {
                // receive side fills whatever contiguous span is free
                let w = rb.reserve_write();
                if !w.is_empty() {
                    rb.storage_mut()[w.range()].copy_from_slice(&src[..w.len]);
                    rb.commit_write(w.len).unwrap();
                }
                // send side drains the contiguous readable span
                let r = rb.reserve_read();
                if !r.is_empty() {
                    black_box(&rb.storage()[r.range()]);
                    rb.commit_read(r.len).unwrap();
                    moved += r.len;
                }
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_copy, bench_windows);
criterion_main!(benches);
