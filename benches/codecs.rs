use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};
use stegmedia::media::image::{bpcs, lsb_codec};
use stegmedia::media::sample_lsb;
use stegmedia::Seed;

fn noise_image(width: u32, height: u32) -> RgbaImage {
    let mut rng = fastrand::Rng::with_seed(1);
    RgbaImage::from_fn(width, height, |_, _| {
        Rgba([rng.u8(..), rng.u8(..), rng.u8(..), 255])
    })
}

fn payload(len: usize) -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(2);
    (0..len).map(|_| rng.u8(..)).collect()
}

fn lsb_benchmarks(c: &mut Criterion) {
    let image = noise_image(512, 512);
    let data = payload(4096);
    let seed = Seed::from(42);

    c.bench_function("lsb image encoding", |b| {
        b.iter(|| {
            let mut carrier = image.clone();
            lsb_codec::encode(&mut carrier, black_box(&data), seed, 1).unwrap();
            carrier
        })
    });

    let mut stego = image.clone();
    lsb_codec::encode(&mut stego, &data, seed, 1).unwrap();
    c.bench_function("lsb image decoding", |b| {
        b.iter(|| lsb_codec::decode(black_box(&stego), seed, 1).unwrap())
    });
}

fn bpcs_benchmarks(c: &mut Criterion) {
    let image = noise_image(512, 512);
    let data = payload(4096);
    let seed = Seed::from(42);

    c.bench_function("bpcs image encoding", |b| {
        b.iter(|| {
            let mut carrier = image.clone();
            bpcs::encode(&mut carrier, black_box(&data), seed, bpcs::DEFAULT_THRESHOLD).unwrap();
            carrier
        })
    });

    let mut stego = image.clone();
    bpcs::encode(&mut stego, &data, seed, bpcs::DEFAULT_THRESHOLD).unwrap();
    c.bench_function("bpcs image decoding", |b| {
        b.iter(|| bpcs::decode(black_box(&stego), seed, bpcs::DEFAULT_THRESHOLD).unwrap())
    });
}

fn sample_benchmarks(c: &mut Criterion) {
    let samples = payload(1 << 20);
    let data = payload(8192);
    let seed = Seed::from(42);

    c.bench_function("sample encoding", |b| {
        b.iter(|| {
            let mut carrier = samples.clone();
            sample_lsb::encode(&mut carrier, black_box(&data), seed).unwrap();
            carrier
        })
    });

    let mut stego = samples.clone();
    sample_lsb::encode(&mut stego, &data, seed).unwrap();
    c.bench_function("sample decoding", |b| {
        b.iter(|| sample_lsb::decode(black_box(&stego), seed).unwrap())
    });
}

criterion_group!(benches, lsb_benchmarks, bpcs_benchmarks, sample_benchmarks);
criterion_main!(benches);
