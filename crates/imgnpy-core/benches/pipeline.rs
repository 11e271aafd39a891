//! Benchmarks for the imgnpy conversion pipeline.
//!
//! Run with: cargo bench -p imgnpy-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat};
use imgnpy_core::config::{ConvertConfig, LimitsConfig};
use imgnpy_core::pipeline::{npy, to_grayscale, ImageArray, ImageDecoder, Transformer};
use std::io::Cursor;
use std::path::Path;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

fn benchmark_decode(c: &mut Criterion) {
    let bytes = png_bytes(1024, 768);
    let decoder = ImageDecoder::new(LimitsConfig::default());

    c.bench_function("decode_png_1024x768", |b| {
        b.iter(|| {
            let _ = decoder.decode_bytes(black_box(bytes.clone()), Path::new("bench.png"));
        })
    });
}

fn benchmark_grayscale(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(1920, 1080);

    c.bench_function("grayscale_1920x1080", |b| {
        b.iter(|| {
            let _ = to_grayscale(black_box(img.clone()));
        })
    });
}

fn benchmark_resize(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(1920, 1080);
    let transformer = Transformer::new(&ConvertConfig::default());

    c.bench_function("resize_512_catmull_rom", |b| {
        b.iter(|| {
            let _ = transformer.resize(black_box(&img));
        })
    });
}

fn benchmark_array_and_write(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(512, 512);
    let dir = std::env::temp_dir().join("imgnpy-bench");
    if std::fs::create_dir_all(&dir).is_err() {
        eprintln!("Skipping npy write benchmark: cannot create {:?}", dir);
        return;
    }
    let path = dir.join("bench.npy");

    c.bench_function("array_extract_and_write_512", |b| {
        b.iter(|| {
            if let Ok(array) = ImageArray::from_image(black_box(img.clone())) {
                let _ = npy::write_array(&path, &array);
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode,
    benchmark_grayscale,
    benchmark_resize,
    benchmark_array_and_write,
);
criterion_main!(benches);
