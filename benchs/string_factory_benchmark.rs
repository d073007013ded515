use criterion::{Criterion, criterion_group, criterion_main};
use fret_harmonics::instrument::music_note::MusicNote;
use fret_harmonics::instrument::string_factory::StringFactory;
use fret_harmonics::{Fretboard, InstrumentConfig};
use std::hint::black_box;

fn benchmark_build_string(c: &mut Criterion) {
    let factory = StringFactory::guitar();
    c.bench_function("build_low_e_36_frets_order_12", |b| {
        b.iter(|| {
            factory
                .build(black_box(MusicNote::new(40)), black_box(36), black_box(12))
                .unwrap()
        })
    });
}

fn benchmark_build_fretboard(c: &mut Criterion) {
    let config = InstrumentConfig::electric_guitar();
    c.bench_function("build_electric_guitar", |b| {
        b.iter(|| config.build().unwrap())
    });

    let board = config.build().unwrap();
    c.bench_function("touch_points_for_a3", |b| {
        b.iter(|| board.touch_points_for(black_box(MusicNote::new(57))).len())
    });

    let factory = StringFactory::guitar();
    let twelve = vec!["E2"; 12];
    c.bench_function("build_twelve_strings", |b| {
        b.iter(|| Fretboard::build(&factory, &twelve, 22, 12).unwrap())
    });
}

criterion_group!(benches, benchmark_build_string, benchmark_build_fretboard);
criterion_main!(benches);
