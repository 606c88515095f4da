use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orrery::kepler::{elliptic_to_rectangular, solve_kepler, EllipticElements};
use orrery::lunar::moon_geocentric;
use orrery::planetlib::heliocentric;
use orrery::{EphemerisConfig, Planet};

const SAMPLES: usize = 10_000;

fn bench_kepler(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);

    for (label, max_e) in [("typical_e<=0.7", 0.7), ("high_e<=0.97", 0.97)] {
        c.bench_function(&format!("solve_kepler/{label}"), |b| {
            b.iter_batched(
                || {
                    (0..SAMPLES)
                        .map(|_| (rng.gen_range(0.0..360.0), rng.gen_range(0.0..=max_e)))
                        .collect::<Vec<(f64, f64)>>()
                },
                |cases| {
                    for (m, e) in cases {
                        black_box(solve_kepler(black_box(m), black_box(e), 10_000, 1e-9).ok());
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
}

fn bench_elliptic(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    c.bench_function("elliptic_to_rectangular/e<=0.3", |b| {
        b.iter_batched(
            || {
                (0..SAMPLES)
                    .map(|_| {
                        let e = rng.gen_range(0.0..=0.3);
                        let pericentre: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
                        EllipticElements {
                            n: 0.2,
                            lambda: rng.gen_range(0.0..std::f64::consts::TAU),
                            k: e * pericentre.cos(),
                            h: e * pericentre.sin(),
                            q: 0.01,
                            p: 0.02,
                        }
                    })
                    .collect::<Vec<_>>()
            },
            |cases| {
                for elements in cases {
                    black_box(elliptic_to_rectangular(black_box(&elements), 1.0).ok());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_series(c: &mut Criterion) {
    let config = EphemerisConfig::default();

    c.bench_function("vsop/earth_heliocentric", |b| {
        b.iter(|| heliocentric(Planet::Earth, black_box(2451545.0), &config))
    });

    c.bench_function("lunar/moon_geocentric", |b| {
        b.iter(|| moon_geocentric(black_box(2448724.5)))
    });
}

criterion_group!(benches, bench_kepler, bench_elliptic, bench_series);
criterion_main!(benches);
