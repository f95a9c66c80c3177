use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spacescan_annotations::DetectedObject;
use spacescan_core::Point3f;
use spacescan_viewer::{BoxCatalog, ViewerConfig, ViewportScenes};

const OBJECT_COUNTS: [usize; 3] = [10, 100, 1000];
const TYPES: [&str; 12] = [
    "door", "window", "stair", "elev", "column", "desk", "chair", "rack", "sink", "vent", "lamp", "shelf",
];

fn objects(count: usize) -> Vec<DetectedObject> {
    (0..count)
        .map(|i| {
            let x = (i % 32) as f32 * 2.0;
            let z = (i / 32) as f32 * 2.0;
            let angle = i as f32 * 0.1;
            let (s, c) = angle.sin_cos();
            let mut corners = Vec::with_capacity(8);
            for y in [0.0, 1.5] {
                for (dx, dz) in [(0.0, 0.0), (1.0, 0.0), (0.0, 0.8), (1.0, 0.8)] {
                    corners.push(Point3f::new(x + dx * c - dz * s, y, z + dx * s + dz * c));
                }
            }
            DetectedObject::new(format!("{}_{}", TYPES[i % TYPES.len()], i), corners, None)
        })
        .collect()
}

fn catalog_rebuild(c: &mut Criterion) {
    let config = ViewerConfig {
        color_seed: Some(42),
        ..ViewerConfig::default()
    };

    let mut g = c.benchmark_group("catalog rebuild");
    for count in OBJECT_COUNTS {
        let objects = objects(count);
        g.bench_with_input(BenchmarkId::from_parameter(count), &objects, |b, objects| {
            let mut scenes = ViewportScenes::headless();
            let mut catalog = BoxCatalog::new(&config);
            b.iter(|| std::hint::black_box(catalog.rebuild(std::hint::black_box(objects), &mut scenes)));
        });
    }
    g.finish();
}

criterion_group!(benches, catalog_rebuild);
criterion_main!(benches);
