use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use geo_kdset::kdtree::KDTree;
use geo_kdset::Location;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::{RTree, AABB};

fn load_data() -> Vec<Location> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..100_000)
        .map(|_| Location::new(rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0)))
        .collect()
}

fn construct_rstar(points: &[Location]) -> RTree<[f64; 2]> {
    RTree::bulk_load(points.iter().map(|p| [p.lon, p.lat]).collect())
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = load_data();

    c.bench_function("construction (geo-kdset)", |b| {
        b.iter(|| KDTree::create(&points))
    });

    c.bench_function("construction (rstar bulk)", |b| {
        b.iter(|| construct_rstar(&points))
    });

    let tree = KDTree::create(&points);
    let rstar_tree = construct_rstar(&points);
    let sw = Location::new(40.633799, -112.007493);
    let ne = Location::new(42.694228, -110.920964);

    c.bench_function("range (geo-kdset)", |b| b.iter(|| tree.range(&sw, &ne)));

    c.bench_function("range (rstar)", |b| {
        b.iter(|| {
            let aabb = AABB::from_corners([sw.lon, sw.lat], [ne.lon, ne.lat]);
            rstar_tree.locate_in_envelope(&aabb).count()
        })
    });

    c.bench_function("contains (geo-kdset)", |b| {
        b.iter(|| points[..1000].iter().filter(|p| tree.contains(p)).count())
    });

    c.bench_function("add then remove (geo-kdset)", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for p in &points[..1000] {
                    tree.remove(p);
                }
                for p in &points[..1000] {
                    tree.add(*p);
                }
                tree
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
