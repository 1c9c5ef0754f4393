use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kd_knn::kdtree::{KDTreeBuilder, KDTreeIndex};
use kd_knn::metric::{EuclideanDistance, SquaredEuclideanDistance};
use kd_knn::PointsRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_ITEMS: usize = 100_000;
const NUM_QUERIES: usize = 1_000;

fn generate_coords(rng: &mut StdRng, n: usize, dims: usize) -> Vec<f64> {
    (0..n * dims).map(|_| rng.gen_range(0.0..2.0)).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    for dims in [2, 8] {
        let coords = generate_coords(&mut rng, NUM_ITEMS, dims);
        let query_coords = generate_coords(&mut rng, NUM_QUERIES, dims);
        let points = PointsRef::try_new(&coords, dims).unwrap();
        let queries = PointsRef::try_new(&query_coords, dims).unwrap();

        let mut group = c.benchmark_group(format!("{}d", dims));

        group.bench_function("construction", |b| {
            b.iter(|| KDTreeBuilder::new_with_node_size(points, 8).finish().unwrap())
        });

        let tree = KDTreeBuilder::new_with_node_size(points, 8)
            .finish()
            .unwrap();

        for approx in [0, 2, 4] {
            group.bench_with_input(
                BenchmarkId::new("knn k=10 (euclidean)", approx),
                &approx,
                |b, &approx| {
                    b.iter(|| {
                        for query in queries.iter() {
                            tree.nearest_neighbors(query, 10, approx, &EuclideanDistance)
                                .unwrap();
                        }
                    })
                },
            );
        }

        group.bench_function("knn k=10 (squared euclidean)", |b| {
            b.iter(|| {
                for query in queries.iter() {
                    tree.nearest_neighbors(query, 10, 0, &SquaredEuclideanDistance)
                        .unwrap();
                }
            })
        });

        group.finish();
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
