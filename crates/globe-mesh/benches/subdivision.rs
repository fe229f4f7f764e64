use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use globe_mesh::*;

fn bench_subdivide(c: &mut Criterion) {
    let mut group = c.benchmark_group("subdivide");
    for mode in [MidpointMode::Shared, MidpointMode::Duplicated] {
        for depth in [3u32, 5] {
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), depth),
                &depth,
                |bencher, &depth| bencher.iter(|| black_box(icosphere(depth, mode))),
            );
        }
    }
    group.finish();
}

fn bench_face_normals(c: &mut Criterion) {
    let mesh = icosphere(5, MidpointMode::Shared);
    c.bench_function("face_normals_depth_5", |bencher| {
        bencher.iter(|| black_box(compute_face_normals(&mesh)))
    });
}

fn bench_assemble(c: &mut Criterion) {
    let mesh = icosphere(5, MidpointMode::Shared);
    let normals = compute_face_normals(&mesh).unwrap();
    c.bench_function("assemble_depth_5", |bencher| {
        bencher.iter(|| black_box(assemble(&mesh, &normals)))
    });
}

criterion_group!(benches, bench_subdivide, bench_face_normals, bench_assemble);
criterion_main!(benches);
