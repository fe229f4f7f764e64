use glam::DVec3;
use globe_geo::{FlatElevation, GeoConvention};
use globe_mesh::*;

#[test]
fn base_icosahedron_shape() {
    let mesh = icosahedron();
    assert_eq!(mesh.vertex_count(), ICOSAHEDRON_VERTICES);
    assert_eq!(mesh.face_count(), ICOSAHEDRON_FACES);
    assert!(mesh.max_unit_deviation() < 1e-6);
}

#[test]
fn face_count_through_depth_six() {
    for depth in 0..=6 {
        let mesh = icosphere(depth, MidpointMode::Shared);
        assert_eq!(mesh.face_count(), 20 * 4usize.pow(depth), "depth {depth}");
        assert!(mesh.max_unit_deviation() < 1e-6, "depth {depth}");
    }
}

#[test]
fn midpoint_modes_after_one_level() {
    assert_eq!(icosphere(1, MidpointMode::Shared).vertex_count(), 42);
    assert_eq!(icosphere(1, MidpointMode::Duplicated).vertex_count(), 72);
}

#[test]
fn duplicated_vertices_coincide_with_shared_ones() {
    let shared = icosphere(2, MidpointMode::Shared);
    let duplicated = icosphere(2, MidpointMode::Duplicated);
    assert_eq!(shared.face_count(), duplicated.face_count());
    for f in 0..shared.face_count() {
        let a = shared.face_positions(f);
        let b = duplicated.face_positions(f);
        for k in 0..3 {
            assert!((a[k] - b[k]).length() < 1e-12);
        }
    }
}

#[test]
fn every_normal_points_outward() {
    let mesh = icosphere(4, MidpointMode::Shared);
    let normals = compute_face_normals(&mesh).unwrap();
    for (f, n) in normals.iter().enumerate() {
        let [a, b, c] = mesh.face_positions(f);
        let centroid = (a + b + c) / 3.0;
        assert!(n.dot(centroid) > 0.0, "face {f}");
    }
}

#[test]
fn zero_elevation_end_to_end() {
    let mesh = subdivide(&icosahedron(), MidpointMode::Shared);
    let params = DisplacementParams::new(1000.0, false);
    let displaced = displace_mesh(&mesh, &FlatElevation(0.0), GeoConvention::ZUp, &params);
    let normals = compute_face_normals(&displaced.mesh).unwrap();
    assert_eq!(normals.len(), 80);

    for v in displaced.mesh.vertices() {
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    let out = assemble(&displaced.mesh, &normals).unwrap();
    assert_eq!(out.corner_count(), 240);
    assert_eq!(displaced.report.no_data, 0);
    assert_eq!(displaced.report.histogram.total(), 42);
}

#[test]
fn displacement_scenarios() {
    let unclamped = DisplacementParams::new(1000.0, false);
    let p = displace_vertex(DVec3::X, Some(5000.0), &unclamped);
    assert!((p - DVec3::new(6.0, 0.0, 0.0)).length() < 1e-12);

    let clamped = DisplacementParams::new(1000.0, true);
    assert_eq!(scale_factor(Some(-5000.0), &clamped), 1.0);
    let p = displace_vertex(DVec3::X, Some(-5000.0), &clamped);
    assert!((p - DVec3::X).length() < 1e-12);
}

#[test]
fn displaced_normals_stay_outward() {
    let mesh = icosphere(3, MidpointMode::Shared);
    // Ridge along the prime meridian.
    let ridge = |lon: f64, _lat: f64| Some(if lon.abs() < 20.0 { 30.0 } else { 0.0 });
    let displaced = displace_mesh(
        &mesh,
        &ridge,
        GeoConvention::ZUp,
        &DisplacementParams::default(),
    );
    let normals = compute_face_normals(&displaced.mesh).unwrap();
    for (f, n) in normals.iter().enumerate() {
        let [a, b, c] = displaced.mesh.face_positions(f);
        assert!(n.dot(a + b + c) > 0.0, "face {f}");
    }
}
