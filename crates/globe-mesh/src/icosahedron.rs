//! The base polyhedron every globe is refined from.

use glam::DVec3;

use crate::mesh::{Face, Mesh};

/// Number of vertices of the icosahedron.
pub const ICOSAHEDRON_VERTICES: usize = 12;
/// Number of faces of the icosahedron.
pub const ICOSAHEDRON_FACES: usize = 20;

/// Connectivity of the icosahedron, counter-clockwise seen from outside.
const FACES: [Face; ICOSAHEDRON_FACES] = [
    [2, 1, 0],
    [1, 2, 3],
    [5, 4, 3],
    [4, 8, 3],
    [7, 6, 0],
    [6, 9, 0],
    [11, 10, 4],
    [10, 11, 6],
    [9, 5, 2],
    [5, 9, 11],
    [8, 7, 1],
    [7, 8, 10],
    [2, 5, 3],
    [8, 1, 3],
    [9, 2, 0],
    [1, 7, 0],
    [11, 9, 6],
    [7, 10, 6],
    [5, 11, 4],
    [10, 8, 4],
];

/// Build the 12-vertex, 20-face icosahedron inscribed in the unit sphere.
///
/// Vertex coordinates are the cyclic permutations of `(0, ±1/φ, ±1)`,
/// normalized onto the sphere.
pub fn icosahedron() -> Mesh {
    let phi = (1.0 + 5.0_f64.sqrt()) * 0.5;
    let a = 1.0;
    let b = 1.0 / phi;

    let vertices = [
        DVec3::new(0.0, b, -a),
        DVec3::new(b, a, 0.0),
        DVec3::new(-b, a, 0.0),
        DVec3::new(0.0, b, a),
        DVec3::new(0.0, -b, a),
        DVec3::new(-a, 0.0, b),
        DVec3::new(0.0, -b, -a),
        DVec3::new(a, 0.0, -b),
        DVec3::new(a, 0.0, b),
        DVec3::new(-a, 0.0, -b),
        DVec3::new(b, -a, 0.0),
        DVec3::new(-b, -a, 0.0),
    ]
    .map(DVec3::normalize);

    Mesh::from_parts_unchecked(vertices.to_vec(), FACES.to_vec())
}
