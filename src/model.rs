//! Mesh data structures used by scene objects

/// A vertex in a triangle mesh, in object-local millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// Index of first vertex
    pub v1: usize,
    /// Index of second vertex
    pub v2: usize,
    /// Index of third vertex
    pub v3: usize,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self { v1, v2, v3 }
    }
}

/// Triangle mesh owned by a scene object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// List of vertices
    pub vertices: Vec<Vertex>,
    /// List of triangles
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a new mesh with pre-allocated capacity
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Axis-aligned cuboid spanning `min..max` in local space
    ///
    /// Triangles are wound so that normals point outwards.
    pub fn cuboid(min: (f64, f64, f64), max: (f64, f64, f64)) -> Self {
        let mut mesh = Self::with_capacity(8, 12);
        let (x0, y0, z0) = min;
        let (x1, y1, z1) = max;

        mesh.vertices.push(Vertex::new(x0, y0, z0)); // 0
        mesh.vertices.push(Vertex::new(x1, y0, z0)); // 1
        mesh.vertices.push(Vertex::new(x1, y1, z0)); // 2
        mesh.vertices.push(Vertex::new(x0, y1, z0)); // 3
        mesh.vertices.push(Vertex::new(x0, y0, z1)); // 4
        mesh.vertices.push(Vertex::new(x1, y0, z1)); // 5
        mesh.vertices.push(Vertex::new(x1, y1, z1)); // 6
        mesh.vertices.push(Vertex::new(x0, y1, z1)); // 7

        for (a, b, c) in [
            (3, 2, 1),
            (1, 0, 3),
            (4, 5, 6),
            (6, 7, 4),
            (0, 1, 5),
            (5, 4, 0),
            (1, 2, 6),
            (6, 5, 1),
            (2, 3, 7),
            (7, 6, 2),
            (3, 0, 4),
            (4, 7, 3),
        ] {
            mesh.triangles.push(Triangle::new(a, b, c));
        }
        mesh
    }

    /// Cube primitive with edge length `size`, centered on the local origin
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        Self::cuboid((-h, -h, -h), (h, h, h))
    }

    /// Square plane primitive with edge length `size` in the local XY plane
    pub fn plane(size: f64) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(4, 2);
        mesh.vertices.push(Vertex::new(-h, -h, 0.0));
        mesh.vertices.push(Vertex::new(h, -h, 0.0));
        mesh.vertices.push(Vertex::new(h, h, 0.0));
        mesh.vertices.push(Vertex::new(-h, h, 0.0));
        mesh.triangles.push(Triangle::new(0, 1, 2));
        mesh.triangles.push(Triangle::new(2, 3, 0));
        mesh
    }

    /// Returns true if the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
