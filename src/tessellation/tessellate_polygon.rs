use std::collections::HashMap;

use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use crate::error::{Result, TessellationError};
use crate::geometry::{Containment, Polygon, Vertex};
use crate::math::{PlaneFrame, Point2, TOLERANCE};

use super::TriangleMesh;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a planar polygon, optionally with holes.
///
/// The rings are projected into the polygon's plane frame and inserted into a
/// constrained Delaunay triangulation. A triangle is kept when its centroid
/// lies inside the outer ring and outside every hole.
pub struct TessellatePolygon<'a> {
    polygon: &'a Polygon,
    holes: Vec<&'a Polygon>,
}

impl<'a> TessellatePolygon<'a> {
    /// Creates a new `TessellatePolygon` operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            holes: Vec::new(),
        }
    }

    /// Cuts the given rings out of the polygon.
    ///
    /// Holes are projected into the outer polygon's frame and must lie
    /// inside it without crossing each other.
    #[must_use]
    pub fn with_holes(mut self, holes: impl IntoIterator<Item = &'a Polygon>) -> Self {
        self.holes.extend(holes);
        self
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::Failed` if a ring vertex cannot be inserted
    /// into the triangulation.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let frame = self.polygon.frame();
        let normal = *frame.normal();

        let mut cdt = Cdt::new();
        for ring in std::iter::once(self.polygon).chain(self.holes.iter().copied()) {
            constrain_ring(&mut cdt, frame, ring)?;
        }

        let mut mesh = TriangleMesh::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face in cdt.inner_faces() {
            let corners = face.vertices();
            if !self.covers(frame, corners.map(|vh| vh.position())) {
                continue;
            }
            let mut tri = [0u32; 3];
            for (slot, vh) in tri.iter_mut().zip(corners) {
                *slot = *vertex_map.entry(vh.fix().index()).or_insert_with(|| {
                    let pos = vh.position();
                    let uv = Point2::new(pos.x, pos.y);
                    mesh.vertices.push(frame.lift(&uv));
                    mesh.normals.push(normal);
                    mesh.uvs.push(uv);
                    (mesh.vertices.len() - 1) as u32
                });
            }
            mesh.indices.push(tri);
        }

        tracing::debug!(
            rings = 1 + self.holes.len(),
            triangles = mesh.triangle_count(),
            "tessellated polygon"
        );
        Ok(mesh)
    }

    /// Returns `true` if the triangle's centroid is inside the outer ring and
    /// not inside any hole.
    fn covers(&self, frame: &PlaneFrame, corners: [SpadePoint2<f64>; 3]) -> bool {
        let uv = Point2::new(
            (corners[0].x + corners[1].x + corners[2].x) / 3.0,
            (corners[0].y + corners[1].y + corners[2].y) / 3.0,
        );
        let centroid = Vertex::from_point(frame.lift(&uv));
        self.polygon.classify(&centroid, TOLERANCE) == Containment::Inside
            && self
                .holes
                .iter()
                .all(|hole| hole.classify(&centroid, TOLERANCE) != Containment::Inside)
    }
}

/// Inserts the ring's vertices and constrains each edge, closing back to the
/// first vertex.
fn constrain_ring(cdt: &mut Cdt, frame: &PlaneFrame, ring: &Polygon) -> Result<()> {
    let mut handles = Vec::with_capacity(ring.len());
    for v in ring.vertices() {
        let uv = frame.project(v.point());
        let handle = cdt
            .insert(SpadePoint2::new(uv.x, uv.y))
            .map_err(|e| TessellationError::Failed(format!("cannot insert {v}: {e}")))?;
        handles.push(handle);
    }
    for (i, &from) in handles.iter().enumerate() {
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }
    Ok(())
}
