use crate::core::geometry::Vertex;
use crate::scene::mesh::{Mesh, PrimitiveTopology};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns a unified triangle-list Mesh.
///
/// All sub-meshes are merged; faces are triangulated and position/normal/UV
/// indices unified by tobj. Tangents are generated from the UV layout after
/// assembly.
pub fn load_obj(path: &str) -> Result<Mesh, String> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(format!("File not found: {}", path));
    }

    info!("Loading OBJ file: {}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path_obj, &load_options)
        .map_err(|e| format!("Failed to load OBJ: {}", e))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut index_offset = 0;

    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );

            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::new(0.0, 1.0, 0.0)
            };

            // OBJ uses a bottom-left UV origin, the sampler a top-left one.
            let uv = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(position, normal, uv));
        }

        for index in &mesh.indices {
            indices.push(index + index_offset);
        }

        index_offset += num_vertices as u32;
    }

    generate_tangents(&mut vertices, &indices);

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        vertices.len(),
        indices.len()
    );

    Ok(Mesh::new(vertices, indices, PrimitiveTopology::TriangleList))
}

/// Builds per-vertex tangents from the triangles' UV layout.
///
/// Each face contributes the direction in which `u` grows across its surface;
/// contributions accumulate on shared vertices and are finally made
/// perpendicular to the vertex normal (Gram-Schmidt) and normalized. Faces
/// with a degenerate UV mapping contribute nothing.
pub fn generate_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    for chunk in indices.chunks_exact(3) {
        let (i0, i1, i2) = (chunk[0] as usize, chunk[1] as usize, chunk[2] as usize);
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            continue;
        }

        let edge1 = vertices[i1].position - vertices[i0].position;
        let edge2 = vertices[i2].position - vertices[i0].position;
        let duv1 = vertices[i1].uv - vertices[i0].uv;
        let duv2 = vertices[i2].uv - vertices[i0].uv;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < 1e-8 {
            continue;
        }

        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;
        vertices[i0].tangent += tangent;
        vertices[i1].tangent += tangent;
        vertices[i2].tangent += tangent;
    }

    for vertex in vertices.iter_mut() {
        let rejected = vertex.tangent - vertex.normal * vertex.normal.dot(&vertex.tangent);
        let norm = rejected.norm();
        vertex.tangent = if norm > 1e-6 {
            rejected / norm
        } else {
            // No usable UV gradient: any vector perpendicular to the normal.
            perpendicular_to(&vertex.normal)
        };
    }
}

fn perpendicular_to(n: &Vector3<f32>) -> Vector3<f32> {
    let axis = if n.x.abs() < 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(0.0, 1.0, 0.0)
    };
    let perp = n.cross(&axis);
    let norm = perp.norm();
    if norm > 1e-6 { perp / norm } else { Vector3::new(1.0, 0.0, 0.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_vertices() -> (Vec<Vertex>, Vec<u32>) {
        // XY quad facing -Z, u growing with +x and v with -y.
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 1.0, 0.0), normal, Vector2::new(0.0, 0.0)),
            Vertex::new(Point3::new(1.0, 1.0, 0.0), normal, Vector2::new(1.0, 0.0)),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), normal, Vector2::new(1.0, 1.0)),
            Vertex::new(Point3::new(0.0, 0.0, 0.0), normal, Vector2::new(0.0, 1.0)),
        ];
        (vertices, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn quad_tangent_follows_u_direction() {
        let (mut vertices, indices) = quad_vertices();
        generate_tangents(&mut vertices, &indices);

        for v in &vertices {
            assert_relative_eq!(v.tangent.x, 1.0, epsilon = 1e-5);
            assert_relative_eq!(v.tangent.y, 0.0, epsilon = 1e-5);
            assert_relative_eq!(v.tangent.z, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn tangents_are_unit_length_and_perpendicular_to_normals() {
        let (mut vertices, indices) = quad_vertices();
        generate_tangents(&mut vertices, &indices);

        for v in &vertices {
            assert_relative_eq!(v.tangent.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(v.tangent.dot(&v.normal), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn degenerate_uv_face_gets_fallback_tangent() {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let uv = Vector2::new(0.5, 0.5);
        let mut vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), normal, uv),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), normal, uv),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), normal, uv),
        ];
        generate_tangents(&mut vertices, &[0, 1, 2]);

        for v in &vertices {
            assert_relative_eq!(v.tangent.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(v.tangent.dot(&v.normal), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj("does_not_exist.obj").is_err());
    }
}
