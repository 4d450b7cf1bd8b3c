//! Ship mesh data
//!
//! Geometry arrives once at startup from an external loader (already converted
//! to JSON). The simulation stores it and forwards it to the renderer; it never
//! changes it. A mesh that fails to load or validate is a fatal setup error.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// A triangle naming three vertex, uv and normal indices plus a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [u32; 3],
    pub uvs: [u32; 3],
    pub normals: [u32; 3],
    pub material_id: u32,
}

/// Lighting coefficients for one material (RGBA, alpha = transparency)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Specular exponent
    pub shininess: f32,
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    /// Index of refraction
    pub ior: f32,
    pub transparency: f32,
}

impl Material {
    /// Build from RGB coefficients, using `transparency` as every alpha
    pub fn from_rgb(
        name: impl Into<String>,
        shininess: f32,
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
        transparency: f32,
    ) -> Self {
        let rgba = |c: [f32; 3]| [c[0], c[1], c[2], transparency];
        Self {
            name: name.into(),
            shininess,
            ambient: rgba(ambient),
            diffuse: rgba(diffuse),
            specular: rgba(specular),
            emission: rgba([0.0; 3]),
            ior: 1.0,
            transparency,
        }
    }
}

/// Flattened mesh arrays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
    pub materials: Vec<Material>,
}

impl MeshData {
    /// Parse and validate a mesh from JSON
    pub fn from_json(json: &str) -> Result<Self, MeshError> {
        let mesh: Self = serde_json::from_str(json)?;
        mesh.validate()?;
        Ok(mesh)
    }

    /// Read and validate a mesh file
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every triangle index is in range
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.triangles.is_empty() {
            return Err(MeshError::InvalidFormat("mesh has no triangles".to_string()));
        }
        for (i, tri) in self.triangles.iter().enumerate() {
            let check = |what: &str, indices: &[u32; 3], len: usize| {
                match indices.iter().find(|&&idx| idx as usize >= len) {
                    Some(bad) => Err(MeshError::InvalidFormat(format!(
                        "triangle {} {} index {} out of bounds ({})",
                        i, what, bad, len
                    ))),
                    None => Ok(()),
                }
            };
            check("vertex", &tri.vertices, self.vertices.len())?;
            check("uv", &tri.uvs, self.uvs.len())?;
            check("normal", &tri.normals, self.normals.len())?;
            if tri.material_id as usize >= self.materials.len() {
                return Err(MeshError::InvalidFormat(format!(
                    "triangle {} material {} out of bounds ({})",
                    i,
                    tri.material_id,
                    self.materials.len()
                )));
            }
        }
        Ok(())
    }

    /// Material used by a triangle
    pub fn material_of(&self, triangle: &Triangle) -> Option<&Material> {
        self.materials.get(triangle.material_id as usize)
    }

    /// Small built-in dart shape for headless runs
    pub fn placeholder_ship() -> Self {
        let vertices = vec![
            Vec3::new(0.0, 0.0, -4.0), // nose
            Vec3::new(-3.0, 0.0, 2.0),
            Vec3::new(3.0, 0.0, 2.0),
            Vec3::new(0.0, 1.5, 1.0),
        ];
        let uvs = vec![Vec2::new(0.5, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)];
        let normals = vec![Vec3::Y, Vec3::NEG_Y];
        let hull = Material::from_rgb("hull", 32.0, [0.2; 3], [0.7; 3], [1.0; 3], 1.0);
        let logo = Material::from_rgb("logo", 128.0, [0.2; 3], [0.9; 3], [1.0; 3], 1.0);
        let tri = |v: [u32; 3], n: u32, material_id: u32| Triangle {
            vertices: v,
            uvs: [0, 1, 2],
            normals: [n; 3],
            material_id,
        };
        Self {
            vertices,
            uvs,
            normals,
            triangles: vec![
                tri([0, 1, 2], 1, 0),
                tri([0, 3, 1], 0, 0),
                tri([0, 2, 3], 0, 1),
                tri([1, 3, 2], 0, 0),
            ],
            materials: vec![hull, logo],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_valid() {
        let mesh = MeshData::placeholder_ship();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.material_of(&mesh.triangles[2]).unwrap().name, "logo");
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let mut mesh = MeshData::placeholder_ship();
        mesh.triangles[0].vertices[1] = 99;
        assert!(matches!(mesh.validate(), Err(MeshError::InvalidFormat(_))));

        let mut mesh = MeshData::placeholder_ship();
        mesh.triangles[0].material_id = 5;
        assert!(matches!(mesh.validate(), Err(MeshError::InvalidFormat(_))));
    }

    #[test]
    fn test_json_round_trip_through_loader() {
        let mesh = MeshData::placeholder_ship();
        let json = serde_json::to_string(&mesh).unwrap();
        assert_eq!(MeshData::from_json(&json).unwrap(), mesh);

        assert!(matches!(MeshData::from_json("[]"), Err(MeshError::Parse(_))));
        assert!(matches!(
            MeshData::load_json("/no/such/mesh.json"),
            Err(MeshError::Io(_))
        ));
    }
}
