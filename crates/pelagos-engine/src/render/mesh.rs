use bytemuck::{Pod, Zeroable};

/// Vertex of the water quad: one tightly packed 3-float position.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WaterVertex {
    pub position: [f32; 3],
}

impl WaterVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<WaterVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The screen-filling quad both pipelines draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadMesh {
    pub vertices: [WaterVertex; 4],
    pub indices: [u32; 6],
}

/// Builds the static screen-space quad: corners at ±1 in NDC, z = 0, two
/// triangles. Pure and deterministic; runs once at startup and the output
/// is immutable for the process lifetime.
pub fn water_quad() -> QuadMesh {
    QuadMesh {
        vertices: [
            WaterVertex { position: [-1.0, -1.0, 0.0] }, // bottom left
            WaterVertex { position: [1.0, -1.0, 0.0] },  // bottom right
            WaterVertex { position: [-1.0, 1.0, 0.0] },  // top left
            WaterVertex { position: [1.0, 1.0, 0.0] },   // top right
        ],
        indices: [0, 1, 2, 2, 1, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_has_four_vertices_six_indices() {
        let mesh = water_quad();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn corners_span_ndc_at_z_zero() {
        let mesh = water_quad();
        for v in &mesh.vertices {
            assert!(v.position[0] == -1.0 || v.position[0] == 1.0);
            assert!(v.position[1] == -1.0 || v.position[1] == 1.0);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn indices_reference_valid_vertices() {
        let mesh = water_quad();
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn both_triangles_wind_counter_clockwise() {
        let mesh = water_quad();
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [
                mesh.vertices[tri[0] as usize].position,
                mesh.vertices[tri[1] as usize].position,
                mesh.vertices[tri[2] as usize].position,
            ];
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross > 0.0);
        }
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(water_quad(), water_quad());
    }
}
