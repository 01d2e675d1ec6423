//! Export utilities for converting generated tree meshes to standard 3D
//! file formats.
//!
//! Supports OBJ (text) and GLB (binary glTF 2.0) formats. These are pure
//! data conversion functions with no Bevy system dependencies — call them
//! from your own export systems or CLI tools.

use bevy::mesh::{Indices, VertexAttributeValues};
use bevy::prelude::*;

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Obj,
    Glb,
}

impl ExportFormat {
    pub const ALL: &'static [ExportFormat] = &[ExportFormat::Obj, ExportFormat::Glb];

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Obj => "OBJ",
            ExportFormat::Glb => "GLB",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Obj => "obj",
            ExportFormat::Glb => "glb",
        }
    }
}

fn positions_of(mesh: &Mesh) -> Option<&Vec<[f32; 3]>> {
    mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        .and_then(|attr| match attr {
            VertexAttributeValues::Float32x3(v) => Some(v),
            _ => None,
        })
}

fn normals_of(mesh: &Mesh) -> Option<&Vec<[f32; 3]>> {
    mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        .and_then(|attr| match attr {
            VertexAttributeValues::Float32x3(v) => Some(v),
            _ => None,
        })
}

fn uvs_of(mesh: &Mesh) -> Option<&Vec<[f32; 2]>> {
    mesh.attribute(Mesh::ATTRIBUTE_UV_0)
        .and_then(|attr| match attr {
            VertexAttributeValues::Float32x2(v) => Some(v),
            _ => None,
        })
}

// ---------------------------------------------------------------------------
// OBJ Export
// ---------------------------------------------------------------------------

/// Convert several tree meshes to a combined OBJ format string.
///
/// Each mesh becomes a separate OBJ object named `{base_name}_{index}`.
/// Returns the combined OBJ text (without header comments — prepend your
/// own).
pub fn meshes_to_obj(meshes: &[Mesh], base_name: &str) -> String {
    let mut combined = String::new();
    let mut vertex_offset = 0u32;

    for (index, mesh) in meshes.iter().enumerate() {
        let object_name = format!("{}_{}", base_name, index);
        combined.push_str(&mesh_to_obj(mesh, &object_name, vertex_offset));
        vertex_offset += mesh.count_vertices() as u32;
    }

    combined
}

/// Convert a single Bevy [`Mesh`] to OBJ format text.
///
/// Emits `v`, `vt` and `vn` lines for whichever attributes the mesh
/// carries, and faces indexing all three. `vertex_offset` is added to all
/// face indices for combining multiple meshes into a single OBJ file; pass
/// `0` for a standalone mesh.
pub fn mesh_to_obj(mesh: &Mesh, object_name: &str, vertex_offset: u32) -> String {
    let mut obj = String::new();
    obj.push_str(&format!("o {}\n", object_name));

    let positions = positions_of(mesh);
    let uvs = uvs_of(mesh);
    let normals = normals_of(mesh);

    if let Some(positions) = positions {
        for pos in positions {
            obj.push_str(&format!("v {} {} {}\n", pos[0], pos[1], pos[2]));
        }
    }

    if let Some(uvs) = uvs {
        for uv in uvs {
            obj.push_str(&format!("vt {} {}\n", uv[0], uv[1]));
        }
    }

    if let Some(normals) = normals {
        for norm in normals {
            obj.push_str(&format!("vn {} {} {}\n", norm[0], norm[1], norm[2]));
        }
    }

    let has_uvs = uvs.is_some();
    let has_normals = normals.is_some();
    let face_ref = |index: u32| -> String {
        let i = index + 1 + vertex_offset;
        match (has_uvs, has_normals) {
            (true, true) => format!("{}/{}/{}", i, i, i),
            (true, false) => format!("{}/{}", i, i),
            (false, true) => format!("{}//{}", i, i),
            (false, false) => format!("{}", i),
        }
    };

    if let Some(indices) = mesh.indices() {
        let mut push_face = |a: u32, b: u32, c: u32| {
            obj.push_str(&format!(
                "f {} {} {}\n",
                face_ref(a),
                face_ref(b),
                face_ref(c)
            ));
        };
        match indices {
            Indices::U16(idx) => {
                for tri in idx.chunks(3) {
                    if tri.len() == 3 {
                        push_face(tri[0] as u32, tri[1] as u32, tri[2] as u32);
                    }
                }
            }
            Indices::U32(idx) => {
                for tri in idx.chunks(3) {
                    if tri.len() == 3 {
                        push_face(tri[0], tri[1], tri[2]);
                    }
                }
            }
        }
    }

    obj
}

// ---------------------------------------------------------------------------
// GLB (Binary glTF 2.0) Export
// ---------------------------------------------------------------------------

/// Convert a single tree mesh to GLB (binary glTF 2.0) format.
pub fn mesh_to_glb(mesh: &Mesh) -> Vec<u8> {
    meshes_to_glb(std::slice::from_ref(mesh))
}

/// Convert several tree meshes to one GLB (binary glTF 2.0) file.
///
/// Each mesh becomes its own glTF mesh and node under a single scene.
/// Exports POSITION (with the min/max bounds glTF requires), NORMAL
/// and TEXCOORD_0 attributes plus u32 indices; no materials are written,
/// so viewers fall back to their default surface.
pub fn meshes_to_glb(meshes: &[Mesh]) -> Vec<u8> {
    let mut bin_buffer: Vec<u8> = Vec::new();
    let mut buffer_views = Vec::new();
    let mut accessors = Vec::new();
    let mut gltf_meshes = Vec::new();
    let mut gltf_nodes = Vec::new();

    for (mesh_idx, mesh) in meshes.iter().enumerate() {
        let Some(positions) = positions_of(mesh) else {
            continue;
        };
        let vertex_count = positions.len();
        if vertex_count == 0 {
            continue;
        }

        // Position bounds (required by the glTF spec for POSITION accessors)
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for pos in positions {
            for i in 0..3 {
                min[i] = min[i].min(pos[i]);
                max[i] = max[i].max(pos[i]);
            }
        }

        let mut attr_entries = Vec::new();

        // --- Positions ---
        attr_entries.push(format!("\"POSITION\":{}", accessors.len()));

        let pos_offset = bin_buffer.len();
        for pos in positions {
            bin_buffer.extend_from_slice(&pos[0].to_le_bytes());
            bin_buffer.extend_from_slice(&pos[1].to_le_bytes());
            bin_buffer.extend_from_slice(&pos[2].to_le_bytes());
        }
        let pos_length = bin_buffer.len() - pos_offset;

        buffer_views.push(format!(
            "{{\"buffer\":0,\"byteOffset\":{},\"byteLength\":{},\"target\":34962}}",
            pos_offset, pos_length
        ));
        accessors.push(format!(
            concat!(
                "{{\"bufferView\":{},\"componentType\":5126,\"count\":{},\"type\":\"VEC3\",",
                "\"min\":[{:.6},{:.6},{:.6}],\"max\":[{:.6},{:.6},{:.6}]}}"
            ),
            buffer_views.len() - 1,
            vertex_count,
            min[0],
            min[1],
            min[2],
            max[0],
            max[1],
            max[2],
        ));

        // --- Normals ---
        if let Some(normals) = normals_of(mesh) {
            attr_entries.push(format!("\"NORMAL\":{}", accessors.len()));

            let norm_offset = bin_buffer.len();
            for norm in normals {
                bin_buffer.extend_from_slice(&norm[0].to_le_bytes());
                bin_buffer.extend_from_slice(&norm[1].to_le_bytes());
                bin_buffer.extend_from_slice(&norm[2].to_le_bytes());
            }
            let norm_length = bin_buffer.len() - norm_offset;

            buffer_views.push(format!(
                "{{\"buffer\":0,\"byteOffset\":{},\"byteLength\":{},\"target\":34962}}",
                norm_offset, norm_length
            ));
            accessors.push(format!(
                "{{\"bufferView\":{},\"componentType\":5126,\"count\":{},\"type\":\"VEC3\"}}",
                buffer_views.len() - 1,
                vertex_count,
            ));
        }

        // --- Texture coordinates ---
        if let Some(uvs) = uvs_of(mesh) {
            attr_entries.push(format!("\"TEXCOORD_0\":{}", accessors.len()));

            let uv_offset = bin_buffer.len();
            for uv in uvs {
                bin_buffer.extend_from_slice(&uv[0].to_le_bytes());
                bin_buffer.extend_from_slice(&uv[1].to_le_bytes());
            }
            let uv_length = bin_buffer.len() - uv_offset;

            buffer_views.push(format!(
                "{{\"buffer\":0,\"byteOffset\":{},\"byteLength\":{},\"target\":34962}}",
                uv_offset, uv_length
            ));
            accessors.push(format!(
                "{{\"bufferView\":{},\"componentType\":5126,\"count\":{},\"type\":\"VEC2\"}}",
                buffer_views.len() - 1,
                vertex_count,
            ));
        }

        // --- Indices ---
        let mut indices_accessor_str = String::new();
        if let Some(indices) = mesh.indices() {
            indices_accessor_str = format!(",\"indices\":{}", accessors.len());

            let idx_offset = bin_buffer.len();
            let index_count = match indices {
                Indices::U16(idx) => {
                    for &i in idx {
                        bin_buffer.extend_from_slice(&(i as u32).to_le_bytes());
                    }
                    idx.len()
                }
                Indices::U32(idx) => {
                    for &i in idx {
                        bin_buffer.extend_from_slice(&i.to_le_bytes());
                    }
                    idx.len()
                }
            };
            let idx_length = bin_buffer.len() - idx_offset;

            buffer_views.push(format!(
                "{{\"buffer\":0,\"byteOffset\":{},\"byteLength\":{},\"target\":34963}}",
                idx_offset, idx_length
            ));
            accessors.push(format!(
                "{{\"bufferView\":{},\"componentType\":5125,\"count\":{},\"type\":\"SCALAR\"}}",
                buffer_views.len() - 1,
                index_count,
            ));
        }

        let attrs_json = attr_entries.join(",");
        gltf_meshes.push(format!(
            "{{\"name\":\"tree_{}\",\"primitives\":[{{\"attributes\":{{{}}}{}}}]}}",
            mesh_idx, attrs_json, indices_accessor_str
        ));

        gltf_nodes.push(format!(
            "{{\"name\":\"tree_{}\",\"mesh\":{}}}",
            mesh_idx,
            gltf_meshes.len() - 1
        ));
    }

    if gltf_nodes.is_empty() {
        return build_empty_glb();
    }

    let node_indices: String = (0..gltf_nodes.len())
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let json = format!(
        concat!(
            "{{",
            "\"asset\":{{\"version\":\"2.0\",\"generator\":\"bevy_arbor\"}},",
            "\"scene\":0,",
            "\"scenes\":[{{\"name\":\"Trees\",\"nodes\":[{}]}}],",
            "\"nodes\":[{}],",
            "\"meshes\":[{}],",
            "\"accessors\":[{}],",
            "\"bufferViews\":[{}],",
            "\"buffers\":[{{\"byteLength\":{}}}]",
            "}}"
        ),
        node_indices,
        gltf_nodes.join(","),
        gltf_meshes.join(","),
        accessors.join(","),
        buffer_views.join(","),
        bin_buffer.len(),
    );

    pack_glb(&json, &bin_buffer)
}

fn build_empty_glb() -> Vec<u8> {
    let json = r#"{"asset":{"version":"2.0","generator":"bevy_arbor"},"scene":0,"scenes":[{"name":"Empty"}]}"#;
    pack_glb(json, &[])
}

fn pack_glb(json: &str, bin_data: &[u8]) -> Vec<u8> {
    let json_bytes = json.as_bytes();
    let json_padded_len = (json_bytes.len() + 3) & !3;
    let bin_padded_len = (bin_data.len() + 3) & !3;

    let has_bin = !bin_data.is_empty();
    let bin_chunk_size = if has_bin { 8 + bin_padded_len } else { 0 };
    let total_length = 12 + 8 + json_padded_len + bin_chunk_size;

    let mut glb = Vec::with_capacity(total_length);

    // GLB Header
    glb.extend_from_slice(&0x46546C67u32.to_le_bytes()); // magic "glTF"
    glb.extend_from_slice(&2u32.to_le_bytes()); // version
    glb.extend_from_slice(&(total_length as u32).to_le_bytes());

    // JSON Chunk
    glb.extend_from_slice(&(json_padded_len as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes()); // "JSON"
    glb.extend_from_slice(json_bytes);
    glb.resize(glb.len() + json_padded_len - json_bytes.len(), b' ');

    // BIN Chunk
    if has_bin {
        glb.extend_from_slice(&(bin_padded_len as u32).to_le_bytes());
        glb.extend_from_slice(&0x004E4942u32.to_le_bytes()); // "BIN\0"
        glb.extend_from_slice(bin_data);
        glb.resize(glb.len() + bin_padded_len - bin_data.len(), 0);
    }

    glb
}
