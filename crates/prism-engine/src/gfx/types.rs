use std::fmt;

/// Buffer usage hint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times.
    StaticDraw,
}

impl BufferUsage {
    pub(crate) fn to_wgpu(self) -> wgpu::BufferUsages {
        match self {
            BufferUsage::StaticDraw => wgpu::BufferUsages::VERTEX,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveTopology {
    /// Every three vertices form one triangle.
    Triangles,
}

impl PrimitiveTopology {
    pub(crate) fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            PrimitiveTopology::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// One float attribute read from the vertex array's buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components, 1 to 4.
    pub components: u8,
    /// Byte offset inside one vertex.
    pub offset: u64,
}

impl VertexAttribute {
    #[inline]
    pub const fn float(location: u32, components: u8) -> Self {
        Self {
            location,
            components,
            offset: 0,
        }
    }

    #[inline]
    pub const fn with_offset(self, offset: u64) -> Self {
        Self { offset, ..self }
    }

    #[inline]
    pub const fn size(self) -> u64 {
        self.components as u64 * std::mem::size_of::<f32>() as u64
    }

    pub(crate) fn format(self) -> Option<wgpu::VertexFormat> {
        match self.components {
            1 => Some(wgpu::VertexFormat::Float32),
            2 => Some(wgpu::VertexFormat::Float32x2),
            3 => Some(wgpu::VertexFormat::Float32x3),
            4 => Some(wgpu::VertexFormat::Float32x4),
            _ => None,
        }
    }
}

/// Attribute layout of a single interleaved vertex buffer.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VertexLayout {
    /// Bytes between consecutive vertices; `0` means tightly packed.
    pub stride: u64,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Tightly packed layout: no stride, attributes laid out back to back.
    pub fn packed(attributes: impl IntoIterator<Item = VertexAttribute>) -> Self {
        let mut offset = 0;
        let attributes = attributes
            .into_iter()
            .map(|a| {
                let a = a.with_offset(offset);
                offset += a.size();
                a
            })
            .collect();
        Self {
            stride: 0,
            attributes,
        }
    }

    /// Stride in bytes, resolving `0` to the packed size.
    pub fn effective_stride(&self) -> u64 {
        if self.stride != 0 {
            return self.stride;
        }
        self.attributes
            .iter()
            .map(|a| a.offset + a.size())
            .max()
            .unwrap_or(0)
    }

    /// Checks component counts, duplicate locations and offsets against the stride.
    pub fn validate(&self) -> Result<(), String> {
        if self.attributes.is_empty() {
            return Err("no attributes".to_string());
        }
        let stride = self.effective_stride();
        for (i, a) in self.attributes.iter().enumerate() {
            if a.format().is_none() {
                return Err(format!(
                    "attribute {} has {} components (expected 1..=4)",
                    a.location, a.components
                ));
            }
            if a.offset + a.size() > stride {
                return Err(format!(
                    "attribute {} ends at byte {} past stride {stride}",
                    a.location,
                    a.offset + a.size()
                ));
            }
            if self.attributes[..i].iter().any(|b| b.location == a.location) {
                return Err(format!("location {} bound twice", a.location));
            }
        }
        Ok(())
    }

    pub(crate) fn wgpu_attributes(&self) -> Vec<wgpu::VertexAttribute> {
        self.attributes
            .iter()
            .filter_map(|a| {
                a.format().map(|format| wgpu::VertexAttribute {
                    format,
                    offset: a.offset,
                    shader_location: a.location,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── stride ────────────────────────────────────────────────────────────

    #[test]
    fn packed_single_vec3_is_twelve_bytes() {
        let l = VertexLayout::packed([VertexAttribute::float(0, 3)]);
        assert_eq!(l.effective_stride(), 12);
        assert_eq!(l.attributes[0].offset, 0);
    }

    #[test]
    fn packed_assigns_consecutive_offsets() {
        let l = VertexLayout::packed([VertexAttribute::float(0, 3), VertexAttribute::float(1, 2)]);
        assert_eq!(l.attributes[1].offset, 12);
        assert_eq!(l.effective_stride(), 20);
    }

    #[test]
    fn explicit_stride_wins() {
        let l = VertexLayout {
            stride: 32,
            attributes: vec![VertexAttribute::float(0, 3)],
        };
        assert_eq!(l.effective_stride(), 32);
    }

    // ── validate ──────────────────────────────────────────────────────────

    #[test]
    fn rejects_five_components() {
        let l = VertexLayout::packed([VertexAttribute::float(0, 5)]);
        assert!(l.validate().is_err());
    }

    #[test]
    fn rejects_attribute_past_stride() {
        let l = VertexLayout {
            stride: 8,
            attributes: vec![VertexAttribute::float(0, 3)],
        };
        assert!(l.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_location() {
        let l = VertexLayout::packed([VertexAttribute::float(0, 2), VertexAttribute::float(0, 2)]);
        assert!(l.validate().is_err());
    }

    #[test]
    fn rejects_empty_layout() {
        assert!(VertexLayout::packed(Vec::new()).validate().is_err());
    }

    // ── wgpu mapping ──────────────────────────────────────────────────────

    #[test]
    fn triangles_map_to_triangle_list() {
        assert_eq!(
            PrimitiveTopology::Triangles.to_wgpu(),
            wgpu::PrimitiveTopology::TriangleList
        );
    }

    #[test]
    fn static_draw_is_a_plain_vertex_buffer() {
        assert_eq!(BufferUsage::StaticDraw.to_wgpu(), wgpu::BufferUsages::VERTEX);
    }
}
