//! Built-in WGSL programs.
//!
//! A complete program is the shared Phong prelude (bindings, `VertexOutput`,
//! `phong_vertex_output`, `attenuation`) followed by one vertex stage defining
//! `vs` and one fragment stage defining `fs`.

/// Bindings and helpers shared by every stage.
pub const PHONG_PRELUDE: &str = include_str!("shaders/phong_prelude.wgsl");
/// Stock Phong vertex stage.
pub const PHONG_VERTEX: &str = include_str!("shaders/phong_vertex.wgsl");
/// Stock Phong fragment stage.
pub const PHONG_FRAGMENT: &str = include_str!("shaders/phong_fragment.wgsl");
/// Phong vertex stage displaced by the per-vertex `offset` attribute.
pub const OFFSET_VERTEX: &str = include_str!("shaders/offset_vertex.wgsl");

pub const VERTEX_ENTRY: &str = "vs";
pub const FRAGMENT_ENTRY: &str = "fs";

/// Concatenates the prelude with a vertex and a fragment stage.
pub fn assemble(vertex: &str, fragment: &str) -> String {
    let mut source = String::with_capacity(PHONG_PRELUDE.len() + vertex.len() + fragment.len() + 2);
    source.push_str(PHONG_PRELUDE);
    source.push('\n');
    source.push_str(vertex);
    source.push('\n');
    source.push_str(fragment);
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembled_program_has_both_entry_points() {
        let source = assemble(PHONG_VERTEX, PHONG_FRAGMENT);
        assert!(source.starts_with(PHONG_PRELUDE));
        assert!(source.contains("fn vs("));
        assert!(source.contains("fn fs("));
    }

    fn validate(source: &str) -> Result<naga::valid::ModuleInfo, String> {
        let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .map_err(|e| format!("{e:?}"))
    }

    #[test]
    fn stock_program_validates() {
        if let Err(e) = validate(&assemble(PHONG_VERTEX, PHONG_FRAGMENT)) {
            panic!("stock program is invalid WGSL: {e}");
        }
    }

    #[test]
    fn offset_program_validates() {
        if let Err(e) = validate(&assemble(OFFSET_VERTEX, PHONG_FRAGMENT)) {
            panic!("offset program is invalid WGSL: {e}");
        }
    }

    #[test]
    fn broken_vertex_stage_is_rejected() {
        let broken = "@vertex\nfn vs(in: VertexInput) -> VertexOutput {\n    return phong_vertex_output(in.position * material.tyme, in.normal, in.uv);\n}\n";
        assert!(validate(&assemble(broken, PHONG_FRAGMENT)).is_err());
    }

    #[test]
    fn offset_program_reads_location_three_and_time() {
        assert!(OFFSET_VERTEX.contains("@location(3) offset: f32"));
        assert!(OFFSET_VERTEX.contains("material.time"));
        assert!(!PHONG_VERTEX.contains("@location(3)"));
    }
}
