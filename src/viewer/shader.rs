//! WGSL sources for the viewer's two pipelines.
//!
//! Ornaments render as camera-facing sprites shaded into soft spheres;
//! photos render as textured quads with a gold frame drawn in the
//! fragment shader. Both share one uniform block with separate view and
//! projection matrices (billboarding happens in view space).

/// Shared uniforms + instanced sprite pipeline for ornaments.
pub const ORNAMENT_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    time: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) instance_pos: vec3<f32>,
    @location(1) instance_scale: f32,
    @location(2) instance_color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[vertex_index];

    // Expand the sprite in view space so it scales with distance.
    var view_pos = uniforms.view * vec4<f32>(instance_pos, 1.0);
    view_pos = vec4<f32>(view_pos.xy + corner * instance_scale, view_pos.z, view_pos.w);

    var out: VertexOutput;
    out.clip_position = uniforms.proj * view_pos;
    out.color = instance_color;
    out.uv = corner;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    // Soft sphere shading: bright center, dark rim, feathered edge.
    let shade = 1.0 - smoothstep(0.2, 1.0, dist) * 0.6;
    let alpha = (1.0 - smoothstep(0.8, 1.0, dist)) * in.color.a;
    return vec4<f32>(in.color.rgb * shade, alpha);
}
"#;

/// Textured framed-quad pipeline for photos.
///
/// The quad spans ±0.55; the inner ±0.5 shows the photo and the rim
/// renders as a metallic gold frame.
pub const PHOTO_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    time: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var photo_texture: texture_2d<f32>;
@group(1) @binding(1)
var photo_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tint: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) model_0: vec4<f32>,
    @location(1) model_1: vec4<f32>,
    @location(2) model_2: vec4<f32>,
    @location(3) model_3: vec4<f32>,
    @location(4) tint: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-0.55, -0.55),
        vec2<f32>( 0.55, -0.55),
        vec2<f32>(-0.55,  0.55),
        vec2<f32>(-0.55,  0.55),
        vec2<f32>( 0.55, -0.55),
        vec2<f32>( 0.55,  0.55),
    );

    let corner = quad_vertices[vertex_index];
    let model = mat4x4<f32>(model_0, model_1, model_2, model_3);
    let world = model * vec4<f32>(corner, 0.0, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.proj * uniforms.view * world;
    out.tint = tint;
    // Photo occupies [0,1]x[0,1]; the rim falls outside and becomes frame.
    out.uv = vec2<f32>(corner.x + 0.5, 0.5 - corner.y);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Sample before branching; texture reads need uniform control flow.
    let sample = textureSample(photo_texture, photo_sampler, clamp(in.uv, vec2<f32>(0.0), vec2<f32>(1.0)));
    let outside = max(max(-in.uv.x, in.uv.x - 1.0), max(-in.uv.y, in.uv.y - 1.0));
    if outside > 0.0 {
        // Gold frame around the print.
        return vec4<f32>(1.0, 0.843, 0.0, in.tint.a);
    }
    return vec4<f32>(sample.rgb * in.tint.rgb, sample.a * in.tint.a);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ornament_shader_parses() {
        naga::front::wgsl::parse_str(ORNAMENT_SHADER).expect("ornament WGSL must be valid");
    }

    #[test]
    fn photo_shader_parses() {
        naga::front::wgsl::parse_str(PHOTO_SHADER).expect("photo WGSL must be valid");
    }
}
