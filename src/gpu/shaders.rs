//! WGSL sources for the circle and line pipelines.
//!
//! Both pipelines draw one instanced quad (6 vertices) per primitive and
//! share the viewport uniform that maps logical pixels to clip space.

const VIEWPORT: &str = r#"
struct Viewport {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> viewport: Viewport;

// Logical pixels (origin top-left, y down) to clip space.
fn to_clip(p: vec2<f32>) -> vec4<f32> {
    let ndc = p / viewport.size * 2.0 - vec2<f32>(1.0, 1.0);
    return vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
}
"#;

const CIRCLE: &str = r#"
struct CircleOut {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_circle(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color: vec4<f32>,
) -> CircleOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    // One extra pixel around the disc for the anti-aliased rim.
    let local = corners[vertex_index] * (radius + 1.0);

    var out: CircleOut;
    out.clip_position = to_clip(center + local);
    out.local = local;
    out.radius = radius;
    out.color = color;
    return out;
}

@fragment
fn fs_circle(in: CircleOut) -> @location(0) vec4<f32> {
    let dist = length(in.local);
    let coverage = clamp(in.radius - dist + 0.5, 0.0, 1.0);
    if coverage <= 0.0 {
        discard;
    }
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;

const LINE: &str = r#"
struct LineOut {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) p0: vec2<f32>,
    @location(1) p1: vec2<f32>,
    @location(2) width: f32,
    @location(3) color: vec4<f32>,
) -> LineOut {
    // x: position along the segment, y: side of the centerline.
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(0.0, -1.0),
        vec2<f32>(0.0,  1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(0.0,  1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0,  1.0),
    );
    let corner = corners[vertex_index];

    let delta = p1 - p0;
    let len = length(delta);
    var dir = vec2<f32>(1.0, 0.0);
    if len > 0.0001 {
        dir = delta / len;
    }

    // Hairlines are drawn one pixel wide and faded by their true width.
    let drawn_width = max(width, 1.0);
    let normal = vec2<f32>(-dir.y, dir.x) * drawn_width * 0.5;
    let pos = mix(p0, p1, corner.x) + normal * corner.y;

    var out: LineOut;
    out.clip_position = to_clip(pos);
    out.color = vec4<f32>(color.rgb, color.a * min(width, 1.0));
    return out;
}

@fragment
fn fs_line(in: LineOut) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Circle pipeline shader (`vs_circle` / `fs_circle`).
pub fn circle_shader() -> String {
    format!("{VIEWPORT}{CIRCLE}")
}

/// Line pipeline shader (`vs_line` / `fs_line`).
pub fn line_shader() -> String {
    format!("{VIEWPORT}{LINE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_circle_shader_valid() {
        let shader = circle_shader();
        assert!(shader.contains("fn vs_circle"));
        assert!(shader.contains("fn fs_circle"));
        validate_wgsl(&shader).expect("circle shader should be valid");
    }

    #[test]
    fn test_line_shader_valid() {
        let shader = line_shader();
        assert!(shader.contains("fn vs_line"));
        assert!(shader.contains("fn fs_line"));
        validate_wgsl(&shader).expect("line shader should be valid");
    }
}
