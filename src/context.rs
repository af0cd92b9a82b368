//! The draw context: the pipeline driver that owns the caller's array
//! pointers, the fixed-capacity vertex/color buffers, the viewport, and the
//! user vertex transform hook, and turns a `draw_array` call into `plot`
//! calls on a host sink.

use crate::clip::{clip_point, clip_triangle, MAX_CLIPPED_TRIANGLE_VERTS};
use crate::color::Color15;
use crate::fixed::Fixed;
use crate::raster::Plot;
use crate::vector::{Vec2, Vec3, Vec4};

/// What a `draw_array` call assembles its vertices into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DrawKind {
    Points,
    Lines,
    Triangles,
}

impl DrawKind {
    /// Vertices consumed per primitive (and the divisor `count` must be a
    /// multiple of): 1 for points, 2 for lines, 3 for triangles.
    const fn verts_per_primitive(self) -> usize {
        match self {
            DrawKind::Points => 1,
            DrawKind::Lines => 2,
            DrawKind::Triangles => 3,
        }
    }
}

/// A non-owning vertex array: either 2- or 3-component packed `Fixed`
/// values, `componentCount` floats per vertex.
#[derive(Clone, Copy)]
pub enum VertexSlice<'a> {
    Vec2(&'a [Vec2]),
    Vec3(&'a [Vec3]),
}

/// The user-supplied per-vertex shader: maps a mutable clip-space vector to
/// itself. Invoked once per pre-clip vertex before clipping.
pub trait VertexTransform {
    fn apply(&mut self, v: &mut Vec4);
}

impl<F: FnMut(&mut Vec4)> VertexTransform for F {
    fn apply(&mut self, v: &mut Vec4) {
        self(v)
    }
}

/// Fixed-capacity draw context. `MAX_VERTS` bounds the pre-clip and
/// post-clip vertex/color buffers; exceeding it is a contract violation
/// (debug-asserted, never a hard error — see §7's no-fail-returns policy).
pub struct DrawContext<'a, const MAX_VERTS: usize> {
    view_width: i32,
    view_height: i32,

    vertices: Option<VertexSlice<'a>>,
    colors: Option<&'a [Color15]>,

    vertex_function: Option<&'a mut dyn VertexTransform>,

    pre_clip_verts: [Vec4; MAX_VERTS],
    pre_clip_verts_len: usize,
    pre_clip_colors: [Color15; MAX_VERTS],
    pre_clip_colors_len: usize,

    post_clip_verts: [Vec4; MAX_VERTS],
    post_clip_verts_len: usize,
    post_clip_colors: [Color15; MAX_VERTS],
    post_clip_colors_len: usize,

    draw_kind: DrawKind,
}

impl<'a, const MAX_VERTS: usize> DrawContext<'a, MAX_VERTS> {
    pub fn new() -> Self {
        Self {
            view_width: 0,
            view_height: 0,
            vertices: None,
            colors: None,
            vertex_function: None,
            pre_clip_verts: [Vec4::ZERO; MAX_VERTS],
            pre_clip_verts_len: 0,
            pre_clip_colors: [Color15::BLACK; MAX_VERTS],
            pre_clip_colors_len: 0,
            post_clip_verts: [Vec4::ZERO; MAX_VERTS],
            post_clip_verts_len: 0,
            post_clip_colors: [Color15::BLACK; MAX_VERTS],
            post_clip_colors_len: 0,
            draw_kind: DrawKind::Points,
        }
    }

    pub fn set_vertex_pointer(&mut self, vertices: VertexSlice<'a>) {
        self.vertices = Some(vertices);
    }

    /// One color per primitive: one per vertex for `Points`, one per two
    /// vertices for `Lines`, one per three vertices for `Triangles`.
    pub fn set_color_pointer(&mut self, colors: &'a [Color15]) {
        self.colors = Some(colors);
    }

    pub fn set_viewport(&mut self, w: i32, h: i32) {
        self.view_width = w;
        self.view_height = h;
    }

    pub fn set_vertex_function(&mut self, f: &'a mut dyn VertexTransform) {
        self.vertex_function = Some(f);
    }

    /// Draws `count` vertices starting at `first` as `kind` primitives.
    /// No-ops if the vertex or color pointer is unset (§7).
    pub fn draw_array<P: Plot>(&mut self, plot: &mut P, kind: DrawKind, first: usize, count: usize) {
        let (Some(vertices), Some(colors)) = (self.vertices, self.colors) else {
            return;
        };

        self.pre_clip_verts_len = 0;
        self.pre_clip_colors_len = 0;
        self.post_clip_verts_len = 0;
        self.post_clip_colors_len = 0;
        self.draw_kind = kind;

        debug_assert!(count <= MAX_VERTS, "draw_array count exceeds MAX_VERTS capacity");

        match vertices {
            VertexSlice::Vec2(verts) => {
                for i in first..first + count {
                    self.pre_clip_verts[self.pre_clip_verts_len] = Vec4::from_vec2(verts[i]);
                    self.pre_clip_verts_len += 1;
                }
            }
            VertexSlice::Vec3(verts) => {
                for i in first..first + count {
                    self.pre_clip_verts[self.pre_clip_verts_len] = Vec4::from_vec3(verts[i]);
                    self.pre_clip_verts_len += 1;
                }
            }
        }

        let primitive_count = count / kind.verts_per_primitive();
        for i in 0..primitive_count {
            self.pre_clip_colors[self.pre_clip_colors_len] = colors[first / kind.verts_per_primitive() + i];
            self.pre_clip_colors_len += 1;
        }

        self.vertex_pipeline(plot);
    }

    fn vertex_pipeline<P: Plot>(&mut self, plot: &mut P) {
        let mut clipped: [Vec4; MAX_CLIPPED_TRIANGLE_VERTS] = [Vec4::ZERO; MAX_CLIPPED_TRIANGLE_VERTS];

        // 1. Vertex shader stage: apply the user transform in place.
        if let Some(vertex_function) = self.vertex_function.as_deref_mut() {
            for i in 0..self.pre_clip_verts_len {
                vertex_function.apply(&mut self.pre_clip_verts[i]);
            }
        }

        // 2. Assemble & clip per primitive kind.
        match self.draw_kind {
            DrawKind::Points => {
                for i in 0..self.pre_clip_verts_len {
                    if clip_point(self.pre_clip_verts[i]) {
                        self.post_clip_verts[self.post_clip_verts_len] = self.pre_clip_verts[i];
                        self.post_clip_verts_len += 1;
                        self.post_clip_colors[self.post_clip_colors_len] = self.pre_clip_colors[i];
                        self.post_clip_colors_len += 1;
                    }
                }
            }
            DrawKind::Lines => {
                // Endpoint-culling pass-through: a line survives iff both
                // endpoints are inside the clip volume (full homogeneous
                // line clipping is optional for this core per spec §4.F).
                let mut i = 0;
                while i + 1 < self.pre_clip_verts_len {
                    if clip_point(self.pre_clip_verts[i]) && clip_point(self.pre_clip_verts[i + 1]) {
                        self.post_clip_verts[self.post_clip_verts_len] = self.pre_clip_verts[i];
                        self.post_clip_verts[self.post_clip_verts_len + 1] = self.pre_clip_verts[i + 1];
                        self.post_clip_verts_len += 2;
                        self.post_clip_colors[self.post_clip_colors_len] = self.pre_clip_colors[i / 2];
                        self.post_clip_colors_len += 1;
                    }
                    i += 2;
                }
            }
            DrawKind::Triangles => {
                let mut i = 0;
                while i + 2 < self.pre_clip_verts_len {
                    let col = self.pre_clip_colors[i / 3];

                    let out_count = clip_triangle(
                        self.pre_clip_verts[i],
                        self.pre_clip_verts[i + 1],
                        self.pre_clip_verts[i + 2],
                        &mut clipped,
                    );

                    for ci in 0..out_count / 3 {
                        self.post_clip_colors[self.post_clip_colors_len + ci] = col;
                    }
                    self.post_clip_colors_len += out_count / 3;

                    for v in 0..out_count {
                        self.post_clip_verts[self.post_clip_verts_len + v] = clipped[v];
                    }
                    self.post_clip_verts_len += out_count;

                    i += 3;
                }
            }
        }

        // 3. Perspective divide on every post-clip vertex, regardless of
        // kind (not just triangles).
        for i in 0..self.post_clip_verts_len {
            let v = &mut self.post_clip_verts[i];
            v.x = v.x / v.w;
            v.y = v.y / v.w;
            v.z = v.z / v.w;
        }

        // 4. Viewport transform: NDC -> window coordinates.
        let half_w = Fixed::from_int(self.view_width) * Fixed::HALF;
        let half_h = Fixed::from_int(self.view_height) * Fixed::HALF;
        for i in 0..self.post_clip_verts_len {
            let v = &mut self.post_clip_verts[i];
            v.x = half_w * v.x + half_w;
            v.y = -(half_h * v.y) + half_h;
            v.z = Fixed::HALF * v.z + Fixed::HALF;
        }

        // 5. Rasterize per kind.
        match self.draw_kind {
            DrawKind::Points => {
                for i in 0..self.post_clip_verts_len {
                    let v = self.post_clip_verts[i];
                    plot.plot(v.x.to_int(), v.y.to_int(), self.post_clip_colors[i]);
                }
            }
            DrawKind::Lines => {
                let mut i = 0;
                let mut li = 0;
                while i + 1 < self.post_clip_verts_len {
                    let a = self.post_clip_verts[i];
                    let b = self.post_clip_verts[i + 1];
                    plot.line(a.x.to_int(), a.y.to_int(), b.x.to_int(), b.y.to_int(), self.post_clip_colors[li]);
                    i += 2;
                    li += 1;
                }
            }
            DrawKind::Triangles => {
                let mut l = 0;
                while l + 2 < self.post_clip_verts_len {
                    let v0 = self.post_clip_verts[l];
                    let v1 = self.post_clip_verts[l + 1];
                    let v2 = self.post_clip_verts[l + 2];

                    if front_facing(
                        Vec2::new(v0.x, v0.y),
                        Vec2::new(v1.x, v1.y),
                        Vec2::new(v2.x, v2.y),
                    ) {
                        plot.triangle(
                            v0.x.to_int(),
                            v0.y.to_int(),
                            v1.x.to_int(),
                            v1.y.to_int(),
                            v2.x.to_int(),
                            v2.y.to_int(),
                            self.post_clip_colors[l / 3],
                        );
                    }

                    l += 3;
                }
            }
        }
    }
}

impl<'a, const MAX_VERTS: usize> Default for DrawContext<'a, MAX_VERTS> {
    fn default() -> Self {
        Self::new()
    }
}

/// A triangle is front-facing iff its 2-D signed area is negative.
#[inline]
pub fn front_facing(v0: Vec2, v1: Vec2, v2: Vec2) -> bool {
    (v1.x - v0.x) * (v2.y - v0.y) - (v2.x - v0.x) * (v1.y - v0.y) < Fixed::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        calls: Vec<(i32, i32, Color15)>,
    }

    impl Recorder {
        fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl Plot for Recorder {
        fn plot(&mut self, x: i32, y: i32, color: Color15) {
            self.calls.push((x, y, color));
        }
    }

    fn fx(v: f32) -> Fixed {
        Fixed::from_f32(v)
    }

    #[test]
    fn draw_array_no_ops_without_pointers() {
        let mut ctx: DrawContext<16> = DrawContext::new();
        let mut r = Recorder::new();
        ctx.draw_array(&mut r, DrawKind::Points, 0, 1);
        assert!(r.calls.is_empty());
    }

    #[test]
    fn single_point_plots_at_viewport_center_when_identity() {
        let verts = [Vec3::new(fx(0.0), fx(0.0), fx(0.0))];
        let colors = [Color15::from_rgb888(255, 0, 0)];

        let mut ctx: DrawContext<8> = DrawContext::new();
        ctx.set_vertex_pointer(VertexSlice::Vec3(&verts));
        ctx.set_color_pointer(&colors);
        ctx.set_viewport(240, 160);

        let mut r = Recorder::new();
        ctx.draw_array(&mut r, DrawKind::Points, 0, 1);

        assert_eq!(r.calls.len(), 1);
        assert_eq!((r.calls[0].0, r.calls[0].1), (120, 80));
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        // Clockwise winding in clip space (y-up) becomes counter-clockwise
        // once the viewport transform flips y for pixel space -> culled.
        let verts = [
            Vec3::new(fx(-0.5), fx(0.5), fx(0.0)),
            Vec3::new(fx(0.5), fx(0.5), fx(0.0)),
            Vec3::new(fx(0.0), fx(-0.5), fx(0.0)),
        ];
        let colors = [Color15::WHITE];

        let mut ctx: DrawContext<8> = DrawContext::new();
        ctx.set_vertex_pointer(VertexSlice::Vec3(&verts));
        ctx.set_color_pointer(&colors);
        ctx.set_viewport(100, 100);

        let mut r = Recorder::new();
        ctx.draw_array(&mut r, DrawKind::Triangles, 0, 3);

        assert!(r.calls.is_empty());
    }

    #[test]
    fn front_facing_triangle_is_drawn() {
        // Counter-clockwise winding in clip space (y-up) becomes clockwise
        // in pixel space -> front-facing, drawn.
        let verts = [
            Vec3::new(fx(-0.5), fx(-0.5), fx(0.0)),
            Vec3::new(fx(0.5), fx(-0.5), fx(0.0)),
            Vec3::new(fx(0.0), fx(0.5), fx(0.0)),
        ];
        let colors = [Color15::WHITE];

        let mut ctx: DrawContext<8> = DrawContext::new();
        ctx.set_vertex_pointer(VertexSlice::Vec3(&verts));
        ctx.set_color_pointer(&colors);
        ctx.set_viewport(100, 100);

        let mut r = Recorder::new();
        ctx.draw_array(&mut r, DrawKind::Triangles, 0, 3);

        assert!(!r.calls.is_empty());
    }

    #[test]
    fn front_facing_matches_sign_convention() {
        let ccw_in_math_but_negative_area = (
            Vec2::new(fx(0.0), fx(0.0)),
            Vec2::new(fx(1.0), fx(0.0)),
            Vec2::new(fx(0.0), fx(1.0)),
        );
        // (1-0)(1-0) - (0-0)(0-0) = 1 >= 0 -> not front-facing by this sign
        // convention (pixel-space y grows downward).
        assert!(!front_facing(
            ccw_in_math_but_negative_area.0,
            ccw_in_math_but_negative_area.1,
            ccw_in_math_but_negative_area.2
        ));
    }
}
