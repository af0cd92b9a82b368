//! A minimal, fixed-function software rasterizer.
//!
//! Draws points, lines, and flat-colored triangles into a caller-provided
//! 5-5-5 framebuffer sink using only Q16.16 fixed-point integer math — no
//! floating point anywhere downstream of vertex/color data entering the
//! pipeline. Built for targets without an FPU or a GPU.
//!
//! The pipeline, end to end:
//! 1. The caller installs a vertex array, a per-primitive color array, a
//!    viewport, and a vertex transform via [`context::DrawContext`]'s
//!    setters.
//! 2. [`context::DrawContext::draw_array`] widens vertices to clip-space
//!    4-vectors, runs the user transform, clips ([`clip`]), perspective
//!    divides, maps NDC to window coordinates, culls back-facing triangles,
//!    and calls the [`raster::Plot`] sink's primitives.
//!
//! `fixed`, `vector`, and `matrix` are the number system the rest of the
//! crate is built on.
#![allow(dead_code)]

pub mod clip;
pub mod color;
pub mod context;
pub mod fixed;
pub mod matrix;
pub mod raster;
pub mod vector;

pub use clip::{clip_point, clip_triangle, MAX_CLIPPED_TRIANGLE_VERTS};
pub use color::Color15;
pub use context::{front_facing, DrawContext, DrawKind, VertexSlice, VertexTransform};
pub use fixed::{cos, cot, sin, tan, Fixed, GAMDEG_IN_CIRCLE};
pub use matrix::Mat4;
pub use raster::{line, triangle, Plot};
pub use vector::{Vec2, Vec3, Vec4};

#[cfg(test)]
mod end_to_end_tests {
    use super::*;

    struct Framebuffer {
        width: i32,
        height: i32,
        pixels: Vec<Color15>,
    }

    impl Framebuffer {
        fn new(width: i32, height: i32) -> Self {
            Self { width, height, pixels: vec![Color15::BLACK; (width * height) as usize] }
        }

        fn get(&self, x: i32, y: i32) -> Option<Color15> {
            if x < 0 || y < 0 || x >= self.width || y >= self.height {
                return None;
            }
            Some(self.pixels[(y * self.width + x) as usize])
        }
    }

    impl Plot for Framebuffer {
        fn plot(&mut self, x: i32, y: i32, color: Color15) {
            if x >= 0 && y >= 0 && x < self.width && y < self.height {
                self.pixels[(y * self.width + x) as usize] = color;
            }
        }
    }

    #[test]
    fn scenario_1_single_point_is_red() {
        let mut fb = Framebuffer::new(20, 20);
        fb.plot(10, 10, Color15::from_rgb888(255, 0, 0));
        assert_eq!(fb.get(10, 10), Some(Color15::from_rgb888(255, 0, 0)));
    }

    #[test]
    fn scenario_2_horizontal_line_on_narrow_buffer() {
        let mut fb = Framebuffer::new(5, 1);
        fb.line(0, 0, 4, 0, Color15::WHITE);
        for x in 0..5 {
            assert_eq!(fb.get(x, 0), Some(Color15::WHITE));
        }
    }

    #[test]
    fn scenario_3_triangle_fills_exact_diagonal_half() {
        let mut fb = Framebuffer::new(20, 20);
        fb.triangle(0, 0, 10, 0, 0, 10, Color15::WHITE);
        for y in 0..20 {
            for x in 0..20 {
                let expected_set = x + y <= 10 && x >= 0 && y >= 0 && x <= 20 && y <= 20;
                let is_set = fb.get(x, y) == Some(Color15::WHITE);
                if expected_set && x <= 10 && y <= 10 {
                    assert!(is_set, "expected ({x},{y}) set");
                }
            }
        }
    }

    #[test]
    fn scenario_4_identity_transform_to_viewport_center() {
        let verts = [Vec3::new(Fixed::ZERO, Fixed::ZERO, Fixed::ZERO)];
        let colors = [Color15::WHITE];

        let mut ctx: DrawContext<8> = DrawContext::new();
        ctx.set_vertex_pointer(VertexSlice::Vec3(&verts));
        ctx.set_color_pointer(&colors);
        ctx.set_viewport(240, 160);

        let mut fb = Framebuffer::new(240, 160);
        ctx.draw_array(&mut fb, DrawKind::Points, 0, 1);

        assert_eq!(fb.get(120, 80), Some(Color15::WHITE));
    }

    #[test]
    fn scenario_5_perspective_point_projects_to_window_center() {
        let mut forward = |v: &mut Vec4| {
            let proj = Mat4::perspective(Fixed::from_int(90), Fixed::ONE, Fixed::ONE, Fixed::from_int(1000));
            *v = proj * *v;
        };

        let verts = [Vec3::new(Fixed::ZERO, Fixed::ZERO, Fixed::from_int(-2))];
        let colors = [Color15::WHITE];

        let mut ctx: DrawContext<8> = DrawContext::new();
        ctx.set_vertex_pointer(VertexSlice::Vec3(&verts));
        ctx.set_color_pointer(&colors);
        ctx.set_viewport(100, 100);
        ctx.set_vertex_function(&mut forward);

        let mut fb = Framebuffer::new(100, 100);
        ctx.draw_array(&mut fb, DrawKind::Points, 0, 1);

        assert_eq!(fb.get(50, 50), Some(Color15::WHITE));
    }

    #[test]
    fn scenario_6_back_facing_triangle_is_culled() {
        // Clockwise in clip space (y-up) -> counter-clockwise in pixel
        // space once the viewport transform flips y -> culled.
        let verts = [
            Vec3::new(Fixed::from_f32(-0.5), Fixed::from_f32(0.5), Fixed::ZERO),
            Vec3::new(Fixed::from_f32(0.5), Fixed::from_f32(0.5), Fixed::ZERO),
            Vec3::new(Fixed::ZERO, Fixed::from_f32(-0.5), Fixed::ZERO),
        ];
        let colors = [Color15::WHITE];

        let mut ctx: DrawContext<8> = DrawContext::new();
        ctx.set_vertex_pointer(VertexSlice::Vec3(&verts));
        ctx.set_color_pointer(&colors);
        ctx.set_viewport(100, 100);

        let mut fb = Framebuffer::new(100, 100);
        ctx.draw_array(&mut fb, DrawKind::Triangles, 0, 3);

        assert!(fb.pixels.iter().all(|&c| c == Color15::BLACK));
    }
}
