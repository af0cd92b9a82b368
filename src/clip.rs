//! Homogeneous clipping: Sutherland–Hodgman against the six standard clip
//! planes, followed by fan triangulation of the resulting convex polygon.

use crate::fixed::Fixed;
use crate::vector::Vec4;

/// Maximum vertices a triangle can expand into after clipping against all
/// six planes (ping-pong buffer capacity).
const MAX_CLIP_VERTS: usize = 9;

/// Maximum output vertices after fan-triangulating a 9-gon (7 triangles).
pub const MAX_CLIPPED_TRIANGLE_VERTS: usize = 27;

/// `true` iff each of x, y, z is strictly within `(-w, +w)`.
#[inline]
pub fn clip_point(v: Vec4) -> bool {
    v.x.abs() < v.w.abs() && v.y.abs() < v.w.abs() && v.z.abs() < v.w.abs()
}

/// The six clip planes in near, left, right, bottom, top, far order. Each
/// plane is a row vector `p` such that "inside" is `p.dot(v) >= 0`.
fn planes() -> [Vec4; 6] {
    let one = Fixed::ONE;
    let zero = Fixed::ZERO;
    [
        Vec4::new(zero, zero, one, one),    // near:   z + w >= 0
        Vec4::new(one, zero, zero, one),    // left:   x + w >= 0
        Vec4::new(-one, zero, zero, one),   // right: -x + w >= 0
        Vec4::new(zero, one, zero, one),    // bottom: y + w >= 0
        Vec4::new(zero, -one, zero, one),   // top:   -y + w >= 0
        Vec4::new(zero, zero, -one, one),   // far:   -z + w >= 0
    ]
}

/// Clips a triangle against all six planes and fan-triangulates the result.
/// Returns the number of output vertices written into `output` (always a
/// multiple of 3, 0 if the triangle is entirely clipped away).
pub fn clip_triangle(
    v0: Vec4,
    v1: Vec4,
    v2: Vec4,
    output: &mut [Vec4; MAX_CLIPPED_TRIANGLE_VERTS],
) -> usize {
    let mut buf_a = [Vec4::ZERO; MAX_CLIP_VERTS];
    let mut buf_b = [Vec4::ZERO; MAX_CLIP_VERTS];

    buf_a[0] = v0;
    buf_a[1] = v1;
    buf_a[2] = v2;
    let mut count = 3usize;

    let mut current = &mut buf_a;
    let mut next = &mut buf_b;

    for plane in planes() {
        let mut out_count = 0usize;

        for i in 0..count {
            let curr = current[i];
            let nxt = current[(i + 1) % count];

            let curr_dist = plane.dot(curr);
            let next_dist = plane.dot(nxt);

            let curr_inside = curr_dist >= Fixed::ZERO;
            let next_inside = next_dist >= Fixed::ZERO;

            if curr_inside {
                next[out_count] = curr;
                out_count += 1;
            }

            if curr_inside != next_inside {
                let t = curr_dist / (curr_dist - next_dist);
                next[out_count] = curr + (nxt - curr) * t;
                out_count += 1;
            }
        }

        count = out_count;
        if count == 0 {
            return 0;
        }

        std::mem::swap(&mut current, &mut next);
    }

    // Fan triangulation: (v[0], v[i], v[i+1]) for i in [1, count-2].
    let mut out_index = 0usize;
    for i in 1..count.saturating_sub(1) {
        output[out_index] = current[0];
        output[out_index + 1] = current[i];
        output[out_index + 2] = current[i + 1];
        out_index += 3;
    }

    out_index
}
