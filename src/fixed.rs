//! Q16.16 fixed-point scalar and the sin/cos lookup tables built on top of it.
//!
//! Every real-valued quantity in the pipeline — coordinates, matrix entries,
//! clip-plane distances — is a [`Fixed`]. There is no floating point anywhere
//! downstream of construction; the only place an `f32`/`f64` literal appears
//! is at the call site of [`Fixed::from_f32`], which is a `const fn` so it
//! can be used to build compile-time constants the way a literal suffix
//! would in a language that has one.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

const FRAC_BITS: i32 = 16;
const SCALE: i32 = 1 << FRAC_BITS;

/// Signed Q16.16 fixed-point number: a 32-bit integer whose low 16 bits are
/// the fractional part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(SCALE);
    pub const HALF: Fixed = Fixed(SCALE / 2);

    /// Builds a fixed-point value from a compile-time real literal:
    /// `round(value * 65536)`, computed once.
    #[inline]
    pub const fn from_f32(value: f32) -> Self {
        Fixed((value * SCALE as f32) as i32)
    }

    /// Widens a small integer: shifts left 16.
    #[inline]
    pub const fn from_int(n: i32) -> Self {
        Fixed(n.wrapping_shl(FRAC_BITS as u32))
    }

    /// Narrows to an integer: shifts right 16 (arithmetic, truncates toward
    /// negative infinity).
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / SCALE as f32
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    #[inline]
    pub fn abs(self) -> Self {
        Fixed(self.0.wrapping_abs())
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.0 < other.0 { self } else { other }
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.0 > other.0 { self } else { other }
    }

    /// Integer square root via Newton's method on the raw representation.
    /// Not required to be bit-exact against any reference (spec §3: "exact
    /// isqrt is not required by the core contracts") — only used by
    /// `vec*::length`, which nothing in the pipeline itself calls.
    pub fn sqrt(self) -> Self {
        if self.0 <= 0 {
            return Fixed::ZERO;
        }
        // sqrt(x) in Q16.16 = sqrt(raw << 16), computed as an integer isqrt.
        let target = (self.0 as i64) << FRAC_BITS;
        let mut guess = 1i64 << ((64 - target.leading_zeros() as i64) / 2).max(1);
        for _ in 0..32 {
            if guess == 0 {
                break;
            }
            let next = (guess + target / guess) / 2;
            if next == guess {
                break;
            }
            guess = next;
        }
        Fixed(guess as i32)
    }
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    #[inline]
    fn mul(self, rhs: Fixed) -> Fixed {
        let wide = (self.0 as i64 * rhs.0 as i64) >> FRAC_BITS;
        Fixed(wide as i32)
    }
}

impl Div for Fixed {
    type Output = Fixed;
    #[inline]
    fn div(self, rhs: Fixed) -> Fixed {
        if rhs.0 == 0 {
            return Fixed::ZERO;
        }
        let wide = ((self.0 as i64) << FRAC_BITS) / rhs.0 as i64;
        Fixed(wide as i32)
    }
}

/// Builds a [`Fixed`] from a literal at the call site, mirroring the
/// compile-time real-literal constructor the spec calls for (§4.A).
#[macro_export]
macro_rules! fixed {
    ($v:expr) => {
        $crate::fixed::Fixed::from_f32($v as f32)
    };
}

// ---------------------------------------------------------------------------
// Trig: 256-entries-per-turn lookup tables ("gamdeg" units)
// ---------------------------------------------------------------------------

/// One full turn, in the angular unit the lookup tables are indexed by.
pub const GAMDEG_IN_CIRCLE: usize = 256;

const TAU: f32 = std::f32::consts::TAU;

/// `256 / τ`, as a compile-time [`Fixed`] constant — the only float literal
/// involved in indexing is folded away at compile time, same as any other
/// `Fixed::from_f32` constant in this crate.
const RAD_TO_GAMDEG: Fixed = Fixed::from_f32(GAMDEG_IN_CIRCLE as f32 / TAU);

const fn taylor_sin(x: f32) -> f32 {
    x - (x * x * x) / 6.0 + (x * x * x * x * x) / 120.0 - (x * x * x * x * x * x * x) / 5040.0
        + (x * x * x * x * x * x * x * x * x) / 362_880.0
}

const fn taylor_cos(x: f32) -> f32 {
    1.0 - (x * x) / 2.0 + (x * x * x * x) / 24.0 - (x * x * x * x * x * x) / 720.0
        + (x * x * x * x * x * x * x * x) / 40_320.0
}

/// Builds the sine table: compute one quadrant via Taylor series, mirror it
/// into the second quadrant, negate both into the third and fourth, pin the
/// four quadrant boundaries to their exact values, then scale every entry
/// once into a raw Q16.16 integer. The table itself holds only `i32`s —
/// the Taylor series is the only place a float touches this code, and it
/// runs entirely at compile time.
const fn generate_sin_table() -> [i32; GAMDEG_IN_CIRCLE] {
    let quadrant = GAMDEG_IN_CIRCLE / 4;
    let mut table = [0.0f32; GAMDEG_IN_CIRCLE];

    let mut i = 0;
    let mut k = quadrant * 2;
    while i <= quadrant {
        let x = (TAU / GAMDEG_IN_CIRCLE as f32) * i as f32;
        table[i] = taylor_sin(x);
        table[k] = table[i];
        k -= 1;
        i += 1;
    }

    let mut j = 0;
    let mut k2 = quadrant * 2;
    while j < quadrant * 2 {
        table[k2] = -table[j];
        k2 += 1;
        j += 1;
    }

    table[quadrant * 0] = 0.0;
    table[quadrant * 1] = 1.0;
    table[quadrant * 2] = 0.0;
    table[quadrant * 3] = -1.0;

    quantize(table)
}

const fn generate_cos_table() -> [i32; GAMDEG_IN_CIRCLE] {
    let quadrant = GAMDEG_IN_CIRCLE / 4;
    let mut table = [0.0f32; GAMDEG_IN_CIRCLE];

    let mut i = 0;
    let mut k = quadrant * 2;
    while i <= quadrant {
        let x = (TAU / GAMDEG_IN_CIRCLE as f32) * i as f32;
        table[i] = taylor_cos(x);
        table[k] = -table[i];
        k -= 1;
        i += 1;
    }

    let mut j = 0;
    let mut k2 = quadrant * 2;
    while j < quadrant * 2 {
        table[k2] = -table[j];
        k2 += 1;
        j += 1;
    }

    table[quadrant * 0] = 1.0;
    table[quadrant * 1] = 0.0;
    table[quadrant * 2] = -1.0;
    table[quadrant * 3] = 0.0;

    quantize(table)
}

/// Scales a table of real values into raw Q16.16 integers, once, at compile
/// time — `Fixed::from_f32(..).raw()` applied element-wise.
const fn quantize(table: [f32; GAMDEG_IN_CIRCLE]) -> [i32; GAMDEG_IN_CIRCLE] {
    let mut out = [0i32; GAMDEG_IN_CIRCLE];
    let mut i = 0;
    while i < GAMDEG_IN_CIRCLE {
        out[i] = Fixed::from_f32(table[i]).raw();
        i += 1;
    }
    out
}

fn sin_table() -> &'static [i32; GAMDEG_IN_CIRCLE] {
    static TABLE: [i32; GAMDEG_IN_CIRCLE] = generate_sin_table();
    &TABLE
}

fn cos_table() -> &'static [i32; GAMDEG_IN_CIRCLE] {
    static TABLE: [i32; GAMDEG_IN_CIRCLE] = generate_cos_table();
    &TABLE
}

#[inline]
fn clamp_gamdeg(gamdeg: i32) -> usize {
    (((gamdeg % GAMDEG_IN_CIRCLE as i32) + GAMDEG_IN_CIRCLE as i32) % GAMDEG_IN_CIRCLE as i32)
        as usize
}

/// Converts a radians-valued [`Fixed`] into a table index (gamdeg units,
/// wrapped to `[0, 256)`). Entirely integer/`Fixed` arithmetic: the multiply
/// and the narrowing both go through the same arithmetic-right-shift (floor)
/// path as every other `Fixed` operation, so a negative angle that isn't an
/// exact multiple of a table slot floors instead of truncating toward zero.
#[inline]
fn gamdeg_index(a: Fixed) -> usize {
    clamp_gamdeg((a * RAD_TO_GAMDEG).to_int())
}

/// Sine via lookup table, indexed in gamdeg units (256 per turn).
#[inline]
pub fn sin(a: Fixed) -> Fixed {
    Fixed::from_raw(sin_table()[gamdeg_index(a)])
}

/// Cosine via lookup table, indexed in gamdeg units (256 per turn).
#[inline]
pub fn cos(a: Fixed) -> Fixed {
    Fixed::from_raw(cos_table()[gamdeg_index(a)])
}

#[inline]
pub fn tan(a: Fixed) -> Fixed {
    sin(a) / cos(a)
}

#[inline]
pub fn cot(a: Fixed) -> Fixed {
    cos(a) / sin(a)
}
