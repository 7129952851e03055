use libq8isa::{Byte, ByteSigned};


/// One Q4.4 unit, the value of the lowest integer bit.
pub const FIXED_POINT_SCALE: f32 = 16.0;

/// Two's complement addition. Overflow wraps in both directions.
pub fn add_signed(a: Byte, b: Byte) -> Byte {
    (a as ByteSigned).wrapping_add(b as ByteSigned) as Byte
}

/// Adds two Q4.4 fixed point values by way of floats, truncating the scaled sum.
pub fn add_fixed(a: Byte, b: Byte) -> Byte {
    fixed_from_f32(fixed_to_f32(a) + fixed_to_f32(b))
}

pub fn fixed_to_f32(value: Byte) -> f32 {
    value as f32 / FIXED_POINT_SCALE
}

/// Truncates toward zero, then keeps the low 8 bits.
pub fn fixed_from_f32(value: f32) -> Byte {
    (value * FIXED_POINT_SCALE) as i32 as Byte
}

/// Rotates right by `steps` modulo 8, so a step count of 0 (or 8) leaves the value untouched.
pub fn rotate_right(value: Byte, steps: u32) -> Byte {
    value.rotate_right(steps % Byte::BITS)
}

pub fn greater_signed(a: Byte, b: Byte) -> bool {
    (a as ByteSigned) > (b as ByteSigned)
}
