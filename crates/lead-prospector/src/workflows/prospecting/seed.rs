//! Deterministic pseudo-random draws keyed by a criteria hash.
//!
//! Every figure the dashboard shows is derived from these two functions so that
//! identical criteria always render identical numbers.

/// 32-bit rolling hash (`h * 31 + unit`) over UTF-16 code units.
pub fn criteria_hash(text: &str) -> u32 {
    let hash = text.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// Uniform-looking draw in `[0, 1)` from `frac(sin(seed) * 10000)`.
pub fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    let fraction = x - x.floor();
    // guard the rounding edge where the subtraction lands exactly on 1.0
    if fraction >= 1.0 {
        0.0
    } else {
        fraction
    }
}

/// Draw for `seed + offset`, the per-record / per-field variant.
pub fn draw(seed: u32, offset: u32) -> f64 {
    seeded_random(f64::from(seed) + f64::from(offset))
}

/// Picks an element of `items` with the draw at `seed + offset`.
pub fn pick<'a, T>(items: &'a [T], seed: u32, offset: u32) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = (draw(seed, offset) * items.len() as f64).floor() as usize;
    items.get(index.min(items.len() - 1))
}
