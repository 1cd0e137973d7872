//! Implements the factorial

use std::sync::OnceLock;

pub trait Factorial {
    /// Evaluates the factorial function n!
    fn factorial(&self) -> f64;
}

impl Factorial for i32 {
    fn factorial(&self) -> f64 {
        get_fcache()[*self as usize]
    }
}

const CACHE_SIZE: usize = 171;
static FCACHE: OnceLock<[f64; CACHE_SIZE]> = OnceLock::new();

fn get_fcache() -> &'static [f64; CACHE_SIZE] {
    FCACHE.get_or_init(|| {
        let mut cache = [1.0; CACHE_SIZE];
        for i in 1..CACHE_SIZE {
            cache[i] = cache[i - 1] * (i as f64);
        }
        cache
    })
}
