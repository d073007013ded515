//! Equal-temperament and harmonic-series arithmetic shared by the string model.

/// Semitone number of A4.
pub const A4_SEMITONE: i32 = 69;
/// Reference frequency of A4 in Hz.
pub const A4_FREQUENCY: f64 = 440.0;
pub const CENTS_PER_SEMITONE: f64 = 100.0;

/// Frequency ratio between two adjacent semitones, 2^(1/12).
pub fn semitone_ratio() -> f64 {
    2.0_f64.powf(1.0 / 12.0)
}

/// Relative distance from the nut of fret `fret`, 0 at the nut and 0.5 at
/// fret 12.
pub fn fret_distance(fret: i32) -> f64 {
    if fret == 0 {
        return 0.0;
    }
    // 1 - (1/2^(1/12))^(n-12) / 2
    1.0 - (1.0 / semitone_ratio()).powi(fret - 12) / 2.0
}

/// Frequency in Hz of a (possibly fractional) semitone number.
pub fn semitone_to_frequency(semitone: f64) -> f64 {
    A4_FREQUENCY * 2.0_f64.powf((semitone - A4_SEMITONE as f64) / 12.0)
}

/// Fractional semitone number of a frequency in Hz.
pub fn frequency_to_semitone(frequency: f64) -> f64 {
    A4_SEMITONE as f64 + 12.0 * (frequency / A4_FREQUENCY).log2()
}

/// Size in cents of a frequency ratio.
pub fn ratio_to_cents(ratio: f64) -> f64 {
    1200.0 * ratio.log2()
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Euler's totient: how many k in [1, n] are coprime to n.
pub fn euler_totient(n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    let mut result = n;
    let mut rest = n;
    let mut p = 2;
    while p <= rest / p {
        if rest % p == 0 {
            while rest % p == 0 {
                rest /= p;
            }
            result -= result / p;
        }
        p += 1;
    }
    if rest > 1 {
        result -= result / rest;
    }
    result
}
