use serde::{Serialize, Serializer};

use crate::error::{FretboardError, Result};
use crate::instrument::fretted_position::FrettedPosition;
use crate::instrument::music_note::MusicNote;
use crate::utils::util_methods::{
    CENTS_PER_SEMITONE, gcd, ratio_to_cents, round1, semitone_ratio, semitone_to_frequency,
};

/// An overtone touch point: a light touch at `k/h` of the vibrating length
/// between the root position and the bridge.
///
/// The sounding pitch is the `h`-th partial of the root, whatever `k` is.
/// `k` only chooses which of the coincident nodes is touched, so 1/3 and 2/3
/// both sound an octave and a fifth above the root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarmonicNode {
    #[serde(rename = "root_fret", serialize_with = "serialize_root")]
    root: FrettedPosition,
    numerator: u32,
    denominator: u32,
    distance: f64,
    interval_cents: f64,
    pitch: MusicNote,
    residual_cents: f64,
    frequency: f64,
    equivalent_fret_number: f64,
}

fn serialize_root<S: Serializer>(
    root: &FrettedPosition,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i32(root.fret_index())
}

impl HarmonicNode {
    /// Creates node `numerator/denominator` above `root`.
    ///
    /// The ratio must be reduced with `1 <= numerator < denominator`.
    pub fn new(root: &FrettedPosition, numerator: u32, denominator: u32) -> Result<Self> {
        if numerator < 1 || numerator >= denominator || gcd(numerator, denominator) != 1 {
            return Err(FretboardError::ArithmeticInvariant {
                k: numerator,
                h: denominator,
            });
        }

        let k = numerator as f64;
        let h = denominator as f64;

        let distance = root.distance() + (1.0 - root.distance()) * k / h;
        let interval_cents = ratio_to_cents(h);

        let semitones = (interval_cents / CENTS_PER_SEMITONE).round();
        let residual_cents = interval_cents - semitones * CENTS_PER_SEMITONE;
        let pitch = root.pitch().add(semitones as i32);
        let frequency =
            semitone_to_frequency(root.pitch().num as f64 + interval_cents / CENTS_PER_SEMITONE);

        // 手指所在位置对应的品位，仅用于显示
        let equivalent_fret_number =
            root.fret_index() as f64 + round1((h / (h - k)).ln() / semitone_ratio().ln());

        Ok(HarmonicNode {
            root: *root,
            numerator,
            denominator,
            distance,
            interval_cents,
            pitch,
            residual_cents,
            frequency,
            equivalent_fret_number,
        })
    }

    pub fn root(&self) -> &FrettedPosition {
        &self.root
    }

    pub fn root_fret(&self) -> i32 {
        self.root.fret_index()
    }

    /// Node number `k`.
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Harmonic order `h`.
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Offset of the sounding pitch above the root, in cents.
    pub fn interval_cents(&self) -> f64 {
        self.interval_cents
    }

    /// Nearest equal-tempered pitch of the sounding partial.
    pub fn pitch(&self) -> MusicNote {
        self.pitch
    }

    /// Deviation in cents of the sounding partial from `pitch()`.
    pub fn residual_cents(&self) -> f64 {
        self.residual_cents
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn equivalent_fret_number(&self) -> f64 {
        self.equivalent_fret_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_e_fret(fret: i32) -> FrettedPosition {
        FrettedPosition::new(MusicNote::new(40), fret, 24).unwrap()
    }

    #[test]
    fn test_octave_harmonic() {
        let open = low_e_fret(0);
        let node = HarmonicNode::new(&open, 1, 2).unwrap();
        assert!((node.distance() - 0.5).abs() < 1e-12);
        assert!((node.interval_cents() - 1200.0).abs() < 1e-9);
        assert_eq!(node.pitch().name(), "E3");
        assert!(node.residual_cents().abs() < 1e-9);
        assert!((node.frequency() - 2.0 * open.frequency()).abs() < 1e-9);
        assert_eq!(node.equivalent_fret_number(), 12.0);
    }

    #[test]
    fn test_cents_depend_on_order_only() {
        // 1/3 与 2/3 发出同一个泛音，只是触弦位置不同
        let open = low_e_fret(0);
        let near = HarmonicNode::new(&open, 1, 3).unwrap();
        let far = HarmonicNode::new(&open, 2, 3).unwrap();

        for node in [&near, &far] {
            assert!((node.interval_cents() - 1901.955).abs() < 1e-3);
            assert_eq!(node.pitch().name(), "B3");
            assert!((node.residual_cents() - 1.955).abs() < 1e-3);
            assert!((node.frequency() - 3.0 * open.frequency()).abs() < 1e-9);
        }

        assert_eq!(near.equivalent_fret_number(), 7.0);
        assert_eq!(far.equivalent_fret_number(), 19.0);
        assert!((near.distance() - 1.0 / 3.0).abs() < 1e-12);
        assert!((far.distance() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_fifth_and_seventh_partials() {
        let open = low_e_fret(0);
        let fifth = HarmonicNode::new(&open, 1, 5).unwrap();
        assert_eq!(fifth.pitch().num, 40 + 28);
        assert!((fifth.residual_cents() + 13.686).abs() < 1e-3);
        assert_eq!(fifth.equivalent_fret_number(), 3.9);

        let seventh = HarmonicNode::new(&open, 1, 7).unwrap();
        assert_eq!(seventh.pitch().num, 40 + 34);
        assert!((seventh.residual_cents() + 31.174).abs() < 1e-3);
    }

    #[test]
    fn test_node_relative_to_fretted_root() {
        let root = low_e_fret(12);
        let node = HarmonicNode::new(&root, 1, 2).unwrap();
        assert!((node.distance() - 0.75).abs() < 1e-12);
        assert_eq!(node.root_fret(), 12);
        assert_eq!(node.pitch().name(), "E4");
        assert_eq!(node.equivalent_fret_number(), 24.0);
    }

    #[test]
    fn test_rejects_unreduced_ratios() {
        let open = low_e_fret(0);
        for (k, h) in [(0, 2), (2, 2), (3, 2), (2, 4), (3, 6)] {
            assert!(matches!(
                HarmonicNode::new(&open, k, h),
                Err(FretboardError::ArithmeticInvariant { .. })
            ));
        }
    }
}
