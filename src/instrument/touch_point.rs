use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::instrument::fretted_position::FrettedPosition;
use crate::instrument::harmonic_node::HarmonicNode;
use crate::instrument::music_note::MusicNote;

/// Anything that can be touched on a string.
pub trait TouchPosition {
    /// Relative distance from the nut, in `[0, 1]`.
    fn distance(&self) -> f64;
    /// Equal-tempered pitch heard when touching here.
    fn pitch(&self) -> MusicNote;
    /// Sounding frequency in Hz.
    fn frequency(&self) -> f64;
}

impl TouchPosition for FrettedPosition {
    fn distance(&self) -> f64 {
        FrettedPosition::distance(self)
    }

    fn pitch(&self) -> MusicNote {
        FrettedPosition::pitch(self)
    }

    fn frequency(&self) -> f64 {
        FrettedPosition::frequency(self)
    }
}

impl TouchPosition for HarmonicNode {
    fn distance(&self) -> f64 {
        HarmonicNode::distance(self)
    }

    fn pitch(&self) -> MusicNote {
        HarmonicNode::pitch(self)
    }

    fn frequency(&self) -> f64 {
        HarmonicNode::frequency(self)
    }
}

/// One touch point of an open string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TouchPoint {
    Fret(FrettedPosition),
    Harmonic(HarmonicNode),
}

impl TouchPoint {
    pub fn as_fret(&self) -> Option<&FrettedPosition> {
        match self {
            TouchPoint::Fret(position) => Some(position),
            TouchPoint::Harmonic(_) => None,
        }
    }

    pub fn as_harmonic(&self) -> Option<&HarmonicNode> {
        match self {
            TouchPoint::Fret(_) => None,
            TouchPoint::Harmonic(node) => Some(node),
        }
    }

    pub fn is_harmonic(&self) -> bool {
        matches!(self, TouchPoint::Harmonic(_))
    }

    /// Orders by distance from the nut.
    pub fn cmp_by_distance(&self, other: &TouchPoint) -> Ordering {
        self.distance().total_cmp(&other.distance())
    }
}

impl TouchPosition for TouchPoint {
    fn distance(&self) -> f64 {
        match self {
            TouchPoint::Fret(position) => position.distance(),
            TouchPoint::Harmonic(node) => node.distance(),
        }
    }

    fn pitch(&self) -> MusicNote {
        match self {
            TouchPoint::Fret(position) => position.pitch(),
            TouchPoint::Harmonic(node) => node.pitch(),
        }
    }

    fn frequency(&self) -> f64 {
        match self {
            TouchPoint::Fret(position) => position.frequency(),
            TouchPoint::Harmonic(node) => node.frequency(),
        }
    }
}

impl From<FrettedPosition> for TouchPoint {
    fn from(position: FrettedPosition) -> Self {
        TouchPoint::Fret(position)
    }
}

impl From<HarmonicNode> for TouchPoint {
    fn from(node: HarmonicNode) -> Self {
        TouchPoint::Harmonic(node)
    }
}

impl fmt::Display for TouchPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TouchPoint::Fret(position) => write!(
                f,
                "fret {} | {} | {:.2} Hz | d={:.4}",
                position.fret_index(),
                position.pitch(),
                position.frequency(),
                position.distance()
            ),
            TouchPoint::Harmonic(node) => write!(
                f,
                "harmonic {}/{} over fret {} (~fret {}) | {} {:+.1}c | {:.2} Hz | d={:.4}",
                node.numerator(),
                node.denominator(),
                node.root_fret(),
                node.equivalent_fret_number(),
                node.pitch(),
                node.residual_cents(),
                node.frequency(),
                node.distance()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_delegate() {
        let open = FrettedPosition::new(MusicNote::new(40), 0, 19).unwrap();
        let node = HarmonicNode::new(&open, 1, 2).unwrap();

        let fret_point = TouchPoint::from(open);
        let harmonic_point = TouchPoint::from(node);

        assert!(!fret_point.is_harmonic());
        assert!(harmonic_point.is_harmonic());
        assert_eq!(fret_point.as_fret(), Some(&open));
        assert_eq!(harmonic_point.as_harmonic(), Some(&node));
        assert_eq!(harmonic_point.pitch().name(), "E3");
        assert_eq!(fret_point.cmp_by_distance(&harmonic_point), Ordering::Less);
    }

    #[test]
    fn test_display() {
        let open = FrettedPosition::new(MusicNote::new(40), 0, 19).unwrap();
        let node = HarmonicNode::new(&open, 2, 3).unwrap();
        assert_eq!(
            TouchPoint::from(open).to_string(),
            "fret 0 | E2 | 82.41 Hz | d=0.0000"
        );
        assert!(TouchPoint::from(node).to_string().starts_with("harmonic 2/3 over fret 0 (~fret 19)"));
    }

    #[test]
    fn test_serialize_tagged() {
        let open = FrettedPosition::new(MusicNote::new(40), 0, 19).unwrap();
        let node = HarmonicNode::new(&open, 1, 2).unwrap();

        let fret_json = serde_json::to_value(TouchPoint::from(open)).unwrap();
        assert_eq!(fret_json["kind"], "fret");
        assert_eq!(fret_json["pitch"], "E2");
        assert_eq!(fret_json["fret_index"], 0);

        let node_json = serde_json::to_value(TouchPoint::from(node)).unwrap();
        assert_eq!(node_json["kind"], "harmonic");
        assert_eq!(node_json["root_fret"], 0);
        assert_eq!(node_json["denominator"], 2);
    }
}
