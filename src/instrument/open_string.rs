use serde::Serialize;

use crate::instrument::fretted_position::FrettedPosition;
use crate::instrument::harmonic_node::HarmonicNode;
use crate::instrument::music_note::MusicNote;
use crate::instrument::string_factory::StringFamily;
use crate::instrument::touch_point::{TouchPoint, TouchPosition};

/// A tuned string and every touch point on it, sorted by distance from the
/// nut. Built only through [`StringFactory`](crate::instrument::string_factory::StringFactory).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenString {
    family: StringFamily,
    tuning: MusicNote,
    fret_count: i32,
    max_harmonic_order: i32,
    touch_points: Vec<TouchPoint>,
}

impl OpenString {
    pub(crate) fn from_parts(
        family: StringFamily,
        tuning: MusicNote,
        fret_count: i32,
        max_harmonic_order: i32,
        mut touch_points: Vec<TouchPoint>,
    ) -> Self {
        // 稳定排序, 距离相同的点保持生成顺序
        touch_points.sort_by(|a, b| a.cmp_by_distance(b));
        OpenString {
            family,
            tuning,
            fret_count,
            max_harmonic_order,
            touch_points,
        }
    }

    pub fn family(&self) -> StringFamily {
        self.family
    }

    /// Returns the tuning of the open string.
    pub fn tuning(&self) -> MusicNote {
        self.tuning
    }

    /// Number of frets, or of semitones for bowed strings.
    pub fn fret_count(&self) -> i32 {
        self.fret_count
    }

    /// Highest harmonic order, 0 when the string carries no harmonics.
    pub fn max_harmonic_order(&self) -> i32 {
        self.max_harmonic_order
    }

    pub fn touch_points(&self) -> &[TouchPoint] {
        &self.touch_points
    }

    pub fn fretted_positions(&self) -> impl Iterator<Item = &FrettedPosition> {
        self.touch_points.iter().filter_map(TouchPoint::as_fret)
    }

    pub fn harmonic_nodes(&self) -> impl Iterator<Item = &HarmonicNode> {
        self.touch_points.iter().filter_map(TouchPoint::as_harmonic)
    }

    /// Harmonic nodes above the given root fret, in distance order.
    pub fn harmonics_of(&self, root_fret: i32) -> impl Iterator<Item = &HarmonicNode> {
        self.harmonic_nodes()
            .filter(move |node| node.root_fret() == root_fret)
    }

    /// The fretted position at `fret`, if the string has it.
    pub fn fret(&self, fret: i32) -> Option<&FrettedPosition> {
        self.fretted_positions()
            .find(|position| position.fret_index() == fret)
    }

    /// Calculates the fret position for a given note.
    ///
    /// Returns the fret number if valid, otherwise returns None.
    pub fn get_fret_by_note(&self, note: MusicNote) -> Option<i32> {
        let fret = note.num - self.tuning.num;
        if fret < 0 || fret > self.fret_count {
            None
        } else {
            Some(fret)
        }
    }

    /// Every touch point whose equal-tempered pitch is `note`.
    pub fn touch_points_for(&self, note: MusicNote) -> impl Iterator<Item = &TouchPoint> {
        self.touch_points
            .iter()
            .filter(move |point| point.pitch() == note)
    }
}
