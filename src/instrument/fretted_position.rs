use serde::Serialize;

use crate::error::{FretboardError, Result};
use crate::instrument::music_note::MusicNote;
use crate::utils::util_methods::{fret_distance, semitone_to_frequency};

/// A stopped position on a string: the open string (index 0) or one
/// equal-tempered semitone step per index towards the bridge.
///
/// Params:
/// - fret_index: 品位, 0 为空弦
/// - distance: relative distance from the nut, 0 at the nut and 1 at the bridge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrettedPosition {
    fret_index: i32,
    distance: f64,
    pitch: MusicNote,
    frequency: f64,
}

impl FrettedPosition {
    /// Creates the position of `fret_index` on a string tuned to `tuning`
    /// with `fret_count` frets.
    ///
    /// Fails if the index lies outside `[0, fret_count]`.
    pub fn new(tuning: MusicNote, fret_index: i32, fret_count: i32) -> Result<Self> {
        if fret_index < 0 || fret_index > fret_count {
            return Err(FretboardError::out_of_range(
                "fret_index",
                fret_index as i64,
                0,
                fret_count.max(0) as i64,
            ));
        }

        let pitch = tuning.add(fret_index);
        Ok(FrettedPosition {
            fret_index,
            distance: fret_distance(fret_index),
            pitch,
            frequency: semitone_to_frequency(pitch.num as f64),
        })
    }

    pub fn fret_index(&self) -> i32 {
        self.fret_index
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn pitch(&self) -> MusicNote {
        self.pitch
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn is_open(&self) -> bool {
        self.fret_index == 0
    }

    /// Pitch of the open string this position was built on.
    pub fn tuning(&self) -> MusicNote {
        self.pitch.add(-self.fret_index)
    }
}
