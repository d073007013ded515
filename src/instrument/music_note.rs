use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{FretboardError, Result};
use crate::utils::util_methods::semitone_to_frequency;

lazy_static! {
    /// Pitch class of every accepted note letter spelling, C = 0.
    pub static ref KEYNOTES: HashMap<&'static str, i32> = {
        let mut m = HashMap::new();
        m.insert("C", 0);
        m.insert("C#", 1);
        m.insert("Db", 1);
        m.insert("D", 2);
        m.insert("D#", 3);
        m.insert("Eb", 3);
        m.insert("E", 4);
        m.insert("Fb", 4);
        m.insert("E#", 5);
        m.insert("F", 5);
        m.insert("F#", 6);
        m.insert("Gb", 6);
        m.insert("G", 7);
        m.insert("G#", 8);
        m.insert("Ab", 8);
        m.insert("A", 9);
        m.insert("A#", 10);
        m.insert("Bb", 10);
        m.insert("B", 11);
        m.insert("Cb", 11);
        m.insert("B#", 0);
        m
    };
}

/// Sharp spelling used when naming a semitone number.
const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Octaves accepted by [`number_of`]; keeps fret and harmonic offsets far
/// from `i32` overflow.
pub const OCTAVE_RANGE: std::ops::RangeInclusive<i32> = -10..=20;

/// A pitch on the 12-tone equal-tempered scale.
///
/// `num` is the semitone number, 69 being A4 at 440 Hz and 60 middle C.
/// Serialized as its name, e.g. `"E2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MusicNote {
    pub num: i32,
}

impl MusicNote {
    pub fn new(num: i32) -> Self {
        MusicNote { num }
    }

    /// Parse a scientific pitch name such as `E2`, `c#4` or `Bb-1`.
    pub fn from_name(name: &str) -> Result<Self> {
        number_of(name).map(MusicNote::new)
    }

    /// Scientific pitch name, sharps only.
    pub fn name(&self) -> String {
        name_of(self.num)
    }

    /// 给当前音符添加一个音程
    /// num: 音程，大三度为4，小三度为3，其它类推
    pub fn add(&self, num: i32) -> MusicNote {
        MusicNote::new(self.num + num)
    }

    /// Equal-tempered frequency in Hz.
    pub fn frequency(&self) -> f64 {
        semitone_to_frequency(self.num as f64)
    }
}

impl fmt::Display for MusicNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<MusicNote> for String {
    fn from(note: MusicNote) -> Self {
        note.name()
    }
}

impl TryFrom<String> for MusicNote {
    type Error = FretboardError;

    fn try_from(value: String) -> Result<Self> {
        MusicNote::from_name(&value)
    }
}

/// Name of a semitone number, e.g. 40 -> `E2`, 61 -> `C#4`.
pub fn name_of(num: i32) -> String {
    let pitch_class = num.rem_euclid(12) as usize;
    let octave = num.div_euclid(12) - 1;
    format!("{}{}", PITCH_CLASS_NAMES[pitch_class], octave)
}

/// Semitone number of a pitch name: letter, optional `#`/`b`, octave.
pub fn number_of(name: &str) -> Result<i32> {
    let invalid = || FretboardError::InvalidPitchName(name.to_string());
    let trimmed = name.trim();

    let mut chars = trimmed.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let rest = chars.as_str();

    // 升降号只占一个字符
    let (key, octave_str) = match rest.chars().next() {
        Some(accidental @ ('#' | 'b')) => (format!("{}{}", letter, accidental), &rest[1..]),
        _ => (letter.to_string(), rest),
    };

    let pitch_class = *KEYNOTES.get(key.as_str()).ok_or_else(invalid)?;
    let octave = octave_str.parse::<i32>().map_err(|_| invalid())?;

    // B#/Cb spell across the octave boundary
    let octave_shift = match key.as_str() {
        "B#" => 1,
        "Cb" => -1,
        _ => 0,
    };

    if !OCTAVE_RANGE.contains(&octave) {
        return Err(invalid());
    }

    Ok((octave + 1 + octave_shift) * 12 + pitch_class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_note_creation() {
        let note = MusicNote::new(40);
        assert_eq!(note.num, 40);
        assert_eq!(note.name(), "E2");
        assert_eq!(MusicNote::new(69).name(), "A4");
        assert_eq!(MusicNote::new(61).name(), "C#4");
        assert_eq!(MusicNote::new(0).name(), "C-1");
    }

    #[test]
    fn test_number_of() {
        assert_eq!(number_of("E2").unwrap(), 40);
        assert_eq!(number_of("A4").unwrap(), 69);
        assert_eq!(number_of("c4").unwrap(), 60);
        assert_eq!(number_of("Bb3").unwrap(), 58);
        assert_eq!(number_of("F#3").unwrap(), 54);
        assert_eq!(number_of("C-1").unwrap(), 0);
        assert_eq!(number_of("B#3").unwrap(), 60);
        assert_eq!(number_of("Cb4").unwrap(), 59);
    }

    #[test]
    fn test_invalid_names() {
        let names = [
            "", "H2", "E", "E#x", "#4", "Ebb3", "C999999999", "B#2147483647", "C-2147483648", "A21",
            "C-11",
        ];
        for name in names {
            assert!(
                matches!(number_of(name), Err(FretboardError::InvalidPitchName(_))),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_octave_limits() {
        assert_eq!(number_of("C-10").unwrap(), -108);
        assert_eq!(number_of("B20").unwrap(), 263);
        let config = r#"{"name": "x", "family": "guitar", "tuning": ["C999999999"], "fret_count": 19, "max_harmonic_order": 12}"#;
        let err = crate::config::InstrumentConfig::from_json_str(config)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, FretboardError::InvalidPitchName(name) if name == "C999999999"));
    }

    #[test]
    fn test_name_roundtrip() {
        for num in -12..=127 {
            assert_eq!(number_of(&name_of(num)).unwrap(), num);
        }
    }

    #[test]
    fn test_add_interval() {
        let note = MusicNote::new(48); // C3
        let major_third = note.add(4);
        assert_eq!(major_third.num, 52);
        assert_eq!(major_third.name(), "E3");
    }

    #[test]
    fn test_serde_as_name() {
        let json = serde_json::to_string(&MusicNote::new(40)).unwrap();
        assert_eq!(json, "\"E2\"");
        let note: MusicNote = serde_json::from_str("\"A4\"").unwrap();
        assert_eq!(note.num, 69);
        assert!(serde_json::from_str::<MusicNote>("\"Q9\"").is_err());
    }
}
