//! Instrument configuration and family presets.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::instrument::fretboard::Fretboard;
use crate::instrument::string_factory::{StringFactory, StringFamily};

/// Everything needed to build a [`Fretboard`].
///
/// Tuning is listed in string order, e.g. lowest string first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub name: String,
    pub family: StringFamily,
    pub tuning: Vec<String>,
    /// Frets for guitars, stopped semitones for bowed strings.
    pub fret_count: i32,
    #[serde(default)]
    pub max_harmonic_order: i32,
}

impl InstrumentConfig {
    fn preset(
        name: &str,
        family: StringFamily,
        tuning: &[&str],
        fret_count: i32,
        order: i32,
    ) -> Self {
        InstrumentConfig {
            name: name.to_string(),
            family,
            tuning: tuning.iter().map(|note| note.to_string()).collect(),
            fret_count,
            max_harmonic_order: order,
        }
    }

    pub fn classical_guitar() -> Self {
        Self::preset(
            "classical guitar",
            StringFamily::Guitar,
            &["E2", "A2", "D3", "G3", "B3", "E4"],
            19,
            12,
        )
    }

    pub fn electric_guitar() -> Self {
        Self::preset(
            "electric guitar",
            StringFamily::Guitar,
            &["E2", "A2", "D3", "G3", "B3", "E4"],
            22,
            12,
        )
    }

    pub fn bass_guitar() -> Self {
        Self::preset("bass guitar", StringFamily::Guitar, &["E1", "A1", "D2", "G2"], 20, 8)
    }

    pub fn violin() -> Self {
        Self::preset("violin", StringFamily::Bowed, &["G3", "D4", "A4", "E5"], 12, 0)
    }

    pub fn viola() -> Self {
        Self::preset("viola", StringFamily::Bowed, &["C3", "G3", "D4", "A4"], 12, 0)
    }

    pub fn cello() -> Self {
        Self::preset("cello", StringFamily::Bowed, &["C2", "G2", "D3", "A3"], 12, 0)
    }

    /// Looks up a preset by name, case-insensitive; spaces and hyphens read as underscores.
    pub fn by_name(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "classical_guitar" | "guitar" => Some(Self::classical_guitar()),
            "electric_guitar" => Some(Self::electric_guitar()),
            "bass_guitar" | "bass" => Some(Self::bass_guitar()),
            "violin" => Some(Self::violin()),
            "viola" => Some(Self::viola()),
            "cello" => Some(Self::cello()),
            _ => None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn build(&self) -> Result<Fretboard> {
        let factory = StringFactory::new(self.family);
        Fretboard::build(&factory, &self.tuning, self.fret_count, self.max_harmonic_order)
    }
}
