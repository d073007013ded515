use ndarray::Array2;
use serde::Serialize;
use std::thread;
use tracing::{debug, info};

use crate::error::{FretboardError, Result};
use crate::instrument::music_note::MusicNote;
use crate::instrument::open_string::OpenString;
use crate::instrument::string_factory::{StringFactory, StringFamily};
use crate::instrument::touch_point::TouchPoint;

/// All strings of one instrument, in tuning-list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fretboard {
    family: StringFamily,
    strings: Vec<OpenString>,
}

/// A touch point together with the index of the string it lies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotePosition<'a> {
    pub string_index: usize,
    pub touch_point: &'a TouchPoint,
}

impl Fretboard {
    /// Builds every string from a list of pitch names such as `["E2", "A2"]`.
    pub fn build<S: AsRef<str>>(
        factory: &StringFactory,
        tuning: &[S],
        fret_count: i32,
        max_harmonic_order: i32,
    ) -> Result<Self> {
        check_string_count(factory, tuning.len())?;
        let notes = tuning
            .iter()
            .map(|name| MusicNote::from_name(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_notes(factory, &notes, fret_count, max_harmonic_order)
    }

    /// Builds every string from already parsed tunings.
    ///
    /// Either all strings are built or an error is returned.
    pub fn from_notes(
        factory: &StringFactory,
        tuning: &[MusicNote],
        fret_count: i32,
        max_harmonic_order: i32,
    ) -> Result<Self> {
        check_string_count(factory, tuning.len())?;
        factory.validate(fret_count, max_harmonic_order)?;

        // 每根弦互不依赖，各自在线程里构建
        let strings = thread::scope(|scope| {
            let handles: Vec<_> = tuning
                .iter()
                .map(|&note| {
                    scope.spawn(move || factory.build(note, fret_count, max_harmonic_order))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        info!(
            family = ?factory.family(),
            strings = strings.len(),
            fret_count,
            "built fretboard"
        );

        Ok(Fretboard {
            family: factory.family(),
            strings,
        })
    }

    pub fn family(&self) -> StringFamily {
        self.family
    }

    pub fn strings(&self) -> &[OpenString] {
        &self.strings
    }

    pub fn string(&self, index: usize) -> Option<&OpenString> {
        self.strings.get(index)
    }

    pub fn tuning(&self) -> Vec<MusicNote> {
        self.strings.iter().map(OpenString::tuning).collect()
    }

    /// Every place on the instrument that sounds `note`, frets and harmonics.
    pub fn touch_points_for(&self, note: MusicNote) -> Vec<NotePosition<'_>> {
        let positions: Vec<NotePosition<'_>> = self
            .strings
            .iter()
            .enumerate()
            .flat_map(|(string_index, string)| {
                string
                    .touch_points_for(note)
                    .map(move |touch_point| NotePosition {
                        string_index,
                        touch_point,
                    })
            })
            .collect();

        debug!(note = %note, found = positions.len(), "searched touch points");
        positions
    }

    /// Fretted frequencies, one row per string and one column per fret.
    pub fn frequency_table(&self) -> Array2<f64> {
        let columns = self
            .strings
            .iter()
            .map(|string| string.fret_count() as usize + 1)
            .max()
            .unwrap_or(0);

        Array2::from_shape_fn((self.strings.len(), columns), |(row, column)| {
            self.strings[row]
                .fret(column as i32)
                .map(|position| position.frequency())
                .unwrap_or(f64::NAN)
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_string_count(factory: &StringFactory, count: usize) -> Result<()> {
    let max_strings = factory.bounds().max_strings;
    if count == 0 {
        return Err(FretboardError::EmptyTuning);
    }
    if count > max_strings {
        return Err(FretboardError::TooManyStrings {
            count,
            max: max_strings,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::touch_point::TouchPosition;

    const STANDARD: [&str; 6] = ["E2", "A2", "D3", "G3", "B3", "E4"];

    #[test]
    fn test_standard_guitar() {
        let board = Fretboard::build(&StringFactory::guitar(), &STANDARD, 19, 12).unwrap();
        assert_eq!(board.strings().len(), 6);
        let tuning: Vec<i32> = board.tuning().iter().map(|note| note.num).collect();
        assert_eq!(tuning, vec![40, 45, 50, 55, 59, 64]);
        for string in board.strings() {
            assert_eq!(string.fretted_positions().count(), 20);
            assert_eq!(string.harmonic_nodes().count(), 20 * 45);
        }
    }

    #[test]
    fn test_tuning_list_bounds() {
        let factory = StringFactory::guitar();
        let empty: [&str; 0] = [];
        let err = Fretboard::build(&factory, &empty, 19, 12).unwrap_err();
        assert!(matches!(err, FretboardError::EmptyTuning));
        assert!(err.is_configuration_error());

        let thirteen = vec!["E2"; 13];
        let err = Fretboard::build(&factory, &thirteen, 19, 12).unwrap_err();
        assert!(matches!(err, FretboardError::TooManyStrings { count: 13, max: 12 }));

        let err = Fretboard::build(&factory, &STANDARD, -1, 12).unwrap_err();
        assert!(err.is_configuration_error());

        // 弦数超限优先于音名错误
        let mut bad_thirteen = vec!["E2"; 12];
        bad_thirteen.push("X9");
        let err = Fretboard::build(&factory, &bad_thirteen, 19, 12).unwrap_err();
        assert!(matches!(err, FretboardError::TooManyStrings { count: 13, max: 12 }));

        let err = Fretboard::build(&factory, &["E2", "X9"], 19, 12).unwrap_err();
        assert!(matches!(err, FretboardError::InvalidPitchName(name) if name == "X9"));
    }

    #[test]
    fn test_touch_points_for_note() {
        let board = Fretboard::build(&StringFactory::guitar(), &STANDARD, 19, 2).unwrap();
        // A3: 17th fret on low E through 2nd fret on G, plus two octave harmonics
        let found = board.touch_points_for(MusicNote::new(57));
        let frets: Vec<(usize, i32)> = found
            .iter()
            .filter_map(|p| p.touch_point.as_fret().map(|f| (p.string_index, f.fret_index())))
            .collect();
        assert_eq!(frets, vec![(0, 17), (1, 12), (2, 7), (3, 2)]);
        assert!(found.iter().all(|p| p.touch_point.pitch().num == 57));
        assert_eq!(found.iter().filter(|p| p.touch_point.is_harmonic()).count(), 2);
    }

    #[test]
    fn test_frequency_table() {
        let board = Fretboard::build(&StringFactory::guitar(), &STANDARD, 12, 2).unwrap();
        let table = board.frequency_table();
        assert_eq!(table.dim(), (6, 13));
        assert!((table[[0, 0]] - 82.41).abs() < 0.01);
        assert!((table[[0, 12]] - 164.81).abs() < 0.01);
        assert!((table[[5, 0]] - 329.63).abs() < 0.01);
        // 五品与下一根空弦同音 (B弦为四品)
        assert!((table[[0, 5]] - table[[1, 0]]).abs() < 1e-9);
        assert!((table[[3, 4]] - table[[4, 0]]).abs() < 1e-9);
    }

    #[test]
    fn test_json_export() {
        let violin = ["G3", "D4", "A4", "E5"];
        let board = Fretboard::build(&StringFactory::bowed(), &violin, 7, 0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&board.to_json().unwrap()).unwrap();
        assert_eq!(value["family"], "bowed");
        assert_eq!(value["strings"].as_array().unwrap().len(), 4);
        assert_eq!(value["strings"][0]["tuning"], "G3");
        assert_eq!(value["strings"][0]["touch_points"][7]["pitch"], "D4");
    }
}
