//! Fretboard and harmonic touch-point model for stringed instruments.
//!
//! Every string is built once by a [`StringFactory`] and exposes its open
//! position, every fret and every natural harmonic node with distance from
//! the nut, equal-tempered pitch and frequency.

pub mod config;
pub mod error;
pub mod instrument;
pub mod utils;

pub use config::InstrumentConfig;
pub use error::{FretboardError, Result};
pub use instrument::fretboard::{Fretboard, NotePosition};
pub use instrument::fretted_position::FrettedPosition;
pub use instrument::harmonic_generator::HarmonicNodeGenerator;
pub use instrument::harmonic_node::HarmonicNode;
pub use instrument::music_note::{MusicNote, name_of, number_of};
pub use instrument::open_string::OpenString;
pub use instrument::string_factory::{FamilyBounds, StringFactory, StringFamily};
pub use instrument::touch_point::{TouchPoint, TouchPosition};
