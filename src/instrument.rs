//! 弦乐器模块
//!
//! Strings, their fretted positions and harmonic nodes, and whole fretboards.

pub mod fretboard;
pub mod fretted_position;
pub mod harmonic_generator;
pub mod harmonic_node;
pub mod music_note;
pub mod open_string;
pub mod string_factory;
pub mod touch_point;
