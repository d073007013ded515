use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FretboardError, Result};
use crate::instrument::fretted_position::FrettedPosition;
use crate::instrument::harmonic_generator::HarmonicNodeGenerator;
use crate::instrument::music_note::MusicNote;
use crate::instrument::open_string::OpenString;
use crate::instrument::touch_point::TouchPoint;

/// Instrument families that differ in how their strings are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringFamily {
    /// Fretted strings with natural harmonics over every fret.
    Guitar,
    /// Fingerboard strings stopped by semitone, no harmonics.
    Bowed,
}

impl StringFamily {
    pub fn bounds(&self) -> FamilyBounds {
        match self {
            StringFamily::Guitar => FamilyBounds {
                min_positions: 0,
                max_positions: 36,
                harmonic_orders: Some((2, 12)),
                max_strings: 12,
            },
            StringFamily::Bowed => FamilyBounds {
                min_positions: 4,
                max_positions: 12,
                harmonic_orders: None,
                max_strings: 6,
            },
        }
    }
}

/// Construction limits of one instrument family.
///
/// `harmonic_orders` is the inclusive range of the maximum harmonic order,
/// `None` when the family has no harmonics (the order must then be 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyBounds {
    pub min_positions: i32,
    pub max_positions: i32,
    pub harmonic_orders: Option<(i32, i32)>,
    pub max_strings: usize,
}

/// Hard ceilings for custom bounds.
const POSITION_LIMIT: i32 = 128;
const HARMONIC_ORDER_LIMIT: i32 = 64;
const STRING_LIMIT: usize = 64;

impl FamilyBounds {
    /// Rejects negative, inverted or oversized limits.
    pub fn check(&self) -> Result<()> {
        if self.max_positions < 0 || self.max_positions > POSITION_LIMIT {
            return Err(FretboardError::out_of_range(
                "max_positions",
                self.max_positions as i64,
                0,
                POSITION_LIMIT as i64,
            ));
        }
        if self.min_positions < 0 || self.min_positions > self.max_positions {
            return Err(FretboardError::out_of_range(
                "min_positions",
                self.min_positions as i64,
                0,
                self.max_positions as i64,
            ));
        }
        if let Some((min_order, max_order)) = self.harmonic_orders {
            if max_order < 1 || max_order > HARMONIC_ORDER_LIMIT {
                return Err(FretboardError::out_of_range(
                    "max_harmonic_order_bound",
                    max_order as i64,
                    1,
                    HARMONIC_ORDER_LIMIT as i64,
                ));
            }
            if min_order < 1 || min_order > max_order {
                return Err(FretboardError::out_of_range(
                    "min_harmonic_order_bound",
                    min_order as i64,
                    1,
                    max_order as i64,
                ));
            }
        }
        if self.max_strings < 1 || self.max_strings > STRING_LIMIT {
            return Err(FretboardError::out_of_range(
                "max_strings",
                self.max_strings as i64,
                1,
                STRING_LIMIT as i64,
            ));
        }
        Ok(())
    }
}

/// Validates string parameters and assembles [`OpenString`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringFactory {
    family: StringFamily,
    bounds: FamilyBounds,
}

impl StringFactory {
    pub fn new(family: StringFamily) -> Self {
        StringFactory {
            family,
            bounds: family.bounds(),
        }
    }

    /// A factory with custom limits, e.g. for an extended-range instrument.
    ///
    /// Fails if the limits are negative, inverted or beyond the hard
    /// ceilings (128 positions, harmonic order 64, 64 strings).
    pub fn with_bounds(family: StringFamily, bounds: FamilyBounds) -> Result<Self> {
        bounds.check()?;
        Ok(StringFactory { family, bounds })
    }

    pub fn guitar() -> Self {
        Self::new(StringFamily::Guitar)
    }

    pub fn bowed() -> Self {
        Self::new(StringFamily::Bowed)
    }

    pub fn family(&self) -> StringFamily {
        self.family
    }

    pub fn bounds(&self) -> &FamilyBounds {
        &self.bounds
    }

    /// Checks the fret (or semitone) count and harmonic order against the
    /// family bounds.
    pub fn validate(&self, fret_count: i32, max_harmonic_order: i32) -> Result<()> {
        let bounds = &self.bounds;
        let positions_name = match self.family {
            StringFamily::Guitar => "fret_count",
            StringFamily::Bowed => "semitone_count",
        };
        if fret_count < bounds.min_positions || fret_count > bounds.max_positions {
            return Err(FretboardError::out_of_range(
                positions_name,
                fret_count as i64,
                bounds.min_positions as i64,
                bounds.max_positions as i64,
            ));
        }

        let (min_order, max_order) = bounds.harmonic_orders.unwrap_or((0, 0));
        if max_harmonic_order < min_order || max_harmonic_order > max_order {
            return Err(FretboardError::out_of_range(
                "max_harmonic_order",
                max_harmonic_order as i64,
                min_order as i64,
                max_order as i64,
            ));
        }

        Ok(())
    }

    /// Builds a string tuned to `tuning` with every fret and, for families
    /// with harmonics, every harmonic node over each fret.
    pub fn build(
        &self,
        tuning: MusicNote,
        fret_count: i32,
        max_harmonic_order: i32,
    ) -> Result<OpenString> {
        self.validate(fret_count, max_harmonic_order)?;

        let positions = (0..=fret_count)
            .map(|fret| FrettedPosition::new(tuning, fret, fret_count))
            .collect::<Result<Vec<_>>>()?;

        let mut touch_points: Vec<TouchPoint> =
            positions.iter().copied().map(TouchPoint::from).collect();

        if self.bounds.harmonic_orders.is_some() {
            let generator = HarmonicNodeGenerator::new(max_harmonic_order as u32);
            touch_points.reserve(positions.len() * generator.node_count());
            for root in &positions {
                let nodes = generator.nodes_for(root)?;
                touch_points.extend(nodes.into_iter().map(TouchPoint::from));
            }
        }

        debug!(
            tuning = %tuning,
            family = ?self.family,
            fret_count,
            max_harmonic_order,
            touch_points = touch_points.len(),
            "built string"
        );

        Ok(OpenString::from_parts(
            self.family,
            tuning,
            fret_count,
            max_harmonic_order,
            touch_points,
        ))
    }
}
