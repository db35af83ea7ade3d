//! Grid cell values.
//!
//! A cell is either a plain palette color or a lighting effect that still
//! lacks its pad index; the renderer fills the index in from the cell's
//! position. Cells that cannot be interpreted become [`GridCell::Skip`] and
//! leave their pad untouched.

use serde::de::{Deserializer, IgnoredAny};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mapping::GRID_SIZE;
use crate::protocol::{LightingSpec, SPEC_COLOR, SPEC_FLASH, SPEC_PULSE, SPEC_RGB};

/// Errors from strict tuple parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("empty cell tuple")]
    Empty,

    #[error("unknown lighting opcode {0}")]
    UnknownOpcode(i32),

    #[error("opcode {opcode} takes {expected} values, got {got}")]
    Arity {
        opcode: i32,
        expected: usize,
        got: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridCell {
    /// Static palette color
    Color(i32),
    /// Alternate between two palette colors
    Flash(i32, i32),
    /// Pulse a palette color
    Pulse(i32),
    /// Static RGB color
    Rgb(i32, i32, i32),
    /// Leave the pad out of the command
    #[default]
    Skip,
}

/// An 8x8 frame of cells, top row first.
pub type Grid = [[GridCell; GRID_SIZE]; GRID_SIZE];

/// A grid with every cell set to `cell`.
pub fn uniform_grid(cell: GridCell) -> Grid {
    [[cell; GRID_SIZE]; GRID_SIZE]
}

impl GridCell {
    /// Interpret an opcode-tagged tuple, `[op, values..]`.
    ///
    /// Anything that does not parse becomes [`GridCell::Skip`].
    pub fn from_tuple(values: &[i32]) -> Self {
        match Self::try_from(values) {
            Ok(cell) => cell,
            Err(e) => {
                tracing::debug!("Skipping grid cell {:?}: {}", values, e);
                GridCell::Skip
            }
        }
    }

    /// Attach a pad index, giving the full lighting spec.
    pub fn with_index(self, index: i32) -> Option<LightingSpec> {
        match self {
            GridCell::Color(color) => Some(LightingSpec::Color { index, color }),
            GridCell::Flash(color_a, color_b) => Some(LightingSpec::Flash {
                index,
                color_a,
                color_b,
            }),
            GridCell::Pulse(color) => Some(LightingSpec::Pulse { index, color }),
            GridCell::Rgb(r, g, b) => Some(LightingSpec::Rgb { index, r, g, b }),
            GridCell::Skip => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, GridCell::Skip)
    }

    fn to_tuple(self) -> Option<Vec<i32>> {
        match self {
            GridCell::Color(color) => Some(vec![i32::from(SPEC_COLOR), color]),
            GridCell::Flash(a, b) => Some(vec![i32::from(SPEC_FLASH), a, b]),
            GridCell::Pulse(color) => Some(vec![i32::from(SPEC_PULSE), color]),
            GridCell::Rgb(r, g, b) => Some(vec![i32::from(SPEC_RGB), r, g, b]),
            GridCell::Skip => None,
        }
    }
}

impl From<i32> for GridCell {
    fn from(color: i32) -> Self {
        GridCell::Color(color)
    }
}

impl TryFrom<&[i32]> for GridCell {
    type Error = CellError;

    fn try_from(values: &[i32]) -> Result<Self, Self::Error> {
        let (&opcode, fields) = values.split_first().ok_or(CellError::Empty)?;

        let expected = match opcode {
            op if op == i32::from(SPEC_COLOR) => 1,
            op if op == i32::from(SPEC_FLASH) => 2,
            op if op == i32::from(SPEC_PULSE) => 1,
            op if op == i32::from(SPEC_RGB) => 3,
            _ => return Err(CellError::UnknownOpcode(opcode)),
        };

        if fields.len() != expected {
            return Err(CellError::Arity {
                opcode,
                expected,
                got: fields.len(),
            });
        }

        Ok(match opcode {
            0 => GridCell::Color(fields[0]),
            1 => GridCell::Flash(fields[0], fields[1]),
            2 => GridCell::Pulse(fields[0]),
            _ => GridCell::Rgb(fields[0], fields[1], fields[2]),
        })
    }
}

/// Wire shape of a cell: a number, a tuple, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Scalar(i32),
    Tuple(Vec<i32>),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for GridCell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawCell::deserialize(deserializer)? {
            RawCell::Scalar(color) => GridCell::Color(color),
            RawCell::Tuple(values) => GridCell::from_tuple(&values),
            RawCell::Other(_) => GridCell::Skip,
        })
    }
}

impl Serialize for GridCell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match (self, self.to_tuple()) {
            (GridCell::Color(color), _) => serializer.serialize_i32(*color),
            (_, Some(values)) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in &values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            (_, None) => serializer.serialize_none(),
        }
    }
}
