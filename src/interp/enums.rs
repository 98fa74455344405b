// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::collections::HashMap;
use std::fmt;
use strum_macros::Display;

/// A linear axis known to the interpreter.
///
/// Concrete interpreter variants use an ordered subset of these.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Axis {
    X, Y, Z,
}

impl Axis {
    pub(crate) fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'X' => Axis::X,
            'Y' => Axis::Y,
            'Z' => Axis::Z,
            _ => return None,
        })
    }
}

/// An arc center offset word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Offset {
    I, J, K,
}

impl Offset {
    pub(crate) fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'I' => Offset::I,
            'J' => Offset::J,
            'K' => Offset::K,
            _ => return None,
        })
    }
}

/// A collection of absolute axis targets.
///
/// All values are in millimeters.  Axes absent from the map are understood
/// by the receiver as "leave unchanged".
#[derive(Clone, Default, PartialEq)]
pub struct Coords {
    pub map: HashMap<Axis, f64>,
}

impl Coords {
    pub fn get(&self, axis: Axis) -> Option<f64> {
        self.map.get(&axis).copied()
    }
}

impl fmt::Debug for Coords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut i = 0;
        for (k, v) in self.map.iter() {
            i += 1;
            write!(f, "{}={}", k, v)?;
            if i < self.map.len() {
                write!(f, ", ")?;
            }
        }
        Ok(())
    }
}

/// The axis configuration of an interpreter variant: which linear axes it
/// drives (in order), which extra parameter words it collects, which G codes
/// it treats as motion, and whether it can decompose arcs.
#[derive(Clone, Copy, Debug)]
pub struct AxisSet {
    pub axes: &'static [Axis],
    pub offsets: &'static [Offset],
    pub motion_codes: &'static [u16],
    pub arcs: bool,
}

impl AxisSet {
    /// X/Y table with G2/G3 circular interpolation.
    pub const PLANAR: AxisSet = AxisSet {
        axes: &[Axis::X, Axis::Y],
        offsets: &[Offset::I, Offset::J],
        motion_codes: &[0, 1, 2, 3],
        arcs: true,
    };

    /// X/Y/Z gantry, straight moves only.  G2/G3 stay in the motion set so
    /// they are rejected loudly instead of silently dropped.
    pub const SPATIAL: AxisSet = AxisSet {
        axes: &[Axis::X, Axis::Y, Axis::Z],
        offsets: &[Offset::I, Offset::J, Offset::K],
        motion_codes: &[0, 1, 2, 3],
        arcs: false,
    };
}
