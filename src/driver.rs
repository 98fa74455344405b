// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! The boundary between the interpreter and a positioning device.
//!
//! Drivers receive fully resolved absolute targets in millimeters and know
//! nothing about G-code.  The unit and homing hooks are optional; the
//! default implementations do nothing, so a driver only implements what its
//! hardware supports.

use std::fmt;
use log::debug;

use crate::interp::{Axis, Coords};

/// An error reported by a driver.  The interpreter never inspects it, it
/// only forwards it to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverError {
    message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        DriverError { message: message.into() }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DriverError {}

/// Capabilities of a positioning device.
pub trait Driver {
    /// Switch the device to millimeter units.
    fn set_units_mm(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    /// Switch the device to inch units.
    fn set_units_inch(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    /// Run the device's homing cycle.
    fn home(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    /// Move to the given absolute target.  Axes absent from the target keep
    /// their current value.  `feed` is in mm/min; rapid moves may ignore it.
    fn move_abs(&mut self, target: &Coords, feed: Option<f64>, rapid: bool)
        -> Result<(), DriverError>;
}

/// One recorded move of the [`SimDriver`].
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub from: Coords,
    pub to: Coords,
    pub rapid: bool,
    pub feed: Option<f64>,
}

/// A driver that only records where it was told to go.
///
/// Keeps a current position per configured axis so that partial targets are
/// completed the same way a real controller would, and appends one [`Track`]
/// per move.
pub struct SimDriver {
    axes: Vec<Axis>,
    pos: Coords,
    tracks: Vec<Track>,
}

impl SimDriver {
    pub fn new(axes: impl Into<Vec<Axis>>) -> Self {
        let axes = axes.into();
        let pos = Coords { map: axes.iter().map(|&axis| (axis, 0.0)).collect() };
        SimDriver { axes, pos, tracks: vec![] }
    }

    /// All moves recorded so far, in order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The position after the last recorded move.
    pub fn position(&self) -> &Coords {
        &self.pos
    }
}

impl Driver for SimDriver {
    fn home(&mut self) -> Result<(), DriverError> {
        for value in self.pos.map.values_mut() {
            *value = 0.0;
        }
        Ok(())
    }

    fn move_abs(&mut self, target: &Coords, feed: Option<f64>, rapid: bool)
        -> Result<(), DriverError>
    {
        let mut next = self.pos.clone();
        for &axis in &self.axes {
            if let Some(value) = target.get(axis) {
                next.map.insert(axis, value);
            }
        }
        debug!("sim: from={:?} to={:?} rapid={} feed={:?}", self.pos, next, rapid, feed);
        self.tracks.push(Track { from: self.pos.clone(), to: next.clone(), rapid, feed });
        self.pos = next;
        Ok(())
    }
}
