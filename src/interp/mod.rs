// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! The modal interpreter core.
//!
//! One [`Interpreter`] owns one [`ModalState`] and one driver.  Feeding it
//! command lines through [`Interpreter::execute`] mutates the modal state
//! and emits zero or more absolute-target moves to the driver.  All stored
//! state is metric; unit conversion happens when a word is read, never on
//! the stored values.

mod enums;
mod error;

use std::collections::HashMap;
use std::f64::consts::PI;
use log::debug;

use crate::driver::Driver;
use crate::words::{self, Word};

pub use self::enums::*;
pub use self::error::*;

/// Feed rate assumed until the first F word, in mm/min.
const DEFAULT_FEED: f64 = 1200.0;

const MM_PER_INCH: f64 = 25.4;

/// Chord error tolerance for arc decomposition, in mm.
const CHORD_ERROR: f64 = 0.02;

/// Controller settings that persist across command lines.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalState {
    /// False after a G20 until the next G21.
    pub units_mm: bool,
    /// False after a G91 until the next G90.
    pub absolute: bool,
    /// Modal feed rate in mm/min.
    pub feed: f64,
    /// Current position per configured axis, in mm.
    pub pos: HashMap<Axis, f64>,
}

impl ModalState {
    fn new(axes: &[Axis]) -> Self {
        ModalState {
            units_mm: true,
            absolute: true,
            feed: DEFAULT_FEED,
            pos: axes.iter().map(|&axis| (axis, 0.0)).collect(),
        }
    }
}

/// Axis and parameter values collected from the words of one motion line.
#[derive(Default)]
struct Params {
    // Duplicate words on a line overwrite during collection.
    axes: HashMap<Axis, f64>,
    offsets: HashMap<Offset, f64>,
    feed: Option<f64>,
}

/// The Interpreter applies modal words to its state and decomposes motion
/// commands into absolute-target driver calls.
///
/// It is synchronous and non-reentrant: `execute` runs to completion,
/// driver calls included, before the next line can be processed.
pub struct Interpreter<D> {
    drv: D,
    cfg: AxisSet,
    m: ModalState,
}

impl<D: Driver> Interpreter<D> {
    /// Bind a fresh modal state and the given driver.
    pub fn new(driver: D, cfg: AxisSet) -> Self {
        Interpreter {
            drv: driver,
            m: ModalState::new(cfg.axes),
            cfg,
        }
    }

    /// Execute a single command line.
    ///
    /// Comment-only and empty lines are no-ops.  Malformed numeric values
    /// are dropped word by word; the only reportable conditions are an
    /// unhandled motion code and a driver failure.
    pub fn execute(&mut self, line: &str) -> Result<(), ExecError> {
        debug!("exec: {}", line.trim_end());
        let line = words::tokenize(line);
        if line.home {
            self.drv.home()?;
            return Ok(());
        }
        if line.words.is_empty() {
            return Ok(());
        }

        self.apply_modal(&line.words)?;
        self.update_feed(&line.words);

        if let Some(gcode) = self.motion_code(&line.words) {
            self.handle_motion(gcode, &line.words)?;
        }
        Ok(())
    }

    /// The modal state after the lines executed so far.
    pub fn state(&self) -> &ModalState {
        &self.m
    }

    pub fn driver(&self) -> &D {
        &self.drv
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.drv
    }

    pub fn into_driver(self) -> D {
        self.drv
    }

    // -- private API --

    fn apply_modal(&mut self, words: &[Word]) -> Result<(), ExecError> {
        for word in words {
            if word.letter != 'G' {
                continue;
            }
            let g = match word.value_num() {
                Some(v) => v,
                None => continue,
            };
            if g == 20.0 {
                self.m.units_mm = false;
                self.drv.set_units_inch()?;
            } else if g == 21.0 {
                self.m.units_mm = true;
                self.drv.set_units_mm()?;
            } else if g == 90.0 {
                self.m.absolute = true;
            } else if g == 91.0 {
                self.m.absolute = false;
            }
        }
        Ok(())
    }

    // The stored feed is kept in mm/min, so the raw word value is converted
    // with the units active on this line.  A negative F is treated like a
    // parse failure; the stored feed is never negative.
    fn update_feed(&mut self, words: &[Word]) {
        for word in words {
            if word.letter == 'F' {
                match word.value_num() {
                    Some(value) if value >= 0.0 => self.m.feed = self.to_mm(value),
                    _ => (),
                }
            }
        }
    }

    /// The first G word on the line whose integer value is in the configured
    /// motion set, if any.
    fn motion_code(&self, words: &[Word]) -> Option<u16> {
        for word in words {
            if word.letter != 'G' {
                continue;
            }
            let g = match word.value_num() {
                Some(v) => v.trunc(),
                None => continue,
            };
            if g < 0.0 || g > f64::from(u16::MAX) {
                continue;
            }
            let g = g as u16;
            if self.cfg.motion_codes.contains(&g) {
                return Some(g);
            }
        }
        None
    }

    fn collect_params(&self, words: &[Word]) -> Params {
        let mut params = Params::default();
        for word in words {
            let value = match word.value_num() {
                Some(v) => v,
                None => continue,
            };
            if let Some(axis) = Axis::from_letter(word.letter) {
                if self.cfg.axes.contains(&axis) {
                    params.axes.insert(axis, value);
                }
            } else if let Some(offset) = Offset::from_letter(word.letter) {
                if self.cfg.offsets.contains(&offset) {
                    params.offsets.insert(offset, value);
                }
            } else if word.letter == 'F' {
                params.feed = Some(value);
            }
        }
        params
    }

    fn handle_motion(&mut self, gcode: u16, words: &[Word]) -> Result<(), ExecError> {
        let params = self.collect_params(words);
        match gcode {
            0 | 1 => self.linear_move(gcode == 0, &params),
            2 | 3 if self.cfg.arcs => self.arc_move(gcode == 2, &params),
            _ => Err(ExecError::UnsupportedMotion(gcode)),
        }
    }

    /// The new absolute target for one axis, given the raw word value (if
    /// the axis appeared on the line) and the current position.
    fn axis_target(&self, raw: Option<f64>, current: f64) -> f64 {
        match raw {
            Some(raw) => {
                let value = self.to_mm(raw);
                if self.m.absolute { value } else { current + value }
            }
            None => current,
        }
    }

    fn linear_move(&mut self, rapid: bool, params: &Params) -> Result<(), ExecError> {
        let mut target = Coords::default();
        for &axis in self.cfg.axes {
            let current = self.m.pos[&axis];
            target.map.insert(axis, self.axis_target(params.axes.get(&axis).copied(), current));
        }
        let feed = self.resolve_feed(params);
        self.drv.move_abs(&target, Some(feed), rapid)?;
        // Commit only once the driver has accepted the move.
        for (&axis, &value) in &target.map {
            self.m.pos.insert(axis, value);
        }
        Ok(())
    }

    /// Decompose a G2/G3 circular arc into chords and send each chord end
    /// to the driver.  The center is given by I/J offsets from the current
    /// position, relative regardless of the coordinate mode.
    fn arc_move(&mut self, cw: bool, params: &Params) -> Result<(), ExecError> {
        let (ax, ay) = (self.cfg.axes[0], self.cfg.axes[1]);
        let (x0, y0) = (self.m.pos[&ax], self.m.pos[&ay]);

        let ex = self.axis_target(params.axes.get(&ax).copied(), x0);
        let ey = self.axis_target(params.axes.get(&ay).copied(), y0);
        let cx = x0 + self.to_mm(params.offsets.get(&Offset::I).copied().unwrap_or(0.0));
        let cy = y0 + self.to_mm(params.offsets.get(&Offset::J).copied().unwrap_or(0.0));
        let feed = self.resolve_feed(params);

        let start = (y0 - cy).atan2(x0 - cx);
        let end = (ey - cy).atan2(ex - cx);
        let mut sweep = end - start;
        // Force the rotational direction, whatever the naive difference says.
        if cw {
            if sweep >= 0.0 {
                sweep -= 2.0 * PI;
            }
        } else if sweep <= 0.0 {
            sweep += 2.0 * PI;
        }

        let radius = (x0 - cx).hypot(y0 - cy);
        let max_step = 2.0 * (1.0 - CHORD_ERROR / radius.max(1e-9)).max(0.0).acos();
        let steps = ((sweep.abs() / max_step.max(1e-3)).ceil() as usize).max(12);
        debug!("arc: end=({}, {}) center=({}, {}) r={} steps={}", ex, ey, cx, cy, radius, steps);

        for k in 1..=steps {
            let theta = start + sweep * (k as f64 / steps as f64);
            let mut target = Coords::default();
            target.map.insert(ax, cx + radius * theta.cos());
            target.map.insert(ay, cy + radius * theta.sin());
            self.drv.move_abs(&target, Some(feed), false)?;
        }

        // The driver saw every chord point; modal position tracks only the
        // exact endpoint.
        self.m.pos.insert(ax, ex);
        self.m.pos.insert(ay, ey);
        Ok(())
    }

    /// The feed for one motion line: an F word on the line (in the active
    /// units) wins over the stored modal feed.  Negative values are ignored.
    fn resolve_feed(&self, params: &Params) -> f64 {
        match params.feed {
            Some(feed) if feed >= 0.0 => self.to_mm(feed),
            _ => self.m.feed,
        }
    }

    fn to_mm(&self, value: f64) -> f64 {
        if self.m.units_mm { value } else { value * MM_PER_INCH }
    }
}
