// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Pattern generators and file replay.
//!
//! Jobs feed synthetic G-code into an interpreter; they never talk to the
//! driver directly.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use itertools::Either;
use log::debug;

use crate::driver::Driver;
use crate::interp::{ExecError, Interpreter};

/// Failure while running a job.
#[derive(Debug)]
pub enum JobError {
    Io(io::Error),
    Exec(ExecError),
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobError::Io(err) => write!(f, "i/o error: {}", err),
            JobError::Exec(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for JobError {}

impl From<io::Error> for JobError {
    fn from(err: io::Error) -> Self {
        JobError::Io(err)
    }
}

impl From<ExecError> for JobError {
    fn from(err: ExecError) -> Self {
        JobError::Exec(err)
    }
}

/// Options for [`grid_circles`].  Lengths in mm, feed in mm/min.
#[derive(Clone, Debug)]
pub struct GridCircles {
    pub origin: (f64, f64),
    pub area: (f64, f64),
    pub cell: f64,
    pub circle_d: f64,
    pub feed: f64,
    pub cw: bool,
    /// Alternate the column direction on every other row.
    pub snake: bool,
}

impl Default for GridCircles {
    fn default() -> Self {
        GridCircles {
            origin: (0.0, 0.0),
            area: (100.0, 100.0),
            cell: 20.0,
            circle_d: 20.0,
            feed: 1200.0,
            cw: false,
            snake: true,
        }
    }
}

/// Draw a full circle in every grid cell: rapid to the cell center, feed to
/// the right edge of the circle, then one G2/G3 around it.
pub fn grid_circles<D: Driver>(g: &mut Interpreter<D>, job: &GridCircles)
    -> Result<(), ExecError>
{
    let (ox, oy) = job.origin;
    let (w, h) = job.area;
    let r = job.circle_d / 2.0;

    g.execute("G21 G90")?;
    g.execute(&format!("F{}", job.feed))?;

    let nx = (w / job.cell) as usize;
    let ny = (h / job.cell) as usize;
    let (base_cx, base_cy) = (ox + job.cell / 2.0, oy + job.cell / 2.0);

    for j in 0..ny {
        let cols = if !job.snake || j % 2 == 0 {
            Either::Left(0..nx)
        } else {
            Either::Right((0..nx).rev())
        };
        for i in cols {
            let cx = base_cx + i as f64 * job.cell;
            let cy = base_cy + j as f64 * job.cell;
            debug!("grid_circles: center=({:.3}, {:.3})", cx, cy);
            g.execute(&format!("G0 X{:.3} Y{:.3}", cx, cy))?;
            g.execute(&format!("G1 X{:.3} Y{:.3}", cx + r, cy))?;
            let code = if job.cw { "G2" } else { "G3" };
            g.execute(&format!("{} X{:.3} Y{:.3} I{:.3} J0", code, cx + r, cy, -r))?;
        }
    }
    Ok(())
}

/// Options for [`grid_spheres`].  Lengths in mm, feed in mm/min.
#[derive(Clone, Debug)]
pub struct GridSpheres {
    pub origin: (f64, f64, f64),
    pub area: (f64, f64, f64),
    pub cell: f64,
    pub sphere_d: f64,
    pub feed: f64,
    /// Number of Z slices per sphere.
    pub levels: usize,
}

impl Default for GridSpheres {
    fn default() -> Self {
        GridSpheres {
            origin: (0.0, 0.0, 0.0),
            area: (100.0, 100.0, 50.0),
            cell: 20.0,
            sphere_d: 15.0,
            feed: 1000.0,
            levels: 3,
        }
    }
}

/// Trace every sphere of a 3D grid as a stack of XY circles, starting from
/// Z = 0.  Slices below the table are clamped to Z = 0.
pub fn grid_spheres<D: Driver>(g: &mut Interpreter<D>, job: &GridSpheres)
    -> Result<(), ExecError>
{
    let (ox, oy, oz) = job.origin;
    let (w, h, d) = job.area;
    let r = job.sphere_d / 2.0;

    g.execute("G21 G90")?;
    g.execute(&format!("F{}", job.feed))?;
    g.execute("G0 Z0")?;

    let nx = (w / job.cell) as usize;
    let ny = (h / job.cell) as usize;
    let nz = (d / job.cell) as usize;
    let (base_cx, base_cy, base_cz) =
        (ox + job.cell / 2.0, oy + job.cell / 2.0, oz + job.cell / 2.0);

    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let cx = base_cx + i as f64 * job.cell;
                let cy = base_cy + j as f64 * job.cell;
                let cz = base_cz + k as f64 * job.cell;
                debug!("grid_spheres: center=({:.3}, {:.3}, {:.3})", cx, cy, cz);

                for level in 0..job.levels {
                    let z_offset = (level as f64 / job.levels as f64) * 2.0 * r - r;
                    let z_pos = (cz + z_offset).max(0.0);
                    if z_offset.abs() > r {
                        continue;
                    }
                    let circle_r = (r * r - z_offset * z_offset).sqrt();
                    if circle_r <= 0.5 {
                        continue;
                    }
                    let steps = ((circle_r * 4.0) as usize).max(6);
                    let z = if level == 0 { 0.0 } else { z_pos };
                    g.execute(&format!("G0 X{:.3} Y{:.3} Z{:.3}", cx + circle_r, cy, z))?;
                    for step in 0..=steps {
                        let angle = 2.0 * std::f64::consts::PI * step as f64 / steps as f64;
                        let x = cx + circle_r * angle.cos();
                        let y = cy + circle_r * angle.sin();
                        g.execute(&format!("G1 X{:.3} Y{:.3} Z{:.3}", x, y, z))?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Replay a G-code file line by line.
pub fn run_file<D: Driver>(g: &mut Interpreter<D>, path: &Path) -> Result<(), JobError> {
    let text = fs::read_to_string(path)?;
    for line in text.lines() {
        g.execute(line)?;
    }
    Ok(())
}
