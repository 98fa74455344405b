// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A modal G-code interpreter for simple 2- and 3-axis positioning devices.
//!
//! Command lines go in one at a time; absolute motion targets come out on
//! the other side of a small [`driver::Driver`] trait.  The interpreter
//! keeps the persistent ("modal") controller state between lines: active
//! units (G20/G21), absolute vs. incremental coordinates (G90/G91), the
//! feed rate, and the current position per axis.  G0/G1 become single
//! moves; on the planar variant G2/G3 arcs are decomposed into polylines
//! with a fixed chord-error tolerance.
//!
//! This is deliberately not a full G-code dialect: no canned cycles, tool
//! compensation, expressions or block numbers.  Unknown words are ignored,
//! so that the command streams of simple senders pass through unharmed.
//!
//! ## Basic usage
//!
//! Bind an interpreter to a driver (here the recording simulator) and feed
//! it lines:
//!
//! ```rust
//! use gmove::driver::SimDriver;
//! use gmove::interp::{Axis, AxisSet, Interpreter};
//!
//! let driver = SimDriver::new(vec![Axis::X, Axis::Y]);
//! let mut g = Interpreter::new(driver, AxisSet::PLANAR);
//! g.execute("G21 G90").unwrap();
//! g.execute("G0 X10 Y5").unwrap();
//! g.execute("G1 X20 Y5 F600").unwrap();
//!
//! let tracks = g.driver().tracks();
//! assert_eq!(tracks.len(), 2);
//! assert!(tracks[0].rapid && !tracks[1].rapid);
//! ```

pub mod driver;
pub mod interp;
pub mod jobs;
pub mod words;
