// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::{env, path::Path, process};

use gmove::driver::SimDriver;
use gmove::interp::{AxisSet, Interpreter};
use gmove::jobs::run_file;

fn main() {
    env_logger::init();
    let filename = match env::args().nth(1) {
        Some(filename) => filename,
        None => {
            eprintln!("usage: gmove-run <gcode-file>");
            process::exit(2);
        }
    };

    let driver = SimDriver::new(AxisSet::SPATIAL.axes);
    let mut g = Interpreter::new(driver, AxisSet::SPATIAL);
    if let Err(e) = run_file(&mut g, Path::new(&filename)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    for track in g.driver().tracks() {
        println!("{:?} -> {:?}  rapid={} feed={:?}",
                 track.from, track.to, track.rapid, track.feed);
    }
}
