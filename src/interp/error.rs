// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;

use crate::driver::DriverError;

/// Failure while executing one command line.
///
/// Neither variant poisons the interpreter; the caller decides whether to
/// abort the rest of the run.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecError {
    /// A G code from the configured motion set that this variant has no
    /// handler for, e.g. G2 on an interpreter without arc support.
    UnsupportedMotion(u16),
    /// The driver rejected a call.  Modal position is left un-advanced for
    /// the failed command.
    Driver(DriverError),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecError::UnsupportedMotion(code) =>
                write!(f, "G{} is not supported by this interpreter", code),
            ExecError::Driver(err) =>
                write!(f, "driver error: {}", err),
        }
    }
}

impl std::error::Error for ExecError {}

impl From<DriverError> for ExecError {
    fn from(err: DriverError) -> Self {
        ExecError::Driver(err)
    }
}
