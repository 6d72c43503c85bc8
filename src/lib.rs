//! SysEx messages for grid controllers, and a thin MIDI sink to send them.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod device;
pub mod error;
pub mod midi;
pub mod script;
pub mod sysex;

pub use crate::error::{Error, Result};
