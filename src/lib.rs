//! Speed- and g-force-dependent camera field-of-view for racing simulators.

#[macro_use]
extern crate tracing;

#[macro_use]
mod macros;

pub mod host;
pub mod logging;
pub mod modules;
pub mod settings;
