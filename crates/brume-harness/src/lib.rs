//! Native headless harness for the terrain shading core: deterministic
//! scenes, offscreen rendering with pixel readback, analytic shading
//! checks, and JSON reports. This crate plays the host application's role;
//! the shading core itself lives in brume-render.

pub mod checks;
pub mod report;
pub mod runner;
pub mod scenes;
