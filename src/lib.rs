//! Planar visibility graphs and isovists.
//!
//! A [`graph::Graph`] is built from one boundary ring and any number of
//! obstacle rings lying in the same plane. The queries in
//! [`operations::query`] then report which polygon vertices a viewpoint can
//! see, which vertex pairs see each other, and the isovist polygon around a
//! viewpoint.

pub mod error;
pub mod geometry;
pub mod graph;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{ErrorKind, Result, SightlineError};
