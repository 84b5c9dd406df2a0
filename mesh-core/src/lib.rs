#![cfg_attr(not(feature = "std"), no_std)]

//! Simulation and render core for an animated, pointer-reactive Delaunay mesh.
//!
//! - `vector`: 2D vector algebra
//! - `node` / `integrator`: per-node physics state and the one-tick update rule
//! - `triangulation`: node set to edge list through a pluggable [`Triangulator`]
//! - `pointer`: pointer state machine and host listener bookkeeping
//! - `surface` / `render`: drawing contract and the two-pass painter
//! - `engine`: the handle that owns a run and is driven once per frame

extern crate alloc;

pub mod config;
pub mod engine;
pub mod integrator;
pub mod node;
pub mod pointer;
pub mod render;
pub mod surface;
pub mod triangulation;
pub mod vector;

pub use config::{CoordinateSpace, MeshConfig, PhysicsConfig, SeedPlacement, StyleConfig, ViewportParams};
pub use engine::{EngineState, LoopControl, MeshEngine};
pub use node::AnimatedNode;
pub use pointer::{
    ClientPoint, ListenerChange, ListenerChanges, ListenerKind, PointerController, PointerEvent,
    PointerPhase, SurfaceMapping,
};
pub use render::SurfaceSize;
pub use surface::{CompositeMode, Surface};
#[cfg(feature = "delaunator")]
pub use triangulation::DelaunatorTriangulator;
pub use triangulation::{Edge, Triangle, Triangulator};
pub use vector::Vector2D;

/// Errors from configuring or starting the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// No usable drawing surface yet (zero size or no context).
    EnvironmentUnavailable,
    InvalidConfig(&'static str),
    AlreadyStarted,
    /// A stopped engine is discarded, not restarted.
    Stopped,
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::EnvironmentUnavailable => write!(f, "drawing surface unavailable"),
            EngineError::InvalidConfig(reason) => write!(f, "invalid mesh config: {}", reason),
            EngineError::AlreadyStarted => write!(f, "engine already started"),
            EngineError::Stopped => write!(f, "engine has been stopped"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
