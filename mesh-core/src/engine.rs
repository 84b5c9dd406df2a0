use alloc::vec::Vec;

#[cfg(feature = "std")]
use rand::Rng;

use crate::config::{CoordinateSpace, MeshConfig, ViewportParams};
use crate::integrator;
use crate::node::AnimatedNode;
use crate::pointer::{
    ListenerChanges, ListenerKind, ListenerRegistry, PointerController, PointerEvent, SurfaceMapping,
};
use crate::render::{self, SurfaceSize};
use crate::surface::Surface;
use crate::triangulation::{self, Triangulator};
use crate::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created, waiting for a usable surface.
    Idle,
    Running,
    Stopped,
}

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule another frame on the next display refresh.
    Continue,
    Halt,
}

/// Handle owning one simulation run: nodes, surface size, pointer state,
/// host listeners and the stop flag.
///
/// The host drives it: `mount`, `resize`, `start`, then `tick` once per
/// display refresh for as long as it returns [`LoopControl::Continue`], and
/// finally `stop`.
pub struct MeshEngine<T> {
    config: MeshConfig,
    triangulator: T,
    nodes: Vec<AnimatedNode>,
    size: SurfaceSize,
    pointer: PointerController,
    listeners: ListenerRegistry,
    state: EngineState,
    final_frame_done: bool,
    frames_rendered: u64,
}

impl<T: Triangulator> MeshEngine<T> {
    pub fn new(config: MeshConfig, triangulator: T) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            triangulator,
            nodes: Vec::new(),
            size: SurfaceSize::default(),
            pointer: PointerController::new(),
            listeners: ListenerRegistry::new(),
            state: EngineState::Idle,
            final_frame_done: false,
            frames_rendered: 0,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn nodes(&self) -> &[AnimatedNode] {
        &self.nodes
    }

    pub fn pointer(&self) -> &PointerController {
        &self.pointer
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Number of host listeners currently attached on the engine's behalf.
    pub fn attached_listeners(&self) -> usize {
        self.listeners.len() + self.pointer.listeners().len()
    }

    /// Ask for resize notifications. Called once the surface is in place.
    pub fn mount(&mut self) -> ListenerChanges {
        let mut changes = ListenerChanges::new();
        if self.state != EngineState::Stopped {
            self.listeners.attach(ListenerKind::Resize, &mut changes);
        }
        changes
    }

    /// Recompute the backing-store size from the on-screen size.
    /// Returns the new size so the host can apply it to its surface.
    pub fn resize(&mut self, css_width: f64, css_height: f64, pixel_ratio: f64) -> SurfaceSize {
        self.set_surface_size(SurfaceSize::from_css(css_width, css_height, pixel_ratio));
        self.size
    }

    pub fn set_surface_size(&mut self, size: SurfaceSize) {
        if size != self.size {
            log::debug!("surface resized to {}x{}", size.width, size.height);
        }
        self.size = size;
    }

    /// Simulated extent in the configured coordinate space.
    pub fn viewport(&self) -> ViewportParams {
        let radius = self.config.physics.node_radius;
        match self.config.space {
            CoordinateSpace::DevicePixels => ViewportParams::new(
                f64::from(self.size.width),
                f64::from(self.size.height),
                radius,
            ),
            CoordinateSpace::Normalized => ViewportParams::new(1.0, 1.0, radius),
        }
    }

    /// Mapping for pointer events given the surface's on-screen rectangle.
    pub fn mapping(&self, left: f64, top: f64, css_width: f64, css_height: f64) -> SurfaceMapping {
        SurfaceMapping {
            left,
            top,
            css_width,
            css_height,
            backing_width: f64::from(self.size.width),
            backing_height: f64::from(self.size.height),
            space: self.config.space,
        }
    }

    fn ensure_startable(&self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Running => return Err(EngineError::AlreadyStarted),
            EngineState::Stopped => return Err(EngineError::Stopped),
            EngineState::Idle => {}
        }
        if self.size.is_empty() {
            return Err(EngineError::EnvironmentUnavailable);
        }
        Ok(())
    }

    /// Seed `config.node_count` nodes and begin running.
    #[cfg(feature = "std")]
    pub fn start(&mut self) -> Result<ListenerChanges, EngineError> {
        self.start_with_rng(&mut rand::thread_rng())
    }

    #[cfg(feature = "std")]
    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ListenerChanges, EngineError> {
        self.ensure_startable()?;
        let nodes = crate::node::spawn_nodes(
            self.config.node_count,
            self.config.seed,
            &self.config.physics,
            &self.viewport(),
            rng,
        );
        self.start_with_nodes(nodes)
    }

    /// Begin running with an explicit initial node set.
    pub fn start_with_nodes(&mut self, nodes: Vec<AnimatedNode>) -> Result<ListenerChanges, EngineError> {
        self.ensure_startable()?;
        log::info!(
            "starting mesh with {} nodes on a {}x{} surface",
            nodes.len(),
            self.size.width,
            self.size.height
        );
        self.nodes = nodes;
        self.state = EngineState::Running;
        Ok(self.pointer.activate())
    }

    /// Route a host pointer event through the pointer state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent, mapping: Option<&SurfaceMapping>) -> ListenerChanges {
        if self.state != EngineState::Running {
            return ListenerChanges::new();
        }
        let changes = self.pointer.handle(event, mapping);
        if !changes.is_empty() {
            log::debug!("pointer now {:?}", self.pointer.phase());
        }
        changes
    }

    /// Advance every node one tick, triangulate and paint.
    ///
    /// A frame requested before `stop` still renders once; it then reports
    /// [`LoopControl::Halt`].
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> Result<LoopControl, S::Error> {
        match self.state {
            EngineState::Idle => return Ok(LoopControl::Halt),
            EngineState::Stopped if self.final_frame_done => return Ok(LoopControl::Halt),
            EngineState::Stopped => self.final_frame_done = true,
            EngineState::Running => {}
        }

        let viewport = self.viewport();
        let pointer = self.pointer.position();
        let physics = self.config.physics;
        self.nodes = self
            .nodes
            .iter()
            .map(|node| integrator::step(node, pointer, &viewport, &physics))
            .collect();

        let edges = triangulation::edges_for_nodes(&self.triangulator, &self.nodes);
        render::paint(
            surface,
            &self.config.style,
            self.config.space,
            self.size,
            &self.nodes,
            &edges,
        )?;
        self.frames_rendered += 1;

        Ok(match self.state {
            EngineState::Running => LoopControl::Continue,
            _ => LoopControl::Halt,
        })
    }

    /// Set the stop flag and release every host listener. Safe to call twice;
    /// the second call has nothing left to detach.
    pub fn stop(&mut self) -> ListenerChanges {
        let mut changes = self.pointer.shutdown();
        self.listeners.detach_all(&mut changes);

        if self.state != EngineState::Stopped {
            log::info!("stopping mesh after {} frames", self.frames_rendered);
            // An engine that never ran has no pending frame to drain.
            self.final_frame_done = self.state == EngineState::Idle;
            self.state = EngineState::Stopped;
        }
        changes
    }
}
