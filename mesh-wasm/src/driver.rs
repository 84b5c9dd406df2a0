//! Browser side of the frame loop: DOM listeners and `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use mesh_core::{
    ClientPoint, DelaunatorTriangulator, EngineError, EngineState, ListenerChange, ListenerChanges,
    ListenerKind, LoopControl, MeshEngine, PointerEvent, SurfaceMapping, SurfaceSize,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent, Window};

use crate::canvas::CanvasSurface;

pub type Engine = MeshEngine<DelaunatorTriangulator>;

/// Everything a frame or an input callback needs, shared between them.
pub struct Scene {
    pub engine: Engine,
    pub surface: CanvasSurface,
    pub canvas: HtmlCanvasElement,
    pub window: Window,
    pub failures: FailureStreak,
}

pub type SceneRef = Rc<RefCell<Scene>>;

impl Scene {
    /// Re-derive the backing store from the canvas' on-screen size.
    pub fn sync_size(&mut self) -> SurfaceSize {
        let size = self.engine.resize(
            f64::from(self.canvas.scroll_width()),
            f64::from(self.canvas.scroll_height()),
            self.window.device_pixel_ratio(),
        );
        if self.canvas.width() != size.width {
            self.canvas.set_width(size.width);
        }
        if self.canvas.height() != size.height {
            self.canvas.set_height(size.height);
        }
        size
    }

    pub fn mapping(&self) -> SurfaceMapping {
        let element: &web_sys::Element = self.canvas.as_ref();
        let rect = element.get_bounding_client_rect();
        self.engine
            .mapping(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn frame(&mut self) -> LoopControl {
        let result = self.engine.tick(&mut self.surface);
        let running = self.engine.is_running();
        self.failures.record(result, running)
    }
}

/// Frames failing in a row before the loop gives up.
pub const MAX_FAILED_FRAMES: u32 = 120;

/// Run of consecutive failed frames. Only the first failure of a run is
/// logged; a run reaching [`MAX_FAILED_FRAMES`] halts the loop.
#[derive(Debug, Default)]
pub struct FailureStreak {
    count: u32,
}

impl FailureStreak {
    pub fn record<E: core::fmt::Debug>(
        &mut self,
        result: Result<LoopControl, E>,
        running: bool,
    ) -> LoopControl {
        let err = match result {
            Ok(control) => {
                if self.count > 0 {
                    log::info!("frames recovered after {} failures", self.count);
                }
                self.count = 0;
                return control;
            }
            Err(err) => err,
        };

        self.count += 1;
        if self.count == 1 {
            log::warn!("frame failed: {:?}", err);
        }
        if !running {
            return LoopControl::Halt;
        }
        if self.count >= MAX_FAILED_FRAMES {
            log::error!("giving up after {} failed frames: {:?}", self.count, err);
            return LoopControl::Halt;
        }
        LoopControl::Continue
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

type MouseCallback = Closure<dyn FnMut(MouseEvent)>;

/// The host listeners the engine can ask for, created once and attached or
/// detached as the engine's [`ListenerChanges`] dictate.
pub struct ListenerTable {
    window: Window,
    canvas: HtmlCanvasElement,
    resize: Closure<dyn FnMut()>,
    enter: MouseCallback,
    leave: MouseCallback,
    movement: MouseCallback,
}

impl ListenerTable {
    pub fn new(scene: &SceneRef) -> Rc<Self> {
        let (window, canvas) = {
            let scene = scene.borrow();
            (scene.window.clone(), scene.canvas.clone())
        };

        Rc::new_cyclic(|table: &Weak<ListenerTable>| {
            let resize = {
                let scene = scene.clone();
                let table = table.clone();
                Closure::wrap(Box::new(move || on_resize(&scene, &table)) as Box<dyn FnMut()>)
            };

            ListenerTable {
                window,
                canvas,
                resize,
                enter: pointer_callback(scene, table, |_| PointerEvent::Enter),
                leave: pointer_callback(scene, table, |_| PointerEvent::Leave),
                movement: pointer_callback(scene, table, |event| {
                    PointerEvent::Move(ClientPoint {
                        x: f64::from(event.client_x()),
                        y: f64::from(event.client_y()),
                    })
                }),
            }
        })
    }

    fn binding(&self, kind: ListenerKind) -> (&EventTarget, &'static str, &js_sys::Function) {
        let window: &EventTarget = self.window.as_ref();
        let canvas: &EventTarget = self.canvas.as_ref();
        match kind {
            ListenerKind::Resize => (window, "resize", self.resize.as_ref().unchecked_ref()),
            ListenerKind::PointerEnter => (canvas, "mouseenter", self.enter.as_ref().unchecked_ref()),
            ListenerKind::PointerLeave => (canvas, "mouseleave", self.leave.as_ref().unchecked_ref()),
            // Movement is tracked on the window so fast drags past the edge still register.
            ListenerKind::PointerMove => (window, "mousemove", self.movement.as_ref().unchecked_ref()),
        }
    }

    pub fn apply(&self, changes: &ListenerChanges) -> Result<(), JsValue> {
        apply_all(changes, |change| match change {
            ListenerChange::Attach(kind) => {
                let (target, name, callback) = self.binding(kind);
                target.add_event_listener_with_callback(name, callback)
            }
            ListenerChange::Detach(kind) => {
                let (target, name, callback) = self.binding(kind);
                target.remove_event_listener_with_callback(name, callback)
            }
        })
    }
}

/// Run `apply` on every change, even past a failure, and report the first
/// error. The registry already counts every change as done.
pub fn apply_all<E>(
    changes: &ListenerChanges,
    mut apply: impl FnMut(ListenerChange) -> Result<(), E>,
) -> Result<(), E> {
    let mut first_error = None;
    for change in changes {
        if let Err(err) = apply(*change) {
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}

fn apply_changes(table: &Weak<ListenerTable>, changes: &ListenerChanges) {
    if changes.is_empty() {
        return;
    }
    if let Some(table) = table.upgrade() {
        if let Err(err) = table.apply(changes) {
            log::warn!("failed to update listeners: {:?}", err);
        }
    }
}

fn pointer_callback(
    scene: &SceneRef,
    table: &Weak<ListenerTable>,
    to_event: fn(&MouseEvent) -> PointerEvent,
) -> MouseCallback {
    let scene = scene.clone();
    let table = table.clone();
    Closure::wrap(Box::new(move |event: MouseEvent| {
        let changes = {
            let mut scene = scene.borrow_mut();
            let mapping = scene.mapping();
            scene.engine.handle_pointer(to_event(&event), Some(&mapping))
        };
        apply_changes(&table, &changes);
    }) as Box<dyn FnMut(MouseEvent)>)
}

fn on_resize(scene: &SceneRef, table: &Weak<ListenerTable>) {
    let waiting = {
        let mut scene = scene.borrow_mut();
        let size = scene.sync_size();
        scene.engine.state() == EngineState::Idle && !size.is_empty()
    };

    // A surface that had no size at start-up gets its loop now.
    if waiting {
        if let Some(table) = table.upgrade() {
            if let Err(err) = start_loop(scene, &table) {
                log::warn!("failed to start mesh after resize: {:?}", err);
            }
        }
    }
}

/// Start the engine and its frame loop. Returns `false` when the surface
/// has no size yet; the resize listener retries later.
pub fn start_loop(scene: &SceneRef, table: &Rc<ListenerTable>) -> Result<bool, JsValue> {
    let changes = {
        let mut scene = scene.borrow_mut();
        scene.sync_size();
        match scene.engine.start() {
            Ok(changes) => changes,
            Err(EngineError::EnvironmentUnavailable) => {
                log::info!("surface has no size yet, waiting for a resize");
                return Ok(false);
            }
            Err(err) => return Err(JsValue::from_str(&err.to_string())),
        }
    };
    table.apply(&changes)?;
    request_frames(scene.clone())?;
    Ok(true)
}

/// Run frames on every display refresh until the engine reports `Halt`.
fn request_frames(scene: SceneRef) -> Result<(), JsValue> {
    let window = scene.borrow().window.clone();
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let loop_window = window.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let control = scene.borrow_mut().frame();
        if control == LoopControl::Continue {
            let scheduled = next
                .borrow()
                .as_ref()
                .map(|callback| loop_window.request_animation_frame(callback.as_ref().unchecked_ref()));
            match scheduled {
                Some(Ok(_)) => return,
                Some(Err(err)) => log::warn!("requestAnimationFrame failed: {:?}", err),
                None => {}
            }
        }
        // Dropping the callback breaks the slot <-> closure cycle.
        let _ = next.borrow_mut().take();
    }) as Box<dyn FnMut()>));

    let first = slot.borrow();
    let callback = first.as_ref().ok_or("frame callback missing")?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
