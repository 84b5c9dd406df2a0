//! Browser binding for the Delaunay mesh background.
//!
//! ```js
//! const mesh = new MeshBackground(container, "background", '{"nodeCount": 80}');
//! mesh.start();
//! // ...
//! mesh.stop();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use mesh_core::{DelaunatorTriangulator, MeshEngine};
use mesh_shared::{EngineStatus, MeshSettings};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

mod canvas;
mod driver;
mod logger;
mod settings;

use canvas::CanvasSurface;
use driver::{FailureStreak, ListenerTable, Scene, SceneRef};
pub use settings::config_from_settings;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn write_console(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (write_console(&format_args!($($t)*).to_string()))
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Set the console log level: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level: log::LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("unknown log level: {}", level)))?;
    logger::init(level);
    Ok(())
}

/// An animated mesh mounted inside a host container.
///
/// Construction builds the DOM; `start` and `stop` bracket the animation.
/// An instance whose canvas has no 2d context stays inert.
#[wasm_bindgen]
pub struct MeshBackground {
    wrapper: HtmlElement,
    scene: Option<SceneRef>,
    listeners: Option<Rc<ListenerTable>>,
}

#[wasm_bindgen]
impl MeshBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: &HtmlElement,
        class_name: Option<String>,
        settings: Option<String>,
    ) -> Result<MeshBackground, JsValue> {
        let settings = MeshSettings::from_json(settings.as_deref().unwrap_or(""))
            .map_err(|e| JsValue::from_str(&format!("invalid mesh settings: {}", e)))?;
        let config = config_from_settings(&settings);
        let engine = MeshEngine::new(config, DelaunatorTriangulator)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;

        let wrapper = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        if let Some(class_name) = class_name {
            wrapper.set_class_name(&class_name);
        }
        wrapper.style().set_property("width", "100%")?;
        wrapper.style().set_property("height", "100%")?;

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.style().set_property("width", "100%")?;
        canvas.style().set_property("height", "100%")?;
        canvas.style().set_property("display", "block")?;

        wrapper.append_child(&canvas)?;
        container.append_child(&wrapper)?;

        let context = match canvas.get_context("2d") {
            Ok(Some(context)) => context.dyn_into::<CanvasRenderingContext2d>()?,
            _ => {
                console_log!("no 2d context available, mesh stays inert");
                return Ok(MeshBackground {
                    wrapper,
                    scene: None,
                    listeners: None,
                });
            }
        };

        let scene = Rc::new(RefCell::new(Scene {
            engine,
            surface: CanvasSurface::new(context),
            canvas,
            window,
            failures: FailureStreak::default(),
        }));
        let listeners = ListenerTable::new(&scene);

        Ok(MeshBackground {
            wrapper,
            scene: Some(scene),
            listeners: Some(listeners),
        })
    }

    /// Begin animating. With a zero-sized surface the loop starts on the
    /// first resize that gives it a size.
    pub fn start(&mut self) -> Result<(), JsValue> {
        let (Some(scene), Some(listeners)) = (&self.scene, &self.listeners) else {
            return Ok(());
        };

        let changes = scene.borrow_mut().engine.mount();
        listeners.apply(&changes)?;
        driver::start_loop(scene, listeners)?;
        Ok(())
    }

    /// Stop animating, release every listener and remove the mesh from the page.
    pub fn stop(&mut self) {
        if let (Some(scene), Some(listeners)) = (&self.scene, &self.listeners) {
            let changes = scene.borrow_mut().engine.stop();
            if let Err(err) = listeners.apply(&changes) {
                log::warn!("failed to remove listeners: {:?}", err);
            }
        }
        self.wrapper.remove();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.scene
            .as_ref()
            .map(|scene| scene.borrow().engine.is_running())
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.scene
            .as_ref()
            .map(|scene| scene.borrow().engine.nodes().len())
            .unwrap_or(0)
    }

    /// Frames painted so far, including the one drained after `stop`.
    #[wasm_bindgen(js_name = framesRendered)]
    pub fn frames_rendered(&self) -> u64 {
        self.scene
            .as_ref()
            .map(|scene| scene.borrow().engine.frames_rendered())
            .unwrap_or(0)
    }

    /// Engine status as a JSON string.
    pub fn status(&self) -> Result<String, JsValue> {
        let status = match &self.scene {
            Some(scene) => {
                let scene = scene.borrow();
                EngineStatus {
                    running: scene.engine.is_running(),
                    node_count: scene.engine.nodes().len(),
                    frames_rendered: scene.engine.frames_rendered(),
                    pointer_active: scene.engine.pointer().position().is_some(),
                }
            }
            None => EngineStatus {
                running: false,
                node_count: 0,
                frames_rendered: 0,
                pointer_active: false,
            },
        };
        status
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Drop for MeshBackground {
    fn drop(&mut self) {
        // Listeners must not outlive the closures they call.
        self.stop();
    }
}
