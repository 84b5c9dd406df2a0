use mesh_wasm::MeshBackground;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

/// Append a fixed-size container to the page body
fn container(width: u32, height: u32) -> HtmlElement {
    let document = web_sys::window().expect("no global window").document().expect("no document");
    let div = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    set_size(&div, width, height);
    document.body().expect("no body").append_child(&div).unwrap();
    div
}

fn set_size(element: &HtmlElement, width: u32, height: u32) {
    element.style().set_property("width", &format!("{}px", width)).unwrap();
    element.style().set_property("height", &format!("{}px", height)).unwrap();
}

fn canvas_of(host: &HtmlElement) -> HtmlCanvasElement {
    host.query_selector("canvas")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap()
}

fn mouse_event(kind: &str, x: f64, y: f64) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(x as i32);
    init.set_client_y(y as i32);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

/// Resolve on the next display refresh
async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn test_mount_builds_canvas_inside_styled_wrapper() {
    let host = container(320, 200);
    let mut mesh = MeshBackground::new(&host, Some("background".into()), None).unwrap();

    assert_eq!(host.child_element_count(), 1);
    let wrapper = host.first_element_child().unwrap();
    assert_eq!(wrapper.class_name(), "background");
    assert!(wrapper.query_selector("canvas").unwrap().is_some());

    mesh.stop();
}

#[wasm_bindgen_test]
fn test_start_and_stop() {
    let host = container(320, 200);
    let mut mesh = MeshBackground::new(&host, None, Some(r#"{"nodeCount": 40}"#.into())).unwrap();

    mesh.start().unwrap();
    assert!(mesh.is_running());
    assert_eq!(mesh.node_count(), 40);

    let canvas = canvas_of(&host);
    assert!(canvas.width() > 0 && canvas.height() > 0);

    mesh.stop();
    assert!(!mesh.is_running());
    assert_eq!(host.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn test_zero_sized_container_waits_for_resize() {
    let host = container(0, 0);
    let mut mesh = MeshBackground::new(&host, None, None).unwrap();

    mesh.start().unwrap();
    assert!(!mesh.is_running());
    assert_eq!(mesh.node_count(), 0);

    set_size(&host, 300, 150);
    let window = web_sys::window().unwrap();
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();

    assert!(mesh.is_running());
    assert_eq!(mesh.node_count(), 100);
    let canvas = canvas_of(&host);
    assert!(canvas.width() > 0 && canvas.height() > 0);

    mesh.stop();
}

#[wasm_bindgen_test]
fn test_pointer_listeners_track_enter_move_leave() {
    let host = container(320, 200);
    let mut mesh = MeshBackground::new(&host, None, None).unwrap();
    mesh.start().unwrap();

    let canvas = canvas_of(&host);
    let element: &web_sys::Element = canvas.as_ref();
    let rect = element.get_bounding_client_rect();
    let (x, y) = (rect.left() + 40.0, rect.top() + 30.0);

    canvas.dispatch_event(&mouse_event("mouseenter", x, y)).unwrap();
    assert!(mesh.status().unwrap().contains(r#""pointerActive":false"#));

    canvas.dispatch_event(&mouse_event("mousemove", x, y)).unwrap();
    let status = mesh.status().unwrap();
    assert!(status.contains(r#""pointerActive":true"#), "{}", status);

    canvas.dispatch_event(&mouse_event("mouseleave", x, y)).unwrap();
    let status = mesh.status().unwrap();
    assert!(status.contains(r#""pointerActive":false"#), "{}", status);

    // Movement is no longer listened to once the pointer has left.
    canvas.dispatch_event(&mouse_event("mousemove", x, y)).unwrap();
    assert!(mesh.status().unwrap().contains(r#""pointerActive":false"#));

    mesh.stop();
}

#[wasm_bindgen_test]
async fn test_frames_stop_after_one_more_frame() {
    let host = container(320, 200);
    let mut mesh = MeshBackground::new(&host, None, None).unwrap();
    mesh.start().unwrap();

    next_frame().await;
    next_frame().await;
    assert!(mesh.frames_rendered() > 0);

    let before = mesh.frames_rendered();
    mesh.stop();
    next_frame().await;
    next_frame().await;
    let after = mesh.frames_rendered();
    assert!(after - before <= 1, "{} frames after stop", after - before);

    next_frame().await;
    assert_eq!(mesh.frames_rendered(), after);
}

#[wasm_bindgen_test]
fn test_invalid_settings_are_rejected() {
    let host = container(100, 100);
    assert!(MeshBackground::new(&host, None, Some("{not json".into())).is_err());
    assert!(MeshBackground::new(&host, None, Some(r#"{"minSpeed": 5, "maxSpeed": 1}"#.into())).is_err());
}

#[wasm_bindgen_test]
fn test_status_reports_json() {
    let host = container(200, 200);
    let mut mesh = MeshBackground::new(&host, None, None).unwrap();
    mesh.start().unwrap();

    let status = mesh.status().unwrap();
    assert!(status.contains(r#""running":true"#), "{}", status);
    assert!(status.contains(r#""nodeCount":100"#), "{}", status);
    assert!(status.contains(r#""pointerActive":false"#), "{}", status);

    mesh.stop();
}
