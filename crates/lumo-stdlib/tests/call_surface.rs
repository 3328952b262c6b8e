//! End-to-end behavior of the call surface: suspending operations block
//! the program thread and return values or raise errors, stops abandon
//! in-flight work, and loads go through the authenticated proxy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use lumo_stdlib::{
    Config, Host, ImageData, Library, Mount, NetError, Prompter, Response, RunnerHandle,
    StdlibError, Surface, Transport, Value,
};

struct NullSurface;

impl Surface for NullSurface {
    fn set_stroke_color(&mut self, _hex: &str) {}
    fn set_fill_color(&mut self, _hex: &str) {}
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _x: f64, _y: f64) {}
    fn line_to(&mut self, _x: f64, _y: f64) {}
    fn arc(&mut self, _x: f64, _y: f64, _radius: f64, _start: f64, _end: f64) {}
    fn stroke(&mut self) {}
    fn fill(&mut self) {}
    fn clear_white(&mut self) {}
}

#[derive(Default)]
struct TestMount {
    blits: Mutex<usize>,
}

impl Mount for TestMount {
    fn new_surface(&self, _width: u32, _height: u32) -> Box<dyn Surface> {
        Box::new(NullSurface)
    }

    fn blit(&self, _image: &ImageData) {
        *self.blits.lock().unwrap() += 1;
    }
}

struct CannedPrompt {
    reply: Option<String>,
}

impl Prompter for CannedPrompt {
    fn prompt(&self, _message: &str) -> Option<String> {
        self.reply.clone()
    }
}

struct ScriptedTransport {
    response: Result<Response, NetError>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(response: Result<Response, NetError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<Response, NetError> {
        self.seen.lock().unwrap().push(url.to_string());
        self.response.clone()
    }
}

fn interactive_library(prompt_reply: Option<String>) -> (Library, Arc<TestMount>) {
    let mount = Arc::new(TestMount::default());
    let host = Host::new(
        mount.clone(),
        Arc::new(CannedPrompt {
            reply: prompt_reply,
        }),
    );
    let config = Config::builder()
        .base_url("https://sandbox.example.org/")
        .session("ada@example.edu", "s1")
        .build();
    (Library::new(config).with_host(host), mount)
}

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn ok_response(body: Vec<u8>) -> Result<Response, NetError> {
    Ok(Response { status: 200, body })
}

fn red_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    png
}

#[test]
fn sleep_blocks_then_returns() {
    let (lib, _mount) = interactive_library(None);
    let handle = RunnerHandle::default();
    let started = Instant::now();
    lib.sleep(&handle, &[num(30.0)]).unwrap();
    assert!(started.elapsed() >= Duration::from_millis(25));
}

#[test]
fn input_returns_prompt_reply() {
    let (lib, _mount) = interactive_library(Some("Ada".to_string()));
    let handle = RunnerHandle::default();
    let reply = lib.input(&handle, &[Value::from("name?")]).unwrap();
    assert_eq!(reply.as_str(), Some("Ada"));
}

#[test]
fn cancelled_prompt_yields_empty_string() {
    let (lib, _mount) = interactive_library(None);
    let handle = RunnerHandle::default();
    let reply = lib.input(&handle, &[Value::from("name?")]).unwrap();
    assert_eq!(reply.as_str(), Some(""));
}

#[test]
fn suspending_call_with_stopped_program_fails_fast() {
    let (lib, _mount) = interactive_library(None);
    let handle = RunnerHandle::default();
    handle.stop();
    let err = lib.sleep(&handle, &[num(10.0)]).unwrap_err();
    assert_eq!(err.to_string(), "Program is not running");
}

#[test]
fn stop_during_sleep_abandons_without_resuming() {
    let cleanups = Arc::new(AtomicUsize::new(0));
    let counter = cleanups.clone();
    let handle = RunnerHandle::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let stopper = handle.clone();
    let program = thread::spawn(move || {
        let (lib, _mount) = interactive_library(None);
        lib.sleep(&handle, &[num(200.0)])
    });

    thread::sleep(Duration::from_millis(50));
    stopper.stop();

    let result = program.join().unwrap();
    assert!(matches!(result, Err(StdlibError::Stopped)));
    // The timer still fires; its completion runs the stop cleanup exactly
    // once instead of resuming.
    thread::sleep(Duration::from_millis(250));
    assert_eq!(cleanups.load(Ordering::SeqCst), 1);
}

#[test]
fn load_image_fetches_through_proxy_and_decodes() {
    let transport = ScriptedTransport::new(ok_response(red_png()));
    let (lib, _mount) = interactive_library(None);
    let lib = lib.with_transport(transport.clone());
    let handle = RunnerHandle::default();

    let image = lib
        .load_image_from_url(&handle, &[Value::from("https://host/cat.png")])
        .unwrap();
    let image = image.as_image().unwrap();
    assert_eq!(image.width().unwrap(), 2);
    assert_eq!(image.height().unwrap(), 2);

    let pixel = image.get_pixel(&[num(0.0), num(0.0)]).unwrap();
    let channels = pixel.as_array().unwrap().lock().unwrap().clone();
    assert_eq!(channels[0].as_number(), Some(1.0));
    assert_eq!(channels[1].as_number(), Some(0.0));
    assert_eq!(channels[2].as_number(), Some(0.0));

    let seen = transport.seen.lock().unwrap().clone();
    assert_eq!(
        seen.as_slice(),
        ["https://sandbox.example.org/geturl?url=https%3A%2F%2Fhost%2Fcat.png&user=ada%40example.edu&session=s1"]
    );
}

#[test]
fn load_image_non_ok_raises_descriptive_error() {
    let transport = ScriptedTransport::new(Ok(Response {
        status: 404,
        body: Vec::new(),
    }));
    let (lib, _mount) = interactive_library(None);
    let lib = lib.with_transport(transport);
    let handle = RunnerHandle::default();

    let err = lib
        .load_image_from_url(&handle, &[Value::from("https://host/missing.png")])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not load from URL, URL may be invalid or redirected"
    );
}

#[test]
fn load_image_undecodable_body_raises_decode_error() {
    let transport = ScriptedTransport::new(ok_response(b"not an image".to_vec()));
    let (lib, _mount) = interactive_library(None);
    let lib = lib.with_transport(transport);
    let handle = RunnerHandle::default();

    let err = lib
        .load_image_from_url(&handle, &[Value::from("https://host/cat.png")])
        .unwrap_err();
    assert_eq!(err.to_string(), "Image could not be loaded");
}

#[test]
fn load_without_session_raises_not_logged_in() {
    let transport = ScriptedTransport::new(ok_response(Vec::new()));
    let mount = Arc::new(TestMount::default());
    let host = Host::new(mount, Arc::new(CannedPrompt { reply: None }));
    let config = Config::builder()
        .base_url("https://sandbox.example.org/")
        .build();
    let lib = Library::new(config)
        .with_host(host)
        .with_transport(transport.clone());
    let handle = RunnerHandle::default();

    let err = lib
        .load_json_from_url(&handle, &[Value::from("https://host/data.json")])
        .unwrap_err();
    assert_eq!(err.to_string(), "User is not logged in");
    // The request never reaches the transport.
    assert!(transport.seen.lock().unwrap().is_empty());
}

#[test]
fn load_json_parses_body() {
    let transport =
        ScriptedTransport::new(ok_response(br#"[{"name": "TRUmatch", "stars": 3}]"#.to_vec()));
    let (lib, _mount) = interactive_library(None);
    let lib = lib.with_transport(transport);
    let handle = RunnerHandle::default();

    let value = lib
        .load_json_from_url(&handle, &[Value::from("https://host/data.json")])
        .unwrap();
    let records = value.as_array().unwrap().lock().unwrap().clone();
    let first = records[0].as_object().unwrap().lock().unwrap().clone();
    assert_eq!(first["name"].as_str(), Some("TRUmatch"));
    assert_eq!(first["stars"].as_number(), Some(3.0));
}

#[test]
fn load_json_unparsable_body_raises_parse_error() {
    let transport = ScriptedTransport::new(ok_response(b"not json".to_vec()));
    let (lib, _mount) = interactive_library(None);
    let lib = lib.with_transport(transport);
    let handle = RunnerHandle::default();

    let err = lib
        .load_json_from_url(&handle, &[Value::from("https://host/data.json")])
        .unwrap_err();
    assert_eq!(err.to_string(), "JSON file could not be loaded");
}

#[test]
fn network_failure_raises_load_error() {
    let transport = ScriptedTransport::new(Err(NetError::Network {
        cause: "connection refused".to_string(),
    }));
    let (lib, _mount) = interactive_library(None);
    let lib = lib.with_transport(transport);
    let handle = RunnerHandle::default();

    let err = lib
        .load_image_from_url(&handle, &[Value::from("https://host/cat.png")])
        .unwrap_err();
    assert_eq!(err.to_string(), "Could not load from URL");
}

#[test]
fn show_appends_to_mount() {
    let (lib, mount) = interactive_library(None);
    let fill = Value::array(vec![num(0.0), num(1.0), num(0.0)]);
    let image = lib.create_image(&[num(2.0), num(2.0), fill]).unwrap();
    image.as_image().unwrap().show().unwrap();
    image.as_image().unwrap().show().unwrap();
    assert_eq!(*mount.blits.lock().unwrap(), 2);
}
