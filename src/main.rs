#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use pdf_annotate::{AnnotatorApp, EngineConfig};

/// Path of an optional JSON engine config
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "PDF_ANNOTATE_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> EngineConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return EngineConfig::default();
    };
    match EngineConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Falling back to default config, {path}: {err}");
            EngineConfig::default()
        }
    }
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("PDF Annotate")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Annotate",
        options,
        Box::new(|cc| Ok(Box::new(AnnotatorApp::new(cc, config)))),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to attach to");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("the_canvas_id")
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("the_canvas_id is missing or not a canvas");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(AnnotatorApp::new(cc, EngineConfig::default())))),
            )
            .await;

        if let Err(err) = start_result {
            log::error!("Failed to start eframe: {err:?}");
        }
    });
}
