//! WASM-compatible egui front end for the relations overlay.
//!
//! Renders annotated text and lets the user drag a relation from one
//! annotation to another. Runs:
//! - Natively (via eframe, `native` feature)
//! - In the browser (via WASM)

mod app;
pub mod connection;
pub mod document;
pub mod input;
pub mod scheduler;
pub mod settings;
pub mod surface;
mod ui;

pub use app::{FrameInput, RelationsApp, RelationsView};
pub use document::{create_sample_document, AnnotatedDocument, Relation, Segment};
pub use settings::{ConnectionStyle, SettingsStyle};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Start the relations app in WASM context.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    // Better panic messages in the browser console
    console_error_panic_hook::set_once();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("relations-canvas"))
            .and_then(|element| wasm_bindgen::JsCast::dyn_into::<web_sys::HtmlCanvasElement>(element).ok());

        let Some(canvas) = canvas else {
            web_sys::console::error_1(&"relations-canvas element not found".into());
            return;
        };

        if let Err(err) = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(RelationsApp::new(cc)))),
            )
            .await
        {
            web_sys::console::error_1(&err);
        }
    });
}
