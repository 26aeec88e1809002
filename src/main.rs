//! Kanban Sync Frontend Entry Point
//!
//! Attaches status sync to the server-rendered board and task pages.

mod api;
mod board;
mod components;
mod config;
mod error;
mod logging;
mod models;
mod page;
mod task_page;

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use config::BoardConfig;
use error::BoardError;

/// Id of the server-rendered board container
const BOARD_ROOT_ID: &str = "kanban-board";

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = boot() {
        web_sys::console::error_1(&format!("[APP] board not attached: {}", err).into());
    }
}

fn boot() -> Result<(), BoardError> {
    let document = web_sys::window()
        .and_then(|win| win.document())
        .ok_or(BoardError::NoDocument)?;
    // The script is shared by pages with and without a board
    if let Some(root) = document.get_element_by_id(BOARD_ROOT_ID) {
        let root = root.dyn_into::<HtmlElement>().map_err(|_| BoardError::RootNotHtml)?;
        let config = BoardConfig::from_element(&root)?;
        board::attach(root, config)?;
    }
    // Detail page controls; buttons inside the board were bound above
    if let Some(body) = document.body() {
        let config = BoardConfig::from_element(&body)?;
        task_page::attach(body, config)?;
    }
    Ok(())
}
