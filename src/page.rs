//! Page Helpers
//!
//! DOM lookups and status styling shared by the board and the task page.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, NodeList};

use crate::error::BoardError;
use crate::models::StatusTable;

pub const COMPLETED_CLASS: &str = "completed";

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn find(parent: &Element, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn find_all(parent: &Element, selector: &str) -> Vec<HtmlElement> {
    parent
        .query_selector_all(selector)
        .map(html_elements)
        .unwrap_or_default()
}

/// Class name from a simple `.class` selector
pub fn class_of(selector: &str) -> &str {
    selector.trim_start_matches('.')
}

/// Swap whatever status class `el` has for `css_class`.
pub fn restyle(el: &Element, table: &StatusTable, css_class: &str) {
    let classes = el.class_list();
    for class in table.css_classes() {
        let _ = classes.remove_1(class);
    }
    let _ = classes.add_1(css_class);
}

pub fn set_progress(fill: Option<HtmlElement>, label: Option<HtmlElement>, percentage: u8) {
    if let Some(fill) = fill {
        let _ = fill.style().set_property("width", &format!("{}%", percentage));
        let _ = fill.class_list().toggle_with_force(COMPLETED_CLASS, percentage == 100);
    }
    if let Some(label) = label {
        label.set_text_content(Some(&format!("{}%", percentage)));
    }
}

/// Fails when a previous attach already marked the root.
pub fn ensure_unclaimed(marker: Option<String>) -> Result<(), BoardError> {
    match marker {
        Some(_) => Err(BoardError::AlreadyAttached),
        None => Ok(()),
    }
}

/// Mark `root` as owned so a second attach cannot bind duplicate listeners.
pub fn claim(root: &Element, attr: &str) -> Result<(), BoardError> {
    ensure_unclaimed(root.get_attribute(attr))?;
    let _ = root.set_attribute(attr, "true");
    Ok(())
}

/// Existing `selector` element inside `root`, or a new one at its top
pub fn messages_container(root: &HtmlElement, selector: &str) -> Result<HtmlElement, BoardError> {
    if let Some(existing) = find(root, selector) {
        return Ok(existing);
    }
    let doc = root.owner_document().ok_or(BoardError::NoDocument)?;
    let container = doc
        .create_element("div")
        .map_err(|_| BoardError::NoDocument)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| BoardError::RootNotHtml)?;
    container.set_class_name(class_of(selector));
    let _ = root.prepend_with_node_1(&container);
    Ok(container)
}

/// Reload through the window that owns `el`.
pub fn reload_page(el: &Element) {
    match el.owner_document().and_then(|doc| doc.default_view()) {
        Some(window) => {
            if let Err(err) = window.location().reload() {
                log::error!("[page] reload failed: {:?}", err);
            }
        }
        None => log::error!("[page] no window to reload"),
    }
}
