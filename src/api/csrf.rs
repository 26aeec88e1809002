//! CSRF Token Lookup
//!
//! Django puts the token in a hidden form field and in a cookie; either works.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement, HtmlInputElement};

/// Where state-changing requests get their CSRF token.
///
/// Read before every request: the server may rotate it.
pub trait CsrfSource {
    fn token(&self) -> Option<String>;
}

/// Token from the page: hidden field inside the board, then anywhere in the
/// document, then the cookie.
pub struct DomCsrf {
    root: HtmlElement,
    field: String,
    cookie: String,
}

impl DomCsrf {
    pub fn new(root: HtmlElement, field: &str, cookie: &str) -> Self {
        Self {
            root,
            field: field.to_string(),
            cookie: cookie.to_string(),
        }
    }

    fn from_field(&self) -> Option<String> {
        let selector = format!("input[name=\"{}\"]", self.field);
        let found = match self.root.query_selector(&selector).ok().flatten() {
            Some(el) => Some(el),
            None => self
                .root
                .owner_document()
                .and_then(|doc| doc.query_selector(&selector).ok().flatten()),
        };
        found
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .filter(|value| !value.is_empty())
    }

    fn from_cookie(&self) -> Option<String> {
        let doc = self.root.owner_document()?.dyn_into::<HtmlDocument>().ok()?;
        let cookies = doc.cookie().ok()?;
        parse_cookie(&cookies, &self.cookie)
    }
}

impl CsrfSource for DomCsrf {
    fn token(&self) -> Option<String> {
        self.from_field().or_else(|| self.from_cookie())
    }
}

/// Value of cookie `name` in a `document.cookie` string, percent-decoded.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}
