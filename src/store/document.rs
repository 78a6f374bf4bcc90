//! The browser's own `document.cookie`, reached through `web-sys`.

use crate::base::cookieerror::CookieError;
use crate::store::backend::CookieBackend;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// [`CookieBackend`] over the current page's `document.cookie`.
///
/// The browser applies its own cookie rules. Writes it refuses vanish
/// without an error, the same as they do for page scripts.
#[derive(Debug, Clone)]
pub struct DocumentCookie {
    document: HtmlDocument,
}

impl DocumentCookie {
    /// Bind to the document of the current window.
    ///
    /// Fails outside a window context (workers, Node) and for non-HTML
    /// documents, which have no `cookie` property.
    pub fn new() -> Result<Self, CookieError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(CookieError::DocumentUnavailable)?;
        Self::from_document(document)
    }

    pub fn from_document(document: web_sys::Document) -> Result<Self, CookieError> {
        let document = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| CookieError::DocumentUnavailable)?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }
}

impl CookieBackend for DocumentCookie {
    fn read_all(&self) -> String {
        match self.document.cookie() {
            Ok(raw) => raw,
            Err(e) => {
                // Sandboxed and opaque-origin documents throw SecurityError.
                tracing::warn!(error = ?e, "document.cookie could not be read");
                String::new()
            }
        }
    }

    fn write_one(&self, fragment: &str) {
        if let Err(e) = self.document.set_cookie(fragment) {
            tracing::warn!(error = ?e, fragment = %fragment, "document.cookie could not be written");
        }
    }
}
