//! The document cookie seam.

use std::rc::Rc;
use std::sync::Arc;

/// Read and write access to a document's cookie string.
///
/// This is the `document.cookie` property: reading yields every visible
/// cookie as `name=value` pairs joined by `"; "`, and writing one
/// `name=value;attr…` line creates, replaces or deletes a single cookie. The
/// backend decides what to keep. Rejected writes are dropped silently.
pub trait CookieBackend {
    fn read_all(&self) -> String;

    fn write_one(&self, fragment: &str);
}

impl<B: CookieBackend + ?Sized> CookieBackend for &B {
    fn read_all(&self) -> String {
        (**self).read_all()
    }

    fn write_one(&self, fragment: &str) {
        (**self).write_one(fragment)
    }
}

impl<B: CookieBackend + ?Sized> CookieBackend for Box<B> {
    fn read_all(&self) -> String {
        (**self).read_all()
    }

    fn write_one(&self, fragment: &str) {
        (**self).write_one(fragment)
    }
}

impl<B: CookieBackend + ?Sized> CookieBackend for Rc<B> {
    fn read_all(&self) -> String {
        (**self).read_all()
    }

    fn write_one(&self, fragment: &str) {
        (**self).write_one(fragment)
    }
}

impl<B: CookieBackend + ?Sized> CookieBackend for Arc<B> {
    fn read_all(&self) -> String {
        (**self).read_all()
    }

    fn write_one(&self, fragment: &str) {
        (**self).write_one(fragment)
    }
}
