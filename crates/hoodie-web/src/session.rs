//! The process-wide viewer slot behind the browser bindings. The browser
//! main thread is the only caller, so a thread-local is enough.

#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use std::cell::RefCell;

use crate::viewer::Viewer;

thread_local! {
    static VIEWER: RefCell<Option<Viewer>> = const { RefCell::new(None) };
}

pub(crate) const NOT_INITIALIZED: &str = "viewer not initialized, call init() first";

/// Replaces the current viewer.
pub(crate) fn install(viewer: Viewer) {
    VIEWER.with(|cell| *cell.borrow_mut() = Some(viewer));
}

/// Runs `f` against the installed viewer, or returns `None` before `install`.
pub(crate) fn with_viewer<T>(f: impl FnOnce(&mut Viewer) -> T) -> Option<T> {
    VIEWER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_runs_before_install() {
        let url = with_viewer(|viewer| viewer.register_upload(vec![1, 2, 3]));
        assert_eq!(url, None);
    }

    #[test]
    fn installed_viewer_serves_uploads() {
        install(Viewer::default());
        let url = with_viewer(|viewer| viewer.register_upload(vec![1, 2, 3])).unwrap();
        assert!(url.starts_with("blob:hoodie/"));
        assert_eq!(with_viewer(|viewer| viewer.revoke_upload(&url)), Some(true));
    }
}
