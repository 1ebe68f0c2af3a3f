use std::path::Path;

use bearwin_core::{Cursor, WindowResult};
use windows::Win32::UI::WindowsAndMessaging::{
    HCURSOR, HICON, IDI_APPLICATION, IMAGE_ICON, LR_DEFAULTSIZE, LR_LOADFROMFILE, LoadCursorFromFileW,
    LoadCursorW, LoadIconW, LoadImageW,
};
use windows::core::{HSTRING, PCWSTR};

/// Loads a stock cursor by resource id or a cursor file from disk.
pub(crate) fn load_cursor(cursor: &Cursor) -> WindowResult<HCURSOR> {
    let handle = match cursor {
        Cursor::Shape(shape) => {
            // MAKEINTRESOURCEW: the id travels in the pointer value.
            let id = PCWSTR(usize::from(shape.resource_id()) as *const u16);
            // SAFETY: stock cursors are loaded from the system, no instance.
            unsafe { LoadCursorW(None, id)? }
        }
        Cursor::File(path) => {
            let path = HSTRING::from(path.as_os_str());
            unsafe { LoadCursorFromFileW(&path)? }
        }
    };
    Ok(handle)
}

/// Loads an icon file, or the stock application icon when `path` is `None`.
///
/// A file that cannot be loaded falls back to the stock icon.
pub(crate) fn load_icon(path: Option<&Path>) -> HICON {
    if let Some(path) = path {
        let wide = HSTRING::from(path.as_os_str());
        // SAFETY: LR_LOADFROMFILE reads a standalone .ico; no instance.
        match unsafe {
            LoadImageW(
                None,
                &wide,
                IMAGE_ICON,
                0,
                0,
                LR_LOADFROMFILE | LR_DEFAULTSIZE,
            )
        } {
            Ok(handle) => return HICON(handle.0),
            Err(e) => bearwin_core::log_warn!("icon {}: {e}", path.display()),
        }
    }
    unsafe { LoadIconW(None, IDI_APPLICATION) }.unwrap_or_default()
}
