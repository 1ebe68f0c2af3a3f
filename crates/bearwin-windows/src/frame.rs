use std::mem;

use bearwin_core::{Rect, WindowResult};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

/// The invisible border widths around a window.
///
/// On Windows 10/11, `GetWindowRect` includes drop-shadow borders that
/// are not visually part of the window.
pub(crate) struct BorderOffset {
    pub left: i32,
    pub top: i32,
}

fn to_rect(r: RECT) -> Rect {
    Rect::new(r.left, r.top, r.right - r.left, r.bottom - r.top)
}

fn extended_frame(hwnd: HWND) -> WindowResult<RECT> {
    let mut frame = RECT::default();
    // SAFETY: the out pointer and size describe a live RECT.
    let result = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut frame as *mut RECT as *mut _,
            mem::size_of::<RECT>() as u32,
        )
    };

    if result.is_err() {
        unsafe { GetWindowRect(hwnd, &mut frame)? };
    }

    Ok(frame)
}

/// Visible bounds of a window in screen coordinates.
///
/// Uses DWM extended frame bounds, falling back to `GetWindowRect`.
pub(crate) fn visible_rect(hwnd: HWND) -> WindowResult<Rect> {
    extended_frame(hwnd).map(to_rect)
}

/// Distance from the outer window rect to the visible frame.
pub(crate) fn border_offset(hwnd: HWND) -> WindowResult<BorderOffset> {
    let mut outer = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut outer)? };

    let frame = extended_frame(hwnd)?;

    Ok(BorderOffset {
        left: frame.left - outer.left,
        top: frame.top - outer.top,
    })
}
