use std::mem;

use bearwin_core::Vector;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MONITOR_DEFAULTTOPRIMARY, MONITORINFO, MonitorFromWindow,
};

/// Returns the full resolution of the primary monitor, taskbar included.
///
/// Falls back to `0x0` if the monitor cannot be queried.
pub fn primary_resolution() -> Vector {
    // MonitorFromWindow with a null HWND and MONITOR_DEFAULTTOPRIMARY
    // returns the primary monitor handle.
    let monitor = unsafe { MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY) };

    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: cbSize is set as the API requires.
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        bearwin_core::log_warn!("GetMonitorInfoW failed for the primary monitor");
        return Vector::default();
    }

    let rc = info.rcMonitor;
    Vector::new(rc.right - rc.left, rc.bottom - rc.top)
}
