use std::mem;

use bearwin_core::{ClassDescriptor, WindowResult};
use windows::Win32::Foundation::{ERROR_CLASS_ALREADY_EXISTS, GetLastError, HINSTANCE};
use windows::Win32::Graphics::Gdi::{COLOR_WINDOW, HBRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, RegisterClassExW, WNDCLASSEXW,
};
use windows::core::{HSTRING, PCWSTR};

use crate::event_loop::window_proc;
use crate::resources;

/// Handle of the running executable.
pub(crate) fn instance() -> WindowResult<HINSTANCE> {
    let module = unsafe { GetModuleHandleW(None)? };
    Ok(HINSTANCE(module.0))
}

/// Registers a window class whose messages go through the dispatcher.
///
/// A class that is already registered is reused as-is; its cursor and
/// icons stay whatever the first registration set.
pub(crate) fn ensure_registered(class: &ClassDescriptor) -> WindowResult<()> {
    let name = HSTRING::from(class.name.as_str());
    let cursor = resources::load_cursor(&class.cursor)?;

    let wc = WNDCLASSEXW {
        cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(window_proc),
        hInstance: instance()?,
        hCursor: cursor,
        hIcon: resources::load_icon(class.icon.as_deref()),
        hIconSm: resources::load_icon(class.small_icon.as_deref()),
        hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as usize as *mut _),
        lpszClassName: PCWSTR(name.as_ptr()),
        ..Default::default()
    };

    // SAFETY: every pointer in `wc` outlives the call; the OS copies them.
    if unsafe { RegisterClassExW(&wc) } != 0 {
        bearwin_core::log_debug!("registered class {:?}", class.name);
        return Ok(());
    }

    let error = unsafe { GetLastError() };
    if error == ERROR_CLASS_ALREADY_EXISTS {
        bearwin_core::log_debug!("class {:?} already registered", class.name);
        return Ok(());
    }
    Err(format!("RegisterClassExW {:?} failed: {}", class.name, error.0).into())
}
