use bearwin_core::{
    CreateParams, Cursor, DisplayState, Handle, KeyCode, Rect, Surface, Vector, WindowResult,
};
use windows::Win32::Foundation::{HWND, LPARAM, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{ClientToScreen, UpdateWindow};
use windows::Win32::UI::Input::KeyboardAndMouse::{GetActiveWindow, GetAsyncKeyState};
use windows::Win32::UI::WindowsAndMessaging::{
    ClipCursor, CreateWindowExW, DestroyWindow, GCLP_HCURSOR, GWL_STYLE, GetClientRect,
    GetCursorPos, GetWindowLongPtrW, IsIconic, IsZoomed, PostMessageW, SET_WINDOW_POS_FLAGS,
    SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
    SetClassLongPtrW, SetCursor, SetCursorPos, SetParent, SetWindowLongPtrW, SetWindowPos,
    SetWindowTextW, ShowWindow, WINDOW_EX_STYLE, WINDOW_STYLE, WM_CLOSE,
};
use windows::core::HSTRING;

use crate::{class, frame, keys, resources};

pub(crate) fn to_hwnd(handle: Handle) -> HWND {
    HWND(handle.0 as *mut _)
}

pub(crate) fn to_handle(hwnd: HWND) -> Handle {
    Handle(hwnd.0 as usize)
}

/// A native window, wrapping a Win32 `HWND`.
pub(crate) struct Win32Surface {
    hwnd: HWND,
}

impl Win32Surface {
    /// Creates a hidden window of an already registered class.
    ///
    /// Messages sent during creation reach the window procedure before the
    /// window is registered and fall through to default handling.
    pub(crate) fn create(class_name: &str, params: &CreateParams) -> WindowResult<Self> {
        let class_name = HSTRING::from(class_name);
        let title = HSTRING::from(params.title.as_str());
        // Shown later through the initial display state.
        let style = WINDOW_STYLE(params.style.bits() & !WS_VISIBLE_BIT);

        // SAFETY: class and title strings live across the call.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                &class_name,
                &title,
                style,
                params.position.x,
                params.position.y,
                params.size.x,
                params.size.y,
                params.parent.map(to_hwnd),
                None,
                Some(class::instance()?),
                None,
            )?
        };
        if hwnd.is_invalid() {
            return Err("CreateWindowExW returned a null handle".into());
        }
        Ok(Self { hwnd })
    }

    fn set_pos(&self, x: i32, y: i32, cx: i32, cy: i32, flags: SET_WINDOW_POS_FLAGS) -> WindowResult<()> {
        let flags = flags | SWP_NOZORDER | SWP_NOACTIVATE;
        // SAFETY: SetWindowPos with a valid HWND is safe.
        unsafe { SetWindowPos(self.hwnd, None, x, y, cx, cy, flags)? };
        Ok(())
    }
}

const WS_VISIBLE_BIT: u32 = 0x1000_0000;

impl Surface for Win32Surface {
    fn handle(&self) -> Handle {
        to_handle(self.hwnd)
    }

    fn set_title(&self, title: &str) -> WindowResult<()> {
        unsafe { SetWindowTextW(self.hwnd, &HSTRING::from(title))? };
        Ok(())
    }

    fn client_rect(&self) -> WindowResult<Rect> {
        let mut rc = RECT::default();
        unsafe { GetClientRect(self.hwnd, &mut rc)? };
        let mut origin = POINT { x: rc.left, y: rc.top };
        // SAFETY: converts a point in place for a valid HWND.
        if !unsafe { ClientToScreen(self.hwnd, &mut origin) }.as_bool() {
            return Err("ClientToScreen failed".into());
        }
        Ok(Rect::new(origin.x, origin.y, rc.right - rc.left, rc.bottom - rc.top))
    }

    fn window_rect(&self) -> WindowResult<Rect> {
        frame::visible_rect(self.hwnd)
    }

    fn set_size(&self, size: Vector) -> WindowResult<()> {
        self.set_pos(0, 0, size.x, size.y, SWP_NOMOVE)
    }

    fn set_position(&self, position: Vector) -> WindowResult<()> {
        // Compensate for invisible borders so the visible frame lands
        // exactly at the requested position.
        let border = frame::border_offset(self.hwnd)?;
        let x = position.x - border.left;
        let y = position.y - border.top;
        bearwin_core::log_debug!(
            "set_position {}: target({},{}) border(L:{} T:{})",
            self.handle(),
            position.x,
            position.y,
            border.left,
            border.top
        );
        self.set_pos(x, y, 0, 0, SWP_NOSIZE)
    }

    fn show_state(&self) -> DisplayState {
        // SAFETY: simple queries returning a BOOL.
        unsafe {
            if IsIconic(self.hwnd).as_bool() {
                DisplayState::Minimized
            } else if IsZoomed(self.hwnd).as_bool() {
                DisplayState::Maximized
            } else {
                DisplayState::Restored
            }
        }
    }

    fn show(&self, state: DisplayState) {
        let cmd = match state {
            DisplayState::Restored => SW_RESTORE,
            DisplayState::Minimized => SW_MINIMIZE,
            DisplayState::Maximized | DisplayState::FullScreen => SW_MAXIMIZE,
        };
        unsafe {
            let _ = ShowWindow(self.hwnd, cmd);
        }
    }

    fn style_bits(&self) -> u32 {
        unsafe { GetWindowLongPtrW(self.hwnd, GWL_STYLE) as u32 }
    }

    fn set_style_bits(&self, bits: u32) {
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWL_STYLE, bits as isize);
        }
        // The frame is only recalculated once SWP_FRAMECHANGED is sent.
        let flags = SWP_NOMOVE | SWP_NOSIZE | SWP_FRAMECHANGED;
        if let Err(e) = self.set_pos(0, 0, 0, 0, flags) {
            bearwin_core::log_warn!("set_style_bits {}: {e}", self.handle());
        }
    }

    fn set_parent(&self, parent: Handle) -> WindowResult<()> {
        unsafe { SetParent(self.hwnd, Some(to_hwnd(parent)))? };
        Ok(())
    }

    fn update(&self) {
        unsafe {
            let _ = UpdateWindow(self.hwnd);
        }
    }

    fn request_close(&self) {
        // SAFETY: posting to our own window's queue.
        if let Err(e) = unsafe { PostMessageW(Some(self.hwnd), WM_CLOSE, WPARAM(0), LPARAM(0)) } {
            bearwin_core::log_warn!("request_close {}: {e}", self.handle());
        }
    }

    fn destroy(&self) {
        // WM_DESTROY is sent to the window procedure before this returns.
        if let Err(e) = unsafe { DestroyWindow(self.hwnd) } {
            bearwin_core::log_warn!("DestroyWindow {}: {e}", self.handle());
        }
    }

    fn is_active(&self) -> bool {
        unsafe { GetActiveWindow() == self.hwnd }
    }

    fn set_cursor(&self, cursor: &Cursor) -> WindowResult<()> {
        let hcursor = resources::load_cursor(cursor)?;
        // The class cursor is restored on every WM_SETCURSOR, so replace
        // it as well as the current one.
        unsafe {
            SetClassLongPtrW(self.hwnd, GCLP_HCURSOR, hcursor.0 as isize);
            SetCursor(Some(hcursor));
        }
        Ok(())
    }

    fn cursor_position(&self) -> WindowResult<Vector> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point)? };
        Ok(Vector::new(point.x, point.y))
    }

    fn set_cursor_position(&self, position: Vector) -> WindowResult<()> {
        unsafe { SetCursorPos(position.x, position.y)? };
        Ok(())
    }

    fn clip_cursor(&self, area: Option<Rect>) -> WindowResult<()> {
        match area {
            Some(r) => {
                let rc = RECT {
                    left: r.x,
                    top: r.y,
                    right: r.x + r.width,
                    bottom: r.y + r.height,
                };
                unsafe { ClipCursor(Some(&rc))? };
            }
            None => unsafe { ClipCursor(None)? },
        }
        Ok(())
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        let Some(vk) = keys::vk_from_key(key) else {
            return false;
        };
        // High bit set means the key is down right now.
        unsafe { GetAsyncKeyState(i32::from(vk)) < 0 }
    }
}
