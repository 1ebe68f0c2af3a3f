use std::cell::RefCell;
use std::rc::Rc;

use bearwin_core::dispatch::{self, Backend, Dispatcher, MessageSource};
use bearwin_core::{
    ClassDescriptor, CreateParams, Handle, Platform, RawMessage, Registry, Surface, Vector,
    Window, WindowBuilder, WindowResult,
};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW, MSG, PostQuitMessage,
    TranslateMessage,
};

use crate::surface::{Win32Surface, to_handle, to_hwnd};
use crate::{class, monitor};

// The dispatcher serving windows created on this thread. The window
// procedure clones the `Rc` out before dispatching, so re-entrant
// messages (WM_DESTROY from inside DestroyWindow) never hit a borrow.
thread_local! {
    static DISPATCHER: RefCell<Option<Rc<Dispatcher>>> = const { RefCell::new(None) };
}

/// The window procedure shared by every class registered through
/// [`EventLoop`].
pub(crate) unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let dispatcher = DISPATCHER.with(|cell| cell.borrow().clone());
    let Some(dispatcher) = dispatcher else {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };
    let raw = RawMessage::new(to_handle(hwnd), msg, wparam.0, lparam.0);
    LRESULT(dispatch::route(&dispatcher, &Win32Backend, &raw))
}

/// Carries out dispatcher decisions with Win32 calls.
struct Win32Backend;

impl Backend for Win32Backend {
    fn destroy_window(&self, handle: Handle) {
        // SAFETY: WM_DESTROY re-enters `window_proc` before this returns.
        if let Err(e) = unsafe { DestroyWindow(to_hwnd(handle)) } {
            bearwin_core::log_warn!("DestroyWindow {handle}: {e}");
        }
    }

    fn post_quit(&self) {
        unsafe { PostQuitMessage(0) };
    }

    fn default_proc(&self, raw: &RawMessage) -> isize {
        let result = unsafe {
            DefWindowProcW(
                to_hwnd(raw.handle),
                raw.kind,
                WPARAM(raw.wparam),
                LPARAM(raw.lparam),
            )
        };
        result.0
    }
}

/// The calling thread's message queue.
///
/// Keeps the full `MSG` of the last retrieved message, since
/// `TranslateMessage` needs fields `RawMessage` does not carry.
#[derive(Default)]
struct Win32Pump {
    current: RefCell<Option<(RawMessage, MSG)>>,
}

impl MessageSource for Win32Pump {
    fn next_message(&self) -> Option<RawMessage> {
        let mut msg = MSG::default();
        // 0 is WM_QUIT and -1 an error; both end the loop.
        if unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 <= 0 {
            return None;
        }
        let raw = RawMessage::new(to_handle(msg.hwnd), msg.message, msg.wParam.0, msg.lParam.0);
        *self.current.borrow_mut() = Some((raw, msg));
        Some(raw)
    }

    fn deliver(&self, message: &RawMessage) {
        let Some((raw, msg)) = self.current.borrow_mut().take() else {
            bearwin_core::log_warn!("deliver without a retrieved message: {message:?}");
            return;
        };
        debug_assert_eq!(raw, *message, "delivered message was not the one retrieved");
        // SAFETY: `msg` was filled in by GetMessageW on this thread.
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Owns the dispatcher for the current thread and creates windows on it.
///
/// Create it once on the UI thread, build windows with
/// [`EventLoop::create_window`], then call [`EventLoop::run`]. It is not
/// `Send`: windows, the registry and the loop all live on one thread.
pub struct EventLoop {
    dispatcher: Rc<Dispatcher>,
}

impl EventLoop {
    /// Installs a dispatcher for the calling thread, reusing the one
    /// already installed if there is one.
    pub fn new() -> Self {
        let dispatcher = DISPATCHER.with(|cell| {
            cell.borrow_mut()
                .get_or_insert_with(|| Rc::new(Dispatcher::new(Registry::new())))
                .clone()
        });
        Self { dispatcher }
    }

    pub fn registry(&self) -> &Registry {
        self.dispatcher.registry()
    }

    /// Builds a window on this thread. See [`WindowBuilder::build`].
    pub fn create_window(&self, builder: WindowBuilder) -> Window {
        builder.build(self, self.registry())
    }

    /// Builds a window, reporting why construction failed.
    pub fn try_create_window(&self, builder: WindowBuilder) -> WindowResult<Window> {
        builder.try_build(self, self.registry())
    }

    /// Pumps messages until the last window is destroyed.
    ///
    /// Returns the number of messages retrieved from the queue.
    pub fn run(&self) -> usize {
        bearwin_core::log_info!("message loop started ({} windows)", self.registry().len());
        dispatch::run(&Win32Pump::default())
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for EventLoop {
    fn create_surface(
        &self,
        class: &ClassDescriptor,
        params: &CreateParams,
    ) -> WindowResult<Box<dyn Surface>> {
        class::ensure_registered(class)?;
        let surface = Win32Surface::create(&class.name, params)?;
        Ok(Box::new(surface))
    }

    fn monitor_resolution(&self) -> Vector {
        monitor::primary_resolution()
    }
}
