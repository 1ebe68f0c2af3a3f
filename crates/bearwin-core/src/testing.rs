//! In-memory platform used by the unit tests.
//!
//! Mirrors the Win32 delivery rules that matter to the dispatcher:
//! destroy, resize, move and paint notifications arrive synchronously
//! from inside the call that caused them, while close requests are
//! posted to the queue and only seen by the message loop.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::dispatch::{self, Backend, Dispatcher, MessageSource};
use crate::event::{Handle, RawMessage, msg};
use crate::geometry::{Rect, Vector};
use crate::input::{Cursor, KeyCode};
use crate::platform::{ClassDescriptor, CreateParams, Platform, Surface, WindowResult};
use crate::registry::Registry;
use crate::window::DisplayState;

pub(crate) struct FakeOs {
    me: Weak<FakeOs>,
    dispatcher: Dispatcher,
    queue: RefCell<VecDeque<RawMessage>>,
    quit: Cell<bool>,
    next_handle: Cell<usize>,
    fail_next: Cell<bool>,
    reuse_handle: Cell<Option<Handle>>,
    active: Cell<Handle>,
    cursor: Cell<Vector>,
    clip: Cell<Option<Rect>>,
    keys_down: RefCell<Vec<KeyCode>>,
    destroyed: RefCell<Vec<Handle>>,
    defaulted: RefCell<Vec<RawMessage>>,
    classes: RefCell<Vec<String>>,
    styles: RefCell<Vec<(Handle, u32)>>,
}

impl FakeOs {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new_cyclic(|me| Self {
            me: me.clone(),
            dispatcher: Dispatcher::new(Registry::new()),
            queue: RefCell::default(),
            quit: Cell::new(false),
            next_handle: Cell::new(0x100),
            fail_next: Cell::new(false),
            reuse_handle: Cell::new(None),
            active: Cell::new(Handle::NULL),
            cursor: Cell::new(Vector::default()),
            clip: Cell::new(None),
            keys_down: RefCell::default(),
            destroyed: RefCell::default(),
            defaulted: RefCell::default(),
            classes: RefCell::default(),
            styles: RefCell::default(),
        })
    }

    pub(crate) fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub(crate) fn registry(&self) -> &Registry {
        self.dispatcher.registry()
    }

    /// Makes the next `create_surface` fail.
    pub(crate) fn fail_next_create(&self) {
        self.fail_next.set(true);
    }

    /// Makes the next `create_surface` hand out an existing handle.
    pub(crate) fn reuse_next_handle(&self, handle: Handle) {
        self.reuse_handle.set(Some(handle));
    }

    pub(crate) fn activate(&self, handle: Handle) {
        self.active.set(handle);
    }

    pub(crate) fn move_cursor(&self, screen: Vector) {
        self.cursor.set(screen);
    }

    pub(crate) fn cursor(&self) -> Vector {
        self.cursor.get()
    }

    pub(crate) fn clip(&self) -> Option<Rect> {
        self.clip.get()
    }

    pub(crate) fn press(&self, key: KeyCode) {
        self.keys_down.borrow_mut().push(key);
    }

    pub(crate) fn quit_posted(&self) -> bool {
        self.quit.get()
    }

    pub(crate) fn destroyed(&self) -> Vec<Handle> {
        self.destroyed.borrow().clone()
    }

    /// Messages that ended up in the default handler.
    pub(crate) fn defaulted(&self) -> Vec<RawMessage> {
        self.defaulted.borrow().clone()
    }

    pub(crate) fn classes(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }

    /// Current style bits of a window, as the platform sees them.
    pub(crate) fn style_bits(&self, handle: Handle) -> Option<u32> {
        self.styles
            .borrow()
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, bits)| *bits)
    }

    fn set_style(&self, handle: Handle, bits: u32) {
        let mut styles = self.styles.borrow_mut();
        match styles.iter_mut().find(|(h, _)| *h == handle) {
            Some(entry) => entry.1 = bits,
            None => styles.push((handle, bits)),
        }
    }

    /// Queues a message, as if posted by another party.
    pub(crate) fn post(&self, message: RawMessage) {
        self.queue.borrow_mut().push_back(message);
    }

    /// Sends a message straight to the window procedure.
    pub(crate) fn send(&self, message: RawMessage) -> isize {
        dispatch::route(&self.dispatcher, self, &message)
    }

    fn allocate_handle(&self) -> Handle {
        if let Some(handle) = self.reuse_handle.take() {
            return handle;
        }
        let handle = Handle(self.next_handle.get());
        self.next_handle.set(handle.0 + 0x10);
        handle
    }
}

impl Platform for FakeOs {
    fn create_surface(
        &self,
        class: &ClassDescriptor,
        params: &CreateParams,
    ) -> WindowResult<Box<dyn Surface>> {
        if self.fail_next.replace(false) {
            return Err("window creation refused".into());
        }
        let os = self.me.upgrade().ok_or("platform is gone")?;
        if !self.classes.borrow().contains(&class.name) {
            self.classes.borrow_mut().push(class.name.clone());
        }

        let handle = self.allocate_handle();
        let surface = FakeSurface {
            handle,
            os,
            rect: Cell::new(Rect::new(
                params.position.x,
                params.position.y,
                params.size.x,
                params.size.y,
            )),
            shown: Cell::new(DisplayState::Restored),
        };
        self.set_style(handle, params.style.bits());
        // Creation notifications arrive before the window can be registered.
        surface.notify_move();
        Ok(Box::new(surface))
    }

    fn monitor_resolution(&self) -> Vector {
        Vector::new(1920, 1080)
    }
}

impl Backend for FakeOs {
    fn destroy_window(&self, handle: Handle) {
        if self.destroyed.borrow().contains(&handle) {
            return;
        }
        self.destroyed.borrow_mut().push(handle);
        self.send(RawMessage::new(handle, msg::WM_DESTROY, 0, 0));
    }

    fn post_quit(&self) {
        self.quit.set(true);
    }

    fn default_proc(&self, raw: &RawMessage) -> isize {
        self.defaulted.borrow_mut().push(*raw);
        if raw.kind == msg::WM_CLOSE {
            self.destroy_window(raw.handle);
        }
        0
    }
}

impl MessageSource for FakeOs {
    fn next_message(&self) -> Option<RawMessage> {
        let next = self.queue.borrow_mut().pop_front();
        if next.is_none() {
            assert!(self.quit.get(), "message loop would block forever");
        }
        next
    }

    fn deliver(&self, message: &RawMessage) {
        self.send(*message);
    }
}

fn pack(v: Vector) -> isize {
    (((v.y as u16) as isize) << 16) | (v.x as u16) as isize
}

struct FakeSurface {
    handle: Handle,
    os: Rc<FakeOs>,
    rect: Cell<Rect>,
    shown: Cell<DisplayState>,
}

impl FakeSurface {
    fn gone(&self) -> bool {
        self.os.destroyed.borrow().contains(&self.handle)
    }

    fn notify_move(&self) {
        let origin = self.rect.get().origin();
        self.os
            .send(RawMessage::new(self.handle, msg::WM_MOVE, 0, pack(origin)));
    }

    fn notify_size(&self) {
        let kind = match self.shown.get() {
            DisplayState::Minimized => msg::SIZE_MINIMIZED,
            DisplayState::Maximized => msg::SIZE_MAXIMIZED,
            _ => msg::SIZE_RESTORED,
        };
        let size = self.rect.get().size();
        self.os
            .send(RawMessage::new(self.handle, msg::WM_SIZE, kind, pack(size)));
    }
}

impl Surface for FakeSurface {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_title(&self, _title: &str) -> WindowResult<()> {
        if self.gone() {
            return Err("invalid window handle".into());
        }
        Ok(())
    }

    fn client_rect(&self) -> WindowResult<Rect> {
        Ok(self.rect.get())
    }

    fn window_rect(&self) -> WindowResult<Rect> {
        Ok(self.rect.get())
    }

    fn set_size(&self, size: Vector) -> WindowResult<()> {
        let r = self.rect.get();
        self.rect.set(Rect::new(r.x, r.y, size.x, size.y));
        self.notify_size();
        Ok(())
    }

    fn set_position(&self, position: Vector) -> WindowResult<()> {
        let r = self.rect.get();
        self.rect
            .set(Rect::new(position.x, position.y, r.width, r.height));
        self.notify_move();
        Ok(())
    }

    fn show_state(&self) -> DisplayState {
        self.shown.get()
    }

    fn show(&self, state: DisplayState) {
        self.shown.set(state);
        self.notify_size();
    }

    fn style_bits(&self) -> u32 {
        self.os.style_bits(self.handle).unwrap_or_default()
    }

    fn set_style_bits(&self, bits: u32) {
        self.os.set_style(self.handle, bits);
    }

    fn set_parent(&self, _parent: Handle) -> WindowResult<()> {
        Ok(())
    }

    fn update(&self) {
        self.os
            .send(RawMessage::new(self.handle, msg::WM_PAINT, 0, 0));
    }

    fn request_close(&self) {
        self.os
            .post(RawMessage::new(self.handle, msg::WM_CLOSE, 0, 0));
    }

    fn destroy(&self) {
        self.os.destroy_window(self.handle);
    }

    fn is_active(&self) -> bool {
        self.os.active.get() == self.handle
    }

    fn set_cursor(&self, cursor: &Cursor) -> WindowResult<()> {
        match cursor {
            Cursor::File(path) if !path.exists() => {
                Err(format!("{}: cursor file not found", path.display()).into())
            }
            _ => Ok(()),
        }
    }

    fn cursor_position(&self) -> WindowResult<Vector> {
        Ok(self.os.cursor.get())
    }

    fn set_cursor_position(&self, position: Vector) -> WindowResult<()> {
        self.os.cursor.set(position);
        Ok(())
    }

    fn clip_cursor(&self, area: Option<Rect>) -> WindowResult<()> {
        self.os.clip.set(area);
        Ok(())
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.os.keys_down.borrow().contains(&key)
    }
}
