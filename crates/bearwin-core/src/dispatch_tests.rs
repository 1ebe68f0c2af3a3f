use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::builder::WindowBuilder;
use crate::event::msg;
use crate::geometry::{Rect, Vector};
use crate::input::KeyCode;
use crate::lifecycle::Lifecycle;
use crate::testing::FakeOs;
use crate::window::{DisplayState, Style, Window};

type Log = Rc<RefCell<Vec<String>>>;

fn open(os: &Rc<FakeOs>, title: &str) -> Window {
    WindowBuilder::new(title)
        .position(Vector::new(100, 100))
        .size(Vector::new(800, 600))
        .build(&**os, os.registry())
}

/// Records close and destroy callbacks of a window under its title.
fn record_lifecycle(window: &Window, log: &Log) {
    let l = log.clone();
    window.on_close(move |w| l.borrow_mut().push(format!("{} close", w.title())));
    let l = log.clone();
    window.on_destroy(move |w| l.borrow_mut().push(format!("{} destroy", w.title())));
}

#[test]
fn closing_every_window_ends_the_loop() {
    // Arrange
    let os = FakeOs::new();
    let log: Log = Rc::default();
    let a = open(&os, "A");
    let b = open(&os, "B");
    record_lifecycle(&a, &log);
    record_lifecycle(&b, &log);

    // Act: close A and process exactly that message.
    a.close();
    let message = os.next_message().unwrap();
    os.deliver(&message);

    // Assert
    assert_eq!(*log.borrow(), vec!["A close", "A destroy"]);
    assert!(a.is_destroyed());
    assert!(!os.registry().all_destroyed());
    assert!(!os.quit_posted());

    // Act: close B and let the loop drain.
    b.close();
    let delivered = run(&*os);

    // Assert
    assert_eq!(delivered, 1);
    assert_eq!(
        *log.borrow(),
        vec!["A close", "A destroy", "B close", "B destroy"]
    );
    assert!(os.registry().all_destroyed());
    assert!(os.quit_posted());
    assert_eq!(os.destroyed(), vec![a.handle(), b.handle()]);
}

#[test]
fn messages_reach_the_window_they_were_sent_to() {
    // Arrange
    let os = FakeOs::new();
    let a = open(&os, "A");
    let b = open(&os, "B");
    let clicks: Log = Rc::default();
    for w in [&a, &b] {
        let c = clicks.clone();
        w.on_mouse_click(move |w, button, pos, mods| {
            c.borrow_mut()
                .push(format!("{} {button:?} {},{} {}", w.title(), pos.x, pos.y, mods.shift));
        });
    }

    // Act
    let result = os.send(RawMessage::new(
        b.handle(),
        msg::WM_RBUTTONDOWN,
        0x2 | 0x4,
        (7 << 16) | 5,
    ));

    // Assert
    assert_eq!(result, 0);
    assert_eq!(*clicks.borrow(), vec!["B Right 5,7 true"]);
}

#[test]
fn untranslated_messages_go_to_the_default_handler() {
    let os = FakeOs::new();
    let a = open(&os, "A");
    let create = RawMessage::new(a.handle(), 0x0001, 0, 0);

    assert_eq!(os.dispatcher().dispatch(&create), Disposition::Default);
}

#[test]
fn unknown_handles_never_reach_a_callback() {
    // Arrange
    let os = FakeOs::new();
    let a = open(&os, "A");
    let log: Log = Rc::default();
    record_lifecycle(&a, &log);
    let stranger = Handle(0xDEAD);

    // Act
    os.send(RawMessage::new(stranger, msg::WM_CLOSE, 0, 0));

    // Assert: the default handler destroyed the stranger, nothing else.
    assert!(log.borrow().is_empty());
    assert_eq!(os.destroyed(), vec![stranger]);
    assert!(!os.quit_posted());
    assert!(a.is_valid());
}

#[test]
fn creation_notifications_before_registration_are_defaulted() {
    let os = FakeOs::new();

    let a = open(&os, "A");

    let first = os.defaulted()[0];
    assert_eq!(first.handle, a.handle());
    assert_eq!(first.kind, msg::WM_MOVE);
}

#[test]
fn paint_runs_update_and_still_reaches_the_default_handler() {
    // Arrange
    let os = FakeOs::new();
    let a = open(&os, "A");
    let painted = Rc::new(RefCell::new(0));
    let p = painted.clone();
    a.on_update(move |_| *p.borrow_mut() += 1);

    // Act
    a.update();

    // Assert
    assert_eq!(*painted.borrow(), 1);
    let last = *os.defaulted().last().unwrap();
    assert_eq!(last.kind, msg::WM_PAINT);
}

#[test]
fn destroy_before_any_window_was_retired_does_not_quit() {
    let dispatcher = Dispatcher::default();

    let disposition = dispatcher.dispatch(&RawMessage::new(Handle(1), msg::WM_DESTROY, 0, 0));

    assert_eq!(disposition, Disposition::Default);
}

#[test]
fn explicit_destroy_skips_close_and_quits_when_last() {
    // Arrange
    let os = FakeOs::new();
    let a = open(&os, "A");
    let log: Log = Rc::default();
    record_lifecycle(&a, &log);

    // Act
    a.destroy();
    a.destroy();

    // Assert
    assert_eq!(*log.borrow(), vec!["A destroy"]);
    assert_eq!(a.lifecycle(), Lifecycle::Destroyed);
    assert!(os.registry().is_empty());
    assert!(os.quit_posted());
}

#[test]
fn close_callback_may_destroy_its_own_window() {
    // Arrange
    let os = FakeOs::new();
    let a = open(&os, "A");
    let log: Log = Rc::default();
    record_lifecycle(&a, &log);
    let l = log.clone();
    a.on_close(move |w| {
        l.borrow_mut().push("close".into());
        w.destroy();
    });

    // Act
    a.close();
    run(&*os);

    // Assert: the native window is torn down exactly once.
    assert_eq!(os.destroyed(), vec![a.handle()]);
    assert!(a.is_destroyed());
}

#[test]
fn dropping_a_window_destroys_and_unregisters_it() {
    // Arrange
    let os = FakeOs::new();
    let log: Log = Rc::default();
    let keep = open(&os, "keep");
    let a = open(&os, "A");
    record_lifecycle(&a, &log);
    let handle = a.handle();

    // Act
    drop(a);

    // Assert
    assert_eq!(*log.borrow(), vec!["A destroy"]);
    assert_eq!(os.destroyed(), vec![handle]);
    assert_eq!(os.registry().handles(), vec![keep.handle()]);
    assert!(!os.quit_posted());
}

#[test]
fn failed_construction_yields_an_inert_window() {
    // Arrange
    let os = FakeOs::new();
    os.fail_next_create();

    // Act
    let w = open(&os, "broken");
    w.set_title("renamed");
    w.set_state(DisplayState::Maximized);
    w.set_mouse_position(Vector::new(1, 1));
    w.close();
    w.destroy();

    // Assert
    assert!(!w.is_valid());
    assert!(w.handle().is_null());
    assert_eq!(w.lifecycle(), Lifecycle::Uninitialized);
    assert_eq!(w.title(), "broken");
    assert_eq!(w.size(), Vector::default());
    assert_eq!(w.state(), DisplayState::Restored);
    assert_eq!(w.mouse_position(), None);
    assert!(!w.is_key_down(KeyCode::A));
    assert!(os.registry().is_empty());
    drop(w);
    assert!(os.destroyed().is_empty());
}

#[test]
fn try_build_reports_the_failure() {
    let os = FakeOs::new();
    os.fail_next_create();

    let result = WindowBuilder::new("broken").try_build(&*os, os.registry());

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "window creation refused");
}

#[test]
fn duplicate_handle_is_rejected_without_touching_the_owner() {
    // Arrange
    let os = FakeOs::new();
    let a = open(&os, "A");
    os.reuse_next_handle(a.handle());

    // Act
    let result = WindowBuilder::new("B").try_build(&*os, os.registry());

    // Assert
    assert!(result.is_err());
    assert_eq!(os.registry().handles(), vec![a.handle()]);
    assert!(a.is_valid());
    assert!(os.destroyed().is_empty());
}

#[test]
fn windows_sharing_a_class_name_register_it_once() {
    let os = FakeOs::new();

    let _a = WindowBuilder::new("A").class_name("shared").build(&*os, os.registry());
    let _b = WindowBuilder::new("B").class_name("shared").build(&*os, os.registry());
    let _c = open(&os, "C");

    assert_eq!(os.classes(), vec!["shared".to_string(), "C".into()]);
}

#[test]
fn initial_state_is_applied_after_registration() {
    // Arrange
    let os = FakeOs::new();
    let seen: Log = Rc::default();
    let w = WindowBuilder::new("A")
        .size(Vector::new(640, 480))
        .state(DisplayState::Minimized)
        .build(&*os, os.registry());
    let s = seen.clone();
    w.on_resize(move |_, size, state| s.borrow_mut().push(format!("{}x{} {state:?}", size.x, size.y)));

    // Act
    w.set_state(DisplayState::Maximized);

    // Assert
    assert_eq!(w.state(), DisplayState::Maximized);
    assert_eq!(*seen.borrow(), vec!["640x480 Maximized"]);
}

#[test]
fn full_screen_is_derived_from_style_and_show_state() {
    // Arrange
    let os = FakeOs::new();
    let w = WindowBuilder::new("A")
        .state(DisplayState::FullScreen)
        .build(&*os, os.registry());

    // Assert
    assert_eq!(w.state(), DisplayState::FullScreen);
    assert_eq!(os.style_bits(w.handle()), Some(Style::FULLSCREEN_BITS));

    // Act
    w.set_state(DisplayState::Restored);

    // Assert
    assert_eq!(w.state(), DisplayState::Restored);
    assert_eq!(os.style_bits(w.handle()), Some(Style::Normal.bits()));
    w.set_state(DisplayState::Maximized);
    assert_eq!(w.state(), DisplayState::Maximized);
    assert_eq!(os.style_bits(w.handle()), Some(Style::Normal.bits()));
}

#[test]
fn leaving_full_screen_restores_the_configured_popup_style() {
    // Arrange
    let os = FakeOs::new();
    let w = WindowBuilder::new("A")
        .style(Style::Popup)
        .build(&*os, os.registry());
    w.set_state(DisplayState::FullScreen);
    assert_eq!(os.style_bits(w.handle()), Some(Style::FULLSCREEN_BITS));

    // Act
    w.set_state(DisplayState::Minimized);

    // Assert
    assert_eq!(w.state(), DisplayState::Minimized);
    assert_eq!(os.style_bits(w.handle()), Some(Style::Popup.bits()));
}

#[test]
fn maximized_popup_is_not_full_screen() {
    let os = FakeOs::new();
    let w = WindowBuilder::new("A")
        .style(Style::Popup)
        .state(DisplayState::Maximized)
        .build(&*os, os.registry());

    assert_eq!(w.state(), DisplayState::Maximized);
    assert_eq!(os.style_bits(w.handle()), Some(Style::Popup.bits()));
}

#[test]
fn geometry_setters_notify_callbacks() {
    // Arrange
    let os = FakeOs::new();
    let w = open(&os, "A");
    let seen: Log = Rc::default();
    let s = seen.clone();
    w.on_move(move |_, p| s.borrow_mut().push(format!("move {},{}", p.x, p.y)));
    let s = seen.clone();
    w.on_resize(move |_, v, _| s.borrow_mut().push(format!("size {}x{}", v.x, v.y)));

    // Act
    w.set_position(Vector::new(40, 50));
    w.set_size(Vector::new(300, 200));

    // Assert
    assert_eq!(*seen.borrow(), vec!["move 40,50", "size 300x200"]);
    assert_eq!(w.position(), Vector::new(40, 50));
    assert_eq!(w.size(), Vector::new(300, 200));
}

#[test]
fn set_title_updates_cached_title() {
    let os = FakeOs::new();
    let w = open(&os, "A");

    w.set_title("renamed");

    assert_eq!(w.title(), "renamed");
}

#[test]
fn mouse_position_is_client_relative_and_empty_outside() {
    // Arrange
    let os = FakeOs::new();
    let w = open(&os, "A");

    // Act / Assert
    os.move_cursor(Vector::new(150, 130));
    assert_eq!(w.mouse_position(), Some(Vector::new(50, 30)));
    os.move_cursor(Vector::new(900, 130));
    assert_eq!(w.mouse_position(), None);
}

#[test]
fn set_mouse_position_requires_an_active_window() {
    // Arrange
    let os = FakeOs::new();
    let w = open(&os, "A");
    os.move_cursor(Vector::new(0, 0));

    // Act
    w.set_mouse_position(Vector::new(10, 20));

    // Assert
    assert_eq!(os.cursor(), Vector::new(0, 0));
    os.activate(w.handle());
    w.set_mouse_position(Vector::new(10, 20));
    assert_eq!(os.cursor(), Vector::new(110, 120));
}

#[test]
fn lock_mouse_is_truncated_to_the_client_area() {
    // Arrange
    let os = FakeOs::new();
    let w = open(&os, "A");

    // Act
    w.lock_mouse(Vector::new(700, 500), Vector::new(300, 300));

    // Assert
    assert_eq!(os.clip(), Some(Rect::new(800, 600, 100, 100)));
    w.unlock_mouse();
    assert_eq!(os.clip(), None);
}

#[test]
fn set_mouse_position_saturates_huge_offsets() {
    // Arrange
    let os = FakeOs::new();
    let w = open(&os, "A");
    os.activate(w.handle());

    // Act
    w.set_mouse_position(Vector::new(i32::MAX, 0));

    // Assert
    assert_eq!(os.cursor(), Vector::new(i32::MAX, 100));
}

#[test]
fn lock_mouse_with_a_huge_size_clips_to_the_whole_client_area() {
    // Arrange
    let os = FakeOs::new();
    let w = open(&os, "A");

    // Act
    w.lock_mouse(Vector::new(0, 0), Vector::new(i32::MAX, i32::MAX));

    // Assert
    assert_eq!(os.clip(), Some(Rect::new(100, 100, 800, 600)));

    // Act
    w.lock_mouse(Vector::new(i32::MAX, i32::MAX), Vector::new(i32::MAX, i32::MAX));

    // Assert
    assert_eq!(os.clip().map(|r| r.size()), Some(Vector::new(0, 0)));
}

/// Hands out a fixed list of messages and records what comes back.
#[derive(Default)]
struct ScriptedSource {
    pending: RefCell<Vec<RawMessage>>,
    retrieved: RefCell<Vec<RawMessage>>,
    delivered: RefCell<Vec<RawMessage>>,
}

impl MessageSource for ScriptedSource {
    fn next_message(&self) -> Option<RawMessage> {
        let next = self.pending.borrow_mut().pop()?;
        self.retrieved.borrow_mut().push(next);
        Some(next)
    }

    fn deliver(&self, message: &RawMessage) {
        self.delivered.borrow_mut().push(*message);
    }
}

#[test]
fn run_delivers_each_message_it_retrieved_in_order() {
    // Arrange
    let source = ScriptedSource::default();
    *source.pending.borrow_mut() = vec![
        RawMessage::new(Handle(2), msg::WM_CLOSE, 0, 0),
        RawMessage::new(Handle(1), msg::WM_CHAR, 0x41, 0),
        RawMessage::new(Handle(1), msg::WM_MOVE, 0, 0),
    ];

    // Act
    let count = run(&source);

    // Assert
    assert_eq!(count, 3);
    assert_eq!(*source.delivered.borrow(), *source.retrieved.borrow());
}

#[test]
fn key_state_is_only_reported_for_the_active_window() {
    let os = FakeOs::new();
    let w = open(&os, "A");
    os.press(KeyCode::SPACE);

    assert!(!w.is_key_down(KeyCode::SPACE));
    os.activate(w.handle());
    assert!(w.is_key_down(KeyCode::SPACE));
    assert!(!w.is_key_down(KeyCode::A));
}

#[test]
fn scroll_and_keys_are_translated_before_delivery() {
    // Arrange
    let os = FakeOs::new();
    let w = open(&os, "A");
    let seen: Log = Rc::default();
    let s = seen.clone();
    w.on_mouse_scroll(move |_, forward| s.borrow_mut().push(format!("scroll {forward}")));
    let s = seen.clone();
    w.on_key(move |_, key| s.borrow_mut().push(format!("key {key}")));

    // Act
    os.send(RawMessage::new(w.handle(), msg::WM_MOUSEWHEEL, 0xFF88_0000, 0));
    os.send(RawMessage::new(w.handle(), msg::WM_CHAR, 0x1B, 0));
    os.send(RawMessage::new(w.handle(), msg::WM_CHAR, 0x07, 0));

    // Assert
    assert_eq!(*seen.borrow(), vec!["scroll false", "key Escape"]);
}

#[test]
fn callbacks_do_not_fire_after_destroy() {
    // Arrange
    let os = FakeOs::new();
    let w = open(&os, "A");
    let moves = Rc::new(RefCell::new(0));
    let m = moves.clone();
    w.on_mouse_move(move |_, _| *m.borrow_mut() += 1);
    let handle = w.handle();
    w.destroy();

    // Act
    let disposition = os
        .dispatcher()
        .dispatch(&RawMessage::new(handle, msg::WM_MOUSEMOVE, 0, 0));

    // Assert
    assert_eq!(disposition, Disposition::Default);
    assert_eq!(*moves.borrow(), 0);
}

#[test]
fn monitor_resolution_comes_from_the_platform() {
    let os = FakeOs::new();

    assert_eq!(crate::platform::Platform::monitor_resolution(&*os), Vector::new(1920, 1080));
}

#[test]
fn unusable_cursor_file_leaves_the_window_alone() {
    let os = FakeOs::new();
    let w = open(&os, "A");

    w.set_cursor(crate::input::Cursor::File("missing/pointer.cur".into()));
    w.set_cursor(crate::input::PointerShape::Hand);

    assert!(w.is_valid());
}
