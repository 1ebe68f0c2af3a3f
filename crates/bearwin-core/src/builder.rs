use std::path::PathBuf;
use std::rc::Rc;

use crate::config::WindowConfig;
use crate::event::Handle;
use crate::geometry::Vector;
use crate::input::Cursor;
use crate::platform::{ClassDescriptor, CreateParams, Platform, WindowResult};
use crate::registry::Registry;
use crate::window::{DisplayState, LogicalWindow, Style, Window};

/// Describes a window to create.
#[derive(Debug, Clone)]
pub struct WindowBuilder {
    title: String,
    size: Vector,
    position: Vector,
    class_name: Option<String>,
    cursor: Cursor,
    icon: Option<PathBuf>,
    small_icon: Option<PathBuf>,
    state: DisplayState,
    style: Style,
    parent: Option<Handle>,
}

impl Default for WindowBuilder {
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}

impl WindowBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self::default().title(title)
    }

    /// Starts from the `[window]` section of the user configuration.
    pub fn from_config(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            size: Vector::new(config.width, config.height),
            position: Vector::new(config.x, config.y),
            class_name: None,
            cursor: config
                .cursor_file
                .clone()
                .map_or(Cursor::Shape(config.cursor), Cursor::File),
            icon: config.icon.clone(),
            small_icon: config.small_icon.clone(),
            state: config.state,
            style: config.style,
            parent: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, size: Vector) -> Self {
        self.size = size;
        self
    }

    pub fn position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    /// Window class name. Defaults to the title.
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    pub fn cursor(mut self, cursor: impl Into<Cursor>) -> Self {
        self.cursor = cursor.into();
        self
    }

    /// Large (taskbar) icon file.
    pub fn icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.icon = Some(path.into());
        self
    }

    /// Small (title bar) icon file.
    pub fn small_icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.small_icon = Some(path.into());
        self
    }

    /// Display state applied right after creation.
    pub fn state(mut self, state: DisplayState) -> Self {
        self.state = state;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn parent(mut self, parent: &LogicalWindow) -> Self {
        self.parent = Some(parent.handle()).filter(|h| !h.is_null());
        self
    }

    /// Creates the window, reporting why construction failed.
    ///
    /// On success the window is registered before its initial state is
    /// applied, so the resulting resize/move notifications reach it.
    pub fn try_build(self, platform: &dyn Platform, registry: &Registry) -> WindowResult<Window> {
        let class = ClassDescriptor {
            name: self.class_name.unwrap_or_else(|| self.title.clone()),
            cursor: self.cursor,
            icon: self.icon,
            small_icon: self.small_icon,
        };
        let params = CreateParams {
            title: self.title,
            size: self.size,
            position: self.position,
            style: self.style,
            parent: self.parent,
        };

        let surface = platform.create_surface(&class, &params)?;
        let handle = surface.handle();
        let window = Rc::new(LogicalWindow::new(
            params.title,
            params.style,
            Some(surface),
            registry.clone(),
        ));

        // A rejected handle is left alone: on a duplicate it belongs to a
        // live window.
        if let Err(e) = registry.register(handle, &window) {
            crate::log_error!("window {handle} ({}): {e}", class.name);
            return Err(e.into());
        }
        crate::log_debug!("window {handle} live (class {:?})", class.name);

        window.set_state(self.state);
        window.update();
        if let Some(parent) = params.parent {
            window.set_parent(parent);
        }

        Ok(Window::from_shared(window))
    }

    /// Creates the window.
    ///
    /// Construction failure is not an error here: the returned window has a
    /// null handle, `is_valid()` is `false` and every operation on it is a
    /// no-op. Use [`WindowBuilder::try_build`] to learn why.
    pub fn build(self, platform: &dyn Platform, registry: &Registry) -> Window {
        let title = self.title.clone();
        let style = self.style;
        match self.try_build(platform, registry) {
            Ok(window) => window,
            Err(e) => {
                crate::log_warn!("could not create window {title:?}: {e}");
                Window::uninitialized(title, style, registry.clone())
            }
        }
    }
}
