#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    MenuButton,
    Menu,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Mobile menu and mobile filter sidebar visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavChrome {
    breakpoint: u32,
    menu_open: bool,
    sidebar_open: bool,
}

impl NavChrome {
    pub fn new(breakpoint: u32) -> Self {
        Self {
            breakpoint,
            menu_open: false,
            sidebar_open: false,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn overlay_visible(&self) -> bool {
        self.sidebar_open
    }

    /// Dispatches a click the way the page does: the button handler runs
    /// first and stops propagation, so the document-level outside-click
    /// handler never sees button clicks.
    pub fn click(&mut self, target: ClickTarget) -> Propagation {
        match target {
            ClickTarget::MenuButton => {
                self.menu_open = !self.menu_open;
                Propagation::Stop
            }
            ClickTarget::Menu => Propagation::Continue,
            ClickTarget::Outside => {
                self.menu_open = false;
                Propagation::Continue
            }
        }
    }

    /// Returns whether the sidebar is open afterwards. Wide viewports never open it.
    pub fn open_filter_sidebar(&mut self, viewport_width: u32) -> bool {
        if viewport_width < self.breakpoint {
            self.sidebar_open = true;
        } else {
            log::debug!("Filter sidebar stays closed at {viewport_width}px");
        }
        self.sidebar_open
    }

    pub fn toggle_filter_sidebar(&mut self, viewport_width: u32) -> bool {
        if self.sidebar_open {
            self.close_filter_sidebar();
            false
        } else {
            self.open_filter_sidebar(viewport_width)
        }
    }

    pub fn close_filter_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn overlay_click(&mut self) {
        self.close_filter_sidebar();
    }
}
