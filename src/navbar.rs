/// Scroll offset (in px) past which the bar switches to its compact style.
pub const SCROLL_THRESHOLD: f64 = 80.0;

pub struct MenuItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub static MENU_ITEMS: [MenuItem; 6] = [
    MenuItem { label: "Work", href: "/work" },
    MenuItem { label: "About", href: "/about" },
    MenuItem { label: "Services", href: "/services" },
    MenuItem { label: "Ideas", href: "/ideas" },
    MenuItem { label: "Careers", href: "/careers" },
    MenuItem { label: "Contact", href: "/contact" },
];

/// The menu entry whose section contains `pathname`.
pub fn active_menu_item(pathname: &str) -> Option<&'static MenuItem> {
    MENU_ITEMS.iter().find(|item| pathname.starts_with(item.href))
}

/// Visibility of the fixed navigation bar, driven by scroll events.
///
/// Past the threshold the bar hides while scrolling down and comes back on
/// any upward scroll. Near the top it is always shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarState {
    pub visible: bool,
    pub scrolled: bool,
    last_scroll_y: f64,
}

impl Default for NavbarState {
    fn default() -> Self {
        Self {
            visible: true,
            scrolled: false,
            last_scroll_y: 0.0,
        }
    }
}

impl NavbarState {
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if scroll_y > SCROLL_THRESHOLD {
            self.scrolled = true;
            self.visible = scroll_y <= self.last_scroll_y;
        } else {
            self.scrolled = false;
            self.visible = true;
        }
        self.last_scroll_y = scroll_y;
    }
}
