//! Page navigation.

/// Something that can send the visitor to another page.
pub trait Navigator {
    /// Leave the current page for `url`.
    fn navigate(&mut self, url: &str);

    /// Go back one entry in the session history.
    fn back(&mut self);

    /// Open `url` in a new tab, keeping the current page.
    fn open_in_new_tab(&mut self, url: &str);
}

/// Navigator that records requests instead of leaving the page.
///
/// Keeps a history stack so `back` behaves like the browser's.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    visited: Vec<String>,
    history: Vec<String>,
    back_requests: usize,
    opened: Vec<String>,
}

impl RecordingNavigator {
    /// Navigator that has not gone anywhere yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs navigated to, in order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Page the visitor is on, if any navigation happened.
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// How many times `back` was requested.
    pub fn back_requests(&self) -> usize {
        self.back_requests
    }

    /// URLs opened in new tabs, in order.
    pub fn opened_tabs(&self) -> &[String] {
        &self.opened
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &str) {
        self.visited.push(url.to_string());
        self.history.push(url.to_string());
    }

    fn back(&mut self) {
        self.back_requests += 1;
        self.history.pop();
    }

    fn open_in_new_tab(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate(&mut self, url: &str) {
        (**self).navigate(url)
    }

    fn back(&mut self) {
        (**self).back()
    }

    fn open_in_new_tab(&mut self, url: &str) {
        (**self).open_in_new_tab(url)
    }
}
