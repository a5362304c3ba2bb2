use std::fmt;

/// Where the host should go when the user leaves a drill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// A caller-supplied exit handler already dealt with it.
    Handled,
    Navigate(String),
    Back,
}

/// Exit resolution, checked in order: handler, default path, back.
#[derive(Default)]
pub struct ExitPolicy {
    handler: Option<Box<dyn FnMut()>>,
    default_path: Option<String>,
}

impl ExitPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_handler(mut self, handler: impl FnMut() + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn with_default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    pub fn resolve(&mut self) -> NavigationIntent {
        if let Some(handler) = self.handler.as_mut() {
            handler();
            return NavigationIntent::Handled;
        }
        match &self.default_path {
            Some(path) => NavigationIntent::Navigate(path.clone()),
            None => NavigationIntent::Back,
        }
    }
}

impl fmt::Debug for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExitPolicy")
            .field("handler", &self.handler.is_some())
            .field("default_path", &self.default_path)
            .finish()
    }
}
