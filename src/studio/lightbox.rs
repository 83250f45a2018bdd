/// Image currently shown full-screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxImage {
    pub source: String,
    pub alt_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    Open(LightboxImage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxEvent {
    CloseControl,
    /// A click inside the overlay; `on_image` is true when it landed on the picture.
    OverlayClick { on_image: bool },
    /// Key name as reported by the input layer, e.g. `"Escape"`.
    KeyPress(String),
}

#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    state: LightboxState,
    scroll_locked: bool,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Valid from both states; an open lightbox just swaps its image.
    pub fn open(&mut self, image: LightboxImage) {
        self.state = LightboxState::Open(image);
        self.scroll_locked = true;
    }

    pub fn close(&mut self) {
        if self.is_open() {
            self.state = LightboxState::Closed;
            self.scroll_locked = false;
        }
    }

    /// Returns true if the event closed the lightbox.
    pub fn handle(&mut self, event: &LightboxEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        let closes = match event {
            LightboxEvent::CloseControl => true,
            LightboxEvent::OverlayClick { on_image } => !on_image,
            LightboxEvent::KeyPress(key) => key == "Escape",
        };
        if closes {
            self.close();
        }
        closes
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open(_))
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn current(&self) -> Option<&LightboxImage> {
        match &self.state {
            LightboxState::Open(image) => Some(image),
            LightboxState::Closed => None,
        }
    }
}
