//! Transient success/error feedback shown in the message region.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// CSS class for the message region.
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl UiMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// What the message region currently shows.
///
/// Every `show` carries a generation number. A hide only takes effect when
/// it names the generation on screen, so the timer of an older message can
/// never cut a newer one short.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSlot {
    current: Option<UiMessage>,
    visible: bool,
    generation: u64,
}

impl MessageSlot {
    pub fn show(&mut self, generation: u64, message: UiMessage) {
        self.current = Some(message);
        self.visible = true;
        self.generation = generation;
    }

    /// Returns whether anything changed.
    pub fn hide(&mut self, generation: u64) -> bool {
        if !self.visible || generation != self.generation {
            return false;
        }
        // text stays so the fade-out has something to show
        self.visible = false;
        true
    }

    pub fn current(&self) -> Option<&UiMessage> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let slot = MessageSlot::default();
        assert!(!slot.is_visible());
        assert!(slot.current().is_none());
    }

    #[test]
    fn hides_after_its_own_timer() {
        for message in [UiMessage::success("Signed up"), UiMessage::error("Activity is full")] {
            let mut slot = MessageSlot::default();
            slot.show(1, message.clone());
            assert!(slot.is_visible());
            assert!(slot.hide(1));
            assert!(!slot.is_visible());
            assert_eq!(slot.current(), Some(&message));
        }
    }

    #[test]
    fn stale_timer_does_not_hide_newer_message() {
        let mut slot = MessageSlot::default();
        slot.show(1, UiMessage::success("first"));
        slot.show(2, UiMessage::error("second"));
        assert!(!slot.hide(1));
        assert!(slot.is_visible());
        assert_eq!(slot.current().unwrap().text, "second");
        assert!(slot.hide(2));
    }

    #[test]
    fn hiding_twice_is_a_no_op() {
        let mut slot = MessageSlot::default();
        slot.show(3, UiMessage::success("ok"));
        assert!(slot.hide(3));
        assert!(!slot.hide(3));
    }

    #[test]
    fn kind_maps_to_css_class() {
        assert_eq!(MessageKind::Success.class(), "success");
        assert_eq!(MessageKind::Error.class(), "error");
    }
}
