//! Event values, priority classes and the conventional event codes.

/// A recorded occurrence: an event code plus one integer parameter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Event {
    pub code: i32,
    pub param: i32,
}

impl Event {
    /// The "no event" value. Code `0` is reserved for it by convention only.
    pub const NONE: Event = Event::new(0, 0);

    #[inline]
    pub const fn new(code: i32, param: i32) -> Self {
        Self { code, param }
    }
}

/// Selects one of the two event queues.
///
/// All queued high priority events are dispatched before any low priority one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    #[default]
    Low,
}

/// Common event codes, provided so independent producers can avoid collisions.
///
/// Any other `i32` may be used as an event code as well; every API taking a
/// code accepts `impl Into<i32>`.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenericEvent {
    None = 0,
    KeyPress,
    KeyRelease,
    Char,
    Time,
    Timer0,
    Timer1,
    Timer2,
    Timer3,
    Analog0,
    Analog1,
    Analog2,
    Analog3,
    Analog4,
    Analog5,
    Menu0,
    Menu1,
    Menu2,
    Menu3,
    Menu4,
    Menu5,
    Menu6,
    Menu7,
    Menu8,
    Menu9,
    Serial,
    Paint,
    User0,
    User1,
    User2,
    User3,
    User4,
    User5,
    User6,
    User7,
    User8,
    User9,
}

impl GenericEvent {
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<GenericEvent> for i32 {
    #[inline]
    fn from(event: GenericEvent) -> Self {
        event.code()
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, GenericEvent, Priority};

    #[test]
    fn generic_codes_keep_their_numbering() {
        assert_eq!(GenericEvent::None.code(), 0);
        assert_eq!(GenericEvent::Time.code(), 4);
        assert_eq!(GenericEvent::Timer0.code(), 5);
        assert_eq!(GenericEvent::Analog0.code(), 9);
        assert_eq!(GenericEvent::Menu0.code(), 15);
        assert_eq!(GenericEvent::Serial.code(), 25);
        assert_eq!(GenericEvent::Paint.code(), 26);
        assert_eq!(i32::from(GenericEvent::User9), 36);
    }

    #[test]
    fn defaults() {
        assert_eq!(Priority::default(), Priority::Low);
        assert_eq!(Event::default(), Event::NONE);
    }
}
