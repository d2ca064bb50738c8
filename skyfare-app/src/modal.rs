//! Flight detail dialog: one instance at a time, focus trapped among its own
//! controls while open.

use std::fmt;

use skyfare_core::Flight;

/// Element id the dialog container takes focus under when it opens.
pub const DIALOG_ID: &str = "flight-modal";

/// Identifies a focusable control on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlId(pub String);

impl ControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page-level state the dialog borrows while it is open.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub scroll_locked: bool,
    pub focused: Option<ControlId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalControl {
    CloseHeader,
    CloseFooter,
    Book,
}

impl ModalControl {
    /// Tab order.
    pub const ORDER: [ModalControl; 3] = [ModalControl::CloseHeader, ModalControl::CloseFooter, ModalControl::Book];

    pub fn id(&self) -> &'static str {
        match self {
            ModalControl::CloseHeader => "modal-close-button",
            ModalControl::CloseFooter => "modal-close-button-footer",
            ModalControl::Book => "modal-book-button",
        }
    }

    fn position(&self) -> usize {
        match self {
            ModalControl::CloseHeader => 0,
            ModalControl::CloseFooter => 1,
            ModalControl::Book => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Enter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    Ignored,
    FocusMoved(ModalControl),
    Closed,
    /// The book control was activated for this flight id.
    BookingRequested(String),
}

#[derive(Debug)]
struct OpenDialog {
    flight: Flight,
    trigger: ControlId,
    /// `None` while the dialog container itself holds focus.
    focus: Option<ModalControl>,
}

#[derive(Debug, Default)]
pub struct DetailModal {
    open: Option<OpenDialog>,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn flight(&self) -> Option<&Flight> {
        self.open.as_ref().map(|dialog| &dialog.flight)
    }

    pub fn focused(&self) -> Option<ModalControl> {
        self.open.as_ref().and_then(|dialog| dialog.focus)
    }

    /// Show `flight`. A dialog that is already open is closed first and its
    /// trigger regains focus before the new one takes over.
    pub fn open(&mut self, flight: Flight, trigger: ControlId, page: &mut PageContext) {
        self.close(page);

        tracing::debug!("Opening detail dialog for flight {}", flight.id);
        page.scroll_locked = true;
        page.focused = Some(ControlId::new(DIALOG_ID));
        self.open = Some(OpenDialog {
            flight,
            trigger,
            focus: None,
        });
    }

    /// No-op when nothing is open.
    pub fn close(&mut self, page: &mut PageContext) -> ModalEvent {
        match self.open.take() {
            Some(dialog) => {
                page.scroll_locked = false;
                page.focused = Some(dialog.trigger);
                ModalEvent::Closed
            }
            None => ModalEvent::Ignored,
        }
    }

    pub fn handle_key(&mut self, press: KeyPress, page: &mut PageContext) -> ModalEvent {
        let Some(focus) = self.open.as_ref().map(|dialog| dialog.focus) else {
            return ModalEvent::Ignored;
        };

        match press.key {
            Key::Escape => self.close(page),
            Key::Tab => {
                let next = cycle(focus, press.shift);
                if let Some(dialog) = self.open.as_mut() {
                    dialog.focus = Some(next);
                }
                page.focused = Some(ControlId::new(next.id()));
                ModalEvent::FocusMoved(next)
            }
            Key::Enter => match focus {
                Some(control) => self.activate(control, page),
                None => ModalEvent::Ignored,
            },
            Key::Other => ModalEvent::Ignored,
        }
    }

    pub fn click_backdrop(&mut self, page: &mut PageContext) -> ModalEvent {
        self.close(page)
    }

    pub fn activate(&mut self, control: ModalControl, page: &mut PageContext) -> ModalEvent {
        match (control, self.open.as_ref()) {
            (_, None) => ModalEvent::Ignored,
            (ModalControl::CloseHeader | ModalControl::CloseFooter, Some(_)) => self.close(page),
            (ModalControl::Book, Some(dialog)) => {
                tracing::info!("Booking requested for flight {}", dialog.flight.id);
                ModalEvent::BookingRequested(dialog.flight.id.clone())
            }
        }
    }
}

fn cycle(current: Option<ModalControl>, backwards: bool) -> ModalControl {
    let order = ModalControl::ORDER;
    let last = order.len() - 1;

    let index = match (current, backwards) {
        (None, false) => 0,
        (None, true) => last,
        (Some(control), false) => (control.position() + 1) % order.len(),
        (Some(control), true) => control.position().checked_sub(1).unwrap_or(last),
    };
    order[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn flight(id: &str) -> Flight {
        let departure = Utc.with_ymd_and_hms(2026, 11, 3, 6, 0, 0).unwrap();
        Flight {
            id: id.to_string(),
            airline: "Pegasus Airlines".to_string(),
            flight_number: "PC2210".to_string(),
            price: 850.0,
            currency: "TRY".to_string(),
            departure,
            arrival: departure + Duration::minutes(80),
            origin: "SAW".to_string(),
            destination: "AYT".to_string(),
            stops: 0,
            aircraft: "A320".to_string(),
            policy: "Non-refundable".to_string(),
            baggage: None,
            available_seats: None,
            duration: None,
            stopover: None,
            cabin_class: None,
        }
    }

    fn opened(trigger: &str) -> (DetailModal, PageContext) {
        let mut modal = DetailModal::new();
        let mut page = PageContext::default();
        modal.open(flight("PC2210"), ControlId::new(trigger), &mut page);
        (modal, page)
    }

    #[test]
    fn test_open_locks_scroll_and_focuses_dialog() {
        let (modal, page) = opened("details-PC2210");
        assert!(modal.is_open());
        assert!(page.scroll_locked);
        assert_eq!(page.focused, Some(ControlId::new(DIALOG_ID)));
        assert_eq!(modal.focused(), None);
    }

    #[test]
    fn test_close_restores_page() {
        let (mut modal, mut page) = opened("details-PC2210");
        assert_eq!(modal.close(&mut page), ModalEvent::Closed);
        assert!(!modal.is_open());
        assert!(!page.scroll_locked);
        assert_eq!(page.focused, Some(ControlId::new("details-PC2210")));

        assert_eq!(modal.close(&mut page), ModalEvent::Ignored);
    }

    #[test]
    fn test_tab_wraps_around() {
        let (mut modal, mut page) = opened("details-PC2210");
        let tab = KeyPress::new(Key::Tab);

        assert_eq!(modal.handle_key(tab, &mut page), ModalEvent::FocusMoved(ModalControl::CloseHeader));
        assert_eq!(modal.handle_key(tab, &mut page), ModalEvent::FocusMoved(ModalControl::CloseFooter));
        assert_eq!(modal.handle_key(tab, &mut page), ModalEvent::FocusMoved(ModalControl::Book));
        assert_eq!(modal.handle_key(tab, &mut page), ModalEvent::FocusMoved(ModalControl::CloseHeader));
        assert_eq!(page.focused, Some(ControlId::new("modal-close-button")));
    }

    #[test]
    fn test_shift_tab_wraps_backwards() {
        let (mut modal, mut page) = opened("details-PC2210");
        let back = KeyPress::shifted(Key::Tab);

        assert_eq!(modal.handle_key(back, &mut page), ModalEvent::FocusMoved(ModalControl::Book));
        assert_eq!(modal.handle_key(back, &mut page), ModalEvent::FocusMoved(ModalControl::CloseFooter));
        assert_eq!(modal.handle_key(back, &mut page), ModalEvent::FocusMoved(ModalControl::CloseHeader));
        assert_eq!(modal.handle_key(back, &mut page), ModalEvent::FocusMoved(ModalControl::Book));
    }

    #[test]
    fn test_escape_and_backdrop_close() {
        let (mut modal, mut page) = opened("a");
        assert_eq!(modal.handle_key(KeyPress::new(Key::Escape), &mut page), ModalEvent::Closed);
        assert_eq!(modal.handle_key(KeyPress::new(Key::Escape), &mut page), ModalEvent::Ignored);

        let (mut modal, mut page) = opened("b");
        assert_eq!(modal.click_backdrop(&mut page), ModalEvent::Closed);
        assert!(!page.scroll_locked);
    }

    #[test]
    fn test_enter_activates_focused_control() {
        let (mut modal, mut page) = opened("details-PC2210");
        assert_eq!(modal.handle_key(KeyPress::new(Key::Enter), &mut page), ModalEvent::Ignored);

        modal.handle_key(KeyPress::shifted(Key::Tab), &mut page);
        assert_eq!(
            modal.handle_key(KeyPress::new(Key::Enter), &mut page),
            ModalEvent::BookingRequested("PC2210".to_string())
        );
        assert!(modal.is_open());

        modal.handle_key(KeyPress::new(Key::Tab), &mut page);
        assert_eq!(modal.handle_key(KeyPress::new(Key::Enter), &mut page), ModalEvent::Closed);
    }

    #[test]
    fn test_second_open_replaces_first() {
        let (mut modal, mut page) = opened("details-PC2210");
        modal.open(flight("TK2310"), ControlId::new("details-TK2310"), &mut page);

        assert_eq!(modal.flight().map(|f| f.id.as_str()), Some("TK2310"));
        assert!(page.scroll_locked);

        modal.close(&mut page);
        assert_eq!(page.focused, Some(ControlId::new("details-TK2310")));
    }
}
