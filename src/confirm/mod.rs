//! Confirmation flow: show a screen, report the prompt to the host and
//! wait for exactly one user decision

mod cancel;
mod flow;

pub use cancel::{cancel_channel, CancelHandle, CancelSignal};
pub use flow::{ConfirmFlow, FlowState};

use crate::address::QrPlacement;
use crate::render::{Header, Page, PageSet};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Prompt kind announced to the host before waiting for input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonRequestType {
    Other,
    Address,
    UnknownDerivationPath,
    Success,
    Warning,
}

impl ButtonRequestType {
    /// Wire value of the request type
    pub fn code(self) -> u32 {
        match self {
            ButtonRequestType::Other => 1,
            ButtonRequestType::Address => 10,
            ButtonRequestType::UnknownDerivationPath => 15,
            ButtonRequestType::Success => 17,
            ButtonRequestType::Warning => 18,
        }
    }
}

/// Terminal result of a confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConfirmOutcome {
    Approved,
    Cancelled,
    TimedOut,
}

impl ConfirmOutcome {
    pub fn is_approved(self) -> bool {
        self == ConfirmOutcome::Approved
    }
}

/// Event delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Confirm,
    Cancel,
    Timeout,
    NextPage,
    PrevPage,
}

/// Button labels; warnings and success screens have no cancel button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buttons {
    pub confirm: String,
    pub cancel: Option<String>,
}

impl Buttons {
    pub fn new(confirm: impl Into<String>, cancel: Option<&str>) -> Self {
        Self {
            confirm: confirm.into(),
            cancel: cancel.map(str::to_string),
        }
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::new("Confirm", Some("Cancel"))
    }
}

/// What a confirmation displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Text(PageSet),
    Qr {
        header: Header,
        data: String,
        placement: QrPlacement,
    },
}

impl Screen {
    pub fn qr(header: Header, address: &str) -> Self {
        Screen::Qr {
            header,
            data: address.to_string(),
            placement: QrPlacement::for_address(address),
        }
    }

    pub fn page_count(&self) -> usize {
        match self {
            Screen::Text(pages) => pages.len(),
            Screen::Qr { .. } => 1,
        }
    }

    fn frame<'a>(&'a self, page: usize, buttons: &'a Buttons) -> Option<Frame<'a>> {
        match self {
            Screen::Text(pages) => Some(Frame::Page {
                page: pages.page(page)?,
                buttons,
            }),
            Screen::Qr {
                header,
                data,
                placement,
            } => Some(Frame::Qr {
                header,
                data,
                placement: *placement,
                buttons,
            }),
        }
    }
}

/// One rendered state of a confirmation, handed to the renderer
#[derive(Debug, Clone, Copy)]
pub enum Frame<'a> {
    Page {
        page: Page<'a>,
        buttons: &'a Buttons,
    },
    Qr {
        header: &'a Header,
        data: &'a str,
        placement: QrPlacement,
        buttons: &'a Buttons,
    },
}

/// Draws frames; never called by the layout engine itself
pub trait Renderer {
    fn show(&mut self, frame: &Frame<'_>);
}

/// Source of user decisions (buttons, touch, idle timer)
pub trait UserInput {
    fn next_event(&mut self) -> impl Future<Output = InputEvent>;
}

/// Host transport side of a confirmation
pub trait HostLink {
    fn button_request(&mut self, code: ButtonRequestType);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_request_codes() {
        assert_eq!(ButtonRequestType::Other.code(), 1);
        assert_eq!(ButtonRequestType::Address.code(), 10);
        assert_eq!(ButtonRequestType::UnknownDerivationPath.code(), 15);
        assert_eq!(ButtonRequestType::Success.code(), 17);
        assert_eq!(ButtonRequestType::Warning.code(), 18);
    }

    #[test]
    fn test_qr_screen() {
        let screen = Screen::qr(Header::default(), "1JAd7XCBzGudGpJQSDSfpmJhiygtLQWaGL");
        assert_eq!(screen.page_count(), 1);
        let buttons = Buttons::default();
        assert!(matches!(
            screen.frame(0, &buttons),
            Some(Frame::Qr { placement: QrPlacement { scale: 4, .. }, .. })
        ));
    }
}
