//! Confirmation state machine

use crate::confirm::{
    Buttons, ButtonRequestType, CancelSignal, ConfirmOutcome, HostLink, InputEvent, Renderer,
    Screen, UserInput,
};
use futures::future::{select, Either};
use futures::pin_mut;

/// Lifecycle of one confirmation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    AwaitingUserDecision { page: usize },
    Finished(ConfirmOutcome),
}

/// Reaction to one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Ignore,
    Turn(usize),
    Finish(ConfirmOutcome),
}

/// A single confirmation request. Build a fresh one per request.
#[derive(Debug)]
pub struct ConfirmFlow {
    screen: Screen,
    code: ButtonRequestType,
    buttons: Buttons,
    state: FlowState,
    seen_last: bool,
}

impl ConfirmFlow {
    pub fn new(screen: Screen, code: ButtonRequestType, buttons: Buttons) -> Self {
        Self {
            screen,
            code,
            buttons,
            state: FlowState::Idle,
            seen_last: false,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn code(&self) -> ButtonRequestType {
        self.code
    }

    /// Announce the prompt, render it and wait for the user.
    ///
    /// Host aborts win over pending input. Confirm is only accepted once the
    /// last page has been shown. A finished flow is never re-entered:
    /// calling `run` again returns the recorded outcome without touching
    /// any collaborator. A flow whose previous `run` was dropped while
    /// waiting resumes on the page it was showing, without a second
    /// button request.
    pub async fn run<H, R, I>(
        &mut self,
        host: &mut H,
        renderer: &mut R,
        input: &mut I,
        cancel: &mut CancelSignal,
    ) -> ConfirmOutcome
    where
        H: HostLink,
        R: Renderer,
        I: UserInput,
    {
        let last_page = self.screen.page_count() - 1;
        let mut page = match self.state {
            FlowState::Finished(outcome) => {
                log::warn!("confirmation {:?} already finished", self.code);
                return outcome;
            }
            FlowState::AwaitingUserDecision { page } => {
                log::debug!("confirmation {:?} resumed on page {}", self.code, page + 1);
                page
            }
            FlowState::Idle => {
                host.button_request(self.code);
                self.seen_last = last_page == 0;
                0
            }
        };
        self.state = FlowState::AwaitingUserDecision { page };
        self.render(renderer, page);

        loop {
            let event = {
                let cancelled = cancel.cancelled();
                let next = input.next_event();
                pin_mut!(cancelled, next);
                match select(cancelled, next).await {
                    Either::Left(((), _)) => None,
                    Either::Right((event, _)) => Some(event),
                }
            };

            let step = match event {
                None => {
                    log::info!("confirmation {:?} aborted by host", self.code);
                    Step::Finish(ConfirmOutcome::Cancelled)
                }
                Some(event) => self.step(event, page, last_page),
            };

            match step {
                Step::Ignore => {}
                Step::Turn(next) => {
                    page = next;
                    self.seen_last |= page == last_page;
                    self.state = FlowState::AwaitingUserDecision { page };
                    self.render(renderer, page);
                }
                Step::Finish(outcome) => {
                    log::info!("confirmation {:?} finished: {:?}", self.code, outcome);
                    self.state = FlowState::Finished(outcome);
                    return outcome;
                }
            }
        }
    }

    fn step(&self, event: InputEvent, page: usize, last_page: usize) -> Step {
        match event {
            InputEvent::Confirm if self.seen_last => Step::Finish(ConfirmOutcome::Approved),
            InputEvent::Confirm => {
                log::warn!("confirm ignored on page {} of {}", page + 1, last_page + 1);
                Step::Ignore
            }
            InputEvent::Cancel if self.buttons.cancel.is_some() => {
                Step::Finish(ConfirmOutcome::Cancelled)
            }
            InputEvent::Cancel => {
                log::warn!("cancel ignored: {:?} has no cancel button", self.code);
                Step::Ignore
            }
            InputEvent::Timeout => Step::Finish(ConfirmOutcome::TimedOut),
            InputEvent::NextPage if page < last_page => Step::Turn(page + 1),
            InputEvent::PrevPage if page > 0 => Step::Turn(page - 1),
            InputEvent::NextPage | InputEvent::PrevPage => Step::Ignore,
        }
    }

    fn render<R: Renderer>(&self, renderer: &mut R, page: usize) {
        let frame = self
            .screen
            .frame(page, &self.buttons)
            .expect("page index within screen");
        renderer.show(&frame);
    }
}
