//! Standard confirmation screens built on the pagination facade and the
//! confirmation flow

use crate::address::{split_address, DerivationPath};
use crate::confirm::{
    Buttons, ButtonRequestType, CancelSignal, ConfirmFlow, ConfirmOutcome, HostLink, Renderer,
    Screen, UserInput,
};
use crate::content::{Style, StyledContent};
use crate::error::ScreenError;
use crate::layout::{paginate_content, paginate_text, DisplayGeometry, FontLibrary, PaginateOptions};
use crate::render::{Color, Header, Icon};

pub const ADDRESS_TITLE: &str = "Confirm address";
pub const ADDRESS_QR_BUTTON: &str = "QR";
pub const QR_BACK_BUTTON: &str = "Address";
pub const WARNING_BUTTON: &str = "Try again";
pub const SUCCESS_BUTTON: &str = "Continue";

/// Answer of the key-path policy for a requested path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVerdict {
    Known,
    Unknown,
    Forbidden,
}

/// Decides whether a derivation path belongs to the requesting coin/account
pub trait PathPolicy {
    fn check(&self, path: &DerivationPath) -> PathVerdict;
}

impl<F> PathPolicy for F
where
    F: Fn(&DerivationPath) -> PathVerdict,
{
    fn check(&self, path: &DerivationPath) -> PathVerdict {
        self(path)
    }
}

/// Device safety-check level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafetyChecks {
    /// Unknown paths are refused
    #[default]
    Strict,
    /// Unknown paths are allowed after a warning, until reboot
    PromptTemporarily,
    /// Unknown paths are always allowed after a warning
    PromptAlways,
}

/// Everything a screen needs to be shown and answered
pub struct ConfirmContext<'a, H, R, I> {
    host: &'a mut H,
    renderer: &'a mut R,
    input: &'a mut I,
    cancel: &'a mut CancelSignal,
    geometry: &'a DisplayGeometry,
    fonts: &'a FontLibrary,
}

impl<'a, H, R, I> ConfirmContext<'a, H, R, I>
where
    H: HostLink,
    R: Renderer,
    I: UserInput,
{
    pub fn new(
        host: &'a mut H,
        renderer: &'a mut R,
        input: &'a mut I,
        cancel: &'a mut CancelSignal,
        geometry: &'a DisplayGeometry,
        fonts: &'a FontLibrary,
    ) -> Self {
        Self {
            host,
            renderer,
            input,
            cancel,
            geometry,
            fonts,
        }
    }

    /// Paginate `content` under `header` for this display
    pub fn text_screen(&self, content: StyledContent, header: Header, break_words: bool) -> Screen {
        Screen::Text(paginate_content(
            content,
            header,
            break_words,
            self.geometry,
            self.fonts,
        ))
    }

    /// Run one confirmation and report its outcome
    pub async fn confirm(
        &mut self,
        screen: Screen,
        code: ButtonRequestType,
        buttons: Buttons,
    ) -> ConfirmOutcome {
        ConfirmFlow::new(screen, code, buttons)
            .run(
                &mut *self.host,
                &mut *self.renderer,
                &mut *self.input,
                &mut *self.cancel,
            )
            .await
    }

    /// Like [`confirm`](Self::confirm), but anything short of approval is an error
    pub async fn require_confirm(
        &mut self,
        screen: Screen,
        code: ButtonRequestType,
        buttons: Buttons,
    ) -> Result<(), ScreenError> {
        match self.confirm(screen, code, buttons).await {
            ConfirmOutcome::Approved => Ok(()),
            ConfirmOutcome::Cancelled => Err(ScreenError::Cancelled),
            ConfirmOutcome::TimedOut => Err(ScreenError::TimedOut),
        }
    }

    /// Paginate a single text and ask for confirmation
    pub async fn show_paginated_text(
        &mut self,
        text: &str,
        header: &str,
        options: &PaginateOptions,
    ) -> ConfirmOutcome {
        let pages = paginate_text(text, header, options, self.geometry, self.fonts);
        self.confirm(Screen::Text(pages), ButtonRequestType::Other, Buttons::default())
            .await
    }

    /// Show `address` as a QR code. The cancel button returns to the text view.
    pub async fn show_qr(&mut self, address: &str, desc: &str, cancel: &str) -> ConfirmOutcome {
        let header = Header::new(desc, Icon::Receive, Color::GREEN);
        self.confirm(
            Screen::qr(header, address),
            ButtonRequestType::Address,
            Buttons::new("Confirm", Some(cancel)),
        )
        .await
    }

    /// Show `address` in mono chunks, toggling to the QR view on cancel
    /// until the user confirms either view
    pub async fn show_address(&mut self, address: &str, desc: &str) -> Result<(), ScreenError> {
        loop {
            let header = Header::new(desc, Icon::Receive, Color::GREEN);
            let screen = self.text_screen(address_content(address), header, false);
            let buttons = Buttons::new("Confirm", Some(ADDRESS_QR_BUTTON));
            match self.confirm(screen, ButtonRequestType::Address, buttons).await {
                ConfirmOutcome::Approved => return Ok(()),
                ConfirmOutcome::TimedOut => return Err(ScreenError::TimedOut),
                ConfirmOutcome::Cancelled => self.stop_if_aborted()?,
            }

            match self.show_qr(address, desc, QR_BACK_BUTTON).await {
                ConfirmOutcome::Approved => return Ok(()),
                ConfirmOutcome::TimedOut => return Err(ScreenError::TimedOut),
                ConfirmOutcome::Cancelled => self.stop_if_aborted()?,
            }
        }
    }

    /// Red warning with bold `subheader` rows over `content` rows; the
    /// only button acknowledges it
    pub async fn show_warning(
        &mut self,
        content: &[&str],
        subheader: &[&str],
        button: &str,
    ) -> Result<(), ScreenError> {
        let screen = self.text_screen(notice_content(subheader, content), Header::warning(), false);
        self.require_confirm(screen, ButtonRequestType::Warning, Buttons::new(button, None))
            .await
    }

    pub async fn show_success(
        &mut self,
        content: &[&str],
        subheader: &[&str],
        button: &str,
    ) -> Result<(), ScreenError> {
        let screen = self.text_screen(notice_content(subheader, content), Header::success(), false);
        self.require_confirm(screen, ButtonRequestType::Success, Buttons::new(button, None))
            .await
    }

    /// Ask the user to accept a path the policy does not recognise
    pub async fn show_path_warning(&mut self, path: &DerivationPath) -> Result<(), ScreenError> {
        let header = Header::new("Confirm path", Icon::Wrong, Color::RED);
        let screen = self.text_screen(path_warning_content(path), header, false);
        self.require_confirm(
            screen,
            ButtonRequestType::UnknownDerivationPath,
            Buttons::default(),
        )
        .await
    }

    /// Check `path` against `policy`, warn about unknown paths when
    /// `safety` allows them, then show the address
    pub async fn confirm_path_then_address<P: PathPolicy + ?Sized>(
        &mut self,
        policy: &P,
        safety: SafetyChecks,
        path: &DerivationPath,
        address: &str,
        desc: &str,
    ) -> Result<(), ScreenError> {
        match (policy.check(path), safety) {
            (PathVerdict::Known, _) => {}
            (PathVerdict::Forbidden, _) | (PathVerdict::Unknown, SafetyChecks::Strict) => {
                log::warn!("refusing key path {path} under {safety:?} safety checks");
                return Err(ScreenError::ForbiddenPath);
            }
            (PathVerdict::Unknown, SafetyChecks::PromptTemporarily | SafetyChecks::PromptAlways) => {
                log::debug!("unknown key path {path}, asking user");
                self.show_path_warning(path).await?;
            }
        }
        self.show_address(address, desc).await
    }

    fn stop_if_aborted(&mut self) -> Result<(), ScreenError> {
        if self.cancel.is_cancelled() {
            Err(ScreenError::Cancelled)
        } else {
            Ok(())
        }
    }
}

fn address_content(address: &str) -> StyledContent {
    StyledContent::builder()
        .rows(Style::Mono, split_address(address))
        .build()
}

/// Bold subheader rows, a half break, then normal rows
fn notice_content(subheader: &[&str], content: &[&str]) -> StyledContent {
    let mut builder = StyledContent::builder().rows(Style::Bold, subheader.iter().copied());
    if !subheader.is_empty() {
        builder = builder.br_half();
    }
    builder.rows(Style::Normal, content.iter().copied()).build()
}

fn path_warning_content(path: &DerivationPath) -> StyledContent {
    let path = path.to_string();
    StyledContent::builder()
        .normal("Path")
        .rows(Style::Mono, split_address(&path))
        .rows(Style::Normal, ["is unknown.", "Are you sure?"])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::HARDENED;
    use crate::confirm::testing::{RecordingHost, RecordingRenderer, ScriptedInput};
    use crate::confirm::{cancel_channel, InputEvent};
    use crate::content::Run;
    use futures::executor::block_on;

    const ADDRESS: &str = "1JAd7XCBzGudGpJQSDSfpmJhiygtLQWaGL";

    struct Device {
        host: RecordingHost,
        renderer: RecordingRenderer,
        input: ScriptedInput,
        cancel: CancelSignal,
        geometry: DisplayGeometry,
        fonts: FontLibrary,
    }

    impl Device {
        fn new(events: &[InputEvent]) -> Self {
            Self {
                host: RecordingHost::default(),
                renderer: RecordingRenderer::default(),
                input: ScriptedInput::new(events),
                cancel: CancelSignal::never(),
                geometry: DisplayGeometry::default(),
                fonts: FontLibrary::default(),
            }
        }

        fn context(&mut self) -> ConfirmContext<'_, RecordingHost, RecordingRenderer, ScriptedInput> {
            ConfirmContext::new(
                &mut self.host,
                &mut self.renderer,
                &mut self.input,
                &mut self.cancel,
                &self.geometry,
                &self.fonts,
            )
        }
    }

    fn known(_: &DerivationPath) -> PathVerdict {
        PathVerdict::Known
    }

    fn unknown(_: &DerivationPath) -> PathVerdict {
        PathVerdict::Unknown
    }

    fn bip44() -> DerivationPath {
        DerivationPath::new(&[44 | HARDENED, HARDENED, HARDENED, 0, 0])
    }

    #[test]
    fn test_notice_content_layout() {
        let content = notice_content(&["Address mismatch"], &["Check the", "receiving address"]);
        assert_eq!(
            content.runs(),
            &[
                Run::text(Style::Bold, "Address mismatch"),
                Run::HalfLineBreak,
                Run::text(Style::Normal, "Check the"),
                Run::NewLine,
                Run::text(Style::Normal, "receiving address"),
            ]
        );

        let plain = notice_content(&[], &["Done"]);
        assert_eq!(plain.runs(), &[Run::text(Style::Normal, "Done")]);
    }

    #[test]
    fn test_path_warning_content() {
        let content = path_warning_content(&bip44());
        assert_eq!(content.plain_text(), "Path\nm/44'/0'/0'/0/0\nis unknown.\nAre you sure?");
    }

    #[test]
    fn test_show_warning_has_no_cancel() {
        let mut device = Device::new(&[InputEvent::Cancel, InputEvent::Confirm]);
        let result = block_on(device.context().show_warning(
            &["Please check the address"],
            &["Wrong address"],
            WARNING_BUTTON,
        ));
        assert_eq!(result, Ok(()));
        assert_eq!(device.host.requests, vec![ButtonRequestType::Warning]);
        assert_eq!(device.renderer.frames, vec!["Warning:0"]);
        assert_eq!(device.input.remaining(), 0);
    }

    #[test]
    fn test_show_success_timeout() {
        let mut device = Device::new(&[InputEvent::Timeout]);
        let result = block_on(device.context().show_success(&["Recovery seed", "verified"], &[], SUCCESS_BUTTON));
        assert_eq!(result, Err(ScreenError::TimedOut));
        assert_eq!(device.host.requests, vec![ButtonRequestType::Success]);
        assert_eq!(device.renderer.frames, vec!["Success:0"]);
    }

    #[test]
    fn test_show_address_toggles_qr() {
        let mut device = Device::new(&[InputEvent::Cancel, InputEvent::Cancel, InputEvent::Confirm]);
        let result = block_on(device.context().show_address(ADDRESS, ADDRESS_TITLE));
        assert_eq!(result, Ok(()));
        assert_eq!(device.host.requests, vec![ButtonRequestType::Address; 3]);
        assert_eq!(
            device.renderer.frames,
            vec![
                "Confirm address:0".to_string(),
                format!("qr:{ADDRESS}"),
                "Confirm address:0".to_string(),
            ]
        );
    }

    #[test]
    fn test_show_address_stops_on_host_abort() {
        let mut device = Device::new(&[]);
        let (handle, signal) = cancel_channel();
        device.cancel = signal;
        handle.abort();
        let result = block_on(device.context().show_address(ADDRESS, ADDRESS_TITLE));
        assert_eq!(result, Err(ScreenError::Cancelled));
        assert_eq!(device.renderer.frames.len(), 1);
    }

    #[test]
    fn test_require_confirm_maps_cancel() {
        let mut device = Device::new(&[InputEvent::Cancel]);
        let result = block_on(async {
            let mut ctx = device.context();
            let screen = ctx.text_screen(
                StyledContent::from_text(Style::Normal, "Really wipe device?"),
                Header::warning(),
                false,
            );
            ctx.require_confirm(screen, ButtonRequestType::Other, Buttons::default())
                .await
        });
        assert_eq!(result, Err(ScreenError::Cancelled));
    }

    #[test]
    fn test_show_paginated_text_needs_every_page() {
        let text = "lorem ipsum ".repeat(40);
        let pages = paginate_text(
            &text,
            "Message",
            &PaginateOptions::default(),
            &DisplayGeometry::default(),
            &FontLibrary::default(),
        )
        .len();
        assert!(pages > 1);

        let mut events = vec![InputEvent::Confirm];
        events.extend(std::iter::repeat(InputEvent::NextPage).take(pages - 1));
        events.push(InputEvent::Confirm);
        let mut device = Device::new(&events);
        let outcome = block_on(device.context().show_paginated_text(
            &text,
            "Message",
            &PaginateOptions::default(),
        ));
        assert_eq!(outcome, ConfirmOutcome::Approved);
        assert_eq!(device.renderer.frames.len(), pages);
        assert_eq!(device.host.requests, vec![ButtonRequestType::Other]);
    }

    #[test]
    fn test_known_path_goes_straight_to_address() {
        let mut device = Device::new(&[InputEvent::Confirm]);
        let result = block_on(device.context().confirm_path_then_address(
            &known,
            SafetyChecks::Strict,
            &bip44(),
            ADDRESS,
            ADDRESS_TITLE,
        ));
        assert_eq!(result, Ok(()));
        assert_eq!(device.host.requests, vec![ButtonRequestType::Address]);
    }

    #[test]
    fn test_unknown_path_prompts_when_allowed() {
        let mut device = Device::new(&[InputEvent::Confirm, InputEvent::Confirm]);
        let result = block_on(device.context().confirm_path_then_address(
            &unknown,
            SafetyChecks::PromptTemporarily,
            &bip44(),
            ADDRESS,
            ADDRESS_TITLE,
        ));
        assert_eq!(result, Ok(()));
        assert_eq!(
            device.host.requests,
            vec![ButtonRequestType::UnknownDerivationPath, ButtonRequestType::Address]
        );
        assert_eq!(device.renderer.frames, vec!["Confirm path:0", "Confirm address:0"]);
    }

    #[test]
    fn test_unknown_path_rejected_by_user() {
        let mut device = Device::new(&[InputEvent::Cancel]);
        let result = block_on(device.context().confirm_path_then_address(
            &unknown,
            SafetyChecks::PromptAlways,
            &bip44(),
            ADDRESS,
            ADDRESS_TITLE,
        ));
        assert_eq!(result, Err(ScreenError::Cancelled));
        assert_eq!(device.host.requests, vec![ButtonRequestType::UnknownDerivationPath]);
    }

    #[test]
    fn test_unknown_path_forbidden_when_strict() {
        let mut device = Device::new(&[InputEvent::Confirm]);
        let result = block_on(device.context().confirm_path_then_address(
            &unknown,
            SafetyChecks::Strict,
            &bip44(),
            ADDRESS,
            ADDRESS_TITLE,
        ));
        assert_eq!(result, Err(ScreenError::ForbiddenPath));
        assert!(device.host.requests.is_empty());
        assert!(device.renderer.frames.is_empty());
    }

    #[test]
    fn test_forbidden_path_ignores_safety_level() {
        let forbidden = |_: &DerivationPath| PathVerdict::Forbidden;
        let mut device = Device::new(&[InputEvent::Confirm]);
        let result = block_on(device.context().confirm_path_then_address(
            &forbidden,
            SafetyChecks::PromptAlways,
            &bip44(),
            ADDRESS,
            ADDRESS_TITLE,
        ));
        assert_eq!(result, Err(ScreenError::ForbiddenPath));
    }
}
