//! The documentation modal controller.
//!
//! Owns the panel state machine: visibility, drag offset, drag gesture
//! and the content sink. All methods run on the UI thread; the only
//! background work is the document fetch, whose completions are applied
//! by [`ModalController::poll`].

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use docmodal_config::constants::{MIN_PANEL_HEIGHT, MIN_PANEL_WIDTH, SCROLL_STEP};
use docmodal_config::Config;
use docmodal_core::{Offset, Point};
use docmodal_document::{
    DocumentFetcher, DocumentLoader, DocumentLocation, DocumentRenderer, FetchCompletion,
    FetchError,
};
use docmodal_logger as logger;

use crate::element::contains;
use crate::{ContentState, DocumentContent, DragState, ElementId, ElementRegistry, Panel};

/// Text before the title in the header; `[X]` is the close control.
pub(crate) const CLOSE_LABEL: &str = " [X] ";

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub base: String,
    pub path: String,
}

/// Behavior switches for the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalOptions {
    /// Press outside the panel closes it
    pub close_on_backdrop: bool,
    /// Ignore completions of superseded fetches
    pub discard_stale: bool,
    pub width_percent: u16,
    pub height_percent: u16,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ModalOptions {
    fn from(config: &Config) -> Self {
        Self {
            close_on_backdrop: config.modal.close_on_backdrop,
            discard_stale: config.document.discard_stale,
            width_percent: config.modal.width_percent,
            height_percent: config.modal.height_percent,
        }
    }
}

/// Whether an input event was used by the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The modal acted on (or swallowed) the event
    Consumed,
    /// The host may handle the event
    Ignored,
}

pub struct ModalController {
    panel: Panel,
    drag: DragState,
    content: DocumentContent,
    elements: ElementRegistry,
    screen: Rect,
    source: DocumentSource,
    loader: DocumentLoader,
    renderer: Box<dyn DocumentRenderer>,
    options: ModalOptions,
}

impl ModalController {
    pub fn new(
        source: DocumentSource,
        fetcher: Arc<dyn DocumentFetcher>,
        renderer: Box<dyn DocumentRenderer>,
        options: ModalOptions,
    ) -> Self {
        logger::debug(format!(
            "Modal controller: {} renderer, backdrop close {}",
            renderer.name(),
            if options.close_on_backdrop { "on" } else { "off" }
        ));
        Self {
            panel: Panel::default(),
            drag: DragState::default(),
            content: DocumentContent::default(),
            elements: ElementRegistry::new(),
            screen: Rect::default(),
            source,
            loader: DocumentLoader::new(fetcher),
            renderer,
            options,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn is_shown(&self) -> bool {
        self.panel.is_shown()
    }

    pub fn offset(&self) -> Offset {
        self.panel.offset()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    /// Host-owned regions (the open trigger) are registered through this.
    pub fn elements_mut(&mut self) -> &mut ElementRegistry {
        &mut self.elements
    }

    /// Title shown in the panel header.
    pub fn title(&self) -> String {
        DocumentLocation::resolve(&self.source.base, &self.source.path)
            .map(|location| location.display_name())
            .unwrap_or_else(|_| self.source.path.clone())
    }

    /// Lay out the panel for a screen of `screen` size.
    ///
    /// Registers the panel regions at their default (untranslated)
    /// position. On a screen too small for a panel the regions are
    /// removed, and operations that need them become no-ops.
    pub fn layout(&mut self, screen: Rect) {
        self.screen = screen;

        let width = (u32::from(screen.width) * u32::from(self.options.width_percent) / 100) as u16;
        let height =
            (u32::from(screen.height) * u32::from(self.options.height_percent) / 100) as u16;
        let width = width.max(MIN_PANEL_WIDTH);
        let height = height.max(MIN_PANEL_HEIGHT);

        let panel_ids = [
            ElementId::Panel,
            ElementId::Header,
            ElementId::CloseTrigger,
            ElementId::ContentSink,
        ];
        if width > screen.width || height > screen.height {
            for id in panel_ids {
                self.elements.remove(id);
            }
            return;
        }

        let panel = Rect::new(
            screen.x + (screen.width - width) / 2,
            screen.y + (screen.height - height) / 2,
            width,
            height,
        );
        // "[X]" sits after the border corner and the label's leading space
        let close = Rect::new(panel.x + 2, panel.y, 3, 1);
        let header = Rect::new(panel.x, panel.y, panel.width, 1);
        let content = Rect::new(
            panel.x + 1,
            panel.y + 1,
            panel.width.saturating_sub(2),
            panel.height.saturating_sub(2),
        );

        self.elements.register(ElementId::Panel, panel);
        self.elements.register(ElementId::Header, header);
        self.elements.register(ElementId::CloseTrigger, close);
        self.elements.register(ElementId::ContentSink, content);
        self.content.set_viewport(content.width, content.height);
    }

    /// Where a region currently is on screen, offset applied and clipped.
    pub fn placed(&self, id: ElementId) -> Option<Rect> {
        let area = self.elements.get(id)?;
        if id.moves_with_panel() {
            self.panel.offset().apply(area, self.screen)
        } else {
            Some(area)
        }
    }

    fn hit(&self, id: ElementId, point: Point) -> bool {
        self.placed(id).is_some_and(|area| contains(area, point))
    }

    /// Log every missing region once, typically right after start-up.
    pub fn report_missing_elements(&self) {
        let ids = [
            ElementId::OpenTrigger,
            ElementId::CloseTrigger,
            ElementId::Panel,
            ElementId::ContentSink,
            ElementId::Header,
        ];
        for id in ids {
            if let Err(e) = self.elements.require(id) {
                logger::warn(format!("Documentation modal: {}", e));
            }
        }
    }

    /// Show the panel and start fetching the document.
    ///
    /// Every call fetches again, even while shown or while an earlier
    /// fetch is still running.
    pub fn open(&mut self) {
        if let Err(e) = self.elements.require(ElementId::Panel) {
            logger::warn(format!("Cannot open documentation: {}", e));
            return;
        }

        self.panel.show();

        match DocumentLocation::resolve(&self.source.base, &self.source.path) {
            Ok(location) => {
                self.content.replace(ContentState::Loading {
                    name: location.display_name(),
                });
                let request = self.loader.request(location.clone());
                logger::info(format!("Opening {} (fetch {})", location, request));
            }
            Err(e) => {
                let path = self.source.path.clone();
                logger::error(format!("Cannot resolve {}: {}", path, e));
                self.show_failure(&path, &e);
            }
        }
    }

    /// Hide the panel and put it back at its default position.
    ///
    /// Works even when the panel regions are gone (a resize can remove
    /// them while shown); only a diagnostic is logged then.
    pub fn close(&mut self) {
        if let Err(e) = self.elements.require(ElementId::Panel) {
            logger::warn(format!("Closing documentation without a panel: {}", e));
        }

        self.drag.end();
        self.panel.hide();
        self.content.scroll_to_top();
        logger::debug("Documentation closed");
    }

    /// Apply finished fetches. Returns whether the content changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(completion) = self.loader.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    fn apply(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion {
            request,
            location,
            result,
        } = completion;

        if self.options.discard_stale && self.loader.latest_request() != Some(request) {
            logger::debug(format!("Discarding stale fetch {}", request));
            return false;
        }

        let name = location.display_name();
        match result {
            Ok(raw) => {
                let text = self.renderer.render(&raw);
                logger::info(format!(
                    "Fetch {}: {} loaded ({} bytes, {} lines)",
                    request,
                    name,
                    raw.len(),
                    text.lines.len()
                ));
                self.content.replace(ContentState::Rendered { text });
            }
            Err(e) => {
                logger::error(format!("Fetch {}: {} failed: {}", request, location, e));
                self.show_failure(&name, &e);
            }
        }
        true
    }

    fn show_failure(&mut self, name: &str, error: &FetchError) {
        self.content.replace(ContentState::Failed {
            message: format!("Error loading {}: {}", name, error),
        });
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> EventOutcome {
        if !self.panel.is_shown() {
            return EventOutcome::Ignored;
        }

        match key.code {
            KeyCode::Esc => self.close(),
            KeyCode::Up | KeyCode::Char('k') => self.content.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.content.scroll_by(1),
            KeyCode::PageUp => self.content.scroll_by(-i32::from(self.page_height())),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.content.scroll_by(i32::from(self.page_height()))
            }
            KeyCode::Home | KeyCode::Char('g') => self.content.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.content.scroll_to_bottom(),
            _ => return EventOutcome::Ignored,
        }
        EventOutcome::Consumed
    }

    fn page_height(&self) -> u16 {
        self.elements
            .get(ElementId::ContentSink)
            .map(|area| area.height.saturating_sub(1).max(1))
            .unwrap_or(1)
    }

    /// Handle a mouse event from anywhere on the screen.
    ///
    /// Movement and release are tracked screen-wide so a drag that leaves
    /// the panel keeps following the pointer.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> EventOutcome {
        let point = Point::from_cell(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(point),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                match self.drag.update(point) {
                    Some(offset) => {
                        self.panel.move_to(offset);
                        EventOutcome::Consumed
                    }
                    None => EventOutcome::Ignored,
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.drag.end() {
                    logger::debug(format!("Panel moved to {:?}", self.panel.offset()));
                    EventOutcome::Consumed
                } else {
                    EventOutcome::Ignored
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown if self.panel.is_shown() => {
                if self.hit(ElementId::Panel, point) {
                    let step = i32::from(SCROLL_STEP);
                    let delta = if mouse.kind == MouseEventKind::ScrollUp {
                        -step
                    } else {
                        step
                    };
                    self.content.scroll_by(delta);
                }
                EventOutcome::Consumed
            }
            _ if self.panel.is_shown() => EventOutcome::Consumed,
            _ => EventOutcome::Ignored,
        }
    }

    fn press(&mut self, point: Point) -> EventOutcome {
        if !self.panel.is_shown() {
            if self.hit(ElementId::OpenTrigger, point) {
                self.open();
                return EventOutcome::Consumed;
            }
            return EventOutcome::Ignored;
        }

        // Controls inside the header take precedence over dragging
        if self.hit(ElementId::CloseTrigger, point) {
            self.close();
        } else if self.hit(ElementId::Header, point) {
            self.drag.begin(point, self.panel.offset());
        } else if !self.hit(ElementId::Panel, point) && self.options.close_on_backdrop {
            self.close();
        }
        EventOutcome::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use crossterm::event::KeyModifiers;
    use docmodal_document::PlainTextRenderer;
    use docmodal_theme::Theme;

    use crate::Visibility;

    /// Serves scripted responses in order, repeating the last one.
    struct ScriptedFetcher {
        responses: Mutex<Vec<Result<String, u16>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<String, u16>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DocumentFetcher for ScriptedFetcher {
        fn fetch(&self, _location: &DocumentLocation) -> Result<String, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let responses = self.responses.lock().unwrap();
            let response = responses[call.min(responses.len() - 1)].clone();
            response.map_err(|code| FetchError::Status { code })
        }
    }

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    fn controller_with(
        fetcher: Arc<ScriptedFetcher>,
        options: ModalOptions,
    ) -> ModalController {
        let mut controller = ModalController::new(
            DocumentSource {
                base: "http://localhost:8000/tools/".into(),
                path: "README.md".into(),
            },
            fetcher,
            Box::new(PlainTextRenderer::new(Theme::get_by_name("default"))),
            options,
        );
        controller.layout(SCREEN);
        controller
    }

    fn controller() -> ModalController {
        controller_with(
            ScriptedFetcher::new(vec![Ok("# Tools".into())]),
            ModalOptions::default(),
        )
    }

    /// Block until one fetch completes and apply it.
    fn settle(controller: &mut ModalController) {
        let completion = controller
            .loader
            .recv_timeout(Duration::from_secs(5))
            .expect("fetch did not complete");
        controller.apply(completion);
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn press(controller: &mut ModalController, column: u16, row: u16) -> EventOutcome {
        controller.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row))
    }

    fn drag(controller: &mut ModalController, column: u16, row: u16) -> EventOutcome {
        controller.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), column, row))
    }

    fn release(controller: &mut ModalController, column: u16, row: u16) -> EventOutcome {
        controller.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), column, row))
    }

    fn esc() -> KeyEvent {
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
    }

    fn header_point(controller: &ModalController) -> (u16, u16) {
        let header = controller.placed(ElementId::Header).unwrap();
        (header.x + header.width / 2, header.y)
    }

    #[test]
    fn test_layout_centers_panel() {
        let controller = controller();
        assert_eq!(
            controller.elements().get(ElementId::Panel),
            Some(Rect::new(10, 4, 80, 32))
        );
        assert_eq!(
            controller.elements().get(ElementId::CloseTrigger),
            Some(Rect::new(12, 4, 3, 1))
        );
    }

    #[test]
    fn test_open_renders_document() {
        let mut controller = controller();
        controller.open();

        assert_eq!(controller.panel().visibility(), Visibility::Shown);
        assert_eq!(controller.content().summary(), "Loading README.md…");

        settle(&mut controller);
        assert_eq!(controller.content().summary(), "# Tools");
        assert!(matches!(
            controller.content().state(),
            ContentState::Rendered { .. }
        ));
    }

    #[test]
    fn test_reopen_fetches_again_and_replaces_content() {
        let fetcher = ScriptedFetcher::new(vec![Ok("first".into()), Ok("second".into())]);
        let mut controller = controller_with(Arc::clone(&fetcher), ModalOptions::default());

        controller.open();
        settle(&mut controller);
        assert_eq!(controller.content().summary(), "first");

        controller.open();
        assert!(controller.is_shown());
        settle(&mut controller);

        assert_eq!(controller.content().summary(), "second");
        assert_eq!(fetcher.calls(), 2);
    }

    #[test]
    fn test_fetch_failure_keeps_panel_open() {
        let fetcher = ScriptedFetcher::new(vec![Err(404)]);
        let mut controller = controller_with(fetcher, ModalOptions::default());

        controller.open();
        settle(&mut controller);

        assert!(controller.is_shown());
        let summary = controller.content().summary();
        assert!(summary.contains("README.md"), "{}", summary);
        assert!(summary.contains("404 Not Found"), "{}", summary);
    }

    #[test]
    fn test_invalid_location_is_shown_inline() {
        let mut controller = ModalController::new(
            DocumentSource {
                base: "ftp://example.com/".into(),
                path: "README.md".into(),
            },
            ScriptedFetcher::new(vec![Ok(String::new())]),
            Box::new(PlainTextRenderer::new(Theme::get_by_name("default"))),
            ModalOptions::default(),
        );
        controller.layout(SCREEN);
        controller.open();

        assert!(controller.is_shown());
        assert!(controller
            .content()
            .summary()
            .starts_with("Error loading README.md: invalid document location"));
    }

    #[test]
    fn test_drag_moves_panel_by_pointer_delta() {
        let mut controller = controller();
        controller.open();

        let (x, y) = header_point(&controller);
        assert_eq!(press(&mut controller, x, y), EventOutcome::Consumed);
        assert!(controller.is_dragging());

        drag(&mut controller, x + 30, y + 15);
        assert_eq!(controller.offset(), Offset::new(30, 15));

        // Release away from the header still ends the gesture
        release(&mut controller, 0, 0);
        assert!(!controller.is_dragging());
        assert_eq!(controller.offset(), Offset::new(30, 15));
    }

    #[test]
    fn test_second_drag_continues_from_previous_offset() {
        let mut controller = controller();
        controller.open();

        let (x, y) = header_point(&controller);
        press(&mut controller, x, y);
        drag(&mut controller, x + 5, y + 5);
        release(&mut controller, x + 5, y + 5);

        // Header moved with the panel
        let (x, y) = header_point(&controller);
        press(&mut controller, x, y);
        drag(&mut controller, x + 30, y + 15);
        assert_eq!(controller.offset(), Offset::new(35, 20));
    }

    #[test]
    fn test_movement_without_drag_is_ignored() {
        let mut controller = controller();
        controller.open();

        let (x, y) = header_point(&controller);
        drag(&mut controller, x + 10, y + 10);
        assert_eq!(controller.offset(), Offset::ZERO);
    }

    #[test]
    fn test_press_on_close_control_closes_without_dragging() {
        let mut controller = controller();
        controller.open();

        let close = controller.placed(ElementId::CloseTrigger).unwrap();
        press(&mut controller, close.x + 1, close.y);

        assert!(!controller.is_dragging());
        assert!(!controller.is_shown());
    }

    #[test]
    fn test_close_resets_offset() {
        let mut controller = controller();
        controller.open();

        let (x, y) = header_point(&controller);
        press(&mut controller, x, y);
        drag(&mut controller, x + 7, y - 3);
        release(&mut controller, x + 7, y - 3);
        assert_ne!(controller.offset(), Offset::ZERO);

        controller.close();
        assert_eq!(controller.offset(), Offset::ZERO);

        controller.open();
        assert_eq!(controller.offset(), Offset::ZERO);
    }

    #[test]
    fn test_close_mid_drag_ends_gesture() {
        let mut controller = controller();
        controller.open();

        let (x, y) = header_point(&controller);
        press(&mut controller, x, y);
        drag(&mut controller, x + 4, y + 4);
        assert_eq!(controller.handle_key(esc()), EventOutcome::Consumed);

        assert!(!controller.is_dragging());
        assert_eq!(controller.offset(), Offset::ZERO);
        assert_eq!(drag(&mut controller, x + 9, y + 9), EventOutcome::Ignored);
        assert_eq!(controller.offset(), Offset::ZERO);
    }

    #[test]
    fn test_escape_closes_shown_panel() {
        let mut controller = controller();
        controller.open();

        assert_eq!(controller.handle_key(esc()), EventOutcome::Consumed);
        assert!(!controller.is_shown());
    }

    #[test]
    fn test_escape_closes_after_panel_regions_removed() {
        let mut controller = controller();
        controller.open();

        // Shrinking the screen drops the panel regions while shown
        controller.layout(Rect::new(0, 0, 15, 4));
        assert!(!controller.elements().is_registered(ElementId::Panel));

        assert_eq!(controller.handle_key(esc()), EventOutcome::Consumed);
        assert!(!controller.is_shown());
        assert_eq!(controller.offset(), Offset::ZERO);

        // Input is no longer swallowed
        assert_eq!(
            controller.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1)),
            EventOutcome::Ignored
        );
    }

    #[test]
    fn test_long_paragraphs_reach_end_marker() {
        let paragraph = "word ".repeat(200);
        let document = format!("{}\n\n{}\n\nTHE_END_MARKER", paragraph, paragraph);
        let fetcher = ScriptedFetcher::new(vec![Ok(document)]);
        let mut controller = controller_with(fetcher, ModalOptions::default());
        controller.layout(Rect::new(0, 0, 60, 20));
        controller.open();
        settle(&mut controller);

        let end = KeyEvent::new(KeyCode::End, KeyModifiers::NONE);
        assert_eq!(controller.handle_key(end), EventOutcome::Consumed);

        // Wrapped rows, not source lines, bound the scroll
        let sink = controller.elements().get(ElementId::ContentSink).unwrap();
        let content = controller.content();
        assert!(content.rows() > 5);
        assert_eq!(
            usize::from(content.scroll()),
            content.rows() - usize::from(sink.height)
        );
    }

    #[test]
    fn test_escape_when_hidden_is_noop() {
        let mut controller = controller();

        assert_eq!(controller.handle_key(esc()), EventOutcome::Ignored);
        assert!(!controller.is_shown());
        assert_eq!(*controller.content().state(), ContentState::Empty);
    }

    #[test]
    fn test_backdrop_press_ignored_when_disabled() {
        let mut controller = controller();
        controller.open();

        assert_eq!(press(&mut controller, 0, 0), EventOutcome::Consumed);
        assert!(controller.is_shown());
    }

    #[test]
    fn test_backdrop_press_closes_when_enabled() {
        let options = ModalOptions {
            close_on_backdrop: true,
            ..ModalOptions::default()
        };
        let mut controller =
            controller_with(ScriptedFetcher::new(vec![Ok("doc".into())]), options);
        controller.open();

        // Inside the panel body: stays open
        let content = controller.placed(ElementId::ContentSink).unwrap();
        press(&mut controller, content.x + 1, content.y + 1);
        assert!(controller.is_shown());

        press(&mut controller, 0, 0);
        assert!(!controller.is_shown());
    }

    #[test]
    fn test_open_trigger_click() {
        let mut controller = controller();
        controller
            .elements_mut()
            .register(ElementId::OpenTrigger, Rect::new(2, 2, 10, 1));

        assert_eq!(press(&mut controller, 20, 2), EventOutcome::Ignored);
        assert!(!controller.is_shown());

        assert_eq!(press(&mut controller, 3, 2), EventOutcome::Consumed);
        assert!(controller.is_shown());
    }

    #[test]
    fn test_missing_panel_makes_operations_noop() {
        let fetcher = ScriptedFetcher::new(vec![Ok("doc".into())]);
        let mut controller = controller_with(Arc::clone(&fetcher), ModalOptions::default());
        controller.layout(Rect::new(0, 0, 10, 3));

        assert!(!controller.elements().is_registered(ElementId::Panel));
        controller.open();

        assert!(!controller.is_shown());
        assert_eq!(fetcher.calls(), 0);
        assert!(controller.loader.latest_request().is_none());
    }

    #[test]
    fn test_stale_completion_discarded_when_enabled() {
        let options = ModalOptions {
            discard_stale: true,
            ..ModalOptions::default()
        };
        let fetcher = ScriptedFetcher::new(vec![Ok("first".into()), Ok("second".into())]);
        let mut controller = controller_with(fetcher, options);

        controller.open();
        controller.open();

        let mut completions = vec![
            controller.loader.recv_timeout(Duration::from_secs(5)).unwrap(),
            controller.loader.recv_timeout(Duration::from_secs(5)).unwrap(),
        ];
        // Deliver the newest first so the older one arrives stale
        completions.sort_by_key(|c| std::cmp::Reverse(c.request));
        let newest = completions.remove(0);
        let stale = completions.remove(0);

        assert!(controller.apply(newest));
        let shown = controller.content().summary();
        assert!(!controller.apply(stale));
        assert_eq!(controller.content().summary(), shown);
    }

    #[test]
    fn test_last_completion_wins_by_default() {
        let fetcher = ScriptedFetcher::new(vec![Ok("doc".into())]);
        let mut controller = controller_with(fetcher, ModalOptions::default());

        controller.open();
        controller.open();
        let first = controller.loader.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = controller.loader.recv_timeout(Duration::from_secs(5)).unwrap();

        assert!(controller.apply(first));
        assert!(controller.apply(second));
    }

    #[test]
    fn test_scroll_keys_only_when_shown() {
        let fetcher = ScriptedFetcher::new(vec![Ok("a\nb\nc\nd".into())]);
        let mut controller = controller_with(fetcher, ModalOptions::default());

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(controller.handle_key(down), EventOutcome::Ignored);

        controller.open();
        settle(&mut controller);
        assert_eq!(controller.handle_key(down), EventOutcome::Consumed);
        assert_eq!(controller.content().scroll(), 1);

        controller.close();
        assert_eq!(controller.content().scroll(), 0);
    }
}
