//! Document layout of the landing page and its scroll reveal state.
//!
//! The page is one tall document measured in terminal rows. The terminal
//! window is a viewport scrolling over it; every animated element is watched
//! by a [`VisibilityDetector`] and fades in through its [`Reveal`] once enough
//! of it has scrolled into view. All times are milliseconds since the page
//! was opened.

use plexus_core::RevealConfig;
use plexus_reveal::{
    Region, Reveal, RevealTransition, ScrollViewport, Typewriter, VisibilityDetector,
    VisibilityHandle,
};
use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use tracing::debug;

use crate::content::{FEATURES, TEAM, TECHNOLOGIES, TITLE};

/// Risk panel canvas, about 400x300 logical pixels.
pub const RISK_PANEL_COLS: u16 = 50;
pub const RISK_PANEL_ROWS: u16 = 19;

const MIN_HERO_HEIGHT: u16 = 16;
const PROBLEM_HEIGHT: u16 = 26;
const DEMO_HEIGHT: u16 = 10;
const FEATURE_CARD_HEIGHT: u16 = 7;
const DATASET_HEIGHT: u16 = 33;
const TEAM_CARD_HEIGHT: u16 = 6;
const TECH_CARD_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 6;
const HEADING_HEIGHT: u16 = 3;

/// Problem columns slide in slower than cards, the right one a bit later.
const PROBLEM_DURATION_MS: u64 = 1000;
const SECOND_COLUMN_DELAY_MS: u64 = 300;
const TEAM_STAGGER_MS: u64 = 100;

/// Delays of the hero subtitle, tagline and links after the page opens.
const INTRO_DELAYS_MS: [u64; 3] = [300, 500, 700];

/// An element of the page with its own reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Problem,
    RiskPanel,
    Demo,
    Feature(usize),
    Member(usize),
    Tech(usize),
}

/// Document rectangles of every section and card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub hero: Rect,
    pub problem: Rect,
    pub problem_text: Rect,
    pub problem_panel: Rect,
    pub risk_field: Rect,
    pub demo: Rect,
    pub demo_title: Rect,
    pub demo_card: Rect,
    pub features: Rect,
    pub feature_cards: [Rect; 6],
    pub dataset: Rect,
    pub dataset_box: Rect,
    pub team: Rect,
    pub team_cards: [Rect; 5],
    pub tech: Rect,
    pub tech_cards: [Rect; 6],
    pub footer: Rect,
}

impl PageLayout {
    /// Lay the page out for a terminal `width` columns wide whose viewport
    /// shows `viewport_height` rows. The hero fills the first screen.
    pub fn new(width: u16, viewport_height: u16) -> Self {
        let hero_height = viewport_height.max(MIN_HERO_HEIGHT);
        let features_height = HEADING_HEIGHT + 2 * FEATURE_CARD_HEIGHT + 2;
        let team_height = HEADING_HEIGHT + TEAM_CARD_HEIGHT + 2;
        let tech_height = HEADING_HEIGHT + TECH_CARD_HEIGHT + 2;
        let total = hero_height
            + PROBLEM_HEIGHT
            + DEMO_HEIGHT
            + features_height
            + DATASET_HEIGHT
            + team_height
            + tech_height
            + FOOTER_HEIGHT;

        let [hero, problem, demo, features, dataset, team, tech, footer] = Layout::vertical([
            Constraint::Length(hero_height),
            Constraint::Length(PROBLEM_HEIGHT),
            Constraint::Length(DEMO_HEIGHT),
            Constraint::Length(features_height),
            Constraint::Length(DATASET_HEIGHT),
            Constraint::Length(team_height),
            Constraint::Length(tech_height),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(Rect::new(0, 0, width, total));

        let [problem_text, problem_panel] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(RISK_PANEL_COLS + 4)])
                .spacing(3)
                .areas(problem.inner(Margin::new(2, 1)));
        let [_, field_row, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(RISK_PANEL_ROWS),
            Constraint::Fill(1),
        ])
        .areas(problem_panel.inner(Margin::new(1, 1)));
        let [risk_field] = Layout::horizontal([Constraint::Length(RISK_PANEL_COLS)])
            .flex(Flex::Center)
            .areas(field_row);

        let [demo_title, demo_card] =
            Layout::vertical([Constraint::Length(HEADING_HEIGHT), Constraint::Fill(1)])
                .areas(demo.inner(Margin::new(2, 1)));
        let [demo_card] = Layout::horizontal([Constraint::Max(64)])
            .flex(Flex::Center)
            .areas(demo_card);

        let [_, first_row, second_row, _] = Layout::vertical([
            Constraint::Length(HEADING_HEIGHT),
            Constraint::Length(FEATURE_CARD_HEIGHT),
            Constraint::Length(FEATURE_CARD_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(features.inner(Margin::new(2, 0)));
        let three = Layout::horizontal([Constraint::Fill(1); 3]).spacing(2);
        let [a, b, c] = three.areas(first_row);
        let [d, e, f] = three.areas(second_row);

        let [_, dataset_box, _] = Layout::vertical([
            Constraint::Length(HEADING_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(dataset.inner(Margin::new(2, 0)));

        let [_, team_row, _] = Layout::vertical([
            Constraint::Length(HEADING_HEIGHT),
            Constraint::Length(TEAM_CARD_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(team.inner(Margin::new(2, 0)));
        let team_cards = Layout::horizontal([Constraint::Fill(1); 5])
            .spacing(1)
            .areas(team_row);

        let [_, tech_row, _] = Layout::vertical([
            Constraint::Length(HEADING_HEIGHT),
            Constraint::Length(TECH_CARD_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(tech.inner(Margin::new(2, 0)));
        let tech_cards = Layout::horizontal([Constraint::Fill(1); 6])
            .spacing(1)
            .areas(tech_row);

        Self {
            hero,
            problem,
            problem_text,
            problem_panel,
            risk_field,
            demo,
            demo_title,
            demo_card,
            features,
            feature_cards: [a, b, c, d, e, f],
            dataset,
            dataset_box,
            team,
            team_cards,
            tech,
            tech_cards,
            footer,
        }
    }

    /// Total document height in rows.
    pub fn height(&self) -> u16 {
        self.footer.bottom()
    }

    pub fn width(&self) -> u16 {
        self.hero.width
    }

    pub fn rect(&self, slot: Slot) -> Rect {
        let card = |cards: &[Rect], i: usize| cards.get(i).copied().unwrap_or_default();
        match slot {
            Slot::Problem => self.problem,
            Slot::RiskPanel => self.risk_field,
            Slot::Demo => self.demo,
            Slot::Feature(i) => card(&self.feature_cards, i),
            Slot::Member(i) => card(&self.team_cards, i),
            Slot::Tech(i) => card(&self.tech_cards, i),
        }
    }

    pub fn region(&self, slot: Slot) -> Region {
        let rect = self.rect(slot);
        Region::new(rect.y, rect.height)
    }
}

/// Layout, scroll position and reveal progress of the page.
#[derive(Debug)]
pub struct Page {
    layout: PageLayout,
    detector: VisibilityDetector<ScrollViewport>,
    slots: Vec<(VisibilityHandle, Slot)>,
    title: Typewriter,
    intro: [RevealTransition; 3],
    problem: [Reveal; 2],
    demo: [Reveal; 2],
    features: Vec<Reveal>,
    team: Vec<Reveal>,
    tech: Vec<Reveal>,
    risk_panel: VisibilityHandle,
}

impl Page {
    pub fn new(width: u16, viewport_height: u16, reveal: RevealConfig) -> Self {
        let layout = PageLayout::new(width, viewport_height);
        let mut detector =
            VisibilityDetector::new(ScrollViewport::new(layout.height(), viewport_height));
        let mut slots = Vec::new();
        let mut watch = |slot: Slot| {
            let handle = detector.register(layout.region(slot), reveal.threshold);
            slots.push((handle, slot));
            handle
        };

        let card = RevealTransition::new(reveal.duration_ms);
        let column = RevealTransition::new(PROBLEM_DURATION_MS).with_travel(6.0);

        let problem = watch(Slot::Problem);
        let problem = [
            Reveal::new(problem, column),
            Reveal::new(problem, column.with_delay(SECOND_COLUMN_DELAY_MS)),
        ];
        let risk_panel = watch(Slot::RiskPanel);
        let demo = watch(Slot::Demo);
        let demo = [
            Reveal::new(demo, column),
            Reveal::new(
                demo,
                RevealTransition::new(PROBLEM_DURATION_MS)
                    .with_delay(SECOND_COLUMN_DELAY_MS)
                    .with_travel(1.0),
            ),
        ];
        let features = (0..FEATURES.len())
            .map(|i| {
                Reveal::new(
                    watch(Slot::Feature(i)),
                    card.staggered(i, reveal.stagger_ms),
                )
            })
            .collect();
        let team = (0..TEAM.len())
            .map(|i| Reveal::new(watch(Slot::Member(i)), card.staggered(i, TEAM_STAGGER_MS)))
            .collect();
        let tech = (0..TECHNOLOGIES.len())
            .map(|i| {
                Reveal::new(
                    watch(Slot::Tech(i)),
                    card.with_travel(1.0).staggered(i, TEAM_STAGGER_MS),
                )
            })
            .collect();

        let mut title = Typewriter::new(TITLE);
        title.start(0);
        let intro = INTRO_DELAYS_MS.map(|delay| {
            RevealTransition::new(reveal.duration_ms)
                .with_delay(delay)
                .with_travel(1.0)
        });

        debug!(
            width,
            viewport_height,
            height = layout.height(),
            watched = slots.len(),
            "page laid out"
        );
        Self {
            layout,
            detector,
            slots,
            title,
            intro,
            problem,
            demo,
            features,
            team,
            tech,
            risk_panel,
        }
    }

    /// Apply pending intersection changes and pin reveal start times.
    /// Returns `true` once, when the risk panel first becomes visible.
    pub fn update(&mut self, now_ms: u64) -> bool {
        let revealed = self.detector.pump();
        let detector = &self.detector;
        self.problem
            .iter_mut()
            .chain(self.demo.iter_mut())
            .chain(self.features.iter_mut())
            .chain(self.team.iter_mut())
            .chain(self.tech.iter_mut())
            .for_each(|reveal| {
                reveal.update(detector, now_ms);
            });
        revealed.contains(&self.risk_panel)
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn detector(&self) -> &VisibilityDetector<ScrollViewport> {
        &self.detector
    }

    pub fn is_revealed(&self, slot: Slot) -> bool {
        self.slots
            .iter()
            .find(|(_, s)| *s == slot)
            .is_some_and(|(handle, _)| self.detector.is_visible(*handle))
    }

    pub fn title(&self) -> &Typewriter {
        &self.title
    }

    /// Hero subtitle, tagline and links, in that order.
    pub fn intro(&self) -> &[RevealTransition; 3] {
        &self.intro
    }

    /// Left text column and right risk panel column.
    pub fn problem(&self) -> &[Reveal; 2] {
        &self.problem
    }

    /// Demo heading and link card.
    pub fn demo(&self) -> &[Reveal; 2] {
        &self.demo
    }

    pub fn features(&self) -> &[Reveal] {
        &self.features
    }

    pub fn team(&self) -> &[Reveal] {
        &self.team
    }

    pub fn tech(&self) -> &[Reveal] {
        &self.tech
    }

    /// First document row on screen.
    pub fn offset(&self) -> u16 {
        self.viewport().map_or(0, |v| v.viewport().offset)
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport().map_or(0, |v| v.viewport().height)
    }

    pub fn scroll_by(&mut self, rows: i32) {
        if let Some(viewport) = self.detector.source_mut() {
            viewport.scroll_by(rows);
        }
    }

    pub fn scroll_to(&mut self, offset: u16) {
        if let Some(viewport) = self.detector.source_mut() {
            viewport.scroll_to(offset);
        }
    }

    /// Scroll by one screen, keeping a row of overlap.
    pub fn page(&mut self, forward: bool) {
        let step = i32::from(self.viewport_height().saturating_sub(1).max(1));
        self.scroll_by(if forward { step } else { -step });
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_to(u16::MAX);
    }

    /// Document row shown on screen row `row`.
    pub fn document_row(&self, row: u16) -> u16 {
        self.offset().saturating_add(row)
    }

    /// Lay the page out again for a new terminal size. Regions still being
    /// watched move with their elements.
    pub fn resize(&mut self, width: u16, viewport_height: u16) {
        self.layout = PageLayout::new(width, viewport_height);
        let height = self.layout.height();
        let layout = &self.layout;
        if let Some(viewport) = self.detector.source_mut() {
            let regions = self
                .slots
                .iter()
                .map(|(handle, slot)| (*handle, layout.region(*slot)));
            viewport.relayout(height, viewport_height, regions);
        }
        debug!(width, viewport_height, height, "page resized");
    }

    /// Stop watching every element.
    pub fn teardown(&mut self) {
        for (handle, _) in self.slots.drain(..) {
            self.detector.unregister(handle);
        }
    }

    fn viewport(&self) -> Option<&ScrollViewport> {
        self.detector.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_reveal::Viewport;

    fn page() -> Page {
        Page::new(120, 40, RevealConfig::default())
    }

    #[test]
    fn test_sections_stack_without_gaps() {
        let layout = PageLayout::new(120, 40);
        let sections = [
            layout.hero,
            layout.problem,
            layout.demo,
            layout.features,
            layout.dataset,
            layout.team,
            layout.tech,
            layout.footer,
        ];
        assert_eq!(layout.hero.y, 0);
        assert_eq!(layout.hero.height, 40);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].y);
        }
        assert_eq!(layout.height(), layout.footer.bottom());
    }

    #[test]
    fn test_short_terminal_keeps_a_minimum_hero() {
        let layout = PageLayout::new(80, 5);
        assert_eq!(layout.hero.height, MIN_HERO_HEIGHT);
    }

    #[test]
    fn test_cards_sit_inside_their_section() {
        let layout = PageLayout::new(120, 40);
        for card in layout.feature_cards {
            assert!(layout.features.contains(card.as_position()));
            assert_eq!(card.height, FEATURE_CARD_HEIGHT);
        }
        for card in layout.team_cards {
            assert!(layout.team.contains(card.as_position()));
        }
        assert_eq!(layout.risk_field.width, RISK_PANEL_COLS);
        assert_eq!(layout.risk_field.height, RISK_PANEL_ROWS);
        assert!(layout.problem_panel.contains(layout.risk_field.as_position()));
    }

    #[test]
    fn test_only_visible_slots_reveal() {
        let mut page = page();
        page.update(0);
        assert!(!page.is_revealed(Slot::Feature(0)));
        assert!(!page.is_revealed(Slot::Member(0)));
        assert_eq!(page.features()[0].progress(10_000), 0.0);
    }

    #[test]
    fn test_scrolling_reveals_and_staggers_features() {
        let mut page = page();
        page.update(0);
        page.scroll_to(page.layout().features.y);
        assert!(!page.update(1000));

        for i in 0..FEATURES.len() {
            assert!(page.is_revealed(Slot::Feature(i)));
        }
        // second card starts 150ms after the first
        assert_eq!(page.features()[0].revealed_at(), Some(1000));
        assert!(page.features()[0].progress(1150) > 0.0);
        assert_eq!(page.features()[1].progress(1150), 0.0);
        assert_eq!(page.features()[5].progress(1000 + 750 + 700), 1.0);
    }

    #[test]
    fn test_reveal_survives_scrolling_back() {
        let mut page = page();
        page.scroll_to(page.layout().team.y);
        page.update(0);
        assert!(page.is_revealed(Slot::Member(4)));

        page.scroll_to(0);
        page.update(100);
        assert!(page.is_revealed(Slot::Member(4)));
        assert_eq!(page.team()[4].revealed_at(), Some(0));
    }

    #[test]
    fn test_risk_panel_reported_once() {
        let mut page = page();
        page.update(0);
        page.scroll_to(page.layout().problem.y);
        assert!(page.update(10));
        page.scroll_by(3);
        assert!(!page.update(20));
        page.scroll_by(-3);
        assert!(!page.update(30));
    }

    #[test]
    fn test_paging_and_bounds() {
        let mut page = page();
        page.page(true);
        assert_eq!(page.offset(), 39);
        page.page(false);
        assert_eq!(page.offset(), 0);
        page.scroll_by(-10);
        assert_eq!(page.offset(), 0);

        page.scroll_to_end();
        assert_eq!(page.offset(), page.layout().height() - 40);
        assert_eq!(page.document_row(2), page.layout().height() - 38);
    }

    #[test]
    fn test_resize_moves_watched_regions() {
        let mut page = page();
        page.update(0);
        page.resize(120, 20);
        assert_eq!(page.viewport_height(), 20);
        assert_eq!(page.layout().hero.height, 20);

        // the problem section now starts at row 20 and is in reach
        page.scroll_to(page.layout().problem.y);
        assert!(page.update(5));
        assert!(page.is_revealed(Slot::Problem));
    }

    #[test]
    fn test_resize_never_reveals_off_screen_slots() {
        let mut page = page();
        page.update(0);
        page.scroll_to_end();
        page.update(1);
        assert!(!page.is_revealed(Slot::Feature(3)));
        let hidden: Vec<Slot> = page
            .slots
            .iter()
            .map(|(_, slot)| *slot)
            .filter(|slot| !page.is_revealed(*slot))
            .collect();

        page.resize(120, 16);
        page.update(2);
        let viewport = Viewport {
            offset: page.offset(),
            height: page.viewport_height(),
        };
        for slot in hidden {
            let ratio = viewport.intersection_ratio(page.layout().region(slot));
            if page.is_revealed(slot) {
                assert!(ratio >= RevealConfig::default().threshold, "{slot:?} at {ratio}");
            }
        }
        let ratio = viewport.intersection_ratio(page.layout().region(Slot::Feature(3)));
        assert_eq!(ratio, 0.0);
        assert!(!page.is_revealed(Slot::Feature(3)));
    }

    #[test]
    fn test_teardown_releases_observations() {
        let mut page = page();
        page.update(0);
        page.teardown();
        assert!(page.detector().is_empty());
        assert_eq!(page.detector().source().map(|s| s.observed_count()), Some(0));
    }

    #[test]
    fn test_title_types_from_open() {
        let page = page();
        assert_eq!(page.title().visible_chars(0), 0);
        assert_eq!(page.title().visible_chars(80 * 3), 3);
        assert!(page.intro()[0].progress(Some(0), 100) == 0.0);
        assert!(page.intro()[2].progress(Some(0), 5000) == 1.0);
    }
}
