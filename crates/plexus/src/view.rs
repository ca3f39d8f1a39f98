//! Drawing the page.
//!
//! The whole document is rendered into an off-screen buffer and the rows
//! under the viewport are copied to the terminal.

use plexus_core::{Palette, Rgba};
use plexus_field::CellSurface;
use plexus_reveal::Reveal;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Widget, Wrap},
};

use crate::content::{
    ATTRIBUTES, COPYRIGHT, DATASET_COLUMNS, DATASET_SUBTITLE, DATASET_TITLE, DEMO_LINK, DEMO_TITLE,
    FEATURES, FEATURES_TITLE, FOOTER_LINK, HERO_LINKS, PROBLEM_PARAGRAPHS, PROBLEM_TITLE,
    RISK_CAPTION, RISK_TITLE, SUBTITLE, TAGLINE, TEAM, TEAM_TITLE, TECH_TITLE, TECHNOLOGIES, TITLE,
};
use crate::page::Page;

const WHITE: Rgba = Rgba::rgb(255, 255, 255);
const TEXT: Rgba = Rgba::rgb(229, 231, 235);
const MUTED: Rgba = Rgba::rgb(156, 163, 175);
const WARNING: Rgba = Rgba::rgb(248, 113, 113);

/// One sweep of the dataset scan line.
const SCAN_PERIOD_MS: u64 = 3000;

/// Width of the attribute column of the dataset table.
const ATTRIBUTE_WIDTH: u16 = 28;

/// Everything needed to draw one frame of the page.
#[derive(Debug)]
pub struct PageView<'a> {
    pub page: &'a Page,
    pub hero: Option<&'a CellSurface>,
    pub risk_panel: Option<&'a CellSurface>,
    pub palette: Palette,
    pub now_ms: u64,
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.page.layout();
        let mut doc = Buffer::empty(Rect::new(0, 0, layout.width(), layout.height()));
        doc.set_style(doc.area, Style::new().bg(self.palette.background.into()));

        let ink = Ink {
            palette: self.palette,
        };
        self.render_hero(&ink, &mut doc);
        self.render_problem(&ink, &mut doc);
        self.render_demo(&ink, &mut doc);
        self.render_features(&ink, &mut doc);
        self.render_dataset(&ink, &mut doc);
        self.render_team(&ink, &mut doc);
        self.render_footer(&ink, &mut doc);

        let offset = self.page.offset();
        for y in 0..area.height {
            let row = offset.saturating_add(y);
            if row >= doc.area.height {
                break;
            }
            for x in 0..area.width.min(doc.area.width) {
                buf[(area.x + x, area.y + y)] = doc[(x, row)].clone();
            }
        }
    }
}

/// Colors faded toward the page background.
struct Ink {
    palette: Palette,
}

impl Ink {
    fn color(&self, color: Rgba, alpha: f32) -> Color {
        self.palette.background.mix(color, alpha).into()
    }

    fn fg(&self, color: Rgba, alpha: f32) -> Style {
        Style::new().fg(self.color(color, alpha))
    }

    fn bold(&self, color: Rgba, alpha: f32) -> Style {
        self.fg(color, alpha).add_modifier(Modifier::BOLD)
    }

    fn accent(&self, alpha: f32) -> Style {
        self.bold(self.palette.accent, alpha)
    }

    fn card(&self, alpha: f32) -> Block<'static> {
        Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.fg(self.palette.accent, 0.35 * alpha))
    }
}

/// `rect` moved by whole cells, clipped to `bounds`.
fn shifted(rect: Rect, dx: f32, dy: f32, bounds: Rect) -> Rect {
    let x = (i32::from(rect.x) + dx.round() as i32).max(0);
    let y = (i32::from(rect.y) + dy.round() as i32).max(0);
    let moved = Rect::new(
        u16::try_from(x).unwrap_or(u16::MAX),
        u16::try_from(y).unwrap_or(u16::MAX),
        rect.width,
        rect.height,
    );
    moved.intersection(bounds)
}

/// Section title on the second row of `section`.
fn heading(text: &str, style: Style, section: Rect, buf: &mut Buffer) {
    let row = Rect::new(section.x, section.y + 1, section.width, 1).intersection(section);
    Paragraph::new(Line::styled(text.to_string(), style))
        .alignment(Alignment::Center)
        .render(row, buf);
}

impl PageView<'_> {
    /// Progress and remaining travel of a reveal, `None` while hidden.
    fn reveal(&self, reveal: &Reveal) -> Option<(f32, f32)> {
        started(reveal.progress(self.now_ms))
            .map(|progress| (progress, reveal.transition().offset(progress)))
    }

    fn render_hero(&self, ink: &Ink, buf: &mut Buffer) {
        let hero = self.page.layout().hero;
        if let Some(surface) = self.hero {
            surface.render(hero, buf);
        }

        let [_, title, _, subtitle, _, tagline, _, links, urls, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(hero.inner(Margin::new(4, 0)));

        let typewriter = self.page.title();
        let spans: Vec<Span> = TITLE
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let alpha = typewriter.char_opacity(i, self.now_ms);
                if alpha > 0.0 {
                    Span::styled(ch.to_string(), ink.bold(WHITE, alpha))
                } else {
                    Span::raw(" ")
                }
            })
            .collect();
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(title, buf);

        let [subtitle_in, tagline_in, links_in] = *self.page.intro();
        if let Some(progress) = started(subtitle_in.progress(Some(0), self.now_ms)) {
            let area = shifted(subtitle, 0.0, subtitle_in.offset(progress), hero);
            Paragraph::new(Line::styled(SUBTITLE, ink.accent(progress)))
                .alignment(Alignment::Center)
                .render(area, buf);
        }
        if let Some(progress) = started(tagline_in.progress(Some(0), self.now_ms)) {
            let area = shifted(tagline, 0.0, tagline_in.offset(progress), hero);
            Paragraph::new(Line::styled(TAGLINE, ink.fg(TEXT, progress)))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(area, buf);
        }
        if let Some(progress) = started(links_in.progress(Some(0), self.now_ms)) {
            let dy = links_in.offset(progress);
            let mut buttons = Vec::new();
            let mut targets = Vec::new();
            for (i, link) in HERO_LINKS.iter().enumerate() {
                if i > 0 {
                    buttons.push(Span::raw("    "));
                    targets.push(Span::raw("  "));
                }
                buttons.push(Span::styled(format!("[ {} ]", link.label), ink.accent(progress)));
                targets.push(Span::styled(link.url, ink.fg(MUTED, progress)));
            }
            Paragraph::new(Line::from(buttons))
                .alignment(Alignment::Center)
                .render(shifted(links, 0.0, dy, hero), buf);
            Paragraph::new(Line::from(targets))
                .alignment(Alignment::Center)
                .render(shifted(urls, 0.0, dy, hero), buf);
        }
    }

    fn render_problem(&self, ink: &Ink, buf: &mut Buffer) {
        let layout = self.page.layout();
        let [text_in, panel_in] = self.page.problem();

        if let Some((progress, travel)) = self.reveal(text_in) {
            let area = shifted(layout.problem_text, -travel, 0.0, layout.problem);
            let mut text = Text::from(vec![
                Line::from(vec![
                    Span::styled("⚠ ", ink.bold(WARNING, progress)),
                    Span::styled(PROBLEM_TITLE, ink.accent(progress)),
                ]),
                Line::default(),
            ]);
            for paragraph in PROBLEM_PARAGRAPHS {
                text.push_line(Line::styled(paragraph, ink.fg(TEXT, progress)));
                text.push_line(Line::default());
            }
            Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .render(area, buf);
        }

        if let Some((progress, travel)) = self.reveal(panel_in) {
            let panel = shifted(layout.problem_panel, travel, 0.0, layout.problem);
            let block = ink.card(progress);
            let inner = block.inner(panel);
            block.render(panel, buf);

            let [title, _, caption] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(layout.risk_field.height),
                Constraint::Fill(1),
            ])
            .areas(inner);
            Paragraph::new(Line::styled(RISK_TITLE, ink.accent(progress)))
                .alignment(Alignment::Center)
                .render(title, buf);
            if let Some(surface) = self.risk_panel {
                let field = shifted(layout.risk_field, travel, 0.0, panel);
                surface.render(field, buf);
            }
            Paragraph::new(Line::styled(RISK_CAPTION, ink.fg(MUTED, progress)))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(caption, buf);
        }
    }

    fn render_demo(&self, ink: &Ink, buf: &mut Buffer) {
        let layout = self.page.layout();
        let [title_in, card_in] = self.page.demo();

        if let Some((progress, travel)) = self.reveal(title_in) {
            let area = shifted(layout.demo_title, -travel, 0.0, layout.demo);
            heading(DEMO_TITLE, ink.accent(progress), area, buf);
        }
        if let Some((progress, travel)) = self.reveal(card_in) {
            let card = shifted(layout.demo_card, 0.0, travel, layout.demo);
            let block = ink.card(progress);
            let inner = block.inner(card);
            block.render(card, buf);
            Paragraph::new(vec![
                Line::default(),
                Line::styled(format!("▶  {}", DEMO_LINK.label), ink.bold(WHITE, progress)),
                Line::styled(DEMO_LINK.url, ink.fg(ink.palette.accent, progress)),
            ])
            .alignment(Alignment::Center)
            .render(inner, buf);
        }
    }

    fn render_features(&self, ink: &Ink, buf: &mut Buffer) {
        let layout = self.page.layout();
        heading(FEATURES_TITLE, ink.accent(1.0), layout.features, buf);

        for ((feature, rect), reveal) in FEATURES
            .iter()
            .zip(layout.feature_cards)
            .zip(self.page.features())
        {
            let Some((progress, travel)) = self.reveal(reveal) else {
                continue;
            };
            let card = shifted(rect, 0.0, travel, layout.features);
            let block = ink.card(progress);
            let inner = block.inner(card).inner(Margin::new(1, 0));
            block.render(card, buf);
            Paragraph::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", feature.icon), ink.accent(progress)),
                    Span::styled(feature.title, ink.bold(WHITE, progress)),
                ]),
                Line::styled(feature.description, ink.fg(TEXT, progress)),
            ])
            .wrap(Wrap { trim: true })
            .render(inner, buf);
        }
    }

    fn render_dataset(&self, ink: &Ink, buf: &mut Buffer) {
        let layout = self.page.layout();
        heading(DATASET_TITLE, ink.accent(1.0), layout.dataset, buf);

        let frame = layout.dataset_box;
        let block = ink.card(1.0);
        let sweep = block.inner(frame);
        let inner = sweep.inner(Margin::new(1, 0));
        block.render(frame, buf);

        let [subtitle, chips, _, table] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);
        Paragraph::new(Line::styled(DATASET_SUBTITLE, ink.accent(1.0))).render(subtitle, buf);

        let mut spans = Vec::new();
        for (name, kind) in DATASET_COLUMNS {
            spans.push(Span::styled(format!("{} ", kind.glyphs()), ink.fg(ink.palette.node, 0.8)));
            spans.push(Span::styled(name, ink.fg(WHITE, 1.0)));
            spans.push(Span::raw("   "));
        }
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .render(chips, buf);

        let header = Row::new(["Atributo", "Descripción"]).style(ink.accent(1.0));
        let rows = ATTRIBUTES.iter().map(|(attr, desc)| {
            Row::new([
                Span::styled(*attr, ink.fg(WHITE, 1.0)),
                Span::styled(*desc, ink.fg(TEXT, 1.0)),
            ])
        });
        Table::new(rows, [Constraint::Length(ATTRIBUTE_WIDTH), Constraint::Fill(1)])
            .header(header)
            .column_spacing(2)
            .render(table, buf);

        // scan line sweeping down the box
        if sweep.height > 0 {
            let row = sweep.y
                + ((self.now_ms % SCAN_PERIOD_MS) * u64::from(sweep.height) / SCAN_PERIOD_MS) as u16;
            let glow = ink.color(ink.palette.accent, 0.18);
            for x in sweep.left()..sweep.right() {
                buf[(x, row)].set_bg(glow);
            }
        }
    }

    fn render_team(&self, ink: &Ink, buf: &mut Buffer) {
        let layout = self.page.layout();
        heading(TEAM_TITLE, ink.accent(1.0), layout.team, buf);
        for ((member, rect), reveal) in TEAM.iter().zip(layout.team_cards).zip(self.page.team()) {
            let Some((progress, travel)) = self.reveal(reveal) else {
                continue;
            };
            let card = shifted(rect, 0.0, travel, layout.team);
            let block = ink.card(progress);
            let inner = block.inner(card);
            block.render(card, buf);
            Paragraph::new(vec![
                Line::styled("⬡", ink.accent(progress)),
                Line::styled(member.name, ink.bold(WHITE, progress)),
                Line::styled(member.role, ink.fg(ink.palette.accent, progress)),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
        }

        heading(TECH_TITLE, ink.accent(1.0), layout.tech, buf);
        for ((name, rect), reveal) in TECHNOLOGIES
            .iter()
            .zip(layout.tech_cards)
            .zip(self.page.tech())
        {
            let Some((progress, travel)) = self.reveal(reveal) else {
                continue;
            };
            let card = shifted(rect, 0.0, travel, layout.tech);
            let block = ink.card(progress);
            let inner = block.inner(card);
            block.render(card, buf);
            Paragraph::new(Line::styled(*name, ink.bold(WHITE, progress)))
                .alignment(Alignment::Center)
                .render(inner, buf);
        }
    }

    fn render_footer(&self, ink: &Ink, buf: &mut Buffer) {
        let footer = self.page.layout().footer;
        let block = Block::new()
            .borders(Borders::TOP)
            .border_style(ink.fg(ink.palette.accent, 0.2));
        let inner = block.inner(footer);
        block.render(footer, buf);
        Paragraph::new(vec![
            Line::default(),
            Line::styled(TITLE, ink.bold(WHITE, 1.0)),
            Line::styled(
                format!("{}  {}", FOOTER_LINK.label, FOOTER_LINK.url),
                ink.accent(1.0),
            ),
            Line::styled(COPYRIGHT, ink.fg(TEXT, 0.8)),
        ])
        .alignment(Alignment::Center)
        .render(inner, buf);
    }
}

/// `None` while a transition has not started.
fn started(progress: f32) -> Option<f32> {
    (progress > 0.0).then_some(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::{ColorScheme, RevealConfig};

    fn screen(view: PageView<'_>, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        view.render(buf.area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        (0..buf.area.height).any(|y| row_text(buf, y).contains(needle))
    }

    #[test]
    fn test_shifted_clips_to_bounds() {
        let bounds = Rect::new(0, 10, 40, 10);
        assert_eq!(
            shifted(Rect::new(5, 12, 10, 2), 3.0, -1.4, bounds),
            Rect::new(8, 11, 10, 2)
        );
        let clipped = shifted(Rect::new(35, 12, 10, 2), 2.0, 0.0, bounds);
        assert_eq!(clipped.right(), 40);
        assert_eq!(shifted(Rect::new(0, 10, 4, 2), -6.0, 0.0, bounds).x, 0);
    }

    #[test]
    fn test_title_appears_letter_by_letter() {
        let page = Page::new(100, 30, RevealConfig::default());
        let palette = ColorScheme::Cyan.palette();
        let early = screen(
            PageView {
                page: &page,
                hero: None,
                risk_panel: None,
                palette,
                now_ms: 0,
            },
            100,
            30,
        );
        assert!(!contains(&early, "Academic"));

        let later = screen(
            PageView {
                page: &page,
                hero: None,
                risk_panel: None,
                palette,
                now_ms: 10_000,
            },
            100,
            30,
        );
        assert!(contains(&later, TITLE));
        assert!(contains(&later, "Probar la Aplicación"));
    }

    #[test]
    fn test_viewport_rows_are_copied() {
        let mut page = Page::new(100, 30, RevealConfig::default());
        page.scroll_to(page.layout().dataset.y);
        page.update(0);
        let buf = screen(
            PageView {
                page: &page,
                hero: None,
                risk_panel: None,
                palette: ColorScheme::Emerald.palette(),
                now_ms: 0,
            },
            100,
            30,
        );
        assert!(row_text(&buf, 1).contains(DATASET_TITLE));
        assert!(contains(&buf, "Hours_Studied"));
    }

    #[test]
    fn test_hidden_cards_are_not_drawn() {
        let mut page = Page::new(120, 30, RevealConfig::default());
        page.scroll_to(page.layout().features.y);
        let view = |page: &Page, now_ms| {
            screen(
                PageView {
                    page,
                    hero: None,
                    risk_panel: None,
                    palette: ColorScheme::Cyan.palette(),
                    now_ms,
                },
                120,
                30,
            )
        };
        // not pumped yet: nothing revealed
        assert!(!contains(&view(&page, 0), FEATURES[0].title));

        page.update(0);
        assert!(contains(&view(&page, 5000), FEATURES[0].title));
        assert!(contains(&view(&page, 5000), FEATURES[5].title));
    }

    #[test]
    fn test_field_cells_show_in_hero() {
        let page = Page::new(60, 20, RevealConfig::default());
        let mut surface = CellSurface::new(60, 20);
        plexus_field::Surface::fill_circle(
            &mut surface,
            plexus_core::Vec2::new(4.0, 8.0),
            1.5,
            Rgba::rgb(0, 255, 255).with_alpha(1.0),
            0.0,
        );
        let buf = screen(
            PageView {
                page: &page,
                hero: Some(&surface),
                risk_panel: None,
                palette: ColorScheme::Cyan.palette(),
                now_ms: 0,
            },
            60,
            20,
        );
        assert_ne!(buf[(0, 0)].symbol(), " ");
    }
}
