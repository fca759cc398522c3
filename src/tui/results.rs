use crate::search::ImageRecord;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use textwrap::wrap;

/// Result list with selection, plus a detail pane for the selected record
pub struct ResultsList {
    state: ListState,
}

impl ResultsList {
    pub fn new() -> Self {
        Self {
            state: ListState::default(),
        }
    }

    /// Index of the selected record, if any
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Point selection at the first record of a fresh batch
    pub fn reset(&mut self, len: usize) {
        self.state.select(if len > 0 { Some(0) } else { None });
    }

    pub fn select_prev(&mut self) {
        if let Some(current) = self.state.selected() {
            if current > 0 {
                self.state.select(Some(current - 1));
            }
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if let Some(current) = self.state.selected() {
            if current + 1 < len {
                self.state.select(Some(current + 1));
            }
        }
    }

    /// Render the selectable list of records
    pub fn render(&mut self, frame: &mut Frame, area: Rect, records: &[ImageRecord], loading: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Results ")
            .border_style(Style::default().fg(Color::DarkGray));

        if records.is_empty() {
            let hint = if loading {
                "Searching..."
            } else {
                "Ready to find images - enter a search term above"
            };
            let placeholder = Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let items: Vec<ListItem> = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let line = Line::from(vec![
                    Span::styled(
                        format!("{:>2}. ", i + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        record.attribution.clone(),
                        Style::default()
                            .fg(Color::LightCyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(record.alt_text.clone(), Style::default().fg(Color::Gray)),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol("▸ ")
            .highlight_style(
                Style::default()
                    .bg(Color::Indexed(236))
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_stateful_widget(list, area, &mut self.state);
    }

    /// Render the detail pane for one record
    pub fn render_detail(&self, frame: &mut Frame, area: Rect, record: Option<&ImageRecord>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Selected ")
            .border_style(Style::default().fg(Color::DarkGray));

        let Some(record) = record else {
            frame.render_widget(block, area);
            return;
        };

        let label = Style::default().fg(Color::Yellow);
        let width = area.width.saturating_sub(4).max(10) as usize;

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Source  ", label),
                Span::raw(record.source_name.clone()),
            ]),
            Line::from(vec![
                Span::styled("By      ", label),
                Span::raw(record.attribution.clone()),
            ]),
            Line::from(Span::styled("Alt", label)),
        ];
        for piece in wrap(&record.alt_text, width) {
            lines.push(Line::from(format!("  {piece}")));
        }
        lines.push(Line::from(Span::styled("Image URL", label)));
        for piece in wrap(&record.url, width) {
            lines.push(Line::from(Span::styled(
                format!("  {piece}"),
                Style::default().fg(Color::LightBlue),
            )));
        }
        lines.push(Line::from(Span::styled("Page", label)));
        for piece in wrap(&record.original_url, width) {
            lines.push(Line::from(Span::styled(
                format!("  {piece}"),
                Style::default().fg(Color::LightBlue),
            )));
        }

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }
}

impl Default for ResultsList {
    fn default() -> Self {
        Self::new()
    }
}
