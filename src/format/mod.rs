//! Output formatting for dashboard views (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::view::{BestsellersView, Card, CardGrid, SelectView, StatusText};

/// Renders view descriptions for the terminal.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a card grid.
    pub fn format_grid(&self, grid: &CardGrid) -> String {
        if grid.is_empty() {
            return match self.format {
                OutputFormat::Json => self.json(grid),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json(grid),
            OutputFormat::Table => self.table_grid(grid),
            OutputFormat::Markdown => self.markdown_grid(grid),
            OutputFormat::Csv => self.csv_grid(grid),
        }
    }

    /// Formats the status line.
    pub fn format_status(&self, status: &StatusText) -> String {
        match self.format {
            OutputFormat::Json => self.json(status),
            OutputFormat::Markdown => format!("*{}*", Self::markdown_escape(&status.text())),
            OutputFormat::Table | OutputFormat::Csv => status.text(),
        }
    }

    /// Formats the whole bestsellers section.
    pub fn format_bestsellers(&self, view: &BestsellersView) -> String {
        match self.format {
            OutputFormat::Json => self.json(view),
            OutputFormat::Table => self.table_bestsellers(view),
            OutputFormat::Markdown => self.markdown_bestsellers(view),
            // CSV has no place for the selector or status; emit the cards only
            OutputFormat::Csv => self.format_grid(&view.grid),
        }
    }

    // JSON formatting

    fn json<T: serde::Serialize>(&self, value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_grid(&self, grid: &CardGrid) -> String {
        let badge_width = 6;
        let price_width = 12;
        let rating_width = 20;
        let meta_width = 16;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<badge_width$}  {:<price_width$}  {:<rating_width$}  {:<meta_width$}  {}",
            "#", "Price", "Rating", "Info", "Title"
        ));
        lines.push(format!(
            "{:-<badge_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<meta_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        for (index, card) in grid.cards.iter().enumerate() {
            let badge = card.badge.clone().unwrap_or_else(|| (index + 1).to_string());

            lines.push(format!(
                "{:<badge_width$}  {:>price_width$}  {:<rating_width$}  {:<meta_width$}  {}",
                Self::truncate(&badge, badge_width),
                Self::truncate(&card.price, price_width),
                Self::truncate(&card.rating, rating_width),
                Self::truncate(&card.meta, meta_width),
                Self::truncate(&card.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", grid.len()));

        lines.join("\n")
    }

    fn table_selector(selector: &SelectView) -> Vec<String> {
        let mut lines = vec!["Categories:".to_string()];

        let mut any = false;
        for option in selector.selectable() {
            any = true;
            let marker = if option.value == selector.selected { "*" } else { " " };
            lines.push(format!("  {} {}", marker, option.label));
        }

        if !any {
            if let Some(label) = selector.placeholder_label() {
                lines.push(format!("  {}", label));
            }
        }

        lines
    }

    fn table_bestsellers(&self, view: &BestsellersView) -> String {
        let mut lines = vec![view.status.text(), String::new()];
        lines.extend(Self::table_selector(&view.selector));
        lines.push(String::new());

        if view.loader_visible {
            lines.push("Running scraper...".to_string());
        } else if view.selector.selected.is_empty() {
            if view.selector.selectable().next().is_some() {
                lines.push("Choose a category with --category to see its bestsellers.".to_string());
            }
        } else {
            lines.push(format!("{}:", view.selector.selected));
            lines.push(self.format_grid(&view.grid));
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_row(card: &Card, index: usize) -> String {
        let badge = card.badge.clone().unwrap_or_else(|| (index + 1).to_string());
        let title = Self::markdown_escape(&card.title);
        let title = match &card.link.href {
            Some(href) => format!("[{}]({})", title, Self::markdown_url(href)),
            None => title,
        };

        format!(
            "| {} | {} | {} | {} | {} |",
            Self::markdown_escape(&badge),
            Self::markdown_escape(&card.price),
            Self::markdown_escape(&card.rating),
            Self::markdown_escape(&card.meta),
            title
        )
    }

    fn markdown_grid(&self, grid: &CardGrid) -> String {
        let mut lines = Vec::new();

        lines.push("| # | Price | Rating | Info | Title |".to_string());
        lines.push("|---|-------|--------|------|-------|".to_string());

        for (index, card) in grid.cards.iter().enumerate() {
            lines.push(Self::markdown_row(card, index));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", grid.len()));

        lines.join("\n")
    }

    fn markdown_bestsellers(&self, view: &BestsellersView) -> String {
        let mut lines = Vec::new();

        lines.push("## Daily Bestsellers".to_string());
        lines.push(String::new());
        lines.push(self.format_status(&view.status));
        lines.push(String::new());

        let mut any = false;
        for option in view.selector.selectable() {
            any = true;
            let label = Self::markdown_escape(&option.label);
            if option.value == view.selector.selected {
                lines.push(format!("- **{}**", label));
            } else {
                lines.push(format!("- {}", label));
            }
        }
        if !any {
            if let Some(label) = view.selector.placeholder_label() {
                lines.push(format!("*{}*", Self::markdown_escape(label)));
            }
        }

        if !view.selector.selected.is_empty() {
            lines.push(String::new());
            lines.push(format!("### {}", Self::markdown_escape(&view.selector.selected)));
            lines.push(String::new());
            lines.push(self.format_grid(&view.grid));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "badge,title,price,rating,info,image_url,url".to_string()
    }

    fn csv_grid(&self, grid: &CardGrid) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for card in &grid.cards {
            lines.push(format!(
                "{},{},{},{},{},{},{}",
                card.badge.as_deref().map(Self::csv_escape).unwrap_or_default(),
                Self::csv_escape(&card.title),
                Self::csv_escape(&card.price),
                Self::csv_escape(&card.rating),
                Self::csv_escape(&card.meta),
                card.image.src.as_deref().map(Self::csv_escape).unwrap_or_default(),
                card.link.href.as_deref().map(Self::csv_escape).unwrap_or_default()
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    fn markdown_escape(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '|' | '[' | ']' | '*' | '_' | '`' | '<' | '>' => {
                    out.push('\\');
                    out.push(c);
                }
                '\n' | '\r' => out.push(' '),
                _ => out.push(c),
            }
        }
        out
    }

    fn markdown_url(url: &str) -> String {
        url.replace(' ', "%20").replace('(', "%28").replace(')', "%29")
    }

    fn truncate(s: &str, width: usize) -> String {
        if s.chars().count() > width {
            let head: String = s.chars().take(width.saturating_sub(3)).collect();
            format!("{}...", head)
        } else {
            s.to_string()
        }
    }
}
