use clap::ValueEnum;
use cinemap_models::{CatalogItem, DecadeBuckets, StreamingPick, WatchlistEntry};
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            _ => self.print_json(&json!({"type": "success", "message": msg.as_ref()})),
        }
    }

    /// Always shown, even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.print_json(&json!({"type": "error", "message": msg.as_ref()})),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.print_json(&json!({"type": "info", "message": msg.as_ref()})),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            _ => self.print_json(&json!({"type": "warning", "message": msg.as_ref()})),
        }
    }

    /// Section title in human mode; nothing in JSON mode
    pub fn heading(&self, title: impl AsRef<str>) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("\n{}", title.as_ref().bright_cyan().bold());
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && !self.is_human() {
            return;
        }
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }

    pub fn table(&self, table: &Table) {
        if !self.quiet {
            println!("{}", table);
        }
    }

    /// One table per decade, newest first, at most `limit` rows each
    pub fn buckets(&self, buckets: &DecadeBuckets, limit: usize) {
        if !self.is_human() {
            self.json(&serde_json::to_value(buckets).unwrap_or_default());
            return;
        }
        for (decade, items) in buckets.iter().collect::<Vec<_>>().into_iter().rev() {
            self.heading(format!("{} ({})", decade, items.len()));
            if items.is_empty() {
                self.info("  nothing here".bright_black().to_string());
                continue;
            }
            self.table(&item_table(items.iter().take(limit)));
        }
    }

    pub fn items(&self, items: &[CatalogItem], limit: usize) {
        if !self.is_human() {
            self.json(&serde_json::to_value(items).unwrap_or_default());
            return;
        }
        self.table(&item_table(items.iter().take(limit)));
    }

    pub fn picks(&self, picks: &[StreamingPick], preferred_regions: &[String], limit: usize) {
        if !self.is_human() {
            self.json(&serde_json::to_value(picks).unwrap_or_default());
            return;
        }

        let mut table = styled_table(&["#", "Title", "Year", "Rating", "Streaming on"]);
        for (rank, pick) in picks.iter().take(limit).enumerate() {
            let platforms = match pick.providers {
                Some(_) => {
                    let names = pick.platforms(preferred_regions);
                    if names.is_empty() { "-".to_string() } else { names.join(", ") }
                }
                None => "unknown".to_string(),
            };
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&pick.item.title),
                Cell::new(year_text(&pick.item)),
                rating_cell(&pick.item),
                Cell::new(platforms),
            ]);
        }
        self.table(&table);
    }

    pub fn watchlist(&self, entries: &[WatchlistEntry]) {
        if !self.is_human() {
            self.json(&serde_json::to_value(entries).unwrap_or_default());
            return;
        }

        let mut table = styled_table(&["Id", "Kind", "Title", "Year", "Rating", "Added"]);
        for entry in entries {
            table.add_row(vec![
                Cell::new(entry.item.id),
                Cell::new(entry.item.kind),
                Cell::new(&entry.item.title),
                Cell::new(year_text(&entry.item)),
                rating_cell(&entry.item),
                Cell::new(
                    entry
                        .date_added
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                ),
            ]);
        }
        self.table(&table);
    }
}

pub fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn item_table<'a>(items: impl Iterator<Item = &'a CatalogItem>) -> Table {
    let mut table = styled_table(&["Id", "Title", "Year", "Rating", "Votes"]);
    for item in items {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(&item.title),
            Cell::new(year_text(item)),
            rating_cell(item),
            Cell::new(item.vote_count),
        ]);
    }
    table
}

fn year_text(item: &CatalogItem) -> String {
    item.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn rating_cell(item: &CatalogItem) -> Cell {
    let color = match item.vote_average {
        Some(v) if v >= 7.5 => Color::Green,
        Some(v) if v >= 6.0 => Color::Yellow,
        Some(v) if v > 0.0 => Color::Red,
        _ => Color::DarkGrey,
    };
    Cell::new(&item.rating).fg(color)
}
