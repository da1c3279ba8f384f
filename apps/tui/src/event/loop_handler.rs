use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use world_archive_core::dates::{format_short_date, parse_date};
use world_archive_core::gallery::gallery_items;
use world_archive_core::versions::latest_version;
use world_archive_core::SignGrid;

use crate::app::{handle_input, App};
use crate::site::SiteData;
use crate::ui;

/// Print the site report and exit (no UI)
pub fn run_headless(app: &App, json: bool) -> Result<()> {
    let report = SiteReport::build(&app.site, &app.site_dir);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

#[derive(Debug, serde::Serialize)]
pub struct SiteReport {
    pub site_dir: String,
    pub versions: usize,
    pub latest_version: Option<String>,
    pub images: usize,
    pub newest_image: Option<String>,
    pub signs: usize,
    pub wall_cols: usize,
    pub wall_rows: usize,
    pub collisions: Vec<ReportCollision>,
    pub events: usize,
    pub first_event: Option<String>,
    pub last_event: Option<String>,
    pub thanks: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct ReportCollision {
    pub col: i64,
    pub row: i64,
    pub hidden_text: String,
    pub shown_text: String,
}

impl SiteReport {
    pub fn build(site: &SiteData, site_dir: &str) -> Self {
        let grid = SignGrid::normalize(&site.signs);
        let sign_text = |index: usize| {
            site.signs
                .get(index)
                .map(|sign| sign.text.replace('\n', " / "))
                .unwrap_or_default()
        };
        let collisions = grid
            .collisions()
            .iter()
            .map(|collision| ReportCollision {
                col: collision.source_col,
                row: collision.source_row,
                hidden_text: sign_text(collision.hidden),
                shown_text: sign_text(collision.shown),
            })
            .collect();

        let event_dates: Vec<_> = site
            .events
            .iter()
            .filter_map(|event| parse_date(&event.date))
            .collect();

        Self {
            site_dir: site_dir.to_string(),
            versions: site.versions.len(),
            latest_version: latest_version(&site.versions).map(|version| {
                version
                    .label
                    .clone()
                    .or_else(|| version.date.clone())
                    .or_else(|| version.id.clone())
                    .unwrap_or_else(|| "Untitled".to_string())
            }),
            images: site.images.len(),
            newest_image: gallery_items(&site.images).first().map(|item| item.file.clone()),
            signs: site.signs.len(),
            wall_cols: grid.cols(),
            wall_rows: grid.rows(),
            collisions,
            events: site.events.len(),
            first_event: event_dates.iter().min().copied().map(format_short_date),
            last_event: event_dates.iter().max().copied().map(format_short_date),
            thanks: site.thanks.len(),
            errors: site.errors.clone(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let none = || "(none)".to_string();

        out.push_str("\nWorld Archive Site Report\n");
        out.push_str("=========================\n");
        out.push_str(&format!("Site directory: {}\n", self.site_dir));
        out.push_str(&format!("Versions: {}\n", self.versions));
        out.push_str(&format!(
            "Latest version: {}\n",
            self.latest_version.clone().unwrap_or_else(none)
        ));
        out.push_str(&format!("Images: {}\n", self.images));
        out.push_str(&format!(
            "Newest image: {}\n",
            self.newest_image.clone().unwrap_or_else(none)
        ));
        out.push_str(&format!(
            "Signs: {} on a {}x{} wall\n",
            self.signs, self.wall_cols, self.wall_rows
        ));
        out.push_str(&format!(
            "History: {} events ({} to {}), {} thanks\n",
            self.events,
            self.first_event.clone().unwrap_or_else(none),
            self.last_event.clone().unwrap_or_else(none),
            self.thanks
        ));

        if !self.collisions.is_empty() {
            out.push_str("\nSign collisions (later sign shown):\n");
            for collision in &self.collisions {
                out.push_str(&format!(
                    "- col {} row {}: \"{}\" hides \"{}\"\n",
                    collision.col, collision.row, collision.shown_text, collision.hidden_text
                ));
            }
        }

        if !self.errors.is_empty() {
            out.push_str("\nLoad errors:\n");
            for error in &self.errors {
                out.push_str(&format!("- {error}\n"));
            }
        }

        out
    }
}

/// Run the main application event loop
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    while app.running {
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                handle_input(app, key.code);
            }
            // Resizes are picked up by the next draw
            Ok(_) => {}
            Err(e) => tracing::warn!("Failed to read terminal event: {e}"),
        }
    }
    Ok(())
}
