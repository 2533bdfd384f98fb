use chrono::{DateTime, FixedOffset, Locale, Offset, Utc};
use std::fmt::Write;

use crate::models::PageSize;
use crate::models::ideas::Idea;
use crate::navbar::{self, MENU_ITEMS};
use crate::view::{ListingView, ViewStatus};

/// Maximum number of lines a card title may take.
pub const TITLE_MAX_LINES: usize = 3;

/// Western Indonesian Time.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// Offset for `hours` east of UTC, or UTC itself when out of range.
pub fn display_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Offset publish dates are shown in.
    pub offset: FixedOffset,
    /// Column width for card titles.
    pub title_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            offset: display_offset(DEFAULT_UTC_OFFSET_HOURS),
            title_width: 40,
        }
    }
}

/// "17 Maret 2024"
pub fn format_published_date(published_at: &DateTime<Utc>, offset: FixedOffset) -> String {
    published_at
        .with_timezone(&offset)
        .format_localized("%d %B %Y", Locale::id_ID)
        .to_string()
}

/// Word-wrap `title` to `width` columns and keep at most `max_lines`,
/// ending the last kept line with `…` when anything was cut.
pub fn clamp_title(title: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in title.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        // Hard-break words longer than a whole line.
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut kept: Vec<char> = last.chars().collect();
            kept.truncate(width.saturating_sub(1));
            while kept.last() == Some(&' ') {
                kept.pop();
            }
            *last = kept.into_iter().collect::<String>() + "…";
        }
    }

    lines
}

fn render_navbar(out: &mut String, pathname: &str) {
    let active = navbar::active_menu_item(pathname).map(|item| item.href);
    let labels: Vec<String> = MENU_ITEMS
        .iter()
        .map(|item| {
            if Some(item.href) == active {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", labels.join("  "));
}

fn render_card(out: &mut String, idea: &Idea, options: &RenderOptions) {
    let date = idea
        .published_at
        .as_ref()
        .map(|dt| format_published_date(dt, options.offset))
        .unwrap_or_else(|| "-".to_string());
    let thumbnail = idea.thumbnail_url.as_deref().unwrap_or("(no image)");

    let _ = writeln!(out, "  #{}  {date}", idea.id);
    for line in clamp_title(&idea.title, options.title_width, TITLE_MAX_LINES) {
        let _ = writeln!(out, "    {line}");
    }
    let _ = writeln!(out, "    {thumbnail}");
}

/// Render the pager line, e.g. `< 1 [2] 3 >`.
pub fn render_pager(view: &ListingView) -> String {
    let mut parts = Vec::new();
    parts.push(if view.previous_enabled() { "<" } else { "-" }.to_string());
    for entry in view.pager() {
        if entry.active {
            parts.push(format!("[{}]", entry.marker));
        } else {
            parts.push(entry.marker.to_string());
        }
    }
    parts.push(">".to_string());
    parts.join(" ")
}

/// Text rendition of the whole listing page.
pub fn render_view(view: &ListingView, options: &RenderOptions) -> String {
    let mut out = String::new();
    let state = view.state();

    render_navbar(&mut out, view.location().path());
    let _ = writeln!(out, "Ideas");

    let showing = view
        .page()
        .map(|page| page.showing_label())
        .unwrap_or_default();
    let sizes: Vec<String> = PageSize::ALL
        .iter()
        .map(|size| {
            if *size == state.size {
                format!("[{size}]")
            } else {
                size.to_string()
            }
        })
        .collect();
    let _ = writeln!(
        out,
        "{showing}    Show per page: {}    Sort By: {}",
        sizes.join(" "),
        state.sort.label()
    );

    match view.status() {
        ViewStatus::Idle | ViewStatus::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        ViewStatus::Failed(e) => {
            let _ = writeln!(out, "Could not load ideas ({e}). Press r to retry.");
        }
        ViewStatus::Ready(page) if page.items.is_empty() => {
            let _ = writeln!(out, "No ideas on this page.");
        }
        ViewStatus::Ready(page) => {
            for idea in &page.items {
                render_card(&mut out, idea, options);
            }
        }
    }

    let _ = writeln!(out, "{}", render_pager(view));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_dates_in_indonesian() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 17, 3, 0, 0).unwrap();
        assert_eq!(
            format_published_date(&dt, RenderOptions::default().offset),
            "17 Maret 2024"
        );
    }

    #[test]
    fn date_follows_display_offset() {
        // 20:00 UTC on the 16th is already the 17th in WIB.
        let dt = Utc.with_ymd_and_hms(2024, 3, 16, 20, 0, 0).unwrap();
        assert_eq!(
            format_published_date(&dt, RenderOptions::default().offset),
            "17 Maret 2024"
        );
        assert_eq!(format_published_date(&dt, display_offset(0)), "16 Maret 2024");
        assert_eq!(display_offset(99), display_offset(0));
    }

    #[test]
    fn day_is_zero_padded() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 3, 0, 0).unwrap();
        assert_eq!(
            format_published_date(&dt, RenderOptions::default().offset),
            "05 Januari 2024"
        );
    }

    #[test]
    fn short_title_is_untouched() {
        assert_eq!(clamp_title("Short title", 40, 3), vec!["Short title"]);
    }

    #[test]
    fn long_title_is_wrapped_and_clamped() {
        let title = "one two three four five six seven eight nine ten";
        let lines = clamp_title(title, 10, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "one two");
        assert_eq!(lines[1], "three four");
        assert!(lines[2].ends_with('…'));
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn oversized_word_is_hard_broken() {
        assert_eq!(clamp_title("abcdefghij", 4, 3), vec!["abcd", "efgh", "ij"]);
    }
}
