//! Memories gallery: dating manifest entries and building card captions.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

use crate::dates::{self, epoch, format_long_datetime, format_short_datetime};
use crate::model::{MemoryImage, Timestamp};

pub const IMAGE_BASE: &str = "public/img/";
pub const DEFAULT_AUTHOR: &str = "@entytaiment25";
pub const EMPTY_MESSAGE: &str = "No memories yet";

/// Filename patterns tried in order; the first two carry a time of day.
#[allow(clippy::expect_used)]
static FILENAME_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // 2024-01-15_18.30.05 (screenshot naming)
        Regex::new(r"(\d{4})-(\d{2})-(\d{2})_(\d{2})\.(\d{2})\.(\d{2})").expect("valid pattern"),
        // 2024-01-15_18-30-05
        Regex::new(r"(\d{4})-(\d{2})-(\d{2})_(\d{2})-(\d{2})-(\d{2})").expect("valid pattern"),
        Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("valid pattern"),
    ]
});

fn capture_number(captures: &Captures<'_>, index: usize) -> Option<u32> {
    captures.get(index)?.as_str().parse().ok()
}

fn date_from_captures(captures: &Captures<'_>) -> Option<NaiveDateTime> {
    let year = i32::try_from(capture_number(captures, 1)?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, capture_number(captures, 2)?, capture_number(captures, 3)?)?;
    if captures.len() > 4 {
        date.and_hms_opt(
            capture_number(captures, 4)?,
            capture_number(captures, 5)?,
            capture_number(captures, 6)?,
        )
    } else {
        date.and_hms_opt(0, 0, 0)
    }
}

fn timestamp_date(timestamp: &Timestamp) -> Option<NaiveDateTime> {
    match timestamp {
        Timestamp::Millis(millis) => dates::from_millis(*millis),
        Timestamp::Text(text) => dates::parse_date(text),
    }
}

/// Capture time of a manifest entry: the filename patterns first, then the
/// explicit `timestamp`, else the epoch. A pattern that matches but names an
/// impossible date is skipped.
pub fn image_date(filename: &str, timestamp: Option<&Timestamp>) -> NaiveDateTime {
    FILENAME_PATTERNS
        .iter()
        .find_map(|pattern| {
            pattern
                .captures(filename)
                .and_then(|captures| date_from_captures(&captures))
        })
        .or_else(|| timestamp.and_then(timestamp_date))
        .unwrap_or_else(epoch)
}

/// One rendered gallery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub file: String,
    pub src: String,
    pub author: String,
    pub date: NaiveDateTime,
}

impl GalleryItem {
    pub fn from_image(image: &MemoryImage) -> Self {
        let file = image.file().to_string();
        Self {
            src: format!("{IMAGE_BASE}{file}"),
            author: image.author().unwrap_or(DEFAULT_AUTHOR).to_string(),
            date: image_date(&file, image.timestamp()),
            file,
        }
    }

    /// Overlay date, e.g. `Jan 5, 2024, 03:04 PM`.
    pub fn card_date(&self) -> String {
        format_short_datetime(self.date)
    }

    pub fn caption(&self) -> String {
        lightbox_caption(&self.author, self.date)
    }
}

/// Newest first; entries with equal dates keep manifest order.
pub fn gallery_items(images: &[MemoryImage]) -> Vec<GalleryItem> {
    let mut items: Vec<_> = images.iter().map(GalleryItem::from_image).collect();
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items
}

/// `author · January 5, 2024 at 03:04 PM`; the date is dropped for undated
/// entries.
pub fn lightbox_caption(author: &str, date: NaiveDateTime) -> String {
    if date <= epoch() {
        return author.to_string();
    }

    let date = format_long_datetime(date);
    if author.is_empty() {
        date
    } else {
        format!("{author} · {date}")
    }
}

#[cfg(test)]
mod tests {
    use super::{gallery_items, image_date, lightbox_caption, DEFAULT_AUTHOR};
    use crate::dates::{epoch, parse_date};
    use crate::model::{MemoryImage, Timestamp};

    fn at(value: &str) -> chrono::NaiveDateTime {
        parse_date(value).unwrap()
    }

    #[test]
    fn dotted_screenshot_names_carry_time() {
        assert_eq!(
            image_date("2024-03-09_21.45.12.png", None),
            at("2024-03-09T21:45:12")
        );
    }

    #[test]
    fn dashed_screenshot_names_carry_time() {
        assert_eq!(
            image_date("shot_2023-12-01_07-05-59.jpg", None),
            at("2023-12-01T07:05:59")
        );
    }

    #[test]
    fn date_only_names_are_midnight() {
        assert_eq!(image_date("spawn-2022-06-30.webp", None), at("2022-06-30"));
    }

    #[test]
    fn filename_beats_explicit_timestamp() {
        let timestamp = Timestamp::Text("2020-01-01".to_string());
        assert_eq!(
            image_date("2024-03-09_21.45.12.png", Some(&timestamp)),
            at("2024-03-09T21:45:12")
        );
    }

    #[test]
    fn explicit_timestamp_is_the_fallback() {
        let text = Timestamp::Text("2021-05-04T10:00:00".to_string());
        assert_eq!(image_date("castle.png", Some(&text)), at("2021-05-04T10:00:00"));

        let millis = Timestamp::Millis(86_400_000);
        assert_eq!(image_date("castle.png", Some(&millis)), at("1970-01-02"));

        assert_eq!(image_date("castle.png", None), epoch());
    }

    #[test]
    fn impossible_dates_fall_through() {
        assert_eq!(image_date("2024-99-99.png", None), epoch());
    }

    #[test]
    fn items_sort_newest_first_with_default_author() {
        let images = vec![
            MemoryImage::File("2021-01-01.png".to_string()),
            MemoryImage::Described {
                file: "2023-01-01.png".to_string(),
                author: Some("@builder".to_string()),
                timestamp: None,
            },
            MemoryImage::File("undated.png".to_string()),
        ];

        let items = gallery_items(&images);
        let files: Vec<_> = items.iter().map(|item| item.file.as_str()).collect();
        assert_eq!(files, ["2023-01-01.png", "2021-01-01.png", "undated.png"]);
        assert_eq!(items[0].author, "@builder");
        assert_eq!(items[0].src, "public/img/2023-01-01.png");
        assert_eq!(items[1].author, DEFAULT_AUTHOR);
        assert_eq!(items[1].card_date(), "Jan 1, 2021, 12:00 AM");
    }

    #[test]
    fn caption_omits_epoch_dates() {
        assert_eq!(lightbox_caption("@me", epoch()), "@me");
        assert_eq!(
            lightbox_caption("@me", at("2024-01-05T15:04:00")),
            "@me · January 5, 2024 at 03:04 PM"
        );
        assert_eq!(
            lightbox_caption("", at("2024-01-05T15:04:00")),
            "January 5, 2024 at 03:04 PM"
        );
    }
}
