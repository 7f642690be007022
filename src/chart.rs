//! Bar charts written as PNG files.
//!
//! Each chart owns its drawing surface for the duration of one call; the
//! backend is dropped when the call returns, whether or not drawing succeeded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::output::ensure_dir;
use crate::table::{DocumentTable, YEAR_COLUMN};

pub const DEFAULT_TOP_K: usize = 10;
const CHART_SIZE: (u32, u32) = (640, 480);
const FONT: &str = "sans-serif";

pub fn words_chart_path(plot_dir: &Path, top_k: usize) -> PathBuf {
    plot_dir.join(format!("top_{top_k}_words_by_frequency.png"))
}

pub fn years_chart_path(plot_dir: &Path, from: &str, to: &str) -> PathBuf {
    plot_dir.join(format!("bar_plot_publications_per_year_{from}-{to}.png"))
}

/// Bar chart of the first `top_k` words.
///
/// `words` and `frequencies` are index-aligned. Fewer than `top_k` entries
/// are drawn as-is; the title and file name still carry `top_k`.
pub fn bar_plot(
    words: &[&str],
    frequencies: &[usize],
    top_k: usize,
    plot_dir: &Path,
) -> Result<PathBuf> {
    let (labels, values): (Vec<String>, Vec<usize>) = words
        .iter()
        .zip(frequencies)
        .take(top_k)
        .map(|(w, f)| (w.to_string(), *f))
        .unzip();
    if labels.len() < top_k {
        warn!("only {} words available for a top {} chart", labels.len(), top_k);
    }

    ensure_dir(plot_dir)?;
    let path = words_chart_path(plot_dir, top_k);
    let title = format!("Top {top_k} words by frequency");
    draw_bars(&path, &title, &labels, &values, true).map_err(|e| PipelineError::Chart {
        path: path.clone(),
        message: e.to_string(),
    })?;
    info!("saved {}", path.display());
    Ok(path)
}

/// Last four characters of a `published` value, or all of it if shorter.
pub fn year_of(published: &str) -> &str {
    match published.char_indices().rev().nth(3) {
        Some((idx, _)) => &published[idx..],
        None => published,
    }
}

/// Fill the `year` column and count documents per year, ascending.
///
/// Years in `remove_years` are dropped from the counts; one that is not
/// present is logged and skipped.
pub fn publications_per_year(
    table: &mut DocumentTable,
    remove_years: &[&str],
) -> BTreeMap<String, usize> {
    for row in table.rows_mut() {
        let year = year_of(row.published()).to_string();
        row.set_year(year);
    }
    table.append_column(YEAR_COLUMN);

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in table.rows() {
        if let Some(year) = row.year() {
            *counts.entry(year.to_string()).or_insert(0) += 1;
        }
    }

    for year in remove_years {
        if counts.remove(*year).is_none() {
            warn!("the year {year} wasn't in the data, nothing removed");
        }
    }
    counts
}

/// First and last year of a grouping.
pub fn year_range(counts: &BTreeMap<String, usize>) -> Option<(&str, &str)> {
    let first = counts.keys().next()?;
    let last = counts.keys().next_back()?;
    Some((first.as_str(), last.as_str()))
}

/// Bar chart of documents per publication year.
pub fn plot_publications_series(
    table: &mut DocumentTable,
    remove_years: &[&str],
    plot_dir: &Path,
) -> Result<PathBuf> {
    let counts = publications_per_year(table, remove_years);
    let (from, to) = year_range(&counts).ok_or(PipelineError::EmptySeries)?;

    ensure_dir(plot_dir)?;
    let path = years_chart_path(plot_dir, from, to);
    let title = format!("Number of publications from {from} to {to}");
    let labels: Vec<String> = counts.keys().cloned().collect();
    let values: Vec<usize> = counts.values().copied().collect();
    draw_bars(&path, &title, &labels, &values, false).map_err(|e| PipelineError::Chart {
        path: path.clone(),
        message: e.to_string(),
    })?;
    info!("saved {}", path.display());
    Ok(path)
}

fn draw_bars(
    path: &Path,
    title: &str,
    labels: &[String],
    values: &[usize],
    rotate_labels: bool,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let heights = values
        .iter()
        .map(|&value| u32::try_from(value))
        .collect::<std::result::Result<Vec<u32>, _>>()?;
    let bars = u32::try_from(heights.len())?.max(1);
    let top = heights.iter().copied().max().unwrap_or(0);
    let y_max = top.saturating_add(top.div_ceil(10).max(1));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 20))
        .margin(12)
        .x_label_area_size(if rotate_labels { 90 } else { 40 })
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..bars).into_segmented(), 0u32..y_max)?;

    let label_style = if rotate_labels {
        (FONT, 13).into_font().transform(FontTransform::Rotate90)
    } else {
        (FONT, 13).into_font()
    };
    let formatter = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(idx) => labels.get(*idx as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&formatter)
        .x_label_style(label_style)
        .draw()?;

    let data = (0u32..).zip(heights);
    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.8).filled())
            .margin(16)
            .data(data),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Document, PUBLISHED_COLUMN};

    fn table(published: &[&str]) -> DocumentTable {
        DocumentTable::new(
            vec![PUBLISHED_COLUMN.into()],
            published
                .iter()
                .map(|p| Document::new([(PUBLISHED_COLUMN, *p)]))
                .collect(),
        )
    }

    #[test]
    fn year_is_last_four_characters() {
        assert_eq!(year_of("Mon, 04 Mar 2019"), "2019");
        assert_eq!(year_of("2019"), "2019");
        assert_eq!(year_of("19"), "19");
        assert_eq!(year_of("é2020"), "2020");
    }

    #[test]
    fn groups_documents_per_year() {
        let mut t = table(&["01 Jan 2019", "05 Jun 2019", "10 Oct 2021"]);
        let counts = publications_per_year(&mut t, &[]);
        assert_eq!(
            counts.iter().map(|(y, c)| (y.as_str(), *c)).collect::<Vec<_>>(),
            vec![("2019", 2), ("2021", 1)]
        );
        assert_eq!(year_range(&counts), Some(("2019", "2021")));
        assert_eq!(t.rows()[2].year(), Some("2021"));
        assert!(t.has_column(YEAR_COLUMN));
    }

    #[test]
    fn removing_absent_year_leaves_grouping_unchanged() {
        let mut t = table(&["2019", "2019", "2021"]);
        let counts = publications_per_year(&mut t, &["1999"]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("2019"), Some(&2));
    }

    #[test]
    fn removing_present_year_drops_it() {
        let mut t = table(&["2019", "2021", "2022"]);
        let counts = publications_per_year(&mut t, &["2022"]);
        assert_eq!(year_range(&counts), Some(("2019", "2021")));
    }

    #[test]
    fn empty_series_is_an_error() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut t = table(&["2022"]);
        let err = plot_publications_series(&mut t, &["2022"], tempdir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptySeries));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn bar_heights_beyond_u32_are_rejected() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("overflow.png");
        let labels = vec!["a".to_string(), "b".to_string()];
        let values = [1, u32::MAX as usize + 1];
        assert!(draw_bars(&path, "overflow", &labels, &values, false).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn chart_file_names() {
        let dir = Path::new("plots");
        assert_eq!(
            words_chart_path(dir, 10),
            dir.join("top_10_words_by_frequency.png")
        );
        assert_eq!(
            years_chart_path(dir, "2019", "2021"),
            dir.join("bar_plot_publications_per_year_2019-2021.png")
        );
    }
}
