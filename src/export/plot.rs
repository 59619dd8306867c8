//! PNG chart export.
//!
//! Rasterizes a round as an index-vs-distance line chart: light grid,
//! axes, a marker per reading, and a dashed line at the warning threshold.
//! The round number and collection time live in the filename.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::PathBuf;

use super::{round_filename, RoundExporter};
use crate::models::Round;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 400;
const MARGIN: i32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const SERIES: Rgb<u8> = Rgb([31, 119, 180]);
const THRESHOLD: Rgb<u8> = Rgb([214, 39, 40]);

/// Renders completed rounds as PNG charts.
pub struct PlotExporter {
    out_dir: PathBuf,
    warning_distance_cm: f64,
}

impl PlotExporter {
    pub fn new(out_dir: PathBuf, warning_distance_cm: f64) -> Self {
        Self {
            out_dir,
            warning_distance_cm,
        }
    }

    fn render(&self, round: &Round) -> RgbImage {
        let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

        let left = MARGIN;
        let right = WIDTH as i32 - MARGIN;
        let top = MARGIN;
        let bottom = HEIGHT as i32 - MARGIN;

        // Distance axis starts at zero; headroom above the tallest reading
        let max_distance = round
            .readings
            .iter()
            .map(|r| r.distance_cm)
            .fold(0.0_f64, f64::max);
        let y_max = (max_distance * 1.1).max(10.0);

        let first_index = round.readings.first().map(|r| r.index).unwrap_or(0);
        let last_index = round.readings.last().map(|r| r.index).unwrap_or(1);
        let index_span = (last_index.saturating_sub(first_index)).max(1) as f64;

        let x_px = |index: u64| -> i32 {
            let frac = (index - first_index) as f64 / index_span;
            left + (frac * (right - left) as f64).round() as i32
        };
        let y_px = |distance: f64| -> i32 {
            let frac = (distance / y_max).clamp(0.0, 1.0);
            bottom - (frac * (bottom - top) as f64).round() as i32
        };

        // Grid
        for step in 1..5 {
            let y = top + (bottom - top) * step / 5;
            draw_line(&mut img, left, y, right, y, GRID);
        }
        for step in 1..6 {
            let x = left + (right - left) * step / 6;
            draw_line(&mut img, x, top, x, bottom, GRID);
        }

        // Axes
        draw_line(&mut img, left, bottom, right, bottom, AXIS);
        draw_line(&mut img, left, top, left, bottom, AXIS);

        // Warning threshold, dashed
        if self.warning_distance_cm < y_max {
            let y = y_px(self.warning_distance_cm);
            let mut x = left;
            while x < right {
                draw_line(&mut img, x, y, (x + 6).min(right), y, THRESHOLD);
                x += 10;
            }
        }

        // Series: line segments between consecutive readings, marker on each
        for pair in round.readings.windows(2) {
            draw_line(
                &mut img,
                x_px(pair[0].index),
                y_px(pair[0].distance_cm),
                x_px(pair[1].index),
                y_px(pair[1].distance_cm),
                SERIES,
            );
        }
        for reading in &round.readings {
            draw_marker(&mut img, x_px(reading.index), y_px(reading.distance_cm));
        }

        img
    }
}

impl RoundExporter for PlotExporter {
    fn export(&self, round: &Round) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("Failed to create export dir {}", self.out_dir.display())
        })?;

        let img = self.render(round);
        let path = self.out_dir.join(round_filename(round, "png"));
        img.save(&path)
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        Ok(path)
    }
}

fn put_pixel_clipped(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line.
fn draw_line(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        put_pixel_clipped(img, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_marker(img: &mut RgbImage, cx: i32, cy: i32) {
    for dx in -2..=2 {
        for dy in -2..=2 {
            put_pixel_clipped(img, cx + dx, cy + dy, SERIES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::models::Reading;

    fn sample_round() -> Round {
        let collected_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let readings = (1..=10)
            .map(|i| Reading {
                index: i,
                timestamp: collected_at,
                distance_cm: (i as f64) * 7.0,
                valid: true,
            })
            .collect();
        Round::new(2, collected_at, readings)
    }

    #[test]
    fn writes_png_under_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PlotExporter::new(dir.path().to_path_buf(), 10.0);

        let path = exporter.export(&sample_round()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "round_2_20260102_0304.png"
        );
        assert_eq!(image::image_dimensions(&path).unwrap(), (WIDTH, HEIGHT));
    }

    #[test]
    fn renders_single_reading_without_panicking() {
        let collected_at = Utc::now();
        let round = Round::new(
            1,
            collected_at,
            vec![Reading {
                index: 1,
                timestamp: collected_at,
                distance_cm: 0.0,
                valid: false,
            }],
        );
        let exporter = PlotExporter::new(PathBuf::new(), 10.0);
        let img = exporter.render(&round);
        assert_eq!(img.dimensions(), (WIDTH, HEIGHT));
    }
}
