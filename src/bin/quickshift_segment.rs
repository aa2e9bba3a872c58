use quickshift::config::segment::load_config;
use quickshift::diagnostics::TimingBreakdown;
use quickshift::image::io::{load_rgb_image, save_segments_mean_rgb, write_json_file};
use quickshift::segment_with_report;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let rgb = load_rgb_image(&config.input)?;
    let report = segment_with_report(&rgb, &config.quickshift)
        .map_err(|e| format!("Segmentation failed: {e}"))?;
    let seg = &report.segmentation;

    save_segments_mean_rgb(
        &seg.labels,
        seg.num_segments,
        &rgb,
        &config.output.labels_image,
    )?;
    let summary = SegmentationSummary {
        width: rgb.width(),
        height: rgb.height(),
        kernel_size: config.quickshift.kernel_size,
        max_dist: config.quickshift.max_dist,
        num_segments: seg.num_segments,
        timings: report.timings.clone(),
    };
    write_json_file(&config.output.summary_json, &summary)?;

    println!(
        "Segmented {}x{} into {} regions in {:.1} ms",
        summary.width, summary.height, summary.num_segments, summary.timings.total_ms
    );
    println!(
        "Saved label image to {} and summary to {}",
        config.output.labels_image.display(),
        config.output.summary_json.display()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: quickshift_segment <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SegmentationSummary {
    width: usize,
    height: usize,
    kernel_size: f64,
    max_dist: f64,
    num_segments: usize,
    timings: TimingBreakdown,
}
