//! Writing results to disk through the sinks.

mod common;

use std::fs;

use common::{dynamic, flat_then_noise};
use post_resizer::config::{OutputConfig, RenderConfig};
use post_resizer::processing::{DirectorySink, OutputSink, SinkSet};
use post_resizer::{export_image, export_posts, render_posts, TargetSpec};
use tempfile::TempDir;

fn targets() -> Vec<TargetSpec> {
    vec![
        TargetSpec::new("Square", 64, 64).unwrap(),
        TargetSpec::new("Story", 36, 64).unwrap(),
    ]
}

#[test]
fn export_writes_pngs_then_archive() {
    let dir = TempDir::new().unwrap();
    let output = OutputConfig {
        output_dir: dir.path().join("out"),
        ..OutputConfig::default()
    };
    let src = dynamic(flat_then_noise(200, 100, 80, 2));

    let summary = export_image(&src, &RenderConfig::new(targets(), true), &output).unwrap();
    assert_eq!(summary.labels, ["Square_64x64", "Story_36x64"]);

    let names: Vec<String> = summary
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["square_64x64.png", "story_36x64.png", "resized_posts.zip"]);
    for path in &summary.written {
        assert!(path.exists(), "{} missing", path.display());
    }

    let story = image::open(dir.path().join("out/story_36x64.png")).unwrap();
    assert_eq!((story.width(), story.height()), (36, 64));
}

#[test]
fn archive_only_output() {
    let dir = TempDir::new().unwrap();
    let output = OutputConfig {
        output_dir: dir.path().to_path_buf(),
        archive_name: "posts.zip".to_string(),
        write_images: false,
        write_archive: true,
    };
    let src = dynamic(flat_then_noise(90, 90, 30, 6));
    let summary = export_image(&src, &RenderConfig::new(targets(), false), &output).unwrap();

    assert_eq!(summary.written, [dir.path().join("posts.zip")]);
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn export_posts_reads_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("source.png");
    flat_then_noise(120, 80, 40, 9).save(&input).unwrap();

    let output = OutputConfig {
        output_dir: dir.path().join("posts"),
        write_archive: false,
        ..OutputConfig::default()
    };
    let summary = export_posts(&input, &RenderConfig::new(targets(), true), &output).unwrap();
    assert_eq!(summary.written.len(), 2);
}

#[test]
fn undecodable_input_is_a_decode_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.png");
    fs::write(&input, b"definitely not a png").unwrap();

    let err = export_posts(&input, &RenderConfig::default(), &OutputConfig::default()).unwrap_err();
    assert_eq!(err.category(), "decode");
}

#[test]
fn directory_sink_reports_written_files() {
    let dir = TempDir::new().unwrap();
    let src = dynamic(flat_then_noise(50, 50, 10, 5));
    let results = render_posts(&src, &RenderConfig::new(targets(), false)).unwrap();

    let mut sinks = SinkSet::new();
    sinks.push(Box::new(DirectorySink::new(dir.path())));
    assert_eq!(sinks.sink_count(), 1);
    let written = sinks.deliver(&results).unwrap();
    assert_eq!(written.len(), 2);

    let mut sink = DirectorySink::new(dir.path());
    assert!(sink.finish().unwrap().is_empty());
}
