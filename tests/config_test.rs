// Configuration parsing and merge tests

use std::io::Write;
use std::path::Path;

use pdf_retext::config::job::{Job, JobFile};
use pdf_retext::config::load_settings_for_job;
use pdf_retext::config::merged::MergedConfig;
use pdf_retext::config::settings::Settings;

// ============================================================
// 1. Settings deserialization
// ============================================================

#[test]
fn test_settings_full_yaml() {
    let yaml = r#"
font: "/srv/fonts/NotoSans-Regular.ttf"
max_font_size: 64.0
min_font_size: 10.0
font_step: 1.0
border_band: 8
jpeg_quality: 75
parallel_workers: 4
"#;
    let settings = Settings::from_yaml(yaml).expect("should parse full YAML");
    assert_eq!(
        settings.font.as_deref(),
        Some(Path::new("/srv/fonts/NotoSans-Regular.ttf"))
    );
    assert_eq!(settings.max_font_size, 64.0);
    assert_eq!(settings.min_font_size, 10.0);
    assert_eq!(settings.font_step, 1.0);
    assert_eq!(settings.border_band, 8);
    assert_eq!(settings.jpeg_quality, 75);
    assert_eq!(settings.parallel_workers, 4);
}

#[test]
fn test_settings_empty_yaml_uses_defaults() {
    let settings = Settings::from_yaml("{}").expect("should use defaults for empty YAML");
    assert_eq!(settings.font, None);
    assert_eq!(settings.max_font_size, 72.0);
    assert_eq!(settings.min_font_size, 8.0);
    assert_eq!(settings.font_step, 2.0);
    assert_eq!(settings.border_band, 5);
    assert_eq!(settings.jpeg_quality, 90);
    assert_eq!(settings.parallel_workers, 0);
}

#[test]
fn test_settings_partial_yaml() {
    let yaml = r#"
border_band: 3
"#;
    let settings = Settings::from_yaml(yaml).expect("should fill missing with defaults");
    assert_eq!(settings.border_band, 3);
    // the rest are defaults
    assert_eq!(settings.max_font_size, 72.0);
    assert_eq!(settings.jpeg_quality, 90);
}

#[test]
fn test_settings_invalid_yaml_fails() {
    let result = Settings::from_yaml("max_font_size: [not, a, number]");
    assert!(result.is_err());
}

// ============================================================
// 2. Job file deserialization
// ============================================================

#[test]
fn test_job_required_fields_only() {
    let yaml = r#"
jobs:
  - images: "input/tmp"
    blocks: "input/blocks.json"
    output: "out/translated.pdf"
"#;
    let job_file: JobFile = serde_yml::from_str(yaml).expect("should parse required fields");
    assert_eq!(job_file.jobs.len(), 1);
    let job = &job_file.jobs[0];
    assert_eq!(job.images, "input/tmp");
    assert_eq!(job.blocks, "input/blocks.json");
    assert_eq!(job.output, "out/translated.pdf");
    assert!(job.max_font_size.is_none());
    assert!(job.jpeg_quality.is_none());
}

#[test]
fn test_job_with_overrides() {
    let yaml = r#"
jobs:
  - images: "a/pages"
    blocks: "a/blocks.json"
    output: "a/out.pdf"
    max_font_size: 48.0
    jpeg_quality: 60
  - images: "b/pages"
    blocks: "b/blocks.json"
    output: "b/out.pdf"
"#;
    let job_file: JobFile = serde_yml::from_str(yaml).expect("should parse overrides");
    assert_eq!(job_file.jobs.len(), 2);
    assert_eq!(job_file.jobs[0].max_font_size, Some(48.0));
    assert_eq!(job_file.jobs[0].jpeg_quality, Some(60));
    assert!(job_file.jobs[1].max_font_size.is_none());
}

#[test]
fn test_job_missing_required_field_fails() {
    let yaml = r#"
jobs:
  - images: "input/tmp"
    output: "out.pdf"
"#;
    let result: Result<JobFile, _> = serde_yml::from_str(yaml);
    assert!(result.is_err(), "blocks is required");
}

// ============================================================
// 3. Merge precedence
// ============================================================

fn job_with(max_font_size: Option<f32>, jpeg_quality: Option<u8>) -> Job {
    Job {
        images: "pages".into(),
        blocks: "blocks.json".into(),
        output: "out.pdf".into(),
        font: None,
        max_font_size,
        min_font_size: None,
        font_step: None,
        border_band: None,
        jpeg_quality,
    }
}

#[test]
fn test_merged_job_value_wins() {
    let settings = Settings::default();
    let job = job_with(Some(36.0), Some(55));

    let merged = MergedConfig::new(&settings, &job);

    assert_eq!(merged.max_font_size, 36.0);
    assert_eq!(merged.jpeg_quality, 55);
    // untouched values come from settings
    assert_eq!(merged.min_font_size, 8.0);
    assert_eq!(merged.border_band, 5);
}

#[test]
fn test_merged_falls_back_to_settings() {
    let mut settings = Settings::default();
    settings.jpeg_quality = 70;
    let job = job_with(None, None);

    let merged = MergedConfig::new(&settings, &job);

    assert_eq!(merged.jpeg_quality, 70);
    assert_eq!(merged.max_font_size, 72.0);
}

// ============================================================
// 4. Merged validation
// ============================================================

#[test]
fn test_validate_accepts_defaults() {
    let merged = MergedConfig::new(&Settings::default(), &job_with(None, None));
    assert!(merged.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_font_step() {
    let mut merged = MergedConfig::new(&Settings::default(), &job_with(None, None));
    merged.font_step = 0.0;
    assert!(merged.validate().is_err(), "zero step would never terminate");
}

#[test]
fn test_validate_rejects_min_above_max() {
    let mut merged = MergedConfig::new(&Settings::default(), &job_with(None, None));
    merged.min_font_size = 96.0;
    assert!(merged.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_border_band() {
    let mut merged = MergedConfig::new(&Settings::default(), &job_with(None, None));
    merged.border_band = 0;
    assert!(merged.validate().is_err());
}

#[test]
fn test_validate_rejects_quality_out_of_range() {
    let mut merged = MergedConfig::new(&Settings::default(), &job_with(None, None));
    merged.jpeg_quality = 0;
    assert!(merged.validate().is_err());
}

// ============================================================
// 5. settings.yaml auto-discovery
// ============================================================

#[test]
fn test_settings_discovered_next_to_job_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let settings_path = tmp.path().join("settings.yaml");
    let mut f = std::fs::File::create(&settings_path).expect("create settings");
    writeln!(f, "jpeg_quality: 40").expect("write settings");

    let job_path = tmp.path().join("jobs.yaml");
    std::fs::write(&job_path, "jobs: []").expect("write job file");

    let settings = load_settings_for_job(&job_path).expect("load settings");
    assert_eq!(settings.jpeg_quality, 40);
}

#[test]
fn test_missing_settings_file_yields_defaults() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let job_path = tmp.path().join("jobs.yaml");
    std::fs::write(&job_path, "jobs: []").expect("write job file");

    let settings = load_settings_for_job(&job_path).expect("load settings");
    assert_eq!(settings.jpeg_quality, 90);
    assert_eq!(settings.border_band, 5);
}
