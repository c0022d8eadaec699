//! Tests for the download module functionality.
//!
//! This file contains tests for turning resolved lessons into jobs:
//! - Deduplication of shared media
//! - Job numbering and naming
//! - Summary and Status functionality

use coursefetch::dedupe::dedupe;
use coursefetch::download::{build_jobs, Status, Summary};
use std::collections::HashSet;
use std::path::Path;

mod common;
use common::helpers::*;

#[test]
fn test_shared_media_keeps_descriptive_title() {
    let resolved = vec![
        resolved(1, "Welcome", "100"),
        resolved(2, "Lesson 2", "200"),
        resolved(3, "Reactivity", "300"),
        resolved(4, "Intro to Refs", "200"),
        resolved(5, "Wrap Up", "500"),
    ];

    let deduplicated = dedupe(resolved);
    let jobs = build_jobs(deduplicated.assets, "Vue Basics", Path::new("out"));

    let named: Vec<_> = jobs
        .iter()
        .map(|j| (j.sequence_number, j.title().to_string()))
        .collect();
    assert_eq!(
        named,
        vec![
            (1, "Welcome".to_string()),
            (2, "Reactivity".to_string()),
            (3, "Intro to Refs".to_string()),
            (4, "Wrap Up".to_string()),
        ]
    );
    assert_eq!(jobs[2].asset.original_ordinal, 4);
    assert_eq!(deduplicated.discarded.len(), 1);
    assert_eq!(deduplicated.discarded[0].kept_ordinal, 4);
}

#[test]
fn test_dedupe_is_deterministic() {
    let input = || {
        vec![
            resolved(1, "Setup", "7"),
            resolved(2, "Props", "7"),
            resolved(3, "Slots", "8"),
            resolved(4, "Emits", "8"),
        ]
    };

    let first = dedupe(input());
    let second = dedupe(input());

    assert_eq!(first.assets, second.assets);
    let titles: Vec<_> = first.assets.iter().map(|a| a.chosen_title.as_str()).collect();
    assert_eq!(titles, vec!["Setup", "Slots"]);
    let ids: HashSet<_> = first.assets.iter().map(|a| a.media_id.as_str()).collect();
    assert_eq!(ids.len(), first.assets.len());
}

#[test]
fn test_job_paths_live_in_course_directory() {
    let temp_dir = create_temp_dir();
    let jobs = create_test_jobs(temp_dir.path(), &[("What: is Vue?", "1"), ("Lesson 2", "2")]);

    assert_eq!(jobs[0].output_path, temp_dir.path().join("01-What- is Vue-.mp4"));
    assert_eq!(jobs[1].file_name(), "02-Lesson 2 - Vue Basics.mp4");
    assert_eq!(jobs[1].base_name(), "02-Lesson 2 - Vue Basics");
    assert_eq!(jobs[1].directory(), temp_dir.path());
}

#[test]
fn test_summary_lifecycle() {
    let temp_dir = create_temp_dir();
    let job = create_test_jobs(temp_dir.path(), &[("Intro", "1")]).remove(0);

    let summary = Summary::new(job);
    assert_eq!(summary.status(), &Status::NotStarted);
    assert!(!summary.is_success());

    let summary = summary.with_attempts(2, 1).with_fetcher("yt-dlp").fail("timeout");
    assert_eq!(summary.status(), &Status::Fail("timeout".into()));
    assert_eq!(summary.attempts(), 2);
    assert_eq!(summary.backoffs(), 1);
    assert_eq!(summary.fetcher(), Some("yt-dlp"));
}
