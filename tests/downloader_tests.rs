//! Tests for the downloader module functionality.
//!
//! This file contains all tests for the downloader module, including tests for:
//! - DownloaderBuilder defaults and setters
//! - Sequential job runs, skips and overwrites
//! - Retry budget, fetcher fallback and partial file cleanup

use coursefetch::download::Status;
use coursefetch::downloader::{DownloaderBuilder, RetryPolicy};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::helpers::*;

#[test]
fn test_downloader_creation() {
    let downloader = DownloaderBuilder::new().build();

    assert_eq!(downloader.retry_policy(), &RetryPolicy::default());
    assert_eq!(downloader.retry_policy().max_attempts, 3);
    assert_eq!(downloader.retry_policy().backoff, Duration::from_secs(2));
    assert_eq!(downloader.merge_format(), "mp4");
    assert!(!downloader.overwrite());
    assert!(downloader.fetcher_names().is_empty());
}

#[test]
fn test_downloader_getters() {
    let downloader = DownloaderBuilder::new()
        .max_attempts(5)
        .backoff(Duration::from_millis(10))
        .user_agent(TEST_USER_AGENT)
        .merge_format("mkv")
        .overwrite(true)
        .fetcher(ScriptedFetcher::succeeding("primary"))
        .fetcher(ScriptedFetcher::succeeding("fallback"))
        .build();

    assert_eq!(downloader.retry_policy().max_attempts, 5);
    assert_eq!(downloader.retry_policy().backoff, Duration::from_millis(10));
    assert_eq!(downloader.user_agent(), TEST_USER_AGENT);
    assert_eq!(downloader.merge_format(), "mkv");
    assert!(downloader.overwrite());
    assert_eq!(downloader.fetcher_names(), vec!["primary", "fallback"]);
}

#[test]
fn test_downloader_debug() {
    let downloader = DownloaderBuilder::new()
        .fetcher(ScriptedFetcher::succeeding("yt-dlp"))
        .build();
    let debug_str = format!("{:?}", downloader);

    assert!(debug_str.contains("Downloader"));
    assert!(debug_str.contains("yt-dlp"));
}

#[tokio::test]
async fn test_downloads_in_sequence_order() {
    let temp_dir = create_temp_dir();
    let fetcher = Arc::new(ScriptedFetcher::succeeding("scripted"));
    let downloader = create_test_downloader_builder()
        .shared_fetcher(fetcher.clone())
        .build();
    let mut jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1"), ("Setup", "2"), ("Refs", "3")]);
    jobs.reverse();

    let summaries = downloader.download(&jobs).await;

    let order: Vec<_> = summaries.iter().map(|s| s.job().sequence_number).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert!(summaries.iter().all(|s| s.status() == &Status::Success));
    assert_eq!(
        file_names(temp_dir.path()),
        vec!["01-Intro.mp4", "02-Setup.mp4", "03-Refs.mp4"]
    );
}

#[tokio::test]
async fn test_request_carries_session_details() {
    let temp_dir = create_temp_dir();
    let fetcher = Arc::new(ScriptedFetcher::succeeding("scripted"));
    let downloader = create_test_downloader_builder()
        .shared_fetcher(fetcher.clone())
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "76979871")]);

    downloader.download(&jobs).await;

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].media_url, "https://player.vimeo.com/video/76979871");
    assert_eq!(requests[0].referer, lesson_url("l1"));
    assert_eq!(requests[0].user_agent, TEST_USER_AGENT);
    assert_eq!(requests[0].merge_format, "mp4");
    assert_eq!(requests[0].output_path, temp_dir.path().join("01-Intro.mp4"));
    assert!(!requests[0].force_overwrite);
}

#[tokio::test(start_paused = true)]
async fn test_fails_twice_then_succeeds() {
    let temp_dir = create_temp_dir();
    let fetcher = Arc::new(ScriptedFetcher::failing_times("scripted", 2, "HTTP Error 500"));
    let downloader = DownloaderBuilder::hidden()
        .shared_fetcher(fetcher.clone())
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    assert_eq!(summaries[0].status(), &Status::Success);
    assert_eq!(summaries[0].attempts(), 3);
    assert_eq!(summaries[0].backoffs(), 2);
    assert_eq!(summaries[0].fetcher(), Some("scripted"));
    let forced: Vec<_> = fetcher.requests().iter().map(|r| r.force_overwrite).collect();
    assert_eq!(forced, vec![false, true, true]);
    assert_file_exists(&temp_dir.path().join("01-Intro.mp4"));
}

#[tokio::test]
async fn test_exhausted_job_does_not_stop_the_batch() {
    let temp_dir = create_temp_dir();
    let downloader = create_test_downloader_builder()
        .fetcher(ScriptedFetcher::failing_for("scripted", "1", "HTTP Error 403"))
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Broken", "1"), ("Setup", "2")]);

    let summaries = downloader.download(&jobs).await;

    match summaries[0].status() {
        Status::Fail(msg) => assert!(msg.contains("HTTP Error 403")),
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(summaries[0].attempts(), 3);
    assert!(!temp_dir.path().join("01-Broken.mp4").exists());
    assert_eq!(summaries[1].status(), &Status::Success);
    assert_file_exists(&temp_dir.path().join("02-Setup.mp4"));
}

#[tokio::test]
async fn test_skips_existing_output() {
    let temp_dir = create_temp_dir();
    create_temp_file(temp_dir.path(), "01-Intro.mp4", b"video");
    let fetcher = Arc::new(ScriptedFetcher::succeeding("scripted"));
    let downloader = create_test_downloader_builder()
        .shared_fetcher(fetcher.clone())
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    assert!(matches!(summaries[0].status(), Status::Skipped(_)));
    assert!(summaries[0].is_success());
    assert_eq!(summaries[0].attempts(), 0);
    assert!(fetcher.requests().is_empty());
}

#[tokio::test]
async fn test_existing_output_with_partial_is_fetched_again() {
    let temp_dir = create_temp_dir();
    create_temp_file(temp_dir.path(), "01-Intro.mp4", b"video");
    create_temp_file(temp_dir.path(), "02-Setup.mp4", b"trunc");
    create_temp_file(temp_dir.path(), "02-Setup.mp4.part", b"rest");
    let fetcher = Arc::new(ScriptedFetcher::succeeding("scripted"));
    let downloader = create_test_downloader_builder()
        .shared_fetcher(fetcher.clone())
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1"), ("Setup", "2")]);

    let summaries = downloader.download(&jobs).await;

    assert!(matches!(summaries[0].status(), Status::Skipped(_)));
    assert_eq!(summaries[1].status(), &Status::Success);
    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].output_path.ends_with("02-Setup.mp4"));
    assert!(requests[0].force_overwrite);
    assert_eq!(
        file_names(temp_dir.path()),
        vec!["01-Intro.mp4", "02-Setup.mp4"]
    );
}

#[tokio::test]
async fn test_partial_of_a_longer_name_does_not_requeue() {
    let temp_dir = create_temp_dir();
    create_temp_file(temp_dir.path(), "01-Intro.mp4", b"video");
    create_temp_file(temp_dir.path(), "01-Introduction.mp4.part", b"other");
    let fetcher = Arc::new(ScriptedFetcher::succeeding("scripted"));
    let downloader = create_test_downloader_builder()
        .shared_fetcher(fetcher.clone())
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    assert!(matches!(summaries[0].status(), Status::Skipped(_)));
    assert!(fetcher.requests().is_empty());
    assert!(temp_dir.path().join("01-Introduction.mp4.part").exists());
}

#[tokio::test]
async fn test_overwrite_fetches_existing_output() {
    let temp_dir = create_temp_dir();
    create_temp_file(temp_dir.path(), "01-Intro.mp4", b"old");
    let fetcher = Arc::new(ScriptedFetcher::succeeding("scripted"));
    let downloader = create_test_downloader_builder()
        .overwrite(true)
        .shared_fetcher(fetcher.clone())
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    assert_eq!(summaries[0].status(), &Status::Success);
    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].force_overwrite);
    assert_eq!(std::fs::read(temp_dir.path().join("01-Intro.mp4")).unwrap(), b"video");
}

#[tokio::test]
async fn test_falls_back_after_budget_is_exhausted() {
    let temp_dir = create_temp_dir();
    let primary = Arc::new(ScriptedFetcher::always_failing("primary", "Unsupported URL"));
    let fallback = Arc::new(ScriptedFetcher::succeeding("fallback"));
    let downloader = create_test_downloader_builder()
        .shared_fetcher(primary.clone())
        .shared_fetcher(fallback.clone())
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    assert_eq!(primary.requests().len(), 3);
    assert_eq!(fallback.requests().len(), 1);
    assert_eq!(summaries[0].status(), &Status::Success);
    assert_eq!(summaries[0].fetcher(), Some("fallback"));
    assert_eq!(summaries[0].attempts(), 4);
    assert_eq!(summaries[0].backoffs(), 2);
}

#[tokio::test]
async fn test_all_fetchers_failing_reports_last_error() {
    let temp_dir = create_temp_dir();
    let downloader = create_test_downloader_builder()
        .max_attempts(1)
        .fetcher(ScriptedFetcher::always_failing("primary", "first problem"))
        .fetcher(ScriptedFetcher::always_failing("fallback", "second problem"))
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    match summaries[0].status() {
        Status::Fail(msg) => assert!(msg.contains("second problem")),
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(summaries[0].fetcher(), Some("fallback"));
    assert_eq!(summaries[0].attempts(), 2);
}

#[tokio::test]
async fn test_no_fetcher_fails_the_job() {
    let temp_dir = create_temp_dir();
    let downloader = create_test_downloader_builder().build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    assert!(matches!(summaries[0].status(), Status::Fail(_)));
}

#[tokio::test]
async fn test_access_error_removes_partials_before_retry() {
    let temp_dir = create_temp_dir();
    create_temp_file(temp_dir.path(), "01-Intro.mp4.part", b"half");
    create_temp_file(temp_dir.path(), "01-Intro.mp4.ytdl", b"state");
    let downloader = create_test_downloader_builder()
        .fetcher(ScriptedFetcher::failing_times(
            "scripted",
            1,
            "ERROR: Unable to rename file: [WinError 5] Access is denied",
        ))
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    assert_eq!(summaries[0].status(), &Status::Success);
    assert_eq!(file_names(temp_dir.path()), vec!["01-Intro.mp4"]);
}

#[tokio::test]
async fn test_success_removes_stale_partials() {
    let temp_dir = create_temp_dir();
    create_temp_file(temp_dir.path(), "01-Intro.f137.mp4.part", b"video");
    create_temp_file(temp_dir.path(), "01-Intro.f140.m4a.ytdl", b"audio");
    create_temp_file(temp_dir.path(), "02-Setup.mp4.part", b"other job");
    let downloader = create_test_downloader_builder()
        .fetcher(ScriptedFetcher::succeeding("scripted"))
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1")]);

    downloader.download(&jobs).await;

    assert_eq!(
        file_names(temp_dir.path()),
        vec!["01-Intro.mp4", "02-Setup.mp4.part"]
    );
}

#[tokio::test]
async fn test_on_complete_called_for_every_job() {
    let temp_dir = create_temp_dir();
    create_temp_file(temp_dir.path(), "01-Intro.mp4", b"video");
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let downloader = create_test_downloader_builder()
        .fetcher(ScriptedFetcher::succeeding("scripted"))
        .on_complete(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .build();
    let jobs = create_test_jobs(temp_dir.path(), &[("Intro", "1"), ("Setup", "2")]);

    downloader.download(&jobs).await;

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_creates_missing_directory() {
    let temp_dir = create_temp_dir();
    let course_dir = temp_dir.path().join("Vue Basics");
    let downloader = create_test_downloader_builder()
        .fetcher(ScriptedFetcher::succeeding("scripted"))
        .build();
    let jobs = create_test_jobs(&course_dir, &[("Intro", "1")]);

    let summaries = downloader.download(&jobs).await;

    assert_eq!(summaries[0].status(), &Status::Success);
    assert_file_exists(&course_dir.join("01-Intro.mp4"));
}
