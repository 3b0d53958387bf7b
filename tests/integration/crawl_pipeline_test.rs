// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{album_page, artist_page, mount_page, song_page, test_settings};
use lyricrawl::application::use_cases::crawl_artist::CrawlArtistUseCase;
use lyricrawl::domain::models::crawl::CrawlTarget;
use lyricrawl::infrastructure::sites::Site;
use lyricrawl::utils::errors::CrawlError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_crawl_artist_writes_lyrics_tree() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/artist/The-Sisters-Of-Mercy",
        artist_page(&[("Floodland", "/album/floodland-1")]),
    )
    .await;
    mount_page(
        &server,
        "/album/floodland-1",
        album_page(&[
            ("Dominion", "/lyric/1/Dominion"),
            ("Lucretia My Reflection", "/lyric/2/Lucretia"),
        ]),
    )
    .await;
    mount_page(&server, "/lyric/1/Dominion", song_page("Dominion reigns")).await;
    mount_page(&server, "/lyric/2/Lucretia", song_page("She's a reflection")).await;

    let tmp = TempDir::new().unwrap();
    let target = CrawlTarget::new("The-Sisters-Of-Mercy", tmp.path());
    let use_case = CrawlArtistUseCase::new(test_settings(&server.uri()));

    let report = use_case.execute(Site::LyricsCom, &target).await.unwrap();

    assert_eq!(report.written.len(), 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("Floodland").join("Dominion.txt")).unwrap(),
        "Dominion reigns"
    );
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("Floodland").join("Lucretia My Reflection.txt"))
            .unwrap(),
        "She's a reflection"
    );
}

#[tokio::test]
async fn test_crawl_artist_keeps_siblings_of_failed_song() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/artist/Some-Artist",
        artist_page(&[("Album", "/album/album-1")]),
    )
    .await;
    mount_page(
        &server,
        "/album/album-1",
        album_page(&[("Good", "/lyric/1/Good"), ("Broken", "/lyric/2/Broken")]),
    )
    .await;
    mount_page(&server, "/lyric/1/Good", song_page("still here")).await;
    Mock::given(method("GET"))
        .and(path("/lyric/2/Broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let target = CrawlTarget::new("Some-Artist", tmp.path());
    let use_case = CrawlArtistUseCase::new(test_settings(&server.uri()));

    let err = use_case.execute(Site::LyricsCom, &target).await.unwrap_err();
    assert!(err.is_incomplete());

    let report = match err {
        CrawlError::Incomplete(report) => report,
        other => panic!("expected an incomplete crawl, got {}", other),
    };
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].subject.ends_with("Broken.txt"));
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("Album").join("Good.txt")).unwrap(),
        "still here"
    );
    assert!(!tmp.path().join("Album").join("Broken.txt").exists());
}

#[tokio::test]
async fn test_crawl_artist_unknown_artist_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artist/Nobody"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let target = CrawlTarget::new("Nobody", tmp.path());
    let use_case = CrawlArtistUseCase::new(test_settings(&server.uri()));

    let err = use_case.execute(Site::LyricsCom, &target).await.unwrap_err();

    assert!(matches!(err, CrawlError::Fetch(_)));
    assert!(std::fs::read_dir(tmp.path()).unwrap().next().is_none());
}
