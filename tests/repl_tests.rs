//! Integration Tests for the REPL
//!
//! Drives the prompt loop from scripted stdin. Responses are seeded into the
//! cache so no request ever leaves the process.

use std::sync::Arc;
use std::time::Duration;

use pokecache::repl::{self, PROMPT};
use pokecache::{Cache, PokeApiClient, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tokio_test::io::Builder;

const BASE: &str = "http://127.0.0.1:9/api/v2";

// == Helper Functions ==

fn create_session() -> Session {
    let cache = Arc::new(Cache::new(Duration::from_secs(300)).unwrap());
    let client = PokeApiClient::new(BASE, cache, Duration::from_secs(2)).unwrap();
    Session::with_rng(client, StdRng::seed_from_u64(1))
}

async fn run_script(session: &mut Session, script: &str) -> String {
    let input = BufReader::new(Builder::new().read(script.as_bytes()).build());
    let mut out = Vec::new();
    repl::run(session, input, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

// == Tests ==

#[tokio::test]
async fn test_exit_stops_loop() {
    let mut session = create_session();
    let out = run_script(&mut session, "exit\nhelp\n").await;

    assert_eq!(out, format!("{}Closing the Pokedex... Goodbye!\n", PROMPT));
}

#[tokio::test]
async fn test_eof_ends_loop() {
    let mut session = create_session();
    let out = run_script(&mut session, "\n   \nFLY away\n").await;

    assert_eq!(
        out,
        format!("{p}{p}{p}Unknown command\n{p}\n", p = PROMPT)
    );
}

#[tokio::test]
async fn test_commands_are_case_insensitive() {
    let mut session = create_session();
    let out = run_script(&mut session, "  HeLp  \nexit\n").await;

    assert!(out.contains("Welcome to the Pokedex!"));
    assert!(out.contains("mapb: Shows the previous 20 location areas"));
}

#[tokio::test]
async fn test_explore_from_cache() {
    let mut session = create_session();
    let url = session.client().location_area_url("eterna-city-area").unwrap();
    session.client().cache().add(
        url,
        r#"{"id":2,"name":"eterna-city-area","pokemon_encounters":[{"pokemon":{"name":"gastly","url":"p"}}]}"#,
    );

    let out = run_script(&mut session, "explore Eterna-City-Area\nexit\n").await;

    assert!(out.contains("Exploring eterna-city-area...\nFound Pokemon:\n - gastly\n"));
}

#[tokio::test]
async fn test_failed_command_keeps_loop_running() {
    let mut session = create_session();
    let url = session.client().pokemon_url("glitch").unwrap();
    session.client().cache().add(url, "{}");

    let out = run_script(&mut session, "catch glitch\npokedex\nexit\n").await;

    assert!(out.contains("Error: Failed to decode response"));
    assert!(out.contains("Your Pokedex is empty."));
    assert!(out.ends_with("Closing the Pokedex... Goodbye!\n"));
}

#[tokio::test]
async fn test_path_like_names_are_rejected() {
    let mut session = create_session();

    let out = run_script(&mut session, "explore ../pokemon/pikachu\nexit\n").await;

    assert!(out.contains("Error: Invalid resource name: ../pokemon/pikachu"));
    assert!(session.client().cache().is_empty());
}
