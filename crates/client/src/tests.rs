use super::*;
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use elixoids_engine::{BotState, EngineConfig, EntityId, FixedClock, NoJitter, TargetingEngine};
use rand::SeedableRng;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

fn test_pilot() -> Pilot<NoJitter, FixedClock> {
    let engine =
        TargetingEngine::with_sources(EngineConfig::default(), NoJitter, FixedClock(0)).unwrap();
    Pilot::new("TST", engine)
}

fn parse(args: &[&str]) -> Result<Settings, SettingsError> {
    let mut argv = vec!["elixoids-bot", "--server", "arena:9000"];
    argv.extend_from_slice(args);
    Settings::from_args(Args::try_parse_from(argv).unwrap())
}

/// In-process stand-in for the game server: pushes a fixed script of
/// frames to every ship that connects, collects the replies until the ship
/// goes quiet, then closes (or, when `abrupt`, drops the socket).
#[derive(Clone, Default)]
struct Arena {
    frames: Arc<Vec<String>>,
    replies: Arc<Mutex<Vec<String>>>,
    tags: Arc<Mutex<Vec<String>>>,
    abrupt: bool,
}

const QUIET: Duration = Duration::from_millis(300);

impl Arena {
    fn new(frames: &[&str]) -> Self {
        Self {
            frames: Arc::new(frames.iter().map(|f| f.to_string()).collect()),
            ..Self::default()
        }
    }

    async fn play(self, mut socket: WebSocket, tag: String) {
        self.tags.lock().unwrap().push(tag);
        for frame in self.frames.iter() {
            if socket.send(WsMessage::Text(frame.clone().into())).await.is_err() {
                return;
            }
        }
        while let Ok(Some(Ok(msg))) = tokio::time::timeout(QUIET, socket.recv()).await {
            if let WsMessage::Text(t) = msg {
                self.replies.lock().unwrap().push(t.as_str().to_owned());
            }
        }
        if self.abrupt {
            return;
        }
        let _ = socket.send(WsMessage::Close(None)).await;
    }

    async fn serve(&self) -> SocketAddr {
        let app = Router::new()
            .route("/{game}/ship/{tag}", get(ship_socket))
            .route("/news", get(news_socket))
            .with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn replies(&self) -> Vec<serde_json::Value> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .map(|r| serde_json::from_str(r).unwrap())
            .collect()
    }
}

async fn ship_socket(
    ws: WebSocketUpgrade,
    Path((_game, tag)): Path<(u32, String)>,
    State(arena): State<Arena>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| arena.play(socket, tag))
}

async fn news_socket(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|mut socket| async move {
        let _ = socket
            .send(WsMessage::Text("KAZ shot ABC\n\nABC joined".to_string().into()))
            .await;
        let _ = socket.send(WsMessage::Text("XYZ left".to_string().into())).await;
        let _ = socket.send(WsMessage::Close(None)).await;
    })
}

#[test]
fn pilot_replies_with_both_fields() {
    let mut pilot = test_pilot();
    let reply = pilot
        .on_frame(r#"{"theta":0.0,"rocks":[[1,0.05,2.0,10.0]]}"#)
        .unwrap();
    let cmd: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(cmd["fire"], true);
    assert!((cmd["theta"].as_f64().unwrap() - 0.05).abs() < 1e-12);
    assert_eq!(pilot.state(), &BotState::Tracking(EntityId::from(1)));
}

#[test]
fn pilot_drops_malformed_frames_without_touching_state() {
    let mut pilot = test_pilot();
    pilot.on_frame(r#"{"theta":0.0,"rocks":[[5,1.0,2.0,10.0]]}"#);
    let before = pilot.state().clone();

    assert_eq!(pilot.on_frame("{not json"), None);
    assert_eq!(pilot.on_frame(r#"{"rocks":[]}"#), None);
    assert_eq!(pilot.on_frame(r#"{"theta":0.0,"rocks":[[1]]}"#), None);
    assert_eq!(pilot.state(), &before);
}

#[test]
fn connect_resets_tracking() {
    let mut pilot = test_pilot();
    pilot.on_frame(r#"{"theta":0.0,"rocks":[[5,1.0,2.0,10.0]]}"#);
    assert_ne!(pilot.state(), &BotState::NoTarget);
    pilot.on_connect();
    assert_eq!(pilot.state(), &BotState::NoTarget);
}

#[test]
fn settings_from_command_line() {
    let s = parse(&["kaz", "--mode", "hunter", "--select", "largest", "--game", "3"]).unwrap();
    assert_eq!(s.tag, "KAZ");
    assert_eq!(s.ship_url, "ws://arena:9000/3/ship/KAZ");
    assert_eq!(s.engine.mode, elixoids_engine::Mode::Hunter);
    assert_eq!(s.engine.selection, elixoids_engine::Selection::Largest);
    assert_eq!(s.retry, RetryPolicy::default());

    let s = parse(&["--patrol", "clock", "--fire-scope", "selected"]).unwrap();
    assert_eq!(s.tag.len(), 3);
    assert!(s.tag.bytes().all(|b| b.is_ascii_uppercase()));
    assert_eq!(s.engine.patrol, elixoids_engine::PatrolPolicy::ClockHand);
}

#[test]
fn bad_settings_are_fatal() {
    assert!(matches!(parse(&["TOOLONG"]), Err(SettingsError::Tag(_))));
    assert!(matches!(parse(&["a-b"]), Err(SettingsError::Tag(_))));
    assert!(matches!(
        parse(&["--tolerance", "0"]),
        Err(SettingsError::Engine(_))
    ));
    assert!(matches!(
        parse(&["--jitter", "0.9"]),
        Err(SettingsError::Engine(_))
    ));
    assert!(matches!(
        parse(&["--retries", "0"]),
        Err(SettingsError::NoAttempts)
    ));
}

#[test]
fn random_tags_are_three_letters() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let tag = settings::random_tag(&mut rng);
        assert_eq!(tag.len(), 3);
        assert!(tag.bytes().all(|b| b.is_ascii_uppercase()));
    }
}

#[tokio::test]
async fn one_command_per_usable_frame() {
    let arena = Arena::new(&[
        r#"{"theta":0.0,"rocks":[[1,0.05,2.0,10.0]]}"#,
        "garbage",
        r#"{"rocks":[[1,0.05,2.0,10.0]]}"#,
        r#"{"theta":3.0,"rocks":[]}"#,
    ]);
    let addr = arena.serve().await;
    let mut pilot = test_pilot();

    fly(&format!("ws://{addr}/0/ship/TST"), &mut pilot)
        .await
        .unwrap();

    let replies = arena.replies();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["fire"], true);
    assert_eq!(replies[1]["fire"], false);
    assert!((replies[1]["theta"].as_f64().unwrap() - 3.1).abs() < 1e-12);
    assert_eq!(arena.tags.lock().unwrap().as_slice(), ["TST"]);
    assert_eq!(pilot.state(), &BotState::NoTarget);
    assert_eq!(pilot.last_disconnect(), Some(""));
}

#[tokio::test]
async fn reconnects_until_budget_is_spent() {
    let arena = Arena::new(&[r#"{"theta":0.0,"ships":[["KAZ",0.0,5.0]]}"#]);
    let addr = arena.serve().await;
    let mut pilot = test_pilot();
    let retry = RetryPolicy {
        attempts: 3,
        interval: Duration::from_millis(10),
    };

    let err = run_ship(&format!("ws://{addr}/0/ship/TST"), &mut pilot, retry)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::RetriesExhausted { attempts: 3 }));
    assert_eq!(arena.tags.lock().unwrap().len(), 3);
    assert_eq!(arena.replies().len(), 3);
    assert_eq!(pilot.last_disconnect(), Some(""));
}

#[tokio::test]
async fn dropped_connection_still_reaches_the_pilot() {
    let arena = Arena {
        abrupt: true,
        ..Arena::new(&[r#"{"theta":1.0,"rocks":[[1,1.0,2.0,10.0]]}"#])
    };
    let addr = arena.serve().await;
    let mut pilot = test_pilot();

    let res = fly(&format!("ws://{addr}/0/ship/TST"), &mut pilot).await;

    assert!(res.is_err());
    assert_eq!(arena.replies().len(), 1);
    let reason = pilot.last_disconnect().unwrap();
    assert_eq!(reason, res.unwrap_err().to_string());
}

#[tokio::test]
async fn unreachable_server_counts_as_an_attempt() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut pilot = test_pilot();
    let retry = RetryPolicy {
        attempts: 1,
        interval: Duration::from_millis(1),
    };
    let err = run_ship(&format!("ws://{addr}/0/ship/TST"), &mut pilot, retry)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::RetriesExhausted { attempts: 1 }));
}

#[tokio::test]
async fn news_lines_are_forwarded() {
    let arena = Arena::default();
    let addr = arena.serve().await;
    let mut lines = Vec::new();

    run_news(&format!("ws://{addr}/news"), |line| lines.push(line.to_string()))
        .await
        .unwrap();

    assert_eq!(lines, ["KAZ shot ABC", "ABC joined", "XYZ left"]);
}
