use crate::error::TransportError;
use crate::pilot::Pilot;
use crate::settings::RetryPolicy;
use elixoids_engine::{Clock, Jitter};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::{connect_async, WebSocketStream};
use tokio_tungstenite::tungstenite::Message;

/// Flies the ship until the retry budget is spent.
///
/// Every session that ends, cleanly or not, uses up one attempt; the
/// pilot's state is reset on each reconnect.
pub async fn run_ship<J: Jitter, C: Clock>(
    url: &str,
    pilot: &mut Pilot<J, C>,
    retry: RetryPolicy,
) -> Result<(), TransportError> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        if let Err(e) = fly(url, pilot).await {
            tracing::warn!(tag = pilot.tag(), attempt = attempts, "session failed: {e}");
        }
        if attempts >= retry.attempts {
            return Err(TransportError::RetriesExhausted { attempts });
        }
        tokio::time::sleep(retry.interval).await;
    }
}

/// One connection: one decision per inbound frame, sent before the next
/// frame is read. The pilot hears about every way the session can end.
pub async fn fly<J: Jitter, C: Clock>(
    url: &str,
    pilot: &mut Pilot<J, C>,
) -> Result<(), TransportError> {
    let (ws, _) = connect_async(url).await?;
    pilot.on_connect();

    match exchange(ws, pilot).await {
        Ok((code, reason)) => {
            pilot.on_disconnect(code, &reason);
            Ok(())
        }
        Err(e) => {
            pilot.on_disconnect(None, &e.to_string());
            Err(e)
        }
    }
}

async fn exchange<S, J: Jitter, C: Clock>(
    ws: WebSocketStream<S>,
    pilot: &mut Pilot<J, C>,
) -> Result<(Option<u16>, String), TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (mut tx, mut rx) = ws.split();

    while let Some(msg) = rx.next().await {
        match msg? {
            Message::Text(text) => {
                if let Some(reply) = pilot.on_frame(text.as_str()) {
                    tx.send(Message::Text(reply.into())).await?;
                }
            }
            Message::Close(frame) => {
                return Ok(match frame {
                    Some(f) => (Some(u16::from(f.code)), f.reason.to_string()),
                    None => (None, String::new()),
                });
            }
            _ => {}
        }
    }

    Ok((None, "stream ended".to_string()))
}

/// Streams the news socket, handing every non-empty line to `on_line`.
pub async fn run_news(url: &str, mut on_line: impl FnMut(&str)) -> Result<(), TransportError> {
    let (mut ws, _) = connect_async(url).await?;
    tracing::info!(url, "listening to news");

    while let Some(msg) = ws.next().await {
        match msg? {
            Message::Text(text) => {
                for line in text.as_str().lines().filter(|l| !l.is_empty()) {
                    on_line(line);
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    tracing::info!("news closed");
    Ok(())
}
