//! `send` and `pull` subcommands operating on the local chat log.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use imlog_types::message::Message;
use imlog_types::rpc::{PullRequest, SendRequest};

use crate::state::AppState;

/// Append one message and report the outcome.
pub async fn send_message(
    state: &AppState,
    chat: String,
    sender: String,
    text: String,
    send_time: Option<i64>,
    json: bool,
) -> Result<()> {
    let send_time = send_time.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
    let message = Message::new(chat, sender, text, send_time);

    let resp = state
        .service
        .send(SendRequest {
            message: message.clone(),
        })
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
    } else if resp.code == 0 {
        println!();
        println!(
            "  {} Stored message in '{}' at {}",
            style("ok").green(),
            style(&message.chat).cyan(),
            style(message.send_time).dim(),
        );
        println!();
    }

    if resp.code != 0 {
        bail!("send failed ({}): {}", resp.code, resp.msg);
    }
    Ok(())
}

/// Fetch one page and print it as a table.
pub async fn pull_messages(
    state: &AppState,
    chat: String,
    cursor: i64,
    limit: i32,
    reverse: bool,
    json: bool,
) -> Result<()> {
    let resp = state
        .service
        .pull(PullRequest {
            chat: chat.clone(),
            cursor,
            limit,
            reverse: Some(reverse),
        })
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        if !resp.is_success() {
            bail!("pull failed ({}): {}", resp.code, resp.msg);
        }
        return Ok(());
    }

    if !resp.is_success() {
        bail!("pull failed ({}): {}", resp.code, resp.msg);
    }

    if resp.messages.is_empty() {
        println!();
        println!("  No messages in '{}' from {}.", style(&chat).cyan(), cursor);
    } else {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Send time").fg(Color::White),
            Cell::new("Sender").fg(Color::White),
            Cell::new("Text").fg(Color::White),
        ]);
        for msg in &resp.messages {
            table.add_row(vec![
                Cell::new(msg.send_time).fg(Color::DarkGrey),
                Cell::new(&msg.sender).fg(Color::Cyan),
                Cell::new(&msg.text),
            ]);
        }
        println!();
        println!("{table}");
    }

    match (resp.has_more, resp.next_cursor) {
        (true, Some(next)) => println!(
            "  {} more messages; continue with --cursor {}",
            style("…").dim(),
            style(next).yellow()
        ),
        (true, None) => println!("  {} more messages were written during this read", style("…").dim()),
        (false, _) => {}
    }
    println!();

    Ok(())
}
