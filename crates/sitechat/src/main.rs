//! A terminal front end for the sitechat widget.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use sitechat::core::{ChatWidget, SubmitOutcome};
use sitechat::create_session;
use tokio::io::{self, AsyncBufReadExt};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut widget = ChatWidget::mount(create_session());
    if let Some(banner) = widget.banner() {
        // Fatal configuration failure: the widget accepts no input.
        eprintln!("{}", banner.bright_red());
        return;
    }

    for msg in widget.transcript().messages() {
        print_reply(msg.text());
    }

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        let outcome = widget.submit(line).await;

        progress_bar.finish_and_clear();

        match outcome {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Replied | SubmitOutcome::Fallback => {
                if let Some(reply) = widget.transcript().messages().last() {
                    print_reply(reply.text());
                }
                if let Some(banner) = widget.banner() {
                    println!(
                        "{}⚠️  {}",
                        BAR_CHAR.bright_yellow(),
                        banner.bright_yellow()
                    );
                }
            }
        }
    }
}

fn print_reply(text: &str) {
    println!("{}🤖 {}", BAR_CHAR.bright_cyan(), text.bright_white());
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
