//! Interactive chat session.
//!
//! Reads from stdin, writes to stdout. `/image <path> [question]` attaches
//! an image to the turn; `exit`, `quit`, or Ctrl+D ends the session. While
//! a turn is in flight the progress ticker's status line is shown in place.

use std::io::Write as _;

use tokio::io::{self, AsyncBufReadExt, BufReader};

use algomentor_config::AppConfig;
use algomentor_core::error::SessionError;
use algomentor_core::extractor::ImageInput;
use algomentor_core::message::SessionId;
use algomentor_session::{ProgressTicker, TurnEngine};

use super::{build_engine, load_image};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config);
    let session = SessionId::new();

    println!("Hi, welcome to the Data Structures and Algorithms assistant.");
    println!("What is your query? (/image <path> [question] to attach an image, 'exit' to quit)");

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF (Ctrl+D)
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if matches!(line.as_str(), "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        let (text, image) = parse_line(&line);
        run_turn(&engine, &session, &text, image).await;
    }

    Ok(())
}

/// Split a `/image <path> [question]` line into its parts.
fn parse_line(line: &str) -> (String, Option<ImageInput>) {
    let Some(rest) = line.strip_prefix("/image") else {
        return (line.to_string(), None);
    };

    let rest = rest.trim_start();
    let (path, question) = match rest.split_once(char::is_whitespace) {
        Some((path, question)) => (path, question.trim().to_string()),
        None => (rest, String::new()),
    };

    if path.is_empty() {
        eprintln!("Usage: /image <path> [question]");
        return (String::new(), None);
    }

    (question, load_image(std::path::Path::new(path)))
}

/// Run one turn, showing the elapsed-time status line while waiting.
async fn run_turn(engine: &TurnEngine, session: &SessionId, text: &str, image: Option<ImageInput>) {
    let (mut rx, guard) = ProgressTicker::spawn();

    let turn = engine.handle_turn(session, text, image);
    tokio::pin!(turn);

    let result = loop {
        tokio::select! {
            result = &mut turn => break result,
            changed = rx.changed() => {
                if changed.is_ok() {
                    print!("\r{}", rx.borrow().clone());
                    let _ = std::io::stdout().flush();
                }
            }
        }
    };
    drop(guard);
    print!("\r");

    match result {
        Ok(outcome) => println!("{}\n", outcome.reply),
        Err(SessionError::EmptyInput) => {
            println!("Please type a question or attach an image.\n");
        }
        Err(e) => println!("An error occurred while processing your request: {e}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_has_no_image() {
        let (text, image) = parse_line("What is a stack?");
        assert_eq!(text, "What is a stack?");
        assert!(image.is_none());
    }

    #[test]
    fn image_line_without_question() {
        // File does not exist, so the image side is None, but the parse
        // still yields an empty question rather than the raw command.
        let (text, _image) = parse_line("/image /nonexistent/diagram.png");
        assert!(text.is_empty());
    }

    #[test]
    fn image_line_with_question() {
        let (text, _image) = parse_line("/image /nonexistent/code.png what does this do?");
        assert_eq!(text, "what does this do?");
    }
}
