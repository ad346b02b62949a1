//! `thermowise chat`: interactive question loop on stdin.

use std::io::Write;

use thermowise_agent::{sample_questions, Session};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use super::{build_session, describe_dataset, load_config, GlobalOpts};

/// What a line of input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Clear,
    History,
    Samples,
    Skip,
    Question(&'a str),
}

fn parse_line(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Skip,
        "exit" | "quit" | "/exit" | "/quit" => Input::Quit,
        "/clear" => Input::Clear,
        "/history" => Input::History,
        "/samples" => Input::Samples,
        question => Input::Question(question),
    }
}

fn print_history(session: &Session) {
    if session.history().is_empty() {
        println!("  (no messages yet)");
        return;
    }
    for message in session.history() {
        println!(
            "  [{}] {}: {}",
            message.timestamp.format("%H:%M:%S"),
            message.role,
            message.content
        );
    }
}

pub async fn run(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(opts)?;
    let (mut session, info) = build_session(opts, &config)?;

    println!();
    println!("  Thermowise: smart thermostat assistant");
    println!();
    println!("  Service:  {}", config.service.base_url);
    println!("  Model:    {}", config.service.model);
    println!("  Dataset:  {}", describe_dataset(info.as_ref()));
    println!();
    println!("  Commands: /samples, /history, /clear, exit");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Input::Quit => break,
            Input::Skip => {}
            Input::Clear => {
                session.clear_conversation();
                println!("  Conversation cleared.");
            }
            Input::History => print_history(&session),
            Input::Samples => {
                for (i, q) in sample_questions().iter().enumerate() {
                    println!("  {}. {q}", i + 1);
                }
            }
            Input::Question(question) => {
                eprint!("  ...");
                let answer = session.submit_question(question).await;
                eprint!("\r     \r");
                println!();
                for line in answer.lines() {
                    println!("  Assistant > {line}");
                }
                println!();
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_commands() {
        assert_eq!(parse_line("  exit "), Input::Quit);
        assert_eq!(parse_line("/quit"), Input::Quit);
        assert_eq!(parse_line("/clear"), Input::Clear);
        assert_eq!(parse_line("/history"), Input::History);
        assert_eq!(parse_line("/samples"), Input::Samples);
        assert_eq!(parse_line("   "), Input::Skip);
    }

    #[test]
    fn anything_else_is_a_question() {
        assert_eq!(
            parse_line(" What temp at night? \n"),
            Input::Question("What temp at night?")
        );
        assert_eq!(parse_line("/unknown"), Input::Question("/unknown"));
    }
}
