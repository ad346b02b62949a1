//! `thermowise ask`: answer a single question.

use super::{build_session, load_config, GlobalOpts};

pub async fn run(opts: &GlobalOpts, question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(opts)?;
    let (mut session, _) = build_session(opts, &config)?;

    eprint!("  Thinking...");
    let answer = session.submit_question(question).await;
    eprint!("\r              \r");
    println!("{answer}");

    Ok(())
}
