use crate::cli::ChatArgs;
use crate::display;
use crate::error::Result;
use matsci::engine::chat::{ChatEvent, ChatSession, SUGGESTED_QUESTIONS};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const CLEAR_COMMAND: &str = "/clear";
const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

pub async fn run(args: ChatArgs) -> Result<()> {
    let mut session = ChatSession::new();
    for message in session.messages() {
        println!("{}", display::chat_message(message));
    }

    if !args.messages.is_empty() {
        for message in &args.messages {
            let (next, lines) = exchange(session, message);
            session = next;
            lines.iter().for_each(|line| println!("{line}"));
        }
        return Ok(());
    }

    println!("\nTry asking:");
    for question in SUGGESTED_QUESTIONS {
        println!("  - {question}");
    }
    println!("Type {CLEAR_COMMAND} to reset the conversation, /quit to leave.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if QUIT_COMMANDS.contains(&input) {
            break;
        }
        let (next, output) = exchange(session, input);
        session = next;
        output.iter().for_each(|line| println!("{line}"));
    }
    debug!(messages = session.messages().len(), "Chat session closed");
    Ok(())
}

/// Feeds one line of input to the session and returns the lines to print.
/// Blank input prints nothing.
pub fn exchange(session: ChatSession, input: &str) -> (ChatSession, Vec<String>) {
    let (session, first_new) = if input.trim() == CLEAR_COMMAND {
        (session.apply(ChatEvent::Clear), 0)
    } else {
        let before = session.messages().len();
        (session.apply(ChatEvent::Send(input.to_string())), before)
    };
    let lines = session.messages()[first_new..]
        .iter()
        .map(display::chat_message)
        .collect();
    (session, lines)
}
