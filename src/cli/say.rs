//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};

use crate::core::chat_exchange::ChatTransport;
use crate::core::controller::{ChatController, DetachedView};
use crate::core::language::Language;
use crate::core::message::Message;
use crate::core::session::ChatSession;

/// Runs a single exchange and returns the assistant message it produced,
/// or `None` if the prompt was blank.
pub async fn say_once<T>(prompt: &str, language: Language, transport: &T) -> Option<Message>
where
    T: ChatTransport + ?Sized,
{
    let mut controller = ChatController::new(ChatSession::new(language), DetachedView);
    if !controller.exchange(prompt, language, transport).await {
        return None;
    }
    controller.transcript().last().cloned()
}

pub async fn run_say<T>(
    prompt: Vec<String>,
    language: Language,
    transport: &T,
) -> Result<(), Box<dyn Error>>
where
    T: ChatTransport + ?Sized,
{
    let prompt = prompt.join(" ");
    let Some(reply) = say_once(&prompt, language, transport).await else {
        eprintln!("Usage: khet-chat say <prompt>");
        std::process::exit(1);
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", reply.content)?;
    stdout.flush()?;
    Ok(())
}
