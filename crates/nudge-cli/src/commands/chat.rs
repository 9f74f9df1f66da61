//! Console chat transport.
//!
//! A line-oriented stand-in for the real chat platform: stdin lines become
//! inbound events, replies and their keyboards are printed to stdout.

use super::{build_extractor, open_store};
use anyhow::Result;
use nudge_application::event::{
    BTN_ADD, BTN_CANCEL, BTN_CLEAR, BTN_HELP, BTN_LIST, BTN_SMART, CB_CANCEL_CLEAR,
    CB_CONFIRM_CLEAR,
};
use nudge_application::{Controller, Inbound, Keyboard, Reply, UserCommand};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

pub async fn run(owner: i64, db: Option<&Path>) -> Result<()> {
    let tasks = open_store(db)?;
    let extractor = Arc::new(build_extractor());
    if !extractor.is_configured() {
        println!("(smart add is unavailable without an OpenAI credential)");
    }
    let controller = Controller::new(tasks, extractor);

    for reply in controller
        .handle(owner, Inbound::command(UserCommand::Start))
        .await
    {
        render(&reply);
    }

    let stdin = std::io::stdin();
    let mut awaiting_confirm = false;

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        let event = parse_line(line, awaiting_confirm);
        let replies = controller.handle(owner, event).await;
        awaiting_confirm = replies
            .iter()
            .any(|reply| reply.keyboard == Keyboard::ConfirmClear);
        for reply in &replies {
            render(reply);
        }
    }

    Ok(())
}

fn parse_line(line: &str, awaiting_confirm: bool) -> Inbound {
    if awaiting_confirm {
        match line.to_lowercase().as_str() {
            "yes" => return Inbound::callback(CB_CONFIRM_CLEAR),
            "no" => return Inbound::callback(CB_CANCEL_CLEAR),
            _ => {}
        }
    }

    match line {
        "/start" => Inbound::command(UserCommand::Start),
        "/help" => Inbound::command(UserCommand::Help),
        text => Inbound::text(text),
    }
}

fn render(reply: &Reply) {
    println!("{}", reply.text);
    match reply.keyboard {
        Keyboard::MainMenu => {
            println!("[{BTN_ADD}] [{BTN_LIST}] [{BTN_SMART}] [{BTN_CLEAR}] [{BTN_HELP}]");
        }
        Keyboard::CancelOnly => println!("[{BTN_CANCEL}]"),
        Keyboard::ConfirmClear => {
            println!("Type \"yes\" to delete everything or \"no\" to keep your tasks.");
        }
        Keyboard::None => {}
    }
    println!();
}
