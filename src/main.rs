use std::thread;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use starquery::{
    GameConfig, HistoryEntry, LevelState, MissionError, SceneObserver, SceneSignal,
    SessionController, SessionError,
};
use tracing_subscriber::EnvFilter;

/// Text stand-in for the scene renderer: one status line per signal.
struct StatusLine;

impl SceneObserver for StatusLine {
    fn on_signal(&mut self, signal: SceneSignal) {
        let status = match signal.state {
            LevelState::Idle => "standing by",
            LevelState::Success => "beacon green",
            LevelState::Error => "beacon red",
        };
        println!("[mission {}: {}]", signal.mission_id, status);
    }
}

/// JSON stand-in for the scene renderer: one `{"signal": ..}` document per signal.
struct SignalJson;

impl SceneObserver for SignalJson {
    fn on_signal(&mut self, signal: SceneSignal) {
        println!("{}", signal_document(signal));
    }
}

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let mut session = SessionController::new()?;
    if config.json_view {
        session.set_observer(Box::new(SignalJson));
    } else {
        session.set_observer(Box::new(StatusLine));
    }
    let mut editor = DefaultEditor::new()?;
    show_mission(&session, config.json_view)?;

    loop {
        let initial = session.preserved_input().unwrap_or_default().to_string();
        let line = match editor.readline_with_initial("query> ", (initial.as_str(), "")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        };
        let input = line.trim();
        if !input.is_empty() {
            editor.add_history_entry(input)?;
        }

        match input {
            ":quit" | ":q" => break,
            ":hint" => println!("{}", session.reveal_extra_hint()),
            ":history" => {
                for entry in session.history() {
                    print_entry(entry);
                }
            }
            ":next" => match session.advance() {
                Ok(()) => show_mission(&session, config.json_view)?,
                Err(SessionError::MissionNotComplete) => {
                    println!("Complete the current mission first.");
                }
                Err(SessionError::Mission(MissionError::CampaignComplete)) => {
                    println!("That was the final mission. Type :quit to leave.");
                }
                Err(error) => return Err(error.into()),
            },
            _ => {
                // Input is blocked while the transmission is in flight.
                println!("Transmitting...");
                thread::sleep(config.pacing);
                session.submit(&line)?;
                show_outcome(&session, config.json_view)?;
            }
        }
    }
    Ok(())
}

fn show_mission(session: &SessionController, json_view: bool) -> Result<()> {
    if json_view {
        println!("{}", serde_json::to_string(&session.view())?);
        return Ok(());
    }
    let view = session.view();
    println!();
    println!(
        "== Mission {}/{}: {} ==",
        view.mission.index + 1,
        view.mission.total,
        view.mission.title
    );
    println!("{}", view.mission.briefing);
    println!("Hint: {}", view.mission.hint);
    println!("Example shape: {}", view.mission.placeholder);
    println!("Commands: :hint  :next  :history  :quit");
    Ok(())
}

fn show_outcome(session: &SessionController, json_view: bool) -> Result<()> {
    let view = session.view();
    if json_view {
        println!("{}", serde_json::to_string(&view)?);
        return Ok(());
    }
    if let Some(result) = &view.result {
        println!("{result}");
    }
    if let Some(error) = &view.error {
        println!("! {error}");
    }
    if let Some(entry) = session.history().next() {
        print_entry(entry);
    }
    if let Some(text) = &view.success_text {
        println!("{text}");
        if view.campaign_complete {
            println!("Campaign complete. Type :quit to leave.");
        } else {
            println!("Type :next for the next mission.");
        }
    }
    Ok(())
}

fn print_entry(entry: &HistoryEntry) {
    println!("{}", entry_line(entry));
}

fn entry_line(entry: &HistoryEntry) -> String {
    format!("{:<9} {}  ->  {}", entry.statement.as_str(), entry.query, entry.outcome)
}

fn signal_document(signal: SceneSignal) -> serde_json::Value {
    serde_json::json!({ "signal": signal })
}
