use crate::{Error, Result, backend::SectionKind};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  predict [name=value ...]   submit the form, overriding configured defaults
  assess                     ask GreenyBot why the building got its rating
  section <kind>             strengths | improvements | benefits | next_steps
  chat <question>            ask GreenyBot a question
  toggle-chat                open or close the chat widget
  close-chat                 close the chat widget
  health                     check the backend
  show                       print the current page
  help                       show this message
  quit                       exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Predict { overrides: Vec<(String, String)> },
    Assess,
    Section(SectionKind),
    Chat(String),
    ToggleChat,
    CloseChat,
    Health,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        match verb {
            "predict" => {
                let overrides = rest
                    .split_whitespace()
                    .map(|pair| {
                        pair.split_once('=')
                            .filter(|(name, _)| !name.is_empty())
                            .map(|(name, value)| (name.to_string(), value.to_string()))
                            .ok_or_else(|| {
                                Error::config(format!("Expected name=value, got '{}'", pair))
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Command::Predict { overrides })
            }
            "assess" => Ok(Command::Assess),
            "section" => Ok(Command::Section(rest.parse()?)),
            // Empty questions are passed through; the controller ignores them.
            "chat" => Ok(Command::Chat(rest.to_string())),
            "toggle-chat" => Ok(Command::ToggleChat),
            "close-chat" => Ok(Command::CloseChat),
            "health" => Ok(Command::Health),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(Error::config(format!(
                "Unknown command '{}'. Type 'help' for a list.",
                other
            ))),
        }
    }
}
