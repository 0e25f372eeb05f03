/// One line typed at the page prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetInput(String),
    AppendInput(String),
    ClearInput,
    Remix,
    ListPrompts,
    Select(String),
    NewPrompt,
    DraftName(String),
    DraftBody(String),
    Save,
    Cancel,
    Delete(String),
    Copy,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  input <text>    replace the input text
  append <text>   add a line to the input text
  clear           clear the input text
  remix           remix the input with the selected prompt
  prompts         list prompts
  select <id>     select a prompt (\"default\" for the built-in one)
  new             open the create-prompt dialog
  name <text>     set the new prompt's name
  body <text>     set the new prompt's instruction
  save            save the new prompt
  cancel          close the dialog
  delete <id>     delete a saved prompt
  copy            copy the output to the clipboard
  show            redraw the page
  help            show this message
  quit            leave";

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        match word {
            "input" => Command::SetInput(rest.to_string()),
            "append" => Command::AppendInput(rest.to_string()),
            "clear" => Command::ClearInput,
            "remix" => Command::Remix,
            "prompts" => Command::ListPrompts,
            "select" => Command::Select(rest.trim().to_string()),
            "new" => Command::NewPrompt,
            "name" => Command::DraftName(rest.to_string()),
            "body" => Command::DraftBody(rest.to_string()),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "delete" => Command::Delete(rest.trim().to_string()),
            "copy" => Command::Copy,
            "show" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}
