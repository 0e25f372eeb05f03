//! Interactive terminal front end for the Remix Page.

pub mod command;

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::page::client::RemixApi;
use crate::page::clipboard::Clipboard;
use crate::page::session::RemixPage;
use crate::page::view::{input_counter, remix_button, render};
use command::{Command, HELP};

/// Reads commands from `input` until EOF or `quit`, applying each to `page`
/// and writing feedback to `out`.
pub async fn run<R, W>(
    page: &mut RemixPage,
    api: &dyn RemixApi,
    clipboard: &mut dyn Clipboard,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", render(page))?;
    writeln!(out, "Type `help` for commands.")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            command => apply(page, api, clipboard, command, out).await?,
        }
        out.flush()?;
    }

    Ok(())
}

async fn apply<W: Write>(
    page: &mut RemixPage,
    api: &dyn RemixApi,
    clipboard: &mut dyn Clipboard,
    command: Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::SetInput(text) => {
            page.set_input(text);
            show_input_counter(page, out)?;
        }
        Command::AppendInput(line) => {
            page.append_input(&line);
            show_input_counter(page, out)?;
        }
        Command::ClearInput => {
            page.set_input(String::new());
            show_input_counter(page, out)?;
        }
        Command::Remix => {
            let Some(request) = page.begin_remix() else {
                writeln!(out, "{}", remix_button(page))?;
                return Ok(());
            };
            writeln!(out, "{}", remix_button(page))?;
            out.flush()?;
            let result = api.remix(&request).await;
            page.finish_remix(result);
            write!(out, "{}", render(page))?;
        }
        Command::ListPrompts => {
            for prompt in page.pills() {
                let marker = if prompt.id == page.selected_prompt_id() {
                    '*'
                } else {
                    ' '
                };
                writeln!(out, "{marker} {} ({}): {}", prompt.name, prompt.id, prompt.content)?;
            }
        }
        Command::Select(id) => {
            if page.select_prompt(&id) {
                writeln!(out, "Instruction: {}", page.current_prompt())?;
            } else {
                writeln!(out, "No prompt with id '{id}'")?;
            }
        }
        Command::NewPrompt => {
            page.open_create_dialog();
            write!(out, "{}", render(page))?;
        }
        Command::DraftName(name) => {
            if page.draft().is_none() {
                writeln!(out, "No dialog open; type `new` first")?;
            }
            page.set_draft_name(name);
        }
        Command::DraftBody(body) => {
            if page.draft().is_none() {
                writeln!(out, "No dialog open; type `new` first")?;
            }
            page.set_draft_content(body);
        }
        Command::Save => match page.save_draft() {
            Some(prompt) => writeln!(out, "Saved prompt '{}' ({})", prompt.name, prompt.id)?,
            None => writeln!(out, "[Save] (disabled): name and instruction are required")?,
        },
        Command::Cancel => page.cancel_dialog(),
        Command::Delete(id) => {
            if page.delete_prompt(&id) {
                writeln!(out, "Deleted '{id}'")?;
            } else {
                writeln!(out, "No saved prompt with id '{id}'")?;
            }
        }
        Command::Copy => page.copy_output(clipboard),
        Command::Show => write!(out, "{}", render(page))?,
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Unknown(word) => writeln!(out, "Unknown command '{word}'; type `help`")?,
        Command::Quit => {}
    }
    Ok(())
}

fn show_input_counter<W: Write>(page: &RemixPage, out: &mut W) -> Result<()> {
    writeln!(out, "{}", input_counter(page))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::library::MemoryRepository;
    use crate::models::prompt::Prompt;
    use crate::page::client::ClientError;
    use crate::page::clipboard::ClipboardError;
    use crate::remix::handlers::RemixRequest;

    struct UpperApi;

    #[async_trait]
    impl RemixApi for UpperApi {
        async fn remix(&self, request: &RemixRequest) -> Result<String, ClientError> {
            Ok(request.content.to_uppercase())
        }
    }

    #[derive(Default)]
    struct MemoryClipboard(Option<String>);

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0 = Some(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let repo = MemoryRepository::new();
        let mut page = RemixPage::load(Box::new(repo.clone()));
        let mut clipboard = MemoryClipboard::default();
        let mut out = Vec::new();

        let script = "input hello there\n\
                      new\n\
                      name Loud\n\
                      body Shout this:\n\
                      save\n\
                      remix\n\
                      copy\n\
                      quit\n\
                      input never applied\n";

        run(&mut page, &UpperApi, &mut clipboard, script.as_bytes(), &mut out)
            .await
            .unwrap();

        assert_eq!(page.output(), "HELLO THERE");
        assert_eq!(page.input(), "hello there");
        assert_eq!(page.current_prompt(), "Shout this:");
        assert_eq!(clipboard.0.as_deref(), Some("HELLO THERE"));

        let stored: Vec<Prompt> = serde_json::from_str(&repo.raw().unwrap()).unwrap();
        assert_eq!(stored, page.saved_prompts().to_vec());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("11 characters"));
        assert!(text.contains("Saved prompt 'Loud'"));
        assert!(text.contains("11/280 characters"));
    }

    #[tokio::test]
    async fn test_remix_with_empty_input_is_disabled() {
        let mut page = RemixPage::load(Box::new(MemoryRepository::new()));
        let mut out = Vec::new();

        run(
            &mut page,
            &UpperApi,
            &mut MemoryClipboard::default(),
            "remix\n".as_bytes(),
            &mut out,
        )
        .await
        .unwrap();

        assert!(page.output().is_empty());
        assert!(String::from_utf8(out).unwrap().contains("[Remix] (disabled)"));
    }
}
