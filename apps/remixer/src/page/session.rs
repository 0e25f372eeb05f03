//! Remix Page state.
//!
//! `RemixPage` owns every piece of session state and the prompt repository.
//! Each collection change is written through in full before the call returns.

use tracing::{error, info, warn};

use crate::library::{PromptRepository, RepositoryError};
use crate::models::prompt::{Prompt, DEFAULT_PROMPT_ID};
use crate::page::client::{ClientError, RemixApi};
use crate::page::clipboard::Clipboard;
use crate::remix::handlers::RemixRequest;
use crate::remix::prompts::DEFAULT_INSTRUCTION;

/// Shown to the user whenever a remix call fails, whatever the cause.
pub const REMIX_FAILED_MESSAGE: &str = "Failed to remix content. Please try again.";

/// Output length past which the counter shows a warning. Informational only.
pub const OUTPUT_SOFT_LIMIT: usize = 280;

/// Fields of the open "create prompt" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptDraft {
    pub name: String,
    pub content: String,
}

impl PromptDraft {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.content.is_empty()
    }
}

pub struct RemixPage {
    repository: Box<dyn PromptRepository>,
    input: String,
    output: String,
    is_loading: bool,
    error: String,
    current_prompt: String,
    selected_prompt_id: String,
    saved_prompts: Vec<Prompt>,
    draft: Option<PromptDraft>,
}

impl RemixPage {
    /// Builds the page and loads the saved prompt collection.
    ///
    /// Unreadable or malformed stored data leaves the library empty.
    pub fn load(repository: Box<dyn PromptRepository>) -> Self {
        let saved_prompts = match repository.load_all() {
            Ok(prompts) => prompts,
            Err(RepositoryError::Malformed(e)) => {
                warn!("Ignoring malformed saved prompts: {e}");
                Vec::new()
            }
            Err(e) => {
                warn!("Could not read saved prompts: {e}");
                Vec::new()
            }
        };
        info!("Loaded {} saved prompt(s)", saved_prompts.len());

        Self {
            repository,
            input: String::new(),
            output: String::new(),
            is_loading: false,
            error: String::new(),
            current_prompt: DEFAULT_INSTRUCTION.to_string(),
            selected_prompt_id: DEFAULT_PROMPT_ID.to_string(),
            saved_prompts,
            draft: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn current_prompt(&self) -> &str {
        &self.current_prompt
    }

    pub fn selected_prompt_id(&self) -> &str {
        &self.selected_prompt_id
    }

    pub fn saved_prompts(&self) -> &[Prompt] {
        &self.saved_prompts
    }

    pub fn draft(&self) -> Option<&PromptDraft> {
        self.draft.as_ref()
    }

    /// Every selectable prompt, built-in first.
    pub fn pills(&self) -> Vec<Prompt> {
        std::iter::once(Prompt::builtin())
            .chain(self.saved_prompts.iter().cloned())
            .collect()
    }

    // ── Editing ─────────────────────────────────────────────────────────────

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Appends a line to the input, separated by a newline.
    pub fn append_input(&mut self, line: &str) {
        if !self.input.is_empty() {
            self.input.push('\n');
        }
        self.input.push_str(line);
    }

    /// Input length as a browser would count it (UTF-16 code units).
    pub fn input_len(&self) -> usize {
        utf16_len(&self.input)
    }

    pub fn output_len(&self) -> usize {
        utf16_len(&self.output)
    }

    pub fn output_over_limit(&self) -> bool {
        self.output_len() > OUTPUT_SOFT_LIMIT
    }

    // ── Prompt library ──────────────────────────────────────────────────────

    /// Selects a prompt and makes its instruction current.
    /// Returns false if no prompt has that id.
    pub fn select_prompt(&mut self, id: &str) -> bool {
        let content = if id == DEFAULT_PROMPT_ID {
            DEFAULT_INSTRUCTION.to_string()
        } else {
            match self.saved_prompts.iter().find(|p| p.id == id) {
                Some(prompt) => prompt.content.clone(),
                None => return false,
            }
        };

        self.selected_prompt_id = id.to_string();
        self.current_prompt = content;
        true
    }

    /// Opens the create dialog with the current instruction pre-filled.
    pub fn open_create_dialog(&mut self) {
        self.draft = Some(PromptDraft {
            name: String::new(),
            content: self.current_prompt.clone(),
        });
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.name = name.into();
        }
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.content = content.into();
        }
    }

    /// Whether the dialog's Save control is enabled.
    pub fn can_save(&self) -> bool {
        self.draft.as_ref().is_some_and(PromptDraft::is_complete)
    }

    /// Saves the draft as a new prompt, selects it and closes the dialog.
    /// Does nothing while either draft field is empty.
    pub fn save_draft(&mut self) -> Option<&Prompt> {
        if !self.can_save() {
            return None;
        }
        let draft = self.draft.take()?;

        let prompt = Prompt::new(draft.name, draft.content);
        self.selected_prompt_id = prompt.id.clone();
        self.current_prompt = prompt.content.clone();
        self.saved_prompts.push(prompt);
        self.persist();

        self.saved_prompts.last()
    }

    pub fn cancel_dialog(&mut self) {
        self.draft = None;
    }

    /// Removes a saved prompt. Deleting the selected prompt falls back to the
    /// default. The built-in prompt cannot be deleted.
    pub fn delete_prompt(&mut self, id: &str) -> bool {
        let Some(index) = self.saved_prompts.iter().position(|p| p.id == id) else {
            return false;
        };

        self.saved_prompts.remove(index);
        self.persist();

        if self.selected_prompt_id == id {
            self.selected_prompt_id = DEFAULT_PROMPT_ID.to_string();
            self.current_prompt = DEFAULT_INSTRUCTION.to_string();
        }
        true
    }

    fn persist(&self) {
        if let Err(e) = self.repository.save_all(&self.saved_prompts) {
            error!("Failed to save prompts: {e}");
        }
    }

    // ── Remix ───────────────────────────────────────────────────────────────

    /// Whether the Remix control is enabled.
    pub fn can_remix(&self) -> bool {
        !self.input.is_empty() && !self.is_loading
    }

    /// Marks a remix as in flight and returns the request to send.
    /// Returns `None` when remixing is disabled.
    pub fn begin_remix(&mut self) -> Option<RemixRequest> {
        if !self.can_remix() {
            return None;
        }

        self.is_loading = true;
        self.error.clear();

        Some(RemixRequest {
            content: self.input.clone(),
            prompt: Some(self.current_prompt.clone()),
        })
    }

    /// Applies the outcome of the in-flight remix. Failures keep the previous
    /// output.
    pub fn finish_remix(&mut self, result: Result<String, ClientError>) {
        match result {
            Ok(message) => self.output = message,
            Err(e) => {
                error!("Remix failed: {e}");
                self.error = REMIX_FAILED_MESSAGE.to_string();
            }
        }
        self.is_loading = false;
    }

    /// Runs one remix end to end. No-op when remixing is disabled.
    pub async fn remix(&mut self, api: &dyn RemixApi) {
        if let Some(request) = self.begin_remix() {
            let result = api.remix(&request).await;
            self.finish_remix(result);
        }
    }

    /// Copies the output to the clipboard. Failures are only logged.
    pub fn copy_output(&self, clipboard: &mut dyn Clipboard) {
        if let Err(e) = clipboard.write_text(&self.output) {
            error!("Failed to copy text: {e}");
        }
    }
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
