//! The prompt library: saved prompts plus the distinguished system prompt.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Prompt, PRESET_SYSTEM_PROMPTS, SYSTEM_PROMPT_ID, SYSTEM_PROMPT_NAME};

/// Errors from prompt library operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("Prompt name must not be empty")]
    EmptyName,
    #[error("Prompt content must not be empty")]
    EmptyContent,
    #[error("No prompt with id {0}")]
    NotFound(String),
    #[error("The system prompt cannot be deleted")]
    SystemProtected,
    #[error("No preset named {0}")]
    UnknownPreset(String),
}

/// Ordered collection of user prompts plus the system prompt.
///
/// The system prompt always exists; it can be edited or replaced but never
/// deleted. User prompts are created, updated in place, and deleted by
/// explicit action; content changes always re-estimate the cached tokens.
#[derive(Debug, Clone, Default)]
pub struct PromptLibrary {
    system: Prompt,
    prompts: Vec<Prompt>,
}

impl PromptLibrary {
    pub fn new(system: Prompt, prompts: Vec<Prompt>) -> Self {
        Self { system, prompts }
    }

    pub fn system(&self) -> &Prompt {
        &self.system
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Creates a prompt with a millisecond-timestamp id and returns it.
    /// Blank names or content are rejected.
    pub fn create(
        &mut self,
        name: &str,
        content: &str,
        is_template: bool,
    ) -> Result<&Prompt, LibraryError> {
        if name.trim().is_empty() {
            return Err(LibraryError::EmptyName);
        }
        if content.trim().is_empty() {
            return Err(LibraryError::EmptyContent);
        }
        let id = self.next_id();
        let idx = self.prompts.len();
        self.prompts.push(Prompt::new(id, name, content, is_template));
        Ok(&self.prompts[idx])
    }

    /// Updates name and content of an existing prompt, re-estimating tokens.
    /// The template flag is left as-is.
    pub fn update(&mut self, id: &str, name: &str, content: &str) -> Result<(), LibraryError> {
        if name.trim().is_empty() {
            return Err(LibraryError::EmptyName);
        }
        if content.trim().is_empty() {
            return Err(LibraryError::EmptyContent);
        }
        let prompt = self
            .prompts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))?;
        prompt.name = name.trim().to_string();
        prompt.set_content(content);
        Ok(())
    }

    /// Deletes a prompt by id. The system prompt is protected.
    pub fn delete(&mut self, id: &str) -> Result<(), LibraryError> {
        if id == SYSTEM_PROMPT_ID {
            return Err(LibraryError::SystemProtected);
        }
        let before = self.prompts.len();
        self.prompts.retain(|p| p.id != id);
        if self.prompts.len() == before {
            return Err(LibraryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        if id == SYSTEM_PROMPT_ID {
            return Some(&self.system);
        }
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Prompt> {
        self.prompts
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Replaces the system prompt content, keeping id and display name.
    /// Blank content is rejected.
    pub fn set_system_content(&mut self, content: &str) -> Result<&Prompt, LibraryError> {
        if content.trim().is_empty() {
            return Err(LibraryError::EmptyContent);
        }
        self.system.set_content(content);
        self.system.id = SYSTEM_PROMPT_ID.to_string();
        self.system.name = SYSTEM_PROMPT_NAME.to_string();
        Ok(&self.system)
    }

    /// Sets the system prompt to one of the named presets.
    pub fn apply_preset(&mut self, preset_name: &str) -> Result<&Prompt, LibraryError> {
        let (_, content) = PRESET_SYSTEM_PROMPTS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(preset_name.trim()))
            .ok_or_else(|| LibraryError::UnknownPreset(preset_name.to_string()))?;
        self.set_system_content(content)
    }

    /// Millisecond timestamp id; bumped while taken so prompts created within
    /// the same tick stay distinct.
    fn next_id(&self) -> String {
        let mut millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        while self.prompts.iter().any(|p| p.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }
}
