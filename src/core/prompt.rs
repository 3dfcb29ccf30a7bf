//! # Prompt Sequencer
//!
//! Drives an ordered list of single-line prompts and collects one answer per
//! label. Cancelling at any point yields `PromptOutcome::Cancelled` and the
//! answers collected so far are discarded.
//!
//! The sequence itself is pure data; the line-input widget that edits the
//! current answer lives in the TUI layer and is torn down after every commit.

/// What the collected answers will be used for. Ids are captured when the
/// sequence starts so later navigation cannot redirect the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPurpose {
    NewList,
    NewTask { list_id: String },
    CompleteTask { list_id: String, task_id: String },
    DeleteList { list_id: String },
    DeleteTask { list_id: String, task_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// More labels remain.
    Pending,
    /// Every label was answered, in order.
    Completed(Vec<String>),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSequence {
    pub purpose: PromptPurpose,
    labels: Vec<String>,
    answers: Vec<String>,
}

impl PromptSequence {
    pub fn new(purpose: PromptPurpose, labels: Vec<String>) -> Self {
        Self {
            purpose,
            labels,
            answers: Vec::new(),
        }
    }

    /// Label of the prompt currently awaiting input.
    pub fn current_label(&self) -> Option<&str> {
        self.labels.get(self.answers.len()).map(String::as_str)
    }

    /// Zero-based index of the current prompt. Changes after every commit.
    pub fn position(&self) -> usize {
        self.answers.len()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Accept `text` for the current label.
    pub fn commit(&mut self, text: String) -> PromptOutcome {
        if self.answers.len() < self.labels.len() {
            self.answers.push(text);
        }
        if self.answers.len() == self.labels.len() {
            PromptOutcome::Completed(std::mem::take(&mut self.answers))
        } else {
            PromptOutcome::Pending
        }
    }

    pub fn cancel(&mut self) -> PromptOutcome {
        self.answers.clear();
        PromptOutcome::Cancelled
    }
}
