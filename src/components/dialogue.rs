//! Scripted conversation between the textboxes.
//!
//! Each key press hides every bubble and shows the next [`Message`] on the
//! bubble it belongs to. After the last message one extra press shows
//! nothing and rewinds the script.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::components::textbox::Textbox;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Index of the textbox that speaks this line.
    pub textbox: usize,
    pub text: String,
}

impl Message {
    pub fn new(textbox: usize, text: impl Into<String>) -> Self {
        Self {
            textbox,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dialogue {
    messages: Vec<Message>,
    cursor: usize,
}

impl Dialogue {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            cursor: 0,
        }
    }

    /// Advance the conversation by one step.
    ///
    /// Returns the message that was shown, or `None` when the script was
    /// exhausted and has just been rewound.
    pub fn advance(&mut self, boxes: &mut [Textbox]) -> Option<&Message> {
        for b in boxes.iter_mut() {
            b.hide();
        }

        if self.cursor >= self.messages.len() {
            self.cursor = 0;
            return None;
        }

        let msg = &self.messages[self.cursor];
        self.cursor += 1;
        match boxes.get_mut(msg.textbox) {
            Some(b) => b.display_text(msg.text.as_str()),
            None => warn!(
                "message {:?} targets textbox {} but only {} exist",
                msg.text,
                msg.textbox,
                boxes.len()
            ),
        }
        Some(msg)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
