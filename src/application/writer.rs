//! Line writer on top of a direction tree.
//!
//! Every completed walk to a leaf yields one keystroke: printable text lands
//! in the current line with shift/caps applied, action tokens (`<bksp>`,
//! `<enter>`, `<caps>`, `<shift>`, `<sym>`) edit the line or toggle state.
//! Enter moves the line into a bounded history.

use std::collections::VecDeque;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::domain::{Direction, DomainResult, EnumTree, EnumTreeBuilder};

pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Characters emitted for action tokens.
pub mod control {
    pub const BACKSPACE: char = '\u{8}';
    pub const NEWLINE: char = '\n';
    pub const CAPS: char = '\u{14}';
    pub const SHIFT: char = '\u{10}';
    /// Shift-out, marks a layer switch
    pub const SYM: char = '\u{e}';
    pub const NULL: char = '\0';
}

fn action_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^<.*>$").expect("action pattern is a valid regex"))
}

/// Stateful effect of a bracketed leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Backspace,
    Enter,
    Caps,
    Shift,
    Sym,
    /// Accepted but without effect
    Unknown(String),
}

impl Action {
    fn from_token(token: &str) -> Self {
        match token {
            "<bksp>" => Action::Backspace,
            "<enter>" => Action::Enter,
            "<caps>" => Action::Caps,
            "<shift>" => Action::Shift,
            "<sym>" => Action::Sym,
            other => Action::Unknown(other.to_string()),
        }
    }

    pub fn control_char(&self) -> char {
        match self {
            Action::Backspace => control::BACKSPACE,
            Action::Enter => control::NEWLINE,
            Action::Caps => control::CAPS,
            Action::Shift => control::SHIFT,
            Action::Sym => control::SYM,
            Action::Unknown(_) => control::NULL,
        }
    }
}

/// Leaf content, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keystroke {
    Printable(String),
    Action(Action),
}

impl Keystroke {
    pub fn classify(content: &str) -> Self {
        if action_pattern().is_match(content) {
            Keystroke::Action(Action::from_token(content))
        } else {
            Keystroke::Printable(content.to_string())
        }
    }
}

pub type LineCallback = Box<dyn FnMut(&str)>;

/// Turns directional input into text.
///
/// History is indexed newest-first: `history(0)` is the line entered last.
/// [`Writer::history_list`] returns oldest to newest.
pub struct Writer<D: Direction> {
    tree: EnumTree<D>,
    is_caps: bool,
    is_shift: bool,
    line: String,
    history: VecDeque<String>,
    recent: VecDeque<String>,
    capacity: usize,
    on_line: Option<LineCallback>,
}

impl<D: Direction> fmt::Debug for Writer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("is_caps", &self.is_caps)
            .field("is_shift", &self.is_shift)
            .field("line", &self.line)
            .field("history", &self.history)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<D: Direction> Writer<D> {
    pub fn new(tree: EnumTree<D>) -> Self {
        Self::with_capacity(tree, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(tree: EnumTree<D>, capacity: usize) -> Self {
        Self {
            tree,
            is_caps: false,
            is_shift: false,
            line: String::new(),
            history: VecDeque::with_capacity(capacity),
            recent: VecDeque::with_capacity(capacity),
            capacity,
            on_line: None,
        }
    }

    pub fn from_builder<B: EnumTreeBuilder<D>>(builder: &B, capacity: usize) -> DomainResult<Self> {
        Ok(Self::with_capacity(builder.build()?, capacity))
    }

    /// Register a callback invoked with every line completed by `<enter>`.
    pub fn on_line(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_line = Some(Box::new(callback));
    }

    /// Feed one direction.
    ///
    /// Returns `None` while an entry is still in progress, otherwise the
    /// emitted character: the (case-adjusted) printable character or the
    /// control character of an action, `'\0'` for unknown tokens.
    #[instrument(level = "trace", skip(self))]
    pub fn walk(&mut self, direction: D) -> Option<char> {
        let content = self.tree.walk_down(direction).to_string();
        if self.tree.is_at_root() || !self.tree.is_leaf() {
            return None;
        }
        self.tree.rewind();
        self.push_bounded_recent(content.clone());

        let emitted = match Keystroke::classify(&content) {
            Keystroke::Printable(text) => self.type_text(text),
            Keystroke::Action(action) => self.apply(action),
        };
        Some(emitted)
    }

    /// Feed a sequence, collecting every emitted character.
    pub fn type_path(&mut self, directions: &[D]) -> String {
        directions.iter().filter_map(|&d| self.walk(d)).collect()
    }

    fn type_text(&mut self, text: String) -> char {
        let text = if self.next_is_capitalized() {
            text.to_uppercase()
        } else {
            text
        };
        // One-shot shift, unless caps lock is what capitalizes anyway
        if self.is_shift && !self.is_caps {
            self.is_shift = false;
        }
        trace!("typed {:?}", text);
        self.line.push_str(&text);
        text.chars().next().unwrap_or(control::NULL)
    }

    fn apply(&mut self, action: Action) -> char {
        debug!("action {:?}", action);
        match &action {
            Action::Backspace => {
                if self.line.chars().count() > 1 {
                    self.line.pop();
                }
            }
            Action::Enter => {
                let line = std::mem::take(&mut self.line);
                if let Some(callback) = self.on_line.as_mut() {
                    callback(&line);
                }
                self.history.push_back(line);
                while self.history.len() > self.capacity {
                    self.history.pop_front();
                }
            }
            Action::Caps => self.is_caps = !self.is_caps,
            Action::Shift => self.is_shift = !self.is_shift,
            Action::Sym | Action::Unknown(_) => {}
        }
        action.control_char()
    }

    fn push_bounded_recent(&mut self, content: String) {
        self.recent.push_back(content);
        while self.recent.len() > self.capacity {
            self.recent.pop_front();
        }
    }

    /// Undo the last direction of an unfinished entry.
    pub fn step_back(&mut self) {
        self.tree.walk_up();
    }

    /// Abandon an unfinished entry.
    pub fn cancel(&mut self) {
        self.tree.rewind();
    }

    pub fn is_mid_entry(&self) -> bool {
        !self.tree.is_at_root()
    }

    /// The line being typed.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Completed line, `0` being the most recent.
    pub fn history(&self, index: usize) -> Option<&str> {
        self.history.iter().rev().nth(index).map(String::as_str)
    }

    /// Completed lines, oldest first.
    pub fn history_list(&self) -> Vec<&str> {
        self.history.iter().map(String::as_str).collect()
    }

    /// Raw leaf content emitted, `0` being the most recent.
    pub fn recent(&self, index: usize) -> Option<&str> {
        self.recent.iter().rev().nth(index).map(String::as_str)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_caps(&self) -> bool {
        self.is_caps
    }

    pub fn is_shift(&self) -> bool {
        self.is_shift
    }

    pub fn set_caps(&mut self, caps: bool) {
        self.is_caps = caps;
    }

    pub fn next_is_capitalized(&self) -> bool {
        self.is_caps || self.is_shift
    }

    /// What lies under each direction from the current position.
    pub fn subtree_contents(&self) -> std::collections::BTreeMap<D, String> {
        self.tree.subtree_contents()
    }

    pub fn tree(&self) -> &EnumTree<D> {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_action_tokens() {
        assert_eq!(
            Keystroke::classify("<enter>"),
            Keystroke::Action(Action::Enter)
        );
        assert_eq!(
            Keystroke::classify("<hyper>"),
            Keystroke::Action(Action::Unknown("<hyper>".to_string()))
        );
        assert_eq!(
            Keystroke::classify("<"),
            Keystroke::Printable("<".to_string())
        );
        assert_eq!(
            Keystroke::classify("a"),
            Keystroke::Printable("a".to_string())
        );
    }

    #[test]
    fn test_control_chars() {
        assert_eq!(Action::Backspace.control_char(), '\u{8}');
        assert_eq!(Action::Enter.control_char(), '\n');
        assert_eq!(Action::Caps.control_char(), '\u{14}');
        assert_eq!(Action::Shift.control_char(), '\u{10}');
        assert_eq!(Action::Unknown("<x>".into()).control_char(), '\0');
    }
}
