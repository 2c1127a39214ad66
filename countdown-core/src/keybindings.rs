//! Context-aware keybindings
//!
//! Bindings map command names to key strings (`"s"`, `"ctrl+c"`,
//! `"shift+tab"`). Lookups check the active context first and fall back to
//! the global table, so a context can shadow a global key.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::hash::Hash;

/// A named situation in which a separate binding table applies
pub trait BindingContext: Clone + Copy + Eq + Hash {
    /// Key of this context's table in a bindings file
    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

type CommandTable = HashMap<String, Vec<String>>;

/// Command to key-string tables, one per context plus a global fallback
#[derive(Debug, Clone)]
pub struct Keybindings<C: BindingContext> {
    /// Checked as fallback for all contexts
    global: CommandTable,
    contexts: HashMap<C, CommandTable>,
}

impl<C: BindingContext> Default for Keybindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de, C: BindingContext> Deserialize<'de> for Keybindings<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, CommandTable> = HashMap::deserialize(deserializer)?;

        let mut keybindings = Keybindings::new();
        for (context_name, bindings) in raw {
            if context_name == "global" {
                keybindings.global = bindings;
            } else if let Some(context) = C::from_name(&context_name) {
                keybindings.contexts.insert(context, bindings);
            }
            // Unknown contexts are ignored
        }

        Ok(keybindings)
    }
}

impl<C: BindingContext> Keybindings<C> {
    pub fn new() -> Self {
        Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        }
    }

    /// Bind `command` in every context that does not bind it itself
    pub fn add_global(&mut self, command: impl Into<String>, keys: &[&str]) {
        self.global
            .insert(command.into(), keys.iter().map(|k| k.to_string()).collect());
    }

    /// Bind `command` in `context`, replacing any keys it had there
    pub fn add(&mut self, context: C, command: impl Into<String>, keys: &[&str]) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(command.into(), keys.iter().map(|k| k.to_string()).collect());
    }

    pub fn global_bindings(&self) -> &HashMap<String, Vec<String>> {
        &self.global
    }

    pub fn context_bindings(&self, context: C) -> Option<&HashMap<String, Vec<String>>> {
        self.contexts.get(&context)
    }

    /// The command `key` triggers in `context`, if any.
    ///
    /// A context binding wins over a global one for the same key.
    pub fn get_command(&self, key: KeyEvent, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| match_key(key, bindings))
            .or_else(|| match_key(key, &self.global))
    }

    /// First key string bound to `command` in `context` (or globally)
    pub fn first_key(&self, command: &str, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| bindings.get(command))
            .and_then(|keys| keys.first())
            .or_else(|| self.global.get(command).and_then(|keys| keys.first()))
            .map(String::as_str)
    }

    /// Overlay `user` on `defaults` command by command; commands the user
    /// file does not mention keep their default keys.
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        defaults.global.extend(user.global);
        for (context, bindings) in user.contexts {
            defaults.contexts.entry(context).or_default().extend(bindings);
        }
        defaults
    }
}

fn match_key(key: KeyEvent, bindings: &CommandTable) -> Option<&str> {
    bindings.iter().find_map(|(command, keys)| {
        keys.iter()
            .filter_map(|key_str| parse_key_string(key_str))
            .any(|parsed| key_matches(&parsed, &key))
            .then_some(command.as_str())
    })
}

fn key_matches(parsed: &KeyEvent, key: &KeyEvent) -> bool {
    // Character keys compare case-insensitively; kind and state are ignored
    let codes_match = match (parsed.code, key.code) {
        (KeyCode::Char(c1), KeyCode::Char(c2)) => c1.to_lowercase().eq(c2.to_lowercase()),
        (a, b) => a == b,
    };
    codes_match && parsed.modifiers == key.modifiers
}

/// Parse a key string like "q", "esc", "ctrl+c", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    let press = |code, modifiers| KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    };

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // A lone "+" is a key, not a separator
    let (modifier_parts, key_part) = match key_str.rsplit_once('+') {
        Some((mods, "")) => (mods.trim_end_matches('+'), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts.split('+').map(str::trim) {
        match part {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
            _ => return None,
        },
        c => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };

    Some(press(code, modifiers))
}

/// Format a key string for display (e.g., "ctrl+c" -> "^C", "s" -> "S", "tab" -> "Tab")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(parsed) = parse_key_string(key_str) else {
        return key_str.trim().to_string();
    };

    if parsed.code == KeyCode::BackTab {
        return "Shift+Tab".to_string();
    }

    let mut out = String::new();
    if parsed.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if parsed.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if parsed.modifiers.contains(KeyModifiers::SHIFT) {
        out.push_str("Shift+");
    }

    let key = match parsed.code {
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().collect(),
        other => format!("{other:?}"),
    };
    out.push_str(&key);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, ctrl_key};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestContext {
        Buttons,
        Field,
    }

    impl BindingContext for TestContext {
        fn name(&self) -> &'static str {
            match self {
                TestContext::Buttons => "buttons",
                TestContext::Field => "field",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "buttons" => Some(TestContext::Buttons),
                "field" => Some(TestContext::Field),
                _ => None,
            }
        }
    }

    #[test]
    fn test_parse_simple_key() {
        let result = parse_key_string("q").unwrap();
        assert_eq!(result.code, KeyCode::Char('q'));
        assert_eq!(result.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn test_parse_modified_keys() {
        let result = parse_key_string("ctrl+c").unwrap();
        assert_eq!(result.code, KeyCode::Char('c'));
        assert!(result.modifiers.contains(KeyModifiers::CONTROL));

        let result = parse_key_string("shift+tab").unwrap();
        assert_eq!(result.code, KeyCode::BackTab);
        assert!(result.modifiers.contains(KeyModifiers::SHIFT));

        let result = parse_key_string("ctrl++").unwrap();
        assert_eq!(result.code, KeyCode::Char('+'));
        assert!(result.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_key_string("esc").unwrap().code, KeyCode::Esc);
        assert_eq!(parse_key_string("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("f5").unwrap().code, KeyCode::F(5));
        assert!(parse_key_string("f13").is_none());
        assert!(parse_key_string("bogus").is_none());
        assert!(parse_key_string("").is_none());
    }

    #[test]
    fn test_get_command_prefers_context() {
        let mut bindings: Keybindings<TestContext> = Keybindings::new();
        bindings.add_global("quit", &["ctrl+c"]);
        bindings.add(TestContext::Buttons, "start", &["s"]);
        bindings.add(TestContext::Field, "leave", &["esc"]);
        bindings.add(TestContext::Buttons, "quit", &["esc"]);

        assert_eq!(
            bindings.get_command(ctrl_key('c'), TestContext::Field),
            Some("quit")
        );
        assert_eq!(
            bindings.get_command(char_key('s'), TestContext::Buttons),
            Some("start")
        );
        assert_eq!(bindings.get_command(char_key('s'), TestContext::Field), None);
        assert_eq!(
            bindings.get_command(char_key('S'), TestContext::Buttons),
            Some("start")
        );

        let esc = parse_key_string("esc").unwrap();
        assert_eq!(bindings.get_command(esc, TestContext::Field), Some("leave"));
        assert_eq!(bindings.get_command(esc, TestContext::Buttons), Some("quit"));
    }

    #[test]
    fn test_first_key_falls_back_to_global() {
        let mut bindings: Keybindings<TestContext> = Keybindings::new();
        bindings.add_global("quit", &["ctrl+c"]);
        bindings.add(TestContext::Buttons, "quit", &["q", "esc"]);

        assert_eq!(bindings.first_key("quit", TestContext::Buttons), Some("q"));
        assert_eq!(bindings.first_key("quit", TestContext::Field), Some("ctrl+c"));
        assert_eq!(bindings.first_key("missing", TestContext::Field), None);
    }

    #[test]
    fn test_merge() {
        let mut defaults: Keybindings<TestContext> = Keybindings::new();
        defaults.add_global("quit", &["q"]);
        defaults.add(TestContext::Buttons, "start", &["s"]);
        defaults.add(TestContext::Buttons, "pause", &["p"]);

        let mut user: Keybindings<TestContext> = Keybindings::new();
        user.add(TestContext::Buttons, "start", &["enter"]);

        let merged = Keybindings::merge(defaults, user);
        let buttons = merged.context_bindings(TestContext::Buttons).unwrap();

        assert_eq!(buttons.get("start"), Some(&vec!["enter".to_string()]));
        assert_eq!(buttons.get("pause"), Some(&vec!["p".to_string()]));
        assert_eq!(merged.global_bindings().get("quit"), Some(&vec!["q".to_string()]));
    }

    #[test]
    fn test_deserialize_ignores_unknown_contexts() {
        let json = r#"{
            "global": { "quit": ["ctrl+q"] },
            "field": { "leave": ["enter"] },
            "sidebar": { "open": ["o"] }
        }"#;

        let bindings: Keybindings<TestContext> = serde_json::from_str(json).unwrap();

        assert_eq!(bindings.first_key("quit", TestContext::Buttons), Some("ctrl+q"));
        assert_eq!(bindings.first_key("leave", TestContext::Field), Some("enter"));
        assert!(bindings.context_bindings(TestContext::Buttons).is_none());
    }

    #[test]
    fn test_format_key_for_display() {
        assert_eq!(format_key_for_display("s"), "S");
        assert_eq!(format_key_for_display("ctrl+c"), "^C");
        assert_eq!(format_key_for_display("esc"), "Esc");
        assert_eq!(format_key_for_display("shift+tab"), "Shift+Tab");
        assert_eq!(format_key_for_display("space"), "Space");
    }
}
