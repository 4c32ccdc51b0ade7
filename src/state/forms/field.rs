//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// One of a fixed list of (value, label) options
    Choice {
        options: Vec<(String, String)>,
        selected: Option<usize>,
    },
    Toggle(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self::text_with_value(name, label, String::new(), is_multiline)
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value),
            is_multiline,
        }
    }

    /// Create a select field; `selected` is matched against option values
    pub fn choice<V, L>(name: &str, label: &str, options: &[(V, L)], selected: Option<&str>) -> Self
    where
        V: AsRef<str>,
        L: AsRef<str>,
    {
        let options: Vec<(String, String)> = options
            .iter()
            .map(|(value, label)| (value.as_ref().to_string(), label.as_ref().to_string()))
            .collect();
        let selected = selected.and_then(|s| options.iter().position(|(value, _)| value == s));
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Choice { options, selected },
            is_multiline: false,
        }
    }

    /// Create a checkbox field
    pub fn toggle(name: &str, label: &str, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Toggle(checked),
            is_multiline: false,
        }
    }

    /// Get the text value (selected option value for choices, empty for toggles)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|(value, _)| value.as_str())
                .unwrap_or(""),
            FieldValue::Toggle(_) => "",
        }
    }

    /// Get the checkbox state (false for other kinds)
    pub fn as_toggle(&self) -> bool {
        matches!(self.value, FieldValue::Toggle(true))
    }

    /// Set the text value
    pub fn set_text(&mut self, value: String) {
        self.value = FieldValue::Text(value);
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Choice { options, selected } => {
                // Jump to the next option whose label starts with the typed character
                let start = selected.map_or(0, |i| i + 1);
                let len = options.len();
                let found = (0..len).map(|offset| (start + offset) % len).find(|&i| {
                    options[i]
                        .1
                        .chars()
                        .next()
                        .is_some_and(|first| first.eq_ignore_ascii_case(&c))
                });
                if found.is_some() {
                    *selected = found;
                }
            }
            FieldValue::Toggle(checked) => {
                if c == ' ' {
                    *checked = !*checked;
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Choice { selected, .. } => *selected = None,
            FieldValue::Toggle(_) => {}
        }
    }

    /// Cycle to the next option (choices) or flip the checkbox (toggles)
    pub fn next_option(&mut self) {
        match &mut self.value {
            FieldValue::Choice { options, selected } if !options.is_empty() => {
                *selected = Some(selected.map_or(0, |i| (i + 1) % options.len()));
            }
            FieldValue::Toggle(checked) => *checked = !*checked,
            _ => {}
        }
    }

    /// Cycle to the previous option (choices) or flip the checkbox (toggles)
    pub fn prev_option(&mut self) {
        match &mut self.value {
            FieldValue::Choice { options, selected } if !options.is_empty() => {
                let last = options.len() - 1;
                *selected = Some(match *selected {
                    None | Some(0) => last,
                    Some(i) => i - 1,
                });
            }
            FieldValue::Toggle(checked) => *checked = !*checked,
            _ => {}
        }
    }

    /// Whether Left/Right change this field's value
    pub fn is_selectable(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. } | FieldValue::Toggle(_))
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|(_, label)| format!("◂ {label} ▸"))
                .unwrap_or_default(),
            FieldValue::Toggle(checked) => {
                if *checked {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUITS: &[(&str, &str)] = &[("a", "Apple"), ("b", "Banana"), ("c", "Cherry")];

    #[test]
    fn test_text_push_and_pop() {
        let mut field = FormField::text("name", "Name", false);
        field.push_char('h');
        field.push_char('i');
        assert_eq!(field.as_text(), "hi");
        field.pop_char();
        assert_eq!(field.as_text(), "h");
    }

    #[test]
    fn test_choice_preselects_matching_value() {
        let field = FormField::choice("fruit", "Fruit", FRUITS, Some("b"));
        assert_eq!(field.as_text(), "b");
        assert_eq!(field.display_value(), "◂ Banana ▸");

        let unknown = FormField::choice("fruit", "Fruit", FRUITS, Some("z"));
        assert_eq!(unknown.as_text(), "");
        assert_eq!(unknown.display_value(), "");
    }

    #[test]
    fn test_choice_cycles_both_directions() {
        let mut field = FormField::choice("fruit", "Fruit", FRUITS, None);
        field.next_option();
        assert_eq!(field.as_text(), "a");
        field.prev_option();
        assert_eq!(field.as_text(), "c");
        field.next_option();
        assert_eq!(field.as_text(), "a");
    }

    #[test]
    fn test_choice_typing_jumps_by_label() {
        let mut field = FormField::choice("fruit", "Fruit", FRUITS, None);
        field.push_char('c');
        assert_eq!(field.as_text(), "c");
        field.push_char('x');
        assert_eq!(field.as_text(), "c");
        field.pop_char();
        assert_eq!(field.as_text(), "");
    }

    #[test]
    fn test_toggle_flips_on_space() {
        let mut field = FormField::toggle("same", "Same as property", false);
        assert!(field.is_selectable());
        field.push_char(' ');
        assert!(field.as_toggle());
        assert_eq!(field.display_value(), "[x]");
        field.push_char('x');
        assert!(field.as_toggle());
        field.next_option();
        assert!(!field.as_toggle());
    }
}
