//! Field editing operations on values

use crate::schema::{FieldKind, FieldSpec, FieldValue};

/// Text currently held by a text-like field (file paths included)
pub fn editable_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::File(handle) => handle.as_ref().map(|h| h.to_string()).unwrap_or_default(),
        FieldValue::Choices(_) => String::new(),
    }
}

/// Rebuild a value of `kind` from edited text
fn from_text(kind: FieldKind, text: String) -> FieldValue {
    match kind {
        FieldKind::FileReference if text.trim().is_empty() => FieldValue::File(None),
        FieldKind::FileReference => FieldValue::file(text),
        _ => FieldValue::Text(text),
    }
}

/// Append a character to a text-like field
pub fn push_char(kind: FieldKind, value: &FieldValue, c: char) -> Option<FieldValue> {
    if !kind.is_text_like() {
        return None;
    }
    let mut text = editable_text(value);
    text.push(c);
    Some(from_text(kind, text))
}

/// Append pasted text; newlines are dropped outside multiline fields
pub fn push_str(kind: FieldKind, value: &FieldValue, pasted: &str) -> Option<FieldValue> {
    if !kind.is_text_like() {
        return None;
    }
    let mut text = editable_text(value);
    if kind == FieldKind::MultilineText {
        text.push_str(pasted);
    } else {
        text.extend(pasted.chars().filter(|c| *c != '\n' && *c != '\r'));
    }
    Some(from_text(kind, text))
}

/// Remove the last character from a text-like field
pub fn pop_char(kind: FieldKind, value: &FieldValue) -> Option<FieldValue> {
    if !kind.is_text_like() {
        return None;
    }
    let mut text = editable_text(value);
    text.pop();
    Some(from_text(kind, text))
}

/// Move a single-choice field to the next or previous option.
/// The cycle includes "nothing selected".
pub fn cycle_choice(spec: &FieldSpec, value: &FieldValue, forward: bool) -> Option<FieldValue> {
    if spec.kind != FieldKind::SingleChoice {
        return None;
    }
    let current = value.as_text().unwrap_or("");
    let slots = spec.options.len() + 1;
    let index = spec
        .options
        .iter()
        .position(|o| o.value == current)
        .map(|i| i + 1)
        .unwrap_or(0);
    let next = if forward {
        (index + 1) % slots
    } else {
        (index + slots - 1) % slots
    };
    let text = if next == 0 {
        String::new()
    } else {
        spec.options[next - 1].value.clone()
    };
    Some(FieldValue::Text(text))
}

/// Toggle the option at `index` of a multi-choice field
pub fn toggle_choice(spec: &FieldSpec, value: &FieldValue, index: usize) -> Option<FieldValue> {
    let option = spec.options.get(index)?;
    let mut selected = value.as_choices()?.clone();
    if !selected.remove(&option.value) {
        selected.insert(option.value.clone());
    }
    Some(FieldValue::Choices(selected))
}

/// Value as shown in the UI
pub fn display_value(spec: &FieldSpec, value: &FieldValue) -> String {
    match (spec.kind, value) {
        (FieldKind::Secret, FieldValue::Text(s)) => "•".repeat(s.chars().count()),
        (FieldKind::SingleChoice, FieldValue::Text(s)) if s.is_empty() => String::new(),
        (FieldKind::SingleChoice, FieldValue::Text(s)) => spec.option_label(s).to_string(),
        (_, FieldValue::Choices(set)) => set
            .iter()
            .map(|v| spec.option_label(v))
            .collect::<Vec<_>>()
            .join(", "),
        _ => editable_text(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ChoiceOption, FileHandle};

    fn country() -> FieldSpec {
        FieldSpec::new("country", "Country", FieldKind::SingleChoice).options(vec![
            ChoiceOption::new("us", "United States"),
            ChoiceOption::new("uk", "United Kingdom"),
        ])
    }

    fn food() -> FieldSpec {
        FieldSpec::new("food", "Food", FieldKind::MultiChoice).options(vec![
            ChoiceOption::new("Pizza", "Pizza"),
            ChoiceOption::new("Sushi", "Sushi"),
        ])
    }

    mod text {
        use super::*;

        #[test]
        fn test_push_and_pop() {
            let value = push_char(FieldKind::Text, &FieldValue::text("ab"), 'c').unwrap();
            assert_eq!(value, FieldValue::text("abc"));
            let value = pop_char(FieldKind::Text, &value).unwrap();
            assert_eq!(value, FieldValue::text("ab"));
        }

        #[test]
        fn test_pop_on_empty_stays_empty() {
            let value = pop_char(FieldKind::Email, &FieldValue::text("")).unwrap();
            assert_eq!(value, FieldValue::text(""));
        }

        #[test]
        fn test_choice_fields_ignore_typing() {
            assert!(push_char(FieldKind::MultiChoice, &FieldValue::choices(["a"]), 'x').is_none());
            assert!(push_char(FieldKind::SingleChoice, &FieldValue::text(""), 'x').is_none());
        }

        #[test]
        fn test_paste_strips_newlines_in_single_line() {
            let value = push_str(FieldKind::Text, &FieldValue::text(""), "a\nb\r\n").unwrap();
            assert_eq!(value, FieldValue::text("ab"));
            let value = push_str(FieldKind::MultilineText, &FieldValue::text(""), "a\nb").unwrap();
            assert_eq!(value, FieldValue::text("a\nb"));
        }
    }

    mod file {
        use super::*;

        #[test]
        fn test_typing_path_sets_handle() {
            let value = push_char(FieldKind::FileReference, &FieldValue::File(None), 'a').unwrap();
            assert_eq!(value.as_file(), Some(&FileHandle::new("a")));
        }

        #[test]
        fn test_clearing_path_removes_handle() {
            let value = pop_char(FieldKind::FileReference, &FieldValue::file("a")).unwrap();
            assert_eq!(value, FieldValue::File(None));
        }

        #[test]
        fn test_blank_path_is_no_handle() {
            let value = push_char(FieldKind::FileReference, &FieldValue::File(None), ' ').unwrap();
            assert_eq!(value, FieldValue::File(None));
            let value = push_str(FieldKind::FileReference, &value, "  \t").unwrap();
            assert!(value.is_empty());
        }
    }

    mod choices {
        use super::*;

        #[test]
        fn test_cycle_forward_wraps_through_none() {
            let spec = country();
            let v = cycle_choice(&spec, &FieldValue::text(""), true).unwrap();
            assert_eq!(v, FieldValue::text("us"));
            let v = cycle_choice(&spec, &v, true).unwrap();
            assert_eq!(v, FieldValue::text("uk"));
            let v = cycle_choice(&spec, &v, true).unwrap();
            assert_eq!(v, FieldValue::text(""));
        }

        #[test]
        fn test_cycle_backward_from_none() {
            let v = cycle_choice(&country(), &FieldValue::text(""), false).unwrap();
            assert_eq!(v, FieldValue::text("uk"));
        }

        #[test]
        fn test_toggle_adds_and_removes() {
            let spec = food();
            let v = toggle_choice(&spec, &FieldValue::choices(Vec::<String>::new()), 1).unwrap();
            assert_eq!(v, FieldValue::choices(["Sushi"]));
            let v = toggle_choice(&spec, &v, 1).unwrap();
            assert_eq!(v, FieldValue::choices(Vec::<String>::new()));
        }

        #[test]
        fn test_toggle_out_of_range() {
            assert!(toggle_choice(&food(), &FieldValue::choices(["Pizza"]), 9).is_none());
        }
    }

    #[test]
    fn test_display_masks_secret_and_labels_choices() {
        let secret = FieldSpec::new("pw", "Password", FieldKind::Secret);
        assert_eq!(display_value(&secret, &FieldValue::text("abc")), "•••");
        assert_eq!(display_value(&country(), &FieldValue::text("uk")), "United Kingdom");
        assert_eq!(
            display_value(&food(), &FieldValue::choices(["Sushi", "Pizza"])),
            "Pizza, Sushi"
        );
    }
}
