//! Form Structures
//!
//! Forms handed to the host for rendering, the responses it hands back, and
//! the presenter seam between the two.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Forms
// ============================================================================

/// Image shown next to a menu option, given as a resource-pack path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormIcon {
    pub path: String,
}

impl FormIcon {
    /// Icon for a path, None when the path is blank
    pub fn path(path: &str) -> Option<Self> {
        if path.trim().is_empty() {
            None
        } else {
            Some(Self {
                path: path.to_string(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    pub text: String,
    pub icon: Option<FormIcon>,
}

impl MenuOption {
    pub fn new(text: String, icon: Option<FormIcon>) -> Self {
        Self { text, icon }
    }
}

/// A list of buttons; the response is the index of the pressed one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuForm {
    pub title: String,
    pub content: String,
    pub options: Vec<MenuOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormElement {
    Label {
        name: String,
        text: String,
    },
    Input {
        name: String,
        label: String,
        placeholder: String,
        default: String,
    },
    Toggle {
        name: String,
        label: String,
        default: bool,
    },
    Slider {
        name: String,
        label: String,
        min: u32,
        max: u32,
        step: u32,
        default: u32,
    },
}

impl FormElement {
    pub fn name(&self) -> &str {
        match self {
            FormElement::Label { name, .. }
            | FormElement::Input { name, .. }
            | FormElement::Toggle { name, .. }
            | FormElement::Slider { name, .. } => name,
        }
    }
}

/// A form of labelled fields; the response carries a value per field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomForm {
    pub title: String,
    pub elements: Vec<FormElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Form {
    Menu(MenuForm),
    Custom(CustomForm),
}

impl Form {
    pub fn title(&self) -> &str {
        match self {
            Form::Menu(form) => &form.title,
            Form::Custom(form) => &form.title,
        }
    }

    pub fn as_menu(&self) -> Option<&MenuForm> {
        match self {
            Form::Menu(form) => Some(form),
            Form::Custom(_) => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomForm> {
        match self {
            Form::Custom(form) => Some(form),
            Form::Menu(_) => None,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Field values of a submitted custom form, keyed by element name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, FormValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: FormValue) -> Self {
        self.0.insert(name.to_string(), value);
        self
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FormValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(FormValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        match self.0.get(name) {
            Some(FormValue::Number(value)) if value.is_finite() => Some(*value),
            _ => None,
        }
    }
}

/// What the host reports back for a presented form
#[derive(Debug, Clone, PartialEq)]
pub enum FormResponse {
    /// Dismissed without submitting
    Closed,
    /// Menu button pressed
    Selected(usize),
    /// Custom form submitted
    Submitted(FormValues),
}

// ============================================================================
// Presenter
// ============================================================================

/// Host-side surface that shows forms and chat messages to a player.
/// The form id must come back with the player's response.
pub trait FormPresenter: Send + Sync {
    fn send_form(&self, player_id: &str, form_id: Uuid, form: &Form);

    fn send_message(&self, player_id: &str, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_from_json() {
        let values: FormValues =
            serde_json::from_str(r#"{"stack": true, "amount": 12.0, "query": "wool"}"#).unwrap();
        assert_eq!(values.get_bool("stack"), Some(true));
        assert_eq!(values.get_number("amount"), Some(12.0));
        assert_eq!(values.get_str("query"), Some("wool"));
        assert_eq!(values.get_str("amount"), None);
        assert_eq!(values.get_number("missing"), None);
    }

    #[test]
    fn test_blank_icon_path_is_none() {
        assert_eq!(FormIcon::path("  "), None);
        assert_eq!(FormIcon::path("textures/a").unwrap().path, "textures/a");
    }

    #[test]
    fn test_form_serializes_with_type_tag() {
        let form = Form::Custom(CustomForm {
            title: "Buy".to_string(),
            elements: vec![FormElement::Toggle {
                name: "stack".to_string(),
                label: "Stacks".to_string(),
                default: false,
            }],
        });
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["type"], "custom");
        assert_eq!(json["elements"][0]["type"], "toggle");
        assert_eq!(form.as_custom().unwrap().elements[0].name(), "stack");
    }
}
