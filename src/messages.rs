//! Player-facing message templates.
//!
//! Templates use printf-style placeholders: `%s`/`%d` take the next argument,
//! `%2$s` takes the second, `%%` is a literal percent sign.

use std::collections::HashMap;
use std::fmt::Display;

use tracing::warn;

use crate::error::{ShopError, ShopResult};

/// Every key the menus and purchase flow format through
pub const REQUIRED_KEYS: &[&str] = &[
    "main_menu_title",
    "main_menu_subtitle",
    "search_option",
    "search_icon",
    "search_input_label",
    "search_input_placeholder",
    "search_results_title",
    "search_results_subtitle",
    "no_results_message",
    "category_menu_title",
    "category_menu_subtitle",
    "no_items_message",
    "back_option",
    "back_icon",
    "item_button",
    "item_button_description",
    "item_price",
    "currency",
    "purchase_form_title",
    "purchase_form_info",
    "purchase_form_stack_toggle",
    "purchase_form_amount",
    "confirm_purchase_title",
    "confirm_purchase_info",
    "confirm_purchase_yes",
    "confirm_purchase_no",
    "inventory_full_message",
    "purchase_success",
    "purchase_refunded",
    "not_enough_money",
    "command_in_game_only",
];

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("main_menu_title", "§l§6Shop"),
    ("main_menu_subtitle", "§7Pick a category or search the catalog"),
    ("search_option", "§bSearch"),
    ("search_icon", "textures/ui/magnifyingGlass"),
    ("search_input_label", "Search"),
    ("search_input_placeholder", "Item or category name"),
    ("search_results_title", "§l§6Search Results"),
    ("search_results_subtitle", "§7Select a result"),
    ("no_results_message", "§cNo results found."),
    ("category_menu_title", "§l§6%s"),
    ("category_menu_subtitle", "§7Select an item to buy"),
    ("no_items_message", "§cThis category has no items."),
    ("back_option", "§cBack"),
    ("back_icon", "textures/ui/arrow_left"),
    ("item_button", "§6%1$s\n§7%2$s: §e%3$s %4$s"),
    ("item_button_description", "\n§7%s"),
    ("item_price", "Price"),
    ("currency", "coins"),
    ("purchase_form_title", "§l§6Buy %s"),
    ("purchase_form_info", "§7Item: §f%1$s\n§7Price: §e%2$s %3$s§r%4$s"),
    ("purchase_form_stack_toggle", "Buy in stacks (x64)"),
    ("purchase_form_amount", "Amount"),
    ("confirm_purchase_title", "§l§6Confirm Purchase"),
    ("confirm_purchase_info", "§7Buy §f%2$s x %1$s §7for §e%3$s %4$s§7?"),
    ("confirm_purchase_yes", "§aYes"),
    ("confirm_purchase_no", "§cNo"),
    ("inventory_full_message", "§cYour inventory is full."),
    ("purchase_success", "§aYou bought %s x %s."),
    ("purchase_refunded", "§eNo room for %1$s x %2$s, refunded %3$s %4$s."),
    ("not_enough_money", "§cYou don't have enough money."),
    ("command_in_game_only", "§cYou can only use this command in the game"),
];

/// Message key -> template, fixed for the lifetime of a shop
#[derive(Debug, Clone)]
pub struct MessageSet {
    templates: HashMap<String, String>,
}

impl MessageSet {
    /// Templates exactly as given, no defaults
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    /// Built-in templates with `overrides` layered on top
    pub fn with_defaults(overrides: HashMap<String, String>) -> Self {
        let mut templates: HashMap<String, String> = DEFAULT_MESSAGES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        templates.extend(overrides);
        Self { templates }
    }

    /// Fail if any required key is absent
    pub fn validate(&self) -> ShopResult<()> {
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|k| !self.templates.contains_key(**k))
            .map(|k| k.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ShopError::MissingMessages(missing))
        }
    }

    /// Raw template. A missing key yields the key itself.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        match self.templates.get(key) {
            Some(template) => template,
            None => {
                warn!("Missing message key '{}'", key);
                key
            }
        }
    }

    /// Template with positional arguments substituted
    pub fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        substitute(self.get(key), args)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for MessageSet {
    fn default() -> Self {
        Self::with_defaults(HashMap::new())
    }
}

fn substitute(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        // Optional `N$` position
        let mut lookahead = chars.clone();
        let mut digits = String::new();
        while let Some(d) = lookahead.peek().copied().filter(|d| d.is_ascii_digit()) {
            digits.push(d);
            lookahead.next();
        }
        let mut position = None;
        if !digits.is_empty() && lookahead.peek() == Some(&'$') {
            lookahead.next();
            position = digits.parse::<usize>().ok();
            chars = lookahead;
        }

        match chars.peek() {
            Some('s') | Some('d') => {
                chars.next();
                let index = match position {
                    Some(n) => n.saturating_sub(1),
                    None => {
                        next_arg += 1;
                        next_arg - 1
                    }
                };
                if let Some(arg) = args.get(index) {
                    out.push_str(&arg.to_string());
                }
            }
            _ => {
                out.push('%');
                if position.is_some() {
                    out.push_str(&digits);
                    out.push('$');
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_and_positional() {
        assert_eq!(substitute("%s x %d", &[&"Stone", &16]), "Stone x 16");
        assert_eq!(substitute("%2$s before %1$s", &[&"a", &"b"]), "b before a");
        assert_eq!(substitute("100%% sure", &[]), "100% sure");
    }

    #[test]
    fn test_malformed_placeholders_are_kept() {
        assert_eq!(substitute("50% off", &[]), "50% off");
        assert_eq!(substitute("%3$x", &[&1]), "%3$x");
        assert_eq!(substitute("%s and %s", &[&"one"]), "one and ");
    }

    #[test]
    fn test_defaults_cover_required_keys() {
        let messages = MessageSet::default();
        messages.validate().unwrap();
        assert_eq!(messages.len(), REQUIRED_KEYS.len());
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut overrides = HashMap::new();
        overrides.insert("currency".to_string(), "gems".to_string());
        let messages = MessageSet::with_defaults(overrides);
        assert_eq!(messages.get("currency"), "gems");
        assert_eq!(
            messages.format("purchase_success", &[&3, &"Stone"]),
            "§aYou bought 3 x Stone."
        );
    }

    #[test]
    fn test_validate_lists_missing_keys() {
        let mut templates = HashMap::new();
        templates.insert("currency".to_string(), "coins".to_string());
        let err = MessageSet::new(templates).validate().unwrap_err();
        match err {
            ShopError::MissingMessages(keys) => {
                assert!(keys.contains(&"main_menu_title".to_string()));
                assert!(!keys.contains(&"currency".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_key_formats_as_key() {
        let messages = MessageSet::new(HashMap::new());
        assert_eq!(messages.format("nope", &[]), "nope");
    }
}
