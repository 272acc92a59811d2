//! Localized message catalog.
//!
//! The settings page ships its UI strings to the client as a flat
//! locale-resolved map. Lookups fall back to the default locale, so a
//! partially translated locale still renders completely.

use std::collections::HashMap;

type Messages = HashMap<Box<str>, Box<str>>;

#[derive(Debug)]
pub struct MessageCatalog {
	default_locale: Box<str>,
	locales: HashMap<Box<str>, Messages>,
}

impl MessageCatalog {
	pub fn new(default_locale: impl Into<Box<str>>) -> Self {
		Self { default_locale: default_locale.into(), locales: HashMap::new() }
	}

	/// Catalog pre-seeded with the built-in English settings-page strings.
	pub fn with_defaults() -> Self {
		let mut catalog = Self::new("en");
		for (key, value) in DEFAULT_MESSAGES {
			catalog.add("en", key, value);
		}
		catalog
	}

	pub fn add(&mut self, locale: &str, key: &str, value: &str) {
		self.locales
			.entry(Box::from(locale))
			.or_default()
			.insert(Box::from(key), Box::from(value));
	}

	/// Resolved messages for a locale: default-locale strings overlaid
	/// with the locale's own translations.
	pub fn messages_for(&self, locale: &str) -> HashMap<String, String> {
		let mut resolved: HashMap<String, String> = HashMap::new();

		if let Some(base) = self.locales.get(&*self.default_locale) {
			for (k, v) in base {
				resolved.insert(k.to_string(), v.to_string());
			}
		}
		if locale != &*self.default_locale {
			if let Some(messages) = self.locales.get(locale) {
				for (k, v) in messages {
					resolved.insert(k.to_string(), v.to_string());
				}
			}
		}

		resolved
	}
}

impl Default for MessageCatalog {
	fn default() -> Self {
		Self::with_defaults()
	}
}

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
	("settings.title", "Settings"),
	("settings.account", "Account"),
	("settings.username", "Username"),
	("settings.change_password", "Change password"),
	("settings.delete_account", "Delete account"),
	("settings.export_data", "Export my data"),
	("settings.report_issue", "Report an issue"),
	("settings.request_storage", "Request more storage"),
	("settings.storage_used", "Storage used"),
	("policies.accept", "I have read and agree to the above terms"),
];


// vim: ts=4
