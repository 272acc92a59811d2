//! Email template rendering with Handlebars.
//!
//! Templates are embedded in the binary and registered at startup. Strict
//! mode is enabled so a missing variable is a render error rather than a
//! silently empty email.

use handlebars::Handlebars;

use crate::prelude::*;

pub const ISSUE_REPORT: &str = "issue_report";
pub const ACCOUNT_DELETED_NOTIFICATION: &str = "account_deleted_notification";
pub const ACCOUNT_DELETED_USER: &str = "account_deleted_user";
pub const STORAGE_REQUEST: &str = "storage_request";

const ISSUE_REPORT_TMPL: &str = "\
ISSUE REPORT
============

Reported by: {{first_name}} {{last_name}} <{{email}}>
Operating system: {{operating_system}}
Browser: {{browser}}
Channel: {{channel}}

{{description}}
";

const ACCOUNT_DELETED_NOTIFICATION_TMPL: &str = "\
The account for {{email}} has been deleted at the user's request.

Generated exports and backups will be retained until {{buffer_date}}.
";

const ACCOUNT_DELETED_USER_TMPL: &str = "\
Hello {{first_name}},

Your {{site_name}} account has been deleted. Any remaining account data
will be removed from our systems within {{num_days}} days, by
{{buffer_date}}.

If you did not request this, or have questions about your data, contact
{{legal_email}}.

The {{site_name}} team
";

const STORAGE_REQUEST_TMPL: &str = "\
STORAGE REQUEST
===============

Requested by: {{full_name}} <{{email}}>
Storage requested: {{storage}}

Resources: {{resource_count}} (average size {{resource_size}} MB)
Kind of content: {{kind}}
Creators: {{creators}}
Sample link: {{sample_link}}
License: {{license}}
Potential public channels:
{{#each channels}}  - {{this}}
{{/each}}
Audience: {{audience}}
Location: {{location}}
Import count: {{import_count}}
Uploading for: {{uploading_for}}
Organization type: {{organization_type}}
Time constraint: {{time_constraint}}

{{message}}
";

/// Template engine for email rendering
#[derive(Debug)]
pub struct TemplateEngine {
	handlebars: Handlebars<'static>,
}

impl TemplateEngine {
	pub fn new() -> SlResult<Self> {
		let mut handlebars = Handlebars::new();
		handlebars.set_strict_mode(true);

		for (name, template) in [
			(ISSUE_REPORT, ISSUE_REPORT_TMPL),
			(ACCOUNT_DELETED_NOTIFICATION, ACCOUNT_DELETED_NOTIFICATION_TMPL),
			(ACCOUNT_DELETED_USER, ACCOUNT_DELETED_USER_TMPL),
			(STORAGE_REQUEST, STORAGE_REQUEST_TMPL),
		] {
			handlebars
				.register_template_string(name, template)
				.map_err(|e| Error::ConfigError(format!("Invalid template '{}': {}", name, e)))?;
		}

		Ok(Self { handlebars })
	}

	pub fn render(&self, name: &str, vars: &serde_json::Value) -> SlResult<String> {
		self.handlebars
			.render(name, vars)
			.map_err(|e| Error::ConfigError(format!("Failed to render template '{}': {}", name, e)))
	}
}


// vim: ts=4
