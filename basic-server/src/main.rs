mod adapters;

use std::{env, sync::Arc};

use studiolo::core::route_auth;
use studiolo::types::UserId;
use studiolo::AppBuilder;

use crate::adapters::{LogMailSender, MemorySheetAppender, MemoryUserAdapter};

#[tokio::main]
async fn main() {
	let secret = env::var("SECRET").unwrap_or_else(|_| "development secret".to_string());
	let listen = env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

	// Print a usable token for the seeded demo user
	match route_auth::generate_access_token(&secret, UserId(1)) {
		Ok((token, _session_id)) => println!("demo token: {}", token),
		Err(err) => eprintln!("failed to mint demo token: {}", err),
	}

	let mut builder = AppBuilder::new();
	builder
		.listen(listen)
		.secret(secret)
		.storage_sheet_id("storage-requests-dev")
		.user_adapter(Arc::new(MemoryUserAdapter::seeded()))
		.mail_sender(Arc::new(LogMailSender))
		.sheet_appender(Arc::new(MemorySheetAppender::default()));

	if let Err(err) = builder.run().await {
		eprintln!("server error: {}", err);
		std::process::exit(1);
	}
}

// vim: ts=4
