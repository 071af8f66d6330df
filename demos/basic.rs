//! Basic example of the token manager lifecycle
//!
//! Stores a short-lived token, reads it back, then shows that an expired
//! token is evicted on the next read. Run with `RUST_LOG` unset to see the
//! debug channels:
//!
//! ```text
//! cargo run --example basic --features mock
//! ```

use jwtstore::mock::create_mock_default;
use jwtstore::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwtstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== jwtstore - Basic Example ===\n");

    let now = Arc::new(AtomicI64::new(SystemClock.now()));
    let clock = {
        let now = now.clone();
        move || now.load(Ordering::SeqCst)
    };

    let manager = TokenManager::builder("auth")
        .storage_type(StorageType::Session)
        .debug(true)
        .clock(clock)
        .custom_validation(|claims| match claims.subject() {
            Some(_) => Ok(()),
            None => Err(Error::rejected("token has no subject")),
        })
        .build();

    let issued = now.load(Ordering::SeqCst);
    let token = create_mock_default(&claims(&format!(
        r#"{{"sub":"user-123","iat":{issued},"exp":{}}}"#,
        issued + 2
    )));
    println!("Token: {token}\n");

    manager.set_token(&token)?;
    println!("Stored token for '{}' in {} storage", manager.key(), manager.storage_type());
    println!("  ✓ Subject: {:?}", manager.subject());
    println!("  ✓ Expires: {:?}\n", manager.expiration_time());

    println!("Advancing the clock past expiration...");
    now.fetch_add(2, Ordering::SeqCst);
    println!("  ✓ Token after expiry: {:?}\n", manager.read_token());

    println!("Storing a token without a subject...");
    match manager.set_token(&create_mock_default(&claims("{}"))) {
        Ok(()) => println!("  ✗ Unexpectedly accepted"),
        Err(e) => println!("  ✓ Rejected: {e}"),
    }

    println!("\nStoring a token without an expiration...");
    manager.set_token(&create_mock_default(&claims(r#"{"sub":"user-123"}"#)))?;
    println!("  ✓ Accepted (see warning above)");

    Ok(())
}

fn claims(payload: &str) -> miniserde::json::Object {
    miniserde::json::from_str(payload).expect("example claims are valid JSON")
}
