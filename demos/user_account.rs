//! User Account Lifecycle
//!
//! This example walks a user through pending, validated, locked and deleted
//! states with an immutable machine.
//!
//! Key concepts:
//! - Transitions return new instances; old ones stay usable as snapshots
//! - Methods compute values without producing instances
//! - An observer sees every completed transition
//! - Asynchronous transitions settle when awaited
//!
//! Run with: cargo run --example user_account
//! Set RUST_LOG=machinist=debug to see transition logs.

use chrono::{DateTime, Utc};
use machinist::{create_machine, get_state, impl_state, Description, State, TransitionRecorder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum User {
    Pending {
        name: String,
    },
    Validated {
        name: String,
        email: String,
    },
    Locked {
        name: String,
        email: String,
        days: i64,
        lock_start: DateTime<Utc>,
    },
    Deleted {
        name: String,
        reason: String,
    },
}

impl_state!(User {
    Pending => "pending",
    Validated => "validated",
    Locked => "locked",
    Deleted => "deleted",
});

impl User {
    fn name(&self) -> &str {
        match self {
            Self::Pending { name }
            | Self::Validated { name, .. }
            | Self::Locked { name, .. }
            | Self::Deleted { name, .. } => name,
        }
    }

    fn email(&self) -> &str {
        match self {
            Self::Validated { email, .. } | Self::Locked { email, .. } => email,
            _ => "",
        }
    }
}

fn validate(prev: &User, email: String) -> User {
    User::Validated {
        name: prev.name().to_string(),
        email,
    }
}

fn lock(prev: &User, days: i64) -> User {
    User::Locked {
        name: prev.name().to_string(),
        email: prev.email().to_string(),
        days,
        lock_start: Utc::now(),
    }
}

fn unlock(prev: &User, _: ()) -> User {
    validate(prev, prev.email().to_string())
}

fn delete(prev: &User, reason: String) -> User {
    User::Deleted {
        name: prev.name().to_string(),
        reason,
    }
}

fn remaining_days(state: &User, _: ()) -> i64 {
    match state {
        User::Locked {
            days, lock_start, ..
        } => (days - Utc::now().signed_duration_since(*lock_start).num_days()).max(0),
        _ => 0,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== User Account Lifecycle ===\n");

    let recorder = TransitionRecorder::new();
    let description = Description::builder()
        .transition("validate", validate)
        .transition("lock", lock)
        .transition("unlock", unlock)
        .transition("delete", delete)
        .async_transition("verify_email", |prev: Arc<User>, email: String| async move {
            // Stand-in for a round trip to a mail server.
            tokio::time::sleep(Duration::from_millis(50)).await;
            validate(&prev, email)
        })
        .method("remaining_days", remaining_days)
        .on_transition(recorder.observer())
        .build()?;

    println!("Transitions: {:?}", description.transition_names().collect::<Vec<_>>());
    println!("Methods: {:?}\n", description.method_names().collect::<Vec<_>>());

    let machine = create_machine(description);

    let pending = machine.new_instance(User::Pending {
        name: "John".to_string(),
    });
    println!("Created: {:?}", get_state(&pending));

    let validated = pending.apply("validate", "john@domain.org".to_string())?;
    println!("Validated: {:?}", get_state(&validated));

    let locked = validated.apply("lock", 7i64)?;
    let days: i64 = locked.call("remaining_days", ())?;
    println!("Locked for {days} more days");

    let unlocked = locked.apply("unlock", ())?;
    println!("Unlocked: {:?}", get_state(&unlocked));

    // The pending snapshot is still intact and can branch off on its own.
    println!("\nAsynchronous validation from the original snapshot...");
    let verified = pending
        .apply_async("verify_email", "john@other.org".to_string())
        .await?;
    println!("Verified: {:?}", get_state(&verified));

    let deleted = verified.apply("delete", "requested by user".to_string())?;
    println!("Deleted: {:?}", get_state(&deleted));

    println!("\n=== History ===");
    let history = recorder.history();
    for (i, transition) in history.transitions().iter().enumerate() {
        println!(
            "  {}. {} -> {}",
            i + 1,
            transition.from.discriminant(),
            transition.to.discriminant()
        );
    }
    println!("\nStill pending: {}", pending.discriminant());

    Ok(())
}
