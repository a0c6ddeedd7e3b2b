//! Shared user lifecycle model for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use machinist::{impl_state, Description};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum User {
    Pending {
        name: String,
        age: u32,
    },
    #[serde(rename = "pending strict validation")]
    PendingStrictValidation {
        name: String,
        age: u32,
    },
    Validated {
        name: String,
        age: u32,
        email: String,
    },
    Locked {
        name: String,
        age: u32,
        email: String,
        days: i64,
        lock_start: DateTime<Utc>,
    },
    Deleted {
        name: String,
        age: u32,
        email: String,
        deletion_reason: String,
        deletion_date: DateTime<Utc>,
    },
}

impl_state!(User {
    Pending => "pending",
    PendingStrictValidation => "pending strict validation",
    Validated => "validated",
    Locked => "locked",
    Deleted => "deleted",
});

impl User {
    pub fn pending(name: &str, age: u32) -> Self {
        Self::Pending {
            name: name.to_string(),
            age,
        }
    }

    pub fn locked(days: i64, lock_start: DateTime<Utc>) -> Self {
        Self::Locked {
            name: "John".to_string(),
            age: 32,
            email: "john@domain.org".to_string(),
            days,
            lock_start,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Pending { name, .. }
            | Self::PendingStrictValidation { name, .. }
            | Self::Validated { name, .. }
            | Self::Locked { name, .. }
            | Self::Deleted { name, .. } => name,
        }
    }

    pub fn age(&self) -> u32 {
        match self {
            Self::Pending { age, .. }
            | Self::PendingStrictValidation { age, .. }
            | Self::Validated { age, .. }
            | Self::Locked { age, .. }
            | Self::Deleted { age, .. } => *age,
        }
    }

    /// Email carried forward, empty for states that never had one.
    pub fn email(&self) -> &str {
        match self {
            Self::Pending { .. } | Self::PendingStrictValidation { .. } => "",
            Self::Validated { email, .. }
            | Self::Locked { email, .. }
            | Self::Deleted { email, .. } => email,
        }
    }
}

pub fn validate(prev: &User, email: String) -> User {
    User::Validated {
        name: prev.name().to_string(),
        age: prev.age(),
        email,
    }
}

pub fn change_email(prev: &User, _: ()) -> User {
    User::Pending {
        name: prev.name().to_string(),
        age: prev.age(),
    }
}

pub fn delete(prev: &User, reason: String) -> User {
    User::Deleted {
        name: prev.name().to_string(),
        age: prev.age(),
        email: prev.email().to_string(),
        deletion_reason: reason,
        deletion_date: Utc::now(),
    }
}

pub fn change_reason(prev: &User, reason: String) -> User {
    match prev {
        User::Deleted {
            name,
            age,
            email,
            deletion_date,
            ..
        } => User::Deleted {
            name: name.clone(),
            age: *age,
            email: email.clone(),
            deletion_reason: reason,
            deletion_date: *deletion_date,
        },
        other => delete(other, reason),
    }
}

pub fn lock(prev: &User, days: i64) -> User {
    User::Locked {
        name: prev.name().to_string(),
        age: prev.age(),
        email: prev.email().to_string(),
        days,
        lock_start: Utc::now(),
    }
}

pub fn unlock(prev: &User, _: ()) -> User {
    User::Validated {
        name: prev.name().to_string(),
        age: prev.age(),
        email: prev.email().to_string(),
    }
}

pub fn remaining_days(state: &User, _: ()) -> i64 {
    match state {
        User::Locked {
            days, lock_start, ..
        } => {
            let elapsed = Utc::now().signed_duration_since(*lock_start).num_days();
            (days - elapsed).max(0)
        }
        _ => 0,
    }
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// The synchronous user lifecycle.
pub fn user_description() -> Description<User> {
    Description::builder()
        .transition("validate", validate)
        .transition("change_email", change_email)
        .transition("change_reason", change_reason)
        .transition("delete", delete)
        .transition("lock", lock)
        .transition("unlock", unlock)
        .method("get_remaining_days", remaining_days)
        .build()
        .unwrap()
}

/// The user lifecycle plus an asynchronous validation taking `delay_ms`.
pub fn async_user_description(delay_ms: u64) -> Description<User> {
    Description::builder()
        .include(&user_description())
        .async_transition("strict_validate", move |prev: Arc<User>, email: String| async move {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            validate(&prev, email)
        })
        .build()
        .unwrap()
}
