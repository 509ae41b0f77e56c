//! Access gate for dashboard page views.
//!
//! # Responsibility
//! - Carry the resolved identity and allow-list of one request.
//! - Reject unauthenticated or non-allow-listed callers before any feed is
//!   fetched.
//!
//! # Invariants
//! - The gate fails closed: a missing identity is never treated as allowed.
//! - Email comparison is exact after trimming surrounding whitespace.

use chrono::{Local, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Identity resolved by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            picture: None,
        }
    }
}

/// Emails permitted to view the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    emails: BTreeSet<String>,
}

impl AllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|email| email.as_ref().trim().to_string())
                .filter(|email| !email.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(email.trim())
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// Per-request context passed explicitly through the service.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub identity: Option<Identity>,
    pub allow_list: Arc<AllowList>,
    /// Date the page is computed for; decides current year and month.
    pub today: NaiveDate,
}

impl RequestContext {
    pub fn new(identity: Option<Identity>, allow_list: Arc<AllowList>, today: NaiveDate) -> Self {
        Self {
            identity,
            allow_list,
            today,
        }
    }

    /// Context dated with the host's local calendar day.
    pub fn for_today(identity: Option<Identity>, allow_list: Arc<AllowList>) -> Self {
        Self::new(identity, allow_list, Local::now().date_naive())
    }
}

/// Gate rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    LoginRequired,
    Forbidden { email: String },
}

impl AccessError {
    /// Blocking message shown to the viewer.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::LoginRequired => "⛔ 로그인 필요: 먼저 홈 화면에서 로그인해 주세요.",
            Self::Forbidden { .. } => "⛔ 접근 불가: 권한이 없습니다.",
        }
    }
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoginRequired => write!(f, "login required"),
            Self::Forbidden { email } => write!(f, "forbidden: {email} is not allow-listed"),
        }
    }
}

impl Error for AccessError {}

/// Stateless fail-closed gate.
pub struct AccessGate;

impl AccessGate {
    /// Returns the admitted identity, or the reason for rejection.
    pub fn check(context: &RequestContext) -> Result<&Identity, AccessError> {
        let Some(identity) = context.identity.as_ref() else {
            warn!("event=access_denied module=access reason=login_required");
            return Err(AccessError::LoginRequired);
        };
        if !context.allow_list.contains(&identity.email) {
            warn!(
                "event=access_denied module=access reason=forbidden domain={}",
                email_domain(&identity.email)
            );
            return Err(AccessError::Forbidden {
                email: identity.email.clone(),
            });
        }
        Ok(identity)
    }
}

/// Domain part of an email for metadata-only logging.
fn email_domain(email: &str) -> &str {
    email.rsplit_once('@').map_or("unknown", |(_, domain)| domain)
}
