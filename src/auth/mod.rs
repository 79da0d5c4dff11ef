use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::mediator::DispatchContext;

/// Identity carried by every request. Zero means "not stamped yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub const UNSET: UserId = UserId(0);

    pub fn is_unset(self) -> bool {
        self == Self::UNSET
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves the caller's identity for a dispatch
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` leaves the request's user id untouched
    async fn resolve(&self, ctx: &DispatchContext) -> Option<UserId>;
}

/// Stand-in resolver until real authentication exists: every caller is the
/// same configured user, whatever credentials were presented.
#[derive(Debug, Clone)]
pub struct PlaceholderIdentity {
    user_id: UserId,
}

impl PlaceholderIdentity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl IdentityResolver for PlaceholderIdentity {
    fn name(&self) -> &'static str {
        "PlaceholderIdentity"
    }

    async fn resolve(&self, ctx: &DispatchContext) -> Option<UserId> {
        if ctx.credentials.is_some() {
            tracing::trace!("Ignoring presented credentials, using placeholder identity");
        }
        Some(self.user_id)
    }
}
