use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;

use crate::{Authorizer, FeedItem, Identity, PermitAll, Verdicts};

/// Handle through which an adaptor sends identities to the crawl system.
///
/// Implemented by the hosting runtime, which owns feed serialization and
/// transport.
#[async_trait]
pub trait DocIdPusher: Send + Sync {
    /// Error reported when the transport fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Push `items` in order.
    ///
    /// Returns the first item that could not be sent, or `None` when every
    /// item was accepted.
    async fn push(&self, items: Vec<FeedItem>) -> Result<Option<FeedItem>, Self::Error>;
}

/// Repository-specific behavior the hosting runtime calls into.
///
/// Both methods have fallbacks: adaptors that never push on their own can
/// ignore the pusher, and adaptors without an access model get the answers of
/// [`PermitAll`].
pub trait Adaptor: Send + Sync {
    /// Push channel handle used by this adaptor.
    type Pusher: DocIdPusher;

    /// Receive the push channel. Called once by the runtime at startup.
    /// Does nothing by default.
    fn set_doc_id_pusher(&mut self, pusher: Arc<Self::Pusher>) {
        let _ = pusher;
    }

    /// Decide whether `user` may read each of `ids`. Permits everything by
    /// default.
    fn is_user_authorized(
        &self,
        user: &str,
        groups: &HashSet<String>,
        ids: &[Identity],
    ) -> Verdicts {
        PermitAll.is_user_authorized(user, groups, ids)
    }
}
