//! In-memory request store with monotonically increasing ids.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{RequestPersistenceError, RequestRepository};
use crate::domain::{Request, RequestDraft, RequestId, RequestLookup, UserId};

#[derive(Debug)]
struct Rows {
    next_id: u64,
    requests: Vec<Request>,
}

impl Default for Rows {
    fn default() -> Self {
        Self {
            next_id: 1,
            requests: Vec::new(),
        }
    }
}

impl Rows {
    fn position(&self, id: RequestId) -> Option<usize> {
        self.requests.iter().position(|request| request.id() == id)
    }
}

/// Ordered request store.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryRequestRepository {
    rows: RwLock<Rows>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn add_request(
        &self,
        owner: &UserId,
        draft: RequestDraft,
    ) -> Result<Request, RequestPersistenceError> {
        let mut rows = self.rows.write().await;
        let id = RequestId::new(rows.next_id);
        rows.next_id += 1;
        let request = Request::from_draft(id, *owner, draft);
        rows.requests.push(request.clone());
        Ok(request)
    }

    async fn get_user_requests(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Request>, RequestPersistenceError> {
        let rows = self.rows.read().await;
        Ok(rows
            .requests
            .iter()
            .filter(|request| request.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        id: RequestId,
        owner: &UserId,
    ) -> Result<RequestLookup, RequestPersistenceError> {
        let rows = self.rows.read().await;
        let record = rows
            .requests
            .iter()
            .find(|request| request.id() == id)
            .cloned();
        Ok(RequestLookup::classify(record, owner))
    }

    async fn save(&self, request: &Request) -> Result<(), RequestPersistenceError> {
        let mut rows = self.rows.write().await;
        let index = rows
            .position(request.id())
            .ok_or_else(|| RequestPersistenceError::missing(request.id()))?;
        if let Some(slot) = rows.requests.get_mut(index) {
            *slot = request.clone();
        }
        Ok(())
    }

    async fn remove(&self, request: &Request) -> Result<(), RequestPersistenceError> {
        let mut rows = self.rows.write().await;
        let index = rows
            .position(request.id())
            .ok_or_else(|| RequestPersistenceError::missing(request.id()))?;
        rows.requests.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn draft(title: &str) -> RequestDraft {
        RequestDraft::try_from_parts(title, "Block A", "maintenance", None).expect("draft")
    }

    #[fixture]
    fn ann() -> UserId {
        UserId::new("33333333-3333-3333-3333-333333333333").expect("fixture id")
    }

    #[fixture]
    fn bob() -> UserId {
        UserId::new("44444444-4444-4444-4444-444444444444").expect("fixture id")
    }

    #[rstest]
    #[tokio::test]
    async fn ids_increase_and_are_not_reused(ann: UserId) {
        let repo = InMemoryRequestRepository::new();
        let first = repo.add_request(&ann, draft("one")).await.expect("add");
        let second = repo.add_request(&ann, draft("two")).await.expect("add");
        repo.remove(&second).await.expect("remove");
        let third = repo.add_request(&ann, draft("three")).await.expect("add");

        assert_eq!(first.id(), RequestId::new(1));
        assert_eq!(second.id(), RequestId::new(2));
        assert_eq!(third.id(), RequestId::new(3));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_filters_by_owner_in_insertion_order(ann: UserId, bob: UserId) {
        let repo = InMemoryRequestRepository::new();
        repo.add_request(&ann, draft("one")).await.expect("add");
        repo.add_request(&bob, draft("other")).await.expect("add");
        repo.add_request(&ann, draft("two")).await.expect("add");

        let titles: Vec<String> = repo
            .get_user_requests(&ann)
            .await
            .expect("list")
            .into_iter()
            .map(|request| request.title().to_string())
            .collect();

        assert_eq!(titles, ["one", "two"]);
    }

    #[rstest]
    #[tokio::test]
    async fn find_classifies_ownership(ann: UserId, bob: UserId) {
        let repo = InMemoryRequestRepository::new();
        let stored = repo.add_request(&ann, draft("one")).await.expect("add");

        assert_eq!(
            repo.find(RequestId::new(9), &ann).await.expect("find"),
            RequestLookup::NotFound
        );
        assert_eq!(
            repo.find(stored.id(), &bob).await.expect("find"),
            RequestLookup::NotOwned
        );
        assert_eq!(
            repo.find(stored.id(), &ann).await.expect("find"),
            RequestLookup::Found(stored)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn save_replaces_matching_record(ann: UserId) {
        let repo = InMemoryRequestRepository::new();
        let mut stored = repo.add_request(&ann, draft("one")).await.expect("add");
        stored.apply(crate::domain::RequestPatch {
            description: Some(Some("Urgent".to_owned())),
            ..Default::default()
        });
        repo.save(&stored).await.expect("save");

        let listed = repo.get_user_requests(&ann).await.expect("list");
        assert_eq!(listed, vec![stored]);
    }

    #[rstest]
    #[tokio::test]
    async fn writes_to_deleted_records_fail(ann: UserId) {
        let repo = InMemoryRequestRepository::new();
        let stored = repo.add_request(&ann, draft("one")).await.expect("add");
        repo.remove(&stored).await.expect("remove");

        let err = repo.save(&stored).await.expect_err("missing");
        assert_eq!(err, RequestPersistenceError::missing(stored.id()));
    }
}
