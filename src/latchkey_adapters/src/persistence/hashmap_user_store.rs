use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use latchkey_core::{Email, Page, PageRequest, User, UserId, UserStore, UserStoreError};

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().any(|user| user.email() == email))
    }

    async fn save_user(&self, user: User) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|existing| existing.email() == user.email() && existing.id() != user.id());
        if taken {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(*user.id(), user.clone());
        Ok(user)
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UserStoreError> {
        let users = self.users.read().await;
        let mut ordered: Vec<&User> = users.values().collect();
        ordered.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });

        let offset = usize::try_from(page.offset())
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let content = ordered
            .into_iter()
            .skip(offset)
            .take(page.size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, page, users.len() as u64))
    }
}
