//! In-memory user store with the same semantics as the MongoDB one,
//! including rejection of duplicate emails (the unique index).

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::{
    models::User,
    services::user_service::{parse_id, UserService},
    utils::error::StoreError,
};

#[derive(Debug, Default)]
pub struct InMemoryUserService {
    // Vec mantém ordem de inserção, como a ordem natural da coleção
    users: RwLock<Vec<User>>,
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }
}

// Como no índice único do MongoDB, email ausente (null) também colide
fn email_taken(users: &[User], email: Option<&str>, except: Option<ObjectId>) -> bool {
    users
        .iter()
        .any(|u| u.id != except && u.email.as_deref() == email)
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if email_taken(&users, user.email.as_deref(), None) {
            return Err(StoreError::DuplicateKey(format!(
                "email '{}' already exists",
                user.email.unwrap_or_default()
            )));
        }

        let mut created = user;
        created.id = Some(ObjectId::new());
        users.push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == Some(object_id)).cloned())
    }

    async fn update_by_id(&self, id: &str, fields: User) -> Result<Option<User>, StoreError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        let mut users = self.users.write().await;

        let Some(pos) = users.iter().position(|u| u.id == Some(object_id)) else {
            return Ok(None);
        };

        if email_taken(&users, fields.email.as_deref(), Some(object_id)) {
            return Err(StoreError::DuplicateKey(format!(
                "email '{}' already exists",
                fields.email.unwrap_or_default()
            )));
        }

        let existing = &mut users[pos];
        existing.name = fields.name;
        existing.email = fields.email;
        existing.age = fields.age;
        existing.city = fields.city;

        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(false);
        };

        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != Some(object_id));
        Ok(users.len() < before)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.email.as_deref() == Some(email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User {
            id: None,
            name: Some(name.into()),
            email: Some(email.into()),
            age: Some(30),
            city: Some("NYC".into()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = InMemoryUserService::new();
        let created = store.create(user("Alice", "a@x.com")).await.unwrap();

        let id = created.id.expect("id assigned");
        assert_eq!(store.find_by_id(&id.to_hex()).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_like_unique_index() {
        let store = InMemoryUserService::new();
        store.create(user("Alice", "a@x.com")).await.unwrap();

        let result = store.create(user("Other", "a@x.com")).await;
        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let store = InMemoryUserService::new();
        store.create(user("Alice", "a@x.com")).await.unwrap();

        let missing = ObjectId::new().to_hex();
        assert_eq!(store.update_by_id(&missing, user("Bob", "b@x.com")).await.unwrap(), None);
        assert_eq!(store.update_by_id("not-an-id", user("Bob", "b@x.com")).await.unwrap(), None);

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let store = InMemoryUserService::new();
        let created = store.create(user("Alice", "a@x.com")).await.unwrap();
        let id = created.id.unwrap();

        let fields = User { id: None, name: Some("Alicia".into()), email: None, age: None, city: None };
        let updated = store.update_by_id(&id.to_hex(), fields).await.unwrap().unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.name.as_deref(), Some("Alicia"));
        assert_eq!(updated.email, None);
        assert_eq!(updated.age, None);
        assert_eq!(updated.city, None);
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_is_allowed() {
        let store = InMemoryUserService::new();
        let created = store.create(user("Alice", "a@x.com")).await.unwrap();
        store.create(user("Bob", "b@x.com")).await.unwrap();
        let id = created.id.unwrap().to_hex();

        assert!(store.update_by_id(&id, user("Alice B", "a@x.com")).await.is_ok());

        let clash = store.update_by_id(&id, user("Alice", "b@x.com")).await;
        assert!(matches!(clash, Err(StoreError::DuplicateKey(_))));
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let store = InMemoryUserService::new();
        let created = store.create(user("Alice", "a@x.com")).await.unwrap();
        let id = created.id.unwrap().to_hex();

        assert!(store.delete_by_id(&id).await.unwrap());
        assert!(!store.delete_by_id(&id).await.unwrap());
        assert!(!store.exists_by_email("a@x.com").await.unwrap());
    }
}
