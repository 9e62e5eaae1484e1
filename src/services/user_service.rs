// ==================== USER DATA ACCESS ====================
// Uma operação no MongoDB por método, sem regra de negócio.
// Checagens de unicidade e existência ficam com o handler.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};

use crate::{database::MongoDB, models::User, utils::error::StoreError};

pub const COLLECTION: &str = "users";

#[async_trait]
pub trait UserService: Send + Sync {
    /// Insere um novo documento; o store atribui o identificador
    async fn create(&self, user: User) -> Result<User, StoreError>;

    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Ausência não é erro
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Sobrescreve name, email, age e city (campos ausentes viram null)
    /// e relê o documento. Se nenhum documento casar, o update é no-op e
    /// o resultado é `None`.
    async fn update_by_id(&self, id: &str, fields: User) -> Result<Option<User>, StoreError>;

    /// `true` se pelo menos um documento foi removido
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;
}

/// Um identificador malformado não casa com nenhum documento
pub(crate) fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

pub struct MongoUserService {
    collection: Collection<User>,
}

impl MongoUserService {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<User>(COLLECTION),
        }
    }
}

#[async_trait]
impl UserService for MongoUserService {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        let result = self.collection.insert_one(&user).await?;
        let id = result.inserted_id.as_object_id().ok_or(StoreError::MissingId)?;

        log::debug!("📝 Inserted user {}", id.to_hex());

        let mut created = user;
        created.id = Some(id);
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        Ok(self.collection.find_one(doc! { "_id": object_id }).await?)
    }

    async fn update_by_id(&self, id: &str, fields: User) -> Result<Option<User>, StoreError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        self.collection
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": {
                    "name": fields.name,
                    "email": fields.email,
                    "age": fields.age,
                    "city": fields.city,
                } },
            )
            .await?;

        Ok(self.collection.find_one(doc! { "_id": object_id }).await?)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(doc! { "_id": object_id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .limit(1)
            .await?;
        Ok(count > 0)
    }
}
