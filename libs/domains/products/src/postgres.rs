use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entity,
    error::ProductResult,
    models::Product,
    store::{Change, ChangeSet, ProductQuery, ProductStore},
};

/// strpos instead of LIKE so `%` and `_` in the term match literally
const NAME_CONTAINS: &str = r#"strpos(lower("name"), lower($1)) > 0"#;

/// PostgreSQL store. Identifiers are UUIDv7, so ordering by `id` is insertion order.
#[derive(Clone)]
pub struct PgProductStore {
    db: DatabaseConnection,
}

impl PgProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self))]
    async fn find(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn scan(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let mut select = entity::Entity::find();

        if let Some(term) = query.search {
            select = select.filter(Expr::cust_with_values(NAME_CONTAINS, [term]));
        }

        let models = select
            .order_by_asc(entity::Column::Id)
            .offset(query.skip)
            .limit(query.take)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    #[instrument(skip_all, fields(changes = changes.len()))]
    async fn commit(&self, changes: ChangeSet) -> ProductResult<usize> {
        if changes.is_empty() {
            return Ok(0);
        }

        // Dropping the transaction on an early return rolls it back
        let txn = self.db.begin().await?;
        let mut affected: u64 = 0;

        for change in changes {
            affected += match change {
                Change::Insert(product) => {
                    entity::ActiveModel::from(product).insert(&txn).await?;
                    1
                }
                Change::Update(product) => {
                    let id = product.id;
                    let mut model = entity::ActiveModel::from(product);
                    model.id = NotSet;

                    entity::Entity::update_many()
                        .set(model)
                        .filter(entity::Column::Id.eq(id))
                        .exec(&txn)
                        .await?
                        .rows_affected
                }
                Change::Remove(id) => {
                    entity::Entity::delete_by_id(id)
                        .exec(&txn)
                        .await?
                        .rows_affected
                }
            };
        }

        txn.commit().await?;
        tracing::debug!(affected, "Committed product changes");
        Ok(affected as usize)
    }
}
