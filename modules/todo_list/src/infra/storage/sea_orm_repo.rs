//! SeaORM-backed repository implementation for the domain port.
//!
//! This struct is generic over `C: ConnectionTrait`, so you can construct it
//! with a `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::sea_query::{Condition, Expr, Func, LikeExpr};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::contract::model::{Todo, TodoFilters};
use crate::domain::repo::TodoRepository;
use crate::infra::storage::entity::{ActiveModel as TodoAM, Column, Entity as TodoEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmTodoRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmTodoRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> TodoRepository for SeaOrmTodoRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Todo>> {
        let found = TodoEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, todo: Todo) -> anyhow::Result<()> {
        let m = TodoAM {
            id: Set(todo.id),
            title: Set(todo.title),
            description: Set(todo.description),
            completed: Set(todo.completed),
            owner_id: Set(todo.owner_id),
            created_at: Set(todo.created_at),
            updated_at: Set(todo.updated_at),
        };
        let _ = m.insert(&self.conn).await.context("insert failed")?;
        Ok(())
    }

    async fn update(&self, todo: Todo) -> anyhow::Result<()> {
        let m = TodoAM {
            id: Set(todo.id),
            title: Set(todo.title),
            description: Set(todo.description),
            completed: Set(todo.completed),
            owner_id: Set(todo.owner_id),
            created_at: Set(todo.created_at),
            updated_at: Set(todo.updated_at),
        };
        let _ = m.update(&self.conn).await.context("update failed")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = TodoEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, filters: &TodoFilters) -> anyhow::Result<Vec<Todo>> {
        let mut cond = Condition::all();

        if let Some(completed) = filters.completed {
            cond = cond.add(Column::Completed.eq(completed));
        }
        if let Some(owner_id) = filters.owner_id {
            cond = cond.add(Column::OwnerId.eq(owner_id));
        }
        if let Some(search) = filters.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                // lower() on both sides keeps the match case-insensitive
                // across sqlite and postgres. The needle is escaped so `%`
                // and `_` in user input match literally, like the in-memory
                // substring search.
                let pattern =
                    LikeExpr::new(format!("%{}%", escape_like(&needle))).escape('\\');
                cond = cond.add(
                    Condition::any()
                        .add(
                            Expr::expr(Func::lower(Expr::col(Column::Title)))
                                .like(pattern.clone()),
                        )
                        .add(Expr::expr(Func::lower(Expr::col(Column::Description))).like(pattern)),
                );
            }
        }

        let rows = TodoEntity::find()
            .filter(cond)
            .order_by_desc(Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("list failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Escape LIKE metacharacters so the search text matches literally.
/// Pairs with the `ESCAPE '\'` clause on the pattern.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
