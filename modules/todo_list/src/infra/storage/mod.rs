pub mod entity;
pub mod mem_repo;
pub mod migrations;
pub mod sea_orm_repo;

pub use mem_repo::InMemoryTodoRepository;
pub use migrations::Migrator;
pub use sea_orm_repo::SeaOrmTodoRepository;
