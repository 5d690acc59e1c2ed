// ============================================================================
// Infrastructure Layer - Relational Persistence
// ============================================================================
//
// sqlx-backed implementations of the domain `Repository` trait.
// Each repository translates one aggregate to and from its tables.
//
// ============================================================================

pub mod db;

pub use db::{
    connect, create_pool, run_migrations, CustomerRepository, OrderRepository, ProductRepository,
    RepositoryError,
};
