pub mod hashmap_account_store;
pub mod postgres_account_store;
pub mod timed_account_store;

pub use hashmap_account_store::HashMapAccountStore;
pub use postgres_account_store::PostgresAccountStore;
pub use timed_account_store::TimedAccountStore;
