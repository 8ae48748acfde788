pub mod pending;
pub mod query_usecase;

pub use pending::PendingActions;
pub use query_usecase::QueryUseCase;
