pub mod use_authentication;
pub mod use_available_requests;
pub mod use_logout;
pub mod use_my_requests;
pub mod use_query_client;
pub mod use_query_snapshot;

pub use use_authentication::use_authentication;
pub use use_available_requests::use_available_requests;
pub use use_logout::use_logout;
pub use use_my_requests::use_my_requests;
pub use use_query_client::use_query_client;
pub use use_query_snapshot::use_query_snapshot;
