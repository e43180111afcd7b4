pub mod apartments;
pub mod auth;
pub mod devices;
pub mod houses;
pub mod residents;
pub mod users;

pub use self::auth::model::LoginRequest;
pub use self::users::model::User;
