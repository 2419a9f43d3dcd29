//! Anti-forgery keys and the re-authentication form

mod login;
mod validation;

pub use login::LoginForm;
pub use validation::RotatingValidationKey;
pub use validation::StaticValidationKey;
pub use validation::ValidationKey;
pub use validation::ValidationKeyProvider;
