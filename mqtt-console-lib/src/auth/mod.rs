//! Authentication

mod login;
mod token;

pub use login::PasswordLogin;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
