pub mod claims;
pub mod errors;
pub mod token;

pub use claims::Claims;
pub use errors::JwtError;
pub use token::JwtHandler;
