pub mod repositories;
pub mod verification;
