pub mod blacklist;

pub use blacklist::HttpBlacklistClient;
