pub mod account;
pub mod account_id;
pub mod claims;
pub mod email;
pub mod name;
pub mod password;
pub mod password_hash;
pub mod role;
pub mod tokens;
