pub mod avatar;
pub mod email;
pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
