pub mod admin;
pub mod enter;
pub mod lifecycle;
pub mod oracle;
pub mod upkeep;
