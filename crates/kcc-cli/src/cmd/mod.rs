pub mod check_message;
pub mod detect;
pub mod find;
pub mod mcp;
pub mod plan;
pub mod status;
