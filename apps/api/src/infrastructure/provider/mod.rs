pub mod openai_client;
pub mod payload;
pub mod traits;
