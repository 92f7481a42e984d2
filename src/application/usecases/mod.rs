pub mod close_message;
pub mod get_message;
pub mod list_open_messages;
pub mod submit_message;

#[cfg(test)]
mod testing;
