pub mod listing;
pub mod share_token;
pub mod slug;
