pub mod channel_id;
pub mod validated_json;

pub use channel_id::ChannelId;
pub use validated_json::ValidatedJson;
