pub mod messages;
#[cfg(feature = "kafka")]
pub mod producer;

#[cfg(feature = "kafka")]
pub use producer::KafkaNotifier;
