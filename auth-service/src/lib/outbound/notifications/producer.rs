use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use rdkafka::util::Timeout;

use crate::config::KafkaConfig;
use crate::domain::credentials::notification::Notification;
use crate::domain::credentials::ports::Notifier;
use crate::domain::errors::NotifierError;
use crate::outbound::notifications::messages::NotificationMessage;

/// Kafka-backed notifier. Each message goes to the topic its notification
/// names, keyed by recipient.
pub struct KafkaNotifier {
    producer: FutureProducer,
    timeout: Duration,
}

impl KafkaNotifier {
    /// Create a new Kafka notifier with "at least once" delivery semantics
    ///
    /// # Notes:
    /// - `acks=all`: Wait for all in-sync replicas to acknowledge
    /// - `enable.idempotence=true`: Prevents duplicate messages during retries
    /// - `retry.backoff.ms=100`: Backoff between retry attempts
    pub fn new(config: &KafkaConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(brokers = %config.brokers, "Initializing Kafka notifier");

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "30000")
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "10")
            .set("max.in.flight.requests.per.connection", "5")
            .set("retry.backoff.ms", "100")
            .create()?;

        tracing::info!("Kafka notifier initialized");

        Ok(Self {
            producer,
            timeout: Duration::from_secs(30),
        })
    }
}

#[async_trait]
impl Notifier for KafkaNotifier {
    async fn enqueue(&self, notification: Notification) -> Result<(), NotifierError> {
        let message = NotificationMessage::from(notification);
        let payload = serde_json::to_string(&message)
            .map_err(|e| NotifierError::SerializationFailed(e.to_string()))?;

        tracing::debug!(
            topic = %message.topic,
            event_id = %message.event_id,
            recipient = %message.recipient,
            "Publishing notification"
        );

        self.producer
            .send(record(&message, &payload), Timeout::After(self.timeout))
            .await
            .map(|_| {
                tracing::debug!(
                    topic = %message.topic,
                    event_id = %message.event_id,
                    "Notification published"
                );
            })
            .map_err(|(err, _)| NotifierError::PublishFailed(err.to_string()))
    }
}

fn record<'a>(message: &'a NotificationMessage, payload: &'a str) -> FutureRecord<'a, str, str> {
    FutureRecord::to(&message.topic)
        .key(message.recipient.as_str())
        .payload(payload)
}
