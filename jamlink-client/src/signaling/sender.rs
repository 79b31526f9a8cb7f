use async_trait::async_trait;
use jamlink_core::SignalMessage;

/// Outbound half of the signaling channel. Fire-and-forget: signaling frames
/// are not guaranteed delivery, so implementations log and drop when the
/// transport is gone instead of failing the caller.
#[async_trait]
pub trait SignalSender: Send + Sync {
    async fn send(&self, msg: SignalMessage);
}
