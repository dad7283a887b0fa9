//! Per-request stream orchestration

use super::types::{ComposerState, OutboundFragment};
use super::utils::{MISSING_PROMPT_ERROR, error_message, heartbeat};
use crate::core::completion::CompletionAggregator;
use crate::core::types::ChatInput;
use crate::utils::error::{GatewayError, Result};
use actix_web::web;
use futures::stream::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at, sleep};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

/// Timer and buffering settings for composed streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSettings {
    /// Gap between heartbeat comments
    pub heartbeat_interval: Duration,
    /// How long to wait for the first upstream fragment before falling back
    pub first_fragment_timeout: Duration,
    /// Outbound channel capacity
    pub channel_capacity: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(20),
            first_fragment_timeout: Duration::from_secs(7),
            channel_capacity: 64,
        }
    }
}

impl StreamSettings {
    pub fn new(heartbeat_interval: Duration, first_fragment_timeout: Duration) -> Self {
        Self {
            heartbeat_interval,
            first_fragment_timeout,
            ..Self::default()
        }
    }
}

/// How the streaming phase ended
#[derive(Debug)]
enum StreamOutcome {
    /// Upstream finished after at least one non-blank message
    Completed,
    /// Upstream finished without a non-blank message
    Empty,
    /// Nothing arrived before the first-fragment timeout
    TimedOut,
    /// Transport failure before any non-blank message
    FailedEarly(GatewayError),
    /// Transport failure after at least one non-blank message
    Failed(GatewayError),
    /// The client went away
    Disconnected,
}

/// Builds the client-facing fragment stream for one request
#[derive(Clone)]
pub struct OutboundComposer {
    aggregator: Arc<CompletionAggregator>,
    settings: StreamSettings,
}

impl OutboundComposer {
    pub fn new(aggregator: Arc<CompletionAggregator>, settings: StreamSettings) -> Self {
        Self {
            aggregator,
            settings,
        }
    }

    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }

    /// Start composing the answer to `input` on a background task.
    ///
    /// The returned stream ends right after its single `Done` fragment. Dropping it stops
    /// the task and closes any upstream connection it holds.
    pub fn compose(self, input: ChatInput) -> ReceiverStream<OutboundFragment> {
        let (tx, rx) = mpsc::channel(self.settings.channel_capacity.max(1));
        let span = info_span!("compose", request_id = %Uuid::new_v4());

        tokio::spawn(self.run(input, FragmentSink::new(tx)).instrument(span));

        ReceiverStream::new(rx)
    }

    /// [`compose`](Self::compose), framed as SSE bytes
    pub fn into_sse_stream(
        self,
        input: ChatInput,
    ) -> impl Stream<Item = Result<web::Bytes>> + Send + 'static {
        self.compose(input)
            .map(|fragment| Ok::<_, GatewayError>(fragment.to_event().to_bytes()))
    }

    async fn run(self, input: ChatInput, mut sink: FragmentSink) {
        if input.is_blank() {
            sink.enter(ComposerState::Errored);
            sink.send(error_message(MISSING_PROMPT_ERROR)).await;
            sink.finish().await;
            return;
        }

        sink.enter(ComposerState::Streaming);
        let period = self.settings.heartbeat_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let delivered = match self.stream_upstream(&input, &mut sink, &mut ticker).await {
            StreamOutcome::Completed => true,
            StreamOutcome::Disconnected => false,
            StreamOutcome::Empty => {
                sink.enter(ComposerState::EmptyFallback);
                self.fallback(&input, &mut sink, &mut ticker).await
            }
            StreamOutcome::TimedOut => {
                sink.enter(ComposerState::TimeoutFallback);
                self.fallback(&input, &mut sink, &mut ticker).await
            }
            StreamOutcome::FailedEarly(e) => {
                warn!(error = %e, "upstream failed before any message, falling back");
                sink.enter(ComposerState::EmptyFallback);
                self.fallback(&input, &mut sink, &mut ticker).await
            }
            StreamOutcome::Failed(e) => {
                warn!(error = %e, "upstream failed mid-stream");
                sink.enter(ComposerState::Errored);
                sink.send(error_message(&e)).await
            }
        };
        drop(ticker);

        if delivered {
            sink.finish().await;
        } else {
            debug!("client disconnected, composer stopped");
        }
    }

    /// Forward upstream fragments until the upstream ends, fails, stalls, or the client
    /// leaves. The upstream stream is dropped before this returns.
    ///
    /// Whitespace-only fragments are forwarded but do not count as an answer: they neither
    /// stop the first-fragment timeout nor prevent the empty fallback.
    async fn stream_upstream(
        &self,
        input: &ChatInput,
        sink: &mut FragmentSink,
        ticker: &mut Interval,
    ) -> StreamOutcome {
        let mut upstream = self.aggregator.stream(input);
        let watchdog = sleep(self.settings.first_fragment_timeout);
        tokio::pin!(watchdog);
        let mut answered = false;

        loop {
            tokio::select! {
                biased;

                _ = sink.closed() => return StreamOutcome::Disconnected,
                item = upstream.next() => match item {
                    Some(Ok(text)) if text.is_empty() => {}
                    Some(Ok(text)) => {
                        answered |= !text.trim().is_empty();
                        if !sink.send(OutboundFragment::Message(text)).await {
                            return StreamOutcome::Disconnected;
                        }
                    }
                    Some(Err(e)) if !answered => return StreamOutcome::FailedEarly(e),
                    Some(Err(e)) => return StreamOutcome::Failed(e),
                    None if !answered => return StreamOutcome::Empty,
                    None => return StreamOutcome::Completed,
                },
                _ = &mut watchdog, if !answered => {
                    debug!(
                        timeout_ms = self.settings.first_fragment_timeout.as_millis() as u64,
                        "no upstream fragment before timeout"
                    );
                    return StreamOutcome::TimedOut;
                }
                _ = ticker.tick() => {
                    if !sink.send(heartbeat()).await {
                        return StreamOutcome::Disconnected;
                    }
                }
            }
        }
    }

    /// One non-streaming call, with heartbeats kept alive while it runs.
    /// Returns false when the client is gone.
    async fn fallback(
        &self,
        input: &ChatInput,
        sink: &mut FragmentSink,
        ticker: &mut Interval,
    ) -> bool {
        let call = self.aggregator.complete_once(input);
        tokio::pin!(call);

        let result = loop {
            tokio::select! {
                biased;

                _ = sink.closed() => return false,
                result = &mut call => break result,
                _ = ticker.tick() => {
                    if !sink.send(heartbeat()).await {
                        return false;
                    }
                }
            }
        };

        match result {
            Ok(answer) if answer.is_blank() => {
                debug!("fallback answer was blank");
                true
            }
            Ok(answer) => sink.send(OutboundFragment::Message(answer.text)).await,
            Err(e) => {
                warn!(error = %e, "fallback call failed");
                sink.enter(ComposerState::Errored);
                sink.send(error_message(&e)).await
            }
        }
    }
}

/// Sending half of a composed stream; refuses everything once `Done` went out
struct FragmentSink {
    tx: mpsc::Sender<OutboundFragment>,
    state: ComposerState,
}

impl FragmentSink {
    fn new(tx: mpsc::Sender<OutboundFragment>) -> Self {
        Self {
            tx,
            state: ComposerState::Init,
        }
    }

    /// Resolves once the client side of the channel is gone
    async fn closed(&self) {
        self.tx.closed().await
    }

    fn enter(&mut self, next: ComposerState) {
        debug!(from = ?self.state, to = ?next, "composer transition");
        self.state = next;
    }

    /// False when the fragment could not be delivered
    async fn send(&mut self, fragment: OutboundFragment) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.tx.send(fragment).await.is_ok()
    }

    async fn finish(&mut self) {
        if self.send(OutboundFragment::Done).await {
            self.enter(ComposerState::Done);
        }
    }
}
