//! Scripted fragment sources for exercising the aggregator and composer

use super::{FragmentSource, FragmentStream};
use crate::core::types::ChatInput;
use crate::utils::error::GatewayError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// What a scripted call produces
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    /// Yield these fragments, then end
    Fragments(Vec<&'static str>),
    /// Wait, then yield these fragments and end
    Delayed(Duration, Vec<&'static str>),
    /// Yield these fragments, then never yield again
    FragmentsThenStall(Vec<&'static str>),
    /// Yield these fragments, then fail
    FragmentsThenFail(Vec<&'static str>, &'static str),
}

impl Reply {
    pub(crate) fn text(text: &'static str) -> Self {
        Reply::Fragments(vec![text])
    }

    pub(crate) fn empty() -> Self {
        Reply::Fragments(Vec::new())
    }

    pub(crate) fn stall() -> Self {
        Reply::FragmentsThenStall(Vec::new())
    }

    pub(crate) fn fail(message: &'static str) -> Self {
        Reply::FragmentsThenFail(Vec::new(), message)
    }
}

/// Records `open:<kind>` when a call starts and `close:<kind>` when its stream is dropped,
/// where kind is `stream` or `once`.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub(crate) fn push(&self, entry: String) {
        self.0.lock().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

struct CloseGuard {
    log: CallLog,
    kind: &'static str,
}

impl Drop for CloseGuard {
    fn drop(&mut self) {
        self.log.push(format!("close:{}", self.kind));
    }
}

/// Source answering streaming calls with one script and non-streaming calls with another
pub(crate) struct ScriptedSource {
    streaming: Reply,
    one_shot: Reply,
    pub(crate) log: CallLog,
}

impl ScriptedSource {
    pub(crate) fn new(streaming: Reply, one_shot: Reply) -> Self {
        Self {
            streaming,
            one_shot,
            log: CallLog::default(),
        }
    }
}

impl FragmentSource for ScriptedSource {
    fn stream(&self, _input: &ChatInput, streaming: bool) -> FragmentStream {
        let (kind, reply) = if streaming {
            ("stream", self.streaming.clone())
        } else {
            ("once", self.one_shot.clone())
        };
        self.log.push(format!("open:{}", kind));
        let guard = CloseGuard {
            log: self.log.clone(),
            kind,
        };

        Box::pin(async_stream::stream! {
            let _guard = guard;
            let (delay, fragments, tail) = match reply {
                Reply::Fragments(f) => (None, f, None),
                Reply::Delayed(d, f) => (Some(d), f, None),
                Reply::FragmentsThenStall(f) => (None, f, Some(None)),
                Reply::FragmentsThenFail(f, message) => (None, f, Some(Some(message))),
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            for fragment in fragments {
                yield Ok::<String, GatewayError>(fragment.to_string());
            }
            match tail {
                None => {}
                Some(None) => futures::future::pending::<()>().await,
                Some(Some(message)) => yield Err(GatewayError::upstream(message)),
            }
        })
    }
}
