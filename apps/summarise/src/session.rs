//! Line-driven interactive session over both actions.

use anyhow::Result;
use client_core::{DisplayState, HealthProbe, InvocationHandle, Summarizer};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::debug;

use crate::view;

/// Final display states once every issued invocation has resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub health: DisplayState,
    pub summary: DisplayState,
}

impl SessionSummary {
    pub fn failed(&self) -> bool {
        self.health == DisplayState::Failed || self.summary == DisplayState::Failed
    }
}

/// Reads commands from `input` until it ends or a `quit`/`exit` line:
/// `health` triggers the health action, any other non-blank line is a URL
/// to summarise. Every visible state change is sent to `output` as a
/// `[label] text` line. Returns only after all issued invocations have
/// resolved and their final states were rendered.
pub async fn run_session<R>(
    input: R,
    probe: HealthProbe,
    summarizer: Summarizer,
    output: mpsc::UnboundedSender<String>,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
{
    let renderers = [
        Renderer::spawn("health", probe.subscribe(), output.clone()),
        Renderer::spawn("summary", summarizer.subscribe(), output),
    ];

    let mut issued: Vec<InvocationHandle> = Vec::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "health" => issued.push(probe.trigger()),
            url => issued.push(summarizer.trigger(url)),
        }
    }

    debug!(outstanding = issued.len(), "input closed; waiting for invocations");
    for handle in issued {
        handle.outcome().await?;
    }
    for renderer in renderers {
        renderer.finish().await?;
    }

    Ok(SessionSummary {
        health: probe.state(),
        summary: summarizer.state(),
    })
}

struct Renderer {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Renderer {
    fn spawn(
        label: &'static str,
        mut states: watch::Receiver<DisplayState>,
        output: mpsc::UnboundedSender<String>,
    ) -> Self {
        let (stop, mut stopped) = oneshot::channel();
        let task = tokio::spawn(async move {
            let emit = |state: &DisplayState| {
                if *state != DisplayState::Idle {
                    let _ = output.send(format!("[{label}] {}", view::render(state)));
                }
            };
            loop {
                tokio::select! {
                    biased;
                    changed = states.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        emit(&*states.borrow_and_update());
                    }
                    _ = &mut stopped => {
                        if states.has_changed().unwrap_or(false) {
                            emit(&*states.borrow_and_update());
                        }
                        break;
                    }
                }
            }
        });
        Self { stop, task }
    }

    /// Flushes the latest unseen state, then stops the task.
    async fn finish(self) -> Result<()> {
        let _ = self.stop.send(());
        self.task.await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
