//! The interactive event loop.
//!
//! [`run`] owns the terminal and the [`AppState`]. Every backend request is
//! handed to a [`Dispatcher`], which runs it in its own task and sends the
//! outcome back over the same channel the [`EventHandler`] feeds. Outcomes
//! are applied in the order they arrive; there is no cancellation.

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::api::{AssistantApi, TaskApi};
use crate::config::Config;
use crate::error::{ClientError, TuiError};
use crate::tui::app::{AppState, ConnectionStatus, Effect, EventHandler, Symbols, Theme, TuiEvent};
use crate::tui::input::{check_health, handle_key};
use crate::tui::terminal::{install_panic_hook, Tui};
use crate::tui::ui;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Runs [`Effect`]s in spawned tasks and reports their outcomes as
/// [`TuiEvent`]s.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tasks: TaskApi,
    assistant: AssistantApi,
    events: mpsc::Sender<TuiEvent>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(tasks: TaskApi, assistant: AssistantApi, events: mpsc::Sender<TuiEvent>) -> Self {
        Self {
            tasks,
            assistant,
            events,
        }
    }

    /// Spawns the request described by `effect`.
    pub fn dispatch(&self, effect: Effect) -> JoinHandle<()> {
        let tasks = self.tasks.clone();
        let assistant = self.assistant.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let event = match effect {
                Effect::Task(request) => TuiEvent::TaskCompleted(request.execute(&tasks).await),
                Effect::Assistant(request) => {
                    TuiEvent::AssistantCompleted(request.execute(&assistant).await)
                }
                Effect::CheckHealth => TuiEvent::HealthChecked(health_status(&assistant).await),
            };

            if events.send(event).await.is_err() {
                debug!("UI loop closed before request completed");
            }
        })
    }
}

async fn health_status(api: &AssistantApi) -> ConnectionStatus {
    match api.health().await {
        Ok(status) => {
            info!(status = %status.trim(), "AI service healthy");
            ConnectionStatus::Connected
        }
        Err(e) => {
            warn!(error = %e, "AI service health check failed");
            ConnectionStatus::Error
        }
    }
}

/// Runs the TUI until the user quits.
///
/// Loads the task list and checks AI health on start-up.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built, if the terminal
/// cannot be initialized, drawn, or restored, or if terminal input stops
/// before the user quits.
pub async fn run(config: &Config) -> Result<(), ClientError> {
    let task_api = TaskApi::new(&config.tasks_url, config.request_timeout)?;
    let ai_api = AssistantApi::new(&config.ai_url, config.request_timeout)?;

    install_panic_hook();
    let mut tui = Tui::new()?;

    let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let mut handler_task = tokio::spawn(EventHandler::new(event_tx.clone(), shutdown_rx).run());
    let dispatcher = Dispatcher::new(task_api, ai_api, event_tx);

    let mut state = AppState {
        theme: Theme::from_env(),
        symbols: Symbols::detect(),
        ..AppState::default()
    };

    info!(tasks_url = %config.tasks_url, ai_url = %config.ai_url, "Starting TUI");
    dispatcher.dispatch(Effect::Task(state.tasks.begin_load()));
    dispatcher.dispatch(check_health(&mut state));

    tui.draw(|frame| ui::render(frame, &mut state))?;

    // Set if the event handler ends before the user quits.
    let mut handler_result = None;
    loop {
        let event = tokio::select! {
            event = event_rx.recv() => event,
            result = &mut handler_task => {
                handler_result = Some(handler_exit(result));
                break;
            }
        };
        let Some(event) = event else {
            break;
        };

        match event {
            TuiEvent::Tick | TuiEvent::Resize(..) => {}
            TuiEvent::Key(key) => {
                if let Some(effect) = handle_key(&mut state, key) {
                    debug!(?effect, "Dispatching request");
                    dispatcher.dispatch(effect);
                }
            }
            TuiEvent::TaskCompleted(outcome) => state.apply_task_outcome(outcome),
            TuiEvent::AssistantCompleted(outcome) => state.apply_ai_outcome(outcome),
            TuiEvent::HealthChecked(status) => state.ai_status = status,
        }

        if state.should_quit() {
            break;
        }
        tui.draw(|frame| ui::render(frame, &mut state))?;
    }

    if handler_result.is_none() {
        let _ = shutdown_tx.send(());
        if let Err(e) = handler_exit(handler_task.await) {
            warn!(error = %e, "Event handler stopped with error");
        }
    }

    tui.restore()?;
    info!("TUI exited");

    if let Some(Err(e)) = handler_result {
        return Err(e.into());
    }
    Ok(())
}

/// Flattens the event handler task's result.
fn handler_exit(result: Result<std::io::Result<()>, JoinError>) -> Result<(), TuiError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(TuiError::Event(e.to_string())),
        Err(e) => Err(TuiError::Event(format!("event handler task failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{AiOutcome, AiRequest};
    use crate::task_list::{TaskOutcome, TaskRequest};
    use crate::types::AnalysisKind;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn dispatcher_for(server: &MockServer) -> (Dispatcher, mpsc::Receiver<TuiEvent>) {
        let tasks = TaskApi::new(&format!("{}/api/todos", server.uri()), None).unwrap();
        let assistant = AssistantApi::new(&format!("{}/api/ai", server.uri()), None).unwrap();
        let (tx, rx) = mpsc::channel(8);
        (Dispatcher::new(tasks, assistant, tx), rx)
    }

    #[tokio::test]
    async fn task_effect_reports_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "Buy milk", "completed": false}
            ])))
            .mount(&server)
            .await;

        let (dispatcher, mut rx) = dispatcher_for(&server).await;
        dispatcher.dispatch(Effect::Task(TaskRequest::Load)).await.unwrap();

        match rx.recv().await {
            Some(TuiEvent::TaskCompleted(TaskOutcome::Loaded(Ok(tasks)))) => {
                assert_eq!(tasks.len(), 1);
                assert_eq!(tasks[0].title, "Buy milk");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn assistant_effect_reports_failure_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ai/prioritize"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (dispatcher, mut rx) = dispatcher_for(&server).await;
        dispatcher
            .dispatch(Effect::Assistant(AiRequest::Analyze(AnalysisKind::Priority)))
            .await
            .unwrap();

        match rx.recv().await {
            Some(TuiEvent::AssistantCompleted(AiOutcome::Analysis { kind, result })) => {
                assert_eq!(kind, AnalysisKind::Priority);
                assert!(result.is_err());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn health_effect_maps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ai/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Ollama OK"))
            .mount(&server)
            .await;

        let (dispatcher, mut rx) = dispatcher_for(&server).await;
        dispatcher.dispatch(Effect::CheckHealth).await.unwrap();
        assert!(matches!(
            rx.recv().await,
            Some(TuiEvent::HealthChecked(ConnectionStatus::Connected))
        ));
    }

    #[tokio::test]
    async fn unhealthy_service_maps_to_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ai/health"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Ollama unreachable"))
            .mount(&server)
            .await;

        let (dispatcher, mut rx) = dispatcher_for(&server).await;
        dispatcher.dispatch(Effect::CheckHealth).await.unwrap();
        assert!(matches!(
            rx.recv().await,
            Some(TuiEvent::HealthChecked(ConnectionStatus::Error))
        ));
    }

    #[tokio::test]
    async fn dispatch_after_loop_closed_does_not_panic() {
        let server = MockServer::start().await;
        let (dispatcher, rx) = dispatcher_for(&server).await;
        drop(rx);
        dispatcher.dispatch(Effect::CheckHealth).await.unwrap();
    }

    #[test]
    fn handler_exit_maps_failures_to_event_errors() {
        assert!(handler_exit(Ok(Ok(()))).is_ok());

        let err = handler_exit(Ok(Err(std::io::Error::other("poll task panicked")))).unwrap_err();
        assert!(matches!(err, TuiError::Event(ref msg) if msg == "poll task panicked"));
    }
}
