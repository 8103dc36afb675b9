//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{PredictionError, PredictionService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the backend worker thread. It runs until the command queue closes.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn PredictionService>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict { token, passenger } => {
                        let service = Arc::clone(&service);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let request =
                                tokio::spawn(async move { service.predict(&passenger).await });
                            let outcome = match request.await {
                                Ok(outcome) => outcome,
                                Err(err) => {
                                    tracing::error!(
                                        token = token.value(),
                                        "prediction task ended abnormally: {err}"
                                    );
                                    Err(PredictionError::Unknown)
                                }
                            };
                            if ui_tx
                                .try_send(UiEvent::PredictionSettled { token, outcome })
                                .is_err()
                            {
                                tracing::warn!(
                                    token = token.value(),
                                    "ui event queue unavailable; dropping prediction outcome"
                                );
                            }
                        });
                    }
                }
            }
            tracing::info!("backend command queue closed; worker exiting");
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use crossbeam_channel::bounded;
    use shared::{Passenger, PassengerField, Prediction};

    use crate::controller::reducer::{FormController, Submission};

    struct FixedService(Result<Prediction, PredictionError>);

    #[async_trait]
    impl PredictionService for FixedService {
        async fn predict(&self, _passenger: &Passenger) -> Result<Prediction, PredictionError> {
            self.0.clone()
        }
    }

    struct PanickingService;

    #[async_trait]
    impl PredictionService for PanickingService {
        async fn predict(&self, _passenger: &Passenger) -> Result<Prediction, PredictionError> {
            panic!("model backend adapter crashed");
        }
    }

    fn submission() -> Submission {
        let mut controller = FormController::new("http://localhost:8000");
        controller
            .apply_field_change(PassengerField::Name, "Palsson, Master. Gosta Leonard")
            .expect("name");
        controller.begin_submission().expect("submit")
    }

    fn next_settled(ui_rx: &Receiver<UiEvent>) -> (u64, Result<Prediction, PredictionError>) {
        loop {
            match ui_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("backend event")
            {
                UiEvent::PredictionSettled { token, outcome } => return (token.value(), outcome),
                UiEvent::Info(_) => continue,
                UiEvent::Error(err) => panic!("unexpected backend error: {}", err.message()),
            }
        }
    }

    #[test]
    fn forwards_service_outcome_with_request_token() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(16);
        let prediction = Prediction {
            survived: 1,
            predicted_value: 0.83,
        };
        let handle = launch(cmd_rx, ui_tx, Arc::new(FixedService(Ok(prediction))));

        let submission = submission();
        let expected_token = submission.token.value();
        cmd_tx
            .send(BackendCommand::Predict {
                token: submission.token,
                passenger: submission.passenger,
            })
            .expect("queue command");

        let (token, outcome) = next_settled(&ui_rx);
        assert_eq!(token, expected_token);
        assert_eq!(outcome, Ok(prediction));

        drop(cmd_tx);
        handle.join().expect("worker exits");
    }

    #[test]
    fn aborted_request_settles_with_generic_error() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(16);
        let handle = launch(cmd_rx, ui_tx, Arc::new(PanickingService));

        let submission = submission();
        cmd_tx
            .send(BackendCommand::Predict {
                token: submission.token,
                passenger: submission.passenger,
            })
            .expect("queue command");

        let (_, outcome) = next_settled(&ui_rx);
        assert_eq!(outcome, Err(PredictionError::Unknown));

        drop(cmd_tx);
        handle.join().expect("worker exits");
    }
}
