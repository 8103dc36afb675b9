//! Command orchestration helpers from UI actions to backend command queue.

use client_core::PredictionError;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::{FormController, RequestToken, SubmitRefusal};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend command processor disconnected (possible startup/runtime failure)"
                .to_string(),
        ),
    }
}

/// Starts a submission and queues it for the backend worker.
///
/// A submission that cannot be queued is settled as failed right away so
/// the form never stays in the loading state.
pub fn submit_prediction(
    controller: &mut FormController,
    cmd_tx: &Sender<BackendCommand>,
) -> Result<RequestToken, SubmitRefusal> {
    let submission = controller.begin_submission()?;
    let token = submission.token;

    if let Err(reason) = dispatch_backend_command(
        cmd_tx,
        BackendCommand::Predict {
            token,
            passenger: submission.passenger,
        },
    ) {
        tracing::error!(token = token.value(), %reason, "failed to queue prediction request");
        controller.settle(token, Err(PredictionError::transport(reason)));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::reducer::FormPhase;
    use crossbeam_channel::bounded;
    use shared::PassengerField;

    fn named_controller() -> FormController {
        let mut controller = FormController::new("http://localhost:8000");
        controller
            .apply_field_change(PassengerField::Name, "Moran, Mr. James")
            .expect("name");
        controller
    }

    #[test]
    fn queued_submission_carries_token_and_draft() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut controller = named_controller();

        let token = submit_prediction(&mut controller, &cmd_tx).expect("submit");
        assert!(controller.is_loading());

        match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::Predict {
                token: queued,
                passenger,
            } => {
                assert_eq!(queued, token);
                assert_eq!(&passenger, controller.draft());
            }
        }
    }

    #[test]
    fn disconnected_worker_settles_submission_as_error() {
        let (cmd_tx, cmd_rx) = bounded(4);
        drop(cmd_rx);
        let mut controller = named_controller();

        submit_prediction(&mut controller, &cmd_tx).expect("submit");
        assert!(!controller.is_loading());
        assert_eq!(controller.phase(), FormPhase::Error);
        assert!(controller
            .error()
            .expect("error message")
            .contains("disconnected"));
    }

    #[test]
    fn full_queue_is_reported() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut controller = named_controller();

        submit_prediction(&mut controller, &cmd_tx).expect("first");
        submit_prediction(&mut controller, &cmd_tx).expect("second");
        assert_eq!(
            controller.error(),
            Some("UI command queue is full; please retry")
        );
        assert!(!controller.is_loading());
    }

    #[test]
    fn refused_submission_queues_nothing() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut controller = FormController::new("http://localhost:8000");

        assert_eq!(
            submit_prediction(&mut controller, &cmd_tx),
            Err(SubmitRefusal::MissingName)
        );
        assert!(cmd_rx.try_recv().is_err());
    }
}
