pub mod moves;
pub mod opponent;
pub mod session;
pub mod suspense;
pub mod commentary;
pub mod captions;

// Collaborator seams: the controller talks to the outside only through these
pub mod presentation;
pub mod audio;
pub mod timer;

pub mod controller;
pub mod engine;

/// Sink and transport failures are logged and swallowed so they never reach the state machine
pub(crate) fn tolerate(result: anyhow::Result<()>, action: &'static str) {
    if let Err(error) = result {
        tracing::warn!(action, error = %error, "collaborator call failed");
    }
}
