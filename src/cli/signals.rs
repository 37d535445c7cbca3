//! OS signal handling for the page loop

use colored::Colorize;

use crate::application::{PageDispatcher, PageEvent};

/// Post [`PageEvent::Shutdown`] when SIGINT or SIGTERM arrives
#[cfg(unix)]
pub fn install_shutdown_handlers(dispatcher: &PageDispatcher) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let tx_int = dispatcher.clone();
    tokio::spawn(async move {
        while sigint.recv().await.is_some() {
            eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
            if !tx_int.post(PageEvent::Shutdown) {
                break;
            }
        }
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    let tx_term = dispatcher.clone();
    tokio::spawn(async move {
        if sigterm.recv().await.is_some() {
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            tx_term.post(PageEvent::Shutdown);
        }
    });

    Ok(())
}

/// Post [`PageEvent::Shutdown`] on Ctrl+C
#[cfg(not(unix))]
pub fn install_shutdown_handlers(dispatcher: &PageDispatcher) -> Result<(), std::io::Error> {
    let tx = dispatcher.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("{} Received Ctrl+C (shutdown)", "↓".cyan());
            if !tx.post(PageEvent::Shutdown) {
                break;
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handlers_install_inside_runtime() {
        let (dispatcher, _rx) = PageDispatcher::channel();
        install_shutdown_handlers(&dispatcher).unwrap();
    }
}
