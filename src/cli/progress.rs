use std::future::Future;
use std::io::Write;

use crate::core::{
    reveal::{STATUS_TICK, TYPEWRITER_TICK},
    StatusRotation, Typewriter,
};

/// Await `task` while cycling progress messages on stderr. The ticker is
/// aborted as soon as the task completes.
pub async fn with_status_rotation<F>(task: F) -> F::Output
where
    F: Future,
{
    let ticker = tokio::spawn(async move {
        let mut rotation = StatusRotation::new();
        let mut interval = tokio::time::interval(STATUS_TICK);
        eprintln!("{}", rotation.current());
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            eprintln!("{}", rotation.advance());
        }
    });

    let output = task.await;
    ticker.abort();
    output
}

/// Reveal the typewriter's text on stdout one character per tick. Ctrl-C
/// skips to the end. Returns `false` when the reveal was interrupted.
pub async fn reveal(typewriter: &mut Typewriter) -> std::io::Result<bool> {
    let mut stdout = std::io::stdout();
    let mut interval = tokio::time::interval(TYPEWRITER_TICK);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            _ = &mut interrupt => {
                let rest = typewriter.text()[typewriter.visible().len()..].to_string();
                typewriter.finish();
                writeln!(stdout, "{rest}")?;
                return Ok(false);
            }
            _ = interval.tick() => {
                match typewriter.advance() {
                    Some(chunk) => {
                        write!(stdout, "{chunk}")?;
                        stdout.flush()?;
                    }
                    None => {
                        writeln!(stdout)?;
                        return Ok(true);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_rotation_returns_task_output() {
        let value = with_status_rotation(async { 42 }).await;
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_reveal_finishes_the_text() {
        let mut typewriter = Typewriter::new("hey");
        let completed = reveal(&mut typewriter).await.unwrap();
        assert!(completed);
        assert!(typewriter.is_finished());
    }
}
