//! Line-oriented conversation view over async stdin.

use std::io::{self, Write};

use metaprompt_ai::ErrorKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, warn};

use crate::app::{App, SubmitOutcome};
use crate::commands::{self, ReplCommand};
use crate::conversation::render;

/// Run the conversation until `/quit` or end of input.
pub async fn run<R, W>(app: &mut App, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let strings = app.strings();
    let mut lines = input.lines();

    writeln!(out, "{}\n", strings.welcome)?;
    if !app.has_credential() && !prompt_for_key(app, &mut lines, out).await? {
        return Ok(());
    }

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match commands::parse(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Prompt(text) => {
                writeln!(out, "{}", strings.thinking)?;
                let (outcome, input_closed) =
                    submit_while_reading(app, &text, &mut lines, out).await?;
                match outcome {
                    SubmitOutcome::Ignored => {}
                    SubmitOutcome::NeedsCredential => {
                        writeln!(out, "{}", strings.error_key_missing)?;
                        if !input_closed && !prompt_for_key(app, &mut lines, out).await? {
                            break;
                        }
                    }
                    SubmitOutcome::Replied { reply, error } => {
                        writeln!(out, "{}", render(&reply, strings))?;
                        if matches!(
                            error,
                            Some(ErrorKind::CredentialMissing | ErrorKind::CredentialInvalid)
                        ) && !input_closed
                            && !prompt_for_key(app, &mut lines, out).await?
                        {
                            break;
                        }
                    }
                }
                if input_closed {
                    break;
                }
            }
            ReplCommand::KeySet => {
                if !prompt_for_key(app, &mut lines, out).await? {
                    break;
                }
            }
            ReplCommand::KeyClear => match app.clear_key() {
                Ok(()) => writeln!(out, "{}", strings.key_cleared)?,
                Err(e) => writeln!(out, "{e}")?,
            },
            ReplCommand::KeyStatus => writeln!(out, "{}", app.key_status())?,
            ReplCommand::Test => report_connection(app, out).await?,
            ReplCommand::Attach(path) => match app.attach(&path) {
                Ok(file) => writeln!(
                    out,
                    "{} {} ({} bytes)",
                    strings.attached,
                    file.name(),
                    file.size()
                )?,
                Err(e) => writeln!(out, "{}: {e}", path.display())?,
            },
            ReplCommand::Detach => {
                let text = if app.detach() {
                    strings.detached
                } else {
                    strings.nothing_attached
                };
                writeln!(out, "{text}")?;
            }
            ReplCommand::Reset => {
                app.reset();
                writeln!(out, "{}", strings.reset_done)?;
            }
            ReplCommand::Status => writeln!(out, "{}", app.status_line())?,
            ReplCommand::Help => writeln!(out, "{}", strings.help)?,
            ReplCommand::Quit => break,
            ReplCommand::Unknown(command) => {
                writeln!(out, "{} {command}", strings.unknown_command)?;
            }
        }
    }

    debug!("Conversation view closed");
    Ok(())
}

/// Await a submit while draining input typed in the meantime.
///
/// Lines read while the request is in flight are dropped with a notice.
/// The flag is true when input ended during the request.
async fn submit_while_reading<R, W>(
    app: &mut App,
    text: &str,
    lines: &mut Lines<R>,
    out: &mut W,
) -> io::Result<(SubmitOutcome, bool)>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let strings = app.strings();
    let mut input_closed = false;
    let submit = app.submit(text);
    tokio::pin!(submit);

    loop {
        tokio::select! {
            biased;
            outcome = &mut submit => return Ok((outcome, input_closed)),
            line = lines.next_line(), if !input_closed => match line? {
                Some(_) => writeln!(out, "{}", strings.busy)?,
                None => input_closed = true,
            },
        }
    }
}

/// Ask for a key: the provider's picker first, then a typed line.
///
/// Returns `Ok(false)` when input ended.
async fn prompt_for_key<R, W>(
    app: &mut App,
    lines: &mut Lines<R>,
    out: &mut W,
) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let strings = app.strings();

    match app.select_key() {
        Ok(true) if app.has_credential() => {
            writeln!(out, "{}", strings.key_saved)?;
            report_connection(app, out).await?;
            return Ok(true);
        }
        Ok(_) => {}
        Err(e) => {
            warn!(error = %e, "Key picker failed");
            writeln!(out, "{e}")?;
        }
    }

    write!(out, "{}", strings.key_prompt)?;
    out.flush()?;
    let Some(line) = lines.next_line().await? else {
        return Ok(false);
    };

    match app.set_key(&line) {
        Ok(true) => {
            writeln!(out, "{}", strings.key_saved)?;
            report_connection(app, out).await?;
        }
        Ok(false) => writeln!(out, "{}", strings.key_entry_cancelled)?,
        Err(e) => {
            warn!(error = %e, "Saving API key failed");
            writeln!(out, "{e}")?;
        }
    }
    Ok(true)
}

async fn report_connection<W: Write>(app: &App, out: &mut W) -> io::Result<()> {
    let strings = app.strings();
    writeln!(out, "{}", strings.test_running)?;
    let text = if app.test_connection().await {
        strings.test_ok
    } else {
        strings.test_failed
    };
    writeln!(out, "{text}")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use metaprompt_ai::AiError;
    use tokio::io::{AsyncWriteExt, BufReader};

    use super::*;
    use crate::strings::EN;
    use crate::test_support::{fixture, open_keys};

    async fn run_script(app: &mut App, script: &str) -> String {
        let mut out = Vec::new();
        run(app, BufReader::new(script.as_bytes()), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn asks_for_key_on_start_and_saves_it() {
        let mut f = fixture(None);
        let out = run_script(&mut f.app, "AIzaSyTypedKey\n/quit\n").await;

        assert!(out.contains(EN.key_prompt));
        assert!(out.contains(EN.key_saved));
        assert!(out.contains(EN.test_ok));
        assert_eq!(
            open_keys(&f.storage).get().map(|c| c.expose()),
            Some("AIzaSyTypedKey")
        );
    }

    #[tokio::test]
    async fn blank_key_entry_is_cancelled() {
        let mut f = fixture(None);
        let out = run_script(&mut f.app, "\n/quit\n").await;
        assert!(out.contains(EN.key_entry_cancelled));
        assert!(!f.app.has_credential());
    }

    #[tokio::test]
    async fn prompt_prints_reply() {
        let mut f = fixture(Some("AIzaKey"));
        f.factory.client.push_reply("[Copy and use] be concise");
        let out = run_script(&mut f.app, "make me a prompt\n").await;

        assert!(!out.contains(EN.key_prompt));
        assert!(out.contains(EN.thinking));
        assert!(out.contains("Metaprompt:\n[Copy and use] be concise"));
        assert_eq!(f.app.conversation().messages().len(), 2);
    }

    #[tokio::test]
    async fn rejected_key_reopens_key_prompt() {
        let mut f = fixture(Some("AIzaOld"));
        f.factory.client.push_error(AiError::Http {
            status: 403,
            body: "PERMISSION_DENIED".into(),
        });
        let out = run_script(&mut f.app, "hello\nAIzaNew\n/key status\n").await;

        assert!(out.contains(EN.error_key_invalid));
        assert!(out.contains(EN.key_prompt));
        assert_eq!(
            open_keys(&f.storage).get().map(|c| c.expose()),
            Some("AIzaNew")
        );
    }

    #[tokio::test]
    async fn transient_failure_keeps_going() {
        let mut f = fixture(Some("AIzaKey"));
        f.factory.client.push_error(AiError::RateLimited);
        let out = run_script(&mut f.app, "hello\nagain\n").await;

        assert!(out.contains(EN.error_generic));
        assert!(!out.contains(EN.key_prompt));
        assert_eq!(f.app.conversation().messages().len(), 4);
        assert_eq!(f.factory.connect_count(), 1);
    }

    #[tokio::test]
    async fn commands_are_handled() {
        let mut f = fixture(Some("AIzaKey"));
        let path = f.dir.path().join("notes.txt");
        std::fs::write(&path, "context").unwrap();
        let script = format!(
            "/attach {}\n/status\n/detach\n/detach\n/reset\n/help\n/bogus\n\
             /key clear\n/key status\n",
            path.display()
        );
        let out = run_script(&mut f.app, &script).await;

        assert!(out.contains("Attached notes.txt (7 bytes)"));
        assert!(out.contains("attached notes.txt"));
        assert!(out.contains(EN.detached));
        assert!(out.contains(EN.nothing_attached));
        assert!(out.contains(EN.reset_done));
        assert!(out.contains("/attach <path>"));
        assert!(out.contains("Unknown command: /bogus"));
        assert!(out.contains(EN.key_cleared));
        assert!(out.contains(EN.key_none));
    }

    #[tokio::test]
    async fn bad_attachment_is_reported() {
        let mut f = fixture(Some("AIzaKey"));
        let out = run_script(&mut f.app, "/attach missing.pdf\n").await;
        assert!(out.contains("unsupported file type: missing.pdf"));
        assert!(f.app.conversation().attachment().is_none());
    }

    #[tokio::test]
    async fn input_during_pending_reply_is_dropped() {
        let mut f = fixture(Some("AIzaKey"));
        f.factory.client.set_delay(Duration::from_millis(200));

        let (mut writer, reader) = tokio::io::duplex(256);
        let typist = tokio::spawn(async move {
            writer.write_all(b"first\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            writer.write_all(b"typed while busy\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(400)).await;
        });

        let mut out = Vec::new();
        run(&mut f.app, BufReader::new(reader), &mut out)
            .await
            .unwrap();
        typist.await.unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(out.matches(EN.busy).count(), 1);
        assert_eq!(f.factory.client.prompts(), ["first"]);
        assert_eq!(f.app.conversation().messages().len(), 2);
    }

    #[tokio::test]
    async fn end_of_input_during_key_prompt_exits() {
        let mut f = fixture(None);
        let out = run_script(&mut f.app, "").await;
        assert!(out.contains(EN.welcome));
        assert!(out.ends_with(EN.key_prompt));
    }
}
